//! End-to-end tests of the reqwest transport against a local axum engine.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use udh_domain::{LoadOutcome, Notification};
use udh_player::application::api::Api;
use udh_player::application::services::GameService;
use udh_player::infrastructure::{
    ApiConfig, CoordinatorConfig, HttpClient, TerminalSignOut, TokenStore,
};
use udh_player::messages;
use udh_player::ports::outbound::{ApiErrorKind, ApiRequest, RawApiPort};
use udh_player::{GameSession, ServiceError};

async fn spawn_engine(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn config_for(addr: SocketAddr) -> ApiConfig {
    ApiConfig::new(&format!("http://{addr}")).unwrap()
}

fn service_for(client: HttpClient) -> GameService {
    GameService::new(Api::new(Arc::new(client)))
}

async fn echo_auth(headers: HeaderMap) -> Json<Value> {
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    Json(json!({ "id": "g1", "content": auth.unwrap_or_else(|| "anonymous".into()) }))
}

#[tokio::test]
async fn bearer_header_only_when_token_given() {
    let addr = spawn_engine(Router::new().route("/loadgame", get(echo_auth))).await;
    let client = HttpClient::new(&config_for(addr));

    let with_token = client
        .request(ApiRequest::get("/loadgame").with_token(Some("abc")))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(with_token["content"], "Bearer abc");

    let without_token = client
        .request(ApiRequest::get("/loadgame"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(without_token["content"], "anonymous");
}

#[tokio::test]
async fn unauthorized_runs_handler_exactly_once() {
    let addr = spawn_engine(Router::new().route(
        "/selectchoice",
        post(|| async { StatusCode::UNAUTHORIZED }),
    ))
    .await;

    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let client = HttpClient::new(&config_for(addr)).with_unauthorized_handler(Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let err = client
        .send(ApiRequest::post("/selectchoice", Some(json!({ "select": 0 }))).with_token(Some("t")))
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        ServiceError::from(err).to_string(),
        messages::RELOGIN_REQUIRED
    );
}

#[tokio::test]
async fn session_tears_down_on_unauthorized_choice() {
    let router = Router::new()
        .route(
            "/newgame",
            get(|| async { Json(json!({ "id": "g1", "content": "...", "choices": ["a", "b"] })) }),
        )
        .route("/loadinfo", get(|| async { Json(json!({ "game_id": "g1" })) }))
        .route(
            "/selectchoice",
            post(|| async { (StatusCode::UNAUTHORIZED, Json(json!({ "message": "expired" }))) }),
        );
    let addr = spawn_engine(router).await;

    let tokens = Arc::new(TokenStore::new(Some("tok".into())));
    let sign_out = Arc::new(TerminalSignOut::new(tokens.clone()));
    let session = GameSession::connect(
        &config_for(addr),
        CoordinatorConfig::default().with_sign_out_delay(Duration::from_millis(50)),
        tokens.clone(),
        sign_out.clone(),
    );

    session.start_new_game().await.unwrap();
    assert!(session.state().game_info.is_some());

    let err = session.select_choice(1).await.unwrap_err();
    assert_eq!(err, ServiceError::Unauthorized);

    let state = session.state();
    assert!(state.game_data.is_none());
    assert!(state.game_info.is_none());
    assert_eq!(
        state.notification,
        Some(Notification::error(messages::SESSION_EXPIRED))
    );

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(sign_out.take_signed_out());
    assert_eq!(tokens.current(), None);
}

#[tokio::test]
async fn slow_engine_times_out_distinctly_from_network_failure() {
    let addr = spawn_engine(Router::new().route(
        "/loadinfo",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!({ "game_id": "late" }))
        }),
    ))
    .await;
    let config = config_for(addr).with_timeout(Duration::from_millis(200));
    let service = service_for(HttpClient::new(&config));

    let err = service.load_game_info("t").await.unwrap_err();
    assert!(matches!(err, ServiceError::TimeoutFailure(_)));
    assert_eq!(err.to_string(), messages::TIMEOUT_ERROR);
    assert_ne!(err.to_string(), messages::NETWORK_ERROR);
}

#[tokio::test]
async fn refused_connection_is_network_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpClient::new(&config_for(addr).with_timeout(Duration::from_secs(5)));
    let err = client
        .request(ApiRequest::get("/newgame").with_token(Some("t")))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Network);

    let err = service_for(client).start_new_game("t").await.unwrap_err();
    assert_eq!(err, ServiceError::NetworkFailure(messages::NETWORK_ERROR.into()));
}

#[tokio::test]
async fn empty_info_body_means_no_saved_data() {
    let addr = spawn_engine(Router::new().route("/loadinfo", get(|| async { StatusCode::OK }))).await;
    let service = service_for(HttpClient::new(&config_for(addr)));

    let err = service.load_game_info("t").await.unwrap_err();
    assert_eq!(err, ServiceError::NoSavedData);
    assert_eq!(
        err.to_string(),
        "저장된 데이터가 없습니다. 새로운 게임을 시작합니다."
    );
}

#[tokio::test]
async fn null_load_body_is_a_redirect() {
    let addr = spawn_engine(Router::new().route("/loadgame", get(|| async { Json(Value::Null) }))).await;
    let service = service_for(HttpClient::new(&config_for(addr)));

    let outcome = service.load_game("t").await.unwrap();
    assert_eq!(outcome, LoadOutcome::EmptyRedirect);
}

#[tokio::test]
async fn server_errors_carry_body_message_or_catalog_text() {
    let router = Router::new()
        .route(
            "/newgame",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "message": "generation failed" })),
                )
            }),
        )
        .route(
            "/loadgame",
            get(|| async { (StatusCode::NOT_FOUND, "<html>not here</html>") }),
        );
    let addr = spawn_engine(router).await;
    let service = service_for(HttpClient::new(&config_for(addr)));

    let err = service.start_new_game("t").await.unwrap_err();
    assert_eq!(
        err,
        ServiceError::ServerError {
            status: 500,
            message: "generation failed".into()
        }
    );

    let err = service.load_game("t").await.unwrap_err();
    assert_eq!(
        err,
        ServiceError::ServerError {
            status: 404,
            message: messages::NOT_FOUND.into()
        }
    );
}
