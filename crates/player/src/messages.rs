//! User-facing message catalog.
//!
//! These strings are surfaced verbatim by the UI layer, so tests assert on
//! them directly.

pub const NETWORK_ERROR: &str = "네트워크 연결에 실패했습니다.";
pub const TIMEOUT_ERROR: &str = "요청 시간이 초과되었습니다.";
pub const UNAUTHORIZED: &str = "인증이 필요합니다.";
pub const FORBIDDEN: &str = "접근 권한이 없습니다.";
pub const NOT_FOUND: &str = "요청한 리소스를 찾을 수 없습니다.";
pub const INTERNAL_ERROR: &str = "서버 오류가 발생했습니다.";
pub const UNKNOWN_ERROR: &str = "알 수 없는 오류가 발생했습니다.";

/// Replaces any 401 message coming out of the game service
pub const RELOGIN_REQUIRED: &str = "다시 로그인 해주세요!";
pub const LOGIN_REQUIRED: &str = "로그인이 필요합니다.";
pub const SESSION_EXPIRED: &str = "세션이 만료되었습니다. 다시 로그인 해주세요!";
pub const NO_SAVED_DATA: &str = "저장된 데이터가 없습니다. 새로운 게임을 시작합니다.";
pub const NO_SAVED_DATA_AFTER_RECOVERY: &str =
    "새 게임을 시작했지만 게임 정보를 불러오지 못했습니다.";
pub const NO_ACTIVE_GAME: &str = "진행 중인 게임이 없습니다. 새 게임을 시작해주세요.";
pub const GAME_RESET: &str = "게임이 초기화되었습니다.";
