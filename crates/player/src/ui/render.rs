//! Plain-text rendering of session state.

use std::fmt::Write;

use udh_domain::{GameData, GameInfo, Notification, NotificationKind};

use crate::state::GameState;

pub fn render_game(data: &GameData) -> String {
    let mut out = String::new();
    if !data.title.is_empty() {
        let _ = writeln!(out, "== {} ==", data.title);
    }
    if let Some(saved) = data.updated_at_utc().or_else(|| data.created_at_utc()) {
        let _ = writeln!(out, "Saved: {}", saved.format("%Y-%m-%d %H:%M UTC"));
    }
    let _ = writeln!(out, "{}", data.content.trim());

    if data.has_choices() {
        out.push('\n');
        for (i, choice) in data.choices.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, choice);
        }
    } else {
        let _ = writeln!(out, "\n(no choices available)");
    }
    out
}

pub fn render_info(info: &GameInfo) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Progress: {}%", info.progress_percent());

    if let Some(location) = info.current_location.as_deref() {
        let _ = writeln!(out, "Location: {location}");
    }
    if let Some(mood) = info.current_mood.as_deref() {
        let _ = writeln!(out, "Mood: {mood}");
    }

    let stats: Vec<String> = [
        ("Health", info.health),
        ("Sanity", info.sanity),
        ("Money", info.money),
        ("Purification", info.purification),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.map(|v| format!("{label} {v}")))
    .collect();
    if !stats.is_empty() {
        let _ = writeln!(out, "{}", stats.join(" | "));
    }

    let inventory = info.inventory();
    if inventory.is_empty() {
        let _ = writeln!(out, "Inventory: (empty)");
    } else {
        let _ = writeln!(out, "Inventory: {}", inventory.join(", "));
    }

    // Malformed embedded JSON only hides the monster list.
    match info.monster_data() {
        Ok(Some(monsters)) if !monsters.monsters.is_empty() => {
            let _ = writeln!(out, "Monsters:");
            for monster in &monsters.monsters {
                let _ = writeln!(out, "  - {} (weakness: {})", monster.name, monster.weakness);
            }
        }
        Ok(_) => {}
        Err(e) => tracing::debug!(error = %e, "Skipping monster list"),
    }
    out
}

pub fn render_notification(notification: &Notification) -> String {
    let tag = match notification.kind {
        NotificationKind::Success => "ok",
        NotificationKind::Error => "error",
        NotificationKind::Warning => "warn",
        NotificationKind::Info => "info",
    };
    format!("[{tag}] {}", notification.message)
}

/// Everything worth showing after an action.
pub fn render_state(state: &GameState) -> String {
    let mut out = String::new();
    if let Some(data) = &state.game_data {
        out.push_str(&render_game(data));
    }
    if let Some(notification) = &state.notification {
        let _ = writeln!(out, "{}", render_notification(notification));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> GameData {
        GameData {
            id: "g1".into(),
            title: "UDH".into(),
            content: "고운사에 도착했습니다.".into(),
            choices: vec!["사찰 안으로 들어간다".into(), "도망간다".into()],
            ..GameData::default()
        }
    }

    #[test]
    fn game_lists_numbered_choices() {
        let text = render_game(&game());
        assert!(text.starts_with("== UDH =="));
        assert!(text.contains("  1. 사찰 안으로 들어간다"));
        assert!(text.contains("  2. 도망간다"));
    }

    #[test]
    fn game_shows_latest_timestamp() {
        let mut data = game();
        data.created_at = "2024-05-01T09:00:00Z".into();
        assert!(render_game(&data).contains("Saved: 2024-05-01 09:00 UTC"));

        data.updated_at = "2024-05-02T18:30:00+09:00".into();
        assert!(render_game(&data).contains("Saved: 2024-05-02 09:30 UTC"));

        data.updated_at = "yesterday".into();
        assert!(render_game(&data).contains("Saved: 2024-05-01 09:00 UTC"));
    }

    #[test]
    fn game_without_timestamps_omits_saved_line() {
        assert!(!render_game(&game()).contains("Saved:"));
    }

    #[test]
    fn game_without_choices_says_so() {
        let text = render_game(&GameData::default());
        assert!(text.contains("(no choices available)"));
    }

    #[test]
    fn info_shows_stats_and_inventory() {
        let info = GameInfo {
            progress: 42.4,
            current_location: Some("고운사_입구".into()),
            health: Some(80.0),
            money: Some(15.0),
            items: Some("부적, 염주,".into()),
            monster: Some(r#"{"monsters":[{"name":"도깨비","퇴치법":"팥","lore":""}]}"#.into()),
            ..GameInfo::default()
        };
        let text = render_info(&info);
        assert!(text.contains("Progress: 42%"));
        assert!(text.contains("Location: 고운사_입구"));
        assert!(text.contains("Health 80 | Money 15"));
        assert!(text.contains("Inventory: 부적, 염주"));
        assert!(text.contains("도깨비 (weakness: 팥)"));
    }

    #[test]
    fn notification_is_tagged() {
        assert_eq!(
            render_notification(&Notification::error("다시 로그인 해주세요!")),
            "[error] 다시 로그인 해주세요!"
        );
    }

    #[test]
    fn state_combines_game_and_notification() {
        let state = GameState {
            game_data: Some(game()),
            notification: Some(Notification::success("선택이 완료되었습니다.")),
            ..GameState::default()
        };
        let text = render_state(&state);
        assert!(text.contains("고운사에 도착했습니다."));
        assert!(text.ends_with("[ok] 선택이 완료되었습니다.\n"));
    }
}
