//! Domain verbs exposed by the game service.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameOperation {
    NewGame,
    LoadGame,
    LoadGameInfo,
    SelectChoice,
}

impl GameOperation {
    /// Notification text shown when the operation succeeds.
    pub fn success_message(&self) -> &'static str {
        match self {
            Self::NewGame => "새 게임이 시작되었습니다.",
            Self::LoadGame => "게임을 불러왔습니다.",
            Self::LoadGameInfo => "게임 정보를 불러왔습니다.",
            Self::SelectChoice => "선택이 완료되었습니다.",
        }
    }

    /// Text used when the engine gave neither data nor an error message.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::NewGame => "새 게임을 시작하는데 실패했습니다.",
            Self::LoadGame => "게임을 불러오는데 실패했습니다.",
            Self::LoadGameInfo => "게임 정보를 불러오는데 실패했습니다.",
            Self::SelectChoice => "선택에 실패했습니다.",
        }
    }
}

impl fmt::Display for GameOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NewGame => "new_game",
            Self::LoadGame => "load_game",
            Self::LoadGameInfo => "load_game_info",
            Self::SelectChoice => "select_choice",
        };
        f.write_str(name)
    }
}
