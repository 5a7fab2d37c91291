//! Terminal runner: reads commands from stdin and drives the game session.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::application::services::GameSession;
use crate::infrastructure::{TerminalSignOut, TokenStore};
use crate::messages;
use crate::ui::{render_info, render_notification, render_state, Command, HELP};

pub struct RunnerDeps {
    pub session: GameSession,
    pub tokens: Arc<TokenStore>,
    pub sign_out: Arc<TerminalSignOut>,
}

/// Result of handling one command
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reply {
    pub output: String,
    pub quit: bool,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            quit: false,
        }
    }
}

pub struct Runner {
    session: GameSession,
    tokens: Arc<TokenStore>,
    sign_out: Arc<TerminalSignOut>,
}

impl Runner {
    pub fn new(deps: RunnerDeps) -> Self {
        let RunnerDeps {
            session,
            tokens,
            sign_out,
        } = deps;
        Self {
            session,
            tokens,
            sign_out,
        }
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        stdout.write_all(format!("{HELP}\n\n").as_bytes()).await?;
        if self.session.is_authenticated().await {
            self.session.auto_load_game_info().await;
        } else {
            stdout
                .write_all(format!("{}\n", messages::LOGIN_REQUIRED).as_bytes())
                .await?;
        }

        loop {
            stdout.write_all(b"> ").await?;
            stdout.flush().await?;

            let Some(line) = lines.next_line().await? else {
                tracing::debug!("stdin closed");
                break;
            };

            let reply = match line.parse::<Command>() {
                Ok(command) => self.handle(command).await,
                Err(e) => Reply::text(e.to_string()),
            };

            let mut output = reply.output;
            if self.sign_out.take_signed_out() {
                output.push_str("Signed out. Use 'login <token>' to continue.\n");
            }
            if !output.is_empty() {
                if !output.ends_with('\n') {
                    output.push('\n');
                }
                stdout.write_all(output.as_bytes()).await?;
            }
            if reply.quit {
                break;
            }
        }

        tracing::info!("Runner stopped");
        Ok(())
    }

    pub async fn handle(&self, command: Command) -> Reply {
        tracing::debug!(?command, "Handling command");

        match command {
            Command::NewGame => {
                // Outcome is already in the state; errors carry no extra output.
                let _ = self.session.start_new_game().await;
                self.state_reply()
            }
            Command::Load => {
                let _ = self.session.load_game().await;
                self.state_reply()
            }
            Command::Info => match self.session.load_game_info().await {
                Ok(info) => Reply::text(render_info(&info)),
                Err(_) => self.state_reply(),
            },
            Command::Choose(index) => {
                let state = self.session.state();
                if let Some(data) = &state.game_data {
                    if data.choice(index).is_none() {
                        return Reply::text(format!(
                            "Choose between 1 and {}",
                            data.choices.len()
                        ));
                    }
                }
                let _ = self.session.select_choice(index).await;
                self.state_reply()
            }
            Command::Reset => {
                self.session.reset_game();
                Reply::text(messages::GAME_RESET)
            }
            Command::Login(token) => {
                self.tokens.set(token);
                self.session.auto_load_game_info().await;
                Reply::text("Access token set.")
            }
            Command::Logout => {
                self.tokens.clear();
                self.session.reset_game();
                Reply::text("Signed out.")
            }
            Command::Dismiss => {
                self.session.close_notification();
                Reply::default()
            }
            Command::Help => Reply::text(HELP),
            Command::Quit => Reply {
                output: String::new(),
                quit: true,
            },
        }
    }

    fn state_reply(&self) -> Reply {
        let state = self.session.state();
        let mut output = render_state(&state);
        if state.game_data.is_none() && state.notification.is_none() {
            if let Some(error) = &state.error {
                output = render_notification(&udh_domain::Notification::error(error.clone()));
            }
        }
        Reply::text(output)
    }
}
