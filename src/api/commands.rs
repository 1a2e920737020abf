use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::domain::{Generation, TilePosition};
use crate::engine::{ClickOutcome, RandomSource, Session};
use crate::time_ctrl::Scheduler;

/// Команда от слоя отображения. Всё, что меняет состояние партии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Клик по плитке.
    ClickTile { position: TilePosition },

    /// Начать заново: новая перестановка, счётчики к базовым.
    Restart,
}

/// Текстовая форма для терминала: `c N` / `click N`, `r` / `restart`.
impl FromStr for Command {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let command = match parts.next() {
            Some("c") | Some("click") => {
                let raw = parts
                    .next()
                    .ok_or_else(|| ApiError::BadRequest("нужен номер плитки: c N".to_string()))?;
                let position = raw.parse::<TilePosition>().map_err(|e| {
                    ApiError::BadRequest(format!("номер плитки `{}`: {}", raw, e))
                })?;
                Command::ClickTile { position }
            }
            Some("r") | Some("restart") => Command::Restart,
            Some(other) => {
                return Err(ApiError::BadRequest(format!("неизвестная команда `{}`", other)))
            }
            None => return Err(ApiError::BadRequest("пустая команда".to_string())),
        };

        if let Some(extra) = parts.next() {
            return Err(ApiError::BadRequest(format!("лишний аргумент `{}`", extra)));
        }
        Ok(command)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandOutcome {
    Click(ClickOutcome),
    Restarted { generation: Generation },
}

/// Применить команду к сессии.
pub fn apply_command<R, S>(
    session: &mut Session<R, S>,
    command: Command,
) -> Result<CommandOutcome, ApiError>
where
    R: RandomSource,
    S: Scheduler,
{
    match command {
        Command::ClickTile { position } => {
            let outcome = session.on_tile_clicked(position)?;
            Ok(CommandOutcome::Click(outcome))
        }
        Command::Restart => {
            session.restart();
            Ok(CommandOutcome::Restarted {
                generation: session.generation(),
            })
        }
    }
}
