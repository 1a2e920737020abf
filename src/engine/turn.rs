use serde::{Deserialize, Serialize};

use crate::domain::TilePosition;

/// Текущий ход: 0, 1 или 2 открытые, ещё не разрешённые плитки.
///
/// Разрешение пары (сравнение символов) происходит внутри одного клика,
/// поэтому отдельного хранимого состояния "Resolving" нет: после него
/// ход либо сразу `Idle` (пара найдена), либо `AwaitingHide` (промах).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    #[default]
    Idle,
    OneSelected {
        first: TilePosition,
    },
    /// Промах открыт, ждём таймер скрытия. Новые клики отклоняются.
    AwaitingHide {
        first: TilePosition,
        second: TilePosition,
    },
}

impl TurnState {
    pub fn is_idle(&self) -> bool {
        matches!(self, TurnState::Idle)
    }

    pub fn is_awaiting_hide(&self) -> bool {
        matches!(self, TurnState::AwaitingHide { .. })
    }

    /// Позиции, открытые в этом ходе (не больше двух).
    pub fn revealed(&self) -> Vec<TilePosition> {
        match *self {
            TurnState::Idle => Vec::new(),
            TurnState::OneSelected { first } => vec![first],
            TurnState::AwaitingHide { first, second } => vec![first, second],
        }
    }
}
