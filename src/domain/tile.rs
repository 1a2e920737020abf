use serde::{Deserialize, Serialize};

use crate::domain::symbol::Symbol;

/// Состояние лицевой стороны плитки.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceState {
    /// Рубашкой вверх.
    Hidden,
    /// Открыта в текущем ходе, исход ещё не применён.
    Revealed,
    /// Пара найдена, плитка открыта навсегда.
    Matched,
}

/// Одна позиция на поле. Символ фиксирован на всё поколение партии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tile {
    pub symbol: Symbol,
    pub face: FaceState,
}

impl Tile {
    pub fn hidden(symbol: Symbol) -> Self {
        Self {
            symbol,
            face: FaceState::Hidden,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.face == FaceState::Hidden
    }

    pub fn is_matched(&self) -> bool {
        self.face == FaceState::Matched
    }
}
