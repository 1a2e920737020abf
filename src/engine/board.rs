//! Поле и машина состояний хода.
//!
//! Board ничего не знает про счёт и таймеры: он только меняет состояния
//! плиток и возвращает исход, а Session уже начисляет штрафы и ставит таймеры.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::deck::Deck;
use crate::domain::tile::{FaceState, Tile};
use crate::domain::TilePosition;
use crate::engine::errors::EngineError;
use crate::engine::shuffle::{shuffle, ShuffleRule};
use crate::engine::turn::TurnState;
use crate::engine::RandomSource;

/// Почему клик проигнорирован. Это НЕ ошибки.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// Идёт стартовый показ, ввод ещё закрыт.
    NotReady,
    /// Открыт промах, ждём таймер скрытия.
    AwaitingHide,
    AlreadyRevealed,
    AlreadyMatched,
}

/// Исход клика по плитке.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClickOutcome {
    Ignored(IgnoreReason),
    FirstRevealed {
        position: TilePosition,
    },
    Matched {
        first: TilePosition,
        second: TilePosition,
    },
    Mismatched {
        first: TilePosition,
        second: TilePosition,
    },
}

/// Что сделало срабатывание таймера скрытия.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HideOutcome {
    /// Стартовый показ закончен: всё спрятано, ввод открыт.
    StartupPeekEnded,
    /// Несовпавшая пара спрятана обратно.
    MismatchHidden {
        first: TilePosition,
        second: TilePosition,
    },
    /// Прятать нечего.
    Nothing,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<Tile>,
    turn: TurnState,
    /// false, пока не отработал стартовый таймер.
    ready: bool,
}

impl Board {
    /// Перемешать колоду и разложить её рубашкой вверх.
    /// Поле создаётся в фазе стартового показа (`ready == false`).
    pub fn deal<R>(mut deck: Deck, rng: &mut R, rule: ShuffleRule) -> Self
    where
        R: RandomSource + ?Sized,
    {
        shuffle(&mut deck.symbols, rng, rule);
        Self::from_symbols_in_order(deck)
    }

    /// Разложить колоду как есть, без перемешивания.
    pub fn from_symbols_in_order(deck: Deck) -> Self {
        Self {
            tiles: deck.symbols.into_iter().map(Tile::hidden).collect(),
            turn: TurnState::Idle,
            ready: false,
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn pair_count(&self) -> usize {
        self.tiles.len() / 2
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, position: TilePosition) -> Option<&Tile> {
        self.tiles.get(position)
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn count_in(&self, face: FaceState) -> usize {
        self.tiles.iter().filter(|t| t.face == face).count()
    }

    /// Клик игрока по позиции.
    ///
    /// Ошибка только одна: позиция вне поля. Всё остальное "неправильное"
    /// (не готово, ждём скрытия, плитка уже открыта) молча игнорируется.
    pub fn click(&mut self, position: TilePosition) -> Result<ClickOutcome, EngineError> {
        let board_len = self.tiles.len();
        let face = match self.tiles.get(position) {
            Some(tile) => tile.face,
            None => return Err(EngineError::InvalidClick { position, board_len }),
        };

        if !self.ready {
            return Ok(ClickOutcome::Ignored(IgnoreReason::NotReady));
        }
        let selected = match self.turn {
            TurnState::AwaitingHide { .. } => {
                return Ok(ClickOutcome::Ignored(IgnoreReason::AwaitingHide))
            }
            TurnState::Idle => None,
            TurnState::OneSelected { first } => Some(first),
        };
        match face {
            FaceState::Hidden => {}
            FaceState::Revealed => return Ok(ClickOutcome::Ignored(IgnoreReason::AlreadyRevealed)),
            FaceState::Matched => return Ok(ClickOutcome::Ignored(IgnoreReason::AlreadyMatched)),
        }

        self.tiles[position].face = FaceState::Revealed;

        let outcome = match selected {
            None => {
                self.turn = TurnState::OneSelected { first: position };
                ClickOutcome::FirstRevealed { position }
            }
            Some(first) => {
                if self.tiles[first].symbol == self.tiles[position].symbol {
                    self.tiles[first].face = FaceState::Matched;
                    self.tiles[position].face = FaceState::Matched;
                    self.turn = TurnState::Idle;
                    ClickOutcome::Matched {
                        first,
                        second: position,
                    }
                } else {
                    self.turn = TurnState::AwaitingHide {
                        first,
                        second: position,
                    };
                    ClickOutcome::Mismatched {
                        first,
                        second: position,
                    }
                }
            }
        };

        debug!(?outcome, turn = ?self.turn, "клик обработан");
        Ok(outcome)
    }

    /// Срабатывание таймера скрытия.
    ///
    /// Пока поле не готово, это конец стартового показа: прячем всё и
    /// открываем ввод. Иначе прячем несовпавшую пару, если она есть.
    pub fn on_hide_timeout(&mut self) -> HideOutcome {
        if !self.ready {
            for tile in self.tiles.iter_mut() {
                tile.face = FaceState::Hidden;
            }
            self.turn = TurnState::Idle;
            self.ready = true;
            return HideOutcome::StartupPeekEnded;
        }

        match self.turn {
            TurnState::AwaitingHide { first, second } => {
                self.tiles[first].face = FaceState::Hidden;
                self.tiles[second].face = FaceState::Hidden;
                self.turn = TurnState::Idle;
                HideOutcome::MismatchHidden { first, second }
            }
            TurnState::Idle | TurnState::OneSelected { .. } => HideOutcome::Nothing,
        }
    }
}
