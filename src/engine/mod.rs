//! Движок игры: перемешивание, поле с машиной состояний хода, сессия.
//!
//! Высокоуровневый объект: `Session`
//! Основные операции:
//!   - `start` / `restart` – разложить поле и запустить стартовый показ
//!   - `on_tile_clicked` – клик игрока
//!   - `on_timer` – срабатывание таймера (конец показа / скрытие промаха)

pub mod board;
pub mod errors;
pub mod history;
pub mod session;
pub mod shuffle;
pub mod turn;

pub use board::{Board, ClickOutcome, HideOutcome, IgnoreReason};
pub use errors::EngineError;
pub use history::{SessionEvent, SessionEventKind, SessionHistory, SessionListener};
pub use session::{Counters, Session, SessionSummary, TimerOutcome};
pub use shuffle::{shuffle, ShuffleRule};
pub use turn::TurnState;

/// Источник случайности для engine.
/// Реализации лежат в infra (обёртки над `rand`), тесты пишут свои.
pub trait RandomSource {
    /// Равномерный индекс из `[0, bound)`. `bound` всегда > 0.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_index(&mut self, bound: usize) -> usize {
        (**self).next_index(bound)
    }
}
