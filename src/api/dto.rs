use serde::{Deserialize, Serialize};

use crate::domain::tile::FaceState;
use crate::domain::{Generation, TilePosition};
use crate::engine::{RandomSource, Session};
use crate::time_ctrl::Scheduler;

pub use crate::engine::SessionSummary;

/// Плитка глазами фронта.
///
/// `symbol` отдаётся только для открытых/найденных плиток и во время
/// стартового показа, чтобы фронт не мог подсмотреть закрытые карты.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TileView {
    pub position: TilePosition,
    pub face: FaceState,
    pub symbol: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardView {
    pub generation: Generation,
    pub rows: usize,
    pub columns: usize,
    /// false во время стартового показа.
    pub ready: bool,
    pub can_restart: bool,
    pub tiles: Vec<TileView>,
}

impl BoardView {
    pub fn from_session<R, S>(session: &Session<R, S>) -> Self
    where
        R: RandomSource,
        S: Scheduler,
    {
        let peeking = session.is_started() && !session.is_ready();
        let tiles = session
            .board()
            .tiles()
            .iter()
            .enumerate()
            .map(|(position, tile)| TileView {
                position,
                face: tile.face,
                symbol: (peeking || tile.face != FaceState::Hidden).then(|| tile.symbol.id.clone()),
            })
            .collect();

        Self {
            generation: session.generation(),
            rows: session.config().rows,
            columns: session.config().columns,
            ready: session.is_ready(),
            can_restart: session.can_restart(),
            tiles,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountersView {
    pub error_count: u32,
    pub score: i64,
    pub matched_pairs: usize,
    pub total_pairs: usize,
}

impl CountersView {
    pub fn from_session<R, S>(session: &Session<R, S>) -> Self
    where
        R: RandomSource,
        S: Scheduler,
    {
        let counters = session.counters();
        Self {
            error_count: counters.error_count,
            score: counters.score,
            matched_pairs: counters.matched_pairs,
            total_pairs: session.board().pair_count(),
        }
    }
}
