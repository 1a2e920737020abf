use serde::{Deserialize, Serialize};

use crate::domain::tile::FaceState;
use crate::domain::{Generation, TilePosition};

/// Уведомление ядра для слоя отображения.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionEventKind {
    /// Колода заново перемешана и разложена.
    BoardDealt {
        generation: Generation,
        tiles: usize,
    },

    /// Начался стартовый показ: лица всех плиток можно показывать.
    PeekStarted {
        generation: Generation,
    },

    /// Стартовый показ закончен, всё спрятано, ввод открыт.
    PeekEnded {
        generation: Generation,
    },

    TileStateChanged {
        position: TilePosition,
        face: FaceState,
    },

    CountersChanged {
        error_count: u32,
        score: i64,
    },

    /// Все пары найдены. Ровно один раз за поколение.
    SessionCompleted {
        error_count: u32,
        score: i64,
    },
}

/// Событие с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionEvent {
    pub index: u32,
    pub kind: SessionEventKind,
}

/// История текущего поколения партии.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionHistory {
    pub events: Vec<SessionEvent>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: SessionEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(SessionEvent { index: idx, kind });
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn kinds(&self) -> impl Iterator<Item = &SessionEventKind> {
        self.events.iter().map(|e| &e.kind)
    }
}

/// Подписчик на уведомления сессии.
///
/// `Send`, потому что сессия может жить внутри tokio-задачи.
pub trait SessionListener: Send {
    fn on_event(&mut self, event: &SessionEventKind);
}

impl<F> SessionListener for F
where
    F: FnMut(&SessionEventKind) + Send,
{
    fn on_event(&mut self, event: &SessionEventKind) {
        self(event)
    }
}
