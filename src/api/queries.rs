use serde::{Deserialize, Serialize};

use crate::api::dto::{BoardView, CountersView, SessionSummary};
use crate::engine::{RandomSource, Session};
use crate::time_ctrl::Scheduler;

/// Запросы только на чтение.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    Board,
    Counters,
    IsComplete,
    Summary,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Board(BoardView),
    Counters(CountersView),
    IsComplete(bool),
    Summary(SessionSummary),
}

pub fn handle_query<R, S>(session: &Session<R, S>, query: Query) -> QueryResponse
where
    R: RandomSource,
    S: Scheduler,
{
    match query {
        Query::Board => QueryResponse::Board(BoardView::from_session(session)),
        Query::Counters => QueryResponse::Counters(CountersView::from_session(session)),
        Query::IsComplete => QueryResponse::IsComplete(session.is_complete()),
        Query::Summary => QueryResponse::Summary(session.summary()),
    }
}
