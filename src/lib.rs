//! Ядро игры "найди пару": поле из закрытых плиток, по две на символ.
//!
//! Слои:
//! - `domain`: символы, плитки, колода, конфигурация;
//! - `engine`: перемешивание, машина состояний хода, сессия;
//! - `time_ctrl`: таймеры (виртуальные и tokio);
//! - `infra`: реализации RNG;
//! - `api`: команды/запросы/DTO для слоя отображения;
//! - `runtime`: асинхронный цикл, владеющий сессией.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod runtime;
pub mod time_ctrl;

pub use api::{ApiError, Command, Query, QueryResponse};
pub use domain::{GameConfig, Symbol};
pub use engine::{EngineError, Session};
