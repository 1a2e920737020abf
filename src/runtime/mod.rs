//! Асинхронный рантайм партии.
//!
//! Одна tokio-задача владеет `Session` и по очереди обрабатывает команды
//! фронта и срабатывания таймеров, поэтому никаких блокировок не нужно.

pub mod session_runtime;

pub use session_runtime::{spawn_session, RuntimeHandle, SpawnedSession};
