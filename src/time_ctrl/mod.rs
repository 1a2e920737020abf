// src/time_ctrl/mod.rs
//! Таймеры партии.
//!
//! Здесь собираем:
//! - контракт планировщика (`Scheduler`, `TimerHandle`, `TimerTicket`);
//! - детерминированный планировщик на виртуальных часах (`ManualScheduler`);
//! - планировщик поверх tokio (`TokioScheduler`).
//!
//! У сессии в любой момент не больше одного ожидающего таймера.

pub mod manual;
pub mod scheduler;
pub mod tokio_timer;

pub use manual::ManualScheduler;
pub use scheduler::{Scheduler, TimerHandle, TimerPurpose, TimerRequest, TimerTicket};
pub use tokio_timer::TokioScheduler;
