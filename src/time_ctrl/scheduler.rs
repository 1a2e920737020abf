// src/time_ctrl/scheduler.rs
//! Абстракция "через delay вызвать, с возможностью отмены".
//!
//! Вместо замыкания, которое держит ссылку на сессию, планировщик возвращает
//! сессии `TimerTicket`. Сессия сама решает, актуален ли он (handle + поколение).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::Generation;

/// Зачем поставлен таймер.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimerPurpose {
    /// Конец стартового показа всех карт.
    StartupPeek,
    /// Скрыть несовпавшую пару.
    MismatchHide,
}

/// Идентификатор запланированного срабатывания.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

/// Что сессия просит запланировать.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerRequest {
    pub generation: Generation,
    pub purpose: TimerPurpose,
}

/// Что возвращается сессии при срабатывании.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerTicket {
    pub handle: TimerHandle,
    pub generation: Generation,
    pub purpose: TimerPurpose,
}

impl TimerTicket {
    pub fn new(handle: TimerHandle, request: TimerRequest) -> Self {
        Self {
            handle,
            generation: request.generation,
            purpose: request.purpose,
        }
    }
}

pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, request: TimerRequest) -> TimerHandle;

    /// Отменить срабатывание. Неизвестный или уже сработавший handle: no-op.
    fn cancel(&mut self, handle: TimerHandle);
}
