// src/time_ctrl/manual.rs
//! Планировщик на виртуальных часах.
//!
//! Время двигается только вызовом `advance`, поэтому тесты и CLI-симуляции
//! полностью детерминированы.

use std::time::Duration;

use super::scheduler::{Scheduler, TimerHandle, TimerRequest, TimerTicket};

#[derive(Clone, Debug)]
struct PendingEntry {
    due: Duration,
    ticket: TimerTicket,
}

#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingEntry>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Текущее виртуальное время.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|e| e.ticket.handle == handle)
    }

    /// Когда сработает ближайший таймер.
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|e| e.due).min()
    }

    /// Сдвинуть часы на `by` и забрать всё, что успело сработать,
    /// в порядке срабатывания (при равном времени: в порядке постановки).
    pub fn advance(&mut self, by: Duration) -> Vec<TimerTicket> {
        self.now += by;
        let now = self.now;

        let mut due: Vec<PendingEntry> = Vec::new();
        self.pending.retain(|entry| {
            if entry.due <= now {
                due.push(entry.clone());
                false
            } else {
                true
            }
        });

        due.sort_by_key(|e| (e.due, e.ticket.handle));
        due.into_iter().map(|e| e.ticket).collect()
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, request: TimerRequest) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.push(PendingEntry {
            due: self.now + delay,
            ticket: TimerTicket::new(handle, request),
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|e| e.ticket.handle != handle);
    }
}
