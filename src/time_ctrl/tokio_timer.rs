// src/time_ctrl/tokio_timer.rs
//! Планировщик поверх tokio: на каждый таймер отдельная задача со `sleep`,
//! срабатывание приходит тикетом в канал. Отмена = `abort()` задачи.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::scheduler::{Scheduler, TimerHandle, TimerRequest, TimerTicket};

/// Требует запущенного tokio runtime в момент `schedule`.
#[derive(Debug)]
pub struct TokioScheduler {
    next_id: u64,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    fired_tx: mpsc::UnboundedSender<TimerTicket>,
}

impl TokioScheduler {
    /// Планировщик и приёмник сработавших тикетов.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerTicket>) {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        let scheduler = Self {
            next_id: 0,
            tasks: HashMap::new(),
            fired_tx,
        };
        (scheduler, fired_rx)
    }

    /// Сколько задач ещё не завершилось.
    pub fn live_tasks(&self) -> usize {
        self.tasks.values().filter(|t| !t.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration, request: TimerRequest) -> TimerHandle {
        // Сработавшие задачи больше не нужны.
        self.tasks.retain(|_, task| !task.is_finished());

        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let ticket = TimerTicket::new(handle, request);
        let tx = self.fired_tx.clone();

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Приёмник закрыт => рантайм сессии уже остановлен.
            let _ = tx.send(ticket);
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
