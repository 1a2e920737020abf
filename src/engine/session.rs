//! Сессия: колода + поле + таймер + счётчики.
//!
//! Единственный владелец изменяемого состояния партии. Меняется только через
//! два входа: `on_tile_clicked` (ввод) и `on_timer` (срабатывание таймера),
//! плюс `start`/`restart`.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::config::GameConfig;
use crate::domain::deck::Deck;
use crate::domain::tile::FaceState;
use crate::domain::{Generation, TilePosition};
use crate::engine::board::{Board, ClickOutcome, HideOutcome};
use crate::engine::errors::EngineError;
use crate::engine::history::{SessionEventKind, SessionHistory, SessionListener};
use crate::engine::RandomSource;
use crate::time_ctrl::{ManualScheduler, Scheduler, TimerHandle, TimerPurpose, TimerRequest, TimerTicket};

/// Счётчики партии.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub error_count: u32,
    /// Может уйти в минус; у `i64::MIN` вычитание насыщается.
    pub score: i64,
    pub matched_pairs: usize,
}

impl Counters {
    pub fn baseline(score: i64) -> Self {
        Self {
            error_count: 0,
            score,
            matched_pairs: 0,
        }
    }
}

/// Итог партии (для окна "игра окончена").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub error_count: u32,
    pub score: i64,
    pub matched_pairs: usize,
    pub total_pairs: usize,
    pub completed: bool,
}

/// Что произошло с доставленным тикетом таймера.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TimerOutcome {
    Applied(HideOutcome),
    /// Тикет от отменённого таймера или прошлого поколения. Состояние не тронуто.
    Stale,
}

pub struct Session<R, S>
where
    R: RandomSource,
    S: Scheduler,
{
    config: GameConfig,
    rng: R,
    scheduler: S,
    deck: Deck,
    board: Board,
    counters: Counters,
    generation: Generation,
    pending_timer: Option<TimerHandle>,
    started: bool,
    completed: bool,
    history: SessionHistory,
    listeners: Vec<Box<dyn SessionListener>>,
}

impl<R, S> Session<R, S>
where
    R: RandomSource,
    S: Scheduler,
{
    /// Проверить конфигурацию, собрать колоду и разложить первое поле.
    ///
    /// Таймер стартового показа ставит `start()`; до него ввод закрыт.
    pub fn new(config: GameConfig, mut rng: R, scheduler: S) -> Result<Self, EngineError> {
        config.validate()?;
        let deck = Deck::compose(&config.catalog)?;
        let board = Board::deal(deck.clone(), &mut rng, config.shuffle_rule);
        let counters = Counters::baseline(config.score_baseline);

        Ok(Self {
            config,
            rng,
            scheduler,
            deck,
            board,
            counters,
            generation: 1,
            pending_timer: None,
            started: false,
            completed: false,
            history: SessionHistory::new(),
            listeners: Vec::new(),
        })
    }

    pub fn subscribe<L>(&mut self, listener: L)
    where
        L: SessionListener + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Запустить партию: показать поле и поставить таймер стартового показа.
    /// Повторный вызов на уже запущенной партии работает как `restart()`.
    pub fn start(&mut self) {
        if self.started {
            self.restart();
            return;
        }
        self.started = true;
        info!(
            generation = self.generation,
            tiles = self.board.len(),
            "партия запущена"
        );
        self.announce_generation();
        self.schedule_timer(TimerPurpose::StartupPeek);
    }

    /// Новое поколение: отмена таймера, свежая перестановка той же колоды,
    /// счётчики к базовым значениям, снова стартовый показ.
    ///
    /// Тикеты старого поколения после этого игнорируются в `on_timer`.
    pub fn restart(&mut self) {
        if let Some(handle) = self.pending_timer.take() {
            self.scheduler.cancel(handle);
        }

        self.generation += 1;
        self.board = Board::deal(self.deck.clone(), &mut self.rng, self.config.shuffle_rule);
        self.counters = Counters::baseline(self.config.score_baseline);
        self.completed = false;
        self.started = true;
        self.history.clear();

        info!(generation = self.generation, "партия перезапущена");
        self.announce_generation();
        self.schedule_timer(TimerPurpose::StartupPeek);
    }

    /// Клик игрока по позиции.
    pub fn on_tile_clicked(&mut self, position: TilePosition) -> Result<ClickOutcome, EngineError> {
        let outcome = self.board.click(position)?;

        match outcome {
            ClickOutcome::Ignored(reason) => {
                debug!(position, ?reason, "клик проигнорирован");
            }
            ClickOutcome::FirstRevealed { position } => {
                self.emit(SessionEventKind::TileStateChanged {
                    position,
                    face: FaceState::Revealed,
                });
            }
            ClickOutcome::Matched { first, second } => {
                for position in [first, second] {
                    self.emit(SessionEventKind::TileStateChanged {
                        position,
                        face: FaceState::Matched,
                    });
                }
                self.counters.matched_pairs += 1;

                if self.is_complete() && !self.completed {
                    self.completed = true;
                    info!(
                        generation = self.generation,
                        errors = self.counters.error_count,
                        score = self.counters.score,
                        "все пары найдены"
                    );
                    self.emit(SessionEventKind::SessionCompleted {
                        error_count: self.counters.error_count,
                        score: self.counters.score,
                    });
                }
            }
            ClickOutcome::Mismatched { second, .. } => {
                self.emit(SessionEventKind::TileStateChanged {
                    position: second,
                    face: FaceState::Revealed,
                });
                self.counters.error_count += 1;
                self.counters.score = self
                    .counters
                    .score
                    .saturating_sub(self.config.mismatch_penalty);
                self.emit(SessionEventKind::CountersChanged {
                    error_count: self.counters.error_count,
                    score: self.counters.score,
                });
                self.schedule_timer(TimerPurpose::MismatchHide);
            }
        }

        Ok(outcome)
    }

    /// Доставка сработавшего таймера.
    pub fn on_timer(&mut self, ticket: TimerTicket) -> TimerOutcome {
        if ticket.generation != self.generation || self.pending_timer != Some(ticket.handle) {
            debug!(
                ?ticket,
                generation = self.generation,
                "устаревший тикет таймера проигнорирован"
            );
            return TimerOutcome::Stale;
        }
        self.pending_timer = None;

        let outcome = self.board.on_hide_timeout();
        match &outcome {
            HideOutcome::StartupPeekEnded => {
                debug!(generation = self.generation, "стартовый показ окончен");
                self.emit(SessionEventKind::PeekEnded {
                    generation: self.generation,
                });
            }
            HideOutcome::MismatchHidden { first, second } => {
                for position in [*first, *second] {
                    self.emit(SessionEventKind::TileStateChanged {
                        position,
                        face: FaceState::Hidden,
                    });
                }
            }
            HideOutcome::Nothing => {}
        }

        TimerOutcome::Applied(outcome)
    }

    pub fn is_complete(&self) -> bool {
        self.counters.matched_pairs == self.board.pair_count()
    }

    pub fn is_ready(&self) -> bool {
        self.board.is_ready()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Подсказка для кнопки "заново": доступна после стартового показа.
    /// Сам `restart()` можно звать в любой момент.
    pub fn can_restart(&self) -> bool {
        self.started && self.board.is_ready()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn pending_timer(&self) -> Option<TimerHandle> {
        self.pending_timer
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            error_count: self.counters.error_count,
            score: self.counters.score,
            matched_pairs: self.counters.matched_pairs,
            total_pairs: self.board.pair_count(),
            completed: self.completed,
        }
    }

    fn announce_generation(&mut self) {
        self.emit(SessionEventKind::BoardDealt {
            generation: self.generation,
            tiles: self.board.len(),
        });
        self.emit(SessionEventKind::PeekStarted {
            generation: self.generation,
        });
        self.emit(SessionEventKind::CountersChanged {
            error_count: self.counters.error_count,
            score: self.counters.score,
        });
    }

    /// Поставить таймер, сняв предыдущий: ожидающий таймер всегда один.
    fn schedule_timer(&mut self, purpose: TimerPurpose) {
        if let Some(previous) = self.pending_timer.take() {
            self.scheduler.cancel(previous);
        }

        let delay = match purpose {
            TimerPurpose::StartupPeek => self.config.peek_delay(),
            TimerPurpose::MismatchHide => self.config.hide_delay(),
        };
        let handle = self.scheduler.schedule(
            delay,
            TimerRequest {
                generation: self.generation,
                purpose,
            },
        );
        debug!(?purpose, ?handle, ?delay, "таймер поставлен");
        self.pending_timer = Some(handle);
    }

    fn emit(&mut self, kind: SessionEventKind) {
        for listener in self.listeners.iter_mut() {
            listener.on_event(&kind);
        }
        self.history.push(kind);
    }
}

impl<R> Session<R, ManualScheduler>
where
    R: RandomSource,
{
    /// Сдвинуть виртуальные часы и доставить всё, что сработало.
    pub fn advance_time(&mut self, by: Duration) -> Vec<TimerOutcome> {
        let fired = self.scheduler.advance(by);
        fired.into_iter().map(|ticket| self.on_timer(ticket)).collect()
    }
}
