use std::sync::{Arc, Mutex};
use std::time::Duration;

use match_cards_engine::domain::{catalog_from_ids, CatalogError, FaceState, GameConfig};
use match_cards_engine::engine::{
    ClickOutcome, EngineError, HideOutcome, IgnoreReason, RandomSource, Session,
    SessionEventKind, TimerOutcome,
};
use match_cards_engine::infra::DeterministicRng;
use match_cards_engine::time_ctrl::{ManualScheduler, TimerPurpose, TimerTicket};

/// FullRange-shuffle при таком RNG ничего не меняет: поле A A B B C C D D,
/// и после каждого рестарта тоже.
#[derive(Default)]
struct IdentityRng {
    calls: usize,
}

impl RandomSource for IdentityRng {
    fn next_index(&mut self, bound: usize) -> usize {
        let i = self.calls % bound;
        self.calls += 1;
        i
    }
}

const PEEK: Duration = Duration::from_millis(1000);
const HIDE: Duration = Duration::from_millis(1000);

fn abcd_config() -> GameConfig {
    GameConfig::with_catalog(catalog_from_ids(["A", "B", "C", "D"]))
}

fn new_session() -> Session<IdentityRng, ManualScheduler> {
    Session::new(abcd_config(), IdentityRng::default(), ManualScheduler::new()).unwrap()
}

/// Запущенная сессия после стартового показа.
fn ready_session() -> Session<IdentityRng, ManualScheduler> {
    let mut s = new_session();
    s.start();
    s.advance_time(PEEK);
    assert!(s.is_ready());
    s
}

fn count_completed(s: &Session<IdentityRng, ManualScheduler>) -> usize {
    s.history()
        .kinds()
        .filter(|k| matches!(k, SessionEventKind::SessionCompleted { .. }))
        .count()
}

//
// construction
//
#[test]
fn new_rejects_bad_catalogs_before_any_board() {
    let mut empty = abcd_config();
    empty.catalog.clear();
    let err = Session::new(empty, IdentityRng::default(), ManualScheduler::new()).err();
    assert!(matches!(
        err,
        Some(EngineError::InvalidCatalog(CatalogError::Empty))
    ));

    let mut dup = GameConfig::with_catalog(catalog_from_ids(["A", "B"]));
    dup.catalog[1].id = "A".to_string();
    let err = Session::new(dup, IdentityRng::default(), ManualScheduler::new()).err();
    assert!(matches!(
        err,
        Some(EngineError::InvalidCatalog(CatalogError::DuplicateSymbol(_)))
    ));

    let mut odd = abcd_config();
    odd.columns = 7;
    let err = Session::new(odd, IdentityRng::default(), ManualScheduler::new()).err();
    assert!(matches!(
        err,
        Some(EngineError::InvalidCatalog(CatalogError::DimensionMismatch { .. }))
    ));
}

#[test]
fn new_session_is_not_started_and_has_baseline_counters() {
    let mut s = new_session();

    assert!(!s.is_started());
    assert!(!s.is_ready());
    assert_eq!(s.pending_timer(), None);
    assert_eq!(s.counters().score, 100);
    assert_eq!(s.counters().error_count, 0);
    assert_eq!(s.counters().matched_pairs, 0);
    assert_eq!(
        s.on_tile_clicked(0).unwrap(),
        ClickOutcome::Ignored(IgnoreReason::NotReady)
    );
}

//
// startup peek
//
#[test]
fn start_schedules_one_peek_timer() {
    let mut s = new_session();
    s.start();

    assert!(s.is_started());
    assert!(!s.is_ready());
    assert!(!s.can_restart());
    assert_eq!(s.scheduler().pending_count(), 1);
    assert!(s.pending_timer().is_some());

    let kinds: Vec<_> = s.history().kinds().cloned().collect();
    assert_eq!(
        kinds,
        vec![
            SessionEventKind::BoardDealt {
                generation: 1,
                tiles: 8
            },
            SessionEventKind::PeekStarted { generation: 1 },
            SessionEventKind::CountersChanged {
                error_count: 0,
                score: 100
            },
        ]
    );

    assert_eq!(
        s.on_tile_clicked(0).unwrap(),
        ClickOutcome::Ignored(IgnoreReason::NotReady)
    );

    assert!(s.advance_time(PEEK - Duration::from_millis(1)).is_empty());
    assert!(!s.is_ready());

    assert_eq!(
        s.advance_time(Duration::from_millis(1)),
        vec![TimerOutcome::Applied(HideOutcome::StartupPeekEnded)]
    );
    assert!(s.is_ready());
    assert!(s.can_restart());
    assert_eq!(s.pending_timer(), None);
    assert_eq!(
        s.history().kinds().last(),
        Some(&SessionEventKind::PeekEnded { generation: 1 })
    );
}

//
// the walkthrough: A A B B C C D D
//
#[test]
fn full_game_walkthrough() {
    let mut s = ready_session();

    // 0 + 1 => пара.
    assert_eq!(
        s.on_tile_clicked(0).unwrap(),
        ClickOutcome::FirstRevealed { position: 0 }
    );
    assert_eq!(
        s.on_tile_clicked(1).unwrap(),
        ClickOutcome::Matched { first: 0, second: 1 }
    );
    assert_eq!(s.counters().matched_pairs, 1);
    assert_eq!(s.counters().error_count, 0);
    assert_eq!(s.counters().score, 100);
    assert_eq!(s.pending_timer(), None, "совпадение не ставит таймер");

    // 2 (B) + 4 (C) => промах.
    s.on_tile_clicked(2).unwrap();
    assert_eq!(
        s.on_tile_clicked(4).unwrap(),
        ClickOutcome::Mismatched { first: 2, second: 4 }
    );
    assert_eq!(s.counters().error_count, 1);
    assert_eq!(s.counters().score, 99);
    assert!(s.pending_timer().is_some());

    // Пока промах открыт, клики отклоняются.
    assert_eq!(
        s.on_tile_clicked(5).unwrap(),
        ClickOutcome::Ignored(IgnoreReason::AwaitingHide)
    );
    assert_eq!(s.board().tile(5).map(|t| t.face), Some(FaceState::Hidden));

    assert_eq!(
        s.advance_time(HIDE),
        vec![TimerOutcome::Applied(HideOutcome::MismatchHidden {
            first: 2,
            second: 4
        })]
    );
    assert_eq!(s.board().tile(2).map(|t| t.face), Some(FaceState::Hidden));
    assert_eq!(s.board().tile(4).map(|t| t.face), Some(FaceState::Hidden));

    // Остальные пары без ошибок.
    for (a, b) in [(2, 3), (4, 5)] {
        s.on_tile_clicked(a).unwrap();
        s.on_tile_clicked(b).unwrap();
        assert!(!s.is_complete());
    }
    s.on_tile_clicked(6).unwrap();
    s.on_tile_clicked(7).unwrap();

    assert!(s.is_complete());
    assert_eq!(count_completed(&s), 1);
    assert_eq!(
        s.history().kinds().last(),
        Some(&SessionEventKind::SessionCompleted {
            error_count: 1,
            score: 99
        })
    );

    let summary = s.summary();
    assert!(summary.completed);
    assert_eq!(summary.matched_pairs, 4);
    assert_eq!(summary.total_pairs, 4);

    // После конца любые клики: no-op, событие не повторяется.
    for pos in 0..8 {
        assert_eq!(
            s.on_tile_clicked(pos).unwrap(),
            ClickOutcome::Ignored(IgnoreReason::AlreadyMatched)
        );
    }
    assert_eq!(count_completed(&s), 1);
}

#[test]
fn clicking_matched_tile_changes_nothing() {
    let mut s = ready_session();
    s.on_tile_clicked(0).unwrap();
    s.on_tile_clicked(1).unwrap();

    let counters = s.counters();
    let events = s.history().events.len();

    assert_eq!(
        s.on_tile_clicked(1).unwrap(),
        ClickOutcome::Ignored(IgnoreReason::AlreadyMatched)
    );
    assert_eq!(s.counters(), counters);
    assert_eq!(s.history().events.len(), events);
    assert_eq!(s.board().turn().revealed(), Vec::<usize>::new());
}

#[test]
fn out_of_range_click_is_reported() {
    let mut s = ready_session();
    assert!(matches!(
        s.on_tile_clicked(8),
        Err(EngineError::InvalidClick {
            position: 8,
            board_len: 8
        })
    ));
    assert_eq!(s.counters().score, 100);
}

#[test]
fn score_has_no_floor() {
    let mut config = abcd_config();
    config.score_baseline = 1;
    config.mismatch_penalty = 3;
    let mut s = Session::new(config, IdentityRng::default(), ManualScheduler::new()).unwrap();
    s.start();
    s.advance_time(PEEK);

    for _ in 0..2 {
        s.on_tile_clicked(0).unwrap();
        s.on_tile_clicked(2).unwrap();
        s.advance_time(HIDE);
    }
    assert_eq!(s.counters().error_count, 2);
    assert_eq!(s.counters().score, -5);
}

//
// restart
//
#[test]
fn restart_during_pending_mismatch_resets_everything() {
    let mut s = ready_session();
    s.on_tile_clicked(0).unwrap();
    s.on_tile_clicked(1).unwrap();
    s.on_tile_clicked(2).unwrap();
    s.on_tile_clicked(4).unwrap();

    let old_handle = s.pending_timer().unwrap();
    let old_generation = s.generation();

    s.restart();

    assert_eq!(s.generation(), old_generation + 1);
    assert!(!s.is_ready());
    assert!(!s.scheduler().is_pending(old_handle), "старый таймер отменён");
    assert_eq!(s.scheduler().pending_count(), 1);
    assert_eq!(s.counters().error_count, 0);
    assert_eq!(s.counters().score, 100);
    assert_eq!(s.counters().matched_pairs, 0);
    assert_eq!(s.board().count_in(FaceState::Hidden), 8);
    assert!(s.board().turn().is_idle());
    assert_eq!(
        s.history().kinds().next(),
        Some(&SessionEventKind::BoardDealt {
            generation: old_generation + 1,
            tiles: 8
        })
    );

    // Даже если тикет старого таймера всё-таки долетит: он игнорируется.
    let stale = TimerTicket {
        handle: old_handle,
        generation: old_generation,
        purpose: TimerPurpose::MismatchHide,
    };
    assert_eq!(s.on_timer(stale), TimerOutcome::Stale);
    assert!(!s.is_ready(), "устаревший тикет не открывает ввод");

    // Новый стартовый показ работает как обычно.
    assert_eq!(
        s.advance_time(PEEK),
        vec![TimerOutcome::Applied(HideOutcome::StartupPeekEnded)]
    );
    assert!(s.is_ready());
}

#[test]
fn ticket_with_current_generation_but_foreign_handle_is_stale() {
    let mut s = new_session();
    s.start();
    let pending = s.pending_timer().unwrap();

    let forged = TimerTicket {
        handle: match_cards_engine::time_ctrl::TimerHandle(pending.0 + 100),
        generation: s.generation(),
        purpose: TimerPurpose::StartupPeek,
    };
    assert_eq!(s.on_timer(forged), TimerOutcome::Stale);
    assert!(!s.is_ready());
}

#[test]
fn restart_is_idempotent_about_timers() {
    let mut s = ready_session();
    let g = s.generation();

    s.restart();
    s.restart();
    s.restart();

    assert_eq!(s.generation(), g + 3);
    assert_eq!(s.scheduler().pending_count(), 1);
    assert_eq!(
        s.advance_time(PEEK),
        vec![TimerOutcome::Applied(HideOutcome::StartupPeekEnded)]
    );
    assert!(s.advance_time(Duration::from_secs(60)).is_empty());
}

#[test]
fn start_on_running_session_restarts() {
    let mut s = ready_session();
    s.on_tile_clicked(0).unwrap();

    s.start();

    assert_eq!(s.generation(), 2);
    assert!(!s.is_ready());
    assert_eq!(s.board().count_in(FaceState::Revealed), 0);
}

#[test]
fn completion_fires_once_per_generation() {
    let mut s = ready_session();
    for pos in (0..8).step_by(2) {
        s.on_tile_clicked(pos).unwrap();
        s.on_tile_clicked(pos + 1).unwrap();
    }
    assert_eq!(count_completed(&s), 1);

    s.restart();
    assert!(!s.is_complete());
    assert!(!s.summary().completed);
    assert_eq!(count_completed(&s), 0, "история очищена на рестарте");

    s.advance_time(PEEK);
    for pos in (0..8).step_by(2) {
        s.on_tile_clicked(pos).unwrap();
        s.on_tile_clicked(pos + 1).unwrap();
    }
    assert_eq!(count_completed(&s), 1);
    assert_eq!(
        s.history().kinds().last(),
        Some(&SessionEventKind::SessionCompleted {
            error_count: 0,
            score: 100
        })
    );
}

//
// listeners
//
#[test]
fn listener_sees_the_same_events_as_history() {
    let seen: Arc<Mutex<Vec<SessionEventKind>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    let mut s = new_session();
    s.subscribe(move |event: &SessionEventKind| {
        sink.lock().unwrap().push(event.clone());
    });

    s.start();
    s.advance_time(PEEK);
    s.on_tile_clicked(0).unwrap();
    s.on_tile_clicked(2).unwrap();
    s.advance_time(HIDE);

    let from_history: Vec<SessionEventKind> = s.history().kinds().cloned().collect();
    let from_listener = seen.lock().unwrap().clone();
    assert_eq!(from_listener, from_history);

    assert!(from_listener.contains(&SessionEventKind::TileStateChanged {
        position: 2,
        face: FaceState::Revealed
    }));
    assert!(from_listener.contains(&SessionEventKind::TileStateChanged {
        position: 2,
        face: FaceState::Hidden
    }));
    assert!(from_listener.contains(&SessionEventKind::CountersChanged {
        error_count: 1,
        score: 99
    }));
}

//
// invariants under random play
//
#[test]
fn random_play_respects_session_invariants() {
    let config = GameConfig::standard();
    let penalty = config.mismatch_penalty;
    let baseline = config.score_baseline;

    let mut s = Session::new(
        config,
        DeterministicRng::seed_from_u64(2024),
        ManualScheduler::new(),
    )
    .unwrap();
    s.start();

    let mut clicks = DeterministicRng::seed_from_u64(31337);
    for step in 0..5_000 {
        if step % 4 == 0 {
            s.advance_time(Duration::from_millis(500));
        }
        if step % 500 == 499 {
            s.restart();
        }
        let pos = clicks.next_index(s.board().len());
        s.on_tile_clicked(pos).unwrap();

        let board = s.board();
        let counters = s.counters();
        assert!(board.count_in(FaceState::Revealed) <= 2);
        assert_eq!(board.count_in(FaceState::Matched), counters.matched_pairs * 2);
        assert_eq!(
            counters.score,
            baseline - counters.error_count as i64 * penalty
        );
        assert!(s.scheduler().pending_count() <= 1);
        assert_eq!(s.is_complete(), counters.matched_pairs == board.pair_count());
    }
}

//
// score rules from config
//
#[test]
fn negative_penalty_is_rejected_before_any_board() {
    let mut config = abcd_config();
    config.mismatch_penalty = -5;
    let err = Session::new(config, IdentityRng::default(), ManualScheduler::new()).err();
    assert!(matches!(
        err,
        Some(EngineError::InvalidCatalog(CatalogError::NegativePenalty(-5)))
    ));
}

#[test]
fn score_saturates_at_i64_min() {
    let mut config = abcd_config();
    config.score_baseline = i64::MIN;
    let mut s = Session::new(config, IdentityRng::default(), ManualScheduler::new()).unwrap();
    s.start();
    s.advance_time(PEEK);

    for _ in 0..3 {
        s.on_tile_clicked(0).unwrap();
        s.on_tile_clicked(2).unwrap();
        s.advance_time(HIDE);
        assert_eq!(s.counters().score, i64::MIN);
    }
    assert_eq!(s.counters().error_count, 3);
}

#[test]
fn score_never_increases_on_mismatch() {
    let mut s = ready_session();
    let mut last = s.counters().score;

    for _ in 0..5 {
        s.on_tile_clicked(0).unwrap();
        s.on_tile_clicked(2).unwrap();
        assert!(s.counters().score < last);
        last = s.counters().score;
        s.advance_time(HIDE);
    }
}
