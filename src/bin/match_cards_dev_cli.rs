// src/bin/match_cards_dev_cli.rs
//
// Терминальный драйвер партии вместо окна: читает команды из stdin,
// печатает поле и уведомления движка.
//
//   cargo run --bin match_cards_dev_cli -- [--seed 42] [--config game.json]

use std::error::Error;
use std::path::PathBuf;

use match_cards_engine::api::{BoardView, Command, CommandOutcome, Query, QueryResponse};
use match_cards_engine::domain::GameConfig;
use match_cards_engine::engine::{ClickOutcome, SessionEventKind};
use match_cards_engine::infra::{DeterministicRng, SystemRng};
use match_cards_engine::runtime::{spawn_session, RuntimeHandle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Default)]
struct Args {
    seed: Option<u64>,
    config: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        match flag.as_str() {
            "--seed" => {
                let raw = it.next().ok_or("после --seed нужно число")?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|e| format!("--seed {}: {}", raw, e))?;
                args.seed = Some(seed);
            }
            "--config" => {
                let path = it.next().ok_or("после --config нужен путь")?;
                args.config = Some(PathBuf::from(path));
            }
            other => return Err(format!("неизвестный аргумент: {}", other)),
        }
    }
    Ok(args)
}

const HELP: &str = "\
команды:
  c N | click N   открыть плитку N
  b   | board     показать поле
  s   | score     счёт
  r   | restart   начать заново
  h   | help      эта справка
  q   | quit      выход";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => GameConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => GameConfig::standard(),
    };

    println!(
        "=== MATCH CARDS: поле {}x{}, пар {} ===",
        config.rows,
        config.columns,
        config.catalog.len()
    );
    println!("{}\n", HELP);

    let spawned = match args.seed {
        Some(seed) => spawn_session(config, DeterministicRng::seed_from_u64(seed))?,
        None => spawn_session(config, SystemRng)?,
    };
    let handle = spawned.handle.clone();

    // Уведомления печатаем из отдельной задачи: таймеры срабатывают без ввода.
    let mut events = spawned.events;
    let printer_handle = handle.clone();
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                SessionEventKind::PeekStarted { generation } => {
                    println!("[партия #{}] запоминайте карты!", generation);
                    print_board(&printer_handle).await;
                }
                SessionEventKind::PeekEnded { .. } => {
                    println!("карты скрыты, можно играть.");
                    print_board(&printer_handle).await;
                }
                SessionEventKind::CountersChanged { error_count, score } if error_count > 0 => {
                    println!("ошибок: {}, счёт: {}", error_count, score);
                }
                SessionEventKind::SessionCompleted { error_count, score } => {
                    println!("\n*** Игра окончена! Ошибок: {}, счёт: {}. Отлично! ***", error_count, score);
                    println!("r: сыграть ещё раз, q: выйти.");
                }
                _ => {}
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        let Some(cmd) = parts.next() else {
            continue;
        };

        match cmd {
            "c" | "click" | "r" | "restart" => match line.parse::<Command>() {
                Ok(command) => match handle.send(command).await {
                    Ok(CommandOutcome::Click(ClickOutcome::Ignored(reason))) => {
                        println!("клик пропущен: {:?}", reason);
                    }
                    Ok(CommandOutcome::Click(ClickOutcome::Mismatched { .. })) => {
                        print_board(&handle).await;
                        println!("не пара, сейчас спрячем…");
                    }
                    Ok(CommandOutcome::Click(_)) => print_board(&handle).await,
                    Ok(CommandOutcome::Restarted { .. }) => {}
                    Err(err) => println!("ошибка: {:?}", err),
                },
                Err(err) => println!("ошибка: {:?}", err),
            },
            "b" | "board" => print_board(&handle).await,
            "s" | "score" => match handle.query(Query::Counters).await {
                Ok(QueryResponse::Counters(c)) => println!(
                    "пар {}/{}, ошибок {}, счёт {}",
                    c.matched_pairs, c.total_pairs, c.error_count, c.score
                ),
                Ok(other) => warn!(?other, "неожиданный ответ на запрос счёта"),
                Err(err) => println!("ошибка: {:?}", err),
            },
            "h" | "help" => println!("{}", HELP),
            "q" | "quit" => break,
            other => println!("неизвестная команда `{}` (h: справка)", other),
        }
    }

    handle.shutdown();
    let _ = spawned.task.await;
    printer.abort();
    Ok(())
}

async fn print_board(handle: &RuntimeHandle) {
    match handle.query(Query::Board).await {
        Ok(QueryResponse::Board(view)) => println!("{}", render_board(&view)),
        Ok(other) => warn!(?other, "неожиданный ответ на запрос поля"),
        Err(err) => println!("ошибка: {:?}", err),
    }
}

fn render_board(view: &BoardView) -> String {
    let mut out = String::new();
    for row in view.tiles.chunks(view.columns.max(1)) {
        for tile in row {
            let face = tile.symbol.as_deref().unwrap_or("##");
            out.push_str(&format!("{:>3}:{:<8}", tile.position, face));
        }
        out.push('\n');
    }
    out
}
