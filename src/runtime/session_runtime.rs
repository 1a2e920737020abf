// src/runtime/session_runtime.rs

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::info;

use crate::api::{apply_command, handle_query, ApiError, Command, CommandOutcome, Query, QueryResponse};
use crate::domain::config::GameConfig;
use crate::domain::TilePosition;
use crate::engine::{EngineError, RandomSource, Session, SessionEventKind};
use crate::time_ctrl::{TimerTicket, TokioScheduler};

enum RuntimeRequest {
    Command {
        command: Command,
        reply: oneshot::Sender<Result<CommandOutcome, ApiError>>,
    },
    Query {
        query: Query,
        reply: oneshot::Sender<QueryResponse>,
    },
    Shutdown,
}

/// Ручка для слоя отображения. Клонируется свободно.
#[derive(Clone, Debug)]
pub struct RuntimeHandle {
    requests: mpsc::UnboundedSender<RuntimeRequest>,
}

impl std::fmt::Debug for RuntimeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuntimeRequest::Command { command, .. } => f.debug_tuple("Command").field(command).finish(),
            RuntimeRequest::Query { query, .. } => f.debug_tuple("Query").field(query).finish(),
            RuntimeRequest::Shutdown => f.write_str("Shutdown"),
        }
    }
}

fn runtime_stopped() -> ApiError {
    ApiError::Internal("рантайм сессии остановлен".to_string())
}

impl RuntimeHandle {
    pub async fn send(&self, command: Command) -> Result<CommandOutcome, ApiError> {
        let (reply, rx) = oneshot::channel();
        self.requests
            .send(RuntimeRequest::Command { command, reply })
            .map_err(|_| runtime_stopped())?;
        rx.await.map_err(|_| runtime_stopped())?
    }

    pub async fn click(&self, position: TilePosition) -> Result<CommandOutcome, ApiError> {
        self.send(Command::ClickTile { position }).await
    }

    pub async fn restart(&self) -> Result<CommandOutcome, ApiError> {
        self.send(Command::Restart).await
    }

    pub async fn query(&self, query: Query) -> Result<QueryResponse, ApiError> {
        let (reply, rx) = oneshot::channel();
        self.requests
            .send(RuntimeRequest::Query { query, reply })
            .map_err(|_| runtime_stopped())?;
        rx.await.map_err(|_| runtime_stopped())
    }

    /// Остановить цикл. Повторный вызов и вызов после остановки: no-op.
    pub fn shutdown(&self) {
        let _ = self.requests.send(RuntimeRequest::Shutdown);
    }
}

/// Запущенная сессия: ручка, поток уведомлений и задача цикла.
#[derive(Debug)]
pub struct SpawnedSession {
    pub handle: RuntimeHandle,
    pub events: mpsc::UnboundedReceiver<SessionEventKind>,
    pub task: JoinHandle<()>,
}

/// Создать сессию и запустить её цикл в отдельной tokio-задаче.
///
/// Вызывать внутри tokio runtime. Ошибка конфигурации возвращается сразу,
/// до того как что-либо запущено.
pub fn spawn_session<R>(config: GameConfig, rng: R) -> Result<SpawnedSession, EngineError>
where
    R: RandomSource + Send + 'static,
{
    let (scheduler, timers) = TokioScheduler::new();
    let mut session = Session::new(config, rng, scheduler)?;

    let (events_tx, events) = mpsc::unbounded_channel();
    session.subscribe(move |event: &SessionEventKind| {
        let _ = events_tx.send(event.clone());
    });

    let (requests, requests_rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(run_session(session, timers, requests_rx));

    Ok(SpawnedSession {
        handle: RuntimeHandle { requests },
        events,
        task,
    })
}

/// Единственный поток управления сессией: команды и тикеты таймера
/// обрабатываются строго по одному.
async fn run_session<R>(
    mut session: Session<R, TokioScheduler>,
    mut timers: mpsc::UnboundedReceiver<TimerTicket>,
    mut requests: mpsc::UnboundedReceiver<RuntimeRequest>,
) where
    R: RandomSource + Send + 'static,
{
    session.start();

    loop {
        tokio::select! {
            Some(ticket) = timers.recv() => {
                session.on_timer(ticket);
            }
            request = requests.recv() => match request {
                Some(RuntimeRequest::Command { command, reply }) => {
                    let _ = reply.send(apply_command(&mut session, command));
                }
                Some(RuntimeRequest::Query { query, reply }) => {
                    let _ = reply.send(handle_query(&session, query));
                }
                Some(RuntimeRequest::Shutdown) | None => {
                    info!(generation = session.generation(), "цикл сессии остановлен");
                    break;
                }
            },
        }
    }
}
