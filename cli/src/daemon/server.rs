use std::collections::HashMap;
use std::fs;
use std::future::Future;
use std::path::Path;

use charge_platform::PowerStatusSource;
use charge_protocol::{MethodCall, MethodResponse};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::channel::BatteryChannel;
use crate::config::{LogLevel, SourceKind, UserConfig};
use crate::daemon::client::is_server_running;
use crate::logging::{self, LogMode};
use crate::source::open_reader;

#[derive(Debug, thiserror::Error)]
pub enum DaemonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("A server is already listening on {0}")]
    AlreadyRunning(String),

    #[error("Failed to open battery source: {0}")]
    Source(String),

    #[error("Failed to daemonize: {0}")]
    Daemonize(String),
}

pub type Result<T> = std::result::Result<T, DaemonError>;

type ClientId = u64;

/// Responses queued for one client before it is treated as stalled.
const CLIENT_QUEUE_DEPTH: usize = 16;

/// Error code written when a response cannot be encoded.
const INTERNAL_ERROR: &str = "internal_error";

enum ClientMessage {
    Request(std::result::Result<MethodCall, String>),
    Disconnect,
}

struct ClientHandle {
    response_tx: mpsc::Sender<MethodResponse>,
    reader_task: JoinHandle<()>,
    writer_task: JoinHandle<()>,
}

impl ClientHandle {
    /// Drop the connection without flushing queued responses.
    fn abort(self) {
        self.reader_task.abort();
        self.writer_task.abort();
    }
}

pub struct ServerOptions<'a> {
    pub config: &'a UserConfig,
    pub source: SourceKind,
    pub socket: &'a Path,
    pub detach: bool,
    pub log_level: LogLevel,
    pub log_level_override: Option<LogLevel>,
}

/// Bind the socket and answer calls until SIGINT or SIGTERM.
pub fn run_server(opts: ServerOptions<'_>) -> Result<()> {
    let socket = opts.socket;

    if socket.exists() {
        if is_server_running(socket) {
            return Err(DaemonError::AlreadyRunning(socket.display().to_string()));
        }
        fs::remove_file(socket)?;
    }

    if let Some(parent) = socket.parent() {
        fs::create_dir_all(parent)?;
    }

    let mode = if opts.detach {
        let working_dir = socket.parent().unwrap_or_else(|| Path::new("/"));
        daemonize::Daemonize::new()
            .working_directory(working_dir)
            .start()
            .map_err(|e| DaemonError::Daemonize(e.to_string()))?;
        LogMode::File
    } else {
        LogMode::Both
    };
    let _guard = logging::init(opts.log_level, mode, opts.log_level_override);

    info!(version = env!("CARGO_PKG_VERSION"), "Server starting");

    let reader =
        open_reader(opts.config, opts.source).map_err(|e| DaemonError::Source(e.to_string()))?;
    let channel = BatteryChannel::new(opts.config.channel.clone(), reader);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(listen(socket, &channel));

    info!("Server shutting down");
    fs::remove_file(socket).ok();

    result
}

async fn listen<S: PowerStatusSource>(socket: &Path, channel: &BatteryChannel<S>) -> Result<()> {
    let listener = UnixListener::bind(socket)?;
    info!(
        socket = ?socket,
        channel = channel.name(),
        source = channel.reader().source().name(),
        "Listening for method calls"
    );
    serve(listener, channel, shutdown_signal()).await
}

async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = term.recv() => {}
            }
        }
        Err(e) => {
            warn!(error = %e, "Cannot listen for SIGTERM");
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

/// Answer method calls on `listener` until `shutdown` resolves.
///
/// Every request is handled on this task, one at a time, with a fresh read
/// from the channel's source.
pub async fn serve<S, F>(
    listener: UnixListener,
    channel: &BatteryChannel<S>,
    shutdown: F,
) -> Result<()>
where
    S: PowerStatusSource,
    F: Future<Output = ()>,
{
    let (msg_tx, mut msg_rx) = mpsc::channel::<(ClientId, ClientMessage)>(256);
    let mut clients: HashMap<ClientId, ClientHandle> = HashMap::new();
    let mut next_client_id: ClientId = 1;

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Shutdown requested");
                break;
            }
            result = listener.accept() => {
                match result {
                    Ok((stream, _)) => {
                        let client_id = next_client_id;
                        next_client_id += 1;
                        debug!(client_id, "Client connected");

                        let (reader, writer) = stream.into_split();
                        let (response_tx, response_rx) =
                            mpsc::channel::<MethodResponse>(CLIENT_QUEUE_DEPTH);
                        let reader_task = tokio::spawn(client_reader_task(
                            BufReader::new(reader),
                            msg_tx.clone(),
                            client_id,
                        ));
                        let writer_task = tokio::spawn(client_writer_task(writer, response_rx));
                        clients.insert(
                            client_id,
                            ClientHandle {
                                response_tx,
                                reader_task,
                                writer_task,
                            },
                        );
                    }
                    Err(e) => {
                        error!(error = %e, "Socket accept error");
                    }
                }
            }
            Some((client_id, msg)) = msg_rx.recv() => {
                match msg {
                    ClientMessage::Disconnect => {
                        if clients.remove(&client_id).is_some() {
                            debug!(client_id, count = clients.len(), "Client disconnected");
                        }
                    }
                    ClientMessage::Request(request) => {
                        let response = match request {
                            Ok(call) => {
                                debug!(client_id, method = %call.method, "Handling call");
                                channel.handle(&call)
                            }
                            Err(e) => {
                                warn!(client_id, error = %e, "Invalid request from client");
                                MethodResponse::bad_request(e)
                            }
                        };

                        let Some(client) = clients.get(&client_id) else {
                            continue;
                        };
                        match client.response_tx.try_send(response) {
                            Ok(()) => {}
                            Err(TrySendError::Full(_)) => {
                                warn!(client_id, "Client is not reading responses, disconnecting");
                                if let Some(client) = clients.remove(&client_id) {
                                    client.abort();
                                }
                            }
                            Err(TrySendError::Closed(_)) => {
                                clients.remove(&client_id);
                            }
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

async fn client_reader_task(
    mut reader: BufReader<tokio::net::unix::OwnedReadHalf>,
    msg_tx: mpsc::Sender<(ClientId, ClientMessage)>,
    client_id: ClientId,
) {
    let mut line = String::new();
    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => {
                let _ = msg_tx.send((client_id, ClientMessage::Disconnect)).await;
                break;
            }
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let request = MethodCall::from_json(trimmed).map_err(|e| e.to_string());
                if msg_tx
                    .send((client_id, ClientMessage::Request(request)))
                    .await
                    .is_err()
                {
                    break;
                }
            }
            Err(e) => {
                debug!(client_id, error = %e, "Client read error");
                let _ = msg_tx.send((client_id, ClientMessage::Disconnect)).await;
                break;
            }
        }
    }
}

async fn client_writer_task(
    mut writer: tokio::net::unix::OwnedWriteHalf,
    mut response_rx: mpsc::Receiver<MethodResponse>,
) {
    while let Some(response) = response_rx.recv().await {
        if writer.write_all(encode_line(&response).as_bytes()).await.is_err() {
            break;
        }
    }
}

/// One newline-terminated JSON line. A value that fails to serialize
/// becomes an `internal_error` response.
fn encode_line<T: Serialize>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => format!("{}\n", json),
        Err(e) => {
            warn!(error = %e, "Failed to encode response");
            format!(
                "{{\"Error\":{{\"code\":\"{}\",\"message\":\"response could not be encoded\"}}}}\n",
                INTERNAL_ERROR
            )
        }
    }
}
