use anyhow::Result;
use axum::{
    Router,
    extract::State,
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    response::IntoResponse,
    routing::get,
};
use notify_debouncer_mini::{DebounceEventResult, new_debouncer};
use std::{net::SocketAddr, path::PathBuf, time::Duration};
use tokio::sync::broadcast;
use tower_http::services::ServeDir;

/// Configuration for the wall preview server.
#[derive(Debug, Clone)]
pub struct PreviewConfig {
    /// Host to bind to
    pub host: String,
    /// Port to serve on
    pub port: u16,
    /// Built output directory to serve and watch
    pub root: PathBuf,
    /// Auto-open browser
    pub open: bool,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            root: PathBuf::from("./out"),
            open: false,
        }
    }
}

/// Static file server over the built wall with a live-reload websocket.
///
/// The server only watches the output tree: whenever the CLI (or anything
/// else) rewrites it, connected browsers get a `reload` message. Pages built
/// in dev mode carry the matching script in their base template.
pub struct PreviewServer {
    config: PreviewConfig,
}

impl PreviewServer {
    pub fn new(config: PreviewConfig) -> Self {
        Self { config }
    }

    pub async fn run(self) -> Result<()> {
        if !self.config.root.exists() {
            return Err(anyhow::anyhow!(
                "Output directory does not exist: {}",
                self.config.root.display()
            ));
        }

        let (reload_tx, _) = broadcast::channel::<String>(16);

        let watch_root = self.config.root.clone();
        let watch_tx = reload_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = watch_output(watch_root, watch_tx).await {
                eprintln!("Output watcher error: {}", e);
            }
        });

        let app = Router::new()
            .route("/__livereload", get(websocket_handler))
            .fallback_service(ServeDir::new(&self.config.root))
            .with_state(AppState {
                reload_tx: reload_tx.clone(),
            });

        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;

        println!("Serving the wall at http://{}", addr);
        println!("Watching: {}", self.config.root.display());

        if self.config.open {
            if let Err(e) = open::that(format!("http://{}", addr)) {
                eprintln!("Failed to open browser: {}", e);
            }
        }

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

#[derive(Clone)]
struct AppState {
    reload_tx: broadcast::Sender<String>,
}

async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| websocket_connection(socket, state.reload_tx))
}

async fn websocket_connection(mut socket: WebSocket, reload_tx: broadcast::Sender<String>) {
    let mut rx = reload_tx.subscribe();

    loop {
        tokio::select! {
            msg = rx.recv() => {
                match msg {
                    Ok(reload_msg) => {
                        if socket.send(Message::Text(reload_msg.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
            msg = socket.recv() => {
                if msg.is_none() {
                    break;
                }
            }
        }
    }
}

async fn watch_output(root: PathBuf, reload_tx: broadcast::Sender<String>) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::channel(100);

    let mut debouncer = new_debouncer(
        Duration::from_millis(500),
        move |res: DebounceEventResult| {
            if let Ok(events) = res {
                for event in events {
                    let _ = tx.blocking_send(event.path);
                }
            }
        },
    )?;

    debouncer
        .watcher()
        .watch(&root, notify::RecursiveMode::Recursive)?;

    while let Some(path) = rx.recv().await {
        println!("Output changed: {}", path.display());
        let _ = reload_tx.send("reload".to_string());
    }

    Ok(())
}
