//! Development server with live reload

use anyhow::Result;
use axum::{
    body::Body,
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;

use crate::commands::generate::watch_blocking;
use crate::helpers::uri_segments;
use crate::Site;

const LIVE_RELOAD_PATH: &str = "/__livereload";

/// Appended to every HTML page when live reload is on
const LIVE_RELOAD_SCRIPT: &str = r#"
<script>
(function() {
    var ws = new WebSocket('ws://' + location.host + '/__livereload');
    ws.onmessage = function(msg) {
        if (msg.data === 'reload') {
            location.reload();
        }
    };
    ws.onclose = function() {
        setTimeout(function() { location.reload(); }, 1000);
    };
})();
</script>
</body>
"#;

struct ServerState {
    public_dir: PathBuf,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

/// Serve the public directory, regenerating and reloading on changes when
/// `watch` is set
pub async fn start(site: &Site, ip: &str, port: u16, watch: bool, open: bool) -> Result<()> {
    let (reload_tx, _) = broadcast::channel::<()>(16);

    if watch {
        spawn_watcher(site.clone(), reload_tx.clone());
    }

    let app = router(ServerState {
        public_dir: site.public_dir.clone(),
        reload_tx,
        live_reload: watch,
    });

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Serving {} at {}", site.public_dir.display(), url);
    if watch {
        println!("Live reload enabled.");
    }
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: ServerState) -> Router {
    Router::new()
        .route(LIVE_RELOAD_PATH, get(livereload_handler))
        .fallback(fallback_handler)
        .with_state(Arc::new(state))
}

/// Rebuild on a blocking thread and tell every open page to reload
fn spawn_watcher(site: Site, reload_tx: broadcast::Sender<()>) {
    tokio::task::spawn_blocking(move || {
        let notify_clients = || {
            tracing::info!("Regenerated, reloading clients");
            // No receivers just means no page is open
            let _ = reload_tx.send(());
        };
        if let Err(e) = watch_blocking(&site, notify_clients) {
            tracing::error!("File watcher error: {}", e);
        }
    });
}

async fn livereload_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<ServerState>>,
) -> impl IntoResponse {
    let reload_rx = state.reload_tx.subscribe();
    ws.on_upgrade(move |socket| push_reloads(socket, reload_rx))
}

async fn push_reloads(mut socket: WebSocket, mut reload_rx: broadcast::Receiver<()>) {
    tracing::debug!("Live reload client connected");

    loop {
        tokio::select! {
            signal = reload_rx.recv() => match signal {
                Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                    if socket.send(Message::Text("reload".to_string())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            msg = socket.recv() => match msg {
                Some(Ok(Message::Ping(data))) => {
                    if socket.send(Message::Pong(data)).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                _ => {}
            },
        }
    }

    tracing::debug!("Live reload client disconnected");
}

/// HTML pages get the reload script; everything else goes through `ServeDir`
async fn fallback_handler(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
) -> Response {
    let Some(file_path) = resolve_path(&state.public_dir, request.uri().path()) else {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    };

    if state.live_reload && is_html(&file_path) {
        return match tokio::fs::read_to_string(&file_path).await {
            Ok(content) => Html(inject_live_reload(&content)).into_response(),
            Err(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        };
    }

    let mut service = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "html" || ext == "htm")
}

/// Map a request path onto a file under the public directory.
///
/// Directories resolve to their `index.html`; missing files fall back to a
/// `.html` sibling. Paths leaving the public directory resolve to `None`.
fn resolve_path(public_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let segments = uri_segments(request_path)?;
    if segments.is_empty() {
        return Some(public_dir.join("index.html"));
    }

    let mut candidate = public_dir.to_path_buf();
    candidate.extend(&segments);

    if candidate.is_dir() {
        return Some(candidate.join("index.html"));
    }
    if !candidate.exists() {
        let with_html = public_dir.join(format!("{}.html", segments.join("/")));
        if with_html.exists() {
            return Some(with_html);
        }
    }
    Some(candidate)
}

fn inject_live_reload(html: &str) -> String {
    if html.contains("</body>") {
        html.replacen("</body>", LIVE_RELOAD_SCRIPT, 1)
    } else {
        format!("{}{}", html, LIVE_RELOAD_SCRIPT)
    }
}

fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    std::process::Command::new("open").arg(url).spawn()?;

    #[cfg(target_os = "linux")]
    std::process::Command::new("xdg-open").arg(url).spawn()?;

    #[cfg(target_os = "windows")]
    std::process::Command::new("cmd")
        .args(["/c", "start", url])
        .spawn()?;

    Ok(())
}
