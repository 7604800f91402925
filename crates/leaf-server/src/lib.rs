//! HTTP server for the Leaf page editor.
//!
//! This crate provides a native Rust HTTP server using axum, serving:
//! - `GET /view/{title}` - rendered page, or redirect to the editor
//! - `GET /edit/{title}` - edit form for an existing or new page
//! - `POST /save/{title}` - store the submitted `body` and redirect to the page
//! - `GET /` - redirect to the configured front page
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use leaf_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         host: "0.0.0.0".to_string(),
//!         port: 8080,
//!         pages_dir: PathBuf::from("."),
//!         templates_dir: None,
//!         front_page: "FrontPage".to_string(),
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Lifecycle
//!
//! [`Server::bind`] opens the listener, after which the server is driven by
//! either [`Server::serve_with_shutdown`] or [`Server::spawn`], which returns
//! a [`RunningServer`] handle with an explicit [`RunningServer::stop`].
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (leaf-server)
//!                        │
//!                        ├─► handlers::pages ──► Storage (leaf-storage)
//!                        │                         └─► {pages_dir}/{title}.txt
//!                        │
//!                        └─► Renderer (leaf-renderer)
//!                                  └─► view.html / edit.html
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use leaf_renderer::{Renderer, TemplateSource};
use leaf_storage::{FsStorage, Storage, validate_title};
use state::AppState;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub use error::ServeError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Directory holding `<title>.txt` page files.
    pub pages_dir: PathBuf,
    /// Template directory (`None` uses the built-in templates).
    pub templates_dir: Option<PathBuf>,
    /// Title that `/` redirects to.
    pub front_page: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8080,
            pages_dir: PathBuf::from("."),
            templates_dir: None,
            front_page: "FrontPage".to_owned(),
        }
    }
}

/// A bound, not yet running server.
pub struct Server {
    listener: TcpListener,
    app: Router,
}

impl Server {
    /// Bind a server backed by filesystem storage in `config.pages_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid, the front page title is
    /// invalid, or the listener cannot be bound.
    pub async fn bind(config: &ServerConfig) -> Result<Self, ServeError> {
        let storage: Arc<dyn Storage> = Arc::new(FsStorage::new(config.pages_dir.clone()));
        Self::bind_with_storage(config, storage).await
    }

    /// Bind a server backed by the given storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the address is invalid, the front page title is
    /// invalid, or the listener cannot be bound.
    pub async fn bind_with_storage(
        config: &ServerConfig,
        storage: Arc<dyn Storage>,
    ) -> Result<Self, ServeError> {
        validate_title(&config.front_page).map_err(ServeError::InvalidFrontPage)?;

        let address = format!("{}:{}", config.host, config.port);
        let addr: SocketAddr = address
            .parse()
            .map_err(|source| ServeError::InvalidAddress { address, source })?;

        let templates = config
            .templates_dir
            .clone()
            .map_or(TemplateSource::Embedded, TemplateSource::Directory);

        let state = Arc::new(AppState {
            storage,
            renderer: Renderer::new(templates),
            front_page: config.front_page.clone(),
        });

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(address = %listener.local_addr()?, "Server bound");

        Ok(Self {
            listener,
            app: app::create_router(state),
        })
    }

    /// Address the server is listening on.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket address cannot be queried.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve requests until `signal` completes, then finish in-flight requests.
    ///
    /// # Errors
    ///
    /// Returns an error if serving fails.
    pub async fn serve_with_shutdown<F>(self, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(signal)
            .await
    }

    /// Serve requests on a background task.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket address cannot be queried.
    pub fn spawn(self) -> std::io::Result<RunningServer> {
        let addr = self.local_addr()?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(self.serve_with_shutdown(async move {
            // A dropped sender also stops the server
            let _ = shutdown_rx.await;
        }));

        Ok(RunningServer {
            addr,
            shutdown_tx,
            task,
        })
    }
}

/// Handle to a server started with [`Server::spawn`].
pub struct RunningServer {
    addr: SocketAddr,
    shutdown_tx: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

impl RunningServer {
    /// Address the server is listening on.
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting connections and wait for in-flight requests to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if serving failed or the server task panicked.
    pub async fn stop(self) -> std::io::Result<()> {
        let _ = self.shutdown_tx.send(());
        self.task.await.map_err(std::io::Error::other)??;
        tracing::info!(address = %self.addr, "Server stopped");
        Ok(())
    }
}

/// Run the server until Ctrl-C.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the server fails to start or serve.
pub async fn run_server(config: ServerConfig) -> Result<(), ServeError> {
    let server = Server::bind(&config).await?;
    tracing::info!(address = %server.local_addr()?, "Starting server");

    server.serve_with_shutdown(shutdown_signal()).await?;
    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from Leaf config.
#[must_use]
pub fn server_config_from_leaf_config(config: &leaf_config::Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        pages_dir: config.pages_resolved.dir.clone(),
        templates_dir: config.templates_dir.clone(),
        front_page: config.pages_resolved.front_page.clone(),
    }
}

#[cfg(test)]
mod tests {
    use leaf_storage::MockStorage;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    use super::*;

    fn local_config() -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 0,
            ..ServerConfig::default()
        }
    }

    async fn raw_request(addr: SocketAddr, request: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream.write_all(request.as_bytes()).await.unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        response
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.front_page, "FrontPage");
    }

    #[test]
    fn test_server_config_from_leaf_config() {
        let config = leaf_config::Config::default();

        let server_config = server_config_from_leaf_config(&config);

        assert_eq!(server_config.port, 8080);
        assert_eq!(server_config.pages_dir, config.pages_resolved.dir);
        assert!(server_config.templates_dir.is_none());
    }

    #[tokio::test]
    async fn test_bind_rejects_invalid_front_page() {
        let config = ServerConfig {
            front_page: "../etc".to_owned(),
            ..local_config()
        };

        let result = Server::bind(&config).await;

        assert!(matches!(result, Err(ServeError::InvalidFrontPage(_))));
    }

    #[tokio::test]
    async fn test_bind_rejects_invalid_address() {
        let config = ServerConfig {
            host: "not a host".to_owned(),
            ..local_config()
        };

        let result = Server::bind(&config).await;

        assert!(matches!(result, Err(ServeError::InvalidAddress { .. })));
    }

    #[tokio::test]
    async fn test_spawn_serves_and_stops() {
        let storage = Arc::new(MockStorage::new().with_page("Home", "Welcome"));
        let server = Server::bind_with_storage(&local_config(), storage)
            .await
            .unwrap();
        let running = server.spawn().unwrap();
        let addr = running.local_addr();

        let response = raw_request(
            addr,
            "GET /view/Home HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains("Welcome"));

        let response = raw_request(
            addr,
            "GET /view/Missing HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        )
        .await;
        assert!(response.starts_with("HTTP/1.1 302"));
        assert!(response.to_lowercase().contains("location: /edit/missing"));

        running.stop().await.unwrap();
        assert!(TcpStream::connect(addr).await.is_err());
    }
}
