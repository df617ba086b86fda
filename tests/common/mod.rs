//! Shared utilities for integration testing.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use strange_errors_sdk::ServerClient;
use strange_errors_server::config::ServerConfig;
use strange_errors_server::http::{AppState, HttpServer};
use strange_errors_server::lifecycle::{Shutdown, Terminator};
use strange_errors_server::store::SqliteStore;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// Records exit codes instead of exiting.
#[derive(Default)]
pub struct RecordingTerminator {
    codes: Mutex<Vec<i32>>,
}

impl RecordingTerminator {
    pub fn fired(&self) -> Vec<i32> {
        self.codes.lock().unwrap().clone()
    }
}

impl Terminator for RecordingTerminator {
    fn terminate(&self, exit_code: i32) {
        self.codes.lock().unwrap().push(exit_code);
    }
}

/// A running server backed by a temporary SQLite file.
#[allow(dead_code)]
pub struct TestServer {
    pub url: String,
    pub client: ServerClient,
    pub db_path: PathBuf,
    pub state: AppState,
    pub terminator: Arc<RecordingTerminator>,
    pub termination_delay: Duration,
    shutdown: Shutdown,
    _dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    pub fn invocation_count(&self) -> u64 {
        self.state.escalator.count()
    }

    /// Wait long enough for every termination scheduled so far to fire.
    pub async fn wait_for_terminations(&self) {
        tokio::time::sleep(self.termination_delay * 5).await;
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a server on an ephemeral port. `tweak` can adjust the config before boot.
pub async fn start_server<F>(tweak: F) -> TestServer
where
    F: FnOnce(&mut ServerConfig),
{
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("database.db");

    let mut config = ServerConfig::default();
    config.database.path = db_path.to_string_lossy().into_owned();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.escalator.termination_delay_ms = 20;
    tweak(&mut config);

    let store = SqliteStore::open(&config.database).await.unwrap();
    let terminator = Arc::new(RecordingTerminator::default());
    let server = HttpServer::new(&config, Arc::new(store), terminator.clone()).unwrap();
    let state = server.state().clone();

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let url = format!("http://{}", addr);
    TestServer {
        client: ServerClient::new(&url)
            .with_goat_method(&config.routing.escalator_verb)
            .with_health_check_path(&config.routing.health_check_path),
        url,
        db_path,
        state,
        terminator,
        termination_delay: Duration::from_millis(config.escalator.termination_delay_ms),
        shutdown,
        _dir: dir,
    }
}
