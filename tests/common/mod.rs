#![allow(dead_code)]

use arcade::bootstrap::app_context::{AppContext, AppServices};
use arcade::bootstrap::config::Config;
use tokio::task::JoinHandle;

pub struct TestServer {
    pub base: String,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

/// Serves the full router over a fresh in-memory store on an ephemeral port.
pub async fn start_server() -> TestServer {
    start_server_with(Config::for_memory()).await
}

pub async fn start_server_with(cfg: Config) -> TestServer {
    let ctx = AppContext::new(cfg, AppServices::in_memory());
    let app = arcade::presentation::http::router(ctx);

    let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind");
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = rx.await;
            })
            .await;
    });

    TestServer {
        base: format!("http://{addr}"),
        shutdown: Some(tx),
        handle: Some(handle),
    }
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("client")
}
