//! In-process HTTP server for end-to-end API tests

use serde_json::Value;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use SalaryBoard::routes::{app_router, serve};
use SalaryBoard::state::AppState;

/// The application served on an ephemeral local port
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn(state: AppState) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind test listener");
        let address = listener.local_addr().expect("listener address");
        let router = app_router(state);

        let handle = tokio::spawn(async move {
            let _ = serve(listener, router, std::future::pending()).await;
        });

        Self {
            base_url: format!("http://{}", address),
            client: reqwest::Client::new(),
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.expect("GET request")
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("POST request")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
