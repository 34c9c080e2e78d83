//! # Common Test Utilities
//!
//! This module centralizes the test harness used across the
//! `recipe-lens-server` integration tests.
//!
//! - `TestApp`: spawns the real router on a random port, configured so that
//!   storage, Gemini and the recipes table all point at a single
//!   `httpmock::MockServer`.
//! - Helpers for the mock responses those services return.

// Allow unused code because this is a test utility module, and not all
// functions might be used by every test file that includes it.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use httpmock::MockServer;
use recipe_lens_server::{
    config::{AppConfig, GeminiConfig, SupabaseConfig},
    router,
    state::{build_app_state, AppState},
};
use reqwest::Client;
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::{net::TcpListener, task::JoinHandle};

/// The path the mock Gemini endpoint is served under.
pub const GEMINI_PATH: &str = "/v1beta/models/mock-model:generateContent";

/// The service key configured for the mock datastore.
pub const SERVICE_KEY: &str = "test-service-key";

// --- Full Application Test Harness ---

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the application server against a fresh mock server.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_options(|_| {}).await
    }

    /// Spawns the application server after letting `customize` adjust the
    /// configuration that points every upstream at the mock server.
    ///
    /// The configuration is built in code rather than through `get_config`, so
    /// credentials or URLs exported in the developer's shell never redirect
    /// test traffic.
    pub async fn spawn_with_options(customize: impl FnOnce(&mut AppConfig)) -> Result<Self> {
        let mock_server = MockServer::start();

        let mut config = test_config();
        config.supabase.url = mock_server.base_url();
        config.gemini.api_url = Some(mock_server.url(GEMINI_PATH));
        customize(&mut config);

        let app_state = build_app_state(config).await?;
        TestApp::spawn_with_state(app_state, mock_server).await
    }

    pub async fn spawn_with_state(app_state: AppState, mock_server: MockServer) -> Result<Self> {
        // `try_init` is used to prevent panic if the logger is already initialized.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let app_state_for_harness = app_state.clone();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        // Give the server a moment to start up.
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            app_state: app_state_for_harness,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Posts a parse request for `file_url` under `upload_id`.
    pub async fn post_parse(&self, upload_id: &str, file_url: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(format!("{}/parse", self.address))
            .json(&json!({ "upload_id": upload_id, "file_url": file_url }))
            .send()
            .await?)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            // The receiver might already be gone if the server task panicked,
            // so we ignore the result of send.
            let _ = tx.send(());
        }
    }
}

/// A config for tests that assemble their own pipeline.
pub fn test_config() -> AppConfig {
    AppConfig {
        port: 0,
        supabase: SupabaseConfig {
            url: "http://localhost:54321".to_string(),
            service_key: SERVICE_KEY.to_string(),
            storage_bucket: "uploads".to_string(),
            storage_path_template: "/storage/v1/object/{bucket}/{key}".to_string(),
            recipes_table: "recipes".to_string(),
            upsert_on_upload_id: false,
        },
        gemini: GeminiConfig {
            api_key: "test-gemini-key".to_string(),
            model_name: "mock-model".to_string(),
            api_url: None,
        },
        cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        extraction_prompt: None,
    }
}

/// The body Gemini returns for a single text answer.
pub fn gemini_text_response(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}
