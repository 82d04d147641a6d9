//! Conversation server access for the UI
//!
//! Requests run on a dedicated Tokio runtime; GPUI tasks await the join
//! handles and apply results on the main thread.

use anyhow::{Context as _, Result};
use chatlog_core::{ConversationClient, ViewerConfig};
use gpui::*;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Global API client state with Tokio runtime for HTTP operations
pub struct ApiState {
    pub client: ConversationClient,
    /// Tokio runtime handle for HTTP operations
    pub runtime: Arc<Runtime>,
}

impl ApiState {
    pub fn new(config: &ViewerConfig) -> Result<Self> {
        let runtime = Runtime::new().context("Failed to create Tokio runtime")?;

        // Create the reqwest client within the Tokio runtime context
        let client = runtime
            .block_on(async { ConversationClient::from_config(config) })
            .context("Failed to create conversation client")?;

        tracing::debug!("API client initialized for {}", client.base_url());

        Ok(Self {
            client,
            runtime: Arc::new(runtime),
        })
    }
}

impl Global for ApiState {}

/// Run a request on the API runtime and wait for its result.
pub async fn run<T, F>(runtime: Arc<Runtime>, request: F) -> chatlog_core::Result<T>
where
    T: Send + 'static,
    F: Future<Output = chatlog_core::Result<T>> + Send + 'static,
{
    runtime
        .spawn(request)
        .await
        .unwrap_or_else(|e| Err(chatlog_core::Error::Task(e.to_string())))
}
