//! Entry points used by the HTTP layer
//!
//! Starting an investigation creates the session, spawns its agent loop and
//! returns the session id without waiting. The loop runs in its own task; a
//! second task watches it so that a panic still closes the session with
//! `error` + `end`.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use super::controller::{AgentConfig, AgentController};
use super::prompts::InvestigationRequest;
use super::sessions::{SessionError, SessionStore, Subscription};
use crate::metrics::{INVESTIGATIONS, INVESTIGATIONS_STARTED};
use crate::providers::{Provider, ProviderAdapter, ProviderConfig};
use crate::tools::ToolRegistry;

/// Whether an LLM provider is configured, and which
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentStatus {
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

pub struct AgentService {
    store: Arc<SessionStore>,
    tools: Arc<ToolRegistry>,
    provider: Option<ProviderConfig>,
    config: AgentConfig,
}

impl AgentService {
    /// `provider` is the result of provider selection; `None` means unconfigured
    pub fn new(
        store: Arc<SessionStore>,
        tools: Arc<ToolRegistry>,
        provider: Option<ProviderConfig>,
        config: AgentConfig,
    ) -> Self {
        Self {
            store,
            tools,
            provider,
            config,
        }
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    pub fn status(&self) -> AgentStatus {
        match &self.provider {
            Some(p) => AgentStatus {
                configured: true,
                provider: Some(p.provider.to_string()),
                model: Some(p.model.clone()),
            },
            None => AgentStatus {
                configured: false,
                provider: None,
                model: None,
            },
        }
    }

    /// Start an investigation with the configured provider.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start_investigation(&self, request: InvestigationRequest) -> String {
        let adapter = match &self.provider {
            None => Err("No LLM provider configured".to_string()),
            Some(config) => {
                Provider::from_config(config, &self.tools.specs(), self.config.provider_timeout)
                    .map(|p| Box::new(p) as Box<dyn ProviderAdapter>)
                    .map_err(|e| format!("Failed to initialize {}: {}", config.provider, e))
            }
        };
        self.launch(request, adapter)
    }

    /// Start an investigation driven by an already-built adapter
    pub fn start_with_adapter(
        &self,
        request: InvestigationRequest,
        adapter: Box<dyn ProviderAdapter>,
    ) -> String {
        self.launch(request, Ok(adapter))
    }

    pub fn subscribe(&self, session_id: &str) -> Result<Subscription, SessionError> {
        self.store.subscribe(session_id)
    }

    fn launch(
        &self,
        request: InvestigationRequest,
        adapter: Result<Box<dyn ProviderAdapter>, String>,
    ) -> String {
        let session_id = self.store.create(request.clone());
        INVESTIGATIONS_STARTED.inc();
        info!(
            session_id = %session_id,
            container = %request.container.name,
            "Investigation requested"
        );

        let adapter = match adapter {
            Ok(adapter) => adapter,
            Err(message) => {
                warn!(session_id = %session_id, error = %message, "Investigation not started");
                self.store.fail(&session_id, &message);
                INVESTIGATIONS.with_label_values(&["config_error"]).inc();
                return session_id;
            }
        };

        let controller = AgentController::new(
            adapter,
            Arc::clone(&self.tools),
            Arc::clone(&self.store),
            self.config.clone(),
        );
        let loop_id = session_id.clone();
        let task = tokio::spawn(async move { controller.run(&loop_id, &request).await });

        let store = Arc::clone(&self.store);
        let watch_id = session_id.clone();
        tokio::spawn(async move {
            if let Err(e) = task.await {
                error!(session_id = %watch_id, error = %e, "Investigation task aborted");
                if store.fail(&watch_id, &format!("Investigation aborted: {}", e)) {
                    INVESTIGATIONS.with_label_values(&["panic"]).inc();
                }
            }
        });

        session_id
    }
}
