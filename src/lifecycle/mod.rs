pub mod fsm;

pub use fsm::{LifecycleEvent, LifecycleState, LifecycleStateMachine, ServiceStatus};

use crate::{
    Result,
    artifact::{self, ArtifactMetadata, ModelArtifact},
    config::Config,
    inference::InferenceEngine,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{error, info};

/// Readiness snapshot fixed at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadinessState {
    pub status: ServiceStatus,
    pub model_version: String,
}

/// Everything a request needs, built once before the listener is bound.
#[derive(Debug, Clone)]
pub struct ServiceContext {
    pub service_name: String,
    pub engine: Arc<InferenceEngine>,
    pub metadata: Arc<ArtifactMetadata>,
    pub readiness: ReadinessState,
    pub loaded_at: DateTime<Utc>,
}

impl ServiceContext {
    /// Wraps an already loaded artifact into a ready context.
    pub fn from_artifact(service_name: impl Into<String>, artifact: ModelArtifact) -> Self {
        let ModelArtifact {
            classifier,
            encoder,
            metadata,
            ..
        } = artifact;

        let engine = InferenceEngine::new(Arc::new(classifier), Arc::new(encoder));
        let readiness = ReadinessState {
            status: ServiceStatus::Ready,
            model_version: metadata.model_version(),
        };

        Self {
            service_name: service_name.into(),
            engine: Arc::new(engine),
            metadata: Arc::new(metadata),
            readiness,
            loaded_at: Utc::now(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.readiness.status == ServiceStatus::Ready
    }
}

/// Loads the model artifact named by the configuration and builds the
/// service context. Any error leaves the lifecycle in `Failed`; the caller is
/// expected to terminate the process.
pub async fn initialize(config: &Config) -> Result<ServiceContext> {
    let mut lifecycle = LifecycleStateMachine::new();
    lifecycle.transition(LifecycleEvent::BeginLoad)?;

    info!("Loading model artifact from {}", config.model.path);

    match artifact::load(&config.model.path).await {
        Ok(artifact) => {
            lifecycle.transition(LifecycleEvent::ArtifactLoaded)?;
            let context = ServiceContext::from_artifact(config.service_name.clone(), artifact);
            info!(
                "Service ready with model version {}",
                context.readiness.model_version
            );
            Ok(context)
        }
        Err(e) => {
            lifecycle.transition(LifecycleEvent::LoadFailed)?;
            error!("Model initialization failed: {}", e);
            Err(e)
        }
    }
}
