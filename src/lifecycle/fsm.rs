use crate::{Error, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

// Startup states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Loading,
    Ready,
    Failed,
}

// Startup events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    BeginLoad,
    ArtifactLoaded,
    LoadFailed,
}

/// Readiness as seen by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServiceStatus {
    NotReady,
    Ready,
    Failed,
}

impl From<LifecycleState> for ServiceStatus {
    fn from(state: LifecycleState) -> Self {
        match state {
            LifecycleState::Uninitialized | LifecycleState::Loading => Self::NotReady,
            LifecycleState::Ready => Self::Ready,
            LifecycleState::Failed => Self::Failed,
        }
    }
}

/// Drives startup exactly once: `Uninitialized -> Loading -> Ready | Failed`.
#[derive(Debug)]
pub struct LifecycleStateMachine {
    state: LifecycleState,
}

impl LifecycleStateMachine {
    pub fn new() -> Self {
        Self {
            state: LifecycleState::Uninitialized,
        }
    }

    pub fn current_state(&self) -> LifecycleState {
        self.state
    }

    pub fn status(&self) -> ServiceStatus {
        self.state.into()
    }

    pub fn transition(&mut self, event: LifecycleEvent) -> Result<()> {
        debug!("Lifecycle event {:?} in state {:?}", event, self.state);

        let new_state = match (self.state, event) {
            (LifecycleState::Uninitialized, LifecycleEvent::BeginLoad) => LifecycleState::Loading,
            (LifecycleState::Loading, LifecycleEvent::ArtifactLoaded) => LifecycleState::Ready,
            (LifecycleState::Loading, LifecycleEvent::LoadFailed) => LifecycleState::Failed,
            _ => {
                warn!(
                    "Invalid lifecycle transition from {:?} with event {:?}",
                    self.state, event
                );
                return Err(Error::InvalidTransition {
                    current: format!("{:?}", self.state),
                    requested: format!("{:?}", event),
                });
            }
        };

        info!(
            "Lifecycle state transition: {:?} -> {:?} (event: {:?})",
            self.state, new_state, event
        );
        self.state = new_state;
        Ok(())
    }
}

impl Default for LifecycleStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
