//! Service lifecycle state.
//!
//! # States
//! ```text
//! Uninitialized → Loading → Ready
//!                        ↘ Failed
//! ```
//! Ready and Failed are terminal. The model slot is filled exactly once,
//! before the phase becomes Ready, so any reader that observes Ready also
//! observes the model.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::OnceLock;

use crate::model::SharedModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Phase {
    Uninitialized = 0,
    Loading = 1,
    Ready = 2,
    Failed = 3,
}

impl Phase {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Phase::Loading,
            2 => Phase::Ready,
            3 => Phase::Failed,
            _ => Phase::Uninitialized,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Uninitialized => "uninitialized",
            Phase::Loading => "loading",
            Phase::Ready => "ready",
            Phase::Failed => "failed",
        }
    }
}

/// Liveness, readiness and the loaded model, shared by every handler.
#[derive(Debug)]
pub struct ServiceState {
    alive: AtomicBool,
    phase: AtomicU8,
    model: OnceLock<SharedModel>,
}

impl ServiceState {
    /// Alive, nothing loaded yet.
    pub fn new() -> Self {
        Self {
            alive: AtomicBool::new(true),
            phase: AtomicU8::new(Phase::Uninitialized as u8),
            model: OnceLock::new(),
        }
    }

    /// State for a model that was loaded before serving.
    pub fn with_model(model: SharedModel) -> Self {
        let state = Self::new();
        state.install_model(model);
        state
    }

    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    pub fn set_alive(&self, alive: bool) {
        self.alive.store(alive, Ordering::Release);
    }

    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::Acquire))
    }

    pub fn is_ready(&self) -> bool {
        self.phase() == Phase::Ready
    }

    /// Uninitialized → Loading. Returns false if loading already started.
    pub fn begin_loading(&self) -> bool {
        self.transition(Phase::Uninitialized, Phase::Loading)
    }

    /// Store the model and move to Ready. Returns false if a model was
    /// already installed or the load had failed.
    pub fn install_model(&self, model: SharedModel) -> bool {
        if self.phase() == Phase::Failed || self.model.set(model).is_err() {
            return false;
        }
        self.phase.store(Phase::Ready as u8, Ordering::Release);
        true
    }

    /// Loading → Failed. Readiness never becomes true afterwards.
    pub fn mark_failed(&self) -> bool {
        self.transition(Phase::Loading, Phase::Failed)
            || self.transition(Phase::Uninitialized, Phase::Failed)
    }

    /// The model, once installed.
    pub fn model(&self) -> Option<&SharedModel> {
        self.model.get()
    }

    fn transition(&self, from: Phase, to: Phase) -> bool {
        self.phase
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl Default for ServiceState {
    fn default() -> Self {
        Self::new()
    }
}
