//! # sf-app
//!
//! Application layer for SignupFlow: the wizard orchestrator that runs the
//! pure state machine against the ports.

pub mod usecases;

pub use usecases::wizard::{WizardOrchestrator, WizardOrchestratorError};
