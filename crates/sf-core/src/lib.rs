//! # sf-core
//!
//! Core domain models and business logic for SignupFlow.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod ports;
pub mod security;
pub mod suggest;
pub mod wizard;

// Re-export commonly used types at the crate root
pub use security::SecretString;
pub use suggest::{autocomplete_addresses, suggest_corrected_domain, KNOWN_DOMAINS};
pub use wizard::{
    password_requirements, FieldError, WizardAction, WizardEvent, WizardState, WizardStateMachine,
    WizardStep,
};
