//! Sign-up/sign-in wizard domain module.
//!
//! The wizard is a pure state machine: [`WizardStateMachine::transition`]
//! maps a state and an event to the next state plus side-effect actions.
//! Side effects (backend calls, navigation) are executed by the application
//! layer, which feeds results back in as events.

pub mod action;
pub mod error;
pub mod event;
pub mod state;
pub mod state_machine;
pub mod validation;

pub use action::WizardAction;
pub use error::FieldError;
pub use event::WizardEvent;
pub use state::{WizardState, WizardStep, CODE_LEN, REDIRECT_COUNTDOWN_SECS, RESEND_COUNTDOWN_SECS};
pub use state_machine::WizardStateMachine;
pub use validation::{password_requirements, PasswordRequirements};
