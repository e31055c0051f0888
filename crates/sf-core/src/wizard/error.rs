use serde::{Deserialize, Serialize};

/// Per-field validation errors shown next to the offending input.
///
/// These are values on the wizard state, not control-flow errors: every one
/// of them keeps the user on the current step with an actionable message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum FieldError {
    #[error("Please enter a valid email address.")]
    InvalidEmailFormat,

    /// Advisory, not a hard failure: blocks Continue but offers a one-click
    /// correction the view can apply.
    #[error("Did you mean {local}@{domain}?")]
    DidYouMean { local: String, domain: String },

    #[error("First name is required.")]
    FirstNameRequired,

    #[error("Last name is required.")]
    LastNameRequired,

    #[error("Phone number is required.")]
    PhoneRequired,

    #[error("Please enter a valid 10-digit phone number.")]
    PhoneTooShort,

    #[error("Create a password is required.")]
    PasswordRequired,

    #[error("Password does not meet all requirements.")]
    PasswordRequirementsNotMet,

    #[error("Incorrect email or password.")]
    SignInRejected,
}
