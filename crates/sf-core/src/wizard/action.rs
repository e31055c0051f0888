use crate::ports::NewAccount;
use crate::security::SecretString;

/// Side effects produced by wizard transitions.
///
/// Executed by the application layer against the ports; results come back as
/// `*Resolved` events. The machine itself never performs I/O.
#[derive(Debug, PartialEq)]
pub enum WizardAction {
    /// Ask the backend whether this email already has an account.
    CheckKnownAccount { email: String },

    /// Send (or resend) a one-time verification code.
    SendVerificationCode { email: String },

    /// Verify the entered code and, on success, create the account.
    VerifyCodeAndCreateAccount { code: String, account: NewAccount },

    /// Sign in to an existing account.
    PerformSignIn {
        email: String,
        password: SecretString,
    },

    /// Hand off to the external redirect target. One-way; fired exactly once.
    RedirectHome,
}
