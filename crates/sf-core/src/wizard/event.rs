/// Events that drive the wizard.
///
/// Field edits and button presses come from the view; `*Resolved` events are
/// fed back by the orchestrator after it executes a backend action; `Tick`
/// arrives once per second from the timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    // Email entry
    EmailEdited { value: String },
    ContinueEmail,
    AccountLookupResolved { known: bool },

    // Account creation form
    FirstNameEdited { value: String },
    LastNameEdited { value: String },
    PhoneEdited { value: String },
    PasswordEdited { value: String },
    SubmitAccount,

    // Sign-in
    SubmitSignIn { password: String },
    SignInResolved { ok: bool },

    // Verification code entry
    CodeDigitEntered { slot: usize, value: char },
    CodeDigitErased { slot: usize },
    SubmitVerification,
    VerificationResolved { ok: bool },
    ResendRequested,

    // Navigation / timers
    Back,
    Tick,
}
