use serde::{Deserialize, Serialize};

use crate::wizard::error::FieldError;

/// Number of digit slots in the verification code input.
pub const CODE_LEN: usize = 6;

/// Seconds before "get another code" becomes available again.
pub const RESEND_COUNTDOWN_SECS: u32 = 30;

/// Seconds shown on the success screen before the external redirect fires.
pub const REDIRECT_COUNTDOWN_SECS: u32 = 3;

/// Wizard screens.
///
/// 向导步骤。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    /// Email entry, the initial screen.
    EmailEntry,
    /// Sign-in form for a recognized account.
    SignIn,
    /// Account-creation form.
    AccountCreate,
    /// Verification code entry.
    Verify,
    /// Terminal success screen with a timed redirect.
    Success,
}

/// The authoritative wizard session record.
///
/// Exclusively owned by the controller; the view treats it as read-only
/// input. Created empty at session start, mutated only through
/// [`WizardStateMachine::transition`], and dropped with the session.
///
/// [`WizardStateMachine::transition`]: crate::wizard::WizardStateMachine::transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub step: WizardStep,
    /// Where Back returns to when the current screen is reachable from more
    /// than one place. Recorded on every forward transition instead of
    /// hard-coding the predecessor.
    pub previous_step: Option<WizardStep>,

    // Form fields
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Normalized to digits only as the user types.
    pub phone_digits: String,
    pub password: String,

    // Per-field errors, cleared the moment the field is edited again
    pub email_error: Option<FieldError>,
    pub first_name_error: Option<FieldError>,
    pub last_name_error: Option<FieldError>,
    pub phone_error: Option<FieldError>,
    pub password_error: Option<FieldError>,
    pub sign_in_error: Option<FieldError>,

    // Verification code entry
    pub code_slots: [Option<char>; CODE_LEN],
    pub focused_slot: usize,
    pub verification_failed: bool,

    // In-flight flags; the owning action is disabled while set
    pub is_checking_email: bool,
    pub is_verifying: bool,
    pub is_signing_in: bool,

    // Countdowns, decremented by 1-second ticks
    pub resend_countdown_secs: u32,
    pub redirect_countdown_secs: u32,
    /// Latch so the success redirect fires exactly once.
    pub redirect_fired: bool,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: WizardStep::EmailEntry,
            previous_step: None,
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            phone_digits: String::new(),
            password: String::new(),
            email_error: None,
            first_name_error: None,
            last_name_error: None,
            phone_error: None,
            password_error: None,
            sign_in_error: None,
            code_slots: [None; CODE_LEN],
            focused_slot: 0,
            verification_failed: false,
            is_checking_email: false,
            is_verifying: false,
            is_signing_in: false,
            resend_countdown_secs: 0,
            redirect_countdown_secs: REDIRECT_COUNTDOWN_SECS,
            redirect_fired: false,
        }
    }
}

impl WizardState {
    /// The full verification code, if every slot is filled.
    pub fn entered_code(&self) -> Option<String> {
        self.code_slots.iter().copied().collect()
    }

    /// Whether the Verify action is currently enabled.
    pub fn can_submit_code(&self) -> bool {
        !self.is_verifying && self.entered_code().is_some()
    }

    /// Whether "get another code" is currently enabled.
    pub fn can_resend_code(&self) -> bool {
        self.resend_countdown_secs == 0
    }
}
