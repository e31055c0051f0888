//! Wizard state machine.
//!
//! Defines a pure state transition function for the sign-up/sign-in flow.
//! 纯状态机：不包含副作用。

use crate::ports::NewAccount;
use crate::security::SecretString;
use crate::suggest::suggest_corrected_domain;
use crate::wizard::error::FieldError;
use crate::wizard::event::WizardEvent;
use crate::wizard::state::{
    WizardState, WizardStep, CODE_LEN, REDIRECT_COUNTDOWN_SECS, RESEND_COUNTDOWN_SECS,
};
use crate::wizard::validation;
use crate::wizard::WizardAction;

/// Pure wizard state machine.
pub struct WizardStateMachine;

impl WizardStateMachine {
    /// Applies `event` to `state`, returning the next state and the side
    /// effects the application layer must execute. Events that do not apply
    /// to the current step are ignored.
    pub fn transition(state: WizardState, event: WizardEvent) -> (WizardState, Vec<WizardAction>) {
        let mut next = state;
        let mut actions = Vec::new();

        match event {
            WizardEvent::EmailEdited { value } => {
                next.email = value;
                next.email_error = None;
            }

            WizardEvent::ContinueEmail
                if next.step == WizardStep::EmailEntry && !next.is_checking_email =>
            {
                if !validation::is_valid_email(&next.email) {
                    next.email_error = Some(FieldError::InvalidEmailFormat);
                } else if let Some(domain) = suggest_corrected_domain(&next.email) {
                    let local = next
                        .email
                        .split('@')
                        .next()
                        .unwrap_or_default()
                        .to_string();
                    next.email_error = Some(FieldError::DidYouMean {
                        local,
                        domain: domain.to_string(),
                    });
                } else {
                    next.email_error = None;
                    next.is_checking_email = true;
                    actions.push(WizardAction::CheckKnownAccount {
                        email: next.email.clone(),
                    });
                }
            }

            WizardEvent::AccountLookupResolved { known }
                if next.step == WizardStep::EmailEntry && next.is_checking_email =>
            {
                next.is_checking_email = false;
                next.previous_step = Some(WizardStep::EmailEntry);
                next.step = if known {
                    WizardStep::SignIn
                } else {
                    WizardStep::AccountCreate
                };
            }

            WizardEvent::FirstNameEdited { value } => {
                next.first_name = value;
                next.first_name_error = None;
            }
            WizardEvent::LastNameEdited { value } => {
                next.last_name = value;
                next.last_name_error = None;
            }
            WizardEvent::PhoneEdited { value } => {
                next.phone_digits = validation::normalize_phone_digits(&value);
                next.phone_error = None;
            }
            WizardEvent::PasswordEdited { value } => {
                next.password = value;
                next.password_error = None;
            }

            WizardEvent::SubmitAccount if next.step == WizardStep::AccountCreate => {
                // Validate every field before failing so all errors show at once.
                let valid = Self::validate_account_form(&mut next);
                if valid {
                    next.previous_step = Some(WizardStep::AccountCreate);
                    next.step = WizardStep::Verify;
                    next.code_slots = [None; CODE_LEN];
                    next.focused_slot = 0;
                    next.verification_failed = false;
                    actions.push(WizardAction::SendVerificationCode {
                        email: next.email.clone(),
                    });
                }
            }

            WizardEvent::SubmitSignIn { password }
                if next.step == WizardStep::SignIn && !next.is_signing_in =>
            {
                next.is_signing_in = true;
                next.sign_in_error = None;
                actions.push(WizardAction::PerformSignIn {
                    email: next.email.clone(),
                    password: SecretString::new(password),
                });
            }

            WizardEvent::SignInResolved { ok }
                if next.step == WizardStep::SignIn && next.is_signing_in =>
            {
                next.is_signing_in = false;
                if ok {
                    Self::enter_success(&mut next);
                } else {
                    next.sign_in_error = Some(FieldError::SignInRejected);
                }
            }

            WizardEvent::CodeDigitEntered { slot, value }
                if next.step == WizardStep::Verify && !next.is_verifying =>
            {
                // Non-digits are rejected silently, no state change.
                if slot < CODE_LEN && value.is_ascii_digit() {
                    next.code_slots[slot] = Some(value);
                    next.verification_failed = false;
                    if slot + 1 < CODE_LEN {
                        next.focused_slot = slot + 1;
                    }
                }
            }

            WizardEvent::CodeDigitErased { slot }
                if next.step == WizardStep::Verify && !next.is_verifying =>
            {
                if slot < CODE_LEN {
                    if next.code_slots[slot].is_some() {
                        // Backspace acts on the slot it clears; focus follows.
                        next.code_slots[slot] = None;
                        next.verification_failed = false;
                        next.focused_slot = slot;
                    } else if slot > 0 {
                        next.focused_slot = slot - 1;
                    }
                }
            }

            WizardEvent::SubmitVerification if next.step == WizardStep::Verify => {
                if next.can_submit_code() {
                    // entered_code() is Some here by the guard above.
                    if let Some(code) = next.entered_code() {
                        next.is_verifying = true;
                        next.verification_failed = false;
                        actions.push(WizardAction::VerifyCodeAndCreateAccount {
                            code,
                            account: NewAccount {
                                email: next.email.clone(),
                                first_name: next.first_name.clone(),
                                last_name: next.last_name.clone(),
                                phone_digits: next.phone_digits.clone(),
                                password: SecretString::new(next.password.clone()),
                            },
                        });
                    }
                }
            }

            WizardEvent::VerificationResolved { ok }
                if next.step == WizardStep::Verify && next.is_verifying =>
            {
                next.is_verifying = false;
                if ok {
                    Self::enter_success(&mut next);
                } else {
                    next.verification_failed = true;
                }
            }

            WizardEvent::ResendRequested
                if next.step == WizardStep::Verify && next.can_resend_code() =>
            {
                next.resend_countdown_secs = RESEND_COUNTDOWN_SECS;
                actions.push(WizardAction::SendVerificationCode {
                    email: next.email.clone(),
                });
            }

            WizardEvent::Back => match next.step {
                WizardStep::SignIn => {
                    next.step = WizardStep::EmailEntry;
                    next.previous_step = None;
                    next.sign_in_error = None;
                }
                WizardStep::AccountCreate => {
                    next.step = next.previous_step.take().unwrap_or(WizardStep::EmailEntry);
                }
                WizardStep::Verify => {
                    next.step = WizardStep::AccountCreate;
                    // Account creation is only ever entered from the email step.
                    next.previous_step = Some(WizardStep::EmailEntry);
                    next.code_slots = [None; CODE_LEN];
                    next.focused_slot = 0;
                    next.verification_failed = false;
                }
                WizardStep::EmailEntry | WizardStep::Success => {}
            },

            WizardEvent::Tick => {
                if next.resend_countdown_secs > 0 {
                    next.resend_countdown_secs -= 1;
                }
                if next.step == WizardStep::Success && !next.redirect_fired {
                    if next.redirect_countdown_secs > 0 {
                        next.redirect_countdown_secs -= 1;
                    }
                    if next.redirect_countdown_secs == 0 {
                        next.redirect_fired = true;
                        actions.push(WizardAction::RedirectHome);
                    }
                }
            }

            // Event does not apply to the current step: no-op.
            _ => {}
        }

        (next, actions)
    }

    fn enter_success(state: &mut WizardState) {
        state.step = WizardStep::Success;
        state.previous_step = None;
        state.redirect_countdown_secs = REDIRECT_COUNTDOWN_SECS;
        state.redirect_fired = false;
    }

    /// Runs every account-form check, recording per-field errors. Returns
    /// whether the form as a whole passed.
    fn validate_account_form(state: &mut WizardState) -> bool {
        let mut valid = true;

        if state.first_name.trim().is_empty() {
            state.first_name_error = Some(FieldError::FirstNameRequired);
            valid = false;
        } else {
            state.first_name_error = None;
        }

        if state.last_name.trim().is_empty() {
            state.last_name_error = Some(FieldError::LastNameRequired);
            valid = false;
        } else {
            state.last_name_error = None;
        }

        if state.phone_digits.is_empty() {
            state.phone_error = Some(FieldError::PhoneRequired);
            valid = false;
        } else if state.phone_digits.len() < validation::PHONE_MIN_DIGITS {
            state.phone_error = Some(FieldError::PhoneTooShort);
            valid = false;
        } else {
            state.phone_error = None;
        }

        if state.password.trim().is_empty() {
            state.password_error = Some(FieldError::PasswordRequired);
            valid = false;
        } else if !validation::password_requirements(&state.password).all_met() {
            state.password_error = Some(FieldError::PasswordRequirementsNotMet);
            valid = false;
        } else {
            state.password_error = None;
        }

        valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatch(state: WizardState, event: WizardEvent) -> (WizardState, Vec<WizardAction>) {
        WizardStateMachine::transition(state, event)
    }

    fn state_with_email(email: &str) -> WizardState {
        let (state, _) = dispatch(
            WizardState::default(),
            WizardEvent::EmailEdited {
                value: email.to_string(),
            },
        );
        state
    }

    fn account_create_state(email: &str) -> WizardState {
        let state = state_with_email(email);
        let (state, _) = dispatch(state, WizardEvent::ContinueEmail);
        let (state, _) = dispatch(state, WizardEvent::AccountLookupResolved { known: false });
        assert_eq!(state.step, WizardStep::AccountCreate);
        state
    }

    fn filled_account_state() -> WizardState {
        let mut state = account_create_state("new.user@gmail.com");
        for event in [
            WizardEvent::FirstNameEdited { value: "Ada".into() },
            WizardEvent::LastNameEdited { value: "Lovelace".into() },
            WizardEvent::PhoneEdited { value: "(555) 123-4567".into() },
            WizardEvent::PasswordEdited { value: "Longenough1".into() },
        ] {
            let (next, _) = dispatch(state, event);
            state = next;
        }
        state
    }

    fn verify_state() -> WizardState {
        let (state, actions) = dispatch(filled_account_state(), WizardEvent::SubmitAccount);
        assert_eq!(state.step, WizardStep::Verify);
        assert!(matches!(
            actions.as_slice(),
            [WizardAction::SendVerificationCode { .. }]
        ));
        state
    }

    fn enter_code(mut state: WizardState, code: &str) -> WizardState {
        for (slot, ch) in code.chars().enumerate() {
            let (next, _) = dispatch(state, WizardEvent::CodeDigitEntered { slot, value: ch });
            state = next;
        }
        state
    }

    #[test]
    fn continue_with_malformed_email_sets_format_error() {
        let state = state_with_email("not-an-email");
        let (next, actions) = dispatch(state, WizardEvent::ContinueEmail);

        assert_eq!(next.step, WizardStep::EmailEntry);
        assert_eq!(next.email_error, Some(FieldError::InvalidEmailFormat));
        assert!(actions.is_empty());
    }

    #[test]
    fn continue_with_invalid_email_is_idempotent() {
        let state = state_with_email("not-an-email");
        let (first, _) = dispatch(state, WizardEvent::ContinueEmail);
        let (second, _) = dispatch(first.clone(), WizardEvent::ContinueEmail);
        assert_eq!(first, second);
    }

    #[test]
    fn continue_with_typo_domain_sets_did_you_mean() {
        let state = state_with_email("user@gmial.com");
        let (next, actions) = dispatch(state, WizardEvent::ContinueEmail);

        assert_eq!(next.step, WizardStep::EmailEntry);
        assert_eq!(
            next.email_error,
            Some(FieldError::DidYouMean {
                local: "user".into(),
                domain: "gmail.com".into(),
            })
        );
        assert_eq!(
            next.email_error.unwrap().to_string(),
            "Did you mean user@gmail.com?"
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn continue_with_valid_email_requests_account_lookup() {
        let state = state_with_email("new.user@gmail.com");
        let (next, actions) = dispatch(state, WizardEvent::ContinueEmail);

        assert!(next.is_checking_email);
        assert_eq!(next.step, WizardStep::EmailEntry);
        assert_eq!(
            actions,
            vec![WizardAction::CheckKnownAccount {
                email: "new.user@gmail.com".into()
            }]
        );
    }

    #[test]
    fn known_account_branches_to_sign_in() {
        let state = state_with_email("fvdsgn@gmail.com");
        let (state, _) = dispatch(state, WizardEvent::ContinueEmail);
        let (next, _) = dispatch(state, WizardEvent::AccountLookupResolved { known: true });

        assert_eq!(next.step, WizardStep::SignIn);
        assert_eq!(next.previous_step, Some(WizardStep::EmailEntry));
    }

    #[test]
    fn unknown_account_branches_to_account_create() {
        let state = account_create_state("new.user@gmail.com");
        assert_eq!(state.step, WizardStep::AccountCreate);
        assert_eq!(state.previous_step, Some(WizardStep::EmailEntry));
        assert!(!state.is_checking_email);
    }

    #[test]
    fn editing_email_clears_its_error() {
        let state = state_with_email("broken");
        let (state, _) = dispatch(state, WizardEvent::ContinueEmail);
        assert!(state.email_error.is_some());

        let (next, _) = dispatch(
            state,
            WizardEvent::EmailEdited {
                value: "fixed@gmail.com".into(),
            },
        );
        assert_eq!(next.email_error, None);
    }

    #[test]
    fn submit_account_with_empty_form_sets_every_error() {
        let state = account_create_state("new.user@gmail.com");
        let (next, actions) = dispatch(state, WizardEvent::SubmitAccount);

        assert_eq!(next.step, WizardStep::AccountCreate);
        assert_eq!(next.first_name_error, Some(FieldError::FirstNameRequired));
        assert_eq!(next.last_name_error, Some(FieldError::LastNameRequired));
        assert_eq!(next.phone_error, Some(FieldError::PhoneRequired));
        assert_eq!(next.password_error, Some(FieldError::PasswordRequired));
        assert!(actions.is_empty());
    }

    #[test]
    fn submit_account_with_short_password_flags_requirements() {
        let state = filled_account_state();
        let (state, _) = dispatch(
            state,
            WizardEvent::PasswordEdited {
                value: "short1".into(),
            },
        );
        let (next, actions) = dispatch(state, WizardEvent::SubmitAccount);

        assert_eq!(next.step, WizardStep::AccountCreate);
        assert_eq!(
            next.password_error,
            Some(FieldError::PasswordRequirementsNotMet)
        );
        assert!(actions.is_empty());
    }

    #[test]
    fn submit_account_with_short_phone_flags_phone() {
        let state = filled_account_state();
        let (state, _) = dispatch(
            state,
            WizardEvent::PhoneEdited {
                value: "555-1234".into(),
            },
        );
        let (next, _) = dispatch(state, WizardEvent::SubmitAccount);

        assert_eq!(next.phone_error, Some(FieldError::PhoneTooShort));
        assert_eq!(next.step, WizardStep::AccountCreate);
    }

    #[test]
    fn submit_valid_account_enters_verify_and_sends_code() {
        let state = verify_state();
        assert_eq!(state.previous_step, Some(WizardStep::AccountCreate));
        assert_eq!(state.focused_slot, 0);
    }

    #[test]
    fn phone_edit_normalizes_to_digits() {
        let state = account_create_state("new.user@gmail.com");
        let (next, _) = dispatch(
            state,
            WizardEvent::PhoneEdited {
                value: "(555) 123-4567".into(),
            },
        );
        assert_eq!(next.phone_digits, "5551234567");
    }

    #[test]
    fn code_entry_advances_focus_and_ignores_non_digits() {
        let state = verify_state();
        let (state, _) = dispatch(state, WizardEvent::CodeDigitEntered { slot: 0, value: '1' });
        assert_eq!(state.code_slots[0], Some('1'));
        assert_eq!(state.focused_slot, 1);

        let before = state.clone();
        let (state, _) = dispatch(state, WizardEvent::CodeDigitEntered { slot: 1, value: 'x' });
        assert_eq!(state, before, "non-digit input must not change state");

        // Last slot keeps focus in place.
        let state = enter_code(state, "123456");
        assert_eq!(state.focused_slot, CODE_LEN - 1);
    }

    #[test]
    fn erase_clears_filled_slot_and_retreats_on_empty() {
        let state = verify_state();
        let (state, _) = dispatch(state, WizardEvent::CodeDigitEntered { slot: 0, value: '7' });
        let (state, _) = dispatch(state, WizardEvent::CodeDigitEntered { slot: 1, value: '8' });

        // Entering two digits moved focus to slot 2.
        assert_eq!(state.focused_slot, 2);

        // Erase a filled slot: value goes, focus lands on the cleared slot.
        let (state, _) = dispatch(state, WizardEvent::CodeDigitErased { slot: 1 });
        assert_eq!(state.code_slots[1], None);
        assert_eq!(state.focused_slot, 1);

        // Erase the now-empty slot: focus moves back.
        let (state, _) = dispatch(state, WizardEvent::CodeDigitErased { slot: 1 });
        assert_eq!(state.focused_slot, 0);

        // First erase clears slot 0; a second on the empty slot cannot retreat further.
        let (state, _) = dispatch(state, WizardEvent::CodeDigitErased { slot: 0 });
        let (state, _) = dispatch(state, WizardEvent::CodeDigitErased { slot: 0 });
        assert_eq!(state.focused_slot, 0);
    }

    #[test]
    fn submit_verification_requires_full_code() {
        let state = verify_state();
        let (state, actions) = dispatch(state, WizardEvent::SubmitVerification);
        assert!(actions.is_empty());
        assert!(!state.is_verifying);

        let state = enter_code(state, "123456");
        let (state, actions) = dispatch(state, WizardEvent::SubmitVerification);
        assert!(state.is_verifying);
        assert!(matches!(
            actions.as_slice(),
            [WizardAction::VerifyCodeAndCreateAccount { code, .. }] if code == "123456"
        ));
    }

    #[test]
    fn submit_verification_is_disabled_while_in_flight() {
        let state = enter_code(verify_state(), "123456");
        let (state, _) = dispatch(state, WizardEvent::SubmitVerification);
        let (state, actions) = dispatch(state, WizardEvent::SubmitVerification);
        assert!(actions.is_empty());
        assert!(state.is_verifying);
    }

    #[test]
    fn failed_verification_sets_flag_and_stays_on_verify() {
        let state = enter_code(verify_state(), "111111");
        let (state, _) = dispatch(state, WizardEvent::SubmitVerification);
        let (next, actions) = dispatch(state, WizardEvent::VerificationResolved { ok: false });

        assert_eq!(next.step, WizardStep::Verify);
        assert!(next.verification_failed);
        assert!(!next.is_verifying);
        assert!(actions.is_empty());
    }

    #[test]
    fn code_edit_clears_verification_failure() {
        let state = enter_code(verify_state(), "111111");
        let (state, _) = dispatch(state, WizardEvent::SubmitVerification);
        let (state, _) = dispatch(state, WizardEvent::VerificationResolved { ok: false });

        let (next, _) = dispatch(state, WizardEvent::CodeDigitEntered { slot: 0, value: '2' });
        assert!(!next.verification_failed);
    }

    #[test]
    fn successful_verification_enters_success_with_countdown() {
        let state = enter_code(verify_state(), "123456");
        let (state, _) = dispatch(state, WizardEvent::SubmitVerification);
        let (next, _) = dispatch(state, WizardEvent::VerificationResolved { ok: true });

        assert_eq!(next.step, WizardStep::Success);
        assert_eq!(next.redirect_countdown_secs, REDIRECT_COUNTDOWN_SECS);
        assert!(!next.redirect_fired);
    }

    #[test]
    fn resend_starts_countdown_and_is_disabled_until_zero() {
        let state = verify_state();
        let (state, actions) = dispatch(state, WizardEvent::ResendRequested);
        assert_eq!(state.resend_countdown_secs, RESEND_COUNTDOWN_SECS);
        assert_eq!(actions.len(), 1);

        // Disabled while the countdown runs.
        let (mut state, actions) = dispatch(state, WizardEvent::ResendRequested);
        assert!(actions.is_empty());

        for _ in 0..RESEND_COUNTDOWN_SECS {
            let (next, _) = dispatch(state, WizardEvent::Tick);
            state = next;
        }
        assert!(state.can_resend_code());

        let (_, actions) = dispatch(state, WizardEvent::ResendRequested);
        assert!(matches!(
            actions.as_slice(),
            [WizardAction::SendVerificationCode { .. }]
        ));
    }

    #[test]
    fn redirect_fires_exactly_once_after_countdown() {
        let state = enter_code(verify_state(), "123456");
        let (state, _) = dispatch(state, WizardEvent::SubmitVerification);
        let (mut state, _) = dispatch(state, WizardEvent::VerificationResolved { ok: true });

        let mut redirects = 0;
        for _ in 0..REDIRECT_COUNTDOWN_SECS + 3 {
            let (next, actions) = dispatch(state, WizardEvent::Tick);
            redirects += actions
                .iter()
                .filter(|a| matches!(a, WizardAction::RedirectHome))
                .count();
            state = next;
        }

        assert_eq!(redirects, 1);
        assert!(state.redirect_fired);
        assert_eq!(state.redirect_countdown_secs, 0);
    }

    #[test]
    fn back_from_sign_in_returns_to_email_entry() {
        let state = state_with_email("fvdsgn@gmail.com");
        let (state, _) = dispatch(state, WizardEvent::ContinueEmail);
        let (state, _) = dispatch(state, WizardEvent::AccountLookupResolved { known: true });

        let (next, _) = dispatch(state, WizardEvent::Back);
        assert_eq!(next.step, WizardStep::EmailEntry);
    }

    #[test]
    fn back_from_account_create_uses_recorded_predecessor() {
        let state = account_create_state("new.user@gmail.com");
        let (next, _) = dispatch(state, WizardEvent::Back);
        assert_eq!(next.step, WizardStep::EmailEntry);
    }

    #[test]
    fn back_from_verify_returns_to_account_create_and_clears_code() {
        let state = enter_code(verify_state(), "123");
        let (next, _) = dispatch(state, WizardEvent::Back);

        assert_eq!(next.step, WizardStep::AccountCreate);
        assert_eq!(next.code_slots, [None; CODE_LEN]);

        // A second Back from the restored form still lands on email entry.
        let (next, _) = dispatch(next, WizardEvent::Back);
        assert_eq!(next.step, WizardStep::EmailEntry);
    }

    #[test]
    fn sign_in_submit_round_trip() {
        let state = state_with_email("fvdsgn@gmail.com");
        let (state, _) = dispatch(state, WizardEvent::ContinueEmail);
        let (state, _) = dispatch(state, WizardEvent::AccountLookupResolved { known: true });

        let (state, actions) = dispatch(
            state,
            WizardEvent::SubmitSignIn {
                password: "Longenough1".into(),
            },
        );
        assert!(state.is_signing_in);
        assert!(matches!(
            actions.as_slice(),
            [WizardAction::PerformSignIn { email, .. }] if email == "fvdsgn@gmail.com"
        ));

        let (rejected, _) = dispatch(state.clone(), WizardEvent::SignInResolved { ok: false });
        assert_eq!(rejected.step, WizardStep::SignIn);
        assert_eq!(rejected.sign_in_error, Some(FieldError::SignInRejected));

        let (accepted, _) = dispatch(state, WizardEvent::SignInResolved { ok: true });
        assert_eq!(accepted.step, WizardStep::Success);
    }

    #[test]
    fn events_for_other_steps_are_ignored() {
        let state = WizardState::default();
        let (next, actions) = dispatch(state.clone(), WizardEvent::SubmitVerification);
        assert_eq!(next, state);
        assert!(actions.is_empty());

        let (next, actions) = dispatch(state.clone(), WizardEvent::SubmitAccount);
        assert_eq!(next, state);
        assert!(actions.is_empty());
    }
}
