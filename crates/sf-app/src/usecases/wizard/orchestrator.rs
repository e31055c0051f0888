//! Wizard orchestrator.
//!
//! Coordinates the pure wizard state machine and the side effects its
//! actions demand: backend calls, state-changed emission, navigation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, info_span, Instrument};

use sf_core::ports::{AccountBackendPort, NavigationPort, TickSinkPort, WizardEventPort};
use sf_core::wizard::{WizardAction, WizardEvent, WizardState, WizardStateMachine};

use crate::usecases::wizard::context::WizardContext;

/// Errors produced by the wizard orchestrator.
///
/// User-input problems never surface here; they are values on the state.
/// These are infrastructure failures from the ports.
#[derive(Debug, thiserror::Error)]
pub enum WizardOrchestratorError {
    #[error("account backend call failed: {0}")]
    Backend(#[source] anyhow::Error),
    #[error("navigation failed: {0}")]
    Navigation(#[source] anyhow::Error),
}

/// Orchestrator that drives wizard state and side effects.
///
/// All mutation goes through `dispatch`, which serializes concurrent calls,
/// so the state has exactly one writer.
pub struct WizardOrchestrator {
    context: Arc<WizardContext>,
    backend: Arc<dyn AccountBackendPort>,
    event_port: Arc<dyn WizardEventPort>,
    navigation: Arc<dyn NavigationPort>,
    redirect_url: String,
}

impl WizardOrchestrator {
    pub fn new(
        backend: Arc<dyn AccountBackendPort>,
        event_port: Arc<dyn WizardEventPort>,
        navigation: Arc<dyn NavigationPort>,
        redirect_url: impl Into<String>,
    ) -> Self {
        Self {
            context: WizardContext::default().arc(),
            backend,
            event_port,
            navigation,
            redirect_url: redirect_url.into(),
        }
    }

    pub async fn get_state(&self) -> WizardState {
        self.context.get_state().await
    }

    // -- Event wrappers ----------------------------------------------------

    pub async fn set_email(&self, value: String) -> Result<WizardState, WizardOrchestratorError> {
        self.dispatch(WizardEvent::EmailEdited { value }).await
    }

    pub async fn continue_with_email(&self) -> Result<WizardState, WizardOrchestratorError> {
        self.dispatch(WizardEvent::ContinueEmail).await
    }

    pub async fn set_first_name(
        &self,
        value: String,
    ) -> Result<WizardState, WizardOrchestratorError> {
        self.dispatch(WizardEvent::FirstNameEdited { value }).await
    }

    pub async fn set_last_name(
        &self,
        value: String,
    ) -> Result<WizardState, WizardOrchestratorError> {
        self.dispatch(WizardEvent::LastNameEdited { value }).await
    }

    pub async fn set_phone(&self, value: String) -> Result<WizardState, WizardOrchestratorError> {
        self.dispatch(WizardEvent::PhoneEdited { value }).await
    }

    pub async fn set_password(
        &self,
        value: String,
    ) -> Result<WizardState, WizardOrchestratorError> {
        self.dispatch(WizardEvent::PasswordEdited { value }).await
    }

    pub async fn submit_account(&self) -> Result<WizardState, WizardOrchestratorError> {
        self.dispatch(WizardEvent::SubmitAccount).await
    }

    pub async fn submit_sign_in(
        &self,
        password: String,
    ) -> Result<WizardState, WizardOrchestratorError> {
        self.dispatch(WizardEvent::SubmitSignIn { password }).await
    }

    pub async fn enter_code_digit(
        &self,
        slot: usize,
        value: char,
    ) -> Result<WizardState, WizardOrchestratorError> {
        self.dispatch(WizardEvent::CodeDigitEntered { slot, value })
            .await
    }

    pub async fn erase_code_digit(
        &self,
        slot: usize,
    ) -> Result<WizardState, WizardOrchestratorError> {
        self.dispatch(WizardEvent::CodeDigitErased { slot }).await
    }

    pub async fn verify(&self) -> Result<WizardState, WizardOrchestratorError> {
        self.dispatch(WizardEvent::SubmitVerification).await
    }

    pub async fn resend_code(&self) -> Result<WizardState, WizardOrchestratorError> {
        self.dispatch(WizardEvent::ResendRequested).await
    }

    pub async fn back(&self) -> Result<WizardState, WizardOrchestratorError> {
        self.dispatch(WizardEvent::Back).await
    }

    // -- Dispatch loop -----------------------------------------------------

    async fn dispatch(
        &self,
        event: WizardEvent,
    ) -> Result<WizardState, WizardOrchestratorError> {
        // Serialize concurrent dispatch calls so no two transitions read the
        // same state or execute duplicate actions.
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;

        let span = info_span!("usecase.wizard_orchestrator.dispatch", event = ?event);
        async {
            let mut current = self.context.get_state().await;
            let mut pending_events = vec![event];

            while let Some(event) = pending_events.pop() {
                let event_name = format!("{event:?}");
                let (next, actions) = WizardStateMachine::transition(current.clone(), event);
                info!(step = ?next.step, event = %event_name, "wizard state transition");

                // Commit and emit before executing actions so transient
                // busy flags (checking, verifying, signing in) are
                // observable while the backend call is in flight.
                self.context.set_state(next.clone()).await;
                self.event_port.emit_wizard_state_changed(next.clone()).await;

                match self.execute_actions(actions).await {
                    Ok(follow_up_events) => {
                        current = next;
                        pending_events.extend(follow_up_events);
                    }
                    Err(err) => {
                        // A failed action must not leave a busy flag stuck:
                        // restore the pre-transition state and re-emit it.
                        self.context.set_state(current.clone()).await;
                        self.event_port.emit_wizard_state_changed(current).await;
                        return Err(err);
                    }
                }
            }

            Ok(current)
        }
        .instrument(span)
        .await
    }

    async fn execute_actions(
        &self,
        actions: Vec<WizardAction>,
    ) -> Result<Vec<WizardEvent>, WizardOrchestratorError> {
        let mut follow_up_events = Vec::new();
        for action in actions {
            debug!(?action, "wizard executing action");
            match action {
                WizardAction::CheckKnownAccount { email } => {
                    let known = self
                        .backend
                        .is_known_account(&email)
                        .await
                        .map_err(|err| {
                            error!(error = %err, "account lookup failed");
                            WizardOrchestratorError::Backend(err)
                        })?;
                    follow_up_events.push(WizardEvent::AccountLookupResolved { known });
                }
                WizardAction::SendVerificationCode { email } => {
                    self.backend.send_code(&email).await.map_err(|err| {
                        error!(error = %err, "sending verification code failed");
                        WizardOrchestratorError::Backend(err)
                    })?;
                    debug!("wizard action SendVerificationCode completed");
                }
                WizardAction::VerifyCodeAndCreateAccount { code, account } => {
                    let ok = self
                        .backend
                        .verify_code(&account.email, &code)
                        .await
                        .map_err(|err| {
                            error!(error = %err, "code verification failed");
                            WizardOrchestratorError::Backend(err)
                        })?;
                    if ok {
                        self.backend.create_account(&account).await.map_err(|err| {
                            error!(error = %err, "account creation failed");
                            WizardOrchestratorError::Backend(err)
                        })?;
                        debug!("wizard action VerifyCodeAndCreateAccount created account");
                    }
                    follow_up_events.push(WizardEvent::VerificationResolved { ok });
                }
                WizardAction::PerformSignIn { email, password } => {
                    let ok = self
                        .backend
                        .sign_in(&email, &password)
                        .await
                        .map_err(|err| {
                            error!(error = %err, "sign-in failed");
                            WizardOrchestratorError::Backend(err)
                        })?;
                    follow_up_events.push(WizardEvent::SignInResolved { ok });
                }
                WizardAction::RedirectHome => {
                    self.navigation
                        .redirect(&self.redirect_url)
                        .await
                        .map_err(|err| {
                            error!(error = %err, url = %self.redirect_url, "redirect failed");
                            WizardOrchestratorError::Navigation(err)
                        })?;
                    debug!(url = %self.redirect_url, "wizard action RedirectHome completed");
                }
            }
        }

        Ok(follow_up_events)
    }
}

#[async_trait]
impl TickSinkPort for WizardOrchestrator {
    async fn tick(&self) -> anyhow::Result<()> {
        self.dispatch(WizardEvent::Tick).await?;
        Ok(())
    }
}
