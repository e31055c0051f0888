//! Stubbed account backend.
//!
//! Stands in for a real auth service: one hard-coded known account, one
//! accepted verification code, and an artificial latency on code checks so
//! the wizard's busy states are visible.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration};
use tracing::{debug, info};

use sf_core::ports::{AccountBackendPort, NewAccount};
use sf_core::SecretString;

/// The one email the stub treats as an existing account.
pub const DEFAULT_KNOWN_EMAIL: &str = "fvdsgn@gmail.com";

/// The one code the stub accepts.
pub const DEFAULT_VERIFICATION_CODE: &str = "123456";

const DEFAULT_VERIFY_DELAY: Duration = Duration::from_millis(1500);

pub struct StubAccountBackend {
    known_email: String,
    verification_code: String,
    verify_delay: Duration,
    created: Mutex<Vec<String>>,
}

impl StubAccountBackend {
    pub fn new() -> Self {
        Self {
            known_email: DEFAULT_KNOWN_EMAIL.to_string(),
            verification_code: DEFAULT_VERIFICATION_CODE.to_string(),
            verify_delay: DEFAULT_VERIFY_DELAY,
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn with_known_email(mut self, email: impl Into<String>) -> Self {
        self.known_email = email.into();
        self
    }

    pub fn with_verify_delay(mut self, delay: Duration) -> Self {
        self.verify_delay = delay;
        self
    }
}

impl Default for StubAccountBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountBackendPort for StubAccountBackend {
    async fn is_known_account(&self, email: &str) -> anyhow::Result<bool> {
        let known = email.eq_ignore_ascii_case(&self.known_email)
            || self
                .created
                .lock()
                .await
                .iter()
                .any(|e| e.eq_ignore_ascii_case(email));
        debug!(email, known, "account lookup");
        Ok(known)
    }

    async fn send_code(&self, email: &str) -> anyhow::Result<()> {
        info!(email, "verification code sent");
        Ok(())
    }

    async fn verify_code(&self, email: &str, code: &str) -> anyhow::Result<bool> {
        sleep(self.verify_delay).await;
        let ok = code == self.verification_code;
        debug!(email, ok, "verification code checked");
        Ok(ok)
    }

    async fn create_account(&self, account: &NewAccount) -> anyhow::Result<()> {
        self.created.lock().await.push(account.email.clone());
        info!(email = %account.email, "account created");
        Ok(())
    }

    async fn sign_in(&self, email: &str, password: &SecretString) -> anyhow::Result<bool> {
        sleep(self.verify_delay).await;
        // Any non-empty password works against the known account.
        let ok = email.eq_ignore_ascii_case(&self.known_email) && !password.expose().is_empty();
        debug!(email, ok, "sign-in attempted");
        Ok(ok)
    }
}
