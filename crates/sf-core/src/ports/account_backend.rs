//! Account backend port.
//!
//! In this scope the implementation is a stub with literal constants and a
//! fixed delay; production would back it with real auth service calls.

use async_trait::async_trait;

use crate::security::SecretString;

/// Everything needed to create an account after a verified code.
#[derive(Debug, PartialEq)]
pub struct NewAccount {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_digits: String,
    pub password: SecretString,
}

#[async_trait]
pub trait AccountBackendPort: Send + Sync {
    /// Whether this email already belongs to an account.
    async fn is_known_account(&self, email: &str) -> anyhow::Result<bool>;

    /// Send a one-time verification code to the address.
    async fn send_code(&self, email: &str) -> anyhow::Result<()>;

    /// Check an entered one-time code. `Ok(false)` is a mismatch, `Err` a
    /// backend failure.
    async fn verify_code(&self, email: &str, code: &str) -> anyhow::Result<bool>;

    /// Create the account. Only called after a successful code check.
    async fn create_account(&self, account: &NewAccount) -> anyhow::Result<()>;

    /// Password sign-in for a known account.
    async fn sign_in(&self, email: &str, password: &SecretString) -> anyhow::Result<bool>;
}
