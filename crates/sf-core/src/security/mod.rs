//! Security primitives shared across the wizard.

mod secret;

pub use secret::SecretString;
