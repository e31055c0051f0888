//! Email domain suggestion engine.
//!
//! Stateless "did you mean" typo correction and prefix autocomplete over a
//! fixed set of known email providers. Pure functions of their inputs; the
//! wizard treats the results as advisory only.

mod domains;
mod engine;

pub use domains::KNOWN_DOMAINS;
pub use engine::{autocomplete_addresses, suggest_corrected_domain};
