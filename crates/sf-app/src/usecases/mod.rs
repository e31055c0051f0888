//! Use cases.

pub mod wizard;
