//! Port interfaces for the application layer.
//!
//! Ports define the contract between the wizard logic and infrastructure
//! implementations, so the stubbed collaborators (account backend,
//! navigation) can be swapped for real asynchronous ones without changing
//! the state-machine shape.

pub mod account_backend;
pub mod events;
pub mod navigation;
pub mod ticks;

pub use account_backend::{AccountBackendPort, NewAccount};
pub use events::WizardEventPort;
pub use navigation::NavigationPort;
pub use ticks::TickSinkPort;
