pub mod auth;
pub mod navigation;
pub mod time;

pub use auth::StubAccountBackend;
pub use navigation::LoggingNavigator;
pub use time::WizardTicker;
