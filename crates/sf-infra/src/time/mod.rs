mod ticker;

pub use ticker::WizardTicker;
