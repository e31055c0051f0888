use async_trait::async_trait;

use crate::wizard::WizardState;

/// Emits wizard state snapshots to whatever renders them.
#[async_trait]
pub trait WizardEventPort: Send + Sync {
    async fn emit_wizard_state_changed(&self, state: WizardState);
}
