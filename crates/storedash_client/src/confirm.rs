/// Decides whether a destructive operation may proceed.
///
/// The dashboard never talks to a user directly; hosts inject whatever
/// prompt fits them (a terminal question, a dialog) or none at all.
#[async_trait::async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, prompt: &str) -> bool;
}

/// Approves everything. The default for non-interactive hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct AutoConfirm;

#[async_trait::async_trait]
impl Confirmer for AutoConfirm {
    async fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}
