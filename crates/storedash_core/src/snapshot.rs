use crate::{DashView, Store};

/// Authoritative local copy of the remote resource set plus the outcome
/// message of the most recently completed operation.
///
/// The remote service is the source of truth: rows stay in the order it
/// returned them, and a reconciliation always replaces the whole set. A
/// store absent from the newest listing is gone.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Snapshot {
    stores: Vec<Store>,
    message: String,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the rows wholesale. Fresh data also clears the message slot
    /// so a stale error never outlives the data that contradicts it.
    pub fn apply_listing(&mut self, stores: Vec<Store>) {
        self.stores = stores;
        self.message.clear();
    }

    /// Records a failed reconciliation: the rows empty because none of them
    /// could be confirmed, and the message names the failure.
    pub fn apply_load_failure(&mut self, message: String) {
        self.stores.clear();
        self.message = message;
    }

    /// Overwrites the message slot, leaving the rows alone. Mutation
    /// outcomes land here after their follow-up reconciliation.
    pub fn set_message(&mut self, message: String) {
        self.message = message;
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Clones what a presentation host needs. `busy` comes from the caller,
    /// which owns the in-flight accounting.
    pub fn view(&self, busy: bool) -> DashView {
        DashView {
            stores: self.stores.clone(),
            message: self.message.clone(),
            busy,
        }
    }
}
