//! Storedash client: HTTP transport, dashboard operations, and polling.
mod confirm;
mod dashboard;
mod poller;
mod transport;

pub use confirm::{AutoConfirm, Confirmer};
pub use dashboard::Dashboard;
pub use poller::{Poller, DEFAULT_POLL_INTERVAL};
pub use reqwest::Method;
pub use transport::{Transport, TransportConfig, TransportError};
