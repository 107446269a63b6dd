//! Storedash core: pure resource model and snapshot transitions.
mod action;
mod snapshot;
mod store;
mod view;

pub use action::Action;
pub use snapshot::Snapshot;
pub use store::{
    normalize_store_name, store_from_reply, stores_from_listing, CreateStoreReply, Store,
};
pub use view::DashView;
