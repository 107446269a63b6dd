use crate::Store;

/// What a presentation host receives: read-only rows in remote order, the
/// last status message, and whether a load or create is still outstanding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashView {
    pub stores: Vec<Store>,
    pub message: String,
    pub busy: bool,
}
