use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use dash_logging::{dash_debug, dash_warn};
use reqwest::Method;
use serde_json::json;
use storedash_core::{
    normalize_store_name, store_from_reply, stores_from_listing, Action, CreateStoreReply,
    DashView, Snapshot, Store,
};
use tokio::sync::watch;

use crate::confirm::{AutoConfirm, Confirmer};
use crate::transport::{Transport, TransportError};

/// The synchronization engine: a cloneable handle over the shared snapshot
/// of remote stores and the operations that change the remote set.
///
/// Every mutating operation ends by re-fetching the listing; the engine
/// never assumes it knows the post-mutation state. Operations do not return
/// errors. The snapshot's message slot is the outcome channel a
/// presentation host renders.
#[derive(Clone)]
pub struct Dashboard {
    inner: Arc<Inner>,
}

struct Inner {
    transport: Transport,
    confirmer: Arc<dyn Confirmer>,
    state: Mutex<SyncState>,
    /// Loads and creates currently in flight; the view's busy flag.
    busy: AtomicUsize,
    /// Ticket counter for reconciliations, taken at issue time.
    list_seq: AtomicU64,
    view_tx: watch::Sender<DashView>,
}

#[derive(Default)]
struct SyncState {
    snapshot: Snapshot,
    /// Highest reconciliation ticket whose result has been applied.
    applied_seq: u64,
}

impl Dashboard {
    /// A dashboard whose delete gate approves everything. Interactive hosts
    /// want [`Dashboard::with_confirmer`].
    pub fn new(transport: Transport) -> Self {
        Self::with_confirmer(transport, Arc::new(AutoConfirm))
    }

    pub fn with_confirmer(transport: Transport, confirmer: Arc<dyn Confirmer>) -> Self {
        let (view_tx, _) = watch::channel(DashView::default());
        Self {
            inner: Arc::new(Inner {
                transport,
                confirmer,
                state: Mutex::new(SyncState::default()),
                busy: AtomicUsize::new(0),
                list_seq: AtomicU64::new(0),
                view_tx,
            }),
        }
    }

    /// Reconciliation: replaces the snapshot wholesale with the service's
    /// current resource set. Failure empties the rows and reports
    /// `Load failed: ...`; a response that lost the race to a later-issued
    /// one is discarded.
    pub async fn list(&self) {
        let _busy = self.inner.begin_busy();
        self.reconcile().await;
    }

    /// Provisions a new store. A whitespace-only name is dropped without a
    /// request. The service reply drives the outcome message, and one
    /// reconciliation runs before that message is written, so the outcome
    /// survives its own resync.
    pub async fn create(&self, name: &str) {
        let Some(name) = normalize_store_name(name) else {
            return;
        };
        let _busy = self.inner.begin_busy();
        let body = json!({ "name": name });
        let result = self
            .inner
            .transport
            .request(Method::POST, "/stores", Some(&body))
            .await;
        match result {
            Ok(reply) => {
                let reply = CreateStoreReply::from_reply(reply);
                self.list().await;
                self.inner.set_message(reply.message());
            }
            Err(err) => {
                dash_warn!("create {name:?} failed: {err}");
                self.inner.set_message(Action::Create.failure(err));
            }
        }
    }

    /// Asks the service to re-check a store's status, then reconciles. A
    /// successful refresh reports no outcome of its own; the refreshed
    /// listing is the outcome.
    pub async fn refresh(&self, id: &str) {
        let result = self
            .inner
            .transport
            .request(Method::POST, &format!("/stores/{id}/refresh"), None)
            .await;
        match result {
            Ok(_) => self.list().await,
            Err(err) => {
                dash_warn!("refresh {id} failed: {err}");
                self.inner.set_message(Action::Refresh.failure(err));
            }
        }
    }

    /// Deletes a store once the injected gate approves; a declined gate
    /// means zero requests. Success reconciles, then records
    /// `Deleted: <id>`.
    pub async fn delete(&self, id: &str) {
        if !self.inner.confirmer.confirm(&format!("Delete {id}?")).await {
            dash_debug!("delete {id} declined");
            return;
        }
        let result = self
            .inner
            .transport
            .request(Method::DELETE, &format!("/stores/{id}"), None)
            .await;
        match result {
            Ok(_) => {
                self.list().await;
                self.inner.set_message(format!("Deleted: {id}"));
            }
            Err(err) => {
                dash_warn!("delete {id} failed: {err}");
                self.inner.set_message(Action::Delete.failure(err));
            }
        }
    }

    /// Reads one store row without touching the snapshot. A query for
    /// hosts, not an operation, so failures come back to the caller.
    pub async fn fetch_store(&self, id: &str) -> Result<Store, TransportError> {
        let reply = self
            .inner
            .transport
            .request(Method::GET, &format!("/stores/{id}"), None)
            .await?;
        Ok(store_from_reply(reply))
    }

    /// Rows, message, and busy flag as of now.
    pub fn view(&self) -> DashView {
        self.inner.current_view()
    }

    /// Change feed for hosts that re-render; the receiver always holds the
    /// latest published view.
    pub fn subscribe(&self) -> watch::Receiver<DashView> {
        self.inner.view_tx.subscribe()
    }

    async fn reconcile(&self) {
        let inner = &*self.inner;
        // Tickets only need to be monotonic; the stale-or-not comparison
        // happens under the state lock.
        let ticket = inner.list_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let result = inner.transport.request(Method::GET, "/stores", None).await;

        {
            let mut state = inner.lock_state();
            if ticket <= state.applied_seq {
                dash_debug!("listing {ticket} superseded before completion, discarded");
                return;
            }
            state.applied_seq = ticket;
            match result {
                Ok(listing) => {
                    let stores = stores_from_listing(listing);
                    dash_debug!("listing {ticket} reconciled {} stores", stores.len());
                    state.snapshot.apply_listing(stores);
                }
                Err(err) => {
                    dash_warn!("load failed: {err}");
                    state.snapshot.apply_load_failure(Action::Load.failure(err));
                }
            }
        }
        inner.publish();
    }
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, SyncState> {
        // Never held across an await.
        self.state.lock().expect("lock sync state")
    }

    fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst) > 0
    }

    fn current_view(&self) -> DashView {
        self.lock_state().snapshot.view(self.is_busy())
    }

    fn publish(&self) {
        let view = self.current_view();
        self.view_tx.send_replace(view);
    }

    fn set_message(&self, message: String) {
        self.lock_state().snapshot.set_message(message);
        self.publish();
    }

    fn begin_busy(&self) -> BusyGuard<'_> {
        self.busy.fetch_add(1, Ordering::SeqCst);
        self.publish();
        BusyGuard { inner: self }
    }
}

struct BusyGuard<'a> {
    inner: &'a Inner,
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.inner.busy.fetch_sub(1, Ordering::SeqCst);
        self.inner.publish();
    }
}
