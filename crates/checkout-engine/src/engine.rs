//! # Cart Engine
//!
//! [`CartEngine`] owns a single checkout session. It is generic over the
//! catalog source and the storage backend so tests can run entirely in
//! memory.
//!
//! ## Loading Flag
//! `initialize()` flips a `watch` channel to `true` before the fetch and back
//! to `false` once it settles, success or not. Front ends subscribe with
//! [`CartEngine::subscribe_loading`] to render a spinner.
//!
//! ## Persistence
//! Only [`CartEngine::save_cart`] writes and only [`CartEngine::initialize`]
//! reads. [`CartEngine::clear_cart`] leaves the saved snapshot alone; use
//! [`CartEngine::forget_saved_cart`] to drop it.

use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

use checkout_core::validation::validate_catalog;
use checkout_core::{
    CartLine, CartState, CouponOutcome, CouponState, Money, PriceBreakdown, Product, SortDirection,
    SortField,
};
use checkout_store::{snapshot, KeyValueStore, StoreError, CART_STORAGE_KEY, STORAGE_QUOTA_BYTES};

use crate::error::{CatalogError, EngineResult};
use crate::loader::CatalogLoader;

/// What `initialize()` found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InitReport {
    /// Products in the freshly loaded catalog.
    pub product_count: usize,
    /// Saved lines that matched a catalog product.
    pub restored_lines: usize,
    /// A snapshot existed but could not be parsed.
    pub ignored_malformed_snapshot: bool,
}

/// One checkout session.
pub struct CartEngine<L, S> {
    loader: L,
    store: S,
    state: CartState,
    quota_bytes: usize,
    loading: watch::Sender<bool>,
    last_error: Option<CatalogError>,
    session_id: Uuid,
}

impl<L, S> CartEngine<L, S>
where
    L: CatalogLoader,
    S: KeyValueStore,
{
    /// Creates an engine with no products. Call [`initialize`](Self::initialize)
    /// to fetch the catalog.
    pub fn new(loader: L, store: S) -> Self {
        let (loading, _) = watch::channel(false);
        CartEngine {
            loader,
            store,
            state: CartState::new(),
            quota_bytes: STORAGE_QUOTA_BYTES,
            loading,
            last_error: None,
            session_id: Uuid::new_v4(),
        }
    }

    /// Overrides the snapshot size ceiling.
    pub fn with_quota(mut self, quota_bytes: usize) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Starts a new session: fetches the catalog and restores any saved cart.
    ///
    /// Search, sort and coupon go back to their defaults. On failure the
    /// product list is empty, the error is kept in
    /// [`last_error`](Self::last_error) and also returned.
    pub async fn initialize(&mut self) -> EngineResult<InitReport> {
        info!(session_id = %self.session_id, "Initializing checkout session");

        self.state = CartState::new();
        self.last_error = None;

        self.loading.send_replace(true);
        let fetched = self.loader.fetch_catalog().await;
        self.loading.send_replace(false);

        let products = match fetched.and_then(|products| {
            validate_catalog(&products)?;
            Ok(products)
        }) {
            Ok(products) => products,
            Err(err) => {
                warn!(session_id = %self.session_id, error = %err, "Catalog unavailable");
                self.last_error = Some(err.clone());
                return Err(err.into());
            }
        };

        let product_count = products.len();
        self.state.load_products(products);

        let (restored_lines, ignored_malformed_snapshot) = self.restore_saved_cart();

        info!(
            session_id = %self.session_id,
            products = product_count,
            restored = restored_lines,
            "Checkout session ready"
        );

        Ok(InitReport {
            product_count,
            restored_lines,
            ignored_malformed_snapshot,
        })
    }

    /// Returns `(restored line count, malformed snapshot ignored)`.
    fn restore_saved_cart(&mut self) -> (usize, bool) {
        let raw = match self.store.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("No saved cart");
                return (0, false);
            }
            Err(err) => {
                warn!(error = %err, "Could not read saved cart, starting empty");
                return (0, false);
            }
        };

        match snapshot::decode(&raw) {
            Ok(lines) => (snapshot::restore(&mut self.state, &lines), false),
            Err(err) => {
                warn!(error = %err, "Ignoring malformed saved cart");
                (0, true)
            }
        }
    }

    // =========================================================================
    // Quantity
    // =========================================================================

    /// Sets a product's quantity, clamped to `[0, available_count]`.
    ///
    /// Unknown ids are ignored and yield `None`.
    pub fn set_quantity(&mut self, product_id: i64, requested: i64) -> Option<u32> {
        let stored = self.state.set_quantity(product_id, requested);
        match stored {
            Some(quantity) => debug!(product_id, requested, quantity, "Quantity set"),
            None => debug!(product_id, "Ignoring quantity change for unknown product"),
        }
        stored
    }

    pub fn increment_quantity(&mut self, product_id: i64) -> Option<u32> {
        let current = self.state.quantity(product_id)?;
        self.set_quantity(product_id, i64::from(current) + 1)
    }

    pub fn decrement_quantity(&mut self, product_id: i64) -> Option<u32> {
        let current = self.state.quantity(product_id)?;
        self.set_quantity(product_id, i64::from(current) - 1)
    }

    /// Zeroes every quantity. The saved snapshot is not touched.
    pub fn clear_cart(&mut self) {
        self.state.clear();
        debug!(session_id = %self.session_id, "Cart cleared");
    }

    // =========================================================================
    // View Settings
    // =========================================================================

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.state.set_search_query(query);
    }

    pub fn set_sort_field(&mut self, field: SortField) {
        self.state.set_sort_field(field);
    }

    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.state.set_sort_direction(direction);
    }

    // =========================================================================
    // Coupon
    // =========================================================================

    pub fn apply_coupon(&mut self, code: &str) -> CouponOutcome {
        let outcome = self.state.apply_coupon(code);
        info!(session_id = %self.session_id, %outcome, "Coupon entered");
        outcome
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Writes the full cart to storage and returns the snapshot size in bytes.
    ///
    /// A snapshot at or above the quota is refused and the previous one stays
    /// in place.
    pub fn save_cart(&mut self) -> EngineResult<usize> {
        let json = match snapshot::encode(self.state.lines(), self.quota_bytes) {
            Ok(json) => json,
            Err(err @ StoreError::QuotaExceeded { .. }) => {
                warn!(error = %err, "Cart not saved");
                return Err(err.into());
            }
            Err(err) => return Err(err.into()),
        };

        self.store.set(CART_STORAGE_KEY, &json)?;
        info!(session_id = %self.session_id, bytes = json.len(), "Cart saved");
        Ok(json.len())
    }

    /// Removes the saved snapshot, if any.
    pub fn forget_saved_cart(&mut self) -> EngineResult<()> {
        self.store.remove(CART_STORAGE_KEY)?;
        info!(session_id = %self.session_id, "Saved cart removed");
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.state.lines().iter().map(CartLine::product)
    }

    pub fn lines(&self) -> &[CartLine] {
        self.state.lines()
    }

    pub fn quantity(&self, product_id: i64) -> Option<u32> {
        self.state.quantity(product_id)
    }

    /// Lines matching the search query, in the current sort order.
    pub fn visible_products(&self) -> Vec<&CartLine> {
        self.state.visible_lines()
    }

    pub fn subtotal(&self) -> Money {
        self.state.subtotal()
    }

    pub fn discount_percent(&self) -> u32 {
        self.state.discount_percent()
    }

    pub fn additional_discount_percent(&self) -> u32 {
        self.state.additional_discount_percent()
    }

    pub fn total(&self) -> Money {
        self.state.total()
    }

    pub fn breakdown(&self) -> PriceBreakdown {
        self.state.breakdown()
    }

    pub fn coupon_state(&self) -> CouponState {
        self.state.coupon()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    /// Error from the most recent failed `initialize()`, cleared on the next
    /// attempt.
    pub fn last_error(&self) -> Option<&CatalogError> {
        self.last_error.as_ref()
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Consumes the engine and hands back its storage backend.
    pub fn into_store(self) -> S {
        self.store
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
