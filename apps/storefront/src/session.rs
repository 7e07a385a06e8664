//! # Session
//!
//! The explicit state-and-dispatch context of one shopper visit.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                             Session                                     │
//! │                                                                         │
//! │  ┌───────────────┐  ┌───────────────┐  ┌───────────────┐               │
//! │  │    History    │  │    Catalog    │  │ PricingPolicy │               │
//! │  │ past/present/ │  │  read-only    │  │  tax, free    │               │
//! │  │    future     │  │  products     │  │  shipping     │               │
//! │  └───────▲───────┘  └───────┬───────┘  └───────┬───────┘               │
//! │          │ dispatch(Action) │ resolve ids      │ summaries             │
//! │          └──────────────────┴──────────────────┘                       │
//! │                                                                         │
//! │  Shopper intents (add_to_cart, set_quantity, wishlist, search) are     │
//! │  validated and resolved here, then dispatched as plain actions.        │
//! │  Browsing and account forms read the catalog or check input only.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A session is owned by its caller and mutated through `&mut self`. There
//! is no global store and no locking.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, info_span, Span};
use uuid::Uuid;

use satchel_core::catalog::sort_products;
use satchel_core::validation::{
    otp_from_paste, password_strength, password_strength_label, validate_email,
    validate_new_password, validate_otp, validate_quantity, validate_search_query,
};
use satchel_core::{
    Action, Catalog, History, Money, OrderSummary, PricingPolicy, Product, ProductFilter,
    ShippingMethod, SortOrder, StoreState, ValidationError, FEATURED_PRODUCT_COUNT,
    RELATED_PRODUCT_LIMIT,
};

use crate::config::StorefrontConfig;
use crate::error::AppResult;

// =============================================================================
// Session
// =============================================================================

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    history: History,
    catalog: Catalog,
    pricing: PricingPolicy,
    span: Span,
}

impl Session {
    /// Starts a session with an empty cart and wishlist.
    pub fn new(catalog: Catalog, pricing: PricingPolicy, history_limit: usize) -> Self {
        let id = Uuid::new_v4();
        let span = info_span!("session", session_id = %id);

        info!(
            parent: &span,
            products = catalog.products().len(),
            history_limit,
            "Session started"
        );

        Session {
            id,
            started_at: Utc::now(),
            history: History::new(history_limit),
            catalog,
            pricing,
            span,
        }
    }

    /// Starts a session using the pricing and history settings of `config`.
    pub fn from_config(config: &StorefrontConfig, catalog: Catalog) -> Self {
        Self::new(catalog, config.pricing_policy(), config.history_limit())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// The current store state.
    pub fn state(&self) -> &StoreState {
        self.history.present()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    // =========================================================================
    // Dispatch & History
    // =========================================================================

    /// Applies an action to the store.
    pub fn dispatch(&mut self, action: Action) -> &StoreState {
        let _enter = self.span.enter();
        let kind = action.kind();

        let state = self.history.apply(action);
        debug!(
            action = kind,
            cart_lines = state.cart.len(),
            cart_items = state.cart_item_count(),
            wishlist = state.wishlist_count(),
            "Action dispatched"
        );

        state
    }

    /// Steps back one state. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let _enter = self.span.enter();
        let undone = self.history.undo();
        info!(undone, depth = self.history.undo_depth(), "Undo");
        undone
    }

    /// Re-applies one undone state. Returns false when there is nothing to
    /// redo.
    pub fn redo(&mut self) -> bool {
        let _enter = self.span.enter();
        let redone = self.history.redo();
        info!(redone, depth = self.history.undo_depth(), "Redo");
        redone
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Adds a catalog product to the cart.
    ///
    /// ## Errors
    /// - `ProductNotFound` for an unknown id
    /// - `OutOfRange` unless 1 <= quantity <= 999
    /// - `InvalidFormat` for a colour or size the product does not offer
    pub fn add_to_cart(
        &mut self,
        product_id: &str,
        quantity: i64,
        color: Option<String>,
        size: Option<String>,
    ) -> AppResult<&StoreState> {
        validate_quantity(quantity)?;
        let product = self.catalog.require_product(product_id)?;

        if let Some(color) = color.as_deref() {
            if !product.has_color(color) {
                return Err(ValidationError::InvalidFormat {
                    field: "color".to_string(),
                    reason: format!("'{}' is not offered for {}", color, product.name),
                }
                .into());
            }
        }
        if let Some(size) = size.as_deref() {
            if !product.has_size(size) {
                return Err(ValidationError::InvalidFormat {
                    field: "size".to_string(),
                    reason: format!("'{}' is not offered for {}", size, product.name),
                }
                .into());
            }
        }

        let action = Action::add_variant_to_cart(product.clone(), quantity, color, size);
        Ok(self.dispatch(action))
    }

    /// Sets the quantity of a product's cart lines. Zero removes them.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> AppResult<&StoreState> {
        if quantity == 0 {
            return Ok(self.remove_from_cart(product_id));
        }

        validate_quantity(quantity)?;
        Ok(self.dispatch(Action::UpdateCartQuantity {
            product_id: product_id.to_string(),
            quantity,
        }))
    }

    /// Removes every cart line for the product.
    pub fn remove_from_cart(&mut self, product_id: &str) -> &StoreState {
        self.dispatch(Action::RemoveFromCart(product_id.to_string()))
    }

    pub fn clear_cart(&mut self) -> &StoreState {
        self.dispatch(Action::ClearCart)
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    /// Adds the product to the wishlist, or removes it if already saved.
    ///
    /// Returns whether the product is wishlisted afterwards.
    pub fn toggle_wishlist(&mut self, product_id: &str) -> AppResult<bool> {
        if self.state().is_wishlisted(product_id) {
            self.dispatch(Action::RemoveFromWishlist(product_id.to_string()));
            return Ok(false);
        }

        let product = self.catalog.require_product(product_id)?.clone();
        self.dispatch(Action::AddToWishlist(product));
        Ok(true)
    }

    pub fn remove_from_wishlist(&mut self, product_id: &str) -> &StoreState {
        self.dispatch(Action::RemoveFromWishlist(product_id.to_string()))
    }

    /// Adds one unit of a saved product to the cart, no variant selected.
    ///
    /// Uses the wishlist's product snapshot and leaves the wishlist as it
    /// is. Returns false, dispatching nothing, if the product is not saved.
    pub fn move_wishlist_item_to_cart(&mut self, product_id: &str) -> bool {
        let saved = self
            .state()
            .wishlist
            .iter()
            .find(|entry| entry.product.id == product_id)
            .map(|entry| entry.product.clone());

        match saved {
            Some(product) => {
                self.dispatch(Action::add_to_cart(product, 1));
                true
            }
            None => false,
        }
    }

    /// Empties the wishlist one entry at a time, so each removal is its own
    /// undo step. Returns how many entries were removed.
    pub fn clear_wishlist(&mut self) -> usize {
        let ids: Vec<String> = self
            .state()
            .wishlist
            .iter()
            .map(|entry| entry.product.id.clone())
            .collect();

        for id in &ids {
            self.dispatch(Action::RemoveFromWishlist(id.clone()));
        }
        ids.len()
    }

    // =========================================================================
    // Search
    // =========================================================================

    pub fn open_search(&mut self) -> &StoreState {
        self.dispatch(Action::ToggleSearch(Some(true)))
    }

    pub fn close_search(&mut self) -> &StoreState {
        self.dispatch(Action::ToggleSearch(Some(false)))
    }

    pub fn toggle_search(&mut self) -> &StoreState {
        self.dispatch(Action::ToggleSearch(None))
    }

    /// Records the query in the store and returns the matching products.
    ///
    /// The store keeps the text as typed; matching uses the trimmed query.
    pub fn search(&mut self, query: &str) -> AppResult<Vec<&Product>> {
        let trimmed = validate_search_query(query)?;
        self.dispatch(Action::SetSearchQuery(query.to_string()));

        let hits = self.catalog.search(&trimmed);
        debug!(parent: &self.span, query = %trimmed, hits = hits.len(), "Catalog searched");
        Ok(hits)
    }

    // =========================================================================
    // Browsing
    // =========================================================================

    /// The shop grid: optional text search, then sidebar filters, then the
    /// chosen sort. Browsing does not touch the store.
    pub fn browse(
        &self,
        query: Option<&str>,
        filter: &ProductFilter,
        sort: SortOrder,
    ) -> AppResult<Vec<&Product>> {
        let query = match query {
            Some(query) => validate_search_query(query)?,
            None => String::new(),
        };

        let mut products: Vec<&Product> = self
            .catalog
            .search(&query)
            .into_iter()
            .filter(|p| filter.accepts(p))
            .collect();
        sort_products(&mut products, sort);

        debug!(parent: &self.span, ?sort, shown = products.len(), "Catalog browsed");
        Ok(products)
    }

    /// The home page's featured row.
    pub fn featured(&self) -> &[Product] {
        self.catalog.featured(FEATURED_PRODUCT_COUNT)
    }

    /// The detail page's related row for a product.
    pub fn related_products(&self, product_id: &str) -> AppResult<Vec<&Product>> {
        Ok(self
            .catalog
            .related_products(product_id, RELATED_PRODUCT_LIMIT)?)
    }

    // =========================================================================
    // Account Forms
    // =========================================================================
    //
    // Accounts are mocked: these only check form input the way the pages do
    // before submitting. Nothing is stored.

    /// Checks the sign-up form and scores the password.
    pub fn sign_up(
        &self,
        email: &str,
        password: &str,
        confirmation: &str,
    ) -> AppResult<PasswordStrength> {
        validate_email(email)?;
        validate_new_password(password, confirmation)?;

        let strength = PasswordStrength::of(password);
        debug!(parent: &self.span, score = strength.score, "Sign-up form accepted");
        Ok(strength)
    }

    /// Checks the forgot-password form.
    pub fn request_password_reset(&self, email: &str) -> AppResult<()> {
        validate_email(email)?;
        debug!(parent: &self.span, "Password reset requested");
        Ok(())
    }

    /// Checks the reset-password form and scores the new password.
    pub fn reset_password(&self, password: &str, confirmation: &str) -> AppResult<PasswordStrength> {
        validate_new_password(password, confirmation)?;
        Ok(PasswordStrength::of(password))
    }

    /// Checks a verification code, typed or pasted. Non-digits are dropped
    /// first. Returns the six-digit code.
    pub fn verify_code(&self, input: &str) -> AppResult<String> {
        let code = otp_from_paste(input);
        validate_otp(&code)?;
        debug!(parent: &self.span, "Verification code accepted");
        Ok(code)
    }

    // =========================================================================
    // Totals
    // =========================================================================

    /// The cart page summary.
    pub fn cart_summary(&self) -> OrderSummary {
        OrderSummary::for_cart(self.state(), &self.pricing)
    }

    /// The checkout page summary for a shipping method.
    pub fn checkout_summary(&self, method: ShippingMethod) -> OrderSummary {
        OrderSummary::for_checkout(self.state(), method, &self.pricing)
    }

    /// A serializable view of the session for reports.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.state();

        SessionSnapshot {
            session_id: self.id,
            started_at: self.started_at,
            cart: state
                .cart
                .iter()
                .map(|line| CartLineSummary {
                    product_id: line.product.id.clone(),
                    name: line.product.name.clone(),
                    quantity: line.quantity,
                    selected_color: line.selected_color.clone(),
                    selected_size: line.selected_size.clone(),
                    line_total: line.line_total(),
                })
                .collect(),
            wishlist: state
                .wishlist
                .iter()
                .map(|entry| entry.product.id.clone())
                .collect(),
            is_search_open: state.is_search_open,
            search_query: state.search_query.clone(),
            summary: self.cart_summary(),
            free_shipping_remaining: self
                .pricing
                .amount_to_free_shipping(state.cart_subtotal()),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
        }
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Session report: compact cart lines, wishlist ids and totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub cart: Vec<CartLineSummary>,
    pub wishlist: Vec<String>,
    pub is_search_open: bool,
    pub search_query: String,
    pub summary: OrderSummary,
    /// Spend still needed for free shipping; `None` once it is free.
    pub free_shipping_remaining: Option<Money>,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// The strength meter under a password field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    /// 0 to 4.
    pub score: u8,
    pub label: &'static str,
}

impl PasswordStrength {
    pub fn of(password: &str) -> Self {
        let score = password_strength(password);
        PasswordStrength {
            score,
            label: password_strength_label(score),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineSummary {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    pub selected_color: Option<String>,
    pub selected_size: Option<String>,
    pub line_total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================
