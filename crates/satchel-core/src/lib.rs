//! # satchel-core: Pure Storefront Logic for Satchel
//!
//! This crate is the **heart** of the Satchel storefront. The cart and
//! wishlist live in a single state value changed only by a pure transition
//! function; everything else here is derived from that state or from the
//! read-only catalog.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Satchel Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Pages & Components (UI)                      │   │
//! │  │    Shop ──► Product ──► Cart ──► Checkout      Search overlay   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ dispatch(Action) / read StoreState     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 Session (apps/storefront)                       │   │
//! │  │        history + catalog + pricing policy, logging              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ satchel-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ │   │
//! │  │   │  store  │ │ history │ │ totals  │ │ catalog │ │validation│ │   │
//! │  │   │transition│ │undo/redo│ │ship, tax│ │ search  │ │  rules   │ │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └──────────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOGGING • NO CLOCKS • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - `StoreState`, `Action`, and the `transition` reducer
//! - [`history`] - Undo/redo over whole states
//! - [`totals`] - Shipping, tax and order summaries
//! - [`catalog`] - Product/collection lookup, search, filters, sorting
//! - [`types`] - Product, CartLine, WishlistEntry, Collection
//! - [`money`] - Money type with integer arithmetic
//! - [`validation`] - Shopper input checks, run before dispatch
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Whole-State Replacement**: `transition` borrows the old state and
//!    returns a new one
//! 2. **Closed Actions**: every action kind is an enum variant, matched
//!    exhaustively
//! 3. **Integer Money**: all prices are cents (i64)
//! 4. **Total Reducer**: the transition never fails; checks happen before
//!    dispatch
//!
//! ## Example Usage
//!
//! ```rust
//! use satchel_core::store::{transition, Action, StoreState};
//! use satchel_core::totals::{OrderSummary, PricingPolicy};
//! # let tote: satchel_core::Product = serde_json::from_value(serde_json::json!({
//! #     "id": "heritage-tote", "name": "Heritage Tote", "price": 18900,
//! #     "image": "", "category": "Handbags", "collection": "Heritage",
//! #     "material": "Full-grain leather", "inStock": true
//! # })).unwrap();
//!
//! let state = transition(&StoreState::default(), Action::add_to_cart(tote, 1));
//! let summary = OrderSummary::for_cart(&state, &PricingPolicy::default());
//!
//! // $189.00 ships free; 8% tax is $15.12
//! assert!(summary.shipping.is_zero());
//! assert_eq!(summary.total.cents(), 20412);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod history;
pub mod money;
pub mod store;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, ProductFilter, SortOrder};
pub use error::{CoreError, CoreResult, ValidationError};
pub use history::History;
pub use money::Money;
pub use store::{transition, Action, StoreState};
pub use totals::{OrderSummary, PricingPolicy, ShippingMethod};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest quantity a shopper may pick for one cart line.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Longest search query accepted, in characters.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

/// Shortest password accepted on sign-up and reset.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Digits in an emailed verification code.
pub const OTP_LENGTH: usize = 6;

/// Products shown in the home page's featured row.
pub const FEATURED_PRODUCT_COUNT: usize = 3;

/// Products shown in a detail page's related row.
pub const RELATED_PRODUCT_LIMIT: usize = 3;

/// Default number of undo steps a session keeps.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;
