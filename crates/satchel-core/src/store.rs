//! # Store
//!
//! The cart/wishlist state and its pure transition function.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart/Wishlist Store                                  │
//! │                                                                         │
//! │  UI Interaction          Action                    State Change         │
//! │  ──────────────          ──────                    ────────────         │
//! │                                                                         │
//! │  Add to cart ──────────► AddToCart ──────────────► merge or append line │
//! │  Trash icon ───────────► RemoveFromCart ─────────► drop every variant   │
//! │  Quantity stepper ─────► UpdateCartQuantity ─────► set quantity         │
//! │  Heart icon ───────────► AddToWishlist ──────────► append if absent     │
//! │                          RemoveFromWishlist ─────► drop entry           │
//! │  Search icon ──────────► ToggleSearch ───────────► set or flip flag     │
//! │  Search box ───────────► SetSearchQuery ─────────► replace text         │
//! │  Clear cart ───────────► ClearCart ──────────────► empty cart           │
//! │                                                                         │
//! │  transition(&state, action) -> StoreState                               │
//! │  Total, deterministic, no side effects. The input state is untouched.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use satchel_core::store::{transition, Action, StoreState};
//! # use satchel_core::{Money, Product};
//! # let product: Product = serde_json::from_value(serde_json::json!({
//! #     "id": "P1", "name": "Heritage Tote", "price": 5000, "image": "",
//! #     "category": "Handbags", "collection": "Heritage",
//! #     "material": "Full-grain leather", "inStock": true
//! # })).unwrap();
//!
//! let state = StoreState::default();
//! let state = transition(&state, Action::add_to_cart(product, 2));
//!
//! assert_eq!(state.cart_item_count(), 2);
//! assert_eq!(state.cart_subtotal(), Money::from_cents(10000));
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartLine, Product, WishlistEntry};

// =============================================================================
// State
// =============================================================================

/// Session-scoped storefront state.
///
/// Created empty at startup and replaced wholesale by every transition.
/// Nothing here is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StoreState {
    /// Cart lines in insertion order.
    pub cart: Vec<CartLine>,

    /// Wishlist entries in insertion order, unique per product id.
    pub wishlist: Vec<WishlistEntry>,

    /// Whether the search overlay is showing.
    pub is_search_open: bool,

    /// Text in the search box, exactly as typed.
    pub search_query: String,
}

impl StoreState {
    /// Sum of quantities across all cart lines (the header badge).
    pub fn cart_item_count(&self) -> i64 {
        self.cart
            .iter()
            .fold(0i64, |count, line| count.saturating_add(line.quantity))
    }

    /// Sum of price × quantity across all cart lines.
    pub fn cart_subtotal(&self) -> Money {
        self.cart.iter().map(CartLine::line_total).sum()
    }

    /// Number of wishlist entries.
    pub fn wishlist_count(&self) -> usize {
        self.wishlist.len()
    }

    /// Checks whether a product is on the wishlist (the filled heart icon).
    pub fn is_wishlisted(&self, product_id: &str) -> bool {
        self.wishlist
            .iter()
            .any(|entry| entry.product.id == product_id)
    }

    /// Finds the cart line for an exact variant key.
    pub fn cart_line(
        &self,
        product_id: &str,
        color: Option<&str>,
        size: Option<&str>,
    ) -> Option<&CartLine> {
        self.cart
            .iter()
            .find(|line| line.matches(product_id, color, size))
    }

    /// Checks whether the cart has no lines.
    pub fn is_cart_empty(&self) -> bool {
        self.cart.is_empty()
    }
}

// =============================================================================
// Actions
// =============================================================================

/// Everything the UI can ask the store to do.
///
/// ## JSON Shape
/// Mirrors the dispatch objects the UI sends:
/// ```json
/// { "type": "ADD_TO_CART", "payload": { "product": {...}, "quantity": 1 } }
/// { "type": "REMOVE_FROM_CART", "payload": "heritage-tote" }
/// { "type": "CLEAR_CART" }
/// ```
/// An unknown `type` fails to deserialize, so it never reaches
/// [`transition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(
    tag = "type",
    content = "payload",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
#[ts(export)]
pub enum Action {
    /// Add `quantity` units of a product variant.
    #[serde(rename_all = "camelCase")]
    AddToCart {
        product: Product,
        quantity: i64,
        #[serde(default)]
        selected_color: Option<String>,
        #[serde(default)]
        selected_size: Option<String>,
    },

    /// Remove every line for this product id, whatever the variant.
    RemoveFromCart(String),

    /// Set the quantity of the lines for this product id.
    #[serde(rename_all = "camelCase")]
    UpdateCartQuantity { product_id: String, quantity: i64 },

    AddToWishlist(Product),

    RemoveFromWishlist(String),

    /// `Some(open)` sets the overlay flag, `None` flips it.
    ToggleSearch(Option<bool>),

    SetSearchQuery(String),

    ClearCart,
}

impl Action {
    /// Shorthand for adding a product with no variant selection.
    pub fn add_to_cart(product: Product, quantity: i64) -> Self {
        Action::AddToCart {
            product,
            quantity,
            selected_color: None,
            selected_size: None,
        }
    }

    /// Shorthand for adding a specific colour/size variant.
    pub fn add_variant_to_cart(
        product: Product,
        quantity: i64,
        selected_color: Option<String>,
        selected_size: Option<String>,
    ) -> Self {
        Action::AddToCart {
            product,
            quantity,
            selected_color,
            selected_size,
        }
    }

    /// Stable name for logs, matching the JSON `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::AddToCart { .. } => "ADD_TO_CART",
            Action::RemoveFromCart(_) => "REMOVE_FROM_CART",
            Action::UpdateCartQuantity { .. } => "UPDATE_CART_QUANTITY",
            Action::AddToWishlist(_) => "ADD_TO_WISHLIST",
            Action::RemoveFromWishlist(_) => "REMOVE_FROM_WISHLIST",
            Action::ToggleSearch(_) => "TOGGLE_SEARCH",
            Action::SetSearchQuery(_) => "SET_SEARCH_QUERY",
            Action::ClearCart => "CLEAR_CART",
        }
    }
}

// =============================================================================
// Transition
// =============================================================================

/// Maps the current state and an action to the next state.
///
/// ## Behavior
/// - Never fails and never panics; every action is legal in every state.
/// - Quantities are taken as given. A zero or negative quantity is stored,
///   not rejected; [`validation`](crate::validation) is the place to refuse
///   them.
/// - `UpdateCartQuantity` with 0 keeps the line at quantity 0. Removing it
///   is the caller's decision.
/// - `RemoveFromCart` and `UpdateCartQuantity` match on product id alone,
///   so they act on every colour/size variant of that product, while
///   `AddToCart` merges only into an exact variant match.
pub fn transition(state: &StoreState, action: Action) -> StoreState {
    match action {
        Action::AddToCart {
            product,
            quantity,
            selected_color,
            selected_size,
        } => {
            let mut cart = state.cart.clone();
            let existing = cart.iter().position(|line| {
                line.matches(
                    &product.id,
                    selected_color.as_deref(),
                    selected_size.as_deref(),
                )
            });

            match existing {
                Some(index) => {
                    cart[index].quantity = cart[index].quantity.saturating_add(quantity)
                }
                None => cart.push(CartLine {
                    product,
                    quantity,
                    selected_color,
                    selected_size,
                }),
            }

            StoreState {
                cart,
                ..state.clone()
            }
        }

        Action::RemoveFromCart(product_id) => StoreState {
            cart: state
                .cart
                .iter()
                .filter(|line| line.product.id != product_id)
                .cloned()
                .collect(),
            ..state.clone()
        },

        Action::UpdateCartQuantity {
            product_id,
            quantity,
        } => StoreState {
            cart: state
                .cart
                .iter()
                .map(|line| {
                    if line.product.id == product_id {
                        CartLine {
                            quantity,
                            ..line.clone()
                        }
                    } else {
                        line.clone()
                    }
                })
                .collect(),
            ..state.clone()
        },

        Action::AddToWishlist(product) => {
            if state.is_wishlisted(&product.id) {
                return state.clone();
            }

            let mut wishlist = state.wishlist.clone();
            wishlist.push(WishlistEntry { product });

            StoreState {
                wishlist,
                ..state.clone()
            }
        }

        Action::RemoveFromWishlist(product_id) => StoreState {
            wishlist: state
                .wishlist
                .iter()
                .filter(|entry| entry.product.id != product_id)
                .cloned()
                .collect(),
            ..state.clone()
        },

        Action::ToggleSearch(open) => StoreState {
            is_search_open: open.unwrap_or(!state.is_search_open),
            ..state.clone()
        },

        Action::SetSearchQuery(query) => StoreState {
            search_query: query,
            ..state.clone()
        },

        Action::ClearCart => StoreState {
            cart: Vec::new(),
            ..state.clone()
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
