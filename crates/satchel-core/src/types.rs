//! # Domain Types
//!
//! Catalog and cart types shared by the store, the catalog queries and the
//! UI bindings.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartLine     │   │  WishlistEntry  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  product        │   │  product        │       │
//! │  │  name           │   │  quantity       │   └─────────────────┘       │
//! │  │  price          │   │  selected_color │                             │
//! │  │  colors, sizes  │   │  selected_size  │   ┌─────────────────┐       │
//! │  └─────────────────┘   └─────────────────┘   │   Collection    │       │
//! │                                              │  product_ids    │       │
//! │  ┌─────────────────┐                         └─────────────────┘       │
//! │  │    TaxRate      │                                                    │
//! │  │  bps (u32)      │                                                    │
//! │  │  800 = 8%       │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Cart lines and wishlist entries hold a copy of the product as it was when
//! the shopper added it. The catalog is static for a session, so the copy
//! never drifts, and the UI can render a line without a catalog lookup.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// 1 basis point = 0.01%, so 800 bps = 8%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog entry.
///
/// Read-only reference data: the store copies products into cart lines and
/// wishlist entries but never changes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Catalog identifier, e.g. `"heritage-tote"`.
    pub id: String,

    pub name: String,

    /// Current selling price.
    pub price: Money,

    /// Pre-discount price; present only for products on sale.
    #[serde(default)]
    pub original_price: Option<Money>,

    /// Primary image shown on product cards.
    pub image: String,

    /// Gallery images for the detail page.
    #[serde(default)]
    pub images: Vec<String>,

    /// "Handbags", "Bags", "Accessories".
    pub category: String,

    /// Name of the collection this product belongs to.
    pub collection: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub details: String,

    pub material: String,

    #[serde(default)]
    pub colors: Vec<String>,

    #[serde(default)]
    pub sizes: Vec<String>,

    /// Average review score, 0.0 to 5.0.
    #[serde(default)]
    pub rating: f32,

    #[serde(default)]
    pub review_count: u32,

    pub in_stock: bool,

    /// Shows the "only a few left" badge.
    #[serde(default)]
    pub low_stock: bool,
}

impl Product {
    /// Checks if the product is discounted.
    #[inline]
    pub fn is_on_sale(&self) -> bool {
        self.original_price.is_some()
    }

    /// Whole-percent discount for the sale badge, 0 when not on sale.
    pub fn percent_off(&self) -> u32 {
        self.original_price
            .map(|original| self.price.percent_off(original))
            .unwrap_or(0)
    }

    /// Checks whether the product is offered in `color`.
    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }

    /// Checks whether the product is offered in `size`.
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }
}

// =============================================================================
// Collection
// =============================================================================

/// A curated group of products ("Heritage", "Voyager", "Artisan").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Collection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    /// Member products, in display order.
    pub product_ids: Vec<String>,
}

// =============================================================================
// Cart Line
// =============================================================================

/// One entry in the shopping cart.
///
/// ## Identity
/// A line is keyed by `(product.id, selected_color, selected_size)`. Two
/// lines for the same product with different variant selections are
/// distinct entries. `None` and `Some("")` are different selections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    /// Product snapshot taken when the line was created.
    pub product: Product,

    /// Units of this variant. At least 1 for lines created by adds; an
    /// explicit quantity update may set any value, including 0.
    pub quantity: i64,

    #[serde(default)]
    pub selected_color: Option<String>,

    #[serde(default)]
    pub selected_size: Option<String>,
}

impl CartLine {
    /// Checks whether this line has the given variant key.
    pub fn matches(&self, product_id: &str, color: Option<&str>, size: Option<&str>) -> bool {
        self.product.id == product_id
            && self.selected_color.as_deref() == color
            && self.selected_size.as_deref() == size
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Wishlist Entry
// =============================================================================

/// A saved-for-later product. Unique per product id within a wishlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WishlistEntry {
    pub product: Product,
}

// =============================================================================
// Unit Tests
// =============================================================================
