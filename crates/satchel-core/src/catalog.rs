//! # Catalog
//!
//! The read-only product and collection list, with the lookups, search,
//! filters and sort orders the shop and search pages use.
//!
//! ## Browse Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Catalog.products ──► search(query) ──► filter(&ProductFilter) ──►      │
//! │                                                                         │
//! │                       sort_products(_, SortOrder) ──► product grid      │
//! │                                                                         │
//! │  Every step borrows; nothing here clones or mutates a Product.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use satchel_core::catalog::{sort_products, Catalog, SortOrder};
//!
//! let json = r#"{
//!   "products": [
//!     {"id": "1", "name": "Heritage Tote", "price": 18900, "image": "",
//!      "category": "Handbags", "collection": "Heritage",
//!      "material": "Full-grain leather", "inStock": true},
//!     {"id": "2", "name": "Card Wallet", "price": 4500, "image": "",
//!      "category": "Accessories", "collection": "Heritage",
//!      "material": "Premium leather", "inStock": true}
//!   ],
//!   "collections": []
//! }"#;
//!
//! let catalog = Catalog::from_json(json).unwrap();
//! let mut hits = catalog.search("leather");
//! sort_products(&mut hits, SortOrder::PriceLowToHigh);
//! assert_eq!(hits[0].name, "Card Wallet");
//! ```

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Collection, Product};

/// Filter value meaning "no constraint" in the shop sidebar.
pub const ALL: &str = "All";

// =============================================================================
// Catalog
// =============================================================================

/// Products and collections available this session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    products: Vec<Product>,
    #[serde(default)]
    collections: Vec<Collection>,
}

impl Catalog {
    /// Builds a catalog, checking that ids are unique and that every
    /// collection member exists.
    pub fn new(products: Vec<Product>, collections: Vec<Collection>) -> CoreResult<Self> {
        let mut product_ids = HashSet::new();
        for product in &products {
            if !product_ids.insert(product.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "product id".to_string(),
                    value: product.id.clone(),
                }
                .into());
            }
        }

        let mut collection_ids = HashSet::new();
        for collection in &collections {
            if !collection_ids.insert(collection.id.as_str()) {
                return Err(ValidationError::Duplicate {
                    field: "collection id".to_string(),
                    value: collection.id.clone(),
                }
                .into());
            }

            if let Some(missing) = collection
                .product_ids
                .iter()
                .find(|id| !product_ids.contains(id.as_str()))
            {
                return Err(CoreError::DanglingCollectionMember {
                    collection: collection.id.clone(),
                    product_id: missing.clone(),
                });
            }
        }

        Ok(Catalog {
            products,
            collections,
        })
    }

    /// Parses and checks a catalog document:
    /// `{"products": [...], "collections": [...]}`.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let raw: Catalog = serde_json::from_str(json)?;
        Catalog::new(raw.products, raw.collections)
    }

    /// All products in catalog ("featured") order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Like [`Catalog::product`], but a miss is an error.
    pub fn require_product(&self, id: &str) -> CoreResult<&Product> {
        self.product(id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    pub fn collection(&self, id: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == id)
    }

    /// Members of a collection, in the collection's order.
    pub fn collection_products(&self, id: &str) -> CoreResult<Vec<&Product>> {
        let collection = self
            .collection(id)
            .ok_or_else(|| CoreError::CollectionNotFound(id.to_string()))?;

        collection
            .product_ids
            .iter()
            .map(|pid| self.require_product(pid))
            .collect()
    }

    /// The first `count` products, for the home page.
    pub fn featured(&self, count: usize) -> &[Product] {
        &self.products[..count.min(self.products.len())]
    }

    /// Products with an original price.
    pub fn on_sale(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_on_sale()).collect()
    }

    /// Up to `limit` other products in the same category, in catalog order,
    /// for the "You may also like" row.
    pub fn related_products(&self, id: &str, limit: usize) -> CoreResult<Vec<&Product>> {
        let product = self.require_product(id)?;

        Ok(self
            .products
            .iter()
            .filter(|p| p.id != product.id && p.category == product.category)
            .take(limit)
            .collect())
    }

    /// Case-insensitive substring search over name, description, category,
    /// collection and material.
    ///
    /// A blank query matches everything, in catalog order.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.products.iter().collect();
        }

        self.products
            .iter()
            .filter(|p| {
                [
                    &p.name,
                    &p.description,
                    &p.category,
                    &p.collection,
                    &p.material,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Products passing every constraint in `filter`, in catalog order.
    pub fn filter(&self, filter: &ProductFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.accepts(p)).collect()
    }
}

// =============================================================================
// Filtering
// =============================================================================

/// Shop sidebar filters.
///
/// `None`, an empty string and `"All"` all mean "any" for the text fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub material: Option<String>,
    /// Matches if the product is offered in this colour.
    pub color: Option<String>,
    pub in_stock_only: bool,
    /// Inclusive bounds.
    pub min_price: Money,
    pub max_price: Money,
}

impl Default for ProductFilter {
    /// No constraints beyond the sidebar's default $0-$500 price slider.
    fn default() -> Self {
        ProductFilter {
            category: None,
            material: None,
            color: None,
            in_stock_only: false,
            min_price: Money::zero(),
            max_price: Money::from_cents(50000),
        }
    }
}

impl ProductFilter {
    pub fn accepts(&self, product: &Product) -> bool {
        if let Some(category) = active(&self.category) {
            if product.category != category {
                return false;
            }
        }

        if let Some(material) = active(&self.material) {
            if product.material != material {
                return false;
            }
        }

        if let Some(color) = active(&self.color) {
            if !product.has_color(color) {
                return false;
            }
        }

        if self.in_stock_only && !product.in_stock {
            return false;
        }

        product.price >= self.min_price && product.price <= self.max_price
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty() && *v != ALL)
}

// =============================================================================
// Sorting
// =============================================================================

/// Sort dropdown options across the shop and search pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum SortOrder {
    /// Catalog order ("featured" on the shop page, "relevance" on search).
    #[default]
    Featured,
    #[serde(rename = "price-low")]
    PriceLowToHigh,
    #[serde(rename = "price-high")]
    PriceHighToLow,
    /// Highest id first, compared as strings.
    Newest,
    /// Best rated first.
    Rating,
    /// A to Z.
    Name,
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "featured" | "relevance" => Ok(SortOrder::Featured),
            "price-low" => Ok(SortOrder::PriceLowToHigh),
            "price-high" => Ok(SortOrder::PriceHighToLow),
            "newest" => Ok(SortOrder::Newest),
            "rating" => Ok(SortOrder::Rating),
            "name" => Ok(SortOrder::Name),
            other => Err(format!("Unknown sort order: '{}'", other)),
        }
    }
}

/// Sorts in place. Stable, so ties keep catalog order.
pub fn sort_products(products: &mut [&Product], order: SortOrder) {
    match order {
        SortOrder::Featured => {}
        SortOrder::PriceLowToHigh => products.sort_by_key(|p| p.price),
        SortOrder::PriceHighToLow => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortOrder::Newest => products.sort_by(|a, b| b.id.cmp(&a.id)),
        SortOrder::Rating => products.sort_by(|a, b| {
            b.rating
                .partial_cmp(&a.rating)
                .unwrap_or(Ordering::Equal)
        }),
        SortOrder::Name => products.sort_by(|a, b| a.name.cmp(&b.name)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::test_product;

    fn sample_catalog() -> Catalog {
        let mut tote = test_product("1", 18900);
        tote.name = "Heritage Tote".to_string();
        tote.category = "Handbags".to_string();
        tote.colors = vec!["Cognac".to_string(), "Black".to_string()];
        tote.rating = 4.9;

        let mut duffel = test_product("2", 32900);
        duffel.name = "Voyager Duffel".to_string();
        duffel.collection = "Voyager".to_string();
        duffel.material = "Canvas with leather trim".to_string();
        duffel.colors = vec!["Olive".to_string()];
        duffel.original_price = Some(Money::from_cents(38900));
        duffel.rating = 4.6;

        let mut wallet = test_product("3", 4500);
        wallet.name = "Card Wallet".to_string();
        wallet.category = "Accessories".to_string();
        wallet.description = "Slim enough for a front pocket".to_string();
        wallet.colors = vec!["Black".to_string()];
        wallet.in_stock = false;
        wallet.rating = 4.6;

        let collections = vec![Collection {
            id: "heritage".to_string(),
            name: "Heritage".to_string(),
            description: String::new(),
            image: String::new(),
            product_ids: vec!["3".to_string(), "1".to_string()],
        }];

        Catalog::new(vec![tote, duffel, wallet], collections).unwrap()
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn test_lookup() {
        let catalog = sample_catalog();
        assert_eq!(catalog.product("2").unwrap().name, "Voyager Duffel");
        assert!(catalog.product("9").is_none());
        assert!(matches!(
            catalog.require_product("9"),
            Err(CoreError::ProductNotFound(id)) if id == "9"
        ));
    }

    #[test]
    fn test_collection_products_keep_collection_order() {
        let catalog = sample_catalog();
        let members = catalog.collection_products("heritage").unwrap();
        assert_eq!(ids(&members), vec!["3", "1"]);

        assert!(matches!(
            catalog.collection_products("artisan"),
            Err(CoreError::CollectionNotFound(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_product_ids() {
        let result = Catalog::new(
            vec![test_product("1", 100), test_product("1", 200)],
            Vec::new(),
        );
        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::Duplicate { .. }))
        ));
    }

    #[test]
    fn test_rejects_dangling_collection_member() {
        let collections = vec![Collection {
            id: "voyager".to_string(),
            name: "Voyager".to_string(),
            description: String::new(),
            image: String::new(),
            product_ids: vec!["1".to_string(), "ghost".to_string()],
        }];
        let result = Catalog::new(vec![test_product("1", 100)], collections);
        assert!(matches!(
            result,
            Err(CoreError::DanglingCollectionMember { product_id, .. }) if product_id == "ghost"
        ));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Catalog::from_json("{ not json"),
            Err(CoreError::MalformedCatalog(_))
        ));
    }

    #[test]
    fn test_featured_and_on_sale() {
        let catalog = sample_catalog();
        assert_eq!(catalog.featured(2).len(), 2);
        assert_eq!(catalog.featured(10).len(), 3);
        assert_eq!(ids(&catalog.on_sale()), vec!["2"]);
    }

    #[test]
    fn test_related_products_share_category() {
        let mut products: Vec<Product> = (1..=5)
            .map(|i| test_product(&i.to_string(), 1000 * i))
            .collect();
        products[3].category = "Accessories".to_string();
        let catalog = Catalog::new(products, Vec::new()).unwrap();

        assert_eq!(ids(&catalog.related_products("1", 3).unwrap()), vec!["2", "3", "5"]);
        assert_eq!(ids(&catalog.related_products("2", 2).unwrap()), vec!["1", "3"]);
        assert!(catalog.related_products("4", 3).unwrap().is_empty());
        assert!(matches!(
            catalog.related_products("99", 3),
            Err(CoreError::ProductNotFound(_))
        ));
    }

    #[test]
    fn test_search_fields_case_insensitive() {
        let catalog = sample_catalog();

        assert_eq!(ids(&catalog.search("TOTE")), vec!["1"]);
        assert_eq!(ids(&catalog.search("voyager")), vec!["2"]);
        assert_eq!(ids(&catalog.search("canvas")), vec!["2"]);
        assert_eq!(ids(&catalog.search("accessories")), vec!["3"]);
        assert_eq!(ids(&catalog.search("front pocket")), vec!["3"]);
        assert!(catalog.search("umbrella").is_empty());
    }

    #[test]
    fn test_blank_search_returns_everything() {
        let catalog = sample_catalog();
        assert_eq!(catalog.search("   ").len(), 3);
    }

    #[test]
    fn test_filters() {
        let catalog = sample_catalog();

        let all = ProductFilter {
            category: Some(ALL.to_string()),
            ..ProductFilter::default()
        };
        assert_eq!(catalog.filter(&all).len(), 3);

        let black = ProductFilter {
            color: Some("Black".to_string()),
            ..ProductFilter::default()
        };
        assert_eq!(ids(&catalog.filter(&black)), vec!["1", "3"]);

        let black_in_stock = ProductFilter {
            in_stock_only: true,
            ..black
        };
        assert_eq!(ids(&catalog.filter(&black_in_stock)), vec!["1"]);

        let handbags = ProductFilter {
            category: Some("Handbags".to_string()),
            ..ProductFilter::default()
        };
        assert_eq!(ids(&catalog.filter(&handbags)), vec!["1"]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let catalog = sample_catalog();
        let filter = ProductFilter {
            min_price: Money::from_cents(4500),
            max_price: Money::from_cents(18900),
            ..ProductFilter::default()
        };
        assert_eq!(ids(&catalog.filter(&filter)), vec!["1", "3"]);

        // The default slider tops out at $500, which covers everything here.
        assert_eq!(catalog.filter(&ProductFilter::default()).len(), 3);
    }

    #[test]
    fn test_sort_orders() {
        let catalog = sample_catalog();
        let sorted = |order| {
            let mut products: Vec<&Product> = catalog.products().iter().collect();
            sort_products(&mut products, order);
            ids(&products)
        };

        assert_eq!(sorted(SortOrder::Featured), vec!["1", "2", "3"]);
        assert_eq!(sorted(SortOrder::PriceLowToHigh), vec!["3", "1", "2"]);
        assert_eq!(sorted(SortOrder::PriceHighToLow), vec!["2", "1", "3"]);
        assert_eq!(sorted(SortOrder::Newest), vec!["3", "2", "1"]);
        assert_eq!(sorted(SortOrder::Name), vec!["3", "1", "2"]);
        // Ties (4.6) keep catalog order.
        assert_eq!(sorted(SortOrder::Rating), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!("relevance".parse::<SortOrder>(), Ok(SortOrder::Featured));
        assert_eq!("price-high".parse::<SortOrder>(), Ok(SortOrder::PriceHighToLow));
        assert!("cheapest".parse::<SortOrder>().is_err());

        let order: SortOrder = serde_json::from_str("\"price-low\"").unwrap();
        assert_eq!(order, SortOrder::PriceLowToHigh);
    }
}
