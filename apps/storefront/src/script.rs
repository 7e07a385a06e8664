//! # Shopper Scripts
//!
//! Replays a recorded shopper visit against a [`Session`].
//!
//! A script is JSON lines, one command per line. Blank lines and lines
//! starting with `#` are skipped.
//!
//! ```text
//! {"op": "add", "product_id": "heritage-tote", "quantity": 2, "color": "Cognac"}
//! {"op": "wishlist", "product_id": "card-wallet"}
//! {"op": "search", "query": "wallet"}
//! {"op": "set_quantity", "product_id": "heritage-tote", "quantity": 0}
//! {"op": "undo"}
//! {"op": "dispatch", "action": {"type": "TOGGLE_SEARCH"}}
//! {"op": "browse", "filter": {"category": "Bags", "inStockOnly": true}, "sort": "price-low"}
//! {"op": "verify_code", "code": "123-456"}
//! {"op": "checkout", "shipping": "express"}
//! ```
//!
//! A command that fails (unknown product, quantity out of range, bad JSON)
//! is logged and recorded in the report; replay continues with the next
//! line.

use std::io::BufRead;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use satchel_core::{Action, OrderSummary, Product, ProductFilter, ShippingMethod, SortOrder};

use crate::error::{AppError, AppResult};
use crate::session::Session;

// =============================================================================
// Commands
// =============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ShopperCommand {
    /// Add a catalog product, optionally a specific colour/size.
    Add {
        product_id: String,
        #[serde(default = "default_quantity")]
        quantity: i64,
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        size: Option<String>,
    },

    /// Quantity selector on the cart page. 0 removes the product.
    SetQuantity { product_id: String, quantity: i64 },

    Remove { product_id: String },

    /// Heart button: add or remove from the wishlist.
    Wishlist { product_id: String },

    /// Remove button on the wishlist page.
    Unwishlist { product_id: String },

    /// "Add to cart" on the wishlist page: one unit, no variant.
    WishlistToCart { product_id: String },

    ClearWishlist,

    Search { query: String },

    OpenSearch,

    CloseSearch,

    ToggleSearch,

    ClearCart,

    Undo,

    Redo,

    /// The shop grid. Lists matching product ids in the report.
    Browse {
        #[serde(default)]
        query: Option<String>,
        #[serde(default)]
        filter: ProductFilter,
        #[serde(default)]
        sort: SortOrder,
    },

    /// The home page's featured row.
    Featured,

    /// A detail page's related row.
    Related { product_id: String },

    SignUp {
        email: String,
        password: String,
        confirm_password: String,
    },

    ForgotPassword { email: String },

    ResetPassword {
        password: String,
        confirm_password: String,
    },

    /// A typed or pasted verification code.
    VerifyCode { code: String },

    /// A raw store action in its JSON form.
    Dispatch { action: Action },

    /// Price the cart for checkout. Defaults to standard shipping.
    Checkout {
        #[serde(default)]
        shipping: Option<String>,
    },
}

fn default_quantity() -> i64 {
    1
}

// =============================================================================
// Report
// =============================================================================

/// A script line that could not be applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedCommand {
    /// 1-based line number in the script.
    pub line: usize,
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutQuote {
    pub shipping_method: ShippingMethod,
    pub shipping_label: String,
    pub summary: OrderSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    pub applied: usize,
    pub rejected: Vec<RejectedCommand>,
    /// The quote from the last `checkout` command, if any.
    pub checkout: Option<CheckoutQuote>,
    /// Product ids from the last `browse`, `featured` or `related` command.
    pub listing: Option<Vec<String>>,
}

/// What a successful command produced beyond its effect on the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Applied,
    Quote(CheckoutQuote),
    Listing(Vec<String>),
}

fn listing(products: &[&Product]) -> Outcome {
    Outcome::Listing(products.iter().map(|p| p.id.clone()).collect())
}

// =============================================================================
// Replay
// =============================================================================

/// Runs every command in `reader` against the session.
///
/// Only a failure to read the input aborts the replay.
pub fn replay<R: BufRead>(session: &mut Session, reader: R) -> AppResult<ReplayReport> {
    let mut report = ReplayReport::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let result = serde_json::from_str::<ShopperCommand>(trimmed)
            .map_err(AppError::from)
            .and_then(|command| execute(session, command));

        match result {
            Ok(outcome) => {
                report.applied += 1;
                match outcome {
                    Outcome::Applied => {}
                    Outcome::Quote(quote) => report.checkout = Some(quote),
                    Outcome::Listing(ids) => report.listing = Some(ids),
                }
            }
            Err(e) => {
                warn!(line = line_no, code = e.code(), error = %e, "Shopper command rejected");
                report.rejected.push(RejectedCommand {
                    line: line_no,
                    code: e.code().to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    debug!(
        applied = report.applied,
        rejected = report.rejected.len(),
        "Replay finished"
    );
    Ok(report)
}

/// Applies one command.
pub fn execute(session: &mut Session, command: ShopperCommand) -> AppResult<Outcome> {
    match command {
        ShopperCommand::Add {
            product_id,
            quantity,
            color,
            size,
        } => {
            session.add_to_cart(&product_id, quantity, color, size)?;
        }
        ShopperCommand::SetQuantity {
            product_id,
            quantity,
        } => {
            session.set_quantity(&product_id, quantity)?;
        }
        ShopperCommand::Remove { product_id } => {
            session.remove_from_cart(&product_id);
        }
        ShopperCommand::Wishlist { product_id } => {
            session.toggle_wishlist(&product_id)?;
        }
        ShopperCommand::Unwishlist { product_id } => {
            session.remove_from_wishlist(&product_id);
        }
        ShopperCommand::WishlistToCart { product_id } => {
            if !session.move_wishlist_item_to_cart(&product_id) {
                debug!(product_id = %product_id, "Not on the wishlist, nothing added");
            }
        }
        ShopperCommand::ClearWishlist => {
            session.clear_wishlist();
        }
        ShopperCommand::Search { query } => {
            session.search(&query)?;
        }
        ShopperCommand::OpenSearch => {
            session.open_search();
        }
        ShopperCommand::CloseSearch => {
            session.close_search();
        }
        ShopperCommand::ToggleSearch => {
            session.toggle_search();
        }
        ShopperCommand::ClearCart => {
            session.clear_cart();
        }
        ShopperCommand::Undo => {
            session.undo();
        }
        ShopperCommand::Redo => {
            session.redo();
        }
        ShopperCommand::Browse {
            query,
            filter,
            sort,
        } => {
            return Ok(listing(&session.browse(query.as_deref(), &filter, sort)?));
        }
        ShopperCommand::Featured => {
            let featured: Vec<&Product> = session.featured().iter().collect();
            return Ok(listing(&featured));
        }
        ShopperCommand::Related { product_id } => {
            return Ok(listing(&session.related_products(&product_id)?));
        }
        ShopperCommand::SignUp {
            email,
            password,
            confirm_password,
        } => {
            session.sign_up(&email, &password, &confirm_password)?;
        }
        ShopperCommand::ForgotPassword { email } => {
            session.request_password_reset(&email)?;
        }
        ShopperCommand::ResetPassword {
            password,
            confirm_password,
        } => {
            session.reset_password(&password, &confirm_password)?;
        }
        ShopperCommand::VerifyCode { code } => {
            session.verify_code(&code)?;
        }
        ShopperCommand::Dispatch { action } => {
            session.dispatch(action);
        }
        ShopperCommand::Checkout { shipping } => {
            let method = match shipping {
                Some(name) => name
                    .parse::<ShippingMethod>()
                    .map_err(AppError::UnknownShippingMethod)?,
                None => ShippingMethod::default(),
            };

            return Ok(Outcome::Quote(CheckoutQuote {
                shipping_method: method,
                shipping_label: method.label().to_string(),
                summary: session.checkout_summary(method),
            }));
        }
    }

    Ok(Outcome::Applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_catalog;
    use satchel_core::PricingPolicy;

    fn session() -> Session {
        Session::new(seed_catalog().unwrap(), PricingPolicy::default(), 10)
    }

    #[test]
    fn test_parse_commands() {
        let cmd: ShopperCommand =
            serde_json::from_str(r#"{"op":"add","product_id":"card-wallet"}"#).unwrap();
        assert_eq!(
            cmd,
            ShopperCommand::Add {
                product_id: "card-wallet".to_string(),
                quantity: 1,
                color: None,
                size: None,
            }
        );

        let cmd: ShopperCommand = serde_json::from_str(r#"{"op":"undo"}"#).unwrap();
        assert_eq!(cmd, ShopperCommand::Undo);

        let cmd: ShopperCommand = serde_json::from_str(
            r#"{"op":"dispatch","action":{"type":"REMOVE_FROM_CART","payload":"card-wallet"}}"#,
        )
        .unwrap();
        assert_eq!(
            cmd,
            ShopperCommand::Dispatch {
                action: Action::RemoveFromCart("card-wallet".to_string())
            }
        );
    }

    #[test]
    fn test_replay_script() {
        let script = r#"
# a short visit
{"op": "add", "product_id": "heritage-tote", "quantity": 2, "color": "Cognac"}
{"op": "add", "product_id": "card-wallet"}
{"op": "wishlist", "product_id": "voyager-duffle"}
{"op": "search", "query": "wallet"}
{"op": "set_quantity", "product_id": "card-wallet", "quantity": 0}
{"op": "checkout", "shipping": "express"}
"#;
        let mut session = session();
        let report = replay(&mut session, script.as_bytes()).unwrap();

        assert_eq!(report.applied, 6);
        assert!(report.rejected.is_empty());

        let state = session.state();
        assert_eq!(state.cart.len(), 1);
        assert_eq!(state.cart_item_count(), 2);
        assert!(state.is_wishlisted("voyager-duffle"));
        assert_eq!(state.search_query, "wallet");

        let quote = report.checkout.unwrap();
        assert_eq!(quote.shipping_method, ShippingMethod::Express);
        assert_eq!(quote.summary.subtotal.cents(), 37800);
        assert_eq!(quote.summary.shipping.cents(), 2500);
    }

    #[test]
    fn test_replay_continues_after_rejection() {
        let script = concat!(
            "{\"op\": \"add\", \"product_id\": \"no-such-bag\"}\n",
            "not json\n",
            "{\"op\": \"add\", \"product_id\": \"card-wallet\", \"quantity\": 1000}\n",
            "{\"op\": \"checkout\", \"shipping\": \"drone\"}\n",
            "{\"op\": \"add\", \"product_id\": \"card-wallet\"}\n",
        );
        let mut session = session();
        let report = replay(&mut session, script.as_bytes()).unwrap();

        assert_eq!(report.applied, 1);
        let codes: Vec<&str> = report.rejected.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(
            codes,
            vec![
                "PRODUCT_NOT_FOUND",
                "INVALID_JSON",
                "VALIDATION_ERROR",
                "UNKNOWN_SHIPPING_METHOD"
            ]
        );
        assert_eq!(report.rejected[1].line, 2);
        assert_eq!(session.state().cart_item_count(), 1);
    }

    #[test]
    fn test_unknown_action_type_is_rejected() {
        let script = r#"{"op": "dispatch", "action": {"type": "APPLY_COUPON", "payload": "SAVE10"}}"#;
        let mut session = session();
        let report = replay(&mut session, script.as_bytes()).unwrap();

        assert_eq!(report.applied, 0);
        assert_eq!(report.rejected[0].code, "INVALID_JSON");
        assert!(!session.can_undo());
    }

    #[test]
    fn test_undo_redo_commands() {
        let script = concat!(
            "{\"op\": \"add\", \"product_id\": \"card-wallet\"}\n",
            "{\"op\": \"clear_cart\"}\n",
            "{\"op\": \"undo\"}\n",
        );
        let mut session = session();
        replay(&mut session, script.as_bytes()).unwrap();
        assert_eq!(session.state().cart_item_count(), 1);

        execute(&mut session, ShopperCommand::Redo).unwrap();
        assert!(session.state().is_cart_empty());
    }

    #[test]
    fn test_checkout_defaults_to_standard() {
        let mut session = session();
        execute(
            &mut session,
            ShopperCommand::Add {
                product_id: "heritage-tote".to_string(),
                quantity: 1,
                color: None,
                size: None,
            },
        )
        .unwrap();

        let outcome = execute(&mut session, ShopperCommand::Checkout { shipping: None }).unwrap();
        let Outcome::Quote(quote) = outcome else {
            panic!("expected a checkout quote, got {:?}", outcome);
        };
        assert_eq!(quote.shipping_method, ShippingMethod::Standard);
        assert_eq!(quote.summary.total.cents(), 18900 + 1500 + 1512);
    }

    #[test]
    fn test_dispatched_huge_quantity_is_reported_not_fatal() {
        let script = concat!(
            "{\"op\": \"dispatch\", \"action\": {\"type\": \"ADD_TO_CART\", \"payload\": {",
            "\"product\": {\"id\": \"card-wallet\", \"name\": \"Slim Card Wallet\", ",
            "\"price\": 4500, \"image\": \"\", \"category\": \"Accessories\", ",
            "\"collection\": \"Artisan\", \"material\": \"Premium leather\", \"inStock\": true}, ",
            "\"quantity\": 10000000000000000}}}\n",
            "{\"op\": \"checkout\", \"shipping\": \"overnight\"}\n",
        );
        let mut session = session();
        let report = replay(&mut session, script.as_bytes()).unwrap();

        assert_eq!(report.applied, 2);
        assert_eq!(report.checkout.unwrap().summary.total.cents(), i64::MAX);

        let snapshot = session.snapshot();
        assert_eq!(snapshot.summary.subtotal.cents(), i64::MAX);
        assert!(serde_json::to_string(&snapshot).is_ok());
    }

    #[test]
    fn test_wishlist_page_commands() {
        let script = concat!(
            "{\"op\": \"wishlist\", \"product_id\": \"heritage-tote\"}\n",
            "{\"op\": \"wishlist\", \"product_id\": \"card-wallet\"}\n",
            "{\"op\": \"wishlist\", \"product_id\": \"voyager-backpack\"}\n",
            "{\"op\": \"wishlist_to_cart\", \"product_id\": \"card-wallet\"}\n",
            "{\"op\": \"unwishlist\", \"product_id\": \"heritage-tote\"}\n",
            "{\"op\": \"clear_wishlist\"}\n",
        );
        let mut session = session();
        let report = replay(&mut session, script.as_bytes()).unwrap();

        assert_eq!(report.applied, 6);
        assert_eq!(session.state().wishlist_count(), 0);
        assert_eq!(session.state().cart.len(), 1);
        assert_eq!(session.state().cart[0].product.id, "card-wallet");
        assert_eq!(session.state().cart[0].quantity, 1);
    }

    #[test]
    fn test_browse_featured_and_related_commands() {
        let mut session = session();

        let script = r#"{"op": "browse", "filter": {"category": "Bags"}, "sort": "price-high"}"#;
        let report = replay(&mut session, script.as_bytes()).unwrap();
        assert_eq!(
            report.listing,
            Some(vec!["voyager-duffle".to_string(), "voyager-backpack".to_string()])
        );

        let script = r#"{"op": "browse", "query": "wallet", "filter": {"maxPrice": 5000}}"#;
        let report = replay(&mut session, script.as_bytes()).unwrap();
        assert_eq!(report.listing, Some(vec!["card-wallet".to_string()]));

        let report = replay(&mut session, r#"{"op": "featured"}"#.as_bytes()).unwrap();
        assert_eq!(report.listing.map(|ids| ids.len()), Some(3));

        let script = r#"{"op": "related", "product_id": "card-wallet"}"#;
        let report = replay(&mut session, script.as_bytes()).unwrap();
        assert_eq!(
            report.listing,
            Some(vec!["bifold-wallet".to_string(), "leather-belt".to_string()])
        );

        let script = r#"{"op": "browse", "sort": "cheapest"}"#;
        let report = replay(&mut session, script.as_bytes()).unwrap();
        assert_eq!(report.rejected[0].code, "INVALID_JSON");
    }

    #[test]
    fn test_account_form_commands() {
        let script = concat!(
            "{\"op\": \"sign_up\", \"email\": \"ada@example.com\", \"password\": \"Saddle#2024\", \"confirm_password\": \"Saddle#2024\"}\n",
            "{\"op\": \"sign_up\", \"email\": \"not-an-email\", \"password\": \"Saddle#2024\", \"confirm_password\": \"Saddle#2024\"}\n",
            "{\"op\": \"forgot_password\", \"email\": \"ada@example.com\"}\n",
            "{\"op\": \"reset_password\", \"password\": \"short\", \"confirm_password\": \"short\"}\n",
            "{\"op\": \"verify_code\", \"code\": \"482 913\"}\n",
            "{\"op\": \"verify_code\", \"code\": \"48291\"}\n",
        );
        let mut session = session();
        let report = replay(&mut session, script.as_bytes()).unwrap();

        assert_eq!(report.applied, 3);
        let lines: Vec<usize> = report.rejected.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 4, 6]);
        assert!(report.rejected.iter().all(|r| r.code == "VALIDATION_ERROR"));
        assert!(!session.can_undo());
    }
}
