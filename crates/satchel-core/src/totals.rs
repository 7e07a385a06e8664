//! # Order Totals
//!
//! Shipping, tax and grand total, derived from the cart on demand. Nothing
//! here is stored in [`StoreState`].
//!
//! ## Two Summaries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart page                          Checkout page                       │
//! │  ─────────                          ─────────────                       │
//! │  Subtotal      $189.00              Subtotal        $189.00             │
//! │  Shipping      FREE (> $150)        Shipping        $25.00 (express)    │
//! │  Tax (8%)      $15.12               Tax (8%)        $15.12              │
//! │  Total         $204.12              Total           $229.12             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::store::StoreState;
use crate::types::TaxRate;

// =============================================================================
// Pricing Policy
// =============================================================================

/// Store-wide pricing knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingPolicy {
    /// Sales tax applied to the subtotal.
    pub tax_rate: TaxRate,

    /// Cart subtotals strictly above this ship free.
    pub free_shipping_threshold: Money,

    /// Shipping charged on the cart page below the threshold.
    pub flat_shipping: Money,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            tax_rate: TaxRate::from_bps(800),
            free_shipping_threshold: Money::from_cents(15000),
            flat_shipping: Money::from_cents(1500),
        }
    }
}

impl PricingPolicy {
    /// Shipping estimate for the cart page.
    pub fn cart_shipping(&self, subtotal: Money) -> Money {
        if subtotal > self.free_shipping_threshold {
            Money::zero()
        } else {
            self.flat_shipping
        }
    }

    /// How much more the cart must reach before shipping is free, for the
    /// "Add $X more" banner. `None` once shipping is already free.
    pub fn amount_to_free_shipping(&self, subtotal: Money) -> Option<Money> {
        if subtotal > self.free_shipping_threshold {
            None
        } else {
            Some(self.free_shipping_threshold - subtotal)
        }
    }
}

// =============================================================================
// Shipping Method
// =============================================================================

/// Delivery speed picked during checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ShippingMethod {
    /// 5-7 business days.
    #[default]
    Standard,
    /// 2-3 business days.
    Express,
    /// Next business day.
    Overnight,
}

impl ShippingMethod {
    pub fn price(&self) -> Money {
        match self {
            ShippingMethod::Standard => Money::from_cents(1500),
            ShippingMethod::Express => Money::from_cents(2500),
            ShippingMethod::Overnight => Money::from_cents(4500),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShippingMethod::Standard => "Standard Shipping (5-7 business days)",
            ShippingMethod::Express => "Express Shipping (2-3 business days)",
            ShippingMethod::Overnight => "Overnight Shipping (1 business day)",
        }
    }
}

impl std::str::FromStr for ShippingMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(ShippingMethod::Standard),
            "express" => Ok(ShippingMethod::Express),
            "overnight" => Ok(ShippingMethod::Overnight),
            other => Err(format!(
                "Unknown shipping method: '{}'. Valid options: standard, express, overnight",
                other
            )),
        }
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// The money column of the cart and checkout pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderSummary {
    /// Sum of quantities.
    pub item_count: i64,
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

impl OrderSummary {
    /// Summary for the cart page: free shipping above the threshold,
    /// otherwise the flat rate.
    pub fn for_cart(state: &StoreState, policy: &PricingPolicy) -> Self {
        let subtotal = state.cart_subtotal();
        Self::build(state, subtotal, policy.cart_shipping(subtotal), policy)
    }

    /// Summary for checkout, where the chosen method sets shipping.
    pub fn for_checkout(
        state: &StoreState,
        method: ShippingMethod,
        policy: &PricingPolicy,
    ) -> Self {
        Self::build(state, state.cart_subtotal(), method.price(), policy)
    }

    fn build(
        state: &StoreState,
        subtotal: Money,
        shipping: Money,
        policy: &PricingPolicy,
    ) -> Self {
        let tax = subtotal.calculate_tax(policy.tax_rate);
        OrderSummary {
            item_count: state.cart_item_count(),
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{transition, Action};
    use crate::types::tests::test_product;

    fn cart_with(price_cents: i64, qty: i64) -> StoreState {
        transition(
            &StoreState::default(),
            Action::add_to_cart(test_product("P1", price_cents), qty),
        )
    }

    #[test]
    fn test_cart_summary_below_threshold() {
        let state = cart_with(5000, 2); // $100.00
        let summary = OrderSummary::for_cart(&state, &PricingPolicy::default());

        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.subtotal.cents(), 10000);
        assert_eq!(summary.shipping.cents(), 1500);
        assert_eq!(summary.tax.cents(), 800);
        assert_eq!(summary.total.cents(), 12300);
    }

    #[test]
    fn test_free_shipping_is_strictly_above_threshold() {
        let policy = PricingPolicy::default();

        let at_threshold = cart_with(5000, 3); // exactly $150.00
        let summary = OrderSummary::for_cart(&at_threshold, &policy);
        assert_eq!(summary.shipping.cents(), 1500);

        let above = cart_with(15001, 1);
        let summary = OrderSummary::for_cart(&above, &policy);
        assert!(summary.shipping.is_zero());
    }

    #[test]
    fn test_checkout_summary_uses_method_price() {
        let state = cart_with(18900, 1);
        let policy = PricingPolicy::default();

        let express = OrderSummary::for_checkout(&state, ShippingMethod::Express, &policy);
        assert_eq!(express.shipping.cents(), 2500);
        assert_eq!(express.tax.cents(), 1512);
        assert_eq!(express.total.cents(), 18900 + 2500 + 1512);

        // Checkout charges shipping even above the cart-page threshold.
        let standard = OrderSummary::for_checkout(&state, ShippingMethod::Standard, &policy);
        assert_eq!(standard.shipping.cents(), 1500);
    }

    #[test]
    fn test_amount_to_free_shipping() {
        let policy = PricingPolicy::default();
        assert_eq!(
            policy.amount_to_free_shipping(Money::from_cents(10000)),
            Some(Money::from_cents(5000))
        );
        // Exactly at the threshold still pays shipping.
        assert_eq!(
            policy.amount_to_free_shipping(Money::from_cents(15000)),
            Some(Money::zero())
        );
        assert_eq!(policy.amount_to_free_shipping(Money::from_cents(15001)), None);
    }

    #[test]
    fn test_summary_with_huge_quantity_does_not_overflow() {
        let state = cart_with(4500, 10_000_000_000_000_000);
        let policy = PricingPolicy::default();

        let summary = OrderSummary::for_cart(&state, &policy);
        assert_eq!(summary.item_count, 10_000_000_000_000_000);
        assert_eq!(summary.subtotal.cents(), i64::MAX);
        assert!(summary.shipping.is_zero());
        assert_eq!(summary.total.cents(), i64::MAX);

        let checkout = OrderSummary::for_checkout(&state, ShippingMethod::Overnight, &policy);
        assert_eq!(checkout.total.cents(), i64::MAX);
    }

    #[test]
    fn test_empty_cart_summary() {
        let summary = OrderSummary::for_cart(&StoreState::default(), &PricingPolicy::default());
        assert_eq!(summary.item_count, 0);
        assert!(summary.subtotal.is_zero());
        assert!(summary.tax.is_zero());
        assert_eq!(summary.total.cents(), 1500);
    }

    #[test]
    fn test_shipping_method_parsing() {
        assert_eq!(
            "Overnight".parse::<ShippingMethod>(),
            Ok(ShippingMethod::Overnight)
        );
        assert!("drone".parse::<ShippingMethod>().is_err());
        assert_eq!(ShippingMethod::default(), ShippingMethod::Standard);
        assert_eq!(ShippingMethod::Overnight.price().cents(), 4500);
    }
}
