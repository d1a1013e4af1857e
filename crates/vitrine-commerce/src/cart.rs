//! Cart container and line item types.
//!
//! The cart is owned by the surrounding shell and injected into the
//! checkout pipeline through the [`CartController`] trait. Every mutation
//! bumps a monotonically increasing revision counter; staged coupon
//! discounts are keyed on the revision they were validated against.

use crate::error::CommerceError;
use crate::ids::{CartId, LineItemId, ProductId, VariantId};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 999;

/// Read/clear access to the cart, as seen by the checkout pipeline.
///
/// The pipeline never adds items; it reads contents for order assembly
/// and clears/closes the cart after a successful submission.
pub trait CartController {
    /// Items currently in the cart.
    fn items(&self) -> &[LineItem];

    /// Sum of line totals.
    fn subtotal(&self) -> Result<Money, CommerceError>;

    /// The cart's currency.
    fn currency(&self) -> Currency;

    /// Revision counter, bumped on every mutation.
    fn revision(&self) -> u64;

    /// Check if the cart has no items.
    fn is_empty(&self) -> bool;

    /// Remove all items.
    fn clear(&mut self);

    /// Close the cart UI / end the cart's life for this session.
    fn close(&mut self);
}

/// A shopping cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Unique cart identifier.
    pub id: CartId,
    /// Items in the cart.
    pub items: Vec<LineItem>,
    /// Cart currency.
    pub currency: Currency,
    /// Mutation counter.
    revision: u64,
    /// Whether the cart has been closed.
    closed: bool,
}

impl Cart {
    /// Create a new empty cart.
    pub fn new(currency: Currency) -> Self {
        Self {
            id: CartId::generate(),
            items: Vec::new(),
            currency,
            revision: 0,
            closed: false,
        }
    }

    /// Add an item to the cart, merging with an existing line for the
    /// same variant.
    pub fn add_item(
        &mut self,
        variant_id: VariantId,
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Result<LineItemId, CommerceError> {
        if self.closed {
            return Err(CommerceError::CartClosed);
        }
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if unit_price.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: unit_price.currency.code().to_string(),
            });
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.variant_id == variant_id) {
            let new_quantity = existing
                .quantity
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            if new_quantity > MAX_QUANTITY_PER_ITEM {
                return Err(CommerceError::QuantityExceedsLimit(
                    new_quantity,
                    MAX_QUANTITY_PER_ITEM,
                ));
            }
            existing.quantity = new_quantity;
            existing.update_total()?;
            let existing_id = existing.id.clone();
            self.touch();
            return Ok(existing_id);
        }

        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let item = LineItem::new(variant_id, product_id, product_name, quantity, unit_price)?;
        let id = item.id.clone();
        self.items.push(item);
        self.touch();
        Ok(id)
    }

    /// Update a line item's quantity. Quantity <= 0 removes the item.
    pub fn update_quantity(
        &mut self,
        line_item_id: &LineItemId,
        quantity: i64,
    ) -> Result<(), CommerceError> {
        if self.closed {
            return Err(CommerceError::CartClosed);
        }
        if quantity <= 0 {
            self.remove_item(line_item_id)?;
            return Ok(());
        }
        if quantity > MAX_QUANTITY_PER_ITEM {
            return Err(CommerceError::QuantityExceedsLimit(
                quantity,
                MAX_QUANTITY_PER_ITEM,
            ));
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| &i.id == line_item_id)
            .ok_or_else(|| CommerceError::ItemNotInCart(line_item_id.to_string()))?;
        item.quantity = quantity;
        item.update_total()?;
        self.touch();
        Ok(())
    }

    /// Remove a line item.
    pub fn remove_item(&mut self, line_item_id: &LineItemId) -> Result<(), CommerceError> {
        if self.closed {
            return Err(CommerceError::CartClosed);
        }
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != line_item_id);
        if self.items.len() == len_before {
            return Err(CommerceError::ItemNotInCart(line_item_id.to_string()));
        }
        self.touch();
        Ok(())
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Check if the cart has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

impl CartController for Cart {
    fn items(&self) -> &[LineItem] {
        &self.items
    }

    fn subtotal(&self) -> Result<Money, CommerceError> {
        Money::try_sum(self.items.iter().map(|i| &i.total_price), self.currency)
            .ok_or(CommerceError::Overflow)
    }

    fn currency(&self) -> Currency {
        self.currency
    }

    fn revision(&self) -> u64 {
        self.revision
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn clear(&mut self) {
        self.items.clear();
        self.touch();
    }

    fn close(&mut self) {
        self.closed = true;
        self.touch();
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Unique line item identifier.
    pub id: LineItemId,
    /// Variant being purchased.
    pub variant_id: VariantId,
    /// Product ID.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub product_name: String,
    /// Quantity.
    pub quantity: i64,
    /// Unit price.
    pub unit_price: Money,
    /// Total price (unit_price * quantity).
    pub total_price: Money,
}

impl LineItem {
    /// Create a new line item.
    pub fn new(
        variant_id: VariantId,
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Result<Self, CommerceError> {
        let total_price = unit_price
            .try_multiply(quantity)
            .ok_or(CommerceError::Overflow)?;
        Ok(Self {
            id: LineItemId::generate(),
            variant_id,
            product_id,
            product_name: product_name.into(),
            quantity,
            unit_price,
            total_price,
        })
    }

    /// Recompute the line total from the current quantity.
    pub fn update_total(&mut self) -> Result<(), CommerceError> {
        self.total_price = self
            .unit_price
            .try_multiply(self.quantity)
            .ok_or(CommerceError::Overflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart_with_item(quantity: i64) -> (Cart, LineItemId) {
        let mut cart = Cart::new(Currency::EUR);
        let id = cart
            .add_item(
                VariantId::new("var-1"),
                ProductId::new("prod-1"),
                "Linen Tablecloth",
                quantity,
                Money::new(4500, Currency::EUR),
            )
            .unwrap();
        (cart, id)
    }

    #[test]
    fn test_add_item() {
        let (cart, _) = cart_with_item(2);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.subtotal().unwrap().amount_cents, 9000);
    }

    #[test]
    fn test_add_same_variant_merges() {
        let (mut cart, _) = cart_with_item(1);
        cart.add_item(
            VariantId::new("var-1"),
            ProductId::new("prod-1"),
            "Linen Tablecloth",
            2,
            Money::new(4500, Currency::EUR),
        )
        .unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_mutations_bump_revision() {
        let (mut cart, line_id) = cart_with_item(1);
        let rev = cart.revision();

        cart.update_quantity(&line_id, 3).unwrap();
        assert!(cart.revision() > rev);

        let rev = cart.revision();
        cart.clear();
        assert!(cart.revision() > rev);
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let mut cart = Cart::new(Currency::EUR);
        let result = cart.add_item(
            VariantId::new("var-1"),
            ProductId::new("prod-1"),
            "Linen Tablecloth",
            1,
            Money::new(4500, Currency::USD),
        );
        assert!(matches!(
            result,
            Err(CommerceError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_quantity_limits() {
        let mut cart = Cart::new(Currency::EUR);
        assert!(cart
            .add_item(
                VariantId::new("var-1"),
                ProductId::new("prod-1"),
                "Linen Tablecloth",
                0,
                Money::new(4500, Currency::EUR),
            )
            .is_err());
        assert!(cart
            .add_item(
                VariantId::new("var-1"),
                ProductId::new("prod-1"),
                "Linen Tablecloth",
                MAX_QUANTITY_PER_ITEM + 1,
                Money::new(4500, Currency::EUR),
            )
            .is_err());
    }

    #[test]
    fn test_closed_cart_rejects_mutation() {
        let (mut cart, line_id) = cart_with_item(1);
        cart.close();
        assert!(cart.is_closed());
        assert!(matches!(
            cart.update_quantity(&line_id, 2),
            Err(CommerceError::CartClosed)
        ));
    }

    #[test]
    fn test_remove_unknown_item() {
        let (mut cart, _) = cart_with_item(1);
        let result = cart.remove_item(&LineItemId::new("missing"));
        assert!(matches!(result, Err(CommerceError::ItemNotInCart(_))));
    }
}
