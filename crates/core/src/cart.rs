//! Cart quantity rules and pricing.
//!
//! Prices are `NUMERIC(10,2)` in the database and [`Decimal`] in Rust; totals
//! are computed on read and never stored.

use rust_decimal::Decimal;

use crate::error::CoreError;

/// Largest quantity a single cart line may hold.
pub const MAX_ITEM_QUANTITY: i32 = 10_000;

/// Quantity used when an add-to-cart request omits it.
pub const DEFAULT_ADD_QUANTITY: i32 = 1;

/// Validate a quantity supplied by a client.
pub fn validate_quantity(quantity: i32) -> Result<i32, CoreError> {
    if quantity < 1 {
        return Err(CoreError::Validation(format!(
            "Quantity must be at least 1, got {quantity}"
        )));
    }
    if quantity > MAX_ITEM_QUANTITY {
        return Err(CoreError::Validation(format!(
            "Quantity must not exceed {MAX_ITEM_QUANTITY}, got {quantity}"
        )));
    }
    Ok(quantity)
}

/// Something that occupies a line in a cart.
pub trait CartLine {
    fn unit_price(&self) -> Decimal;
    fn quantity(&self) -> i32;

    /// `unit_price × quantity`, exact.
    fn subtotal(&self) -> Decimal {
        line_subtotal(self.unit_price(), self.quantity())
    }
}

/// Exact price of `quantity` units at `unit_price`.
pub fn line_subtotal(unit_price: Decimal, quantity: i32) -> Decimal {
    unit_price * Decimal::from(quantity)
}

/// Sum of the subtotals of every line.
pub fn cart_total<L: CartLine>(lines: &[L]) -> Decimal {
    lines.iter().map(CartLine::subtotal).sum()
}

/// Total number of units across all lines.
pub fn item_count<L: CartLine>(lines: &[L]) -> i64 {
    lines.iter().map(|l| i64::from(l.quantity())).sum()
}
