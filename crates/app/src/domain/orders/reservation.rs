//! Stock reservation for a single order.
//!
//! Lines are checked one at a time, in the order they were requested, against
//! the running quantity of each product. Nothing here touches the database:
//! the ledger only decides whether an order fits and what it would leave
//! behind, so a rejected order never writes anything.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::domain::{
    orders::{errors::OrdersServiceError, models::NewOrderLine},
    products::models::{Product, ProductId},
};

/// A line that fits within the available stock, priced at reservation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReservedLine {
    pub product_id: ProductId,
    pub quantity: u32,
    pub price: Decimal,
}

impl ReservedLine {
    /// Captured unit price times quantity.
    pub(crate) fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Outcome of reserving every line of an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Reservation {
    pub lines: Vec<ReservedLine>,
    pub total_amount: Decimal,

    /// New on-hand quantity of every product the order touches, by ascending id.
    pub remaining: Vec<(ProductId, u32)>,
}

#[derive(Debug)]
struct Entry {
    name: String,
    price: Decimal,
    on_hand: u32,
    touched: bool,
}

/// Running view of the stock held by a set of products.
#[derive(Debug, Default)]
pub(crate) struct StockReservation {
    entries: FxHashMap<ProductId, Entry>,
}

impl StockReservation {
    pub(crate) fn new(products: impl IntoIterator<Item = Product>) -> Self {
        let entries = products
            .into_iter()
            .map(|product| {
                (
                    product.id,
                    Entry {
                        name: product.name,
                        price: product.price,
                        on_hand: product.quantity,
                        touched: false,
                    },
                )
            })
            .collect();

        Self { entries }
    }

    /// Take `line.quantity` units of the line's product out of the ledger.
    ///
    /// # Errors
    ///
    /// - [`OrdersServiceError::ProductNotFound`] when the ledger has no such product.
    /// - [`OrdersServiceError::InsufficientStock`] when fewer units remain than requested.
    pub(crate) fn reserve(&mut self, line: NewOrderLine) -> Result<ReservedLine, OrdersServiceError> {
        let entry = self
            .entries
            .get_mut(&line.product_id)
            .ok_or(OrdersServiceError::ProductNotFound(line.product_id))?;

        let Some(left) = entry.on_hand.checked_sub(line.quantity) else {
            return Err(OrdersServiceError::InsufficientStock {
                product: line.product_id,
                name: entry.name.clone(),
            });
        };

        entry.on_hand = left;
        entry.touched = true;

        Ok(ReservedLine {
            product_id: line.product_id,
            quantity: line.quantity,
            price: entry.price,
        })
    }

    /// Reserve every line in order, stopping at the first that does not fit.
    ///
    /// # Errors
    ///
    /// Returns the error of the first line that cannot be reserved.
    pub(crate) fn reserve_all(
        mut self,
        lines: &[NewOrderLine],
    ) -> Result<Reservation, OrdersServiceError> {
        let lines = lines
            .iter()
            .map(|line| self.reserve(*line))
            .collect::<Result<Vec<_>, _>>()?;

        let total_amount = lines.iter().map(ReservedLine::line_total).sum();

        let mut remaining: Vec<(ProductId, u32)> = self
            .entries
            .into_iter()
            .filter(|(_, entry)| entry.touched)
            .map(|(id, entry)| (id, entry.on_hand))
            .collect();

        remaining.sort_unstable_by_key(|(id, _)| *id);

        Ok(Reservation {
            lines,
            total_amount,
            remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use testresult::TestResult;

    use super::*;

    fn product(id: i64, name: &str, price: Decimal, quantity: u32) -> Product {
        Product {
            id: ProductId::from_i64(id),
            name: name.to_string(),
            description: String::new(),
            price,
            quantity,
            category: String::new(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn line(id: i64, quantity: u32) -> NewOrderLine {
        NewOrderLine {
            product_id: ProductId::from_i64(id),
            quantity,
        }
    }

    #[test]
    fn line_total_multiplies_captured_price() {
        let line = ReservedLine {
            product_id: ProductId::from_i64(1),
            quantity: 3,
            price: Decimal::new(2_50, 2),
        };

        assert_eq!(line.line_total(), Decimal::new(7_50, 2));
    }

    #[test]
    fn single_line_within_stock_prices_and_decrements() -> TestResult {
        let ledger = StockReservation::new([product(1, "X", Decimal::new(100_00, 2), 10)]);

        let reservation = ledger.reserve_all(&[line(1, 3)])?;

        assert_eq!(reservation.total_amount, Decimal::new(300_00, 2));
        assert_eq!(reservation.remaining, vec![(ProductId::from_i64(1), 7)]);
        assert_eq!(
            reservation.lines,
            vec![ReservedLine {
                product_id: ProductId::from_i64(1),
                quantity: 3,
                price: Decimal::new(100_00, 2),
            }]
        );

        Ok(())
    }

    #[test]
    fn ordering_entire_stock_leaves_zero() -> TestResult {
        let ledger = StockReservation::new([product(1, "X", Decimal::ONE, 5)]);

        let reservation = ledger.reserve_all(&[line(1, 5)])?;

        assert_eq!(reservation.remaining, vec![(ProductId::from_i64(1), 0)]);

        Ok(())
    }

    #[test]
    fn line_exceeding_stock_names_the_product() {
        let ledger = StockReservation::new([product(1, "Y", Decimal::ONE, 5)]);

        let result = ledger.reserve_all(&[line(1, 6)]);

        assert!(
            matches!(
                &result,
                Err(OrdersServiceError::InsufficientStock { name, .. }) if name == "Y"
            ),
            "expected InsufficientStock, got {result:?}"
        );
    }

    #[test]
    fn repeated_product_is_checked_against_running_quantity() {
        let ledger = StockReservation::new([product(1, "X", Decimal::ONE, 10)]);

        let result = ledger.reserve_all(&[line(1, 6), line(1, 6)]);

        assert!(
            matches!(result, Err(OrdersServiceError::InsufficientStock { .. })),
            "second line should not fit in the 4 left, got {result:?}"
        );
    }

    #[test]
    fn repeated_product_within_stock_compounds() -> TestResult {
        let ledger = StockReservation::new([product(1, "X", Decimal::new(2, 0), 10)]);

        let reservation = ledger.reserve_all(&[line(1, 4), line(1, 6)])?;

        assert_eq!(reservation.remaining, vec![(ProductId::from_i64(1), 0)]);
        assert_eq!(reservation.total_amount, Decimal::new(20, 0));
        assert_eq!(reservation.lines.len(), 2);

        Ok(())
    }

    #[test]
    fn unknown_product_is_not_found() {
        let ledger = StockReservation::new([product(1, "X", Decimal::ONE, 10)]);

        let result = ledger.reserve_all(&[line(1, 1), line(999, 1)]);

        assert!(
            matches!(result, Err(OrdersServiceError::ProductNotFound(id)) if id.into_i64() == 999),
            "expected ProductNotFound, got {result:?}"
        );
    }

    #[test]
    fn first_failing_line_in_request_order_wins() {
        let ledger = StockReservation::new([product(1, "X", Decimal::ONE, 1)]);

        let result = ledger.reserve_all(&[line(1, 2), line(999, 1)]);

        assert!(
            matches!(result, Err(OrdersServiceError::InsufficientStock { .. })),
            "expected the stock failure of line one, got {result:?}"
        );
    }

    #[test]
    fn remaining_lists_only_touched_products_by_id() -> TestResult {
        let ledger = StockReservation::new([
            product(3, "C", Decimal::ONE, 9),
            product(1, "A", Decimal::ONE, 9),
            product(2, "B", Decimal::ONE, 9),
        ]);

        let reservation = ledger.reserve_all(&[line(3, 1), line(1, 2)])?;

        assert_eq!(
            reservation.remaining,
            vec![(ProductId::from_i64(1), 7), (ProductId::from_i64(3), 8)]
        );

        Ok(())
    }

    #[test]
    fn total_sums_each_line_at_its_own_price() -> TestResult {
        let ledger = StockReservation::new([
            product(1, "Laptop", Decimal::new(1299_99, 2), 10),
            product(2, "Keyboard", Decimal::new(120_00, 2), 25),
        ]);

        let reservation = ledger.reserve_all(&[line(1, 2), line(2, 3)])?;

        assert_eq!(reservation.total_amount, Decimal::new(2959_98, 2));

        Ok(())
    }
}
