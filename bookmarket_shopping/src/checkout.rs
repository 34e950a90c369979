use rand::Rng;

use crate::api::{CartEntry, PaymentMethod, PaymentMethodDetails, ShippingOption, ShippingTier};

pub const TAX_RATE: f64 = 0.10;

/// Rounds to two decimals, the resolution every figure on a receipt has.
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn format_price(value: f64) -> String {
    format!("${:.2}", value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl OrderTotals {
    /// Sums price times quantity over the entries, applies the flat 10% tax.
    pub fn for_entries(entries: &[CartEntry]) -> Self {
        let subtotal = round_to_cents(
            entries
                .iter()
                .map(|entry| entry.book.price.amount() * f64::from(entry.quantity))
                .sum(),
        );
        let tax = round_to_cents(subtotal * TAX_RATE);
        let total = round_to_cents(subtotal + tax);
        Self {
            subtotal,
            tax,
            total,
        }
    }

    /// Final payable amount once the chosen shipping tier is added.
    pub fn payable_with_shipping(&self, shipping_price: f64) -> f64 {
        round_to_cents(self.total + shipping_price)
    }
}

impl ShippingTier {
    pub const ALL: [ShippingTier; 3] = [
        ShippingTier::Standard,
        ShippingTier::Express,
        ShippingTier::Overnight,
    ];

    pub fn option(self) -> ShippingOption {
        match self {
            ShippingTier::Standard => ShippingOption {
                id: self,
                name: "Standard Shipping".to_string(),
                price: 5.99,
                estimated_days: "5-7".to_string(),
                description: "Regular delivery with tracking".to_string(),
            },
            ShippingTier::Express => ShippingOption {
                id: self,
                name: "Express Shipping".to_string(),
                price: 12.99,
                estimated_days: "2-3".to_string(),
                description: "Fast delivery with priority tracking".to_string(),
            },
            ShippingTier::Overnight => ShippingOption {
                id: self,
                name: "Overnight Shipping".to_string(),
                price: 24.99,
                estimated_days: "1".to_string(),
                description: "Next day delivery".to_string(),
            },
        }
    }
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::CreditCard,
        PaymentMethod::Paypal,
        PaymentMethod::BankTransfer,
    ];

    pub fn details(self) -> PaymentMethodDetails {
        match self {
            PaymentMethod::CreditCard => PaymentMethodDetails {
                id: self,
                name: "Credit Card".to_string(),
                description: "Pay with Visa, Mastercard, or American Express".to_string(),
            },
            PaymentMethod::Paypal => PaymentMethodDetails {
                id: self,
                name: "PayPal".to_string(),
                description: "Pay securely with your PayPal account".to_string(),
            },
            PaymentMethod::BankTransfer => PaymentMethodDetails {
                id: self,
                name: "Bank Transfer".to_string(),
                description: "Direct bank transfer to our account".to_string(),
            },
        }
    }
}

/// Six digit order number, zero padded.
pub fn generate_order_id() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}

#[cfg(test)]
mod checkout_tests {
    use super::*;
    use crate::api::{BookRecord, Price};

    fn entry(book_id: i32, price: f64, quantity: u32) -> CartEntry {
        CartEntry {
            book: BookRecord {
                book_id,
                title: format!("Book {}", book_id),
                author: "Author".to_string(),
                category: "Fiction".to_string(),
                price: Price::new(price),
                description: "".to_string(),
                image_url: None,
                posted: false,
            },
            quantity,
        }
    }

    #[test]
    /// The worked receipt example:
    /// two copies at 10.00 plus one at 5.50 give subtotal 25.50,
    /// tax 2.55, total 28.05 and, with express shipping, payable 41.04
    fn test_order_totals_match_receipt_example() {
        let entries = vec![entry(1, 10.0, 2), entry(2, 5.5, 1)];

        let totals = OrderTotals::for_entries(&entries);
        assert_eq!(totals.subtotal, 25.50);
        assert_eq!(totals.tax, 2.55);
        assert_eq!(totals.total, 28.05);

        let express = ShippingTier::Express.option();
        assert_eq!(totals.payable_with_shipping(express.price), 41.04);
    }

    #[test]
    fn test_total_is_subtotal_plus_tax() {
        let entries = vec![entry(1, 13.99, 3), entry(2, 0.99, 7), entry(3, 24.5, 1)];
        let totals = OrderTotals::for_entries(&entries);

        assert_eq!(totals.total, round_to_cents(totals.subtotal + totals.tax));
        assert_eq!(totals.tax, round_to_cents(totals.subtotal * TAX_RATE));
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let totals = OrderTotals::for_entries(&[]);
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.tax, 0.0);
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn test_format_price_renders_two_decimals() {
        assert_eq!(format_price(25.5), "$25.50");
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(12.99), "$12.99");
    }

    #[test]
    fn test_shipping_tiers_keep_fixed_prices() {
        assert_eq!(ShippingTier::Standard.option().price, 5.99);
        assert_eq!(ShippingTier::Express.option().price, 12.99);
        assert_eq!(ShippingTier::Overnight.option().price, 24.99);
        assert_eq!(ShippingTier::ALL.len(), 3);
    }

    #[test]
    fn test_order_id_is_six_digits() {
        for _ in 0..100 {
            let id = generate_order_id();
            assert_eq!(id.len(), 6);
            assert!(id.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
