//! # SQLite Storage Module
//!
//! Durable storage backed by SQLite through SQLx. Balances are kept as
//! integer cents so that no floating point ever touches money.

pub mod account_repository;
pub mod connection;
pub mod customer_repository;
pub mod recipient_repository;

pub use account_repository::AccountRepository as SqliteAccountRepository;
pub use connection::SqliteConnection;
pub use customer_repository::CustomerRepository as SqliteCustomerRepository;
pub use recipient_repository::RecipientRepository as SqliteRecipientRepository;

use anyhow::{anyhow, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Convert a money amount to the integer cents stored in the database
pub(crate) fn to_cents(amount: Decimal) -> Result<i64> {
    let cents = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| anyhow!("Amount {} is out of range", amount))?;
    if cents.fract() != Decimal::ZERO {
        return Err(anyhow!("Amount {} has more than two decimal places", amount));
    }
    cents
        .to_i64()
        .ok_or_else(|| anyhow!("Amount {} is out of range", amount))
}

pub(crate) fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_cents_conversion() {
        assert_eq!(to_cents(dec!(10.50)).unwrap(), 1050);
        assert_eq!(to_cents(dec!(0)).unwrap(), 0);
        assert_eq!(to_cents(dec!(-3.2)).unwrap(), -320);
        assert_eq!(from_cents(1050), dec!(10.5));
        assert!(to_cents(dec!(0.001)).is_err());
        assert_eq!(to_cents(dec!(92233720368547758.07)).unwrap(), i64::MAX);
        assert!(to_cents(dec!(92233720368547758.08)).is_err());
        assert!(to_cents(Decimal::MAX).is_err());
    }
}
