//! Domain model for a bank account.
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

use crate::domain::error::{BankError, BankResult};

/// Balance a savings account must never drop below.
pub const SAVINGS_MIN_BALANCE: Decimal = Decimal::ONE_HUNDRED;

/// Number of fractional digits money values may carry.
pub const MONEY_SCALE: u32 = 2;

/// Largest amount any balance or money operation may reach: `i64::MAX` cents.
pub fn max_money() -> Decimal {
    Decimal::new(i64::MAX, MONEY_SCALE)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountType {
    Checking,
    Savings,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "CHECKING",
            AccountType::Savings => "SAVINGS",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CHECKING" => Ok(AccountType::Checking),
            "SAVINGS" => Ok(AccountType::Savings),
            other => Err(anyhow::anyhow!("Unknown account type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: i64,
    pub customer_id: i64,
    pub account_type: AccountType,
    pub balance: Decimal,
}

impl Account {
    /// Whether cash can be taken out of this account
    pub fn can_withdraw(&self) -> bool {
        self.account_type == AccountType::Checking
    }

    /// The credited balance must stay within [`max_money`]
    pub fn can_credit(&self, amount: Decimal) -> bool {
        amount > Decimal::ZERO
            && self
                .balance
                .checked_add(amount)
                .is_some_and(|balance| balance <= max_money())
    }

    pub fn can_debit(&self, amount: Decimal) -> bool {
        if amount <= Decimal::ZERO || amount > max_money() || amount > self.balance {
            return false;
        }
        match self.account_type {
            AccountType::Checking => true,
            AccountType::Savings => self.balance - amount >= SAVINGS_MIN_BALANCE,
        }
    }

    pub fn credit(&mut self, amount: Decimal) -> BankResult<()> {
        self.balance = self
            .balance
            .checked_add(amount)
            .filter(|balance| *balance <= max_money())
            .ok_or_else(|| BankError::transaction_invalid(format!("crediting {} overflows account {}", amount, self.id)))?;
        Ok(())
    }

    pub fn debit(&mut self, amount: Decimal) -> BankResult<()> {
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or_else(|| BankError::transaction_invalid(format!("debiting {} overflows account {}", amount, self.id)))?;
        Ok(())
    }

    pub fn is_owned_by(&self, customer_id: i64) -> bool {
        self.customer_id == customer_id
    }
}

/// True when `amount` has no more than two fractional digits.
pub fn has_money_scale(amount: Decimal) -> bool {
    amount.normalize().scale() <= MONEY_SCALE
}

/// Parse a user supplied money string such as `"150"` or `"$99.90"`.
///
/// Negative values, values with more than two decimals and values above
/// [`max_money`] are rejected.
pub fn parse_money(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    let amount = Decimal::from_str(digits).ok()?;
    if amount < Decimal::ZERO || amount > max_money() || !has_money_scale(amount) {
        return None;
    }
    Some(amount)
}
