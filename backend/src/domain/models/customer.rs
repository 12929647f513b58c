//! Domain model for a bank customer.
use rust_decimal::Decimal;

use super::account::Account;
use super::recipient::Recipient;

/// Editable profile of a customer.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// A customer together with the accounts and recipients it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: i64,
    pub details: CustomerDetails,
    pub accounts: Vec<Account>,
    pub recipients: Vec<Recipient>,
}

impl Customer {
    pub fn account(&self, account_id: i64) -> Option<&Account> {
        self.accounts.iter().find(|a| a.id == account_id)
    }

    pub fn owns_account(&self, account_id: i64) -> bool {
        self.account(account_id).is_some()
    }

    pub fn recipient(&self, recipient_id: i64) -> Option<&Recipient> {
        self.recipients.iter().find(|r| r.id == recipient_id)
    }

    /// Whether one of the customer's saved recipients points at `account_number`
    pub fn has_recipient_for(&self, account_number: i64) -> bool {
        self.recipients.iter().any(|r| r.account_number == account_number)
    }

    /// Sum of the balances of every account the customer owns
    pub fn total_balance(&self) -> Decimal {
        self.accounts.iter().map(|a| a.balance).sum()
    }
}
