use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of bank account a customer can open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountType {
    /// Everyday account, supports deposits, withdrawals and transfers
    Checking,
    /// Interest account, must keep a minimum balance and cannot be withdrawn from
    Savings,
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountType::Checking => write!(f, "CHECKING"),
            AccountType::Savings => write!(f, "SAVINGS"),
        }
    }
}

/// Customer profile as exchanged over the API.
///
/// `id` must be absent when creating a customer and, when present on update,
/// must match the id in the request path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Account representation.
///
/// Requests opening an account carry `initialAmount` as a money string
/// (optional leading `$`, at most two decimals); it is never echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub balance: Decimal,
    #[serde(default, skip_serializing)]
    pub initial_amount: Option<String>,
}

/// Saved payee of a customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientDto {
    #[serde(default)]
    pub id: Option<i64>,
    /// Id of the account money is sent to
    pub account_number: i64,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of deposit and withdraw requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoneyOperationRequest {
    pub amount: Decimal,
}

/// Move money from one of the customer's accounts to another account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub source_account_id: i64,
    pub destination_account_id: i64,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    /// Source account after the transfer
    pub source_account: AccountDto,
    pub destination_account_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBalanceResponse {
    pub customer_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// Error body returned with every 4xx/5xx produced by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
