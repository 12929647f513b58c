//! Errors raised by the domain services.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BankError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(i64),

    #[error("Account not found: {0}")]
    AccountNotFound(i64),

    #[error("Recipient not found: {0}")]
    RecipientNotFound(i64),

    #[error("Invalid transaction: {0}")]
    TransactionInvalid(String),

    #[error("Association exists: {0}")]
    AssociationExists(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl BankError {
    pub fn transaction_invalid(message: impl Into<String>) -> Self {
        BankError::TransactionInvalid(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        BankError::Validation(message.into())
    }

    /// Short machine readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            BankError::CustomerNotFound(_) => "customer_not_found",
            BankError::AccountNotFound(_) => "account_not_found",
            BankError::RecipientNotFound(_) => "recipient_not_found",
            BankError::TransactionInvalid(_) => "transaction_invalid",
            BankError::AssociationExists(_) => "association_exists",
            BankError::Validation(_) => "validation_failed",
            BankError::Storage(_) => "storage_error",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            BankError::CustomerNotFound(_) | BankError::AccountNotFound(_) | BankError::RecipientNotFound(_)
        )
    }
}

pub type BankResult<T> = std::result::Result<T, BankError>;
