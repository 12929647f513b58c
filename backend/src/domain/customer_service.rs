//! Customer service domain logic: customers and the accounts and recipients they own.
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};

use super::{
    commands::{
        account::OpenAccountCommand,
        customer::{CreateCustomerCommand, UpdateCustomerCommand},
        recipient::SaveRecipientCommand,
    },
    error::{BankError, BankResult},
    ledger_lock::LedgerLock,
    models::{
        account::{parse_money, Account, AccountType, SAVINGS_MIN_BALANCE},
        customer::{Customer, CustomerDetails},
        recipient::{Recipient, RecipientDetails},
    },
};
use crate::storage::{AccountStorage, Connection, CustomerStorage, RecipientStorage};

const MAX_NAME_LENGTH: usize = 64;

#[derive(Clone)]
pub struct CustomerService<C: Connection> {
    customer_repository: C::CustomerRepository,
    account_repository: C::AccountRepository,
    recipient_repository: C::RecipientRepository,
    lock: LedgerLock,
}

impl<C: Connection> CustomerService<C> {
    pub fn new(connection: Arc<C>, lock: LedgerLock) -> Self {
        Self {
            customer_repository: connection.create_customer_repository(),
            account_repository: connection.create_account_repository(),
            recipient_repository: connection.create_recipient_repository(),
            lock,
        }
    }

    /// Get a customer with its accounts and recipients
    pub async fn get_customer(&self, customer_id: i64) -> BankResult<Customer> {
        info!("Getting customer: {}", customer_id);
        self.customer_repository
            .get_customer(customer_id)
            .await?
            .ok_or(BankError::CustomerNotFound(customer_id))
    }

    pub async fn list_customers(&self) -> BankResult<Vec<Customer>> {
        let customers = self.customer_repository.list_customers().await?;
        info!("Found {} customers", customers.len());
        Ok(customers)
    }

    /// Total balance over all accounts of a customer
    pub async fn get_balance(&self, customer_id: i64) -> BankResult<Decimal> {
        Ok(self.get_customer(customer_id).await?.total_balance())
    }

    pub async fn create_customer(&self, command: CreateCustomerCommand) -> BankResult<Customer> {
        info!(
            "Creating customer: {} {}",
            command.details.first_name, command.details.last_name
        );

        let details = normalize_customer(command.details)?;

        let _guard = self.lock.acquire().await;
        let id = self.customer_repository.insert_customer(&details).await?;

        info!("Created customer with ID: {}", id);
        Ok(Customer {
            id,
            details,
            accounts: Vec::new(),
            recipients: Vec::new(),
        })
    }

    /// Replace the profile of a customer; accounts and recipients are untouched
    pub async fn update_customer(&self, customer_id: i64, command: UpdateCustomerCommand) -> BankResult<Customer> {
        info!("Updating customer: {}", customer_id);

        if let Some(body_id) = command.id {
            if body_id != customer_id {
                return Err(BankError::validation(format!(
                    "Customer id {} does not match path id {}",
                    body_id, customer_id
                )));
            }
        }
        let details = normalize_customer(command.details)?;

        let _guard = self.lock.acquire().await;
        if !self.customer_repository.update_customer(customer_id, &details).await? {
            warn!("Customer not found for update: {}", customer_id);
            return Err(BankError::CustomerNotFound(customer_id));
        }

        self.get_customer(customer_id).await
    }

    /// Delete a customer and its recipients. Customers still owning accounts are kept.
    pub async fn delete_customer(&self, customer_id: i64) -> BankResult<()> {
        info!("Deleting customer: {}", customer_id);

        let _guard = self.lock.acquire().await;
        let customer = self.get_customer(customer_id).await?;

        if !customer.accounts.is_empty() {
            warn!(
                "Refusing to delete customer {} with {} open accounts",
                customer_id,
                customer.accounts.len()
            );
            return Err(BankError::AssociationExists(format!(
                "customer {} still owns {} account(s)",
                customer_id,
                customer.accounts.len()
            )));
        }

        self.customer_repository.delete_customer(customer_id).await?;
        info!("Deleted customer: {}", customer_id);
        Ok(())
    }

    pub async fn list_accounts(&self, customer_id: i64) -> BankResult<Vec<Account>> {
        Ok(self.get_customer(customer_id).await?.accounts)
    }

    /// Get one of the customer's accounts
    pub async fn get_account(&self, customer_id: i64, account_id: i64) -> BankResult<Account> {
        self.get_customer(customer_id)
            .await?
            .account(account_id)
            .cloned()
            .ok_or(BankError::AccountNotFound(account_id))
    }

    pub async fn open_account(&self, customer_id: i64, command: OpenAccountCommand) -> BankResult<Account> {
        info!(
            "Opening {} account for customer {} with {}",
            command.account_type, customer_id, command.initial_amount
        );

        let _guard = self.lock.acquire().await;
        self.get_customer(customer_id).await?;

        let initial_amount = parse_money(&command.initial_amount).ok_or_else(|| {
            BankError::transaction_invalid(format!("initial amount '{}' is not valid", command.initial_amount))
        })?;

        if command.account_type == AccountType::Savings && initial_amount < SAVINGS_MIN_BALANCE {
            warn!("Savings account for customer {} below minimum: {}", customer_id, initial_amount);
            return Err(BankError::transaction_invalid(format!(
                "savings accounts require at least {}",
                SAVINGS_MIN_BALANCE
            )));
        }

        let id = self
            .account_repository
            .insert_account(customer_id, command.account_type, initial_amount)
            .await?;

        info!("Opened account {} for customer {}", id, customer_id);
        Ok(Account {
            id,
            customer_id,
            account_type: command.account_type,
            balance: initial_amount,
        })
    }

    /// Close an account; only accounts with a zero balance can be closed
    pub async fn close_account(&self, customer_id: i64, account_id: i64) -> BankResult<()> {
        info!("Closing account {} of customer {}", account_id, customer_id);

        let _guard = self.lock.acquire().await;
        self.get_customer(customer_id).await?;

        let account = self
            .account_repository
            .get_account(account_id)
            .await?
            .filter(|a| a.is_owned_by(customer_id))
            .ok_or(BankError::AccountNotFound(account_id))?;

        if account.balance != Decimal::ZERO {
            warn!("Account {} still holds {}", account_id, account.balance);
            return Err(BankError::transaction_invalid(format!(
                "account {} must have a zero balance to be closed, current balance is {}",
                account_id, account.balance
            )));
        }

        self.account_repository.delete_account(account_id).await?;
        info!("Closed account {}", account_id);
        Ok(())
    }

    pub async fn list_recipients(&self, customer_id: i64) -> BankResult<Vec<Recipient>> {
        Ok(self.get_customer(customer_id).await?.recipients)
    }

    /// Save a new recipient for a customer
    pub async fn add_recipient(&self, customer_id: i64, command: SaveRecipientCommand) -> BankResult<Recipient> {
        info!(
            "Adding recipient for customer {} on account {}",
            customer_id, command.details.account_number
        );

        let details = normalize_recipient(command.details)?;

        let _guard = self.lock.acquire().await;
        let customer = self.get_customer(customer_id).await?;
        self.check_recipient_account(&customer, details.account_number, None).await?;

        let id = self.recipient_repository.insert_recipient(customer_id, &details).await?;

        info!("Added recipient {} for customer {}", id, customer_id);
        Ok(Recipient::from_details(id, customer_id, details))
    }

    pub async fn update_recipient(
        &self,
        customer_id: i64,
        recipient_id: i64,
        command: SaveRecipientCommand,
    ) -> BankResult<Recipient> {
        info!("Updating recipient {} of customer {}", recipient_id, customer_id);

        let details = normalize_recipient(command.details)?;

        let _guard = self.lock.acquire().await;
        let customer = self.get_customer(customer_id).await?;
        if customer.recipient(recipient_id).is_none() {
            return Err(BankError::RecipientNotFound(recipient_id));
        }
        self.check_recipient_account(&customer, details.account_number, Some(recipient_id))
            .await?;

        let recipient = Recipient::from_details(recipient_id, customer_id, details);
        self.recipient_repository.update_recipient(&recipient).await?;
        Ok(recipient)
    }

    pub async fn remove_recipient(&self, customer_id: i64, recipient_id: i64) -> BankResult<()> {
        info!("Removing recipient {} of customer {}", recipient_id, customer_id);

        let _guard = self.lock.acquire().await;
        self.get_customer(customer_id).await?;

        let owned = self
            .recipient_repository
            .get_recipient(recipient_id)
            .await?
            .is_some_and(|r| r.is_owned_by(customer_id));
        if !owned {
            warn!("Recipient {} not found for customer {}", recipient_id, customer_id);
            return Err(BankError::RecipientNotFound(recipient_id));
        }

        self.recipient_repository.delete_recipient(recipient_id).await?;
        Ok(())
    }

    /// A recipient must point at an existing account of somebody else,
    /// not already saved under another recipient of the same customer.
    async fn check_recipient_account(
        &self,
        customer: &Customer,
        account_number: i64,
        editing: Option<i64>,
    ) -> BankResult<()> {
        if customer.owns_account(account_number)
            || self.account_repository.get_account(account_number).await?.is_none()
        {
            warn!(
                "Customer {} cannot add recipient for account {}",
                customer.id, account_number
            );
            return Err(BankError::AccountNotFound(account_number));
        }

        let duplicate = customer
            .recipients
            .iter()
            .any(|r| r.account_number == account_number && Some(r.id) != editing);
        if duplicate {
            return Err(BankError::AssociationExists(format!(
                "account {} is already a recipient of customer {}",
                account_number, customer.id
            )));
        }

        Ok(())
    }
}

fn normalize_customer(details: CustomerDetails) -> BankResult<CustomerDetails> {
    let details = CustomerDetails {
        first_name: details.first_name.trim().to_string(),
        last_name: details.last_name.trim().to_string(),
        email: details.email.trim().to_string(),
        phone: details.phone.trim().to_string(),
    };

    validate_name("First name", &details.first_name)?;
    validate_name("Last name", &details.last_name)?;
    if !is_valid_email(&details.email) {
        return Err(BankError::validation(format!("Email '{}' is not valid", details.email)));
    }
    if !is_valid_phone(&details.phone) {
        return Err(BankError::validation(format!("Phone '{}' is not valid", details.phone)));
    }

    Ok(details)
}

fn normalize_recipient(details: RecipientDetails) -> BankResult<RecipientDetails> {
    let blank_to_none = |value: Option<String>| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let details = RecipientDetails {
        account_number: details.account_number,
        name: details.name.trim().to_string(),
        email: blank_to_none(details.email),
        phone: blank_to_none(details.phone),
        description: blank_to_none(details.description),
    };

    validate_name("Recipient name", &details.name)?;
    if let Some(email) = &details.email {
        if !is_valid_email(email) {
            return Err(BankError::validation(format!("Email '{}' is not valid", email)));
        }
    }
    if let Some(phone) = &details.phone {
        if !is_valid_phone(phone) {
            return Err(BankError::validation(format!("Phone '{}' is not valid", phone)));
        }
    }

    Ok(details)
}

fn validate_name(field: &str, value: &str) -> BankResult<()> {
    if value.is_empty() {
        return Err(BankError::validation(format!("{} is mandatory", field)));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(BankError::validation(format!(
            "{} cannot exceed {} characters",
            field, MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

/// Optional leading `+`, then 9 to 16 digits; spaces and dashes are ignored
fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| *c != ' ' && *c != '-').collect();
    let digits = compact.strip_prefix('+').unwrap_or(&compact);
    (9..=16).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit())
}
