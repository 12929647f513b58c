//! Money movement on accounts: deposits, withdrawals and transfers.
//!
//! Every operation re-reads the customer under the ledger lock, checks the
//! account rules and only then writes the new balances. A transfer writes
//! both balances through one atomic `update_balances` call.

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{info, warn};

use super::{
    commands::account::{MoneyCommand, TransferCommand},
    error::{BankError, BankResult},
    ledger_lock::LedgerLock,
    models::{
        account::{has_money_scale, max_money, Account},
        customer::Customer,
    },
};
use crate::storage::{AccountStorage, Connection, CustomerStorage};

#[derive(Clone)]
pub struct AccountService<C: Connection> {
    customer_repository: C::CustomerRepository,
    account_repository: C::AccountRepository,
    lock: LedgerLock,
}

impl<C: Connection> AccountService<C> {
    pub fn new(connection: Arc<C>, lock: LedgerLock) -> Self {
        Self {
            customer_repository: connection.create_customer_repository(),
            account_repository: connection.create_account_repository(),
            lock,
        }
    }

    /// Get an account by id, whoever owns it
    pub async fn get_account(&self, account_id: i64) -> BankResult<Account> {
        self.account_repository
            .get_account(account_id)
            .await?
            .ok_or(BankError::AccountNotFound(account_id))
    }

    pub async fn deposit(&self, command: MoneyCommand) -> BankResult<Account> {
        info!(
            "Depositing {} into account {} of customer {}",
            command.amount, command.account_id, command.customer_id
        );

        let _guard = self.lock.acquire().await;
        let mut account = self.owned_account(command.customer_id, command.account_id).await?;

        check_money_amount(command.amount)?;
        if !account.can_credit(command.amount) {
            warn!("Rejected deposit of {} into account {}", command.amount, account.id);
            return Err(BankError::transaction_invalid(format!(
                "cannot deposit {} into account {}",
                command.amount, account.id
            )));
        }

        account.credit(command.amount)?;
        self.account_repository.update_balance(account.id, account.balance).await?;

        info!("Account {} balance is now {}", account.id, account.balance);
        Ok(account)
    }

    pub async fn withdraw(&self, command: MoneyCommand) -> BankResult<Account> {
        info!(
            "Withdrawing {} from account {} of customer {}",
            command.amount, command.account_id, command.customer_id
        );

        let _guard = self.lock.acquire().await;
        let mut account = self.owned_account(command.customer_id, command.account_id).await?;

        if !account.can_withdraw() {
            warn!("Withdrawal attempted on {} account {}", account.account_type, account.id);
            return Err(BankError::transaction_invalid(format!(
                "withdrawals are not allowed on {} accounts",
                account.account_type
            )));
        }
        check_money_amount(command.amount)?;
        if !account.can_debit(command.amount) {
            warn!(
                "Rejected withdrawal of {} from account {} with balance {}",
                command.amount, account.id, account.balance
            );
            return Err(BankError::transaction_invalid(format!(
                "cannot withdraw {} from account {}",
                command.amount, account.id
            )));
        }

        account.debit(command.amount)?;
        self.account_repository.update_balance(account.id, account.balance).await?;

        info!("Account {} balance is now {}", account.id, account.balance);
        Ok(account)
    }

    /// Move money from one of the customer's accounts to another of their
    /// accounts or to the account of a saved recipient.
    ///
    /// Returns the source account after the transfer.
    pub async fn transfer(&self, command: TransferCommand) -> BankResult<Account> {
        info!(
            "Transferring {} from account {} to account {} for customer {}",
            command.amount, command.source_account_id, command.destination_account_id, command.customer_id
        );

        let _guard = self.lock.acquire().await;
        let customer = self.customer(command.customer_id).await?;

        if command.source_account_id == command.destination_account_id {
            return Err(BankError::transaction_invalid(
                "source and destination accounts must differ",
            ));
        }

        let mut source = customer
            .account(command.source_account_id)
            .cloned()
            .ok_or(BankError::AccountNotFound(command.source_account_id))?;
        let mut destination = self
            .transfer_destination(&customer, command.destination_account_id)
            .await?;

        check_money_amount(command.amount)?;
        if !source.can_debit(command.amount) {
            warn!(
                "Rejected transfer of {} from account {} with balance {}",
                command.amount, source.id, source.balance
            );
            return Err(BankError::transaction_invalid(format!(
                "cannot transfer {} from account {}",
                command.amount, source.id
            )));
        }
        if !destination.can_credit(command.amount) {
            return Err(BankError::transaction_invalid(format!(
                "cannot transfer {} into account {}",
                command.amount, destination.id
            )));
        }

        source.debit(command.amount)?;
        destination.credit(command.amount)?;
        self.account_repository
            .update_balances(&[(source.id, source.balance), (destination.id, destination.balance)])
            .await?;

        info!(
            "Transferred {} from account {} to account {}",
            command.amount, source.id, destination.id
        );
        Ok(source)
    }

    async fn customer(&self, customer_id: i64) -> BankResult<Customer> {
        self.customer_repository
            .get_customer(customer_id)
            .await?
            .ok_or(BankError::CustomerNotFound(customer_id))
    }

    async fn owned_account(&self, customer_id: i64, account_id: i64) -> BankResult<Account> {
        self.customer(customer_id)
            .await?
            .account(account_id)
            .cloned()
            .ok_or(BankError::AccountNotFound(account_id))
    }

    /// Own accounts are always valid destinations, anything else must be saved as a recipient
    async fn transfer_destination(&self, customer: &Customer, account_id: i64) -> BankResult<Account> {
        if let Some(account) = customer.account(account_id) {
            return Ok(account.clone());
        }
        if !customer.has_recipient_for(account_id) {
            warn!(
                "Customer {} has no recipient for account {}",
                customer.id, account_id
            );
            return Err(BankError::RecipientNotFound(account_id));
        }
        self.get_account(account_id).await
    }
}

fn check_money_amount(amount: Decimal) -> BankResult<()> {
    if !has_money_scale(amount) {
        return Err(BankError::transaction_invalid(format!(
            "amount {} has more than two decimals",
            amount
        )));
    }
    if amount > max_money() {
        return Err(BankError::transaction_invalid(format!(
            "amount {} exceeds the largest supported amount {}",
            amount,
            max_money()
        )));
    }
    Ok(())
}
