use crate::domain::commands::account::OpenAccountCommand;
use crate::domain::models::account::{Account, AccountType as DomainAccountType};
use shared::{AccountDto, AccountType as SharedAccountType, TransferResponse};
use rust_decimal::Decimal;

pub struct AccountMapper;

impl AccountMapper {
    /// A request without `initialAmount` opens the account empty
    pub fn to_open_command(dto: AccountDto) -> OpenAccountCommand {
        OpenAccountCommand {
            account_type: Self::to_domain_type(dto.account_type),
            initial_amount: dto.initial_amount.unwrap_or_else(|| "0".to_string()),
        }
    }

    pub fn to_dto(domain: Account) -> AccountDto {
        AccountDto {
            id: Some(domain.id),
            account_type: Self::to_dto_type(domain.account_type),
            balance: domain.balance,
            initial_amount: None,
        }
    }

    pub fn to_dto_list(domain: Vec<Account>) -> Vec<AccountDto> {
        domain.into_iter().map(Self::to_dto).collect()
    }

    pub fn to_transfer_response(source: Account, destination_account_id: i64, amount: Decimal) -> TransferResponse {
        TransferResponse {
            source_account: Self::to_dto(source),
            destination_account_id,
            amount,
        }
    }

    fn to_domain_type(dto_type: SharedAccountType) -> DomainAccountType {
        match dto_type {
            SharedAccountType::Checking => DomainAccountType::Checking,
            SharedAccountType::Savings => DomainAccountType::Savings,
        }
    }

    fn to_dto_type(domain_type: DomainAccountType) -> SharedAccountType {
        match domain_type {
            DomainAccountType::Checking => SharedAccountType::Checking,
            DomainAccountType::Savings => SharedAccountType::Savings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_open_command_defaults_to_empty_account() {
        let command = AccountMapper::to_open_command(AccountDto {
            id: None,
            account_type: SharedAccountType::Savings,
            balance: Decimal::ZERO,
            initial_amount: None,
        });

        assert_eq!(command.account_type, DomainAccountType::Savings);
        assert_eq!(command.initial_amount, "0");
    }

    #[test]
    fn test_to_dto() {
        let dto = AccountMapper::to_dto(Account {
            id: 4,
            customer_id: 1,
            account_type: DomainAccountType::Checking,
            balance: dec!(12.34),
        });

        assert_eq!(dto.id, Some(4));
        assert_eq!(dto.account_type, SharedAccountType::Checking);
        assert_eq!(dto.balance, dec!(12.34));
        assert!(dto.initial_amount.is_none());
    }
}
