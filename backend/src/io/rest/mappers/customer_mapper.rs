use crate::domain::commands::customer::{CreateCustomerCommand, UpdateCustomerCommand};
use crate::domain::models::customer::{Customer, CustomerDetails};
use crate::domain::{BankError, BankResult};
use shared::CustomerDto;

/// Mapper between the shared customer DTO and domain customers.
pub struct CustomerMapper;

impl CustomerMapper {
    pub fn to_details(dto: CustomerDto) -> CustomerDetails {
        CustomerDetails {
            first_name: dto.first_name,
            last_name: dto.last_name,
            email: dto.email,
            phone: dto.phone,
        }
    }

    /// New customers get their id from storage, so a client supplied id is rejected.
    pub fn to_create_command(dto: CustomerDto) -> BankResult<CreateCustomerCommand> {
        if let Some(id) = dto.id {
            return Err(BankError::validation(format!(
                "A new customer cannot already have an id ({})",
                id
            )));
        }
        Ok(CreateCustomerCommand {
            details: Self::to_details(dto),
        })
    }

    pub fn to_update_command(dto: CustomerDto) -> UpdateCustomerCommand {
        UpdateCustomerCommand {
            id: dto.id,
            details: Self::to_details(dto),
        }
    }

    pub fn to_dto(domain: Customer) -> CustomerDto {
        CustomerDto {
            id: Some(domain.id),
            first_name: domain.details.first_name,
            last_name: domain.details.last_name,
            email: domain.details.email,
            phone: domain.details.phone,
        }
    }

    pub fn to_dto_list(domain: Vec<Customer>) -> Vec<CustomerDto> {
        domain.into_iter().map(Self::to_dto).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(id: Option<i64>) -> CustomerDto {
        CustomerDto {
            id,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: "912345678".to_string(),
        }
    }

    #[test]
    fn test_create_command_rejects_id() {
        assert!(CustomerMapper::to_create_command(dto(None)).is_ok());
        assert!(matches!(
            CustomerMapper::to_create_command(dto(Some(3))),
            Err(BankError::Validation(_))
        ));
    }

    #[test]
    fn test_to_dto_exposes_id_but_not_relations() {
        let customer = Customer {
            id: 9,
            details: CustomerMapper::to_details(dto(None)),
            accounts: Vec::new(),
            recipients: Vec::new(),
        };

        assert_eq!(CustomerMapper::to_dto(customer), dto(Some(9)));
    }
}
