use crate::domain::commands::recipient::SaveRecipientCommand;
use crate::domain::models::recipient::{Recipient, RecipientDetails};
use shared::RecipientDto;

pub struct RecipientMapper;

impl RecipientMapper {
    pub fn to_command(dto: RecipientDto) -> SaveRecipientCommand {
        SaveRecipientCommand {
            details: RecipientDetails {
                account_number: dto.account_number,
                name: dto.name,
                email: dto.email,
                phone: dto.phone,
                description: dto.description,
            },
        }
    }

    pub fn to_dto(domain: Recipient) -> RecipientDto {
        RecipientDto {
            id: Some(domain.id),
            account_number: domain.account_number,
            name: domain.name,
            email: domain.email,
            phone: domain.phone,
            description: domain.description,
        }
    }

    pub fn to_dto_list(domain: Vec<Recipient>) -> Vec<RecipientDto> {
        domain.into_iter().map(Self::to_dto).collect()
    }
}
