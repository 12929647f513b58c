pub mod account_mapper;
pub mod customer_mapper;
pub mod recipient_mapper;

pub use account_mapper::AccountMapper;
pub use customer_mapper::CustomerMapper;
pub use recipient_mapper::RecipientMapper;
