pub mod account;
pub mod customer;
pub mod recipient;
