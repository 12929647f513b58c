//! Domain-level command types.
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the DTOs of the `shared`
//! crate to these internal types.

pub mod customer {
    use crate::domain::models::customer::CustomerDetails;

    /// Input for creating a customer.
    #[derive(Debug, Clone)]
    pub struct CreateCustomerCommand {
        pub details: CustomerDetails,
    }

    /// Input for replacing a customer's profile.
    ///
    /// `id` is the id carried in the request body, if any; it must agree with
    /// the id the update is addressed to.
    #[derive(Debug, Clone)]
    pub struct UpdateCustomerCommand {
        pub id: Option<i64>,
        pub details: CustomerDetails,
    }
}

pub mod account {
    use crate::domain::models::account::AccountType;
    use rust_decimal::Decimal;

    /// Input for opening an account.
    #[derive(Debug, Clone)]
    pub struct OpenAccountCommand {
        pub account_type: AccountType,
        /// Raw money string, e.g. `"$150.00"`
        pub initial_amount: String,
    }

    /// Deposit into or withdraw from a single account.
    #[derive(Debug, Clone)]
    pub struct MoneyCommand {
        pub account_id: i64,
        pub customer_id: i64,
        pub amount: Decimal,
    }

    #[derive(Debug, Clone)]
    pub struct TransferCommand {
        pub customer_id: i64,
        pub source_account_id: i64,
        pub destination_account_id: i64,
        pub amount: Decimal,
    }
}

pub mod recipient {
    use crate::domain::models::recipient::RecipientDetails;

    /// Input for adding or editing a recipient.
    #[derive(Debug, Clone)]
    pub struct SaveRecipientCommand {
        pub details: RecipientDetails,
    }
}
