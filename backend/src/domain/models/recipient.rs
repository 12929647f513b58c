//! Domain model for a saved payment recipient.

/// Recipient fields supplied when adding or editing a recipient.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipientDetails {
    pub account_number: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recipient {
    pub id: i64,
    pub customer_id: i64,
    /// Id of the account this recipient receives money on
    pub account_number: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

impl Recipient {
    pub fn from_details(id: i64, customer_id: i64, details: RecipientDetails) -> Self {
        Self {
            id,
            customer_id,
            account_number: details.account_number,
            name: details.name,
            email: details.email,
            phone: details.phone,
            description: details.description,
        }
    }

    pub fn is_owned_by(&self, customer_id: i64) -> bool {
        self.customer_id == customer_id
    }
}
