use serde::{Serialize, Serializer};
use validator::Validate;

use super::{derived, FieldErrors, Schema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Card,
    Cash,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct CardDetails {
    #[validate(length(min = 12, max = 19, message = "Card number must be 12 to 19 digits.."))]
    pub number: String,
    #[validate(length(min = 1, message = "Cardholder Name is Required.."))]
    pub name: String,
    /// `MM/YY`
    #[validate(length(equal = 5, message = "Expiry Date must be MM/YY.."))]
    pub expiry: String,
    #[validate(length(min = 3, max = 4, message = "CVV must be 3 or 4 digits.."))]
    pub cvv: String,
}

/// Payment submitted to `/payFine/:id`.
///
/// Cash payments are settled at the desk and carry empty card fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinePayment {
    Card(CardDetails),
    Cash,
}

impl FinePayment {
    pub fn method(&self) -> PaymentMethod {
        match self {
            FinePayment::Card(_) => PaymentMethod::Card,
            FinePayment::Cash => PaymentMethod::Cash,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PaymentBody<'a> {
    payment_method: PaymentMethod,
    card_number: &'a str,
    card_name: &'a str,
    expiry_date: &'a str,
    cvv: &'a str,
}

impl Serialize for FinePayment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let body = match self {
            FinePayment::Card(card) => PaymentBody {
                payment_method: PaymentMethod::Card,
                card_number: &card.number,
                card_name: &card.name,
                expiry_date: &card.expiry,
                cvv: &card.cvv,
            },
            FinePayment::Cash => PaymentBody {
                payment_method: PaymentMethod::Cash,
                card_number: "",
                card_name: "",
                expiry_date: "",
                cvv: "",
            },
        };
        body.serialize(serializer)
    }
}

impl Schema for FinePayment {
    fn check(&self) -> Result<(), FieldErrors> {
        match self {
            FinePayment::Card(card) => {
                let mut errors = derived(card);
                if !card.number.chars().all(|c| c.is_ascii_digit()) {
                    errors.replace("number", "Card number must be 12 to 19 digits..");
                }
                if !card.cvv.chars().all(|c| c.is_ascii_digit()) {
                    errors.replace("cvv", "CVV must be 3 or 4 digits..");
                }
                errors.into_result()
            }
            FinePayment::Cash => Ok(()),
        }
    }
}
