//! Customer request and response bodies

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::features::shared::validation::{
    local_today, parse_iso_date, validate_date_of_birth, validate_max_chars, validate_no_nul,
    Validate, ValidationErrors,
};
use crate::models::{Customer, CustomerInput, Gender};

pub const NAME_MAX_CHARS: usize = 100;
pub const ADDRESS_MAX_CHARS: usize = 200;

pub const NAME_REQUIRED: &str = "Name cannot be null";
pub const NAME_TOO_LONG: &str = "Name must not exceed 100 characters";
pub const NAME_HAS_NUL: &str = "Name must not contain NUL characters";
pub const AGE_REQUIRED: &str = "Age cannot be null";
pub const AGE_NOT_POSITIVE: &str = "Age must be a positive number";
pub const DATE_OF_BIRTH_REQUIRED: &str = "Date of birth cannot be null";
pub const DATE_OF_BIRTH_INVALID: &str =
    "Date must be in the format yyyy-MM-dd, be a valid date, and not be in the future";
pub const ADDRESS_TOO_LONG: &str = "Address must not exceed 200 characters or null";
pub const ADDRESS_HAS_NUL: &str = "Address must not contain NUL characters";
pub const GENDER_INVALID: &str = "Gender must be 'M' (Male), 'F' (Female), or null";

/// Body of `POST /api/customers` and `PUT /api/customers/:id`.
///
/// Everything is optional at this stage so that missing fields are reported
/// as validation errors rather than as a malformed body. Unknown fields,
/// including `id`, are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPayload {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
}

impl CustomerPayload {
    /// Validate against a fixed "today".
    pub fn validate_at(self, today: NaiveDate) -> Result<CustomerInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        match &self.name {
            None => errors.add("name", NAME_REQUIRED),
            Some(name) if !validate_max_chars(name, NAME_MAX_CHARS) => {
                errors.add("name", NAME_TOO_LONG)
            },
            Some(name) if !validate_no_nul(name) => errors.add("name", NAME_HAS_NUL),
            Some(_) => {},
        }

        match self.age {
            None => errors.add("age", AGE_REQUIRED),
            Some(age) if age <= 0 => errors.add("age", AGE_NOT_POSITIVE),
            Some(_) => {},
        }

        if self.date_of_birth.is_none() {
            errors.add("dateOfBirth", DATE_OF_BIRTH_REQUIRED);
        } else if !validate_date_of_birth(self.date_of_birth.as_deref(), today) {
            errors.add("dateOfBirth", DATE_OF_BIRTH_INVALID);
        }

        if let Some(address) = &self.address {
            if !validate_max_chars(address, ADDRESS_MAX_CHARS) {
                errors.add("address", ADDRESS_TOO_LONG);
            } else if !validate_no_nul(address) {
                errors.add("address", ADDRESS_HAS_NUL);
            }
        }

        let gender = match self.gender.as_deref().map(str::parse::<Gender>).transpose() {
            Ok(gender) => gender,
            Err(_) => {
                errors.add("gender", GENDER_INVALID);
                None
            },
        };

        let date_of_birth = self.date_of_birth.as_deref().and_then(parse_iso_date);

        match (self.name, self.age, date_of_birth, errors.is_empty()) {
            (Some(name), Some(age), Some(date_of_birth), true) => Ok(CustomerInput {
                name,
                age,
                date_of_birth,
                address: self.address,
                gender,
            }),
            _ => Err(errors),
        }
    }
}

impl Validate for CustomerPayload {
    type Valid = CustomerInput;

    fn validate(self) -> Result<CustomerInput, ValidationErrors> {
        self.validate_at(local_today())
    }
}

/// Customer as returned by the API. Optional fields are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub date_of_birth: NaiveDate,
    pub address: Option<String>,
    pub gender: Option<Gender>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            age: customer.age,
            date_of_birth: customer.date_of_birth,
            address: customer.address,
            gender: customer.gender,
        }
    }
}
