//! Customer domain model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Closed gender set. `None` on the customer means "not given".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl FromStr for Gender {
    type Err = UnknownGender;

    /// Exact match on `M` or `F`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "M" => Ok(Gender::Male),
            "F" => Ok(Gender::Female),
            other => Err(UnknownGender(other.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gender code '{0}'")]
pub struct UnknownGender(pub String);

/// A stored customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub date_of_birth: NaiveDate,
    pub address: Option<String>,
    pub gender: Option<Gender>,
}

/// Checked field values for a create or a full update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerInput {
    pub name: String,
    pub age: i32,
    pub date_of_birth: NaiveDate,
    pub address: Option<String>,
    pub gender: Option<Gender>,
}

impl Customer {
    pub fn from_input(id: i64, input: CustomerInput) -> Self {
        Self {
            id,
            name: input.name,
            age: input.age,
            date_of_birth: input.date_of_birth,
            address: input.address,
            gender: input.gender,
        }
    }

    /// Full overwrite from `input`. Absent optional fields are cleared;
    /// `id` is never touched.
    pub fn apply(&mut self, input: CustomerInput) {
        self.name = input.name;
        self.age = input.age;
        self.date_of_birth = input.date_of_birth;
        self.address = input.address;
        self.gender = input.gender;
    }
}
