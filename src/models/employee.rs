use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, so `"male"` from older records still maps onto the choice list.
impl FromStr for Gender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL.into_iter().find(|g| g.as_str().eq_ignore_ascii_case(s.trim())).ok_or(())
    }
}

/// One row of the backend's list or search response.
///
/// Decoding is lenient per field: a stray value in one record must not hide the whole list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct EmployeeRecord {
    #[serde(rename = "_id", alias = "id", default, deserialize_with = "lenient_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub gender: String,
    #[serde(default, deserialize_with = "lenient_salary")]
    pub salary: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LooseValue {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<LooseValue>::deserialize(deserializer)? {
        Some(LooseValue::Text(text)) => text,
        Some(LooseValue::Number(value)) => format_salary(value),
        Some(LooseValue::Other(_)) | None => String::new(),
    })
}

fn lenient_salary<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Option::<LooseValue>::deserialize(deserializer)? {
        Some(LooseValue::Number(value)) => Some(value),
        Some(LooseValue::Text(text)) => text.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        Some(LooseValue::Other(_)) | None => None,
    })
}

/// Body of create and update requests: the record minus its identifier.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EmployeePayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub gender: String,
    pub salary: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit { id: String },
}

#[derive(Deserialize, Validate, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct FormState {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(custom = "validate_gender")]
    pub gender: String,
    #[validate(length(min = 1, message = "Salary is required"))]
    pub salary: String,
}

fn validate_gender(gender: &str) -> Result<(), validator::ValidationError> {
    if !Gender::ALL.iter().any(|g| g.as_str() == gender) {
        return Err(validator::ValidationError::new("Gender must be one of Male, Female or Other"));
    }
    Ok(())
}

impl FormState {
    pub fn from_record(record: &EmployeeRecord) -> Self {
        FormState {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            gender: record
                .gender
                .parse::<Gender>()
                .map(|g| g.as_str().to_string())
                .unwrap_or_else(|_| record.gender.clone()),
            salary: record.salary.map(format_salary).unwrap_or_default(),
        }
    }

    pub fn to_payload(&self) -> EmployeePayload {
        EmployeePayload {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            gender: self.gender.clone(),
            salary: coerce_salary(&self.salary),
        }
    }
}

/// Numeric coercion of salary text. `None` marks a failed coercion and is sent as `null`.
pub fn coerce_salary(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn format_salary(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
