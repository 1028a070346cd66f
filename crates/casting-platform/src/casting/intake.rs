//! Request intake: turns raw JSON objects into validated entity drafts.
//!
//! Every field is checked before failing so callers receive the complete set of
//! problems keyed by field name. Numeric fields accept numeric strings the same
//! way form posts do, and text fields are trimmed before the blank and length
//! checks run.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use super::domain::{
    ApplicationRequest, CompanyId, CompanyProfile, ProjectDetails, ProjectId, RoleCriteria, RoleId,
    TalentId, TalentProfile,
};

pub const NON_FIELD_ERRORS: &str = "non_field_errors";

const SHORT_TEXT_MAX: usize = 50;
const ROLE_NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 254;

const REQUIRED: &str = "This field is required.";
const NOT_NULL: &str = "This field may not be null.";
const NOT_BLANK: &str = "This field may not be blank.";
const NOT_STRING: &str = "Not a valid string.";
const INVALID_EMAIL: &str = "Enter a valid email address.";
const INVALID_INTEGER: &str = "A valid integer is required.";
const INVALID_NUMBER: &str = "A valid number is required.";

/// Validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.push(field, message);
        errors
    }

    pub fn invalid_reference(field: &str, id: impl fmt::Display) -> Self {
        Self::single(field, format!("Invalid pk \"{id}\" - object does not exist."))
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .0
            .iter()
            .map(|(field, messages)| format!("{field}: {}", messages.join(" ")))
            .collect();
        f.write_str(&rendered.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@.]+$").expect("email pattern compiles")
    })
}

struct FieldReader<'a> {
    object: &'a Map<String, Value>,
    errors: FieldErrors,
}

impl<'a> FieldReader<'a> {
    fn new(payload: &'a Value) -> Result<Self, FieldErrors> {
        match payload {
            Value::Object(object) => Ok(Self {
                object,
                errors: FieldErrors::default(),
            }),
            _ => Err(FieldErrors::single(
                NON_FIELD_ERRORS,
                "Invalid data. Expected an object.",
            )),
        }
    }

    fn reject<T>(&mut self, field: &str, message: impl Into<String>) -> Option<T> {
        self.errors.push(field, message);
        None
    }

    fn required(&mut self, field: &str) -> Option<&'a Value> {
        match self.object.get(field) {
            None => self.reject(field, REQUIRED),
            Some(Value::Null) => self.reject(field, NOT_NULL),
            Some(value) => Some(value),
        }
    }

    fn text(&mut self, field: &str, max_chars: usize) -> Option<String> {
        let raw = match self.required(field)? {
            Value::String(raw) => raw.trim().to_string(),
            Value::Number(number) => number.to_string(),
            _ => return self.reject(field, NOT_STRING),
        };

        if raw.is_empty() {
            return self.reject(field, NOT_BLANK);
        }
        if raw.chars().count() > max_chars {
            return self.reject(
                field,
                format!("Ensure this field has no more than {max_chars} characters."),
            );
        }
        Some(raw)
    }

    fn email(&mut self, field: &str) -> Option<String> {
        let raw = self.text(field, EMAIL_MAX)?;
        if email_pattern().is_match(&raw) {
            Some(raw)
        } else {
            self.reject(field, INVALID_EMAIL)
        }
    }

    fn integer(&mut self, field: &str) -> Option<i32> {
        let parsed = match self.required(field)? {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().and_then(integral)),
            Value::String(raw) => {
                let raw = raw.trim();
                raw.parse::<i64>()
                    .ok()
                    .or_else(|| raw.parse::<f64>().ok().and_then(integral))
            }
            _ => None,
        };

        let Some(value) = parsed else {
            return self.reject(field, INVALID_INTEGER);
        };
        if value > i64::from(i32::MAX) {
            return self.reject(
                field,
                format!("Ensure this value is less than or equal to {}.", i32::MAX),
            );
        }
        if value < i64::from(i32::MIN) {
            return self.reject(
                field,
                format!("Ensure this value is greater than or equal to {}.", i32::MIN),
            );
        }
        i32::try_from(value).ok()
    }

    fn number(&mut self, field: &str) -> Option<f64> {
        let parsed = match self.required(field)? {
            Value::Number(number) => number.as_f64(),
            Value::String(raw) => raw.trim().parse::<f64>().ok(),
            _ => None,
        };

        match parsed.filter(|value| value.is_finite()) {
            Some(value) => Some(value),
            None => self.reject(field, INVALID_NUMBER),
        }
    }

    fn primary_key(&mut self, field: &str) -> Option<u64> {
        let value = self.required(field)?;
        self.parse_primary_key(field, value)
    }

    /// Absent and `null` both mean "no reference".
    fn optional_primary_key(&mut self, field: &str) -> Option<Option<u64>> {
        match self.object.get(field) {
            None | Some(Value::Null) => Some(None),
            Some(value) => self.parse_primary_key(field, value).map(Some),
        }
    }

    fn parse_primary_key(&mut self, field: &str, value: &Value) -> Option<u64> {
        match value {
            Value::Number(number) => match number.as_u64() {
                Some(id) => Some(id),
                None => self.reject(
                    field,
                    format!("Invalid pk \"{number}\" - object does not exist."),
                ),
            },
            Value::String(raw) => match raw.trim().parse::<u64>() {
                Ok(id) => Some(id),
                Err(_) => self.reject(
                    field,
                    format!("Invalid pk \"{raw}\" - object does not exist."),
                ),
            },
            other => self.reject(
                field,
                format!(
                    "Incorrect type. Expected pk value, received {}.",
                    json_type(other)
                ),
            ),
        }
    }

    fn finish<T>(self, draft: T) -> Result<T, FieldErrors> {
        if self.errors.is_empty() {
            Ok(draft)
        } else {
            Err(self.errors)
        }
    }
}

fn integral(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 {
        Some(value as i64)
    } else {
        None
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

pub fn talent_profile(payload: &Value) -> Result<TalentProfile, FieldErrors> {
    let mut reader = FieldReader::new(payload)?;
    let name = reader.text("name", SHORT_TEXT_MAX);
    let email = reader.email("email");
    let phone_number = reader.text("phone_number", SHORT_TEXT_MAX);
    let age = reader.integer("age");
    let gender = reader.text("gender", SHORT_TEXT_MAX);
    let ethnicity = reader.text("ethnicity", SHORT_TEXT_MAX);
    let weight = reader.number("weight");
    let height = reader.number("height");

    let (
        Some(name),
        Some(email),
        Some(phone_number),
        Some(age),
        Some(gender),
        Some(ethnicity),
        Some(weight),
        Some(height),
    ) = (
        name,
        email,
        phone_number,
        age,
        gender,
        ethnicity,
        weight,
        height,
    )
    else {
        return Err(reader.errors);
    };

    reader.finish(TalentProfile {
        name,
        email,
        phone_number,
        age,
        gender,
        ethnicity,
        weight,
        height,
    })
}

/// Applies a partial update: supplied fields are validated, absent ones keep
/// their current value.
pub fn talent_changes(payload: &Value, current: &TalentProfile) -> Result<TalentProfile, FieldErrors> {
    let Value::Object(changes) = payload else {
        return Err(FieldErrors::single(
            NON_FIELD_ERRORS,
            "Invalid data. Expected an object.",
        ));
    };

    let mut merged = match serde_json::to_value(current) {
        Ok(Value::Object(object)) => object,
        _ => {
            return Err(FieldErrors::single(
                NON_FIELD_ERRORS,
                "Stored talent could not be re-validated.",
            ))
        }
    };
    for (field, value) in changes {
        merged.insert(field.clone(), value.clone());
    }

    talent_profile(&Value::Object(merged))
}

pub fn company_profile(payload: &Value) -> Result<CompanyProfile, FieldErrors> {
    let mut reader = FieldReader::new(payload)?;
    let name = reader.text("name", SHORT_TEXT_MAX);
    let email = reader.email("email");
    let description = reader.text("description", usize::MAX);

    let (Some(name), Some(email), Some(description)) = (name, email, description) else {
        return Err(reader.errors);
    };

    reader.finish(CompanyProfile {
        name,
        email,
        description,
    })
}

pub fn project_details(payload: &Value) -> Result<ProjectDetails, FieldErrors> {
    let mut reader = FieldReader::new(payload)?;
    let company = reader.optional_primary_key("company");
    let name = reader.text("name", SHORT_TEXT_MAX);
    let description = reader.text("description", usize::MAX);
    let location = reader.text("location", SHORT_TEXT_MAX);

    let (Some(company), Some(name), Some(description), Some(location)) =
        (company, name, description, location)
    else {
        return Err(reader.errors);
    };

    reader.finish(ProjectDetails {
        company: company.map(CompanyId),
        name,
        description,
        location,
    })
}

pub fn role_criteria(payload: &Value) -> Result<RoleCriteria, FieldErrors> {
    let mut reader = FieldReader::new(payload)?;
    let name = reader.text("name", ROLE_NAME_MAX);
    let project = reader.primary_key("project");
    let talent_age = reader.integer("talent_age");
    let talent_gender = reader.text("talent_gender", SHORT_TEXT_MAX);
    let talent_ethnicity = reader.text("talent_ethnicity", SHORT_TEXT_MAX);
    let talent_weight = reader.number("talent_weight");
    let talent_height = reader.number("talent_height");

    let (
        Some(name),
        Some(project),
        Some(talent_age),
        Some(talent_gender),
        Some(talent_ethnicity),
        Some(talent_weight),
        Some(talent_height),
    ) = (
        name,
        project,
        talent_age,
        talent_gender,
        talent_ethnicity,
        talent_weight,
        talent_height,
    )
    else {
        return Err(reader.errors);
    };

    reader.finish(RoleCriteria {
        name,
        project: ProjectId(project),
        talent_age,
        talent_gender,
        talent_ethnicity,
        talent_weight,
        talent_height,
    })
}

pub fn application_request(payload: &Value) -> Result<ApplicationRequest, FieldErrors> {
    let mut reader = FieldReader::new(payload)?;
    let talent = reader.primary_key("talent");
    let role = reader.primary_key("role");

    let (Some(talent), Some(role)) = (talent, role) else {
        return Err(reader.errors);
    };

    reader.finish(ApplicationRequest {
        talent: TalentId(talent),
        role: RoleId(role),
    })
}
