use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;
use serde_json::Value;
use validator::Validate;

use crate::schemas::validation::{ValidationErrors, ValidationIssue};

/// An item as submitted by a client. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct Item {
    pub(crate) name: String,
    pub(crate) description: String,
}

impl Item {
    /// Checks field presence and type on a decoded JSON body; extra fields are ignored.
    pub(crate) fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let Some(object) = body.as_object() else {
            return Err(ValidationIssue::new(
                ["body"],
                "Input should be a valid dictionary or object to extract fields from",
                "model_attributes_type",
            )
            .into());
        };

        let (name, description) = ValidationErrors::combine(
            required_string(object, "name"),
            required_string(object, "description"),
        )?;
        Ok(Self { name, description })
    }
}

fn required_string(
    object: &serde_json::Map<String, Value>,
    field: &str,
) -> Result<String, ValidationIssue> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ValidationIssue::missing("body", field)),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(_) => Err(ValidationIssue::new(
            ["body", field],
            "Input should be a valid string",
            "string_type",
        )),
    }
}

/// A path integer of any width. Values outside `i64` keep their canonical digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ItemId {
    Int(i64),
    Big(String),
}

impl Serialize for ItemId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Big(digits) => {
                let raw = RawValue::from_string(digits.clone()).map_err(S::Error::custom)?;
                raw.serialize(serializer)
            }
        }
    }
}

pub(crate) fn invalid_item_id() -> ValidationIssue {
    ValidationIssue::new(
        ["path", "item_id"],
        "Input should be a valid integer, unable to parse string as an integer",
        "int_parsing",
    )
}

pub(crate) fn parse_item_id(raw: &str) -> Result<ItemId, ValidationIssue> {
    if let Ok(value) = raw.parse::<i64>() {
        return Ok(ItemId::Int(value));
    }

    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid_item_id());
    }

    // Anything reaching here has more significant digits than i64 holds.
    let significant = digits.trim_start_matches('0');
    let sign = if negative { "-" } else { "" };
    Ok(ItemId::Big(format!("{sign}{significant}")))
}

#[derive(Debug, Default, Validate)]
pub(crate) struct ItemQuery {
    #[validate(length(
        min = 3,
        code = "string_too_short",
        message = "String should have at least 3 characters"
    ))]
    pub(crate) q: Option<String>,
}

impl ItemQuery {
    /// Builds the query from raw pairs; a repeated `q` keeps its last value.
    pub(crate) fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let q = pairs.into_iter().filter(|(key, _)| key == "q").map(|(_, value)| value).last();
        Self { q }
    }

    pub(crate) fn validated(self) -> Result<Option<String>, ValidationErrors> {
        self.validate().map_err(|err| ValidationErrors::from_validator("query", &err))?;
        Ok(self.q)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ItemReadResponse {
    pub(crate) item_id: ItemId,
    pub(crate) q: Option<String>,
}
