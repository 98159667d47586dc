//! Boundary checks for the loosely typed JSON the contributions API returns.
//!
//! Payloads are read field by field so that a missing identifier or a
//! mistyped balance fails here with a [`SchemaError`] instead of surfacing
//! later as a silently wrong report.

use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("{context} payload must be a JSON object")]
    NotAnObject { context: &'static str },
    #[error("{context} payload must be a JSON array")]
    NotAnArray { context: &'static str },
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },
    #[error("field '{field}' must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
    #[error("entry {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<SchemaError>,
    },
}

/// Validates every element of a JSON array with `parse`, reporting the first failing index.
pub(crate) fn parse_list<T>(
    value: &Value,
    context: &'static str,
    parse: impl Fn(&Value) -> Result<T, SchemaError>,
) -> Result<Vec<T>, SchemaError> {
    let items = value.as_array().ok_or(SchemaError::NotAnArray { context })?;
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            parse(item).map_err(|source| SchemaError::Element {
                index,
                source: Box::new(source),
            })
        })
        .collect()
}

pub(crate) struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub(crate) fn of(value: &'a Value, context: &'static str) -> Result<Self, SchemaError> {
        value
            .as_object()
            .map(|map| Self { map })
            .ok_or(SchemaError::NotAnObject { context })
    }

    /// Raw access for fields that are read leniently.
    pub(crate) fn raw(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|value| !value.is_null())
    }

    /// Identifier given either as a string or a number.
    pub(crate) fn required_id(&self, field: &'static str) -> Result<String, SchemaError> {
        match self.raw(field) {
            None => Err(SchemaError::MissingField { field }),
            Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.trim().to_string()),
            Some(Value::Number(number)) => Ok(number_text(number)),
            Some(_) => Err(SchemaError::InvalidField {
                field,
                expected: "a non-empty string or a number",
            }),
        }
    }

    pub(crate) fn optional_id(&self, field: &'static str) -> Result<Option<String>, SchemaError> {
        match self.raw(field) {
            None => Ok(None),
            Some(_) => self.required_id(field).map(Some),
        }
    }

    pub(crate) fn required_year(&self, field: &'static str) -> Result<i32, SchemaError> {
        let invalid = SchemaError::InvalidField {
            field,
            expected: "a calendar year",
        };
        match self.raw(field) {
            None => Err(SchemaError::MissingField { field }),
            Some(Value::Number(number)) => number
                .as_i64()
                .and_then(|year| i32::try_from(year).ok())
                .ok_or(invalid),
            Some(Value::String(text)) => text.trim().parse::<i32>().map_err(|_| invalid),
            Some(_) => Err(invalid),
        }
    }

    pub(crate) fn optional_string(
        &self,
        field: &'static str,
    ) -> Result<Option<String>, SchemaError> {
        match self.raw(field) {
            None => Ok(None),
            Some(Value::String(text)) => Ok(Some(text.clone())),
            Some(_) => Err(SchemaError::InvalidField {
                field,
                expected: "a string",
            }),
        }
    }

    pub(crate) fn required_string(&self, field: &'static str) -> Result<String, SchemaError> {
        self.optional_string(field)?
            .ok_or(SchemaError::MissingField { field })
    }

    /// Monetary amount; absent or `null` reads as zero.
    pub(crate) fn amount_or_zero(&self, field: &'static str) -> Result<f64, SchemaError> {
        match self.raw(field) {
            None => Ok(0.0),
            Some(Value::Number(number)) => number.as_f64().ok_or(SchemaError::InvalidField {
                field,
                expected: "a finite number",
            }),
            Some(_) => Err(SchemaError::InvalidField {
                field,
                expected: "a number",
            }),
        }
    }
}

/// Renders a JSON number the way it would print as a bare value (`1001`, `12.5`).
pub(crate) fn number_text(number: &Number) -> String {
    if let Some(value) = number.as_i64() {
        return value.to_string();
    }
    if let Some(value) = number.as_u64() {
        return value.to_string();
    }
    number
        .as_f64()
        .map(|value| value.to_string())
        .unwrap_or_else(|| number.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ids_accept_numbers_and_strings() {
        let value = json!({ "a": 1001, "b": " S-7 ", "c": 12.5, "d": true });
        let fields = Fields::of(&value, "test").expect("object");
        assert_eq!(fields.required_id("a").unwrap(), "1001");
        assert_eq!(fields.required_id("b").unwrap(), "S-7");
        assert_eq!(fields.required_id("c").unwrap(), "12.5");
        assert!(matches!(
            fields.required_id("d"),
            Err(SchemaError::InvalidField { field: "d", .. })
        ));
        assert_eq!(
            fields.required_id("missing"),
            Err(SchemaError::MissingField { field: "missing" })
        );
    }

    #[test]
    fn amounts_default_to_zero_only_when_absent() {
        let value = json!({ "paid": 12, "nothing": null, "text": "12" });
        let fields = Fields::of(&value, "test").expect("object");
        assert_eq!(fields.amount_or_zero("paid").unwrap(), 12.0);
        assert_eq!(fields.amount_or_zero("nothing").unwrap(), 0.0);
        assert_eq!(fields.amount_or_zero("absent").unwrap(), 0.0);
        assert!(fields.amount_or_zero("text").is_err());
    }

    #[test]
    fn list_errors_carry_the_index() {
        let value = json!([{ "id": 1 }, { "other": 2 }]);
        let error = parse_list(&value, "list", |item| {
            Fields::of(item, "item")?.required_id("id")
        })
        .expect_err("second element is invalid");
        assert_eq!(error.to_string(), "entry 1: missing required field 'id'");

        assert_eq!(
            parse_list(&json!({}), "list", |_| Ok(())).unwrap_err(),
            SchemaError::NotAnArray { context: "list" }
        );
    }
}
