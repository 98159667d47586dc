use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use crate::contributions::ReportRow;

/// Columns of a [`ReportRow`] a predicate can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RowField {
    Id,
    UserId,
    Date,
    Description,
    Monthly,
    InterestPaid,
    Withdrawal,
    BalanceAfterInterest,
}

impl RowField {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Id,
            Self::UserId,
            Self::Date,
            Self::Description,
            Self::Monthly,
            Self::InterestPaid,
            Self::Withdrawal,
            Self::BalanceAfterInterest,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::UserId => "userId",
            Self::Date => "date",
            Self::Description => "description",
            Self::Monthly => "monthly",
            Self::InterestPaid => "interestPaid",
            Self::Withdrawal => "withdrawal",
            Self::BalanceAfterInterest => "balanceAfterInterest",
        }
    }

    /// The field's value coerced to text; amounts print in shortest form (`50`, `12.5`).
    pub fn text<'a>(self, row: &'a ReportRow) -> Cow<'a, str> {
        match self {
            Self::Id => Cow::Borrowed(&row.id),
            Self::UserId => Cow::Borrowed(&row.user_id),
            Self::Date => Cow::Borrowed(&row.date),
            Self::Description => Cow::Borrowed(&row.description),
            Self::Monthly => Cow::Owned(row.monthly.to_string()),
            Self::InterestPaid => Cow::Owned(row.interest_paid.to_string()),
            Self::Withdrawal => Cow::Owned(row.withdrawal.to_string()),
            Self::BalanceAfterInterest => Cow::Owned(row.balance_after_interest.to_string()),
        }
    }
}

impl FromStr for RowField {
    type Err = FilterParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ordered()
            .into_iter()
            .find(|field| field.key().to_ascii_lowercase() == wanted)
            .ok_or_else(|| FilterParseError::UnknownField(raw.trim().to_string()))
    }
}

/// Comparison applied by a predicate. Unrecognised operators are kept as
/// [`FilterOperator::Other`] and always match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterOperator {
    Contains,
    Equals,
    StartsWith,
    EndsWith,
    Before,
    After,
    Other(String),
}

impl FilterOperator {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Contains => "contains",
            Self::Equals => "equals",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::Before => "before",
            Self::After => "after",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for FilterOperator {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "contains" => Self::Contains,
            "equals" => Self::Equals,
            "startsWith" => Self::StartsWith,
            "endsWith" => Self::EndsWith,
            "before" => Self::Before,
            "after" => Self::After,
            _ => Self::Other(raw),
        }
    }
}

impl From<FilterOperator> for String {
    fn from(operator: FilterOperator) -> Self {
        operator.as_str().to_string()
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterParseError {
    #[error("filter '{0}' must look like field:operator:value")]
    Malformed(String),
    #[error("unknown report field '{0}'")]
    UnknownField(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPredicate {
    pub field: RowField,
    pub operator: FilterOperator,
    pub value: String,
}

impl FilterPredicate {
    pub fn new(field: RowField, operator: FilterOperator, value: impl Into<String>) -> Self {
        Self {
            field,
            operator,
            value: value.into(),
        }
    }

    pub fn matches(&self, row: &ReportRow) -> bool {
        let text = self.field.text(row);
        match &self.operator {
            FilterOperator::Contains => lower(&text).contains(&lower(&self.value)),
            FilterOperator::Equals => lower(&text) == lower(&self.value),
            FilterOperator::StartsWith => lower(&text).starts_with(&lower(&self.value)),
            FilterOperator::EndsWith => lower(&text).ends_with(&lower(&self.value)),
            FilterOperator::Before => compare_dates(&text, &self.value, |row, bound| row < bound),
            FilterOperator::After => compare_dates(&text, &self.value, |row, bound| row > bound),
            FilterOperator::Other(_) => true,
        }
    }
}

impl FromStr for FilterPredicate {
    type Err = FilterParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.splitn(3, ':');
        let (Some(field), Some(operator), Some(value)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(FilterParseError::Malformed(raw.to_string()));
        };
        if operator.trim().is_empty() {
            return Err(FilterParseError::Malformed(raw.to_string()));
        }

        Ok(Self {
            field: field.parse()?,
            operator: FilterOperator::from(operator.trim().to_string()),
            value: value.to_string(),
        })
    }
}

impl fmt::Display for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.field.key(), self.operator, self.value)
    }
}

/// Rows satisfying every predicate, in their original order.
pub fn filter_rows<'a>(
    rows: &'a [ReportRow],
    predicates: &'a [FilterPredicate],
) -> impl Iterator<Item = &'a ReportRow> + 'a {
    rows.iter()
        .filter(move |row| predicates.iter().all(|predicate| predicate.matches(row)))
}

pub fn apply_filters(rows: &[ReportRow], predicates: &[FilterPredicate]) -> Vec<ReportRow> {
    filter_rows(rows, predicates).cloned().collect()
}

fn lower(value: &str) -> String {
    value.to_lowercase()
}

fn compare_dates(
    row_value: &str,
    bound: &str,
    compare: impl Fn(NaiveDateTime, NaiveDateTime) -> bool,
) -> bool {
    match (parse_calendar_date(row_value), parse_calendar_date(bound)) {
        (Some(row), Some(bound)) => compare(row, bound),
        _ => false,
    }
}

/// Parses the date shapes the report uses and users type. `None` stands in for an invalid date.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.naive_utc());
    }

    if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Some(timestamp);
    }

    ["%Y-%m-%d", "%Y/%m/%d"]
        .into_iter()
        .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        .or_else(|| year_month(trimmed))
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn year_month(raw: &str) -> Option<NaiveDate> {
    let (year, month) = raw.split_once('-')?;
    let digits = |part: &str, len: usize| part.len() == len && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(year, 4) || !digits(month, 2) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}
