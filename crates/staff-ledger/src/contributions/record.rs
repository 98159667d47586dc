use serde_json::Value;

use crate::schema::{parse_list, Fields, SchemaError};

/// One month of the ledger as the API sent it, in the API's key order.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub month: String,
    /// `None` when the API sent something other than a number.
    pub amount: Option<f64>,
}

impl LedgerEntry {
    pub fn new(month: impl Into<String>, amount: f64) -> Self {
        Self {
            month: month.into(),
            amount: Some(amount),
        }
    }

    pub fn amount_or_zero(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }
}

/// Monthly deposits keyed by month abbreviation, insertion order preserved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyLedger {
    entries: Vec<LedgerEntry>,
}

impl MonthlyLedger {
    pub fn new(entries: Vec<LedgerEntry>) -> Self {
        Self { entries }
    }

    /// Reads a JSON object into a ledger. Anything that is not an object has no ledger.
    pub fn from_value(value: &Value) -> Option<Self> {
        let map = value.as_object()?;
        let entries = map
            .iter()
            .map(|(month, amount)| LedgerEntry {
                month: month.clone(),
                amount: amount.as_f64(),
            })
            .collect();
        Some(Self { entries })
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, month: &str) -> Option<&LedgerEntry> {
        self.entries.iter().find(|entry| entry.month == month)
    }

    pub fn sum(&self) -> f64 {
        self.entries.iter().map(LedgerEntry::amount_or_zero).sum()
    }
}

/// A staff member's annual contribution summary as served by the contributions API.
#[derive(Debug, Clone, PartialEq)]
pub struct StaffContributionRecord {
    pub staff_id: String,
    pub name: Option<String>,
    pub year: i32,
    pub monthly: Option<MonthlyLedger>,
    pub interest_paid: f64,
    pub withdrawal: f64,
    pub balance_after_interest: f64,
    pub opening_balance: f64,
    pub total: f64,
    pub carry_forward_balance: f64,
    pub closing_balance: f64,
}

impl StaffContributionRecord {
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let fields = Fields::of(value, "staff contribution")?;

        Ok(Self {
            staff_id: fields.required_id("staffId")?,
            name: fields.optional_string("name")?,
            year: fields.required_year("year")?,
            monthly: fields.raw("monthly").and_then(MonthlyLedger::from_value),
            interest_paid: fields.amount_or_zero("interestPaid")?,
            withdrawal: fields.amount_or_zero("withdrawal")?,
            balance_after_interest: fields.amount_or_zero("balanceAfterInterest")?,
            opening_balance: fields.amount_or_zero("openingBalance")?,
            total: fields.amount_or_zero("total")?,
            carry_forward_balance: fields.amount_or_zero("carryForwardBalance")?,
            closing_balance: fields.amount_or_zero("closingBalance")?,
        })
    }

    /// Validates the admin listing of every staff member's record.
    pub fn list_from_value(value: &Value) -> Result<Vec<Self>, SchemaError> {
        parse_list(value, "staff contribution list", Self::from_value)
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        self.monthly
            .as_ref()
            .map(MonthlyLedger::entries)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_camel_case_payload() {
        let record = StaffContributionRecord::from_value(&json!({
            "staffId": 4410,
            "name": "Ama Owusu",
            "year": "2024",
            "monthly": { "Mar": 20, "Jan": 10, "Feb": "n/a" },
            "interestPaid": 3.5,
            "withdrawal": null,
            "carryForwardBalance": 120
        }))
        .expect("valid record");

        assert_eq!(record.staff_id, "4410");
        assert_eq!(record.name.as_deref(), Some("Ama Owusu"));
        assert_eq!(record.year, 2024);
        assert_eq!(record.interest_paid, 3.5);
        assert_eq!(record.withdrawal, 0.0);
        assert_eq!(record.carry_forward_balance, 120.0);

        let months: Vec<&str> = record.entries().iter().map(|e| e.month.as_str()).collect();
        assert_eq!(months, ["Mar", "Jan", "Feb"]);
        assert_eq!(record.entries()[2].amount, None);
        assert_eq!(record.monthly.as_ref().map(MonthlyLedger::sum), Some(30.0));
    }

    #[test]
    fn non_object_monthly_means_no_ledger() {
        for monthly in [json!(null), json!("Jan"), json!([1, 2, 3]), json!(50)] {
            let record = StaffContributionRecord::from_value(&json!({
                "staffId": "S1",
                "year": 2024,
                "monthly": monthly
            }))
            .expect("record without ledger is valid");
            assert!(record.monthly.is_none());
            assert!(record.entries().is_empty());
        }
    }

    #[test]
    fn fails_fast_on_missing_identity_or_bad_amounts() {
        assert_eq!(
            StaffContributionRecord::from_value(&json!({ "year": 2024 })),
            Err(SchemaError::MissingField { field: "staffId" })
        );
        assert_eq!(
            StaffContributionRecord::from_value(&json!({ "staffId": 1 })),
            Err(SchemaError::MissingField { field: "year" })
        );
        assert!(matches!(
            StaffContributionRecord::from_value(&json!({
                "staffId": 1,
                "year": 2024,
                "interestPaid": "12"
            })),
            Err(SchemaError::InvalidField {
                field: "interestPaid",
                ..
            })
        ));
        assert_eq!(
            StaffContributionRecord::from_value(&json!("nope")),
            Err(SchemaError::NotAnObject {
                context: "staff contribution"
            })
        );
    }
}
