use super::filter::RowField;
use crate::contributions::ReportRow;
use crate::fmt::format_currency;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Text,
    Currency,
}

/// A visible column of the contribution report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportColumn {
    pub field: RowField,
    pub header: &'static str,
    pub kind: CellKind,
}

pub const REPORT_COLUMNS: [ReportColumn; 6] = [
    ReportColumn {
        field: RowField::Date,
        header: "Date",
        kind: CellKind::Text,
    },
    ReportColumn {
        field: RowField::Description,
        header: "Description",
        kind: CellKind::Text,
    },
    ReportColumn {
        field: RowField::Monthly,
        header: "Monthly Contribution",
        kind: CellKind::Currency,
    },
    ReportColumn {
        field: RowField::InterestPaid,
        header: "Interest Paid",
        kind: CellKind::Currency,
    },
    ReportColumn {
        field: RowField::Withdrawal,
        header: "Withdrawal",
        kind: CellKind::Currency,
    },
    ReportColumn {
        field: RowField::BalanceAfterInterest,
        header: "Balance After Interest",
        kind: CellKind::Currency,
    },
];

impl ReportColumn {
    pub fn amount(&self, row: &ReportRow) -> Option<f64> {
        match self.field {
            RowField::Monthly => Some(row.monthly),
            RowField::InterestPaid => Some(row.interest_paid),
            RowField::Withdrawal => Some(row.withdrawal),
            RowField::BalanceAfterInterest => Some(row.balance_after_interest),
            RowField::Id | RowField::UserId | RowField::Date | RowField::Description => None,
        }
    }

    /// Display text for the cell.
    pub fn cell(&self, row: &ReportRow) -> String {
        match (self.kind, self.amount(row)) {
            (CellKind::Currency, Some(amount)) => format_currency(amount),
            _ => self.field.text(row).into_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_format_amounts_as_currency() {
        let row = ReportRow {
            id: "S1-Dec".to_string(),
            user_id: "S1".to_string(),
            date: "2024-12-01".to_string(),
            description: "Contribution for Dec".to_string(),
            monthly: 50.0,
            interest_paid: 12.0,
            withdrawal: 5.0,
            balance_after_interest: 1600.0,
        };
        let cells: Vec<String> = REPORT_COLUMNS.iter().map(|column| column.cell(&row)).collect();
        assert_eq!(
            cells,
            [
                "2024-12-01",
                "Contribution for Dec",
                "₵50.00",
                "₵12.00",
                "₵5.00",
                "₵1,600.00"
            ]
        );
    }
}
