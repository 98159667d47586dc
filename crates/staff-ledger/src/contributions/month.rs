use serde::{Deserialize, Serialize};

/// Calendar months keyed by the three-letter abbreviations the contributions API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

/// Code used for ledger keys outside the table.
pub const FALLBACK_MONTH_CODE: &str = "01";

impl Month {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::Jan,
            Self::Feb,
            Self::Mar,
            Self::Apr,
            Self::May,
            Self::Jun,
            Self::Jul,
            Self::Aug,
            Self::Sep,
            Self::Oct,
            Self::Nov,
            Self::Dec,
        ]
    }

    /// Exact, case-sensitive lookup.
    pub fn from_abbrev(key: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|month| month.abbrev() == key)
    }

    pub const fn abbrev(self) -> &'static str {
        match self {
            Self::Jan => "Jan",
            Self::Feb => "Feb",
            Self::Mar => "Mar",
            Self::Apr => "Apr",
            Self::May => "May",
            Self::Jun => "Jun",
            Self::Jul => "Jul",
            Self::Aug => "Aug",
            Self::Sep => "Sep",
            Self::Oct => "Oct",
            Self::Nov => "Nov",
            Self::Dec => "Dec",
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::Jan => "01",
            Self::Feb => "02",
            Self::Mar => "03",
            Self::Apr => "04",
            Self::May => "05",
            Self::Jun => "06",
            Self::Jul => "07",
            Self::Aug => "08",
            Self::Sep => "09",
            Self::Oct => "10",
            Self::Nov => "11",
            Self::Dec => "12",
        }
    }
}

/// Two-digit month code for a ledger key. Unknown keys map to
/// [`FALLBACK_MONTH_CODE`], so they are dated as January.
pub fn month_code(key: &str) -> &'static str {
    Month::from_abbrev(key)
        .map(Month::code)
        .unwrap_or(FALLBACK_MONTH_CODE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_calendar_order() {
        let codes: Vec<&str> = Month::ordered().into_iter().map(Month::code).collect();
        assert_eq!(
            codes,
            ["01", "02", "03", "04", "05", "06", "07", "08", "09", "10", "11", "12"]
        );
    }

    #[test]
    fn unknown_keys_fall_back_to_january() {
        assert_eq!(month_code("Sep"), "09");
        assert_eq!(month_code("Sept"), "01");
        assert_eq!(month_code("dec"), "01");
        assert_eq!(month_code(""), "01");
    }
}
