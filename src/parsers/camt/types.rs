use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Booking or value date as found in `BookgDt/Dt` and `ValDt/Dt` (ISO `YYYY-MM-DD`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CamtDate(String);

impl CamtDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CamtDate {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for CamtDate {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<CamtDate> for NaiveDate {
    type Error = chrono::ParseError;

    fn try_from(date: CamtDate) -> Result<Self, Self::Error> {
        NaiveDate::parse_from_str(date.0.trim(), "%Y-%m-%d")
    }
}

/// Value of `CdtDbtInd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditDebit {
    #[serde(rename = "DBIT")]
    Debit,
    #[serde(rename = "CRDT")]
    Credit,
}

impl FromStr for CreditDebit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DBIT" => Ok(CreditDebit::Debit),
            "CRDT" => Ok(CreditDebit::Credit),
            other => Err(format!("expected DBIT or CRDT, got {other:?}")),
        }
    }
}

/// Which unstructured remittance lines (`RmtInf/Ustrd`) end up in the description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum DescriptionPolicy {
    /// Only the first line
    #[serde(rename = "first")]
    First,
    /// Every line, joined with `"; "`
    #[default]
    #[serde(rename = "joined")]
    Joined,
}

impl DescriptionPolicy {
    pub fn select(&self, lines: &[String]) -> String {
        match self {
            DescriptionPolicy::First => lines.first().cloned().unwrap_or_default(),
            DescriptionPolicy::Joined => lines.join("; "),
        }
    }
}

/// Collapses inner whitespace runs to a single space and trims both ends.
pub(crate) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use rstest::rstest;

    #[rstest]
    #[case("2023-05-02", 2023, 5, 2)]
    #[case("2024-02-29", 2024, 2, 29)]
    #[case("  2023-12-31 ", 2023, 12, 31)]
    fn test_camt_date_valid(
        #[case] input: &str,
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
    ) {
        let date: NaiveDate = CamtDate::from(input).try_into().unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (year, month, day));
    }

    #[rstest]
    #[case("02.05.2023")]
    #[case("2023-02-30")]
    #[case("2023-05-02T10:00:00")]
    #[case("")]
    fn test_camt_date_invalid(#[case] input: &str) {
        let result: Result<NaiveDate, _> = CamtDate::from(input).try_into();
        assert!(result.is_err());
    }

    #[rstest]
    #[case("DBIT", Ok(CreditDebit::Debit))]
    #[case("CRDT", Ok(CreditDebit::Credit))]
    #[case("dbit", Err(()))]
    #[case("", Err(()))]
    fn test_credit_debit_from_str(#[case] input: &str, #[case] expected: Result<CreditDebit, ()>) {
        assert_eq!(input.parse::<CreditDebit>().map_err(|_| ()), expected);
    }

    #[rstest]
    #[case(DescriptionPolicy::First, &[], "")]
    #[case(DescriptionPolicy::Joined, &[], "")]
    #[case(DescriptionPolicy::First, &["Miete", "Mai 2023"], "Miete")]
    #[case(DescriptionPolicy::Joined, &["Miete", "Mai 2023"], "Miete; Mai 2023")]
    fn test_description_policy_select(
        #[case] policy: DescriptionPolicy,
        #[case] lines: &[&str],
        #[case] expected: &str,
    ) {
        let lines: Vec<String> = lines.iter().map(|line| line.to_string()).collect();
        assert_eq!(policy.select(&lines), expected);
    }

    #[test]
    fn test_description_policy_serialization() {
        assert_eq!(serde_json::to_string(&DescriptionPolicy::Joined).unwrap(), "\"joined\"");
        assert_eq!(DescriptionPolicy::default(), DescriptionPolicy::Joined);
    }

    #[rstest]
    #[case("  Erika   Mustermann ", "Erika Mustermann")]
    #[case("Stadt\n\twerke", "Stadt werke")]
    #[case("   ", "")]
    fn test_normalize_whitespace(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_whitespace(input), expected);
    }
}
