//! Cell and table heuristics: amount detection, header keywords, table type.
//!
//! Everything here is keyword matching on plain strings. The predicates are
//! loose: a purely numeric employee ID *is* an amount as far as
//! [`is_amount`] is concerned, and callers style it as one.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::Vocabulary;

/// Characters removed before the digits-only test in [`is_amount`].
const AMOUNT_SEPARATORS: [char; 5] = [',', '.', '-', '/', ' '];

/// Zero spellings accepted verbatim by [`is_amount`].
const ZERO_LITERALS: [&str; 3] = ["0.00", "0", "0.0"];

/// True when `text` looks like a monetary amount.
///
/// The trimmed text has `, . - /` and spaces removed; what is left must be
/// non-empty and made only of digits. The literals `0.00`, `0` and `0.0` are
/// accepted as-is.
pub fn is_amount(text: &str) -> bool {
    let trimmed = text.trim();
    let cleaned: String = trimmed
        .chars()
        .filter(|c| !AMOUNT_SEPARATORS.contains(c))
        .collect();
    (!cleaned.is_empty() && cleaned.chars().all(|c| c.is_ascii_digit()))
        || ZERO_LITERALS.contains(&trimmed)
}

static DEFAULT_HEADER_MATCHER: Lazy<HeaderMatcher> = Lazy::new(|| {
    HeaderMatcher::new(&Vocabulary::default().header_keywords)
        .unwrap_or_else(|_| HeaderMatcher::empty())
});

/// [`HeaderMatcher::is_header`] against the built-in header vocabulary.
pub fn is_header(text: &str) -> bool {
    DEFAULT_HEADER_MATCHER.is_header(text)
}

/// Case-insensitive "contains any keyword" matcher.
///
/// Compiled once per conversion from [`Vocabulary::header_keywords`]; the
/// keywords are escaped so they match literally.
#[derive(Clone)]
pub struct HeaderMatcher {
    regex: Option<Regex>,
}

impl HeaderMatcher {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self, regex::Error> {
        let alternatives: Vec<String> = keywords
            .iter()
            .map(|k| k.as_ref().trim())
            .filter(|k| !k.is_empty())
            .map(regex::escape)
            .collect();
        if alternatives.is_empty() {
            return Ok(Self::empty());
        }
        let regex = RegexBuilder::new(&alternatives.join("|"))
            .case_insensitive(true)
            .build()?;
        Ok(Self { regex: Some(regex) })
    }

    /// A matcher that never matches.
    pub fn empty() -> Self {
        Self { regex: None }
    }

    pub fn is_header(&self, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        self.regex.as_ref().is_some_and(|re| re.is_match(text))
    }
}

impl fmt::Debug for HeaderMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderMatcher")
            .field("pattern", &self.regex.as_ref().map(Regex::as_str))
            .finish()
    }
}

/// Semantic category of a table, derived from its first row.
///
/// Informational only: the category is recorded in the conversion report
/// but does not influence how the table is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableCategory {
    EmployeeInfo,
    EarningsDeductions,
    PfDetails,
    TaxCalculation,
    HraCalculation,
    Perquisite,
    TaxSummary,
    Generic,
    Unknown,
}

impl TableCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableCategory::EmployeeInfo => "employee_info",
            TableCategory::EarningsDeductions => "earnings_deductions",
            TableCategory::PfDetails => "pf_details",
            TableCategory::TaxCalculation => "tax_calculation",
            TableCategory::HraCalculation => "hra_calculation",
            TableCategory::Perquisite => "perquisite",
            TableCategory::TaxSummary => "tax_summary",
            TableCategory::Generic => "generic",
            TableCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TableCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a table from its first row.
///
/// The checks run in a fixed order and the first hit wins, so a header row
/// naming both "Earnings" and "Deductions" is `EarningsDeductions` even when
/// it also mentions "PF". A row without cells is `Unknown`.
pub fn classify_table(first_row: &[Option<String>]) -> TableCategory {
    if first_row.is_empty() {
        return TableCategory::Unknown;
    }

    let joined = first_row
        .iter()
        .map(|cell| cell.as_deref().unwrap_or(""))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let has = |needle: &str| joined.contains(needle);

    if has("employee") && (has("id") || has("name")) {
        TableCategory::EmployeeInfo
    } else if has("earnings") && has("deductions") {
        TableCategory::EarningsDeductions
    } else if has("provident fund") || has("pf") {
        TableCategory::PfDetails
    } else if has("income tax") || has("tax calculation") {
        TableCategory::TaxCalculation
    } else if has("hra") && has("calculation") {
        TableCategory::HraCalculation
    } else if has("perquisite") {
        TableCategory::Perquisite
    } else if has("gross total") || has("net taxable") {
        TableCategory::TaxSummary
    } else {
        TableCategory::Generic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<Option<String>> {
        cells
            .iter()
            .map(|c| {
                if c.is_empty() {
                    None
                } else {
                    Some(c.to_string())
                }
            })
            .collect()
    }

    #[test]
    fn amounts_with_separators() {
        assert!(is_amount("12,345.00"));
        assert!(is_amount("  1 500 "));
        assert!(is_amount("01/04/2024"));
        assert!(is_amount("-250"));
        assert!(is_amount("42"));
    }

    #[test]
    fn zero_literals_are_amounts() {
        for zero in ZERO_LITERALS {
            assert!(is_amount(zero), "{zero} should be an amount");
        }
    }

    #[test]
    fn empty_and_separator_only_text_is_not_an_amount() {
        assert!(!is_amount(""));
        assert!(!is_amount("   "));
        assert!(!is_amount("-"));
        assert!(!is_amount(",./"));
    }

    #[test]
    fn words_are_not_amounts() {
        assert!(!is_amount("Basic"));
        assert!(!is_amount("Rs. 100"));
        assert!(!is_amount("12a"));
    }

    #[test]
    fn non_ascii_numerals_are_not_amounts() {
        assert!(!is_amount("½"));
        assert!(!is_amount("Ⅻ"));
        assert!(!is_amount("١٢٣"));
    }

    #[test]
    fn numeric_ids_count_as_amounts() {
        // Known imprecision of the heuristic.
        assert!(is_amount("100234"));
    }

    #[test]
    fn header_keywords_match_case_insensitively() {
        assert!(is_header("EMPLOYEE NAME"));
        assert!(is_header("basic salary"));
        assert!(is_header("Year to date"));
        assert!(is_header("House Rent (HRA)"));
        assert!(is_header("Network")); // substring of "Net"
    }

    #[test]
    fn text_without_keywords_is_not_a_header() {
        assert!(!is_header(""));
        assert!(!is_header("Jane Doe"));
        assert!(!is_header("12,345.00"));
    }

    #[test]
    fn custom_vocabulary_replaces_defaults() {
        let matcher = HeaderMatcher::new(&["Invoice", "Qty"]).unwrap();
        assert!(matcher.is_header("invoice no"));
        assert!(matcher.is_header("QTY"));
        assert!(!matcher.is_header("Employee"));
    }

    #[test]
    fn keywords_match_literally() {
        let matcher = HeaderMatcher::new(&["a.b", "(x)"]).unwrap();
        assert!(matcher.is_header("A.B"));
        assert!(!matcher.is_header("axb"));
        assert!(matcher.is_header("value (x)"));
    }

    #[test]
    fn empty_vocabulary_never_matches() {
        let matcher = HeaderMatcher::new::<&str>(&[]).unwrap();
        assert!(!matcher.is_header("Employee"));
    }

    #[test]
    fn classify_employee_info() {
        let r = row(&["Employee ID", "Employee Name"]);
        assert_eq!(classify_table(&r), TableCategory::EmployeeInfo);
    }

    #[test]
    fn earnings_deductions_wins_over_pf() {
        let r = row(&["Earnings", "Amount", "Deductions (incl. PF)", "Amount"]);
        assert_eq!(classify_table(&r), TableCategory::EarningsDeductions);
    }

    #[test]
    fn classify_remaining_categories() {
        let cases = [
            (vec!["Provident Fund", "Balance"], TableCategory::PfDetails),
            (vec!["Income Tax", ""], TableCategory::TaxCalculation),
            (vec!["HRA", "Calculation"], TableCategory::HraCalculation),
            (vec!["Perquisite", "Value"], TableCategory::Perquisite),
            (vec!["Gross Total Income", ""], TableCategory::TaxSummary),
            (vec!["Description", "Qty"], TableCategory::Generic),
        ];
        for (cells, expected) in cases {
            let r = row(&cells);
            assert_eq!(classify_table(&r), expected, "row {cells:?}");
        }
    }

    #[test]
    fn missing_first_row_is_unknown() {
        assert_eq!(classify_table(&[]), TableCategory::Unknown);
    }

    #[test]
    fn category_serialises_snake_case() {
        let json = serde_json::to_string(&TableCategory::EarningsDeductions).unwrap();
        assert_eq!(json, "\"earnings_deductions\"");
        assert_eq!(TableCategory::PfDetails.to_string(), "pf_details");
    }
}
