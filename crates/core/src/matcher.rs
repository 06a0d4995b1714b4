//! Heuristic lookup of numeric fields by name pattern.
//!
//! Upstream field names drift between report types (`TotalWorkingDays`,
//! `TWDays`, `NoOfDays`, ...), so fields are located by case-insensitive
//! regex rather than by exact name.

use regex::{Regex, RegexBuilder};

use crate::numeric::coerce;
use crate::types::UpstreamRecord;

/// An ordered set of case-insensitive field-name patterns.
#[derive(Debug, Clone)]
pub struct FieldPatterns {
    patterns: Vec<Regex>,
}

impl FieldPatterns {
    /// Compile a pattern set. Each pattern is matched case-insensitively
    /// anywhere in the field name.
    pub fn new(patterns: &[&str]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Whether any pattern matches `field_name`.
    pub fn matches(&self, field_name: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(field_name))
    }
}

/// Find the first field, in record order, whose name matches any pattern
/// and whose value coerces to a number.
///
/// A matching field with an unparseable value does not stop the scan.
pub fn find_numeric_field(record: &UpstreamRecord, patterns: &FieldPatterns) -> Option<f64> {
    record
        .iter()
        .filter(|(name, _)| patterns.matches(name))
        .find_map(|(_, value)| coerce(value))
}
