//! Chart type selection primitives.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Visual encoding chosen for a normalized result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Area,
}

impl ChartType {
    /// Parse a backend-supplied value, treating anything unrecognized as absent
    ///
    /// Backends have shipped arbitrary strings here; an invalid value falls
    /// through to the next priority source instead of failing resolution.
    pub fn parse_lenient(value: Option<&str>) -> Option<Self> {
        value.and_then(|v| v.parse().ok())
    }
}

impl Default for ChartType {
    fn default() -> Self {
        Self::Bar
    }
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(Self::Bar),
            "line" => Ok(Self::Line),
            "pie" => Ok(Self::Pie),
            "area" => Ok(Self::Area),
            other => Err(format!("unknown chart type: {}", other)),
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Pie => "pie",
            Self::Area => "area",
        };
        f.write_str(name)
    }
}

/// Chart suggestion block attached to modern responses
///
/// Every field is optional; a suggestion with a missing or unrecognized
/// `chart_type` is informational only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartSuggestion {
    #[serde(default)]
    pub chart_type: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_types() {
        assert_eq!("bar".parse(), Ok(ChartType::Bar));
        assert_eq!("line".parse(), Ok(ChartType::Line));
        assert_eq!("pie".parse(), Ok(ChartType::Pie));
        assert_eq!("area".parse(), Ok(ChartType::Area));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("PIE".parse(), Ok(ChartType::Pie));
        assert_eq!(" Line ".parse(), Ok(ChartType::Line));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("donut".parse::<ChartType>().is_err());
        assert!("".parse::<ChartType>().is_err());
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(ChartType::parse_lenient(Some("pie")), Some(ChartType::Pie));
        assert_eq!(ChartType::parse_lenient(Some("donut")), None);
        assert_eq!(ChartType::parse_lenient(None), None);
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ChartType::Area).unwrap(), "\"area\"");
        let parsed: ChartType = serde_json::from_str("\"pie\"").unwrap();
        assert_eq!(parsed, ChartType::Pie);
    }

    #[test]
    fn test_display_matches_wire_form() {
        assert_eq!(ChartType::Bar.to_string(), "bar");
        assert_eq!(ChartType::Area.to_string(), "area");
    }

    #[test]
    fn test_suggestion_decodes_with_missing_fields() {
        let suggestion: ChartSuggestion = serde_json::from_str("{}").unwrap();
        assert!(suggestion.chart_type.is_none());
        assert!(suggestion.title.is_none());
    }
}
