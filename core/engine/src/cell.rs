//! FILENAME: core/engine/src/cell.rs
//! PURPOSE: Defines the value stored in a single table cell.
//! CONTEXT: Input exports mix numbers and text freely (an identifier may be
//! read as `1345678901.0` in one row and referenced as `"1345678901"` in
//! another), so every comparison the linkage and summary code performs goes
//! through the normalising helpers on `CellValue`.

use serde::{Deserialize, Serialize};

/// Spreadsheet error values carried through from the source workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellError {
    Div0,
    NA,
    Name,
    Null,
    Num,
    Ref,
    Value,
}

impl CellError {
    /// The text Excel shows for this error.
    pub fn as_str(&self) -> &'static str {
        match self {
            CellError::Div0 => "#DIV/0!",
            CellError::NA => "#N/A",
            CellError::Name => "#NAME?",
            CellError::Null => "#NULL!",
            CellError::Num => "#NUM!",
            CellError::Ref => "#REF!",
            CellError::Value => "#VALUE!",
        }
    }
}

/// Raw data within a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    Error(CellError),
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Empty)
    }
}

impl CellValue {
    /// True for `Empty` and for text that is blank after trimming.
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    /// Returns the display value of the cell as a String.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => {
                if *b { "TRUE" } else { "FALSE" }.to_string()
            }
            CellValue::Error(e) => e.as_str().to_string(),
        }
    }

    /// Normalised identifier key, or `None` when the cell holds no value.
    ///
    /// Integral numbers drop their fractional part and text is trimmed, so
    /// `Number(1345.0)` and `Text(" 1345 ")` produce the same key.
    pub fn as_key(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        match self {
            CellValue::Text(s) => Some(s.trim().to_string()),
            other => Some(other.display_value()),
        }
    }

    /// Numeric interpretation of the cell.
    /// Text is accepted when it parses after trimming and removing `,` separators.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if !n.is_nan() => Some(*n),
            CellValue::Text(s) => {
                let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
                if cleaned.is_empty() {
                    return None;
                }
                cleaned.parse::<f64>().ok().filter(|n| !n.is_nan())
            }
            _ => None,
        }
    }

    /// Integral year value. Fractional numbers are not years.
    pub fn as_year(&self) -> Option<i32> {
        let n = self.as_number()?;
        if n.fract() != 0.0 || n < i32::MIN as f64 || n > i32::MAX as f64 {
            return None;
        }
        Some(n as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_identifiers_share_a_key() {
        assert_eq!(CellValue::Number(1345.0).as_key(), Some("1345".to_string()));
        assert_eq!(CellValue::from(" 1345 ").as_key(), Some("1345".to_string()));
    }

    #[test]
    fn blank_text_has_no_key() {
        assert_eq!(CellValue::from("   ").as_key(), None);
        assert_eq!(CellValue::Empty.as_key(), None);
        assert!(CellValue::Number(f64::NAN).is_empty());
    }

    #[test]
    fn numbers_parse_from_text_with_separators() {
        assert_eq!(CellValue::from("1,250,000").as_number(), Some(1_250_000.0));
        assert_eq!(CellValue::from("abc").as_number(), None);
        assert_eq!(CellValue::Boolean(true).as_number(), None);
    }

    #[test]
    fn years_must_be_integral() {
        assert_eq!(CellValue::Number(2021.0).as_year(), Some(2021));
        assert_eq!(CellValue::from("2019").as_year(), Some(2019));
        assert_eq!(CellValue::Number(2021.5).as_year(), None);
    }

    #[test]
    fn errors_display_as_excel_text() {
        assert_eq!(CellValue::Error(CellError::NA).display_value(), "#N/A");
    }
}
