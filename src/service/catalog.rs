//! Element table rows and upload checks for the auxiliary CRUD calls.
//!
//! Rows are checked against the storage schema before anything is sent,
//! so an obviously bad form never reaches the service.

use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

const MAX_CODE_LEN: usize = 3;
const MAX_NAME_LEN: usize = 32;
const COLOR_LEN: usize = 6;

/// One row of the element table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRow {
    /// Atomic number.
    pub number: u32,
    /// Element code, e.g. `"C"`.
    pub code: String,
    /// Display name, e.g. `"Carbon"`.
    pub name: String,
    /// Three gradient colours as six-digit hex strings.
    pub colors: [String; 3],
    /// Drawn radius.
    pub radius: f64,
}

impl ElementRow {
    /// Check the row against the element table's column constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidElement`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<(), ViewerError> {
        if self.number == 0 {
            return Err(invalid("number must be at least 1"));
        }
        let code_len = self.code.chars().count();
        if code_len == 0 || code_len > MAX_CODE_LEN {
            return Err(invalid(format!(
                "code must be 1-{MAX_CODE_LEN} characters, got {:?}",
                self.code
            )));
        }
        let name_len = self.name.chars().count();
        if name_len == 0 || name_len > MAX_NAME_LEN {
            return Err(invalid(format!(
                "name must be 1-{MAX_NAME_LEN} characters"
            )));
        }
        for (slot, color) in self.colors.iter().enumerate() {
            if !is_hex_color(color) {
                return Err(invalid(format!(
                    "color {} must be {COLOR_LEN} hex digits, got {color:?}",
                    slot + 1
                )));
            }
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(invalid("radius must be a positive number"));
        }
        Ok(())
    }
}

/// Check an upload before sending it.
///
/// # Errors
///
/// Returns [`ViewerError::InvalidUpload`] for a blank name or empty file.
pub fn validate_upload(name: &str, sdf: &[u8]) -> Result<(), ViewerError> {
    if name.trim().is_empty() {
        return Err(ViewerError::InvalidUpload("molecule name is empty".to_owned()));
    }
    if sdf.is_empty() {
        return Err(ViewerError::InvalidUpload("file is empty".to_owned()));
    }
    Ok(())
}

fn is_hex_color(color: &str) -> bool {
    color.len() == COLOR_LEN && color.chars().all(|c| c.is_ascii_hexdigit())
}

fn invalid(msg: impl Into<String>) -> ViewerError {
    ViewerError::InvalidElement(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carbon() -> ElementRow {
        ElementRow {
            number: 6,
            code: "C".to_owned(),
            name: "Carbon".to_owned(),
            colors: ["808080".to_owned(), "050505".to_owned(), "020202".to_owned()],
            radius: 40.0,
        }
    }

    #[test]
    fn valid_row_passes() {
        assert!(carbon().validate().is_ok());
    }

    #[test]
    fn long_code_is_rejected() {
        let row = ElementRow {
            code: "Carb".to_owned(),
            ..carbon()
        };
        assert!(matches!(row.validate(), Err(ViewerError::InvalidElement(_))));
    }

    #[test]
    fn bad_color_is_rejected() {
        let mut row = carbon();
        row.colors[2] = "zz0000".to_owned();
        let err = row.validate().unwrap_err().to_string();
        assert!(err.contains("color 3"), "unexpected message: {err}");
    }

    #[test]
    fn non_positive_radius_is_rejected() {
        let row = ElementRow {
            radius: 0.0,
            ..carbon()
        };
        assert!(row.validate().is_err());
        let row = ElementRow {
            radius: f64::NAN,
            ..carbon()
        };
        assert!(row.validate().is_err());
    }

    #[test]
    fn upload_needs_name_and_content() {
        assert!(validate_upload("Water", b"sdf").is_ok());
        assert!(validate_upload("  ", b"sdf").is_err());
        assert!(validate_upload("Water", b"").is_err());
    }
}
