use serde::{Deserialize, Serialize};

use crate::core::FieldInput;

/// New-investor form as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvestorForm {
    pub name: String,
    pub capital: FieldInput,
    pub maintenance: FieldInput,
}

/// One message per offending field; all `None` means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capital: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintenance: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.capital.is_none() && self.maintenance.is_none()
    }
}

pub fn validate_form(form: &InvestorForm) -> FormErrors {
    let mut errors = FormErrors::default();

    let name = form.name.trim();
    if name.is_empty() {
        errors.name = Some("Enter the investor's name.".to_string());
    } else if !name.chars().all(is_name_char) {
        errors.name =
            Some("Only letters and spaces are allowed (no digits or symbols).".to_string());
    }

    match field_number(&form.capital) {
        None => errors.capital = Some("Enter the initial capital.".to_string()),
        Some(c) if !c.is_finite() || c <= 0.0 => {
            errors.capital = Some(
                "Capital must be a valid number (integer or decimal) greater than 0.".to_string(),
            );
        }
        Some(_) => {}
    }

    match field_number(&form.maintenance) {
        None => errors.maintenance = Some("Enter the monthly maintenance.".to_string()),
        Some(m) if !m.is_finite() || m < 0.0 => {
            errors.maintenance = Some(
                "Maintenance must be a valid number (integer or decimal) and >= 0.".to_string(),
            );
        }
        Some(_) => {}
    }

    errors
}

/// `None` when blank; NaN when present but not a plain decimal number.
pub(crate) fn field_number(value: &FieldInput) -> Option<f64> {
    match value {
        FieldInput::Empty => None,
        FieldInput::Number(n) => Some(*n),
        FieldInput::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                None
            } else {
                Some(text.parse::<f64>().unwrap_or(f64::NAN))
            }
        }
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch.is_whitespace() || "ÁÉÍÓÚÜÑáéíóúüñ".contains(ch)
}
