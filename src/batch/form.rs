use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::types::Variety;

/// Raw new-batch form payload, exactly as the user typed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBatchForm {
    pub weight: String,
    pub variety: String,
    /// ISO calendar date, `YYYY-MM-DD`.
    pub date: String,
    #[serde(default)]
    pub notes: String,
}

impl NewBatchForm {
    /// Blank form with the default variety and the given start date.
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            weight: String::new(),
            variety: Variety::Amelonado.name().to_string(),
            date: today.format("%Y-%m-%d").to_string(),
            notes: String::new(),
        }
    }

    /// Checks every field and reports all problems at once.
    pub fn validate(&self) -> Result<ValidBatchForm, ValidationErrors> {
        let mut errors = Vec::new();

        let weight_kg = match parse_weight(&self.weight) {
            Ok(w) => Some(w),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let variety = if self.variety.trim().is_empty() {
            errors.push(FieldError::Missing("variety"));
            None
        } else {
            match self.variety.parse::<Variety>() {
                Ok(v) => Some(v),
                Err(()) => {
                    errors.push(FieldError::UnknownVariety(self.variety.trim().to_string()));
                    None
                }
            }
        };

        let start_date = if self.date.trim().is_empty() {
            errors.push(FieldError::Missing("date"));
            None
        } else {
            match NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d") {
                Ok(d) => Some(d),
                Err(_) => {
                    errors.push(FieldError::InvalidDate(self.date.trim().to_string()));
                    None
                }
            }
        };

        let notes = match self.notes.trim() {
            "" => None,
            text => Some(text.to_string()),
        };

        match (weight_kg, variety, start_date) {
            (Some(weight_kg), Some(variety), Some(start_date)) if errors.is_empty() => {
                Ok(ValidBatchForm {
                    weight_kg,
                    variety,
                    start_date,
                    notes,
                })
            }
            _ => Err(ValidationErrors(errors)),
        }
    }
}

fn parse_weight(raw: &str) -> Result<f64, FieldError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldError::Missing("weight"));
    }

    let value: f64 = raw
        .parse()
        .map_err(|_| FieldError::WeightNotNumeric(raw.to_string()))?;

    if !value.is_finite() {
        return Err(FieldError::WeightNotNumeric(raw.to_string()));
    }
    if value <= 0.0 {
        return Err(FieldError::WeightNotPositive(raw.to_string()));
    }

    Ok(value)
}

/// A form payload that passed validation. Only [`NewBatchForm::validate`]
/// produces one.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidBatchForm {
    weight_kg: f64,
    variety: Variety,
    start_date: NaiveDate,
    notes: Option<String>,
}

impl ValidBatchForm {
    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn variety(&self) -> Variety {
        self.variety
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("weight '{0}' is not a number")]
    WeightNotNumeric(String),

    #[error("weight '{0}' must be greater than zero")]
    WeightNotPositive(String),

    #[error("unknown variety '{0}': expected Amelonado, Amazonia, Trinitario or Criollo")]
    UnknownVariety(String),

    #[error("date '{0}' is not a calendar date (YYYY-MM-DD)")]
    InvalidDate(String),
}

impl FieldError {
    /// Name of the form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Missing(field) => field,
            FieldError::WeightNotNumeric(_) | FieldError::WeightNotPositive(_) => "weight",
            FieldError::UnknownVariety(_) => "variety",
            FieldError::InvalidDate(_) => "date",
        }
    }
}

/// Every field-level problem found in one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "validation failed: {}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(weight: &str, variety: &str, date: &str, notes: &str) -> NewBatchForm {
        NewBatchForm {
            weight: weight.to_string(),
            variety: variety.to_string(),
            date: date.to_string(),
            notes: notes.to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let valid = form("150", "Amelonado", "2023-10-20", "").validate().unwrap();
        assert_eq!(valid.weight_kg(), 150.0);
        assert_eq!(valid.variety(), Variety::Amelonado);
        assert_eq!(
            valid.start_date(),
            NaiveDate::from_ymd_opt(2023, 10, 20).unwrap()
        );
        assert_eq!(valid.notes(), None);
    }

    #[test]
    fn test_notes_are_trimmed() {
        let valid = form("12.5", "criollo", "2024-01-02", "  wet harvest ")
            .validate()
            .unwrap();
        assert_eq!(valid.notes(), Some("wet harvest"));
        assert_eq!(valid.variety(), Variety::Criollo);
    }

    #[test]
    fn test_weight_must_be_positive_number() {
        for bad in ["0", "-3", "abc", "NaN", "inf"] {
            let errors = form(bad, "Amelonado", "2023-10-20", "")
                .validate()
                .unwrap_err();
            assert!(errors.has_field("weight"), "weight '{}' accepted", bad);
        }
    }

    #[test]
    fn test_all_errors_reported_together() {
        let errors = form("", "", "20/10/2023", "").validate().unwrap_err();
        assert_eq!(errors.errors().len(), 3);
        assert!(errors.has_field("weight"));
        assert!(errors.has_field("variety"));
        assert!(errors.has_field("date"));
    }

    #[test]
    fn test_unknown_variety() {
        let errors = form("10", "Robusta", "2023-10-20", "").validate().unwrap_err();
        assert_eq!(
            errors.errors(),
            &[FieldError::UnknownVariety("Robusta".to_string())]
        );
        assert!(errors.to_string().contains("Robusta"));
    }

    #[test]
    fn test_blank_form_defaults() {
        let blank = NewBatchForm::blank(NaiveDate::from_ymd_opt(2023, 10, 20).unwrap());
        assert_eq!(blank.variety, "Amelonado");
        assert_eq!(blank.date, "2023-10-20");
        assert!(blank.weight.is_empty());
    }
}
