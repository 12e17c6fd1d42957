//! Declarative per-field rule descriptors.

use serde::Serialize;

use super::rules;

// == Field Kind ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Tel,
    TextArea,
    Select,
}

// == Field Rules ==
/// Rules for one field, declared once when the form schema is built.
///
/// ```ignore
/// let rules = FieldRules::email().required().max_length(120);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldRules {
    pub kind: FieldKind,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
}

impl FieldRules {
    pub fn of_kind(kind: FieldKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn text() -> Self {
        Self::of_kind(FieldKind::Text)
    }

    pub fn email() -> Self {
        Self::of_kind(FieldKind::Email)
    }

    pub fn tel() -> Self {
        Self::of_kind(FieldKind::Tel)
    }

    pub fn textarea() -> Self {
        Self::of_kind(FieldKind::TextArea)
    }

    pub fn select() -> Self {
        Self::of_kind(FieldKind::Select)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    // == Evaluate ==
    /// Evaluates every applicable rule against `value`.
    ///
    /// Format checks (email, phone) only apply to non-empty values; leaving
    /// an optional field blank is fine. A zero minimum is no rule at all.
    pub fn check(&self, value: &str) -> bool {
        let mut valid = true;

        if self.required {
            valid &= rules::is_required(value);
        }

        if !value.is_empty() {
            match self.kind {
                FieldKind::Email => valid &= rules::is_email(value),
                FieldKind::Tel => valid &= rules::is_phone(value),
                FieldKind::Text | FieldKind::TextArea | FieldKind::Select => {}
            }
        }

        if let Some(min) = self.min_length.filter(|min| *min > 0) {
            valid &= rules::min_length(value, min);
        }

        if let Some(max) = self.max_length {
            valid &= rules::max_length(value, max);
        }

        valid
    }
}

// == Field State ==
/// Visual validity state of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    #[default]
    Untouched,
    Valid,
    Invalid,
}

impl From<bool> for FieldState {
    fn from(valid: bool) -> Self {
        if valid {
            FieldState::Valid
        } else {
            FieldState::Invalid
        }
    }
}
