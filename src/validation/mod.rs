//! Validation Module
//!
//! Field predicates, declarative rule descriptors and form-level validation.

mod field;
mod form;
pub mod rules;

pub use field::{FieldKind, FieldRules, FieldState};
pub use form::{
    comment_form, inquiry_form, Field, FieldReport, FieldSpec, Form, FormRegistry, FormSchema,
    COMMENT_FORM_ID, INQUIRY_FORM_ID,
};
