//! Form Module
//!
//! Form schemas (built once) and form instances (filled per submission).

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::{FieldRules, FieldState};

// == Schema ==
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub rules: FieldRules,
}

/// Declared shape of a form: its id and each field's rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    id: String,
    fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, rules: FieldRules) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            rules,
        });
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Creates an empty form instance of this schema.
    pub fn instantiate(&self) -> Form {
        Form {
            id: self.id.clone(),
            fields: self
                .fields
                .iter()
                .map(|spec| Field {
                    name: spec.name.clone(),
                    rules: spec.rules.clone(),
                    value: String::new(),
                    state: FieldState::Untouched,
                })
                .collect(),
        }
    }
}

// == Form Instance ==
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub rules: FieldRules,
    pub value: String,
    pub state: FieldState,
}

impl Field {
    /// Re-evaluates the rules and records the resulting state.
    pub fn validate(&mut self) -> bool {
        let valid = self.rules.check(&self.value);
        self.state = FieldState::from(valid);
        valid
    }
}

/// Per-field outcome returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldReport {
    pub name: String,
    pub state: FieldState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    id: String,
    fields: Vec<Field>,
}

impl Form {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Sets a field value. Returns false if the form has no such field.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Fills declared fields from `values`; undeclared names are ignored.
    pub fn fill<K, V>(&mut self, values: impl IntoIterator<Item = (K, V)>)
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        for (name, value) in values {
            self.set_value(name.as_ref(), value);
        }
    }

    /// Validates one field; `None` if it does not exist.
    pub fn validate_field(&mut self, name: &str) -> Option<bool> {
        self.fields
            .iter_mut()
            .find(|field| field.name == name)
            .map(Field::validate)
    }

    // == Validate ==
    /// Validates every field and returns the logical AND.
    ///
    /// All fields are evaluated so each gets its visual state.
    pub fn validate(&mut self) -> bool {
        self.fields
            .iter_mut()
            .fold(true, |all_valid, field| field.validate() && all_valid)
    }

    /// Clears every value and visual state.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value.clear();
            field.state = FieldState::Untouched;
        }
    }

    pub fn values(&self) -> BTreeMap<String, String> {
        self.fields
            .iter()
            .map(|field| (field.name.clone(), field.value.clone()))
            .collect()
    }

    pub fn report(&self) -> Vec<FieldReport> {
        self.fields
            .iter()
            .map(|field| FieldReport {
                name: field.name.clone(),
                state: field.state,
            })
            .collect()
    }
}

// == Shop Forms ==
pub const COMMENT_FORM_ID: &str = "comment";
pub const INQUIRY_FORM_ID: &str = "inquiry";

/// Product comment form.
pub fn comment_form() -> FormSchema {
    FormSchema::new(COMMENT_FORM_ID).field(
        "comment_text",
        FieldRules::textarea().required().max_length(500),
    )
}

/// Product inquiry form.
pub fn inquiry_form() -> FormSchema {
    FormSchema::new(INQUIRY_FORM_ID)
        .field("inquiry_type", FieldRules::select().required())
        .field("title", FieldRules::text().required().max_length(100))
        .field(
            "content",
            FieldRules::textarea().required().min_length(10).max_length(2000),
        )
        .field("email", FieldRules::email().required())
}

// == Registry ==
/// Form schemas by id.
#[derive(Debug, Clone, Default)]
pub struct FormRegistry {
    schemas: HashMap<String, FormSchema>,
}

impl FormRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the comment and inquiry forms.
    pub fn with_shop_forms() -> Self {
        Self::new().register(comment_form()).register(inquiry_form())
    }

    pub fn register(mut self, schema: FormSchema) -> Self {
        self.schemas.insert(schema.id().to_string(), schema);
        self
    }

    pub fn get(&self, id: &str) -> Option<&FormSchema> {
        self.schemas.get(id)
    }
}
