//! Per-category form field definitions.
//!
//! Every category that has its own post form declares an ordered list of
//! [`FieldDefinition`]s. The same definitions drive which inputs a form
//! shows, what a submission must contain, and how values are checked before
//! they are written into a listing's attribute blob.

use serde::Serialize;

pub mod registry;

pub use registry::{category_ids, get, lookup, CATEGORY_SCHEMAS};

/// Input kind of a field
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    ShortText,
    Number,
    SingleChoice,
    MultiChoice,
    LongText,
    Date,
    Boolean,
}

/// One selectable value of a choice field
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct FieldConstraints {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub step: Option<f64>,
    /// Non-empty for single- and multi-choice fields
    pub options: &'static [SelectOption],
}

impl FieldConstraints {
    pub const NONE: FieldConstraints = FieldConstraints {
        min: None,
        max: None,
        step: None,
        options: &[],
    };

    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct FieldDefinition {
    /// Key in the listing's attribute map, unique within a schema
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub constraints: FieldConstraints,
    pub placeholder: Option<&'static str>,
    pub helper_text: Option<&'static str>,
    /// Long text entered one item per line and stored as a list
    pub one_per_line: bool,
}

impl FieldDefinition {
    const fn of(kind: FieldKind, name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            constraints: FieldConstraints::NONE,
            placeholder: None,
            helper_text: None,
            one_per_line: false,
        }
    }

    pub const fn text(name: &'static str, label: &'static str) -> Self {
        Self::of(FieldKind::ShortText, name, label)
    }

    pub const fn number(name: &'static str, label: &'static str) -> Self {
        Self::of(FieldKind::Number, name, label)
    }

    pub const fn date(name: &'static str, label: &'static str) -> Self {
        Self::of(FieldKind::Date, name, label)
    }

    pub const fn checkbox(name: &'static str, label: &'static str) -> Self {
        Self::of(FieldKind::Boolean, name, label)
    }

    pub const fn long_text(name: &'static str, label: &'static str) -> Self {
        Self::of(FieldKind::LongText, name, label)
    }

    /// Long text stored as an ordered list of its non-blank lines
    pub const fn line_list(name: &'static str, label: &'static str) -> Self {
        let mut field = Self::of(FieldKind::LongText, name, label);
        field.one_per_line = true;
        field
    }

    pub const fn select(
        name: &'static str,
        label: &'static str,
        options: &'static [SelectOption],
    ) -> Self {
        let mut field = Self::of(FieldKind::SingleChoice, name, label);
        field.constraints.options = options;
        field
    }

    pub const fn multi_select(
        name: &'static str,
        label: &'static str,
        options: &'static [SelectOption],
    ) -> Self {
        let mut field = Self::of(FieldKind::MultiChoice, name, label);
        field.constraints.options = options;
        field
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn min(mut self, min: f64) -> Self {
        self.constraints.min = Some(min);
        self
    }

    pub const fn max(mut self, max: f64) -> Self {
        self.constraints.max = Some(max);
        self
    }

    pub const fn step(mut self, step: f64) -> Self {
        self.constraints.step = Some(step);
        self
    }

    pub const fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub const fn helper(mut self, helper_text: &'static str) -> Self {
        self.helper_text = Some(helper_text);
        self
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.kind, FieldKind::SingleChoice | FieldKind::MultiChoice)
    }
}

/// Form definition of one category
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CategorySchema {
    /// Category slug this schema belongs to
    pub category_id: &'static str,
    pub display_name: &'static str,
    pub fields: &'static [FieldDefinition],
    pub media_guidance: Option<&'static str>,
}

impl CategorySchema {
    pub fn field(&self, name: &str) -> Option<&'static FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static FieldDefinition> {
        self.fields.iter().filter(|field| field.required)
    }
}
