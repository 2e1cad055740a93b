//! Listing post form: state, field input handling and validation.

use uuid::Uuid;

use crate::models::{
    AttributeValue, Attributes, Category, Condition, ListingStatus, NewListing, PriceKind,
    SellerKind,
};
use crate::schema::{self, CategorySchema, FieldKind};

pub mod draft;
pub mod images;
pub mod pipeline;
mod validation;

pub use draft::{DraftError, ListingDraft};
pub use images::{ImageQueue, ImageQueueError, PendingImage, MAX_PENDING_IMAGES};
pub use pipeline::{Submitted, SubmissionPipeline};
pub use validation::{check_attributes, Violation};

/// Category chosen on the form together with its schema, if it has one
#[derive(Debug, Clone)]
pub struct SelectedCategory {
    pub id: Uuid,
    pub slug: String,
    pub schema: Option<&'static CategorySchema>,
}

/// State of one listing post form
#[derive(Debug, Clone)]
pub struct ListingForm {
    category: Option<SelectedCategory>,
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub currency: String,
    pub price_kind: PriceKind,
    pub condition: Condition,
    pub location: String,
    countries: Vec<Uuid>,
    pub seller_name: String,
    pub seller_kind: SellerKind,
    pub phone: String,
    pub whatsapp: String,
    pub email: String,
    pub website: String,
    attributes: Attributes,
    images: ImageQueue,
}

impl Default for ListingForm {
    fn default() -> Self {
        Self {
            category: None,
            title: String::new(),
            description: String::new(),
            price: None,
            currency: "USD".to_string(),
            price_kind: PriceKind::Fixed,
            condition: Condition::New,
            location: String::new(),
            countries: Vec::new(),
            seller_name: String::new(),
            seller_kind: SellerKind::Individual,
            phone: String::new(),
            whatsapp: String::new(),
            email: String::new(),
            website: String::new(),
            attributes: Attributes::new(),
            images: ImageQueue::new(),
        }
    }
}

/// Split one-per-line input into its non-blank lines
pub fn split_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

impl ListingForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch category. Attribute values never carry over between categories.
    pub fn select_category(&mut self, category: &Category) -> Option<&'static CategorySchema> {
        let schema = schema::lookup(&category.slug);
        self.category = Some(SelectedCategory {
            id: category.id,
            slug: category.slug.clone(),
            schema,
        });
        self.attributes.clear();
        schema
    }

    pub fn category(&self) -> Option<&SelectedCategory> {
        self.category.as_ref()
    }

    pub fn schema(&self) -> Option<&'static CategorySchema> {
        self.category.as_ref().and_then(|category| category.schema)
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn set_attribute(&mut self, name: &str, value: AttributeValue) {
        self.attributes.insert(name.to_string(), value);
    }

    /// Store raw input for a field, converted according to the field's kind.
    ///
    /// Numbers are stored as numbers when they parse, one-per-line text as a
    /// list of lines. Fields the schema does not know are stored as text.
    pub fn set_field_input(&mut self, name: &str, raw: &str) {
        let field = self.schema().and_then(|schema| schema.field(name));
        let value = match field {
            Some(field) if field.kind == FieldKind::Number => {
                AttributeValue::parse_number(raw).unwrap_or_else(|| raw.into())
            }
            Some(field) if field.one_per_line => AttributeValue::Lines(split_lines(raw)),
            Some(field) if field.kind == FieldKind::Boolean => {
                match raw.trim().to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => AttributeValue::Flag(true),
                    "false" | "no" | "off" | "0" | "" => AttributeValue::Flag(false),
                    _ => raw.into(),
                }
            }
            Some(field) if field.kind == FieldKind::MultiChoice => {
                AttributeValue::Lines(vec![raw.to_string()])
            }
            _ => raw.into(),
        };
        self.set_attribute(name, value);
    }

    /// Check or uncheck one option of a multi-choice field. Unchecking the
    /// last option leaves an empty list in place.
    pub fn toggle_option(&mut self, name: &str, option: &str, selected: bool) {
        let entry = self
            .attributes
            .entry(name.to_string())
            .or_insert_with(|| AttributeValue::Lines(Vec::new()));
        if !matches!(entry, AttributeValue::Lines(_)) {
            *entry = AttributeValue::Lines(entry.to_lines());
        }
        if let AttributeValue::Lines(values) = entry {
            if selected {
                if !values.iter().any(|value| value == option) {
                    values.push(option.to_string());
                }
            } else {
                values.retain(|value| value != option);
            }
        }
    }

    /// Add or remove a target country
    pub fn toggle_country(&mut self, country_id: Uuid) {
        if let Some(pos) = self.countries.iter().position(|id| *id == country_id) {
            self.countries.remove(pos);
        } else {
            self.countries.push(country_id);
        }
    }

    pub fn countries(&self) -> &[Uuid] {
        &self.countries
    }

    pub fn add_images(&mut self, batch: Vec<PendingImage>) -> Result<(), ImageQueueError> {
        self.images.add(batch)
    }

    pub fn remove_image(&mut self, index: usize) -> Option<PendingImage> {
        self.images.remove(index)
    }

    pub fn set_primary_image(&mut self, index: usize) -> bool {
        self.images.set_primary(index)
    }

    pub fn images(&self) -> &ImageQueue {
        &self.images
    }

    /// First reason the form cannot be submitted
    pub fn validate(&self) -> Result<(), Violation> {
        match self.validate_all().into_iter().next() {
            Some(violation) => Err(violation),
            None => Ok(()),
        }
    }

    /// Every reason the form cannot be submitted, in the order they are
    /// checked
    pub fn validate_all(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        if self.category.is_none() {
            violations.push(Violation::MissingCategory);
        }
        if self.title.trim().is_empty() {
            violations.push(Violation::MissingTitle);
        }
        if self.description.trim().is_empty() {
            violations.push(Violation::MissingDescription);
        }
        if !self.price.is_some_and(|price| price.is_finite() && price > 0.0) {
            violations.push(Violation::InvalidPrice);
        }
        if self.countries.is_empty() {
            violations.push(Violation::NoCountry);
        }
        if self.seller_name.trim().is_empty() {
            violations.push(Violation::MissingSellerName);
        }
        if [&self.phone, &self.whatsapp, &self.email]
            .iter()
            .all(|contact| contact.trim().is_empty())
        {
            violations.push(Violation::NoContactMethod);
        }
        if let Some(schema) = self.schema() {
            violations.extend(check_attributes(schema, &self.attributes));
        }

        violations
    }

    /// Validate and build the listing row to insert
    pub fn to_new_listing(&self) -> Result<NewListing, Violation> {
        self.validate()?;
        let category = self.category.as_ref().ok_or(Violation::MissingCategory)?;
        let price = self.price.ok_or(Violation::InvalidPrice)?;

        Ok(NewListing {
            category_id: category.id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price,
            currency: self.currency.clone(),
            price_kind: self.price_kind,
            condition: self.condition,
            location_details: self.location.trim().to_string(),
            seller_name: self.seller_name.trim().to_string(),
            seller_kind: self.seller_kind,
            seller_phone: non_blank(&self.phone),
            seller_whatsapp: non_blank(&self.whatsapp),
            seller_email: non_blank(&self.email),
            seller_website: non_blank(&self.website),
            attributes: self.attributes.clone(),
            status: ListingStatus::Active,
        })
    }
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
