//! JSON listing drafts, the command line's way of filling a form.

use serde::Deserialize;
use thiserror::Error;

use super::ListingForm;
use crate::models::{AttributeValue, Attributes, Category, Condition, Country, PriceKind, SellerKind};
use crate::schema::FieldKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("unknown category {0}")]
    UnknownCategory(String),
    #[error("unknown country {0}")]
    UnknownCountry(String),
}

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListingDraft {
    /// Category slug
    pub category: String,
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(rename = "price_type", default)]
    pub price_kind: PriceKind,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub location: String,
    /// Country codes or names
    #[serde(default)]
    pub countries: Vec<String>,
    pub seller_name: String,
    #[serde(rename = "seller_type", default)]
    pub seller_kind: SellerKind,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub primary_image: usize,
}

impl ListingDraft {
    /// Fill a form the same way a person would, field by field
    pub fn to_form(
        &self,
        categories: &[Category],
        countries: &[Country],
    ) -> Result<ListingForm, DraftError> {
        let category = categories
            .iter()
            .find(|category| category.slug == self.category)
            .ok_or_else(|| DraftError::UnknownCategory(self.category.clone()))?;

        let mut form = ListingForm::new();
        let schema = form.select_category(category);
        form.title = self.title.clone();
        form.description = self.description.clone();
        form.price = self.price;
        form.currency = self.currency.clone();
        form.price_kind = self.price_kind;
        form.condition = self.condition;
        form.location = self.location.clone();
        form.seller_name = self.seller_name.clone();
        form.seller_kind = self.seller_kind;
        form.phone = self.phone.clone();
        form.whatsapp = self.whatsapp.clone();
        form.email = self.email.clone();
        form.website = self.website.clone();

        for wanted in &self.countries {
            let country = countries
                .iter()
                .find(|country| {
                    country.code.eq_ignore_ascii_case(wanted) || country.name.eq_ignore_ascii_case(wanted)
                })
                .ok_or_else(|| DraftError::UnknownCountry(wanted.clone()))?;
            if !form.countries().contains(&country.id) {
                form.toggle_country(country.id);
            }
        }

        for (name, value) in &self.attributes {
            let kind = schema.and_then(|schema| schema.field(name)).map(|field| field.kind);
            match (value, kind) {
                (AttributeValue::Text(raw), _) => form.set_field_input(name, raw),
                (AttributeValue::Lines(options), Some(FieldKind::MultiChoice)) => {
                    for option in options {
                        form.toggle_option(name, option, true);
                    }
                }
                (value, _) => form.set_attribute(name, value.clone()),
            }
        }

        Ok(form)
    }
}
