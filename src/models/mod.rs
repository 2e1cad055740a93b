use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

mod attributes;

pub use attributes::{AttributeValue, Attributes};

/// How the asking price should be read
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriceKind {
    #[default]
    Fixed,
    Negotiable,
    Hourly,
    Daily,
    Monthly,
    Yearly,
}

impl PriceKind {
    /// Suffix shown after a price, empty for one-off prices
    pub fn period(self) -> &'static str {
        match self {
            PriceKind::Hourly => "per hour",
            PriceKind::Daily => "per day",
            PriceKind::Monthly => "per month",
            PriceKind::Yearly => "per year",
            PriceKind::Fixed | PriceKind::Negotiable => "",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SellerKind {
    #[default]
    Individual,
    Business,
    Dealer,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    #[default]
    New,
    Used,
    LikeNew,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Condition::New => "new",
            Condition::Used => "used",
            Condition::LikeNew => "like-new",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    Pending,
    #[default]
    Active,
    Sold,
    Expired,
    Rejected,
}

/// Row of `marketplace_categories`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

/// Row of `countries`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Country {
    pub id: Uuid,
    pub name: String,
    pub code: String,
}

/// Insert payload for `marketplace_listings`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewListing {
    pub category_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    #[serde(rename = "price_type")]
    pub price_kind: PriceKind,
    pub condition: Condition,
    pub location_details: String,
    pub seller_name: String,
    #[serde(rename = "seller_type")]
    pub seller_kind: SellerKind,
    pub seller_phone: Option<String>,
    pub seller_whatsapp: Option<String>,
    pub seller_email: Option<String>,
    pub seller_website: Option<String>,
    pub attributes: Attributes,
    pub status: ListingStatus,
}

/// Persisted marketplace listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Listing {
    pub id: Uuid,
    pub category_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: Option<f64>,
    pub currency: String,
    #[serde(rename = "price_type", default)]
    pub price_kind: PriceKind,
    pub condition: Option<Condition>,
    #[serde(default)]
    pub location_details: Option<String>,
    pub seller_name: String,
    #[serde(rename = "seller_type", default)]
    pub seller_kind: SellerKind,
    pub seller_phone: Option<String>,
    pub seller_whatsapp: Option<String>,
    pub seller_email: Option<String>,
    #[serde(default)]
    pub seller_website: Option<String>,
    #[serde(default)]
    pub attributes: Attributes,
    pub status: ListingStatus,
    #[serde(default)]
    pub views_count: i64,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Materialize a stored row from an insert payload
    pub fn from_new(id: Uuid, new: &NewListing, now: DateTime<Utc>) -> Self {
        Self {
            id,
            category_id: new.category_id,
            title: new.title.clone(),
            description: new.description.clone(),
            price: Some(new.price),
            currency: new.currency.clone(),
            price_kind: new.price_kind,
            condition: Some(new.condition),
            location_details: Some(new.location_details.clone()),
            seller_name: new.seller_name.clone(),
            seller_kind: new.seller_kind,
            seller_phone: new.seller_phone.clone(),
            seller_whatsapp: new.seller_whatsapp.clone(),
            seller_email: new.seller_email.clone(),
            seller_website: new.seller_website.clone(),
            attributes: new.attributes.clone(),
            status: new.status,
            views_count: 0,
            is_featured: false,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Insert payload for `marketplace_listing_images`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewListingImage {
    pub listing_id: Uuid,
    pub image_url: String,
    pub display_order: i32,
    pub is_primary: bool,
}

/// Row of `marketplace_listing_images`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingImage {
    pub id: Uuid,
    pub listing_id: Uuid,
    pub image_url: String,
    pub display_order: i32,
    pub is_primary: bool,
}

/// Row of `marketplace_listing_countries`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingCountry {
    pub listing_id: Uuid,
    pub country_id: Uuid,
}

/// A listing joined with everything its detail page shows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListingDetail {
    pub listing: Listing,
    pub category: Option<Category>,
    /// Sorted by `display_order`
    pub images: Vec<ListingImage>,
    pub countries: Vec<Country>,
}

impl ListingDetail {
    pub fn primary_image(&self) -> Option<&ListingImage> {
        self.images
            .iter()
            .find(|image| image.is_primary)
            .or_else(|| self.images.first())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_listing_uses_storage_column_names() {
        let new = NewListing {
            category_id: Uuid::nil(),
            title: "Camry".to_string(),
            description: "Clean".to_string(),
            price: 12_500.0,
            currency: "USD".to_string(),
            price_kind: PriceKind::Negotiable,
            condition: Condition::LikeNew,
            location_details: "Accra".to_string(),
            seller_name: "Ama".to_string(),
            seller_kind: SellerKind::Dealer,
            seller_phone: Some("+233200000000".to_string()),
            seller_whatsapp: None,
            seller_email: None,
            seller_website: None,
            attributes: Attributes::new(),
            status: ListingStatus::Active,
        };

        let value = serde_json::to_value(&new).unwrap();
        assert_eq!(value["price_type"], json!("negotiable"));
        assert_eq!(value["seller_type"], json!("dealer"));
        assert_eq!(value["condition"], json!("like-new"));
        assert_eq!(value["status"], json!("active"));
        assert_eq!(value["seller_whatsapp"], json!(null));
    }

    #[test]
    fn listing_row_tolerates_missing_optional_columns() {
        let row = json!({
            "id": "8a4c7c1e-3c55-4b58-8f5e-0d1a8f0f2c11",
            "category_id": "0b7bb0b4-96f5-4a6f-9b1f-5a3e46fb5a9e",
            "title": "Flat",
            "description": "Two rooms",
            "price": null,
            "currency": "USD",
            "condition": null,
            "seller_name": "Kofi",
            "seller_phone": null,
            "seller_whatsapp": null,
            "seller_email": "kofi@example.com",
            "status": "active",
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:00:00Z"
        });

        let listing: Listing = serde_json::from_value(row).unwrap();
        assert_eq!(listing.price_kind, PriceKind::Fixed);
        assert!(listing.attributes.is_empty());
        assert_eq!(listing.views_count, 0);
    }

    #[test]
    fn primary_image_falls_back_to_first() {
        let listing_id = Uuid::new_v4();
        let image = |order: i32, primary: bool| ListingImage {
            id: Uuid::new_v4(),
            listing_id,
            image_url: format!("https://cdn.example.com/{order}.jpg"),
            display_order: order,
            is_primary: primary,
        };
        let mut detail = ListingDetail {
            listing: Listing::from_new(
                listing_id,
                &NewListing {
                    category_id: Uuid::nil(),
                    title: String::new(),
                    description: String::new(),
                    price: 1.0,
                    currency: "USD".to_string(),
                    price_kind: PriceKind::Fixed,
                    condition: Condition::New,
                    location_details: String::new(),
                    seller_name: String::new(),
                    seller_kind: SellerKind::Individual,
                    seller_phone: None,
                    seller_whatsapp: None,
                    seller_email: None,
                    seller_website: None,
                    attributes: Attributes::new(),
                    status: ListingStatus::Active,
                },
                Utc::now(),
            ),
            category: None,
            images: vec![image(0, false), image(1, true)],
            countries: vec![],
        };

        assert_eq!(detail.primary_image().unwrap().display_order, 1);
        detail.images[1].is_primary = false;
        assert_eq!(detail.primary_image().unwrap().display_order, 0);
    }
}
