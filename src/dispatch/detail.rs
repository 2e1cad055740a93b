use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{resolve_renderer, RendererKind};
use crate::error::StoreError;
use crate::models::{AttributeValue, Attributes, Listing, ListingDetail, PriceKind};
use crate::schema::{self, CategorySchema, FieldKind};
use crate::store::DataStore;

/// Number of same-category listings shown next to a listing
pub const RELATED_LIMIT: usize = 4;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailFact {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailList {
    pub label: String,
    pub items: Vec<String>,
}

/// What a category renderer shows for one listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub renderer: RendererKind,
    pub title: String,
    pub price_line: String,
    pub facts: Vec<DetailFact>,
    pub lists: Vec<DetailList>,
    pub primary_image: Option<String>,
    pub countries: Vec<String>,
}

/// Display value used when none of a fact's keys hold a value
#[derive(Debug, Clone, Copy)]
enum Fallback {
    Text(&'static str),
    SellerName,
    Omit,
}

struct FactSpec {
    label: &'static str,
    keys: &'static [&'static str],
    fallback: Fallback,
}

const fn fact(label: &'static str, keys: &'static [&'static str]) -> FactSpec {
    FactSpec {
        label,
        keys,
        fallback: Fallback::Text(NOT_AVAILABLE),
    }
}

const fn fact_or(label: &'static str, keys: &'static [&'static str], fallback: Fallback) -> FactSpec {
    FactSpec {
        label,
        keys,
        fallback,
    }
}

struct Layout {
    facts: &'static [FactSpec],
    lists: &'static [(&'static str, &'static str)],
}

const PROPERTY: Layout = Layout {
    facts: &[
        fact_or("Property Type", &["property_type"], Fallback::Text("Property")),
        fact("Bedrooms", &["bedrooms"]),
        fact("Bathrooms", &["bathrooms"]),
        fact("Area (sq ft)", &["sqft", "area"]),
        fact_or("Furnished", &["furnished"], Fallback::Text("No")),
        fact_or("Parking", &["parking"], Fallback::Text("No")),
        fact_or("Year Built", &["year_built"], Fallback::Omit),
    ],
    lists: &[("Amenities", "amenities")],
};

const MOTORS: Layout = Layout {
    facts: &[
        fact("Make", &["make"]),
        fact("Model", &["model"]),
        fact("Year", &["year"]),
        fact("Mileage (km)", &["mileage", "kilometers"]),
        fact("Fuel Type", &["fuel_type"]),
        fact("Transmission", &["transmission"]),
        fact("Body Type", &["body_type"]),
        fact("Color", &["color"]),
    ],
    lists: &[("Features", "features")],
};

const JOBS: Layout = Layout {
    facts: &[
        fact_or("Company", &["company_name"], Fallback::SellerName),
        fact_or("Job Type", &["job_type"], Fallback::Text("Full-time")),
        fact("Industry", &["industry"]),
        fact("Experience", &["experience"]),
        fact("Education", &["education"]),
        fact_or("Application Deadline", &["deadline"], Fallback::Omit),
    ],
    lists: &[
        ("Requirements", "requirements"),
        ("Responsibilities", "responsibilities"),
        ("Benefits", "benefits"),
    ],
};

const ELECTRONICS: Layout = Layout {
    facts: &[
        fact("Brand", &["brand"]),
        fact("Model", &["model"]),
        fact("Storage", &["storage", "memory"]),
        fact("RAM", &["ram"]),
        fact("Processor", &["processor", "cpu"]),
        fact("Screen Size", &["screen_size", "display"]),
        fact("Battery", &["battery"]),
        fact("Camera", &["camera"]),
        fact("Color", &["color"]),
        fact_or("Warranty", &["warranty"], Fallback::Text("No")),
    ],
    lists: &[("Features", "features"), ("Accessories", "accessories")],
};

const FASHION: Layout = Layout {
    facts: &[
        fact("Brand", &["brand"]),
        fact("Category", &["category_type"]),
        fact("Size", &["size"]),
        fact("Gender", &["gender"]),
        fact("Color", &["color"]),
        fact("Material", &["material"]),
        fact("Style", &["style"]),
        fact("Season", &["season"]),
    ],
    lists: &[("Features", "features")],
};

const BUSINESS: Layout = Layout {
    facts: &[
        fact("Business Type", &["business_type"]),
        fact("Industry", &["industry"]),
        fact("Established", &["established_year"]),
        fact("Employees", &["employees"]),
        fact("Annual Revenue", &["revenue"]),
        fact("Equipment Included", &["equipment_included"]),
        fact("Lease Terms", &["lease_terms"]),
        fact("Reason for Sale", &["reason_for_sale"]),
    ],
    lists: &[("Features", "features")],
};

fn layout(renderer: RendererKind) -> Option<&'static Layout> {
    match renderer {
        RendererKind::Property => Some(&PROPERTY),
        RendererKind::Motors => Some(&MOTORS),
        RendererKind::Jobs => Some(&JOBS),
        RendererKind::Electronics => Some(&ELECTRONICS),
        RendererKind::Fashion => Some(&FASHION),
        RendererKind::Business => Some(&BUSINESS),
        _ => None,
    }
}

/// First non-empty value among `keys`
fn first_value<'a>(attributes: &'a Attributes, keys: &[&str]) -> Option<&'a AttributeValue> {
    keys.iter()
        .filter_map(|key| attributes.get(*key))
        .find(|value| !value.is_empty())
}

fn layout_view(layout: &Layout, listing: &Listing) -> (Vec<DetailFact>, Vec<DetailList>) {
    let facts = layout
        .facts
        .iter()
        .filter_map(|spec| {
            let value = match (first_value(&listing.attributes, spec.keys), spec.fallback) {
                (Some(value), _) => value.to_string(),
                (None, Fallback::Text(text)) => text.to_string(),
                (None, Fallback::SellerName) => listing.seller_name.clone(),
                (None, Fallback::Omit) => return None,
            };
            Some(DetailFact {
                label: spec.label.to_string(),
                value,
            })
        })
        .collect();

    let lists = layout
        .lists
        .iter()
        .map(|(label, key)| DetailList {
            label: label.to_string(),
            items: listing
                .attributes
                .get(*key)
                .map(AttributeValue::to_lines)
                .unwrap_or_default(),
        })
        .collect();

    (facts, lists)
}

fn is_list_field(kind: FieldKind, one_per_line: bool) -> bool {
    kind == FieldKind::MultiChoice || one_per_line
}

/// Facts and lists following a schema's field order
fn schema_view(schema: &CategorySchema, attributes: &Attributes) -> (Vec<DetailFact>, Vec<DetailList>) {
    let mut facts = Vec::new();
    let mut lists = Vec::new();
    for field in schema.fields {
        let value = attributes.get(field.name);
        if is_list_field(field.kind, field.one_per_line) {
            lists.push(DetailList {
                label: field.label.to_string(),
                items: value.map(AttributeValue::to_lines).unwrap_or_default(),
            });
            continue;
        }
        let value = match value {
            Some(value) if !value.is_empty() => display_choice(field.constraints.options, value),
            _ => NOT_AVAILABLE.to_string(),
        };
        facts.push(DetailFact {
            label: field.label.to_string(),
            value,
        });
    }
    (facts, lists)
}

fn display_choice(options: &[schema::SelectOption], value: &AttributeValue) -> String {
    value
        .as_text()
        .and_then(|text| options.iter().find(|option| option.value == text))
        .map(|option| option.label.to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Every stored attribute, labelled from the schema when one matches the slug
fn generic_view(slug: &str, attributes: &Attributes) -> (Vec<DetailFact>, Vec<DetailList>) {
    let schema = schema::lookup(slug);
    let label_for = |key: &str| {
        schema
            .and_then(|schema| schema.field(key))
            .map(|field| field.label.to_string())
            .unwrap_or_else(|| humanize(key))
    };

    let mut facts = Vec::new();
    let mut lists = Vec::new();
    for (key, value) in attributes {
        match value {
            AttributeValue::Lines(items) => lists.push(DetailList {
                label: label_for(key),
                items: items.clone(),
            }),
            _ if value.is_empty() => {}
            _ => facts.push(DetailFact {
                label: label_for(key),
                value: value.to_string(),
            }),
        }
    }
    (facts, lists)
}

fn humanize(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Amount with thousands separators and at most two decimals
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let fraction = fraction.trim_end_matches('0');
    let sign = if amount < 0.0 { "-" } else { "" };
    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

/// Salary shown on job listings
pub fn salary_line(listing: &Listing) -> String {
    let Some(price) = listing.price.filter(|price| *price > 0.0) else {
        return "Negotiable".to_string();
    };
    let amount = format!("{} {}", listing.currency, format_amount(price));
    match listing.price_kind {
        PriceKind::Monthly | PriceKind::Yearly => {
            format!("{amount} {}", listing.price_kind.period())
        }
        _ => amount,
    }
}

fn price_line(listing: &Listing) -> String {
    let Some(price) = listing.price.filter(|price| *price > 0.0) else {
        return "Contact for price".to_string();
    };
    let amount = format!("{} {}", listing.currency, format_amount(price));
    match listing.price_kind {
        PriceKind::Fixed => amount,
        PriceKind::Negotiable => format!("{amount} (negotiable)"),
        kind => format!("{amount} {}", kind.period()),
    }
}

/// Build the view a renderer shows for a loaded listing
pub fn render(detail: &ListingDetail) -> DetailView {
    let slug = detail
        .category
        .as_ref()
        .map(|category| category.slug.as_str())
        .unwrap_or("");
    let renderer = resolve_renderer(slug);
    let listing = &detail.listing;

    let (facts, lists) = match (layout(renderer), renderer.schema_id().and_then(schema::get)) {
        (Some(layout), _) => layout_view(layout, listing),
        (None, Some(schema)) => schema_view(schema, &listing.attributes),
        (None, None) => generic_view(slug, &listing.attributes),
    };

    let price_line = match renderer {
        RendererKind::Jobs => salary_line(listing),
        _ => price_line(listing),
    };

    DetailView {
        renderer,
        title: listing.title.clone(),
        price_line,
        facts,
        lists,
        primary_image: detail.primary_image().map(|image| image.image_url.clone()),
        countries: detail
            .countries
            .iter()
            .map(|country| country.name.clone())
            .collect(),
    }
}

/// A listing ready to show, with its neighbours in the same category
#[derive(Debug, Clone)]
pub struct OpenedListing {
    pub detail: ListingDetail,
    pub view: DetailView,
    pub related: Vec<Listing>,
}

/// Read path for listing detail pages
pub struct DetailService<S> {
    store: Arc<S>,
    view_timeout: Duration,
}

impl<S: DataStore + 'static> DetailService<S> {
    pub fn new(store: Arc<S>, view_timeout: Duration) -> Self {
        Self {
            store,
            view_timeout,
        }
    }

    /// Load a listing, count the view and fetch related listings
    pub async fn open(&self, listing_id: Uuid) -> Result<OpenedListing, StoreError> {
        let detail = self.store.fetch_listing(listing_id).await?;
        let view = render(&detail);
        debug!("Rendering listing {} as {}", listing_id, view.renderer);

        let (_, related) = tokio::join!(
            count_view(self.store.as_ref(), listing_id, self.view_timeout),
            self.store
                .related_listings(detail.listing.category_id, listing_id, RELATED_LIMIT)
        );
        let related = related.unwrap_or_else(|e| {
            warn!("Could not load related listings for {}: {}", listing_id, e);
            Vec::new()
        });

        Ok(OpenedListing {
            detail,
            view,
            related,
        })
    }

    /// Count one view in the background. Failures are only logged.
    pub fn record_view(&self, listing_id: Uuid) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let limit = self.view_timeout;
        tokio::spawn(async move { count_view(store.as_ref(), listing_id, limit).await })
    }
}

/// Increment the view count, waiting at most `limit`. Failures are only logged.
async fn count_view<S: DataStore + ?Sized>(store: &S, listing_id: Uuid, limit: Duration) {
    match tokio::time::timeout(limit, store.increment_views(listing_id)).await {
        Ok(Ok(())) => debug!("Counted view for {}", listing_id),
        Ok(Err(e)) => warn!("Error incrementing view count for {}: {}", listing_id, e),
        Err(_) => warn!("Timed out incrementing view count for {}", listing_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Condition, Country, ListingImage, ListingStatus, SellerKind};
    use crate::store::{FailPoint, MemoryStore};
    use chrono::Utc;

    fn listing(category_id: Uuid, attributes: Attributes) -> Listing {
        let now = Utc::now();
        Listing {
            id: Uuid::new_v4(),
            category_id,
            title: "Listing".to_string(),
            description: "Description".to_string(),
            price: Some(2500.0),
            currency: "GHS".to_string(),
            price_kind: PriceKind::Fixed,
            condition: Some(Condition::Used),
            location_details: None,
            seller_name: "Acme Ltd".to_string(),
            seller_kind: SellerKind::Business,
            seller_phone: None,
            seller_whatsapp: None,
            seller_email: Some("hr@acme.test".to_string()),
            seller_website: None,
            attributes,
            status: ListingStatus::Active,
            views_count: 0,
            is_featured: false,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn detail(slug: &str, attributes: Attributes) -> ListingDetail {
        let category = Category {
            id: Uuid::new_v4(),
            name: slug.to_string(),
            slug: slug.to_string(),
        };
        ListingDetail {
            listing: listing(category.id, attributes),
            category: Some(category),
            images: Vec::new(),
            countries: Vec::new(),
        }
    }

    fn fact<'a>(view: &'a DetailView, label: &str) -> Option<&'a str> {
        view.facts
            .iter()
            .find(|fact| fact.label == label)
            .map(|fact| fact.value.as_str())
    }

    #[test]
    fn missing_motors_attributes_show_not_available() {
        let mut attributes = Attributes::new();
        attributes.insert("make".into(), AttributeValue::from("Toyota"));
        attributes.insert("kilometers".into(), AttributeValue::Integer(120_000));

        let view = render(&detail("motors", attributes));

        assert_eq!(view.renderer, RendererKind::Motors);
        assert_eq!(fact(&view, "Make"), Some("Toyota"));
        assert_eq!(fact(&view, "Model"), Some("N/A"));
        assert_eq!(fact(&view, "Year"), Some("N/A"));
        assert_eq!(fact(&view, "Mileage (km)"), Some("120000"));
        assert_eq!(view.lists[0].items, Vec::<String>::new());
    }

    #[test]
    fn job_defaults_come_from_the_listing() {
        let mut attributes = Attributes::new();
        attributes.insert(
            "requirements".into(),
            AttributeValue::Lines(vec!["Rust".into(), "SQL".into()]),
        );
        let mut detail = detail("jobs", attributes);
        detail.listing.price_kind = PriceKind::Monthly;

        let view = render(&detail);

        assert_eq!(fact(&view, "Company"), Some("Acme Ltd"));
        assert_eq!(fact(&view, "Job Type"), Some("Full-time"));
        assert_eq!(fact(&view, "Application Deadline"), None);
        assert_eq!(view.price_line, "GHS 2,500 per month");
        assert_eq!(view.lists[0].items, vec!["Rust".to_string(), "SQL".to_string()]);
    }

    #[test]
    fn property_and_electronics_use_alternate_keys() {
        let mut attributes = Attributes::new();
        attributes.insert("area".into(), AttributeValue::Integer(900));
        let view = render(&detail("apartments-for-rent", attributes));
        assert_eq!(view.renderer, RendererKind::Property);
        assert_eq!(fact(&view, "Property Type"), Some("Property"));
        assert_eq!(fact(&view, "Area (sq ft)"), Some("900"));
        assert_eq!(fact(&view, "Furnished"), Some("No"));
        assert_eq!(fact(&view, "Year Built"), None);

        let mut attributes = Attributes::new();
        attributes.insert("memory".into(), AttributeValue::from("256GB"));
        attributes.insert("cpu".into(), AttributeValue::from("M2"));
        let view = render(&detail("electronics", attributes));
        assert_eq!(fact(&view, "Storage"), Some("256GB"));
        assert_eq!(fact(&view, "Processor"), Some("M2"));
        assert_eq!(fact(&view, "Warranty"), Some("No"));
    }

    #[test]
    fn schema_renderers_follow_field_order_and_labels() {
        let mut attributes = Attributes::new();
        attributes.insert("pet_type".into(), AttributeValue::from("dog"));
        let view = render(&detail("pets", attributes));

        assert_eq!(view.renderer, RendererKind::Pets);
        assert_eq!(
            view.facts[0],
            DetailFact {
                label: "Pet Type".to_string(),
                value: "Dog".to_string(),
            }
        );
        assert!(view.facts[1..].iter().all(|fact| fact.value == "N/A"));
    }

    #[test]
    fn generic_view_lists_every_attribute() {
        let mut attributes = Attributes::new();
        attributes.insert("meeting_point".into(), AttributeValue::from("Town hall"));
        attributes.insert("topics".into(), AttributeValue::Lines(vec!["Choir".into()]));
        attributes.insert("notes".into(), AttributeValue::from("  "));

        let view = render(&detail("community", attributes));

        assert_eq!(view.renderer, RendererKind::Generic);
        assert_eq!(
            view.facts,
            vec![DetailFact {
                label: "Meeting Point".to_string(),
                value: "Town hall".to_string(),
            }]
        );
        assert_eq!(view.lists[0].label, "Topics");
    }

    #[test]
    fn listing_without_category_is_generic() {
        let mut detail = detail("motors", Attributes::new());
        detail.category = None;
        assert_eq!(render(&detail).renderer, RendererKind::Generic);
    }

    #[test]
    fn amounts_are_grouped() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(18_500.0), "18,500");
        assert_eq!(format_amount(1_234_567.5), "1,234,567.5");
    }

    #[test]
    fn salary_without_price_is_negotiable() {
        let mut listing = listing(Uuid::new_v4(), Attributes::new());
        listing.price = None;
        assert_eq!(salary_line(&listing), "Negotiable");
        listing.price = Some(60_000.0);
        listing.price_kind = PriceKind::Hourly;
        assert_eq!(salary_line(&listing), "GHS 60,000");
    }

    #[tokio::test]
    async fn open_counts_the_view_and_loads_related() {
        let store = Arc::new(MemoryStore::new());
        let category = store.add_category("Motors", "motors");
        let main = listing(category.id, Attributes::new());
        let main_id = main.id;
        store.add_listing(main);
        for _ in 0..5 {
            store.add_listing(listing(category.id, Attributes::new()));
        }
        let mut sold = listing(category.id, Attributes::new());
        sold.status = ListingStatus::Sold;
        store.add_listing(sold);

        let service = DetailService::new(Arc::clone(&store), Duration::from_secs(1));
        let opened = service.open(main_id).await.unwrap();

        assert_eq!(opened.view.renderer, RendererKind::Motors);
        assert_eq!(opened.related.len(), RELATED_LIMIT);
        assert!(opened.related.iter().all(|listing| listing.id != main_id));

        assert_eq!(store.views(main_id), Some(1));

        service.record_view(main_id).await.unwrap();
        assert_eq!(store.views(main_id), Some(2));
    }

    #[tokio::test]
    async fn slow_view_count_finishes_before_open_returns() {
        let store = Arc::new(MemoryStore::new());
        let category = store.add_category("Motors", "motors");
        let car = listing(category.id, Attributes::new());
        let car_id = car.id;
        store.add_listing(car);
        store.delay_views(Duration::from_millis(50));

        let service = DetailService::new(Arc::clone(&store), Duration::from_secs(1));
        service.open(car_id).await.unwrap();

        assert_eq!(store.views(car_id), Some(1));
    }

    #[tokio::test]
    async fn view_count_slower_than_the_timeout_is_dropped() {
        let store = Arc::new(MemoryStore::new());
        let category = store.add_category("Motors", "motors");
        let car = listing(category.id, Attributes::new());
        let car_id = car.id;
        store.add_listing(car);
        store.delay_views(Duration::from_millis(200));

        let service = DetailService::new(Arc::clone(&store), Duration::from_millis(20));
        let opened = service.open(car_id).await.unwrap();

        assert_eq!(opened.detail.listing.id, car_id);
        assert_eq!(store.views(car_id), Some(0));
    }

    #[tokio::test]
    async fn failed_fetch_fails_open() {
        let store = Arc::new(MemoryStore::new());
        let category = store.add_category("Motors", "motors");
        let car = listing(category.id, Attributes::new());
        let car_id = car.id;
        store.add_listing(car);
        store.fail(FailPoint::FetchListing);

        let service = DetailService::new(Arc::clone(&store), Duration::from_secs(1));

        assert!(matches!(
            service.open(car_id).await,
            Err(StoreError::Rejected(_))
        ));
        assert_eq!(store.views(car_id), Some(0));
    }

    #[tokio::test]
    async fn view_and_related_failures_do_not_fail_open() {
        let store = Arc::new(MemoryStore::new());
        let category = store.add_category("Jobs", "jobs");
        let job = listing(category.id, Attributes::new());
        let job_id = job.id;
        store.add_listing(job);
        store.fail(FailPoint::IncrementViews);
        store.fail(FailPoint::RelatedListings);

        let service = DetailService::new(Arc::clone(&store), Duration::from_secs(1));
        let opened = service.open(job_id).await.unwrap();
        service.record_view(job_id).await.unwrap();

        assert!(opened.related.is_empty());
        assert_eq!(store.views(job_id), Some(0));
    }

    #[tokio::test]
    async fn primary_image_and_countries_reach_the_view() {
        let mut detail = detail("fashion", Attributes::new());
        let listing_id = detail.listing.id;
        detail.images = vec![
            ListingImage {
                id: Uuid::new_v4(),
                listing_id,
                image_url: "memory://marketplace/a.jpg".to_string(),
                display_order: 0,
                is_primary: false,
            },
            ListingImage {
                id: Uuid::new_v4(),
                listing_id,
                image_url: "memory://marketplace/b.jpg".to_string(),
                display_order: 1,
                is_primary: true,
            },
        ];
        detail.countries = vec![Country {
            id: Uuid::new_v4(),
            name: "Nigeria".to_string(),
            code: "NG".to_string(),
        }];

        let view = render(&detail);

        assert_eq!(
            view.primary_image.as_deref(),
            Some("memory://marketplace/b.jpg")
        );
        assert_eq!(view.countries, vec!["Nigeria".to_string()]);
    }
}
