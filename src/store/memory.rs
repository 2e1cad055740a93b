//! In-process store used for dry runs and tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use super::traits::{DataStore, ObjectStorage};
use crate::error::StoreError;
use crate::models::{
    Category, Country, Listing, ListingCountry, ListingDetail, ListingImage, ListingStatus,
    NewListing, NewListingImage,
};

/// Operation that can be made to fail on purpose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailPoint {
    InsertListing,
    InsertImages,
    InsertCountries,
    Upload,
    Remove,
    FetchListing,
    RelatedListings,
    IncrementViews,
}

#[derive(Debug, Default)]
struct State {
    categories: Vec<Category>,
    countries: Vec<Country>,
    listings: Vec<Listing>,
    images: Vec<ListingImage>,
    listing_countries: Vec<ListingCountry>,
    objects: BTreeMap<String, Vec<u8>>,
    failures: HashSet<FailPoint>,
    uploads_before_failure: Option<usize>,
    view_delay: Option<Duration>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_category(&self, name: &str, slug: &str) -> Category {
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            slug: slug.to_string(),
        };
        self.state().categories.push(category.clone());
        category
    }

    pub fn add_country(&self, name: &str, code: &str) -> Country {
        let country = Country {
            id: Uuid::new_v4(),
            name: name.to_string(),
            code: code.to_string(),
        };
        self.state().countries.push(country.clone());
        country
    }

    /// Store a listing directly, bypassing the submission path
    pub fn add_listing(&self, listing: Listing) {
        self.state().listings.push(listing);
    }

    pub fn fail(&self, point: FailPoint) {
        self.state().failures.insert(point);
    }

    /// Let `count` uploads succeed, then fail every later one
    pub fn fail_uploads_after(&self, count: usize) {
        self.state().uploads_before_failure = Some(count);
    }

    /// Make every view increment wait before it lands
    pub fn delay_views(&self, delay: Duration) {
        self.state().view_delay = Some(delay);
    }

    pub fn listings(&self) -> Vec<Listing> {
        self.state().listings.clone()
    }

    pub fn images_of(&self, listing_id: Uuid) -> Vec<ListingImage> {
        self.state()
            .images
            .iter()
            .filter(|image| image.listing_id == listing_id)
            .cloned()
            .collect()
    }

    pub fn countries_of(&self, listing_id: Uuid) -> Vec<Uuid> {
        self.state()
            .listing_countries
            .iter()
            .filter(|row| row.listing_id == listing_id)
            .map(|row| row.country_id)
            .collect()
    }

    pub fn object_count(&self) -> usize {
        self.state().objects.len()
    }

    pub fn views(&self, listing_id: Uuid) -> Option<i64> {
        self.state()
            .listings
            .iter()
            .find(|listing| listing.id == listing_id)
            .map(|listing| listing.views_count)
    }

    fn check(&self, point: FailPoint) -> Result<(), StoreError> {
        if self.state().failures.contains(&point) {
            return Err(StoreError::Rejected(format!("{point:?} failed")));
        }
        Ok(())
    }
}

fn object_key(bucket: &str, path: &str) -> String {
    format!("{bucket}/{path}")
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let mut categories = self.state().categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn list_countries(&self) -> Result<Vec<Country>, StoreError> {
        let mut countries = self.state().countries.clone();
        countries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(countries)
    }

    async fn insert_listing(&self, listing: &NewListing) -> Result<Listing, StoreError> {
        self.check(FailPoint::InsertListing)?;
        let stored = Listing::from_new(Uuid::new_v4(), listing, Utc::now());
        debug!("Stored listing {}", stored.id);
        self.state().listings.push(stored.clone());
        Ok(stored)
    }

    async fn insert_images(&self, images: &[NewListingImage]) -> Result<(), StoreError> {
        self.check(FailPoint::InsertImages)?;
        let rows = images.iter().map(|image| ListingImage {
            id: Uuid::new_v4(),
            listing_id: image.listing_id,
            image_url: image.image_url.clone(),
            display_order: image.display_order,
            is_primary: image.is_primary,
        });
        self.state().images.extend(rows);
        Ok(())
    }

    async fn insert_countries(&self, rows: &[ListingCountry]) -> Result<(), StoreError> {
        self.check(FailPoint::InsertCountries)?;
        self.state().listing_countries.extend_from_slice(rows);
        Ok(())
    }

    async fn delete_listing(&self, listing_id: Uuid) -> Result<(), StoreError> {
        let mut state = self.state();
        state.images.retain(|image| image.listing_id != listing_id);
        state
            .listing_countries
            .retain(|row| row.listing_id != listing_id);
        state.listings.retain(|listing| listing.id != listing_id);
        Ok(())
    }

    async fn fetch_listing(&self, listing_id: Uuid) -> Result<ListingDetail, StoreError> {
        self.check(FailPoint::FetchListing)?;
        let state = self.state();
        let listing = state
            .listings
            .iter()
            .find(|listing| listing.id == listing_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("listing {listing_id}")))?;

        let category = state
            .categories
            .iter()
            .find(|category| category.id == listing.category_id)
            .cloned();
        let mut images: Vec<ListingImage> = state
            .images
            .iter()
            .filter(|image| image.listing_id == listing_id)
            .cloned()
            .collect();
        images.sort_by_key(|image| image.display_order);
        let countries = state
            .listing_countries
            .iter()
            .filter(|row| row.listing_id == listing_id)
            .filter_map(|row| {
                state
                    .countries
                    .iter()
                    .find(|country| country.id == row.country_id)
                    .cloned()
            })
            .collect();

        Ok(ListingDetail {
            listing,
            category,
            images,
            countries,
        })
    }

    async fn related_listings(
        &self,
        category_id: Uuid,
        exclude: Uuid,
        limit: usize,
    ) -> Result<Vec<Listing>, StoreError> {
        self.check(FailPoint::RelatedListings)?;
        Ok(self
            .state()
            .listings
            .iter()
            .filter(|listing| {
                listing.category_id == category_id
                    && listing.status == ListingStatus::Active
                    && listing.id != exclude
            })
            .take(limit)
            .cloned()
            .collect())
    }

    async fn increment_views(&self, listing_id: Uuid) -> Result<(), StoreError> {
        self.check(FailPoint::IncrementViews)?;
        let delay = self.state().view_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let mut state = self.state();
        let listing = state
            .listings
            .iter_mut()
            .find(|listing| listing.id == listing_id)
            .ok_or_else(|| StoreError::NotFound(format!("listing {listing_id}")))?;
        listing.views_count += 1;
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for MemoryStore {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<String, StoreError> {
        self.check(FailPoint::Upload)?;
        let mut state = self.state();
        if let Some(remaining) = state.uploads_before_failure.as_mut() {
            if *remaining == 0 {
                return Err(StoreError::Rejected(format!("upload of {path} failed")));
            }
            *remaining -= 1;
        }
        state.objects.insert(object_key(bucket, path), bytes);
        Ok(format!("memory://{bucket}/{path}"))
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StoreError> {
        self.check(FailPoint::Remove)?;
        let mut state = self.state();
        for path in paths {
            state.objects.remove(&object_key(bucket, path));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attributes, Condition, PriceKind, SellerKind};

    fn new_listing(category_id: Uuid) -> NewListing {
        NewListing {
            category_id,
            title: "Sofa".to_string(),
            description: "Three seater".to_string(),
            price: 300.0,
            currency: "USD".to_string(),
            price_kind: PriceKind::Fixed,
            condition: Condition::Used,
            location_details: String::new(),
            seller_name: "Kofi".to_string(),
            seller_kind: SellerKind::Individual,
            seller_phone: Some("+233".to_string()),
            seller_whatsapp: None,
            seller_email: None,
            seller_website: None,
            attributes: Attributes::new(),
            status: ListingStatus::Active,
        }
    }

    #[tokio::test]
    async fn delete_listing_removes_child_rows() {
        let store = MemoryStore::new();
        let category = store.add_category("Home & Furniture", "home-furniture");
        let country = store.add_country("Ghana", "GH");
        let listing = store.insert_listing(&new_listing(category.id)).await.unwrap();
        store
            .insert_images(&[NewListingImage {
                listing_id: listing.id,
                image_url: "memory://a".to_string(),
                display_order: 0,
                is_primary: true,
            }])
            .await
            .unwrap();
        store
            .insert_countries(&[ListingCountry {
                listing_id: listing.id,
                country_id: country.id,
            }])
            .await
            .unwrap();

        let detail = store.fetch_listing(listing.id).await.unwrap();
        assert_eq!(detail.category, Some(category));
        assert_eq!(detail.countries, vec![country]);

        store.delete_listing(listing.id).await.unwrap();
        assert!(store.listings().is_empty());
        assert!(store.images_of(listing.id).is_empty());
        assert!(store.countries_of(listing.id).is_empty());
    }

    #[tokio::test]
    async fn uploads_fail_after_the_allowed_count() {
        let store = MemoryStore::new();
        store.fail_uploads_after(1);

        let url = store
            .upload("marketplace", "a.jpg", vec![1], "image/jpeg")
            .await
            .unwrap();
        assert_eq!(url, "memory://marketplace/a.jpg");
        assert!(store
            .upload("marketplace", "b.jpg", vec![2], "image/jpeg")
            .await
            .is_err());
        assert_eq!(store.object_count(), 1);

        store
            .remove("marketplace", &["a.jpg".to_string()])
            .await
            .unwrap();
        assert_eq!(store.object_count(), 0);
    }

    #[tokio::test]
    async fn reference_data_is_sorted_by_name() {
        let store = MemoryStore::new();
        store.add_country("Kenya", "KE");
        store.add_country("Ghana", "GH");
        let names: Vec<String> = store
            .list_countries()
            .await
            .unwrap()
            .into_iter()
            .map(|country| country.name)
            .collect();
        assert_eq!(names, vec!["Ghana".to_string(), "Kenya".to_string()]);
    }
}
