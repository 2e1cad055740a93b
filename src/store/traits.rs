use async_trait::async_trait;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{
    Category, Country, Listing, ListingCountry, ListingDetail, NewListing, NewListingImage,
};

/// Relational data behind the marketplace
#[async_trait]
pub trait DataStore: Send + Sync {
    /// All categories, ordered by name
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    /// All countries, ordered by name
    async fn list_countries(&self) -> Result<Vec<Country>, StoreError>;

    async fn insert_listing(&self, listing: &NewListing) -> Result<Listing, StoreError>;

    async fn insert_images(&self, images: &[NewListingImage]) -> Result<(), StoreError>;

    async fn insert_countries(&self, rows: &[ListingCountry]) -> Result<(), StoreError>;

    /// Delete a listing together with its image and country rows
    async fn delete_listing(&self, listing_id: Uuid) -> Result<(), StoreError>;

    async fn fetch_listing(&self, listing_id: Uuid) -> Result<ListingDetail, StoreError>;

    /// Active listings of a category other than `exclude`
    async fn related_listings(
        &self,
        category_id: Uuid,
        exclude: Uuid,
        limit: usize,
    ) -> Result<Vec<Listing>, StoreError>;

    async fn increment_views(&self, listing_id: Uuid) -> Result<(), StoreError>;
}

/// Blob storage for listing media
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store an object and return its public URL
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError>;

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StoreError>;
}
