use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Display;
use tracing::{debug, warn};
use uuid::Uuid;

use super::traits::{DataStore, ObjectStorage};
use super::{
    CATEGORIES_TABLE, COUNTRIES_TABLE, INCREMENT_VIEWS_RPC, LISTINGS_TABLE,
    LISTING_COUNTRIES_TABLE, LISTING_IMAGES_TABLE,
};
use crate::config::Config;
use crate::error::StoreError;
use crate::models::{
    Category, Country, Listing, ListingCountry, ListingDetail, ListingImage, NewListing,
    NewListingImage,
};

const DETAIL_SELECT: &str = "*,marketplace_categories(id,name,slug),\
marketplace_listing_images(id,listing_id,image_url,display_order,is_primary),\
marketplace_listing_countries(countries(id,name,code))";

/// Client for a hosted Supabase project: PostgREST tables and RPCs plus
/// the storage API
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseClient {
    pub fn new(config: &Config) -> Result<Self, StoreError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("listing-desk/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.supabase_url.trim_end_matches('/').to_string(),
            api_key: config.supabase_anon_key.clone(),
        })
    }

    /// Start a query against a table
    pub fn from<'a>(&'a self, table: &'a str) -> Query<'a> {
        Query {
            client: self,
            table,
            params: Vec::new(),
        }
    }

    pub async fn rpc(&self, function: &str, args: serde_json::Value) -> Result<(), StoreError> {
        let url = format!("{}/rest/v1/rpc/{}", self.base_url, function);
        debug!("Calling rpc {}", function);
        let response = send(self.authorize(self.http.post(url)).json(&args)).await?;
        expect_success(&format!("rpc {function}"), response).await
    }

    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, bucket, path
        )
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }
}

/// PostgREST query with horizontal filters
#[derive(Debug)]
pub struct Query<'a> {
    client: &'a SupabaseClient,
    table: &'a str,
    params: Vec<(String, String)>,
}

impl<'a> Query<'a> {
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".to_string(), columns.to_string()));
        self
    }

    pub fn eq(mut self, column: &str, value: impl Display) -> Self {
        self.params.push((column.to_string(), format!("eq.{value}")));
        self
    }

    pub fn neq(mut self, column: &str, value: impl Display) -> Self {
        self.params.push((column.to_string(), format!("neq.{value}")));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.params
            .push(("order".to_string(), format!("{column}.{direction}")));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.params.push(("limit".to_string(), limit.to_string()));
        self
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, StoreError> {
        debug!("Selecting from {} with {:?}", self.table, self.params);
        let request = self
            .client
            .http
            .get(self.client.table_url(self.table))
            .query(&self.params);
        let response = send(self.client.authorize(request)).await?;
        decode(&format!("select {}", self.table), response).await
    }

    /// Insert rows and return them as stored
    pub async fn insert<B, T>(self, rows: &B) -> Result<Vec<T>, StoreError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        debug!("Inserting into {}", self.table);
        let request = self
            .client
            .http
            .post(self.client.table_url(self.table))
            .query(&self.params)
            .header("Prefer", "return=representation")
            .json(rows);
        let response = send(self.client.authorize(request)).await?;
        decode(&format!("insert {}", self.table), response).await
    }

    /// Insert rows without reading them back
    pub async fn insert_minimal<B>(self, rows: &B) -> Result<(), StoreError>
    where
        B: Serialize + ?Sized,
    {
        debug!("Inserting into {}", self.table);
        let request = self
            .client
            .http
            .post(self.client.table_url(self.table))
            .header("Prefer", "return=minimal")
            .json(rows);
        let response = send(self.client.authorize(request)).await?;
        expect_success(&format!("insert {}", self.table), response).await
    }

    pub async fn delete(self) -> Result<(), StoreError> {
        debug!("Deleting from {} with {:?}", self.table, self.params);
        let request = self
            .client
            .http
            .delete(self.client.table_url(self.table))
            .query(&self.params);
        let response = send(self.client.authorize(request)).await?;
        expect_success(&format!("delete {}", self.table), response).await
    }
}

async fn send(request: RequestBuilder) -> Result<Response, StoreError> {
    request.send().await.map_err(|err| {
        if err.is_timeout() {
            StoreError::Timeout
        } else {
            StoreError::Http(err)
        }
    })
}

async fn read_body(operation: &str, response: Response) -> Result<String, StoreError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        warn!("{} returned {}", operation, status);
        return Err(StoreError::Status {
            operation: operation.to_string(),
            status: status.as_u16(),
            body,
        });
    }
    Ok(body)
}

async fn expect_success(operation: &str, response: Response) -> Result<(), StoreError> {
    read_body(operation, response).await.map(|_| ())
}

async fn decode<T: DeserializeOwned>(operation: &str, response: Response) -> Result<T, StoreError> {
    let body = read_body(operation, response).await?;
    serde_json::from_str(&body).map_err(|source| StoreError::Decode {
        operation: operation.to_string(),
        source,
    })
}

/// Listing row with its embedded relations, as PostgREST returns it
#[derive(Debug, Deserialize)]
struct ListingRow {
    #[serde(flatten)]
    listing: Listing,
    marketplace_categories: Option<Category>,
    #[serde(default)]
    marketplace_listing_images: Vec<ListingImage>,
    #[serde(default)]
    marketplace_listing_countries: Vec<CountryLink>,
}

#[derive(Debug, Deserialize)]
struct CountryLink {
    countries: Option<Country>,
}

impl From<ListingRow> for ListingDetail {
    fn from(row: ListingRow) -> Self {
        let mut images = row.marketplace_listing_images;
        images.sort_by_key(|image| image.display_order);
        Self {
            listing: row.listing,
            category: row.marketplace_categories,
            images,
            countries: row
                .marketplace_listing_countries
                .into_iter()
                .filter_map(|link| link.countries)
                .collect(),
        }
    }
}

#[async_trait]
impl DataStore for SupabaseClient {
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.from(CATEGORIES_TABLE)
            .select("id,name,slug")
            .order("name", true)
            .fetch()
            .await
    }

    async fn list_countries(&self) -> Result<Vec<Country>, StoreError> {
        self.from(COUNTRIES_TABLE)
            .select("id,name,code")
            .order("name", true)
            .fetch()
            .await
    }

    async fn insert_listing(&self, listing: &NewListing) -> Result<Listing, StoreError> {
        let rows: Vec<Listing> = self
            .from(LISTINGS_TABLE)
            .select("*")
            .insert(listing)
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Rejected("insert returned no listing".to_string()))
    }

    async fn insert_images(&self, images: &[NewListingImage]) -> Result<(), StoreError> {
        self.from(LISTING_IMAGES_TABLE).insert_minimal(images).await
    }

    async fn insert_countries(&self, rows: &[ListingCountry]) -> Result<(), StoreError> {
        self.from(LISTING_COUNTRIES_TABLE).insert_minimal(rows).await
    }

    async fn delete_listing(&self, listing_id: Uuid) -> Result<(), StoreError> {
        self.from(LISTING_IMAGES_TABLE)
            .eq("listing_id", listing_id)
            .delete()
            .await?;
        self.from(LISTING_COUNTRIES_TABLE)
            .eq("listing_id", listing_id)
            .delete()
            .await?;
        self.from(LISTINGS_TABLE).eq("id", listing_id).delete().await
    }

    async fn fetch_listing(&self, listing_id: Uuid) -> Result<ListingDetail, StoreError> {
        let rows: Vec<ListingRow> = self
            .from(LISTINGS_TABLE)
            .select(DETAIL_SELECT)
            .eq("id", listing_id)
            .fetch()
            .await?;
        rows.into_iter()
            .next()
            .map(ListingDetail::from)
            .ok_or_else(|| StoreError::NotFound(format!("listing {listing_id}")))
    }

    async fn related_listings(
        &self,
        category_id: Uuid,
        exclude: Uuid,
        limit: usize,
    ) -> Result<Vec<Listing>, StoreError> {
        self.from(LISTINGS_TABLE)
            .select("*")
            .eq("category_id", category_id)
            .eq("status", "active")
            .neq("id", exclude)
            .limit(limit)
            .fetch()
            .await
    }

    async fn increment_views(&self, listing_id: Uuid) -> Result<(), StoreError> {
        self.rpc(INCREMENT_VIEWS_RPC, json!({ "listing_id": listing_id }))
            .await
    }
}

#[async_trait]
impl ObjectStorage for SupabaseClient {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StoreError> {
        let url = format!("{}/storage/v1/object/{}/{}", self.base_url, bucket, path);
        debug!("Uploading {} bytes to {}/{}", bytes.len(), bucket, path);
        let request = self
            .http
            .post(url)
            .header("Content-Type", content_type)
            .header("Cache-Control", "max-age=3600")
            .header("x-upsert", "false")
            .body(bytes);
        let response = send(self.authorize(request)).await?;
        expect_success(&format!("upload {bucket}/{path}"), response).await?;
        Ok(self.public_url(bucket, path))
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), StoreError> {
        if paths.is_empty() {
            return Ok(());
        }
        let url = format!("{}/storage/v1/object/{}", self.base_url, bucket);
        let request = self.http.delete(url).json(&json!({ "prefixes": paths }));
        let response = send(self.authorize(request)).await?;
        expect_success(&format!("remove from {bucket}"), response).await
    }
}
