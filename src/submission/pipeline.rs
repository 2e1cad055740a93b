use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{ListingForm, PendingImage};
use crate::error::{StoreError, SubmitError, WriteStep};
use crate::models::{Listing, ListingCountry, NewListingImage};
use crate::store::{DataStore, ObjectStorage};

/// Everything written for one accepted listing
#[derive(Debug, Clone)]
pub struct Submitted {
    pub listing: Listing,
    pub images: Vec<NewListingImage>,
    pub countries: Vec<ListingCountry>,
}

/// Turns a completed form into stored rows and uploaded media
pub struct SubmissionPipeline<S> {
    store: Arc<S>,
    bucket: String,
}

/// Object path for an uploaded image: random id, upload time, extension
fn object_path(image: &PendingImage) -> String {
    format!(
        "{}-{}.{}",
        Uuid::new_v4().simple(),
        Utc::now().timestamp_millis(),
        image.extension()
    )
}

impl<S: DataStore + ObjectStorage> SubmissionPipeline<S> {
    pub fn new(store: Arc<S>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }

    pub async fn submit(&self, form: &ListingForm) -> Result<Submitted, SubmitError> {
        let new_listing = form.to_new_listing()?;

        let mut uploaded_paths = Vec::new();
        let mut urls = Vec::new();
        for image in form.images().iter() {
            let path = object_path(image);
            match self
                .store
                .upload(&self.bucket, &path, image.bytes.clone(), &image.content_type)
                .await
            {
                Ok(url) => {
                    debug!("Uploaded {} as {}", image.file_name, path);
                    uploaded_paths.push(path);
                    urls.push(url);
                }
                Err(source) => {
                    warn!("Upload of {} failed: {}", image.file_name, source);
                    self.remove_objects(&uploaded_paths).await;
                    return Err(SubmitError::Upload {
                        file: image.file_name.clone(),
                        source,
                    });
                }
            }
        }

        let listing = match self.store.insert_listing(&new_listing).await {
            Ok(listing) => listing,
            Err(source) => {
                self.remove_objects(&uploaded_paths).await;
                return Err(SubmitError::Write {
                    step: WriteStep::Listing,
                    source,
                });
            }
        };

        let primary = form.images().primary().min(urls.len().saturating_sub(1));
        let images: Vec<NewListingImage> = urls
            .into_iter()
            .enumerate()
            .map(|(index, image_url)| NewListingImage {
                listing_id: listing.id,
                image_url,
                display_order: index as i32,
                is_primary: index == primary,
            })
            .collect();
        if !images.is_empty() {
            if let Err(source) = self.store.insert_images(&images).await {
                return Err(self
                    .roll_back(listing.id, &uploaded_paths, WriteStep::Images, source)
                    .await);
            }
        }

        let countries: Vec<ListingCountry> = form
            .countries()
            .iter()
            .map(|&country_id| ListingCountry {
                listing_id: listing.id,
                country_id,
            })
            .collect();
        if let Err(source) = self.store.insert_countries(&countries).await {
            return Err(self
                .roll_back(listing.id, &uploaded_paths, WriteStep::Countries, source)
                .await);
        }

        info!(
            "Created listing {} with {} images in {} countries",
            listing.id,
            images.len(),
            countries.len()
        );

        Ok(Submitted {
            listing,
            images,
            countries,
        })
    }

    async fn roll_back(
        &self,
        listing_id: Uuid,
        uploaded_paths: &[String],
        step: WriteStep,
        source: StoreError,
    ) -> SubmitError {
        warn!("Writing {} for listing {} failed: {}", step, listing_id, source);
        if let Err(e) = self.store.delete_listing(listing_id).await {
            warn!("Could not remove partial listing {}: {}", listing_id, e);
        }
        self.remove_objects(uploaded_paths).await;
        SubmitError::Write { step, source }
    }

    async fn remove_objects(&self, paths: &[String]) {
        if paths.is_empty() {
            return;
        }
        if let Err(e) = self.store.remove(&self.bucket, paths).await {
            warn!("Could not remove {} uploaded objects: {}", paths.len(), e);
        }
    }
}
