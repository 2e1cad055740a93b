use anyhow::Context;
use std::path::Path;
use thiserror::Error;

/// Upper bound on images attached to one listing
pub const MAX_PENDING_IMAGES: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageQueueError {
    #[error("Maximum {limit} images allowed")]
    TooMany {
        limit: usize,
        pending: usize,
        incoming: usize,
    },
}

/// An image picked for upload but not yet stored
#[derive(Debug, Clone, PartialEq)]
pub struct PendingImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PendingImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> anyhow::Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Ok(Self::new(file_name, bytes))
    }

    /// Lowercased extension, `bin` when the name has none
    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_else(|| "bin".to_string())
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Images waiting to be uploaded, plus which one is the cover image
#[derive(Debug, Clone, Default)]
pub struct ImageQueue {
    images: Vec<PendingImage>,
    primary: usize,
}

impl ImageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch. A batch that would exceed the cap is rejected whole.
    pub fn add(&mut self, batch: Vec<PendingImage>) -> Result<(), ImageQueueError> {
        if self.images.len() + batch.len() > MAX_PENDING_IMAGES {
            return Err(ImageQueueError::TooMany {
                limit: MAX_PENDING_IMAGES,
                pending: self.images.len(),
                incoming: batch.len(),
            });
        }
        self.images.extend(batch);
        Ok(())
    }

    /// Remove one image, keeping the primary index on the same image when it
    /// survives and falling back to the first image when it does not.
    pub fn remove(&mut self, index: usize) -> Option<PendingImage> {
        if index >= self.images.len() {
            return None;
        }
        let removed = self.images.remove(index);
        if self.primary == index {
            self.primary = 0;
        } else if self.primary > index {
            self.primary -= 1;
        }
        Some(removed)
    }

    pub fn set_primary(&mut self, index: usize) -> bool {
        if index < self.images.len() {
            self.primary = index;
            true
        } else {
            false
        }
    }

    pub fn primary(&self) -> usize {
        self.primary
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingImage> {
        self.images.iter()
    }

    pub fn get(&self, index: usize) -> Option<&PendingImage> {
        self.images.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(n: usize) -> Vec<PendingImage> {
        (0..n)
            .map(|i| PendingImage::new(format!("photo-{i}.jpg"), vec![i as u8]))
            .collect()
    }

    #[test]
    fn rejects_whole_batch_over_cap() {
        let mut queue = ImageQueue::new();
        queue.add(batch(9)).unwrap();

        let err = queue.add(batch(3)).unwrap_err();
        assert_eq!(
            err,
            ImageQueueError::TooMany {
                limit: 10,
                pending: 9,
                incoming: 3
            }
        );
        assert_eq!(queue.len(), 9);
        assert_eq!(err.to_string(), "Maximum 10 images allowed");

        queue.add(batch(1)).unwrap();
        assert_eq!(queue.len(), 10);
    }

    #[test]
    fn removing_primary_resets_to_first() {
        let mut queue = ImageQueue::new();
        queue.add(batch(4)).unwrap();
        assert!(queue.set_primary(2));

        queue.remove(2).unwrap();
        assert_eq!(queue.primary(), 0);
        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn removing_before_primary_shifts_it_down() {
        let mut queue = ImageQueue::new();
        queue.add(batch(4)).unwrap();
        queue.set_primary(3);
        let cover = queue.get(3).cloned().unwrap();

        queue.remove(1).unwrap();
        assert_eq!(queue.primary(), 2);
        assert_eq!(queue.get(queue.primary()), Some(&cover));
    }

    #[test]
    fn removing_after_primary_keeps_it() {
        let mut queue = ImageQueue::new();
        queue.add(batch(3)).unwrap();
        queue.set_primary(1);

        queue.remove(2).unwrap();
        assert_eq!(queue.primary(), 1);
    }

    #[test]
    fn out_of_range_is_ignored() {
        let mut queue = ImageQueue::new();
        queue.add(batch(2)).unwrap();
        assert!(queue.remove(5).is_none());
        assert!(!queue.set_primary(2));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(PendingImage::new("a.JPG", vec![]).content_type, "image/jpeg");
        assert_eq!(PendingImage::new("a.png", vec![]).extension(), "png");
        assert_eq!(PendingImage::new("scan", vec![]).extension(), "bin");
        assert_eq!(
            PendingImage::new("scan", vec![]).content_type,
            "application/octet-stream"
        );
    }
}
