pub mod memory;
pub mod supabase;
pub mod traits;

pub use memory::{FailPoint, MemoryStore};
pub use supabase::SupabaseClient;
pub use traits::{DataStore, ObjectStorage};

pub const CATEGORIES_TABLE: &str = "marketplace_categories";
pub const COUNTRIES_TABLE: &str = "countries";
pub const LISTINGS_TABLE: &str = "marketplace_listings";
pub const LISTING_IMAGES_TABLE: &str = "marketplace_listing_images";
pub const LISTING_COUNTRIES_TABLE: &str = "marketplace_listing_countries";
pub const INCREMENT_VIEWS_RPC: &str = "increment_listing_views";
