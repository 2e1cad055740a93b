//! Picks the detail renderer for a listing from its category slug.
//!
//! Known category ids map straight to a renderer. Any other slug goes
//! through the keyword groups in order and the first group with a keyword
//! contained in the slug wins. Nothing matching means [`RendererKind::Generic`].

use serde::Serialize;
use std::fmt;

pub mod detail;

pub use detail::{DetailFact, DetailList, DetailService, DetailView, OpenedListing};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    Property,
    Motors,
    Jobs,
    Electronics,
    Fashion,
    Services,
    Furniture,
    Pets,
    Kids,
    Hobbies,
    Business,
    Generic,
}

impl RendererKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RendererKind::Property => "property",
            RendererKind::Motors => "motors",
            RendererKind::Jobs => "jobs",
            RendererKind::Electronics => "electronics",
            RendererKind::Fashion => "fashion",
            RendererKind::Services => "services",
            RendererKind::Furniture => "furniture",
            RendererKind::Pets => "pets",
            RendererKind::Kids => "kids",
            RendererKind::Hobbies => "hobbies",
            RendererKind::Business => "business",
            RendererKind::Generic => "generic",
        }
    }

    /// Schema whose fields this renderer shows
    pub fn schema_id(self) -> Option<&'static str> {
        DIRECT
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(id, _)| *id)
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const DIRECT: &[(&str, RendererKind)] = &[
    ("property", RendererKind::Property),
    ("motors", RendererKind::Motors),
    ("jobs", RendererKind::Jobs),
    ("electronics", RendererKind::Electronics),
    ("fashion", RendererKind::Fashion),
    ("services", RendererKind::Services),
    ("home-furniture", RendererKind::Furniture),
    ("pets", RendererKind::Pets),
    ("kids-babies", RendererKind::Kids),
    ("hobbies", RendererKind::Hobbies),
    ("businesses", RendererKind::Business),
];

const KEYWORD_GROUPS: &[(RendererKind, &[&str])] = &[
    (
        RendererKind::Property,
        &[
            "property",
            "properties",
            "real-estate",
            "for-sale",
            "for-rent",
            "apartment",
            "house",
            "villa",
            "land",
            "commercial",
        ],
    ),
    (
        RendererKind::Motors,
        &[
            "motor",
            "car",
            "vehicle",
            "auto",
            "motorcycle",
            "bike",
            "truck",
            "boat",
            "bus",
        ],
    ),
    (
        RendererKind::Jobs,
        &["job", "career", "employment", "work", "hiring"],
    ),
    (
        RendererKind::Electronics,
        &[
            "mobile",
            "phone",
            "tablet",
            "electronic",
            "computer",
            "laptop",
            "gadget",
            "tech",
            "device",
            "appliance",
        ],
    ),
    (
        RendererKind::Fashion,
        &[
            "fashion",
            "beauty",
            "clothing",
            "clothes",
            "shoes",
            "bags",
            "accessories",
            "jewelry",
            "watches",
        ],
    ),
    (
        RendererKind::Services,
        &[
            "service",
            "cleaning",
            "repair",
            "tutoring",
            "photography",
            "catering",
            "consulting",
        ],
    ),
    (
        RendererKind::Furniture,
        &[
            "furniture",
            "home",
            "decor",
            "office-furniture",
            "garden",
            "outdoor",
        ],
    ),
    (
        RendererKind::Pets,
        &[
            "pet",
            "dog",
            "cat",
            "bird",
            "fish",
            "animal",
            "ornamental",
        ],
    ),
    (
        RendererKind::Kids,
        &["kid", "baby", "babies", "children", "infant", "toddler"],
    ),
    (
        RendererKind::Hobbies,
        &[
            "hobbies",
            "hobby",
            "collectible",
            "antique",
            "bicycle",
            "music",
            "instrument",
            "sport",
            "book",
            "game",
            "art",
        ],
    ),
    (
        RendererKind::Business,
        &[
            "business",
            "industrial",
            "agriculture",
            "construction",
            "equipment",
            "restaurant",
            "retail",
            "manufacturing",
        ],
    ),
];

/// Renderer for a category slug. Never fails.
pub fn resolve_renderer(slug: &str) -> RendererKind {
    if let Some((_, kind)) = DIRECT.iter().find(|(id, _)| *id == slug) {
        return *kind;
    }
    keyword_renderer(slug).unwrap_or(RendererKind::Generic)
}

fn keyword_renderer(slug: &str) -> Option<RendererKind> {
    if slug.is_empty() {
        return None;
    }
    KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| slug.contains(keyword)))
        .map(|(kind, _)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;

    #[test]
    fn every_schema_has_a_direct_renderer() {
        for id in schema::category_ids() {
            assert_ne!(resolve_renderer(id), RendererKind::Generic, "{id}");
        }
        for (id, kind) in DIRECT {
            assert!(schema::get(id).is_some(), "{id}");
            assert_eq!(kind.schema_id(), Some(*id));
        }
    }

    #[test]
    fn direct_table_wins_over_keywords() {
        // "businesses" contains "bus"
        assert_eq!(keyword_renderer("businesses"), Some(RendererKind::Motors));
        assert_eq!(resolve_renderer("businesses"), RendererKind::Business);
    }

    #[test]
    fn keyword_groups_apply_in_order() {
        assert_eq!(resolve_renderer("land-for-sale"), RendererKind::Property);
        assert_eq!(resolve_renderer("used-cars"), RendererKind::Motors);
        assert_eq!(resolve_renderer("mobile-phones"), RendererKind::Electronics);
        assert_eq!(resolve_renderer("pets-birds"), RendererKind::Pets);
        assert_eq!(resolve_renderer("musical-instruments"), RendererKind::Hobbies);
        assert_eq!(resolve_renderer("office-furniture"), RendererKind::Furniture);
        // Property is checked before Services
        assert_eq!(
            resolve_renderer("landscaping-services"),
            RendererKind::Property
        );
    }

    #[test]
    fn unmatched_slugs_fall_back_to_generic() {
        assert_eq!(resolve_renderer(""), RendererKind::Generic);
        assert_eq!(resolve_renderer("community"), RendererKind::Generic);
        assert_eq!(resolve_renderer("free-stuff"), RendererKind::Generic);
    }
}
