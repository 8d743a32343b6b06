//! Content entities, one per collection.
//!
//! Field names follow the stored camelCase keys. Every author-facing text field is a
//! [`LocalizedString`], so legacy and migrated documents deserialize alike. Fields a
//! type does not know are ignored on read, and fields it knows but cannot decode read as
//! their default (see [`lenient`]).

use crate::constants;
use crate::localized::{LocalizedString, lenient};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A typed read model bound to one store collection.
pub trait ContentEntity: DeserializeOwned + Serialize + Send + Sync + 'static {
    /// The collection this entity is stored in.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    /// Documents carry their id outside of the body; loaders set it after decoding.
    fn set_id(&mut self, id: String);

    /// Display position; unordered entities sort last.
    fn order(&self) -> i64;
}

macro_rules! content_entity {
    ($ty:ty, $collection:expr) => {
        impl ContentEntity for $ty {
            const COLLECTION: &'static str = $collection;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: String) {
                self.id = id;
            }

            fn order(&self) -> i64 {
                self.order.unwrap_or(i64::MAX)
            }
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::or_default")]
    pub id: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub slug: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub icon: Option<String>,
    pub title: Option<LocalizedString>,
    pub description: Option<LocalizedString>,
    pub short_description: Option<LocalizedString>,
    pub pricing: Option<LocalizedString>,
    pub duration: Option<LocalizedString>,
    pub meta_title: Option<LocalizedString>,
    pub meta_description: Option<LocalizedString>,
    #[serde(deserialize_with = "lenient::list")]
    pub features: Vec<LocalizedString>,
    #[serde(deserialize_with = "lenient::list")]
    pub benefits: Vec<LocalizedString>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub order: Option<i64>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamMember {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::or_default")]
    pub id: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub name: Option<String>,
    pub role: Option<LocalizedString>,
    pub bio: Option<LocalizedString>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub phone: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub photo: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub order: Option<i64>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessStep {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::or_default")]
    pub id: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub step_number: Option<i64>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub icon: Option<String>,
    pub title: Option<LocalizedString>,
    pub description: Option<LocalizedString>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Testimonial {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::or_default")]
    pub id: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub client_name: Option<String>,
    pub content: Option<LocalizedString>,
    pub role: Option<LocalizedString>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub rating: Option<u8>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub is_approved: Option<bool>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Announcement {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::or_default")]
    pub id: String,
    pub title: Option<LocalizedString>,
    pub content: Option<LocalizedString>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub is_active: Option<bool>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub is_pinned: Option<bool>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub order: Option<i64>,
}

/// One entry of [`LegalCategory::steps`]; stored inline, never on its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegalStep {
    pub title: Option<LocalizedString>,
    pub description: Option<LocalizedString>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LegalCategory {
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "lenient::or_default")]
    pub id: String,
    #[serde(deserialize_with = "lenient::or_default")]
    pub slug: Option<String>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub icon: Option<String>,
    pub title: Option<LocalizedString>,
    pub description: Option<LocalizedString>,
    #[serde(deserialize_with = "lenient::list")]
    pub steps: Vec<LegalStep>,
    #[serde(deserialize_with = "lenient::or_default")]
    pub order: Option<i64>,
}

content_entity!(Service, constants::SERVICES);
content_entity!(TeamMember, constants::TEAM);
content_entity!(ProcessStep, constants::PROCESSES);
content_entity!(Testimonial, constants::TESTIMONIALS);
content_entity!(Announcement, constants::ANNOUNCEMENTS);
content_entity!(LegalCategory, constants::LEGAL_CATEGORIES);
