//! Single-language renderings of the content entities, as the public pages consume them.
//!
//! Every text goes through the localized resolver; nothing here picks a slot by hand.

use cab_domain::Language;
use cab_domain::content::{
    Announcement, LegalCategory, LegalStep, ProcessStep, Service, TeamMember, Testimonial,
};
use cab_domain::{resolve, resolve_list};
use serde::Serialize;

/// Renders an entity in one language.
pub trait Localize {
    type View: ContentView;

    fn localize(&self, lang: Language) -> Self::View;
}

/// What listings need from any view.
pub trait ContentView: Serialize {
    fn id(&self) -> &str;

    /// The line a listing shows for this entry.
    fn headline(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceView {
    pub id: String,
    pub slug: Option<String>,
    pub icon: Option<String>,
    pub title: String,
    pub description: String,
    pub short_description: String,
    pub pricing: String,
    pub duration: String,
    pub meta_title: String,
    pub meta_description: String,
    pub features: Vec<String>,
    pub benefits: Vec<String>,
    pub order: Option<i64>,
    pub is_active: bool,
}

impl Localize for Service {
    type View = ServiceView;

    fn localize(&self, lang: Language) -> ServiceView {
        ServiceView {
            id: self.id.clone(),
            slug: self.slug.clone(),
            icon: self.icon.clone(),
            title: resolve(self.title.as_ref(), lang),
            description: resolve(self.description.as_ref(), lang),
            short_description: resolve(self.short_description.as_ref(), lang),
            pricing: resolve(self.pricing.as_ref(), lang),
            duration: resolve(self.duration.as_ref(), lang),
            meta_title: resolve(self.meta_title.as_ref(), lang),
            meta_description: resolve(self.meta_description.as_ref(), lang),
            features: resolve_list(&self.features, lang),
            benefits: resolve_list(&self.benefits, lang),
            order: self.order,
            is_active: self.is_active.unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberView {
    pub id: String,
    pub name: String,
    pub role: String,
    pub bio: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub photo: Option<String>,
    pub order: Option<i64>,
    pub is_active: bool,
}

impl Localize for TeamMember {
    type View = TeamMemberView;

    fn localize(&self, lang: Language) -> TeamMemberView {
        TeamMemberView {
            id: self.id.clone(),
            name: self.name.clone().unwrap_or_default(),
            role: resolve(self.role.as_ref(), lang),
            bio: resolve(self.bio.as_ref(), lang),
            email: self.email.clone(),
            phone: self.phone.clone(),
            photo: self.photo.clone(),
            order: self.order,
            is_active: self.is_active.unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessStepView {
    pub id: String,
    pub step_number: Option<i64>,
    pub icon: Option<String>,
    pub title: String,
    pub description: String,
    pub order: Option<i64>,
}

impl Localize for ProcessStep {
    type View = ProcessStepView;

    fn localize(&self, lang: Language) -> ProcessStepView {
        ProcessStepView {
            id: self.id.clone(),
            step_number: self.step_number,
            icon: self.icon.clone(),
            title: resolve(self.title.as_ref(), lang),
            description: resolve(self.description.as_ref(), lang),
            order: self.order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialView {
    pub id: String,
    pub client_name: String,
    pub content: String,
    pub role: String,
    pub rating: Option<u8>,
    pub date: Option<String>,
    pub is_approved: bool,
    pub order: Option<i64>,
}

impl Localize for Testimonial {
    type View = TestimonialView;

    fn localize(&self, lang: Language) -> TestimonialView {
        TestimonialView {
            id: self.id.clone(),
            client_name: self.client_name.clone().unwrap_or_default(),
            content: resolve(self.content.as_ref(), lang),
            role: resolve(self.role.as_ref(), lang),
            rating: self.rating,
            date: self.date.clone(),
            is_approved: self.is_approved.unwrap_or(false),
            order: self.order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub date: Option<String>,
    pub is_active: bool,
    pub is_pinned: bool,
    pub order: Option<i64>,
}

impl Localize for Announcement {
    type View = AnnouncementView;

    fn localize(&self, lang: Language) -> AnnouncementView {
        AnnouncementView {
            id: self.id.clone(),
            title: resolve(self.title.as_ref(), lang),
            content: resolve(self.content.as_ref(), lang),
            date: self.date.clone(),
            is_active: self.is_active.unwrap_or(true),
            is_pinned: self.is_pinned.unwrap_or(false),
            order: self.order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegalStepView {
    pub title: String,
    pub description: String,
}

fn step_view(step: &LegalStep, lang: Language) -> LegalStepView {
    LegalStepView {
        title: resolve(step.title.as_ref(), lang),
        description: resolve(step.description.as_ref(), lang),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegalCategoryView {
    pub id: String,
    pub slug: Option<String>,
    pub icon: Option<String>,
    pub title: String,
    pub description: String,
    pub steps: Vec<LegalStepView>,
    pub order: Option<i64>,
}

impl Localize for LegalCategory {
    type View = LegalCategoryView;

    fn localize(&self, lang: Language) -> LegalCategoryView {
        LegalCategoryView {
            id: self.id.clone(),
            slug: self.slug.clone(),
            icon: self.icon.clone(),
            title: resolve(self.title.as_ref(), lang),
            description: resolve(self.description.as_ref(), lang),
            steps: self.steps.iter().map(|step| step_view(step, lang)).collect(),
            order: self.order,
        }
    }
}

macro_rules! content_view {
    ($view:ty, $headline:ident) => {
        impl ContentView for $view {
            fn id(&self) -> &str {
                &self.id
            }

            fn headline(&self) -> &str {
                &self.$headline
            }
        }
    };
}

content_view!(ServiceView, title);
content_view!(TeamMemberView, name);
content_view!(ProcessStepView, title);
content_view!(TestimonialView, client_name);
content_view!(AnnouncementView, title);
content_view!(LegalCategoryView, title);

#[cfg(test)]
mod tests {
    use super::*;
    use cab_domain::{LocalizedString, LocalizedText};

    #[test]
    fn service_view_resolves_every_text() {
        let service = Service {
            id: "family".to_owned(),
            title: Some(LocalizedString::from(LocalizedText::new("Famille", "Family"))),
            pricing: Some(LocalizedString::from("Sur devis")),
            features: vec![
                LocalizedString::from("Médiation"),
                LocalizedString::from(LocalizedText::new("Garde", "")),
            ],
            ..Service::default()
        };

        let view = service.localize(Language::En);
        assert_eq!(view.title, "Family");
        assert_eq!(view.pricing, "Sur devis");
        assert_eq!(view.description, "");
        assert_eq!(view.features, ["Médiation", "Garde"]);
        assert!(view.is_active);
        assert_eq!(view.headline(), "Family");
    }

    #[test]
    fn legal_steps_are_localized() {
        let category = LegalCategory {
            id: "divorce".to_owned(),
            title: Some(LocalizedString::from("Divorce")),
            steps: vec![LegalStep {
                title: Some(LocalizedString::from(LocalizedText::new("Requête", "Petition"))),
                description: None,
            }],
            ..LegalCategory::default()
        };

        let view = category.localize(Language::En);
        let expected = LegalStepView { title: "Petition".to_owned(), description: String::new() };
        assert_eq!(view.steps, [expected]);
    }

    #[test]
    fn testimonials_are_listed_by_client() {
        let testimonial = Testimonial {
            id: "t1".to_owned(),
            client_name: Some("M. Dupont".to_owned()),
            content: Some(LocalizedString::from(LocalizedText::new("Merci", "Thanks"))),
            ..Testimonial::default()
        };
        let view = testimonial.localize(Language::Fr);
        assert_eq!(view.headline(), "M. Dupont");
        assert_eq!(view.content, "Merci");
        assert!(!view.is_approved);
    }
}
