//! Collection names as stored in the document store.

pub const SERVICES: &str = "services";
pub const TEAM: &str = "team";
pub const PROCESSES: &str = "processes";
/// Legacy spelling of [`PROCESSES`] still used by some writers.
pub const PROCESS_ALIAS: &str = "process";
pub const TESTIMONIALS: &str = "testimonials";
pub const ANNOUNCEMENTS: &str = "announcements";
pub const LEGAL_CATEGORIES: &str = "legalCategories";

/// Every content collection, in display order.
pub const COLLECTIONS: [&str; 6] =
    [SERVICES, TEAM, PROCESSES, TESTIMONIALS, ANNOUNCEMENTS, LEGAL_CATEGORIES];
