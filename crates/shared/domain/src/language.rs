use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// A content language supported by the site.
///
/// French is the firm's primary language and the fallback for anything unrecognized.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl Language {
    /// Both languages, default first.
    pub const ALL: [Self; 2] = [Self::Fr, Self::En];

    /// The two-letter code used as the record slot name.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Fr => "fr",
            Self::En => "en",
        }
    }

    /// The other supported language; the fallback slot when this one is empty.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Fr => Self::En,
            Self::En => Self::Fr,
        }
    }

    /// Maps an arbitrary locale tag (`en-US`, `EN`, `fr_CA`, `de`, ...) to a supported
    /// language: anything starting with `en` is English, everything else the default.
    #[must_use]
    pub fn normalize(tag: &str) -> Self {
        let tag = tag.trim();
        let is_english = tag.get(..2).is_some_and(|prefix| prefix.eq_ignore_ascii_case("en"));
        if is_english { Self::En } else { Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn normalize_maps_english_tags() {
        for tag in ["en", "EN", "en-US", "en_GB", " en-Latn-CA ", "eng"] {
            assert_eq!(Language::normalize(tag), Language::En, "tag {tag:?}");
        }
    }

    #[test]
    fn normalize_defaults_everything_else_to_french() {
        for tag in ["fr", "fr-CA", "de", "", "e", "  ", "es-419", "émoji"] {
            assert_eq!(Language::normalize(tag), Language::Fr, "tag {tag:?}");
        }
    }

    #[test]
    fn parse_is_strict_but_case_insensitive() {
        assert_eq!(Language::from_str("EN").ok(), Some(Language::En));
        assert_eq!(Language::from_str("fr").ok(), Some(Language::Fr));
        assert!(Language::from_str("en-US").is_err());
    }

    #[test]
    fn codes_and_display_agree() {
        for lang in Language::iter() {
            assert_eq!(lang.to_string(), lang.code());
            assert_eq!(lang.as_ref(), lang.code());
            assert_eq!(lang.other().other(), lang);
        }
        assert_eq!(Language::ALL.len(), Language::iter().count());
    }
}
