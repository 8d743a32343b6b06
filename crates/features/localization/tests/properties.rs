use cab_domain::Language;
use cab_localization::migrator::{migrate_list, migrate_text};
use cab_localization::{resolve_list_value, resolve_value};
use proptest::prelude::*;
use serde_json::{Value, json};

fn any_language() -> impl Strategy<Value = Language> {
    prop_oneof![Just(Language::Fr), Just(Language::En)]
}

/// Strings, records (complete or partial) and the odd non-text scalar.
fn localized_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        ".{0,10}".prop_map(Value::String),
        (".{0,6}", ".{0,6}").prop_map(|(fr, en)| json!({ "fr": fr, "en": en })),
        ".{0,6}".prop_map(|fr| json!({ "fr": fr })),
        ".{0,6}".prop_map(|en| json!({ "en": en })),
        any::<i32>().prop_map(|n| json!(n)),
        Just(Value::Null),
    ];
    prop_oneof![leaf.clone(), prop::collection::vec(leaf, 0..5).prop_map(Value::Array)]
}

proptest! {
    #[test]
    fn migration_is_idempotent(value in localized_value()) {
        let once = migrate_text(&value).unwrap_or_else(|| value.clone());
        prop_assert_eq!(migrate_text(&once), None);
    }

    #[test]
    fn migration_preserves_what_readers_see(value in localized_value(), lang in any_language()) {
        let migrated = migrate_text(&value).unwrap_or_else(|| value.clone());
        prop_assert_eq!(resolve_value(Some(&migrated), lang), resolve_value(Some(&value), lang));
    }

    #[test]
    fn list_migration_is_idempotent(value in localized_value()) {
        let once = migrate_list(&value).unwrap_or_else(|| value.clone());
        prop_assert_eq!(migrate_list(&once), None);
    }

    #[test]
    fn list_migration_preserves_what_readers_see(
        value in localized_value(),
        lang in any_language(),
    ) {
        let migrated = migrate_list(&value).unwrap_or_else(|| value.clone());
        prop_assert_eq!(
            resolve_list_value(Some(&migrated), lang),
            resolve_list_value(Some(&value), lang)
        );
    }

    #[test]
    fn plain_strings_resolve_verbatim(text in ".*", lang in any_language()) {
        prop_assert_eq!(resolve_value(Some(&Value::String(text.clone())), lang), text);
    }
}
