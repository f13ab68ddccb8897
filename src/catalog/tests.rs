//! Catalog Module Tests
//!
//! ## Test Scopes
//! - **Vocabularies**: Category/locale tag parsing, legacy aliases, language hints.
//! - **Keys**: Composite key derivation per category and key policy.
//! - **Headwords**: Display normalization of indexed names.

#[cfg(test)]
mod tests {
    use crate::catalog::keys::*;
    use crate::catalog::types::{Category, Locale, PartitionKey, Record};
    use crate::error::SuggestError;

    fn record(category: Category, id: i64, name: &str) -> Record {
        Record {
            id,
            category,
            locale: Locale::Ru,
            name: name.to_string(),
            code: None,
            importance: 0,
        }
    }

    // ============================================================
    // CATEGORY / LOCALE TESTS
    // ============================================================

    #[test]
    fn test_category_tags_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_tag(category.tag()), Some(category));
        }
    }

    #[test]
    fn test_category_legacy_info_alias() {
        assert_eq!(Category::from_tag("info"), Some(Category::Info));
        assert_eq!(Category::from_tag(" INFO "), Some(Category::Info));
    }

    #[test]
    fn test_category_unknown_tag_is_invalid_input() {
        let err = "drug".parse::<Category>().unwrap_err();
        assert!(matches!(err, SuggestError::InvalidInput(_)));
    }

    #[test]
    fn test_locale_from_language_hint() {
        assert_eq!(Locale::from_language_hint(Some("uk-UA,uk;q=0.9")), Locale::Uk);
        assert_eq!(Locale::from_language_hint(Some("ru-UA")), Locale::Uk);
        assert_eq!(Locale::from_language_hint(Some("ru-RU,ru;q=0.9")), Locale::Ru);
        assert_eq!(Locale::from_language_hint(Some("en-US")), Locale::Ru);
        assert_eq!(Locale::from_language_hint(None), Locale::Ru);
    }

    #[test]
    fn test_locale_row_tags() {
        assert_eq!(Locale::from_row_tag("RU").unwrap(), Some(Locale::Ru));
        assert_eq!(Locale::from_row_tag("UA").unwrap(), Some(Locale::Uk));
        assert_eq!(Locale::from_row_tag("uk").unwrap(), Some(Locale::Uk));
        assert_eq!(Locale::from_row_tag("  ").unwrap(), None);
        assert!(Locale::from_row_tag("EN").is_err());
    }

    #[test]
    fn test_partition_keys_cover_all_ten() {
        let keys: Vec<PartitionKey> = PartitionKey::all().collect();
        assert_eq!(keys.len(), 10);
        assert_eq!(keys[0].to_string(), "atc-ru");
        assert_eq!(keys[1].to_string(), "atc-ua");
    }

    // ============================================================
    // KEY TESTS
    // ============================================================

    #[test]
    fn test_normalize_code_takes_text_before_separator() {
        assert_eq!(normalize_code("A10 | Insulin"), "A10");
        assert_eq!(normalize_code(" A 10 B |x|y"), "A10B");
        assert_eq!(normalize_code("no separator"), "noseparator");
    }

    #[test]
    fn test_code_records_key_on_id_and_code() {
        let mut rec = record(Category::Code, 7, "A10 | Insulin");
        rec.code = Some("A10".to_string());

        let keys = composite_keys(&rec, KeyPolicy::IdNameHash);
        assert_eq!(keys.doc_key, "7|A10");
        assert_eq!(keys.vault_key, "7|A10");
    }

    #[test]
    fn test_homonymous_codes_get_distinct_keys() {
        let a = record(Category::Code, 7, "A10 | Insulin");
        let b = record(Category::Code, 7, "B01 | Insulin");

        let ka = composite_keys(&a, KeyPolicy::Id);
        let kb = composite_keys(&b, KeyPolicy::Id);
        assert_ne!(ka.vault_key, kb.vault_key);
    }

    #[test]
    fn test_plain_id_policy() {
        let keys = composite_keys(&record(Category::Org, 42, "Acme"), KeyPolicy::Id);
        assert_eq!(keys.doc_key, "42");
        assert_eq!(keys.vault_key, "42");
    }

    #[test]
    fn test_name_hash_policy_suffixes_doc_key_only() {
        let keys = composite_keys(&record(Category::Org, 42, "Acme"), KeyPolicy::IdNameHash);
        assert!(keys.doc_key.starts_with("42|"));
        assert_eq!(keys.doc_key.len(), "42|".len() + 8);
        assert_eq!(keys.vault_key, "42");

        let other = composite_keys(&record(Category::Org, 42, "Acme Ltd"), KeyPolicy::IdNameHash);
        assert_ne!(keys.doc_key, other.doc_key);
    }

    #[test]
    fn test_name_digest_is_stable_hex() {
        let d = name_digest("Insulin");
        assert_eq!(d, name_digest("Insulin"));
        assert_eq!(d.len(), 8);
        assert!(d.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_vault_key_for_doc() {
        assert_eq!(vault_key_for_doc(Category::Code, "7|A10"), "7|A10");
        assert_eq!(vault_key_for_doc(Category::Org, "42|deadbeef"), "42");
        assert_eq!(vault_key_for_doc(Category::Info, "42"), "42");
    }

    #[test]
    fn test_key_policy_parse() {
        assert_eq!("id".parse::<KeyPolicy>().unwrap(), KeyPolicy::Id);
        assert_eq!("ID-Name-Hash".parse::<KeyPolicy>().unwrap(), KeyPolicy::IdNameHash);
        assert!("sha".parse::<KeyPolicy>().is_err());
    }

    // ============================================================
    // HEADWORD TESTS
    // ============================================================

    #[test]
    fn test_display_headword_normalizes_separator() {
        assert_eq!(display_headword("A10 | Insulin"), "A10 Insulin");
        assert_eq!(display_headword("  plain   name "), "plain name");
    }

    #[test]
    fn test_code_name_part() {
        assert_eq!(code_name_part("A10 | Insulin"), "Insulin");
        assert_eq!(code_name_part("A10|Insulin|x"), "Insulin|x");
        assert_eq!(code_name_part(" Insulin "), "Insulin");
    }
}
