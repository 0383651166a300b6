/*!
 * Tests for language code utilities
 */

use summarize_pro::language_utils::{
    get_language_name, is_pivot_language, normalize_to_part1_or_part2t, normalize_to_part2t, resolve_language,
    SUPPORTED_LANGUAGES,
};

#[test]
fn test_resolve_language_withCodesNamesAndIsoForms_shouldReturnTableCode() {
    assert_eq!(resolve_language("fr").unwrap(), "fr");
    assert_eq!(resolve_language(" FR ").unwrap(), "fr");
    assert_eq!(resolve_language("French").unwrap(), "fr");
    assert_eq!(resolve_language("fra").unwrap(), "fr");
    assert_eq!(resolve_language("fre").unwrap(), "fr");
    assert_eq!(resolve_language("deu").unwrap(), "de");
    assert_eq!(resolve_language("zh-TW").unwrap(), "zh-tw");
    assert_eq!(resolve_language("chinese (simplified)").unwrap(), "zh-cn");
    assert_eq!(resolve_language("zh").unwrap(), "zh-cn");
    assert_eq!(resolve_language("fil").unwrap(), "tl");
}

#[test]
fn test_resolve_language_withUnknownInput_shouldFail() {
    assert!(resolve_language("").is_err());
    assert!(resolve_language("   ").is_err());
    assert!(resolve_language("klingon").is_err());
    assert!(resolve_language("xx").is_err());
}

#[test]
fn test_supported_languages_withTable_shouldUseLowercaseNames() {
    assert!(SUPPORTED_LANGUAGES.len() > 100);
    assert!(SUPPORTED_LANGUAGES.contains(&("en", "english")));
    for (code, name) in SUPPORTED_LANGUAGES {
        assert_eq!(*name, name.to_lowercase(), "name for {} is not lowercase", code);
    }
}

#[test]
fn test_pivot_language_withEnglishForms_shouldBeDetected() {
    assert!(is_pivot_language("en"));
    assert!(is_pivot_language("eng"));
    assert!(is_pivot_language("English"));
    assert!(!is_pivot_language("fr"));
    assert!(!is_pivot_language("unknown"));
}

#[test]
fn test_get_language_name_withTableCode_shouldReturnTableName() {
    assert_eq!(get_language_name("de").unwrap(), "german");
    assert_eq!(get_language_name("zh-cn").unwrap(), "chinese (simplified)");
    assert!(get_language_name("xyz").is_err());
}

#[test]
fn test_normalize_withIsoVariants_shouldAgreeOnOneLanguage() {
    assert_eq!(normalize_to_part2t("fr").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("fre").unwrap(), "fra");
    assert_eq!(normalize_to_part1_or_part2t("ger").unwrap(), "de");
    assert_eq!(normalize_to_part1_or_part2t("eng").unwrap(), "en");
    assert!(normalize_to_part2t("zz").is_err());
}
