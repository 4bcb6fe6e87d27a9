//! Unit tests for the entropy/strength estimator.

use passvault::services::strength_estimator::{
    assess, character_pool_size, entropy_bits, DIGIT_POOL, LOWERCASE_POOL, SYMBOL_POOL,
    UPPERCASE_POOL,
};
use passvault::types::strength::StrengthBand;
use rstest::rstest;

// ─── Pool detection ───

#[rstest]
#[case("abc", LOWERCASE_POOL)]
#[case("ABC", UPPERCASE_POOL)]
#[case("123", DIGIT_POOL)]
#[case("!@#", SYMBOL_POOL)]
#[case("aA", LOWERCASE_POOL + UPPERCASE_POOL)]
#[case("a1", LOWERCASE_POOL + DIGIT_POOL)]
#[case("aA1", LOWERCASE_POOL + UPPERCASE_POOL + DIGIT_POOL)]
#[case("aA1!", LOWERCASE_POOL + UPPERCASE_POOL + DIGIT_POOL + SYMBOL_POOL)]
fn test_pool_size_per_class_mix(#[case] password: &str, #[case] expected: usize) {
    assert_eq!(character_pool_size(password), expected);
}

#[test]
fn test_space_counts_as_symbol() {
    assert_eq!(character_pool_size(" "), SYMBOL_POOL);
}

#[test]
fn test_non_ascii_counts_as_symbol() {
    assert_eq!(character_pool_size("ñé"), SYMBOL_POOL);
}

// ─── Entropy ───

#[test]
fn test_empty_password_has_zero_entropy() {
    assert_eq!(entropy_bits(""), 0.0);
}

#[test]
fn test_entropy_is_length_times_log2_pool() {
    // 8 lowercase: 8 * log2(26) = 37.6035... -> 37.6
    assert_eq!(entropy_bits("abcdefgh"), 37.6);
    // 10 digits: 10 * log2(10) = 33.2192... -> 33.22
    assert_eq!(entropy_bits("0123456789"), 33.22);
}

#[test]
fn test_entropy_uses_character_count_not_bytes() {
    // Four two-byte characters score as length 4 over the symbol pool.
    let expected = (4.0 * (SYMBOL_POOL as f64).log2() * 100.0).round() / 100.0;
    assert_eq!(entropy_bits("ñéñé"), expected);
}

#[test]
fn test_entropy_deterministic() {
    assert_eq!(entropy_bits("Tr0ub4dor&3"), entropy_bits("Tr0ub4dor&3"));
}

// ─── Bands ───

#[rstest]
#[case(0.0, StrengthBand::Weak)]
#[case(39.99, StrengthBand::Weak)]
#[case(40.0, StrengthBand::Medium)]
#[case(59.99, StrengthBand::Medium)]
#[case(60.0, StrengthBand::Strong)]
#[case(79.99, StrengthBand::Strong)]
#[case(80.0, StrengthBand::MilitaryGrade)]
#[case(200.0, StrengthBand::MilitaryGrade)]
fn test_band_boundaries(#[case] bits: f64, #[case] expected: StrengthBand) {
    assert_eq!(StrengthBand::classify(bits), expected);
}

#[test]
fn test_band_labels_match_ui_wording() {
    assert_eq!(StrengthBand::Weak.label(), "Weak");
    assert_eq!(StrengthBand::Medium.label(), "Medium");
    assert_eq!(StrengthBand::Strong.label(), "Strong");
    assert_eq!(StrengthBand::MilitaryGrade.label(), "Military Grade");
}

#[test]
fn test_military_grade_serializes_with_space() {
    let json = serde_json::to_string(&StrengthBand::MilitaryGrade).unwrap();
    assert_eq!(json, "\"Military Grade\"");
}

// ─── Report ───

#[test]
fn test_assess_combines_entropy_and_band() {
    let report = assess("abcdefgh");
    assert_eq!(report.entropy_bits, 37.6);
    assert_eq!(report.band, StrengthBand::Weak);

    let report = assess("abcdefghijklm");
    // 13 * log2(26) = 61.11 -> Strong
    assert_eq!(report.band, StrengthBand::Strong);
}
