//! Issue key generation.
//!
//! Keys look like `MYCO-202503-008`: a project-derived prefix, a
//! year-month period, and a per-period sequence number. The generator
//! is pure given its inputs; the storage layer is responsible for the
//! read-generate-write race (it rejects duplicate keys at insert, see
//! [`crate::store`]).

use chrono::{DateTime, Datelike, Utc};

/// Fallback prefix when a slug yields no usable characters.
const DEFAULT_PREFIX: &str = "PROJ";

/// Derive the key prefix from a project slug.
///
/// Uppercased alphanumerics only, truncated to 4 characters;
/// `"PROJ"` when nothing usable remains.
#[must_use]
pub fn key_prefix(project_slug: &str) -> String {
    let prefix: String = project_slug
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(4)
        .collect::<String>()
        .to_uppercase();

    if prefix.is_empty() {
        DEFAULT_PREFIX.to_string()
    } else {
        prefix
    }
}

/// Format the `YYYYMM` period component.
#[must_use]
pub fn period(now: DateTime<Utc>) -> String {
    format!("{:04}{:02}", now.year(), now.month())
}

/// Generate the next issue key for a project.
///
/// Scans `existing_keys` for keys already in this prefix+period,
/// takes the maximum numeric suffix, and returns `max + 1` zero-padded
/// to three digits (wider once the sequence passes 999). Keys from
/// other periods or prefixes are ignored, so passing a project's full
/// key list is fine.
#[must_use]
pub fn generate_key(project_slug: &str, existing_keys: &[String], now: DateTime<Utc>) -> String {
    let prefix = key_prefix(project_slug);
    let period = period(now);
    let stem = format!("{prefix}-{period}-");

    let max_num = existing_keys
        .iter()
        .filter_map(|key| key.strip_prefix(&stem))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .unwrap_or(0);

    format!("{stem}{:03}", max_num + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn march_2025() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_prefix_from_spaced_name() {
        assert_eq!(key_prefix("My Cool Project"), "MYCO");
    }

    #[test]
    fn test_prefix_strips_hyphens() {
        assert_eq!(key_prefix("my-cool-project"), "MYCO");
    }

    #[test]
    fn test_prefix_short_slug() {
        assert_eq!(key_prefix("ab"), "AB");
    }

    #[test]
    fn test_prefix_empty_falls_back() {
        assert_eq!(key_prefix(""), "PROJ");
        assert_eq!(key_prefix("---"), "PROJ");
        assert_eq!(key_prefix("  "), "PROJ");
    }

    #[test]
    fn test_generate_first_key() {
        let key = generate_key("My Cool Project", &[], march_2025());
        assert_eq!(key, "MYCO-202503-001");
    }

    #[test]
    fn test_generate_increments_max_suffix() {
        let existing = vec![
            "MYCO-202503-001".to_string(),
            "MYCO-202503-007".to_string(),
        ];
        let key = generate_key("My Cool Project", &existing, march_2025());
        assert_eq!(key, "MYCO-202503-008");
    }

    #[test]
    fn test_generate_ignores_gaps() {
        // Max wins, not count: deleted issues must not cause reuse.
        let existing = vec!["MYCO-202503-005".to_string()];
        let key = generate_key("My Cool Project", &existing, march_2025());
        assert_eq!(key, "MYCO-202503-006");
    }

    #[test]
    fn test_generate_ignores_other_periods_and_prefixes() {
        let existing = vec![
            "MYCO-202502-099".to_string(),
            "OTHR-202503-050".to_string(),
            "MYCO-202503-002".to_string(),
        ];
        let key = generate_key("My Cool Project", &existing, march_2025());
        assert_eq!(key, "MYCO-202503-003");
    }

    #[test]
    fn test_generate_empty_slug_uses_proj() {
        let key = generate_key("", &[], march_2025());
        assert!(key.starts_with("PROJ-"));
        assert_eq!(key, "PROJ-202503-001");
    }

    #[test]
    fn test_generate_past_three_digits() {
        let existing = vec!["MYCO-202503-999".to_string()];
        let key = generate_key("My Cool Project", &existing, march_2025());
        assert_eq!(key, "MYCO-202503-1000");
    }

    #[test]
    fn test_generate_skips_malformed_suffixes() {
        let existing = vec![
            "MYCO-202503-xyz".to_string(),
            "MYCO-202503-004".to_string(),
        ];
        let key = generate_key("My Cool Project", &existing, march_2025());
        assert_eq!(key, "MYCO-202503-005");
    }

    #[test]
    fn test_period_format() {
        assert_eq!(period(march_2025()), "202503");
        let jan = Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(period(jan), "202601");
    }
}
