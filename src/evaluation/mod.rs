use std::collections::HashMap;

use cookie::Cookie;

/// Resolve whether a feature flag is enabled in the given raw cookie text.
///
/// The flag is enabled when a cookie with that name is present AND carries a
/// non-empty value. The value's content is deliberately not interpreted:
/// `"false"`, `"0"` and `"no"` all count as enabled, because the check is
/// cookie presence, not boolean parsing. Only a missing cookie or an
/// empty-string value disables the flag.
pub fn resolve_flag(raw_cookie_text: &str, flag_name: &str) -> bool {
    let cookies = parse_cookie_header(raw_cookie_text);

    cookies
        .get(flag_name)
        .is_some_and(|value| !value.is_empty())
}

/// Parse a raw `Cookie` header into a name -> value map.
///
/// Parsing is delegated to the `cookie` crate and kept lenient: segments
/// that do not parse are skipped, so malformed input degrades to a partial
/// (or empty) map rather than an error. Values are percent-decoded and
/// stripped of surrounding quotes. When a name repeats, the first
/// occurrence wins.
pub(crate) fn parse_cookie_header(raw: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();

    for parsed in Cookie::split_parse_encoded(raw).flatten() {
        cookies
            .entry(parsed.name().to_string())
            .or_insert_with(|| parsed.value_trimmed().to_string());
    }

    cookies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enabled_when_cookie_present_with_value() {
        assert!(resolve_flag("test-flag=true", "test-flag"));
        assert!(resolve_flag("test-flag=1", "test-flag"));
    }

    #[test]
    fn test_disabled_when_value_is_empty() {
        assert!(!resolve_flag("test-flag=", "test-flag"));
    }

    #[test]
    fn test_disabled_when_cookie_is_missing() {
        assert!(!resolve_flag("other-flag=true", "test-flag"));
    }

    #[test]
    fn test_disabled_when_cookie_text_is_empty() {
        assert!(!resolve_flag("", "test-flag"));
    }

    #[test]
    fn test_presence_truthiness_ignores_value_content() {
        // The check is presence, not boolean parsing
        assert!(resolve_flag("test-flag=false", "test-flag"));
        assert!(resolve_flag("test-flag=0", "test-flag"));
        assert!(resolve_flag("test-flag=no", "test-flag"));
        assert!(resolve_flag("test-flag=off", "test-flag"));
    }

    #[test]
    fn test_every_non_empty_value_is_enabled() {
        for value in ["true", "1", "yes", "on", "false", "0", "no", "null", "abc123", "%20"] {
            let raw = format!("test-flag={}", value);
            assert!(resolve_flag(&raw, "test-flag"), "value {:?} should enable", value);
        }
    }

    #[test]
    fn test_lookup_among_multiple_cookies() {
        let raw = "test-flag=true; other-flag=; session=abc123";

        assert!(resolve_flag(raw, "test-flag"));
        assert!(!resolve_flag(raw, "other-flag")); // present but empty
        assert!(resolve_flag(raw, "session"));
        assert!(!resolve_flag(raw, "absent"));
    }

    #[test]
    fn test_values_are_percent_decoded() {
        let cookies = parse_cookie_header("test-flag=enabled%3Dtrue%26active%3Dyes");

        assert_eq!(
            cookies.get("test-flag").map(String::as_str),
            Some("enabled=true&active=yes")
        );
        assert!(resolve_flag("test-flag=enabled%3Dtrue%26active%3Dyes", "test-flag"));
    }

    #[test]
    fn test_malformed_segments_are_skipped() {
        let cookies = parse_cookie_header("garbage; a=1; ;; b=2");

        assert_eq!(cookies.len(), 2); // only the well-formed pairs survive
        assert_eq!(cookies.get("a").map(String::as_str), Some("1"));
        assert_eq!(cookies.get("b").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_first_duplicate_wins() {
        let cookies = parse_cookie_header("a=first; a=second");

        assert_eq!(cookies.get("a").map(String::as_str), Some("first"));
    }

    #[test]
    fn test_whitespace_around_pairs_is_tolerated() {
        let cookies = parse_cookie_header(" a=1 ;  b=2");

        assert_eq!(cookies.get("a").map(String::as_str), Some("1"));
        assert_eq!(cookies.get("b").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_quoted_empty_value_is_disabled() {
        // A quoted value unwraps; "" is still the empty string
        assert!(!resolve_flag("test-flag=\"\"", "test-flag"));
        assert!(resolve_flag("test-flag=\"yes\"", "test-flag"));
    }

    #[test]
    fn test_empty_flag_name_never_matches() {
        assert!(!resolve_flag("a=1; b=2", ""));
        assert!(!resolve_flag("", ""));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let raw = "test-flag=true; other=";

        assert_eq!(
            resolve_flag(raw, "test-flag"),
            resolve_flag(raw, "test-flag")
        );
        assert_eq!(resolve_flag(raw, "other"), resolve_flag(raw, "other"));
    }
}
