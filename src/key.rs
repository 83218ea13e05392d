//! Composite Key Module
//!
//! Builds and splits the two-part cache keys used by composite-key-aware
//! backends. A key is a `prefix` with an optional `suffix` joined by a single
//! delimiter character; a key without a suffix is a "bare" key, one with a
//! suffix is "scoped". The bare form holds the public entry for a resource,
//! the scoped form holds a variant (e.g. per-credential) entry.
//!
//! The delimiter is part of the on-the-wire key format: any external process
//! reading the backing store directly must know it to interpret keys.

// == Public Constants ==
/// Default delimiter separating prefix and suffix in a composite key.
pub const DEFAULT_DELIMITER: char = ';';

// == Compose ==
/// Builds a cache key from a prefix and an optional suffix.
///
/// Returns `prefix` alone when `suffix` is empty, otherwise
/// `prefix + DEFAULT_DELIMITER + suffix`. Neither part is altered.
///
/// # Arguments
/// * `prefix` - The shared ("public") part of the key
/// * `suffix` - The scoping part; empty for a bare key
pub fn compose(prefix: &str, suffix: &str) -> String {
    compose_with(prefix, suffix, DEFAULT_DELIMITER)
}

/// Builds a cache key using an explicit delimiter character.
pub fn compose_with(prefix: &str, suffix: &str, delimiter: char) -> String {
    if suffix.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix}{delimiter}{suffix}")
    }
}

// == Decompose ==
/// Splits a cache key back into its `(prefix, suffix)` parts.
///
/// Splits on the first occurrence of the delimiter; a key without a
/// delimiter is a bare key whose suffix is the empty string. Only the first
/// occurrence is structural, so a prefix that itself contains the delimiter
/// does not round-trip.
pub fn decompose(key: &str) -> (&str, &str) {
    decompose_with(key, DEFAULT_DELIMITER)
}

/// Splits a cache key using an explicit delimiter character.
pub fn decompose_with(key: &str, delimiter: char) -> (&str, &str) {
    match key.split_once(delimiter) {
        Some((prefix, suffix)) => (prefix, suffix),
        None => (key, ""),
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_with_suffix() {
        assert_eq!(compose("url", "auth-hash"), "url;auth-hash");
    }

    #[test]
    fn test_compose_without_suffix() {
        // No trailing delimiter for a bare key
        assert_eq!(compose("url", ""), "url");
    }

    #[test]
    fn test_decompose_is_inverse_of_compose() {
        let cases = [
            ("thisisprefix", "andthisissuffix"),
            ("thisisprefix", ""),
            ("", "andthisissuffix"),
            ("", ""),
        ];

        for (prefix, suffix) in cases {
            assert_eq!(
                decompose(&compose(prefix, suffix)),
                (prefix, suffix),
                "round trip failed for ({prefix:?}, {suffix:?})"
            );
        }
    }

    #[test]
    fn test_decompose_without_delimiter() {
        assert_eq!(decompose("just-a-prefix"), ("just-a-prefix", ""));
    }

    #[test]
    fn test_decompose_splits_on_first_delimiter_only() {
        // The suffix keeps any further delimiters verbatim
        assert_eq!(decompose("a;b;c"), ("a", "b;c"));
    }

    #[test]
    fn test_custom_delimiter() {
        assert_eq!(compose_with("url", "user", ':'), "url:user");
        assert_eq!(decompose_with("url:user", ':'), ("url", "user"));
        // The default delimiter is opaque content under a custom one
        assert_eq!(decompose_with("url;user", ':'), ("url;user", ""));
    }
}
