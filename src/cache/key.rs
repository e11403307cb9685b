//! Cache key construction.

use std::fmt::{Debug, Display};

use sha2::{Digest, Sha256};

/// Separator placed between key components.
pub const KEY_SEPARATOR: &str = ":";

/// Builds a deterministic cache key from request components.
///
/// Components are joined with `:` and suffixed with `_` plus the hex SHA-256
/// of the debug rendering of the whole argument list. The digest keeps keys
/// distinct when joined text collides (`["a:b"]` vs `["a", "b"]`).
pub fn cache_key<T>(parts: &[T]) -> String
where
    T: Display + Debug,
{
    let joined = parts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(KEY_SEPARATOR);

    let digest = Sha256::digest(format!("{:?}", parts).as_bytes());
    format!("{}_{}", joined, hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_deterministic() {
        let a = cache_key(&["text", "slugify", "Hello World"]);
        let b = cache_key(&["text", "slugify", "Hello World"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_key_prefix_and_digest() {
        let key = cache_key(&["date", "format"]);
        let (prefix, digest) = key.rsplit_once('_').unwrap();

        assert_eq!(prefix, "date:format");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_joined_text_collision_is_disambiguated() {
        let one = cache_key(&["a:b"]);
        let two = cache_key(&["a", "b"]);
        assert_ne!(one, two);
    }

    #[test]
    fn test_numeric_components() {
        let key = cache_key(&[1, 10]);
        assert!(key.starts_with("1:10_"));
    }
}
