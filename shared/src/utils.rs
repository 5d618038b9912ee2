//! # Display Helpers
//!
//! Formatting shared by every list row that shows an account.
//!
//! ```rust
//! use shared::utils::short_address;
//!
//! let seller = "0x3f1c0a55e2b4d9a6c7f0e8b1d2a3c4e5f6a7b8c9";
//! assert_eq!(short_address(seller), "0x3f1c...b8c9");
//! ```

/// Characters kept at the start, including the `0x` prefix when present.
const HEAD: usize = 6;
const TAIL: usize = 4;

/// Shorten an address to `head...tail`.
///
/// Addresses too short to benefit, or containing non-ASCII characters, are returned unchanged.
pub fn short_address(address: &str) -> String {
    elide(address, HEAD, TAIL)
}

/// Keep the first `head` and last `tail` characters of `value`, joined by `...`.
pub fn elide(value: &str, head: usize, tail: usize) -> String {
    let len = value.len();
    if !value.is_ascii() || len <= head + tail + 3 {
        return value.to_string();
    }
    format!("{}...{}", &value[..head], &value[len - tail..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_address() {
        let addr = "0x3f1c0a55e2b4d9a6c7f0e8b1d2a3c4e5f6a7b8c9";
        assert_eq!(short_address(addr), "0x3f1c...b8c9");
    }

    #[test]
    fn test_short_values_unchanged() {
        assert_eq!(short_address("0xseller"), "0xseller");
        assert_eq!(elide("abcdefghi", 3, 3), "abcdefghi");
        assert_eq!(elide("abcdefghij", 3, 3), "abc...hij");
    }

    #[test]
    fn test_non_ascii_unchanged() {
        let value = "ééééééééééééééééééé";
        assert_eq!(short_address(value), value);
    }
}
