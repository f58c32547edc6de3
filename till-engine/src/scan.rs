//! Scan tokenizer
//!
//! Scanner hardware emits one fixed string per scan; operators
//! sometimes type a quantity shorthand around the code. Both shapes
//! are parsed here without touching the catalog - resolving a code to
//! an entry is the caller's job.
//!
//! Accepted shapes, tried in order:
//! 1. `<qty><sep><code>` (e.g. `3*SKU123`)
//! 2. `<code><sep><qty>` (e.g. `SKU123*3`)
//! 3. bare code, implicit quantity 1
//!
//! Known limitation: a code whose own text contains a separator next
//! to digits (e.g. the SKU `SKU-3`) parses as a quantity shorthand.
//! Callers disambiguate by checking the full raw string against the
//! catalog before trusting the split.

use shared::scan::ScanToken;

/// Separators accepted between quantity and code
const SEPARATORS: [char; 5] = ['*', 'x', 'X', '|', '-'];

/// Parse raw scanner/search input into a [`ScanToken`].
///
/// Empty or whitespace-only input yields `None`.
pub fn tokenize(input: &str) -> Option<ScanToken> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    for sep in SEPARATORS {
        if let Some((left, right)) = input.split_once(sep) {
            // Shape 1: <qty><sep><code>
            if let Some(qty) = parse_quantity(left) {
                let code = right.trim();
                if !code.is_empty() {
                    return Some(ScanToken::new(code, qty));
                }
            }
            // Shape 2: <code><sep><qty>
            if let Some(qty) = parse_quantity(right) {
                let code = left.trim();
                if !code.is_empty() {
                    return Some(ScanToken::new(code, qty));
                }
            }
        }
    }

    // Shape 3: bare code
    Some(ScanToken::bare(input))
}

/// Strict positive-integer parse; anything else rejects the split.
fn parse_quantity(text: &str) -> Option<i32> {
    let text = text.trim();
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse::<i32>().ok().filter(|qty| *qty > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qty_then_code() {
        assert_eq!(tokenize("3*SKU123"), Some(ScanToken::new("SKU123", 3)));
        assert_eq!(tokenize("2xABC"), Some(ScanToken::new("ABC", 2)));
        assert_eq!(tokenize("4|B0001"), Some(ScanToken::new("B0001", 4)));
    }

    #[test]
    fn test_code_then_qty() {
        assert_eq!(tokenize("SKU123*3"), Some(ScanToken::new("SKU123", 3)));
        assert_eq!(tokenize("ABC X 2"), Some(ScanToken::new("ABC", 2)));
    }

    #[test]
    fn test_bare_code_defaults_to_one() {
        assert_eq!(tokenize("SKU123"), Some(ScanToken::new("SKU123", 1)));
        assert_eq!(tokenize("8412345678905"), Some(ScanToken::bare("8412345678905")));
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(tokenize(""), None);
        assert_eq!(tokenize("   "), None);
        assert_eq!(tokenize("\t\n"), None);
    }

    #[test]
    fn test_zero_and_negative_quantity_rejected() {
        // 0*CODE is not a valid shorthand; falls through to bare code
        assert_eq!(tokenize("0*SKU"), Some(ScanToken::bare("0*SKU")));
        // "-3" never parses as a quantity (the '-' is a separator char)
        assert_eq!(tokenize("-3*SKU"), Some(ScanToken::bare("-3*SKU")));
    }

    #[test]
    fn test_non_numeric_flanks_stay_bare() {
        assert_eq!(tokenize("AB*CD"), Some(ScanToken::bare("AB*CD")));
        assert_eq!(tokenize("x"), Some(ScanToken::bare("x")));
    }

    #[test]
    fn test_hyphenated_code_misparse_is_documented() {
        // Shape parsing cannot tell a hyphenated SKU from a quantity
        // shorthand; callers gate on catalog lookup first.
        assert_eq!(tokenize("SKU-3"), Some(ScanToken::new("SKU", 3)));
    }

    #[test]
    fn test_first_separator_wins() {
        // '*' is checked before 'x'; the split uses the first match
        assert_eq!(tokenize("2*CODEx5"), Some(ScanToken::new("CODEx5", 2)));
    }

    #[test]
    fn test_large_quantity() {
        assert_eq!(tokenize("120*SKU"), Some(ScanToken::new("SKU", 120)));
    }
}
