/// Finds the length, in bytes, of the common prefix between two strings.
///
/// Characters are compared whole, so the returned length is always a `char`
/// boundary in both `a` and `b`.
pub fn prefix_match(a: &str, b: &str) -> usize {
    for ((i, ca), cb) in a.char_indices().zip(b.chars()) {
        if ca != cb {
            return i;
        }
    }

    // One string is a prefix of the other
    a.len().min(b.len())
}

/// Splits two strings into their longest common prefix and the two remainders.
///
/// Returns `(common, rest_a, rest_b)` such that `a == common + rest_a` and
/// `b == common + rest_b`.
pub fn split_common_prefix<'a, 'b>(a: &'a str, b: &'b str) -> (&'a str, &'a str, &'b str) {
    let common_len = prefix_match(a, b);
    (&a[..common_len], &a[common_len..], &b[common_len..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_match() {
        assert_eq!(prefix_match("abcdef", "abc"), 3);
        assert_eq!(prefix_match("abc", "abcdef"), 3);
        assert_eq!(prefix_match("abcdef", "xyz"), 0);
        assert_eq!(prefix_match("", "xyz"), 0);
        assert_eq!(prefix_match("same", "same"), 4);
    }

    #[test]
    fn test_split_disjoint() {
        assert_eq!(split_common_prefix("hello", "world"), ("", "hello", "world"));
    }

    #[test]
    fn test_split_partial() {
        assert_eq!(split_common_prefix("helo", "hello"), ("hel", "o", "lo"));
    }

    #[test]
    fn test_split_prefix_of_other() {
        assert_eq!(split_common_prefix("am", "amore"), ("am", "", "ore"));
        assert_eq!(split_common_prefix("amore", "am"), ("am", "ore", ""));
        assert_eq!(split_common_prefix("", "amore"), ("", "", "amore"));
    }

    #[test]
    fn test_split_multibyte() {
        // 'é' and 'è' share their first UTF-8 byte; the split must not land inside them
        let (common, ra, rb) = split_common_prefix("café", "cafè");
        assert_eq!(common, "caf");
        assert_eq!(ra, "é");
        assert_eq!(rb, "è");

        let (common, ra, rb) = split_common_prefix("日本語", "日本人");
        assert_eq!(common, "日本");
        assert_eq!(ra, "語");
        assert_eq!(rb, "人");
    }
}
