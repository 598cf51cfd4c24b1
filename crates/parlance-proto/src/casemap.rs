//! RFC 1459 case folding.
//!
//! Nicknames and channel names compare case-insensitively, and the
//! Scandinavian pairs `[]\~` fold onto `{}|^`.

/// Fold one character to its RFC 1459 lowercase form.
#[inline]
pub const fn irc_lower_char(c: char) -> char {
    match c {
        'A'..='Z' => (c as u8 | 0x20) as char,
        '[' => '{',
        ']' => '}',
        '\\' => '|',
        '~' => '^',
        _ => c,
    }
}

/// Fold a whole string. The result is the key every directory table uses.
pub fn irc_to_lower(s: &str) -> String {
    let mut folded = String::with_capacity(s.len());
    folded.extend(s.chars().map(irc_lower_char));
    folded
}

/// Case-insensitive equality under RFC 1459 folding.
pub fn irc_eq(a: &str, b: &str) -> bool {
    a.len() == b.len()
        && a
            .chars()
            .map(irc_lower_char)
            .eq(b.chars().map(irc_lower_char))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_scandinavian_pairs() {
        assert_eq!(irc_to_lower("[Away]\\~"), "{away}|^");
        assert_eq!(irc_lower_char('{'), '{');
    }

    #[test]
    fn eq_ignores_case() {
        assert!(irc_eq("Alice[m]", "alice{M}"));
        assert!(!irc_eq("alice", "alice_"));
        assert!(!irc_eq("bob", "rob"));
    }

    #[test]
    fn leaves_non_ascii_alone() {
        assert_eq!(irc_to_lower("ÄBC"), "Äbc");
    }
}
