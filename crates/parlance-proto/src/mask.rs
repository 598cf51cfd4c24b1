//! Glob matching for masks.
//!
//! `*` matches any run of characters (including none) and `?` matches
//! exactly one. The whole candidate must match; there is no substring
//! search. Nicknames, user masks and host names compare under RFC 1459
//! folding, channel name suffixes compare exactly.

use crate::casemap::irc_lower_char;

/// How two literal characters are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// RFC 1459 case folding.
    Insensitive,
    /// Byte-for-byte.
    Sensitive,
}

/// Match `candidate` against `pattern` with the given case rule.
pub fn glob(pattern: &str, candidate: &str, case: Case) -> bool {
    let fold = |c: char| match case {
        Case::Insensitive => irc_lower_char(c),
        Case::Sensitive => c,
    };
    let pat: Vec<char> = pattern.chars().map(fold).collect();
    let text: Vec<char> = candidate.chars().map(fold).collect();
    glob_chars(&pat, &text)
}

/// Iterative matcher with single-star backtracking. Linear in practice,
/// quadratic in the worst case, never exponential.
fn glob_chars(pat: &[char], text: &[char]) -> bool {
    let (mut p, mut t) = (0, 0);
    let mut resume: Option<(usize, usize)> = None;

    while t < text.len() {
        match pat.get(p) {
            Some('*') => {
                resume = Some((p + 1, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match resume {
                Some((after_star, from)) => {
                    p = after_star;
                    t = from + 1;
                    resume = Some((after_star, from + 1));
                }
                None => return false,
            },
        }
    }

    pat[p..].iter().all(|&c| c == '*')
}

/// Case-insensitive match, for nicknames, hosts, server names and user masks.
#[inline]
pub fn matches(pattern: &str, candidate: &str) -> bool {
    glob(pattern, candidate, Case::Insensitive)
}

/// Match a channel mask. The leading `#`/`&` must be identical and the rest
/// of the name is compared case-sensitively.
pub fn matches_channel(pattern: &str, name: &str) -> bool {
    let mut pc = pattern.chars();
    let mut nc = name.chars();
    match (pc.next(), nc.next()) {
        (Some(a), Some(b)) if a == b => glob(pc.as_str(), nc.as_str(), Case::Sensitive),
        (Some('*'), _) => glob(pattern, name, Case::Sensitive),
        _ => false,
    }
}

/// Whether `pattern` contains any wildcard.
#[inline]
pub fn has_wildcards(pattern: &str) -> bool {
    pattern.contains(['*', '?'])
}

/// Expand a partial ban/exception/invite mask to full `nick!user@host` form.
///
/// ```
/// use parlance_proto::mask::normalize_user_mask;
///
/// assert_eq!(normalize_user_mask("bob"), "bob!*@*");
/// assert_eq!(normalize_user_mask("bob!b"), "bob!b@*");
/// assert_eq!(normalize_user_mask("b@host"), "*!b@host");
/// assert_eq!(normalize_user_mask("*.example.org"), "*!*@*.example.org");
/// ```
pub fn normalize_user_mask(mask: &str) -> String {
    let bang = mask.find('!');
    let at = mask.find('@');
    match (bang, at) {
        (Some(b), Some(a)) if b < a => {
            let nick = non_empty_or_star(&mask[..b]);
            let user = non_empty_or_star(&mask[b + 1..a]);
            let host = non_empty_or_star(&mask[a + 1..]);
            format!("{nick}!{user}@{host}")
        }
        (Some(b), None) => format!(
            "{}!{}@*",
            non_empty_or_star(&mask[..b]),
            non_empty_or_star(&mask[b + 1..])
        ),
        (None, Some(a)) => format!(
            "*!{}@{}",
            non_empty_or_star(&mask[..a]),
            non_empty_or_star(&mask[a + 1..])
        ),
        (None, None) if mask.contains('.') || mask.contains(':') => format!("*!*@{mask}"),
        (None, None) => format!("{}!*@*", non_empty_or_star(mask)),
        // '@' before '!': treat everything as the host part.
        (Some(_), Some(_)) => format!("*!*@{mask}"),
    }
}

fn non_empty_or_star(s: &str) -> &str {
    if s.is_empty() {
        "*"
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_and_question() {
        assert!(matches("*", ""));
        assert!(matches("*", "anything"));
        assert!(matches("a*c", "abbbc"));
        assert!(matches("a?c", "abc"));
        assert!(!matches("a?c", "ac"));
        assert!(matches("*.example.org", "irc.EXAMPLE.org"));
        assert!(!matches("*.example.org", "example.org"));
        assert!(matches("**a**", "banana"));
    }

    #[test]
    fn whole_candidate_only() {
        assert!(!matches("ali", "alice"));
        assert!(!matches("lic", "alice"));
    }

    #[test]
    fn rfc1459_folding() {
        assert!(matches("nick[*]", "NICK{away}"));
    }

    #[test]
    fn channel_suffix_is_case_sensitive() {
        assert!(matches_channel("#Rust*", "#Rustaceans"));
        assert!(!matches_channel("#rust*", "#Rustaceans"));
        assert!(!matches_channel("&rust", "#rust"));
        assert!(matches_channel("*", "#anything"));
    }

    #[test]
    fn backtracks_over_many_stars() {
        let text = "a".repeat(64);
        assert!(!matches("*a*a*a*a*a*a*b", &text));
    }

    #[test]
    fn normalizes_masks() {
        assert_eq!(normalize_user_mask("!@"), "*!*@*");
        assert_eq!(normalize_user_mask("*!*@*"), "*!*@*");
        assert_eq!(normalize_user_mask("nick!user@host"), "nick!user@host");
    }
}
