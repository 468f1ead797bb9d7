use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;

pub const SHARE_CODE_LENGTH: usize = 6;
pub const LINK_SUFFIX_LENGTH: usize = 12;

const SHARE_CODE_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const LINK_SUFFIX_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

lazy_static! {
    static ref SHARE_CODE_PATTERN: Regex = Regex::new(r"^[A-Z0-9]+$").unwrap();
    static ref LINK_SUFFIX_PATTERN: Regex = Regex::new(r"/d/([a-zA-Z0-9]+)$").unwrap();
}

/// What a user-supplied identifier was recognised as.
///
/// Matchers run in declaration order and the first hit wins, so a six
/// character uppercase value is always a code even if it could also pass as
/// something else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Identifier<'a> {
    /// Six characters from `[A-Z0-9]`.
    Code(&'a str),
    /// Anything starting with `http`, matched verbatim against stored links.
    Link(&'a str),
    /// The alphanumeric tail of a `/d/<suffix>` path.
    LinkSuffix(&'a str),
}

impl<'a> Identifier<'a> {
    pub fn classify(raw: &'a str) -> Option<Self> {
        if raw.len() == SHARE_CODE_LENGTH && SHARE_CODE_PATTERN.is_match(raw) {
            return Some(Identifier::Code(raw));
        }

        if raw.starts_with("http") {
            return Some(Identifier::Link(raw));
        }

        LINK_SUFFIX_PATTERN
            .captures(raw)
            .and_then(|caps| caps.get(1))
            .map(|suffix| Identifier::LinkSuffix(suffix.as_str()))
    }
}

/// A freshly generated code/link pair for a new upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareIdentifiers {
    pub share_code: String,
    pub share_link: String,
}

impl ShareIdentifiers {
    pub fn generate(base_url: &str) -> Self {
        Self {
            share_code: generate_share_code(),
            share_link: generate_share_link(base_url),
        }
    }
}

fn random_string(alphabet: &[u8], length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..alphabet.len());
            alphabet[idx] as char
        })
        .collect()
}

pub fn generate_share_code() -> String {
    random_string(SHARE_CODE_CHARS, SHARE_CODE_LENGTH)
}

pub fn generate_share_link(base_url: &str) -> String {
    format!(
        "{}/d/{}",
        base_url.trim_end_matches('/'),
        random_string(LINK_SUFFIX_CHARS, LINK_SUFFIX_LENGTH)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_uppercase_alphanumerics_are_a_code() {
        assert_eq!(Identifier::classify("AB12CD"), Some(Identifier::Code("AB12CD")));
        assert_eq!(Identifier::classify("ZZZZZZ"), Some(Identifier::Code("ZZZZZZ")));
    }

    #[test]
    fn lowercase_or_wrong_length_is_not_a_code() {
        assert_eq!(Identifier::classify("ab12cd"), None);
        assert_eq!(Identifier::classify("AB12C"), None);
        assert_eq!(Identifier::classify("AB12CDE"), None);
    }

    #[test]
    fn http_prefix_is_a_full_link() {
        assert_eq!(
            Identifier::classify("https://x/d/abc123def456"),
            Some(Identifier::Link("https://x/d/abc123def456"))
        );
        assert_eq!(
            Identifier::classify("http://localhost:5000/nothing"),
            Some(Identifier::Link("http://localhost:5000/nothing"))
        );
    }

    #[test]
    fn path_fragment_yields_suffix() {
        assert_eq!(
            Identifier::classify("/d/abc123def456"),
            Some(Identifier::LinkSuffix("abc123def456"))
        );
        assert_eq!(
            Identifier::classify("example.com/d/abc123def456"),
            Some(Identifier::LinkSuffix("abc123def456"))
        );
    }

    #[test]
    fn bare_suffix_and_garbage_are_unclassified() {
        assert_eq!(Identifier::classify("abc123def456"), None);
        assert_eq!(Identifier::classify("/d/abc-123"), None);
        assert_eq!(Identifier::classify("/d/"), None);
        assert_eq!(Identifier::classify(""), None);
    }

    #[test]
    fn generated_code_uses_uppercase_alphabet() {
        for _ in 0..50 {
            let code = generate_share_code();
            assert_eq!(code.len(), SHARE_CODE_LENGTH);
            assert!(code.bytes().all(|b| SHARE_CODE_CHARS.contains(&b)));
            assert_eq!(Identifier::classify(&code), Some(Identifier::Code(&code)));
        }
    }

    #[test]
    fn generated_link_has_base_and_lowercase_suffix() {
        let link = generate_share_link("https://share.example/");
        let suffix = link
            .strip_prefix("https://share.example/d/")
            .expect("link should start with base and /d/");
        assert_eq!(suffix.len(), LINK_SUFFIX_LENGTH);
        assert!(suffix.bytes().all(|b| LINK_SUFFIX_CHARS.contains(&b)));
    }
}
