//! URL protocol filtering.
//!
//! [`ProtocolFilter`] classifies a URL by looking for the first special
//! character: a `:` before any `/`, `?`, or `#` marks an absolute URL
//! whose scheme must be on the allow list; a leading `//` is
//! protocol-relative and only passes when the filter allows both `http`
//! and `https` (the proxy for "this document is served over the web");
//! anything else is path-relative. Classification never parses the URL —
//! a scheme like `java\nscript` simply fails the set lookup.
//!
//! Admitted URLs get one normalization: characters that can disguise a
//! colon in rendered text (`(`, `)`, U+0589, U+05C3, U+2236, U+FF1A) are
//! percent-encoded byte-wise. Nothing else is rewritten unless the
//! caller opts into [`UrlRelative::RewriteWithBase`].

use std::collections::HashSet;

use ::url::Url;

use crate::UrlPolicy;

/// Policy for URLs that do not carry a scheme.
///
/// The default is `PassThrough`: path-relative URLs inherit the
/// embedding document's origin and cannot change scheme, so they are
/// admitted as written. `Deny` strips them (the conservative choice when
/// the sanitized fragment may be re-served from elsewhere), and
/// `RewriteWithBase` resolves them against a fixed base.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum UrlRelative {
    Deny,
    #[default]
    PassThrough,
    RewriteWithBase(Url),
}

/// An allow-list URL policy keyed on the scheme.
///
/// # Examples
///
/// ```
/// use lye::ProtocolFilter;
///
/// let filter = ProtocolFilter::new(["http", "https", "mailto"]);
/// assert_eq!(
///     filter.filter("https://example.com/a"),
///     Some("https://example.com/a".to_string()),
/// );
/// assert_eq!(filter.filter("javascript:alert(1)"), None);
/// ```
#[derive(Clone, Debug)]
pub struct ProtocolFilter {
    schemes: HashSet<String>,
    relative: UrlRelative,
}

enum UrlClass<'a> {
    Absolute(&'a str),
    ProtocolRelative,
    Relative,
}

fn classify(url: &str) -> UrlClass<'_> {
    for (i, c) in url.char_indices() {
        match c {
            '/' | '?' | '#' => {
                return if url.starts_with("//") {
                    UrlClass::ProtocolRelative
                } else {
                    UrlClass::Relative
                }
            }
            ':' => return UrlClass::Absolute(&url[..i]),
            _ => {}
        }
    }
    UrlClass::Relative
}

/// Percent-encodes the characters that can hide a colon in display:
/// parentheses and the Unicode colon confusables.
fn encode_confusables(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '(' => out.push_str("%28"),
            ')' => out.push_str("%29"),
            '\u{0589}' | '\u{05C3}' | '\u{2236}' | '\u{FF1A}' => {
                let mut buf = [0u8; 4];
                for b in c.encode_utf8(&mut buf).bytes() {
                    out.push('%');
                    out.push_str(&format!("{:02X}", b));
                }
            }
            c => out.push(c),
        }
    }
    out
}

impl ProtocolFilter {
    /// Builds a filter admitting the given schemes. Scheme names are
    /// lowercased and any trailing `:` is dropped, so `"HTTPS:"` and
    /// `"https"` configure the same thing.
    pub fn new<I, S>(schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ProtocolFilter {
            schemes: schemes
                .into_iter()
                .map(|s| s.as_ref().trim_end_matches(':').to_ascii_lowercase())
                .collect(),
            relative: UrlRelative::default(),
        }
    }

    /// Configures the handling of scheme-less URLs.
    pub fn url_relative(mut self, relative: UrlRelative) -> Self {
        self.relative = relative;
        self
    }

    /// Classifies and filters one URL. `None` means the surrounding
    /// attribute or `url(…)` value must be dropped.
    pub fn filter(&self, url: &str) -> Option<String> {
        match classify(url) {
            UrlClass::Absolute(prefix) => {
                let scheme = prefix.to_ascii_lowercase();
                if self.schemes.contains(&scheme) {
                    Some(encode_confusables(url))
                } else {
                    None
                }
            }
            UrlClass::ProtocolRelative => {
                if !(self.schemes.contains("http") && self.schemes.contains("https")) {
                    return None;
                }
                self.resolve_relative(url)
            }
            UrlClass::Relative => self.resolve_relative(url),
        }
    }

    fn resolve_relative(&self, url: &str) -> Option<String> {
        match &self.relative {
            UrlRelative::Deny => None,
            UrlRelative::PassThrough => Some(encode_confusables(url)),
            UrlRelative::RewriteWithBase(base) => base
                .join(url)
                .ok()
                .map(|resolved| encode_confusables(resolved.as_str())),
        }
    }
}

impl UrlPolicy for ProtocolFilter {
    fn apply(&self, _element: &str, _attribute: &str, url: &str) -> Option<String> {
        self.filter(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web() -> ProtocolFilter {
        ProtocolFilter::new(["http", "https", "mailto"])
    }

    #[test]
    fn absolute_schemes() {
        assert_eq!(
            web().filter("http://example.com/x"),
            Some("http://example.com/x".into())
        );
        assert_eq!(
            web().filter("HTTPS://example.com"),
            Some("HTTPS://example.com".into())
        );
        assert_eq!(
            web().filter("mailto:a@b.example"),
            Some("mailto:a@b.example".into())
        );
        assert_eq!(web().filter("javascript:alert(1)"), None);
        assert_eq!(web().filter("vbscript:msgbox"), None);
        assert_eq!(web().filter("data:text/html,x"), None);
    }

    #[test]
    fn scheme_is_everything_before_the_colon() {
        // Whitespace is an ordinary character, not a separator; the
        // lookup just fails.
        assert_eq!(web().filter("java script:alert(1)"), None);
        assert_eq!(web().filter(":no-scheme"), None);
    }

    #[test]
    fn protocol_relative_requires_web_context() {
        assert_eq!(
            web().filter("//example.com/x"),
            Some("//example.com/x".into())
        );
        let mail_only = ProtocolFilter::new(["mailto"]);
        assert_eq!(mail_only.filter("//example.com/x"), None);
    }

    #[test]
    fn path_relative_is_admitted() {
        assert_eq!(web().filter("/img/a.png"), Some("/img/a.png".into()));
        assert_eq!(web().filter("a.png"), Some("a.png".into()));
        assert_eq!(web().filter("?q=1"), Some("?q=1".into()));
        assert_eq!(web().filter("#frag"), Some("#frag".into()));
    }

    #[test]
    fn deny_strips_relative() {
        let filter = web().url_relative(UrlRelative::Deny);
        assert_eq!(filter.filter("a.png"), None);
        assert_eq!(filter.filter("//example.com/x"), None);
        assert_eq!(
            filter.filter("http://example.com/x"),
            Some("http://example.com/x".into())
        );
    }

    #[test]
    fn rewrite_with_base() {
        let base = Url::parse("http://example.com/dir/page").unwrap();
        let filter = web().url_relative(UrlRelative::RewriteWithBase(base));
        assert_eq!(
            filter.filter("img.png"),
            Some("http://example.com/dir/img.png".into())
        );
        assert_eq!(
            filter.filter("//other.example/x"),
            Some("http://other.example/x".into())
        );
    }

    #[test]
    fn confusables_are_percent_encoded() {
        assert_eq!(
            web().filter("http://example.com/a(b)c"),
            Some("http://example.com/a%28b%29c".into())
        );
        assert_eq!(
            web().filter("http://example.com/\u{FF1A}x"),
            Some("http://example.com/%EF%BC%9Ax".into())
        );
        assert_eq!(
            web().filter("http://example.com/\u{2236}"),
            Some("http://example.com/%E2%88%B6".into())
        );
    }

    #[test]
    fn filtering_is_idempotent() {
        let once = web().filter("http://example.com/a(b)").unwrap();
        assert_eq!(web().filter(&once), Some(once.clone()));
    }
}
