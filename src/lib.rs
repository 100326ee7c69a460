#![doc(html_root_url = "https://docs.rs/lye/0.1.0")]

// Copyright (C) the lye developers
// this library is released under the same terms as Rust itself.

//! Lye is a whitelist-based sanitization core for the two places where
//! untrusted markup is hardest to clean: CSS `style` values and HTML
//! character references. It is designed to sit inside an HTML sanitizer
//! and guarantee that whatever survives cannot execute script, exfiltrate
//! via style, or navigate to a disallowed scheme.
//!
//! Everything is driven by a caller-supplied [`Schema`]: a property (or a
//! function such as `rgb(…)`) admits exactly the token classes, literal
//! words, and nested functions its descriptor lists, and everything else
//! is dropped. URLs inside admitted `url(…)` values pass through a
//! [`UrlPolicy`] — usually a [`ProtocolFilter`] over an allowed-scheme
//! set. Input pathologies never become errors: broken declarations are
//! skipped, broken character references decode to a literal `&`, and the
//! output is always well-formed.
//!
//! # Examples
//!
//! ```
//! use lye::{sanitize_css, ProtocolFilter, DEFAULT_SCHEMA};
//!
//! let policy = ProtocolFilter::new(["http", "https", "mailto"]);
//! let clean = sanitize_css(
//!     "color: red; background: url(javascript:alert(1))",
//!     &DEFAULT_SCHEMA,
//!     &policy,
//! );
//! assert_eq!(clean, "color:red");
//! ```
//!
//! Character references decode through the same crate:
//!
//! ```
//! assert_eq!(lye::decode_entities("1 &lt; 2 &AMP; 3"), "1 < 2 & 3");
//! ```

mod entities;
mod entity_data;
mod schema;
mod style;
mod tokens;
mod url;

pub use crate::entities::{decode_entities, decode_entity_at, DecodedEntity};
pub use crate::schema::{Property, Schema, SchemaError, DEFAULT_SCHEMA};
pub use crate::style::{walk_declarations, PropertyHandler, StyleSanitizer};
pub use crate::tokens::{CssToken, CssTokenKind, CssTokenStream, TokenIterator};
pub use crate::url::{ProtocolFilter, UrlRelative};

/// Decides the fate of a URL found during sanitization.
///
/// `apply` receives the element name the style came from (empty when the
/// caller sanitizes a bare declaration block), the attribute name
/// (`"style"` for CSS), and the decoded URL. Returning `Some` substitutes
/// the (possibly rewritten) URL; returning `None` drops the declaration
/// that contained it.
///
/// Any `Fn(&str, &str, &str) -> Option<String>` closure is a policy:
///
/// ```
/// use lye::{sanitize_css, DEFAULT_SCHEMA};
///
/// let same_site = |_el: &str, _attr: &str, url: &str| {
///     url.starts_with('/').then(|| url.to_string())
/// };
/// let clean = sanitize_css(
///     "background: url(/banner.png)",
///     &DEFAULT_SCHEMA,
///     &same_site,
/// );
/// assert_eq!(clean, "background:url('/banner.png')");
/// ```
pub trait UrlPolicy {
    fn apply(&self, element: &str, attribute: &str, url: &str) -> Option<String>;
}

impl<F> UrlPolicy for F
where
    F: Fn(&str, &str, &str) -> Option<String>,
{
    fn apply(&self, element: &str, attribute: &str, url: &str) -> Option<String> {
        self(element, attribute, url)
    }
}

/// Sanitizes a CSS declaration block against `schema`, routing URLs
/// through `url_policy`.
///
/// The output is a valid, possibly empty, declaration block:
/// `name:value` pairs joined by `;`, containing only constructs the
/// schema admits. Sanitizing the output again returns it unchanged.
///
/// # Examples
///
/// ```
/// use lye::{sanitize_css, ProtocolFilter, DEFAULT_SCHEMA};
///
/// let policy = ProtocolFilter::new(["http", "https"]);
/// assert_eq!(
///     sanitize_css("-moz-border-radius: 5px", &DEFAULT_SCHEMA, &policy),
///     "-moz-border-radius:5px",
/// );
/// assert_eq!(
///     sanitize_css("width: expression(alert(1))", &DEFAULT_SCHEMA, &policy),
///     "",
/// );
/// ```
pub fn sanitize_css<P>(css: &str, schema: &Schema, url_policy: &P) -> String
where
    P: UrlPolicy + ?Sized,
{
    sanitize_style_attribute("", css, schema, url_policy)
}

/// Like [`sanitize_css`], for callers that know which element the
/// `style` attribute hangs off: the element name is forwarded to the URL
/// policy, which may discriminate (say) `img` from `a`.
pub fn sanitize_style_attribute<P>(
    element: &str,
    css: &str,
    schema: &Schema,
    url_policy: &P,
) -> String
where
    P: UrlPolicy + ?Sized,
{
    let mut handler = StyleSanitizer::new(schema, element, url_policy);
    walk_declarations(css, &mut handler);
    handler.finish()
}

#[cfg(test)]
mod test {
    use super::*;

    fn web_policy() -> ProtocolFilter {
        ProtocolFilter::new(["http", "https", "mailto"])
    }

    fn clean(css: &str) -> String {
        let _ = env_logger::builder().is_test(true).try_init();
        sanitize_css(css, &DEFAULT_SCHEMA, &web_policy())
    }

    #[test]
    fn sanitizing_is_idempotent() {
        for css in [
            "color: red; background: url(javascript:alert(1))",
            "font: 10pt \"Arial\", sans-serif",
            "-moz-border-radius: 5px",
            "width: expression(alert(1))",
            "color: rgb(255, 0, 0)",
            "background: no-repeat center/80% url('http://example.com/a(b).png')",
            "margin: -1px 2em 3% .5in",
            "color:green; color{;color:maroon}; color:red",
            "quotes: 'it\\'s'",
        ] {
            let once = clean(css);
            assert_eq!(clean(&once), once, "{}", css);
        }
    }

    #[test]
    fn disallowed_properties_are_erased() {
        for css in [
            "behavior: url(#default#time2)",
            "-ms-behavior: x",
            "position: fixed",
            "animation-name: spin",
            "zoom: 2",
        ] {
            assert_eq!(clean(css), "", "{}", css);
        }
        // The property name never appears, even disallowed-but-valued.
        let out = clean("color: blue; position: absolute");
        assert_eq!(out, "color:blue");
    }

    #[test]
    fn no_script_sinks_survive() {
        for css in [
            "background: url(javascript:alert(1))",
            "background: url('javascript:alert(1)')",
            "background: url('java\\73 cript:alert(1)')",
            "background: url(\"data:text/html,<script>x</script>\")",
            "background: url(vbscript:msgbox)",
            "width: expression(alert(1))",
            "width: \\45 xpression(alert(1))",
            "behavior: url(evil.htc)",
            "@import 'http://evil.example/x.css'; color: red",
            "list-style: url('vbscript:x') square",
        ] {
            let out = clean(css);
            for sink in [
                "javascript:",
                "vbscript:",
                "data:",
                "expression(",
                "behavior:",
                "@import",
            ] {
                assert!(
                    !out.to_ascii_lowercase().contains(sink),
                    "{:?} leaked into {:?}",
                    sink,
                    out
                );
            }
        }
    }

    #[test]
    fn url_arguments_are_sound_under_the_policy() {
        let out = clean("background: url('http://example.com/a(b).png')");
        assert_eq!(out, "background:url('http://example.com/a%28b%29.png')");
        // The emitted argument round-trips through the same policy
        // unchanged.
        let arg = "http://example.com/a%28b%29.png";
        assert_eq!(web_policy().filter(arg), Some(arg.to_string()));
    }

    #[test]
    fn element_name_reaches_the_policy() {
        let picky = |el: &str, attr: &str, url: &str| {
            assert_eq!(attr, "style");
            (el == "img").then(|| url.to_string())
        };
        assert_eq!(
            sanitize_style_attribute("img", "background: url(/x.png)", &DEFAULT_SCHEMA, &picky),
            "background:url('/x.png')"
        );
        assert_eq!(
            sanitize_style_attribute("a", "background: url(/x.png)", &DEFAULT_SCHEMA, &picky),
            ""
        );
    }

    #[test]
    fn custom_schema_gates_unicode_range() {
        let schema = Schema::with_properties_map(maplit::hashmap! {
            "unicode-range".to_string() =>
                Property::new(Property::UNICODE_RANGE, &[","], &[]),
        })
        .unwrap();
        assert_eq!(
            sanitize_css("unicode-range: u+00A0-00FF", &schema, &web_policy()),
            "unicode-range:u+00a0-00ff"
        );
        assert_eq!(
            sanitize_css("unicode-range: u+00A0-00FF", &DEFAULT_SCHEMA, &web_policy()),
            ""
        );
    }

    #[test]
    fn empty_input_empty_output() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   \t\n "), "");
        assert_eq!(clean(";;;"), "");
    }

    #[test]
    fn entity_decoding_is_wired_through_the_root() {
        assert_eq!(decode_entities("&copy; 2024"), "\u{a9} 2024");
        let d = decode_entity_at("&#9999999999;", 0, 13);
        assert_eq!(d.units, (0xFFFD, 0));
    }

    fn require_sync<T: Sync>(_: T) {}
    fn require_send<T: Send>(_: T) {}
    #[test]
    fn require_sync_and_send() {
        require_sync(DEFAULT_SCHEMA.clone());
        require_send(DEFAULT_SCHEMA.clone());
        require_sync(web_policy());
        require_send(web_policy());
    }
}
