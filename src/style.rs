//! Declaration-block parsing and the sanitizing property handler.
//!
//! The value of a `style` attribute is a CSS declaration list without the
//! delimiting braces ([CSS Style Attributes]). There is no open brace, so
//! a stray `}` does not end anything: it is merely an invalid token, and
//! per the forward-compatible parsing rules a declaration following an
//! at-rule or a malformed declaration is *not* ignored. The driver here
//! implements exactly that: take an identifier and a colon, feed value
//! tokens to a [`PropertyHandler`], and on any structural surprise
//! recover locally — scan to the next top-level `;`, or past the `}` that
//! closes a block opened during recovery — and carry on.
//!
//! [`StyleSanitizer`] is the handler that makes the output safe: each
//! token is admitted or dropped against the descriptor for the current
//! property (or, inside a function call, for the function's schema key),
//! URLs are routed through the caller's policy, and a rejected URL
//! poisons the whole declaration so nothing half-filtered survives.
//!
//! [CSS Style Attributes]: https://w3c.github.io/csswg-drafts/css-style-attr/

use std::collections::HashSet;
use std::sync::Arc;

use lazy_static::lazy_static;
use log::{debug, trace};
use maplit::hashset;

use crate::schema::{Property, Schema, DISALLOWED};
use crate::tokens::{number_end, CssToken, CssTokenKind, CssTokenStream, TokenIterator};
use crate::UrlPolicy;

lazy_static! {
    /// Dimension units a quantity may carry; anything else is rejected.
    static ref KNOWN_UNITS: HashSet<&'static str> = hashset![
        "ch", "cm", "deg", "dpcm", "dpi", "dppx", "em", "ex", "fr", "grad",
        "hz", "in", "khz", "mm", "ms", "pc", "pt", "px", "q", "rad", "rem",
        "s", "turn", "vh", "vmax", "vmin", "vw",
    ];

    /// Words that must never pass the free-identifier gate, however a
    /// property is configured: they name script-adjacent constructs.
    static ref DANGEROUS_WORDS: HashSet<&'static str> = hashset![
        "url", "expression", "behavior", "javascript", "vbscript", "binding",
    ];
}

/// Event sink for one pass over a declaration block.
///
/// The driver guarantees the call order
/// `start_property (css_token | start_function … end_function)* end_property`
/// per declaration, with function events properly nested.
pub trait PropertyHandler {
    fn start_property(&mut self, name: &str);
    fn css_token(&mut self, token: &CssToken);
    fn start_function(&mut self, token: &CssToken);
    fn end_function(&mut self);
    fn end_property(&mut self);
}

/// Tokenizes `css` and drives `handler` over every declaration in it.
pub fn walk_declarations<H: PropertyHandler>(css: &str, handler: &mut H) {
    let stream = CssTokenStream::lex(css);
    let mut it = stream.iter();
    while it.has_next_after_space() {
        let token = match it.peek() {
            Some(t) => t,
            None => break,
        };
        if token.kind != CssTokenKind::Ident {
            debug!("expected property name, found {:?}; recovering", token.kind);
            error_recovery(&mut it);
            continue;
        }
        let name = token.lexeme.clone();
        it.advance();
        if !it.has_next_after_space() {
            break;
        }
        let next = match it.peek() {
            Some(t) => t,
            None => break,
        };
        if next.kind != CssTokenKind::Colon {
            debug!("`{}` not followed by `:`; recovering", name);
            error_recovery(&mut it);
            continue;
        }
        it.advance();
        handler.start_property(&name);
        parse_value(&mut it, handler);
        handler.end_property();
    }
}

/// Feeds value tokens to the handler until a `;` or end-of-input.
/// Function calls recurse through [`TokenIterator::splice_to_end`], so
/// the handler sees balanced `start_function`/`end_function` pairs and
/// this iterator always resumes past the call's closing paren.
fn parse_value<H: PropertyHandler>(it: &mut TokenIterator<'_>, handler: &mut H) {
    while let Some(token) = it.peek() {
        match token.kind {
            CssTokenKind::Semicolon => {
                it.advance();
                return;
            }
            CssTokenKind::Whitespace => it.advance(),
            CssTokenKind::Function => {
                it.advance();
                handler.start_function(token);
                let mut inner = it.splice_to_end();
                parse_value(&mut inner, handler);
                handler.end_function();
            }
            _ => {
                handler.css_token(token);
                it.advance();
            }
        }
    }
}

/// Skips past a malformed construct: consume up to and including the
/// next top-level `;`, a `}` that closes back to the starting depth (the
/// end of an at-rule block), or any closer that drops below it.
fn error_recovery(it: &mut TokenIterator<'_>) {
    let mut depth = 0i32;
    while let Some(token) = it.peek() {
        it.advance();
        match token.kind {
            CssTokenKind::Semicolon if depth == 0 => return,
            CssTokenKind::Function
            | CssTokenKind::LeftParen
            | CssTokenKind::LeftCurly
            | CssTokenKind::LeftSquare => depth += 1,
            CssTokenKind::RightCurly => {
                depth -= 1;
                if depth <= 0 {
                    return;
                }
            }
            CssTokenKind::RightParen | CssTokenKind::RightSquare => {
                depth -= 1;
                if depth < 0 {
                    return;
                }
            }
            _ => {}
        }
    }
}

struct Level {
    descriptor: Arc<Property>,
    emit_close: bool,
}

/// The schema-gated sanitizing handler.
///
/// Keeps a stack of active descriptors (one per function-nesting level,
/// rooted at the property's own descriptor) and a single output buffer.
/// Admitted tokens are re-emitted with one space between consecutive
/// tokens, no space after a `name(` opener or before `)`. A per-property
/// poison flag, set by a rejected or malformed URL, makes `end_property`
/// discard everything the property wrote.
pub struct StyleSanitizer<'a, P: UrlPolicy + ?Sized> {
    schema: &'a Schema,
    element: &'a str,
    policy: &'a P,
    out: String,
    stack: Vec<Level>,
    prop_start: usize,
    value_start: usize,
    poisoned: bool,
    needs_space: bool,
}

impl<'a, P: UrlPolicy + ?Sized> StyleSanitizer<'a, P> {
    pub fn new(schema: &'a Schema, element: &'a str, policy: &'a P) -> Self {
        StyleSanitizer {
            schema,
            element,
            policy,
            out: String::new(),
            stack: Vec::new(),
            prop_start: 0,
            value_start: 0,
            poisoned: false,
            needs_space: false,
        }
    }

    /// The sanitized declaration block accumulated so far.
    pub fn finish(mut self) -> String {
        if self.out.ends_with(';') {
            self.out.pop();
        }
        self.out
    }

    fn descriptor(&self) -> &Arc<Property> {
        self.stack.last().map(|l| &l.descriptor).unwrap_or(&DISALLOWED)
    }

    fn emit(&mut self, text: &str) {
        if self.needs_space && text != ")" {
            self.out.push(' ');
        }
        self.out.push_str(text);
        self.needs_space = !text.ends_with('(');
    }

    fn poison(&mut self, why: &str) {
        if !self.poisoned {
            debug!("poisoning declaration: {}", why);
        }
        self.poisoned = true;
    }
}

impl<P: UrlPolicy + ?Sized> PropertyHandler for StyleSanitizer<'_, P> {
    fn start_property(&mut self, name: &str) {
        let name = name.to_ascii_lowercase();
        self.prop_start = self.out.len();
        self.out.push_str(&name);
        self.out.push(':');
        self.value_start = self.out.len();
        self.poisoned = false;
        self.needs_space = false;
        self.stack.clear();
        self.stack.push(Level {
            descriptor: self.schema.for_key(&name),
            emit_close: false,
        });
    }

    fn css_token(&mut self, token: &CssToken) {
        if self.poisoned {
            return;
        }
        let descriptor = self.descriptor().clone();
        match token.kind {
            CssTokenKind::Ident => {
                if descriptor.allows_literal(&token.lexeme)
                    || (descriptor.allows(Property::UNRESERVED_WORD)
                        && is_unreserved_word(&token.lexeme))
                {
                    self.emit(&token.lexeme);
                } else {
                    trace!("dropping ident `{}`", token.lexeme);
                }
            }
            CssTokenKind::Number | CssTokenKind::Dimension | CssTokenKind::Percentage => {
                let negative = token.lexeme.starts_with('-');
                let unit_ok = token.kind != CssTokenKind::Dimension
                    || KNOWN_UNITS.contains(&token.lexeme[number_end(&token.lexeme)..]);
                if descriptor.allows(Property::QUANTITY)
                    && (!negative || descriptor.allows(Property::NEGATIVE))
                    && unit_ok
                {
                    self.emit(&token.lexeme);
                } else {
                    trace!("dropping quantity `{}`", token.lexeme);
                }
            }
            CssTokenKind::HashUnrestricted => {
                if descriptor.allows(Property::HASH_VALUE)
                    && (token.lexeme.len() == 4 || token.lexeme.len() == 7)
                {
                    self.emit(&token.lexeme);
                } else {
                    trace!("dropping hash `{}`", token.lexeme);
                }
            }
            CssTokenKind::String => {
                if descriptor.allows(Property::STRING) {
                    let quoted = quote_css_string(&token.lexeme);
                    self.emit(&quoted);
                } else {
                    trace!("dropping string");
                }
            }
            CssTokenKind::Url => {
                if descriptor.allows(Property::URL) {
                    match self.policy.apply(self.element, "style", &token.lexeme) {
                        Some(clean) => {
                            let rendered = format!("url({})", quote_css_string(&clean));
                            self.emit(&rendered);
                        }
                        None => self.poison("url rejected by policy"),
                    }
                } else {
                    trace!("dropping url in non-url property");
                }
            }
            CssTokenKind::BadUrl => self.poison("malformed url"),
            CssTokenKind::UnicodeRange => {
                if descriptor.allows(Property::UNICODE_RANGE) {
                    self.emit(&token.lexeme);
                }
            }
            CssTokenKind::Comma | CssTokenKind::Colon | CssTokenKind::Delim => {
                if descriptor.allows_literal(&token.lexeme) {
                    self.emit(&token.lexeme);
                }
            }
            // At-keywords, bad dimensions, id hashes, selector fragments,
            // stray brackets, whitespace: nothing admits these.
            _ => trace!("dropping {:?}", token.kind),
        }
    }

    fn start_function(&mut self, token: &CssToken) {
        if self.poisoned {
            self.stack.push(Level {
                descriptor: DISALLOWED.clone(),
                emit_close: false,
            });
            return;
        }
        let target = self
            .descriptor()
            .function_key(&token.lexeme)
            .map(str::to_owned);
        match target {
            Some(key) => {
                let descriptor = self.schema.for_key(&key);
                self.emit(&token.lexeme);
                self.stack.push(Level {
                    descriptor,
                    emit_close: true,
                });
            }
            None => {
                trace!("dropping function call `{})`", token.lexeme);
                self.stack.push(Level {
                    descriptor: DISALLOWED.clone(),
                    emit_close: false,
                });
            }
        }
    }

    fn end_function(&mut self) {
        if self.stack.len() > 1 {
            if let Some(level) = self.stack.pop() {
                if level.emit_close && !self.poisoned {
                    self.emit(")");
                }
            }
        }
    }

    fn end_property(&mut self) {
        if self.poisoned || self.out.len() == self.value_start {
            self.out.truncate(self.prop_start);
        } else {
            self.out.push(';');
        }
        self.stack.clear();
        self.needs_space = false;
    }
}

/// The free-identifier shape: letters, digits, and `-`, not starting
/// with a digit, with no dash-separated segment naming a script-adjacent
/// construct.
fn is_unreserved_word(word: &str) -> bool {
    !word.is_empty()
        && word.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        && !word.starts_with(|c: char| c.is_ascii_digit())
        && !word.split('-').any(|seg| DANGEROUS_WORDS.contains(seg))
}

/// Re-quotes a decoded string value for output: single quotes, with the
/// quote and backslash escaped and control characters hex-escaped. The
/// trailing space after a hex escape keeps a following hex digit from
/// being absorbed into it.
fn quote_css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            c if (c as u32) < 0x20 || c as u32 == 0x7F => {
                out.push_str(&format!("\\{:x} ", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DEFAULT_SCHEMA;
    use crate::url::ProtocolFilter;

    fn sanitize(css: &str) -> String {
        let policy = ProtocolFilter::new(["http", "https", "mailto"]);
        let mut handler = StyleSanitizer::new(&DEFAULT_SCHEMA, "", &policy);
        walk_declarations(css, &mut handler);
        handler.finish()
    }

    #[test]
    fn single_declaration() {
        assert_eq!(sanitize("font-style: italic"), "font-style:italic");
    }

    #[test]
    fn terminated_declaration() {
        assert_eq!(sanitize("font-style: italic;"), "font-style:italic");
    }

    #[test]
    fn complex() {
        assert_eq!(
            sanitize("background: no-repeat center/80% url(\"../img/image.png\");"),
            "background:no-repeat center / 80% url('../img/image.png')"
        );
    }

    #[test]
    fn at_rule() {
        assert_eq!(
            sanitize("@unsupported { splines: reticulating } color: green"),
            "color:green"
        );
    }

    #[test]
    fn invalid_at_rules() {
        assert_eq!(sanitize("@charset 'utf-8'; color: green"), "color:green");
        assert_eq!(
            sanitize("@foo url(https://example.org); color: green"),
            "color:green"
        );
        assert_eq!(
            sanitize("@media screen { color: red }; color: green"),
            "color:green"
        );
        assert_eq!(
            sanitize("@scope (main) { div { color: red } }; color: green"),
            "color:green"
        );
    }

    #[test]
    fn multiple() {
        assert_eq!(
            sanitize("volume: 1; color: green"),
            "volume:1;color:green"
        );
    }

    #[test]
    fn malformed_declarations() {
        for css in [
            "color:green",
            "color:green; color",
            "color:green; color:",
            "color:green; color{;color:maroon}",
        ] {
            assert_eq!(sanitize(css), "color:green", "{}", css);
        }
        for css in [
            "color:red;   color; color:green",
            "color:red;   color:; color:green",
            "color:red;   color{;color:maroon}; color:green",
        ] {
            assert_eq!(sanitize(css), "color:red;color:green", "{}", css);
        }
    }

    #[test]
    fn bad_url_poisons_declaration() {
        assert_eq!(
            sanitize("background: red url(x'y); color: green"),
            "color:green"
        );
    }

    #[test]
    fn rejected_scheme_poisons_declaration() {
        assert_eq!(
            sanitize("color: red; background: url(javascript:alert(1))"),
            "color:red"
        );
        assert_eq!(sanitize("background: red url(vbscript:evil)"), "");
    }

    #[test]
    fn url_in_non_url_property_is_dropped() {
        // `width` has no URL bit; the token is dropped, the declaration
        // dies for lack of value, but nothing else is poisoned.
        assert_eq!(
            sanitize("width: url(http://example.com/); color: green"),
            "color:green"
        );
    }

    #[test]
    fn unknown_function_call_is_erased() {
        assert_eq!(sanitize("width: expression(alert(1))"), "");
        assert_eq!(
            sanitize("width: expression(alert(1)); width: 5px"),
            "width:5px"
        );
    }

    #[test]
    fn nested_function_keys_gate_arguments() {
        assert_eq!(sanitize("color: rgb(255, 0, 0)"), "color:rgb(255 , 0 , 0)");
        assert_eq!(
            sanitize("background: linear-gradient(to right, rgb(1,2,3), red)"),
            "background:linear-gradient(to right , rgb(1 , 2 , 3) , red)"
        );
    }

    #[test]
    fn vendor_prefix_resolves_but_name_is_kept() {
        assert_eq!(sanitize("-moz-border-radius: 5px"), "-moz-border-radius:5px");
    }

    #[test]
    fn font_shorthand() {
        assert_eq!(
            sanitize("font: 10pt \"Arial\", sans-serif"),
            "font:10pt 'Arial' , sans-serif"
        );
    }

    #[test]
    fn negative_needs_the_bit() {
        assert_eq!(sanitize("margin: -5px"), "margin:-5px");
        assert_eq!(sanitize("padding: -5px"), "");
        assert_eq!(sanitize("padding: 5px"), "padding:5px");
    }

    #[test]
    fn unknown_units_are_rejected() {
        assert_eq!(sanitize("width: 5foo"), "");
        assert_eq!(sanitize("width: 5px"), "width:5px");
        assert_eq!(sanitize("width: 50%"), "width:50%");
    }

    #[test]
    fn hash_colors_must_be_short_or_long_form() {
        assert_eq!(sanitize("color: #fff"), "color:#fff");
        assert_eq!(sanitize("color: #AABBCC"), "color:#aabbcc");
        assert_eq!(sanitize("color: #ab"), "");
        assert_eq!(sanitize("color: #aabbccdd"), "");
        assert_eq!(sanitize("color: #header"), "");
    }

    #[test]
    fn escaped_function_name_does_not_sneak_through() {
        assert_eq!(sanitize("width: \\45 xpression(alert(1))"), "");
    }

    #[test]
    fn important_is_dropped() {
        assert_eq!(sanitize("color: red !important"), "color:red");
    }

    #[test]
    fn free_words_are_vetted() {
        assert_eq!(
            sanitize("font-family: Helvetica, sans-serif"),
            "font-family:helvetica , sans-serif"
        );
        assert_eq!(sanitize("font-family: expression"), "");
        assert_eq!(sanitize("font-family: moz-binding"), "");
    }

    #[test]
    fn dangling_name_at_end_of_input() {
        assert_eq!(sanitize("color:green; color"), "color:green");
    }
}
