//! The declarative CSS property schema.
//!
//! A [`Schema`] maps lowercase property names (and function keys such as
//! `"rgb()"`) to [`Property`] descriptors. A descriptor is three parallel
//! gates: a bitfield of admitted token classes, a set of literal lexemes
//! admitted on top of those classes, and a map from function-call lexemes
//! (`"rgb("`) to the schema key under which the call's arguments are
//! validated (`"rgb()"`). Everything is immutable once built, so schemas
//! and descriptors are freely shared across threads.
//!
//! Composition is by whitelist: [`Schema::with_properties`] selects from
//! the built-in catalog, [`Schema::with_properties_map`] accepts custom
//! descriptors (with a closure check on function-key references), and
//! [`Schema::union`] merges schemas, refusing to reconcile conflicting
//! definitions of the same name. Vendor prefixes (`-moz-` and friends)
//! are folded away at lookup time, never at build time, so a schema's
//! keys stay exactly as its author wrote them.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use lazy_static::lazy_static;
use maplit::hashset;
use thiserror::Error;

/// The per-property (or per-function) admission descriptor.
///
/// Two descriptors are equal iff bits, literals, and function keys are
/// all equal; aliases in the built-in catalog share one `Arc` so the
/// comparison is usually a pointer check.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Property {
    /// Bitfield of admitted token classes; see the associated constants.
    pub bits: u32,
    /// Literal lexemes (lowercase identifiers and punctuation) admitted
    /// in addition to the bit classes.
    pub literals: HashSet<String>,
    /// Function-call lexeme (with trailing `(`) to schema key (with
    /// trailing `()`).
    pub fn_keys: HashMap<String, String>,
}

impl Property {
    /// Numbers, dimensions with known units, and percentages.
    pub const QUANTITY: u32 = 1;
    /// `#rgb` / `#rrggbb` color hashes.
    pub const HASH_VALUE: u32 = 2;
    /// Negative quantities; meaningless without [`Property::QUANTITY`].
    pub const NEGATIVE: u32 = 4;
    /// Quoted strings.
    pub const STRING: u32 = 8;
    /// `url(…)` values, subject to the caller's URL policy.
    pub const URL: u32 = 16;
    /// Free identifiers such as font family names.
    pub const UNRESERVED_WORD: u32 = 64;
    /// `u+XXXX`-style ranges.
    pub const UNICODE_RANGE: u32 = 128;

    pub fn new(bits: u32, literals: &[&str], fn_keys: &[(&str, &str)]) -> Self {
        Property {
            bits,
            literals: literals.iter().map(|s| s.to_string()).collect(),
            fn_keys: fn_keys
                .iter()
                .map(|&(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn allows(&self, bit: u32) -> bool {
        self.bits & bit != 0
    }

    pub fn allows_literal(&self, lexeme: &str) -> bool {
        self.literals.contains(lexeme)
    }

    /// The schema key validating `lexeme`'s arguments, if the function
    /// call is admitted here at all.
    pub fn function_key(&self, lexeme: &str) -> Option<&str> {
        self.fn_keys.get(lexeme).map(String::as_str)
    }
}

lazy_static! {
    /// The identity for "no property": admits nothing. Returned by
    /// [`Schema::for_key`] for every unknown name.
    pub(crate) static ref DISALLOWED: Arc<Property> = Arc::new(Property::default());
}

const VENDOR_PREFIXES: [&str; 4] = ["-ms-", "-moz-", "-o-", "-webkit-"];

/// Errors from schema construction. These mean the embedding code is
/// wrong; input-derived faults never surface as errors anywhere in this
/// crate.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum SchemaError {
    #[error("unknown property `{0}`")]
    UnknownProperty(String),
    #[error("function key `{key}` referenced by `{referrer}` is not defined in the schema")]
    UnclosedFunctionKey { key: String, referrer: String },
    #[error("duplicate irreconcilable definitions for `{0}`")]
    DuplicateDefinition(String),
}

/// An immutable catalog of admissible properties and functions.
#[derive(Clone, Debug)]
pub struct Schema {
    properties: HashMap<String, Arc<Property>>,
}

impl Schema {
    /// Builds a schema over exactly the named built-in properties, plus
    /// the function keys their descriptors reference (an allowed `color`
    /// drags in `"rgb()"` and friends so the schema stays closed).
    ///
    /// Unknown names, after vendor-prefix folding, are an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use lye::Schema;
    ///
    /// let schema = Schema::with_properties(["color", "margin"]).unwrap();
    /// assert!(schema.allowed_properties().contains("color"));
    /// assert!(Schema::with_properties(["--nonsense"]).is_err());
    /// ```
    pub fn with_properties<I, S>(names: I) -> Result<Schema, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut properties = HashMap::new();
        let mut queue: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().to_ascii_lowercase())
            .collect();
        while let Some(name) = queue.pop() {
            if properties.contains_key(&name) {
                continue;
            }
            let descriptor = builtin_lookup(&name)
                .ok_or_else(|| SchemaError::UnknownProperty(name.clone()))?;
            for target in descriptor.fn_keys.values() {
                queue.push(target.clone());
            }
            properties.insert(name, descriptor);
        }
        Ok(Schema { properties })
    }

    /// Builds a schema from caller-provided descriptors. Every function
    /// key referenced by any descriptor must itself be a key of the map;
    /// nothing is pulled in implicitly.
    pub fn with_properties_map<I, S>(map: I) -> Result<Schema, SchemaError>
    where
        I: IntoIterator<Item = (S, Property)>,
        S: Into<String>,
    {
        let properties: HashMap<String, Arc<Property>> = map
            .into_iter()
            .map(|(name, p)| (name.into().to_ascii_lowercase(), Arc::new(p)))
            .collect();
        for (name, descriptor) in &properties {
            for target in descriptor.fn_keys.values() {
                if !properties.contains_key(target) {
                    return Err(SchemaError::UnclosedFunctionKey {
                        key: target.clone(),
                        referrer: name.clone(),
                    });
                }
            }
        }
        Ok(Schema { properties })
    }

    /// Property-wise union. The same name may appear in several schemas
    /// only with equal descriptors; anything else is irreconcilable and
    /// an error rather than a silent widening.
    pub fn union<'a, I>(schemas: I) -> Result<Schema, SchemaError>
    where
        I: IntoIterator<Item = &'a Schema>,
    {
        let mut properties: HashMap<String, Arc<Property>> = HashMap::new();
        for schema in schemas {
            for (name, descriptor) in &schema.properties {
                match properties.get(name) {
                    None => {
                        properties.insert(name.clone(), descriptor.clone());
                    }
                    Some(existing)
                        if Arc::ptr_eq(existing, descriptor) || **existing == **descriptor => {}
                    Some(_) => return Err(SchemaError::DuplicateDefinition(name.clone())),
                }
            }
        }
        Ok(Schema { properties })
    }

    /// Looks up the descriptor gating `name` (a property name or a
    /// function key). Lowercases, tries the name as written, then strips
    /// a recognized vendor prefix and retries, and finally falls back to
    /// [`DISALLOWED`].
    pub fn for_key(&self, name: &str) -> Arc<Property> {
        let name = name.to_ascii_lowercase();
        if let Some(p) = self.properties.get(&name) {
            return p.clone();
        }
        if name.starts_with('-') {
            for prefix in VENDOR_PREFIXES {
                if let Some(base) = name.strip_prefix(prefix) {
                    if let Some(p) = self.properties.get(base) {
                        return p.clone();
                    }
                }
            }
        }
        DISALLOWED.clone()
    }

    /// The property names this schema admits, sorted, function keys
    /// excluded.
    pub fn allowed_properties(&self) -> BTreeSet<&str> {
        self.properties
            .keys()
            .filter(|k| !k.ends_with("()"))
            .map(String::as_str)
            .collect()
    }
}

lazy_static! {
    /// The schema over the built-in default whitelist: the box, border,
    /// outline, margin, padding, font, text, background, list, and
    /// table-presentation families, the aural properties, and the color
    /// and image functions.
    pub static ref DEFAULT_SCHEMA: Schema = Schema {
        properties: BUILTIN
            .iter()
            .map(|(name, p)| (name.to_string(), p.clone()))
            .collect(),
    };
}

fn builtin_lookup(name: &str) -> Option<Arc<Property>> {
    if let Some(p) = BUILTIN.get(name) {
        return Some(p.clone());
    }
    if name.starts_with('-') {
        for prefix in VENDOR_PREFIXES {
            if let Some(base) = name.strip_prefix(prefix) {
                if let Some(p) = BUILTIN.get(base) {
                    return Some(p.clone());
                }
            }
        }
    }
    None
}

lazy_static! {
    /// CSS color names admitted wherever a color may appear.
    static ref COLORS: HashSet<&'static str> = hashset![
        "aqua", "black", "blue", "fuchsia", "gray", "green", "lime",
        "maroon", "navy", "olive", "orange", "purple", "red", "silver",
        "teal", "white", "yellow", "beige", "brown", "chocolate", "coral",
        "crimson", "cyan", "darkblue", "darkgray", "darkgreen", "darkred",
        "gold", "indigo", "ivory", "khaki", "lavender", "lightblue",
        "lightgray", "lightgreen", "lightpink", "lightyellow", "magenta",
        "pink", "plum", "salmon", "skyblue", "tan", "turquoise", "violet",
        "wheat", "transparent",
    ];

    static ref BUILTIN: HashMap<&'static str, Arc<Property>> = builtin_definitions();
}

/// The built-in catalog. Shared `Arc`s make the alias families
/// (`border-left` and its siblings, the margin and padding sides, the
/// radius corners, …) one descriptor each, which keeps `union` cheap and
/// the table honest about which names really mean the same thing.
#[cfg_attr(rustfmt, rustfmt_skip)]
fn builtin_definitions() -> HashMap<&'static str, Arc<Property>> {
    use Property as P;

    fn prop(bits: u32, literals: &[&str], fn_keys: &[(&str, &str)]) -> Arc<Property> {
        Arc::new(Property::new(bits, literals, fn_keys))
    }

    fn with_colors(extra: &[&'static str]) -> Vec<&'static str> {
        let mut all: Vec<&'static str> = COLORS.iter().copied().collect();
        all.extend_from_slice(extra);
        all
    }

    let color_fns: &[(&str, &str)] = &[
        ("rgb(", "rgb()"),
        ("rgba(", "rgba()"),
        ("hsl(", "hsl()"),
        ("hsla(", "hsla()"),
    ];
    let image_fns: &[(&str, &str)] = &[
        ("image(", "image()"),
        ("linear-gradient(", "linear-gradient()"),
        ("radial-gradient(", "radial-gradient()"),
        ("repeating-linear-gradient(", "repeating-linear-gradient()"),
        ("repeating-radial-gradient(", "repeating-radial-gradient()"),
    ];
    let background_fns: Vec<(&str, &str)> = color_fns.iter().chain(image_fns).copied().collect();

    let color = prop(P::HASH_VALUE, &with_colors(&["currentcolor", "inherit"]), color_fns);
    let border_style = prop(0, &[
        "none", "hidden", "dotted", "dashed", "solid", "double", "groove",
        "ridge", "inset", "outset", "inherit",
    ], &[]);
    let border_width = prop(P::QUANTITY, &["thin", "medium", "thick", "inherit"], &[]);
    let border = prop(P::QUANTITY | P::HASH_VALUE, &with_colors(&[
        "none", "hidden", "dotted", "dashed", "solid", "double", "groove",
        "ridge", "inset", "outset", "thin", "medium", "thick", "inherit",
    ]), color_fns);
    let border_radius = prop(P::QUANTITY, &["/", "inherit"], &[]);
    let margin = prop(P::QUANTITY | P::NEGATIVE, &["auto", "inherit"], &[]);
    let padding = prop(P::QUANTITY, &["inherit"], &[]);
    let size = prop(P::QUANTITY, &["auto", "inherit"], &[]);
    let max_size = prop(P::QUANTITY, &["none", "inherit"], &[]);
    let min_size = prop(P::QUANTITY, &["inherit"], &[]);
    let quantity = prop(P::QUANTITY, &["inherit"], &[]);
    let cue = prop(P::URL, &["none", "inherit"], &[]);
    let pause = prop(P::QUANTITY, &["inherit"], &[]);

    let mut m: HashMap<&'static str, Arc<Property>> = HashMap::new();

    // Color properties.
    m.insert("color", color.clone());
    m.insert("background-color", color.clone());
    m.insert("border-color", color.clone());
    m.insert("border-top-color", color.clone());
    m.insert("border-right-color", color.clone());
    m.insert("border-bottom-color", color.clone());
    m.insert("border-left-color", color.clone());
    m.insert("outline-color", prop(
        P::HASH_VALUE, &with_colors(&["invert", "inherit"]), color_fns,
    ));

    // Backgrounds.
    m.insert("background", prop(
        P::QUANTITY | P::NEGATIVE | P::HASH_VALUE | P::URL,
        &with_colors(&[
            "none", "repeat", "repeat-x", "repeat-y", "no-repeat", "round",
            "space", "scroll", "fixed", "local", "left", "right", "top",
            "bottom", "center", "inherit", ",", "/",
        ]),
        &background_fns,
    ));
    m.insert("background-image", prop(P::URL, &["none", ","], image_fns));
    m.insert("background-position", prop(
        P::QUANTITY | P::NEGATIVE,
        &["left", "right", "top", "bottom", "center", ",", "inherit"],
        &[],
    ));
    m.insert("background-repeat", prop(0, &[
        "repeat", "repeat-x", "repeat-y", "no-repeat", "round", "space",
        ",", "inherit",
    ], &[]));
    m.insert("background-attachment", prop(0, &[
        "scroll", "fixed", "local", ",", "inherit",
    ], &[]));

    // Borders and outlines.
    m.insert("border", border.clone());
    m.insert("border-top", border.clone());
    m.insert("border-right", border.clone());
    m.insert("border-bottom", border.clone());
    m.insert("border-left", border.clone());
    m.insert("border-style", border_style.clone());
    m.insert("border-top-style", border_style.clone());
    m.insert("border-right-style", border_style.clone());
    m.insert("border-bottom-style", border_style.clone());
    m.insert("border-left-style", border_style.clone());
    m.insert("outline-style", border_style.clone());
    m.insert("border-width", border_width.clone());
    m.insert("border-top-width", border_width.clone());
    m.insert("border-right-width", border_width.clone());
    m.insert("border-bottom-width", border_width.clone());
    m.insert("border-left-width", border_width.clone());
    m.insert("outline-width", border_width.clone());
    m.insert("outline", prop(
        P::QUANTITY | P::HASH_VALUE,
        &with_colors(&[
            "none", "hidden", "dotted", "dashed", "solid", "double",
            "groove", "ridge", "inset", "outset", "thin", "medium",
            "thick", "invert", "inherit",
        ]),
        color_fns,
    ));
    m.insert("border-radius", border_radius.clone());
    m.insert("border-top-left-radius", border_radius.clone());
    m.insert("border-top-right-radius", border_radius.clone());
    m.insert("border-bottom-left-radius", border_radius.clone());
    m.insert("border-bottom-right-radius", border_radius.clone());
    m.insert("border-collapse", prop(0, &["collapse", "separate", "inherit"], &[]));
    m.insert("border-spacing", quantity.clone());

    // Box dimensions and spacing.
    m.insert("margin", margin.clone());
    m.insert("margin-top", margin.clone());
    m.insert("margin-right", margin.clone());
    m.insert("margin-bottom", margin.clone());
    m.insert("margin-left", margin.clone());
    m.insert("padding", padding.clone());
    m.insert("padding-top", padding.clone());
    m.insert("padding-right", padding.clone());
    m.insert("padding-bottom", padding.clone());
    m.insert("padding-left", padding.clone());
    m.insert("width", size.clone());
    m.insert("height", size.clone());
    m.insert("max-width", max_size.clone());
    m.insert("max-height", max_size.clone());
    m.insert("min-width", min_size.clone());
    m.insert("min-height", min_size.clone());

    // Fonts and text.
    m.insert("font", prop(
        P::QUANTITY | P::STRING | P::UNRESERVED_WORD,
        &[
            "normal", "italic", "oblique", "small-caps", "bold", "bolder",
            "lighter", "xx-small", "x-small", "small", "medium", "large",
            "x-large", "xx-large", "smaller", "larger", "serif",
            "sans-serif", "cursive", "fantasy", "monospace", "caption",
            "icon", "menu", "message-box", "small-caption", "status-bar",
            "inherit", ",", "/",
        ],
        &[],
    ));
    m.insert("font-family", prop(
        P::STRING | P::UNRESERVED_WORD,
        &["serif", "sans-serif", "cursive", "fantasy", "monospace", ",", "inherit"],
        &[],
    ));
    m.insert("font-size", prop(P::QUANTITY, &[
        "xx-small", "x-small", "small", "medium", "large", "x-large",
        "xx-large", "smaller", "larger", "inherit",
    ], &[]));
    m.insert("font-style", prop(0, &["normal", "italic", "oblique", "inherit"], &[]));
    m.insert("font-variant", prop(0, &["normal", "small-caps", "inherit"], &[]));
    m.insert("font-stretch", prop(0, &[
        "normal", "wider", "narrower", "ultra-condensed", "extra-condensed",
        "condensed", "semi-condensed", "semi-expanded", "expanded",
        "extra-expanded", "ultra-expanded", "inherit",
    ], &[]));
    m.insert("font-weight", prop(P::QUANTITY, &[
        "normal", "bold", "bolder", "lighter", "inherit",
    ], &[]));
    m.insert("letter-spacing", prop(
        P::QUANTITY | P::NEGATIVE, &["normal", "inherit"], &[],
    ));
    m.insert("word-spacing", prop(
        P::QUANTITY | P::NEGATIVE, &["normal", "inherit"], &[],
    ));
    m.insert("line-height", prop(P::QUANTITY, &["normal", "inherit"], &[]));
    m.insert("text-align", prop(0, &[
        "left", "right", "center", "justify", "inherit",
    ], &[]));
    m.insert("text-decoration", prop(0, &[
        "none", "underline", "overline", "line-through", "inherit",
    ], &[]));
    m.insert("text-indent", prop(P::QUANTITY | P::NEGATIVE, &["inherit"], &[]));
    m.insert("text-overflow", prop(P::STRING, &["clip", "ellipsis", ","], &[]));
    m.insert("text-transform", prop(0, &[
        "capitalize", "uppercase", "lowercase", "none", "inherit",
    ], &[]));
    m.insert("text-wrap", prop(0, &["normal", "unrestricted", "none", "suppress"], &[]));
    m.insert("vertical-align", prop(
        P::QUANTITY | P::NEGATIVE,
        &[
            "baseline", "sub", "super", "top", "text-top", "middle",
            "bottom", "text-bottom", "inherit",
        ],
        &[],
    ));
    m.insert("white-space", prop(0, &[
        "normal", "pre", "nowrap", "pre-wrap", "pre-line", "inherit",
    ], &[]));
    m.insert("word-wrap", prop(0, &["normal", "break-word"], &[]));
    m.insert("direction", prop(0, &["ltr", "rtl", "inherit"], &[]));
    m.insert("unicode-bidi", prop(0, &[
        "normal", "embed", "bidi-override", "inherit",
    ], &[]));
    m.insert("quotes", prop(P::STRING, &["none", "inherit"], &[]));

    // Lists and tables.
    m.insert("list-style", prop(
        P::URL,
        &[
            "disc", "circle", "square", "decimal", "decimal-leading-zero",
            "lower-roman", "upper-roman", "lower-greek", "lower-latin",
            "upper-latin", "armenian", "georgian", "lower-alpha",
            "upper-alpha", "inside", "outside", "none", "inherit",
        ],
        image_fns,
    ));
    m.insert("list-style-image", prop(P::URL, &["none", "inherit"], image_fns));
    m.insert("list-style-position", prop(0, &["inside", "outside", "inherit"], &[]));
    m.insert("list-style-type", prop(0, &[
        "disc", "circle", "square", "decimal", "decimal-leading-zero",
        "lower-roman", "upper-roman", "lower-greek", "lower-latin",
        "upper-latin", "armenian", "georgian", "lower-alpha", "upper-alpha",
        "none", "inherit",
    ], &[]));
    m.insert("caption-side", prop(0, &["top", "bottom", "inherit"], &[]));
    m.insert("table-layout", prop(0, &["auto", "fixed", "inherit"], &[]));
    m.insert("empty-cells", prop(0, &["show", "hide", "inherit"], &[]));
    m.insert("visibility", prop(0, &["visible", "hidden", "collapse", "inherit"], &[]));
    m.insert("clip", prop(0, &["auto", "inherit"], &[("rect(", "rect()")]));

    // Aural presentation.
    m.insert("azimuth", prop(
        P::QUANTITY | P::NEGATIVE,
        &[
            "left", "right", "center", "left-side", "far-left", "far-right",
            "right-side", "behind", "leftwards", "rightwards", "inherit",
        ],
        &[],
    ));
    m.insert("cue", cue.clone());
    m.insert("cue-after", cue.clone());
    m.insert("cue-before", cue.clone());
    m.insert("elevation", prop(
        P::QUANTITY | P::NEGATIVE,
        &["below", "level", "above", "higher", "lower", "inherit"],
        &[],
    ));
    m.insert("pause", pause.clone());
    m.insert("pause-after", pause.clone());
    m.insert("pause-before", pause.clone());
    m.insert("pitch", prop(P::QUANTITY, &[
        "x-low", "low", "medium", "high", "x-high", "inherit",
    ], &[]));
    m.insert("pitch-range", quantity.clone());
    m.insert("richness", quantity.clone());
    m.insert("stress", quantity.clone());
    m.insert("speak", prop(0, &["normal", "none", "spell-out", "inherit"], &[]));
    m.insert("speak-header", prop(0, &["once", "always", "inherit"], &[]));
    m.insert("speak-numeral", prop(0, &["digits", "continuous", "inherit"], &[]));
    m.insert("speak-punctuation", prop(0, &["code", "none", "inherit"], &[]));
    m.insert("speech-rate", prop(P::QUANTITY, &[
        "x-slow", "slow", "medium", "fast", "x-fast", "faster", "slower",
        "inherit",
    ], &[]));
    m.insert("voice-family", prop(
        P::STRING | P::UNRESERVED_WORD,
        &["male", "female", "child", ",", "inherit"],
        &[],
    ));
    m.insert("volume", prop(P::QUANTITY, &[
        "silent", "x-soft", "soft", "medium", "loud", "x-loud", "inherit",
    ], &[]));

    // Function keys.
    let channel_args = prop(P::QUANTITY, &[","], &[]);
    m.insert("rgb()", channel_args.clone());
    m.insert("rgba()", channel_args.clone());
    m.insert("hsl()", channel_args.clone());
    m.insert("hsla()", channel_args.clone());
    m.insert("rect()", prop(P::QUANTITY, &["auto", ","], &[]));
    m.insert("image()", prop(
        P::STRING | P::URL | P::HASH_VALUE,
        &with_colors(&[","]),
        color_fns,
    ));
    let linear_gradient = prop(
        P::QUANTITY | P::NEGATIVE | P::HASH_VALUE,
        &with_colors(&["to", "left", "right", "top", "bottom", ","]),
        color_fns,
    );
    m.insert("linear-gradient()", linear_gradient.clone());
    m.insert("repeating-linear-gradient()", linear_gradient.clone());
    let radial_gradient = prop(
        P::QUANTITY | P::NEGATIVE | P::HASH_VALUE,
        &with_colors(&[
            "at", "circle", "ellipse", "closest-side", "closest-corner",
            "farthest-side", "farthest-corner", "center", "left", "right",
            "top", "bottom", ",",
        ]),
        color_fns,
    );
    m.insert("radial-gradient()", radial_gradient.clone());
    m.insert("repeating-radial-gradient()", radial_gradient.clone());

    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::hashmap;

    #[test]
    fn default_schema_admits_the_families() {
        let allowed = DEFAULT_SCHEMA.allowed_properties();
        for name in ["color", "background", "border-left", "font-family", "margin-top"] {
            assert!(allowed.contains(name), "{}", name);
        }
        // Function keys are not properties.
        assert!(!allowed.contains("rgb()"));
        assert!(DEFAULT_SCHEMA.for_key("rgb()").allows(Property::QUANTITY));
    }

    #[test]
    fn aliases_share_descriptor_identity() {
        let left = DEFAULT_SCHEMA.for_key("border-left-width");
        let outline = DEFAULT_SCHEMA.for_key("outline-width");
        assert!(Arc::ptr_eq(&left, &outline));
    }

    #[test]
    fn vendor_prefix_folds_at_lookup() {
        let base = DEFAULT_SCHEMA.for_key("border-radius");
        let prefixed = DEFAULT_SCHEMA.for_key("-moz-border-radius");
        assert!(Arc::ptr_eq(&base, &prefixed));
        assert!(Arc::ptr_eq(&DEFAULT_SCHEMA.for_key("-o-nonsense"), &DISALLOWED));
    }

    #[test]
    fn unknown_lookup_is_disallowed() {
        let p = DEFAULT_SCHEMA.for_key("behavior");
        assert_eq!(p.bits, 0);
        assert!(p.literals.is_empty());
        assert!(p.fn_keys.is_empty());
    }

    #[test]
    fn with_properties_pulls_in_function_keys() {
        let schema = Schema::with_properties(["color"]).unwrap();
        assert!(schema.for_key("rgb()").allows(Property::QUANTITY));
        assert_eq!(
            schema.allowed_properties().into_iter().collect::<Vec<_>>(),
            vec!["color"]
        );
    }

    #[test]
    fn with_properties_rejects_unknown() {
        assert_eq!(
            Schema::with_properties(["font", "splines"]).unwrap_err(),
            SchemaError::UnknownProperty("splines".into())
        );
    }

    #[test]
    fn with_properties_map_requires_closure() {
        let open = hashmap! {
            "color".to_string() => Property::new(
                Property::HASH_VALUE,
                &["red"],
                &[("rgb(", "rgb()")],
            ),
        };
        match Schema::with_properties_map(open) {
            Err(SchemaError::UnclosedFunctionKey { key, referrer }) => {
                assert_eq!(key, "rgb()");
                assert_eq!(referrer, "color");
            }
            other => panic!("expected closure error, got {:?}", other),
        }

        let closed = hashmap! {
            "color".to_string() => Property::new(
                Property::HASH_VALUE,
                &["red"],
                &[("rgb(", "rgb()")],
            ),
            "rgb()".to_string() => Property::new(Property::QUANTITY, &[","], &[]),
        };
        assert!(Schema::with_properties_map(closed).is_ok());
    }

    #[test]
    fn union_merges_and_detects_conflicts() {
        let a = Schema::with_properties(["color"]).unwrap();
        let b = Schema::with_properties(["margin"]).unwrap();
        let merged = Schema::union([&a, &b]).unwrap();
        assert!(merged.allowed_properties().contains("color"));
        assert!(merged.allowed_properties().contains("margin"));

        let conflicting = Schema::with_properties_map(hashmap! {
            "color".to_string() => Property::new(Property::STRING, &["x"], &[]),
        })
        .unwrap();
        assert_eq!(
            Schema::union([&a, &conflicting]).unwrap_err(),
            SchemaError::DuplicateDefinition("color".into())
        );
    }

    #[test]
    fn union_accepts_equal_redefinitions() {
        let a = Schema::with_properties(["color", "margin"]).unwrap();
        let b = Schema::with_properties(["color"]).unwrap();
        assert!(Schema::union([&a, &b]).is_ok());
    }
}
