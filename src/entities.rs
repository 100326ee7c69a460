//! HTML character-reference decoding.
//!
//! A single reference (`&amp;`, `&#169;`, `&#xA9;`, and their many broken
//! forms) is decoded with [`decode_entity_at`]; whole fragments with
//! [`decode_entities`]. Named references are resolved through a
//! longest-prefix trie built once from the static catalog, so
//! `&copyThing;` decodes the `copy` prefix and leaves `Thing;` alone,
//! matching what browsers do with legacy references.
//!
//! The decoder never fails: every pathological input comes back as either
//! the decoded character or a literal `&` that advances the scan by one
//! position.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::entity_data::ENTITIES;

/// A node in the character-reference trie.
///
/// Children are keyed by the next byte of the name (names are ASCII), and
/// a terminal node carries the packed code-unit pair for the full name
/// spelled out along the path to it.
#[derive(Default)]
pub(crate) struct TrieNode {
    children: HashMap<u8, TrieNode>,
    value: Option<u32>,
}

impl TrieNode {
    fn insert(&mut self, name: &[u8], value: u32) {
        let mut node = self;
        for &b in name {
            node = node.children.entry(b).or_default();
        }
        node.value = Some(value);
    }

    pub(crate) fn lookup(&self, b: u8) -> Option<&TrieNode> {
        self.children.get(&b)
    }

    pub(crate) fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    pub(crate) fn value(&self) -> Option<u32> {
        self.value
    }
}

/// Packs one or two UTF-16 code units into 32 bits: the first unit in the
/// high half, the second in the low half, zero low half meaning a single
/// unit. Supplementary code points become a surrogate pair.
fn pack(first: u32, second: u32) -> u32 {
    if second != 0 {
        debug_assert!(first <= 0xFFFF && second <= 0xFFFF);
        (first << 16) | second
    } else if first <= 0xFFFF {
        first << 16
    } else {
        let v = first - 0x1_0000;
        let hi = 0xD800 + (v >> 10);
        let lo = 0xDC00 + (v & 0x3FF);
        (hi << 16) | lo
    }
}

lazy_static! {
    static ref ENTITY_TRIE: TrieNode = {
        let mut root = TrieNode::default();
        for &(name, first, second) in ENTITIES {
            root.insert(name.as_bytes(), pack(first, second));
        }
        root
    };

    /// Length of the longest registered name; bounds the decode scan.
    static ref LONGEST_ENTITY_NAME: usize =
        ENTITIES.iter().map(|&(name, _, _)| name.len()).max().unwrap_or(0);
}

/// The result of decoding one character reference.
///
/// `end` is the byte offset at which the outer scan should resume; it is
/// always strictly greater than the offset passed in. `units` holds one
/// or two UTF-16 code units: a zero second unit means the first unit is
/// the whole result (which may itself be zero, for `&#0;` — NUL passes
/// through and is the caller's problem to filter).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DecodedEntity {
    pub end: usize,
    pub units: (u16, u16),
}

impl DecodedEntity {
    fn literal_amp(offset: usize) -> Self {
        DecodedEntity {
            end: offset + 1,
            units: (b'&' as u16, 0),
        }
    }

    fn unpack(end: usize, packed: u32) -> Self {
        DecodedEntity {
            end,
            units: ((packed >> 16) as u16, (packed & 0xFFFF) as u16),
        }
    }

    fn from_code_point(end: usize, cp: u32) -> Self {
        Self::unpack(end, pack(cp, 0))
    }

    /// True when the result is a surrogate pair or a two-character
    /// reference.
    pub fn is_pair(&self) -> bool {
        self.units.1 != 0
    }

    /// The decoded text. An unpaired surrogate (possible via numeric
    /// references like `&#xD800;`) is replaced with U+FFFD here; callers
    /// that want the raw units read `units` directly.
    pub fn text(&self) -> String {
        if self.is_pair() {
            String::from_utf16_lossy(&[self.units.0, self.units.1])
        } else {
            String::from_utf16_lossy(&[self.units.0])
        }
    }
}

/// Walks the trie over `name`, optionally folding ASCII uppercase to
/// lowercase, and returns the longest terminal match as
/// `(matched_length, packed_value)`.
fn walk_trie(name: &[u8], fold: bool) -> Option<(usize, u32)> {
    let mut node: &TrieNode = &ENTITY_TRIE;
    let mut best = None;
    for (i, &b) in name.iter().enumerate() {
        let b = if fold { b.to_ascii_lowercase() } else { b };
        node = match node.lookup(b) {
            Some(child) => child,
            None => break,
        };
        if let Some(v) = node.value() {
            best = Some((i + 1, v));
        }
    }
    best
}

/// Decodes the single character reference starting at `html[offset]`.
///
/// `offset` and `limit` are byte positions; `limit` is clamped to the
/// string length. If `html[offset]` is not `&`, that one character is
/// consumed verbatim. Broken references (missing semicolon, stray
/// characters, truncated input) fall back to a literal `&` that advances
/// by one, so an outer tokenizer always makes progress. A reference
/// followed by `=` is deliberately left undecoded: inserting the missing
/// semicolon there would corrupt URL-like attribute values such as
/// `?q=1&lt=2`.
///
/// # Examples
///
/// ```
/// use lye::decode_entity_at;
///
/// let d = decode_entity_at("&amp;x", 0, 6);
/// assert_eq!((d.end, d.units), (5, (b'&' as u16, 0)));
///
/// // Surrogate pair for MATHEMATICAL SCRIPT CAPITAL A.
/// let d = decode_entity_at("&#x1D49C;", 0, 9);
/// assert_eq!((d.end, d.units), (9, (0xD835, 0xDC9C)));
/// ```
pub fn decode_entity_at(html: &str, offset: usize, limit: usize) -> DecodedEntity {
    let bytes = html.as_bytes();
    let limit = limit.min(bytes.len());
    if offset >= limit {
        return DecodedEntity::literal_amp(offset);
    }
    if bytes[offset] != b'&' {
        let ch = html[offset..].chars().next().unwrap_or('\u{FFFD}');
        let mut buf = [0u16; 2];
        let encoded = ch.encode_utf16(&mut buf);
        let units = if encoded.len() == 2 {
            (buf[0], buf[1])
        } else {
            (buf[0], 0)
        };
        return DecodedEntity {
            end: offset + ch.len_utf8(),
            units,
        };
    }

    // Scan out the candidate name: letters, digits, and `#`, up to one
    // past the longest registered name.
    let bound = limit.min(offset + 1 + *LONGEST_ENTITY_NAME + 1);
    let mut end = bound;
    let mut tail = bound;
    let mut i = offset + 1;
    while i < bound {
        match bytes[i] {
            b';' => {
                end = i;
                tail = i + 1;
                break;
            }
            b'=' => return DecodedEntity::literal_amp(offset),
            b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'#' => i += 1,
            _ => {
                end = i;
                tail = i;
                break;
            }
        }
    }

    if end - offset < 2 {
        return DecodedEntity::literal_amp(offset);
    }

    if bytes[offset + 1] == b'#' {
        // Numeric reference, decimal or hex.
        let (digits, radix) = if offset + 2 < end && bytes[offset + 2].to_ascii_lowercase() == b'x'
        {
            (&bytes[offset + 3..end], 16u32)
        } else {
            (&bytes[offset + 2..end], 10u32)
        };
        if digits.is_empty() {
            return DecodedEntity::literal_amp(offset);
        }
        let mut value: Option<u32> = Some(0);
        for &b in digits {
            let digit = match (b as char).to_digit(radix) {
                Some(d) => d,
                None => return DecodedEntity::literal_amp(offset),
            };
            value = value.and_then(|v| v.checked_mul(radix)).and_then(|v| v.checked_add(digit));
        }
        let cp = match value {
            Some(v) if v <= 0x10FFFF => v,
            _ => 0xFFFD,
        };
        return DecodedEntity::from_code_point(tail, cp);
    }

    // Named reference: exact walk first, then with uppercase ASCII folded
    // to lowercase so `&QuOt;` still resolves while verbatim aliases like
    // `&COPY;` hit on the first pass.
    let name = &bytes[offset + 1..end];
    let hit = walk_trie(name, false).or_else(|| walk_trie(name, true));
    match hit {
        Some((len, packed)) => {
            let resume = if len == name.len() {
                tail
            } else {
                offset + 1 + len
            };
            DecodedEntity::unpack(resume, packed)
        }
        None => DecodedEntity::literal_amp(offset),
    }
}

/// Decodes every character reference in `html`.
///
/// # Examples
///
/// ```
/// assert_eq!(lye::decode_entities("1 &lt; 2 &amp; 3 &#x2260; 4"), "1 < 2 & 3 \u{2260} 4");
/// ```
pub fn decode_entities(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut offset = 0;
    while offset < html.len() {
        let decoded = decode_entity_at(html, offset, html.len());
        out.push_str(&decoded.text());
        offset = decoded.end;
    }
    out
}
