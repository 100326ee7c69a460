//! CSS tokenizing for `style` attribute sanitization.
//!
//! The lexer follows CSS Syntax Level 3 closely enough to agree with
//! browsers on every construct a declaration block can contain, while
//! normalizing as it goes: escape sequences inside identifiers, strings,
//! and URLs are decoded up front, identifier-like lexemes are
//! ASCII-lowercased, numbers are canonicalized, and `url(…)` collapses to
//! a single token carrying the decoded argument. Downstream admission
//! logic therefore compares plain strings and never re-parses.
//!
//! Pathological input degrades instead of failing: a string broken by a
//! newline vanishes from the token stream, and a malformed `url(…)`
//! becomes a [`CssTokenKind::BadUrl`] marker the sanitizer treats as
//! poison.

use std::fmt;

/// The token classes a declaration block can contain.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CssTokenKind {
    Ident,
    /// A function call opener; the lexeme includes the trailing `(`.
    Function,
    AtKeyword,
    /// A `#name` whose name is not entirely hex digits.
    HashId,
    /// A `#name` made of hex digits only — the color form.
    HashUnrestricted,
    String,
    /// A whole `url(…)`; the lexeme is the decoded, lowercased argument.
    Url,
    /// A malformed `url(…)`; the sanitizer drops the declaration.
    BadUrl,
    Number,
    Dimension,
    /// A number glued to something that is not a well-formed unit.
    BadDimension,
    Percentage,
    UnicodeRange,
    /// A `.name` selector-ish fragment.
    DotIdent,
    /// `~=`, `^=`, `$=`, `*=`, `|=`.
    Match,
    /// `||`.
    Column,
    Whitespace,
    Comma,
    Colon,
    Semicolon,
    LeftParen,
    RightParen,
    LeftCurly,
    RightCurly,
    LeftSquare,
    RightSquare,
    Delim,
}

/// One lexed token: a kind plus its (normalized) lexeme.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CssToken {
    pub kind: CssTokenKind,
    pub lexeme: String,
}

impl CssToken {
    fn new(kind: CssTokenKind, lexeme: impl Into<String>) -> Self {
        CssToken {
            kind,
            lexeme: lexeme.into(),
        }
    }
}

impl fmt::Display for CssToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexeme)
    }
}

/// The fully lexed token buffer for one declaration block.
///
/// Lexing is eager; iteration is cheap cursors over the shared buffer,
/// which is what makes [`TokenIterator::splice_to_end`] safe to hand out.
pub struct CssTokenStream {
    tokens: Vec<CssToken>,
}

impl CssTokenStream {
    pub fn lex(css: &str) -> Self {
        let mut lexer = Lexer {
            chars: css.chars().collect(),
            pos: 0,
            tokens: Vec::new(),
        };
        lexer.run();
        CssTokenStream {
            tokens: lexer.tokens,
        }
    }

    pub fn iter(&self) -> TokenIterator<'_> {
        TokenIterator {
            tokens: &self.tokens,
            pos: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn tokens(&self) -> &[CssToken] {
        &self.tokens
    }
}

/// A cursor over a token buffer.
///
/// `splice_to_end` hands out a child iterator over the tokens up to the
/// bracket that closes the current nesting level and advances this
/// iterator past that closer, so a recursive value parser can consume a
/// function call's arguments without disturbing its caller's position.
#[derive(Clone)]
pub struct TokenIterator<'a> {
    tokens: &'a [CssToken],
    pos: usize,
}

impl<'a> TokenIterator<'a> {
    pub fn has_next(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Skips whitespace, then reports whether a token remains.
    pub fn has_next_after_space(&mut self) -> bool {
        while matches!(self.peek().map(|t| t.kind), Some(CssTokenKind::Whitespace)) {
            self.pos += 1;
        }
        self.has_next()
    }

    pub fn peek(&self) -> Option<&'a CssToken> {
        self.tokens.get(self.pos)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&'a CssToken> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    pub fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    /// Returns a sub-iterator over the tokens up to (not including) the
    /// bracket that closes the current nesting level, and advances this
    /// iterator past that closer. A missing closer bounds the splice at
    /// end-of-input. `Function` tokens open a paren level; `Url` tokens
    /// are self-contained and do not.
    pub fn splice_to_end(&mut self) -> TokenIterator<'a> {
        let start = self.pos;
        let mut depth = 1usize;
        let mut i = self.pos;
        while i < self.tokens.len() {
            match self.tokens[i].kind {
                CssTokenKind::Function
                | CssTokenKind::LeftParen
                | CssTokenKind::LeftCurly
                | CssTokenKind::LeftSquare => depth += 1,
                CssTokenKind::RightParen
                | CssTokenKind::RightCurly
                | CssTokenKind::RightSquare => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        self.pos = if i < self.tokens.len() { i + 1 } else { i };
        TokenIterator {
            tokens: &self.tokens[start..i],
            pos: 0,
        }
    }
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    tokens: Vec<CssToken>,
}

impl Lexer {
    fn peek(&self, n: usize) -> Option<char> {
        self.chars.get(self.pos + n).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek(0)?;
        self.pos += 1;
        Some(c)
    }

    fn eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn push(&mut self, kind: CssTokenKind, lexeme: impl Into<String>) {
        self.tokens.push(CssToken::new(kind, lexeme));
    }

    /// Whitespace runs and comments merge into one `Whitespace` token.
    fn push_whitespace(&mut self) {
        if !matches!(
            self.tokens.last().map(|t| t.kind),
            Some(CssTokenKind::Whitespace)
        ) {
            self.push(CssTokenKind::Whitespace, " ");
        }
    }

    fn run(&mut self) {
        while !self.eof() {
            self.consume_token();
        }
    }

    fn consume_token(&mut self) {
        let c = match self.peek(0) {
            Some(c) => c,
            None => return,
        };
        match c {
            c if c.is_whitespace() => {
                while matches!(self.peek(0), Some(c) if c.is_whitespace()) {
                    self.pos += 1;
                }
                self.push_whitespace();
            }
            '/' if self.peek(1) == Some('*') => {
                self.pos += 2;
                while !self.eof() && !(self.peek(0) == Some('*') && self.peek(1) == Some('/')) {
                    self.pos += 1;
                }
                self.pos = (self.pos + 2).min(self.chars.len());
                self.push_whitespace();
            }
            '"' | '\'' => self.consume_string(),
            '#' => self.consume_hash(),
            '(' => self.single(CssTokenKind::LeftParen, "("),
            ')' => self.single(CssTokenKind::RightParen, ")"),
            '[' => self.single(CssTokenKind::LeftSquare, "["),
            ']' => self.single(CssTokenKind::RightSquare, "]"),
            '{' => self.single(CssTokenKind::LeftCurly, "{"),
            '}' => self.single(CssTokenKind::RightCurly, "}"),
            ',' => self.single(CssTokenKind::Comma, ","),
            ':' => self.single(CssTokenKind::Colon, ":"),
            ';' => self.single(CssTokenKind::Semicolon, ";"),
            '+' | '-' if self.starts_number(0) => self.consume_numeric(),
            '-' if self.starts_ident_seq(0) => self.consume_ident_like(),
            '.' if matches!(self.peek(1), Some(d) if d.is_ascii_digit()) => self.consume_numeric(),
            '.' if self.starts_ident_seq_at(1) => {
                self.pos += 1;
                let name = self.consume_ident();
                self.push(CssTokenKind::DotIdent, format!(".{}", name.to_ascii_lowercase()));
            }
            '~' | '^' | '$' | '*' if self.peek(1) == Some('=') => {
                self.pos += 2;
                self.push(CssTokenKind::Match, format!("{}=", c));
            }
            '|' => {
                if self.peek(1) == Some('=') {
                    self.pos += 2;
                    self.push(CssTokenKind::Match, "|=");
                } else if self.peek(1) == Some('|') {
                    self.pos += 2;
                    self.push(CssTokenKind::Column, "||");
                } else {
                    self.pos += 1;
                    self.push(CssTokenKind::Delim, "|");
                }
            }
            '@' => {
                self.pos += 1;
                if self.starts_ident_seq(0) {
                    let name = self.consume_ident();
                    self.push(CssTokenKind::AtKeyword, format!("@{}", name.to_ascii_lowercase()));
                } else {
                    self.push(CssTokenKind::Delim, "@");
                }
            }
            'u' | 'U' if self.starts_unicode_range() => self.consume_unicode_range(),
            c if c.is_ascii_digit() => self.consume_numeric(),
            c if is_ident_start(c) => self.consume_ident_like(),
            '\\' if self.is_valid_escape(0) => self.consume_ident_like(),
            c => {
                self.pos += 1;
                self.push(CssTokenKind::Delim, c.to_string());
            }
        }
    }

    fn single(&mut self, kind: CssTokenKind, lexeme: &str) {
        self.pos += 1;
        self.push(kind, lexeme);
    }

    fn starts_number(&self, at: usize) -> bool {
        match self.peek(at) {
            Some('+') | Some('-') => match self.peek(at + 1) {
                Some(d) if d.is_ascii_digit() => true,
                Some('.') => matches!(self.peek(at + 2), Some(d) if d.is_ascii_digit()),
                _ => false,
            },
            Some('.') => matches!(self.peek(at + 1), Some(d) if d.is_ascii_digit()),
            Some(d) => d.is_ascii_digit(),
            None => false,
        }
    }

    fn starts_ident_seq(&self, at: usize) -> bool {
        match self.peek(at) {
            Some('-') => match self.peek(at + 1) {
                Some('-') => true,
                Some(c) if is_ident_start(c) => true,
                Some('\\') => self.is_valid_escape(at + 1),
                _ => false,
            },
            Some(c) if is_ident_start(c) => true,
            Some('\\') => self.is_valid_escape(at),
            _ => false,
        }
    }

    fn starts_ident_seq_at(&self, at: usize) -> bool {
        self.starts_ident_seq(at)
    }

    fn is_valid_escape(&self, at: usize) -> bool {
        self.peek(at) == Some('\\')
            && !matches!(self.peek(at + 1), Some('\n') | Some('\r') | None)
    }

    fn starts_unicode_range(&self) -> bool {
        self.peek(1) == Some('+')
            && matches!(self.peek(2), Some(c) if c.is_ascii_hexdigit() || c == '?')
    }

    /// `\HHHHHH` (1–6 hex digits, one optional trailing whitespace) or a
    /// single escaped character. Invalid sequences decode to U+FFFD.
    fn consume_escape(&mut self) -> char {
        // The backslash is already consumed.
        let c = match self.bump() {
            Some(c) => c,
            None => return '\u{FFFD}',
        };
        if !c.is_ascii_hexdigit() {
            return c;
        }
        let mut value = c.to_digit(16).unwrap_or(0);
        let mut count = 1;
        while count < 6 {
            match self.peek(0) {
                Some(h) if h.is_ascii_hexdigit() => {
                    value = value * 16 + h.to_digit(16).unwrap_or(0);
                    self.pos += 1;
                    count += 1;
                }
                _ => break,
            }
        }
        if matches!(self.peek(0), Some(w) if w.is_whitespace()) {
            self.pos += 1;
        }
        match char::from_u32(value) {
            Some(c) if value != 0 => c,
            _ => '\u{FFFD}',
        }
    }

    /// An identifier with escapes decoded, case preserved.
    fn consume_ident(&mut self) -> String {
        let mut out = String::new();
        loop {
            match self.peek(0) {
                Some('\\') if self.is_valid_escape(0) => {
                    self.pos += 1;
                    out.push(self.consume_escape());
                }
                Some(c) if is_ident_char(c) => {
                    self.pos += 1;
                    out.push(c);
                }
                _ => break,
            }
        }
        out
    }

    fn consume_ident_like(&mut self) {
        let name = self.consume_ident();
        if self.peek(0) == Some('(') {
            self.pos += 1;
            if name.eq_ignore_ascii_case("url") {
                self.consume_url();
            } else {
                self.push(CssTokenKind::Function, format!("{}(", name.to_ascii_lowercase()));
            }
        } else {
            self.push(CssTokenKind::Ident, name.to_ascii_lowercase());
        }
    }

    /// The whole `url(…)` as one token. Quoted and bare forms both
    /// decode to the raw argument; anything malformed (embedded quote or
    /// paren in the bare form, non-printable bytes, newline in the
    /// quoted form, missing `)`) becomes `BadUrl`.
    fn consume_url(&mut self) {
        self.skip_whitespace();
        let mut arg = String::new();
        match self.peek(0) {
            Some(q @ ('"' | '\'')) => {
                self.pos += 1;
                loop {
                    match self.peek(0) {
                        None => return self.bad_url_remnants(),
                        Some(c) if c == q => {
                            self.pos += 1;
                            break;
                        }
                        Some('\n') | Some('\r') => return self.bad_url_remnants(),
                        Some('\\') if self.peek(1) == Some('\n') => self.pos += 2,
                        Some('\\') if self.is_valid_escape(0) => {
                            self.pos += 1;
                            arg.push(self.consume_escape());
                        }
                        Some(c) => {
                            self.pos += 1;
                            arg.push(c);
                        }
                    }
                }
                self.skip_whitespace();
                if self.peek(0) == Some(')') {
                    self.pos += 1;
                    self.push(CssTokenKind::Url, arg.to_ascii_lowercase());
                } else {
                    self.bad_url_remnants();
                }
            }
            _ => loop {
                match self.peek(0) {
                    None => return self.bad_url_remnants(),
                    Some(')') => {
                        self.pos += 1;
                        return self.push(CssTokenKind::Url, arg.to_ascii_lowercase());
                    }
                    Some(c) if c.is_whitespace() => {
                        self.skip_whitespace();
                        if self.peek(0) == Some(')') {
                            self.pos += 1;
                            return self.push(CssTokenKind::Url, arg.to_ascii_lowercase());
                        }
                        return self.bad_url_remnants();
                    }
                    Some('"') | Some('\'') | Some('(') => return self.bad_url_remnants(),
                    Some('\\') if self.is_valid_escape(0) => {
                        self.pos += 1;
                        arg.push(self.consume_escape());
                    }
                    Some(c) if c.is_control() => return self.bad_url_remnants(),
                    Some(c) => {
                        self.pos += 1;
                        arg.push(c);
                    }
                }
            },
        }
    }

    fn bad_url_remnants(&mut self) {
        loop {
            match self.peek(0) {
                None => break,
                Some(')') => {
                    self.pos += 1;
                    break;
                }
                Some('\\') if self.is_valid_escape(0) => {
                    self.pos += 1;
                    let _ = self.consume_escape();
                }
                _ => self.pos += 1,
            }
        }
        self.push(CssTokenKind::BadUrl, "");
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(0), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    /// Strings re-emit with their escapes decoded. A raw newline makes
    /// the token a bad string, which is dropped from the stream entirely
    /// (the newline itself stays put and lexes as whitespace).
    fn consume_string(&mut self) {
        let quote = self.bump().unwrap_or('"');
        let mut out = String::new();
        loop {
            match self.peek(0) {
                None => break,
                Some(c) if c == quote => {
                    self.pos += 1;
                    break;
                }
                Some('\n') | Some('\r') => return, // bad string; not emitted
                Some('\\') => match self.peek(1) {
                    Some('\n') | Some('\r') => self.pos += 2,
                    None => {
                        self.pos += 1;
                    }
                    _ => {
                        self.pos += 1;
                        out.push(self.consume_escape());
                    }
                },
                Some(c) => {
                    self.pos += 1;
                    out.push(c);
                }
            }
        }
        self.push(CssTokenKind::String, out);
    }

    fn consume_hash(&mut self) {
        self.pos += 1;
        if matches!(self.peek(0), Some(c) if is_ident_char(c)) || self.is_valid_escape(0) {
            let name = self.consume_ident();
            if !name.is_empty() && name.chars().all(|c| c.is_ascii_hexdigit()) {
                self.push(
                    CssTokenKind::HashUnrestricted,
                    format!("#{}", name.to_ascii_lowercase()),
                );
            } else {
                self.push(CssTokenKind::HashId, format!("#{}", name));
            }
        } else {
            self.push(CssTokenKind::Delim, "#");
        }
    }

    fn consume_unicode_range(&mut self) {
        self.pos += 2; // `u+`
        let mut lexeme = String::from("u+");
        let mut count = 0;
        while count < 6 {
            match self.peek(0) {
                Some(c) if c.is_ascii_hexdigit() || c == '?' => {
                    self.pos += 1;
                    lexeme.push(c.to_ascii_lowercase());
                    count += 1;
                }
                _ => break,
            }
        }
        if self.peek(0) == Some('-')
            && matches!(self.peek(1), Some(c) if c.is_ascii_hexdigit())
        {
            self.pos += 1;
            lexeme.push('-');
            let mut count = 0;
            while count < 6 {
                match self.peek(0) {
                    Some(c) if c.is_ascii_hexdigit() => {
                        self.pos += 1;
                        lexeme.push(c.to_ascii_lowercase());
                        count += 1;
                    }
                    _ => break,
                }
            }
        }
        self.push(CssTokenKind::UnicodeRange, lexeme);
    }

    /// A number in canonical form: no leading `+`, a digit before any
    /// decimal point, lowercase `e` in exponents.
    fn consume_number_text(&mut self) -> String {
        let mut out = String::new();
        match self.peek(0) {
            Some('-') => {
                self.pos += 1;
                out.push('-');
            }
            Some('+') => self.pos += 1,
            _ => {}
        }
        let mut saw_digit = false;
        while matches!(self.peek(0), Some(d) if d.is_ascii_digit()) {
            out.push(self.bump().unwrap_or('0'));
            saw_digit = true;
        }
        if self.peek(0) == Some('.')
            && matches!(self.peek(1), Some(d) if d.is_ascii_digit())
        {
            if !saw_digit {
                out.push('0');
            }
            out.push('.');
            self.pos += 1;
            while matches!(self.peek(0), Some(d) if d.is_ascii_digit()) {
                out.push(self.bump().unwrap_or('0'));
            }
        }
        let exp_marker = matches!(self.peek(0), Some('e') | Some('E'));
        if exp_marker {
            let (skip, has_digits) = match self.peek(1) {
                Some(d) if d.is_ascii_digit() => (1, true),
                Some('+') | Some('-') => (2, matches!(self.peek(2), Some(d) if d.is_ascii_digit())),
                _ => (0, false),
            };
            if has_digits {
                self.pos += 1;
                out.push('e');
                if skip == 2 {
                    let sign = self.bump().unwrap_or('+');
                    if sign == '-' {
                        out.push('-');
                    }
                }
                while matches!(self.peek(0), Some(d) if d.is_ascii_digit()) {
                    out.push(self.bump().unwrap_or('0'));
                }
            }
        }
        out
    }

    fn consume_numeric(&mut self) {
        let number = self.consume_number_text();
        if self.peek(0) == Some('%') {
            self.pos += 1;
            self.push(CssTokenKind::Percentage, format!("{}%", number));
        } else if self.starts_ident_seq(0) {
            let unit = self.consume_ident().to_ascii_lowercase();
            let well_formed = unit
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-')
                && unit
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_alphabetic() || c == '-');
            if well_formed {
                self.push(CssTokenKind::Dimension, format!("{}{}", number, unit));
            } else {
                self.push(CssTokenKind::BadDimension, format!("{}{}", number, unit));
            }
        } else {
            self.push(CssTokenKind::Number, number);
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit() || c == '-'
}

/// Byte length of the numeric part of a canonical dimension lexeme; the
/// rest is the unit.
pub(crate) fn number_end(lexeme: &str) -> usize {
    let bytes = lexeme.as_bytes();
    let mut i = 0;
    if bytes.first() == Some(&b'-') {
        i += 1;
    }
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < bytes.len() && bytes[i] == b'e' {
        let mut j = i + 1;
        if j < bytes.len() && bytes[j] == b'-' {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            i = j;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
        }
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(css: &str) -> Vec<(CssTokenKind, std::string::String)> {
        CssTokenStream::lex(css)
            .tokens()
            .iter()
            .map(|t| (t.kind, t.lexeme.clone()))
            .collect()
    }

    use CssTokenKind::*;

    #[test]
    fn declaration_shape() {
        assert_eq!(
            lex("color: red"),
            vec![
                (Ident, "color".into()),
                (Colon, ":".into()),
                (Whitespace, " ".into()),
                (Ident, "red".into()),
            ]
        );
    }

    #[test]
    fn comments_merge_into_whitespace() {
        assert_eq!(
            lex("a/*x*/ /*y*/b"),
            vec![
                (Ident, "a".into()),
                (Whitespace, " ".into()),
                (Ident, "b".into()),
            ]
        );
    }

    #[test]
    fn numbers_are_canonicalized() {
        assert_eq!(
            lex("+5 .5 -0.25 1E2 12px 33% -7em"),
            vec![
                (Number, "5".into()),
                (Whitespace, " ".into()),
                (Number, "0.5".into()),
                (Whitespace, " ".into()),
                (Number, "-0.25".into()),
                (Whitespace, " ".into()),
                (Number, "1e2".into()),
                (Whitespace, " ".into()),
                (Dimension, "12px".into()),
                (Whitespace, " ".into()),
                (Percentage, "33%".into()),
                (Whitespace, " ".into()),
                (Dimension, "-7em".into()),
            ]
        );
    }

    #[test]
    fn hash_discrimination() {
        assert_eq!(
            lex("#fff #A0B1C2 #header #12"),
            vec![
                (HashUnrestricted, "#fff".into()),
                (Whitespace, " ".into()),
                (HashUnrestricted, "#a0b1c2".into()),
                (Whitespace, " ".into()),
                (HashId, "#header".into()),
                (Whitespace, " ".into()),
                (HashUnrestricted, "#12".into()),
            ]
        );
    }

    #[test]
    fn function_keeps_close_paren() {
        assert_eq!(
            lex("rgb(1,2)"),
            vec![
                (Function, "rgb(".into()),
                (Number, "1".into()),
                (Comma, ",".into()),
                (Number, "2".into()),
                (RightParen, ")".into()),
            ]
        );
    }

    #[test]
    fn url_forms() {
        assert_eq!(
            lex("url(http://EXAMPLE.com/A) url( 'x y' ) url(\"q\")"),
            vec![
                (Url, "http://example.com/a".into()),
                (Whitespace, " ".into()),
                (Url, "x y".into()),
                (Whitespace, " ".into()),
                (Url, "q".into()),
            ]
        );
    }

    #[test]
    fn bad_urls() {
        assert_eq!(lex("url(x'y)"), vec![(BadUrl, "".into())]);
        assert_eq!(lex("url(a(b)"), vec![(BadUrl, "".into())]);
        assert_eq!(lex("url(a b)"), vec![(BadUrl, "".into())]);
        assert_eq!(lex("url(open"), vec![(BadUrl, "".into())]);
    }

    #[test]
    fn strings_decode_escapes() {
        assert_eq!(
            lex("'It\\'s' \"a\\62 c\""),
            vec![
                (String, "It's".into()),
                (Whitespace, " ".into()),
                (String, "abc".into()),
            ]
        );
    }

    #[test]
    fn bad_string_is_dropped() {
        assert_eq!(
            lex("'broken\nx"),
            vec![(Whitespace, " ".into()), (Ident, "x".into())]
        );
    }

    #[test]
    fn idents_decode_escapes_and_lowercase() {
        assert_eq!(
            lex("\\45 Xpression( Red"),
            vec![
                (Function, "expression(".into()),
                (Whitespace, " ".into()),
                (Ident, "red".into()),
            ]
        );
    }

    #[test]
    fn invalid_escape_becomes_replacement() {
        assert_eq!(lex("'\\110000'"), vec![(String, "\u{FFFD}".into())]);
        assert_eq!(lex("'\\0'"), vec![(String, "\u{FFFD}".into())]);
    }

    #[test]
    fn match_column_dot_at() {
        assert_eq!(
            lex("~= ^= || .cls @media u+00a0-00ff"),
            vec![
                (Match, "~=".into()),
                (Whitespace, " ".into()),
                (Match, "^=".into()),
                (Whitespace, " ".into()),
                (Column, "||".into()),
                (Whitespace, " ".into()),
                (DotIdent, ".cls".into()),
                (Whitespace, " ".into()),
                (AtKeyword, "@media".into()),
                (Whitespace, " ".into()),
                (UnicodeRange, "u+00a0-00ff".into()),
            ]
        );
    }

    #[test]
    fn bad_dimension() {
        // The escape decodes to a character a unit cannot contain.
        assert_eq!(lex("5\\26"), vec![(BadDimension, "5&".into())]);
    }

    #[test]
    fn splice_to_end_balances_brackets() {
        let stream = CssTokenStream::lex("f(a, g(b), c) d");
        let mut it = stream.iter();
        let first = it.next().unwrap();
        assert_eq!(first.kind, Function);
        let mut inner = it.splice_to_end();
        let inner_lexemes: Vec<_> = std::iter::from_fn(|| inner.next().map(|t| t.lexeme.clone()))
            .collect();
        assert_eq!(inner_lexemes, vec!["a", ",", " ", "g(", "b", ")", ",", " ", "c"]);
        // The outer iterator resumed past the closing paren.
        assert!(it.has_next_after_space());
        assert_eq!(it.next().unwrap().lexeme, "d");
    }

    #[test]
    fn splice_with_missing_closer_stops_at_end() {
        let stream = CssTokenStream::lex("f(a, b");
        let mut it = stream.iter();
        it.advance(); // f(
        let mut inner = it.splice_to_end();
        assert_eq!(inner.next().unwrap().lexeme, "a");
        assert!(!it.has_next());
    }

    #[test]
    fn number_end_splits_dimensions() {
        assert_eq!(number_end("10pt"), 2);
        assert_eq!(number_end("-0.5em"), 4);
        assert_eq!(number_end("1e2q"), 3);
        assert_eq!(number_end("33"), 2);
    }
}
