//! Per-construct grammars over the token stream.
//!
//! Each construct (class header, property, action header, value object)
//! is matched by its own small function. A matcher either consumes the
//! whole construct and returns it, or restores the cursor and returns
//! `None`, so callers can simply try the next construct.

pub mod class;
pub mod endpoint;
pub mod value_object;

use crate::lexer::{Token, TokenKind};
use apigen_core::TypeExpr;
use apigen_core::type_expr::base_name;

/// Words that never start a type expression.
const NON_TYPE_KEYWORDS: &[&str] = &[
    "abstract", "async", "class", "const", "delegate", "enum", "event", "interface", "namespace",
    "new", "operator", "override", "partial", "private", "protected", "public", "readonly",
    "record", "required", "return", "sealed", "static", "struct", "using", "virtual", "void",
    "where",
];

/// Position-tracking view over a token slice.
#[derive(Debug, Clone)]
pub struct Cursor<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Cursor<'t> {
    /// Starts at the first token.
    #[must_use]
    pub const fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Current token.
    #[must_use]
    pub fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    /// Token `n` positions ahead.
    #[must_use]
    pub fn peek_nth(&self, n: usize) -> Option<&'t Token> {
        self.tokens.get(self.pos + n)
    }

    /// Consumes and returns the current token.
    pub fn bump(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Current position, for [`reset`](Self::reset).
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Rewinds (or advances) to a saved position.
    pub const fn reset(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Line of the current token, or 0 at end of input.
    #[must_use]
    pub fn line(&self) -> usize {
        self.peek().map_or(0, |t| t.line)
    }

    /// Consumes the punctuation `c` if it is next.
    pub fn eat_punct(&mut self, c: char) -> bool {
        if self.peek().is_some_and(|t| t.is_punct(c)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes the keyword `word` if it is next.
    pub fn eat_ident(&mut self, word: &str) -> bool {
        if self.peek().is_some_and(|t| t.is_ident(word)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes the next token if it is any of `words`.
    pub fn eat_any_ident(&mut self, words: &[&str]) -> Option<&'t str> {
        let token = self.peek()?;
        if token.kind == TokenKind::Ident && words.contains(&token.text.as_str()) {
            self.pos += 1;
            Some(&token.text)
        } else {
            None
        }
    }

    /// Consumes an identifier.
    pub fn ident(&mut self) -> Option<&'t str> {
        let token = self.peek()?;
        if token.kind == TokenKind::Ident {
            self.pos += 1;
            Some(&token.text)
        } else {
            None
        }
    }

    /// Consumes a dotted name such as `NariNoteBackend.Application.Dto`.
    pub fn qualified_name(&mut self) -> Option<String> {
        let mut name = self.ident()?.to_string();
        while self.peek().is_some_and(|t| t.is_punct('.'))
            && self.peek_nth(1).is_some_and(|t| t.kind == TokenKind::Ident)
        {
            self.pos += 1;
            name.push('.');
            name.push_str(self.ident()?);
        }
        Some(name)
    }

    /// Consumes a bracketed group starting at `open`, nested groups of the
    /// same kind included, and returns the tokens strictly inside.
    ///
    /// Returns `None` (consuming nothing) if the current token is not
    /// `open` or the group is unterminated.
    pub fn balanced(&mut self, open: char, close: char) -> Option<&'t [Token]> {
        if !self.peek().is_some_and(|t| t.is_punct(open)) {
            return None;
        }
        let start = self.pos + 1;
        let mut depth = 0usize;
        for (i, token) in self.tokens[self.pos..].iter().enumerate() {
            if token.is_punct(open) {
                depth += 1;
            } else if token.is_punct(close) {
                depth -= 1;
                if depth == 0 {
                    let end = self.pos + i;
                    self.pos = end + 1;
                    return Some(&self.tokens[start..end]);
                }
            }
        }
        None
    }
}

/// An attribute such as `[HttpGet("{id}")]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Unqualified name without the `Attribute` suffix
    pub name: String,
    /// Positional string-literal arguments in order
    pub positional: Vec<String>,
    /// Line of the attribute name
    pub line: usize,
}

/// Parses one `[...]` attribute group.
///
/// Attribute targets (`[return: ...]`) are skipped. Named arguments are
/// ignored; only string-literal positional arguments are kept.
pub fn attribute_group(cursor: &mut Cursor<'_>) -> Option<Vec<Attribute>> {
    let start = cursor.pos();
    let group = attribute_group_inner(cursor);
    if group.is_none() {
        cursor.reset(start);
    }
    group
}

fn attribute_group_inner(cursor: &mut Cursor<'_>) -> Option<Vec<Attribute>> {
    if !cursor.eat_punct('[') {
        return None;
    }
    if cursor.peek_nth(1).is_some_and(|t| t.is_punct(':')) {
        cursor.ident()?;
        cursor.bump();
    }

    let mut attributes = Vec::new();
    loop {
        let line = cursor.line();
        let qualified = cursor.qualified_name()?;
        let name = base_name(&qualified);
        let name = name.strip_suffix("Attribute").unwrap_or(name).to_string();
        if cursor.peek().is_some_and(|t| t.is_punct('<')) {
            cursor.balanced('<', '>')?;
        }
        let positional = match cursor.balanced('(', ')') {
            Some(args) => positional_strings(args),
            None => Vec::new(),
        };
        attributes.push(Attribute {
            name,
            positional,
            line,
        });

        if cursor.eat_punct(',') {
            continue;
        }
        if cursor.eat_punct(']') {
            return Some(attributes);
        }
        return None;
    }
}

/// Parses consecutive attribute groups and flattens them.
pub fn attribute_groups(cursor: &mut Cursor<'_>) -> Vec<Attribute> {
    let mut attributes = Vec::new();
    while let Some(group) = attribute_group(cursor) {
        attributes.extend(group);
    }
    attributes
}

fn positional_strings(args: &[Token]) -> Vec<String> {
    split_top_level(args)
        .into_iter()
        .filter_map(|arg| match arg {
            [token] if token.kind == TokenKind::Str => Some(token.text.clone()),
            _ => None,
        })
        .collect()
}

/// Splits a token list on commas that are not nested in any bracket pair.
#[must_use]
pub fn split_top_level(tokens: &[Token]) -> Vec<&[Token]> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, token) in tokens.iter().enumerate() {
        if token.kind != TokenKind::Punct {
            continue;
        }
        match token.text.as_str() {
            "(" | "[" | "{" | "<" => depth += 1,
            ")" | "]" | "}" | ">" => depth -= 1,
            "," if depth == 0 => {
                parts.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < tokens.len() {
        parts.push(&tokens[start..]);
    }
    parts
}

/// Parses a type expression and returns it normalized.
///
/// Accepts dotted names, generic arguments, array ranks, and nullability
/// markers. Restores the cursor on failure.
pub fn type_expr(cursor: &mut Cursor<'_>) -> Option<TypeExpr> {
    let start = cursor.pos();
    let parsed = type_text(cursor).and_then(|text| TypeExpr::parse(&text));
    if parsed.is_none() {
        cursor.reset(start);
    }
    parsed
}

fn type_text(cursor: &mut Cursor<'_>) -> Option<String> {
    let first = cursor.peek()?;
    if first.kind != TokenKind::Ident || NON_TYPE_KEYWORDS.contains(&first.text.as_str()) {
        return None;
    }
    let mut text = cursor.qualified_name()?;
    if cursor.peek().is_some_and(|t| t.is_punct('<')) {
        let args = cursor.balanced('<', '>')?;
        text.push('<');
        for token in args {
            text.push_str(&token.text);
            if token.is_punct(',') {
                text.push(' ');
            }
        }
        text.push('>');
    }
    loop {
        if cursor.eat_punct('?') {
            text.push('?');
        } else if cursor.peek().is_some_and(|t| t.is_punct('[')) {
            let rank = cursor.balanced('[', ']')?;
            if rank.iter().any(|t| !t.is_punct(',')) {
                return None;
            }
            text.push_str("[]");
        } else {
            return Some(text);
        }
    }
}
