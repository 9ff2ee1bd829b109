//! C# tokenizer.
//!
//! Produces a flat token stream with comments, preprocessor lines, and
//! whitespace removed. Literals are kept whole, so braces or brackets inside
//! strings never reach the grammar. The lexer never fails: unterminated
//! constructs run to the end of input.

/// Token category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or keyword; a verbatim `@` prefix is dropped.
    Ident,
    /// String literal of any flavour; text is the content between quotes.
    Str,
    /// Character literal; text is the content between quotes.
    Char,
    /// Numeric literal.
    Number,
    /// Any single ASCII punctuation character.
    Punct,
}

/// One token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Category
    pub kind: TokenKind,
    /// Token text; for literals, the unquoted content
    pub text: String,
    /// 1-based source line where the token starts
    pub line: usize,
}

impl Token {
    /// Returns `true` if this is the punctuation character `c`.
    #[must_use]
    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct && self.text.len() == 1 && self.text.starts_with(c)
    }

    /// Returns `true` if this is the identifier or keyword `word`.
    #[must_use]
    pub fn is_ident(&self, word: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == word
    }
}

/// Tokenizes C# source text.
///
/// # Examples
///
/// ```
/// use apigen_extractor::lexer::{tokenize, TokenKind};
///
/// let tokens = tokenize(r#"[HttpGet("{id}")] // fetch"#);
/// assert_eq!(tokens.len(), 6);
/// assert_eq!(tokens[3].kind, TokenKind::Str);
/// assert_eq!(tokens[3].text, "{id}");
/// ```
#[must_use]
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lexer = Lexer {
        src: source,
        bytes: source.as_bytes(),
        pos: 0,
        line: 1,
        tokens: Vec::new(),
    };
    lexer.run();
    lexer.tokens
}

struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    tokens: Vec<Token>,
}

const fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

const fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

impl Lexer<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn push(&mut self, kind: TokenKind, text: String, line: usize) {
        self.tokens.push(Token { kind, text, line });
    }

    fn run(&mut self) {
        while let Some(b) = self.peek() {
            match b {
                b'\n' => {
                    self.line += 1;
                    self.pos += 1;
                }
                b if b.is_ascii_whitespace() => self.pos += 1,
                b'/' if self.peek_at(1) == Some(b'/') => self.skip_line(),
                b'/' if self.peek_at(1) == Some(b'*') => self.skip_block_comment(),
                b'#' => self.skip_line(),
                b'"' => self.string(false, false),
                b'@' | b'$' => self.prefixed(),
                b'\'' => self.char_literal(),
                b if b.is_ascii_digit() => self.number(),
                b if is_ident_start(b) => self.ident(),
                _ => {
                    let line = self.line;
                    self.pos += 1;
                    self.push(TokenKind::Punct, char::from(b).to_string(), line);
                }
            }
        }
    }

    fn skip_line(&mut self) {
        while let Some(b) = self.peek() {
            if b == b'\n' {
                return;
            }
            self.pos += 1;
        }
    }

    fn skip_block_comment(&mut self) {
        self.pos += 2;
        while let Some(b) = self.peek() {
            if b == b'*' && self.peek_at(1) == Some(b'/') {
                self.pos += 2;
                return;
            }
            if b == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
    }

    fn ident(&mut self) {
        let line = self.line;
        let start = self.pos;
        while self.peek().is_some_and(is_ident_continue) {
            self.pos += 1;
        }
        let text = self.src[start..self.pos].to_string();
        self.push(TokenKind::Ident, text, line);
    }

    fn number(&mut self) {
        let line = self.line;
        let start = self.pos;
        while let Some(b) = self.peek() {
            let decimal_point = b == b'.' && self.peek_at(1).is_some_and(|n| n.is_ascii_digit());
            if !(b.is_ascii_alphanumeric() || b == b'_' || decimal_point) {
                break;
            }
            self.pos += 1;
        }
        let text = self.src[start..self.pos].to_string();
        self.push(TokenKind::Number, text, line);
    }

    /// `@ident`, `@"..."`, `$"..."`, `$@"..."`, `@$"..."`, `$"""..."""`.
    fn prefixed(&mut self) {
        let mut offset = 0;
        let (mut verbatim, mut interpolated) = (false, false);
        while let Some(b) = self.peek_at(offset) {
            match b {
                b'@' => verbatim = true,
                b'$' => interpolated = true,
                _ => break,
            }
            offset += 1;
        }
        match self.peek_at(offset) {
            Some(b'"') => {
                self.pos += offset;
                self.string(verbatim, interpolated);
            }
            Some(b) if offset == 1 && verbatim && is_ident_start(b) => {
                self.pos += 1;
                self.ident();
            }
            _ => {
                let line = self.line;
                let text = self.src[self.pos..=self.pos].to_string();
                self.pos += 1;
                self.push(TokenKind::Punct, text, line);
            }
        }
    }

    fn quote_run(&self) -> usize {
        let mut n = 0;
        while self.peek_at(n) == Some(b'"') {
            n += 1;
        }
        n
    }

    /// Lexes a string starting at its opening quote and pushes it.
    fn string(&mut self, verbatim: bool, interpolated: bool) {
        let line = self.line;
        let text = self.string_body(verbatim, interpolated);
        self.push(TokenKind::Str, text, line);
    }

    fn string_body(&mut self, verbatim: bool, interpolated: bool) -> String {
        let quotes = self.quote_run();
        if quotes >= 3 {
            return self.raw_string(quotes);
        }
        if quotes == 2 && !verbatim {
            self.pos += 2;
            return String::new();
        }

        self.pos += 1;
        let start = self.pos;
        let mut depth = 0usize;
        loop {
            match self.peek() {
                None => return self.src[start..].to_string(),
                Some(b'\n') => {
                    self.line += 1;
                    self.pos += 1;
                }
                Some(b'\\') if !verbatim && depth == 0 => self.pos += 2,
                Some(b'"') if depth == 0 => {
                    if verbatim && self.peek_at(1) == Some(b'"') {
                        self.pos += 2;
                        continue;
                    }
                    let end = self.pos;
                    self.pos += 1;
                    let body = self.src.get(start..end).unwrap_or_default();
                    return if verbatim {
                        body.replace("\"\"", "\"")
                    } else {
                        body.to_string()
                    };
                }
                Some(b'"') => {
                    // string nested in an interpolation hole
                    self.string_body(false, false);
                }
                Some(b'{') if interpolated => {
                    if depth == 0 && self.peek_at(1) == Some(b'{') {
                        self.pos += 2;
                    } else {
                        depth += 1;
                        self.pos += 1;
                    }
                }
                Some(b'}') if interpolated && depth > 0 => {
                    depth -= 1;
                    self.pos += 1;
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn raw_string(&mut self, quotes: usize) -> String {
        self.pos += quotes;
        let start = self.pos;
        while let Some(b) = self.peek() {
            if b == b'"' && self.quote_run() >= quotes {
                let end = self.pos;
                self.pos += self.quote_run();
                return self.src[start..end].to_string();
            }
            if b == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
        self.src[start..].to_string()
    }

    fn char_literal(&mut self) {
        let line = self.line;
        self.pos += 1;
        let start = self.pos;
        if self.peek() == Some(b'\\') {
            self.pos += 2;
        }
        while let Some(b) = self.peek() {
            if b == b'\'' || b == b'\n' {
                break;
            }
            self.pos += 1;
        }
        let text = self.src.get(start..self.pos).unwrap_or_default().to_string();
        if self.peek() == Some(b'\'') {
            self.pos += 1;
        }
        self.push(TokenKind::Char, text, line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(source: &str) -> Vec<String> {
        tokenize(source).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_comments_are_dropped() {
        let source = "/// <summary>Login</summary>\n/* public class Fake {} */\nclass A {}";
        assert_eq!(texts(source), ["class", "A", "{", "}"]);
    }

    #[test]
    fn test_preprocessor_lines_are_dropped() {
        let source = "#nullable enable\n#region Props\nint X;\n#endregion";
        assert_eq!(texts(source), ["int", "X", ";"]);
    }

    #[test]
    fn test_braces_inside_strings_stay_in_literal() {
        let tokens = tokenize(r#"x = "{ get; set; }";"#);
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[2].kind, TokenKind::Str);
        assert_eq!(tokens[2].text, "{ get; set; }");
    }

    #[test]
    fn test_escaped_quote() {
        let tokens = tokenize(r#""a\"b" c"#);
        assert_eq!(tokens[0].text, r#"a\"b"#);
        assert!(tokens[1].is_ident("c"));
    }

    #[test]
    fn test_verbatim_string() {
        let tokens = tokenize(r#"@"C:\path ""quoted""" x"#);
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert_eq!(tokens[0].text, r#"C:\path "quoted""#);
        assert!(tokens[1].is_ident("x"));
    }

    #[test]
    fn test_interpolated_string_with_nested_string() {
        let tokens = tokenize(r#"$"Hello {name ?? "}"} {{x}}" y"#);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Str);
        assert!(tokens[1].is_ident("y"));
    }

    #[test]
    fn test_raw_string() {
        let tokens = tokenize("\"\"\"\n  { \"json\": 1 }\n  \"\"\" z");
        assert_eq!(tokens.len(), 2);
        assert!(tokens[0].text.contains("\"json\""));
        assert!(tokens[1].is_ident("z"));
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn test_empty_string() {
        let tokens = tokenize(r#"a = "";"#);
        assert_eq!(tokens[2].kind, TokenKind::Str);
        assert_eq!(tokens[2].text, "");
    }

    #[test]
    fn test_char_literals() {
        let tokens = tokenize(r"'{' '\'' c");
        assert_eq!(tokens[0].text, "{");
        assert_eq!(tokens[1].kind, TokenKind::Char);
        assert!(tokens[2].is_ident("c"));
    }

    #[test]
    fn test_verbatim_identifier() {
        let tokens = tokenize("@class = 1.5m;");
        assert!(tokens[0].is_ident("class"));
        assert_eq!(tokens[2].kind, TokenKind::Number);
        assert_eq!(tokens[2].text, "1.5m");
    }

    #[test]
    fn test_generic_closers_are_separate() {
        assert_eq!(
            texts("Task<ActionResult<X>>"),
            ["Task", "<", "ActionResult", "<", "X", ">", ">"]
        );
    }

    #[test]
    fn test_line_numbers() {
        let tokens = tokenize("a\n\n/* x\n y */ b");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[1].line, 4);
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let tokens = tokenize("x \"never closed");
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].text, "never closed");
    }

    #[test]
    fn test_non_ascii_identifier() {
        let tokens = tokenize("string 名前;");
        assert!(tokens[1].is_ident("名前"));
    }
}
