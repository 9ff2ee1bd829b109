//! Structured form of a declared source type.
//!
//! Property and parameter types are captured verbatim by the extractor and
//! parsed here into a small tree, so that nullability, collections and maps
//! can be inspected without string matching.
//!
//! # Examples
//!
//! ```
//! use apigen_core::TypeExpr;
//!
//! let expr = TypeExpr::parse("Dictionary<string, List<int>>?").unwrap();
//! assert!(expr.is_nullable());
//! assert_eq!(expr.to_string(), "Dictionary<string, List<int>>?");
//! ```

use std::fmt;

/// Generic names that denote an ordered list of one type argument.
pub const SEQUENCE_TYPES: &[&str] = &[
    "List",
    "IList",
    "IEnumerable",
    "ICollection",
    "IReadOnlyList",
    "IReadOnlyCollection",
];

/// Generic names that denote a key-value map of two type arguments.
pub const MAP_TYPES: &[&str] = &["Dictionary", "IDictionary", "IReadOnlyDictionary"];

/// A parsed type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// A (possibly generic, possibly namespace-qualified) named type.
    Named {
        /// Name as written, e.g. `System.DateTime` or `List`
        name: String,
        /// Generic arguments in declaration order
        args: Vec<TypeExpr>,
    },
    /// A C# array, `T[]`.
    Array(Box<TypeExpr>),
    /// A type carrying the trailing nullability marker, `T?`.
    Nullable(Box<TypeExpr>),
}

/// Shape of a collection-like type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionShape<'a> {
    /// Ordered list or array of one element type.
    Sequence(&'a TypeExpr),
    /// Key-value map.
    Map(&'a TypeExpr, &'a TypeExpr),
}

impl TypeExpr {
    /// Creates a non-generic named type.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Parses a type expression.
    ///
    /// Returns `None` for text outside the supported grammar (tuples,
    /// pointers, unbalanced brackets).
    ///
    /// # Examples
    ///
    /// ```
    /// use apigen_core::TypeExpr;
    ///
    /// assert!(TypeExpr::parse("List<List<int>>").is_some());
    /// assert!(TypeExpr::parse("int[]").is_some());
    /// assert!(TypeExpr::parse("(int, string)").is_none());
    /// assert!(TypeExpr::parse("List<int").is_none());
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let mut parser = Parser {
            chars: text.char_indices().peekable(),
            text,
        };
        let expr = parser.parse_type()?;
        parser.skip_ws();
        if parser.chars.peek().is_some() {
            return None;
        }
        Some(expr)
    }

    /// Parses a type expression, falling back to an opaque named type.
    ///
    /// The fallback keeps a trailing `?` meaningful so nullability still
    /// holds for types outside the grammar.
    #[must_use]
    pub fn parse_lossy(text: &str) -> Self {
        let text = text.trim();
        Self::parse(text).unwrap_or_else(|| match text.strip_suffix('?') {
            Some(inner) => Self::Nullable(Box::new(Self::named(inner.trim_end()))),
            None => Self::named(text),
        })
    }

    /// Returns `true` if the outermost marker is a nullability marker.
    ///
    /// `Nullable<T>` is treated the same as `T?`.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        match self {
            Self::Nullable(_) => true,
            Self::Named { name, args } => base_name(name) == "Nullable" && args.len() == 1,
            Self::Array(_) => false,
        }
    }

    /// Strips every outer nullability marker.
    ///
    /// Returns the inner type and whether anything was stripped.
    ///
    /// # Examples
    ///
    /// ```
    /// use apigen_core::TypeExpr;
    ///
    /// let expr = TypeExpr::parse("int?").unwrap();
    /// let (inner, nullable) = expr.strip_nullable();
    /// assert!(nullable);
    /// assert_eq!(inner.to_string(), "int");
    /// ```
    #[must_use]
    pub fn strip_nullable(&self) -> (&Self, bool) {
        let mut current = self;
        let mut stripped = false;
        loop {
            match current {
                Self::Nullable(inner) => current = inner,
                Self::Named { name, args } if base_name(name) == "Nullable" && args.len() == 1 => {
                    current = &args[0];
                }
                _ => return (current, stripped),
            }
            stripped = true;
        }
    }

    /// Last segment of a named type, without namespace qualification.
    #[must_use]
    pub fn base_name(&self) -> Option<&str> {
        match self {
            Self::Named { name, .. } => Some(base_name(name)),
            _ => None,
        }
    }

    /// Classifies list-like and map-like types.
    ///
    /// Nullability is not looked through; strip it first.
    #[must_use]
    pub fn collection_shape(&self) -> Option<CollectionShape<'_>> {
        match self {
            Self::Array(element) => Some(CollectionShape::Sequence(element)),
            Self::Named { name, args } => {
                let name = base_name(name);
                match args.as_slice() {
                    [element] if SEQUENCE_TYPES.contains(&name) => {
                        Some(CollectionShape::Sequence(element))
                    }
                    [key, value] if MAP_TYPES.contains(&name) => {
                        Some(CollectionShape::Map(key, value))
                    }
                    _ => None,
                }
            }
            Self::Nullable(_) => None,
        }
    }

    /// Returns `true` if the type, ignoring nullability, is list-like.
    #[must_use]
    pub fn is_sequence(&self) -> bool {
        matches!(
            self.strip_nullable().0.collection_shape(),
            Some(CollectionShape::Sequence(_))
        )
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            Self::Array(inner) => write!(f, "{inner}[]"),
            Self::Nullable(inner) => write!(f, "{inner}?"),
        }
    }
}

/// Returns the segment after the last `.` of a qualified name.
///
/// # Examples
///
/// ```
/// use apigen_core::type_expr::base_name;
///
/// assert_eq!(base_name("System.DateTime"), "DateTime");
/// assert_eq!(base_name("int"), "int");
/// ```
#[must_use]
pub fn base_name(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}

struct Parser<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    text: &'a str,
}

impl Parser<'_> {
    fn skip_ws(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_ws();
        self.chars.next_if(|(_, c)| *c == expected).is_some()
    }

    fn parse_name(&mut self) -> Option<String> {
        self.skip_ws();
        let (start, _) = *self.chars.peek()?;
        let mut end = start;
        while let Some((i, c)) = self
            .chars
            .next_if(|(_, c)| c.is_alphanumeric() || matches!(c, '_' | '.' | '@'))
        {
            end = i + c.len_utf8();
        }
        if end == start {
            return None;
        }
        let name = self.text[start..end].trim_start_matches('@');
        if name.starts_with('.') || name.ends_with('.') {
            return None;
        }
        Some(name.to_string())
    }

    fn parse_type(&mut self) -> Option<TypeExpr> {
        let name = self.parse_name()?;
        let mut args = Vec::new();
        if self.eat('<') {
            loop {
                args.push(self.parse_type()?);
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return None;
            }
        }
        let mut expr = TypeExpr::Named { name, args };
        loop {
            if self.eat('[') {
                // multi-dimensional arrays collapse to one level
                while self.eat(',') {}
                if !self.eat(']') {
                    return None;
                }
                expr = TypeExpr::Array(Box::new(expr));
            } else if self.eat('?') {
                expr = TypeExpr::Nullable(Box::new(expr));
            } else {
                return Some(expr);
            }
        }
    }
}
