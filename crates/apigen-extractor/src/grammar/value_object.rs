//! Identifier value-object declarations.

use super::{Cursor, attribute_groups};
use crate::lexer::Token;

const TYPE_MODIFIERS: &[&str] = &[
    "public", "internal", "partial", "readonly", "sealed", "record",
];

/// Collects the names of `struct`/`class` types carrying a `ValueObject`
/// attribute, in source order.
///
/// # Examples
///
/// ```
/// use apigen_extractor::grammar::value_object::parse_value_objects;
/// use apigen_extractor::lexer::tokenize;
///
/// let tokens = tokenize(
///     "[ValueObject<int>(Conversions.EfCoreValueConverter)]
///      public partial struct UserId;",
/// );
/// assert_eq!(parse_value_objects(&tokens), ["UserId"]);
/// ```
#[must_use]
pub fn parse_value_objects(tokens: &[Token]) -> Vec<String> {
    let mut cursor = Cursor::new(tokens);
    let mut names = Vec::new();

    while cursor.peek().is_some() {
        let attributes = attribute_groups(&mut cursor);
        if attributes.is_empty() {
            cursor.bump();
            continue;
        }
        if !attributes.iter().any(|a| a.name == "ValueObject") {
            continue;
        }
        let start = cursor.pos();
        while cursor.eat_any_ident(TYPE_MODIFIERS).is_some() {}
        if cursor.eat_any_ident(&["struct", "class"]).is_some()
            && let Some(name) = cursor.ident()
        {
            names.push(name.to_string());
        } else {
            cursor.reset(start);
        }
    }

    names
}
