//! Namespace, class header, and auto-property grammar.

use super::{Cursor, attribute_groups, type_expr};
use crate::lexer::Token;
use apigen_core::{SourceClass, SourceProperty};
use std::path::Path;

const ACCESS_MODIFIERS: &[&str] = &["public", "internal"];
const CLASS_MODIFIERS: &[&str] = &["sealed", "partial", "abstract", "static", "new", "unsafe"];
const PROPERTY_MODIFIERS: &[&str] = &["required", "virtual", "override", "new", "sealed"];
const ACCESSOR_MODIFIERS: &[&str] = &["private", "protected", "internal"];

/// Parses `namespace A.B.C` in either block or file-scoped form.
///
/// Leaves the cursor on the `;` or `{` that follows the name.
pub fn namespace(cursor: &mut Cursor<'_>) -> Option<String> {
    let start = cursor.pos();
    if cursor.eat_ident("namespace")
        && let Some(name) = cursor.qualified_name()
    {
        return Some(name);
    }
    cursor.reset(start);
    None
}

/// Parses a class header up to and including the class name.
///
/// Shape: access modifier, other modifiers in any order, `class`, name.
/// Base lists, generic parameters, and constraints after the name are
/// left for the caller to skip.
pub fn class_header<'t>(cursor: &mut Cursor<'t>) -> Option<&'t str> {
    let start = cursor.pos();
    let name = class_header_inner(cursor);
    if name.is_none() {
        cursor.reset(start);
    }
    name
}

fn class_header_inner<'t>(cursor: &mut Cursor<'t>) -> Option<&'t str> {
    cursor.eat_any_ident(ACCESS_MODIFIERS)?;
    while cursor.eat_any_ident(CLASS_MODIFIERS).is_some() {}
    if !cursor.eat_ident("class") {
        return None;
    }
    cursor.ident()
}

/// Parses an auto-implemented property.
///
/// Shape: `public`, optional modifiers, type, name, then an accessor block
/// of `get;` followed by `set;` or `init;`, each optionally narrowed by an
/// access modifier. Consumes through the closing brace; initializers are
/// left for the caller to skip.
pub fn property(cursor: &mut Cursor<'_>) -> Option<SourceProperty> {
    let start = cursor.pos();
    let prop = property_inner(cursor);
    if prop.is_none() {
        cursor.reset(start);
    }
    prop
}

fn property_inner(cursor: &mut Cursor<'_>) -> Option<SourceProperty> {
    if !cursor.eat_ident("public") {
        return None;
    }
    while cursor.eat_any_ident(PROPERTY_MODIFIERS).is_some() {}
    let declared_type = type_expr(cursor)?;
    let name = cursor.ident()?;
    if !cursor.eat_punct('{') {
        return None;
    }
    accessor(cursor, &["get"])?;
    accessor(cursor, &["set", "init"])?;
    if !cursor.eat_punct('}') {
        return None;
    }
    Some(SourceProperty::new(name, declared_type.to_string()))
}

fn accessor(cursor: &mut Cursor<'_>, keywords: &[&str]) -> Option<()> {
    attribute_groups(cursor);
    cursor.eat_any_ident(ACCESSOR_MODIFIERS);
    cursor.eat_any_ident(keywords)?;
    cursor.eat_punct(';').then_some(())
}

/// Extracts every class declared in a file.
///
/// Properties are attributed to the innermost enclosing class; members of
/// method bodies and other nested blocks are ignored. Classes without any
/// matched property are still returned.
///
/// # Examples
///
/// ```
/// use apigen_extractor::grammar::class::parse_classes;
/// use apigen_extractor::lexer::tokenize;
/// use std::path::Path;
///
/// let tokens = tokenize(
///     "namespace App.Dto;
///      public class LoginResponse { public string Token { get; set; } = string.Empty; }",
/// );
/// let classes = parse_classes(&tokens, Path::new("LoginResponse.cs"));
/// assert_eq!(classes[0].name, "LoginResponse");
/// assert_eq!(classes[0].namespace, "App.Dto");
/// assert_eq!(classes[0].properties[0].name, "Token");
/// ```
#[must_use]
pub fn parse_classes(tokens: &[Token], source: &Path) -> Vec<SourceClass> {
    let mut cursor = Cursor::new(tokens);
    let mut classes: Vec<SourceClass> = Vec::new();
    // one entry per open brace; `Some(i)` marks the body of `classes[i]`
    let mut scopes: Vec<Option<usize>> = Vec::new();
    let mut pending_body: Option<usize> = None;
    let mut namespace_name = String::new();

    while let Some(token) = cursor.peek() {
        if token.is_punct('{') {
            scopes.push(pending_body.take());
            cursor.bump();
            continue;
        }
        if token.is_punct('}') {
            scopes.pop();
            cursor.bump();
            continue;
        }
        if let Some(name) = namespace(&mut cursor) {
            namespace_name = name;
            continue;
        }
        if pending_body.is_none()
            && let Some(name) = class_header(&mut cursor)
        {
            tracing::trace!(class = name, line = token.line, "class header");
            classes.push(SourceClass {
                name: name.to_string(),
                namespace: namespace_name.clone(),
                properties: Vec::new(),
                source: source.to_path_buf(),
            });
            pending_body = Some(classes.len() - 1);
            continue;
        }
        if let Some(Some(index)) = scopes.last()
            && let Some(prop) = property(&mut cursor)
        {
            classes[*index].properties.push(prop);
            continue;
        }
        cursor.bump();
    }

    classes
}
