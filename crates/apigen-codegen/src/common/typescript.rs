//! TypeScript naming and type mapping.
//!
//! [`map_type`] is the type mapping engine: a pure function of the declared
//! type and the value-object registry.
//!
//! # Examples
//!
//! ```
//! use apigen_codegen::common::typescript::map_type;
//! use apigen_core::ValueObjectRegistry;
//!
//! let registry: ValueObjectRegistry = ["ArticleId"].into_iter().collect();
//!
//! let mapped = map_type("List<ArticleId>?", &registry);
//! assert_eq!(mapped.target, "number[]");
//! assert!(mapped.nullable);
//!
//! let mapped = map_type("Dictionary<string, List<TagDto>>", &registry);
//! assert_eq!(mapped.target, "Record<string, TagDto[]>");
//! assert!(!mapped.nullable);
//! ```

use apigen_core::{CollectionShape, TypeExpr, ValueObjectRegistry};

/// Target type of identifier value objects.
pub const NUMBER: &str = "number";

/// A mapped target type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    /// TypeScript type expression
    pub target: String,
    /// The declared type carried an outer nullability marker
    pub nullable: bool,
}

/// Maps a declared type expression to TypeScript.
///
/// Unparsable expressions are passed through by their last name segment.
#[must_use]
pub fn map_type(declared: &str, registry: &ValueObjectRegistry) -> MappedType {
    map_expr(&TypeExpr::parse_lossy(declared), registry)
}

/// Maps a parsed type expression to TypeScript.
///
/// Rules, first match wins:
/// 1. an outer `?` (or `Nullable<T>`) is stripped and recorded
/// 2. registered value objects become `number`
/// 3. map types become `Record<K, V>`
/// 4. list types and arrays become `T[]`
/// 5. primitives are looked up; anything else keeps its name
#[must_use]
pub fn map_expr(expr: &TypeExpr, registry: &ValueObjectRegistry) -> MappedType {
    let (inner, nullable) = expr.strip_nullable();
    MappedType {
        target: render(inner, registry),
        nullable,
    }
}

fn render(expr: &TypeExpr, registry: &ValueObjectRegistry) -> String {
    // inner markers such as List<int?> carry no optionality on the target side
    let expr = expr.strip_nullable().0;

    if let Some(name) = expr.base_name()
        && registry.contains(name)
    {
        return NUMBER.to_string();
    }

    match expr.collection_shape() {
        Some(CollectionShape::Map(key, value)) => {
            format!("Record<{}, {}>", render(key, registry), render(value, registry))
        }
        Some(CollectionShape::Sequence(element)) => format!("{}[]", render(element, registry)),
        None => match expr {
            TypeExpr::Named { name, args } => {
                let name = apigen_core::type_expr::base_name(name);
                if let Some(primitive) = primitive(name) {
                    return primitive.to_string();
                }
                if args.is_empty() {
                    return name.to_string();
                }
                let args: Vec<_> = args.iter().map(|a| render(a, registry)).collect();
                format!("{name}<{}>", args.join(", "))
            }
            // arrays are sequences and nullability was stripped above
            TypeExpr::Array(element) | TypeExpr::Nullable(element) => render(element, registry),
        },
    }
}

fn primitive(name: &str) -> Option<&'static str> {
    let target = match name {
        "string" | "String" | "char" | "Char" | "DateTime" | "DateTimeOffset" | "DateOnly"
        | "TimeOnly" | "TimeSpan" | "Guid" => "string",
        "int" | "long" | "short" | "byte" | "sbyte" | "uint" | "ulong" | "ushort" | "float"
        | "double" | "decimal" | "Int32" | "Int64" | "Int16" | "Byte" | "Single" | "Double"
        | "Decimal" => NUMBER,
        "bool" | "Boolean" => "boolean",
        "object" | "Object" | "dynamic" => "unknown",
        "void" => "void",
        _ => return None,
    };
    Some(target)
}

/// Identifiers appearing in a TypeScript type expression, in order.
///
/// Used to work out which generated interfaces an artifact must import.
///
/// # Examples
///
/// ```
/// use apigen_codegen::common::typescript::identifiers;
///
/// let found: Vec<_> = identifiers("Record<string, TagDto[]>").collect();
/// assert_eq!(found, ["Record", "string", "TagDto"]);
/// ```
pub fn identifiers(target: &str) -> impl Iterator<Item = &str> {
    target
        .split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .filter(|word| !word.is_empty())
}

/// Lowercases the first character: `GetArticle` becomes `getArticle`.
///
/// # Examples
///
/// ```
/// use apigen_codegen::common::typescript::to_camel_case;
///
/// assert_eq!(to_camel_case("GetArticle"), "getArticle");
/// assert_eq!(to_camel_case("id"), "id");
/// assert_eq!(to_camel_case(""), "");
/// ```
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// Uppercases the first character: `auth` becomes `Auth`.
///
/// # Examples
///
/// ```
/// use apigen_codegen::common::typescript::to_pascal_case;
///
/// assert_eq!(to_pascal_case("articles"), "Articles");
/// ```
#[must_use]
pub fn to_pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty() -> ValueObjectRegistry {
        ValueObjectRegistry::new()
    }

    #[test]
    fn test_primitives() {
        let registry = empty();
        assert_eq!(map_type("string", &registry).target, "string");
        assert_eq!(map_type("decimal", &registry).target, "number");
        assert_eq!(map_type("long", &registry).target, "number");
        assert_eq!(map_type("bool", &registry).target, "boolean");
        assert_eq!(map_type("DateTime", &registry).target, "string");
        assert_eq!(map_type("Guid", &registry).target, "string");
        assert_eq!(map_type("object", &registry).target, "unknown");
    }

    #[test]
    fn test_unknown_names_pass_through() {
        let mapped = map_type("ArticleDto", &empty());
        assert_eq!(mapped.target, "ArticleDto");
        assert!(!mapped.nullable);
    }

    #[test]
    fn test_nullability_marker_only() {
        assert!(map_type("int?", &empty()).nullable);
        assert!(map_type("Nullable<int>", &empty()).nullable);
        assert!(map_type("ArticleDto?", &empty()).nullable);
        assert!(!map_type("int", &empty()).nullable);
    }

    #[test]
    fn test_inner_nullability_dropped() {
        let mapped = map_type("List<int?>", &empty());
        assert_eq!(mapped.target, "number[]");
        assert!(!mapped.nullable);
    }

    #[test]
    fn test_nested_lists_add_one_marker_per_level() {
        let registry = empty();
        assert_eq!(map_type("List<string>", &registry).target, "string[]");
        assert_eq!(map_type("List<List<string>>", &registry).target, "string[][]");
        assert_eq!(
            map_type("IEnumerable<IReadOnlyList<List<int>>>", &registry).target,
            "number[][][]"
        );
        assert_eq!(map_type("int[]", &registry).target, "number[]");
        assert_eq!(map_type("List<int[]>", &registry).target, "number[][]");
    }

    #[test]
    fn test_maps() {
        let registry: ValueObjectRegistry = ["UserId"].into_iter().collect();
        assert_eq!(
            map_type("Dictionary<string, int>", &registry).target,
            "Record<string, number>"
        );
        assert_eq!(
            map_type("IReadOnlyDictionary<UserId, List<string>>", &registry).target,
            "Record<number, string[]>"
        );
    }

    #[test]
    fn test_value_objects_are_numbers() {
        let registry: ValueObjectRegistry = ["ArticleId", "Slug"].into_iter().collect();
        assert_eq!(map_type("ArticleId", &registry).target, "number");
        assert_eq!(map_type("Slug", &registry).target, "number");

        let mapped = map_type("ArticleId?", &registry);
        assert_eq!(mapped.target, "number");
        assert!(mapped.nullable);
    }

    #[test]
    fn test_qualified_names() {
        assert_eq!(map_type("System.DateTime", &empty()).target, "string");
        assert_eq!(
            map_type("System.Collections.Generic.List<Dto.TagDto>", &empty()).target,
            "TagDto[]"
        );
    }

    #[test]
    fn test_unknown_generic_keeps_mapped_arguments() {
        assert_eq!(
            map_type("PagedResult<ArticleDto>", &empty()).target,
            "PagedResult<ArticleDto>"
        );
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let registry: ValueObjectRegistry = ["TagId"].into_iter().collect();
        let first = map_type("Dictionary<TagId, List<string?>>?", &registry);
        let second = map_type("Dictionary<TagId, List<string?>>?", &registry);
        assert_eq!(first, second);
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(to_camel_case("UserId"), "userId");
        assert_eq!(to_pascal_case("users"), "Users");
        assert_eq!(to_pascal_case(""), "");
    }
}
