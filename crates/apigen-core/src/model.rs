//! Normalized source model.
//!
//! Everything here is created fresh during extraction and read-only
//! afterwards.

use crate::route::{self, RoutePlaceholder};
use crate::{HttpMethod, TypeExpr};
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Marker used for absent request or response payloads.
pub const VOID: &str = "void";

/// One auto-implemented property of a data class.
///
/// # Examples
///
/// ```
/// use apigen_core::SourceProperty;
///
/// let prop = SourceProperty::new("Tags", "List<string>?");
/// assert!(prop.nullable);
/// assert!(prop.is_collection);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceProperty {
    /// Property name as declared (PascalCase in practice)
    pub name: String,
    /// Type expression as declared, including `?`
    pub declared_type: String,
    /// Declared type carries an outer nullability marker
    pub nullable: bool,
    /// Declared type is list-like
    pub is_collection: bool,
}

impl SourceProperty {
    /// Creates a property, deriving the nullability and collection flags
    /// from the declared type.
    #[must_use]
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        let declared_type = declared_type.into();
        let expr = TypeExpr::parse_lossy(&declared_type);
        Self {
            name: name.into(),
            nullable: expr.is_nullable(),
            is_collection: expr.is_sequence(),
            declared_type,
        }
    }
}

/// One data class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceClass {
    /// Class name
    pub name: String,
    /// Enclosing namespace, empty if none was declared
    pub namespace: String,
    /// Properties in declaration order
    pub properties: Vec<SourceProperty>,
    /// File the class was read from
    pub source: PathBuf,
}

impl SourceClass {
    /// Looks up a property by its declared name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&SourceProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// Name-keyed view over extracted classes.
///
/// Duplicate names are not merged: the class inserted last wins.
#[derive(Debug, Default)]
pub struct ClassIndex<'a> {
    by_name: HashMap<&'a str, &'a SourceClass>,
}

impl<'a> ClassIndex<'a> {
    /// Indexes classes in order.
    #[must_use]
    pub fn new(classes: &'a [SourceClass]) -> Self {
        let by_name = classes.iter().map(|c| (c.name.as_str(), c)).collect();
        Self { by_name }
    }

    /// Looks up a class by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&'a SourceClass> {
        self.by_name.get(name).copied()
    }

    /// Returns `true` if a class of that name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }
}

/// One parameter of an action method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionParameter {
    /// Parameter name
    pub name: String,
    /// Declared type
    pub declared_type: String,
    /// Attribute names, e.g. `FromBody`, `FromRoute`
    pub attributes: Vec<String>,
}

impl ActionParameter {
    /// Returns `true` if the parameter is bound from the request body.
    #[must_use]
    pub fn is_from_body(&self) -> bool {
        self.has_attribute("FromBody")
    }

    /// Returns `true` if the parameter carries the named attribute.
    ///
    /// The `Attribute` suffix is optional on both sides.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        let wanted = name.strip_suffix("Attribute").unwrap_or(name);
        self.attributes
            .iter()
            .any(|a| a.strip_suffix("Attribute").unwrap_or(a) == wanted)
    }
}

/// Normalized record of one HTTP action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointDescriptor {
    /// HTTP verb
    pub http_method: HttpMethod,
    /// Full route, e.g. `/api/article/{id}`
    pub route_template: String,
    /// Action method name
    pub operation_name: String,
    /// Request class name, if one was resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_type: Option<String>,
    /// Response type name, or [`VOID`]
    pub response_type: String,
    /// Request type came from a `[FromBody]` parameter
    pub has_body_parameter: bool,
    /// Lowercased controller name without the `Controller` suffix
    pub controller_name: String,
    /// Action parameters in declaration order
    pub parameters: Vec<ActionParameter>,
    /// Name of the rule that resolved the request type
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_rule: Option<&'static str>,
    /// Name of the rule that resolved the response type
    pub response_rule: &'static str,
    /// Controller file
    pub source: PathBuf,
}

impl EndpointDescriptor {
    /// Placeholders of the route template.
    #[must_use]
    pub fn placeholders(&self) -> Vec<RoutePlaceholder> {
        route::placeholders(&self.route_template)
    }

    /// Resolved request class, ignoring a [`VOID`] marker.
    #[must_use]
    pub fn request_class(&self) -> Option<&str> {
        self.request_type.as_deref().filter(|t| *t != VOID)
    }

    /// Returns `true` if the action returns nothing.
    #[must_use]
    pub fn is_void_response(&self) -> bool {
        self.response_type == VOID
    }

    /// Looks up an action parameter by name, ignoring case.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&ActionParameter> {
        self.parameters
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// An action that was discovered but not emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedOperation {
    /// Action method name
    pub operation_name: String,
    /// Lowercased controller name
    pub controller_name: String,
    /// Why it was skipped
    pub reason: String,
    /// Controller file
    pub source: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(name: &str, props: &[&str]) -> SourceClass {
        SourceClass {
            name: name.to_string(),
            namespace: "NariNoteBackend.Application.Dto".to_string(),
            properties: props.iter().map(|p| SourceProperty::new(*p, "string")).collect(),
            source: PathBuf::from(format!("{name}.cs")),
        }
    }

    #[test]
    fn test_property_flags() {
        let plain = SourceProperty::new("Email", "string");
        assert!(!plain.nullable);
        assert!(!plain.is_collection);

        let inner_nullable = SourceProperty::new("Ids", "List<int?>");
        assert!(!inner_nullable.nullable);
        assert!(inner_nullable.is_collection);
    }

    #[test]
    fn test_class_index_last_wins() {
        let classes = vec![class("TagDto", &["Name"]), class("TagDto", &["Id", "Name"])];
        let index = ClassIndex::new(&classes);
        assert_eq!(index.get("TagDto").unwrap().properties.len(), 2);
        assert!(!index.contains("ArticleDto"));
    }

    #[test]
    fn test_parameter_attributes() {
        let param = ActionParameter {
            name: "request".to_string(),
            declared_type: "LoginRequest".to_string(),
            attributes: vec!["FromBodyAttribute".to_string()],
        };
        assert!(param.is_from_body());
        assert!(!param.has_attribute("FromRoute"));
    }

    #[test]
    fn test_request_class_ignores_void() {
        let descriptor = EndpointDescriptor {
            http_method: HttpMethod::Post,
            route_template: "/api/auth/logout".to_string(),
            operation_name: "Logout".to_string(),
            request_type: Some(VOID.to_string()),
            response_type: VOID.to_string(),
            has_body_parameter: false,
            controller_name: "auth".to_string(),
            parameters: Vec::new(),
            request_rule: None,
            response_rule: "void_fallback",
            source: PathBuf::from("AuthController.cs"),
        };
        assert_eq!(descriptor.request_class(), None);
        assert!(descriptor.is_void_response());
        assert!(descriptor.placeholders().is_empty());
    }
}
