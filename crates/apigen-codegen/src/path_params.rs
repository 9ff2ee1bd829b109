//! Route placeholder binding.
//!
//! Each `{placeholder}` of a route is bound to a field of the request
//! object by an ordered list of named rules. The last rule always matches,
//! so resolution never fails; a binding produced by it is a guess and is
//! flagged as such.
//!
//! # Examples
//!
//! ```
//! use apigen_codegen::path_params::PathParamResolver;
//! use apigen_core::route::placeholders;
//! use apigen_core::{SourceClass, SourceProperty, ValueObjectRegistry};
//!
//! let request = SourceClass {
//!     name: "GetArticleRequest".to_string(),
//!     namespace: String::new(),
//!     properties: vec![
//!         SourceProperty::new("Id", "ArticleId"),
//!         SourceProperty::new("ArticleId", "ArticleId"),
//!     ],
//!     source: "GetArticleRequest.cs".into(),
//! };
//! let registry = ValueObjectRegistry::new();
//! let resolver = PathParamResolver::new(&registry);
//!
//! let found = placeholders("/api/articles/{id}");
//! let binding = resolver.resolve(&found[0], Some(&request));
//! assert_eq!(binding.binding, "id");
//! assert_eq!(binding.rule, "exact_property");
//! ```

use crate::common::typescript::to_camel_case;
use apigen_core::route::RoutePlaceholder;
use apigen_core::{SourceClass, ValueObjectRegistry};
use std::fmt;

/// Name of the rule that guesses from the placeholder alone.
pub const PLACEHOLDER_LITERAL: &str = "placeholder_literal";

/// Everything a path-parameter rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct PathParamContext<'a> {
    /// The placeholder being bound
    pub placeholder: &'a RoutePlaceholder,
    /// Request class of the action, if one was resolved
    pub request: Option<&'a SourceClass>,
    /// Identifier value objects
    pub registry: &'a ValueObjectRegistry,
}

impl PathParamContext<'_> {
    fn camel_properties(&self) -> impl Iterator<Item = String> + '_ {
        self.request
            .into_iter()
            .flat_map(|class| class.properties.iter())
            .map(|p| to_camel_case(&p.name))
    }
}

/// A named binding rule.
pub struct PathParamRule {
    /// Name reported in bindings and logs
    pub name: &'static str,
    /// Returns the bound field name on match
    pub apply: fn(&PathParamContext<'_>) -> Option<String>,
}

impl fmt::Debug for PathParamRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathParamRule")
            .field("name", &self.name)
            .finish()
    }
}

/// Binding rules in priority order.
pub const PATH_PARAM_RULES: &[PathParamRule] = &[
    PathParamRule {
        name: "exact_property",
        apply: exact_property,
    },
    PathParamRule {
        name: "sole_id_property",
        apply: sole_id_property,
    },
    PathParamRule {
        name: "value_object_property",
        apply: value_object_property,
    },
    PathParamRule {
        name: PLACEHOLDER_LITERAL,
        apply: placeholder_literal,
    },
];

/// The placeholder names a request property.
fn exact_property(ctx: &PathParamContext<'_>) -> Option<String> {
    let wanted = to_camel_case(&ctx.placeholder.name);
    ctx.camel_properties().find(|p| *p == wanted)
}

/// Exactly one request property ends in `Id`.
fn sole_id_property(ctx: &PathParamContext<'_>) -> Option<String> {
    let mut ids = ctx.camel_properties().filter(|p| p.ends_with("Id"));
    let first = ids.next()?;
    ids.next().is_none().then_some(first)
}

/// The first registered `...Id` value object, camel-cased, that is also a
/// request property.
fn value_object_property(ctx: &PathParamContext<'_>) -> Option<String> {
    let properties: Vec<_> = ctx.camel_properties().collect();
    ctx.registry
        .id_types()
        .map(to_camel_case)
        .find(|candidate| properties.contains(candidate))
}

/// The placeholder itself, camel-cased.
fn placeholder_literal(ctx: &PathParamContext<'_>) -> Option<String> {
    Some(to_camel_case(&ctx.placeholder.name))
}

/// A resolved placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathBinding {
    /// Route segment as written, braces included
    pub segment: String,
    /// Placeholder name
    pub placeholder: String,
    /// Bound field (or positional parameter) name
    pub binding: String,
    /// Rule that produced the binding
    pub rule: &'static str,
}

impl PathBinding {
    /// Returns `true` if no rule found evidence for the binding.
    #[must_use]
    pub fn is_guess(&self) -> bool {
        self.rule == PLACEHOLDER_LITERAL
    }
}

/// Binds placeholders with an ordered rule list.
#[derive(Debug, Clone, Copy)]
pub struct PathParamResolver<'a> {
    registry: &'a ValueObjectRegistry,
    rules: &'a [PathParamRule],
}

impl<'a> PathParamResolver<'a> {
    /// Creates a resolver with the default rules.
    #[must_use]
    pub const fn new(registry: &'a ValueObjectRegistry) -> Self {
        Self::with_rules(registry, PATH_PARAM_RULES)
    }

    /// Creates a resolver with a custom rule list.
    ///
    /// A list that does not end in an always-matching rule falls back to
    /// the camel-cased placeholder.
    #[must_use]
    pub const fn with_rules(registry: &'a ValueObjectRegistry, rules: &'a [PathParamRule]) -> Self {
        Self { registry, rules }
    }

    /// Binds one placeholder.
    #[must_use]
    pub fn resolve(
        &self,
        placeholder: &RoutePlaceholder,
        request: Option<&SourceClass>,
    ) -> PathBinding {
        let ctx = PathParamContext {
            placeholder,
            request,
            registry: self.registry,
        };
        let (rule, binding) = self
            .rules
            .iter()
            .find_map(|rule| (rule.apply)(&ctx).map(|binding| (rule.name, binding)))
            .unwrap_or_else(|| (PLACEHOLDER_LITERAL, to_camel_case(&placeholder.name)));

        tracing::debug!(
            "Bound {} to '{}' via {}",
            placeholder.segment,
            binding,
            rule
        );
        PathBinding {
            segment: placeholder.segment.clone(),
            placeholder: placeholder.name.clone(),
            binding,
            rule,
        }
    }

    /// Binds every placeholder in route order.
    #[must_use]
    pub fn resolve_all(
        &self,
        placeholders: &[RoutePlaceholder],
        request: Option<&SourceClass>,
    ) -> Vec<PathBinding> {
        placeholders
            .iter()
            .map(|p| self.resolve(p, request))
            .collect()
    }
}
