//! Endpoint descriptor building.
//!
//! Request and response types are inferred by two ordered rule lists. Each
//! rule is a named function that either matches and returns a value or
//! declines; the first match wins. The name of the winning rule is kept on
//! the descriptor so verbose output can explain every inference.
//!
//! # Examples
//!
//! ```
//! use apigen_extractor::descriptor::{DescriptorBuilder, Resolution, TypeNames};
//! use apigen_extractor::grammar::endpoint::parse_controller;
//! use apigen_extractor::lexer::tokenize;
//! use std::path::Path;
//!
//! let tokens = tokenize(
//!     "public class AuthController {
//!         [HttpPost(\"logout\")]
//!         public async Task<IActionResult> Logout() { return NoContent(); }
//!     }",
//! );
//! let controller = parse_controller(&tokens, Path::new("AuthController.cs")).unwrap();
//! let names = TypeNames::default();
//! let builder = DescriptorBuilder::new(&names);
//!
//! let Resolution::Resolved(descriptor) = builder.resolve(&controller, &controller.endpoints[0])
//! else {
//!     panic!("logout resolves to void");
//! };
//! assert_eq!(descriptor.response_type, "void");
//! assert_eq!(descriptor.route_template, "/api/auth/logout");
//! ```

use crate::grammar::endpoint::{ControllerSource, RawEndpoint};
use apigen_core::route::{join_route, placeholders};
use apigen_core::type_expr::base_name;
use apigen_core::{
    EndpointDescriptor, HttpMethod, SkippedOperation, SourceClass, TypeExpr, VOID,
};
use std::collections::BTreeSet;
use std::fmt;

/// Reason recorded for actions without a resolvable response type.
pub const NO_RESPONSE_TYPE: &str = "no response type found";

/// Operation names that return nothing even without a `DELETE` verb.
const VOID_OPERATIONS: &[&str] = &["logout", "signout"];

/// Names of discovered request and response classes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeNames {
    requests: BTreeSet<String>,
    responses: BTreeSet<String>,
}

impl TypeNames {
    /// Classifies classes by their `Request` / `Response` name suffix.
    #[must_use]
    pub fn from_classes(classes: &[SourceClass]) -> Self {
        let mut names = Self::default();
        for class in classes {
            if class.name.ends_with("Request") {
                names.requests.insert(class.name.clone());
            } else if class.name.ends_with("Response") {
                names.responses.insert(class.name.clone());
            }
        }
        names
    }

    /// Returns `true` if a request class of that name was discovered.
    #[must_use]
    pub fn is_request(&self, name: &str) -> bool {
        self.requests.contains(name)
    }

    /// Returns `true` if a response class of that name was discovered.
    #[must_use]
    pub fn is_response(&self, name: &str) -> bool {
        self.responses.contains(name)
    }

    /// Number of distinct request class names.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    /// Number of distinct response class names.
    #[must_use]
    pub fn response_count(&self) -> usize {
        self.responses.len()
    }
}

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct ActionContext<'a> {
    /// The action being resolved
    pub endpoint: &'a RawEndpoint,
    /// Its full route
    pub route: &'a str,
    /// Discovered request and response class names
    pub names: &'a TypeNames,
}

impl ActionContext<'_> {
    fn has_placeholders(&self) -> bool {
        !placeholders(self.route).is_empty()
    }

    /// A `[FromBody]` parameter of a `*Request` type.
    fn has_body_parameter(&self) -> bool {
        explicit_body_parameter(self).is_some()
    }
}

/// A request type match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestMatch {
    /// Request class name
    pub request_type: String,
    /// Came from a `[FromBody]` parameter
    pub has_body_parameter: bool,
}

/// A named inference rule.
pub struct Rule<T> {
    /// Name reported in descriptors and logs
    pub name: &'static str,
    /// Returns `Some` on match
    pub apply: fn(&ActionContext<'_>) -> Option<T>,
}

impl<T> fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Request rules in priority order.
pub const REQUEST_RULES: &[Rule<RequestMatch>] = &[
    Rule {
        name: "explicit_body_parameter",
        apply: explicit_body_parameter,
    },
    Rule {
        name: "naming_convention",
        apply: request_by_naming_convention,
    },
];

/// Response rules in priority order.
pub const RESPONSE_RULES: &[Rule<String>] = &[
    Rule {
        name: "explicit_generic",
        apply: explicit_generic_response,
    },
    Rule {
        name: "naming_convention",
        apply: response_by_naming_convention,
    },
    Rule {
        name: "void_fallback",
        apply: void_fallback,
    },
];

/// A `[FromBody]` parameter whose type name ends in `Request`.
fn explicit_body_parameter(ctx: &ActionContext<'_>) -> Option<RequestMatch> {
    ctx.endpoint
        .parameters
        .iter()
        .filter(|p| p.is_from_body())
        .find_map(|p| {
            let expr = TypeExpr::parse_lossy(&p.declared_type);
            let TypeExpr::Named { name, args } = expr.strip_nullable().0 else {
                return None;
            };
            let name = base_name(name);
            (args.is_empty() && name.ends_with("Request")).then(|| RequestMatch {
                request_type: name.to_string(),
                has_body_parameter: true,
            })
        })
}

/// `{Operation}Request`, if such a class exists and the action has route
/// placeholders, is a `GET`, or binds a `*Request` body.
///
/// A body of any other type does not qualify; the client would otherwise
/// send the convention class to an action expecting a different shape.
fn request_by_naming_convention(ctx: &ActionContext<'_>) -> Option<RequestMatch> {
    let candidate = format!("{}Request", ctx.endpoint.operation_name);
    if !ctx.names.is_request(&candidate) {
        return None;
    }
    let applies = ctx.has_body_parameter()
        || ctx.has_placeholders()
        || ctx.endpoint.http_method.is_query();
    applies.then_some(RequestMatch {
        request_type: candidate,
        has_body_parameter: false,
    })
}

/// The type argument of the declared `ActionResult<T>` return.
fn explicit_generic_response(ctx: &ActionContext<'_>) -> Option<String> {
    ctx.endpoint.explicit_response.clone()
}

/// `{Operation}Response`, if such a class exists.
fn response_by_naming_convention(ctx: &ActionContext<'_>) -> Option<String> {
    let candidate = format!("{}Response", ctx.endpoint.operation_name);
    ctx.names.is_response(&candidate).then_some(candidate)
}

/// `void` for `DELETE` actions and for logout/signout.
fn void_fallback(ctx: &ActionContext<'_>) -> Option<String> {
    let operation = ctx.endpoint.operation_name.to_lowercase();
    let is_void = ctx.endpoint.http_method == HttpMethod::Delete
        || VOID_OPERATIONS.contains(&operation.as_str());
    is_void.then(|| VOID.to_string())
}

fn first_match<T>(rules: &[Rule<T>], ctx: &ActionContext<'_>) -> Option<(&'static str, T)> {
    rules
        .iter()
        .find_map(|rule| (rule.apply)(ctx).map(|value| (rule.name, value)))
}

/// Outcome for one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The action will be emitted.
    Resolved(EndpointDescriptor),
    /// The action was discovered but will not be emitted.
    Skipped(SkippedOperation),
}

/// Descriptors and skips for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuiltEndpoints {
    /// Resolved descriptors in controller, then source, order
    pub descriptors: Vec<EndpointDescriptor>,
    /// Skipped actions in the same order
    pub skipped: Vec<SkippedOperation>,
}

/// Turns raw actions into descriptors.
#[derive(Debug, Clone, Copy)]
pub struct DescriptorBuilder<'a> {
    names: &'a TypeNames,
    request_rules: &'a [Rule<RequestMatch>],
    response_rules: &'a [Rule<String>],
}

impl<'a> DescriptorBuilder<'a> {
    /// Creates a builder with the default rule lists.
    #[must_use]
    pub const fn new(names: &'a TypeNames) -> Self {
        Self::with_rules(names, REQUEST_RULES, RESPONSE_RULES)
    }

    /// Creates a builder with custom rule lists.
    #[must_use]
    pub const fn with_rules(
        names: &'a TypeNames,
        request_rules: &'a [Rule<RequestMatch>],
        response_rules: &'a [Rule<String>],
    ) -> Self {
        Self {
            names,
            request_rules,
            response_rules,
        }
    }

    /// Resolves one action.
    ///
    /// Every action yields exactly one descriptor or one skip.
    #[must_use]
    pub fn resolve(&self, controller: &ControllerSource, endpoint: &RawEndpoint) -> Resolution {
        let route = join_route(&controller.controller_name, endpoint.route.as_deref());
        let ctx = ActionContext {
            endpoint,
            route: &route,
            names: self.names,
        };

        let request = first_match(self.request_rules, &ctx);
        let Some((response_rule, response_type)) = first_match(self.response_rules, &ctx) else {
            tracing::debug!(
                "Skipping {}.{}: {NO_RESPONSE_TYPE}",
                controller.controller_name,
                endpoint.operation_name
            );
            return Resolution::Skipped(SkippedOperation {
                operation_name: endpoint.operation_name.clone(),
                controller_name: controller.controller_name.clone(),
                reason: NO_RESPONSE_TYPE.to_string(),
                source: controller.source.clone(),
            });
        };

        let (request_rule, request_type, has_body_parameter) = match request {
            Some((rule, found)) => (Some(rule), Some(found.request_type), found.has_body_parameter),
            None => (None, None, false),
        };
        tracing::debug!(
            "{} {} -> {}.{} (request: {} via {}, response: {} via {})",
            endpoint.http_method,
            route,
            controller.controller_name,
            endpoint.operation_name,
            request_type.as_deref().unwrap_or("none"),
            request_rule.unwrap_or("-"),
            response_type,
            response_rule
        );

        Resolution::Resolved(EndpointDescriptor {
            http_method: endpoint.http_method,
            route_template: route,
            operation_name: endpoint.operation_name.clone(),
            request_type,
            response_type,
            has_body_parameter,
            controller_name: controller.controller_name.clone(),
            parameters: endpoint.parameters.clone(),
            request_rule,
            response_rule,
            source: controller.source.clone(),
        })
    }

    /// Resolves every action of every controller.
    #[must_use]
    pub fn build(&self, controllers: &[ControllerSource]) -> BuiltEndpoints {
        let mut built = BuiltEndpoints::default();
        for controller in controllers {
            for endpoint in &controller.endpoints {
                match self.resolve(controller, endpoint) {
                    Resolution::Resolved(descriptor) => built.descriptors.push(descriptor),
                    Resolution::Skipped(skipped) => built.skipped.push(skipped),
                }
            }
        }
        built
    }
}
