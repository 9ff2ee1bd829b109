//! Call construction shared by the endpoint, hook, and server emitters.
//!
//! Each descriptor is planned once: its signature, URL expression, body
//! style, and the generated interfaces it references. Every emitter renders
//! from the same plan, so the four artifacts always agree.

use crate::common::typescript::{identifiers, map_type, to_camel_case};
use crate::path_params::{PathBinding, PathParamResolver};
use apigen_core::{
    ClassIndex, Diagnostic, EndpointDescriptor, HttpMethod, SourceClass, ValueObjectRegistry,
};
use std::collections::BTreeSet;

/// Type of a placeholder without a matching action parameter.
const DEFAULT_ARGUMENT_TYPE: &str = "string";

/// Name of the request object parameter in emitted functions.
const DATA: &str = "data";

/// A positional parameter of an emitted function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    /// Parameter name
    pub name: String,
    /// TypeScript type
    pub ts_type: String,
}

/// How the request object travels with the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStyle {
    /// Nothing beyond the URL.
    None,
    /// As the call body: `post(url, data)`.
    Body,
    /// As a `DELETE` body: `delete(url, { data })`.
    DeleteBody,
    /// As query parameters: `get(url, { params: data })`.
    QueryParams,
}

/// Everything the emitters need to render one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationPlan {
    /// Lowercased controller name
    pub controller: String,
    /// Action name as declared
    pub operation_name: String,
    /// camelCase function name
    pub function_name: String,
    /// HTTP verb
    pub http_method: HttpMethod,
    /// Request class passed as `data`, if any
    pub request_type: Option<String>,
    /// Positional parameters, used only without a request class
    pub arguments: Vec<Argument>,
    /// TypeScript response type, `void` included
    pub response: String,
    /// Placeholder bindings in route order
    pub bindings: Vec<PathBinding>,
    /// TypeScript expression of the URL
    pub url: String,
    /// Body handling
    pub body: BodyStyle,
    /// Generated interfaces referenced by the signature or response
    pub type_refs: BTreeSet<String>,
}

impl OperationPlan {
    /// Returns `true` for `GET` operations.
    #[must_use]
    pub fn is_query(&self) -> bool {
        self.http_method.is_query()
    }

    /// Returns `true` if the response is `void`.
    #[must_use]
    pub fn is_void(&self) -> bool {
        self.response == apigen_core::VOID
    }

    /// Parameter list: `data: LoginRequest`, `id: number, slug: string`,
    /// or empty.
    #[must_use]
    pub fn signature(&self) -> String {
        match &self.request_type {
            Some(request) => format!("{DATA}: {request}"),
            None => self
                .arguments
                .iter()
                .map(|a| format!("{}: {}", a.name, a.ts_type))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }

    /// Argument list forwarding the signature: `data`, `id, slug`, or
    /// empty.
    #[must_use]
    pub fn call_arguments(&self) -> String {
        if self.request_type.is_some() {
            return DATA.to_string();
        }
        self.arguments
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Object type of the positional arguments: `{ id: number; slug:
    /// string }`.
    #[must_use]
    pub fn arguments_object_type(&self) -> String {
        let fields: Vec<_> = self
            .arguments
            .iter()
            .map(|a| format!("{}: {}", a.name, a.ts_type))
            .collect();
        format!("{{ {} }}", fields.join("; "))
    }

    /// HTTP client call, e.g. `apiClient.post<LoginResponse>('/api/auth',
    /// data)`.
    #[must_use]
    pub fn client_call(&self, client: &str) -> String {
        let generic = if self.is_void() {
            String::new()
        } else {
            format!("<{}>", self.response)
        };
        let body = match self.body {
            BodyStyle::None => String::new(),
            BodyStyle::Body => format!(", {DATA}"),
            BodyStyle::DeleteBody => format!(", {{ {DATA} }}"),
            BodyStyle::QueryParams => format!(", {{ params: {DATA} }}"),
        };
        format!(
            "{client}.{}{generic}({}{body})",
            self.http_method.client_method(),
            self.url
        )
    }

    /// Server-side fetch call, e.g. `serverFetch<TagDto[]>('/api/tags')`.
    #[must_use]
    pub fn server_call(&self, fetch: &str) -> String {
        let target = match self.body {
            BodyStyle::QueryParams => format!("withQuery({}, {DATA})", self.url),
            _ => self.url.clone(),
        };
        format!("{fetch}<{}>({target})", self.response)
    }
}

/// Plans operations against the extracted classes.
#[derive(Debug)]
pub struct Planner<'a> {
    classes: ClassIndex<'a>,
    registry: &'a ValueObjectRegistry,
    resolver: PathParamResolver<'a>,
}

impl<'a> Planner<'a> {
    /// Creates a planner with the default path-parameter rules.
    #[must_use]
    pub fn new(classes: &'a [SourceClass], registry: &'a ValueObjectRegistry) -> Self {
        Self {
            classes: ClassIndex::new(classes),
            registry,
            resolver: PathParamResolver::new(registry),
        }
    }

    /// Plans one descriptor.
    ///
    /// Placeholders bound by guesswork while a request class is in play
    /// are reported as [`AmbiguousPathParam`](apigen_core::DiagnosticKind)
    /// diagnostics.
    #[must_use]
    pub fn plan(&self, descriptor: &EndpointDescriptor) -> (OperationPlan, Vec<Diagnostic>) {
        let request_type = descriptor.request_class().map(ToString::to_string);
        let request_class = request_type.as_deref().and_then(|r| self.classes.get(r));

        let bindings = self
            .resolver
            .resolve_all(&descriptor.placeholders(), request_class);

        let mut diagnostics = Vec::new();
        if request_type.is_some() {
            for binding in bindings.iter().filter(|b| b.is_guess()) {
                tracing::warn!(
                    "{}.{}: guessed '{}' for {}",
                    descriptor.controller_name,
                    descriptor.operation_name,
                    binding.binding,
                    binding.segment
                );
                diagnostics.push(Diagnostic::ambiguous_path_param(
                    &descriptor.source,
                    &descriptor.operation_name,
                    &binding.placeholder,
                ));
            }
        }

        let arguments = if request_type.is_some() {
            Vec::new()
        } else {
            self.positional_arguments(descriptor, &bindings)
        };

        let response = if descriptor.is_void_response() {
            apigen_core::VOID.to_string()
        } else {
            map_type(&descriptor.response_type, self.registry).target
        };

        let url = url_expression(&descriptor.route_template, &bindings, request_type.is_some());
        let body = body_style(descriptor, request_type.is_some(), bindings.is_empty());

        let mut type_refs = BTreeSet::new();
        let referenced = request_type
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(response.as_str()))
            .chain(arguments.iter().map(|a| a.ts_type.as_str()));
        for target in referenced {
            type_refs.extend(
                identifiers(target)
                    .filter(|name| self.classes.contains(name))
                    .map(ToString::to_string),
            );
        }

        let plan = OperationPlan {
            controller: descriptor.controller_name.clone(),
            operation_name: descriptor.operation_name.clone(),
            function_name: to_camel_case(&descriptor.operation_name),
            http_method: descriptor.http_method,
            request_type,
            arguments,
            response,
            bindings,
            url,
            body,
            type_refs,
        };
        (plan, diagnostics)
    }

    fn positional_arguments(
        &self,
        descriptor: &EndpointDescriptor,
        bindings: &[PathBinding],
    ) -> Vec<Argument> {
        let mut arguments: Vec<Argument> = Vec::new();
        for binding in bindings {
            if arguments.iter().any(|a| a.name == binding.binding) {
                continue;
            }
            let ts_type = descriptor.parameter(&binding.placeholder).map_or_else(
                || DEFAULT_ARGUMENT_TYPE.to_string(),
                |p| map_type(&p.declared_type, self.registry).target,
            );
            arguments.push(Argument {
                name: binding.binding.clone(),
                ts_type,
            });
        }
        arguments
    }
}

/// Quoted route, or a template literal interpolating each binding.
fn url_expression(route: &str, bindings: &[PathBinding], from_data: bool) -> String {
    if bindings.is_empty() {
        return format!("'{route}'");
    }
    let mut url = route.to_string();
    for binding in bindings {
        let value = if from_data {
            format!("${{{DATA}.{}}}", binding.binding)
        } else {
            format!("${{{}}}", binding.binding)
        };
        url = url.replacen(&binding.segment, &value, 1);
    }
    format!("`{url}`")
}

fn body_style(descriptor: &EndpointDescriptor, has_request: bool, no_bindings: bool) -> BodyStyle {
    let sends_body = has_request && (descriptor.has_body_parameter || no_bindings);
    match descriptor.http_method {
        HttpMethod::Get if has_request && no_bindings => BodyStyle::QueryParams,
        HttpMethod::Get => BodyStyle::None,
        HttpMethod::Delete if sends_body => BodyStyle::DeleteBody,
        HttpMethod::Post | HttpMethod::Put if sends_body => BodyStyle::Body,
        HttpMethod::Post | HttpMethod::Put | HttpMethod::Delete => BodyStyle::None,
    }
}
