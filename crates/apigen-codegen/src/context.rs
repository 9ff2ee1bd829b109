//! Template contexts.
//!
//! Contexts carry finished TypeScript fragments; templates only lay them
//! out. Groups are keyed by controller in sorted order and keep source order
//! within a controller.

use crate::common::typescript::{map_type, to_camel_case, to_pascal_case};
use crate::plan::{BodyStyle, OperationPlan};
use apigen_core::{SourceClass, ValueObjectRegistry};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Two-line marker at the top of every artifact.
pub const HEADER: &str = "// Auto-generated by apigen\n// Do not edit manually";

/// Identifier of the HTTP client imported by the endpoint artifact.
pub const API_CLIENT: &str = "apiClient";

/// Name of the fetch helper declared by the server artifact.
pub const SERVER_FETCH: &str = "serverFetch";

/// Context of the types artifact.
#[derive(Debug, Clone, Serialize)]
pub struct TypesContext {
    /// Artifact header
    pub header: &'static str,
    /// Interfaces sorted by name
    pub interfaces: Vec<InterfaceContext>,
}

/// One interface.
#[derive(Debug, Clone, Serialize)]
pub struct InterfaceContext {
    /// Interface name
    pub name: String,
    /// Field declarations without the trailing `;`, in declaration order
    pub fields: Vec<String>,
}

/// Context of the endpoint-call artifact.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointsContext {
    /// Artifact header
    pub header: &'static str,
    /// Module exporting `apiClient`
    pub client_module: String,
    /// Module exporting the interfaces
    pub types_module: String,
    /// Interfaces referenced, sorted
    pub type_imports: Vec<String>,
    /// One object per controller
    pub groups: Vec<EndpointGroup>,
}

/// The `{controller}Api` object.
#[derive(Debug, Clone, Serialize)]
pub struct EndpointGroup {
    /// Comment title, e.g. `Auth`
    pub title: String,
    /// Exported object name, e.g. `authApi`
    pub object_name: String,
    /// Functions in source order
    pub operations: Vec<CallContext>,
}

/// One call function, shared by the endpoint and server artifacts.
#[derive(Debug, Clone, Serialize)]
pub struct CallContext {
    /// camelCase function name
    pub function_name: String,
    /// Parameter list
    pub signature: String,
    /// Response type inside `Promise<..>`
    pub response: String,
    /// The awaited call expression
    pub call: String,
    /// The call resolves to a payload worth returning
    pub returns_data: bool,
}

/// Context of the hooks artifact.
#[derive(Debug, Clone, Serialize)]
pub struct HooksContext {
    /// Artifact header
    pub header: &'static str,
    /// Named imports from `@tanstack/react-query`
    pub react_query_imports: String,
    /// Endpoint objects imported from the endpoint artifact
    pub api_objects: String,
    /// Module of the endpoint artifact
    pub endpoints_module: String,
    /// Module exporting the interfaces
    pub types_module: String,
    /// Interfaces referenced, sorted
    pub type_imports: Vec<String>,
    /// Query keys per controller with at least one query
    pub query_keys: Vec<QueryKeyGroup>,
    /// Hooks per controller
    pub groups: Vec<HookGroup>,
}

/// Query keys of one controller.
#[derive(Debug, Clone, Serialize)]
pub struct QueryKeyGroup {
    /// Controller name
    pub controller: String,
    /// One key per query operation
    pub entries: Vec<QueryKeyEntry>,
}

/// `getArticle: ['articles', 'getArticle'] as const`.
#[derive(Debug, Clone, Serialize)]
pub struct QueryKeyEntry {
    /// Function name
    pub name: String,
    /// Key tuple expression
    pub tuple: String,
}

/// Hooks of one controller.
#[derive(Debug, Clone, Serialize)]
pub struct HookGroup {
    /// Comment title
    pub title: String,
    /// Hooks in source order
    pub hooks: Vec<HookContext>,
}

/// One `use*` hook.
#[derive(Debug, Clone, Serialize)]
pub struct HookContext {
    /// `use` + operation name
    pub hook_name: String,
    /// Query (GET) or mutation
    pub is_query: bool,
    /// Full parameter list, `options` included
    pub params: String,
    /// Query key expression; empty for mutations
    pub query_key: String,
    /// Query function expression; empty for mutations
    pub query_fn: String,
    /// Mutation function expression; empty for queries
    pub mutation_fn: String,
}

/// Context of the server-only artifact.
#[derive(Debug, Clone, Serialize)]
pub struct ServerContext {
    /// Artifact header
    pub header: &'static str,
    /// Module exporting the interfaces
    pub types_module: String,
    /// Interfaces referenced, sorted
    pub type_imports: Vec<String>,
    /// Emit the query-string helper
    pub needs_query_helper: bool,
    /// One object per controller with GET operations
    pub groups: Vec<EndpointGroup>,
}

/// Builds the types context.
///
/// Interfaces are sorted by name; classes sharing a name keep their
/// extraction order.
#[must_use]
pub fn types_context(classes: &[SourceClass], registry: &ValueObjectRegistry) -> TypesContext {
    let mut sorted: Vec<&SourceClass> = classes.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));

    let interfaces = sorted
        .into_iter()
        .map(|class| InterfaceContext {
            name: class.name.clone(),
            fields: class
                .properties
                .iter()
                .map(|p| {
                    let mapped = map_type(&p.declared_type, registry);
                    let optional = if mapped.nullable { "?" } else { "" };
                    format!("{}{optional}: {}", to_camel_case(&p.name), mapped.target)
                })
                .collect(),
        })
        .collect();

    TypesContext {
        header: HEADER,
        interfaces,
    }
}

/// Module names the emitted artifacts import from each other.
#[derive(Debug, Clone)]
pub struct Modules {
    /// HTTP client module
    pub client: String,
    /// Types artifact
    pub types: String,
    /// Endpoint artifact
    pub endpoints: String,
}

/// Builds the endpoint-call context.
#[must_use]
pub fn endpoints_context(plans: &[OperationPlan], modules: &Modules) -> EndpointsContext {
    let groups = by_controller(plans.iter())
        .into_iter()
        .map(|(controller, ops)| EndpointGroup {
            title: to_pascal_case(controller),
            object_name: api_object(controller),
            operations: ops
                .into_iter()
                .map(|plan| CallContext {
                    function_name: plan.function_name.clone(),
                    signature: plan.signature(),
                    response: plan.response.clone(),
                    call: plan.client_call(API_CLIENT),
                    returns_data: !plan.is_void(),
                })
                .collect(),
        })
        .collect();

    EndpointsContext {
        header: HEADER,
        client_module: modules.client.clone(),
        types_module: modules.types.clone(),
        type_imports: type_imports(plans.iter()),
        groups,
    }
}

/// Builds the hooks context.
#[must_use]
pub fn hooks_context(plans: &[OperationPlan], modules: &Modules) -> HooksContext {
    let grouped = by_controller(plans.iter());

    let query_keys = grouped
        .iter()
        .filter_map(|(controller, ops)| {
            let entries: Vec<_> = ops
                .iter()
                .filter(|plan| plan.is_query())
                .map(|plan| QueryKeyEntry {
                    name: plan.function_name.clone(),
                    tuple: format!("['{controller}', '{}'] as const", plan.function_name),
                })
                .collect();
            (!entries.is_empty()).then(|| QueryKeyGroup {
                controller: (*controller).to_string(),
                entries,
            })
        })
        .collect();

    let groups = grouped
        .iter()
        .map(|(controller, ops)| HookGroup {
            title: to_pascal_case(controller),
            hooks: ops.iter().map(|plan| hook_context(plan)).collect(),
        })
        .collect();

    let api_objects = grouped
        .keys()
        .map(|c| api_object(c))
        .collect::<Vec<_>>()
        .join(", ");

    HooksContext {
        header: HEADER,
        react_query_imports: react_query_imports(plans),
        api_objects,
        endpoints_module: modules.endpoints.clone(),
        types_module: modules.types.clone(),
        type_imports: type_imports(plans.iter()),
        query_keys,
        groups,
    }
}

/// Builds the server-only context from the GET plans.
#[must_use]
pub fn server_context(plans: &[OperationPlan], modules: &Modules) -> ServerContext {
    let queries = || plans.iter().filter(|plan| plan.is_query());

    let groups = by_controller(queries())
        .into_iter()
        .map(|(controller, ops)| EndpointGroup {
            title: to_pascal_case(controller),
            object_name: format!("{controller}ServerApi"),
            operations: ops
                .into_iter()
                .map(|plan| CallContext {
                    function_name: plan.function_name.clone(),
                    signature: plan.signature(),
                    response: plan.response.clone(),
                    call: plan.server_call(SERVER_FETCH),
                    returns_data: true,
                })
                .collect(),
        })
        .collect();

    ServerContext {
        header: HEADER,
        types_module: modules.types.clone(),
        type_imports: type_imports(queries()),
        needs_query_helper: queries().any(|plan| plan.body == BodyStyle::QueryParams),
        groups,
    }
}

/// Name of the hook exported for an operation.
#[must_use]
pub fn hook_name(plan: &OperationPlan) -> String {
    format!("use{}", to_pascal_case(&plan.operation_name))
}

/// Hook names exported by more than one operation, with the controllers
/// exporting them.
#[must_use]
pub fn duplicate_hooks(plans: &[OperationPlan]) -> BTreeMap<String, Vec<&str>> {
    let mut exports: BTreeMap<String, Vec<&str>> = BTreeMap::new();
    for plan in plans {
        exports
            .entry(hook_name(plan))
            .or_default()
            .push(plan.controller.as_str());
    }
    exports.retain(|_, controllers| controllers.len() > 1);
    exports
}

fn hook_context(plan: &OperationPlan) -> HookContext {
    let api = api_object(&plan.controller);
    let hook_name = hook_name(plan);

    if plan.is_query() {
        let signature = plan.signature();
        let arguments = plan.call_arguments();
        let base_key = format!("queryKeys.{}.{}", plan.controller, plan.function_name);
        let query_key = if arguments.is_empty() {
            base_key
        } else {
            format!("[...{base_key}, {arguments}] as const")
        };
        let options = format!(
            "options?: Omit<UseQueryOptions<{}, Error>, 'queryKey' | 'queryFn'>",
            plan.response
        );
        let params = if signature.is_empty() {
            options
        } else {
            format!("{signature}, {options}")
        };
        return HookContext {
            hook_name,
            is_query: true,
            params,
            query_key,
            query_fn: format!("() => {api}.{}({arguments})", plan.function_name),
            mutation_fn: String::new(),
        };
    }

    let (variables, mutation_fn) = match (&plan.request_type, plan.arguments.is_empty()) {
        (Some(request), _) => (request.clone(), format!("{api}.{}", plan.function_name)),
        (None, true) => ("void".to_string(), format!("{api}.{}", plan.function_name)),
        (None, false) => {
            let object_type = plan.arguments_object_type();
            let arguments = plan.call_arguments();
            (
                object_type.clone(),
                format!(
                    "({{ {arguments} }}: {object_type}) => {api}.{}({arguments})",
                    plan.function_name
                ),
            )
        }
    };

    HookContext {
        hook_name,
        is_query: false,
        params: format!(
            "options?: Omit<UseMutationOptions<{}, Error, {variables}>, 'mutationFn'>",
            plan.response
        ),
        query_key: String::new(),
        query_fn: String::new(),
        mutation_fn,
    }
}

fn react_query_imports(plans: &[OperationPlan]) -> String {
    let has_query = plans.iter().any(OperationPlan::is_query);
    let has_mutation = plans.iter().any(|plan| !plan.is_query());

    let mut imports = Vec::new();
    if has_mutation {
        imports.push("useMutation");
    }
    if has_query {
        imports.push("useQuery");
    }
    if has_mutation {
        imports.push("type UseMutationOptions");
    }
    if has_query {
        imports.push("type UseQueryOptions");
    }
    imports.join(", ")
}

fn api_object(controller: &str) -> String {
    format!("{controller}Api")
}

fn type_imports<'p>(plans: impl Iterator<Item = &'p OperationPlan>) -> Vec<String> {
    plans
        .flat_map(|plan| plan.type_refs.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn by_controller<'p>(
    plans: impl Iterator<Item = &'p OperationPlan>,
) -> BTreeMap<&'p str, Vec<&'p OperationPlan>> {
    let mut grouped: BTreeMap<&str, Vec<&OperationPlan>> = BTreeMap::new();
    for plan in plans {
        grouped.entry(plan.controller.as_str()).or_default().push(plan);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use apigen_core::SourceProperty;
    use std::path::PathBuf;

    fn class(name: &str, props: &[(&str, &str)]) -> SourceClass {
        SourceClass {
            name: name.to_string(),
            namespace: String::new(),
            properties: props
                .iter()
                .map(|(n, t)| SourceProperty::new(*n, *t))
                .collect(),
            source: PathBuf::from(format!("{name}.cs")),
        }
    }

    #[test]
    fn test_types_context_sorted_and_camel_cased() {
        let classes = vec![
            class("LoginResponse", &[("Token", "string")]),
            class("ArticleDto", &[("Id", "ArticleId"), ("PublishedAt", "DateTime?")]),
        ];
        let registry: ValueObjectRegistry = ["ArticleId"].into_iter().collect();
        let context = types_context(&classes, &registry);

        let names: Vec<_> = context.interfaces.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["ArticleDto", "LoginResponse"]);
        assert_eq!(
            context.interfaces[0].fields,
            ["id: number", "publishedAt?: string"]
        );
    }

    #[test]
    fn test_react_query_imports_follow_usage() {
        assert_eq!(react_query_imports(&[]), "");
    }
}
