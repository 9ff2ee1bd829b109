//! Artifact generation.
//!
//! [`ApiGenerator`] renders the four artifacts from an extracted model.
//! Each artifact is rendered only when it has input: the types artifact
//! needs classes, the endpoint and hook artifacts need descriptors, and the
//! server-only artifact needs at least one `GET` descriptor.
//!
//! # Examples
//!
//! ```
//! use apigen_codegen::{ApiGenerator, GenerationInput};
//! use apigen_core::{ArtifactKind, GeneratorConfig, SourceClass, SourceProperty, ValueObjectRegistry};
//!
//! let classes = vec![SourceClass {
//!     name: "TagDto".to_string(),
//!     namespace: String::new(),
//!     properties: vec![SourceProperty::new("Name", "string")],
//!     source: "TagDto.cs".into(),
//! }];
//! let registry = ValueObjectRegistry::new();
//! let input = GenerationInput {
//!     classes: &classes,
//!     descriptors: &[],
//!     registry: &registry,
//! };
//!
//! let generator = ApiGenerator::new(&GeneratorConfig::default()).unwrap();
//! let generation = generator.generate(&input).unwrap();
//!
//! assert_eq!(generation.code.file_count(), 1);
//! let types = generation.code.file(ArtifactKind::Types).unwrap();
//! assert!(types.content.contains("  name: string;"));
//! ```

use crate::common::{GeneratedCode, GeneratedFile};
use crate::context::{self, Modules};
use crate::plan::{OperationPlan, Planner};
use crate::template_engine::{
    ENDPOINTS_TEMPLATE, HOOKS_TEMPLATE, SERVER_TEMPLATE, TYPES_TEMPLATE, TemplateEngine,
};
use apigen_core::{
    ArtifactKind, Diagnostic, EndpointDescriptor, GeneratorConfig, Result, SourceClass,
    ValueObjectRegistry,
};

/// The extracted model handed to the generator.
#[derive(Debug, Clone, Copy)]
pub struct GenerationInput<'a> {
    /// Classes from all class roots, in extraction order
    pub classes: &'a [SourceClass],
    /// Resolved descriptors, in controller then source order
    pub descriptors: &'a [EndpointDescriptor],
    /// Identifier value objects
    pub registry: &'a ValueObjectRegistry,
}

/// Rendered artifacts plus what rendering noticed.
#[derive(Debug, Clone, Default)]
pub struct Generation {
    /// Artifacts in emission order
    pub code: GeneratedCode,
    /// Path-parameter guesses and hook name collisions
    pub diagnostics: Vec<Diagnostic>,
}

/// Renders the artifacts.
#[derive(Debug)]
pub struct ApiGenerator<'a> {
    engine: TemplateEngine<'a>,
    modules: Modules,
}

impl ApiGenerator<'_> {
    /// Creates a generator for a configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in templates fail to register.
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let engine = TemplateEngine::new()?;
        let modules = Modules {
            client: config.api_client_module.clone(),
            types: config.outputs.module_specifier(ArtifactKind::Types),
            endpoints: config.outputs.module_specifier(ArtifactKind::Endpoints),
        };
        Ok(Self { engine, modules })
    }

    /// Renders every artifact that has input.
    ///
    /// # Errors
    ///
    /// Returns an error if a template fails to render.
    pub fn generate(&self, input: &GenerationInput<'_>) -> Result<Generation> {
        tracing::info!(
            "Generating artifacts for {} classes and {} endpoints",
            input.classes.len(),
            input.descriptors.len()
        );

        let mut generation = Generation::default();

        if input.classes.is_empty() {
            tracing::info!("No classes, skipping {}", ArtifactKind::Types);
        } else {
            let context = context::types_context(input.classes, input.registry);
            let text = self.engine.render(TYPES_TEMPLATE, &context)?;
            generation.code.add_file(GeneratedFile::new(ArtifactKind::Types, text));
        }

        let planner = Planner::new(input.classes, input.registry);
        let mut plans = Vec::with_capacity(input.descriptors.len());
        for descriptor in input.descriptors {
            let (plan, diagnostics) = planner.plan(descriptor);
            plans.push(plan);
            generation.diagnostics.extend(diagnostics);
        }
        for (hook, controllers) in context::duplicate_hooks(&plans) {
            tracing::warn!("{hook} is exported by {}", controllers.join(", "));
            generation
                .diagnostics
                .push(Diagnostic::duplicate_hook_name(&hook, &controllers));
        }

        if plans.is_empty() {
            tracing::info!(
                "No endpoints, skipping {} and {}",
                ArtifactKind::Endpoints,
                ArtifactKind::Hooks
            );
        } else {
            let context = context::endpoints_context(&plans, &self.modules);
            let text = self.engine.render(ENDPOINTS_TEMPLATE, &context)?;
            generation
                .code
                .add_file(GeneratedFile::new(ArtifactKind::Endpoints, text));

            let context = context::hooks_context(&plans, &self.modules);
            let text = self.engine.render(HOOKS_TEMPLATE, &context)?;
            generation.code.add_file(GeneratedFile::new(ArtifactKind::Hooks, text));
        }

        if plans.iter().any(OperationPlan::is_query) {
            let context = context::server_context(&plans, &self.modules);
            let text = self.engine.render(SERVER_TEMPLATE, &context)?;
            generation.code.add_file(GeneratedFile::new(ArtifactKind::Server, text));
        } else {
            tracing::info!("No GET endpoints, skipping {}", ArtifactKind::Server);
        }

        for file in generation.code.files() {
            tracing::debug!("Rendered {} ({} bytes)", file.kind, file.len());
        }
        Ok(generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apigen_core::{ActionParameter, DiagnosticKind, HttpMethod, SourceProperty, VOID};
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

    fn descriptor(
        controller: &str,
        method: HttpMethod,
        route: &str,
        name: &str,
        request: Option<&str>,
        response: &str,
    ) -> EndpointDescriptor {
        EndpointDescriptor {
            http_method: method,
            route_template: route.to_string(),
            operation_name: name.to_string(),
            request_type: request.map(ToString::to_string),
            response_type: response.to_string(),
            has_body_parameter: false,
            controller_name: controller.to_string(),
            parameters: Vec::new(),
            request_rule: None,
            response_rule: "naming_convention",
            source: PathBuf::from("Controller.cs"),
        }
    }

    fn generate(classes: &[SourceClass], descriptors: &[EndpointDescriptor]) -> Generation {
        let registry = ValueObjectRegistry::new();
        let input = GenerationInput {
            classes,
            descriptors,
            registry: &registry,
        };
        ApiGenerator::new(&GeneratorConfig::default())
            .unwrap()
            .generate(&input)
            .unwrap()
    }

    #[test]
    fn test_types_only() {
        let generation = generate(&[class("TagDto", &[("Name", "string")])], &[]);
        let kinds: Vec<_> = generation.code.files().map(|f| f.kind).collect();
        assert_eq!(kinds, [ArtifactKind::Types]);
    }

    #[test]
    fn test_empty_interface() {
        let generation = generate(&[class("EmptyResponse", &[])], &[]);
        let types = generation.code.file(ArtifactKind::Types).unwrap();
        assert!(types.content.contains("export interface EmptyResponse {}\n"));
    }

    #[test]
    fn test_header_and_trailing_newline() {
        let generation = generate(&[class("TagDto", &[("Name", "string")])], &[]);
        let types = &generation.code.file(ArtifactKind::Types).unwrap().content;
        assert!(types.starts_with("// Auto-generated by apigen\n// Do not edit manually\n"));
        assert!(types.ends_with("}\n"));
        assert!(!types.ends_with("\n\n"));
    }

    #[test]
    fn test_no_server_artifact_without_get() {
        let descriptors = [descriptor(
            "auth",
            HttpMethod::Post,
            "/api/auth/logout",
            "Logout",
            None,
            VOID,
        )];
        let generation = generate(&[], &descriptors);
        let kinds: Vec<_> = generation.code.files().map(|f| f.kind).collect();
        assert_eq!(kinds, [ArtifactKind::Endpoints, ArtifactKind::Hooks]);

        let endpoints = &generation.code.file(ArtifactKind::Endpoints).unwrap().content;
        assert!(endpoints.contains("  logout: async (): Promise<void> => {"));
        assert!(endpoints.contains("    await apiClient.post('/api/auth/logout');"));
        assert!(!endpoints.contains("response.data"));
        assert!(!endpoints.contains("import type"));

        let hooks = &generation.code.file(ArtifactKind::Hooks).unwrap().content;
        assert!(hooks.contains(
            "import { useMutation, type UseMutationOptions } from '@tanstack/react-query';"
        ));
        assert!(!hooks.contains("queryKeys"));
        assert!(hooks.contains("mutationFn: authApi.logout,"));
    }

    #[test]
    fn test_controllers_sorted_operations_in_source_order() {
        let descriptors = [
            descriptor("tags", HttpMethod::Get, "/api/tags", "ListTags", None, "List<string>"),
            descriptor("auth", HttpMethod::Post, "/api/auth/signout", "SignOut", None, VOID),
            descriptor("auth", HttpMethod::Post, "/api/auth/logout", "Logout", None, VOID),
        ];
        let generation = generate(&[], &descriptors);
        let endpoints = &generation.code.file(ArtifactKind::Endpoints).unwrap().content;

        let auth = endpoints.find("export const authApi").unwrap();
        let tags = endpoints.find("export const tagsApi").unwrap();
        assert!(auth < tags);
        let sign_out = endpoints.find("signOut:").unwrap();
        let logout = endpoints.find("logout:").unwrap();
        assert!(sign_out < logout);
        assert!(endpoints.contains("// Auth API"));
    }

    #[test]
    fn test_query_hook_with_positional_argument() {
        let mut get = descriptor(
            "users",
            HttpMethod::Get,
            "/api/users/{userId}",
            "GetProfile",
            None,
            "GetProfileResponse",
        );
        get.parameters.push(ActionParameter {
            name: "userId".to_string(),
            declared_type: "int".to_string(),
            attributes: vec!["FromRoute".to_string()],
        });
        let classes = [class("GetProfileResponse", &[("Name", "string")])];
        let generation = generate(&classes, &[get]);

        let hooks = &generation.code.file(ArtifactKind::Hooks).unwrap().content;
        assert!(hooks.contains("getProfile: ['users', 'getProfile'] as const,"));
        assert!(hooks.contains(
            "export const useGetProfile = (userId: number, options?: Omit<UseQueryOptions<GetProfileResponse, Error>, 'queryKey' | 'queryFn'>) => {"
        ));
        assert!(hooks.contains("queryKey: [...queryKeys.users.getProfile, userId] as const,"));
        assert!(hooks.contains("queryFn: () => usersApi.getProfile(userId),"));

        let server = &generation.code.file(ArtifactKind::Server).unwrap().content;
        assert!(server.contains("import 'server-only';"));
        assert!(server.contains("export const usersServerApi = {"));
        assert!(server.contains(
            "    return serverFetch<GetProfileResponse>(`/api/users/${userId}`);"
        ));
        assert!(!server.contains("function withQuery"));
    }

    #[test]
    fn test_same_action_name_in_two_controllers_is_reported() {
        let descriptors = [
            descriptor("tags", HttpMethod::Get, "/api/tags", "GetAll", None, "List<string>"),
            descriptor("articles", HttpMethod::Get, "/api/articles", "GetAll", None, "List<string>"),
            descriptor("articles", HttpMethod::Delete, "/api/articles/{id}", "DeleteArticle", None, VOID),
        ];
        let generation = generate(&[], &descriptors);

        assert_eq!(generation.diagnostics.len(), 1);
        let diag = &generation.diagnostics[0];
        assert_eq!(diag.kind, DiagnosticKind::DuplicateHookName);
        assert!(diag.message.starts_with("useGetAll is exported more than once"));
        assert!(diag.message.contains("tags, articles"));
    }

    #[test]
    fn test_mutation_with_positional_arguments() {
        let delete = descriptor(
            "articles",
            HttpMethod::Delete,
            "/api/articles/{id}",
            "DeleteArticle",
            None,
            VOID,
        );
        let generation = generate(&[], &[delete]);
        let hooks = &generation.code.file(ArtifactKind::Hooks).unwrap().content;
        assert!(hooks.contains(
            "Omit<UseMutationOptions<void, Error, { id: string }>, 'mutationFn'>"
        ));
        assert!(hooks.contains(
            "mutationFn: ({ id }: { id: string }) => articlesApi.deleteArticle(id),"
        ));
    }
}
