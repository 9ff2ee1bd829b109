//! Template engine for artifact rendering using Handlebars.
//!
//! Wraps Handlebars with the four artifact templates pre-registered.
//! Output is TypeScript, so HTML escaping is disabled.
//!
//! # Examples
//!
//! ```
//! use apigen_codegen::template_engine::TemplateEngine;
//!
//! let mut engine = TemplateEngine::new().unwrap();
//! engine.register_template_string("greeting", "// {{name}}").unwrap();
//!
//! let text = engine
//!     .render("greeting", &serde_json::json!({"name": "a < b"}))
//!     .unwrap();
//! assert_eq!(text, "// a < b");
//! ```

use apigen_core::{Error, Result};
use handlebars::Handlebars;
use serde::Serialize;

/// Name of the interface declarations template.
pub const TYPES_TEMPLATE: &str = "types";
/// Name of the endpoint-call template.
pub const ENDPOINTS_TEMPLATE: &str = "endpoints";
/// Name of the hooks template.
pub const HOOKS_TEMPLATE: &str = "hooks";
/// Name of the server-only template.
pub const SERVER_TEMPLATE: &str = "server";

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    (TYPES_TEMPLATE, include_str!("../templates/types.ts.hbs")),
    (ENDPOINTS_TEMPLATE, include_str!("../templates/endpoints.ts.hbs")),
    (HOOKS_TEMPLATE, include_str!("../templates/hooks.ts.hbs")),
    (SERVER_TEMPLATE, include_str!("../templates/server.ts.hbs")),
];

/// Template engine for artifact rendering.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl TemplateEngine<'_> {
    /// Creates an engine with the built-in templates registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if a built-in template does not
    /// parse.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        for (name, source) in BUILTIN_TEMPLATES {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| template_error(name, &e))?;
        }

        Ok(Self { handlebars })
    }

    /// Renders a registered template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the template is unknown, the
    /// context does not serialize, or a referenced field is missing.
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| template_error(template_name, &e))
    }

    /// Registers an additional template, replacing one of the same name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the template does not parse.
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| template_error(name, &e))
    }

    /// Returns `true` if a template of that name is registered.
    #[must_use]
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}

fn template_error(template: &str, error: &impl std::fmt::Display) -> Error {
    Error::TemplateError {
        template: template.to_string(),
        message: error.to_string(),
    }
}
