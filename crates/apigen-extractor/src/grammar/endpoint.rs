//! Controller and action-header grammar.

use super::class::class_header;
use super::{Attribute, Cursor, attribute_groups, split_top_level, type_expr};
use crate::lexer::Token;
use apigen_core::type_expr::base_name;
use apigen_core::{ActionParameter, HttpMethod, TypeExpr};
use std::path::{Path, PathBuf};

const METHOD_MODIFIERS: &[&str] = &[
    "public", "protected", "internal", "private", "virtual", "override", "sealed", "new", "async",
];
const PARAMETER_MODIFIERS: &[&str] = &["this", "ref", "out", "in", "params", "scoped"];
const TASK_TYPES: &[&str] = &["Task", "ValueTask"];
const UNTYPED_RESULTS: &[&str] = &["ActionResult", "IActionResult", "IResult"];

/// An HTTP action as written, before any type inference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEndpoint {
    /// Verb from the HTTP attribute
    pub http_method: HttpMethod,
    /// Route literal of the verb attribute, if any
    pub route: Option<String>,
    /// Method name
    pub operation_name: String,
    /// Type wrapped by the declared return, if any
    pub explicit_response: Option<String>,
    /// Parameters in declaration order
    pub parameters: Vec<ActionParameter>,
    /// Line of the verb attribute
    pub line: usize,
}

/// A controller file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSource {
    /// Lowercased class name without the `Controller` suffix
    pub controller_name: String,
    /// Actions in source order
    pub endpoints: Vec<RawEndpoint>,
    /// File the controller was read from
    pub source: PathBuf,
}

/// Extracts the controller declared in a file.
///
/// The first class whose name ends in `Controller` names the controller.
/// Returns `None` if there is no such class.
///
/// # Examples
///
/// ```
/// use apigen_extractor::grammar::endpoint::parse_controller;
/// use apigen_extractor::lexer::tokenize;
/// use apigen_core::HttpMethod;
/// use std::path::Path;
///
/// let tokens = tokenize(
///     r#"public class AuthController : ControllerBase {
///         [HttpPost("login")]
///         public async Task<ActionResult<LoginResponse>> Login([FromBody] LoginRequest request)
///         { return Ok(); }
///     }"#,
/// );
/// let controller = parse_controller(&tokens, Path::new("AuthController.cs")).unwrap();
/// assert_eq!(controller.controller_name, "auth");
/// let login = &controller.endpoints[0];
/// assert_eq!(login.http_method, HttpMethod::Post);
/// assert_eq!(login.route.as_deref(), Some("login"));
/// assert_eq!(login.explicit_response.as_deref(), Some("LoginResponse"));
/// ```
#[must_use]
pub fn parse_controller(tokens: &[Token], source: &Path) -> Option<ControllerSource> {
    let controller_name = controller_name(tokens)?;
    let mut cursor = Cursor::new(tokens);
    let mut endpoints = Vec::new();

    while cursor.peek().is_some() {
        let attributes = attribute_groups(&mut cursor);
        if attributes.is_empty() {
            cursor.bump();
            continue;
        }
        let Some((http_method, verb)) = attributes
            .iter()
            .find_map(|a| HttpMethod::from_attribute(&a.name).map(|m| (m, a)))
        else {
            continue;
        };

        match action_header(&mut cursor) {
            Some((operation_name, explicit_response, parameters)) => {
                tracing::trace!(
                    controller = %controller_name,
                    operation = %operation_name,
                    line = verb.line,
                    "action header"
                );
                endpoints.push(RawEndpoint {
                    http_method,
                    route: verb.positional.first().cloned(),
                    operation_name,
                    explicit_response,
                    parameters,
                    line: verb.line,
                });
            }
            None => {
                tracing::debug!(
                    file = %source.display(),
                    line = verb.line,
                    "[{}] is not followed by an async action; ignoring",
                    verb_label(verb)
                );
            }
        }
    }

    Some(ControllerSource {
        controller_name,
        endpoints,
        source: source.to_path_buf(),
    })
}

fn verb_label(verb: &Attribute) -> String {
    match verb.positional.first() {
        Some(route) => format!("{}(\"{route}\")", verb.name),
        None => verb.name.clone(),
    }
}

fn controller_name(tokens: &[Token]) -> Option<String> {
    let mut cursor = Cursor::new(tokens);
    while cursor.peek().is_some() {
        if let Some(name) = class_header(&mut cursor) {
            if let Some(stem) = name.strip_suffix("Controller").filter(|s| !s.is_empty()) {
                return Some(stem.to_lowercase());
            }
            continue;
        }
        cursor.bump();
    }
    None
}

type ActionHeader = (String, Option<String>, Vec<ActionParameter>);

/// Parses `modifiers Task<Result> Name(params)`.
///
/// The modifiers must include `async`.
fn action_header(cursor: &mut Cursor<'_>) -> Option<ActionHeader> {
    let start = cursor.pos();
    let header = action_header_inner(cursor);
    if header.is_none() {
        cursor.reset(start);
    }
    header
}

fn action_header_inner(cursor: &mut Cursor<'_>) -> Option<ActionHeader> {
    let mut is_async = false;
    while let Some(modifier) = cursor.eat_any_ident(METHOD_MODIFIERS) {
        is_async |= modifier == "async";
    }
    if !is_async {
        return None;
    }
    let return_type = type_expr(cursor)?;
    let explicit_response = wrapped_response(&return_type)?;
    let name = cursor.ident()?.to_string();
    let params = cursor.balanced('(', ')')?;
    Some((name, explicit_response, parameters(params)))
}

/// Unwraps `Task<ActionResult<T>>` to `Some(Some(T))`, untyped results to
/// `Some(None)`, and `Task<T>` to `Some(Some(T))`. Anything not wrapped in
/// a task yields `None`.
fn wrapped_response(return_type: &TypeExpr) -> Option<Option<String>> {
    let TypeExpr::Named { name, args } = return_type else {
        return None;
    };
    let [inner] = args.as_slice() else {
        return None;
    };
    if !TASK_TYPES.contains(&base_name(name)) {
        return None;
    }
    match inner {
        TypeExpr::Named { name, args } if UNTYPED_RESULTS.contains(&base_name(name)) => {
            match args.as_slice() {
                [] => Some(None),
                [response] => Some(Some(response.to_string())),
                _ => None,
            }
        }
        other => Some(Some(other.to_string())),
    }
}

fn parameters(tokens: &[Token]) -> Vec<ActionParameter> {
    split_top_level(tokens)
        .into_iter()
        .filter(|part| !part.is_empty())
        .filter_map(|part| {
            let param = parameter(part);
            if param.is_none() {
                tracing::trace!(line = part[0].line, "unrecognized parameter");
            }
            param
        })
        .collect()
}

fn parameter(tokens: &[Token]) -> Option<ActionParameter> {
    let mut cursor = Cursor::new(tokens);
    let attributes = attribute_groups(&mut cursor)
        .into_iter()
        .map(|a| a.name)
        .collect();
    while cursor.eat_any_ident(PARAMETER_MODIFIERS).is_some() {}
    let declared_type = type_expr(&mut cursor)?;
    let name = cursor.ident()?.to_string();
    if cursor.peek().is_some() && !cursor.eat_punct('=') {
        return None;
    }
    Some(ActionParameter {
        name,
        declared_type: declared_type.to_string(),
        attributes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse(source: &str) -> ControllerSource {
        parse_controller(&tokenize(source), Path::new("TestController.cs")).unwrap()
    }

    #[test]
    fn test_stacked_attributes_in_any_order() {
        let controller = parse(
            r#"
            [ApiController]
            [Route("api/[controller]")]
            public class ArticlesController : BaseController
            {
                [RequireAuth]
                [HttpPut("{id}")]
                [ProducesResponseType(typeof(UpdateArticleResponse), 200)]
                public async Task<ActionResult<UpdateArticleResponse>> UpdateArticle(
                    int id,
                    [FromBody] UpdateArticleRequest request)
                {
                    request.Id = id;
                    return Ok(await service.ExecuteAsync(request));
                }
            }
            "#,
        );
        assert_eq!(controller.controller_name, "articles");
        let endpoint = &controller.endpoints[0];
        assert_eq!(endpoint.http_method, HttpMethod::Put);
        assert_eq!(endpoint.route.as_deref(), Some("{id}"));
        assert_eq!(endpoint.operation_name, "UpdateArticle");
        assert_eq!(endpoint.parameters.len(), 2);
        assert_eq!(endpoint.parameters[1].declared_type, "UpdateArticleRequest");
        assert!(endpoint.parameters[1].is_from_body());
    }

    #[test]
    fn test_untyped_action_result() {
        let controller = parse(
            "public class AuthController {
                [HttpPost(\"logout\")]
                public async Task<IActionResult> Logout() { return NoContent(); }
                [HttpDelete(\"{id}\")]
                public async Task<ActionResult> Delete(int id) { return NoContent(); }
             }",
        );
        assert_eq!(controller.endpoints.len(), 2);
        assert!(controller.endpoints[0].explicit_response.is_none());
        assert!(controller.endpoints[1].explicit_response.is_none());
        assert!(controller.endpoints[0].parameters.is_empty());
    }

    #[test]
    fn test_generic_response_type() {
        let controller = parse(
            "public class TagsController {
                [HttpGet]
                public async Task<ActionResult<List<TagDto>>> GetTags() { return Ok(); }
                [HttpGet(\"count\")]
                public async ValueTask<int> Count() { return 0; }
             }",
        );
        assert_eq!(
            controller.endpoints[0].explicit_response.as_deref(),
            Some("List<TagDto>")
        );
        assert_eq!(controller.endpoints[1].explicit_response.as_deref(), Some("int"));
        assert!(controller.endpoints[0].route.is_none());
    }

    #[test]
    fn test_sync_action_is_not_discovered() {
        let controller = parse(
            "public class ArticlesController {
                [HttpGet(\"{id}\")]
                public ActionResult GetArticle(int id) { return NotFound(); }
             }",
        );
        assert!(controller.endpoints.is_empty());
    }

    #[test]
    fn test_commented_out_action_is_not_discovered() {
        let controller = parse(
            "public class UsersController {
                // [HttpGet(\"{id}\")]
                // public async Task<ActionResult<UserDto>> GetUser(int id) { }
                /* [HttpPost] public async Task<ActionResult> Create() { } */
             }",
        );
        assert!(controller.endpoints.is_empty());
    }

    #[test]
    fn test_named_route_argument_ignored() {
        let controller = parse(
            "public class UsersController {
                [HttpGet(Name = \"list\")]
                public async Task<ActionResult<GetUsersResponse>> GetUsers() { }
             }",
        );
        assert!(controller.endpoints[0].route.is_none());
    }

    #[test]
    fn test_parameter_shapes() {
        let controller = parse(
            "public class ArticlesController {
                [HttpGet(\"author/{authorId:int}\")]
                public async Task<ActionResult<X>> GetByAuthor(
                    [FromRoute(Name = \"authorId\")] int authorId,
                    [FromQuery] int page = 1,
                    CancellationToken cancellationToken = default) { }
             }",
        );
        let params = &controller.endpoints[0].parameters;
        let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["authorId", "page", "cancellationToken"]);
        assert!(params[0].has_attribute("FromRoute"));
        assert!(params[1].has_attribute("FromQuery"));
    }

    #[test]
    fn test_not_a_controller() {
        let tokens = tokenize("public class ArticleService { }");
        assert!(parse_controller(&tokens, Path::new("ArticleService.cs")).is_none());
    }

    #[test]
    fn test_controller_name_skips_other_classes() {
        let controller = parse("public class Helper { } public sealed class HealthController { }");
        assert_eq!(controller.controller_name, "health");
    }

    #[test]
    fn test_indexers_in_bodies_are_harmless() {
        let controller = parse(
            "public class AuthController {
                [HttpGet(\"me\")]
                public async Task<ActionResult<MeResponse>> Me() {
                    var id = (int)HttpContext.Items[\"UserId\"]!;
                    var values = lookup[key];
                    return Ok();
                }
             }",
        );
        assert_eq!(controller.endpoints.len(), 1);
    }
}
