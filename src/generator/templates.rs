use askama::Template;
use serde_json::Value;

use super::layout::ProjectLayout;
use super::models::default_value;
use super::scaffold::{TestDescriptor, TestOperation};
use crate::config::{Framework, ProjectConfig};
use crate::error::{Result, ScaffoldError};
use crate::spec::{ModelDefinition, PropertyType, Route};

/// Turns derived records into source text.
///
/// The derivation engine only produces records; implementations of this
/// trait decide what the generated files look like.
pub trait Renderer {
    fn render_handler(&self, route: &Route) -> Result<String>;
    fn render_model(&self, model: &ModelDefinition) -> Result<String>;
    fn render_test(&self, descriptor: &TestDescriptor) -> Result<String>;
    /// `title` is the document's `info.title`, empty when absent.
    fn render_readme(&self, config: &ProjectConfig, title: &str) -> Result<String>;
    fn render_entry(&self, config: &ProjectConfig, layout: &ProjectLayout) -> Result<String>;
}

/// Static project files, as (path under the project root, contents).
pub const DOTFILES: [(&str, &str); 3] = [
    (".jshintrc", include_str!("../../templates/jshintrc.txt")),
    (".gitignore", include_str!("../../templates/gitignore.txt")),
    (".npmignore", include_str!("../../templates/npmignore.txt")),
];

/// Askama-backed renderer for Express or Hapi projects.
#[derive(Debug, Clone, Copy)]
pub struct TemplateRenderer {
    framework: Framework,
}

impl TemplateRenderer {
    pub fn new(framework: Framework) -> Self {
        TemplateRenderer { framework }
    }
}

/// One operation as shown in a handler module.
#[derive(Debug, Clone)]
pub struct HandlerOperationView {
    pub method: String,
    /// JS function name; empty renders an anonymous function
    pub name: String,
    pub summary: String,
    pub description: String,
    pub parameters: String,
    pub produces: String,
}

#[derive(Debug, Clone)]
pub struct HandlerView {
    pub path: String,
    pub operations: Vec<HandlerOperationView>,
}

#[derive(Debug, Clone)]
pub struct ModelView {
    pub id: String,
    pub constructor_name: String,
    pub required: String,
    /// Property names as quoted JS strings
    pub properties: Vec<String>,
}

/// One operation as exercised by a test stub.
#[derive(Debug, Clone)]
pub struct TestOperationView {
    pub method: String,
    pub method_upper: String,
    pub title_json: String,
    pub url_json: String,
    pub status: u16,
    pub has_body: bool,
    pub body_expr: String,
}

#[derive(Debug, Clone)]
pub struct TestView {
    pub name_json: String,
    pub api_path_json: String,
    pub handlers_path_json: String,
    pub models_json: String,
    pub operations: Vec<TestOperationView>,
}

#[derive(Debug, Clone)]
pub struct ReadmeView {
    pub appname: String,
    pub title: String,
    pub api_file: String,
    pub framework: String,
    pub creator_name: String,
    pub github_user: String,
    pub email: String,
}

/// Server entry point mounting the API document and handlers.
#[derive(Debug, Clone)]
pub struct EntryView {
    pub appname_json: String,
    pub api_path_json: String,
    pub handlers_path_json: String,
}

#[derive(Template)]
#[template(path = "express/index.js.txt", escape = "none")]
struct ExpressEntryTemplate<'a> {
    view: &'a EntryView,
}

#[derive(Template)]
#[template(path = "hapi/index.js.txt", escape = "none")]
struct HapiEntryTemplate<'a> {
    view: &'a EntryView,
}

#[derive(Template)]
#[template(path = "express/handler.js.txt", escape = "none")]
struct ExpressHandlerTemplate<'a> {
    view: &'a HandlerView,
}

#[derive(Template)]
#[template(path = "hapi/handler.js.txt", escape = "none")]
struct HapiHandlerTemplate<'a> {
    view: &'a HandlerView,
}

#[derive(Template)]
#[template(path = "express/test.js.txt", escape = "none")]
struct ExpressTestTemplate<'a> {
    view: &'a TestView,
}

#[derive(Template)]
#[template(path = "hapi/test.js.txt", escape = "none")]
struct HapiTestTemplate<'a> {
    view: &'a TestView,
}

#[derive(Template)]
#[template(path = "model.js.txt", escape = "none")]
struct ModelTemplate<'a> {
    view: &'a ModelView,
}

#[derive(Template)]
#[template(path = "README.md.txt", escape = "none")]
struct ReadmeTemplate<'a> {
    view: &'a ReadmeView,
}

fn rendered(artifact: &str, result: askama::Result<String>) -> Result<String> {
    result.map_err(|source| ScaffoldError::Render {
        artifact: artifact.to_string(),
        source,
    })
}

impl Renderer for TemplateRenderer {
    fn render_handler(&self, route: &Route) -> Result<String> {
        let view = handler_view(route);
        let artifact = format!("handler /{}", route.canonical_path);
        match self.framework {
            Framework::Express => rendered(&artifact, ExpressHandlerTemplate { view: &view }.render()),
            Framework::Hapi => rendered(&artifact, HapiHandlerTemplate { view: &view }.render()),
        }
    }

    fn render_model(&self, model: &ModelDefinition) -> Result<String> {
        let view = model_view(model);
        rendered(
            &format!("model {}", model.name),
            ModelTemplate { view: &view }.render(),
        )
    }

    fn render_test(&self, descriptor: &TestDescriptor) -> Result<String> {
        let view = test_view(descriptor);
        let artifact = format!("test {}", descriptor.raw_path);
        match self.framework {
            Framework::Express => rendered(&artifact, ExpressTestTemplate { view: &view }.render()),
            Framework::Hapi => rendered(&artifact, HapiTestTemplate { view: &view }.render()),
        }
    }

    fn render_readme(&self, config: &ProjectConfig, title: &str) -> Result<String> {
        let view = ReadmeView {
            appname: config.appname.clone(),
            title: title.split_whitespace().collect::<Vec<_>>().join(" "),
            api_file: config.api_file_name(),
            framework: self.framework.to_string(),
            creator_name: config.creator_name.clone(),
            github_user: config.github_user.clone(),
            email: config.email.clone(),
        };
        rendered("README.md", ReadmeTemplate { view: &view }.render())
    }

    fn render_entry(&self, config: &ProjectConfig, layout: &ProjectLayout) -> Result<String> {
        let view = EntryView {
            appname_json: js_string(&config.appname),
            api_path_json: js_string(
                &layout.root_import_path(&layout.api_document_artifact(&config.api_file_name())),
            ),
            handlers_path_json: js_string(&layout.root_import_path(&layout.handlers_dir)),
        };
        match self.framework {
            Framework::Express => rendered("index.js", ExpressEntryTemplate { view: &view }.render()),
            Framework::Hapi => rendered("index.js", HapiEntryTemplate { view: &view }.render()),
        }
    }
}

pub fn handler_view(route: &Route) -> HandlerView {
    HandlerView {
        path: route.canonical_path.clone(),
        operations: route
            .operations
            .iter()
            .map(|op| HandlerOperationView {
                method: op.verb.to_string(),
                name: js_identifier(&op.operation_id),
                summary: comment_text(&op.summary),
                description: comment_text(&op.description),
                parameters: op
                    .parameters
                    .iter()
                    .filter_map(|p| p.get("name").and_then(Value::as_str))
                    .collect::<Vec<_>>()
                    .join(", "),
                produces: comment_text(&op.produces.join(", ")),
            })
            .collect(),
    }
}

pub fn model_view(model: &ModelDefinition) -> ModelView {
    let constructor_name = match js_identifier(&model.id) {
        name if name.is_empty() => "Model".to_string(),
        name => name,
    };
    ModelView {
        id: comment_text(&model.id),
        constructor_name,
        required: comment_text(&model.required.join(", ")),
        properties: model.properties.iter().map(|p| js_string(&p.name)).collect(),
    }
}

pub fn test_view(descriptor: &TestDescriptor) -> TestView {
    TestView {
        name_json: js_string(&descriptor.name),
        api_path_json: js_string(&descriptor.api_path),
        handlers_path_json: js_string(&descriptor.handlers_path),
        models_json: serde_json::to_string_pretty(&descriptor.models)
            .unwrap_or_else(|_| "{}".to_string()),
        operations: descriptor
            .operations
            .iter()
            .map(|test_op| {
                let op = &test_op.operation;
                let body_model = op
                    .body_model()
                    .filter(|name| op.verb.has_body() && descriptor.models.contains_key(*name));
                TestOperationView {
                    method: op.verb.to_string(),
                    method_upper: op.verb.as_str().to_ascii_uppercase(),
                    title_json: js_string(&format!(
                        "test {} {}",
                        op.verb.as_str().to_ascii_uppercase(),
                        test_op.path
                    )),
                    url_json: js_string(&sample_url(
                        descriptor.resource_path.as_deref(),
                        test_op,
                    )),
                    status: op.success_status(),
                    has_body: body_model.is_some(),
                    body_expr: body_model
                        .map(|name| format!("models[{}]", js_string(name)))
                        .unwrap_or_default(),
                }
            })
            .collect(),
    }
}

/// Request URL for a test: base path plus raw path with path parameters
/// replaced by the synthesized default for their declared type.
pub fn sample_url(resource_path: Option<&str>, test_op: &TestOperation) -> String {
    let base = resource_path.unwrap_or_default().trim_end_matches('/');
    let path = test_op
        .path
        .split('/')
        .map(|segment| match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(param) => path_param_sample(&test_op.operation.parameters, param),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/");
    if path.starts_with('/') || path.is_empty() {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

fn path_param_sample(parameters: &[Value], name: &str) -> String {
    let kind = parameters
        .iter()
        .find(|p| {
            p.get("in").and_then(Value::as_str) == Some("path")
                && p.get("name").and_then(Value::as_str) == Some(name)
        })
        .map(PropertyType::from_schema)
        .unwrap_or(PropertyType::Integer);
    match default_value(&kind).map(Value::from) {
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
        None => "1".to_string(),
    }
}

/// Quoted JS string literal.
fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| "\"\"".to_string())
}

/// Reserved words and literals that cannot name a JS function.
const JS_RESERVED: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// Sanitize a name into a JS identifier; empty input stays empty.
///
/// Reserved words get a leading `_` (`delete` becomes `_delete`).
pub fn js_identifier(name: &str) -> String {
    let mut s: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if s.chars().next().is_some_and(|c| c.is_ascii_digit()) || JS_RESERVED.contains(&s.as_str()) {
        s.insert(0, '_');
    }
    s
}

/// Single-line text safe inside a `/** */` block.
fn comment_text(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("*/", "* /")
}
