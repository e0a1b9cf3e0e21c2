use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// HTTP verbs recognized on a Swagger path item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
}

/// Fixed iteration order for verbs on every path item.
///
/// Operation order inside a route and inside a test descriptor follows this
/// list, never the key order of the path item object.
pub const VERBS: [Verb; 7] = [
    Verb::Get,
    Verb::Post,
    Verb::Put,
    Verb::Delete,
    Verb::Head,
    Verb::Options,
    Verb::Patch,
];

impl Verb {
    /// Key used for this verb in a Swagger path item.
    pub const fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Post => "post",
            Verb::Put => "put",
            Verb::Delete => "delete",
            Verb::Head => "head",
            Verb::Options => "options",
            Verb::Patch => "patch",
        }
    }

    /// Whether requests with this verb usually carry a body.
    pub const fn has_body(self) -> bool {
        matches!(self, Verb::Post | Verb::Put | Verb::Patch)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One HTTP verb bound to a path.
///
/// Absent optional fields in the source document default to empty values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    pub verb: Verb,
    #[serde(rename = "operationId")]
    pub operation_id: String,
    pub summary: String,
    pub description: String,
    pub parameters: Vec<Value>,
    pub produces: Vec<String>,
    pub responses: Map<String, Value>,
}

impl Operation {
    /// Build an operation record from the body declared for `verb`.
    pub fn from_body(verb: Verb, body: &Map<String, Value>) -> Self {
        let text = |key: &str| {
            body.get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Operation {
            verb,
            operation_id: text("operationId"),
            summary: text("summary"),
            description: text("description"),
            parameters: body
                .get("parameters")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            produces: body
                .get("produces")
                .and_then(Value::as_array)
                .map(|items| {
                    items
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            responses: body
                .get("responses")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default(),
        }
    }

    /// Name of the `#/definitions/...` model referenced by a body parameter.
    pub fn body_model(&self) -> Option<&str> {
        self.parameters
            .iter()
            .filter(|p| p.get("in").and_then(Value::as_str) == Some("body"))
            .find_map(|p| {
                p.get("schema")
                    .and_then(|s| s.get("$ref"))
                    .and_then(Value::as_str)
                    .and_then(|r| r.strip_prefix("#/definitions/"))
            })
    }

    /// First declared 2xx status, falling back to 200.
    pub fn success_status(&self) -> u16 {
        self.responses
            .keys()
            .filter_map(|code| code.parse::<u16>().ok())
            .find(|code| (200..300).contains(code))
            .unwrap_or(200)
    }
}

/// One raw path entry of the document, exactly as declared.
#[derive(Debug, Clone, PartialEq)]
pub struct PathItem {
    pub raw_path: String,
    /// The path item object; non-verb keys are kept but never read as operations.
    pub entries: Map<String, Value>,
}

impl PathItem {
    pub fn operation(&self, verb: Verb) -> Option<Operation> {
        self.entries
            .get(verb.as_str())
            .and_then(Value::as_object)
            .map(|body| Operation::from_body(verb, body))
    }

    /// Declared operations in [`VERBS`] order.
    pub fn operations(&self) -> impl Iterator<Item = Operation> + '_ {
        VERBS.into_iter().filter_map(|verb| self.operation(verb))
    }
}

/// Declared type of a model property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Integer,
    Number,
    Byte,
    String,
    Boolean,
    Object,
    Array,
    /// Missing type, `$ref`, or anything unrecognized
    Other,
}

impl PropertyType {
    pub fn from_type_name(name: Option<&str>) -> Self {
        match name {
            Some("integer") => PropertyType::Integer,
            Some("number") => PropertyType::Number,
            Some("byte") => PropertyType::Byte,
            Some("string") => PropertyType::String,
            Some("boolean") => PropertyType::Boolean,
            Some("object") => PropertyType::Object,
            Some("array") => PropertyType::Array,
            _ => PropertyType::Other,
        }
    }

    pub fn from_schema(schema: &Value) -> Self {
        Self::from_type_name(schema.get("type").and_then(Value::as_str))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySchema {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    pub required: bool,
}

/// A named schema from `definitions`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDefinition {
    /// Key under `definitions`
    pub name: String,
    /// The schema's own `id`, defaulting to `name`
    pub id: String,
    /// Properties in declaration order
    pub properties: Vec<PropertySchema>,
    pub required: Vec<String>,
}

impl ModelDefinition {
    pub fn is_required(&self, property: &str) -> bool {
        self.required.iter().any(|r| r == property)
    }
}

/// A Swagger 2.0 document reduced to what scaffolding reads.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiDocument {
    /// `info.title`, empty when absent
    pub title: String,
    /// `basePath`, if declared
    pub base_path: Option<String>,
    /// Raw path entries in document order
    pub paths: Vec<PathItem>,
    /// Model definitions in document order
    pub definitions: Vec<ModelDefinition>,
}
