use super::types::{
    ApiDocument, ModelDefinition, PathItem, PropertySchema, PropertyType, VERBS,
};
use crate::error::{Result, ScaffoldError};
use crate::validator::{fail_if_issues, print_issues, ValidationIssue};
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// Read a Swagger 2.0 document from a `.json`, `.yaml` or `.yml` file.
///
/// Structural problems are reported together as
/// [`ScaffoldError::InvalidDocumentStructure`].
pub fn load_document(path: &Path) -> Result<ApiDocument> {
    let value = load_document_value(path)?;
    let document = document_from_value(&value)?;
    info!(
        document = %path.display(),
        paths = document.paths.len(),
        definitions = document.definitions.len(),
        "Loaded API document"
    );
    Ok(document)
}

/// Read and parse a document without interpreting it.
///
/// Generation keeps the parsed value around to copy the document into the
/// project.
pub fn load_document_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| ScaffoldError::io(path, e))?;
    parse_document(path, &content)
}

/// Parse document text, choosing YAML or JSON from the file extension.
pub fn parse_document(path: &Path, content: &str) -> Result<Value> {
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    let parsed = if is_yaml {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(content).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| ScaffoldError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Convert a parsed document into an [`ApiDocument`].
pub fn document_from_value(value: &Value) -> Result<ApiDocument> {
    let mut issues = Vec::new();

    let Some(root) = value.as_object() else {
        let issue = ValidationIssue::new("document", "NotAnObject", "API document must be an object");
        print_issues(std::slice::from_ref(&issue));
        return Err(ScaffoldError::InvalidDocumentStructure(vec![issue]));
    };

    let paths = match root.get("paths") {
        Some(Value::Object(paths)) => paths
            .iter()
            .filter_map(|(raw_path, item)| read_path_item(raw_path, item, &mut issues))
            .collect(),
        Some(_) => {
            issues.push(ValidationIssue::new(
                "paths",
                "InvalidPaths",
                "`paths` must be an object keyed by path template",
            ));
            Vec::new()
        }
        None => {
            issues.push(ValidationIssue::new(
                "paths",
                "MissingPaths",
                "document declares no `paths`",
            ));
            Vec::new()
        }
    };

    let definitions = match root.get("definitions") {
        Some(Value::Object(defs)) => defs
            .iter()
            .filter_map(|(name, schema)| read_definition(name, schema, &mut issues))
            .collect(),
        Some(_) => {
            issues.push(ValidationIssue::new(
                "definitions",
                "InvalidDefinitions",
                "`definitions` must be an object keyed by model name",
            ));
            Vec::new()
        }
        None => Vec::new(),
    };

    fail_if_issues(issues)?;

    Ok(ApiDocument {
        title: root
            .get("info")
            .and_then(|info| info.get("title"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        base_path: root
            .get("basePath")
            .and_then(Value::as_str)
            .map(str::to_string),
        paths,
        definitions,
    })
}

fn read_path_item(
    raw_path: &str,
    item: &Value,
    issues: &mut Vec<ValidationIssue>,
) -> Option<PathItem> {
    let location = format!("paths.{raw_path}");
    if raw_path.split('/').any(is_unsafe_segment) {
        issues.push(ValidationIssue::new(
            location.clone(),
            "UnsafePathSegment",
            "path segments must not be `.`, `..` or contain `\\`",
        ));
    }
    let Some(entries) = item.as_object() else {
        issues.push(ValidationIssue::new(
            location,
            "InvalidPathItem",
            "path item must be an object",
        ));
        return None;
    };
    for verb in VERBS {
        if let Some(body) = entries.get(verb.as_str()) {
            if !body.is_object() {
                issues.push(ValidationIssue::new(
                    format!("{location}.{verb}"),
                    "InvalidOperation",
                    "operation must be an object",
                ));
            }
        }
    }
    Some(PathItem {
        raw_path: raw_path.to_string(),
        entries: entries.clone(),
    })
}

/// A segment that would leave its directory once used as a file name.
fn is_unsafe_segment(segment: &str) -> bool {
    segment == "." || segment == ".." || segment.contains('\\')
}

fn read_definition(
    name: &str,
    schema: &Value,
    issues: &mut Vec<ValidationIssue>,
) -> Option<ModelDefinition> {
    let location = format!("definitions.{name}");
    if name.contains('/') || is_unsafe_segment(name) {
        issues.push(ValidationIssue::new(
            location,
            "UnsafeDefinitionName",
            "definition names must not be `.`, `..` or contain `/` or `\\`",
        ));
        return None;
    }
    let Some(schema) = schema.as_object() else {
        issues.push(ValidationIssue::new(
            location,
            "InvalidDefinition",
            "definition must be an object",
        ));
        return None;
    };

    let required: Vec<String> = match schema.get("required") {
        None => Vec::new(),
        Some(Value::Array(names)) if names.iter().all(Value::is_string) => names
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        Some(_) => {
            issues.push(ValidationIssue::new(
                format!("{location}.required"),
                "InvalidRequired",
                "`required` must be an array of property names",
            ));
            return None;
        }
    };

    let properties = match schema.get("properties") {
        Some(Value::Object(props)) => props
            .iter()
            .map(|(prop, prop_schema)| PropertySchema {
                name: prop.clone(),
                kind: PropertyType::from_schema(prop_schema),
                required: required.iter().any(|r| r == prop),
            })
            .collect(),
        Some(_) => {
            issues.push(ValidationIssue::new(
                format!("{location}.properties"),
                "InvalidProperties",
                "`properties` must be an object",
            ));
            return None;
        }
        None => {
            issues.push(ValidationIssue::new(
                format!("{location}.properties"),
                "MissingProperties",
                "definition declares no `properties`",
            ));
            return None;
        }
    };

    Some(ModelDefinition {
        name: name.to_string(),
        id: schema
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .unwrap_or(name)
            .to_string(),
        properties,
        required,
    })
}
