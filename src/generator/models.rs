use crate::spec::{ModelDefinition, PropertyType};
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

/// String used for every synthesized `string` property.
pub const DEFAULT_STRING: &str = "helloworld";

/// Primitive value written for a supported property type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Integer(i64),
    Text(String),
    Boolean(bool),
}

impl From<DefaultValue> for Value {
    fn from(value: DefaultValue) -> Self {
        match value {
            DefaultValue::Integer(n) => Value::from(n),
            DefaultValue::Text(s) => Value::String(s),
            DefaultValue::Boolean(b) => Value::Bool(b),
        }
    }
}

/// Default for a declared property type; `None` means the property is skipped.
pub fn default_value(kind: &PropertyType) -> Option<DefaultValue> {
    match kind {
        PropertyType::Integer | PropertyType::Number | PropertyType::Byte => {
            Some(DefaultValue::Integer(1))
        }
        PropertyType::String => Some(DefaultValue::Text(DEFAULT_STRING.to_string())),
        PropertyType::Boolean => Some(DefaultValue::Boolean(true)),
        PropertyType::Object | PropertyType::Array | PropertyType::Other => None,
    }
}

/// Minimal instance of a model: required properties with a computable default.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SynthesizedInstance {
    values: Map<String, Value>,
}

impl SynthesizedInstance {
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.values.get(property)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.values.contains_key(property)
    }

    /// Property names in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Synthesized instances keyed by model name.
pub type ModelInstances = BTreeMap<String, SynthesizedInstance>;

/// Build the minimal instance for one definition.
///
/// Requiredness gates inclusion: optional properties are never written, even
/// when their type has a default. Required properties whose type has no
/// default are left out as well.
pub fn synthesize(definition: &ModelDefinition) -> SynthesizedInstance {
    let values = definition
        .properties
        .iter()
        .filter_map(|property| {
            let value = default_value(&property.kind)?;
            definition
                .is_required(&property.name)
                .then(|| (property.name.clone(), Value::from(value)))
        })
        .collect();
    SynthesizedInstance { values }
}

/// Synthesize every definition, keyed by definition name.
pub fn synthesize_all(definitions: &[ModelDefinition]) -> ModelInstances {
    let instances: ModelInstances = definitions
        .iter()
        .map(|definition| (definition.name.clone(), synthesize(definition)))
        .collect();
    debug!(models = instances.len(), "Synthesized model instances");
    instances
}
