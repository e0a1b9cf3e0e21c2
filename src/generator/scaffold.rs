use super::layout::{test_name, ProjectLayout};
use super::models::{synthesize_all, ModelInstances};
use crate::spec::{build_routes, normalize, ApiDocument, Operation, RouteTable};
use serde::Serialize;
use tracing::{debug, info};

/// Relative-path context for test stubs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldContext {
    pub layout: ProjectLayout,
    /// File name of the API document once copied into the project
    pub api_file_name: String,
}

impl ScaffoldContext {
    pub fn new(layout: ProjectLayout, api_file_name: impl Into<String>) -> Self {
        ScaffoldContext {
            layout,
            api_file_name: api_file_name.into(),
        }
    }
}

/// An operation tagged with the raw path it was declared under.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestOperation {
    pub path: String,
    #[serde(flatten)]
    pub operation: Operation,
}

/// Everything needed to render one test stub.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestDescriptor {
    pub raw_path: String,
    pub canonical_path: String,
    /// Artifact name, e.g. `test_pets_{id}`
    pub name: String,
    /// Import path of the API document from the tests directory
    pub api_path: String,
    /// Import path of the handlers directory from the tests directory
    pub handlers_path: String,
    /// Import path of this path's handler module, when a route exists for it
    pub handler_module: Option<String>,
    /// Document `basePath`
    pub resource_path: Option<String>,
    pub operations: Vec<TestOperation>,
    /// Every synthesized instance, not only the ones this path references
    pub models: ModelInstances,
}

/// Build one test descriptor per raw path of the document.
///
/// Raw paths that normalize identically still produce separate descriptors;
/// naming follows the raw path string.
pub fn assemble(
    document: &ApiDocument,
    routes: &RouteTable,
    models: &ModelInstances,
    context: &ScaffoldContext,
) -> Vec<TestDescriptor> {
    let api_path = context.layout.api_import_path(&context.api_file_name);
    let handlers_path = context.layout.handlers_import_path();

    let descriptors: Vec<TestDescriptor> = document
        .paths
        .iter()
        .map(|item| {
            let canonical_path = normalize(&item.raw_path).canonical;
            let handler_module = routes
                .get(&canonical_path)
                .map(|route| context.layout.handler_import_path(route));
            TestDescriptor {
                raw_path: item.raw_path.clone(),
                name: test_name(&item.raw_path),
                canonical_path,
                api_path: api_path.clone(),
                handlers_path: handlers_path.clone(),
                handler_module,
                resource_path: document.base_path.clone(),
                operations: item
                    .operations()
                    .map(|operation| TestOperation {
                        path: item.raw_path.clone(),
                        operation,
                    })
                    .collect(),
                models: models.clone(),
            }
        })
        .collect();
    debug!(descriptors = descriptors.len(), "Assembled test descriptors");
    descriptors
}

/// Output of the derivation engine for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scaffold {
    pub routes: RouteTable,
    pub models: ModelInstances,
    pub tests: Vec<TestDescriptor>,
}

/// Run the whole derivation: routes, model instances, test descriptors.
pub fn scaffold(document: &ApiDocument, context: &ScaffoldContext) -> Scaffold {
    let routes = build_routes(document);
    let models = synthesize_all(&document.definitions);
    let tests = assemble(document, &routes, &models, context);
    info!(
        routes = routes.len(),
        models = models.len(),
        tests = tests.len(),
        "Derived scaffold"
    );
    Scaffold {
        routes,
        models,
        tests,
    }
}
