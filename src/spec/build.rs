use super::path::{normalize, NormalizedPath};
use super::types::{ApiDocument, Operation};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// All operations that share one canonical path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    /// Canonical path, e.g. `pets/{id}`
    pub canonical_path: String,
    /// First raw path seen for this canonical path
    pub raw_path: String,
    pub segments: Vec<String>,
    /// First-seen order across raw paths and verbs
    pub operations: Vec<Operation>,
}

/// Routes keyed by canonical path, iterated in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteTable {
    routes: Vec<Route>,
    index: HashMap<String, usize>,
}

impl RouteTable {
    /// Append `operations` to the route for `path`, creating it on first sight.
    ///
    /// Operations are appended even when an identical verb is already present:
    /// two raw paths that normalize the same contribute all of their operations.
    #[must_use]
    pub fn with_operations(
        mut self,
        path: NormalizedPath,
        raw_path: &str,
        operations: Vec<Operation>,
    ) -> Self {
        match self.index.get(&path.canonical) {
            Some(&slot) => self.routes[slot].operations.extend(operations),
            None => {
                self.index.insert(path.canonical.clone(), self.routes.len());
                self.routes.push(Route {
                    canonical_path: path.canonical,
                    raw_path: raw_path.to_string(),
                    segments: path.segments,
                    operations,
                });
            }
        }
        self
    }

    pub fn get(&self, canonical_path: &str) -> Option<&Route> {
        self.index.get(canonical_path).map(|&slot| &self.routes[slot])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

impl Serialize for RouteTable {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.routes
                .iter()
                .map(|route| (route.canonical_path.as_str(), route)),
        )
    }
}

/// Build one [`Route`] per canonical path of the document.
///
/// Raw paths are visited in document order and verbs in [`super::VERBS`]
/// order, so the same document always yields the same table. Unknown keys on
/// a path item are ignored.
pub fn build_routes(document: &ApiDocument) -> RouteTable {
    let table = document
        .paths
        .iter()
        .fold(RouteTable::default(), |table, item| {
            let normalized = normalize(&item.raw_path);
            table.with_operations(normalized, &item.raw_path, item.operations().collect())
        });
    debug!(
        raw_paths = document.paths.len(),
        routes = table.len(),
        "Built route table"
    );
    table
}
