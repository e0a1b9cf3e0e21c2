use serde::Serialize;

/// A path template with empty segments removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct NormalizedPath {
    /// Segments joined with `/`, no leading or trailing slash (e.g. `pets/{id}`)
    pub canonical: String,
    pub segments: Vec<String>,
}

/// Normalize a raw path template.
///
/// Leading, trailing and repeated slashes are all treated as empty segments
/// and dropped. A path with no segments normalizes to the empty string.
pub fn normalize(raw_path: &str) -> NormalizedPath {
    let segments: Vec<String> = raw_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect();
    NormalizedPath {
        canonical: segments.join("/"),
        segments,
    }
}
