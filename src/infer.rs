//! Purpose: Key and plural-path inference for schema declarations.
//! Exports: `infer_key`, `infer_plural_path`.
//! Role: Single seam around the `Inflector` crate so inference policy stays in one place.
//! Invariants: Inference runs at definition time only; decode never consults it.

use inflector::Inflector;

/// Derive an output key from a path expression: drop attribute markers,
/// snake-case the rest, and trim stray separators so boundary-adjacent
/// input never produces doubled underscores.
pub fn infer_key(path: &str) -> String {
    let stripped: String = path.chars().filter(|&ch| ch != '@').collect();
    stripped.to_snake_case().trim_matches('_').to_string()
}

/// Given a path addressing a repeating parent container, derive the repeated
/// child path by singularizing the final segment and appending it.
pub fn infer_plural_path(path: &str) -> String {
    let last = path.rsplit('/').next().unwrap_or(path);
    format!("{path}/{}", last.to_singular())
}
