//! Conversion options and their text/file sources

use crate::error::{ConvertError, Result};
use gltf_assembler::{ColorPolicy, EmptyGeometryPolicy, Rgba};
use hashbrown::HashMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Generator string written into `asset.generator`
pub const GENERATOR: &str = concat!("obj2gltf ", env!("CARGO_PKG_VERSION"));

/// What to do when one file of a batch fails to load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchFailurePolicy {
    /// Log, record in the report and continue with the next file
    #[default]
    Skip,
    /// Stop at the first failure without writing anything
    Abort,
}

/// Everything a conversion needs besides the source path
#[derive(Debug)]
pub struct ConvertOptions {
    /// Explicit output path
    pub output: Option<PathBuf>,
    /// File names skipped in batch mode (exact match)
    pub exclude: Vec<String>,
    pub color_policy: ColorPolicy,
    pub empty_geometry: EmptyGeometryPolicy,
    pub batch_failure: BatchFailurePolicy,
    pub generator: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output: None,
            exclude: Vec::new(),
            color_policy: ColorPolicy::Default,
            empty_geometry: EmptyGeometryPolicy::Allow,
            batch_failure: BatchFailurePolicy::Skip,
            generator: GENERATOR.to_string(),
        }
    }
}

/// Per-name color table file
///
/// ```toml
/// [colors]
/// chair = [1.0, 0.0, 0.0, 1.0]
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct ColorTable {
    #[serde(default)]
    pub colors: HashMap<String, Rgba>,
}

impl ColorTable {
    /// Load a color table from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConvertError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::parse(&content).map_err(|message| ConvertError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Parse a color table from TOML text
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    pub fn into_policy(self) -> ColorPolicy {
        ColorPolicy::PerName(self.colors)
    }
}

/// Split a list argument that may be written as `a,b`, `[a, b]` or `['a','b']`.
///
/// Brackets, quotes and surrounding whitespace are removed; empty entries are dropped.
pub fn parse_list(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .map(|item| {
            item.trim()
                .trim_matches(|c: char| c == '[' || c == ']')
                .trim()
                .trim_matches(|c: char| c == '"' || c == '\'')
                .to_string()
        })
        .filter(|item| !item.is_empty())
        .collect()
}

/// Parse an RGBA color argument such as `[1,0,0,1]` or `0.2, 0.4, 0.6, 1`
pub fn parse_color(value: &str) -> std::result::Result<Rgba, String> {
    let components = parse_list(&[value.to_string()])
        .iter()
        .map(|c| {
            c.parse::<f32>()
                .map_err(|_| format!("invalid color component {c:?}"))
        })
        .collect::<std::result::Result<Vec<f32>, String>>()?;

    <Rgba>::try_from(components.as_slice()).map_err(|_| {
        format!(
            "expected 4 color components (r,g,b,a), got {}",
            components.len()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_forms() {
        let bracketed = parse_list(&["[a.obj,b.obj]".to_string()]);
        assert_eq!(bracketed, vec!["a.obj", "b.obj"]);

        let spaced = parse_list(&["[ 'a.obj', \"b.obj\" ]".to_string()]);
        assert_eq!(spaced, vec!["a.obj", "b.obj"]);

        let multiple = parse_list(&["a.obj".to_string(), "b.obj,".to_string()]);
        assert_eq!(multiple, vec!["a.obj", "b.obj"]);
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("[1,0,0,1]").unwrap(), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(parse_color("0.2, 0.4, 0.6, 1").unwrap(), [0.2, 0.4, 0.6, 1.0]);
    }

    #[test]
    fn test_parse_color_rejects_wrong_arity() {
        assert!(parse_color("[1,0,0]").unwrap_err().contains("got 3"));
        assert!(parse_color("[1,0,0,1,1]").is_err());
        assert!(parse_color("[red,0,0,1]").unwrap_err().contains("red"));
    }

    #[test]
    fn test_color_table_parse() {
        let table = ColorTable::parse(
            r#"
[colors]
chair = [1.0, 0.0, 0.0, 1.0]
table = [0.2, 0.4, 0.6, 0.5]
"#,
        )
        .unwrap();
        assert_eq!(table.colors.len(), 2);
        assert_eq!(table.colors["table"], [0.2, 0.4, 0.6, 0.5]);
    }

    #[test]
    fn test_color_table_rejects_short_color() {
        assert!(ColorTable::parse("[colors]\nchair = [1.0, 0.0]\n").is_err());
    }

    #[test]
    fn test_default_options() {
        let options = ConvertOptions::default();
        assert!(matches!(options.color_policy, ColorPolicy::Default));
        assert_eq!(options.batch_failure, BatchFailurePolicy::Skip);
        assert!(options.generator.starts_with("obj2gltf"));
    }
}
