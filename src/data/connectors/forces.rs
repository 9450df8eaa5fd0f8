use crate::data::tables::ForceTable;
use crate::error::{LegforgeError, Result};
use std::path::Path;

/// Reads the per-component force table.
///
/// A block starts with a `# ComponentName` header line and runs until the next blank line.
/// Each line inside a block is `key [...] value`; the value is the last token and must be an
/// integer. Lines starting with `##` are comments.
pub struct ForceConnector;

impl ForceConnector {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ForceTable> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            LegforgeError::DataLoading(format!(
                "Failed to read force table {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let table = Self::parse(&contents)?;
        log::info!(
            "Loaded force cases for {} components from {}",
            table.len(),
            path.as_ref().display()
        );
        Ok(table)
    }

    pub fn parse(contents: &str) -> Result<ForceTable> {
        let mut table = ForceTable::new();
        let mut current: Option<String> = None;

        for (line_no, line) in contents.lines().enumerate() {
            let tokens: Vec<&str> = line.split_whitespace().collect();

            let Some(first) = tokens.first() else {
                current = None;
                continue;
            };
            if first.starts_with("##") {
                continue;
            }

            if *first == "#" {
                let name = tokens.get(1).ok_or_else(|| {
                    LegforgeError::DataLoading(format!(
                        "Force table line {}: header without component name",
                        line_no + 1
                    ))
                })?;
                current = Some(name.to_string());
                continue;
            }

            let Some(component) = current.as_deref() else {
                continue;
            };

            let raw = tokens.last().copied().unwrap_or_default();
            let value: i64 = raw.parse().map_err(|_| {
                LegforgeError::DataLoading(format!(
                    "Force table line {}: '{}' is not an integer",
                    line_no + 1,
                    raw
                ))
            })?;
            table.insert(component, first, value);
        }

        Ok(table)
    }
}
