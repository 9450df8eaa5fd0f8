use crate::data::tables::ClientParameters;
use crate::error::{LegforgeError, Result};
use polars::prelude::*;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

/// Reads client parameters: each CSV row holds `name,value` pairs, and a cell starting with
/// `##` ends the row.
pub struct ClientConnector;

impl ClientConnector {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<ClientParameters> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            LegforgeError::DataLoading(format!(
                "Failed to read client parameters {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let params = Self::parse(&contents)?;
        log::info!(
            "Loaded {} client parameters from {}",
            params.len(),
            path.as_ref().display()
        );
        Ok(params)
    }

    pub fn parse(contents: &str) -> Result<ClientParameters> {
        let df = Self::read_cells(contents)?;
        let mut values = HashMap::new();

        let columns = df
            .get_columns()
            .iter()
            .map(|col| Ok(col.str()?.into_iter().collect::<Vec<_>>()))
            .collect::<Result<Vec<Vec<Option<&str>>>>>()?;

        for row in 0..df.height() {
            let cells: Vec<&str> = columns
                .iter()
                .map(|col| col[row].map(str::trim).unwrap_or_default())
                .collect();

            for pair in cells.chunks(2) {
                let name = pair[0];
                if name.starts_with("##") {
                    break;
                }
                if name.is_empty() {
                    continue;
                }
                let raw = pair.get(1).copied().unwrap_or_default();
                let value: f64 = raw.parse().map_err(|_| {
                    LegforgeError::DataLoading(format!(
                        "Client parameters row {}: '{}' has non-numeric value '{}'",
                        row + 1,
                        name,
                        raw
                    ))
                })?;
                values.insert(name.to_string(), value);
            }
        }

        Ok(ClientParameters::new(values))
    }

    /// Read every cell as text. Rows are ragged, so the frame is as wide as the longest row
    /// and short rows are padded with nulls.
    fn read_cells(contents: &str) -> Result<DataFrame> {
        let width = contents
            .lines()
            .map(|line| line.matches(',').count() + 1)
            .max()
            .unwrap_or(0);
        if width == 0 {
            return Ok(DataFrame::empty());
        }

        let schema = Schema::from_iter(
            (1..=width).map(|i| Field::new(format!("column_{}", i).into(), DataType::String)),
        );

        CsvReadOptions::default()
            .with_has_header(false)
            .with_schema(Some(Arc::new(schema)))
            .into_reader_with_file_handle(Cursor::new(contents.as_bytes().to_vec()))
            .finish()
            .map_err(|e| LegforgeError::DataLoading(format!("Failed to read client parameters: {}", e)))
    }
}
