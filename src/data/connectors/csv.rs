use crate::data::tables::{Material, MaterialTable};
use crate::error::{LegforgeError, Result};
use polars::prelude::*;
use std::path::Path;

/// Columns of the material-property table after header normalisation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialColumn {
    Id,
    Name,
    Treatment,
    Cost,
    Density,
    UltimateTensileStrength,
    YieldStrength,
    ElasticModulus,
    PoissonsRatio,
}

impl MaterialColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Treatment => "treatment",
            Self::Cost => "cost",
            Self::Density => "density",
            Self::UltimateTensileStrength => "ultimate_tensile_strength",
            Self::YieldStrength => "yield_strength",
            Self::ElasticModulus => "elastic_modulus",
            Self::PoissonsRatio => "poissons_ratio",
        }
    }

    pub fn required() -> Vec<Self> {
        vec![Self::Id, Self::Name, Self::Density, Self::YieldStrength]
    }
}

pub struct MaterialCsvConnector;

impl MaterialCsvConnector {
    /// Load the material CSV. The row after the header holds units and is skipped.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<MaterialTable> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_skip_rows_after_header(1)
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| {
                LegforgeError::DataLoading(format!(
                    "Failed to read material CSV {}: {}",
                    path.as_ref().display(),
                    e
                ))
            })?;

        let table = Self::from_dataframe(Self::normalize_columns(df)?)?;
        log::info!(
            "Loaded {} materials from {}",
            table.len(),
            path.as_ref().display()
        );
        Ok(table)
    }

    /// Lower-case header labels and join their words with underscores
    /// ("Yield Strength" -> "yield_strength").
    pub fn normalize_columns(mut df: DataFrame) -> Result<DataFrame> {
        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();

        for actual_name in names {
            let standard_name = Self::normalize_label(&actual_name);
            if actual_name != standard_name {
                df.rename(&actual_name, standard_name.into())
                    .map_err(|e| LegforgeError::DataLoading(format!("Failed to rename column: {}", e)))?;
            }
        }

        Ok(df)
    }

    pub fn normalize_label(label: &str) -> String {
        label
            .split_whitespace()
            .map(|word| word.to_lowercase())
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Build the table from a normalised frame. Rows whose id is not an integer (label rows)
    /// are skipped; non-numeric cells in optional numeric columns become `None`.
    pub fn from_dataframe(df: DataFrame) -> Result<MaterialTable> {
        let columns = df.get_column_names();
        for required in MaterialColumn::required() {
            if !columns.iter().any(|col| col.as_str() == required.as_str()) {
                return Err(LegforgeError::DataLoading(format!(
                    "Missing required material column: {}",
                    required.as_str()
                )));
            }
        }

        let ids = Self::float_column(&df, MaterialColumn::Id)?;
        let names = Self::text_column(&df, MaterialColumn::Name)?;
        let treatments = Self::text_column(&df, MaterialColumn::Treatment)?;
        let costs = Self::float_column(&df, MaterialColumn::Cost)?;
        let densities = Self::float_column(&df, MaterialColumn::Density)?;
        let ultimate = Self::float_column(&df, MaterialColumn::UltimateTensileStrength)?;
        let yields = Self::float_column(&df, MaterialColumn::YieldStrength)?;
        let moduli = Self::float_column(&df, MaterialColumn::ElasticModulus)?;
        let poissons = Self::float_column(&df, MaterialColumn::PoissonsRatio)?;

        let mut materials = Vec::new();
        for row in 0..df.height() {
            let id = match ids[row] {
                Some(id) if id >= 0.0 && id.fract() == 0.0 => id as u32,
                _ => continue,
            };

            let name = names[row].clone().unwrap_or_default();
            let density = densities[row].ok_or_else(|| {
                LegforgeError::DataLoading(format!("Material {} ({}) has no numeric density", id, name))
            })?;
            let yield_strength = yields[row].ok_or_else(|| {
                LegforgeError::DataLoading(format!(
                    "Material {} ({}) has no numeric yield strength",
                    id, name
                ))
            })?;

            if costs[row].is_none() {
                log::warn!("Material {} ({}) has no numeric cost, default cost applies", id, name);
            }

            materials.push(Material {
                id,
                name,
                treatment: treatments[row].clone().unwrap_or_default(),
                cost: costs[row],
                density,
                ultimate_tensile_strength: ultimate[row],
                yield_strength,
                elastic_modulus: moduli[row],
                poissons_ratio: poissons[row],
            });
        }

        if materials.is_empty() {
            return Err(LegforgeError::DataLoading(
                "Material table contains no material rows".to_string(),
            ));
        }

        Ok(MaterialTable::new(materials))
    }

    // Helper functions
    fn has_column(df: &DataFrame, column: MaterialColumn) -> bool {
        df.get_column_names()
            .iter()
            .any(|col| col.as_str() == column.as_str())
    }

    fn float_column(df: &DataFrame, column: MaterialColumn) -> Result<Vec<Option<f64>>> {
        if !Self::has_column(df, column) {
            return Ok(vec![None; df.height()]);
        }
        let values = df.column(column.as_str())?.cast(&DataType::Float64)?;
        Ok(values.f64()?.into_iter().collect())
    }

    fn text_column(df: &DataFrame, column: MaterialColumn) -> Result<Vec<Option<String>>> {
        if !Self::has_column(df, column) {
            return Ok(vec![None; df.height()]);
        }
        let values = df.column(column.as_str())?.cast(&DataType::String)?;
        Ok(values
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.trim().to_string()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;

    #[test]
    fn test_normalize_label() {
        assert_eq!(MaterialCsvConnector::normalize_label("Yield Strength"), "yield_strength");
        assert_eq!(
            MaterialCsvConnector::normalize_label("  Ultimate Tensile  Strength "),
            "ultimate_tensile_strength"
        );
        assert_eq!(MaterialCsvConnector::normalize_label("ID"), "id");
    }

    #[test]
    fn test_from_dataframe() {
        let df = df! {
            "ID" => &["#metals", "1", "2"],
            "Name" => &["", "Steel 1018", "Al 6061"],
            "Treatment" => &["", "Cold Drawn", "T6"],
            "Cost" => &["", "1.2", "N/A"],
            "Density" => &["", "7870", "2700"],
            "Yield Strength" => &["", "370", "276"],
        }
        .unwrap();

        let df = MaterialCsvConnector::normalize_columns(df).unwrap();
        let table = MaterialCsvConnector::from_dataframe(df).unwrap();

        assert_eq!(table.len(), 2);
        let steel = table.get(1).unwrap();
        assert_eq!(steel.name, "Steel 1018");
        assert_eq!(steel.cost, Some(1.2));
        assert_eq!(steel.yield_strength, 370.0);
        assert_eq!(steel.elastic_modulus, None);

        let aluminium = table.get(2).unwrap();
        assert_eq!(aluminium.cost, None);
        assert_eq!(aluminium.treatment, "T6");
    }

    #[test]
    fn test_missing_required_column() {
        let df = df! {
            "id" => &[1i64],
            "name" => &["Steel"],
            "density" => &[7850.0],
        }
        .unwrap();

        let result = MaterialCsvConnector::from_dataframe(df);
        assert!(matches!(result, Err(LegforgeError::DataLoading(_))));
    }
}
