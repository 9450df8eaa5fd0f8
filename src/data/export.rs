use crate::engines::metrics::{GenerationStats, PopulationReport};
use crate::error::{LegforgeError, Result};
use chrono::{DateTime, Local};
use polars::df;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// Writes per-generation statistics and end-of-run reports into an export directory.
pub struct StatsExporter {
    dir: PathBuf,
    stamp: String,
}

impl StatsExporter {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self::with_time(dir, Local::now())
    }

    /// Exporter whose file names carry the given timestamp.
    pub fn with_time<P: AsRef<Path>>(dir: P, time: DateTime<Local>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            stamp: time.format("%-m-%-d-%Y_%H%M").to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn stats_path(&self, run: usize) -> PathBuf {
        self.dir.join(format!("gen_data_{}_run{}.csv", self.stamp, run))
    }

    pub fn report_path(&self, run: usize) -> PathBuf {
        self.dir.join(format!("population_{}_run{}.json", self.stamp, run))
    }

    pub fn stats_frame(history: &[GenerationStats]) -> Result<DataFrame> {
        let df = df!(
            "generation" => history.iter().map(|s| s.generation as u64).collect::<Vec<_>>(),
            "population" => history.iter().map(|s| s.population_count as u64).collect::<Vec<_>>(),
            "valid" => history.iter().map(|s| s.valid_count as u64).collect::<Vec<_>>(),
            "max_fitness" => history.iter().map(|s| s.max_fitness).collect::<Vec<_>>(),
            "min_fitness" => history.iter().map(|s| s.min_fitness).collect::<Vec<_>>(),
            "total_fitness" => history.iter().map(|s| s.total_fitness).collect::<Vec<_>>(),
            "average_fitness" => history.iter().map(|s| s.average_fitness).collect::<Vec<_>>(),
        )?;
        Ok(df)
    }

    pub fn write_stats(&self, run: usize, history: &[GenerationStats]) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.stats_path(run);
        let mut df = Self::stats_frame(history)?;
        let mut file = File::create(&path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df)
            .map_err(|e| LegforgeError::DataLoading(format!("Failed to write {}: {}", path.display(), e)))?;

        log::info!("Wrote {} generation rows to {}", history.len(), path.display());
        Ok(path)
    }

    pub fn write_report(&self, report: &PopulationReport) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self.report_path(report.run);
        let file = File::create(&path)?;
        serde_json::to_writer_pretty(file, report)?;

        log::info!("Wrote population report ({} members) to {}", report.members.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stats(generation: usize, total: f64) -> GenerationStats {
        GenerationStats {
            generation,
            population_count: 4,
            valid_count: 3,
            max_fitness: total / 2.0,
            min_fitness: 0.0,
            total_fitness: total,
            average_fitness: total / 4.0,
        }
    }

    #[test]
    fn test_file_names() {
        let time = Local.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).unwrap();
        let exporter = StatsExporter::with_time("out", time);
        assert_eq!(exporter.stats_path(0), PathBuf::from("out/gen_data_3-7-2024_0905_run0.csv"));
        assert_eq!(exporter.report_path(2), PathBuf::from("out/population_3-7-2024_0905_run2.json"));
    }

    #[test]
    fn test_write_stats_csv() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = StatsExporter::new(dir.path());
        let path = exporter.write_stats(0, &[stats(0, 40.0), stats(1, 80.0)]).unwrap();

        let text = fs::read_to_string(path).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "generation,population,valid,max_fitness,min_fitness,total_fitness,average_fitness"
        );
        assert!(lines.next().unwrap().starts_with("0,4,3,20"));
        assert!(lines.next().unwrap().starts_with("1,4,3,40"));
    }
}
