use crate::error::{LegforgeError, Result};
use crate::population::MemberDesign;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Accepted seed file layouts: a bare list of designs, or an exported population report whose
/// members carry their designs.
#[derive(Deserialize)]
#[serde(untagged)]
enum SeedFile {
    Designs(Vec<MemberDesign>),
    Report { members: Vec<ReportedMember> },
}

#[derive(Deserialize)]
struct ReportedMember {
    design: MemberDesign,
}

/// Reads stored member designs used to seed a run's initial population.
pub struct DesignConnector;

impl DesignConnector {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<MemberDesign>> {
        let file = File::open(path.as_ref()).map_err(|e| {
            LegforgeError::DataLoading(format!(
                "Failed to open seed designs {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let designs = Self::from_reader(BufReader::new(file))?;
        log::info!(
            "Loaded {} seed designs from {}",
            designs.len(),
            path.as_ref().display()
        );
        Ok(designs)
    }

    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Vec<MemberDesign>> {
        let designs = match serde_json::from_reader(reader)? {
            SeedFile::Designs(designs) => designs,
            SeedFile::Report { members } => members.into_iter().map(|m| m.design).collect(),
        };
        Ok(designs)
    }
}
