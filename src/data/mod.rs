pub mod connectors;
pub mod export;
pub mod tables;

pub use connectors::{ClientConnector, DesignConnector, ForceConnector, MaterialCsvConnector};
pub use export::StatsExporter;
pub use tables::{ClientParameters, DesignTables, ForceTable, LimbParameters, Material, MaterialTable};
