mod client;
mod csv;
mod designs;
mod forces;

pub use client::ClientConnector;
pub use csv::{MaterialColumn, MaterialCsvConnector};
pub use designs::DesignConnector;
pub use forces::ForceConnector;
