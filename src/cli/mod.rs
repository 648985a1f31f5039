mod export;

pub use export::{ExportArgs, export};
