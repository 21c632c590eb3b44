//! `recordkeep-core` — shared building blocks for the record stores.
//!
//! Holds the pieces both stores agree on: the error model, the [`Record`]
//! display contract, field validators and the flat-file ingestion engine.
//! No store state lives here.

pub mod error;
pub mod ingest;
pub mod record;
pub mod validate;

pub use error::{RecordError, RecordResult};
pub use ingest::{
    FlatFileFormat, IngestError, IngestReport, LineError, SkippedLine, ingest_file, parse_field,
    require,
};
pub use record::{Record, render_table};
