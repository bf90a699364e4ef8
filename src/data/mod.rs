//! Data module - ADP CSV loading, cleaning and record conversion

mod loader;
mod processor;
pub(crate) mod record;

pub use loader::{read_adp_csv, LoaderError};
pub use processor::{AdpProcessor, ProcessorError};
pub use record::{to_records, AdpRecord};
