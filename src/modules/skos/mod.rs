//! SKOS/RDF-XML ingestion: element tree and record extraction

pub mod parser;
pub mod xml;

pub use parser::{parse_dataset, parse_dataset_file};
