pub mod integrations;
pub mod skos;
