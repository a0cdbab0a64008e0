pub mod ingestion;
pub mod normalizer;
