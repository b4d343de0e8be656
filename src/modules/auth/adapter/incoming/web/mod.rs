pub mod extractors;
