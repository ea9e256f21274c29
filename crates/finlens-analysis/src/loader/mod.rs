//! Dataset loading: CSV input with a validated column mapping, and a
//! caller-controlled memoizing cache.

pub mod cache;
pub mod csv_loader;

pub use cache::DatasetCache;
pub use csv_loader::CsvLoader;
