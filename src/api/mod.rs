pub mod summary;
pub mod workers;
