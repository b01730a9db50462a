pub mod transaction;
pub mod worker;
