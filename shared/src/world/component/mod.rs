pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod replicate;
pub mod schema;
pub mod value;
