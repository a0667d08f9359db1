pub mod query;
pub mod sections;
