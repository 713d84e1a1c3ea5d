pub mod blocking_queries;
pub mod queries;
pub mod schema;
