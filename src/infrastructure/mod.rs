// Infrastructure layer module
// Contains the database adapter: connection setup, schema and repositories

pub mod database;
pub mod repositories;
