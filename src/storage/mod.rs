//! Database access: connection pool and CRUD for users, leads and homeworks

pub mod db;

pub use db::{create_pool, get_connection, DbConnection, DbPool};
