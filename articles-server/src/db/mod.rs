//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool (bounded) - no Arc<Mutex<Connection>>
//! - Rely on DB constraints, handle conflicts - no check-then-insert
//! - Absent rows are `None`, never a default-valued record

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::create_pool;
pub use repos::*;
