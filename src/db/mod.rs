//! Database boundary: cached connection, execution, result shaping.

pub mod connection;
pub mod executor;
pub mod result;

pub use connection::DbHandle;
pub use executor::QueryExecutor;
pub use result::{QueryResult, QueryStatus, ResultData};
