pub mod return_stmt;

pub use return_stmt::ReturnStmt;
