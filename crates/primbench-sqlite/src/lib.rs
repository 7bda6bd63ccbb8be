//! primbench-sqlite: SQLite throughput harnesses
//!
//! - `load`: concurrent readers and writers against one WAL database for a fixed time
//! - `enum_table`: INT vs TEXT enum columns over an indexed in-memory table
//! - `options`: connection options shared by both
//! - `timestamp`: millisecond timestamps stored as INTEGER

pub mod enum_table;
pub mod load;
pub mod options;
pub mod timestamp;

pub use enum_table::{EnumTable, Status};
pub use load::{LoadReport, LoadRunner};
pub use timestamp::Timestamp;
