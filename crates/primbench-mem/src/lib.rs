//! primbench-mem: benchmarks that measure the language rather than a library
//!
//! - `memory`: passing and returning fixed-size arrays by value vs by reference
//! - `shared`: read-mostly shared state behind different synchronisation primitives
//! - `ffi`: cost of calling an empty C function vs an empty Rust function

pub mod ffi;
pub mod memory;
pub mod shared;

pub use memory::Blob;
pub use shared::SharedMap;
