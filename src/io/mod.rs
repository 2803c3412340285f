//! I/O module
//!
//! Handles line parsing and batched reading of the transaction source.
//!
//! # Components
//!
//! - `line_parser` - Pure validation of one raw line into a record
//! - `source` - Async line source with header skip and batch reading

pub mod line_parser;
pub mod source;

pub use line_parser::parse_line;
pub use source::TransactionSource;
