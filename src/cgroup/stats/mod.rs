//! Reading and parsing of cgroup v1 memory controller files.
//!
//! # Main items
//!
//! - [`read_single_value`]: reads one numeric pseudo-file such as `memory.failcnt`.
//! - [`read_memory_stat`]: streams the `<key> <value>` pairs of `memory.stat`.
//! - [`parse_single_value`], [`split_stat_line`], [`parse_stat_value`] and
//!   [`for_each_stat_pair`]: the pure parsing steps underneath.
//!
//! Every function returns a `Result`; deciding what to do with a failure is
//! left to the caller.

mod error;
mod memory;
mod parser;

pub use error::{StatParseError, StatReadError};
pub use memory::{read_memory_stat, read_single_value};
pub use parser::{for_each_stat_pair, parse_single_value, parse_stat_value, split_stat_line};
