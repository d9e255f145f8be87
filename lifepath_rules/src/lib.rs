//! # Lifepath Rules
//!
//! The data crate for the lifepath engine: node definitions, the authored record
//! format, and the immutable choice graph built from it. This crate holds no
//! session state; walking the graph is `lifepath_core`'s job.
//!
//! ## Core Components
//!
//! - **node**: Node identifiers, tags, and validated decision nodes
//! - **records**: The input record shape and loading of authored data groups
//! - **graph**: The read-only `ChoiceGraph` with id lookup
//! - **error**: `DataError` and `GraphError`

pub mod error;
pub mod graph;
pub mod node;
pub mod records;

pub use error::*;
pub use graph::*;
pub use node::*;
pub use records::*;
