//! Template materialization pipeline
//!
//! - `plan`: Maps the template tree onto the project root, applying the copy policy
//! - `operation`: Defines operations to be performed on the project root
//! - `processor`: Turns planned entries into operations, resolving placeholders
//! - `materializer`: Applies operations to disk

pub mod materializer;
pub mod operation;
pub mod plan;
pub mod processor;
