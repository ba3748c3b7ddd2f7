//! Generic document tree and the YAML loader that builds it.
pub mod loader;
pub mod node;

pub use loader::{load_path, load_reader, load_str};
pub use node::{Mapping, Node, Scalar};
