pub mod tree;

pub use tree::{Document, NodeId};
