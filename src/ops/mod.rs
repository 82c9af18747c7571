pub mod extract;
pub mod group;
pub mod probe;
pub mod rewrite;
