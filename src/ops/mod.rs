pub mod path;
pub mod tree_ops;
