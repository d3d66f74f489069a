// Base extractor shared by the tree-sitter lowering
//
// - extractor.rs: BaseExtractor (node text, doc comments, line numbers)
// - tree_methods.rs: Tree navigation helpers

pub mod extractor;
pub mod tree_methods;

pub use extractor::BaseExtractor;
