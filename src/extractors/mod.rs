//! Structural extraction for PHP source files
//!
//! # Architecture
//!
//! Extraction runs in two stages:
//! - `php` - tree-sitter-php parser that lowers the concrete syntax tree into [`syntax::SyntaxNode`]s
//! - `declarations` / `members` - pure walks over the lowered tree producing declaration records
//!
//! Supporting modules:
//! - `base` - node text, doc comment and tree navigation helpers used during lowering
//! - `source` - line-indexed view used to slice method source text
//! - `syntax` - the lowered syntax model

pub mod base;
pub mod declarations;
pub mod members;
pub mod php;
pub mod source;
pub mod syntax;

use crate::error::ParseError;
use syntax::SyntaxNode;

pub use declarations::{extract_declarations, RawDeclaration};
pub use members::{ClassMembers, ConstantRecord, MethodRecord, ParameterRecord, PropertyRecord, Visibility};
pub use php::PhpParser;

/// Turns file content into a lowered syntax tree
pub trait SourceParser {
    fn parse(&mut self, content: &str) -> Result<Vec<SyntaxNode>, ParseError>;
}
