// PHP lowering - tree-sitter-php concrete syntax tree to SyntaxNode
// Main orchestrator and parser entry point

mod functions;
mod helpers;
mod literals;
mod members;
mod namespaces;
mod types;

use crate::error::ParseError;
use crate::extractors::base::BaseExtractor;
use crate::extractors::syntax::SyntaxNode;
use crate::extractors::SourceParser;
use tree_sitter::{Node, Parser, Tree};

use functions::{lower_function, lower_method};
use members::{lower_constant, lower_property};
use namespaces::{lower_namespace, lower_use};
use types::lower_class_like;

/// PHP source parser backed by tree-sitter-php
pub struct PhpParser {
    parser: Parser,
}

impl PhpParser {
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_php::LANGUAGE_PHP.into())
            .map_err(|e| ParseError::new(format!("Failed to load PHP grammar: {}", e)))?;
        Ok(Self { parser })
    }
}

impl SourceParser for PhpParser {
    fn parse(&mut self, content: &str) -> Result<Vec<SyntaxNode>, ParseError> {
        let tree = self
            .parser
            .parse(content, None)
            .ok_or_else(|| ParseError::new("Parser produced no syntax tree"))?;

        let extractor = PhpExtractor::new(content);
        if let Some(line) = extractor.base.first_error_line(&tree.root_node()) {
            return Err(ParseError::at_line(line));
        }

        Ok(extractor.lower_tree(&tree))
    }
}

/// Lowering context for one parsed file
pub struct PhpExtractor<'a> {
    base: BaseExtractor<'a>,
}

impl<'a> PhpExtractor<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            base: BaseExtractor::new(content),
        }
    }

    /// Lower every top-level statement of a parsed file
    pub fn lower_tree(&self, tree: &Tree) -> Vec<SyntaxNode> {
        self.lower_children(tree.root_node())
    }

    /// Lower the named children of a node, dropping those that carry nothing
    pub(super) fn lower_children(&self, node: Node) -> Vec<SyntaxNode> {
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        children
            .into_iter()
            .filter_map(|child| self.lower_node(child))
            .collect()
    }

    /// Recursive node visitor
    fn lower_node(&self, node: Node) -> Option<SyntaxNode> {
        match node.kind() {
            "namespace_definition" => Some(lower_namespace(self, node)),
            "namespace_use_declaration" => Some(lower_use(self, node)),
            "class_declaration" | "interface_declaration" | "trait_declaration"
            | "enum_declaration" => lower_class_like(self, node),
            "function_definition" => lower_function(self, node),
            "method_declaration" => lower_method(self, node),
            "property_declaration" => Some(lower_property(self, node)),
            "const_declaration" => Some(lower_constant(self, node)),
            "comment" | "text" | "php_tag" | "text_interpolation" => None,
            _ => {
                let children = self.lower_children(node);
                if children.is_empty() {
                    None
                } else {
                    Some(SyntaxNode::Other { children })
                }
            }
        }
    }

    pub(super) fn get_base(&self) -> &BaseExtractor<'a> {
        &self.base
    }
}
