// PHP lowering - Class-like declarations (classes, interfaces, traits, enums)

use super::PhpExtractor;
use crate::extractors::syntax::{ClassKind, ClassNode, SyntaxNode};
use tree_sitter::Node;

pub(super) fn lower_class_like(extractor: &PhpExtractor, node: Node) -> Option<SyntaxNode> {
    let kind = match node.kind() {
        "class_declaration" => ClassKind::Class,
        "interface_declaration" => ClassKind::Interface,
        "trait_declaration" => ClassKind::Trait,
        "enum_declaration" => ClassKind::Enum,
        _ => return None,
    };

    let base = extractor.get_base();
    let name = node
        .child_by_field_name("name")
        .or_else(|| base.find_child_by_type(&node, "name"))
        .map(|n| base.get_node_text(&n))
        .unwrap_or_default();

    let body = node
        .child_by_field_name("body")
        .or_else(|| {
            base.find_child_by_types(&node, &["declaration_list", "enum_declaration_list"])
        })
        .map(|body| extractor.lower_children(body))
        .unwrap_or_default();

    Some(SyntaxNode::Class(ClassNode { kind, name, body }))
}
