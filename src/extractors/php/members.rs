// PHP lowering - Property and constant declarations

use super::helpers::{extract_modifiers, find_type, lower_type, variable_name};
use super::literals::lower_expr;
use super::PhpExtractor;
use crate::extractors::syntax::{
    ConstEntry, ConstNode, Expr, PropertyEntry, PropertyNode, SyntaxNode,
};
use tree_sitter::Node;

/// Lower a property statement, one entry per declared name
pub(super) fn lower_property(extractor: &PhpExtractor, node: Node) -> SyntaxNode {
    let base = extractor.get_base();
    let type_ref = find_type(extractor, &node).and_then(|t| lower_type(extractor, &t));

    let entries = base
        .find_children_by_type(&node, "property_element")
        .iter()
        .map(|element| PropertyEntry {
            name: variable_name(extractor, element),
            default: property_default(extractor, element),
        })
        .collect();

    SyntaxNode::Property(PropertyNode {
        modifiers: extract_modifiers(extractor, &node),
        type_ref,
        entries,
    })
}

fn property_default(extractor: &PhpExtractor, element: &Node) -> Option<Expr> {
    let base = extractor.get_base();
    let value = element
        .child_by_field_name("default_value")
        .or_else(|| {
            base.find_child_by_type(element, "property_initializer")
                .and_then(|init| base.find_value_after_assignment(&init))
        })
        .or_else(|| base.find_value_after_assignment(element))?;
    Some(lower_expr(extractor, &value))
}

/// Lower a `const` statement, one entry per `const_element`
pub(super) fn lower_constant(extractor: &PhpExtractor, node: Node) -> SyntaxNode {
    let base = extractor.get_base();

    let entries = base
        .find_children_by_type(&node, "const_element")
        .iter()
        .filter_map(|element| {
            let name_node = base.find_child_by_type(element, "name")?;
            let value = base
                .find_value_after_assignment(element)
                .map(|value| lower_expr(extractor, &value))
                .unwrap_or(Expr::Other);
            Some(ConstEntry {
                name: base.get_node_text(&name_node),
                value,
            })
        })
        .collect();

    SyntaxNode::ClassConst(ConstNode { entries })
}
