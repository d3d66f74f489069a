// PHP lowering - Function, method and parameter declarations

use super::helpers::{find_type, lower_type, variable_name};
use super::PhpExtractor;
use crate::extractors::syntax::{FunctionNode, MethodNode, Parameter, Span, SyntaxNode};
use tree_sitter::Node;

/// Lower a free function declaration
pub(super) fn lower_function(extractor: &PhpExtractor, node: Node) -> Option<SyntaxNode> {
    Some(SyntaxNode::Function(FunctionNode {
        name: function_name(extractor, &node)?,
        params: lower_parameters(extractor, &node),
        body: lower_body(extractor, &node),
    }))
}

/// Lower a method declaration, keeping its doc comment and line span
pub(super) fn lower_method(extractor: &PhpExtractor, node: Node) -> Option<SyntaxNode> {
    let base = extractor.get_base();
    Some(SyntaxNode::Method(MethodNode {
        name: function_name(extractor, &node)?,
        params: lower_parameters(extractor, &node),
        doc: base.find_doc_comment(&node),
        span: Span::new(base.start_line(&node), base.end_line(&node)),
        body: lower_body(extractor, &node),
    }))
}

fn function_name(extractor: &PhpExtractor, node: &Node) -> Option<String> {
    let base = extractor.get_base();
    node.child_by_field_name("name")
        .or_else(|| base.find_child_by_type(node, "name"))
        .map(|n| base.get_node_text(&n))
}

fn lower_body(extractor: &PhpExtractor, node: &Node) -> Vec<SyntaxNode> {
    node.child_by_field_name("body")
        .or_else(|| {
            extractor
                .get_base()
                .find_child_by_type(node, "compound_statement")
        })
        .map(|body| extractor.lower_children(body))
        .unwrap_or_default()
}

/// Parameters of a function-like node, in declaration order
pub(super) fn lower_parameters(extractor: &PhpExtractor, node: &Node) -> Vec<Parameter> {
    let Some(params_node) = node
        .child_by_field_name("parameters")
        .or_else(|| {
            extractor
                .get_base()
                .find_child_by_type(node, "formal_parameters")
        })
    else {
        return Vec::new();
    };

    let mut cursor = params_node.walk();
    let param_nodes: Vec<Node> = params_node
        .named_children(&mut cursor)
        .filter(|child| {
            matches!(
                child.kind(),
                "simple_parameter" | "variadic_parameter" | "property_promotion_parameter"
            )
        })
        .collect();

    param_nodes
        .iter()
        .map(|param| {
            let name = param
                .child_by_field_name("name")
                .map(|n| variable_name(extractor, &n))
                .unwrap_or_else(|| variable_name(extractor, param));
            let type_ref = find_type(extractor, param).and_then(|t| lower_type(extractor, &t));
            Parameter { name, type_ref }
        })
        .collect()
}
