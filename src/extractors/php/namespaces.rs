// PHP lowering - Namespace and import declarations

use super::helpers::strip_leading_separator;
use super::PhpExtractor;
use crate::extractors::syntax::SyntaxNode;
use tree_sitter::Node;

/// Lower `namespace Foo;` and `namespace Foo { ... }`
///
/// The semicolon form has no body: the statements it governs follow it as
/// siblings at file level.
pub(super) fn lower_namespace(extractor: &PhpExtractor, node: Node) -> SyntaxNode {
    let base = extractor.get_base();
    let name = node
        .child_by_field_name("name")
        .or_else(|| base.find_child_by_type(&node, "namespace_name"))
        .map(|n| strip_leading_separator(&base.get_node_text(&n)).to_string())
        .filter(|n| !n.is_empty());

    let stmts = node
        .child_by_field_name("body")
        .or_else(|| base.find_child_by_type(&node, "compound_statement"))
        .map(|body| extractor.lower_children(body))
        .unwrap_or_default();

    SyntaxNode::Namespace { name, stmts }
}

/// Lower a `use` statement into the fully qualified names it imports
///
/// Aliases are dropped. Group imports (`use App\{Foo, Bar\Baz}`) are expanded
/// against their shared prefix.
pub(super) fn lower_use(extractor: &PhpExtractor, node: Node) -> SyntaxNode {
    let base = extractor.get_base();
    let mut names = Vec::new();

    let prefix = base
        .find_child_by_type(&node, "namespace_name")
        .map(|n| strip_leading_separator(&base.get_node_text(&n)).to_string());

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "namespace_use_clause" => names.extend(use_clause_name(extractor, &child)),
            "namespace_use_group" => {
                let mut group_cursor = child.walk();
                for clause in child.named_children(&mut group_cursor) {
                    if !matches!(
                        clause.kind(),
                        "namespace_use_clause" | "namespace_use_group_clause"
                    ) {
                        continue;
                    }
                    if let Some(name) = use_clause_name(extractor, &clause) {
                        names.push(match &prefix {
                            Some(prefix) => format!("{}\\{}", prefix, name),
                            None => name,
                        });
                    }
                }
            }
            _ => {}
        }
    }

    SyntaxNode::Use { names }
}

/// Imported name of a single clause, ignoring any `as` alias
fn use_clause_name(extractor: &PhpExtractor, clause: &Node) -> Option<String> {
    let base = extractor.get_base();
    let name_node =
        base.find_child_by_types(clause, &["qualified_name", "namespace_name", "name"])?;
    let name = strip_leading_separator(&base.get_node_text(&name_node)).to_string();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
