// PHP lowering - Helper utilities
// Modifiers, declared types and names

use super::PhpExtractor;
use crate::extractors::syntax::{Modifier, TypeRef};
use tree_sitter::Node;

/// Extract member modifiers in source order
///
/// Set-only visibility (`private(set)`) does not describe read access and is skipped.
pub(super) fn extract_modifiers(extractor: &PhpExtractor, node: &Node) -> Vec<Modifier> {
    let mut modifiers = Vec::new();
    let mut cursor = node.walk();

    for child in node.children(&mut cursor) {
        match child.kind() {
            "visibility_modifier" => {
                let text = extractor.get_base().get_node_text(&child);
                if text.contains("(set)") {
                    continue;
                }
                modifiers.extend(Modifier::from_keyword(text.trim()));
            }
            "abstract_modifier" => modifiers.push(Modifier::Abstract),
            "static_modifier" => modifiers.push(Modifier::Static),
            "final_modifier" => modifiers.push(Modifier::Final),
            "readonly_modifier" => modifiers.push(Modifier::Readonly),
            "var_modifier" => modifiers.push(Modifier::Var),
            "public" | "private" | "protected" | "static" | "abstract" | "final" | "readonly"
            | "var" => {
                modifiers.extend(Modifier::from_keyword(child.kind()));
            }
            _ => {}
        }
    }

    modifiers
}

/// Declared type of a parameter, property or constant
///
/// Looks at the `type` field first and falls back to the first type-shaped child.
pub(super) fn find_type<'t>(extractor: &PhpExtractor, node: &Node<'t>) -> Option<Node<'t>> {
    node.child_by_field_name("type").or_else(|| {
        extractor.get_base().find_child_by_types(
            node,
            &[
                "type",
                "named_type",
                "primitive_type",
                "optional_type",
                "union_type",
                "intersection_type",
                "disjunctive_normal_form_type",
            ],
        )
    })
}

/// Collapse a type node to a plain name
///
/// Nullable, union and intersection types have no single name and yield `None`.
/// Wrappers holding exactly one type are unwrapped.
pub(super) fn lower_type(extractor: &PhpExtractor, node: &Node) -> Option<TypeRef> {
    match node.kind() {
        "primitive_type" => Some(TypeRef::Simple(
            extractor.get_base().get_node_text(node).trim().to_string(),
        )),
        "name" => Some(TypeRef::Simple(extractor.get_base().get_node_text(node))),
        "qualified_name" | "namespace_name" => {
            let text = extractor.get_base().get_node_text(node);
            Some(name_to_type_ref(strip_leading_separator(&text)))
        }
        "named_type" | "type" | "union_type" => {
            let mut cursor = node.walk();
            let inner: Vec<Node> = node.named_children(&mut cursor).collect();
            match inner.as_slice() {
                [only] => lower_type(extractor, only),
                _ => None,
            }
        }
        _ => None,
    }
}

fn name_to_type_ref(name: &str) -> TypeRef {
    if name.contains('\\') {
        TypeRef::Qualified(name.to_string())
    } else {
        TypeRef::Simple(name.to_string())
    }
}

/// `\Foo\Bar` and `Foo\Bar` name the same thing once resolved
pub(super) fn strip_leading_separator(name: &str) -> &str {
    name.trim().trim_start_matches('\\')
}

/// Variable name without its `$` sigil (and `&` for by-reference names)
pub(super) fn variable_name(extractor: &PhpExtractor, node: &Node) -> String {
    let target = if node.kind() == "variable_name" {
        *node
    } else {
        extractor
            .get_base()
            .find_child_by_type(node, "variable_name")
            .unwrap_or(*node)
    };
    extractor
        .get_base()
        .get_node_text(&target)
        .trim()
        .trim_start_matches('&')
        .trim_start_matches('$')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_to_type_ref() {
        assert_eq!(
            name_to_type_ref("LoggerInterface"),
            TypeRef::Simple("LoggerInterface".to_string())
        );
        assert_eq!(
            name_to_type_ref("Psr\\Log\\LoggerInterface"),
            TypeRef::Qualified("Psr\\Log\\LoggerInterface".to_string())
        );
    }

    #[test]
    fn test_strip_leading_separator() {
        assert_eq!(strip_leading_separator("\\Foo\\Bar"), "Foo\\Bar");
        assert_eq!(strip_leading_separator("Foo"), "Foo");
    }
}
