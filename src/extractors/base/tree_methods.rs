// Tree navigation methods for BaseExtractor

use super::extractor::BaseExtractor;
use tree_sitter::Node;

impl BaseExtractor<'_> {
    /// Find first child by type
    pub fn find_child_by_type<'t>(&self, node: &Node<'t>, child_type: &str) -> Option<Node<'t>> {
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .find(|child| child.kind() == child_type);
        found
    }

    /// Find first child whose type is one of `types`
    pub fn find_child_by_types<'t>(&self, node: &Node<'t>, types: &[&str]) -> Option<Node<'t>> {
        let mut cursor = node.walk();
        let found = node
            .children(&mut cursor)
            .find(|child| types.contains(&child.kind()));
        found
    }

    /// Find children by type, in source order
    pub fn find_children_by_type<'t>(&self, node: &Node<'t>, child_type: &str) -> Vec<Node<'t>> {
        let mut cursor = node.walk();
        node.children(&mut cursor)
            .filter(|child| child.kind() == child_type)
            .collect()
    }

    /// First named child following an anonymous `=` token
    pub fn find_value_after_assignment<'t>(&self, node: &Node<'t>) -> Option<Node<'t>> {
        let mut cursor = node.walk();
        let mut found_assignment = false;

        for child in node.children(&mut cursor) {
            if found_assignment && child.is_named() && child.kind() != "comment" {
                return Some(child);
            }
            if child.kind() == "=" {
                found_assignment = true;
            }
        }
        None
    }

    /// 1-based line of the first `ERROR` or missing node, if the tree has any
    #[allow(clippy::only_used_in_recursion)] // &self used in recursive calls
    pub fn first_error_line(&self, node: &Node) -> Option<u32> {
        if node.is_error() || node.is_missing() {
            return Some(self.start_line(node));
        }
        if !node.has_error() {
            return None;
        }

        let mut cursor = node.walk();
        let children: Vec<Node> = node.children(&mut cursor).collect();
        children
            .iter()
            .find_map(|child| self.first_error_line(child))
    }
}
