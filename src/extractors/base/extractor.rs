// BaseExtractor implementation
//
// Holds the file text a tree was parsed from and answers the text-level
// questions the lowering needs about individual nodes.

use tree_sitter::Node;

/// Base implementation for language lowering
pub struct BaseExtractor<'a> {
    pub content: &'a str,
}

impl<'a> BaseExtractor<'a> {
    pub fn new(content: &'a str) -> Self {
        Self { content }
    }

    /// Get text from a tree-sitter node
    pub fn get_node_text(&self, node: &Node) -> String {
        let start_byte = node.start_byte();
        let end_byte = node.end_byte();

        // Use byte slice but handle UTF-8 boundaries properly
        let content_bytes = self.content.as_bytes();
        if start_byte < content_bytes.len() && end_byte <= content_bytes.len() {
            String::from_utf8_lossy(&content_bytes[start_byte..end_byte]).to_string()
        } else {
            String::new()
        }
    }

    /// Nearest `/** ... */` comment preceding a node, verbatim
    ///
    /// Walks back through the run of comments directly before the node; plain
    /// `//`, `#` and `/* */` comments in between are skipped, any other node ends
    /// the search.
    pub fn find_doc_comment(&self, node: &Node) -> Option<String> {
        let mut current = node.prev_named_sibling();
        while let Some(sibling) = current {
            if sibling.kind() != "comment" {
                break;
            }
            let comment_text = self.get_node_text(&sibling);
            if comment_text.starts_with("/**") {
                return Some(comment_text);
            }
            current = sibling.prev_named_sibling();
        }
        None
    }

    /// 1-based first line of a node
    pub fn start_line(&self, node: &Node) -> u32 {
        (node.start_position().row + 1) as u32
    }

    /// 1-based last line of a node
    pub fn end_line(&self, node: &Node) -> u32 {
        (node.end_position().row + 1) as u32
    }
}
