//! Declaration extraction
//!
//! Walks the lowered syntax tree depth-first and emits a flat, source-ordered
//! sequence of [`RawDeclaration`]s. The walk is a pure function of the tree and
//! the file text; it performs no I/O and never looks at the file name.

use super::members::{
    extract_members, parameter_records, ConstantRecord, MethodRecord, ParameterRecord,
    PropertyRecord,
};
use super::source::SourceLines;
use super::syntax::{ClassKind, SyntaxNode};

/// Declaration recovered from one file, before normalization
#[derive(Debug, Clone, PartialEq)]
pub enum RawDeclaration {
    Namespace {
        name: Option<String>,
    },
    Import {
        name: String,
    },
    ClassDecl {
        name: String,
        kind: ClassKind,
        methods: Vec<MethodRecord>,
        properties: Vec<PropertyRecord>,
        constants: Vec<ConstantRecord>,
    },
    FunctionDecl {
        name: String,
        parameters: Vec<ParameterRecord>,
    },
}

/// Extract every declaration reachable from `nodes`, in source order
pub fn extract_declarations(nodes: &[SyntaxNode], content: &str) -> Vec<RawDeclaration> {
    let source = SourceLines::new(content);
    let mut declarations = Vec::new();
    for node in nodes {
        declarations.extend(visit_node(node, &source));
    }
    declarations
}

fn visit_node(node: &SyntaxNode, source: &SourceLines) -> Vec<RawDeclaration> {
    let mut declarations = match node {
        SyntaxNode::Namespace { name, .. } => vec![RawDeclaration::Namespace { name: name.clone() }],
        SyntaxNode::Use { names } => names
            .iter()
            .map(|name| RawDeclaration::Import { name: name.clone() })
            .collect(),
        SyntaxNode::Class(class) => {
            let members = extract_members(&class.body, source);
            vec![RawDeclaration::ClassDecl {
                name: class.name.clone(),
                kind: class.kind,
                methods: members.methods,
                properties: members.properties,
                constants: members.constants,
            }]
        }
        SyntaxNode::Function(function) => vec![RawDeclaration::FunctionDecl {
            name: function.name.clone(),
            parameters: parameter_records(&function.params),
        }],
        // Members are picked up through their class; on their own they are inert
        SyntaxNode::Method(_)
        | SyntaxNode::Property(_)
        | SyntaxNode::ClassConst(_)
        | SyntaxNode::Other { .. } => Vec::new(),
    };

    // Declarations may sit inside any statement list, including method and function bodies
    for child in node.children() {
        declarations.extend(visit_node(child, source));
    }

    declarations
}
