//! Parsed syntax model consumed by the declaration and member extractors.
//!
//! The PHP parser lowers tree-sitter's concrete syntax tree into this closed set of
//! node kinds. Anything the extractors do not care about becomes [`SyntaxNode::Other`],
//! which carries only the lowered children so declarations nested inside arbitrary
//! constructs (conditionals, closures, blocks) are still reachable.

use serde::{Deserialize, Serialize};

/// Inclusive, 1-based line range of a node in the original file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start_line: u32,
    pub end_line: u32,
}

impl Span {
    pub fn new(start_line: u32, end_line: u32) -> Self {
        Self {
            start_line,
            end_line,
        }
    }
}

/// Declared type of a parameter or property
///
/// Only plain names are modelled. Nullable, union and intersection types are
/// not representable and lower to no type at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// Unqualified identifier or builtin (`int`, `LoggerInterface`)
    Simple(String),
    /// Namespace-qualified name (`Psr\Log\LoggerInterface`)
    Qualified(String),
}

impl TypeRef {
    pub fn as_text(&self) -> &str {
        match self {
            TypeRef::Simple(name) | TypeRef::Qualified(name) => name,
        }
    }
}

/// Resolved literal scalar, stored as a bare JSON string or number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    String(String),
    Int(i64),
    Float(f64),
}

/// Value expression of a constant, property default or parameter default
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    /// Any expression that is not a literal scalar (arrays, constants, calls, ...)
    Other,
}

impl Expr {
    pub fn literal(&self) -> Option<&Literal> {
        match self {
            Expr::Literal(literal) => Some(literal),
            Expr::Other => None,
        }
    }
}

/// Member modifier keyword as written in source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    Readonly,
    Abstract,
    Final,
    Var,
}

impl Modifier {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_lowercase().as_str() {
            "public" => Some(Modifier::Public),
            "protected" => Some(Modifier::Protected),
            "private" => Some(Modifier::Private),
            "static" => Some(Modifier::Static),
            "readonly" => Some(Modifier::Readonly),
            "abstract" => Some(Modifier::Abstract),
            "final" => Some(Modifier::Final),
            "var" => Some(Modifier::Var),
            _ => None,
        }
    }

    pub fn is_access(&self) -> bool {
        matches!(
            self,
            Modifier::Public | Modifier::Protected | Modifier::Private
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Class,
    Interface,
    Trait,
    Enum,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub type_ref: Option<TypeRef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassNode {
    pub kind: ClassKind,
    pub name: String,
    pub body: Vec<SyntaxNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionNode {
    pub name: String,
    pub params: Vec<Parameter>,
    pub body: Vec<SyntaxNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodNode {
    pub name: String,
    pub params: Vec<Parameter>,
    pub doc: Option<String>,
    pub span: Span,
    pub body: Vec<SyntaxNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEntry {
    /// Property name without the leading `$`
    pub name: String,
    pub default: Option<Expr>,
}

/// A property statement; `public int $a = 1, $b;` holds two entries
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyNode {
    pub modifiers: Vec<Modifier>,
    pub type_ref: Option<TypeRef>,
    pub entries: Vec<PropertyEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstEntry {
    pub name: String,
    pub value: Expr,
}

/// A class constant statement; `const A = 1, B = 2;` holds two entries
#[derive(Debug, Clone, PartialEq)]
pub struct ConstNode {
    pub entries: Vec<ConstEntry>,
}

/// Node of the lowered syntax tree
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxNode {
    /// `namespace Foo;` or `namespace Foo { ... }`. A global `namespace { }` block has no name.
    Namespace {
        name: Option<String>,
        stmts: Vec<SyntaxNode>,
    },
    /// A `use` statement naming one or more imports
    Use { names: Vec<String> },
    Class(ClassNode),
    Function(FunctionNode),
    Method(MethodNode),
    Property(PropertyNode),
    ClassConst(ConstNode),
    Other { children: Vec<SyntaxNode> },
}

impl SyntaxNode {
    /// Nested statement lists of this node, in source order
    pub fn children(&self) -> &[SyntaxNode] {
        match self {
            SyntaxNode::Namespace { stmts, .. } => stmts,
            SyntaxNode::Class(class) => &class.body,
            SyntaxNode::Function(function) => &function.body,
            SyntaxNode::Method(method) => &method.body,
            SyntaxNode::Other { children } => children,
            SyntaxNode::Use { .. } | SyntaxNode::Property(_) | SyntaxNode::ClassConst(_) => &[],
        }
    }
}
