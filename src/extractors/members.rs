// Member extraction - methods, properties and constants of a class-like body

use super::source::SourceLines;
use super::syntax::{
    ConstNode, Literal, MethodNode, Modifier, Parameter, PropertyNode, SyntaxNode,
};
use serde::{Deserialize, Serialize};

/// Property visibility as stored in file documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
    /// Conflicting access modifiers on one declaration
    Unknown,
}

impl Visibility {
    /// Visibility from a declaration's modifiers; no access modifier means `Private`
    pub fn from_modifiers(modifiers: &[Modifier]) -> Self {
        let mut access = modifiers.iter().filter(|m| m.is_access());
        let Some(first) = access.next() else {
            return Visibility::Private;
        };
        if access.any(|m| m != first) {
            return Visibility::Unknown;
        }
        match first {
            Modifier::Public => Visibility::Public,
            Modifier::Protected => Visibility::Protected,
            Modifier::Private => Visibility::Private,
            _ => Visibility::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodRecord {
    pub name: String,
    pub parameters: Vec<ParameterRecord>,
    #[serde(rename = "phpdoc")]
    pub doc: Option<String>,
    #[serde(rename = "source_code")]
    pub source_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub name: String,
    pub visibility: Visibility,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub default: Option<Literal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantRecord {
    pub name: String,
    pub value: Option<Literal>,
}

/// Members of one class-like declaration, each list in source order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassMembers {
    pub methods: Vec<MethodRecord>,
    pub properties: Vec<PropertyRecord>,
    pub constants: Vec<ConstantRecord>,
}

/// Collect the members declared directly in a class body
///
/// Only direct children are inspected; members of nested or anonymous classes
/// are not attributed to the enclosing class.
pub fn extract_members(body: &[SyntaxNode], source: &SourceLines) -> ClassMembers {
    let mut members = ClassMembers::default();

    for stmt in body {
        match stmt {
            SyntaxNode::Method(method) => members.methods.push(method_record(method, source)),
            SyntaxNode::Property(property) => members.properties.extend(property_records(property)),
            SyntaxNode::ClassConst(constant) => {
                members.constants.extend(constant_records(constant))
            }
            _ => {}
        }
    }

    members
}

/// Name and declared type of each parameter, in declaration order
pub fn parameter_records(params: &[Parameter]) -> Vec<ParameterRecord> {
    params
        .iter()
        .map(|param| ParameterRecord {
            name: param.name.clone(),
            type_name: param.type_ref.as_ref().map(|t| t.as_text().to_string()),
        })
        .collect()
}

fn method_record(method: &MethodNode, source: &SourceLines) -> MethodRecord {
    MethodRecord {
        name: method.name.clone(),
        parameters: parameter_records(&method.params),
        doc: method.doc.clone(),
        source_text: source.slice(method.span.start_line, method.span.end_line),
    }
}

fn property_records(property: &PropertyNode) -> Vec<PropertyRecord> {
    let visibility = Visibility::from_modifiers(&property.modifiers);
    let type_name = property.type_ref.as_ref().map(|t| t.as_text().to_string());

    property
        .entries
        .iter()
        .map(|entry| PropertyRecord {
            name: entry.name.clone(),
            visibility,
            type_name: type_name.clone(),
            default: entry
                .default
                .as_ref()
                .and_then(|expr| expr.literal())
                .cloned(),
        })
        .collect()
}

fn constant_records(constant: &ConstNode) -> Vec<ConstantRecord> {
    constant
        .entries
        .iter()
        .map(|entry| ConstantRecord {
            name: entry.name.clone(),
            value: entry.value.literal().cloned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::syntax::{ConstEntry, Expr, PropertyEntry, Span, TypeRef};

    fn property(modifiers: Vec<Modifier>, entries: Vec<PropertyEntry>) -> SyntaxNode {
        SyntaxNode::Property(PropertyNode {
            modifiers,
            type_ref: None,
            entries,
        })
    }

    fn entry(name: &str, default: Option<Expr>) -> PropertyEntry {
        PropertyEntry {
            name: name.to_string(),
            default,
        }
    }

    #[test]
    fn test_visibility_from_modifiers() {
        assert_eq!(Visibility::from_modifiers(&[]), Visibility::Private);
        assert_eq!(
            Visibility::from_modifiers(&[Modifier::Static]),
            Visibility::Private
        );
        assert_eq!(
            Visibility::from_modifiers(&[Modifier::Public, Modifier::Static]),
            Visibility::Public
        );
        assert_eq!(
            Visibility::from_modifiers(&[Modifier::Readonly, Modifier::Protected]),
            Visibility::Protected
        );
        assert_eq!(
            Visibility::from_modifiers(&[Modifier::Public, Modifier::Private]),
            Visibility::Unknown
        );
    }

    #[test]
    fn test_property_without_access_modifier_is_private() {
        let body = vec![property(vec![Modifier::Var], vec![entry("legacy", None)])];
        let members = extract_members(&body, &SourceLines::new(""));

        assert_eq!(members.properties.len(), 1);
        assert_eq!(members.properties[0].visibility, Visibility::Private);
    }

    #[test]
    fn test_property_defaults_keep_only_literals() {
        let body = vec![SyntaxNode::Property(PropertyNode {
            modifiers: vec![Modifier::Protected],
            type_ref: Some(TypeRef::Qualified("App\\Money".to_string())),
            entries: vec![
                entry("amount", Some(Expr::Literal(Literal::Float(1.5)))),
                entry("items", Some(Expr::Other)),
                entry("label", None),
            ],
        })];
        let members = extract_members(&body, &SourceLines::new(""));

        let props = &members.properties;
        assert_eq!(props.len(), 3);
        assert_eq!(props[0].default, Some(Literal::Float(1.5)));
        assert_eq!(props[1].default, None);
        assert_eq!(props[2].default, None);
        assert!(props
            .iter()
            .all(|p| p.type_name.as_deref() == Some("App\\Money")));
        assert!(props.iter().all(|p| p.visibility == Visibility::Protected));
    }

    #[test]
    fn test_every_constant_in_a_statement_is_kept() {
        let body = vec![SyntaxNode::ClassConst(ConstNode {
            entries: vec![
                ConstEntry {
                    name: "FIRST".to_string(),
                    value: Expr::Literal(Literal::Int(1)),
                },
                ConstEntry {
                    name: "SECOND".to_string(),
                    value: Expr::Literal(Literal::String("two".to_string())),
                },
                ConstEntry {
                    name: "THIRD".to_string(),
                    value: Expr::Other,
                },
            ],
        })];
        let members = extract_members(&body, &SourceLines::new(""));

        let names: Vec<&str> = members.constants.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["FIRST", "SECOND", "THIRD"]);
        assert_eq!(members.constants[0].value, Some(Literal::Int(1)));
        assert_eq!(
            members.constants[1].value,
            Some(Literal::String("two".to_string()))
        );
        assert_eq!(members.constants[2].value, None);
    }

    #[test]
    fn test_method_source_text_spans_declared_lines() {
        let content = (1..=20)
            .map(|n| format!("line {}", n))
            .collect::<Vec<_>>()
            .join("\n");
        let body = vec![SyntaxNode::Method(MethodNode {
            name: "run".to_string(),
            params: vec![Parameter {
                name: "input".to_string(),
                type_ref: Some(TypeRef::Simple("string".to_string())),
            }],
            doc: Some("/** Runs. */".to_string()),
            span: Span::new(10, 14),
            body: Vec::new(),
        })];
        let members = extract_members(&body, &SourceLines::new(&content));

        let method = &members.methods[0];
        assert_eq!(
            method.source_text,
            "line 10\nline 11\nline 12\nline 13\nline 14"
        );
        assert_eq!(method.doc.as_deref(), Some("/** Runs. */"));
        assert_eq!(
            method.parameters,
            vec![ParameterRecord {
                name: "input".to_string(),
                type_name: Some("string".to_string()),
            }]
        );
    }

    #[test]
    fn test_members_keep_source_order_and_ignore_other_nodes() {
        let method = |name: &str| {
            SyntaxNode::Method(MethodNode {
                name: name.to_string(),
                params: Vec::new(),
                doc: None,
                span: Span::new(1, 1),
                body: Vec::new(),
            })
        };
        let body = vec![
            method("b"),
            SyntaxNode::Other {
                children: vec![method("nested")],
            },
            method("a"),
        ];
        let members = extract_members(&body, &SourceLines::new("x"));

        let names: Vec<&str> = members.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }
}
