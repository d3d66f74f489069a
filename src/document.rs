//! Canonical per-file document and the normalizer that builds it
//!
//! A [`FileDocument`] is the unit of persistence: one per source file, keyed by
//! its path relative to the configured base directory. The normalizer only
//! produces the structural part ([`DocumentBody`]); the persister adds the
//! fingerprint, key and timestamp.

use crate::extractors::declarations::RawDeclaration;
use crate::extractors::members::{ConstantRecord, MethodRecord, ParameterRecord, PropertyRecord};
use crate::extractors::syntax::ClassKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDocument {
    pub name: String,
    pub kind: ClassKind,
    pub methods: Vec<MethodRecord>,
    pub constants: Vec<ConstantRecord>,
    pub properties: Vec<PropertyRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDocument {
    pub name: String,
    pub parameters: Vec<ParameterRecord>,
}

/// Structural content of a file document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentBody {
    pub namespace: Option<String>,
    pub uses: Vec<String>,
    pub classes: Vec<ClassDocument>,
    pub functions: Vec<FunctionDocument>,
}

impl DocumentBody {
    pub fn is_empty(&self) -> bool {
        self.namespace.is_none()
            && self.uses.is_empty()
            && self.classes.is_empty()
            && self.functions.is_empty()
    }
}

/// Stored record for one source file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDocument {
    pub file_name: String,
    #[serde(flatten)]
    pub body: DocumentBody,
    pub file_hash: String,
    pub last_updated: DateTime<Utc>,
}

impl FileDocument {
    pub fn new(
        file_name: impl Into<String>,
        body: DocumentBody,
        file_hash: impl Into<String>,
        last_updated: DateTime<Utc>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            body,
            file_hash: file_hash.into(),
            last_updated,
        }
    }
}

/// Reshape a file's raw declarations into its document body
///
/// The first namespace wins; imports keep source order and duplicates;
/// classes and functions keep source order.
pub fn normalize(declarations: Vec<RawDeclaration>) -> DocumentBody {
    let mut body = DocumentBody::default();
    let mut namespace_seen = false;

    for declaration in declarations {
        match declaration {
            RawDeclaration::Namespace { name } => {
                if !namespace_seen {
                    namespace_seen = true;
                    body.namespace = name.filter(|n| !n.is_empty());
                }
            }
            RawDeclaration::Import { name } => body.uses.push(name),
            RawDeclaration::ClassDecl {
                name,
                kind,
                methods,
                properties,
                constants,
            } => body.classes.push(ClassDocument {
                name,
                kind,
                methods,
                constants,
                properties,
            }),
            RawDeclaration::FunctionDecl { name, parameters } => {
                body.functions.push(FunctionDocument { name, parameters })
            }
        }
    }

    body
}
