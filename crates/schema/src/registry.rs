use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};

const BUILTIN_PRODUCT_SNAPSHOT: &str = include_str!("../../../schemas/product_snapshot.json");

/// Primitive type of a declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl FieldKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of the schema tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaNode {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    /// Only object nodes have children
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SchemaNode>,
}

impl SchemaNode {
    #[must_use]
    pub fn leaf(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn object(name: impl Into<String>, children: Vec<SchemaNode>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Object,
            required: false,
            children,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A schema-declared path, produced by walking the tree depth-first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredField<'a> {
    pub path: String,
    pub node: &'a SchemaNode,
}

#[derive(Debug, Deserialize)]
struct RawSchema {
    schema_version: u32,
    #[serde(default)]
    name: Option<String>,
    fields: Vec<SchemaNode>,
}

/// Declarative description of every expected field in a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    name: String,
    fields: Vec<SchemaNode>,
}

impl Schema {
    /// Build a schema from top-level nodes, validating names and structure
    pub fn new(name: impl Into<String>, fields: Vec<SchemaNode>) -> Result<Self> {
        validate_level(&fields, "")?;
        Ok(Self {
            name: name.into(),
            fields,
        })
    }

    /// Parse a `{schema_version, name?, fields}` JSON document
    pub fn from_json(raw: &str) -> Result<Self> {
        let raw: RawSchema = serde_json::from_str(raw)?;
        if raw.schema_version != 1 {
            return Err(SchemaError::UnsupportedVersion(raw.schema_version));
        }
        Self::new(raw.name.unwrap_or_else(|| "custom".to_string()), raw.fields)
    }

    /// The product snapshot schema shipped with the crate
    pub fn product_snapshot() -> Result<Self> {
        Self::from_json(BUILTIN_PRODUCT_SNAPSHOT)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn fields(&self) -> &[SchemaNode] {
        &self.fields
    }

    /// Every declared object and leaf path, parents before their children.
    /// Array item shapes are not part of the tree.
    #[must_use]
    pub fn declared_fields(&self) -> Vec<DeclaredField<'_>> {
        let mut out = Vec::new();
        self.visit(|path, node| {
            out.push(DeclaredField {
                path: path.to_string(),
                node,
            });
        });
        out
    }

    /// Depth-first walk calling `visit(path, node)` for each node
    pub fn visit<'a>(&'a self, mut visit: impl FnMut(&str, &'a SchemaNode)) {
        fn walk<'a>(
            nodes: &'a [SchemaNode],
            prefix: &str,
            visit: &mut impl FnMut(&str, &'a SchemaNode),
        ) {
            for node in nodes {
                let path = if prefix.is_empty() {
                    node.name.clone()
                } else {
                    format!("{prefix}.{}", node.name)
                };
                visit(&path, node);
                if node.kind == FieldKind::Object {
                    walk(&node.children, &path, visit);
                }
            }
        }
        walk(&self.fields, "", &mut visit);
    }

    #[must_use]
    pub fn field_count(&self) -> usize {
        let mut count = 0;
        self.visit(|_, _| count += 1);
        count
    }
}

fn validate_level(nodes: &[SchemaNode], prefix: &str) -> Result<()> {
    let mut names = HashSet::new();
    for node in nodes {
        let path = if prefix.is_empty() {
            node.name.clone()
        } else {
            format!("{prefix}.{}", node.name)
        };
        if node.name.trim().is_empty() || node.name.contains('.') {
            return Err(SchemaError::InvalidName {
                path: prefix.to_string(),
                name: node.name.clone(),
            });
        }
        if !names.insert(node.name.as_str()) {
            return Err(SchemaError::DuplicateField(path));
        }
        if !node.children.is_empty() && node.kind != FieldKind::Object {
            return Err(SchemaError::UnexpectedChildren(path));
        }
        validate_level(&node.children, &path)?;
    }
    Ok(())
}
