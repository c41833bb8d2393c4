// Copyright (c) 2025 - Cowboy AI, Inc.
//! Resource Nodes
//!
//! A [`CfnResource`] is the construct-tree node that owns a validated
//! [`PropertyStruct`] and renders into one entry of the template's
//! `Resources` block. Setters replace a single field and run the same
//! validation as construction; rendering is a pure function of the
//! current state.

use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

use crate::errors::{ConstructError, ConstructResult};
use crate::property::{PropertyStruct, PropertyValue};
use crate::schema::ResourceSchema;
use crate::stack::{ConstructPath, Stack};
use crate::token::{AttrValue, Token};

/// What happens to the physical resource when it leaves the template
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RemovalPolicy {
    /// Delete it along with the construct
    #[default]
    Destroy,
    /// Keep it orphaned in the account
    Retain,
    /// Snapshot before deletion where the resource supports it
    Snapshot,
}

impl RemovalPolicy {
    /// CloudFormation `DeletionPolicy` value
    pub fn deletion_policy(&self) -> &'static str {
        match self {
            Self::Destroy => "Delete",
            Self::Retain => "Retain",
            Self::Snapshot => "Snapshot",
        }
    }
}

impl fmt::Display for RemovalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.deletion_policy())
    }
}

/// Cheap reference to a resource registered in a [`Stack`]
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceHandle {
    pub path: ConstructPath,
    pub logical_id: String,
    pub schema: &'static ResourceSchema,
}

impl ResourceHandle {
    /// `{"Ref": logical_id}`
    pub fn ref_token(&self) -> AttrValue {
        AttrValue::Token(Token::reference(&self.logical_id))
    }

    /// `{"Fn::GetAtt": [logical_id, attribute]}` for a declared attribute
    pub fn get_att(&self, attribute: &str) -> ConstructResult<AttrValue> {
        let spec = self
            .schema
            .attribute(attribute)
            .ok_or_else(|| ConstructError::UnknownAttribute {
                resource_type: self.schema.type_name.to_string(),
                attribute: attribute.to_string(),
            })?;
        Ok(AttrValue::Token(Token::get_att(&self.logical_id, spec.name)))
    }
}

/// A resource node holding its current configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CfnResource {
    path: ConstructPath,
    logical_id: String,
    schema: &'static ResourceSchema,
    properties: PropertyStruct,
    removal_policy: Option<RemovalPolicy>,
    depends_on: Vec<String>,
}

impl CfnResource {
    pub(crate) fn new(
        path: ConstructPath,
        logical_id: String,
        schema: &'static ResourceSchema,
        properties: PropertyStruct,
    ) -> Self {
        Self {
            path,
            logical_id,
            schema,
            properties,
            removal_policy: None,
            depends_on: Vec::new(),
        }
    }

    /// Validate `properties` against `schema` and register the node at `scope/id`
    pub fn create(
        stack: &mut Stack,
        scope: &ConstructPath,
        id: &str,
        schema: &'static ResourceSchema,
        properties: PropertyStruct,
    ) -> ConstructResult<ResourceHandle> {
        if !properties.schema().same_as(schema.properties) {
            return Err(ConstructError::InvalidFieldType {
                kind: schema.type_name.to_string(),
                field: "properties".to_string(),
                expected: format!("a {} struct", schema.properties.name),
                actual: format!("a {} struct", properties.schema().name),
            });
        }
        stack.define_resource(&scope.child(id), schema, properties)
    }

    pub fn handle(&self) -> ResourceHandle {
        ResourceHandle {
            path: self.path.clone(),
            logical_id: self.logical_id.clone(),
            schema: self.schema,
        }
    }

    pub fn path(&self) -> &ConstructPath {
        &self.path
    }

    pub fn logical_id(&self) -> &str {
        &self.logical_id
    }

    pub fn type_name(&self) -> &'static str {
        self.schema.type_name
    }

    pub fn properties(&self) -> &PropertyStruct {
        &self.properties
    }

    /// Current value of one property
    pub fn property(&self, name: &str) -> ConstructResult<Option<&PropertyValue>> {
        self.properties.get(name)
    }

    /// Replace one property
    ///
    /// The value is checked against the field's declared type, exactly like
    /// [`PropertyStruct::with_field`]. Range and combination rules that a
    /// higher-level constructor enforces (record weight, TTL on alias
    /// records, routing policies) are not re-run here; a raw setter writes
    /// whatever the schema's types allow.
    pub fn set(&mut self, name: &str, value: impl Into<PropertyValue>) -> ConstructResult<()> {
        self.properties = self.properties.with_field(name, value)?;
        debug!("Set {} on {}", name, self.logical_id);
        Ok(())
    }

    /// Clear an optional property
    pub fn unset(&mut self, name: &str) -> ConstructResult<()> {
        self.properties = self.properties.without_field(name)?;
        debug!("Unset {} on {}", name, self.logical_id);
        Ok(())
    }

    pub fn apply_removal_policy(&mut self, policy: RemovalPolicy) {
        self.removal_policy = Some(policy);
    }

    pub fn removal_policy(&self) -> Option<RemovalPolicy> {
        self.removal_policy
    }

    /// Order this resource after another one
    pub fn add_dependency(&mut self, other: &ResourceHandle) {
        if other.logical_id != self.logical_id && !self.depends_on.contains(&other.logical_id) {
            self.depends_on.push(other.logical_id.clone());
        }
    }

    /// Logical ids this resource points at through tokens or `DependsOn`
    pub fn references(&self) -> Vec<String> {
        let mut references = self.properties.referenced_logical_ids();
        references.extend(self.depends_on.iter().cloned());
        references
    }

    /// Template fragment for this resource
    pub fn render(&self) -> Value {
        let mut block = Map::new();
        block.insert("Type".to_string(), Value::String(self.schema.type_name.to_string()));
        block.insert("Properties".to_string(), self.properties.render());

        if let Some(policy) = self.removal_policy {
            let policy = Value::String(policy.deletion_policy().to_string());
            block.insert("DeletionPolicy".to_string(), policy.clone());
            block.insert("UpdateReplacePolicy".to_string(), policy);
        }

        if !self.depends_on.is_empty() {
            let mut depends_on = self.depends_on.clone();
            depends_on.sort();
            block.insert(
                "DependsOn".to_string(),
                Value::Array(depends_on.into_iter().map(Value::String).collect()),
            );
        }

        Value::Object(block)
    }
}
