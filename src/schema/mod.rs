// Copyright (c) 2025 - Cowboy AI, Inc.
//! Declarative Schema Tables
//!
//! Every CloudFormation resource and nested property block is described by a
//! static table of [`FieldSpec`] rows instead of a hand-written type per
//! shape. [`crate::property::PropertyStruct`] validates against these rows and
//! uses their wire names when rendering.
//!
//! ```text
//! FieldSpec { name: "hosted_zone_id", wire_name: "HostedZoneId", required: false, .. }
//!        canonical name ──────┘                 └── CloudFormation property name
//! ```

pub mod route53;

/// Shape a field's value must have
#[derive(Debug, Clone, Copy)]
pub enum FieldType {
    /// String or string-valued token
    String,
    /// Integer or token
    Number,
    /// Boolean or token
    Boolean,
    /// List of strings / tokens, or a list-valued token
    StringList,
    /// Nested property block
    Struct(&'static StructSchema),
    /// List of nested property blocks
    StructList(&'static StructSchema),
}

impl FieldType {
    /// Human readable description used in error messages
    pub fn describe(&self) -> String {
        match self {
            Self::String => "a string".to_string(),
            Self::Number => "a number".to_string(),
            Self::Boolean => "a boolean".to_string(),
            Self::StringList => "a list of strings".to_string(),
            Self::Struct(schema) => format!("a {} struct", schema.name),
            Self::StructList(schema) => format!("a list of {} structs", schema.name),
        }
    }
}

/// One row of a schema table
#[derive(Debug)]
pub struct FieldSpec {
    /// Canonical field name used by this crate's surface
    pub name: &'static str,
    /// Property name CloudFormation expects
    pub wire_name: &'static str,
    /// Whether construction fails without it
    pub required: bool,
    /// Accepted value shape
    pub field_type: FieldType,
}

impl FieldSpec {
    pub const fn required(
        name: &'static str,
        wire_name: &'static str,
        field_type: FieldType,
    ) -> Self {
        Self {
            name,
            wire_name,
            required: true,
            field_type,
        }
    }

    pub const fn optional(
        name: &'static str,
        wire_name: &'static str,
        field_type: FieldType,
    ) -> Self {
        Self {
            name,
            wire_name,
            required: false,
            field_type,
        }
    }
}

/// Schema of a property block (a resource's `Properties` or a nested struct)
#[derive(Debug)]
pub struct StructSchema {
    /// Name used in error messages, e.g. `AWS::Route53::RecordSet.AliasTarget`
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl StructSchema {
    /// Look up a field by canonical name
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Look up a field by wire name
    pub fn field_by_wire_name(&self, wire_name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|field| field.wire_name == wire_name)
    }

    /// Fields construction cannot do without
    pub fn required_fields(&self) -> impl Iterator<Item = &'static FieldSpec> {
        self.fields.iter().filter(|field| field.required)
    }

    /// Whether two schema references denote the same table
    pub fn same_as(&self, other: &StructSchema) -> bool {
        std::ptr::eq(self, other) || self.name == other.name
    }
}

/// A computed attribute a resource exposes through `Fn::GetAtt`
#[derive(Debug)]
pub struct AttributeSpec {
    pub name: &'static str,
    /// Whether the attribute resolves to a list of strings
    pub list: bool,
}

/// Schema of a CloudFormation resource type
#[derive(Debug)]
pub struct ResourceSchema {
    /// CloudFormation `Type`, e.g. `AWS::Route53::HostedZone`
    pub type_name: &'static str,
    pub properties: &'static StructSchema,
    pub attributes: &'static [AttributeSpec],
}

impl ResourceSchema {
    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&'static AttributeSpec> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}

impl PartialEq for ResourceSchema {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other) || self.type_name == other.type_name
    }
}
