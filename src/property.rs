// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property Structs
//!
//! A [`PropertyStruct`] is an immutable, schema-checked bag of fields. It is
//! the configuration a resource owns and the payload of every nested property
//! block. Fields are keyed by canonical name; rendering swaps in the wire
//! names from the schema table.
//!
//! # Invariants
//!
//! - Every required field of the schema is present
//! - Every present field is declared by the schema
//! - Every present value matches the field's [`FieldType`]
//!
//! Absent optional fields are simply missing from the map, so an explicit
//! `0` or `false` is never confused with "not set".

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::errors::{ConstructError, ConstructResult};
use crate::schema::{FieldSpec, FieldType, StructSchema};
use crate::token::{AttrValue, Token};

/// A value stored in a property struct
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    Number(i64),
    Bool(bool),
    List(Vec<PropertyValue>),
    Struct(PropertyStruct),
    Token(Token),
}

impl PropertyValue {
    /// Short description of the value's shape, for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::String(_) => "a string",
            Self::Number(_) => "a number",
            Self::Bool(_) => "a boolean",
            Self::List(_) => "a list",
            Self::Struct(_) => "a struct",
            Self::Token(_) => "a token",
        }
    }

    /// Build a list from anything convertible into values
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<PropertyValue>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&PropertyStruct> {
        match self {
            Self::Struct(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Self::Token(token) => Some(token),
            _ => None,
        }
    }

    /// Render as a template value
    pub fn render(&self) -> Value {
        match self {
            Self::String(value) => Value::String(value.clone()),
            Self::Number(value) => Value::from(*value),
            Self::Bool(value) => Value::Bool(*value),
            Self::List(items) => Value::Array(items.iter().map(PropertyValue::render).collect()),
            Self::Struct(value) => value.render(),
            Self::Token(token) => token.to_json(),
        }
    }

    /// Logical ids referenced anywhere inside this value
    pub fn referenced_logical_ids(&self) -> Vec<String> {
        match self {
            Self::Token(token) => token
                .referenced_logical_ids()
                .into_iter()
                .map(str::to_string)
                .collect(),
            Self::List(items) => items.iter().flat_map(|v| v.referenced_logical_ids()).collect(),
            Self::Struct(value) => value.referenced_logical_ids(),
            _ => Vec::new(),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<u32> for PropertyValue {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<u16> for PropertyValue {
    fn from(value: u16) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Token> for PropertyValue {
    fn from(token: Token) -> Self {
        Self::Token(token)
    }
}

impl From<AttrValue> for PropertyValue {
    fn from(value: AttrValue) -> Self {
        match value {
            AttrValue::Literal(literal) => Self::String(literal),
            AttrValue::Token(token) => Self::Token(token),
        }
    }
}

impl From<&AttrValue> for PropertyValue {
    fn from(value: &AttrValue) -> Self {
        value.clone().into()
    }
}

impl From<PropertyStruct> for PropertyValue {
    fn from(value: PropertyStruct) -> Self {
        Self::Struct(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(values: Vec<String>) -> Self {
        Self::list(values)
    }
}

impl From<Vec<AttrValue>> for PropertyValue {
    fn from(values: Vec<AttrValue>) -> Self {
        Self::list(values)
    }
}

impl From<Vec<PropertyStruct>> for PropertyValue {
    fn from(values: Vec<PropertyStruct>) -> Self {
        Self::list(values)
    }
}

/// Check a value against a field's declared shape
fn check_value(
    schema: &StructSchema,
    spec: &FieldSpec,
    value: &PropertyValue,
) -> ConstructResult<()> {
    let accepted = match (&spec.field_type, value) {
        (_, PropertyValue::Token(_)) => !matches!(spec.field_type, FieldType::Struct(_)),
        (FieldType::String, PropertyValue::String(_)) => true,
        (FieldType::Number, PropertyValue::Number(_)) => true,
        (FieldType::Boolean, PropertyValue::Bool(_)) => true,
        (FieldType::StringList, PropertyValue::List(items)) => items
            .iter()
            .all(|item| matches!(item, PropertyValue::String(_) | PropertyValue::Token(_))),
        (FieldType::Struct(expected), PropertyValue::Struct(actual)) => {
            actual.schema().same_as(expected)
        }
        (FieldType::StructList(expected), PropertyValue::List(items)) => items.iter().all(|item| {
            matches!(item, PropertyValue::Struct(actual) if actual.schema().same_as(expected))
        }),
        _ => false,
    };

    if accepted {
        Ok(())
    } else {
        Err(ConstructError::InvalidFieldType {
            kind: schema.name.to_string(),
            field: spec.name.to_string(),
            expected: spec.field_type.describe(),
            actual: describe_value(value),
        })
    }
}

fn describe_value(value: &PropertyValue) -> String {
    match value {
        PropertyValue::Struct(inner) => format!("a {} struct", inner.schema().name),
        PropertyValue::List(items) => {
            match items.iter().find(|item| !matches!(item, PropertyValue::String(_))) {
                Some(item) => format!("a list containing {}", describe_value(item)),
                None => "a list of strings".to_string(),
            }
        }
        other => other.kind_name().to_string(),
    }
}

fn lookup_field(schema: &'static StructSchema, name: &str) -> ConstructResult<&'static FieldSpec> {
    schema.field(name).ok_or_else(|| ConstructError::UnknownField {
        kind: schema.name.to_string(),
        field: name.to_string(),
    })
}

/// Immutable, validated field map described by a [`StructSchema`]
#[derive(Debug, Clone)]
pub struct PropertyStruct {
    schema: &'static StructSchema,
    fields: BTreeMap<&'static str, PropertyValue>,
}

impl PropertyStruct {
    /// Start building a struct for `schema`
    pub fn builder(schema: &'static StructSchema) -> PropertyStructBuilder {
        PropertyStructBuilder {
            schema,
            fields: BTreeMap::new(),
            error: None,
        }
    }

    /// Construct from `(name, value)` pairs in one call
    pub fn new<I, V>(schema: &'static StructSchema, fields: I) -> ConstructResult<Self>
    where
        I: IntoIterator<Item = (&'static str, V)>,
        V: Into<PropertyValue>,
    {
        fields
            .into_iter()
            .fold(Self::builder(schema), |builder, (name, value)| builder.field(name, value))
            .build()
    }

    pub fn schema(&self) -> &'static StructSchema {
        self.schema
    }

    /// Read a field
    ///
    /// Returns `Ok(None)` for an absent optional field. Fails for names the
    /// schema does not declare and for required fields that are absent.
    pub fn get(&self, name: &str) -> ConstructResult<Option<&PropertyValue>> {
        let spec = lookup_field(self.schema, name)?;
        match self.fields.get(spec.name) {
            Some(value) => Ok(Some(value)),
            None if spec.required => Err(ConstructError::MissingRequiredField {
                kind: self.schema.name.to_string(),
                field: spec.name.to_string(),
            }),
            None => Ok(None),
        }
    }

    /// Read a string field
    pub fn get_str(&self, name: &str) -> ConstructResult<Option<&str>> {
        Ok(self.get(name)?.and_then(PropertyValue::as_str))
    }

    /// Whether a field is present
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Present fields in canonical-name order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &PropertyValue)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// A copy with one field replaced, validated like construction
    pub fn with_field(&self, name: &str, value: impl Into<PropertyValue>) -> ConstructResult<Self> {
        let spec = lookup_field(self.schema, name)?;
        let value = value.into();
        check_value(self.schema, spec, &value)?;

        let mut fields = self.fields.clone();
        fields.insert(spec.name, value);
        Ok(Self {
            schema: self.schema,
            fields,
        })
    }

    /// A copy with one optional field removed
    pub fn without_field(&self, name: &str) -> ConstructResult<Self> {
        let spec = lookup_field(self.schema, name)?;
        if spec.required {
            return Err(ConstructError::MissingRequiredField {
                kind: self.schema.name.to_string(),
                field: spec.name.to_string(),
            });
        }

        let mut fields = self.fields.clone();
        fields.remove(spec.name);
        Ok(Self {
            schema: self.schema,
            fields,
        })
    }

    /// Render with wire-format names
    ///
    /// Keys are emitted in sorted order so repeated renders of the same
    /// struct are byte-identical.
    pub fn render(&self) -> Value {
        let mut rendered = Map::new();
        for (name, value) in &self.fields {
            if let Some(spec) = self.schema.field(name) {
                rendered.insert(spec.wire_name.to_string(), value.render());
            }
        }
        Value::Object(rendered)
    }

    /// Logical ids referenced by any token in this struct
    pub fn referenced_logical_ids(&self) -> Vec<String> {
        self.fields
            .values()
            .flat_map(PropertyValue::referenced_logical_ids)
            .collect()
    }
}

impl PartialEq for PropertyStruct {
    fn eq(&self, other: &Self) -> bool {
        self.schema.same_as(other.schema) && self.fields == other.fields
    }
}

/// Keyword-style builder for [`PropertyStruct`]
///
/// The first invalid field is remembered and reported by [`build`](Self::build),
/// so chains stay fluent.
#[derive(Debug)]
pub struct PropertyStructBuilder {
    schema: &'static StructSchema,
    fields: BTreeMap<&'static str, PropertyValue>,
    error: Option<ConstructError>,
}

impl PropertyStructBuilder {
    /// Set a field
    pub fn field(mut self, name: &str, value: impl Into<PropertyValue>) -> Self {
        if self.error.is_some() {
            return self;
        }

        let value = value.into();
        let checked = lookup_field(self.schema, name)
            .and_then(|spec| check_value(self.schema, spec, &value).map(|()| spec));
        match checked {
            Ok(spec) => {
                self.fields.insert(spec.name, value);
            }
            Err(err) => self.error = Some(err),
        }
        self
    }

    /// Set a field when `value` is `Some`
    pub fn field_opt<V: Into<PropertyValue>>(self, name: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.field(name, value),
            None => self,
        }
    }

    /// Validate required fields and produce the struct
    pub fn build(self) -> ConstructResult<PropertyStruct> {
        if let Some(err) = self.error {
            return Err(err);
        }

        if let Some(missing) = self
            .schema
            .required_fields()
            .find(|spec| !self.fields.contains_key(spec.name))
        {
            return Err(ConstructError::MissingRequiredField {
                kind: self.schema.name.to_string(),
                field: missing.name.to_string(),
            });
        }

        Ok(PropertyStruct {
            schema: self.schema,
            fields: self.fields,
        })
    }
}
