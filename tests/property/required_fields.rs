// Copyright (c) 2025 - Cowboy AI, Inc.
//! Required Field Properties
//!
//! Every property table is exercised generically: omitting any required
//! field fails construction naming that field, and a struct built from
//! required fields alone leaves every optional field absent.

use cim_route53::schema::route53::ALL_STRUCTS;
use cim_route53::schema::{FieldSpec, FieldType, StructSchema};
use cim_route53::{ConstructError, PropertyStruct, PropertyValue};
use proptest::prelude::*;
use proptest::sample::Index;

// ============================================================================
// Sample Values
// ============================================================================

/// A value of the right shape for `field_type`
fn sample_value(field_type: FieldType) -> PropertyValue {
    match field_type {
        FieldType::String => PropertyValue::from("sample"),
        FieldType::Number => PropertyValue::from(1i64),
        FieldType::Boolean => PropertyValue::from(true),
        FieldType::StringList => PropertyValue::from(vec!["sample".to_string()]),
        FieldType::Struct(schema) => PropertyValue::from(required_only(schema)),
        FieldType::StructList(schema) => PropertyValue::from(vec![required_only(schema)]),
    }
}

/// A struct carrying exactly the required fields
fn required_only(schema: &'static StructSchema) -> PropertyStruct {
    schema
        .required_fields()
        .fold(PropertyStruct::builder(schema), |builder, spec| {
            builder.field(spec.name, sample_value(spec.field_type))
        })
        .build()
        .expect("required fields alone must build")
}

fn required_specs(schema: &StructSchema) -> Vec<&'static FieldSpec> {
    schema.required_fields().collect()
}

fn schema_index() -> impl Strategy<Value = usize> {
    0..ALL_STRUCTS.len()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Omitting one required field names that field in the error
    #[test]
    fn prop_missing_required_field_is_reported(
        schema_at in schema_index(),
        omit in any::<Index>(),
    ) {
        let schema = ALL_STRUCTS[schema_at];
        let required = required_specs(schema);
        prop_assume!(!required.is_empty());

        let omitted = required[omit.index(required.len())];
        let result = required
            .iter()
            .filter(|spec| spec.name != omitted.name)
            .fold(PropertyStruct::builder(schema), |builder, spec| {
                builder.field(spec.name, sample_value(spec.field_type))
            })
            .build();

        prop_assert_eq!(
            result.unwrap_err(),
            ConstructError::MissingRequiredField {
                kind: schema.name.to_string(),
                field: omitted.name.to_string(),
            },
            "Omitting {} from {} must be reported",
            omitted.name,
            schema.name
        );
    }

    /// Required fields alone build, and every optional field reads as absent
    #[test]
    fn prop_optional_fields_default_to_absent(schema_at in schema_index()) {
        let schema = ALL_STRUCTS[schema_at];
        let built = required_only(schema);

        prop_assert_eq!(built.len(), required_specs(schema).len());
        for spec in schema.fields.iter().filter(|spec| !spec.required) {
            prop_assert!(
                built.get(spec.name).unwrap().is_none(),
                "{}.{} should be absent",
                schema.name,
                spec.name
            );
        }
    }

    /// Replacing one field leaves every other field untouched
    #[test]
    fn prop_with_field_changes_only_that_field(
        schema_at in schema_index(),
        pick in any::<Index>(),
    ) {
        let schema = ALL_STRUCTS[schema_at];
        prop_assume!(!schema.fields.is_empty());
        let base = required_only(schema);
        let spec = &schema.fields[pick.index(schema.fields.len())];

        let updated = base.with_field(spec.name, sample_value(spec.field_type)).unwrap();

        prop_assert!(updated.contains(spec.name));
        for (name, value) in base.iter().filter(|(name, _)| *name != spec.name) {
            prop_assert_eq!(updated.get(name).unwrap(), Some(value));
        }
        prop_assert_eq!(
            updated.len(),
            base.len() + usize::from(!base.contains(spec.name))
        );
    }

    /// Rendering uses wire names only
    #[test]
    fn prop_render_uses_wire_names(schema_at in schema_index()) {
        let schema = ALL_STRUCTS[schema_at];
        let full = schema
            .fields
            .iter()
            .fold(PropertyStruct::builder(schema), |builder, spec| {
                builder.field(spec.name, sample_value(spec.field_type))
            })
            .build()
            .unwrap();

        let rendered = full.render();
        let keys: Vec<&str> = rendered
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        let mut expected: Vec<&str> = schema.fields.iter().map(|spec| spec.wire_name).collect();
        expected.sort_unstable();
        prop_assert_eq!(keys, expected);
    }
}
