// Copyright (c) 2025 - Cowboy AI, Inc.
//! Stack, Construct Tree and Synthesis
//!
//! The [`Stack`] is the root scope. It enforces id uniqueness per parent,
//! owns every [`CfnResource`] created under it, and merges their rendered
//! fragments into a [`Template`].
//!
//! # Logical IDs
//!
//! A resource's logical id is derived from its construct path: the path
//! segments stripped to ASCII alphanumerics and concatenated (`Resource` and
//! `Default` segments are hidden), followed by the first eight hex digits of
//! a SHA-256 digest of the full path. A resource directly under the stack
//! keeps its id verbatim.
//!
//! ```text
//! Zone/Resource          → Zone4F2A91C0
//! Zone/Www/Resource      → ZoneWww7D1B33E2
//! Health                 → Health
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, info, warn};

use crate::errors::{ConstructError, ConstructResult};
use crate::property::PropertyStruct;
use crate::resource::{CfnResource, ResourceHandle};
use crate::schema::ResourceSchema;
use crate::token::{AttrValue, PseudoParameter, Token};

/// Environment variable naming the default deployment account
pub const DEFAULT_ACCOUNT_ENV: &str = "CDK_DEFAULT_ACCOUNT";

/// Environment variable naming the default deployment region
pub const DEFAULT_REGION_ENV: &str = "CDK_DEFAULT_REGION";

/// Path segments hidden from logical ids
const HIDDEN_ID_SEGMENTS: [&str; 2] = ["Resource", "Default"];

/// Longest logical id CloudFormation accepts
const MAX_LOGICAL_ID_LENGTH: usize = 255;

/// Path of a construct relative to its stack
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstructPath(Vec<String>);

impl ConstructPath {
    /// The stack itself
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of a child construct
    pub fn child(&self, id: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(id.into());
        Self(segments)
    }

    /// Parent path; the root has none
    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            return None;
        }
        Some(Self(self.0[..self.0.len() - 1].to_vec()))
    }

    /// The construct's own id; empty for the root
    pub fn id(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or("")
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `self` equals `other` or lies underneath it
    pub fn starts_with(&self, other: &ConstructPath) -> bool {
        self.0.starts_with(&other.0)
    }

    /// Derive the CloudFormation logical id for this path
    pub fn logical_id(&self) -> String {
        if let [single] = self.0.as_slice() {
            let candidate = alphanumeric(single);
            if !candidate.is_empty() && candidate.len() <= MAX_LOGICAL_ID_LENGTH {
                return candidate;
            }
        }

        let mut human = String::new();
        let mut previous: Option<&str> = None;
        for segment in &self.0 {
            let hidden = HIDDEN_ID_SEGMENTS.contains(&segment.as_str());
            if hidden || previous == Some(segment.as_str()) {
                continue;
            }
            human.push_str(&alphanumeric(segment));
            previous = Some(segment.as_str());
        }

        let digest = Sha256::digest(self.to_string().as_bytes());
        let hash: String = digest
            .iter()
            .take(4)
            .map(|byte| format!("{:02X}", byte))
            .collect();

        human.truncate(MAX_LOGICAL_ID_LENGTH - hash.len());
        format!("{}{}", human, hash)
    }
}

fn alphanumeric(segment: &str) -> String {
    segment.chars().filter(char::is_ascii_alphanumeric).collect()
}

impl fmt::Display for ConstructPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// Deployment target of a stack
///
/// Either part may be unknown; lookups need both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    pub account: Option<String>,
    pub region: Option<String>,
}

impl Environment {
    pub fn new(account: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            account: Some(account.into()),
            region: Some(region.into()),
        }
    }

    /// Load from `CDK_DEFAULT_ACCOUNT` / `CDK_DEFAULT_REGION`
    ///
    /// Unset or empty variables leave the corresponding part unknown.
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|value| !value.is_empty());
        Self {
            account: read(DEFAULT_ACCOUNT_ENV),
            region: read(DEFAULT_REGION_ENV),
        }
    }

    /// Whether both account and region are known
    pub fn is_resolved(&self) -> bool {
        self.account.is_some() && self.region.is_some()
    }
}

/// Stack configuration
#[derive(Debug, Clone, Default)]
pub struct StackProps {
    pub env: Environment,
    /// Template `Description`
    pub description: Option<String>,
}

impl StackProps {
    /// Defaults with the environment taken from `CDK_DEFAULT_*` variables
    pub fn from_env() -> Self {
        Self {
            env: Environment::from_env(),
            description: None,
        }
    }
}

/// A context value a lookup needed but the cache did not have
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingContext {
    pub key: String,
    pub provider: String,
    pub props: Value,
}

/// Synthesized CloudFormation template
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    #[serde(rename = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "Resources")]
    pub resources: BTreeMap<String, Value>,
}

impl Template {
    /// Resource block by logical id
    pub fn resource(&self, logical_id: &str) -> Option<&Value> {
        self.resources.get(logical_id)
    }

    /// Resource blocks of one CloudFormation type, in logical-id order
    pub fn resources_of_type(&self, type_name: &str) -> Vec<(&str, &Value)> {
        self.resources
            .iter()
            .filter(|(_, block)| block.get("Type").and_then(Value::as_str) == Some(type_name))
            .map(|(logical_id, block)| (logical_id.as_str(), block))
            .collect()
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> ConstructResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// YAML rendering
    pub fn to_yaml(&self) -> ConstructResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Root scope of a construct tree
#[derive(Debug)]
pub struct Stack {
    name: String,
    props: StackProps,
    constructs: BTreeSet<ConstructPath>,
    resources: BTreeMap<String, CfnResource>,
    missing_context: Vec<MissingContext>,
}

impl Stack {
    pub fn new(name: impl Into<String>, props: StackProps) -> Self {
        let name = name.into();
        debug!("Created stack {} ({:?})", name, props.env);
        Self {
            name,
            props,
            constructs: BTreeSet::new(),
            resources: BTreeMap::new(),
            missing_context: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn environment(&self) -> &Environment {
        &self.props.env
    }

    /// Deployment account, or the `AWS::AccountId` pseudo parameter
    pub fn account(&self) -> AttrValue {
        self.props
            .env
            .account
            .as_ref()
            .map(AttrValue::from)
            .unwrap_or(AttrValue::Token(Token::Pseudo(PseudoParameter::AccountId)))
    }

    /// Deployment region, or the `AWS::Region` pseudo parameter
    pub fn region(&self) -> AttrValue {
        self.props
            .env
            .region
            .as_ref()
            .map(AttrValue::from)
            .unwrap_or(AttrValue::Token(Token::Pseudo(PseudoParameter::Region)))
    }

    /// Partition pseudo parameter
    pub fn partition(&self) -> AttrValue {
        AttrValue::Token(Token::Pseudo(PseudoParameter::Partition))
    }

    /// Whether a construct exists at `path`; the root always exists
    pub fn contains(&self, path: &ConstructPath) -> bool {
        path.is_root() || self.constructs.contains(path)
    }

    /// Check that `path` could be registered without registering it
    pub fn ensure_available(&self, path: &ConstructPath) -> ConstructResult<()> {
        let id = path.id();
        if path.is_root() || id.is_empty() || id.contains('/') {
            return Err(ConstructError::InvalidConstructId(id.to_string()));
        }

        let parent = path.parent().unwrap_or_default();
        if !self.contains(&parent) {
            return Err(ConstructError::UnknownScope(parent.to_string()));
        }

        if self.constructs.contains(path) {
            return Err(ConstructError::DuplicateConstructId {
                scope: if parent.is_root() {
                    self.name.clone()
                } else {
                    parent.to_string()
                },
                id: id.to_string(),
            });
        }
        Ok(())
    }

    /// Register a construct node without a resource
    pub fn define_construct(&mut self, path: &ConstructPath) -> ConstructResult<()> {
        self.ensure_available(path)?;
        self.constructs.insert(path.clone());
        debug!("Registered construct {}/{}", self.name, path);
        Ok(())
    }

    /// Register a construct node that renders as a resource
    pub fn define_resource(
        &mut self,
        path: &ConstructPath,
        schema: &'static ResourceSchema,
        properties: PropertyStruct,
    ) -> ConstructResult<ResourceHandle> {
        self.ensure_available(path)?;

        let logical_id = path.logical_id();
        if self.resources.contains_key(&logical_id) {
            return Err(ConstructError::DuplicateConstructId {
                scope: self.name.clone(),
                id: logical_id,
            });
        }

        let resource = CfnResource::new(path.clone(), logical_id.clone(), schema, properties);
        let handle = resource.handle();
        self.constructs.insert(path.clone());
        self.resources.insert(logical_id, resource);
        debug!(
            "Registered {} at {}/{} as {}",
            schema.type_name, self.name, path, handle.logical_id
        );
        Ok(handle)
    }

    /// Resource behind a handle
    pub fn resource(&self, handle: &ResourceHandle) -> Option<&CfnResource> {
        self.resources.get(&handle.logical_id)
    }

    /// Mutable resource behind a handle
    pub fn resource_mut(&mut self, handle: &ResourceHandle) -> ConstructResult<&mut CfnResource> {
        self.resources
            .get_mut(&handle.logical_id)
            .ok_or_else(|| ConstructError::UnknownScope(handle.path.to_string()))
    }

    /// All resources in logical-id order
    pub fn resources(&self) -> impl Iterator<Item = &CfnResource> {
        self.resources.values()
    }

    /// Remove a construct and everything underneath it
    ///
    /// Returns whether anything was removed. Fails without removing anything
    /// when a resource outside the subtree references a resource inside it.
    pub fn remove(&mut self, path: &ConstructPath) -> ConstructResult<bool> {
        if path.is_root() {
            return Ok(false);
        }

        let removed_ids: BTreeSet<&str> = self
            .resources
            .values()
            .filter(|resource| resource.path().starts_with(path))
            .map(CfnResource::logical_id)
            .collect();
        for survivor in self
            .resources
            .values()
            .filter(|resource| !resource.path().starts_with(path))
        {
            if let Some(target) = survivor
                .references()
                .into_iter()
                .find(|id| removed_ids.contains(id.as_str()))
            {
                warn!(
                    "Refusing to remove {}/{}: {} references {}",
                    self.name,
                    path,
                    survivor.logical_id(),
                    target
                );
                return Err(ConstructError::StillReferenced {
                    path: path.to_string(),
                    logical_id: target,
                    referenced_by: survivor.logical_id().to_string(),
                });
            }
        }

        let before = self.constructs.len();
        self.constructs.retain(|existing| !existing.starts_with(path));
        self.resources
            .retain(|_, resource| !resource.path().starts_with(path));
        let removed = before != self.constructs.len();
        if removed {
            debug!("Removed construct {}/{}", self.name, path);
        }
        Ok(removed)
    }

    /// Record a lookup the context cache could not answer
    pub fn report_missing_context(&mut self, missing: MissingContext) {
        if !self.missing_context.iter().any(|m| m.key == missing.key) {
            self.missing_context.push(missing);
        }
    }

    /// Lookups that fell back to dummy values during this run
    pub fn missing_context(&self) -> &[MissingContext] {
        &self.missing_context
    }

    /// Render every resource and merge the fragments
    ///
    /// Pure function of the tree: repeated calls produce identical templates.
    pub fn synth(&self) -> Template {
        let resources: BTreeMap<String, Value> = self
            .resources
            .iter()
            .map(|(logical_id, resource)| (logical_id.clone(), resource.render()))
            .collect();

        info!(
            "Synthesized stack {} with {} resources",
            self.name,
            resources.len()
        );

        Template {
            description: self.props.description.clone(),
            resources,
        }
    }

    /// Manifest entries for lookups that need the context provider to run
    pub fn missing_context_manifest(&self) -> Value {
        let entries: Map<String, Value> = self
            .missing_context
            .iter()
            .map(|missing| {
                (
                    missing.key.clone(),
                    serde_json::json!({ "provider": missing.provider, "props": missing.props }),
                )
            })
            .collect();
        Value::Object(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::route53::{DNSSEC, HEALTH_CHECK};
    use pretty_assertions::assert_eq;

    fn dnssec_props() -> PropertyStruct {
        PropertyStruct::builder(DNSSEC.properties)
            .field("hosted_zone_id", "Z123")
            .build()
            .unwrap()
    }

    #[test]
    fn test_top_level_logical_id_is_verbatim() {
        assert_eq!(ConstructPath::root().child("Health").logical_id(), "Health");
        assert_eq!(ConstructPath::root().child("my-zone").logical_id(), "myzone");
    }

    #[test]
    fn test_nested_logical_id_hides_resource_segment() {
        let path = ConstructPath::root().child("Zone").child("Resource");
        let id = path.logical_id();
        assert!(id.starts_with("Zone"));
        assert_eq!(id.len(), "Zone".len() + 8);
        assert!(id["Zone".len()..].chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(id, path.logical_id());
    }

    #[test]
    fn test_logical_ids_differ_by_path() {
        let a = ConstructPath::root().child("a-b").child("Resource");
        let b = ConstructPath::root().child("ab").child("Resource");
        assert_ne!(a.logical_id(), b.logical_id());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut stack = Stack::new("App", StackProps::default());
        let path = ConstructPath::root().child("Dnssec");
        stack.define_resource(&path, &DNSSEC, dnssec_props()).unwrap();

        let err = stack.define_construct(&path).unwrap_err();
        assert_eq!(
            err,
            ConstructError::DuplicateConstructId {
                scope: "App".to_string(),
                id: "Dnssec".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_ids_and_scopes() {
        let mut stack = Stack::new("App", StackProps::default());
        assert!(matches!(
            stack.define_construct(&ConstructPath::root().child("")),
            Err(ConstructError::InvalidConstructId(_))
        ));
        assert!(matches!(
            stack.define_construct(&ConstructPath::root().child("a/b")),
            Err(ConstructError::InvalidConstructId(_))
        ));
        assert!(matches!(
            stack.define_construct(&ConstructPath::root().child("Missing").child("Child")),
            Err(ConstructError::UnknownScope(_))
        ));
    }

    #[test]
    fn test_remove_drops_subtree() {
        let mut stack = Stack::new("App", StackProps::default());
        let parent = ConstructPath::root().child("Group");
        stack.define_construct(&parent).unwrap();
        stack
            .define_resource(&parent.child("Dnssec"), &DNSSEC, dnssec_props())
            .unwrap();
        assert_eq!(stack.synth().resources.len(), 1);

        assert!(stack.remove(&parent).unwrap());
        assert!(stack.synth().resources.is_empty());
        assert!(!stack.contains(&parent));
        assert!(!stack.remove(&parent).unwrap());
    }

    #[test]
    fn test_remove_refuses_dependency_target() {
        let mut stack = Stack::new("App", StackProps::default());
        let first = stack
            .define_resource(&ConstructPath::root().child("First"), &DNSSEC, dnssec_props())
            .unwrap();
        let second = stack
            .define_resource(&ConstructPath::root().child("Second"), &DNSSEC, dnssec_props())
            .unwrap();
        stack.resource_mut(&second).unwrap().add_dependency(&first);

        match stack.remove(&first.path) {
            Err(ConstructError::StillReferenced { referenced_by, .. }) => {
                assert_eq!(referenced_by, "Second")
            }
            other => panic!("expected the removal to be refused, got {:?}", other),
        }
        assert_eq!(stack.synth().resources.len(), 2);

        assert!(stack.remove(&second.path).unwrap());
        assert!(stack.remove(&first.path).unwrap());
    }

    #[test]
    fn test_synth_is_deterministic() {
        let build = || {
            let mut stack = Stack::new("App", StackProps::default());
            for id in ["Zeta", "Alpha", "Mid"] {
                stack
                    .define_resource(&ConstructPath::root().child(id), &DNSSEC, dnssec_props())
                    .unwrap();
            }
            stack.synth().to_json().unwrap()
        };
        assert_eq!(build(), build());

        let mut stack = Stack::new("App", StackProps::default());
        stack
            .define_resource(&ConstructPath::root().child("B"), &DNSSEC, dnssec_props())
            .unwrap();
        stack
            .define_resource(&ConstructPath::root().child("A"), &DNSSEC, dnssec_props())
            .unwrap();
        let keys: Vec<_> = stack.synth().resources.keys().cloned().collect();
        assert_eq!(keys, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_environment_defaults_to_pseudo_parameters() {
        let stack = Stack::new("App", StackProps::default());
        assert_eq!(
            stack.region(),
            AttrValue::Token(Token::Pseudo(PseudoParameter::Region))
        );
        assert!(!stack.environment().is_resolved());

        let stack = Stack::new(
            "App",
            StackProps {
                env: Environment::new("123456789012", "eu-west-1"),
                description: Some("dns".to_string()),
            },
        );
        assert_eq!(stack.region(), AttrValue::from("eu-west-1"));
        assert_eq!(stack.account(), AttrValue::from("123456789012"));
        assert_eq!(stack.synth().description.as_deref(), Some("dns"));
    }

    #[test]
    fn test_template_filters_by_type() {
        let mut stack = Stack::new("App", StackProps::default());
        stack
            .define_resource(&ConstructPath::root().child("Dnssec"), &DNSSEC, dnssec_props())
            .unwrap();
        let template = stack.synth();
        assert_eq!(template.resources_of_type("AWS::Route53::DNSSEC").len(), 1);
        assert!(template.resources_of_type(HEALTH_CHECK.type_name).is_empty());
        assert!(template.to_yaml().unwrap().contains("AWS::Route53::DNSSEC"));
    }
}
