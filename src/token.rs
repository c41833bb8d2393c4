// Copyright (c) 2025 - Cowboy AI, Inc.
//! Deferred References
//!
//! Attributes such as a hosted zone's id or name servers are only known after
//! CloudFormation deploys the stack. They are carried as [`Token`] values that
//! render to intrinsic functions, never as placeholder strings, so using one
//! where a literal is required is caught at the type level.

use serde_json::{json, Value};
use std::fmt;

/// AWS pseudo parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PseudoParameter {
    AccountId,
    Partition,
    Region,
    StackName,
    UrlSuffix,
}

impl PseudoParameter {
    /// The `Ref` target for this pseudo parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AccountId => "AWS::AccountId",
            Self::Partition => "AWS::Partition",
            Self::Region => "AWS::Region",
            Self::StackName => "AWS::StackName",
            Self::UrlSuffix => "AWS::URLSuffix",
        }
    }
}

/// An unresolved reference, substituted by CloudFormation at deploy time
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// `{"Ref": logicalId}`
    Ref(String),
    /// `{"Fn::GetAtt": [logicalId, attribute]}`
    GetAtt {
        logical_id: String,
        attribute: String,
    },
    /// `{"Ref": "AWS::..."}`
    Pseudo(PseudoParameter),
    /// `{"Fn::Join": [delimiter, [parts...]]}`
    Join {
        delimiter: String,
        parts: Vec<AttrValue>,
    },
    /// `{"Fn::Select": [index, list]}`
    Select { index: usize, list: Box<AttrValue> },
    /// `{"Fn::Split": [delimiter, source]}`
    Split {
        delimiter: String,
        source: Box<AttrValue>,
    },
}

impl Token {
    /// Reference to another resource's primary identifier
    pub fn reference(logical_id: impl Into<String>) -> Self {
        Self::Ref(logical_id.into())
    }

    /// Reference to a named attribute of another resource
    pub fn get_att(logical_id: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::GetAtt {
            logical_id: logical_id.into(),
            attribute: attribute.into(),
        }
    }

    /// Render as a CloudFormation intrinsic
    pub fn to_json(&self) -> Value {
        match self {
            Self::Ref(logical_id) => json!({ "Ref": logical_id }),
            Self::GetAtt {
                logical_id,
                attribute,
            } => json!({ "Fn::GetAtt": [logical_id, attribute] }),
            Self::Pseudo(param) => json!({ "Ref": param.as_str() }),
            Self::Join { delimiter, parts } => {
                let parts: Vec<Value> = parts.iter().map(AttrValue::to_json).collect();
                json!({ "Fn::Join": [delimiter, parts] })
            }
            Self::Select { index, list } => json!({ "Fn::Select": [index, list.to_json()] }),
            Self::Split { delimiter, source } => {
                json!({ "Fn::Split": [delimiter, source.to_json()] })
            }
        }
    }

    /// Logical ids of the resources this token depends on
    pub fn referenced_logical_ids(&self) -> Vec<&str> {
        match self {
            Self::Ref(logical_id) | Self::GetAtt { logical_id, .. } => vec![logical_id.as_str()],
            Self::Pseudo(_) => Vec::new(),
            Self::Join { parts, .. } => parts
                .iter()
                .flat_map(|part| part.referenced_logical_ids())
                .collect(),
            Self::Select { list, .. } => list.referenced_logical_ids(),
            Self::Split { source, .. } => source.referenced_logical_ids(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ref(logical_id) => write!(f, "${{Token[Ref:{}]}}", logical_id),
            Self::GetAtt {
                logical_id,
                attribute,
            } => write!(f, "${{Token[{}.{}]}}", logical_id, attribute),
            Self::Pseudo(param) => write!(f, "${{Token[{}]}}", param.as_str()),
            Self::Join { .. } => write!(f, "${{Token[Fn::Join]}}"),
            Self::Select { .. } => write!(f, "${{Token[Fn::Select]}}"),
            Self::Split { .. } => write!(f, "${{Token[Fn::Split]}}"),
        }
    }
}

/// A string attribute that is either known now or deferred until deployment
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttrValue {
    Literal(String),
    Token(Token),
}

impl AttrValue {
    /// The literal value, if known at synthesis time
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(value) => Some(value),
            Self::Token(_) => None,
        }
    }

    /// Whether the value is only known after deployment
    pub fn is_token(&self) -> bool {
        matches!(self, Self::Token(_))
    }

    /// Concatenate values, folding adjacent literals
    ///
    /// Returns a literal when every part is literal, otherwise an
    /// `Fn::Join` with an empty delimiter.
    pub fn concat(parts: impl IntoIterator<Item = AttrValue>) -> AttrValue {
        let mut folded: Vec<AttrValue> = Vec::new();
        for part in parts {
            if let (Some(AttrValue::Literal(prev)), AttrValue::Literal(next)) =
                (folded.last_mut(), &part)
            {
                prev.push_str(next);
                continue;
            }
            folded.push(part);
        }

        if folded.len() == 1 {
            return folded.remove(0);
        }
        if folded.is_empty() {
            return AttrValue::Literal(String::new());
        }
        AttrValue::Token(Token::Join {
            delimiter: String::new(),
            parts: folded,
        })
    }

    /// Render as a template value
    pub fn to_json(&self) -> Value {
        match self {
            Self::Literal(value) => Value::String(value.clone()),
            Self::Token(token) => token.to_json(),
        }
    }

    /// Logical ids of the resources this value depends on
    pub fn referenced_logical_ids(&self) -> Vec<&str> {
        match self {
            Self::Literal(_) => Vec::new(),
            Self::Token(token) => token.referenced_logical_ids(),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{}", value),
            Self::Token(token) => write!(f, "{}", token),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Literal(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Literal(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        Self::Literal(value.clone())
    }
}

impl From<Token> for AttrValue {
    fn from(token: Token) -> Self {
        Self::Token(token)
    }
}
