// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::ids::*;
use crate::resolve::{FieldPath, resolve};

/// A directory entry as delivered by the service: a loose attribute mapping
/// with an integer `id` and nested objects such as `address` and `company`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new(attributes: Map<String, Value>) -> Self {
        Self(attributes)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn id(&self) -> Option<UserId> {
        self.0.get("id").and_then(Value::as_i64).map(UserId::new)
    }

    pub fn resolve(&self, path: &FieldPath) -> Option<Scalar> {
        resolve(self, path)
    }

    /// Display text for a dotted path; empty when the path does not resolve.
    pub fn text(&self, path: &str) -> String {
        self.resolve(&FieldPath::parse(path))
            .map(|value| value.display())
            .unwrap_or_default()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(attributes: Map<String, Value>) -> Self {
        Self(attributes)
    }
}

impl TryFrom<Value> for Record {
    type Error = anyhow::Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(attributes) => Ok(Self(attributes)),
            other => bail!("expected a JSON object for a user record, got {other}"),
        }
    }
}

/// A resolved leaf attribute. Anything else (null, bool, array, object)
/// resolves to nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(f64),
}

impl Scalar {
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Number(number) => number.as_f64().map(Self::Number),
            _ => None,
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Text(value) => value.clone(),
            Self::Number(value) if value.fract() == 0.0 && value.abs() < 9.0e15 => {
                format!("{}", *value as i64)
            }
            Self::Number(value) => value.to_string(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Number(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
}

impl Post {
    /// Decodes a post list entry by entry. Entries that are not posts are
    /// logged and skipped so the rest still render.
    pub fn decode_list(entries: Vec<Value>) -> Vec<Self> {
        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                serde_json::from_value(entry)
                    .inspect_err(|error| warn!(index, %error, "skipping malformed post"))
                    .ok()
            })
            .collect()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Active sort column and direction. `path: None` means the order the
/// collection arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub path: Option<FieldPath>,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn is_active(&self, path: &FieldPath) -> bool {
        self.path.as_ref() == Some(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Column {
    Name,
    Username,
    Phone,
    Email,
    City,
    Company,
}

impl Column {
    pub const ALL: [Self; 6] = [
        Self::Name,
        Self::Username,
        Self::Phone,
        Self::Email,
        Self::City,
        Self::Company,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Username => "Username",
            Self::Phone => "Phone",
            Self::Email => "Email",
            Self::City => "City",
            Self::Company => "Company",
        }
    }

    pub const fn path_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Username => "username",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::City => "address.city",
            Self::Company => "company.name",
        }
    }

    pub fn path(self) -> FieldPath {
        FieldPath::parse(self.path_str())
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|column| column.path_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewStatus {
    #[default]
    Loading,
    NotFound,
    Ready,
}

impl ViewStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::NotFound => "not-found",
            Self::Ready => "ready",
        }
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::NotFound | Self::Ready)
    }
}
