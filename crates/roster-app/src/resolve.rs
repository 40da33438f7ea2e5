// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde_json::{Map, Value};
use std::fmt;

use crate::model::{Record, Scalar};

/// Dot-delimited locator such as `address.city`. Parsing always succeeds;
/// a path with empty segments simply never resolves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_owned(),
            segments: raw.split('.').map(str::to_owned).collect(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }
}

impl From<&str> for FieldPath {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

pub fn resolve(record: &Record, path: &FieldPath) -> Option<Scalar> {
    resolve_in(record.attributes(), path).and_then(Scalar::from_value)
}

/// Walks `path` through nested objects. Stops with `None` at the first
/// missing attribute or non-object intermediate value.
pub fn resolve_in<'a>(attributes: &'a Map<String, Value>, path: &FieldPath) -> Option<&'a Value> {
    let mut segments = path.segments();
    let mut current = attributes.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}
