// Copyright 2025 kubefab contributors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::fragment::loader::scalar_to_string;
use crate::shared::error::{ManifestError, Result};
use serde_yaml::Value;
use std::collections::HashMap;
use std::str::FromStr;

/// Layered configuration lookup used by every enricher. Two sources feed the
/// resolution: a flat property map (`<prefix>.<scope>.<key>` style keys) and
/// a nested configuration document.
///
/// Precedence, highest first:
///   1. specific flat    (`<prefix>.<scope>.<key>`)
///   2. specific nested  (`nested[scope]` walked by the dotted key)
///   3. generic flat     (`<prefix>.<key>`)
///   4. generic nested   (`nested` walked by the dotted key)
///   5. caller default
///
/// A specific flat property always outranks any nested value; a specific
/// nested value outranks a generic flat property.
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    prefix: String,
    properties: HashMap<String, String>,
    nested: Value,
}

impl ConfigResolver {
    pub fn new(
        prefix: impl Into<String>,
        properties: HashMap<String, String>,
        nested: Value,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            properties,
            nested,
        }
    }

    pub fn empty(prefix: impl Into<String>) -> Self {
        Self::new(prefix, HashMap::new(), Value::Null)
    }

    /// Resolves a value for `(scope, key)` where `scope` is typically an
    /// enricher name. Missing keys never error.
    pub fn resolve(&self, scope: &str, key: &str) -> Option<String> {
        if let Some(value) = self.properties.get(&self.flat_key(&[scope, key])) {
            return Some(value.clone());
        }
        if let Some(value) = self.nested.get(scope).and_then(|n| walk(n, key)) {
            return Some(value);
        }
        if let Some(value) = self.properties.get(&self.flat_key(&[key])) {
            return Some(value.clone());
        }
        walk(&self.nested, key)
    }

    pub fn resolve_or(&self, scope: &str, key: &str, default: &str) -> String {
        self.resolve(scope, key)
            .unwrap_or_else(|| default.to_string())
    }

    /// Resolves and coerces a value. A resolved value that fails coercion is
    /// a caller mistake and surfaces as a validation error.
    pub fn resolve_parsed<T>(&self, scope: &str, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.resolve(scope, key) {
            None => Ok(None),
            Some(raw) => raw.parse::<T>().map(Some).map_err(|e| {
                ManifestError::validation(format!(
                    "Invalid value '{}' for config key '{}.{}': {}",
                    raw, scope, key, e
                ))
            }),
        }
    }

    fn flat_key(&self, parts: &[&str]) -> String {
        if self.prefix.is_empty() {
            parts.join(".")
        } else {
            format!("{}.{}", self.prefix, parts.join("."))
        }
    }
}

/// Walks a nested config document by a dotted key (arbitrary depth, e.g.
/// `liveness.path`) and renders the scalar found there.
fn walk(node: &Value, dotted_key: &str) -> Option<String> {
    let mut current = node;
    for segment in dotted_key.split('.') {
        current = current.get(segment)?;
    }
    scalar_to_string(current)
}
