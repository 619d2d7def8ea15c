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

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata of one container image produced by the build, as handed to the
/// pipeline by the outer build tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfiguration {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub registry: Option<String>,
    #[serde(default)]
    pub ports: Vec<i32>,
    #[serde(default)]
    pub health_check: Option<HealthCheckConfig>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckConfig {
    pub path: String,
    #[serde(default)]
    pub port: Option<i32>,
    #[serde(default)]
    pub scheme: Option<String>,
}

impl ImageConfiguration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            registry: None,
            ports: Vec::new(),
            health_check: None,
            env: BTreeMap::new(),
            labels: BTreeMap::new(),
        }
    }

    /// Container name: the alias when given, otherwise the last path segment
    /// of the image name without its tag.
    pub fn container_name(&self) -> String {
        if let Some(ref alias) = self.alias {
            return alias.clone();
        }
        let without_tag = self.name.rsplit_once(':').map_or(self.name.as_str(), |(head, tail)| {
            // A colon may belong to a registry port (host:5000/img); only
            // strip it when the remainder holds no path separator.
            if tail.contains('/') {
                self.name.as_str()
            } else {
                head
            }
        });
        without_tag
            .rsplit('/')
            .next()
            .unwrap_or(without_tag)
            .to_string()
    }

    /// Image reference including the registry prefix when one is configured
    /// and the name does not already carry one.
    pub fn full_name(&self) -> String {
        match &self.registry {
            Some(registry) if !self.name.starts_with(&format!("{}/", registry)) => {
                format!("{}/{}", registry, self.name)
            }
            _ => self.name.clone(),
        }
    }
}
