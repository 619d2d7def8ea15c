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

use crate::domain::config::image::ImageConfiguration;
use crate::domain::config::resolver::ConfigResolver;
use crate::shared::error::ManifestError;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformMode {
    Kubernetes,
    OpenShift,
}

impl PlatformMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformMode::Kubernetes => "kubernetes",
            PlatformMode::OpenShift => "openshift",
        }
    }

    pub fn is_openshift(&self) -> bool {
        matches!(self, PlatformMode::OpenShift)
    }
}

impl std::str::FromStr for PlatformMode {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kubernetes" => Ok(PlatformMode::Kubernetes),
            "openshift" => Ok(PlatformMode::OpenShift),
            _ => Err(ManifestError::ConfigError(format!(
                "Invalid platform mode: {}",
                s
            ))),
        }
    }
}

/// State shared by all enrichers during one generation run. Created once per
/// invocation and discarded afterwards.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub platform: PlatformMode,
    pub app_name: String,
    pub namespace: Option<String>,
    pub images: Vec<ImageConfiguration>,
    pub config: ConfigResolver,
    processing_instructions: HashMap<String, Vec<String>>,
}

impl PipelineContext {
    pub fn new(
        platform: PlatformMode,
        app_name: impl Into<String>,
        images: Vec<ImageConfiguration>,
        config: ConfigResolver,
    ) -> Self {
        Self {
            platform,
            app_name: app_name.into(),
            namespace: None,
            images,
            config,
            processing_instructions: HashMap::new(),
        }
    }

    /// Records a derived fact for enrichers running later in the same run.
    pub fn set_instruction(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.processing_instructions.insert(key.into(), values);
    }

    pub fn instruction(&self, key: &str) -> Option<&[String]> {
        self.processing_instructions.get(key).map(Vec::as_slice)
    }
}
