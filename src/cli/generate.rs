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

//! Manifest generation commands

use crate::domain::config::{ConfigResolver, ImageConfiguration, PipelineContext, PlatformMode};
use crate::domain::fragment::{self, KindRegistry};
use crate::domain::pipeline::EnricherPipeline;
use crate::domain::resource::ResourceCollection;
use crate::infrastructure::enrichers::default_enrichers;
use anyhow::Context;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Generator settings file: image metadata, flat properties, nested enricher
/// configuration and custom kind mappings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorSettings {
    #[serde(default)]
    pub app: Option<String>,
    #[serde(default)]
    pub images: Vec<ImageConfiguration>,
    #[serde(default)]
    pub properties: HashMap<String, String>,
    #[serde(default)]
    pub enrichers: serde_yaml::Value,
    #[serde(default)]
    pub kind_mappings: Vec<KindMappingSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KindMappingSettings {
    pub kind: String,
    pub filename_types: Vec<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct GenerateCommand {
    /// Application name used for default resource names and labels
    #[arg(long, short = 'a', default_value = "app")]
    pub app: String,

    /// Target platform (kubernetes, openshift)
    #[arg(long, short = 'p', default_value = "kubernetes")]
    pub platform: String,

    /// Kubernetes namespace stamped on documents that declare none
    #[arg(long, short = 'n')]
    pub namespace: Option<String>,

    /// Directory holding resource fragment files
    #[arg(long, short = 'f')]
    pub fragments: Option<PathBuf>,

    /// Generator settings file (YAML: images, properties, enricher config)
    #[arg(long, short = 's')]
    pub settings: Option<PathBuf>,

    /// Output file; stdout when omitted
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

impl GenerateCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let settings = load_settings(self.settings.as_deref())?;
        let registry = build_registry(&settings);

        let platform: PlatformMode = self.platform.parse()?;
        let app_name = settings.app.clone().unwrap_or_else(|| self.app.clone());

        let mut resources = load_fragments(&registry, self.fragments.as_deref(), &app_name)?;
        info!(count = resources.len(), "loaded fragments");

        let resolver = ConfigResolver::new(
            "kubefab.enricher",
            settings.properties.clone(),
            settings.enrichers.clone(),
        );
        let mut ctx = PipelineContext::new(platform, app_name, settings.images.clone(), resolver);
        ctx.namespace = self.namespace.clone();

        let pipeline = EnricherPipeline::new(default_enrichers());
        pipeline.run(&mut ctx, &mut resources)?;

        if let Some(ref namespace) = self.namespace {
            for document in resources.iter_mut() {
                if document.namespace.is_none() {
                    document.namespace = Some(namespace.clone());
                }
            }
        }

        let rendered = render(&resources)?;
        match &self.output {
            Some(path) => {
                std::fs::write(path, rendered)
                    .with_context(|| format!("cannot write {}", path.display()))?;
                info!(output = %path.display(), documents = resources.len(), "wrote resource list");
            }
            None => print!("{}", rendered),
        }
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ValidateCommand {
    /// Directory holding resource fragment files
    #[arg(long, short = 'f')]
    pub fragments: PathBuf,

    /// Default name for fragments that declare none
    #[arg(long, short = 'a', default_value = "app")]
    pub app: String,
}

impl ValidateCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let registry = KindRegistry::new();
        let resources = load_fragments(&registry, Some(&self.fragments), &self.app)?;
        for document in resources.iter() {
            println!("{}/{}", document.kind, document.name);
        }
        info!(count = resources.len(), "fragments are valid");
        Ok(())
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<GeneratorSettings> {
    match path {
        None => Ok(GeneratorSettings::default()),
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read settings file {}", path.display()))?;
            serde_yaml::from_str(&text)
                .with_context(|| format!("invalid settings file {}", path.display()))
        }
    }
}

fn build_registry(settings: &GeneratorSettings) -> KindRegistry {
    let mut registry = KindRegistry::new();
    for mapping in &settings.kind_mappings {
        registry.register_mapping(&mapping.kind, mapping.filename_types.clone());
    }
    registry
}

/// Fragment files are loaded in name order so output is deterministic.
fn load_fragments(
    registry: &KindRegistry,
    dir: Option<&Path>,
    default_name: &str,
) -> anyhow::Result<ResourceCollection> {
    let dir = match dir {
        Some(dir) => dir,
        None => return Ok(ResourceCollection::new()),
    };

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("cannot read fragment directory {}", dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();

    Ok(fragment::load(registry, &files, default_name)?)
}

fn render(resources: &ResourceCollection) -> anyhow::Result<String> {
    let mut out = String::new();
    for document in resources.iter() {
        out.push_str("---\n");
        out.push_str(&serde_yaml::to_string(&document.to_value())?);
    }
    Ok(out)
}
