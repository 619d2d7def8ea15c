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

use crate::domain::fragment::kinds::KindRegistry;
use crate::domain::resource::{ResourceCollection, ResourceDocument};
use crate::infrastructure::constants::api_version_for;
use crate::shared::error::{ManifestError, Result};
use regex::Regex;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// A resource document parsed from a single fragment file, plus the lineage
/// that determined its kind and name. Immutable after loading.
#[derive(Debug, Clone)]
pub struct Fragment {
    pub document: ResourceDocument,
    pub source_file_name: String,
    pub kind_from_filename: Option<String>,
    pub kind_from_content: Option<String>,
    pub name_from_content: Option<String>,
    pub default_name: String,
}

/// `<name>-<type>.(yaml|yml|json)`, with the `<name>-` part optional.
fn filename_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:(?P<name>.+)-)?(?P<type>[^-.]+)\.(?i:(yaml|yml|json))$")
            .expect("invalid fragment filename pattern")
    })
}

/// Helm leaves behind `*.helm.yaml` companions that must never be loaded.
fn helm_exclusion_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\.helm\.ya?ml$").expect("invalid helm pattern"))
}

/// Loads fragment files into a resource collection, one document per file,
/// in input order. A single unreadable file aborts the whole load.
pub fn load<P: AsRef<Path>>(
    registry: &KindRegistry,
    files: &[P],
    default_name: &str,
) -> Result<ResourceCollection> {
    let mut collection = ResourceCollection::new();
    for file in files {
        if let Some(fragment) = load_fragment(registry, file.as_ref(), default_name)? {
            collection.push(fragment.document);
        }
    }
    Ok(collection)
}

/// Loads a single fragment file. Returns `None` for excluded files.
pub fn load_fragment(
    registry: &KindRegistry,
    path: &Path,
    default_name: &str,
) -> Result<Option<Fragment>> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if helm_exclusion_pattern().is_match(&file_name) {
        debug!(file = %file_name, "skipping helm fragment");
        return Ok(None);
    }

    let (name_from_filename, kind_from_filename) = match filename_pattern().captures(&file_name) {
        Some(captures) => {
            let name = captures.name("name").map(|m| m.as_str().to_string());
            let kind = captures
                .name("type")
                .and_then(|m| registry.kind_for(m.as_str()))
                .map(str::to_string);
            (name, kind)
        }
        None => (None, None),
    };

    let text = std::fs::read_to_string(path)?;
    let content = parse_content(&file_name, &text)?;

    let metadata = match content.get("metadata") {
        None => Mapping::new(),
        Some(Value::Mapping(m)) => m.clone(),
        Some(_) => {
            return Err(ManifestError::validation(format!(
                "Fragment '{}': 'metadata' must be a mapping",
                file_name
            )));
        }
    };

    let kind_from_content = content
        .get("kind")
        .and_then(Value::as_str)
        .map(str::to_string);

    // Content wins over filename inference for the kind.
    let kind = match kind_from_content.clone().or_else(|| kind_from_filename.clone()) {
        Some(kind) => kind,
        None => {
            return Err(ManifestError::validation(format!(
                "Fragment '{}' declares no kind and its file name does not match \
                 the pattern <name>-<type>.(yaml|yml|json)",
                file_name
            )));
        }
    };

    let name_from_content = metadata
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string);

    let name = name_from_content
        .clone()
        .or(name_from_filename)
        .unwrap_or_else(|| default_name.to_string());

    let api_version = content
        .get("apiVersion")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| api_version_for(&kind).to_string());

    let namespace = metadata
        .get("namespace")
        .and_then(Value::as_str)
        .map(str::to_string);

    let spec = content.get("spec").cloned().unwrap_or(Value::Null);
    let mut extra = Mapping::new();
    for (key, value) in &content {
        let is_reserved = matches!(
            key.as_str(),
            Some("apiVersion") | Some("kind") | Some("metadata") | Some("spec")
        );
        if !is_reserved {
            extra.insert(key.clone(), value.clone());
        }
    }

    let document = ResourceDocument {
        api_version,
        kind: kind.clone(),
        name,
        namespace,
        labels: scalar_map(metadata.get("labels")),
        annotations: scalar_map(metadata.get("annotations")),
        spec,
        extra,
    };

    debug!(file = %file_name, kind = %document.kind, name = %document.name, "loaded fragment");

    Ok(Some(Fragment {
        document,
        source_file_name: file_name,
        kind_from_filename,
        kind_from_content,
        name_from_content,
        default_name: default_name.to_string(),
    }))
}

fn parse_content(file_name: &str, text: &str) -> Result<Mapping> {
    let value: Value = if file_name.to_lowercase().ends_with(".json") {
        serde_json::from_str(text).map_err(|e| {
            ManifestError::validation(format!("Fragment '{}' is not valid JSON: {}", file_name, e))
        })?
    } else {
        serde_yaml::from_str(text).map_err(|e| {
            ManifestError::validation(format!("Fragment '{}' is not valid YAML: {}", file_name, e))
        })?
    };

    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(ManifestError::validation(format!(
            "Fragment '{}' must contain a YAML/JSON object",
            file_name
        ))),
    }
}

fn scalar_map(value: Option<&Value>) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    if let Some(Value::Mapping(mapping)) = value {
        for (key, value) in mapping {
            if let (Some(key), Some(value)) = (key.as_str(), scalar_to_string(value)) {
                out.insert(key.to_string(), value);
            }
        }
    }
    out
}

pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
