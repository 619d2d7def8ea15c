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

use crate::infrastructure::constants::FALLBACK_SUFFIX;
use std::collections::{BTreeMap, HashMap};

/// Bidirectional mapping between a resource kind and its filename suffixes
/// ("type tags"). Passed by value into the fragment loader so independent
/// runs and parallel tests stay isolated.
#[derive(Debug, Clone)]
pub struct KindRegistry {
    kind_to_suffixes: BTreeMap<String, Vec<String>>,
    suffix_to_kind: HashMap<String, String>,
}

const BUILTIN_MAPPINGS: &[(&str, &[&str])] = &[
    ("ConfigMap", &["cm", "configmap"]),
    ("CronJob", &["cj", "cronjob"]),
    ("DaemonSet", &["ds", "daemonset"]),
    ("Deployment", &["deployment", "deploy"]),
    ("DeploymentConfig", &["dc", "deploymentconfig"]),
    ("HorizontalPodAutoscaler", &["hpa"]),
    ("Ingress", &["ingress", "ing"]),
    ("Job", &["job"]),
    ("Namespace", &["ns", "namespace"]),
    ("NetworkPolicy", &["np", "networkpolicy"]),
    ("PersistentVolumeClaim", &["pvc"]),
    ("Pod", &["pod", "po"]),
    ("ReplicaSet", &["rs", "replicaset"]),
    ("ReplicationController", &["rc", "replicationcontroller"]),
    ("Role", &["role"]),
    ("RoleBinding", &["rb", "rolebinding"]),
    ("Route", &["route"]),
    ("Secret", &["secret"]),
    ("Service", &["svc", "service"]),
    ("ServiceAccount", &["sa", "serviceaccount"]),
    ("StatefulSet", &["statefulset", "sts"]),
];

impl Default for KindRegistry {
    fn default() -> Self {
        let mut registry = Self {
            kind_to_suffixes: BTreeMap::new(),
            suffix_to_kind: HashMap::new(),
        };
        for (kind, suffixes) in BUILTIN_MAPPINGS {
            registry.register_mapping(kind, suffixes.iter().map(|s| s.to_string()).collect());
        }
        registry
    }
}

impl KindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or re-registers) a kind's suffix set. Re-registering a kind
    /// replaces its suffixes; a suffix maps to exactly one kind, last
    /// registration wins.
    pub fn register_mapping(&mut self, kind: &str, suffixes: Vec<String>) {
        if let Some(previous) = self.kind_to_suffixes.remove(kind) {
            for suffix in previous {
                self.suffix_to_kind.remove(&suffix.to_lowercase());
            }
        }
        for suffix in &suffixes {
            self.suffix_to_kind
                .insert(suffix.to_lowercase(), kind.to_string());
        }
        self.kind_to_suffixes.insert(kind.to_string(), suffixes);
    }

    /// Suffixes for a kind; unknown kinds and empty registrations fall back
    /// to the custom resource suffix.
    pub fn suffixes_for(&self, kind: &str) -> Vec<String> {
        self.kind_to_suffixes
            .get(kind)
            .filter(|suffixes| !suffixes.is_empty())
            .cloned()
            .unwrap_or_else(|| vec![FALLBACK_SUFFIX.to_string()])
    }

    /// Kind for a filename suffix, case-insensitive.
    pub fn kind_for(&self, suffix: &str) -> Option<&str> {
        self.suffix_to_kind
            .get(&suffix.to_lowercase())
            .map(String::as_str)
    }

    /// `name_with_suffix("name", "Service") == "name-svc"`
    pub fn name_with_suffix(&self, name: &str, kind: &str) -> String {
        let suffixes = self.suffixes_for(kind);
        format!("{}-{}", name, suffixes[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_suffixes_resolve_case_insensitively() {
        let registry = KindRegistry::new();
        assert_eq!(registry.kind_for("svc"), Some("Service"));
        assert_eq!(registry.kind_for("SVC"), Some("Service"));
        assert_eq!(registry.kind_for("deployment"), Some("Deployment"));
        assert_eq!(registry.kind_for("unknown"), None);
    }

    #[test]
    fn unknown_kind_falls_back_to_custom_resource_suffix() {
        let registry = KindRegistry::new();
        assert_eq!(registry.suffixes_for("VeryCustomKind"), vec!["cr"]);
        assert_eq!(
            registry.name_with_suffix("name", "VeryCustomKind"),
            "name-cr"
        );
    }

    #[test]
    fn re_registration_replaces_suffix_set() {
        let mut registry = KindRegistry::new();
        registry.register_mapping("Service", vec!["srvc".to_string()]);
        assert_eq!(registry.kind_for("srvc"), Some("Service"));
        // The old suffixes are gone after re-registration
        assert_eq!(registry.kind_for("svc"), None);
    }

    #[test]
    fn empty_suffix_registration_falls_back_to_custom_resource_suffix() {
        let mut registry = KindRegistry::new();
        registry.register_mapping("Weird", Vec::new());
        assert_eq!(registry.suffixes_for("Weird"), vec!["cr"]);
        assert_eq!(registry.name_with_suffix("name", "Weird"), "name-cr");
    }

    #[test]
    fn suffix_last_registration_wins() {
        let mut registry = KindRegistry::new();
        registry.register_mapping("MyCrd", vec!["svc".to_string()]);
        assert_eq!(registry.kind_for("svc"), Some("MyCrd"));
    }
}
