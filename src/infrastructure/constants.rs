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

/// Kinds that carry a pod template at `spec.template.spec`
pub const CONTROLLER_KINDS: &[&str] = &[
    "Deployment",
    "ReplicaSet",
    "ReplicationController",
    "DaemonSet",
    "Job",
    "StatefulSet",
    "DeploymentConfig",
];

/// Fallback filename suffix for unmapped kinds (custom resources)
pub const FALLBACK_SUFFIX: &str = "cr";

/// Processing instruction keys
pub const INSTRUCTION_GENERATED_CONTAINERS: &str = "generated-container-names";

/// Resource labels
pub const LABEL_APP: &str = "app";
pub const LABEL_GROUP: &str = "group";
pub const LABEL_PROVIDER: &str = "provider";
pub const LABEL_PROVIDER_VALUE: &str = "kubefab";

/// Default controller settings
pub const DEFAULT_REPLICAS: i32 = 1;
pub const DEFAULT_IMAGE_PULL_POLICY: &str = "IfNotPresent";
pub const RESTART_POLICY_ON_FAILURE: &str = "OnFailure";

/// Health check defaults
pub const PROBE_INITIAL_DELAY_READINESS: i32 = 10;
pub const PROBE_INITIAL_DELAY_LIVENESS: i32 = 180;
pub const PROBE_PERIOD: i32 = 10;

/// OpenShift route settings
pub const ROUTE_API_VERSION: &str = "route.openshift.io/v1";
pub const DEPLOYMENT_CONFIG_API_VERSION: &str = "apps.openshift.io/v1";
pub const IMAGE_TRIGGER_ANNOTATION: &str = "image.openshift.io/triggers";

/// Well-known container port names, keyed by port number
pub const DEFAULT_PORT_NAMES: &[(i32, &str)] = &[
    (8080, "http"),
    (80, "http"),
    (8081, "http"),
    (8443, "https"),
    (443, "https"),
    (8778, "jolokia"),
    (9779, "prometheus"),
    (5432, "postgres"),
    (3306, "mysql"),
    (6379, "redis"),
    (27017, "mongodb"),
    (5672, "amqp"),
    (9300, "transport"),
];

/// Default apiVersion per resource kind
pub fn api_version_for(kind: &str) -> &'static str {
    match kind {
        "Deployment" | "ReplicaSet" | "DaemonSet" | "StatefulSet" => "apps/v1",
        "Job" | "CronJob" => "batch/v1",
        "Ingress" | "NetworkPolicy" => "networking.k8s.io/v1",
        "DeploymentConfig" => DEPLOYMENT_CONFIG_API_VERSION,
        "Route" => ROUTE_API_VERSION,
        "Role" | "RoleBinding" => "rbac.authorization.k8s.io/v1",
        "HorizontalPodAutoscaler" => "autoscaling/v2",
        _ => "v1",
    }
}
