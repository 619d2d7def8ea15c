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

//! Built-in enrichers and the default pipeline ordering

pub mod controller;
pub mod labels;
pub mod ports;
pub mod probes;
pub mod route;
pub mod service;
pub mod triggers;

use crate::domain::pipeline::Enricher;

pub use self::controller::ControllerEnricher;
pub use self::labels::ProjectLabelEnricher;
pub use self::ports::PortNameEnricher;
pub use self::probes::HealthProbeEnricher;
pub use self::route::RouteEnricher;
pub use self::service::ServiceEnricher;
pub use self::triggers::ImageTriggerEnricher;

/// The built-in enrichers in their default priority order. Create steps run
/// in this order first, then enrich steps.
pub fn default_enrichers() -> Vec<Box<dyn Enricher>> {
    vec![
        Box::new(ControllerEnricher),
        Box::new(ServiceEnricher),
        Box::new(RouteEnricher),
        Box::new(ProjectLabelEnricher),
        Box::new(PortNameEnricher),
        Box::new(HealthProbeEnricher),
        Box::new(ImageTriggerEnricher),
    ]
}
