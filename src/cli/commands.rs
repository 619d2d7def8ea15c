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

// CLI command definitions

use super::generate::{GenerateCommand, ValidateCommand};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "kubefab",
    version,
    about = "Generates Kubernetes/OpenShift resource manifests",
    long_about = "Generates deployable Kubernetes/OpenShift resource manifests from build \
                  metadata and user-authored resource fragments"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate the final resource list from fragments and image metadata
    Generate(GenerateCommand),

    /// Load and validate resource fragments without generating output
    Validate(ValidateCommand),
}
