// Copyright 2025 JiangLong.
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

use crate::domain::image::PullSecret;
use crate::infrastructure::kubernetes::resources::resource::Resource;
use k8s_openapi::api::core::v1::LocalObjectReference;

/// Gives every pod spec in `resources` the global pull secrets, in declaration
/// order. Returns how many pod specs were updated.
pub fn propagate_pull_secrets(resources: &mut [Resource], secrets: &[PullSecret]) -> usize {
    if secrets.is_empty() {
        return 0;
    }

    let references: Vec<LocalObjectReference> = secrets
        .iter()
        .map(|secret| LocalObjectReference {
            name: secret.name.clone(),
        })
        .collect();

    let mut updated = 0;
    for resource in resources.iter_mut() {
        if let Some(spec) = resource.pod_spec_mut() {
            spec.image_pull_secrets = Some(references.clone());
            updated += 1;
        }
    }

    tracing::debug!(secrets = secrets.len(), pods = updated, "propagated image pull secrets");
    updated
}
