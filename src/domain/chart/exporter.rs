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

use crate::domain::catalog::IndirectImage;
use crate::domain::config::{component_scope, Values};
use crate::domain::image::{
    resolve_image, ComponentScope, GlobalScope, ImageDeclaration, PullSecret,
};
use crate::infrastructure::constants::{ENV_KEY_AIRBYTE_VERSION, ENV_KEY_PULL_SECRET};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndirectImageEntry {
    pub env_key: String,
    pub resolved_image: String,
}

/// Resolves every indirect image with the same pipeline used for containers.
pub fn export_indirect_images(
    values: &Values,
    global: &GlobalScope,
    default_tag: &str,
    images: &[IndirectImage],
) -> Vec<IndirectImageEntry> {
    images
        .iter()
        .map(|image| {
            let scope = component_scope(values, image.values_path).unwrap_or_else(|| {
                ComponentScope::new(
                    ImageDeclaration::structured(image.repository, image.tag).normalize(),
                )
            });
            IndirectImageEntry {
                env_key: image.env_key.to_string(),
                resolved_image: resolve_image(global, &scope, default_tag),
            }
        })
        .collect()
}

/// All entries the launcher reads from the env ConfigMap.
pub fn launcher_env(
    entries: &[IndirectImageEntry],
    global: &GlobalScope,
    default_tag: &str,
) -> BTreeMap<String, String> {
    let mut env: BTreeMap<String, String> = entries
        .iter()
        .map(|entry| (entry.env_key.clone(), entry.resolved_image.clone()))
        .collect();

    let version = global
        .tag
        .as_deref()
        .filter(|tag| !tag.is_empty())
        .unwrap_or(default_tag);
    env.insert(ENV_KEY_AIRBYTE_VERSION.to_string(), version.to_string());
    env.insert(
        ENV_KEY_PULL_SECRET.to_string(),
        join_secret_names(&global.pull_secrets),
    );

    env
}

fn join_secret_names(secrets: &[PullSecret]) -> String {
    secrets
        .iter()
        .map(|s| s.name.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
