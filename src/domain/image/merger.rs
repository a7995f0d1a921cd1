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

use crate::domain::image::declaration::NormalizedImage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullSecret {
    pub name: String,
}

impl PullSecret {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Deployment-wide image settings. Built once per render and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalScope {
    pub registry: Option<String>,
    pub tag: Option<String>,
    pub pull_secrets: Vec<PullSecret>,
}

/// Image settings owned by a single component image slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentScope {
    pub image: NormalizedImage,
    pub tag_override: Option<String>,
}

impl ComponentScope {
    pub fn new(image: NormalizedImage) -> Self {
        Self {
            image,
            tag_override: None,
        }
    }

    pub fn with_tag_override(mut self, tag: Option<String>) -> Self {
        self.tag_override = tag;
        self
    }
}

/// Effective settings for one image after both scopes are combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedScope {
    pub registry: Option<String>,
    pub repository: String,
    pub tag: String,
    pub pull_secrets: Vec<PullSecret>,
}

pub fn merge_scopes(
    global: &GlobalScope,
    component: &ComponentScope,
    default_tag: &str,
) -> MergedScope {
    let registry = non_empty(component.image.registry.as_deref())
        .or_else(|| non_empty(global.registry.as_deref()))
        .map(str::to_string);

    let tag = non_empty(component.tag_override.as_deref())
        .or_else(|| non_empty(component.image.tag.as_deref()))
        .or_else(|| non_empty(global.tag.as_deref()))
        .unwrap_or(default_tag)
        .to_string();

    MergedScope {
        registry,
        repository: component.image.repository.clone(),
        tag,
        pull_secrets: global.pull_secrets.clone(),
    }
}

// Empty strings in values mean "not set", the same as an absent key.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
