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

use crate::domain::image::merger::MergedScope;
use std::fmt;

/// A fully resolved image. `tag` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImage {
    pub registry: Option<String>,
    pub repository: String,
    pub tag: String,
}

impl From<&MergedScope> for ResolvedImage {
    fn from(merged: &MergedScope) -> Self {
        Self {
            registry: merged.registry.clone(),
            repository: merged.repository.clone(),
            tag: merged.tag.clone(),
        }
    }
}

/// The registry is a plain prefix: `registry.example/` works, `registry.example` does not.
impl fmt::Display for ResolvedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.registry {
            Some(registry) => write!(f, "{}{}:{}", registry, self.repository, self.tag),
            None => write!(f, "{}:{}", self.repository, self.tag),
        }
    }
}

pub fn build_reference(merged: &MergedScope) -> String {
    ResolvedImage::from(merged).to_string()
}
