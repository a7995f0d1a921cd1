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

//! Component catalog and the chart defaults derived from it.

pub mod components;
pub mod indirect;

pub use self::components::{ComponentDescriptor, ImageSlot, WorkloadKind, AIRBYTE_COMPONENTS};
pub use self::indirect::{IndirectImage, AIRBYTE_INDIRECT_IMAGES};

use crate::domain::config::Values;
use crate::domain::image::StructuredImage;
use crate::infrastructure::constants::VALUES_ENABLED;
use crate::shared::error::Result;
use serde_yaml::Value;

/// A set of components plus the indirect images exported for them.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    pub components: &'static [ComponentDescriptor],
    pub indirect_images: &'static [IndirectImage],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::airbyte()
    }
}

impl Catalog {
    pub fn airbyte() -> Self {
        Self {
            components: AIRBYTE_COMPONENTS,
            indirect_images: AIRBYTE_INDIRECT_IMAGES,
        }
    }

    pub fn sections(&self) -> Vec<&'static str> {
        let mut sections: Vec<&'static str> = Vec::new();
        for component in self.components {
            if !sections.contains(&component.section) {
                sections.push(component.section);
            }
        }
        sections
    }

    /// The values tree a chart ships with before any user input is layered on.
    /// Fails when two descriptors claim conflicting paths.
    pub fn chart_defaults(&self) -> Result<Values> {
        let mut defaults = Values::new();

        for component in self.components {
            let enabled_path = format!("{}.{}", component.section, VALUES_ENABLED);
            if defaults.get(&enabled_path).is_none() {
                defaults.set(&enabled_path, Value::Bool(component.enabled_by_default))?;
            }
            for slot in component.slots() {
                defaults.set(
                    &slot.values_path(component.section),
                    image_default(slot.repository, slot.tag),
                )?;
            }
        }

        for image in self.indirect_images {
            defaults.set(image.values_path, image_default(image.repository, image.tag))?;
        }

        Ok(defaults)
    }
}

fn image_default(repository: &str, tag: Option<&str>) -> Value {
    StructuredImage {
        repository: repository.to_string(),
        tag: tag.map(str::to_string),
        registry: None,
    }
    .into_value()
}
