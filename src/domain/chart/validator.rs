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

use crate::domain::catalog::Catalog;
use crate::domain::config::Values;
use crate::infrastructure::constants::{VALUES_GLOBAL, VALUES_GLOBAL_REGISTRY};
use crate::shared::error::{ChartError, Result};
use tracing::warn;

/// Flags values that render fine but are probably not what the operator meant.
pub struct ValuesValidator {
    catalog: Catalog,
}

impl ValuesValidator {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn warnings(&self, values: &Values) -> Vec<String> {
        let mut warnings = Vec::new();

        if let Some(registry) = values.get_str(VALUES_GLOBAL_REGISTRY) {
            if !registry.is_empty() && !registry.ends_with('/') {
                warnings.push(format!(
                    "{} '{}' does not end with '/'; it is prepended verbatim, producing e.g. '{}airbyte/server:dev'",
                    VALUES_GLOBAL_REGISTRY, registry, registry
                ));
            }
        }

        let known = self.catalog.sections();
        let indirect_roots: Vec<&str> = self
            .catalog
            .indirect_images
            .iter()
            .filter_map(|image| image.values_path.split('.').next())
            .collect();

        for section in values.section_names() {
            if section != VALUES_GLOBAL
                && !known.contains(&section.as_str())
                && !indirect_roots.contains(&section.as_str())
            {
                warnings.push(format!(
                    "values section '{}' does not match any component and is ignored",
                    section
                ));
            }
        }

        for warning in &warnings {
            warn!("{}", warning);
        }
        warnings
    }

    /// Same checks as [`warnings`](Self::warnings), but any finding is an error.
    pub fn validate_strict(&self, values: &Values) -> Result<()> {
        let warnings = self.warnings(values);
        if warnings.is_empty() {
            Ok(())
        } else {
            Err(ChartError::ValidationError(format!(
                "\n  - {}",
                warnings.join("\n  - ")
            )))
        }
    }
}
