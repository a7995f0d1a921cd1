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

//! Reads image scopes out of the values tree.

use crate::domain::config::values::{scalar_to_string, Values};
use crate::domain::image::{ComponentScope, GlobalScope, ImageDeclaration, PullSecret};
use crate::infrastructure::constants::{
    VALUES_GLOBAL_PULL_SECRETS, VALUES_GLOBAL_REGISTRY, VALUES_GLOBAL_TAG, VALUES_REGISTRY,
    VALUES_REPOSITORY, VALUES_TAG,
};
use serde_yaml::Value;

pub fn global_scope(values: &Values) -> GlobalScope {
    let pull_secrets = values
        .get(VALUES_GLOBAL_PULL_SECRETS)
        .and_then(Value::as_sequence)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.get("name").and_then(scalar_to_string))
                .filter(|name| !name.is_empty())
                .map(PullSecret::new)
                .collect()
        })
        .unwrap_or_default();

    GlobalScope {
        registry: values.get_str(VALUES_GLOBAL_REGISTRY),
        tag: values.get_str(VALUES_GLOBAL_TAG),
        pull_secrets,
    }
}

/// Keys an image mapping understands.
pub fn is_image_field(key: &str) -> bool {
    matches!(key, VALUES_REPOSITORY | VALUES_TAG | VALUES_REGISTRY)
}

/// Rewrites a string image as its mapping form so single fields can be set on it.
pub fn expand_image_reference(reference: &str) -> Value {
    ImageDeclaration::from(reference).to_structured().into_value()
}

/// Scope for the image declared at `path`. An explicit `tag` key under the
/// image is the component's own override.
pub fn component_scope(values: &Values, path: &str) -> Option<ComponentScope> {
    let declaration = ImageDeclaration::from_value(values.get(path)?)?;
    let tag_override = values.get_str(&format!("{}.{}", path, VALUES_TAG));
    Some(ComponentScope::new(declaration.normalize()).with_tag_override(tag_override))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_scope_reads_all_fields() {
        let values = Values::from_yaml_str(
            r#"
global:
  image:
    registry: "http://my-registry/"
    tag: test-tag
  imagePullSecrets:
    - name: test-img-pull-secret-1
    - name: test-img-pull-secret-2
"#,
        )
        .unwrap();

        let scope = global_scope(&values);
        assert_eq!(scope.registry.as_deref(), Some("http://my-registry/"));
        assert_eq!(scope.tag.as_deref(), Some("test-tag"));
        assert_eq!(
            scope.pull_secrets,
            vec![
                PullSecret::new("test-img-pull-secret-1"),
                PullSecret::new("test-img-pull-secret-2")
            ]
        );
    }

    #[test]
    fn test_missing_global_section_is_empty_scope() {
        assert_eq!(global_scope(&Values::new()), GlobalScope::default());
    }

    #[test]
    fn test_pull_secret_holes_are_skipped() {
        let mut values = Values::new();
        values
            .set("global.imagePullSecrets[1].name", Value::String("second".into()))
            .unwrap();
        assert_eq!(global_scope(&values).pull_secrets, vec![PullSecret::new("second")]);
    }

    #[test]
    fn test_component_scope_string_form() {
        let values = Values::from_yaml_str("worker:\n  image: my-worker:1.0\n").unwrap();
        let scope = component_scope(&values, "worker.image").unwrap();
        assert_eq!(scope.image.repository, "my-worker");
        assert_eq!(scope.image.tag.as_deref(), Some("1.0"));
        assert!(scope.tag_override.is_none());
    }

    #[test]
    fn test_component_scope_structured_form() {
        let values = Values::from_yaml_str(
            "minio:\n  mcImage:\n    repository: airbyte/mc\n    tag: mc-app-tag\n",
        )
        .unwrap();
        let scope = component_scope(&values, "minio.mcImage").unwrap();
        assert_eq!(scope.image.repository, "airbyte/mc");
        assert_eq!(scope.tag_override.as_deref(), Some("mc-app-tag"));
    }

    #[test]
    fn test_component_scope_numeric_tag() {
        let values =
            Values::from_yaml_str("postgresql:\n  image:\n    repository: airbyte/db\n    tag: 1.5\n")
                .unwrap();
        let scope = component_scope(&values, "postgresql.image").unwrap();
        assert_eq!(scope.image.tag.as_deref(), Some("1.5"));
        assert_eq!(scope.tag_override.as_deref(), Some("1.5"));
    }

    #[test]
    fn test_expand_image_reference() {
        let value = expand_image_reference("localhost:5000/airbyte/worker:v1");
        assert_eq!(value["repository"].as_str(), Some("localhost:5000/airbyte/worker"));
        assert_eq!(value["tag"].as_str(), Some("v1"));
        assert!(is_image_field("tag"));
        assert!(!is_image_field("pullPolicy"));
    }

    #[test]
    fn test_component_scope_absent() {
        assert!(component_scope(&Values::new(), "server.image").is_none());
    }
}
