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

//! Image declarations as they appear in values, in either surface form.

use crate::infrastructure::constants::{VALUES_REGISTRY, VALUES_REPOSITORY, VALUES_TAG};
use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};

/// An image as written by an operator: `"repo:tag"`, `"repo"`, or a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ImageDeclaration {
    Reference(String),
    Structured(StructuredImage),
}

/// Unknown keys (`pullPolicy` and friends) are ignored. Numeric and boolean
/// scalars are read as strings, so `tag: 1.35` equals `tag: "1.35"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StructuredImage {
    #[serde(default, deserialize_with = "scalar_string")]
    pub repository: String,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub tag: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub registry: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::String(s) => s,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn optional_scalar_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}

fn scalar_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(optional_scalar_string(deserializer)?.unwrap_or_default())
}

impl StructuredImage {
    /// The mapping form as it sits in a values tree.
    pub fn into_value(self) -> Value {
        let mut image = Mapping::new();
        image.insert(VALUES_REPOSITORY.into(), self.repository.into());
        if let Some(tag) = self.tag {
            image.insert(VALUES_TAG.into(), tag.into());
        }
        if let Some(registry) = self.registry {
            image.insert(VALUES_REGISTRY.into(), registry.into());
        }
        Value::Mapping(image)
    }
}

/// Single internal shape every declaration is reduced to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedImage {
    pub registry: Option<String>,
    pub repository: String,
    pub tag: Option<String>,
}

impl ImageDeclaration {
    pub fn structured(repository: impl Into<String>, tag: Option<&str>) -> Self {
        ImageDeclaration::Structured(StructuredImage {
            repository: repository.into(),
            tag: tag.map(str::to_string),
            registry: None,
        })
    }

    /// Reads a declaration out of a values node. Only strings and mappings declare an image.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(_) | Value::Mapping(_) => serde_yaml::from_value(value.clone()).ok(),
            _ => None,
        }
    }

    /// The declaration in mapping form, with a string reference split into repository and tag.
    pub fn to_structured(&self) -> StructuredImage {
        let image = self.normalize();
        StructuredImage {
            repository: image.repository,
            tag: image.tag,
            registry: image.registry,
        }
    }

    pub fn normalize(&self) -> NormalizedImage {
        match self {
            ImageDeclaration::Reference(reference) => {
                let (repository, tag) = split_reference(reference);
                NormalizedImage {
                    registry: None,
                    repository,
                    tag,
                }
            }
            ImageDeclaration::Structured(image) => NormalizedImage {
                registry: image.registry.clone(),
                repository: image.repository.clone(),
                tag: image.tag.clone(),
            },
        }
    }
}

impl From<&str> for ImageDeclaration {
    fn from(reference: &str) -> Self {
        ImageDeclaration::Reference(reference.to_string())
    }
}

// Last colon wins, so `host:5000/repo` without a tag is read as repository `host`
// and tag `5000/repo`.
fn split_reference(reference: &str) -> (String, Option<String>) {
    match reference.rfind(':') {
        Some(pos) => {
            let tag = &reference[pos + 1..];
            let tag = (!tag.is_empty()).then(|| tag.to_string());
            (reference[..pos].to_string(), tag)
        }
        None => (reference.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_with_tag() {
        let image = ImageDeclaration::from("airbyte/server:1.2.3").normalize();
        assert_eq!(image.repository, "airbyte/server");
        assert_eq!(image.tag.as_deref(), Some("1.2.3"));
        assert!(image.registry.is_none());
    }

    #[test]
    fn test_reference_without_tag() {
        let image = ImageDeclaration::from("my-busybox").normalize();
        assert_eq!(image.repository, "my-busybox");
        assert!(image.tag.is_none());
    }

    #[test]
    fn test_reference_splits_on_last_colon() {
        let image = ImageDeclaration::from("localhost:5000/airbyte/worker:v1").normalize();
        assert_eq!(image.repository, "localhost:5000/airbyte/worker");
        assert_eq!(image.tag.as_deref(), Some("v1"));

        let image = ImageDeclaration::from("localhost:5000/airbyte/worker").normalize();
        assert_eq!(image.repository, "localhost");
        assert_eq!(image.tag.as_deref(), Some("5000/airbyte/worker"));
    }

    #[test]
    fn test_reference_trailing_colon() {
        let image = ImageDeclaration::from("busybox:").normalize();
        assert_eq!(image.repository, "busybox");
        assert!(image.tag.is_none());
    }

    #[test]
    fn test_structured_passthrough() {
        let declaration = ImageDeclaration::Structured(StructuredImage {
            repository: "airbyte/db".to_string(),
            tag: None,
            registry: Some("registry.local/".to_string()),
        });
        let image = declaration.normalize();
        assert_eq!(image.repository, "airbyte/db");
        assert!(image.tag.is_none());
        assert_eq!(image.registry.as_deref(), Some("registry.local/"));
    }

    #[test]
    fn test_deserialize_both_forms() {
        let string_form: ImageDeclaration = serde_yaml::from_str("\"myrepo:mytag\"").unwrap();
        let mapping_form: ImageDeclaration =
            serde_yaml::from_str("repository: myrepo\ntag: mytag\n").unwrap();

        assert!(matches!(string_form, ImageDeclaration::Reference(_)));
        assert!(matches!(mapping_form, ImageDeclaration::Structured(_)));
        assert_eq!(string_form.normalize(), mapping_form.normalize());
    }

    #[test]
    fn test_from_value_reads_numeric_tags_as_strings() {
        let value: Value =
            serde_yaml::from_str("repository: busybox\ntag: 1.35\npullPolicy: IfNotPresent\n")
                .unwrap();
        let image = ImageDeclaration::from_value(&value).unwrap().normalize();
        assert_eq!(image.repository, "busybox");
        assert_eq!(image.tag.as_deref(), Some("1.35"));

        let value: Value = serde_yaml::from_str("repository: airbyte/db\ntag: 7\n").unwrap();
        let image = ImageDeclaration::from_value(&value).unwrap().normalize();
        assert_eq!(image.tag.as_deref(), Some("7"));
    }

    #[test]
    fn test_from_value_ignores_non_images() {
        assert!(ImageDeclaration::from_value(&Value::Null).is_none());
        assert!(ImageDeclaration::from_value(&Value::Bool(true)).is_none());
        let list: Value = serde_yaml::from_str("- a\n- b\n").unwrap();
        assert!(ImageDeclaration::from_value(&list).is_none());
    }

    #[test]
    fn test_string_reference_to_mapping() {
        let value = ImageDeclaration::from("myrepo:mytag").to_structured().into_value();
        assert_eq!(value["repository"].as_str(), Some("myrepo"));
        assert_eq!(value["tag"].as_str(), Some("mytag"));
        assert!(value.get("registry").is_none());
    }
}
