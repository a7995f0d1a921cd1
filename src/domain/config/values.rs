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

//! The hierarchical values tree: one `global` section plus one section per component.

use crate::domain::config::dynamic::{parse_path, set_path, PathSegment};
use crate::domain::config::scope::{expand_image_reference, is_image_field};
use crate::shared::error::{ChartError, Result};
use serde_yaml::{Mapping, Value};
use std::fs::read_to_string;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct Values {
    root: Value,
}

impl Default for Values {
    fn default() -> Self {
        Self {
            root: Value::Mapping(Mapping::new()),
        }
    }
}

impl Values {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a values file. YAML and TOML are accepted, picked by extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = read_to_string(path).map_err(|e| {
            ChartError::config_error(format!(
                "Failed to read values file {}: {}",
                path.display(),
                e
            ))
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            _ => Err(ChartError::UnsupportedValuesFile {
                path: path.display().to_string(),
            }),
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let root: Value = serde_yaml::from_str(content)?;
        Self::from_value(root)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let table: toml::Value = toml::from_str(content)?;
        let root = serde_yaml::to_value(table)?;
        Self::from_value(root)
    }

    pub fn from_value(root: Value) -> Result<Self> {
        match root {
            Value::Null => Ok(Self::default()),
            Value::Mapping(_) => Ok(Self { root }),
            other => Err(ChartError::config_error(format!(
                "values root must be a mapping, got {}",
                type_name(&other)
            ))),
        }
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Deep-merge `other` into `self`; on conflict `other` wins. Mappings merge
    /// key by key, everything else (including lists) is replaced wholesale.
    pub fn merge(&mut self, other: Values) {
        merge_value(&mut self.root, other.root);
    }

    pub fn set(&mut self, path: &str, value: Value) -> Result<()> {
        set_path(&mut self.root, path, value)
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        let segments = parse_path(path).ok()?;
        let mut node = &self.root;
        for segment in &segments {
            node = match segment {
                PathSegment::Key(key) => node.as_mapping()?.get(key.as_str())?,
                PathSegment::Index(index) => node.as_sequence()?.get(*index)?,
            };
        }
        (!node.is_null()).then_some(node)
    }

    pub fn get_str(&self, path: &str) -> Option<String> {
        self.get(path).and_then(scalar_to_string)
    }

    pub fn get_bool(&self, path: &str) -> Option<bool> {
        match self.get(path)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    pub fn contains_section(&self, key: &str) -> bool {
        self.root
            .as_mapping()
            .is_some_and(|map| map.contains_key(key))
    }

    pub fn section_names(&self) -> Vec<String> {
        self.root
            .as_mapping()
            .map(|map| {
                map.keys()
                    .filter_map(|k| k.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn merge_value(base: &mut Value, overlay: Value) {
    // A string image under a mapping of image fields keeps its repository.
    let expanded = match (&*base, &overlay) {
        (Value::String(reference), Value::Mapping(fields))
            if !fields.is_empty()
                && fields.keys().all(|k| k.as_str().is_some_and(is_image_field)) =>
        {
            Some(expand_image_reference(reference))
        }
        _ => None,
    };
    if let Some(expanded) = expanded {
        *base = expanded;
    }

    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}

/// Renders YAML scalars as strings so `tag: 1.35` and `tag: "1.35"` read the same.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
