//! Color theme for CLI output

use crate::domain::chart::ImageSource;
use comfy_table::Color as TableColor;

/// Color theme for terminal output
#[derive(Debug, Clone)]
pub struct ColorTheme {
    pub container: TableColor,
    pub init_container: TableColor,
    pub env_entry: TableColor,
    pub registry: TableColor,
    pub muted: TableColor,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            container: TableColor::Green,
            init_container: TableColor::Yellow,
            env_entry: TableColor::Cyan,
            registry: TableColor::Magenta,
            muted: TableColor::DarkGrey,
        }
    }
}

impl ColorTheme {
    pub fn get_source_color(&self, source: &ImageSource) -> TableColor {
        match source {
            ImageSource::Container { .. } => self.container,
            ImageSource::InitContainer { .. } => self.init_container,
            ImageSource::EnvEntry { .. } => self.env_entry,
        }
    }
}
