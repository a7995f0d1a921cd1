//! Table rendering for CLI output

use super::ColorTheme;
use crate::domain::chart::{ImageSource, ImageUsage};
use crate::domain::image::PullSecret;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render resolved images, one row per container or env entry.
    pub fn render_images(
        &self,
        usages: &[ImageUsage],
        pull_secrets: &[PullSecret],
        registry: Option<&str>,
    ) -> String {
        if usages.is_empty() {
            return "No images resolved".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("RESOURCE").set_alignment(CellAlignment::Left),
                Cell::new("USED AS").set_alignment(CellAlignment::Left),
                Cell::new("NAME").set_alignment(CellAlignment::Left),
                Cell::new("IMAGE").set_alignment(CellAlignment::Left),
            ]);

        for usage in usages {
            let (resource, used_as, name) = match &usage.source {
                ImageSource::Container {
                    resource,
                    container,
                } => (resource.as_str(), "container", container.as_str()),
                ImageSource::InitContainer {
                    resource,
                    container,
                } => (resource.as_str(), "initContainer", container.as_str()),
                ImageSource::EnvEntry { config_map, key } => {
                    (config_map.as_str(), "env", key.as_str())
                }
            };

            let color = self.theme.get_source_color(&usage.source);
            let image_cell = match registry {
                Some(registry) if usage.image.starts_with(registry) => {
                    Cell::new(&usage.image).fg(self.theme.registry)
                }
                _ => Cell::new(&usage.image),
            };

            table.add_row(vec![
                Cell::new(resource),
                Cell::new(used_as).fg(color),
                Cell::new(name).fg(self.theme.muted),
                image_cell,
            ]);
        }

        let mut output = String::new();
        output.push_str(&format!(
            "╭─ Resolved Images {} ─╮\n",
            format!("[{} images]", usages.len()).bright_black()
        ));
        output.push_str(&table.to_string());
        output.push('\n');

        let secrets = if pull_secrets.is_empty() {
            "(none)".bright_black().to_string()
        } else {
            pull_secrets
                .iter()
                .map(|s| s.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        output.push_str(&format!("Image pull secrets: {}\n", secrets));

        output
    }
}
