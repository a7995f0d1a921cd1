//! Rendering commands

use crate::cli::display::TableRenderer;
use crate::domain::catalog::Catalog;
use crate::domain::chart::{ChartRenderer, RenderedChart, ValuesValidator};
use crate::domain::config::{apply_set_expressions, global_scope, Values};
use crate::infrastructure::constants::DEFAULT_APP_VERSION;
use clap::{Args, Parser, ValueEnum};
use tracing::info;

/// Inputs shared by every command that renders the chart.
#[derive(Args, Debug, Clone)]
pub struct ValuesArgs {
    /// Values file (YAML or TOML), may be repeated; later files win
    #[arg(long = "values", short = 'f', value_name = "FILE")]
    pub values_files: Vec<String>,

    /// Override a single value, helm style, may be repeated
    ///
    /// Examples:
    ///   --set global.image.registry=registry.example.com/
    ///   --set global.image.tag=1.2.0
    ///   --set global.imagePullSecrets[0].name=regcred
    ///   --set server.image.tag=custom
    ///   --set workload-launcher.containerOrchestrator.image=my-oc:1.0
    ///   --set metrics.enabled=true
    #[arg(long = "set", value_name = "KEY=VALUE", verbatim_doc_comment)]
    pub set: Vec<String>,

    /// Tag for images that get no tag from their own values or global.image.tag
    #[arg(long, default_value = DEFAULT_APP_VERSION)]
    pub app_version: String,

    /// Treat suspicious values (unknown sections, registry without trailing '/') as errors
    #[arg(long)]
    pub strict: bool,
}

impl ValuesArgs {
    pub fn load_values(&self) -> anyhow::Result<Values> {
        let mut values = Values::new();

        for file in &self.values_files {
            info!("Loading values from file {}", file);
            let layer = Values::from_file(file)
                .map_err(|e| anyhow::anyhow!("Failed to load values file {}: {}", file, e))?;
            values.merge(layer);
        }

        apply_set_expressions(&mut values, &self.set)
            .map_err(|e| anyhow::anyhow!("Failed to apply --set overrides: {}", e))?;

        let validator = ValuesValidator::new(Catalog::airbyte());
        if self.strict {
            validator
                .validate_strict(&values)
                .map_err(|e| anyhow::anyhow!("Values rejected in strict mode: {}", e))?;
        } else {
            validator.warnings(&values);
        }

        Ok(values)
    }

    pub fn render(&self) -> anyhow::Result<(Values, RenderedChart)> {
        let values = self.load_values()?;
        let renderer = ChartRenderer::new(values).with_app_version(self.app_version.clone());
        let chart = renderer
            .render()
            .map_err(|e| anyhow::anyhow!("Failed to render chart: {}", e))?;
        let effective = renderer
            .effective_values()
            .map_err(|e| anyhow::anyhow!("Failed to build effective values: {}", e))?;
        Ok((effective, chart))
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(Parser, Debug, Clone)]
pub struct RenderCommand {
    #[command(flatten)]
    pub values: ValuesArgs,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,
}

impl RenderCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let (_, chart) = self.values.render()?;

        let output = match self.output {
            OutputFormat::Yaml => chart.to_yaml(),
            OutputFormat::Json => chart.to_json(),
        }
        .map_err(|e| anyhow::anyhow!("Failed to serialize manifests: {}", e))?;

        print!("{}", output);
        Ok(())
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ImagesCommand {
    #[command(flatten)]
    pub values: ValuesArgs,
}

impl ImagesCommand {
    pub fn execute(&self) -> anyhow::Result<()> {
        let (values, chart) = self.values.render()?;
        let global = global_scope(&values);

        let renderer = TableRenderer::new();
        let output = renderer.render_images(
            &chart.image_usages(),
            &global.pull_secrets,
            global.registry.as_deref(),
        );

        println!("{}", output);
        Ok(())
    }
}
