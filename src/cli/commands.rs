// CLI command definitions

use super::render::{ImagesCommand, RenderCommand};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "airbyte-kube",
    version,
    about = "Resolve images and pull secrets for an Airbyte deployment",
    long_about = "Renders the Airbyte workloads and launcher env ConfigMap with every image reference and image pull secret resolved from chart defaults, values files and --set overrides"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Render all manifests to stdout
    Render(RenderCommand),

    /// List every resolved image and where it is used
    Images(ImagesCommand),
}
