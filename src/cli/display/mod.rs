//! Display module for formatted CLI output

pub mod colors;
pub mod table;

pub use colors::ColorTheme;
pub use table::TableRenderer;
