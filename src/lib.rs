#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod parser;
pub mod prompt;
pub mod render;
pub mod theme;
pub mod tree_dump;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, RenderConfig, load_config};
pub use ir::ActivityNode;
pub use parser::{ParseError, parse_xaml, parse_xaml_with_limit};
pub use render::{render_document, render_fragment};
pub use theme::Theme;
