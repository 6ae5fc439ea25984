//! Simulator settings.
//!
//! Built from defaults, then an optional TOML file, then `GITSIM_*`
//! environment variables. Command-line flags are applied last by `main`.

use anyhow::{Context, Result};
use gitsim_core::{Palette, SessionOptions, DEFAULT_PALETTE, DEFAULT_SAVE_FILE};
use graph::{Color, RenderOptions};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// File written by `save` without an argument
    pub default_save_file: PathBuf,
    /// Redraw the graph after every command that changes the repository
    pub show_graph: bool,
    /// Color branch labels with ANSI escapes
    pub color: bool,
    /// Maximum display width of commit messages in the graph
    pub graph_width: usize,
    /// Branch colors as `#rrggbb`, handed out in creation order
    pub palette: Vec<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            default_save_file: PathBuf::from(DEFAULT_SAVE_FILE),
            show_graph: true,
            color: true,
            graph_width: 60,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl SimConfig {
    /// Defaults, overlaid by `path` when given, then by the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok());
        config.palette = sanitize_palette(config.palette);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Environment variables:
    /// - `GITSIM_SAVE_FILE` - default save target
    /// - `GITSIM_SHOW_GRAPH` - `true`/`false`
    /// - `GITSIM_COLOR` - `true`/`false`
    /// - `GITSIM_GRAPH_WIDTH` - message width in columns (minimum 8)
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(file) = lookup("GITSIM_SAVE_FILE").filter(|f| !f.is_empty()) {
            self.default_save_file = PathBuf::from(file);
        }
        if let Some(show) = read_var::<bool>(&lookup, "GITSIM_SHOW_GRAPH") {
            self.show_graph = show;
        }
        if let Some(color) = read_var::<bool>(&lookup, "GITSIM_COLOR") {
            self.color = color;
        }
        if let Some(width) = read_var::<usize>(&lookup, "GITSIM_GRAPH_WIDTH") {
            self.graph_width = width.max(8);
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            default_save_file: self.default_save_file.clone(),
            palette: Palette::new(self.palette.clone()),
            render: RenderOptions {
                color: self.color,
                message_width: self.graph_width,
            },
        }
    }
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    let value = lookup(key)?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(key, value = %value, "ignoring unparsable environment variable");
            None
        }
    }
}

/// Drop entries that are not `#rrggbb` colors
fn sanitize_palette(colors: Vec<String>) -> Vec<String> {
    colors
        .into_iter()
        .filter(|color| {
            let valid = Color::from_hex(color).is_some();
            if !valid {
                warn!(color = %color, "ignoring invalid palette color");
            }
            valid
        })
        .collect()
}
