#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod initiatives;
pub mod layout;
pub mod layout_dump;
pub mod links;
pub mod model;
pub mod rate_limit;
pub mod render;
pub mod theme;
pub mod validate;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, LayoutConfig, RenderConfig, load_config};
pub use error::{Error, Result};
pub use initiatives::{InitiativeRow, collect_initiatives};
pub use layout::{DashboardLayout, DomainGroup, RenderItem, compute_layout};
pub use model::{Capabilities, ComponentItem, Domain, Esa, Governance, Maturity, Status, parse_esa};
pub use rate_limit::RateLimiter;
#[cfg(feature = "png")]
pub use render::render_png;
pub use render::render_svg;
pub use theme::Theme;
pub use validate::{ValidationError, require_root, validate_esa};

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub theme: Theme,
    pub layout: LayoutConfig,
}

impl RenderOptions {
    pub fn modern() -> Self {
        Self {
            theme: Theme::modern(),
            layout: LayoutConfig::default(),
        }
    }

    pub fn classic() -> Self {
        Self {
            theme: Theme::classic(),
            layout: LayoutConfig::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }
}

/// Decodes a dashboard JSON document, lays it out and renders the SVG.
pub fn render_with_options(input: &str, options: RenderOptions) -> Result<String> {
    let esa = require_root(parse_esa(input)?)?;
    let layout = compute_layout(&esa, &options.layout)?;
    Ok(render_svg(&layout, &options.theme))
}

pub fn render(input: &str) -> Result<String> {
    render_with_options(input, RenderOptions::default())
}
