//! Configuration builder
//!
//! Merges configuration from files and CLI arguments.

use crate::cli::args::PlotFlags;
use crate::config::{Config, ConfigFile};
use crate::error::ConfigError;
use crate::render::PlotlyJs;

use std::path::{Path, PathBuf};

/// Builder for merging configuration sources
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Load configuration from a file
    ///
    /// An explicit path must load; without one the default locations are
    /// searched and missing files are fine.
    pub fn with_file(mut self, path: Option<&Path>) -> Result<Self, ConfigError> {
        let file_config = match path {
            Some(path) => Some(ConfigFile::load(path)?),
            None => ConfigFile::load_default(),
        };

        if let Some(cfg) = file_config {
            self.config = cfg;
        }

        Ok(self)
    }

    /// Override with CLI dry-run flag
    pub fn with_dry_run(mut self, dry_run: Option<bool>) -> Self {
        if let Some(d) = dry_run {
            self.config.general.dry_run = d;
        }
        self
    }

    /// Override with CLI output path
    pub fn with_output(mut self, path: Option<PathBuf>) -> Self {
        if let Some(p) = path {
            self.config.export.path = p;
        }
        self
    }

    /// Override auto-open for both documents and gallery indexes
    pub fn with_auto_open(mut self, auto_open: Option<bool>) -> Self {
        if let Some(open) = auto_open {
            self.config.export.auto_open = open;
            self.config.gallery.auto_open = open;
        }
        self
    }

    /// Override with CLI thumbnails flag
    pub fn with_thumbnails(mut self, thumbnails: Option<bool>) -> Self {
        if let Some(t) = thumbnails {
            self.config.gallery.thumbnails = t;
        }
        self
    }

    /// Override with CLI gallery index name
    pub fn with_index_name(mut self, name: Option<String>) -> Self {
        if let Some(n) = name {
            self.config.gallery.index_name = n;
        }
        self
    }

    /// Override plot options with the styling flags that were given
    pub fn with_plot_flags(mut self, flags: &PlotFlags) -> Self {
        let plot = &mut self.config.plot;

        if let Some(mode) = flags.axis_mode {
            plot.axis_mode = mode;
        }
        if let Some(view) = flags.view {
            plot.view = view;
        }
        if let Some(render) = flags.render_3d {
            plot.render_3d = render;
        }
        if flags.no_link {
            plot.link_3d = false;
        }
        if let Some(scale) = &flags.colorscale {
            plot.colorscale = scale.clone();
        }
        if flags.alpha.is_some() {
            plot.alpha = flags.alpha;
        }
        if let Some(marker) = &flags.marker {
            plot.marker = marker.clone();
        }
        if let Some(size) = flags.marker_size {
            plot.marker_size = size;
        }
        if flags.color.is_some() {
            plot.color = flags.color.clone();
        }
        if flags.label.is_some() {
            plot.label = flags.label.clone();
        }
        if flags.max_samples.is_some() {
            plot.max_samples = flags.max_samples;
        }
        if let Some(seed) = flags.seed {
            plot.seed = seed;
        }
        if let Some(mixed) = flags.mixed_column {
            plot.mixed = mixed;
        }
        if let Some(title) = &flags.title {
            plot.title = title.clone();
        }
        if let Some(source) = &flags.plotly_js {
            self.config.export.plotly_js = PlotlyJs::from(source.clone());
        }

        self
    }

    /// Build the final configuration
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
