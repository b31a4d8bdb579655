//! Document rendering
//!
//! Turns a [`Figure`](crate::figure::Figure) into a standalone HTML document,
//! renders PNG previews for gallery indexes, and opens finished documents
//! through a [`Viewer`].

pub mod html;
pub mod index;
pub mod preview;
pub mod viewer;

pub use html::{escape_html, write_document};
pub use viewer::{SystemViewer, Viewer};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// plotly.js bundle loaded from the public CDN
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Default output document
pub const DEFAULT_OUTPUT: &str = "transistor_plot.html";

/// Where an exported document loads plotly.js from
///
/// Written in config files as `"cdn"`, an `http(s)://` URL, or a path to a
/// local `plotly.min.js` that is inlined into the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlotlyJs {
    #[default]
    Cdn,
    Url(String),
    Inline(PathBuf),
}

impl From<String> for PlotlyJs {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("cdn") {
            Self::Cdn
        } else if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::Inline(PathBuf::from(trimmed))
        }
    }
}

impl From<PlotlyJs> for String {
    fn from(value: PlotlyJs) -> Self {
        value.to_string()
    }
}

impl std::str::FromStr for PlotlyJs {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl fmt::Display for PlotlyJs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cdn => write!(f, "cdn"),
            Self::Url(url) => write!(f, "{}", url),
            Self::Inline(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Options for writing one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Output HTML file
    pub path: PathBuf,
    /// Open the document once written
    pub auto_open: bool,
    /// plotly.js source
    pub plotly_js: PlotlyJs,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT),
            auto_open: true,
            plotly_js: PlotlyJs::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plotly_js_parsing() {
        assert_eq!("cdn".parse::<PlotlyJs>().unwrap(), PlotlyJs::Cdn);
        assert_eq!("".parse::<PlotlyJs>().unwrap(), PlotlyJs::Cdn);
        assert_eq!(
            "https://example.org/plotly.js".parse::<PlotlyJs>().unwrap(),
            PlotlyJs::Url("https://example.org/plotly.js".to_string())
        );
        assert_eq!(
            "vendor/plotly.min.js".parse::<PlotlyJs>().unwrap(),
            PlotlyJs::Inline(PathBuf::from("vendor/plotly.min.js"))
        );
    }

    #[test]
    fn test_export_options_from_toml() {
        let options: ExportOptions =
            toml::from_str("path = \"out/m1.html\"\nplotly_js = \"./plotly.min.js\"").unwrap();
        assert_eq!(options.path, PathBuf::from("out/m1.html"));
        assert!(options.auto_open);
        assert_eq!(options.plotly_js, PlotlyJs::Inline(PathBuf::from("./plotly.min.js")));

        let defaults = ExportOptions::default();
        assert_eq!(defaults.path, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(String::from(defaults.plotly_js), "cdn");
    }
}
