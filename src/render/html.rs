//! Standalone HTML export
//!
//! A document is one `<div>` holding the figure, the plotly.js bundle, a
//! `Plotly.newPlot` call with the serialized data and layout, and (when the
//! cameras are linked) a script that mirrors camera moves between the two 3D
//! scenes.

use crate::error::RenderError;
use crate::figure::Figure;
use crate::render::{ExportOptions, PlotlyJs, Viewer, PLOTLY_CDN};

use std::path::{Path, PathBuf};

/// Element id of the figure `<div>`
pub const FIGURE_DIV_ID: &str = "ivplot-figure";

/// Mirrors `scene.camera` and `scene2.camera` after a short debounce
///
/// The guard flag stops the mirrored relayout from echoing back.
const CAMERA_LINK_SCRIPT: &str = r#"(function () {
  var gd = document.getElementById('__DIV_ID__');
  if (!gd || gd._ivplotLinked) return;
  gd._ivplotLinked = true;

  var syncing = false;
  var timer = null;

  gd.on('plotly_relayout', function (e) {
    if (syncing || !e || typeof e !== 'object') return;

    var target = null;
    var camera = null;
    if (e['scene.camera']) {
      target = 'scene2.camera';
      camera = e['scene.camera'];
    } else if (e['scene2.camera']) {
      target = 'scene.camera';
      camera = e['scene2.camera'];
    } else {
      return;
    }

    if (timer) clearTimeout(timer);
    timer = setTimeout(function () {
      syncing = true;
      var update = {};
      update[target] = camera;
      Plotly.relayout(gd, update).then(function () {
        setTimeout(function () { syncing = false; }, 30);
      }, function () {
        syncing = false;
      });
    }, 60);
  });
})();"#;

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Keep embedded text from closing the surrounding `<script>` element
fn script_safe(text: &str) -> String {
    text.replace("</", "<\\/")
}

fn plotly_script_tag(source: &PlotlyJs) -> Result<String, RenderError> {
    match source {
        PlotlyJs::Cdn => Ok(format!(
            "<script src=\"{}\" charset=\"utf-8\"></script>",
            PLOTLY_CDN
        )),
        PlotlyJs::Url(url) => Ok(format!(
            "<script src=\"{}\" charset=\"utf-8\"></script>",
            escape_html(url)
        )),
        PlotlyJs::Inline(path) => {
            let bundle = std::fs::read_to_string(path)
                .map_err(|e| RenderError::PlotlyBundle(format!("{}: {}", path.display(), e)))?;
            Ok(format!(
                "<script type=\"text/javascript\">{}</script>",
                script_safe(&bundle)
            ))
        }
    }
}

/// Render `figure` as a complete HTML document
///
/// # Errors
/// Returns `RenderError` if the figure cannot be serialized or an inlined
/// plotly.js bundle cannot be read
pub fn render_document(figure: &Figure, plotly_js: &PlotlyJs) -> Result<String, RenderError> {
    let figure_json = script_safe(&figure.to_plotly_json()?);
    let plotly_tag = plotly_script_tag(plotly_js)?;

    let link_script = if figure.cameras_linked() {
        format!(
            "<script type=\"text/javascript\">{}</script>\n",
            CAMERA_LINK_SCRIPT.replace("__DIV_ID__", FIGURE_DIV_ID)
        )
    } else {
        String::new()
    };

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
html, body {{ margin: 0; height: 100%; }}
#{div} {{ width: 100%; height: 100vh; }}
</style>
{plotly}
</head>
<body>
<div id="{div}"></div>
<script type="text/javascript">
(function () {{
  var fig = {figure};
  Plotly.newPlot('{div}', fig.data, fig.layout, {{ responsive: true, displaylogo: false }});
}})();
</script>
{link}</body>
</html>
"#,
        title = escape_html(figure.title()),
        div = FIGURE_DIV_ID,
        plotly = plotly_tag,
        figure = figure_json,
        link = link_script,
    ))
}

/// Write `contents` to `path`, creating parent directories as needed
///
/// # Errors
/// Returns `RenderError::Write` naming the path on any I/O failure
pub fn write_document(path: &Path, contents: &str) -> Result<(), RenderError> {
    let write_error = |source| RenderError::Write {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(path, contents).map_err(write_error)?;

    log::info!("Wrote {}", path.display());
    Ok(())
}

/// Hand a written document to the viewer
///
/// The document already exists on disk, so a viewer failure is only logged.
pub fn open_document(path: &Path, viewer: &dyn Viewer) {
    if let Err(e) = viewer.open(path) {
        log::warn!("{}", e);
    }
}

impl Figure {
    /// Render the figure as a standalone HTML document
    pub fn to_html(&self, plotly_js: &PlotlyJs) -> Result<String, RenderError> {
        render_document(self, plotly_js)
    }

    /// Write the figure to `export.path`, then open it if `export.auto_open`
    ///
    /// # Errors
    /// Returns `RenderError` if rendering or writing fails
    pub fn write_html(
        &self,
        export: &ExportOptions,
        viewer: &dyn Viewer,
    ) -> Result<PathBuf, RenderError> {
        let document = self.to_html(&export.plotly_js)?;
        write_document(&export.path, &document)?;

        if export.auto_open {
            open_document(&export.path, viewer);
        }
        Ok(export.path.clone())
    }
}
