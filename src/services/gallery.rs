//! Gallery service
//!
//! Writes one document per dataset into an output directory plus an index
//! page embedding them all. A dataset that fails to load, build or write is
//! recorded and skipped; the rest of the gallery is still produced.

use crate::domain::{Dataset, PlotOptions};
use crate::error::{AppError, RenderError};
use crate::input::DatasetEntry;
use crate::render::html::{open_document, render_document, write_document};
use crate::render::index::render_index;
use crate::render::preview::{render_preview, PREVIEW_SIZE};
use crate::render::{PlotlyJs, Viewer};
use crate::services::panel_builder::PanelBuilder;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default index file name
pub const DEFAULT_INDEX_NAME: &str = "ivplot_gallery.html";

/// Anything that can produce a named dataset on demand
pub trait DatasetSource {
    /// Name shown in the gallery and used for file names
    fn name(&self) -> &str;

    /// Load the dataset
    fn load(&self) -> Result<Dataset, AppError>;
}

impl DatasetSource for Dataset {
    fn name(&self) -> &str {
        Dataset::name(self)
    }

    fn load(&self) -> Result<Dataset, AppError> {
        Ok(self.clone())
    }
}

impl DatasetSource for DatasetEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn load(&self) -> Result<Dataset, AppError> {
        DatasetEntry::load(self)
    }
}

/// Gallery output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryOptions {
    /// Render a PNG preview next to every document
    pub thumbnails: bool,
    /// Preview size in pixels
    pub thumbnail_size: (u32, u32),
    /// File name of the index page
    pub index_name: String,
    /// Open the index once written
    pub auto_open: bool,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            thumbnails: false,
            thumbnail_size: PREVIEW_SIZE,
            index_name: DEFAULT_INDEX_NAME.to_string(),
            auto_open: true,
        }
    }
}

/// A dataset written to the gallery
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryEntry {
    pub name: String,
    /// Element id of the entry's index section
    pub anchor: String,
    pub document: PathBuf,
    /// Document path relative to the index
    pub document_name: String,
    pub preview: Option<PathBuf>,
    pub preview_name: Option<String>,
    pub points: usize,
}

/// A dataset that could not be added
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryFailure {
    pub name: String,
    pub reason: String,
}

/// Outcome of a gallery run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryReport {
    pub index: PathBuf,
    pub entries: Vec<GalleryEntry>,
    pub failures: Vec<GalleryFailure>,
}

/// Replace every character outside `[A-Za-z0-9._-]` with `_`
pub fn safe_file_stem(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Hands out file stems that are unique within one gallery
#[derive(Debug, Default)]
struct StemAllocator {
    used: HashSet<String>,
}

impl StemAllocator {
    fn reserve(&mut self, stem: &str) {
        self.used.insert(stem.to_ascii_lowercase());
    }

    fn allocate(&mut self, name: &str, ordinal: usize) -> String {
        let base = match safe_file_stem(name) {
            stem if stem.trim_matches(|c| c == '_' || c == '.').is_empty() => {
                format!("dataset_{}", ordinal)
            }
            stem => stem,
        };

        let mut stem = base.clone();
        let mut suffix = 2;
        // case-insensitive so the files stay distinct on every filesystem
        while !self.used.insert(stem.to_ascii_lowercase()) {
            stem = format!("{}_{}", base, suffix);
            suffix += 1;
        }
        stem
    }
}

/// Service that writes a gallery of per-dataset documents
pub struct GalleryService {
    plot: PlotOptions,
    options: GalleryOptions,
    plotly_js: PlotlyJs,
    dry_run: bool,
}

impl GalleryService {
    /// Create a new gallery service
    pub fn new(plot: PlotOptions, options: GalleryOptions, plotly_js: PlotlyJs, dry_run: bool) -> Self {
        Self {
            plot,
            options,
            plotly_js,
            dry_run,
        }
    }

    /// Check if in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Build the gallery for `sources` inside `output_dir`
    ///
    /// # Errors
    /// Fails only when the output directory or the index cannot be written;
    /// per-dataset errors are collected in the report
    pub fn build(
        &self,
        sources: &[&dyn DatasetSource],
        output_dir: &Path,
        viewer: &dyn Viewer,
    ) -> Result<GalleryReport, AppError> {
        if !self.dry_run {
            std::fs::create_dir_all(output_dir).map_err(|source| RenderError::Write {
                path: output_dir.display().to_string(),
                source,
            })?;
        }

        let index = output_dir.join(&self.options.index_name);
        let mut stems = StemAllocator::default();
        if let Some(stem) = Path::new(&self.options.index_name).file_stem() {
            stems.reserve(&stem.to_string_lossy());
        }

        let mut entries = Vec::new();
        let mut failures = Vec::new();

        for (i, source) in sources.iter().enumerate() {
            let ordinal = i + 1;
            let display_name = match source.name().trim() {
                "" => format!("dataset {}", ordinal),
                name => name.to_string(),
            };
            let stem = stems.allocate(source.name(), ordinal);

            log::info!("Generating IV plot for {}", display_name);
            match self.build_entry(*source, &display_name, &stem, output_dir) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    log::error!("Skipping '{}': {}", display_name, e);
                    failures.push(GalleryFailure {
                        name: display_name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let page = render_index(&entries, &failures);
        if self.dry_run {
            log::info!("DRY RUN: Would write gallery index {}", index.display());
        } else {
            write_document(&index, &page)?;
            if self.options.auto_open {
                open_document(&index, viewer);
            }
        }

        log::info!(
            "Gallery: {} documents, {} failures",
            entries.len(),
            failures.len()
        );

        Ok(GalleryReport {
            index,
            entries,
            failures,
        })
    }

    fn build_entry(
        &self,
        source: &dyn DatasetSource,
        display_name: &str,
        stem: &str,
        output_dir: &Path,
    ) -> Result<GalleryEntry, AppError> {
        let dataset = source.load()?;

        let options = PlotOptions {
            title: display_name.to_string(),
            ..self.plot.clone()
        };
        let figure = PanelBuilder::new(options)?.build(std::slice::from_ref(&dataset), None)?;

        let document_name = format!("{}.html", stem);
        let document = output_dir.join(&document_name);
        let html = render_document(&figure, &self.plotly_js)?;

        let preview_name = self.options.thumbnails.then(|| format!("{}.png", stem));
        let preview = preview_name.as_ref().map(|name| output_dir.join(name));

        if self.dry_run {
            log::info!("DRY RUN: Would write {}", document.display());
        } else {
            write_document(&document, &html)?;
            if let Some(path) = &preview {
                render_preview(&figure, path, self.options.thumbnail_size)?;
            }
        }

        Ok(GalleryEntry {
            name: display_name.to_string(),
            anchor: stem.to_string(),
            document,
            document_name,
            preview,
            preview_name,
            points: figure.total_points(),
        })
    }
}

/// Build a gallery with default service settings
///
/// # Errors
/// See [`GalleryService::build`]
pub fn build_gallery(
    sources: &[&dyn DatasetSource],
    output_dir: &Path,
    plot: &PlotOptions,
    options: &GalleryOptions,
    viewer: &dyn Viewer,
) -> Result<GalleryReport, AppError> {
    GalleryService::new(plot.clone(), options.clone(), PlotlyJs::default(), false)
        .build(sources, output_dir, viewer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{drain_sweep, gate_sweep, FailingSource, RecordingViewer};
    use tempfile::TempDir;

    fn dataset(name: &str) -> Dataset {
        Dataset::new(name, vec![gate_sweep(10), drain_sweep(10)])
    }

    #[test]
    fn test_safe_file_stem() {
        assert_eq!(safe_file_stem("M1"), "M1");
        assert_eq!(safe_file_stem("nmos 10/0.18 @25C"), "nmos_10_0.18__25C");
        assert_eq!(safe_file_stem("a-b_c.d"), "a-b_c.d");
    }

    #[test]
    fn test_stem_allocation() {
        let mut stems = StemAllocator::default();
        stems.reserve("ivplot_gallery");
        assert_eq!(stems.allocate("M 1", 1), "M_1");
        assert_eq!(stems.allocate("M/1", 2), "M_1_2");
        assert_eq!(stems.allocate("m_1", 3), "m_1_3");
        assert_eq!(stems.allocate("", 4), "dataset_4");
        assert_eq!(stems.allocate("ivplot_gallery", 5), "ivplot_gallery_2");
    }

    #[test]
    fn test_gallery_isolates_failures() {
        let dir = TempDir::new().unwrap();
        let m1 = dataset("M1");
        let broken = FailingSource::new("broken");
        let m2 = dataset("M 2");
        let empty = Dataset::new("empty", vec![]);
        let sources: Vec<&dyn DatasetSource> = vec![&m1, &broken, &m2, &empty];
        let viewer = RecordingViewer::new();

        let report = build_gallery(
            &sources,
            dir.path(),
            &PlotOptions::default(),
            &GalleryOptions::default(),
            &viewer,
        )
        .unwrap();

        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].name, "broken");
        assert_eq!(report.failures[1].name, "empty");

        assert!(dir.path().join("M1.html").exists());
        assert!(dir.path().join("M_2.html").exists());
        assert!(!dir.path().join("broken.html").exists());
        assert_eq!(report.index, dir.path().join(DEFAULT_INDEX_NAME));

        let index = std::fs::read_to_string(&report.index).unwrap();
        assert!(index.contains("<iframe src=\"M_2.html\""));
        assert!(index.contains("Failed datasets (2)"));
        assert_eq!(viewer.opened(), vec![report.index.clone()]);
    }

    #[test]
    fn test_documents_are_titled_by_dataset() {
        let dir = TempDir::new().unwrap();
        let m1 = dataset("M1");
        let options = GalleryOptions {
            auto_open: false,
            ..GalleryOptions::default()
        };
        let viewer = RecordingViewer::new();

        let sources: [&dyn DatasetSource; 1] = [&m1];
        build_gallery(&sources, dir.path(), &PlotOptions::default(), &options, &viewer).unwrap();

        let html = std::fs::read_to_string(dir.path().join("M1.html")).unwrap();
        assert!(html.contains("<title>M1</title>"));
        assert!(viewer.opened().is_empty());
    }

    #[test]
    fn test_thumbnails() {
        let dir = TempDir::new().unwrap();
        let m1 = dataset("M1");
        let options = GalleryOptions {
            thumbnails: true,
            auto_open: false,
            ..GalleryOptions::default()
        };

        let sources: [&dyn DatasetSource; 1] = [&m1];
        let report = build_gallery(
            &sources,
            dir.path(),
            &PlotOptions::default(),
            &options,
            &RecordingViewer::new(),
        )
        .unwrap();

        assert_eq!(report.entries[0].preview_name.as_deref(), Some("M1.png"));
        assert!(dir.path().join("M1.png").exists());
        let index = std::fs::read_to_string(&report.index).unwrap();
        assert!(index.contains("src=\"M1.png\""));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("gallery");
        let m1 = dataset("M1");
        let viewer = RecordingViewer::new();
        let service = GalleryService::new(
            PlotOptions::default(),
            GalleryOptions::default(),
            PlotlyJs::Cdn,
            true,
        );

        let sources: [&dyn DatasetSource; 1] = [&m1];
        let report = service.build(&sources, &out, &viewer).unwrap();

        assert_eq!(report.entries.len(), 1);
        assert!(!out.exists());
        assert!(viewer.opened().is_empty());
    }
}
