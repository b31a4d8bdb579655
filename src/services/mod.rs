//! Service layer for figure building
//!
//! Services encapsulate the plotting logic: shaping sweeps into panels,
//! assembling figures, and writing galleries.

pub mod gallery;
pub mod panel_builder;
pub mod panels;
pub mod sampling;
pub mod triangulation;

pub use gallery::{build_gallery, DatasetSource, GalleryOptions, GalleryReport, GalleryService};
pub use panel_builder::{build_panels, PanelBuilder};
