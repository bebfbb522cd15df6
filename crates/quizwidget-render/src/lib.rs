//! quizwidget-render: Presentation surfaces for the quiz widget.
//!
//! Each surface keeps the latest rendition of the view it was given; the
//! front end decides when to show or persist it.

use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};

use quizwidget_core::traits::Surface;

pub mod html;
pub mod json;
pub mod text;

pub use html::HtmlSurface;
pub use json::JsonSurface;
pub use text::TextSurface;

/// Read access to the document a surface currently shows.
pub trait Document {
    /// The current rendition, or `None` before the first render and after a clear.
    fn document(&self) -> Option<&str>;

    /// How many views have been applied so far.
    fn renders(&self) -> u64;

    /// Write the current document to `path`, creating parent directories.
    fn write_to(&self, path: &Path) -> Result<()> {
        let doc = self.document().context("nothing rendered yet")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, doc)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }
}

/// A surface whose rendition can be read back.
pub trait RenderSurface: Surface + Document {}

impl<T: Surface + Document> RenderSurface for T {}

/// Output format of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Text,
    Html,
    Json,
}

impl Format {
    /// A fresh surface for this format.
    pub fn surface(self) -> Box<dyn RenderSurface> {
        match self {
            Format::Text => Box::new(TextSurface::new()),
            Format::Html => Box::new(HtmlSurface::new()),
            Format::Json => Box::new(JsonSurface::new()),
        }
    }
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Format::Text),
            "html" => Ok(Format::Html),
            "json" => Ok(Format::Json),
            other => anyhow::bail!("unknown format '{other}' (expected text, html or json)"),
        }
    }
}
