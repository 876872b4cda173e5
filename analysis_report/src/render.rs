//! Where built charts end up: a viewer, HTML files, or nowhere.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Mutex,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::charts::Chart;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create chart directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write chart {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Displays or persists a chart.
pub trait ChartRenderer: Send + Sync {
    fn render(&self, chart: &Chart) -> Result<(), RenderError>;
}

/// Opens each chart in the system's default viewer.
#[derive(Debug, Default)]
pub struct InteractiveRenderer;

impl ChartRenderer for InteractiveRenderer {
    fn render(&self, chart: &Chart) -> Result<(), RenderError> {
        debug!(chart = chart.name(), "opening chart");
        chart.plot().show();
        Ok(())
    }
}

/// Writes `<dir>/<chart name>.html` for every chart, creating `dir` on demand.
#[derive(Debug, Clone)]
pub struct HtmlFileRenderer {
    dir: PathBuf,
}

impl HtmlFileRenderer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, chart: &Chart) -> PathBuf {
        self.dir.join(format!("{}.html", chart.name()))
    }
}

impl ChartRenderer for HtmlFileRenderer {
    fn render(&self, chart: &Chart) -> Result<(), RenderError> {
        fs::create_dir_all(&self.dir).map_err(|source| RenderError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(chart);
        fs::write(&path, chart.plot().to_html()).map_err(|source| RenderError::Write {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), "chart written");
        Ok(())
    }
}

/// Discards charts, remembering only their names.
#[derive(Debug, Default)]
pub struct NoopRenderer {
    rendered: Mutex<Vec<String>>,
}

impl NoopRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the charts rendered so far, in order.
    pub fn rendered(&self) -> Vec<String> {
        self.rendered
            .lock()
            .map(|names| names.clone())
            .unwrap_or_default()
    }
}

impl ChartRenderer for NoopRenderer {
    fn render(&self, chart: &Chart) -> Result<(), RenderError> {
        if let Ok(mut names) = self.rendered.lock() {
            names.push(chart.name().to_string());
        }
        Ok(())
    }
}

/// Renderer selection as it appears in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    #[default]
    Interactive,
    Html,
    None,
}

impl RenderMode {
    /// `chart_dir` is only used by [`RenderMode::Html`].
    pub fn renderer(self, chart_dir: &Path) -> Box<dyn ChartRenderer> {
        match self {
            RenderMode::Interactive => Box::new(InteractiveRenderer),
            RenderMode::Html => Box::new(HtmlFileRenderer::new(chart_dir)),
            RenderMode::None => Box::new(NoopRenderer::new()),
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderMode::Interactive => write!(f, "interactive"),
            RenderMode::Html => write!(f, "html"),
            RenderMode::None => write!(f, "none"),
        }
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "interactive" | "show" => Ok(RenderMode::Interactive),
            "html" | "file" => Ok(RenderMode::Html),
            "none" | "noop" | "off" => Ok(RenderMode::None),
            other => Err(format!(
                "unknown render mode '{other}', expected 'interactive', 'html' or 'none'"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use plotly::Plot;

    use super::*;

    #[test]
    fn noop_records_names_in_order() {
        let renderer = NoopRenderer::new();
        renderer.render(&Chart::new("a", Plot::new())).unwrap();
        renderer.render(&Chart::new("b", Plot::new())).unwrap();
        assert_eq!(renderer.rendered(), ["a", "b"]);
    }

    #[test]
    fn html_renderer_creates_directory_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("charts");
        let renderer = HtmlFileRenderer::new(&dir);
        let chart = Chart::new("prices", Plot::new());

        renderer.render(&chart).unwrap();

        let path = renderer.path_for(&chart);
        assert_eq!(path, dir.join("prices.html"));
        let html = fs::read_to_string(path).unwrap();
        assert!(html.contains("<html"));
    }

    #[test]
    fn render_mode_parses_aliases() {
        assert_eq!("HTML".parse::<RenderMode>().unwrap(), RenderMode::Html);
        assert_eq!("off".parse::<RenderMode>().unwrap(), RenderMode::None);
        assert_eq!(RenderMode::default().to_string(), "interactive");
        assert!("gif".parse::<RenderMode>().is_err());
    }
}
