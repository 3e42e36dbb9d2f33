//! SVG summary renderer writing to the cache directory

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use async_trait::async_trait;
use tokio::fs;

use shared::{component_info, Component, SummaryReport};
use crate::error::{CatalogError, CatalogResult};
use crate::traits::SummaryRenderer;

pub const SUMMARY_FILE: &str = "summary.svg";

const WIDTH: u32 = 900;
const HEIGHT: u32 = 600;

pub struct SvgSummaryRenderer {
    cache_dir: PathBuf,
}

impl SvgSummaryRenderer {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }

    pub fn artifact_path(&self) -> PathBuf {
        self.cache_dir.join(SUMMARY_FILE)
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Render the report as an SVG document
    pub fn to_svg(report: &SummaryReport) -> String {
        let last_refresh = report
            .last_refreshed_at
            .map(|at| at.to_rfc3339())
            .unwrap_or_else(|| "never".to_string());

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{WIDTH}" height="{HEIGHT}" viewBox="0 0 {WIDTH} {HEIGHT}">"#
        );
        let _ = writeln!(svg, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##);
        let _ = writeln!(svg, r##"<g font-family="Arial, sans-serif" fill="#000000">"##);
        let _ = writeln!(svg, r#"<text x="40" y="80" font-size="40" font-weight="bold">Country Summary</text>"#);
        let _ = writeln!(
            svg,
            r#"<text x="40" y="150" font-size="28">Total Countries: {}</text>"#,
            report.total_count
        );
        let _ = writeln!(
            svg,
            r#"<text x="40" y="190" font-size="28">Last Refresh: {}</text>"#,
            xml_escape(&last_refresh)
        );
        let _ = writeln!(svg, r#"<text x="40" y="250" font-size="28">Top 5 by Estimated GDP:</text>"#);

        let mut y = 300;
        for (i, country) in report.top.iter().enumerate() {
            let _ = writeln!(
                svg,
                r#"<text x="60" y="{y}" font-size="28">{}. {} — {:.2}</text>"#,
                i + 1,
                xml_escape(&country.name),
                country.estimated_gdp
            );
            y += 40;
        }

        let _ = writeln!(svg, "</g>");
        svg.push_str("</svg>\n");
        svg
    }
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[async_trait]
impl SummaryRenderer for SvgSummaryRenderer {
    async fn render(&self, report: &SummaryReport) -> CatalogResult<()> {
        fs::create_dir_all(&self.cache_dir)
            .await
            .map_err(|e| CatalogError::render(format!("Failed to create {}: {e}", self.cache_dir.display())))?;

        let path = self.artifact_path();
        let tmp_path = path.with_extension("svg.tmp");
        fs::write(&tmp_path, Self::to_svg(report))
            .await
            .map_err(|e| CatalogError::render(format!("Failed to write {}: {e}", tmp_path.display())))?;
        fs::rename(&tmp_path, &path)
            .await
            .map_err(|e| CatalogError::render(format!("Failed to replace {}: {e}", path.display())))?;

        component_info!(Component::Summary, "🖼️ Summary written to {}", path.display());
        Ok(())
    }

    async fn read_artifact(&self) -> CatalogResult<Option<Vec<u8>>> {
        match fs::read(self.artifact_path()).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn content_type(&self) -> &'static str {
        "image/svg+xml"
    }
}
