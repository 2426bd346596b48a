use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use regex::Regex;

use crate::analysis::Summary;
use crate::css::Stylesheet;
use crate::utils::PrintableReport;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VerbosityLevel {
    #[default]
    Quiet,
    Normal,
    Verbose,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// `.css` files, or `.html` files whose `<style>` elements are analyzed.
    pub paths: Vec<PathBuf>,
    pub verbosity: VerbosityLevel,
    /// Print the whole parsed model instead of the summary.
    pub dump: bool,
}

#[derive(Debug)]
pub struct Runner {
    config: Config,
}

impl Runner {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<()> {
        let sheets = self.load_stylesheets()?;
        info!("loaded {} stylesheet(s)", sheets.len());

        for sheet in &sheets {
            if self.config.dump {
                println!("{:#?}", sheet);
            } else {
                sheet.print_in_chain(self.config.verbosity);
            }
        }
        Summary::new(&sheets).print(self.config.verbosity);

        Ok(())
    }

    fn load_stylesheets(&self) -> Result<Vec<Stylesheet>> {
        let mut sheets = Vec::new();

        for path in &self.config.paths {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let context = path.display().to_string();

            if is_html(path) {
                let style_tags = extract_style_tags(&text)?;
                if style_tags.is_empty() {
                    warn!("no <style> element found in {}", context);
                }
                sheets.extend(
                    style_tags
                        .iter()
                        .map(|css| Stylesheet::from_style_tag(css, &context)),
                );
            } else {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| context.clone());
                sheets.push(Stylesheet::new(&name, &text, &context));
            }
        }

        Ok(sheets)
    }
}

/// Returns the contents of every `<style>` element of an HTML document, in document order.
pub fn extract_style_tags(html: &str) -> Result<Vec<String>> {
    let style = Regex::new(r"(?is)<style\b[^>]*>(.*?)</style\s*>")?;
    Ok(style
        .captures_iter(html)
        .filter_map(|captures| captures.get(1))
        .map(|css| css.as_str().to_string())
        .collect())
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}
