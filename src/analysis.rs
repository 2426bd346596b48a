//! Summaries across the stylesheets of a project, as consumed by report generators.

use std::collections::BTreeMap;
use std::fmt;

use crate::css::{minify_code, Stylesheet};

/// Selectors used more than once across `sheets`, each mapped to the sorted names of the
/// stylesheets using it (one entry per use).
pub fn repeated_selectors(sheets: &[Stylesheet]) -> BTreeMap<String, Vec<String>> {
    let mut uses: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for sheet in sheets {
        for selector in &sheet.selectors {
            uses.entry(selector.clone())
                .or_default()
                .push(sheet.name.clone());
        }
    }
    uses.retain(|_, names| names.len() > 1);
    for names in uses.values_mut() {
        names.sort();
    }
    uses
}

/// Declaration blocks written out more than once across `sheets`, keyed by their minified
/// text (`{...}`) and mapped to the names of the stylesheets holding them, in source order.
pub fn repeated_declaration_blocks(sheets: &[Stylesheet]) -> BTreeMap<String, Vec<String>> {
    let mut uses: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for sheet in sheets {
        for ruleset in &sheet.rulesets {
            let block = format!("{{{}}}", minify_code(&ruleset.declaration_block.text));
            uses.entry(block).or_default().push(sheet.name.clone());
        }
    }
    uses.retain(|_, names| names.len() > 1);
    uses
}

/// The distinct values of every `font` and `font-family` declaration, in order of first use.
pub fn font_families(sheets: &[Stylesheet]) -> Vec<String> {
    let mut families: Vec<String> = Vec::new();
    let declarations = sheets
        .iter()
        .flat_map(|sheet| sheet.all_rulesets())
        .flat_map(|ruleset| ruleset.declaration_block.declarations.iter())
        .filter(|d| d.is_valid)
        .filter(|d| matches!(d.property.to_ascii_lowercase().as_str(), "font" | "font-family"));
    for declaration in declarations {
        if !families.contains(&declaration.value) {
            families.push(declaration.value.clone());
        }
    }
    families
}

/// Whether the page-wide colors are set: a `body` or `html` ruleset declaring both
/// `color` and `background-color`.
pub fn sets_page_colors(sheet: &Stylesheet) -> bool {
    sheet.color_rulesets().any(|ruleset| {
        ruleset
            .selectors()
            .any(|selector| matches!(selector, "body" | "html"))
            && ruleset.declaration_block.has_property("color")
            && ruleset.declaration_block.has_property("background-color")
    })
}

/// Project-wide findings over a set of stylesheets.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub repeated_selectors: BTreeMap<String, Vec<String>>,
    pub repeated_declaration_blocks: BTreeMap<String, Vec<String>>,
    pub font_families: Vec<String>,
    pub page_colors_set: bool,
}

impl Summary {
    pub fn new(sheets: &[Stylesheet]) -> Self {
        Self {
            repeated_selectors: repeated_selectors(sheets),
            repeated_declaration_blocks: repeated_declaration_blocks(sheets),
            font_families: font_families(sheets),
            page_colors_set: sheets.iter().any(sets_page_colors),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "summary")?;
        writeln!(f, "  repeated selectors: {}", self.repeated_selectors.len())?;
        for (selector, names) in &self.repeated_selectors {
            writeln!(f, "    {} ({})", selector, names.join(", "))?;
        }
        writeln!(
            f,
            "  repeated declaration blocks: {}",
            self.repeated_declaration_blocks.len()
        )?;
        for (block, names) in &self.repeated_declaration_blocks {
            writeln!(f, "    {} ({})", block, names.join(", "))?;
        }
        writeln!(f, "  font families: {}", self.font_families.join(" | "))?;
        write!(f, "  page colors set: {}", self.page_colors_set)
    }
}
