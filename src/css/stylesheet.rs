use std::fmt;

use log::debug;

use crate::css::at_rule::{locate_at_rules, NestedAtRule};
use crate::css::gradient::process_gradient;
use crate::css::ruleset::Ruleset;
use crate::css::selector::SpecificityScore;
use crate::css::separator::{split_rule_blocks, strip_comments};
use crate::error::Result;

/// The parsed model of one CSS source: a `.css` file or the contents of a `<style>` element.
#[derive(Clone, Debug, PartialEq)]
pub struct Stylesheet {
    /// The file name, or `local` for a `<style>` element.
    pub name: String,
    /// Where the CSS came from (e.g. the HTML file of a `<style>` element). Not used for parsing.
    pub context: String,
    pub comments: Vec<String>,
    pub nested_at_rules: Vec<NestedAtRule>,
    /// Statement at-rules such as `@import url(base.css)`, without the trailing `;`.
    pub at_statements: Vec<String>,
    pub rulesets: Vec<Ruleset>,
    /// The minified code left once comments and at-rules are removed.
    pub text: String,
    /// Every selector of every top-level ruleset, in source order, duplicates included.
    pub selectors: Vec<String>,
}

impl Stylesheet {
    pub fn new(name: &str, text: &str, context: &str) -> Self {
        let (comments, code) = strip_comments(text);

        let spans = locate_at_rules(&code);
        let mut nested_at_rules = Vec::new();
        let mut at_statements = Vec::new();
        let mut rest = String::with_capacity(code.len());
        let mut last = 0;
        for span in &spans {
            match NestedAtRule::from_span(&code, span) {
                Some(at_rule) => nested_at_rules.push(at_rule),
                None => at_statements.push(span.header.clone()),
            }
            rest.push_str(&code[last..span.range.start]);
            last = span.range.end;
        }
        rest.push_str(&code[last..]);

        let rulesets = split_rule_blocks(&rest)
            .iter()
            .map(|block| Ruleset::new(block))
            .collect::<Vec<_>>();
        let selectors = rulesets
            .iter()
            .flat_map(|ruleset| ruleset.selectors().map(str::to_string))
            .collect::<Vec<_>>();

        debug!(
            "parsed {}: {} comment(s), {} nested at-rule(s), {} ruleset(s)",
            name,
            comments.len(),
            nested_at_rules.len(),
            rulesets.len()
        );

        Self {
            name: name.to_string(),
            context: context.to_string(),
            comments,
            nested_at_rules,
            at_statements,
            rulesets,
            text: minify_code(&rest),
            selectors,
        }
    }

    /// Parses the contents of a `<style>` element found in `context`.
    pub fn from_style_tag(text: &str, context: &str) -> Self {
        Self::new("local", text, context)
    }

    /// Rulesets that set `color` or `background-color`.
    pub fn color_rulesets(&self) -> impl Iterator<Item = &Ruleset> {
        self.rulesets.iter().filter(|ruleset| ruleset.is_color_ruleset())
    }

    /// Top-level rulesets followed by the rulesets nested in at-rules.
    pub fn all_rulesets(&self) -> impl Iterator<Item = &Ruleset> {
        self.rulesets.iter().chain(
            self.nested_at_rules
                .iter()
                .flat_map(|at_rule| at_rule.body_rulesets.iter()),
        )
    }

    /// The distinct vendor-prefixed properties, in order of first use.
    pub fn vendor_prefixed_properties(&self) -> Vec<String> {
        let mut properties: Vec<String> = Vec::new();
        for declaration in self
            .all_rulesets()
            .flat_map(|ruleset| ruleset.declaration_block.declarations.iter())
            .filter(|declaration| declaration.has_vendor_prefix())
        {
            if !properties.contains(&declaration.property) {
                properties.push(declaration.property.clone());
            }
        }
        properties
    }

    /// Runs gradient analysis over every gradient-valued declaration of the stylesheet.
    pub fn gradients(&self) -> Result<(bool, Vec<String>)> {
        let values = self
            .all_rulesets()
            .flat_map(|ruleset| ruleset.declaration_block.declarations.iter())
            .filter(|declaration| declaration.is_gradient())
            .map(|declaration| declaration.value.as_str())
            .collect::<Vec<_>>();
        process_gradient(&values.join(",\n"))
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.context.is_empty() {
            writeln!(f, "{}", self.name)?;
        } else {
            writeln!(f, "{} ({})", self.name, self.context)?;
        }
        writeln!(f, "  comments: {}", self.comments.len())?;

        let invalid = self.rulesets.iter().filter(|r| !r.is_valid).count();
        writeln!(f, "  rulesets: {} ({} invalid)", self.rulesets.len(), invalid)?;
        for ruleset in self.rulesets.iter().filter(|r| !r.is_valid) {
            writeln!(f, "    invalid: {}", minify_code(&ruleset.selector))?;
        }

        writeln!(f, "  nested at-rules: {}", self.nested_at_rules.len())?;
        for at_rule in &self.nested_at_rules {
            writeln!(
                f,
                "    {} [{} ruleset(s)]",
                at_rule.rule,
                at_rule.body_rulesets.len()
            )?;
        }
        for statement in &self.at_statements {
            writeln!(f, "    {}", statement)?;
        }

        writeln!(f, "  selectors: {}", self.selectors.len())?;
        for selector in &self.selectors {
            writeln!(
                f,
                "    {:<40} {}",
                selector,
                SpecificityScore::from_selector(selector)
            )?;
        }

        let color_selectors = self
            .color_rulesets()
            .map(|r| r.selector.as_str())
            .collect::<Vec<_>>();
        writeln!(f, "  color rulesets: {}", color_selectors.join(", "))?;
        write!(
            f,
            "  vendor-prefixed properties: {}",
            self.vendor_prefixed_properties().join(", ")
        )
    }
}

/// Removes line breaks and the indentation of every line.
/// Whitespace inside a line is kept, e.g. `margin: 0 auto;`.
pub fn minify_code(text: &str) -> String {
    text.lines().map(str::trim).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LAYOUT_CSS: &str = include_str!("../../tests/fixtures/layout.css");

    const DECLARATION_BLOCK_WITH_SELECTOR: &str = r#"
article#gallery {
    display: flex;
    flex-wrap: wrap;
    width: 96vw;
    margin: 0 auto;
}"#;

    const MINIFIED_DECLARATION_BLOCK_WITH_SELECTOR: &str =
        "article#gallery {display: flex;flex-wrap: wrap;width: 96vw;margin: 0 auto;}";

    #[test]
    fn minify_code_joins_lines() {
        assert_eq!(
            minify_code(DECLARATION_BLOCK_WITH_SELECTOR),
            MINIFIED_DECLARATION_BLOCK_WITH_SELECTOR
        );
    }

    #[test]
    fn stylesheet_text_is_minified() {
        let sheet = Stylesheet::new("local", DECLARATION_BLOCK_WITH_SELECTOR, "");
        assert_eq!(sheet.text, MINIFIED_DECLARATION_BLOCK_WITH_SELECTOR);
        assert_eq!(minify_code(&sheet.text), MINIFIED_DECLARATION_BLOCK_WITH_SELECTOR);
    }

    #[test]
    fn stylesheet_with_one_selector() {
        let sheet = Stylesheet::new("local", DECLARATION_BLOCK_WITH_SELECTOR, "");
        assert_eq!(sheet.selectors, vec!["article#gallery"]);
        assert_eq!(sheet.rulesets.len(), 1);
        assert!(sheet.nested_at_rules.is_empty());
    }

    #[test]
    fn layout_comments() {
        let sheet = Stylesheet::new("layout.css", LAYOUT_CSS, "");
        assert_eq!(sheet.comments.len(), 6);
        assert_eq!(sheet.comments[0], "/* layout.css */");
    }

    #[test]
    fn layout_text_starts_at_first_ruleset() {
        let sheet = Stylesheet::new("layout.css", LAYOUT_CSS, "");
        assert_eq!(&sheet.text[..6], "body {");
        assert!(!sheet.text.contains("/*"));
        assert!(!sheet.text.contains('@'));
    }

    #[test]
    fn layout_nested_at_rules() {
        let sheet = Stylesheet::new("layout.css", LAYOUT_CSS, "");
        assert_eq!(
            sheet
                .nested_at_rules
                .iter()
                .map(|r| r.rule.as_str())
                .collect::<Vec<_>>(),
            vec![
                "@media screen and (max-width: 900px)",
                "@media screen and (max-width: 600px)",
                "@supports (display: grid)",
                "@keyframes pulse",
            ]
        );
        assert_eq!(sheet.nested_at_rules[0].body_rulesets.len(), 2);
    }

    #[test]
    fn layout_selectors() {
        let sheet = Stylesheet::new("layout.css", LAYOUT_CSS, "");
        assert_eq!(sheet.selectors.len(), 22);
        assert_eq!(
            sheet.selectors[..4].to_vec(),
            vec!["body", "header", "nav ul", "nav li"]
        );
        assert_eq!(sheet.selectors.last().map(String::as_str), Some("#skip-link"));
        assert!(sheet.rulesets.iter().all(|r| r.is_valid));
    }

    #[test]
    fn layout_color_rulesets() {
        let sheet = Stylesheet::new("layout.css", LAYOUT_CSS, "");
        assert_eq!(
            sheet
                .color_rulesets()
                .map(|r| r.selector.as_str())
                .collect::<Vec<_>>(),
            vec!["body", "footer"]
        );
    }

    #[test]
    fn layout_vendor_prefixes_and_gradients() {
        let sheet = Stylesheet::new("layout.css", LAYOUT_CSS, "");
        assert_eq!(
            sheet.vendor_prefixed_properties(),
            vec!["-webkit-transition", "-moz-border-radius"]
        );
        let (has_vendor_prefix, colors) = sheet.gradients().unwrap();
        assert!(has_vendor_prefix);
        assert_eq!(
            colors,
            vec!["rgba(20, 35, 38, 0.9)", "rgba(66, 99, 140, 0.6)"]
        );
    }

    #[test]
    fn malformed_ruleset_does_not_lose_the_rest() {
        let css = "p { color: red; }\nbody }\n    background: #efefef;\n{\nh1 { margin: 0; }";
        let sheet = Stylesheet::new("broken.css", css, "");
        assert_eq!(sheet.selectors, vec!["p", "body", "h1"]);
        assert_eq!(
            sheet.rulesets.iter().map(|r| r.is_valid).collect::<Vec<_>>(),
            vec![true, false, true]
        );
        assert_eq!(
            sheet.rulesets[1]
                .declaration_block
                .get("background")
                .map(|d| d.value.as_str()),
            Some("#efefef")
        );
    }

    #[test]
    fn missing_close_brace_does_not_lose_the_rest() {
        let css = "p { color: red;\nh1 { margin: 0; }\nfooter { color: blue; }";
        let sheet = Stylesheet::new("broken.css", css, "");
        assert_eq!(sheet.selectors, vec!["p", "h1", "footer"]);
        assert_eq!(
            sheet.rulesets.iter().map(|r| r.is_valid).collect::<Vec<_>>(),
            vec![false, true, true]
        );
        assert_eq!(sheet.rulesets[0].declaration_block.declarations.len(), 1);
    }

    #[test]
    fn at_rule_after_malformed_ruleset_is_extracted() {
        let css = "p { color: red; }\nbody }\n background: #efefef;\n{\nh1 { margin: 0; }\n\
                   @media print { a { color: black; } }\nfooter { color: blue; }";
        let sheet = Stylesheet::new("broken.css", css, "");
        assert_eq!(sheet.selectors, vec!["p", "body", "h1", "footer"]);
        assert_eq!(sheet.nested_at_rules.len(), 1);
        assert_eq!(sheet.nested_at_rules[0].rule, "@media print");
        assert_eq!(sheet.nested_at_rules[0].body_rulesets[0].selector, "a");
        assert!(!sheet.text.contains('@'));
        assert!(!sheet.text.contains("black"));
    }

    #[test]
    fn at_rule_after_missing_close_brace_is_extracted() {
        let css = "p { color: red;\n@media print { a { color: black; } }\nh1 { margin: 0; }";
        let sheet = Stylesheet::new("broken.css", css, "");
        assert_eq!(sheet.selectors, vec!["p", "h1"]);
        assert_eq!(sheet.nested_at_rules.len(), 1);
        assert_eq!(sheet.text, "p { color: red;h1 { margin: 0; }");
    }

    #[test]
    fn statement_at_rules_are_kept_apart() {
        let css = "@charset \"utf-8\";\n@import url(base.css);\nbody { margin: 0; }";
        let sheet = Stylesheet::new("main.css", css, "");
        assert_eq!(
            sheet.at_statements,
            vec!["@charset \"utf-8\"", "@import url(base.css)"]
        );
        assert_eq!(sheet.selectors, vec!["body"]);
        assert_eq!(sheet.text, "body { margin: 0; }");
    }

    #[test]
    fn style_tag_is_named_local() {
        let sheet = Stylesheet::from_style_tag("h1 { color: navy; }", "index.html");
        assert_eq!(sheet.name, "local");
        assert_eq!(sheet.context, "index.html");
        assert_eq!(sheet.color_rulesets().count(), 1);
    }

    #[test]
    fn reparsing_serialized_rulesets_keeps_declaration_counts() {
        let sheet = Stylesheet::new("layout.css", LAYOUT_CSS, "");
        let serialized = sheet
            .rulesets
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join("\n");
        let reparsed = Stylesheet::new("layout.css", &serialized, "");

        let counts = |sheet: &Stylesheet| {
            sheet
                .rulesets
                .iter()
                .map(|r| r.declaration_block.declarations.len())
                .collect::<Vec<_>>()
        };
        assert_eq!(counts(&reparsed), counts(&sheet));
        assert_eq!(reparsed.selectors, sheet.selectors);
    }

    #[test]
    fn summary_lists_at_rules_and_selectors() {
        let sheet = Stylesheet::new("layout.css", LAYOUT_CSS, "index.html");
        let summary = sheet.to_string();
        assert!(summary.starts_with("layout.css (index.html)\n"));
        assert!(summary.contains("  nested at-rules: 4\n"));
        assert!(summary.contains("@keyframes pulse [3 ruleset(s)]"));
        assert!(summary.contains("  selectors: 22\n"));
    }
}
