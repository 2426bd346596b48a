use std::ops::Range;

use log::debug;

use crate::css::ruleset::Ruleset;
use crate::css::separator::{split_rule_blocks, strip_comments};
use crate::error::{Error, Result};

/// An at-rule with a block body, such as `@media screen { ... }` or `@keyframes pulse { ... }`.
/// https://www.w3.org/TR/css-syntax-3/#at-rules
#[derive(Clone, Debug, PartialEq)]
pub struct NestedAtRule {
    /// The header, e.g. `@media screen and (max-width: 600px)`.
    pub rule: String,
    /// The raw body between the outer braces.
    pub body: String,
    pub body_rulesets: Vec<Ruleset>,
}

impl NestedAtRule {
    /// Parses the at-rule found in `text`.
    ///
    /// If `text` holds several at-rules, the last one is returned; use
    /// `Stylesheet::nested_at_rules` to get all of them.
    pub fn new(text: &str) -> Result<Self> {
        let (_, code) = strip_comments(text);
        let spans = locate_at_rules(&code);
        let span = spans
            .iter()
            .rev()
            .find(|span| span.body.is_some())
            .ok_or(Error::NoAtRuleFound)?;
        Self::from_span(&code, span).ok_or(Error::NoAtRuleFound)
    }

    /// Returns the at-keyword without `@`, e.g. `media`.
    pub fn name(&self) -> &str {
        let keyword = self.rule.strip_prefix('@').unwrap_or(&self.rule);
        keyword
            .split(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
            .next()
            .unwrap_or_default()
    }

    /// Builds the at-rule located at `span` in `text`. Returns `None` for statement at-rules.
    pub(crate) fn from_span(text: &str, span: &AtRuleSpan) -> Option<Self> {
        let body = &text[span.body.clone()?];
        let body_rulesets = split_rule_blocks(body)
            .iter()
            .filter(|block| block.contains('{'))
            .map(|block| Ruleset::new(block))
            .collect::<Vec<_>>();
        debug!(
            "extracted {} with {} ruleset(s)",
            span.header,
            body_rulesets.len()
        );

        Some(Self {
            rule: span.header.clone(),
            body: body.to_string(),
            body_rulesets,
        })
    }
}

/// Where an at-rule sits in the source, as byte ranges.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct AtRuleSpan {
    /// From `@` through the closing `}` (or the `;` of a statement at-rule).
    pub range: Range<usize>,
    /// The header with runs of whitespace collapsed.
    pub header: String,
    /// The body between the braces, or `None` for a statement at-rule like `@import`.
    pub body: Option<Range<usize>>,
}

/// Locates every top-level at-rule in comment-free `text`, in source order.
pub(crate) fn locate_at_rules(text: &str) -> Vec<AtRuleSpan> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            // At-rule bodies are skipped whole, so any `{` here opens a plain ruleset.
            b'{' => depth = 1,
            b'}' => depth = depth.saturating_sub(1),
            b'@' if starts_at_rule(bytes, i, depth) => {
                depth = 0;
                let Some(offset) = text[i..].find(|c: char| c == '{' || c == ';') else {
                    break;
                };
                let delimiter = i + offset;
                let header = text[i..delimiter]
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ");

                if bytes[delimiter] == b';' {
                    spans.push(AtRuleSpan {
                        range: i..delimiter + 1,
                        header,
                        body: None,
                    });
                    i = delimiter + 1;
                    continue;
                }

                let close = find_matching_brace(bytes, delimiter);
                let end = (close + 1).min(bytes.len());
                spans.push(AtRuleSpan {
                    range: i..end,
                    header,
                    body: Some(delimiter + 1..close),
                });
                i = end;
                continue;
            }
            _ => {}
        }
        i += 1;
    }

    spans
}

/// Whether the `@` at `i` starts an at-rule. In a ruleset left open by a missing `}`, an
/// at-rule still starts right after a `;` or `}`.
fn starts_at_rule(bytes: &[u8], i: usize, depth: usize) -> bool {
    let is_keyword = bytes
        .get(i + 1)
        .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'-');
    let after_statement = || {
        bytes[..i]
            .iter()
            .rev()
            .find(|b| !b.is_ascii_whitespace())
            .is_some_and(|b| *b == b';' || *b == b'}')
    };
    is_keyword && (depth == 0 || (depth == 1 && after_statement()))
}

/// Returns the index of the `}` matching the `{` at `open`, or the end of the input if unbalanced.
fn find_matching_brace(bytes: &[u8], open: usize) -> usize {
    let mut depth = 0usize;
    for (i, b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => {}
        }
    }
    bytes.len()
}
