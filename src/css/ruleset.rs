use std::fmt;

use log::warn;

use crate::css::declaration::DeclarationBlock;
use crate::css::selector::SpecificityScore;
use crate::css::separator::split_top_level;

/// A selector paired with its declaration block.
#[derive(Clone, Debug, PartialEq)]
pub struct Ruleset {
    pub selector: String,
    pub declaration_block: DeclarationBlock,
    pub is_valid: bool,
}

/// Re-serializes the ruleset in minified form, e.g. `p {color: red;margin: 0;}`.
impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {{", self.selector)?;
        for declaration in &self.declaration_block.declarations {
            write!(f, "{};", declaration)?;
        }
        write!(f, "}}")
    }
}

impl Ruleset {
    /// Parses `selector { ... }`.
    /// Misplaced or missing braces never fail; they only clear `is_valid`.
    pub fn new(text: &str) -> Self {
        let text = text.trim();
        let is_valid = Self::has_balanced_braces(text);

        let (selector, rest) = match text.find(|c: char| c == '{' || c == '}') {
            Some(i) => (&text[..i], &text[i..]),
            None => (text, ""),
        };

        let declaration_block = if is_valid {
            DeclarationBlock::new(rest)
        } else {
            warn!("invalid ruleset, misplaced braces: {:?}", text);
            // Best effort: whatever follows the selector, with the stray braces dropped.
            let rest = rest.replace(|c: char| c == '{' || c == '}', "");
            DeclarationBlock::new(&rest)
        };

        Self {
            selector: selector.trim().to_string(),
            declaration_block,
            is_valid,
        }
    }

    /// Returns each selector of the comma-separated selector list.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        split_top_level(&self.selector, ',')
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    pub fn specificity(&self) -> SpecificityScore {
        SpecificityScore::from_selector(&self.selector)
    }

    /// Whether the ruleset sets a foreground or background color.
    pub fn is_color_ruleset(&self) -> bool {
        self.declaration_block.has_property("color")
            || self.declaration_block.has_property("background-color")
    }

    /// An opening brace must come first and every brace must be closed.
    fn has_balanced_braces(text: &str) -> bool {
        let mut depth = 0usize;
        let mut opened = false;

        for c in text.chars() {
            match c {
                '{' => {
                    depth += 1;
                    opened = true;
                }
                '}' => {
                    if depth == 0 {
                        return false;
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }
        opened && depth == 0
    }
}
