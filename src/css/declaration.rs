use std::fmt;

use log::warn;

use crate::css::gradient;
use crate::css::selector;
use crate::css::separator::split_top_level;

/// A single `property: value;` statement.
#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
    pub is_valid: bool,
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.property, self.value)
    }
}

impl Declaration {
    /// Parses one declaration. Malformed input is never an error; it yields `is_valid == false`.
    pub fn new(text: &str) -> Self {
        let text = text.trim();

        let Some((property, rest)) = text.split_once(':') else {
            warn!("invalid declaration, missing ':': {:?}", text);
            return Self {
                property: text.trim_end_matches(';').trim().to_string(),
                value: String::new(),
                is_valid: false,
            };
        };

        // Everything after the first top-level `;` must be blank.
        let mut statements = split_top_level(rest, ';').into_iter();
        let value = statements.next().unwrap_or_default().trim();
        let has_trailing_tokens = statements.any(|s| !s.trim().is_empty());

        let property = property.trim();
        let is_valid = !property.is_empty() && !value.is_empty() && !has_trailing_tokens;
        if !is_valid {
            warn!("invalid declaration: {:?}", text);
        }

        Self {
            property: property.to_string(),
            value: value.to_string(),
            is_valid,
        }
    }

    pub fn has_vendor_prefix(&self) -> bool {
        selector::has_vendor_prefix(&self.property)
    }

    pub fn is_gradient(&self) -> bool {
        gradient::is_gradient(&self.value)
    }

    fn is_property(&self, property: &str) -> bool {
        self.property.eq_ignore_ascii_case(property)
    }
}

/// The ordered declarations of a `{ ... }` block, or of a bare block without braces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeclarationBlock {
    pub declarations: Vec<Declaration>,
    /// The raw body, without the enclosing braces.
    pub text: String,
}

impl DeclarationBlock {
    pub fn new(text: &str) -> Self {
        let body = match text.find('{') {
            Some(open) => {
                let inner = &text[open + 1..];
                match inner.rfind('}') {
                    Some(close) => &inner[..close],
                    None => inner,
                }
            }
            None => text,
        };

        let declarations = split_top_level(body, ';')
            .into_iter()
            .filter(|statement| !statement.trim().is_empty())
            .map(Declaration::new)
            .collect();

        Self {
            declarations,
            text: body.to_string(),
        }
    }

    /// Returns the last declaration of `property`, which is the one that wins within a block.
    pub fn get(&self, property: &str) -> Option<&Declaration> {
        self.declarations
            .iter()
            .rev()
            .find(|declaration| declaration.is_property(property))
    }

    pub fn has_property(&self, property: &str) -> bool {
        self.get(property).is_some()
    }
}
