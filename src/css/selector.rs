use std::fmt;

/// The (id, class, type) specificity of a selector list, summed over every selector in it.
/// https://www.w3.org/TR/selectors-3/#specificity
///
/// The derived ordering compares ids first, then classes, then types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpecificityScore {
    pub id_count: usize,
    pub class_count: usize,
    pub type_count: usize,
}

/// Renders `"{id}{class}{type}"`, e.g. `"303"`.
/// If any count has more than one digit, the counts are comma-separated instead (`"0,12,1"`)
/// so that the output stays unambiguous.
impl fmt::Display for SpecificityScore {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.id_count < 10 && self.class_count < 10 && self.type_count < 10 {
            write!(f, "{}{}{}", self.id_count, self.class_count, self.type_count)
        } else {
            write!(f, "{},{},{}", self.id_count, self.class_count, self.type_count)
        }
    }
}

impl SpecificityScore {
    /// Scores a comma-separated selector list in a single scan.
    ///
    /// - ids: each `#`
    /// - classes: each `.name`, each `[...]` and each single-colon pseudo-class
    /// - types: each element name not preceded by `#`, `.` or `:`
    ///
    /// Anything inside `[...]` or `(...)` is skipped, as are pseudo-elements (`::name`).
    pub fn from_selector(selector: &str) -> Self {
        let chars = selector.chars().collect::<Vec<char>>();
        let mut score = Self::default();
        let mut brackets = 0usize;
        let mut parentheses = 0usize;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            match c {
                '[' => {
                    if brackets == 0 && parentheses == 0 {
                        score.class_count += 1;
                    }
                    brackets += 1;
                }
                ']' => brackets = brackets.saturating_sub(1),
                _ if brackets > 0 => {}
                '(' => parentheses += 1,
                ')' => parentheses = parentheses.saturating_sub(1),
                _ if parentheses > 0 => {}
                '#' => score.id_count += 1,
                '.' => {
                    if chars.get(i + 1).is_some_and(|&n| is_name_char(n)) {
                        score.class_count += 1;
                    }
                }
                ':' => {
                    if chars.get(i + 1) == Some(&':') {
                        // Pseudo-element, not scored.
                        i += 2;
                        continue;
                    }
                    score.class_count += 1;
                }
                c if is_name_char(c) => {
                    let prev = i.checked_sub(1).map(|p| chars[p]);
                    let starts_with_letter = c.is_ascii_alphabetic();
                    while i < chars.len() && is_name_char(chars[i]) {
                        i += 1;
                    }
                    if starts_with_letter && !matches!(prev, Some('#' | '.' | ':')) {
                        score.type_count += 1;
                    }
                    continue;
                }
                _ => {}
            }
            i += 1;
        }

        score
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c >= '\u{0080}'
}

/// Returns the number of id selectors in the selector list.
pub fn get_id_score(selector: &str) -> usize {
    SpecificityScore::from_selector(selector).id_count
}

/// Returns the number of class, attribute and pseudo-class selectors in the selector list.
pub fn get_class_score(selector: &str) -> usize {
    SpecificityScore::from_selector(selector).class_count
}

/// Returns the number of type (element) selectors in the selector list.
pub fn get_type_score(selector: &str) -> usize {
    SpecificityScore::from_selector(selector).type_count
}

/// Returns the specificity as `"{id}{class}{type}"`.
pub fn get_specificity(selector: &str) -> String {
    SpecificityScore::from_selector(selector).to_string()
}

/// Whether `token` starts with a vendor prefix such as `-webkit-`, `-moz-`, `-ms-` or `-o-`.
pub fn has_vendor_prefix(token: &str) -> bool {
    let Some(rest) = token.strip_prefix('-') else {
        return false;
    };
    let vendor_len = rest.chars().take_while(char::is_ascii_alphanumeric).count();
    vendor_len > 0 && rest[vendor_len..].starts_with('-')
}
