use regex::Regex;

use crate::error::Result;

/// An optionally vendor-prefixed gradient function name followed by its opening parenthesis.
const GRADIENT_PATTERN: &str = r"(?i)(-[a-z]+-)?(?:repeating-)?(?:linear|radial)-gradient\(";
/// `rgb(...)` or `rgba(...)` color literals. Hex and named colors are not extracted.
const RGB_COLOR_PATTERN: &str = r"(?i)rgba?\([^()]*\)";

/// Whether `value` contains a linear or radial gradient call, with or without a vendor prefix.
pub fn is_gradient(value: &str) -> bool {
    let value = value.to_ascii_lowercase();
    value.contains("linear-gradient(") || value.contains("radial-gradient(")
}

/// Scans `text` for gradient calls.
///
/// Returns whether any of them is vendor-prefixed, and the distinct `rgb()`/`rgba()` colors used
/// in their arguments, in order of first appearance.
pub fn process_gradient(text: &str) -> Result<(bool, Vec<String>)> {
    let gradient = Regex::new(GRADIENT_PATTERN)?;
    let rgb_color = Regex::new(RGB_COLOR_PATTERN)?;

    let mut has_vendor_prefix = false;
    let mut colors: Vec<String> = Vec::new();

    for captures in gradient.captures_iter(text) {
        let Some(call) = captures.get(0) else {
            continue;
        };
        has_vendor_prefix |= captures.get(1).is_some();

        let arguments = &text[call.end()..find_closing_parenthesis(text, call.end())];
        for color in rgb_color.find_iter(arguments) {
            if !colors.iter().any(|c| c == color.as_str()) {
                colors.push(color.as_str().to_string());
            }
        }
    }

    Ok((has_vendor_prefix, colors))
}

/// Returns the index of the `)` closing a call whose arguments start at `start`,
/// or the end of the text if it is never closed.
fn find_closing_parenthesis(text: &str, start: usize) -> usize {
    let mut depth = 1usize;
    for (i, b) in text.bytes().enumerate().skip(start) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return i;
                }
            }
            _ => {}
        }
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const INSANE_GRADIENT: &str = r#"
-moz-radial-gradient(0% 200%, ellipse cover, rgba(143, 193, 242, 0.22) 10%,rgba(240, 205, 247,0) 40%),
-webkit-radial-gradient(0% 200%, ellipse cover, rgba(143, 193, 242, 0.22) 10%,rgba(240, 205, 247,0) 40%),
-o-radial-gradient(0% 200%, ellipse cover, rgba(143, 193, 242, 0.22) 10%,rgba(240, 205, 247,0) 40%),
-ms-radial-gradient(0% 200%, ellipse cover, rgba(143, 193, 242, 0.22) 10%,rgba(240, 205, 247,0) 40%),
radial-gradient(0% 200%, ellipse cover, rgba(143, 193, 242, 0.22) 10%,rgba(240, 205, 247,0) 40%),
-moz-linear-gradient(top, rgba(169, 235, 206,.25) 0%, rgba(42,60,87,.4) 200%),
-ms-linear-gradient(-45deg, #46ABA6 0%, #092756 200%)',
linear-gradient(-45deg, #46ABA6 0%, #092756 200%)'
"#;

    #[test]
    fn is_gradient_for_plain_color() {
        assert!(!is_gradient("rgba(155, 155, 155, 0)"));
    }

    #[test]
    fn is_gradient_for_prefixed_gradients() {
        let value = "-moz-radial-gradient(0% 200%, ellipse cover, rgba(143, 193, 242, 0.22) 10%,rgba(240, 205, 247,0) 40%),-moz-linear-gradient(top, rgba(169, 235, 206,.25) 0%, rgba(42,60,87,.4) 200%), -moz-linear-gradient(-45deg, #46ABA6 0%, #092756 200%)";
        assert!(is_gradient(value));
        assert!(is_gradient("Linear-Gradient(to right, red, blue)"));
    }

    #[test]
    fn process_gradient_detects_vendor_prefix() {
        let (has_vendor_prefix, _) = process_gradient(INSANE_GRADIENT).unwrap();
        assert!(has_vendor_prefix);
    }

    #[test]
    fn process_gradient_returns_four_unique_colors() {
        let (_, colors) = process_gradient(INSANE_GRADIENT).unwrap();
        assert_eq!(
            colors,
            vec![
                "rgba(143, 193, 242, 0.22)",
                "rgba(240, 205, 247,0)",
                "rgba(169, 235, 206,.25)",
                "rgba(42,60,87,.4)",
            ]
        );
    }

    #[test]
    fn process_gradient_without_prefix() {
        let (has_vendor_prefix, colors) = process_gradient(
            "repeating-linear-gradient(45deg, rgb(0, 0, 0) 0 10px, rgb(255, 255, 255) 10px 20px)",
        )
        .unwrap();
        assert!(!has_vendor_prefix);
        assert_eq!(colors, vec!["rgb(0, 0, 0)", "rgb(255, 255, 255)"]);
    }

    #[test]
    fn process_gradient_ignores_colors_outside_gradients() {
        let (has_vendor_prefix, colors) =
            process_gradient("rgba(1, 2, 3, 0.5) linear-gradient(red, blue)").unwrap();
        assert!(!has_vendor_prefix);
        assert!(colors.is_empty());
    }
}
