use log::trace;

/// Comments and code of a CSS source, each in order of appearance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeparatedCode {
    /// Every `/* ... */` span, delimiters included.
    pub comments: Vec<String>,
    /// The non-blank runs of code between comments, trimmed.
    pub code: Vec<String>,
}

/// Splits `text` into its comments and the runs of code found between them.
pub fn separate_code(text: &str) -> SeparatedCode {
    let mut separated = SeparatedCode::default();
    let mut rest = text;

    loop {
        let (code, comment, remainder) = split_at_comment(rest);
        let code = code.trim();
        if !code.is_empty() {
            separated.code.push(code.to_string());
        }
        match comment {
            Some(comment) => separated.comments.push(comment.to_string()),
            None => break,
        }
        rest = remainder;
    }

    separated
}

/// Returns the comments of `text` along with the whole text with every comment removed.
pub fn strip_comments(text: &str) -> (Vec<String>, String) {
    let mut comments = Vec::new();
    let mut code = String::with_capacity(text.len());
    let mut rest = text;

    loop {
        let (before, comment, remainder) = split_at_comment(rest);
        code.push_str(before);
        match comment {
            Some(comment) => comments.push(comment.to_string()),
            None => break,
        }
        rest = remainder;
    }

    (comments, code)
}

/// Splits comment-free code into `selector { ... }` fragments at top-level brace boundaries.
///
/// A `}` with no matching `{` does not close a fragment, so malformed rules stay in one piece
/// and can be flagged by the ruleset parser. Only at-rules nest blocks: a `{` opening inside a
/// plain ruleset starts the next fragment after the last `;`, `{` or `}` before it. Non-blank
/// text after the last closed block is returned as a final fragment.
pub fn split_rule_blocks(code: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut in_at_rule = false;

    for (i, c) in code.char_indices() {
        match c {
            '{' if depth == 0 => {
                in_at_rule = code[start..i].trim_start().starts_with('@');
                depth = 1;
            }
            '{' if in_at_rule => depth += 1,
            '{' => {
                if let Some(offset) =
                    code[start..i].rfind(|c: char| c == ';' || c == '{' || c == '}')
                {
                    let cut = start + offset + 1;
                    trace!("unclosed ruleset before {:?}", code[cut..i].trim());
                    push_non_blank(&mut blocks, &code[start..cut]);
                    start = cut;
                }
                depth = 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    push_non_blank(&mut blocks, &code[start..=i]);
                    start = i + 1;
                    in_at_rule = false;
                }
            }
            _ => {}
        }
    }
    push_non_blank(&mut blocks, &code[start..]);

    trace!("split {} rule block(s)", blocks.len());
    blocks
}

/// Splits `text` on `separator`, ignoring separators nested in parentheses, brackets or quotes.
/// e.g.) `url(data:image/png;base64,...)` is never cut at its `;`.
pub(crate) fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

/// Returns the code before the first comment, the comment itself, and the text after it.
/// An unterminated comment runs to the end of the text.
fn split_at_comment(text: &str) -> (&str, Option<&str>, &str) {
    let Some(start) = text.find("/*") else {
        return (text, None, "");
    };
    match text[start + 2..].find("*/") {
        Some(offset) => {
            let end = start + 2 + offset + 2;
            (&text[..start], Some(&text[start..end]), &text[end..])
        }
        None => (&text[..start], Some(&text[start..]), ""),
    }
}

fn push_non_blank(blocks: &mut Vec<String>, fragment: &str) {
    let fragment = fragment.trim();
    if !fragment.is_empty() {
        blocks.push(fragment.to_string());
    }
}
