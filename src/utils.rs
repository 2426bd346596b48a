use std::fmt;

use terminal_size::{terminal_size, Width};

use crate::app::VerbosityLevel;

/// A trait for printing reports with different verbosity levels.
pub trait PrintableReport
where
    Self: fmt::Display,
{
    fn print(&self, verbosity: VerbosityLevel) {
        match verbosity {
            VerbosityLevel::Normal | VerbosityLevel::Quiet => {
                if let Some((Width(w), _)) = terminal_size() {
                    for line in self.to_string().lines() {
                        println!("{}", truncate_line(line, w as usize));
                    }
                } else {
                    println!("{}", self);
                }
            }
            VerbosityLevel::Verbose => println!("{}", self),
        }
    }

    fn print_in_chain(&self, verbosity: VerbosityLevel) -> &Self {
        self.print(verbosity);
        println!("\n===============\n");
        self
    }
}

impl<T: fmt::Display> PrintableReport for T {}

/// Cuts `line` to `width` characters, marking the cut with `...`.
fn truncate_line(line: &str, width: usize) -> String {
    if line.chars().count() <= width {
        return line.to_string();
    }
    let kept = line.chars().take(width.saturating_sub(3)).collect::<String>();
    format!("{}...", kept)
}
