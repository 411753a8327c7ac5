use console::style;

/// Styled terminal output for command results.
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// Indented `label: value` detail line under a section.
    pub fn detail(&self, label: &str, value: &str) {
        println!("  {} {}", style(format!("{label}:")).dim(), value);
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
