use std::io::IsTerminal;

/// Sink for user-facing informational output.
///
/// Passed explicitly to anything that prints, so tests can capture what
/// would have been shown.
pub trait Console {
    fn print(&mut self, line: &str);

    /// Whether lines may carry ANSI color codes
    fn use_colors(&self) -> bool {
        false
    }
}

/// Console writing to stdout
pub struct StdoutConsole {
    colors: bool,
}

impl StdoutConsole {
    pub fn new(colors: bool) -> Self {
        Self { colors }
    }
}

impl Console for StdoutConsole {
    fn print(&mut self, line: &str) {
        println!("{}", line);
    }

    fn use_colors(&self) -> bool {
        self.colors
    }
}

/// Console that keeps every printed line in memory
#[derive(Debug, Default)]
pub struct BufferConsole {
    pub lines: Vec<String>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Console for BufferConsole {
    fn print(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}
