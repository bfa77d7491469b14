pub mod console;
pub mod formatter;

pub use console::{should_use_colors, BufferConsole, Console, StdoutConsole};
pub use formatter::{format_filter_hint, format_no_pipelines, format_opening, BOARD_HEADING};
