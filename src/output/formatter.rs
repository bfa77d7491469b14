use owo_colors::OwoColorize;

/// Heading printed before the board filter hints
pub const BOARD_HEADING: &str = "Opening the Azure board. Make sure to filter on:";

/// Format one board filter hint line: "\titeration = 'Sprint 1'"
pub fn format_filter_hint(name: &str, value: &str, use_colors: bool) -> String {
    if use_colors {
        format!("\t{} = '{}'", name, value.cyan())
    } else {
        format!("\t{} = '{}'", name, value)
    }
}

/// Format the line shown after a link was handed to the browser
pub fn format_opening(url: &str, use_colors: bool) -> String {
    if use_colors {
        format!("Opening {}", url.underline())
    } else {
        format!("Opening {}", url)
    }
}

/// Format the notice for a repository without pipelines
pub fn format_no_pipelines(repo_name: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{} has no pipelines defined currently", repo_name.bold())
    } else {
        format!("{} has no pipelines defined currently", repo_name)
    }
}
