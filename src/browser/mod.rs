use anyhow::{Context, Result};
use std::fmt;

use crate::output;

/// Something that can show a URL to the user
pub trait Launcher {
    fn launch(&self, url: &str) -> Result<()>;

    /// Line printed once `launch` succeeded
    fn report(&self, url: &str, use_colors: bool) -> String {
        output::format_opening(url, use_colors)
    }
}

/// Launcher backed by the user's default browser
pub struct SystemBrowser;

impl Launcher for SystemBrowser {
    fn launch(&self, url: &str) -> Result<()> {
        open_url(url)
    }
}

/// Launcher that only prints the URL (`--print`)
pub struct PrintOnly;

impl Launcher for PrintOnly {
    fn launch(&self, _url: &str) -> Result<()> {
        Ok(())
    }

    fn report(&self, url: &str, _use_colors: bool) -> String {
        url.to_string()
    }
}

/// Error context marking a failure of the launch step itself,
/// as opposed to a failure while building the URL
#[derive(Debug)]
pub struct LaunchFailed {
    pub url: String,
}

impl fmt::Display for LaunchFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not open {}", self.url)
    }
}

/// True when `err` came from the launch step
pub fn is_launch_failure(err: &anyhow::Error) -> bool {
    err.downcast_ref::<LaunchFailed>().is_some()
}

/// Open a URL in the user's default browser
///
/// # Arguments
/// * `url` - The URL to open (e.g., a board or pull request link)
///
/// # Errors
/// Returns error if browser cannot be opened (e.g., no browser available)
pub fn open_url(url: &str) -> Result<()> {
    webbrowser::open(url)
        .with_context(|| format!("Failed to open browser for URL: {}", url))?;
    Ok(())
}
