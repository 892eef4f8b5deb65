use anyhow::{Context, Result, ensure};
use std::process::Command;

// ============================================================================
// External Links
// ============================================================================

// Hand a URL to the desktop's default browser
pub fn open_link(url: &str) -> Result<()> {
    ensure!(is_web_link(url), "refusing to open non-web link {url:?}");

    let mut command = opener_command(url);
    command
        .spawn()
        .with_context(|| format!("Failed to launch a browser for {url}"))?;
    Ok(())
}

#[must_use]
pub fn is_web_link(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

#[cfg(target_os = "windows")]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", url]);
    command
}

#[cfg(target_os = "macos")]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener_command(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_web_links_are_opened() {
        assert!(is_web_link("https://nihaalnazeer.com/"));
        assert!(is_web_link("http://localhost:8080"));
        assert!(!is_web_link("file:///etc/passwd"));
        assert!(!is_web_link("rm -rf"));
        assert!(open_link("javascript:alert(1)").is_err());
    }
}
