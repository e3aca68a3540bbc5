use anyhow::{Context, Result};
use colored::*;
use dialoguer::Input;

/// Where local signaling text goes and remote text comes from.
pub trait Clipboard {
    fn copy(&self, label: &str, text: &str) -> Result<()>;

    fn paste(&self, prompt: &str) -> Result<String>;
}

/// Prints copied text in a frame and reads pasted text line by line until
/// an empty line, so multi-line plain SDP survives the trip.
pub struct TerminalClipboard;

impl Clipboard for TerminalClipboard {
    fn copy(&self, label: &str, text: &str) -> Result<()> {
        println!("{}", frame(label, text).green());
        println!(
            "{}",
            format!("Send the {label} above to your peer.").cyan().bold()
        );
        Ok(())
    }

    fn paste(&self, prompt: &str) -> Result<String> {
        println!("{}", format!("{prompt} (finish with an empty line):").cyan().bold());

        let mut lines = Vec::new();
        loop {
            let line = Input::<String>::new()
                .allow_empty(true)
                .report(false)
                .interact_text()
                .context("Failed to read pasted text")?;
            if line.trim().is_empty() {
                if lines.is_empty() {
                    continue;
                }
                break;
            }
            lines.push(line);
        }
        Ok(lines.join("\n"))
    }
}

pub fn frame(label: &str, text: &str) -> String {
    let label = label.to_uppercase();
    format!(
        "----- BEGIN {label} -----\n{}\n----- END {label} -----",
        text.trim_end()
    )
}
