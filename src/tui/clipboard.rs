//! Copy text to the system clipboard through the platform's CLI tool.

use std::io::Write;
use std::process::{Command, Stdio};

type ClipboardCommand = (&'static str, &'static [&'static str]);

const MACOS_COMMANDS: &[ClipboardCommand] = &[("pbcopy", &[])];
const WINDOWS_COMMANDS: &[ClipboardCommand] = &[("clip", &[])];
const UNIX_COMMANDS: &[ClipboardCommand] = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Clipboard commands to try, in order, for this platform.
const fn clipboard_commands() -> &'static [ClipboardCommand] {
    if cfg!(target_os = "macos") {
        MACOS_COMMANDS
    } else if cfg!(target_os = "windows") {
        WINDOWS_COMMANDS
    } else {
        UNIX_COMMANDS
    }
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> std::io::Result<bool> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    Ok(child.wait()?.success())
}

/// Copy text to the clipboard. Returns the tool that succeeded.
pub fn copy_to_clipboard(text: &str) -> Option<&'static str> {
    clipboard_commands()
        .iter()
        .find(|(program, args)| pipe_to(program, args, text).unwrap_or(false))
        .map(|(program, _)| *program)
}
