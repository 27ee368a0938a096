//! Terminal output helpers
//!
//! Renders the profile screen (main frame, actions and thumbnail strip) as
//! text and provides the writer used when logging goes to both stderr and
//! a file.

use crate::core::reconcile::DisplayState;
use crate::store::PhotoReference;
use crate::ui::{Notice, NoticeLevel};
use std::io::Write;

/// Render the main frame and the actions that apply to it
pub fn format_display(display: &DisplayState) -> String {
    let mut out = String::new();

    match &display.shown_photo {
        Some(photo) if display.is_unsaved => {
            out.push_str(&format!("Showing: {} (not saved)\n", photo));
        }
        Some(photo) => out.push_str(&format!("Showing: {}\n", photo)),
        None => out.push_str("No photo yet. Pick or take one to get started.\n"),
    }

    let mut actions = Vec::new();
    if display.show_save_action {
        actions.push("save");
    }
    if display.show_delete_action {
        actions.push("remove");
    }
    if !actions.is_empty() {
        out.push_str(&format!("Actions: {}\n", actions.join(", ")));
    }

    out
}

/// Render the thumbnail strip, highlighting the shown photo
pub fn format_photo_list(photos: &[PhotoReference], display: &DisplayState) -> String {
    if photos.is_empty() {
        return "No saved photos.\n".to_string();
    }

    let mut out = format!("Saved photos ({}):\n", photos.len());
    for (i, photo) in photos.iter().enumerate() {
        let marker = if display.is_highlighted(photo) { "▶" } else { " " };
        out.push_str(&format!("{} {:2}. {}\n", marker, i + 1, photo));
    }
    out
}

/// Print the whole screen to stdout
pub fn print_screen(display: &DisplayState, photos: &[PhotoReference]) {
    println!();
    print!("{}", format_display(display));
    print!("{}", format_photo_list(photos, display));
}

/// Print a notice, errors to stderr
pub fn print_notice(notice: &Notice) {
    match notice.level {
        NoticeLevel::Success => println!("✓ {}", notice),
        NoticeLevel::Info => println!("ℹ {}", notice),
        NoticeLevel::Error => eprintln!("✗ {}", notice),
    }
}

/// Writer that mirrors log output to stderr and a log file
pub struct DualWriter {
    pub console: std::io::Stderr,
    pub file: std::fs::File,
}

impl Write for DualWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let _ = self.console.write(buf);
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let _ = self.console.flush();
        self.file.flush()
    }
}
