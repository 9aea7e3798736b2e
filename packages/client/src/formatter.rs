//! Message formatting utilities for terminal display.

use chrono::FixedOffset;
use kaiwa_shared::time::timestamp_to_clock_time;

use crate::view::LogEntry;

const PANEL_WIDTH: usize = 60;
const OWN_INDENT: &str = "                    ";

/// Message formatter for terminal display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Replace terminal control characters so that untrusted text cannot
    /// move the cursor or emit escape sequences. Tabs are kept.
    pub fn sanitize(text: &str) -> String {
        text.chars()
            .map(|c| {
                if c.is_control() && c != '\t' {
                    '\u{FFFD}'
                } else {
                    c
                }
            })
            .collect()
    }

    /// Format one log entry
    ///
    /// Bubbles from others are flush left, own bubbles are indented, system
    /// messages are centred.
    pub fn format_entry(entry: &LogEntry, offset: FixedOffset) -> String {
        let time = timestamp_to_clock_time(entry.appended_at(), offset);
        match entry {
            LogEntry::Bubble { own, content, .. } => {
                let indent = if *own { OWN_INDENT } else { "" };
                let label = Self::sanitize(entry.label().unwrap_or_default());
                format!(
                    "\n{indent}┌ {} · {}\n{indent}│ {}\n",
                    label,
                    time,
                    Self::sanitize(content)
                )
            }
            LogEntry::System { text, .. } => {
                let pill = format!("( {} )", Self::sanitize(text));
                format!("\n{:^width$}\n", pill, width = PANEL_WIDTH)
            }
        }
    }

    /// Format the logged-in indicator
    pub fn format_logged_in(username: &str) -> String {
        format!("Logged in as: {}\n", Self::sanitize(username))
    }

    /// Format the channel header shown when the active group changes
    pub fn format_channel_label(label: &str) -> String {
        format!(
            "\n{}\n{}\n{}\n",
            "=".repeat(PANEL_WIDTH),
            Self::sanitize(label),
            "=".repeat(PANEL_WIDTH)
        )
    }

    /// Format a notice that a group was added to the sidebar
    pub fn format_sidebar_entry_added(group: &str) -> String {
        format!("+ #{} added to your groups\n", Self::sanitize(group))
    }

    /// Format the sidebar listing
    ///
    /// # Arguments
    ///
    /// * `groups` - Joined groups in sidebar order
    /// * `current` - The active group, marked in the listing
    pub fn format_sidebar(groups: &[String], current: Option<&str>) -> String {
        let mut output = String::from("\nGroups:\n");
        if groups.is_empty() {
            output.push_str("(No groups joined, use /join)\n");
        }
        for group in groups {
            let marker = if Some(group.as_str()) == current {
                " (current)"
            } else {
                ""
            };
            output.push_str(&format!("  # {}{}\n", Self::sanitize(group), marker));
        }
        output
    }

    /// Format a blocking alert
    pub fn format_alert(text: &str) -> String {
        format!("\n[!] {}\n", Self::sanitize(text))
    }

    /// Format the command help
    pub fn format_help() -> String {
        "\nCommands:\n  \
         /join [group]           join a group (asks for the name when omitted)\n  \
         /group <group> <text>   post to a joined group without switching\n  \
         /switch <group>         show a joined group\n  \
         /groups                 list joined groups\n  \
         /help                   show this help\n  \
         /quit                   disconnect and exit\n\
         Anything else is sent to the current group.\n"
            .to_string()
    }
}
