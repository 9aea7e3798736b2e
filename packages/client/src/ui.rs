//! Terminal output for the client.

use std::io::Write;

use chrono::FixedOffset;
use kaiwa_shared::time::local_offset;

use crate::{formatter::MessageFormatter, view::ViewChange};

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[1;1H";

/// Where the chat panel is drawn
#[cfg_attr(test, mockall::automock)]
pub trait Screen: Send {
    /// Render one view mutation
    fn render(&mut self, change: &ViewChange);

    /// Show a notice the user must see
    fn alert(&mut self, text: &str);

    /// List the sidebar
    fn show_groups(&mut self, groups: &[String], current: Option<String>);

    fn show_help(&mut self);

    /// Remember the prompt currently shown so it can be redrawn after output
    fn set_prompt(&mut self, prompt: &str);
}

/// Screen that prints to stdout
pub struct TerminalScreen {
    offset: FixedOffset,
    prompt: String,
}

impl Default for TerminalScreen {
    fn default() -> Self {
        Self::new(local_offset())
    }
}

impl TerminalScreen {
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            prompt: String::new(),
        }
    }

    fn print(&self, text: &str) {
        print!("{}", text);
        redisplay_prompt(&self.prompt);
    }
}

impl Screen for TerminalScreen {
    fn render(&mut self, change: &ViewChange) {
        match change {
            ViewChange::LoginPromptHidden => {}
            ViewChange::LoggedIn(username) => {
                self.print(&MessageFormatter::format_logged_in(username))
            }
            ViewChange::ChannelLabel(label) => {
                self.print(&MessageFormatter::format_channel_label(label))
            }
            ViewChange::SidebarEntryAdded(group) => {
                self.print(&MessageFormatter::format_sidebar_entry_added(group))
            }
            ViewChange::LogCleared => {
                print!("{}", CLEAR_SCREEN);
                std::io::stdout().flush().ok();
            }
            ViewChange::Appended(entry) => {
                self.print(&MessageFormatter::format_entry(entry, self.offset))
            }
        }
    }

    fn alert(&mut self, text: &str) {
        self.print(&MessageFormatter::format_alert(text));
    }

    fn show_groups(&mut self, groups: &[String], current: Option<String>) {
        self.print(&MessageFormatter::format_sidebar(groups, current.as_deref()));
    }

    fn show_help(&mut self) {
        self.print(&MessageFormatter::format_help());
    }

    fn set_prompt(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
    }
}

/// Redisplay the prompt after printing output
pub fn redisplay_prompt(prompt: &str) {
    print!("{}", prompt);
    std::io::stdout().flush().ok();
}
