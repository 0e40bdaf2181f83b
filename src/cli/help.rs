//! `help` pages. Commands are listed by where they can be used.

use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::flow::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    Shell,
    Navigation,
    FormPages,
    AddressPage,
    TextTools,
}

impl CommandGroup {
    pub const ALL: [CommandGroup; 5] = [
        CommandGroup::Shell,
        CommandGroup::Navigation,
        CommandGroup::FormPages,
        CommandGroup::AddressPage,
        CommandGroup::TextTools,
    ];

    pub fn title(self) -> &'static str {
        match self {
            CommandGroup::Shell => "Anywhere",
            CommandGroup::Navigation => "Moving between pages",
            CommandGroup::FormPages => "On Basic Details and Address",
            CommandGroup::AddressPage => "On Address",
            CommandGroup::TextTools => "Text tools",
        }
    }

    /// Group a command is listed under. Unlisted names fall back to `Shell`.
    pub fn of(command: &str) -> CommandGroup {
        match command {
            "tasks" | "start" | "next" | "back" => CommandGroup::Navigation,
            "show" | "set" | "blur" | "reset" => CommandGroup::FormPages,
            "postal" | "submit" => CommandGroup::AddressPage,
            "normalize" | "check" => CommandGroup::TextTools,
            _ => CommandGroup::Shell,
        }
    }

    /// Whether the group is tied to `page` rather than usable everywhere.
    pub fn is_for(self, page: Page) -> bool {
        match self {
            CommandGroup::FormPages => page != Page::Tasks,
            CommandGroup::AddressPage => page == Page::Address,
            _ => false,
        }
    }
}

/// Overview lines: a heading per non-empty group, then its commands.
pub fn overview_lines(registry: &CommandRegistry, page: Page) -> Vec<String> {
    let entries = registry.list();
    let mut lines = Vec::new();
    for group in CommandGroup::ALL {
        let members: Vec<&&CommandEntry> = entries
            .iter()
            .filter(|entry| CommandGroup::of(entry.name) == group)
            .collect();
        if members.is_empty() {
            continue;
        }
        let marker = if group.is_for(page) { " (this page)" } else { "" };
        lines.push(format!("{}{marker}:", group.title()));
        lines.extend(
            members
                .iter()
                .map(|entry| format!("  {:<10} {}", entry.name, entry.description)),
        );
    }
    lines
}

pub fn print_overview(registry: &CommandRegistry, page: Page) {
    output_section(format!("Available commands ({page})"));
    for line in overview_lines(registry, page) {
        io::print_info(line);
    }
    io::print_info("Use `help <command>` for details.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    io::print_info(format!("  {}", entry.description));
    io::print_info(format!("  Usage: {}", entry.usage));
    io::print_info(format!("  Where: {}", CommandGroup::of(entry.name).title()));
}
