use kentry_text::to_full_width;

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::form::FieldKind;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "normalize",
            "Convert text to full width",
            "normalize <text>",
            cmd_normalize,
        ),
        CommandEntry::new(
            "check",
            "Check text against a field kind",
            "check <text|kanji|katakana|roman|street|postal> <text>",
            cmd_check,
        ),
    ]
}

fn cmd_normalize(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: normalize <text>".into(),
        ));
    }
    io::print_info(to_full_width(&args.join(" ")));
    Ok(())
}

fn cmd_check(_context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((kind, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: check <kind> <text>".into(),
        ));
    };
    let kind: FieldKind = kind.parse().map_err(CommandError::InvalidArguments)?;
    let text = rest.join(" ");

    if text.is_empty() {
        io::print_warning("Nothing to check.");
    } else if kind.accepts(&text) {
        io::print_success(format!("valid {kind} text"));
    } else {
        io::print_error(rejection_line(kind));
    }
    Ok(())
}

fn rejection_line(kind: FieldKind) -> String {
    match kind.rejection() {
        Some(message) => format!("invalid {kind} text. {} [{}]", message.text(), message.key()),
        None => format!("invalid {kind} text."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_name_the_catalog_key() {
        assert_eq!(
            rejection_line(FieldKind::Katakana),
            "invalid katakana text. Ensure valid Full Width Katakana used only. [errorKatakana]"
        );
        assert_eq!(
            rejection_line(FieldKind::RomanAddress),
            "invalid street text. Ensure only roman letters and digits used only. [errorRomanAddress]"
        );
        assert_eq!(rejection_line(FieldKind::Text), "invalid text text.");
    }
}
