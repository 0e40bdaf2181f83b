use crate::cli::commands::navigation::print_page;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;
use crate::schema::address;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("show", "Show the current page", "show", cmd_show),
        CommandEntry::new(
            "set",
            "Type a value into a field",
            "set <field> [value]",
            cmd_set,
        ),
        CommandEntry::new(
            "blur",
            "Enter a value and leave the field",
            "blur <field> [value]",
            cmd_blur,
        ),
        CommandEntry::new(
            "postal",
            "List postal codes or fill the address from one",
            "postal [code]",
            cmd_postal,
        ),
        CommandEntry::new("reset", "Clear the current form", "reset", cmd_reset),
        CommandEntry::new(
            "convert",
            "Show or switch full-width conversion while typing",
            "convert [on|off]",
            cmd_convert,
        ),
    ]
}

fn split_field_args<'a>(args: &[&'a str], usage: &str) -> Result<(&'a str, String), CommandError> {
    match args.split_first() {
        Some((field, rest)) => Ok((field, rest.join(" "))),
        None => Err(CommandError::InvalidArguments(format!("usage: {usage}"))),
    }
}

fn print_field(context: &ShellContext, key: &str) {
    let Some(form) = context.flow.active_form() else {
        return;
    };
    if let (Some(descriptor), Some(field)) = (form.descriptor().field(key), form.state().field(key)) {
        for line in render::field_lines(descriptor, field) {
            output::line(line);
        }
    }
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    print_page(&context.flow);
    Ok(())
}

fn cmd_set(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (field, value) = split_field_args(args, "set <field> [value]")?;
    context.flow.change(field, &value)?;
    print_field(context, field);
    Ok(())
}

fn cmd_blur(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (field, value) = split_field_args(args, "blur <field> [value]")?;
    context.flow.blur(field, &value)?;
    print_field(context, field);
    Ok(())
}

fn cmd_postal(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(code) = args.first() else {
        io::print_info("Known postal codes:");
        let options = context.flow.postal_options();
        for (option, entry) in options.iter().zip(address::directory()) {
            io::print_info(format!(
                "  {option}  {} {}",
                entry.prefecture_kanji, entry.city_kanji
            ));
        }
        return Ok(());
    };

    let entry = context.flow.select_postal_code(code)?;
    io::print_success(format!(
        "Address filled for {} ({}, {}).",
        entry.postal_code, entry.prefecture, entry.city
    ));
    print_page(&context.flow);
    Ok(())
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.flow.reset_active()?;
    io::print_success("Form cleared.");
    Ok(())
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" | "1" => Some(true),
        "off" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

fn cmd_convert(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        let state = if context.flow.convert_immediately() { "on" } else { "off" };
        io::print_info(format!("Convert to full width immediately: {state}"));
        return Ok(());
    };
    let enabled = parse_switch(raw)
        .ok_or_else(|| CommandError::InvalidArguments("usage: convert [on|off]".into()))?;

    if context.flow.set_convert_immediately(enabled)? {
        io::print_warning("Both forms were reset.");
    }
    context.config.convert_immediately = enabled;
    context.save_config()?;
    io::print_success(format!(
        "Convert to full width immediately: {}",
        if enabled { "on" } else { "off" }
    ));
    Ok(())
}
