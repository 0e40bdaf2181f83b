use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{self, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::cli::render;
use crate::flow::{FlowCoordinator, Page};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("tasks", "Return to the task list", "tasks", cmd_tasks),
        CommandEntry::new("start", "Open the basic details form", "start", cmd_start),
        CommandEntry::new(
            "next",
            "Continue to the next page",
            "next",
            cmd_next,
        ),
        CommandEntry::new("back", "Return to the previous page", "back", cmd_back),
        CommandEntry::new(
            "submit",
            "Normalize and submit both forms",
            "submit",
            cmd_submit,
        ),
    ]
}

/// Prints the current page: the task list or the active form.
pub(crate) fn print_page(flow: &FlowCoordinator) {
    output_section(render::page_title(flow));
    match flow.active_form() {
        Some(form) => {
            for line in render::form_lines(form) {
                output::line(line);
            }
        }
        None => {
            for line in render::task_lines(flow) {
                io::print_info(format!("  {line}"));
            }
            io::print_info("Use `start` to fill in your details.");
        }
    }
}

fn ensure_no_visible_errors(flow: &FlowCoordinator, page: Page) -> CommandResult {
    if flow.has_visible_errors(page) {
        return Err(CommandError::Blocked(format!(
            "{page} has fields with errors."
        )));
    }
    Ok(())
}

fn cmd_tasks(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.flow.go_to(Page::Tasks);
    print_page(&context.flow);
    Ok(())
}

fn cmd_start(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.flow.go_to(Page::BasicDetails);
    print_page(&context.flow);
    Ok(())
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let current = context.flow.page();
    if current == Page::Address {
        io::print_info("This is the last page. Use `submit` when you are done.");
        return Ok(());
    }
    ensure_no_visible_errors(&context.flow, current)?;
    context.flow.next();
    print_page(&context.flow);
    Ok(())
}

fn cmd_back(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.flow.back();
    print_page(&context.flow);
    Ok(())
}

fn cmd_submit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.flow.page() == Page::Address {
        ensure_no_visible_errors(&context.flow, Page::BasicDetails)?;
        ensure_no_visible_errors(&context.flow, Page::Address)?;
    }
    let submission = context.flow.submit()?;

    io::print_success(format!(
        "Submitted at {}.",
        submission.submitted_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    let summary = serde_json::json!({
        "basicDetails": submission.basic_details.values(),
        "address": submission.address.values(),
    });
    output::line(serde_json::to_string_pretty(&summary)?);
    Ok(())
}
