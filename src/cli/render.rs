//! Plain-text rendering of pages and forms. Coloring happens in `output`.

use crate::flow::{FlowCoordinator, Page};
use crate::form::{FieldDescriptor, FormEngine, FormField};

const KEY_WIDTH: usize = 19;

/// One line per field, followed by its visible error or else its help.
pub fn form_lines(engine: &FormEngine) -> Vec<String> {
    let state = engine.state();
    let mut lines = Vec::new();
    for descriptor in &engine.descriptor().fields {
        let Some(field) = state.field(descriptor.key) else {
            continue;
        };
        lines.extend(field_lines(descriptor, field));
    }
    lines
}

pub fn field_lines(descriptor: &FieldDescriptor, field: &FormField) -> Vec<String> {
    let marker = if field.touched { '*' } else { ' ' };
    let value = if field.value.is_empty() {
        "-".to_string()
    } else {
        format!("\"{}\"", field.value)
    };
    let optional = if descriptor.required { "" } else { " (optional)" };
    let mut lines = vec![format!(
        "{marker} {:<KEY_WIDTH$} {:<9} {value}{optional}",
        descriptor.key,
        format!("[{}]", descriptor.kind),
    )];
    if let Some(error) = field.visible_error() {
        lines.push(format!("  {:<KEY_WIDTH$} ! {error}", ""));
    } else if let Some(help) = descriptor.help {
        lines.push(format!("  {:<KEY_WIDTH$} ? {help}", ""));
    }
    lines
}

pub fn page_title(flow: &FlowCoordinator) -> String {
    let convert = if flow.convert_immediately() { "on" } else { "off" };
    format!("{} (convert immediately: {convert})", flow.page())
}

/// Pages reachable from the task list.
pub fn task_lines(flow: &FlowCoordinator) -> Vec<String> {
    Page::ALL
        .iter()
        .filter_map(|page| flow.form(*page).map(|form| (page, form)))
        .map(|(page, form)| {
            let state = form.state();
            let filled = state
                .fields
                .values()
                .filter(|field| !field.value.is_empty())
                .count();
            format!("{:<14} {filled}/{} filled", page.title(), state.fields.len())
        })
        .collect()
}

/// Prompt prefix for the interactive shell.
pub fn prompt(page: Page) -> String {
    let slug = match page {
        Page::Tasks => "tasks",
        Page::BasicDetails => "basic",
        Page::Address => "address",
    };
    format!("kana-entry[{slug}]> ")
}
