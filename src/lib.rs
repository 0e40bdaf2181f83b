#![doc(test(attr(deny(warnings))))]

//! Kana Entry drives a three-page Japanese name and address entry flow:
//! a reusable form engine, kind-tagged validation, half-width to full-width
//! normalization, and a line-oriented shell that renders it all.

pub mod cli;
pub mod errors;
pub mod flow;
pub mod form;
pub mod schema;
pub mod utils;

pub use kentry_text as text;

/// Initializes global tracing and emits a startup info log. Later calls are
/// no-ops.
///
/// `extra_directive` is appended to the default filter, typically from the
/// user's preferences.
pub fn init(extra_directive: Option<&str>) {
    utils::init_tracing(extra_directive);
}

#[cfg(test)]
mod tests {
    #[test]
    fn repeated_init_installs_one_subscriber() {
        super::init(None);
        super::init(Some("kana_entry=debug"));
        assert!(tracing::dispatcher::has_been_set());
    }
}
