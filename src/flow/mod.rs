//! Page navigation and the coordinator that owns both forms.

use std::fmt;

use chrono::{DateTime, Utc};
use kentry_text::to_full_width;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::FlowError;
use crate::form::{FormEngine, FormState};
use crate::schema::{address, basic_details, AddressEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Tasks,
    BasicDetails,
    Address,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Tasks, Page::BasicDetails, Page::Address];

    pub fn title(self) -> &'static str {
        match self {
            Page::Tasks => "Tasks",
            Page::BasicDetails => "Basic Details",
            Page::Address => "Address",
        }
    }

    pub fn next(self) -> Option<Page> {
        match self {
            Page::Tasks => Some(Page::BasicDetails),
            Page::BasicDetails => Some(Page::Address),
            Page::Address => None,
        }
    }

    pub fn previous(self) -> Option<Page> {
        match self {
            Page::Tasks => None,
            Page::BasicDetails => Some(Page::Tasks),
            Page::Address => Some(Page::BasicDetails),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub page: Page,
}

impl Default for PageState {
    fn default() -> Self {
        Self { page: Page::Tasks }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    GoTo(Page),
}

pub fn page_reducer(_state: PageState, action: PageAction) -> PageState {
    match action {
        PageAction::GoTo(page) => PageState { page },
    }
}

/// Snapshot of both forms taken when the flow is submitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub submitted_at: DateTime<Utc>,
    pub basic_details: FormState,
    pub address: FormState,
}

/// Drives the three-page flow and owns both form engines.
///
/// The coordinator never blocks navigation on validation errors; the view
/// consults [`FlowCoordinator::has_visible_errors`] for that.
#[derive(Debug)]
pub struct FlowCoordinator {
    page: PageState,
    convert_immediately: bool,
    basic_details: FormEngine,
    address: FormEngine,
    last_submission: Option<Submission>,
}

impl FlowCoordinator {
    pub fn new(convert_immediately: bool) -> Result<Self, FlowError> {
        Ok(Self {
            page: PageState::default(),
            convert_immediately,
            basic_details: basic_details::engine(convert_immediately)?,
            address: address::engine(convert_immediately)?,
            last_submission: None,
        })
    }

    pub fn page(&self) -> Page {
        self.page.page
    }

    pub fn convert_immediately(&self) -> bool {
        self.convert_immediately
    }

    pub fn basic_details(&self) -> &FormEngine {
        &self.basic_details
    }

    pub fn address(&self) -> &FormEngine {
        &self.address
    }

    pub fn last_submission(&self) -> Option<&Submission> {
        self.last_submission.as_ref()
    }

    pub fn go_to(&mut self, page: Page) -> Page {
        let from = self.page.page;
        self.page = page_reducer(self.page, PageAction::GoTo(page));
        if from != page {
            info!(from = %from, to = %page, "page changed");
        }
        self.page.page
    }

    /// Moves one page forward; stays put on the last page.
    pub fn next(&mut self) -> Page {
        match self.page().next() {
            Some(page) => self.go_to(page),
            None => self.page(),
        }
    }

    /// Moves one page back; stays put on the first page.
    pub fn back(&mut self) -> Page {
        match self.page().previous() {
            Some(page) => self.go_to(page),
            None => self.page(),
        }
    }

    /// Switches the convert-immediately preference. A change rebuilds both
    /// forms from scratch. Returns whether anything changed.
    pub fn set_convert_immediately(&mut self, enabled: bool) -> Result<bool, FlowError> {
        if self.convert_immediately == enabled {
            return Ok(false);
        }
        self.basic_details = basic_details::engine(enabled)?;
        self.address = address::engine(enabled)?;
        self.convert_immediately = enabled;
        info!(enabled, "convert immediately toggled; forms reset");
        Ok(true)
    }

    pub fn form(&self, page: Page) -> Option<&FormEngine> {
        match page {
            Page::Tasks => None,
            Page::BasicDetails => Some(&self.basic_details),
            Page::Address => Some(&self.address),
        }
    }

    pub fn active_form(&self) -> Option<&FormEngine> {
        self.form(self.page())
    }

    /// Form shown on the current page, or `WrongPage` on the task list.
    pub fn active_form_mut(&mut self) -> Result<&mut FormEngine, FlowError> {
        match self.page() {
            Page::Tasks => Err(FlowError::WrongPage {
                expected: Page::BasicDetails,
                actual: Page::Tasks,
            }),
            Page::BasicDetails => Ok(&mut self.basic_details),
            Page::Address => Ok(&mut self.address),
        }
    }

    pub fn change(&mut self, field: &str, value: &str) -> Result<&FormState, FlowError> {
        Ok(self.active_form_mut()?.on_change(field, value)?)
    }

    pub fn blur(&mut self, field: &str, value: &str) -> Result<&FormState, FlowError> {
        Ok(self.active_form_mut()?.on_blur(field, value)?)
    }

    /// Restores the active form to its initial state.
    pub fn reset_active(&mut self) -> Result<&FormState, FlowError> {
        Ok(self.active_form_mut()?.reset(None)?)
    }

    pub fn postal_options(&self) -> Vec<String> {
        address::postal_options(self.convert_immediately)
    }

    pub fn select_postal_code(&mut self, code: &str) -> Result<&'static AddressEntry, FlowError> {
        self.expect_page(Page::Address)?;
        address::autofill(&mut self.address, code)
    }

    /// Whether the given page's form shows any error to the user.
    pub fn has_visible_errors(&self, page: Page) -> bool {
        self.form(page)
            .map(|form| form.state().has_visible_errors())
            .unwrap_or(false)
    }

    /// Normalizes every script field of both forms, records the result and
    /// returns to the task list.
    pub fn submit(&mut self) -> Result<Submission, FlowError> {
        self.expect_page(Page::Address)?;

        normalize_scripts(&mut self.basic_details)?;
        normalize_scripts(&mut self.address)?;

        let submission = Submission {
            submitted_at: Utc::now(),
            basic_details: self.basic_details.state().clone(),
            address: self.address.state().clone(),
        };
        self.last_submission = Some(submission.clone());
        info!(
            basic_details = %self.basic_details.id(),
            address = %self.address.id(),
            "entry submitted"
        );
        self.go_to(Page::Tasks);
        Ok(submission)
    }

    fn expect_page(&self, expected: Page) -> Result<(), FlowError> {
        let actual = self.page();
        if actual == expected {
            Ok(())
        } else {
            Err(FlowError::WrongPage { expected, actual })
        }
    }
}

/// Widens the values of the engine's script fields, keeping `touched` and
/// `error` as they were.
fn normalize_scripts(engine: &mut FormEngine) -> Result<(), FlowError> {
    let mut state = engine.state().clone();
    for descriptor in &engine.descriptor().fields {
        if !descriptor.kind.converts_to_full_width() {
            continue;
        }
        if let Some(field) = state.fields.get_mut(descriptor.key) {
            field.value = to_full_width(&field.value);
        }
    }
    engine.reset(Some(state))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::address::{CITY, CITY_KANJI, POSTAL_CODE};
    use crate::schema::basic_details::{FIRST_NAME_KANJI, LAST_NAME, LAST_NAME_KATAKANA};

    #[test]
    fn reducer_jumps_to_any_page() {
        for from in Page::ALL {
            for to in Page::ALL {
                let next = page_reducer(PageState { page: from }, PageAction::GoTo(to));
                assert_eq!(next.page, to);
            }
        }
    }

    #[test]
    fn next_and_back_walk_the_pages() {
        let mut flow = FlowCoordinator::new(false).unwrap();
        assert_eq!(flow.page(), Page::Tasks);
        assert_eq!(flow.back(), Page::Tasks);
        assert_eq!(flow.next(), Page::BasicDetails);
        assert_eq!(flow.next(), Page::Address);
        assert_eq!(flow.next(), Page::Address);
        assert_eq!(flow.back(), Page::BasicDetails);
        assert_eq!(flow.back(), Page::Tasks);
    }

    #[test]
    fn forms_are_not_editable_from_the_task_list() {
        let mut flow = FlowCoordinator::new(false).unwrap();
        assert!(matches!(
            flow.change(LAST_NAME, "Yamada"),
            Err(FlowError::WrongPage { actual: Page::Tasks, .. })
        ));
        assert!(flow.active_form().is_none());
    }

    #[test]
    fn visible_errors_track_touched_fields() {
        let mut flow = FlowCoordinator::new(false).unwrap();
        flow.next();
        flow.change(FIRST_NAME_KANJI, "").unwrap();
        assert!(!flow.has_visible_errors(Page::BasicDetails));

        flow.blur(FIRST_NAME_KANJI, "").unwrap();
        assert!(flow.has_visible_errors(Page::BasicDetails));
        assert!(!flow.has_visible_errors(Page::Tasks));
    }

    #[test]
    fn toggle_rebuilds_forms() {
        let mut flow = FlowCoordinator::new(false).unwrap();
        flow.next();
        flow.change(LAST_NAME_KATAKANA, "ﾔﾏﾀ").unwrap();
        let old_id = flow.basic_details().id();

        assert!(flow.set_convert_immediately(true).unwrap());
        assert!(!flow.set_convert_immediately(true).unwrap());
        assert_ne!(flow.basic_details().id(), old_id);
        assert_eq!(flow.basic_details().state().value(LAST_NAME_KATAKANA), Some(""));

        flow.change(LAST_NAME_KATAKANA, "ﾔﾏﾀ").unwrap();
        assert_eq!(flow.basic_details().state().value(LAST_NAME_KATAKANA), Some("ヤマタ"));
    }

    #[test]
    fn postal_selection_requires_the_address_page() {
        let mut flow = FlowCoordinator::new(false).unwrap();
        assert_eq!(
            flow.select_postal_code("530-0001").unwrap_err(),
            FlowError::WrongPage {
                expected: Page::Address,
                actual: Page::Tasks,
            }
        );
    }

    #[test]
    fn submit_widens_script_fields_and_returns_to_tasks() {
        let mut flow = FlowCoordinator::new(false).unwrap();
        flow.next();
        flow.blur(LAST_NAME_KATAKANA, "ﾔﾏﾀ").unwrap();
        flow.blur(LAST_NAME, "Yamada").unwrap();
        flow.next();
        flow.select_postal_code("249-0005").unwrap();

        let submission = flow.submit().unwrap();

        assert_eq!(flow.page(), Page::Tasks);
        assert_eq!(submission.basic_details.value(LAST_NAME_KATAKANA), Some("ヤマタ"));
        assert_eq!(submission.basic_details.value(LAST_NAME), Some("Yamada"));
        assert_eq!(submission.address.value(POSTAL_CODE), Some("２４９－０００５"));
        assert_eq!(submission.address.value(CITY_KANJI), Some("逗子市"));
        assert_eq!(submission.address.value(CITY), Some("Zushi"));

        let katakana = submission.basic_details.field(LAST_NAME_KATAKANA).unwrap();
        assert!(katakana.touched);
        assert_eq!(katakana.error, None);
        assert!(submission.address.field(POSTAL_CODE).unwrap().touched);
        assert_eq!(flow.last_submission(), Some(&submission));
        assert_eq!(flow.basic_details().state(), &submission.basic_details);
    }

    #[test]
    fn submit_keeps_stale_errors() {
        let mut flow = FlowCoordinator::new(false).unwrap();
        flow.go_to(Page::Address);
        flow.blur(POSTAL_CODE, "53").unwrap();

        let submission = flow.submit().unwrap();

        let postal = submission.address.field(POSTAL_CODE).unwrap();
        assert_eq!(postal.value, "５３");
        assert!(postal.error.is_some());
    }

    #[test]
    fn submit_is_only_available_on_the_address_page() {
        let mut flow = FlowCoordinator::new(false).unwrap();
        flow.next();
        assert!(matches!(
            flow.submit(),
            Err(FlowError::WrongPage {
                expected: Page::Address,
                actual: Page::BasicDetails,
            })
        ));
        assert!(flow.last_submission().is_none());
    }
}
