//! Mock newsletter signup: validates the email field and plays a short
//! confirmation on the submit button. Nothing is sent anywhere.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use super::timer::{Scheduler, TaskHandle};
use crate::css::selector::query_path;
use crate::dom::{DomNode, NodePath};

pub const FORM_SELECTOR: &str = ".c-newsletter";
pub const INPUT_SELECTOR: &str = "input[type='email']";
pub const BUTTON_SELECTOR: &str = "button";
pub const ERROR_CLASS: &str = "is-error";
pub const CONFIRM_GLYPH: &str = "✓";
/// How long the error state stays on the form.
pub const ERROR_CLEAR_MS: u64 = 900;
/// How long the submit button stays disabled after a signup.
pub const RESTORE_MS: u64 = 1200;

/// The HTML "valid email address" production.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

/// Deferred newsletter work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewsletterTask {
    ClearError,
    RestoreSubmit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No newsletter form, or it lacks an email input or a button.
    Ignored,
    /// The email failed validation; the form shows its error state.
    Invalid,
    /// The email was accepted and the field cleared.
    Accepted,
}

#[derive(Debug)]
struct PendingRestore {
    task: TaskHandle,
    /// Button content from before the first unrestored submission.
    saved: Vec<DomNode>,
}

#[derive(Debug, Default)]
pub struct Newsletter {
    error_task: Option<TaskHandle>,
    restore: Option<PendingRestore>,
}

/// Email-input validity: empty is valid unless the field is required.
pub fn is_valid_email_input(value: &str, required: bool) -> bool {
    let value = value.trim();
    if value.is_empty() {
        return !required;
    }
    EMAIL_RE.is_match(value)
}

struct FormParts {
    form: NodePath,
    input: NodePath,
    button: NodePath,
}

fn locate(document: &DomNode) -> Option<FormParts> {
    let form = query_path(document, FORM_SELECTOR)?;
    let form_node = document.node_at(&form)?;
    let input_rel = query_path(form_node, INPUT_SELECTOR)?;
    let button_rel = query_path(form_node, BUTTON_SELECTOR)?;
    let input = [form.as_slice(), input_rel.as_slice()].concat();
    let button = [form.as_slice(), button_rel.as_slice()].concat();
    Some(FormParts {
        form,
        input,
        button,
    })
}

impl Newsletter {
    /// Returns `None` when the page has no newsletter form.
    pub fn setup(document: &DomNode) -> Option<Self> {
        query_path(document, FORM_SELECTOR).map(|_| Self::default())
    }

    /// Whether the submit button is waiting to be restored.
    pub fn restore_pending(&self) -> bool {
        self.restore.is_some()
    }

    /// Handle a submit event. A new submission replaces any pending task of
    /// the same kind, and the button is always restored to the content it
    /// had before the first unrestored submission.
    pub fn submit(
        &mut self,
        document: &mut DomNode,
        scheduler: &mut Scheduler<NewsletterTask>,
    ) -> SubmitOutcome {
        let Some(parts) = locate(document) else {
            debug!("newsletter form incomplete, submit ignored");
            return SubmitOutcome::Ignored;
        };

        let (value, required) = match document.node_at(&parts.input) {
            Some(input) => (
                input.get_attr("value").unwrap_or_default().to_string(),
                input.has_attr("required"),
            ),
            None => return SubmitOutcome::Ignored,
        };

        if !is_valid_email_input(&value, required) {
            if let Some(form) = document.node_at_mut(&parts.form) {
                form.add_class(ERROR_CLASS);
            }
            if let Some(previous) = self.error_task.take() {
                scheduler.cancel(previous);
            }
            self.error_task = Some(scheduler.schedule(ERROR_CLEAR_MS, NewsletterTask::ClearError));
            debug!("newsletter email rejected");
            return SubmitOutcome::Invalid;
        }

        let Some(button) = document.node_at_mut(&parts.button) else {
            return SubmitOutcome::Ignored;
        };
        let saved = match self.restore.take() {
            Some(pending) => {
                scheduler.cancel(pending.task);
                pending.saved
            }
            None => button.children.clone(),
        };
        button.set_attr("disabled", "");
        button.set_text_content(CONFIRM_GLYPH);

        if let Some(input) = document.node_at_mut(&parts.input) {
            input.set_attr("value", "");
        }

        let task = scheduler.schedule(RESTORE_MS, NewsletterTask::RestoreSubmit);
        self.restore = Some(PendingRestore { task, saved });
        info!("newsletter signup accepted");
        SubmitOutcome::Accepted
    }

    /// Run a task that became due.
    pub fn run(&mut self, document: &mut DomNode, task: NewsletterTask) {
        let Some(parts) = locate(document) else {
            return;
        };
        match task {
            NewsletterTask::ClearError => {
                self.error_task = None;
                if let Some(form) = document.node_at_mut(&parts.form) {
                    form.remove_class(ERROR_CLASS);
                }
            }
            NewsletterTask::RestoreSubmit => {
                let Some(pending) = self.restore.take() else {
                    return;
                };
                if let Some(button) = document.node_at_mut(&parts.button) {
                    button.remove_attr("disabled");
                    button.replace_children(pending.saved);
                }
            }
        }
    }
}
