//! State of one task editing session.
//!
//! A [`TaskEditor`] is created when the modal opens and dropped when it closes. It holds
//! the working copy of the task, the edited subtask list and the staged attachment
//! previews. Nothing is sent anywhere until [`TaskEditor::begin_submit`] hands a
//! snapshot to the caller.

use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::subtask_editor::SubtaskEditor;
use crate::backend::ReferenceData;
use crate::config::SessionConfig;
use crate::constants::{VALIDATION_ASSIGNEE_REQUIRED, VALIDATION_STATUS_REQUIRED, VALIDATION_TITLE_REQUIRED};
use crate::entities::{generate_id, Attachment, Comment, Priority, Tag, Task, TaskSnapshot};
use crate::preview::PreviewStore;
use crate::ui::components::text_input::TextInput;
use crate::utils::datetime::step_date;
use crate::utils::format::{format_file_size, guess_file_type};

/// Who is editing: author of new comments and uploader of new attachments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    pub user_id: String,
    pub user_name: String,
}

impl SessionIdentity {
    pub fn new(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(config.user_id.clone(), config.user_name.clone())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Details,
    Subtasks,
    Comments,
    Attachments,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Details, Tab::Subtasks, Tab::Comments, Tab::Attachments];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Details => "Details",
            Tab::Subtasks => "Subtasks",
            Tab::Comments => "Comments",
            Tab::Attachments => "Attachments",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Editable fields of the Details tab, in focus order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Description,
    Priority,
    Assignee,
    Team,
    Status,
    StartDate,
    DueDate,
    Estimate,
    Tags,
}

impl FormField {
    pub const DETAILS: [FormField; 10] = [
        FormField::Title,
        FormField::Description,
        FormField::Priority,
        FormField::Assignee,
        FormField::Team,
        FormField::Status,
        FormField::StartDate,
        FormField::DueDate,
        FormField::Estimate,
        FormField::Tags,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Priority => "Priority",
            FormField::Assignee => "Assignee",
            FormField::Team => "Team",
            FormField::Status => "Status",
            FormField::StartDate => "Start Date",
            FormField::DueDate => "Due Date",
            FormField::Estimate => "Estimate (minutes)",
            FormField::Tags => "Tags",
        }
    }

    fn index(self) -> usize {
        Self::DETAILS.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::DETAILS[(self.index() + 1) % Self::DETAILS.len()]
    }

    pub fn previous(self) -> Self {
        Self::DETAILS[(self.index() + Self::DETAILS.len() - 1) % Self::DETAILS.len()]
    }
}

/// Validation messages keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(HashMap<FormField, String>);

impl FieldErrors {
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn set(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Where keys go on the list tabs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListFocus {
    #[default]
    Input,
    List,
}

/// Result of attaching a batch of files
#[derive(Debug, Default)]
pub struct AttachOutcome {
    /// Ids of the new attachments, in selection order
    pub added: Vec<String>,
    /// Paths that could not be read, with the reason
    pub skipped: Vec<(PathBuf, String)>,
}

pub struct TaskEditor {
    pub(super) task: Task,
    pub(super) subtasks: Vec<Task>,
    pub(super) subtasks_loading: bool,
    pub(super) subtasks_collapsed: bool,
    pub(super) reference: Arc<ReferenceData>,
    pub(super) session: SessionIdentity,
    pub(super) tab: Tab,
    pub(super) focus: FormField,
    pub(super) list_focus: ListFocus,
    pub(super) title_input: TextInput,
    pub(super) description_input: TextInput,
    pub(super) estimate_input: TextInput,
    pub(super) comment_input: TextInput,
    pub(super) subtask_input: TextInput,
    pub(super) attach_input: TextInput,
    pub(super) tag_candidate: usize,
    pub(super) subtask_cursor: usize,
    pub(super) attachment_cursor: usize,
    pub(super) subtask_editor: Option<SubtaskEditor>,
    pub(super) errors: FieldErrors,
    pub(super) submitting: bool,
    pub(super) previews: PreviewStore,
}

impl TaskEditor {
    /// Start a session on `task`. Subtasks arrive later through [`Self::seed_subtasks`].
    pub fn open(task: Task, reference: Arc<ReferenceData>, session: SessionIdentity) -> Self {
        let title_input = TextInput::with_value(task.title.clone());
        let description_input = TextInput::with_value(task.description.clone());
        let estimate_input = TextInput::with_value(task.time_estimation.map(|m| m.to_string()).unwrap_or_default());

        Self {
            task,
            subtasks: Vec::new(),
            subtasks_loading: true,
            subtasks_collapsed: false,
            reference,
            session,
            tab: Tab::Details,
            focus: FormField::Title,
            list_focus: ListFocus::Input,
            title_input,
            description_input,
            estimate_input,
            comment_input: TextInput::new(),
            subtask_input: TextInput::new(),
            attach_input: TextInput::new(),
            tag_candidate: 0,
            subtask_cursor: 0,
            attachment_cursor: 0,
            subtask_editor: None,
            errors: FieldErrors::default(),
            submitting: false,
            previews: PreviewStore::new(),
        }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn task_id(&self) -> &str {
        &self.task.id
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    pub fn session(&self) -> &SessionIdentity {
        &self.session
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    // Tabs and focus

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.list_focus = ListFocus::Input;
        }
    }

    pub fn next_tab(&mut self) {
        self.set_tab(self.tab.next());
    }

    pub fn previous_tab(&mut self) {
        self.set_tab(self.tab.previous());
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn set_focus(&mut self, field: FormField) {
        self.focus = field;
    }

    pub fn list_focus(&self) -> ListFocus {
        self.list_focus
    }

    // Details

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title_input.set_value(title);
        self.sync_title();
    }

    pub(super) fn sync_title(&mut self) {
        self.task.title = self.title_input.value().to_string();
        self.errors.clear(FormField::Title);
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description_input.set_value(description);
        self.sync_description();
    }

    pub(super) fn sync_description(&mut self) {
        self.task.description = self.description_input.value().to_string();
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.task.priority = priority;
    }

    pub fn set_assignee(&mut self, user_id: Option<String>) {
        self.task.assigned_to = user_id;
        self.errors.clear(FormField::Assignee);
    }

    pub fn cycle_assignee(&mut self, forward: bool) {
        let ids: Vec<&str> = self.reference.users.iter().map(|u| u.id.as_str()).collect();
        let next = cycle_option(self.task.assigned_to.as_deref(), &ids, forward);
        self.set_assignee(next);
    }

    pub fn set_team(&mut self, team_id: Option<String>) {
        self.task.team_id = team_id;
    }

    pub fn cycle_team(&mut self, forward: bool) {
        let ids: Vec<&str> = self.reference.teams.iter().map(|t| t.id.as_str()).collect();
        let next = cycle_option(self.task.team_id.as_deref(), &ids, forward);
        self.set_team(next);
    }

    /// Set the list status; the display title follows the identifier.
    pub fn set_status(&mut self, list_status_id: Option<String>) {
        self.task.list_status = self
            .reference
            .list_status_title(list_status_id.as_deref())
            .map(str::to_string);
        self.task.list_status_id = list_status_id;
        self.errors.clear(FormField::Status);
    }

    pub fn cycle_status(&mut self, forward: bool) {
        let ids: Vec<&str> = self.reference.list_statuses.iter().map(|s| s.id.as_str()).collect();
        let next = cycle_option(self.task.list_status_id.as_deref(), &ids, forward);
        self.set_status(next);
    }

    pub fn set_start_date(&mut self, date: Option<NaiveDate>) {
        self.task.start_date = date;
    }

    pub fn set_due_date(&mut self, date: Option<NaiveDate>) {
        self.task.due_date = date;
    }

    pub fn step_start_date(&mut self, days: i64) {
        self.task.start_date = Some(step_date(self.task.start_date, days));
    }

    pub fn step_due_date(&mut self, days: i64) {
        self.task.due_date = Some(step_date(self.task.due_date, days));
    }

    pub fn set_estimate(&mut self, minutes: Option<u32>) {
        self.estimate_input
            .set_value(minutes.map(|m| m.to_string()).unwrap_or_default());
        self.task.time_estimation = minutes;
    }

    /// Re-read the estimate from its input. Returns false if the digits overflow.
    pub(super) fn sync_estimate(&mut self) -> bool {
        let value = self.estimate_input.value();
        if value.is_empty() {
            self.task.time_estimation = None;
            return true;
        }
        match value.parse::<u32>() {
            Ok(minutes) => {
                self.task.time_estimation = Some(minutes);
                true
            }
            Err(_) => false,
        }
    }

    // Tags

    pub fn selected_tag_ids(&self) -> Vec<&str> {
        self.task.tags.iter().map(|t| t.id.as_str()).collect()
    }

    /// Reference tags that are not selected yet, in reference order
    pub fn available_tags(&self) -> Vec<&Tag> {
        self.reference
            .tags
            .iter()
            .filter(|tag| !self.task.tags.iter().any(|t| t.id == tag.id))
            .collect()
    }

    /// Append a reference tag. Unknown or already selected ids are ignored.
    pub fn add_tag(&mut self, tag_id: &str) -> bool {
        if self.task.tags.iter().any(|t| t.id == tag_id) {
            return false;
        }
        let Some(tag) = self.reference.tag(tag_id).cloned() else {
            return false;
        };
        self.task.tags.push(tag);
        self.clamp_tag_candidate();
        true
    }

    pub fn remove_tag(&mut self, tag_id: &str) -> bool {
        let before = self.task.tags.len();
        self.task.tags.retain(|t| t.id != tag_id);
        before != self.task.tags.len()
    }

    pub fn tag_candidate(&self) -> Option<&Tag> {
        self.available_tags().get(self.tag_candidate).copied()
    }

    pub(super) fn cycle_tag_candidate(&mut self, forward: bool) {
        let count = self.available_tags().len();
        if count == 0 {
            self.tag_candidate = 0;
            return;
        }
        self.tag_candidate = if forward {
            (self.tag_candidate + 1) % count
        } else {
            (self.tag_candidate + count - 1) % count
        };
    }

    fn clamp_tag_candidate(&mut self) {
        let count = self.available_tags().len();
        if self.tag_candidate >= count {
            self.tag_candidate = count.saturating_sub(1);
        }
    }

    // Comments

    pub fn comment_input(&self) -> &str {
        self.comment_input.value()
    }

    pub fn set_comment_input(&mut self, text: impl Into<String>) {
        self.comment_input.set_value(text);
    }

    /// Append the typed comment as the session user. Whitespace-only input is ignored.
    pub fn add_comment(&mut self) -> bool {
        if self.comment_input.value().trim().is_empty() {
            return false;
        }
        let text = self.comment_input.take();
        let comment = Comment::new(&self.task.id, &text, &self.session.user_name);
        self.task.comments.push(comment);
        true
    }

    // Subtasks

    pub fn subtasks(&self) -> &[Task] {
        &self.subtasks
    }

    pub fn subtasks_loading(&self) -> bool {
        self.subtasks_loading
    }

    /// Install the subtasks loaded for this task, keeping any added in the meantime.
    pub fn seed_subtasks(&mut self, loaded: Vec<Task>) {
        let local: Vec<Task> = std::mem::take(&mut self.subtasks)
            .into_iter()
            .filter(|local| !loaded.iter().any(|t| t.id == local.id))
            .collect();
        self.subtasks = loaded;
        self.subtasks.extend(local);
        self.subtasks_loading = false;
        self.clamp_subtask_cursor();
    }

    pub fn subtask_load_failed(&mut self) {
        self.subtasks_loading = false;
    }

    pub fn subtask_input(&self) -> &str {
        self.subtask_input.value()
    }

    pub fn set_subtask_input(&mut self, text: impl Into<String>) {
        self.subtask_input.set_value(text);
    }

    /// Create a subtask from the typed title. It inherits status, assignee, list
    /// status and team from the task as currently edited.
    pub fn add_subtask(&mut self) -> Option<&Task> {
        if self.subtask_input.value().trim().is_empty() {
            return None;
        }
        let title = self.subtask_input.take();
        let subtask = Task {
            id: generate_id(),
            title,
            description: String::new(),
            priority: Priority::Medium,
            status: self.task.status.clone(),
            assigned_to: self.task.assigned_to.clone(),
            team_id: self.task.team_id.clone(),
            list_status_id: self.task.list_status_id.clone(),
            list_status: self.task.list_status.clone(),
            parent_id: Some(self.task.id.clone()),
            ..Default::default()
        };
        self.subtasks.push(subtask);
        self.subtasks.last()
    }

    pub fn remove_subtask(&mut self, subtask_id: &str) -> bool {
        let before = self.subtasks.len();
        self.subtasks.retain(|t| t.id != subtask_id);
        let removed = before != self.subtasks.len();
        if removed {
            self.clamp_subtask_cursor();
        }
        removed
    }

    /// Move one subtask to the next or previous list status. Other subtasks are untouched.
    pub fn cycle_subtask_status(&mut self, subtask_id: &str, forward: bool) -> bool {
        let ids: Vec<&str> = self.reference.list_statuses.iter().map(|s| s.id.as_str()).collect();
        let Some(subtask) = self.subtasks.iter_mut().find(|t| t.id == subtask_id) else {
            return false;
        };
        let next = cycle_option(subtask.list_status_id.as_deref(), &ids, forward);
        subtask.list_status = self.reference.list_status_title(next.as_deref()).map(str::to_string);
        subtask.list_status_id = next;
        true
    }

    pub fn subtasks_collapsed(&self) -> bool {
        self.subtasks_collapsed
    }

    pub fn toggle_subtasks_collapsed(&mut self) {
        self.subtasks_collapsed = !self.subtasks_collapsed;
    }

    pub fn selected_subtask(&self) -> Option<&Task> {
        self.subtasks.get(self.subtask_cursor)
    }

    pub(super) fn move_subtask_cursor(&mut self, down: bool) {
        if self.subtasks.is_empty() {
            return;
        }
        self.subtask_cursor = if down {
            (self.subtask_cursor + 1).min(self.subtasks.len() - 1)
        } else {
            self.subtask_cursor.saturating_sub(1)
        };
    }

    fn clamp_subtask_cursor(&mut self) {
        self.subtask_cursor = self.subtask_cursor.min(self.subtasks.len().saturating_sub(1));
    }

    /// Open the nested editor on a subtask
    pub fn open_subtask(&mut self, subtask_id: &str) -> bool {
        match self.subtasks.iter().find(|t| t.id == subtask_id) {
            Some(subtask) => {
                self.subtask_editor = Some(SubtaskEditor::new(subtask, &self.task));
                true
            }
            None => false,
        }
    }

    pub fn subtask_editor(&self) -> Option<&SubtaskEditor> {
        self.subtask_editor.as_ref()
    }

    pub fn subtask_editor_mut(&mut self) -> Option<&mut SubtaskEditor> {
        self.subtask_editor.as_mut()
    }

    /// Replace the matching subtask with the nested editor's copy
    pub fn save_subtask(&mut self, edited: Task) -> bool {
        match self.subtasks.iter_mut().find(|t| t.id == edited.id) {
            Some(existing) => {
                *existing = edited;
                true
            }
            None => false,
        }
    }

    pub fn close_subtask_editor(&mut self) {
        self.subtask_editor = None;
    }

    // Attachments

    pub fn attachments(&self) -> &[Attachment] {
        &self.task.attachments
    }

    pub fn attach_input(&self) -> &str {
        self.attach_input.value()
    }

    pub fn set_attach_input(&mut self, text: impl Into<String>) {
        self.attach_input.set_value(text);
    }

    /// Attach every comma-separated path typed into the picker
    pub fn attach_from_input(&mut self) -> AttachOutcome {
        let paths: Vec<PathBuf> = self
            .attach_input
            .value()
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .collect();
        let outcome = self.attach_files(&paths);
        // Keep only what failed so a retry does not attach the rest twice
        let remaining: Vec<String> = outcome
            .skipped
            .iter()
            .map(|(path, _)| path.display().to_string())
            .collect();
        self.attach_input.set_value(remaining.join(", "));
        outcome
    }

    /// Create one attachment per readable file, staging a preview copy for each.
    pub fn attach_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> AttachOutcome {
        let mut outcome = AttachOutcome::default();

        for path in paths {
            let path = path.as_ref();
            match self.attach_file(path) {
                Ok(id) => outcome.added.push(id),
                Err(e) => {
                    log::warn!("Skipping attachment {}: {:#}", path.display(), e);
                    outcome.skipped.push((path.to_path_buf(), e.to_string()));
                }
            }
        }

        outcome
    }

    fn attach_file(&mut self, path: &Path) -> anyhow::Result<String> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            anyhow::bail!("not a regular file");
        }

        let id = generate_id();
        let preview = self.previews.stage(&id, path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.task.attachments.push(Attachment {
            id: id.clone(),
            task_id: self.task.id.clone(),
            file_name,
            file_size: format_file_size(metadata.len()),
            file_type: guess_file_type(path),
            uploaded_by: Some(self.session.user_id.clone()),
            uploaded_at: Utc::now(),
            url: Some(preview.to_string_lossy().into_owned()),
        });
        Ok(id)
    }

    /// Drop an attachment and its staged preview
    pub fn remove_attachment(&mut self, attachment_id: &str) -> bool {
        let before = self.task.attachments.len();
        self.task.attachments.retain(|a| a.id != attachment_id);
        let removed = before != self.task.attachments.len();
        if removed {
            self.previews.release(attachment_id);
            self.attachment_cursor = self
                .attachment_cursor
                .min(self.task.attachments.len().saturating_sub(1));
        }
        removed
    }

    /// What to hand the system opener for an attachment: the staged copy or its URL
    pub fn preview_target(&self, attachment_id: &str) -> Option<String> {
        if let Some(path) = self.previews.path(attachment_id) {
            return Some(path.to_string_lossy().into_owned());
        }
        self.task
            .attachments
            .iter()
            .find(|a| a.id == attachment_id)
            .and_then(|a| a.url.clone())
    }

    pub fn previews(&self) -> &PreviewStore {
        &self.previews
    }

    pub fn selected_attachment(&self) -> Option<&Attachment> {
        self.task.attachments.get(self.attachment_cursor)
    }

    pub(super) fn move_attachment_cursor(&mut self, down: bool) {
        let count = self.task.attachments.len();
        if count == 0 {
            return;
        }
        self.attachment_cursor = if down {
            (self.attachment_cursor + 1).min(count - 1)
        } else {
            self.attachment_cursor.saturating_sub(1)
        };
    }

    // Submission

    /// Check required fields, recording a message for each violation.
    pub fn validate(&mut self) -> bool {
        self.errors = FieldErrors::default();
        if self.task.title.trim().is_empty() {
            self.errors.set(FormField::Title, VALIDATION_TITLE_REQUIRED);
        }
        if self.task.assigned_to.is_none() {
            self.errors.set(FormField::Assignee, VALIDATION_ASSIGNEE_REQUIRED);
        }
        if self.task.list_status_id.is_none() {
            self.errors.set(FormField::Status, VALIDATION_STATUS_REQUIRED);
        }
        self.errors.is_empty()
    }

    /// Validate and, if that passes, mark the session as submitting and return the
    /// snapshot to send. Returns `None` while a submission is already in flight.
    pub fn begin_submit(&mut self) -> Option<TaskSnapshot> {
        if self.submitting {
            return None;
        }
        if !self.validate() {
            if let Some(field) = FormField::DETAILS.iter().find(|f| self.errors.get(**f).is_some()) {
                self.tab = Tab::Details;
                self.focus = *field;
            }
            return None;
        }
        self.submitting = true;
        Some(self.snapshot())
    }

    /// The update did not go through; allow another attempt.
    pub fn submit_failed(&mut self) {
        self.submitting = false;
    }

    /// The edited task and subtasks as they would be sent. Staged preview paths are
    /// left out; they stop existing when the session ends.
    pub fn snapshot(&self) -> TaskSnapshot {
        let mut task = self.task.clone();
        for attachment in &mut task.attachments {
            if self.previews.path(&attachment.id).is_some() {
                attachment.url = None;
            }
        }
        TaskSnapshot {
            task,
            subtasks: self.subtasks.clone(),
        }
    }

    /// End the session, deleting every staged preview.
    pub fn close(self) {
        if let Err(e) = self.previews.close() {
            log::warn!("{:#}", e);
        }
    }
}

/// Step through `[None, ids...]` starting from `current`.
pub(super) fn cycle_option(current: Option<&str>, ids: &[&str], forward: bool) -> Option<String> {
    let len = ids.len() + 1;
    let position = current
        .and_then(|c| ids.iter().position(|id| *id == c))
        .map(|i| i + 1)
        .unwrap_or(0);
    let next = if forward {
        (position + 1) % len
    } else {
        (position + len - 1) % len
    };
    next.checked_sub(1).map(|i| ids[i].to_string())
}
