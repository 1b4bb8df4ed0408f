//! # Drafts and Validation
//!
//! A draft is the unvalidated payload of a form. Multi-step forms validate
//! one step at a time; submission re-validates every step. All functions
//! here are pure.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::error::FieldError;
use crate::models::{ComplaintCategory, Priority, ReportKind, UserProfile};

/// Minimum length for free-text bodies (descriptions, note content).
pub const MIN_BODY_LEN: usize = 10;

fn require(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{field} is required")));
    }
}

fn require_min(errors: &mut Vec<FieldError>, field: &'static str, value: &str, min: usize) {
    require(errors, field, value);
    if !value.trim().is_empty() && value.trim().chars().count() < min {
        errors.push(FieldError::new(
            field,
            format!("{field} must be at least {min} characters"),
        ));
    }
}

fn finish(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// The complaint form's submission steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplaintStep {
    /// Title, description, category, priority.
    Details,
    /// Where the problem is.
    Location,
    /// Who filed it and how to reach them.
    Contact,
}

#[derive(Debug, Clone, Default)]
pub struct ComplaintDraft {
    pub title: String,
    pub description: String,
    pub category: Option<ComplaintCategory>,
    pub location: String,
    pub priority: Priority,
    pub reporter_name: String,
    pub contact: String,
}

impl ComplaintDraft {
    /// Pre-fills the fields derivable from the acting user so the form
    /// starts populated.
    pub fn prefill(user: &UserProfile) -> Self {
        Self {
            reporter_name: user.full_name.clone(),
            contact: user.email.clone(),
            ..Self::default()
        }
    }

    pub fn validate_step(&self, step: ComplaintStep) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        match step {
            ComplaintStep::Details => {
                require(&mut errors, "title", &self.title);
                require_min(&mut errors, "description", &self.description, MIN_BODY_LEN);
                if self.category.is_none() {
                    errors.push(FieldError::new("category", "category is required"));
                }
            }
            ComplaintStep::Location => {
                require(&mut errors, "location", &self.location);
            }
            ComplaintStep::Contact => {
                require(&mut errors, "reporter_name", &self.reporter_name);
                require(&mut errors, "contact", &self.contact);
            }
        }
        finish(errors)
    }

    /// Re-validates every step, accumulating all failures.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        for step in [
            ComplaintStep::Details,
            ComplaintStep::Location,
            ComplaintStep::Contact,
        ] {
            if let Err(step_errors) = self.validate_step(step) {
                errors.extend(step_errors);
            }
        }
        finish(errors)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub course: Option<String>,
    pub tags: Vec<String>,
}

impl NoteDraft {
    pub fn prefill(user: &UserProfile) -> Self {
        Self {
            course: user.course.clone(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require(&mut errors, "title", &self.title);
        require_min(&mut errors, "content", &self.content, MIN_BODY_LEN);
        finish(errors)
    }
}

#[derive(Debug, Clone)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub event_date: DateTime<Utc>,
    pub max_volunteers: u32,
    pub skills_required: Vec<String>,
}

impl EventDraft {
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require(&mut errors, "title", &self.title);
        require_min(&mut errors, "description", &self.description, MIN_BODY_LEN);
        require(&mut errors, "location", &self.location);
        if self.max_volunteers == 0 {
            errors.push(FieldError::new(
                "max_volunteers",
                "max_volunteers must be at least 1",
            ));
        }
        finish(errors)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegistrationDraft {
    pub event_id: Uuid,
    pub availability: String,
    pub skills: Vec<String>,
    pub motivation: Option<String>,
}

impl RegistrationDraft {
    pub fn for_event(event_id: Uuid) -> Self {
        Self {
            event_id,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require(&mut errors, "availability", &self.availability);
        if self.skills.iter().all(|s| s.trim().is_empty()) {
            errors.push(FieldError::new("skills", "at least one skill is required"));
        }
        if let Some(motivation) = &self.motivation {
            require_min(&mut errors, "motivation", motivation, MIN_BODY_LEN);
        }
        finish(errors)
    }
}

#[derive(Debug, Clone)]
pub struct LostFoundDraft {
    pub report_kind: ReportKind,
    pub item_name: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub occurred_on: NaiveDate,
    pub contact: String,
}

impl LostFoundDraft {
    pub fn prefill(user: &UserProfile, report_kind: ReportKind) -> Self {
        Self {
            report_kind,
            item_name: String::new(),
            description: String::new(),
            category: String::new(),
            location: String::new(),
            occurred_on: Utc::now().date_naive(),
            contact: user.email.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require(&mut errors, "item_name", &self.item_name);
        require_min(&mut errors, "description", &self.description, MIN_BODY_LEN);
        require(&mut errors, "location", &self.location);
        require(&mut errors, "contact", &self.contact);
        finish(errors)
    }
}
