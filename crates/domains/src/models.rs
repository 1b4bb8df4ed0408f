//! # Domain Models
//!
//! These structs represent the core entities of Campus-Hub.
//! We use UUID v7 for time-ordered, globally unique identification.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The acting user, as supplied by the identity port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub roll_no: Option<String>,
    pub course: Option<String>,
    pub phone: Option<String>,
}

impl UserProfile {
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Student,
    Admin,
}

/// A grievance filed by a student against campus infrastructure or services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Complaint {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: ComplaintCategory,
    pub location: String,
    pub priority: Priority,
    pub status: ComplaintStatus,
    pub reporter_name: String,
    pub contact: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplaintCategory {
    Hostel,
    Mess,
    Academic,
    Infrastructure,
    Other,
}

impl ComplaintCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            ComplaintCategory::Hostel => "hostel",
            ComplaintCategory::Mess => "mess",
            ComplaintCategory::Academic => "academic",
            ComplaintCategory::Infrastructure => "infrastructure",
            ComplaintCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplaintStatus {
    Submitted,
    InProgress,
    Resolved,
    Rejected,
}

impl ComplaintStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ComplaintStatus::Submitted => "submitted",
            ComplaintStatus::InProgress => "in-progress",
            ComplaintStatus::Resolved => "resolved",
            ComplaintStatus::Rejected => "rejected",
        }
    }
}

/// A personal study note. Notes carry no status workflow, only the two flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub content: String,
    pub course: Option<String>,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An administered volunteering opportunity that registrations reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolunteerEvent {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub event_date: DateTime<Utc>,
    pub max_volunteers: u32,
    pub current_volunteers: u32,
    pub skills_required: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VolunteerEvent {
    pub fn spots_left(&self) -> u32 {
        self.max_volunteers.saturating_sub(self.current_volunteers)
    }
}

/// A student's application to volunteer for one event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolunteerRegistration {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub event_id: Uuid,
    pub availability: String,
    pub skills: Vec<String>,
    pub motivation: Option<String>,
    pub status: RegistrationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    Rejected,
}

impl RegistrationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Approved => "approved",
            RegistrationStatus::Rejected => "rejected",
        }
    }

    /// A registration in this state holds a seat against the event's capacity.
    pub fn holds_seat(self) -> bool {
        !matches!(self, RegistrationStatus::Rejected)
    }
}

/// A lost or found item report. Shared collection, visible to all users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LostFoundItem {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub report_kind: ReportKind,
    pub item_name: String,
    pub description: String,
    pub category: String,
    pub location: String,
    pub occurred_on: NaiveDate,
    pub contact: String,
    pub status: ItemStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    Lost,
    Found,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::Lost => "lost",
            ReportKind::Found => "found",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    Open,
    Claimed,
}

impl ItemStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Open => "open",
            ItemStatus::Claimed => "claimed",
        }
    }
}

/// One entry in the append-only notification log.
///
/// Deliberately carries no reference to the record that produced it; deleting
/// that record leaves the notification behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    /// Free-form echo of the triggering record's status at append time.
    pub subject_status: Option<String>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    Complaint,
    Volunteer,
    LostFound,
    System,
}
