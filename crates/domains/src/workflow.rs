//! # Status Workflows
//!
//! The legal transition graph for every status-bearing entity, plus the
//! policy deciding who may invoke a transition. Terminal statuses have no
//! outgoing edges; nothing in storage re-opens them.

use crate::models::{
    Complaint, ComplaintStatus, ItemStatus, LostFoundItem, RegistrationStatus, UserProfile,
    VolunteerRegistration,
};

/// A closed status graph. Implemented by each entity's status enum.
pub trait Workflow: Copy + PartialEq + Sized + 'static {
    /// The statuses reachable from this one. Empty means terminal.
    fn allowed_next(self) -> &'static [Self];

    fn is_terminal(self) -> bool {
        self.allowed_next().is_empty()
    }

    fn can_move_to(self, next: Self) -> bool {
        self.allowed_next().contains(&next)
    }
}

impl Workflow for ComplaintStatus {
    fn allowed_next(self) -> &'static [Self] {
        match self {
            ComplaintStatus::Submitted => &[ComplaintStatus::InProgress, ComplaintStatus::Rejected],
            ComplaintStatus::InProgress => &[ComplaintStatus::Resolved, ComplaintStatus::Rejected],
            ComplaintStatus::Resolved | ComplaintStatus::Rejected => &[],
        }
    }
}

impl Workflow for RegistrationStatus {
    fn allowed_next(self) -> &'static [Self] {
        match self {
            RegistrationStatus::Pending => {
                &[RegistrationStatus::Approved, RegistrationStatus::Rejected]
            }
            RegistrationStatus::Approved | RegistrationStatus::Rejected => &[],
        }
    }
}

impl Workflow for ItemStatus {
    fn allowed_next(self) -> &'static [Self] {
        match self {
            ItemStatus::Open => &[ItemStatus::Claimed],
            ItemStatus::Claimed => &[],
        }
    }
}

/// Owners drive their own complaints through the graph.
pub fn can_transition_complaint(
    actor: &UserProfile,
    complaint: &Complaint,
    _target: ComplaintStatus,
) -> bool {
    complaint.owner_id == actor.id
}

/// Only an administrator may approve or reject registrations, regardless of
/// ownership.
pub fn can_transition_registration(
    actor: &UserProfile,
    _registration: &VolunteerRegistration,
    _target: RegistrationStatus,
) -> bool {
    actor.is_admin()
}

/// The reporter closes out their own item once it has been claimed.
pub fn can_transition_item(actor: &UserProfile, item: &LostFoundItem, _target: ItemStatus) -> bool {
    item.owner_id == actor.id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submitted_cannot_jump_to_resolved() {
        assert!(!ComplaintStatus::Submitted.can_move_to(ComplaintStatus::Resolved));
        assert!(ComplaintStatus::Submitted.can_move_to(ComplaintStatus::InProgress));
        assert!(ComplaintStatus::Submitted.can_move_to(ComplaintStatus::Rejected));
    }

    #[test]
    fn resolved_and_rejected_are_terminal() {
        assert!(ComplaintStatus::Resolved.is_terminal());
        assert!(ComplaintStatus::Rejected.is_terminal());
        assert!(RegistrationStatus::Approved.is_terminal());
        assert!(RegistrationStatus::Rejected.is_terminal());
        assert!(ItemStatus::Claimed.is_terminal());
    }

    #[test]
    fn pending_registration_moves_both_ways() {
        assert!(RegistrationStatus::Pending.can_move_to(RegistrationStatus::Approved));
        assert!(RegistrationStatus::Pending.can_move_to(RegistrationStatus::Rejected));
        assert!(!RegistrationStatus::Approved.can_move_to(RegistrationStatus::Pending));
    }
}
