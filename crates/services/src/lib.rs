//! campus-hub/crates/services/src/lib.rs
//!
//! Feature-area services coordinating the ports: validate a draft, stamp
//! identity and timestamps, read-modify-write the full collection, and
//! report the outcome on the notification side-channel. All operations are
//! synchronous in effect; the async signatures exist for symmetry with a
//! future remote backend.

pub mod complaint;
pub mod lost_found;
pub mod notes;
pub mod notify;
pub mod volunteer;

pub use complaint::{ComplaintCounts, ComplaintService};
pub use lost_found::LostFoundService;
pub use notes::NotesService;
pub use notify::Notifier;
pub use volunteer::VolunteerService;

use domains::error::{AppError, Result};
use domains::models::UserProfile;
use domains::traits::IdentityProvider;

/// The signed-in user, or `Unauthorized` — services never create records
/// without an owner to stamp.
pub(crate) async fn require_user(identity: &dyn IdentityProvider) -> Result<UserProfile> {
    identity
        .current_user()
        .await
        .ok_or_else(|| AppError::Unauthorized("sign in required".into()))
}
