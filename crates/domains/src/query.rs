//! # Query Engine
//!
//! Derives the list a surface renders from a collection, the active search
//! term, the active filter, and the sort key. Purely a function of its
//! inputs; storage never appears here.

use uuid::Uuid;

use crate::models::{
    Complaint, ComplaintStatus, ItemStatus, LostFoundItem, Note, Priority, RegistrationStatus,
    ReportKind, VolunteerRegistration,
};
use crate::traits::Record;

/// Total order by `created_at`. Ties are broken by `id` ascending so the
/// order is repeatable for records created in the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Newest,
    Oldest,
}

/// The fixed set of text fields a search term is matched against.
pub trait Searchable {
    fn haystack(&self) -> Vec<&str>;
}

/// Case-insensitive substring search, a named filter, and a deterministic
/// sort, in that order. An empty term matches every record, so the result
/// for any term is a subset of the empty-term result.
pub fn view<R, F>(records: &[R], term: &str, filter: F, sort: SortKey) -> Vec<R>
where
    R: Record + Searchable,
    F: Fn(&R) -> bool,
{
    let needle = term.trim().to_lowercase();
    let mut out: Vec<R> = records
        .iter()
        .filter(|r| filter(r))
        .filter(|r| {
            needle.is_empty()
                || r.haystack()
                    .iter()
                    .any(|hay| hay.to_lowercase().contains(&needle))
        })
        .cloned()
        .collect();

    out.sort_by(|a, b| match sort {
        SortKey::Newest => b
            .created_at()
            .cmp(&a.created_at())
            .then_with(|| a.id().cmp(&b.id())),
        SortKey::Oldest => a
            .created_at()
            .cmp(&b.created_at())
            .then_with(|| a.id().cmp(&b.id())),
    });
    out
}

impl Searchable for Complaint {
    fn haystack(&self) -> Vec<&str> {
        vec![
            &self.title,
            &self.description,
            &self.location,
            &self.reporter_name,
            self.category.as_str(),
        ]
    }
}

impl Searchable for Note {
    fn haystack(&self) -> Vec<&str> {
        let mut hay = vec![self.title.as_str(), self.content.as_str()];
        if let Some(course) = &self.course {
            hay.push(course);
        }
        hay.extend(self.tags.iter().map(String::as_str));
        hay
    }
}

impl Searchable for VolunteerRegistration {
    fn haystack(&self) -> Vec<&str> {
        let mut hay = vec![self.availability.as_str()];
        if let Some(motivation) = &self.motivation {
            hay.push(motivation);
        }
        hay.extend(self.skills.iter().map(String::as_str));
        hay
    }
}

impl Searchable for LostFoundItem {
    fn haystack(&self) -> Vec<&str> {
        vec![
            &self.item_name,
            &self.description,
            &self.location,
            &self.category,
        ]
    }
}

/// The closed filter set for complaint lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplaintFilter {
    All,
    /// Records owned by the viewing user.
    Mine,
    Status(ComplaintStatus),
    Priority(Priority),
}

impl ComplaintFilter {
    pub fn matches(&self, complaint: &Complaint, viewer: Uuid) -> bool {
        match self {
            ComplaintFilter::All => true,
            ComplaintFilter::Mine => complaint.owner_id == viewer,
            ComplaintFilter::Status(status) => complaint.status == *status,
            ComplaintFilter::Priority(priority) => complaint.priority == *priority,
        }
    }
}

/// The closed filter set for note lists. Notes are already owner-scoped, so
/// there is no `Mine` here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteFilter {
    All,
    Favorites,
    Public,
    Tag(String),
}

impl NoteFilter {
    pub fn matches(&self, note: &Note) -> bool {
        match self {
            NoteFilter::All => true,
            NoteFilter::Favorites => note.is_favorite,
            NoteFilter::Public => note.is_public,
            NoteFilter::Tag(tag) => note.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationFilter {
    All,
    Mine,
    Status(RegistrationStatus),
}

impl RegistrationFilter {
    pub fn matches(&self, registration: &VolunteerRegistration, viewer: Uuid) -> bool {
        match self {
            RegistrationFilter::All => true,
            RegistrationFilter::Mine => registration.owner_id == viewer,
            RegistrationFilter::Status(status) => registration.status == *status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemFilter {
    All,
    Mine,
    Kind(ReportKind),
    Status(ItemStatus),
}

impl ItemFilter {
    pub fn matches(&self, item: &LostFoundItem, viewer: Uuid) -> bool {
        match self {
            ItemFilter::All => true,
            ItemFilter::Mine => item.owner_id == viewer,
            ItemFilter::Kind(kind) => item.report_kind == *kind,
            ItemFilter::Status(status) => item.status == *status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComplaintCategory;
    use chrono::{TimeZone, Utc};

    fn complaint(title: &str, created_secs: i64) -> Complaint {
        let at = Utc.timestamp_opt(1_700_000_000 + created_secs, 0).unwrap();
        Complaint {
            id: Uuid::now_v7(),
            owner_id: Uuid::now_v7(),
            title: title.into(),
            description: "something is broken in the building".into(),
            category: ComplaintCategory::Infrastructure,
            location: "Academic Block".into(),
            priority: Priority::Medium,
            status: ComplaintStatus::Submitted,
            reporter_name: "Arun".into(),
            contact: "arun@campus.test".into(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn search_is_case_insensitive_and_a_subset() {
        let records = vec![
            complaint("Projector flickers", 0),
            complaint("WiFi outage", 1),
        ];
        let everything = view(&records, "", |_| true, SortKey::Newest);
        let hits = view(&records, "WIFI", |_| true, SortKey::Newest);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "WiFi outage");
        assert!(hits.iter().all(|h| everything.iter().any(|e| e.id == h.id)));
    }

    #[test]
    fn identical_timestamps_sort_by_id() {
        let mut a = complaint("first", 0);
        let mut b = complaint("second", 0);
        // Force the tie and a known id order.
        b.created_at = a.created_at;
        if b.id < a.id {
            std::mem::swap(&mut a.id, &mut b.id);
        }
        let records = vec![b.clone(), a.clone()];

        let newest = view(&records, "", |_| true, SortKey::Newest);
        let again = view(&records, "", |_| true, SortKey::Newest);
        assert_eq!(newest[0].id, a.id);
        assert_eq!(
            newest.iter().map(|r| r.id).collect::<Vec<_>>(),
            again.iter().map(|r| r.id).collect::<Vec<_>>()
        );

        let oldest = view(&records, "", |_| true, SortKey::Oldest);
        assert_eq!(oldest[0].id, a.id);
    }

    #[test]
    fn newest_puts_later_records_first() {
        let records = vec![complaint("early", 0), complaint("late", 60)];
        let newest = view(&records, "", |_| true, SortKey::Newest);
        assert_eq!(newest[0].title, "late");
        let oldest = view(&records, "", |_| true, SortKey::Oldest);
        assert_eq!(oldest[0].title, "early");
    }

    #[test]
    fn mine_filter_scopes_to_the_viewer() {
        let mine = complaint("mine", 0);
        let theirs = complaint("theirs", 1);
        let viewer = mine.owner_id;
        let records = vec![mine, theirs];
        let out = view(
            &records,
            "",
            |c| ComplaintFilter::Mine.matches(c, viewer),
            SortKey::Newest,
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "mine");
    }

    #[test]
    fn tag_filter_ignores_case() {
        let note = Note {
            id: Uuid::now_v7(),
            owner_id: Uuid::now_v7(),
            title: "Sorting algorithms".into(),
            content: "merge sort vs quick sort notes".into(),
            course: None,
            tags: vec!["DSA".into()],
            is_favorite: false,
            is_public: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(NoteFilter::Tag("dsa".into()).matches(&note));
    }
}
