//! Storage of submitted applications is organized through [EventStore].
//! The basic idea is:
//!  - The whole list of records lives in memory and is the source of truth for a session.
//!  - The list is persisted as one serialized snapshot through [snapshot_storage::SnapshotStorage]
//!    after every mutation. There are no incremental writes.
//!  - Failing to read or write the snapshot never fails the caller.
//!  - A snapshot that failed to load is set aside, never overwritten.

pub mod entities;
pub mod snapshot_storage;

use thiserror::Error;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    company,
    utils::{clock::Clock, time::CalendarDate},
};

use entities::{non_blank, ApplicationRecord, NewApplication, RecordId, DEFAULT_POSITION};
use snapshot_storage::SnapshotStorage;

/// Submission was rejected before anything was stored.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("application url is empty, please supply a url")]
    EmptyUrl,
}

/// Whether the snapshot reached the storage after a mutation. The in-memory state is updated
/// either way.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    Saved,
    Unsaved,
}

/// Why the persisted snapshot was not used when loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadIssue {
    Corrupt,
    Unreadable,
}

/// Holds the ordered list of applications, newest first.
pub struct EventStore<S: SnapshotStorage> {
    storage: S,
    records: Vec<ApplicationRecord>,
    load_issue: Option<LoadIssue>,
    /// Set while the snapshot that failed to load is still where the next write would go.
    needs_set_aside: bool,
}

impl<S: SnapshotStorage> EventStore<S> {
    /// Initializes the store from the persisted snapshot. Absent, unreadable or corrupt snapshots
    /// all result in an empty store. Unreadable and corrupt ones are reported by
    /// [EventStore::load_issue] and set aside before the first write.
    #[instrument(skip(storage))]
    pub async fn load(storage: S) -> Self {
        let (records, load_issue) = match storage.read().await {
            Ok(Some(blob)) => match serde_json::from_slice::<Vec<ApplicationRecord>>(&blob) {
                Ok(records) => (records, None),
                Err(e) => {
                    warn!("Snapshot is corrupted, starting with no applications: {e}");
                    (vec![], Some(LoadIssue::Corrupt))
                }
            },
            Ok(None) => (vec![], None),
            Err(e) => {
                error!("Failed to read snapshot, starting with no applications: {e:?}");
                (vec![], Some(LoadIssue::Unreadable))
            }
        };
        debug!("Loaded {} applications", records.len());
        Self {
            storage,
            records,
            load_issue,
            needs_set_aside: load_issue.is_some(),
        }
    }

    pub fn load_issue(&self) -> Option<LoadIssue> {
        self.load_issue
    }

    pub fn records(&self) -> &[ApplicationRecord] {
        &self.records
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Creates a record out of a submission and appends it. Company is resolved from the url
    /// when the caller didn't provide a non-blank one.
    pub async fn submit(
        &mut self,
        application: NewApplication,
        clock: &dyn Clock,
    ) -> Result<(ApplicationRecord, SaveStatus), ValidationError> {
        let record = self.create_record(application, clock)?;
        let status = self.append(record.clone()).await;
        Ok((record, status))
    }

    fn create_record(
        &self,
        application: NewApplication,
        clock: &dyn Clock,
    ) -> Result<ApplicationRecord, ValidationError> {
        let url = application.url.trim();
        if url.is_empty() {
            return Err(ValidationError::EmptyUrl);
        }

        let company = non_blank(application.company.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| company::resolve(url));
        let position = non_blank(application.position.as_deref())
            .unwrap_or(DEFAULT_POSITION)
            .to_string();

        let now = clock.now();
        let date = CalendarDate::from_local(now);

        Ok(ApplicationRecord {
            id: self.next_id(now.timestamp_millis()),
            url: url.to_string(),
            company,
            position,
            date,
            date_applied: date.applied_label(),
        })
    }

    /// Creation time unless some record already has that id or a later one.
    fn next_id(&self, millis: i64) -> RecordId {
        let newest = self.records.iter().map(|v| v.id.0).max();
        match newest {
            Some(newest) if newest >= millis => RecordId(newest.saturating_add(1)),
            Some(_) | None => RecordId(millis),
        }
    }

    /// Inserts the record at the front and persists the whole list.
    pub async fn append(&mut self, record: ApplicationRecord) -> SaveStatus {
        info!("Adding application {} for {}", record.id, record.company);
        self.records.insert(0, record);
        self.persist().await
    }

    /// Removes the record with `id`. Unknown ids are ignored and nothing is written.
    pub async fn remove_by_id(&mut self, id: RecordId) -> Option<(ApplicationRecord, SaveStatus)> {
        let Some(position) = self.records.iter().position(|v| v.id == id) else {
            debug!("No application with id {id}");
            return None;
        };
        let removed = self.records.remove(position);
        info!("Removed application {} for {}", removed.id, removed.company);
        let status = self.persist().await;
        Some((removed, status))
    }

    async fn persist(&mut self) -> SaveStatus {
        if self.needs_set_aside {
            if let Err(e) = self.storage.set_aside().await {
                error!("Failed to set aside unreadable snapshot, not overwriting it: {e:?}");
                return SaveStatus::Unsaved;
            }
            self.needs_set_aside = false;
        }
        let blob = match serde_json::to_vec(&self.records) {
            Ok(v) => v,
            Err(e) => {
                error!("Failed to serialize applications {e:?}");
                return SaveStatus::Unsaved;
            }
        };
        match self.storage.write(&blob).await {
            Ok(_) => {
                debug!("Persisted {} applications", self.records.len());
                SaveStatus::Saved
            }
            Err(e) => {
                error!("Failed to persist applications, changes only live in memory: {e:?}");
                SaveStatus::Unsaved
            }
        }
    }
}
