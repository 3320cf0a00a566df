//! Owner user detection.
//!
//! # Responsibilities
//! - Derive the user id from the process data directory
//! - Cache the first successful answer for the life of the process
//!
//! # Design Decisions
//! - A non-numeric parent segment means a single-user layout, so user 0
//! - A missing data directory is an error and is not cached

use std::sync::atomic::{AtomicI64, Ordering};

use crate::resolver::metadata::{parse_user_id, MetadataError, ProcessMetadata};

const UNRESOLVED: i64 = -1;

/// The owner user id.
pub const OWNER_USER_ID: u32 = 0;

/// Memoizes the user id the process runs as.
pub struct OwnerIdResolver {
    metadata: Box<dyn ProcessMetadata>,
    user_id: AtomicI64,
}

impl std::fmt::Debug for OwnerIdResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnerIdResolver")
            .field("user_id", &self.cached())
            .finish_non_exhaustive()
    }
}

impl OwnerIdResolver {
    pub fn new(metadata: impl ProcessMetadata + 'static) -> Self {
        Self::from_boxed(Box::new(metadata))
    }

    pub fn from_boxed(metadata: Box<dyn ProcessMetadata>) -> Self {
        Self {
            metadata,
            user_id: AtomicI64::new(UNRESOLVED),
        }
    }

    /// The cached user id, if resolution already happened.
    pub fn cached(&self) -> Option<u32> {
        u32::try_from(self.user_id.load(Ordering::Acquire)).ok()
    }

    /// Resolve (once) and return the user id.
    pub fn user_id(&self) -> Result<u32, MetadataError> {
        if let Some(id) = self.cached() {
            return Ok(id);
        }

        let data_dir = self.metadata.data_dir()?;
        let id = match parse_user_id(&data_dir)? {
            Some(id) => id,
            None => {
                tracing::debug!(
                    data_dir = %data_dir.display(),
                    "No user id in data directory, assuming owner"
                );
                OWNER_USER_ID
            }
        };

        // First writer wins; a racing resolver read the same path.
        match self.user_id.compare_exchange(
            UNRESOLVED,
            i64::from(id),
            Ordering::AcqRel,
            Ordering::Acquire,
        ) {
            Ok(_) => {
                tracing::debug!(user_id = id, "Owner id resolved");
                Ok(id)
            }
            Err(existing) => Ok(u32::try_from(existing).unwrap_or(id)),
        }
    }

    /// Whether the process runs as the owner user.
    pub fn is_owner(&self) -> Result<bool, MetadataError> {
        Ok(self.user_id()? == OWNER_USER_ID)
    }
}
