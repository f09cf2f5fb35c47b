//! Approval boundary: the one place derived tags cross into persistence.
//!
//! Processors propose tags; nothing is written until the user approves.
//! Approval appends the proposed tags to the existing collection and saves
//! the merged document through the store. The caller's in-memory document
//! is never mutated; callers refetch after a successful save.

use crate::metadata::VideoMetadata;
use crate::storage::{MetadataStore, StorageError};
use filmroom_types::Tag;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ApprovalError {
    #[error("no proposed tags to approve")]
    NothingToApprove,

    #[error("this exact tag already exists")]
    DuplicateTag,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Append `proposed` to the video's tag collection and persist the merged
/// document. No de-duplication. Returns the merged tag count.
pub fn approve_tags(
    store: &dyn MetadataStore,
    video_id: &str,
    video: &VideoMetadata,
    proposed: &[Tag],
) -> Result<usize, ApprovalError> {
    if proposed.is_empty() {
        return Err(ApprovalError::NothingToApprove);
    }

    let merged = video.with_appended_tags(proposed);
    store.save(video_id, &merged)?;

    info!(
        video_id,
        approved = proposed.len(),
        total = merged.tags.len(),
        "Approved proposed tags"
    );
    Ok(merged.tags.len())
}

/// Insert a single user-authored tag, rejecting an exact duplicate
/// (same name and frame fields).
pub fn add_tag(
    store: &dyn MetadataStore,
    video_id: &str,
    video: &VideoMetadata,
    tag: Tag,
) -> Result<(), ApprovalError> {
    let duplicate = video.tags.iter().any(|existing| {
        existing.name == tag.name
            && existing.frame == tag.frame
            && existing.start_frame == tag.start_frame
            && existing.end_frame == tag.end_frame
    });
    if duplicate {
        return Err(ApprovalError::DuplicateTag);
    }

    let merged = video.with_appended_tags(std::slice::from_ref(&tag));
    store.save(video_id, &merged)?;

    info!(video_id, tag = %tag.name, "Added tag");
    Ok(())
}
