//! Reference resolution: textual reference to concrete file id.
//!
//! Each reference shape maps to exactly one fetch path:
//!
//! - bare id: OriginalFile fetch with cross-group scope
//! - `OriginalFile:<id>`: OriginalFile fetch with default scope
//! - `FileAnnotation:<id>`: annotation fetch, return its attached file
//! - `Image:<id>`: fileset projection, exactly one row required
//!
//! Resolution is read-only: at most one fetch or projection runs per call,
//! and identical backing state yields identical results.

use tracing::debug;

use crate::query::{LookupScope, QueryParams, QueryService};
use crate::reference::{FileId, ObjectKind, ObjectReference};
use crate::{Error, Result};

/// Projection joining an image to the original files of its fileset.
pub const FILESET_FILES_QUERY: &str = "select f.id from Image i \
     left outer join i.fileset as fs \
     join fs.usedFiles as uf \
     join uf.originalFile as f \
     where i.id = :iid";

/// Resolves object references against a query service.
pub struct Resolver<Q> {
    query: Q,
}

impl<Q: QueryService> Resolver<Q> {
    pub fn new(query: Q) -> Self {
        Self { query }
    }

    /// Resolve a reference to a downloadable file id.
    pub async fn resolve(&self, reference: &ObjectReference) -> Result<FileId> {
        let file = match *reference {
            ObjectReference::Bare(id) => {
                // Cross-group scope so group membership does not hide the file.
                let record = self
                    .query
                    .get(ObjectKind::OriginalFile, id, LookupScope::AllGroups)
                    .await?;
                FileId(record.id)
            }
            ObjectReference::OriginalFile(id) => {
                let record = self
                    .query
                    .get(ObjectKind::OriginalFile, id, LookupScope::Default)
                    .await?;
                FileId(record.id)
            }
            ObjectReference::FileAnnotation(id) => {
                let record = self
                    .query
                    .get(ObjectKind::FileAnnotation, id, LookupScope::Default)
                    .await?;
                record
                    .attached_file
                    .ok_or(Error::NoAttachedFile { annotation_id: id })?
            }
            ObjectReference::Image(id) => {
                let params = QueryParams::new().add_long("iid", id);
                let rows = self.query.projection(FILESET_FILES_QUERY, &params).await?;
                match rows.len() {
                    0 => return Err(Error::NoFileset { image_id: id }),
                    1 => rows[0].first().copied().map(FileId).ok_or_else(|| {
                        Error::Transport {
                            message: "projection returned an empty row".to_string(),
                        }
                    })?,
                    count => {
                        return Err(Error::MultipleFiles {
                            image_id: id,
                            count,
                        })
                    }
                }
            }
        };

        debug!(reference = %reference, file = %file, "reference resolved");
        Ok(file)
    }
}
