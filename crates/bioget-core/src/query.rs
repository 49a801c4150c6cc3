//! Collaborator seam for the remote query service.
//!
//! The query service belongs to an already-established server session; this
//! crate only consumes it. Implementations live with the transport (the CLI
//! provides an HTTP gateway), and tests use in-memory stubs.

use async_trait::async_trait;

use crate::reference::{FileId, ObjectKind};
use crate::Result;

/// Lookup scope for object fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupScope {
    /// Current group only.
    #[default]
    Default,
    /// Cross-group lookup, so group membership does not hide the object.
    AllGroups,
}

/// A fetched object record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    /// Canonical id of the object itself.
    pub id: i64,
    /// Id of the attached file, for kinds that carry one (FileAnnotation).
    pub attached_file: Option<FileId>,
}

/// Named long parameters for projection queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    longs: Vec<(String, i64)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named long parameter.
    pub fn add_long(mut self, name: impl Into<String>, value: i64) -> Self {
        self.longs.push((name.into(), value));
        self
    }

    /// All long parameters, in insertion order.
    pub fn longs(&self) -> &[(String, i64)] {
        &self.longs
    }
}

/// Read-only query capability of an established server session.
#[async_trait]
pub trait QueryService: Send + Sync {
    /// Fetch a single object by kind and id.
    ///
    /// Fails with [`crate::Error::NotFound`] when the object is absent.
    async fn get(&self, kind: ObjectKind, id: i64, scope: LookupScope) -> Result<Record>;

    /// Run a projection query, returning rows of ids.
    async fn projection(&self, query: &str, params: &QueryParams) -> Result<Vec<Vec<i64>>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_preserve_insertion_order() {
        let params = QueryParams::new().add_long("iid", 5).add_long("other", 7);
        assert_eq!(
            params.longs(),
            &[("iid".to_string(), 5), ("other".to_string(), 7)]
        );
    }

    #[test]
    fn default_scope_is_current_group() {
        assert_eq!(LookupScope::default(), LookupScope::Default);
    }
}
