use std::collections::HashMap;

use crate::secure::error::ScopeError;

/// A named many-to-one hop: `from_col` on the owning table references
/// `to_table.to_col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationLink {
    pub name: &'static str,
    pub from_col: &'static str,
    pub to_table: &'static str,
    pub to_col: &'static str,
}

impl RelationLink {
    /// Link to a parent table through its `id` primary key.
    #[must_use]
    pub const fn belongs_to(
        name: &'static str,
        from_col: &'static str,
        to_table: &'static str,
    ) -> Self {
        Self {
            name,
            from_col,
            to_table,
            to_col: "id",
        }
    }
}

/// A tenant path resolved into concrete hops.
///
/// Hop `i` starts at `root` for `i == 0`, otherwise at the previous hop's
/// `to_table`. The last hop always ends at the tenant table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub root: String,
    pub hops: Vec<RelationLink>,
}

impl ResolvedPath {
    /// Table a given hop starts from.
    #[must_use]
    pub fn source_of(&self, hop: usize) -> &str {
        match hop.checked_sub(1).and_then(|prev| self.hops.get(prev)) {
            Some(prev) => prev.to_table,
            None => &self.root,
        }
    }

    /// The hop whose `from_col` holds the tenant id.
    #[must_use]
    pub fn tenant_hop(&self) -> Option<&RelationLink> {
        self.hops.last()
    }
}

/// Statically declared relationship table used to resolve tenant paths.
#[derive(Debug, Clone)]
pub struct RelationGraph {
    tenant_table: &'static str,
    tables: HashMap<&'static str, &'static [RelationLink]>,
}

impl RelationGraph {
    #[must_use]
    pub fn new(tenant_table: &'static str) -> Self {
        Self {
            tenant_table,
            tables: HashMap::new(),
        }
    }

    /// Register the outgoing links of one table.
    #[must_use]
    pub fn with_table(mut self, table: &'static str, links: &'static [RelationLink]) -> Self {
        self.tables.insert(table, links);
        self
    }

    #[must_use]
    pub fn tenant_table(&self) -> &'static str {
        self.tenant_table
    }

    /// Resolve `path` starting at `root_table`.
    ///
    /// # Errors
    /// Returns `ScopeError::UnresolvedPath` when the path is empty, names an
    /// unknown relation, or does not end at the tenant table.
    pub fn resolve(&self, root_table: &str, path: &str) -> Result<ResolvedPath, ScopeError> {
        let unresolved = |reason: String| ScopeError::UnresolvedPath {
            table: root_table.to_owned(),
            path: path.to_owned(),
            reason,
        };

        if path.trim().is_empty() {
            return Err(unresolved("path is empty".to_owned()));
        }

        let mut hops = Vec::new();
        let mut current: &str = root_table;
        for segment in path.split('.') {
            let links = self
                .tables
                .get(current)
                .ok_or_else(|| unresolved(format!("table '{current}' has no declared relations")))?;
            let link = links
                .iter()
                .find(|l| l.name == segment)
                .ok_or_else(|| unresolved(format!("'{current}' has no relation '{segment}'")))?;
            hops.push(*link);
            current = link.to_table;
        }

        if current != self.tenant_table {
            return Err(unresolved(format!(
                "path ends at '{current}', expected '{}'",
                self.tenant_table
            )));
        }

        Ok(ResolvedPath {
            root: root_table.to_owned(),
            hops,
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    const LESSONS: &[RelationLink] = &[RelationLink::belongs_to("course", "course_id", "courses")];
    const COURSES: &[RelationLink] = &[
        RelationLink::belongs_to("academy", "academy_id", "academies"),
        RelationLink::belongs_to("teacher", "teacher_id", "teachers"),
    ];
    const TEACHERS: &[RelationLink] = &[RelationLink::belongs_to("user", "user_id", "users")];

    fn graph() -> RelationGraph {
        RelationGraph::new("academies")
            .with_table("lessons", LESSONS)
            .with_table("courses", COURSES)
            .with_table("teachers", TEACHERS)
    }

    #[test]
    fn resolves_direct_path() {
        let path = graph().resolve("courses", "academy").unwrap();
        assert_eq!(path.hops.len(), 1);
        assert_eq!(path.tenant_hop().unwrap().from_col, "academy_id");
        assert_eq!(path.source_of(0), "courses");
    }

    #[test]
    fn resolves_nested_path() {
        let path = graph().resolve("lessons", "course.academy").unwrap();
        assert_eq!(path.hops.len(), 2);
        assert_eq!(path.source_of(0), "lessons");
        assert_eq!(path.source_of(1), "courses");
        assert_eq!(path.tenant_hop().unwrap().to_table, "academies");
    }

    #[test]
    fn unknown_segment_is_rejected() {
        let err = graph().resolve("lessons", "course.school").unwrap_err();
        assert!(matches!(err, ScopeError::UnresolvedPath { .. }));
        assert!(err.to_string().contains("no relation 'school'"), "{err}");
    }

    #[test]
    fn path_must_end_at_tenant_table() {
        let err = graph().resolve("lessons", "course.teacher").unwrap_err();
        assert!(err.to_string().contains("expected 'academies'"), "{err}");
    }

    #[test]
    fn empty_path_and_unknown_table_are_rejected() {
        assert!(graph().resolve("lessons", "").is_err());
        let err = graph().resolve("payments", "academy").unwrap_err();
        assert!(err.to_string().contains("no declared relations"), "{err}");
    }
}
