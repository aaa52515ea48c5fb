//! Ownership checks applied before any resource is returned or removed.

use crate::{
    db::models::{FileStats, Project, ProjectStats},
    error::{AppError, Result},
};

/// Who controls a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership<'a> {
    /// Only this identity may access the resource.
    Owner(&'a str),
    /// The resource hangs off an owner that could not be resolved.
    Unclaimed,
    /// Not attached to any owner; anyone authenticated may access it.
    Public,
}

pub trait Owned {
    fn ownership(&self) -> Ownership<'_>;
}

impl Owned for Ownership<'_> {
    fn ownership(&self) -> Ownership<'_> {
        *self
    }
}

impl Owned for ProjectStats {
    fn ownership(&self) -> Ownership<'_> {
        Ownership::Owner(&self.user_email)
    }
}

impl Owned for Project {
    fn ownership(&self) -> Ownership<'_> {
        match &self.username {
            Some(owner) => Ownership::Owner(owner),
            None => Ownership::Unclaimed,
        }
    }
}

/// A file together with the owner of the project it belongs to, if any.
pub struct FileAccess<'a> {
    pub file: &'a FileStats,
    pub project_owner: Option<&'a str>,
}

impl Owned for FileAccess<'_> {
    fn ownership(&self) -> Ownership<'_> {
        match (self.file.project_id, self.project_owner) {
            (None, _) => Ownership::Public,
            (Some(_), Some(owner)) => Ownership::Owner(owner),
            (Some(_), None) => Ownership::Unclaimed,
        }
    }
}

pub fn can_access(identity: &str, resource: &impl Owned) -> bool {
    match resource.ownership() {
        Ownership::Owner(owner) => owner == identity,
        Ownership::Public => true,
        Ownership::Unclaimed => false,
    }
}

/// `can_access` as a `Forbidden` error carrying `message`.
pub fn ensure_access(identity: &str, resource: &impl Owned, message: &str) -> Result<()> {
    if can_access(identity, resource) {
        Ok(())
    } else {
        Err(AppError::Forbidden(message.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_stats(owner: &str) -> ProjectStats {
        ProjectStats {
            id: 1,
            project_path: Some("/p".to_string()),
            total_coding_time: 0,
            total_open_time: 0,
            user_email: owner.to_string(),
            files: Vec::new(),
            daily_stats: Vec::new(),
            git_hub_badge: None,
        }
    }

    fn file(project_id: Option<i64>) -> FileStats {
        FileStats {
            id: 7,
            file_path: Some("src/main.rs".to_string()),
            open_time: 0,
            coding_time: 0,
            kind: None,
            project_id,
            daily_stats: Vec::new(),
        }
    }

    #[test]
    fn project_stats_owner_only() {
        let project = project_stats("a@x.com");
        assert!(can_access("a@x.com", &project));
        assert!(!can_access("b@x.com", &project));
    }

    #[test]
    fn project_without_owner_is_denied() {
        let project = Project {
            id: "p1".to_string(),
            project_path: None,
            total_coding_time: 0,
            total_open_time: 0,
            username: None,
        };
        assert!(!can_access("a@x.com", &project));
    }

    #[test]
    fn unattached_file_is_public() {
        let file = file(None);
        let access = FileAccess {
            file: &file,
            project_owner: None,
        };
        assert!(can_access("anyone@x.com", &access));
    }

    #[test]
    fn attached_file_follows_project_owner() {
        let file = file(Some(1));
        let access = FileAccess {
            file: &file,
            project_owner: Some("a@x.com"),
        };
        assert!(can_access("a@x.com", &access));
        assert!(!can_access("b@x.com", &access));
    }

    #[test]
    fn ensure_access_reports_forbidden() {
        let project = project_stats("a@x.com");
        assert!(ensure_access("a@x.com", &project, "nope").is_ok());
        match ensure_access("b@x.com", &project, "nope") {
            Err(AppError::Forbidden(message)) => assert_eq!(message, "nope"),
            other => panic!("expected Forbidden, got {other:?}"),
        }
    }
}
