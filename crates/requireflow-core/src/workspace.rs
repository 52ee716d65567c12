//! The data directory and the collections stored in it.

use std::path::{Path, PathBuf};

use requireflow_db::JsonCollection;
use serde::Serialize;
use tracing::info;

use crate::customer::model::Customer;
use crate::error::CoreResult;
use crate::requirement::model::Requirement;
use crate::seed;
use crate::user::model::User;

pub const REQUIREMENTS_FILE: &str = "requirements.json";
pub const CUSTOMERS_FILE: &str = "customers.json";
pub const USERS_FILE: &str = "users.json";

/// Handle to the three collections of one data directory.
///
/// Each collection is owned by exactly one store module; no operation writes
/// to more than one collection.
pub struct Workspace {
    data_dir: PathBuf,
    pub(crate) requirements: JsonCollection<Requirement>,
    pub(crate) customers: JsonCollection<Customer>,
    pub(crate) users: JsonCollection<User>,
}

/// Which documents were created by [`Workspace::seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub users: bool,
    pub customers: bool,
    pub requirements: bool,
}

impl Workspace {
    /// Bind to a data directory without touching the disk.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            requirements: JsonCollection::new(data_dir.join(REQUIREMENTS_FILE)),
            customers: JsonCollection::new(data_dir.join(CUSTOMERS_FILE)),
            users: JsonCollection::new(data_dir.join(USERS_FILE)),
            data_dir,
        }
    }

    /// Create the data directory if needed and seed missing documents.
    pub async fn open(data_dir: impl Into<PathBuf>) -> CoreResult<Self> {
        let (ws, _) = Self::init(data_dir).await?;
        Ok(ws)
    }

    /// Like [`Workspace::open`], also reporting which documents were seeded.
    pub async fn init(data_dir: impl Into<PathBuf>) -> CoreResult<(Self, SeedReport)> {
        let ws = Self::new(data_dir);
        requireflow_db::ensure_data_dir(&ws.data_dir).await?;
        let report = ws.seed().await?;
        Ok((ws, report))
    }

    /// Write first-run documents: default users, default customers and an
    /// empty requirement collection. Existing documents are left alone.
    pub async fn seed(&self) -> CoreResult<SeedReport> {
        let report = SeedReport {
            users: self.users.seed_if_missing(seed::default_users).await?,
            customers: self.customers.seed_if_missing(seed::default_customers).await?,
            requirements: self.requirements.seed_if_missing(Vec::new).await?,
        };
        if report != SeedReport::default() {
            info!(data_dir = %self.data_dir.display(), ?report, "Seeded data directory");
        }
        Ok(report)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_seeds_once() {
        let dir = tempfile::tempdir().unwrap();
        let ws = Workspace::open(dir.path().join("data")).await.unwrap();

        assert!(ws.data_dir().join(USERS_FILE).exists());
        assert!(ws.data_dir().join(CUSTOMERS_FILE).exists());
        assert!(ws.data_dir().join(REQUIREMENTS_FILE).exists());
        assert_eq!(ws.users.load().await.unwrap().len(), 3);
        assert_eq!(ws.customers.load().await.unwrap().len(), 2);
        assert!(ws.requirements.load().await.unwrap().is_empty());

        assert_eq!(ws.seed().await.unwrap(), SeedReport::default());
    }

    #[tokio::test]
    async fn test_init_reports_seeded_documents() {
        let dir = tempfile::tempdir().unwrap();

        let (_, first) = Workspace::init(dir.path()).await.unwrap();
        assert!(first.users && first.customers && first.requirements);

        let (_, second) = Workspace::init(dir.path()).await.unwrap();
        assert_eq!(second, SeedReport::default());
    }

    #[tokio::test]
    async fn test_seed_keeps_existing_documents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CUSTOMERS_FILE), "[]").unwrap();

        let ws = Workspace::open(dir.path()).await.unwrap();

        assert!(ws.customers.load().await.unwrap().is_empty());
        assert_eq!(ws.users.load().await.unwrap().len(), 3);
    }
}
