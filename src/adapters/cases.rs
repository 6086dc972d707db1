use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::application::CaseRepository;
use crate::case::{TestCaseSpec, parse_case_file};
use crate::error::AppResult;

/// Cases held in memory, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCaseRepository {
    cases: BTreeMap<u64, TestCaseSpec>,
}

impl InMemoryCaseRepository {
    #[must_use]
    pub fn new(cases: Vec<TestCaseSpec>) -> Self {
        Self {
            cases: cases.into_iter().map(|case| (case.id, case)).collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

#[async_trait]
impl CaseRepository for InMemoryCaseRepository {
    async fn get_case(&self, id: u64) -> AppResult<Option<TestCaseSpec>> {
        Ok(self.cases.get(&id).cloned())
    }
}

/// Case file loaded once at startup.
#[derive(Debug, Clone)]
pub struct FileCaseRepository {
    path: PathBuf,
    cases: InMemoryCaseRepository,
}

impl FileCaseRepository {
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or decoded.
    pub fn open(path: &Path) -> AppResult<Self> {
        let cases = InMemoryCaseRepository::new(parse_case_file(path)?);
        debug!("Loaded {} cases from {}", cases.len(), path.display());
        Ok(Self {
            path: path.to_path_buf(),
            cases,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CaseRepository for FileCaseRepository {
    async fn get_case(&self, id: u64) -> AppResult<Option<TestCaseSpec>> {
        self.cases.get_case(id).await
    }
}
