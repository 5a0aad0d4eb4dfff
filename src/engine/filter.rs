// src/engine/filter.rs

use std::fmt;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::errors::{HashstampError, Result};

/// Compiled include/exclude globs applied to candidate filenames.
///
/// With no include patterns every filename is eligible; exclude patterns
/// always win over include patterns.
#[derive(Clone, Default)]
pub struct CandidateFilter {
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl fmt::Debug for CandidateFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CandidateFilter").finish_non_exhaustive()
    }
}

impl CandidateFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self> {
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// Whether a candidate with this base name should be processed.
    pub fn matches(&self, name: &str) -> bool {
        if let Some(include) = &self.include {
            if !include.is_match(name) {
                return false;
            }
        }
        if let Some(exclude) = &self.exclude {
            if exclude.is_match(name) {
                return false;
            }
        }
        true
    }
}

fn compile(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|err| {
            HashstampError::Config(format!("invalid glob pattern '{pattern}': {err}"))
        })?;
        builder.add(glob);
    }
    let set = builder
        .build()
        .map_err(|err| HashstampError::Config(format!("failed to compile glob patterns: {err}")))?;
    Ok(Some(set))
}
