//! Run summary types.

use super::result::ProcessingResult;

/// Summary of a complete aggregation run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of repositories returned by the listing.
    pub repositories_listed: usize,

    /// Number of repositories kept by the selection.
    pub candidates: usize,

    /// Number of project records produced.
    pub projects_included: usize,

    /// Number of included projects with enrichment warnings.
    pub projects_degraded: usize,

    /// Number of candidates left out.
    pub projects_skipped: usize,
}

impl RunSummary {
    /// Creates a summary for a listing of `listed` repositories.
    #[must_use]
    pub fn new(repositories_listed: usize, candidates: usize) -> Self {
        Self {
            repositories_listed,
            candidates,
            ..Default::default()
        }
    }

    /// Updates the summary with a processing result.
    pub fn record_result(&mut self, result: &ProcessingResult) {
        match result {
            ProcessingResult::Included { warnings, .. } => {
                self.projects_included += 1;
                if !warnings.is_empty() {
                    self.projects_degraded += 1;
                }
            }
            ProcessingResult::Skipped { .. } => self.projects_skipped += 1,
        }
    }

    /// Returns true if any repository was skipped or degraded.
    #[must_use]
    pub fn has_problems(&self) -> bool {
        self.projects_skipped > 0 || self.projects_degraded > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_record_result() {
        let mut summary = RunSummary::new(3, 2);

        summary.record_result(&ProcessingResult::Included {
            repository: "site".to_string(),
            warnings: Vec::new(),
        });
        assert!(!summary.has_problems());

        summary.record_result(&ProcessingResult::Included {
            repository: "game".to_string(),
            warnings: vec!["languages unavailable".to_string()],
        });
        summary.record_result(&ProcessingResult::Skipped {
            repository: "notes".to_string(),
            reason: "README not found".to_string(),
        });

        assert_eq!(summary.projects_included, 2);
        assert_eq!(summary.projects_degraded, 1);
        assert_eq!(summary.projects_skipped, 1);
        assert!(summary.has_problems());
    }
}
