//! Per-repository outcomes.

/// Result of processing a single candidate repository.
#[derive(Debug, Clone)]
pub enum ProcessingResult {
    /// The repository produced a project record.
    Included {
        /// Repository name.
        repository: String,
        /// Recoverable problems met during enrichment.
        warnings: Vec<String>,
    },

    /// The repository was left out of the output.
    Skipped {
        /// Repository name.
        repository: String,
        /// Reason for skipping.
        reason: String,
    },
}
