//! **projclean** - Deduplicate and group free-text project-name lists
//!
//! Two batch stages over line-oriented UTF-8 exports: `dedup` cleans records and
//! collapses near-duplicates by anchored containment; `organize` groups the
//! canonical list by surface patterns into a plain-text report.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Core processing - pure transforms plus the two stage entry points
pub mod core {
    /// Line normalization and annotation stripping
    pub mod normalize;
    pub use normalize::{Cleaner, normalize};

    /// Near-duplicate reduction (prefix/suffix containment, length guard)
    pub mod reduce;
    pub use reduce::{Reducer, Reduction};

    /// Ordered first-match-wins group labels
    pub mod categorize;
    pub use categorize::Categorizer;

    /// Dedup stage: raw lines → canonical sorted list
    pub mod dedup;
    pub use dedup::{DedupOutcome, DedupSummary, Deduper, run as dedup_run};

    /// Organize stage: canonical list → grouped report
    pub mod organize;
    pub use organize::{Grouping, OrganizeSummary, run as organize_run};

    /// Dedup then organize in one invocation
    pub mod pipeline;
    pub use pipeline::run as pipeline_run;
}

/// Infrastructure - Configuration and I/O
pub mod infra {
    /// Configuration management with TOML support and env overrides
    pub mod config;
    pub use config::{Config, init as config_init, load_config};

    /// Source reading (mmap above 1 MiB) and output writing
    pub mod io;
    pub use io::{SourceError, read_source};
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use crate::core::{dedup_run, organize_run, pipeline_run};
pub use infra::{Config, load_config};

// Core types for external consumers
pub use crate::core::{Categorizer, Cleaner, Deduper, Grouping, Reducer, normalize};
