//! `guml` extracts the commit history of a git repository up to a cutoff
//! date and renders it as a PlantUML graph: one node per commit, one edge
//! per parent relationship.
//!
//! The [`Guml`] struct holds the options and drives the pipeline.

#[macro_use]
mod macros;
mod config;
pub mod error;
pub mod fmt;
pub mod git;
mod graph;
mod guml;
mod sanitize;

pub use graph::CommitGraph;
pub use guml::Guml;
pub use sanitize::MessageSanitizer;

// The default config file
const GUML_CONFIG_FILE: &str = ".guml.toml";
// The default intermediate document file
const DEFAULT_OUTFILE: &str = "graph.puml";
