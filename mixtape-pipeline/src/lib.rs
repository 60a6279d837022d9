//! The harvesting core: comment traversal, link extraction, title matching
//! and the run orchestration, all behind the collaborator traits in
//! [`traits`] so nothing here talks to the network directly.
//!
//! ```no_run
//! # async fn demo(
//! #     comments: &dyn mixtape_pipeline::traits::CommentSource,
//! #     resolver: &dyn mixtape_pipeline::traits::TitleResolver,
//! #     catalog: &dyn mixtape_pipeline::traits::CatalogSearch,
//! # ) {
//! use mixtape_pipeline::{LinkExtractor, Pipeline, PipelineSettings};
//! use std::collections::HashSet;
//!
//! let extractor = LinkExtractor::new().unwrap();
//! let pipeline = Pipeline::new(comments, resolver, catalog, &extractor, PipelineSettings::default());
//! let report = pipeline.run(&[], &HashSet::new()).await;
//! assert!(report.uris.is_empty());
//! # }
//! ```

pub mod batch;
pub mod comments;
pub mod links;
pub mod matcher;
pub mod normalize;
pub mod orchestrator;
pub mod traits;

#[cfg(test)]
mod testing;

pub use batch::{run_batch, BatchRequest, BatchSummary};
pub use links::LinkExtractor;
pub use matcher::{CatalogMatcher, MatchSettings};
pub use orchestrator::{MatchEvent, Pipeline, PipelineReport, PipelineSettings};
