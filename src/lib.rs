//! Core library for the costmatch command line application.
//!
//! The library matches SAP article exports against a manufacturing cost
//! reference table, joining on an article code that real spreadsheets
//! represent inconsistently (integer, float, scientific notation, padded
//! string). The modules are structured to keep responsibilities narrow and
//! composable: the pure matching core lives in [`normalize`], [`sanitize`],
//! [`columns`], [`dedup`], and [`merge`]; IO adapters under [`io`]; data
//! representations inside [`model`]; and the orchestration that ties them
//! together in [`pipeline`].

pub mod columns;
pub mod dedup;
pub mod error;
pub mod io;
pub mod merge;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod sanitize;

pub use error::{MatchError, Result};
