//! Bulk catalog maintenance engine.
//!
//! Every operation is one application of the same shape: paginate the whole
//! catalog with a since-id cursor, decide per item whether a mutation is
//! needed, apply the writes under a bounded-concurrency policy, and
//! aggregate a run summary. Runs are idempotent: re-running an operation
//! against an unchanged catalog issues no writes.

mod decide;
mod error;
mod ops;
mod pages;
mod render;
mod sweep;

pub use error::EngineError;
pub use ops::{
    hide_out_of_stock, reprice, rewrite_descriptions, DescriptionOutcome, HideOutcome,
    RepriceOutcome,
};
pub use render::render_description;
pub use sweep::{ProductPreview, RunMode, SweepOptions};
