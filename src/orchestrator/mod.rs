//! # Extraction Orchestrator Module
//!
//! Fans a large query batch out over the rayon pool and joins the pieces.
//!
//! ## Partitioning
//!
//! ```text
//! queries   [q0 q1 q2 | q3 q4 q5 | q6 q7]      contiguous chunks of ceil(n/p)
//! results   [r0 r1 r2 | r3 r4 r5 | r6 r7]      same chunking, disjoint &mut
//! buffers   [part 0 ] [part 1    ] [part 2]   private per partition
//!                 \         |          /
//!                  concatenated in order, offsets rebased
//! ```
//!
//! Each partition builds its own extractor from the orchestrator's
//! [`ExtractorConstructor`], writes only to its own result slots and its own
//! output buffers, and releases the extractor when done. Nothing is shared
//! mutably between workers.

mod extraction;
mod result;


pub use extraction::ExtractionOrchestrator;
pub use result::ExtractionResult;

pub use crate::hardware::ExtractorConstructor;
