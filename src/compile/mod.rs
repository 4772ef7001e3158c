//! The two-pass compilation pipeline
//!
//! Compilation runs [`lower`] and then [`push_down`]. Lowering untangles
//! context and expands deferred leaves; flattening bakes the accumulated
//! transforms into every leaf. The intermediate [`StagedNode`] tree between
//! them is constructed by the first pass and consumed exactly once by the
//! second.

pub mod flatten;
pub mod lower;
pub mod staged;

pub use flatten::push_down;
pub use lower::lower;
pub use staged::StagedNode;
