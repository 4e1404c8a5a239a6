//! Optional AI analysis and generation features
//!
//! Everything here sits outside the parse/diff/generate pipeline; its absence
//! or failure never changes the pipeline's own output.

pub mod mock;
pub mod provider;

pub use mock::MockProvider;
pub use provider::{new_provider, AnalysisResult, ChatProvider, NoOpProvider, OptimizationResult, Provider};
