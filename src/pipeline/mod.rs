pub mod analyzer;
pub mod classify;
pub mod confidence;
pub mod explain;
pub mod extraction;
pub mod insight;

pub use analyzer::ReportAnalyzer;
pub use explain::explain;

use thiserror::Error;

use crate::knowledge::KnowledgeError;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Input too large: {len} characters (limit {max})")]
    InputTooLarge { len: usize, max: usize },

    #[error("Knowledge base error: {0}")]
    Knowledge(#[from] KnowledgeError),
}
