mod analysis;
mod implementation;
mod risk;

pub use analysis::{AnalysisRequest, AnalysisResponse, AnalysisResult, AnalysisSummary};
pub use implementation::CryptoImplementation;
pub use risk::OverallRisk;
