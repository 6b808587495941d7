use crate::core::{CryptoImplementation, OverallRisk};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub crypto_implementations: Vec<CryptoImplementation>,
    pub analysis_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub implementation_id: String,
    pub analysis_type: String,
    pub risk_score: f64,
    pub anomaly_detected: bool,
    pub confidence: f64,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_analyzed: u64,
    pub high_risk_count: u64,
    pub anomalies_detected: u64,
    pub overall_risk_level: OverallRisk,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub results: Vec<AnalysisResult>,
    pub summary: AnalysisSummary,
}
