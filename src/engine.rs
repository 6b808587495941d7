use crate::core::{AnalysisRequest, AnalysisResponse, AnalysisResult, AnalysisSummary, OverallRisk};
use crate::rules;

pub const HIGH_RISK_THRESHOLD: f64 = 70.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct Engine;

impl Engine {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, request: &AnalysisRequest) -> AnalysisResponse {
        let results: Vec<AnalysisResult> = request
            .crypto_implementations
            .iter()
            .map(|implementation| rules::assess(implementation, &request.analysis_type))
            .collect();
        let summary = summarize(&results);
        AnalysisResponse { results, summary }
    }
}

pub fn summarize(results: &[AnalysisResult]) -> AnalysisSummary {
    let high_risk_count = results
        .iter()
        .filter(|r| r.risk_score > HIGH_RISK_THRESHOLD)
        .count() as u64;
    let anomalies_detected = results.iter().filter(|r| r.anomaly_detected).count() as u64;

    AnalysisSummary {
        total_analyzed: results.len() as u64,
        high_risk_count,
        anomalies_detected,
        overall_risk_level: if high_risk_count > 0 {
            OverallRisk::High
        } else {
            OverallRisk::Low
        },
    }
}
