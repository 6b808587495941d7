use crate::core::{AnalysisResult, CryptoImplementation};

pub const BASELINE_RISK_SCORE: f64 = 20.0;
pub const LEGACY_VERSION_RISK_SCORE: f64 = 80.0;
pub const SHORT_KEY_RISK_SCORE: f64 = 70.0;
pub const WEAK_CIPHER_RISK_SCORE: f64 = 90.0;
pub const RESULT_CONFIDENCE: f64 = 0.95;
pub const MIN_KEY_SIZE_BITS: u32 = 2048;

pub const RECOMMEND_UPGRADE_PROTOCOL: &str = "Upgrade to TLS 1.2 or higher";
pub const RECOMMEND_INCREASE_KEY_SIZE: &str = "Increase key size to 2048 bits or higher";
pub const RECOMMEND_REPLACE_CIPHER: &str = "Replace weak cipher suite";

const LEGACY_PROTOCOL_VERSIONS: [&str; 2] = ["1.0", "1.1"];
const WEAK_CIPHER_MARKERS: [&str; 2] = ["RC4", "MD5"];

#[derive(Debug)]
struct RuleState {
    risk_score: f64,
    anomaly_detected: bool,
    recommendations: Vec<String>,
}

pub fn assess(implementation: &CryptoImplementation, analysis_type: &str) -> AnalysisResult {
    let mut state = RuleState {
        risk_score: BASELINE_RISK_SCORE,
        anomaly_detected: false,
        recommendations: Vec::new(),
    };

    // 規則の順序は固定。先頭のバージョン規則だけはスコアを代入し、
    // 以降の規則は max でのみ引き上げる。
    legacy_protocol_version(implementation, &mut state);
    short_key_size(implementation, &mut state);
    weak_cipher_suite(implementation, &mut state);

    AnalysisResult {
        implementation_id: implementation.id.clone(),
        analysis_type: analysis_type.to_string(),
        risk_score: state.risk_score,
        anomaly_detected: state.anomaly_detected,
        confidence: RESULT_CONFIDENCE,
        recommendations: state.recommendations,
    }
}

fn legacy_protocol_version(implementation: &CryptoImplementation, state: &mut RuleState) {
    if !is_legacy_protocol_version(&implementation.protocol_version) {
        return;
    }
    state.risk_score = LEGACY_VERSION_RISK_SCORE;
    state.anomaly_detected = true;
    state
        .recommendations
        .push(RECOMMEND_UPGRADE_PROTOCOL.to_string());
}

fn short_key_size(implementation: &CryptoImplementation, state: &mut RuleState) {
    let Some(key_size) = implementation.key_size else {
        return;
    };
    if key_size >= MIN_KEY_SIZE_BITS {
        return;
    }
    state.risk_score = state.risk_score.max(SHORT_KEY_RISK_SCORE);
    state.anomaly_detected = true;
    state
        .recommendations
        .push(RECOMMEND_INCREASE_KEY_SIZE.to_string());
}

fn weak_cipher_suite(implementation: &CryptoImplementation, state: &mut RuleState) {
    if !has_weak_cipher_marker(&implementation.cipher_suite) {
        return;
    }
    state.risk_score = state.risk_score.max(WEAK_CIPHER_RISK_SCORE);
    state.anomaly_detected = true;
    state
        .recommendations
        .push(RECOMMEND_REPLACE_CIPHER.to_string());
}

fn is_legacy_protocol_version(version: &str) -> bool {
    LEGACY_PROTOCOL_VERSIONS.contains(&version)
}

// 大文字小文字は区別する（"rc4" は対象外）。
fn has_weak_cipher_marker(cipher_suite: &str) -> bool {
    WEAK_CIPHER_MARKERS
        .iter()
        .any(|marker| cipher_suite.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_versions_match_exactly() {
        assert!(is_legacy_protocol_version("1.0"));
        assert!(is_legacy_protocol_version("1.1"));
        assert!(!is_legacy_protocol_version("1.2"));
        assert!(!is_legacy_protocol_version("1.0 "));
        assert!(!is_legacy_protocol_version("TLS 1.0"));
    }

    #[test]
    fn weak_cipher_marker_is_substring_match() {
        assert!(has_weak_cipher_marker("TLS_RSA_WITH_RC4_128_SHA"));
        assert!(has_weak_cipher_marker("TLS_RSA_WITH_AES_128_CBC_MD5"));
        assert!(has_weak_cipher_marker("RC4-MD5"));
        assert!(!has_weak_cipher_marker("TLS_AES_256_GCM_SHA384"));
    }

    #[test]
    fn weak_cipher_marker_is_case_sensitive() {
        assert!(!has_weak_cipher_marker("rc4-md5"));
    }
}
