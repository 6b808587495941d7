use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoImplementation {
    pub id: String,
    pub protocol: String,
    pub protocol_version: String,
    pub cipher_suite: String,
    /// 鍵長（bit）。不明な場合は欠落/null（鍵長では減点しない）。
    #[serde(default)]
    pub key_size: Option<u32>,
    /// 事前信頼度 [0,1]。受理するが現在のスコアリングでは使用しない。
    pub confidence_score: f64,
}
