use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub name: &'static str,
    pub version: &'static str,
    #[serde(rename = "type")]
    pub model_type: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
}

// 手で管理する一覧。評価器はこの一覧を参照しない。
pub fn available_models() -> ModelsResponse {
    ModelsResponse {
        models: vec![
            ModelInfo {
                name: "anomaly_detector",
                version: "1.0.0",
                model_type: "anomaly_detection",
                active: true,
            },
            ModelInfo {
                name: "risk_scorer",
                version: "1.2.1",
                model_type: "risk_scoring",
                active: true,
            },
        ],
    }
}
