use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 评估结果 (不落库, 每个视图最多持有一份)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// 供应商ID (字符串键) -> 分数, 保持服务端顺序
    #[serde(default)]
    pub recommendations: IndexMap<String, f64>,
    #[serde(default)]
    pub best_vendor_id: Option<i64>,
    #[serde(default)]
    pub reasoning: String,
}

impl Evaluation {
    pub fn score_for(&self, vendor_id: i64) -> Option<f64> {
        self.recommendations.get(&vendor_id.to_string()).copied()
    }

    /// 按分数降序
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<_> = self
            .recommendations
            .iter()
            .map(|(vendor, score)| (vendor.as_str(), *score))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}
