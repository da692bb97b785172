//! 纯文本渲染. 解析器输出的每个字段都可能缺失, 缺失时跳过或显示 N/A.

use rfp_procure_rust::models::{
    Dashboard, DashboardStats, Evaluation, Rfp, RfpStatus, Vendor, VendorResponse,
};
use std::fmt::Write;

const NA: &str = "N/A";

pub fn stats(stats: &DashboardStats) -> String {
    format!(
        "Total Vendors   {}\nTotal RFPs      {}\nActive RFPs     {}\nEvaluated RFPs  {}\n",
        stats.total_vendors, stats.total_rfps, stats.active_rfps, stats.evaluated_rfps
    )
}

/// 首页: 统计 + 最近的 RFP
pub fn dashboard(dashboard: &Dashboard) -> String {
    let mut out = stats(&dashboard.stats);
    out.push_str("\nRecent RFPs\n");
    out.push_str(&rfp_table(&dashboard.recent_rfps));
    out
}

pub fn vendor_table(vendors: &[Vendor]) -> String {
    if vendors.is_empty() {
        return "No vendors yet\n".to_string();
    }
    let mut out = format!("{:>5}  {:<28} {:<32} {}\n", "ID", "NAME", "EMAIL", "RATING");
    for v in vendors {
        let rating = v
            .vendor_rating
            .map(|r| format!("{r:.1}"))
            .unwrap_or_else(|| NA.to_string());
        let _ = writeln!(
            out,
            "{:>5}  {:<28} {:<32} {}",
            v.vendor_id, v.vendor_name, v.vendor_email, rating
        );
    }
    out
}

pub fn rfp_table(rfps: &[Rfp]) -> String {
    if rfps.is_empty() {
        return "No RFPs yet\n".to_string();
    }
    let mut out = format!(
        "{:>5}  {:<10} {:<12} {:<32} {}\n",
        "ID", "STATUS", "CREATED", "TITLE", "BUDGET"
    );
    for r in rfps {
        let budget = r
            .rfp_structured_json
            .as_ref()
            .and_then(|data| data.budget())
            .map(|b| budget_range(b.min, b.max))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{:>5}  {:<10} {:<12} {:<32} {}",
            r.rfp_id,
            r.rfp_status,
            r.rfp_created_at.format("%Y-%m-%d"),
            r.rfp_title,
            budget
        );
    }
    out
}

/// RFP 详情: 描述、解析结果、回复、评估
pub fn rfp_view(rfp: &Rfp, responses: &[VendorResponse], evaluation: Option<&Evaluation>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", rfp.rfp_title, rfp.rfp_status);
    let _ = writeln!(out, "Created: {}", rfp.rfp_created_at.format("%Y-%m-%d"));
    let _ = writeln!(out, "\nDescription\n{}", rfp.rfp_raw_text.trim());

    if let Some(data) = &rfp.rfp_structured_json {
        out.push_str("\nAI Parsed Requirements\n");
        for req in data.requirements() {
            let _ = writeln!(out, "  • {req}");
        }
        if let Some(b) = data.budget() {
            let _ = writeln!(out, "  Budget Range: {}", budget_range(b.min, b.max));
        }
        if let Some(timeline) = data.timeline.as_deref().filter(|t| !t.is_empty()) {
            let _ = writeln!(out, "  Timeline: {timeline}");
        }
        if let Some(location) = data.delivery_location.as_deref().filter(|l| !l.is_empty()) {
            let _ = writeln!(out, "  Delivery Location: {location}");
        }
        if let Some(criteria) = &data.evaluation_criteria {
            let _ = writeln!(out, "  Evaluation Criteria: {}", criteria.items().join(", "));
        }
    }

    if rfp.rfp_status != RfpStatus::Draft {
        out.push('\n');
        out.push_str(&self::responses(responses));
    }
    if let Some(eval) = evaluation {
        out.push('\n');
        out.push_str(&self::evaluation(eval));
    }
    out
}

pub fn responses(responses: &[VendorResponse]) -> String {
    let mut out = format!("Vendor Responses ({})\n", responses.len());
    if responses.is_empty() {
        out.push_str("  Waiting for vendor responses...\n");
        return out;
    }
    for r in responses {
        let star = if r.ai_recommended { "  ⭐ Recommended" } else { "" };
        let _ = writeln!(out, "  Vendor: {}{}", r.display_name(), star);
        let _ = writeln!(
            out,
            "    Price: {}  Delivery: {}  Warranty: {}  Terms: {}",
            r.price().map(|p| format!("${}", amount(p))).unwrap_or_else(|| NA.into()),
            r.delivery_days().map(|d| format!("{d} days")).unwrap_or_else(|| NA.into()),
            r.warranty_years().map(|w| format!("{w} years")).unwrap_or_else(|| NA.into()),
            r.payment_terms().unwrap_or(NA),
        );
        if let Some(score) = r.ai_score {
            let _ = writeln!(out, "    AI Score: {score}/100");
        }
        if !r.is_parsed() && !r.email_raw_text.trim().is_empty() {
            let _ = writeln!(out, "    Raw: {}", r.email_raw_text.trim());
        }
    }
    out
}

pub fn evaluation(eval: &Evaluation) -> String {
    let mut out = String::from("AI Evaluation Results\n");
    for (vendor, score) in eval.ranked() {
        let filled = (score.clamp(0.0, 100.0) / 5.0).round() as usize;
        let _ = writeln!(
            out,
            "  Vendor {:<6} {:<20} {}",
            vendor,
            "█".repeat(filled),
            score
        );
    }
    if let Some(best) = eval.best_vendor_id {
        let _ = writeln!(out, "  ⭐ Best Vendor: #{best}");
    }
    if !eval.reasoning.trim().is_empty() {
        let _ = writeln!(out, "  {}", eval.reasoning.trim());
    }
    out
}

fn budget_range(min: Option<f64>, max: Option<f64>) -> String {
    let side = |v: Option<f64>| v.map(|v| format!("${}", amount(v))).unwrap_or_else(|| "?".into());
    format!("{} - {}", side(min), side(max))
}

/// 千分位, 保留最多两位小数
fn amount(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    let whole = rounded.trunc().abs() as u64;
    let cents = ((rounded.abs() - whole as f64) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    if cents == 0 {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{cents:02}")
    }
}
