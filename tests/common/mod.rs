//! 进程内模拟后端
//!
//! 用 axum 在 127.0.0.1 的随机端口上模拟 RFP 后端: 统一信封、`detail` 错误体、
//! 删除 RFP 返回 204. 状态放在 `Arc<Mutex<_>>` 里, 测试可以直接追加回复、
//! 注入失败, 并检查收到的请求.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower::ServiceBuilder;

const CREATED_AT: &str = "2025-03-01T10:00:00.000000";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
}

#[derive(Debug, Default)]
struct MockState {
    next_id: i64,
    vendors: Vec<Value>,
    rfps: Vec<Value>,
    responses: HashMap<i64, Vec<Value>>,
    evaluation: Option<Value>,
    /// 接下来若干次拉取回复返回 500
    failing_response_fetches: u32,
    /// 列表接口返回 success=false
    reject_listing: Option<String>,
    requests: Vec<RecordedRequest>,
}

impl MockState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn rfp_mut(&mut self, id: i64) -> Option<&mut Value> {
        self.rfps.iter_mut().find(|r| r["rfp_id"] == id)
    }
}

type SharedState = Arc<Mutex<MockState>>;

pub struct MockBackend {
    base_url: String,
    state: SharedState,
    handle: tokio::task::JoinHandle<()>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state: SharedState = Arc::new(Mutex::new(MockState::default()));

        let app = Router::new()
            .route("/vendor_management/vendors", get(list_vendors).post(create_vendor))
            .route(
                "/vendor_management/vendors/:id",
                get(get_vendor).put(update_vendor).delete(delete_vendor),
            )
            .route("/rfp_management/rfps", get(list_rfps).post(create_rfp))
            .route("/rfp_management/rfps/:id", get(get_rfp).delete(delete_rfp))
            .route("/rfp_management/rfps/:id/send", post(send_rfp))
            .route("/rfp_management/rfps/:id/responses", get(list_responses))
            .route("/rfp_management/rfps/:id/evaluate", post(evaluate_rfp))
            .layer(ServiceBuilder::new().map_request({
                let state = state.clone();
                move |req: axum::http::Request<axum::body::Body>| {
                    state.lock().unwrap().requests.push(RecordedRequest {
                        method: req.method().to_string(),
                        path: req.uri().path().to_string(),
                    });
                    req
                }
            }))
            .fallback(not_found)
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend to random port");
        let addr = listener
            .local_addr()
            .expect("Failed to get mock backend local address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock backend server failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", addr.port()),
            state,
            handle,
        }
    }

    pub fn url(&self) -> String {
        self.base_url.clone()
    }

    pub fn add_vendor(&self, name: &str, email: &str) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        state.vendors.push(json!({
            "vendor_id": id,
            "vendor_name": name,
            "vendor_email": email,
            "vendor_rating": null,
            "vendor_created_at": CREATED_AT,
        }));
        id
    }

    /// 模拟供应商回信被解析后追加到 RFP
    pub fn add_response(&self, rfp_id: i64, vendor_id: i64, price: f64) -> i64 {
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let vendor_name = state
            .vendors
            .iter()
            .find(|v| v["vendor_id"] == vendor_id)
            .map(|v| v["vendor_name"].clone())
            .unwrap_or(json!("Unknown Vendor"));
        state.responses.entry(rfp_id).or_default().push(json!({
            "id": id,
            "fk_rfp_id": rfp_id,
            "fk_vendor_id": vendor_id,
            "vendor_name": vendor_name,
            "email_raw_text": format!("We can deliver for {price}"),
            "email_parsed_json": {
                "total_price": price,
                "delivery_days": 21,
                "warranty_years": 1,
                "payment_terms": "Net 30",
                "additional_notes": ""
            },
            "total_price": price,
            "delivery_days": 21,
            "warranty_years": 1.0,
            "payment_terms": "Net 30",
            "ai_score": null,
            "ai_recommended": false,
            "response_created_at": CREATED_AT,
        }));
        id
    }

    pub fn set_evaluation(&self, evaluation: Value) {
        self.state.lock().unwrap().evaluation = Some(evaluation);
    }

    pub fn fail_next_response_fetches(&self, count: u32) {
        self.state.lock().unwrap().failing_response_fetches = count;
    }

    pub fn reject_listing(&self, message: &str) {
        self.state.lock().unwrap().reject_listing = Some(message.to_string());
    }

    pub fn rfp_status(&self, rfp_id: i64) -> Option<String> {
        let state = self.state.lock().unwrap();
        state
            .rfps
            .iter()
            .find(|r| r["rfp_id"] == rfp_id)
            .and_then(|r| r["rfp_status"].as_str().map(str::to_string))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ── Response helpers ────────────────────────────────────────────────

fn ok(data: Value, message: &str) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": message, "data": data })),
    )
        .into_response()
}

fn created(data: Value, message: &str) -> Response {
    (
        StatusCode::CREATED,
        Json(json!({ "success": true, "message": message, "data": data })),
    )
        .into_response()
}

fn detail(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

async fn not_found(method: Method, uri: Uri) -> Response {
    detail(StatusCode::NOT_FOUND, &format!("No route for {method} {uri}"))
}

// ── Vendors ─────────────────────────────────────────────────────────

async fn list_vendors(State(state): State<SharedState>) -> Response {
    let state = state.lock().unwrap();
    ok(Value::Array(state.vendors.clone()), "Vendors retrieved successfully")
}

async fn create_vendor(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let id = state.next_id();
    let vendor = json!({
        "vendor_id": id,
        "vendor_name": body["vendor_name"],
        "vendor_email": body["vendor_email"],
        "vendor_rating": body.get("vendor_rating").cloned().unwrap_or(Value::Null),
        "vendor_created_at": CREATED_AT,
    });
    state.vendors.push(vendor.clone());
    created(vendor, "Vendor created successfully")
}

async fn get_vendor(State(state): State<SharedState>, Path(id): Path<i64>) -> Response {
    let state = state.lock().unwrap();
    match state.vendors.iter().find(|v| v["vendor_id"] == id) {
        Some(vendor) => ok(vendor.clone(), "Vendor retrieved successfully"),
        None => detail(StatusCode::NOT_FOUND, "Vendor not found"),
    }
}

async fn update_vendor(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let Some(vendor) = state.vendors.iter_mut().find(|v| v["vendor_id"] == id) else {
        return detail(StatusCode::NOT_FOUND, "Vendor not found");
    };
    if let Some(fields) = body.as_object() {
        for (key, value) in fields {
            vendor[key] = value.clone();
        }
    }
    ok(vendor.clone(), "Vendor updated successfully")
}

async fn delete_vendor(State(state): State<SharedState>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    let before = state.vendors.len();
    state.vendors.retain(|v| v["vendor_id"] != id);
    if state.vendors.len() == before {
        return detail(StatusCode::NOT_FOUND, "Vendor not found");
    }
    ok(Value::Null, "Vendor deleted successfully")
}

// ── RFPs ────────────────────────────────────────────────────────────

async fn list_rfps(State(state): State<SharedState>) -> Response {
    let state = state.lock().unwrap();
    if let Some(message) = &state.reject_listing {
        return Json(json!({ "success": false, "message": message, "data": null }))
            .into_response();
    }
    ok(Value::Array(state.rfps.clone()), "RFPs retrieved successfully")
}

async fn create_rfp(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let mut state = state.lock().unwrap();
    let id = state.next_id();
    let rfp = json!({
        "rfp_id": id,
        "rfp_title": body["rfp_title"],
        "rfp_raw_text": body["rfp_raw_text"],
        "rfp_structured_json": {
            "title": body["rfp_title"],
            "requirements": ["30 chairs", "30 tables"],
            "budget_range": { "min": 15000, "max": 25000 },
            "timeline": "4 weeks",
            "delivery_location": null,
            "evaluation_criteria": ["price", "warranty"]
        },
        "rfp_status": "DRAFT",
        "rfp_created_at": CREATED_AT,
    });
    state.rfps.push(rfp.clone());
    created(rfp, "RFP created successfully")
}

async fn get_rfp(State(state): State<SharedState>, Path(id): Path<i64>) -> Response {
    let state = state.lock().unwrap();
    match state.rfps.iter().find(|r| r["rfp_id"] == id) {
        Some(rfp) => ok(rfp.clone(), "RFP retrieved successfully"),
        None => detail(StatusCode::NOT_FOUND, "RFP not found"),
    }
}

async fn delete_rfp(State(state): State<SharedState>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    let before = state.rfps.len();
    state.rfps.retain(|r| r["rfp_id"] != id);
    if state.rfps.len() == before {
        return detail(StatusCode::NOT_FOUND, "RFP not found");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn send_rfp(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    let mut state = state.lock().unwrap();
    let ids: Vec<i64> = body["vendor_ids"]
        .as_array()
        .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default();
    let known = ids
        .iter()
        .all(|id| state.vendors.iter().any(|v| v["vendor_id"] == *id));
    if !known {
        return detail(StatusCode::BAD_REQUEST, "Some vendor IDs not found");
    }
    let Some(rfp) = state.rfp_mut(id) else {
        return detail(StatusCode::NOT_FOUND, "RFP not found");
    };
    rfp["rfp_status"] = json!("SENT");
    ok(Value::Null, "RFP sent to vendors successfully")
}

async fn list_responses(State(state): State<SharedState>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    if state.failing_response_fetches > 0 {
        state.failing_response_fetches -= 1;
        return detail(StatusCode::INTERNAL_SERVER_ERROR, "Mail parser unavailable");
    }
    let responses = state.responses.get(&id).cloned().unwrap_or_default();
    ok(Value::Array(responses), "RFP responses retrieved successfully")
}

async fn evaluate_rfp(State(state): State<SharedState>, Path(id): Path<i64>) -> Response {
    let mut state = state.lock().unwrap();
    let has_responses = state.responses.get(&id).is_some_and(|r| !r.is_empty());
    if !has_responses {
        return detail(StatusCode::BAD_REQUEST, "No vendor responses found");
    }
    let evaluation = state.evaluation.clone().unwrap_or_else(|| {
        json!({ "recommendations": {}, "best_vendor_id": null, "reasoning": "" })
    });
    let Some(rfp) = state.rfp_mut(id) else {
        return detail(StatusCode::NOT_FOUND, "RFP not found");
    };
    rfp["rfp_status"] = json!("EVALUATED");
    ok(evaluation, "RFP evaluation completed")
}
