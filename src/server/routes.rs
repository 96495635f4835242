//! HTTP route handlers for the admin console API.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::moderation::core::action::ModerationAction;
use crate::moderation::core::conversation::{Conversation, Message};
use crate::moderation::core::ids::ConversationId;
use crate::moderation::core::status::ConversationStatus;
use crate::moderation::deep_link::{CHAT_LOGS_PATH, SupportTicketLink};
use crate::moderation::notify::WarningNotice;
use crate::moderation::store::{ActionOutcome, ActionReport, IngestOutcome};
use crate::orders::catalog::Customer;
use crate::orders::draft::{OrderDraft, OrderItem, OrderSummary, PriceBreakdown};
use crate::orders::error::OrderError;
use crate::orders::payment::PaymentLink;
use crate::orders::shipping::{ShippingQuote, ShippingRequest};
use crate::referrals::{ReferralSummary, VendorReferralState, share_message};

use super::state::AppState;

/// Error response: status code plus `{"error": ..}` body.
type ApiError = (StatusCode, Json<ErrorBody>);

/// JSON error payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
}

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

fn not_found(id: &str) -> ApiError {
    api_error(StatusCode::NOT_FOUND, format!("conversation {id} not found"))
}

fn parse_id(raw: &str) -> Result<ConversationId, ApiError> {
    ConversationId::new(raw).map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))
}

fn order_error(err: &OrderError) -> ApiError {
    let status = if err.is_user_fixable() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::BAD_GATEWAY
    };
    api_error(status, err.to_string())
}

/// Create the API router with all routes.
#[must_use]
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/conversations", get(list_conversations))
        .route("/api/conversations/{id}", get(get_conversation))
        .route("/api/conversations/{id}/select", post(select_conversation))
        .route("/api/conversations/{id}/actions", post(apply_action))
        .route("/api/selection", get(get_selection))
        .route("/api/selection/actions", post(apply_to_selection))
        .route("/api/notices", get(list_notices))
        .route(CHAT_LOGS_PATH, get(ingest_ticket))
        .route("/api/orders/quote", post(quote_order))
        .route("/api/orders", post(create_order))
        .route("/api/orders/payment-link", post(payment_link))
        .route("/api/referrals/summary", post(referral_summary))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "shopsphere-console",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Row of the conversation list.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversationSummaryDto {
    /// Conversation id.
    pub id: String,
    /// Customer side identity.
    pub customer_id: String,
    /// Vendor side identity.
    pub vendor_id: String,
    /// Status.
    pub status: ConversationStatus,
    /// Badge shown next to the row.
    pub badge: Option<ConversationStatus>,
    /// Whether the badge renders in the destructive variant.
    pub badge_destructive: bool,
    /// Last non-system message.
    pub preview: Option<String>,
    /// Whether this is a support ticket.
    pub is_support_ticket: bool,
    /// Whether this row is selected.
    pub selected: bool,
}

/// Full conversation with its thread.
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversationDto {
    /// Conversation id.
    pub id: String,
    /// Customer side identity.
    pub customer_id: String,
    /// Vendor side identity.
    pub vendor_id: String,
    /// Customer side avatar.
    pub customer_avatar: String,
    /// Vendor side avatar.
    pub vendor_avatar: String,
    /// Status.
    pub status: ConversationStatus,
    /// Whether this is a support ticket.
    pub is_support_ticket: bool,
    /// Actions offered by the viewer.
    pub available_actions: Vec<ModerationAction>,
    /// Messages in chronological order.
    pub messages: Vec<Message>,
}

impl From<&Conversation> for ConversationDto {
    fn from(c: &Conversation) -> Self {
        Self {
            id: c.id.to_string(),
            customer_id: c.customer_id.clone(),
            vendor_id: c.vendor_id.clone(),
            customer_avatar: c.customer_avatar.clone(),
            vendor_avatar: c.vendor_avatar.clone(),
            status: c.status,
            is_support_ticket: c.is_support_ticket,
            available_actions: c.available_actions(),
            messages: c.messages().to_vec(),
        }
    }
}

/// List conversations in display order.
async fn list_conversations(State(state): State<Arc<AppState>>) -> Json<Vec<ConversationSummaryDto>> {
    let store = state.store.lock().await;
    let selected = store.selected_id();
    let rows = store
        .conversations()
        .iter()
        .map(|c| ConversationSummaryDto {
            id: c.id.to_string(),
            customer_id: c.customer_id.clone(),
            vendor_id: c.vendor_id.clone(),
            status: c.status,
            badge: c.badge(),
            badge_destructive: c.status.is_alarming(),
            preview: c.preview().map(str::to_string),
            is_support_ticket: c.is_support_ticket,
            selected: selected == Some(&c.id),
        })
        .collect();
    Json(rows)
}

/// Fetch one conversation.
async fn get_conversation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ConversationDto>, ApiError> {
    let id = parse_id(&id)?;
    let store = state.store.lock().await;
    store
        .get(&id)
        .map(|c| Json(ConversationDto::from(c)))
        .ok_or_else(|| not_found(id.as_str()))
}

/// Fetch the selected conversation.
async fn get_selection(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ConversationDto>, ApiError> {
    let store = state.store.lock().await;
    store
        .selected()
        .map(|c| Json(ConversationDto::from(c)))
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "no conversation selected"))
}

/// Select a conversation.
async fn select_conversation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;
    let mut store = state.store.lock().await;
    if store.select(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id.as_str()))
    }
}

/// Moderation action request.
#[derive(Debug, Deserialize)]
pub struct ActionRequest {
    /// Action to apply.
    pub action: ModerationAction,
}

fn action_response(outcome: ActionOutcome, id: &str) -> Result<Json<ActionReport>, ApiError> {
    match outcome {
        ActionOutcome::Applied(report) => Ok(Json(report)),
        ActionOutcome::NotFound => Err(not_found(id)),
        ActionOutcome::NothingSelected => Err(api_error(
            StatusCode::CONFLICT,
            "no conversation selected",
        )),
    }
}

/// Apply an action to a conversation.
async fn apply_action(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(request): Json<ActionRequest>,
) -> Result<Json<ActionReport>, ApiError> {
    let id = parse_id(&id)?;
    let outcome = state.store.lock().await.apply_action(&id, request.action);
    action_response(outcome, id.as_str())
}

/// Apply an action to the selected conversation.
async fn apply_to_selection(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ActionRequest>,
) -> Result<Json<ActionReport>, ApiError> {
    let outcome = state.store.lock().await.apply_to_selected(request.action);
    action_response(outcome, "selected")
}

/// Warnings issued since start.
async fn list_notices(State(state): State<Arc<AppState>>) -> Json<Vec<WarningNotice>> {
    Json(state.notices.notices())
}

/// Ingestion result.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    /// What happened to the link.
    #[serde(flatten)]
    pub outcome: IngestOutcome,
    /// Selection afterwards.
    pub selected: Option<String>,
}

/// Open a support ticket from a deep link.
async fn ingest_ticket(
    State(state): State<Arc<AppState>>,
    Query(link): Query<SupportTicketLink>,
) -> Json<IngestResponse> {
    let mut store = state.store.lock().await;
    let outcome = store.ingest_support_ticket(&link);
    Json(IngestResponse {
        outcome,
        selected: store.selected_id().map(ToString::to_string),
    })
}

/// Order pricing request.
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    /// Line items.
    pub items: Vec<OrderItem>,
    /// Shipping details to estimate, if any.
    #[serde(default)]
    pub shipping: Option<ShippingRequest>,
    /// Referral commission entered by the admin.
    #[serde(default)]
    pub referral_commission: f64,
}

/// Order pricing response.
#[derive(Debug, Serialize, Deserialize)]
pub struct QuoteResponse {
    /// Pricing summary.
    pub pricing: PriceBreakdown,
    /// Shipping quote, when shipping details were given.
    pub shipping: Option<ShippingQuote>,
}

fn draft_from(items: Vec<OrderItem>, referral_commission: f64) -> OrderDraft {
    let mut draft = OrderDraft::new();
    for item in items {
        let id = item.product.id.clone();
        if draft.add_product(item.product) {
            draft.set_quantity(&id, item.quantity);
        }
    }
    draft.set_referral_commission(referral_commission);
    draft
}

/// Price an order draft.
async fn quote_order(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>, ApiError> {
    let mut draft = draft_from(request.items, request.referral_commission);

    let shipping = match &request.shipping {
        Some(details) => Some(
            draft
                .estimate_shipping(state.quoter.as_ref(), details)
                .await
                .map_err(|e| order_error(&e))?,
        ),
        None => None,
    };

    Ok(Json(QuoteResponse {
        pricing: draft.breakdown(&state.config.orders.pricing),
        shipping,
    }))
}

/// Order creation request.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Assigned customer.
    #[serde(default)]
    pub customer: Option<Customer>,
    /// Line items.
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Shipping cost already estimated.
    #[serde(default)]
    pub shipping_cost: f64,
    /// Referral commission entered by the admin.
    #[serde(default)]
    pub referral_commission: f64,
}

/// Finalize an order.
async fn create_order(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderSummary>), ApiError> {
    let mut draft = draft_from(request.items, request.referral_commission);
    draft.set_shipping_cost(request.shipping_cost);
    if let Some(customer) = request.customer {
        draft.select_customer(customer);
    }

    let order = draft
        .finalize(&state.config.orders.pricing)
        .map_err(|e| order_error(&e))?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Payment link request.
#[derive(Debug, Deserialize)]
pub struct PaymentLinkRequest {
    /// Amount to collect.
    pub amount: f64,
}

/// Generate a simulated payment link.
async fn payment_link(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PaymentLinkRequest>,
) -> Result<Json<PaymentLink>, ApiError> {
    if !(request.amount.is_finite() && request.amount > 0.0) {
        return Err(api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            "amount must be greater than zero",
        ));
    }
    Ok(Json(PaymentLink::simulated(
        &state.config.orders.pricing.payment_link_base,
        request.amount,
    )))
}

/// Referral dashboard response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReferralResponse {
    /// Discount summary.
    #[serde(flatten)]
    pub summary: ReferralSummary,
    /// Invitation text.
    pub share_message: String,
}

/// Compute the referral dashboard for a vendor.
async fn referral_summary(
    State(state): State<Arc<AppState>>,
    Json(vendor): Json<VendorReferralState>,
) -> Json<ReferralResponse> {
    let program = &state.config.referrals;
    Json(ReferralResponse {
        summary: program.summarize(&vendor),
        share_message: share_message(&vendor.referral_code, &program.signup_url),
    })
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{TimeZone, Utc};
    use tower::ServiceExt;

    use super::*;
    use crate::config::ConsoleConfig;
    use crate::moderation::clock::FixedClock;
    use crate::moderation::core::config::ModerationConfig;
    use crate::moderation::notify::RecordingNotifier;
    use crate::moderation::store::ModerationStore;
    use crate::orders::shipping::VolumetricQuoter;

    fn test_state() -> Arc<AppState> {
        let notices = RecordingNotifier::new();
        let store = ModerationStore::from_config(
            &ModerationConfig::default(),
            Arc::new(notices.clone()),
            Arc::new(FixedClock(
                Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            )),
        )
        .unwrap();
        AppState::with_parts(
            store,
            notices,
            Arc::new(VolumetricQuoter::default()),
            ConsoleConfig::default(),
        )
    }

    async fn call(
        app: Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(create_router(test_state()), "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_shows_badges_and_previews() {
        let (status, body) =
            call(create_router(test_state()), "GET", "/api/conversations", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], "1");
        assert_eq!(body[0]["badge"], serde_json::Value::Null);
        assert_eq!(body[0]["badge_destructive"], false);
        assert_eq!(body[0]["preview"], "That would be great, thank you!");
        assert_eq!(body[1]["badge"], "flagged");
        assert_eq!(body[1]["badge_destructive"], true);
    }

    #[tokio::test]
    async fn test_approve_via_api() {
        let state = test_state();
        let (status, body) = call(
            create_router(state.clone()),
            "POST",
            "/api/conversations/2/actions",
            Some(serde_json::json!({"action": "approve"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["previous"], "flagged");
        assert_eq!(body["status"], "active");
        assert_eq!(body["feedback"]["title"], "Chat Approved");

        let (_, convo) = call(create_router(state), "GET", "/api/conversations/2", None).await;
        assert_eq!(convo["status"], "active");
    }

    #[tokio::test]
    async fn test_unknown_conversation_is_404() {
        let state = test_state();
        let (status, body) = call(
            create_router(state.clone()),
            "POST",
            "/api/conversations/404/actions",
            Some(serde_json::json!({"action": "lock"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("404"));

        let (status, _) =
            call(create_router(state), "POST", "/api/conversations/404/select", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_deep_link_ingestion_then_resolve() {
        let state = test_state();
        let link = SupportTicketLink::new("T1", "VDR9", "Acme Goods", "https://a/b.png", "Payout late");
        let (status, body) = call(create_router(state.clone()), "GET", &link.to_path(), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["outcome"], "created");
        assert_eq!(body["conversation_id"], "T1");
        assert_eq!(body["selected"], "T1");

        let (_, again) = call(create_router(state.clone()), "GET", &link.to_path(), None).await;
        assert_eq!(again["outcome"], "selected");

        let (status, report) = call(
            create_router(state.clone()),
            "POST",
            "/api/selection/actions",
            Some(serde_json::json!({"action": "resolve"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["status"], "resolved");

        let (_, selected) = call(create_router(state), "GET", "/api/selection", None).await;
        assert_eq!(selected["messages"].as_array().map(Vec::len), Some(2));
        assert_eq!(selected["available_actions"], serde_json::json!(["warn_customer", "warn_vendor"]));
    }

    #[tokio::test]
    async fn test_warnings_are_listed() {
        let state = test_state();
        call(
            create_router(state.clone()),
            "POST",
            "/api/conversations/1/actions",
            Some(serde_json::json!({"action": "warn_customer"})),
        )
        .await;
        let (_, notices) = call(create_router(state), "GET", "/api/notices", None).await;
        assert_eq!(notices[0]["recipient"], "CUST001");
    }

    #[tokio::test]
    async fn test_quote_and_create_order() {
        let items = serde_json::json!([{
            "product": {
                "id": "watch",
                "name": "Classic Leather Watch",
                "price": 100.0,
                "commission": {"commission": 10.0, "buffer": {"type": "fixed", "value": 5.0}}
            },
            "quantity": 2
        }]);
        let state = test_state();

        let (status, quote) = call(
            create_router(state.clone()),
            "POST",
            "/api/orders/quote",
            Some(serde_json::json!({
                "items": items,
                "shipping": {
                    "pickup_postcode": "560001",
                    "delivery_postcode": "110001",
                    "cod": true,
                    "weight": 0.5,
                    "length": 10.0,
                    "breadth": 10.0,
                    "height": 10.0
                }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(quote["pricing"]["subtotal"], 210.0);
        assert_eq!(quote["pricing"]["fees"], 35.0);
        assert_eq!(quote["pricing"]["total"], 305.0);

        let (status, body) = call(
            create_router(state.clone()),
            "POST",
            "/api/orders",
            Some(serde_json::json!({"items": items})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "Please select a customer.");

        let (status, order) = call(
            create_router(state),
            "POST",
            "/api/orders",
            Some(serde_json::json!({
                "customer": {"id": "c1", "name": "Priya", "email": "priya@example.com"},
                "items": items,
                "shipping_cost": 95.0
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(order["pricing"]["total"], 305.0);
    }

    #[tokio::test]
    async fn test_invalid_shipping_is_422() {
        let (status, _) = call(
            create_router(test_state()),
            "POST",
            "/api/orders/quote",
            Some(serde_json::json!({
                "items": [],
                "shipping": {
                    "pickup_postcode": "",
                    "delivery_postcode": "110001",
                    "weight": 1.0,
                    "length": 1.0,
                    "breadth": 1.0,
                    "height": 1.0
                }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_failed_quote_is_502() {
        let (status, body) = call(
            create_router(test_state()),
            "POST",
            "/api/orders/quote",
            Some(serde_json::json!({
                "items": [],
                "shipping": {
                    "pickup_postcode": "560001",
                    "delivery_postcode": "110001",
                    "weight": f64::MAX,
                    "length": 1.0,
                    "breadth": 1.0,
                    "height": 1.0
                }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().starts_with("Shipping estimate failed"));
    }

    #[tokio::test]
    async fn test_referral_summary() {
        let (status, body) = call(
            create_router(test_state()),
            "POST",
            "/api/referrals/summary",
            Some(serde_json::json!({
                "referral_code": "VENDOR-A1B2",
                "is_referred_vendor": true,
                "referrals": 3,
                "onboarding_active": true,
                "referral_active": false
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_discount"], 2.0);
        assert_eq!(body["referrals_remaining"], 2);
        assert!(body["share_message"].as_str().unwrap().contains("VENDOR-A1B2"));
    }

    #[tokio::test]
    async fn test_payment_link_rejects_zero() {
        let state = test_state();
        let (status, _) = call(
            create_router(state.clone()),
            "POST",
            "/api/orders/payment-link",
            Some(serde_json::json!({"amount": 0.0})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, link) = call(
            create_router(state),
            "POST",
            "/api/orders/payment-link",
            Some(serde_json::json!({"amount": 305.0})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(link["url"].as_str().unwrap().starts_with("https://razorpay.com/pay/mock_"));
    }
}
