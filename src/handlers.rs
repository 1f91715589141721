// region:    --- Imports
use crate::booking::commands::{
    finalize_payment, handle_checkout as command_handle_checkout, CheckoutCommand, PaymentOutcome,
};
use crate::database::DatabaseManager;
use crate::error::ServiceError;
use crate::listing::commands::{
    handle_create_listing as command_handle_create_listing, CreateListingCommand,
};
use crate::payment::PayMongoClient;
use crate::query;
use crate::session::SessionContext;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

// endregion: --- Imports

// 핸들러 공유 상태: 데이터베이스 매니저 + 결제 게이트웨이 클라이언트
pub type AppState = (Arc<DatabaseManager>, Arc<PayMongoClient>);

// region:    --- Router

/// 라우터 구성
pub fn routes(db_manager: Arc<DatabaseManager>, gateway: Arc<PayMongoClient>) -> Router {
    // 테스트 페이지를 위한 cors 설정
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/listings", get(handle_get_listings).post(handle_create_listing))
        .route("/listings/:id", get(handle_get_listing))
        .route("/my/listings", get(handle_get_my_listings))
        .route("/my/reservations", get(handle_get_my_reservations))
        .route("/reservations/checkout", post(handle_checkout))
        .route("/payments/success", get(handle_payment_success))
        .route("/payments/failed", get(handle_payment_failed))
        .layer(cors)
        .with_state((db_manager, gateway))
}

// endregion: --- Router

// region:    --- Params

/// 숙소 목록 필터
#[derive(Debug, Deserialize)]
pub struct ListingFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

/// 결제 복귀 콜백 파라미터
#[derive(Debug, Deserialize)]
pub struct PaymentReturnParams {
    pub reservation_id: i64,
}

// endregion: --- Params

// region:    --- Command Handlers

/// 체크아웃 요청 처리
pub async fn handle_checkout(
    State((db_manager, gateway)): State<AppState>,
    session: SessionContext,
    Json(cmd): Json<CheckoutCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 체크아웃 요청 처리 시작: {:?}", "Command", cmd);

    match command_handle_checkout(cmd, &session, &db_manager, gateway.as_ref()).await {
        Ok(receipt) => (
            axum::http::StatusCode::OK,
            Json(serde_json::json!({
                "message": "Reservation created. Complete the payment at the checkout URL.",
                "reservation": receipt.reservation,
                "checkout_url": receipt.checkout_url,
            })),
        )
            .into_response(),
        Err(e) => {
            error!("{:<12} --> 체크아웃 실패: {}", "Command", e);
            e.into_response()
        }
    }
}

/// 숙소 등록 요청 처리
pub async fn handle_create_listing(
    State((db_manager, _)): State<AppState>,
    session: SessionContext,
    Json(cmd): Json<CreateListingCommand>,
) -> impl IntoResponse {
    info!("{:<12} --> 숙소 등록 요청 처리 시작", "Command");

    match command_handle_create_listing(cmd, &session, &db_manager).await {
        Ok(listing) => (axum::http::StatusCode::CREATED, Json(listing)).into_response(),
        Err(e) => {
            error!("{:<12} --> 숙소 등록 실패: {}", "Command", e);
            e.into_response()
        }
    }
}

/// 결제 성공 복귀 처리(게이트웨이 리다이렉트가 호출)
pub async fn handle_payment_success(
    State((db_manager, gateway)): State<AppState>,
    Query(params): Query<PaymentReturnParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 결제 성공 복귀: 예약 id {}",
        "Command", params.reservation_id
    );

    match finalize_payment(
        params.reservation_id,
        PaymentOutcome::Success,
        &db_manager,
        gateway.as_ref(),
    )
    .await
    {
        Ok(reservation) => Json(serde_json::json!({
            "message": "Payment status recorded.",
            "reservation_id": reservation.id,
            "status": reservation.status,
        }))
        .into_response(),
        Err(e) => {
            error!("{:<12} --> 결제 성공 복귀 처리 실패: {}", "Command", e);
            e.into_response()
        }
    }
}

/// 결제 실패 복귀 처리(게이트웨이 리다이렉트가 호출)
pub async fn handle_payment_failed(
    State((db_manager, gateway)): State<AppState>,
    Query(params): Query<PaymentReturnParams>,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 결제 실패 복귀: 예약 id {}",
        "Command", params.reservation_id
    );

    match finalize_payment(
        params.reservation_id,
        PaymentOutcome::Failure,
        &db_manager,
        gateway.as_ref(),
    )
    .await
    {
        Ok(reservation) => Json(serde_json::json!({
            "message": "Payment failure recorded.",
            "reservation_id": reservation.id,
            "status": reservation.status,
        }))
        .into_response(),
        Err(e) => {
            error!("{:<12} --> 결제 실패 복귀 처리 실패: {}", "Command", e);
            e.into_response()
        }
    }
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 숙소 목록 조회
pub async fn handle_get_listings(
    State((db_manager, _)): State<AppState>,
    Query(filter): Query<ListingFilter>,
) -> impl IntoResponse {
    info!("{:<12} --> 숙소 목록 조회: {:?}", "HandlerQuery", filter);
    match query::handlers::list_listings(
        &db_manager,
        filter.category.as_deref(),
        filter.search.as_deref(),
    )
    .await
    {
        Ok(listings) => Json(listings).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 숙소 조회
pub async fn handle_get_listing(
    State((db_manager, _)): State<AppState>,
    Path(listing_id): Path<i64>,
) -> impl IntoResponse {
    info!("{:<12} --> 숙소 조회 id: {}", "HandlerQuery", listing_id);
    match query::handlers::get_listing(&db_manager, listing_id).await {
        Ok(listing) => Json(listing).into_response(),
        Err(e) => ServiceError::from_sqlx(e, "listing", listing_id).into_response(),
    }
}

/// 내 숙소 목록 조회
pub async fn handle_get_my_listings(
    State((db_manager, _)): State<AppState>,
    session: SessionContext,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 내 숙소 목록 조회: {}",
        "HandlerQuery", session.user_id
    );
    match query::handlers::get_listings_by_owner(&db_manager, &session.user_id).await {
        Ok(listings) => Json(listings).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// 내 예약 목록 조회(숙소 요약 포함)
pub async fn handle_get_my_reservations(
    State((db_manager, _)): State<AppState>,
    session: SessionContext,
) -> impl IntoResponse {
    info!(
        "{:<12} --> 내 예약 목록 조회: {}",
        "HandlerQuery", session.user_id
    );
    match query::handlers::get_reservations_by_user(&db_manager, &session.user_id).await {
        Ok(reservations) => Json(reservations).into_response(),
        Err(e) => (axum::http::StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

// endregion: --- Query Handlers
