// region:    --- Imports
use super::queries;
use crate::database::DatabaseManager;
use crate::listing::commands::CreateListingCommand;
use crate::listing::model::Listing;
use crate::reservation::model::{Reservation, ReservationStatus, ReservationWithListing};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::Error as SqlxError;
use tracing::info;

// endregion: --- Imports

// region:    --- Listing Queries

/// 숙소 목록 조회(카테고리/검색 필터는 서로 조합 가능)
pub async fn list_listings(
    db_manager: &DatabaseManager,
    category: Option<&str>,
    search: Option<&str>,
) -> Result<Vec<Listing>, SqlxError> {
    info!(
        "{:<12} --> 숙소 목록 조회: 카테고리 {:?}, 검색어 {:?}",
        "Query", category, search
    );
    let category = category.map(str::to_string);
    let pattern = search.map(|term| format!("%{}%", term));
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                match (category, pattern) {
                    (Some(category), Some(pattern)) => {
                        sqlx::query_as::<_, Listing>(queries::SEARCH_LISTINGS_IN_CATEGORY)
                            .bind(category)
                            .bind(pattern)
                            .fetch_all(&mut **tx)
                            .await
                    }
                    (Some(category), None) => {
                        sqlx::query_as::<_, Listing>(queries::GET_LISTINGS_BY_CATEGORY)
                            .bind(category)
                            .fetch_all(&mut **tx)
                            .await
                    }
                    (None, Some(pattern)) => {
                        sqlx::query_as::<_, Listing>(queries::SEARCH_LISTINGS)
                            .bind(pattern)
                            .fetch_all(&mut **tx)
                            .await
                    }
                    (None, None) => {
                        sqlx::query_as::<_, Listing>(queries::GET_ALL_LISTINGS)
                            .fetch_all(&mut **tx)
                            .await
                    }
                }
            })
        })
        .await
}

/// 숙소 단건 조회
pub async fn get_listing(
    db_manager: &DatabaseManager,
    listing_id: i64,
) -> Result<Listing, SqlxError> {
    info!("{:<12} --> 숙소 조회 id: {}", "Query", listing_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Listing>(queries::GET_LISTING)
                    .bind(listing_id)
                    .fetch_one(&mut **tx)
                    .await
            })
        })
        .await
}

/// 소유자별 숙소 조회
pub async fn get_listings_by_owner(
    db_manager: &DatabaseManager,
    user_id: &str,
) -> Result<Vec<Listing>, SqlxError> {
    info!("{:<12} --> 소유자 숙소 조회: {}", "Query", user_id);
    let user_id = user_id.to_string();
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Listing>(queries::GET_LISTINGS_BY_OWNER)
                    .bind(user_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 숙소 등록
pub async fn insert_listing(
    db_manager: &DatabaseManager,
    cmd: &CreateListingCommand,
    rating: f64,
    user_id: &str,
) -> Result<Listing, SqlxError> {
    info!("{:<12} --> 숙소 등록: {}", "Query", cmd.title);
    let title = cmd.title.clone();
    let location = cmd.location.clone();
    let price = cmd.price;
    let image_url = cmd.image_url.clone();
    let category = cmd.category.clone();
    let user_id = user_id.to_string();
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Listing>(queries::INSERT_LISTING)
                    .bind(title)
                    .bind(location)
                    .bind(price)
                    .bind(rating)
                    .bind(image_url)
                    .bind(category)
                    .bind(user_id)
                    .fetch_one(&mut **tx)
                    .await
            })
        })
        .await
}

// endregion: --- Listing Queries

// region:    --- Reservation Queries

/// 예약 생성(pending_payment 상태로 저장)
pub async fn insert_reservation(
    db_manager: &DatabaseManager,
    listing_id: i64,
    user_id: &str,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guests: i32,
    total_amount: Decimal,
) -> Result<Reservation, SqlxError> {
    info!(
        "{:<12} --> 예약 생성: 숙소 id {}, 사용자 {}",
        "Query", listing_id, user_id
    );
    let user_id = user_id.to_string();
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Reservation>(queries::INSERT_RESERVATION)
                    .bind(listing_id)
                    .bind(user_id)
                    .bind(check_in)
                    .bind(check_out)
                    .bind(guests)
                    .bind(total_amount)
                    .bind(ReservationStatus::PendingPayment.as_str())
                    .fetch_one(&mut **tx)
                    .await
            })
        })
        .await
}

/// 예약 단건 조회
pub async fn get_reservation(
    db_manager: &DatabaseManager,
    reservation_id: i64,
) -> Result<Reservation, SqlxError> {
    info!("{:<12} --> 예약 조회 id: {}", "Query", reservation_id);
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Reservation>(queries::GET_RESERVATION)
                    .bind(reservation_id)
                    .fetch_one(&mut **tx)
                    .await
            })
        })
        .await
}

/// 사용자 예약 목록 조회(숙소 요약 포함)
pub async fn get_reservations_by_user(
    db_manager: &DatabaseManager,
    user_id: &str,
) -> Result<Vec<ReservationWithListing>, SqlxError> {
    info!("{:<12} --> 사용자 예약 목록 조회: {}", "Query", user_id);
    let user_id = user_id.to_string();
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, ReservationWithListing>(queries::GET_RESERVATIONS_BY_USER)
                    .bind(user_id)
                    .fetch_all(&mut **tx)
                    .await
            })
        })
        .await
}

/// 결제 소스 식별자/금액 저장
pub async fn set_payment_source(
    db_manager: &DatabaseManager,
    reservation_id: i64,
    source_id: &str,
    amount: i64,
) -> Result<Reservation, SqlxError> {
    info!(
        "{:<12} --> 결제 소스 저장: 예약 id {}, 소스 {}",
        "Query", reservation_id, source_id
    );
    let source_id = source_id.to_string();
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Reservation>(queries::SET_PAYMENT_SOURCE)
                    .bind(reservation_id)
                    .bind(source_id)
                    .bind(amount)
                    .fetch_one(&mut **tx)
                    .await
            })
        })
        .await
}

/// 예약 상태 갱신
pub async fn set_reservation_status(
    db_manager: &DatabaseManager,
    reservation_id: i64,
    status: ReservationStatus,
) -> Result<Reservation, SqlxError> {
    info!(
        "{:<12} --> 예약 상태 갱신: id {}, 상태 {}",
        "Query",
        reservation_id,
        status.as_str()
    );
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Reservation>(queries::SET_RESERVATION_STATUS)
                    .bind(reservation_id)
                    .bind(status.as_str())
                    .fetch_one(&mut **tx)
                    .await
            })
        })
        .await
}

/// 결제 완료 처리(상태 + 결제 식별자)
pub async fn mark_reservation_paid(
    db_manager: &DatabaseManager,
    reservation_id: i64,
    payment_id: &str,
) -> Result<Reservation, SqlxError> {
    info!(
        "{:<12} --> 결제 완료 처리: 예약 id {}, 결제 {}",
        "Query", reservation_id, payment_id
    );
    let payment_id = payment_id.to_string();
    db_manager
        .transaction(|tx| {
            Box::pin(async move {
                sqlx::query_as::<_, Reservation>(queries::MARK_RESERVATION_PAID)
                    .bind(reservation_id)
                    .bind(payment_id)
                    .fetch_one(&mut **tx)
                    .await
            })
        })
        .await
}

// endregion: --- Reservation Queries
