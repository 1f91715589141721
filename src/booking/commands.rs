/// 예약/결제 오케스트레이션 커맨드 처리
/// 1. 체크아웃: 예약 생성 + 결제 소스 요청
/// 2. 결제 복귀: 성공/실패 콜백에 따른 상태 확정
// region:    --- Imports
use crate::database::DatabaseManager;
use crate::error::ServiceError;
use crate::listing::model::Listing;
use crate::payment::{GatewayError, PaymentGateway, SourceStatus};
use crate::query;
use crate::reservation::model::{Reservation, ReservationStatus};
use crate::session::SessionContext;
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
// endregion: --- Imports

// region:    --- Commands

/// 체크아웃 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckoutCommand {
    pub listing_id: i64,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: i32,
}

/// 결제 복귀 콜백의 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentOutcome {
    Success,
    Failure,
}

/// 체크아웃 결과: 생성된 예약과 이동할 체크아웃 URL
#[derive(Debug, Serialize)]
pub struct CheckoutReceipt {
    pub reservation: Reservation,
    pub checkout_url: String,
}

// 최소 숙박 인원
const MIN_GUESTS: i32 = 1;

/// 숙박 총액 계산: 1박 요금 x 숙박일수
/// 날짜가 없거나 기간이 양수가 아니면 0
pub fn compute_total(
    nightly_price: Decimal,
    check_in: Option<NaiveDate>,
    check_out: Option<NaiveDate>,
) -> Decimal {
    let (Some(check_in), Some(check_out)) = (check_in, check_out) else {
        return Decimal::ZERO;
    };
    let nights = (check_out - check_in).num_days();
    if nights <= 0 {
        return Decimal::ZERO;
    }
    nightly_price * Decimal::from(nights)
}

/// 페소 금액을 센타보(최소 화폐 단위) 정수로 변환
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    (amount * Decimal::from(100)).round().to_i64()
}

/// 1. 체크아웃: 예약 생성 후 결제 소스 요청까지 순차 실행
pub async fn handle_checkout(
    cmd: CheckoutCommand,
    session: &SessionContext,
    db_manager: &DatabaseManager,
    gateway: &impl PaymentGateway,
) -> Result<CheckoutReceipt, ServiceError> {
    info!("{:<12} --> 체크아웃 처리 시작: {:?}", "Command", cmd);

    let listing = query::handlers::get_listing(db_manager, cmd.listing_id)
        .await
        .map_err(|e| ServiceError::from_sqlx(e, "listing", cmd.listing_id))?;

    let reservation = create_reservation(&cmd, session, &listing, db_manager).await?;

    request_payment_redirect(reservation, db_manager, gateway).await
}

/// 예약 생성: 검증 통과 시 pending_payment로 저장
pub async fn create_reservation(
    cmd: &CheckoutCommand,
    session: &SessionContext,
    listing: &Listing,
    db_manager: &DatabaseManager,
) -> Result<Reservation, ServiceError> {
    let (Some(check_in), Some(check_out)) = (cmd.check_in, cmd.check_out) else {
        return Err(ServiceError::Validation(
            "check-in and check-out dates are required".to_string(),
        ));
    };

    // 체크아웃 날짜는 체크인 이후여야 한다
    if check_out <= check_in {
        return Err(ServiceError::Validation(
            "check-out must be after check-in".to_string(),
        ));
    }

    if cmd.guests < MIN_GUESTS {
        return Err(ServiceError::Validation(
            "at least one guest is required".to_string(),
        ));
    }

    let total = compute_total(listing.price, Some(check_in), Some(check_out));

    let reservation = query::handlers::insert_reservation(
        db_manager,
        listing.id,
        &session.user_id,
        check_in,
        check_out,
        cmd.guests,
        total,
    )
    .await?;

    info!(
        "{:<12} --> 예약 생성 완료: id {}, 총액 {}",
        "Command", reservation.id, reservation.total_amount
    );

    Ok(reservation)
}

/// 2. 결제 소스 요청: 소스 식별자/금액 저장 후 체크아웃 URL 반환
/// 실패하면 예약은 pending_payment로 남는다
pub async fn request_payment_redirect(
    reservation: Reservation,
    db_manager: &DatabaseManager,
    gateway: &impl PaymentGateway,
) -> Result<CheckoutReceipt, ServiceError> {
    let amount = to_minor_units(reservation.total_amount).ok_or_else(|| {
        ServiceError::Validation("total amount cannot be represented in centavos".to_string())
    })?;

    let source = gateway.create_source(amount, reservation.id).await?;

    let Some(checkout_url) = source.checkout_url else {
        return Err(ServiceError::Gateway(GatewayError::MissingCheckoutUrl));
    };

    let updated =
        query::handlers::set_payment_source(db_manager, reservation.id, &source.id, amount).await?;

    info!(
        "{:<12} --> 결제 소스 저장 완료: 예약 id {}, 소스 {}",
        "Command", updated.id, source.id
    );

    Ok(CheckoutReceipt {
        reservation: updated,
        checkout_url,
    })
}

/// 3. 결제 복귀 처리: 이미 종결된 예약은 그대로 반환(콜백 중복 호출 멱등)
pub async fn finalize_payment(
    reservation_id: i64,
    outcome: PaymentOutcome,
    db_manager: &DatabaseManager,
    gateway: &impl PaymentGateway,
) -> Result<Reservation, ServiceError> {
    info!(
        "{:<12} --> 결제 복귀 처리 시작: 예약 id {}, 결과 {:?}",
        "Command", reservation_id, outcome
    );

    let reservation = query::handlers::get_reservation(db_manager, reservation_id)
        .await
        .map_err(|e| ServiceError::from_sqlx(e, "reservation", reservation_id))?;

    if reservation.is_terminal() {
        info!(
            "{:<12} --> 이미 종결된 예약: id {}, 상태 {}",
            "Command", reservation.id, reservation.status
        );
        return Ok(reservation);
    }

    match outcome {
        PaymentOutcome::Failure => query::handlers::set_reservation_status(
            db_manager,
            reservation_id,
            ReservationStatus::PaymentFailed,
        )
        .await
        .map_err(Into::into),
        PaymentOutcome::Success => confirm_payment(reservation, db_manager, gateway).await,
    }
}

/// 성공 콜백 검증: 리다이렉트를 그대로 믿지 않고 게이트웨이에 소스 상태를 재조회한다
async fn confirm_payment(
    reservation: Reservation,
    db_manager: &DatabaseManager,
    gateway: &impl PaymentGateway,
) -> Result<Reservation, ServiceError> {
    let Some(source_id) = reservation.payment_source_id.clone() else {
        return Err(ServiceError::Gateway(GatewayError::NoSourceOnRecord));
    };

    let source = gateway.retrieve_source(&source_id).await?;

    match source.status {
        SourceStatus::Chargeable => {
            let amount = match reservation.payment_amount {
                Some(amount) => amount,
                None => to_minor_units(reservation.total_amount).ok_or_else(|| {
                    ServiceError::Validation(
                        "total amount cannot be represented in centavos".to_string(),
                    )
                })?,
            };
            let description = format!("Reservation #{}", reservation.id);
            let payment_id = gateway
                .create_payment(&source_id, amount, &description)
                .await?;
            query::handlers::mark_reservation_paid(db_manager, reservation.id, &payment_id)
                .await
                .map_err(Into::into)
        }
        SourceStatus::Cancelled | SourceStatus::Expired => {
            warn!(
                "{:<12} --> 소멸된 소스: 예약 id {}, 상태 {:?}",
                "Command", reservation.id, source.status
            );
            query::handlers::set_reservation_status(
                db_manager,
                reservation.id,
                ReservationStatus::PaymentFailed,
            )
            .await
            .map_err(Into::into)
        }
        SourceStatus::Pending | SourceStatus::Unknown => {
            // 게이트웨이가 아직 확정하지 않았으면 pending_payment 그대로 둔다
            warn!(
                "{:<12} --> 미확정 소스: 예약 id {}, 상태 {:?}",
                "Command", reservation.id, source.status
            );
            Ok(reservation)
        }
    }
}

// endregion: --- Commands

// region:    --- Tests


// endregion: --- Tests
