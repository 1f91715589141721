use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// 예약 모델
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Reservation {
    pub id: i64,
    pub listing_id: i64,
    pub user_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
    pub total_amount: Decimal,
    pub status: String,
    pub payment_source_id: Option<String>,
    pub payment_amount: Option<i64>,
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    // paid와 payment_failed는 종결 상태
    pub fn is_terminal(&self) -> bool {
        self.status == ReservationStatus::Paid.as_str()
            || self.status == ReservationStatus::PaymentFailed.as_str()
    }
}

// 예약 상태: pending_payment -> paid | payment_failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationStatus {
    PendingPayment,
    Paid,
    PaymentFailed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::PendingPayment => "pending_payment",
            ReservationStatus::Paid => "paid",
            ReservationStatus::PaymentFailed => "payment_failed",
        }
    }
}

// 예약 목록 조회용: 숙소 요약이 붙은 예약
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct ReservationWithListing {
    pub id: i64,
    pub listing_id: i64,
    pub user_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
    pub total_amount: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub listing_title: String,
    pub listing_location: String,
    pub listing_image_url: String,
    pub listing_price: Decimal,
}
