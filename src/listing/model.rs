use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// 숙소 모델
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub location: String,
    pub price: Decimal,
    pub rating: f64,
    pub image_url: String,
    pub category: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}
