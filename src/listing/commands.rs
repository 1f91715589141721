/// 숙소 관련 커맨드 처리
// region:    --- Imports
use crate::database::DatabaseManager;
use crate::error::ServiceError;
use crate::listing::model::Listing;
use crate::query;
use crate::session::SessionContext;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

// region:    --- Commands

/// 숙소 등록 명령
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateListingCommand {
    pub title: String,
    pub location: String,
    pub price: Decimal,
    pub rating: Option<f64>,
    pub image_url: String,
    pub category: String,
}

// 신규 숙소 기본 평점
const DEFAULT_RATING: f64 = 5.0;

/// 숙소 등록
pub async fn handle_create_listing(
    cmd: CreateListingCommand,
    session: &SessionContext,
    db_manager: &DatabaseManager,
) -> Result<Listing, ServiceError> {
    info!("{:<12} --> 숙소 등록 처리 시작: {:?}", "Command", cmd);

    for (field, value) in [
        ("title", &cmd.title),
        ("location", &cmd.location),
        ("image_url", &cmd.image_url),
        ("category", &cmd.category),
    ] {
        if value.trim().is_empty() {
            return Err(ServiceError::Validation(format!("{field} is required")));
        }
    }

    if cmd.price <= Decimal::ZERO {
        return Err(ServiceError::Validation(
            "price must be a positive number".to_string(),
        ));
    }

    let rating = cmd.rating.unwrap_or(DEFAULT_RATING);
    let listing = query::handlers::insert_listing(db_manager, &cmd, rating, &session.user_id).await?;

    info!(
        "{:<12} --> 숙소 등록 완료: id {}, 소유자 {}",
        "Command", listing.id, listing.user_id
    );

    Ok(listing)
}

// endregion: --- Commands
