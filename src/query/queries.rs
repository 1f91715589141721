/// 전체 숙소 조회
pub const GET_ALL_LISTINGS: &str =
    "SELECT id, title, location, price, rating, image_url, category, user_id, created_at FROM listings ORDER BY created_at DESC";

/// 카테고리별 숙소 조회
pub const GET_LISTINGS_BY_CATEGORY: &str =
    "SELECT id, title, location, price, rating, image_url, category, user_id, created_at FROM listings WHERE category = $1 ORDER BY created_at DESC";

/// 제목/지역 검색
pub const SEARCH_LISTINGS: &str =
    "SELECT id, title, location, price, rating, image_url, category, user_id, created_at FROM listings WHERE (title ILIKE $1 OR location ILIKE $1) ORDER BY created_at DESC";

/// 카테고리 안에서 제목/지역 검색
pub const SEARCH_LISTINGS_IN_CATEGORY: &str =
    "SELECT id, title, location, price, rating, image_url, category, user_id, created_at FROM listings WHERE category = $1 AND (title ILIKE $2 OR location ILIKE $2) ORDER BY created_at DESC";

/// 소유자별 숙소 조회
pub const GET_LISTINGS_BY_OWNER: &str =
    "SELECT id, title, location, price, rating, image_url, category, user_id, created_at FROM listings WHERE user_id = $1 ORDER BY created_at DESC";

/// 숙소 단건 조회
pub const GET_LISTING: &str =
    "SELECT id, title, location, price, rating, image_url, category, user_id, created_at FROM listings WHERE id = $1";

/// 숙소 등록
pub const INSERT_LISTING: &str = r#"
    INSERT INTO listings (title, location, price, rating, image_url, category, user_id)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
    RETURNING id, title, location, price, rating, image_url, category, user_id, created_at
"#;

/// 예약 생성(pending_payment)
pub const INSERT_RESERVATION: &str = r#"
    INSERT INTO reservations (listing_id, user_id, check_in, check_out, guests, total_amount, status)
    VALUES ($1, $2, $3, $4, $5, $6, $7)
    RETURNING id, listing_id, user_id, check_in, check_out, guests, total_amount, status,
              payment_source_id, payment_amount, payment_id, created_at
"#;

/// 예약 단건 조회
pub const GET_RESERVATION: &str = r#"
    SELECT id, listing_id, user_id, check_in, check_out, guests, total_amount, status,
           payment_source_id, payment_amount, payment_id, created_at
    FROM reservations
    WHERE id = $1
"#;

/// 사용자 예약 목록 조회(숙소 요약 포함)
pub const GET_RESERVATIONS_BY_USER: &str = r#"
    SELECT r.id, r.listing_id, r.user_id, r.check_in, r.check_out, r.guests,
           r.total_amount, r.status, r.created_at,
           l.title AS listing_title, l.location AS listing_location,
           l.image_url AS listing_image_url, l.price AS listing_price
    FROM reservations r
    JOIN listings l ON l.id = r.listing_id
    WHERE r.user_id = $1
    ORDER BY r.created_at DESC
"#;

/// 결제 소스 식별자/금액 저장
pub const SET_PAYMENT_SOURCE: &str = r#"
    UPDATE reservations SET payment_source_id = $2, payment_amount = $3
    WHERE id = $1
    RETURNING id, listing_id, user_id, check_in, check_out, guests, total_amount, status,
              payment_source_id, payment_amount, payment_id, created_at
"#;

/// 예약 상태 갱신
pub const SET_RESERVATION_STATUS: &str = r#"
    UPDATE reservations SET status = $2
    WHERE id = $1
    RETURNING id, listing_id, user_id, check_in, check_out, guests, total_amount, status,
              payment_source_id, payment_amount, payment_id, created_at
"#;

/// 결제 완료 처리(상태 + 결제 식별자)
pub const MARK_RESERVATION_PAID: &str = r#"
    UPDATE reservations SET status = 'paid', payment_id = $2
    WHERE id = $1
    RETURNING id, listing_id, user_id, check_in, check_out, guests, total_amount, status,
              payment_source_id, payment_amount, payment_id, created_at
"#;
