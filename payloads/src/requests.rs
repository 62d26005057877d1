use crate::{
    BrandId, CategoryId, ColorId, IdempotencyKey, ProductId, ReviewId, SizeId,
    responses::CartLineKey,
};
use serde::{Deserialize, Serialize};

pub const REVIEW_TITLE_MAX_LEN: usize = 120;
pub const REVIEW_BODY_MIN_LEN: usize = 10;
pub const REVIEW_BODY_MAX_LEN: usize = 5000;

#[derive(Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// Filters for the product listing. Also the fetch key of the listing, so
/// it must serialize deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub brand_id: Option<BrandId>,
    pub category_id: Option<CategoryId>,
    pub size_id: Option<SizeId>,
    pub color_id: Option<ColorId>,
    /// 1-based
    pub page: u32,
}

impl ProductFilter {
    pub fn for_brand(brand_id: BrandId) -> Self {
        Self {
            brand_id: Some(brand_id),
            page: 1,
            ..Default::default()
        }
    }

    pub fn page(self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReview {
    pub product_id: ProductId,
    pub rating: u8,
    pub title: String,
    pub body: String,
}

/// Validation result for reviews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewValidation {
    Valid,
    RatingOutOfRange,
    MissingTitle,
    TitleTooLong,
    BodyTooShort,
    BodyTooLong,
}

impl ReviewValidation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            Self::Valid => None,
            Self::RatingOutOfRange => Some("Rating must be between 1 and 5"),
            Self::MissingTitle => Some("Please give your review a title"),
            Self::TitleTooLong => Some("Title must be at most 120 characters"),
            Self::BodyTooShort => {
                Some("Review must be at least 10 characters")
            }
            Self::BodyTooLong => Some("Review must be at most 5000 characters"),
        }
    }
}

/// Validate a review before submitting it.
///
/// Rules:
/// - rating 1-5
/// - non-blank title of at most 120 characters
/// - body of 10-5000 characters, ignoring surrounding whitespace
pub fn validate_review(review: &CreateReview) -> ReviewValidation {
    if !(1..=5).contains(&review.rating) {
        return ReviewValidation::RatingOutOfRange;
    }

    let title = review.title.trim();
    if title.is_empty() {
        return ReviewValidation::MissingTitle;
    }
    if title.chars().count() > REVIEW_TITLE_MAX_LEN {
        return ReviewValidation::TitleTooLong;
    }

    let body_len = review.body.trim().chars().count();
    if body_len < REVIEW_BODY_MIN_LEN {
        return ReviewValidation::BodyTooShort;
    }
    if body_len > REVIEW_BODY_MAX_LEN {
        return ReviewValidation::BodyTooLong;
    }

    ReviewValidation::Valid
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationDecision {
    Approve,
    Reject,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModerateReview {
    pub review_id: ReviewId,
    pub decision: ModerationDecision,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleWishlist {
    pub product_id: ProductId,
}

/// Sets the quantity of a cart line, creating it if needed. Zero removes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCartItem {
    pub line: CartLineKey,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub full_name: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl ShippingAddress {
    pub fn is_complete(&self) -> bool {
        [
            &self.full_name,
            &self.street,
            &self.city,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .all(|field| !field.trim().is_empty())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Checkout {
    pub shipping: ShippingAddress,
    pub idempotency_key: IdempotencyKey,
}
