pub mod use_brands;
pub mod use_cart;
pub mod use_catalogue_filters;
pub mod use_logout;
pub mod use_orders;
pub mod use_products;
pub mod use_push_route;
pub mod use_resource;
pub mod use_reviews;
pub mod use_title;
pub mod use_wishlist;

pub use use_brands::{use_brand, use_brands, use_ethics_questionnaire};
pub use use_cart::{CartHandle, use_cart};
pub use use_catalogue_filters::{use_categories, use_colors, use_sizes};
pub use use_logout::use_logout;
pub use use_orders::use_orders;
pub use use_products::{use_product, use_products};
pub use use_push_route::use_push_route;
pub use use_resource::{ResourceHandle, report_edit, use_resource};
pub use use_reviews::{use_pending_reviews, use_reviews};
pub use use_title::use_title;
pub use use_wishlist::{WishlistHandle, use_wishlist};

use jiff::SignedDuration;
use resource::ResourceOptions;

/// Brands and filter vocabularies are list views that change rarely, so a
/// refetch within five minutes of the last success is skipped.
pub fn catalogue_options() -> ResourceOptions {
    ResourceOptions::list().stale_time(SignedDuration::from_mins(5))
}
