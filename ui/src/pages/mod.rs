pub mod admin;
pub mod brand_detail;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod login;
pub mod moderation;
pub mod not_found;
pub mod product_detail;
pub mod wishlist;

pub use admin::AdminPage;
pub use brand_detail::BrandDetailPage;
pub use cart::CartPage;
pub use checkout::CheckoutPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use moderation::ModerationPage;
pub use not_found::NotFoundPage;
pub use product_detail::ProductDetailPage;
pub use wishlist::WishlistPage;
