pub mod filter_bar;
pub mod layout;
pub mod login_form;
pub mod pagination_controls;
pub mod product_card;
pub mod product_grid;
pub mod require_role;
pub mod review_form;
pub mod review_list;
pub mod toast;
pub mod wishlist_button;

pub use filter_bar::FilterBar;
pub use layout::MainLayout;
pub use login_form::LoginForm;
pub use pagination_controls::PaginationControls;
pub use product_card::ProductCard;
pub use product_grid::ProductGrid;
pub use require_role::RequireRole;
pub use review_form::ReviewForm;
pub use review_list::ReviewList;
pub use toast::ToastContainer;
pub use wishlist_button::WishlistButton;
