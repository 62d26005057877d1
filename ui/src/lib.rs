use payloads::{APIClient, BrandId, ProductId};
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod contexts;
mod hooks;
mod logs;
mod pages;
mod utils;

use components::{MainLayout, ToastContainer};
use contexts::{SessionProvider, ToastProvider};

// Global API client - configurable via environment or same-origin fallback
pub fn get_api_client() -> APIClient {
    // Try environment variable first (set at build time)
    let address = option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .unwrap_or_else(same_origin);

    APIClient {
        address,
        inner_client: reqwest::Client::new(),
    }
}

fn same_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

#[function_component]
pub fn App() -> Html {
    logs::init_logging();
    html! {
        <BrowserRouter>
            <ToastProvider>
                <SessionProvider>
                    <MainLayout>
                        <Switch<Route> render={switch} />
                    </MainLayout>
                    <ToastContainer />
                </SessionProvider>
            </ToastProvider>
        </BrowserRouter>
    }
}

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/brands/:id")]
    Brand { id: BrandId },
    #[at("/products/:id")]
    Product { id: ProductId },
    #[at("/wishlist")]
    Wishlist,
    #[at("/cart")]
    Cart,
    #[at("/checkout")]
    Checkout,
    #[at("/moderation")]
    Moderation,
    #[at("/admin")]
    Admin,
    #[at("/login")]
    Login,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <pages::HomePage /> },
        Route::Brand { id } => html! { <pages::BrandDetailPage brand_id={id} /> },
        Route::Product { id } => {
            html! { <pages::ProductDetailPage product_id={id} /> }
        }
        Route::Wishlist => html! { <pages::WishlistPage /> },
        Route::Cart => html! { <pages::CartPage /> },
        Route::Checkout => html! { <pages::CheckoutPage /> },
        Route::Moderation => html! { <pages::ModerationPage /> },
        Route::Admin => html! { <pages::AdminPage /> },
        Route::Login => html! { <pages::LoginPage /> },
        Route::NotFound => html! { <pages::NotFoundPage /> },
    }
}
