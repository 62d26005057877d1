use payloads::Role;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::contexts::use_session;
use crate::hooks::{use_cart, use_logout};

const LINK_CLASSES: &str = "text-sm text-neutral-600 dark:text-neutral-400 \
    hover:text-neutral-900 dark:hover:text-white transition-colors";

#[function_component]
pub fn Header() -> Html {
    let session = use_session();
    let logout = use_logout();

    html! {
        <header class="bg-white dark:bg-neutral-800 border-b border-neutral-200 \
                       dark:border-neutral-700">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <Link<Route> to={Route::Home}
                        classes="text-xl font-semibold text-neutral-900 dark:text-white">
                        {"Storefront"}
                    </Link<Route>>
                    <nav class="flex items-center space-x-6">
                        <Link<Route> to={Route::Home} classes={LINK_CLASSES}>
                            {"Brands"}
                        </Link<Route>>
                        if session.is_authenticated() {
                            <Link<Route> to={Route::Wishlist} classes={LINK_CLASSES}>
                                {"Wishlist"}
                            </Link<Route>>
                            <CartLink />
                        }
                        if session.has_role(Role::Moderator) {
                            <Link<Route> to={Route::Moderation} classes={LINK_CLASSES}>
                                {"Moderation"}
                            </Link<Route>>
                        }
                        if session.has_role(Role::Admin) {
                            <Link<Route> to={Route::Admin} classes={LINK_CLASSES}>
                                {"Admin"}
                            </Link<Route>>
                        }
                        if let Some(profile) = session.user() {
                            <span class="text-sm text-neutral-500 dark:text-neutral-400">
                                {&profile.username}
                            </span>
                            <button onclick={logout} class={LINK_CLASSES}>
                                {"Log out"}
                            </button>
                        } else if session.state().is_resolved() {
                            <Link<Route> to={Route::Login} classes={LINK_CLASSES}>
                                {"Log in"}
                            </Link<Route>>
                        }
                    </nav>
                </div>
            </div>
        </header>
    }
}

/// Cart link with the number of units in the cart. Rendered only for logged
/// in users so the cart is not fetched otherwise.
#[function_component]
fn CartLink() -> Html {
    let cart = use_cart();
    let count = cart.cart.data().map_or(0, |cart| cart.item_count());

    html! {
        <Link<Route> to={Route::Cart} classes={LINK_CLASSES}>
            {"Cart"}
            if count > 0 {
                <span class="ml-1 px-2 py-0.5 rounded-full text-xs bg-neutral-900 \
                             text-white dark:bg-white dark:text-neutral-900">
                    {count}
                </span>
            }
        </Link<Route>>
    }
}
