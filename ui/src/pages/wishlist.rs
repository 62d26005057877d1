use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::{RequireRole, WishlistButton};
use crate::hooks::{use_title, use_wishlist};
use crate::utils::format_price;

#[function_component]
pub fn WishlistPage() -> Html {
    use_title("Wishlist");

    html! {
        <RequireRole>
            <WishlistContent />
        </RequireRole>
    }
}

#[function_component]
fn WishlistContent() -> Html {
    let wishlist = use_wishlist();
    let toggle = wishlist.toggle.clone();

    html! {
        <div>
            <h1 class="text-2xl font-bold mb-6">{"Wishlist"}</h1>
            {wishlist.wishlist.render("wishlist", |list, _| {
                if list.items.is_empty() {
                    return html! {
                        <p class="text-neutral-600 dark:text-neutral-400">
                            {"Nothing saved yet."}
                        </p>
                    };
                }
                html! {
                    <ul class="divide-y divide-neutral-200 dark:divide-neutral-700">
                        {for list.items.iter().map(|item| html! {
                            <li key={item.product_id.to_string()}
                                class="flex items-center justify-between py-4">
                                <div>
                                    <Link<Route> to={Route::Product { id: item.product_id }}
                                        classes="font-medium hover:underline">
                                        {&item.name}
                                    </Link<Route>>
                                    <p class="text-sm text-neutral-500">{&item.brand_name}</p>
                                </div>
                                <div class="flex items-center gap-4">
                                    <span>{format_price(item.price)}</span>
                                    <WishlistButton
                                        item={item.clone()}
                                        saved={true}
                                        on_toggle={toggle.clone()}
                                    />
                                </div>
                            </li>
                        })}
                    </ul>
                }
            })}
        </div>
    }
}
