use payloads::responses::{Product, WishlistItem};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::WishlistButton;
use crate::utils::{format_price, stars};

#[derive(Properties, PartialEq)]
pub struct ProductCardProps {
    pub product: Product,
    pub saved: bool,
    pub on_toggle_wishlist: Callback<WishlistItem>,
}

#[function_component]
pub fn ProductCard(props: &ProductCardProps) -> Html {
    let product = &props.product;

    html! {
        <div class="border border-neutral-200 dark:border-neutral-700 rounded-lg \
                    overflow-hidden bg-white dark:bg-neutral-800">
            <Link<Route> to={Route::Product { id: product.id }}>
                if let Some(url) = &product.image_url {
                    <img src={url.clone()} alt={product.name.clone()}
                        class="w-full h-48 object-cover" />
                } else {
                    <div class="w-full h-48 bg-neutral-100 dark:bg-neutral-700"></div>
                }
            </Link<Route>>
            <div class="p-4 space-y-1">
                <div class="flex items-start justify-between gap-2">
                    <Link<Route> to={Route::Product { id: product.id }}
                        classes="font-medium text-neutral-900 dark:text-white hover:underline">
                        {&product.name}
                    </Link<Route>>
                    <WishlistButton
                        item={WishlistItem::from(product)}
                        saved={props.saved}
                        on_toggle={props.on_toggle_wishlist.clone()}
                    />
                </div>
                <p class="text-sm text-neutral-500 dark:text-neutral-400">
                    {&product.brand_name}
                </p>
                <div class="flex items-center justify-between">
                    <span class="font-semibold">{format_price(product.price)}</span>
                    if let Some(rating) = product.average_rating {
                        <span class="text-sm text-amber-500" title={format!("{rating:.1}")}>
                            {stars(rating.round() as u8)}
                        </span>
                    }
                </div>
            </div>
        </div>
    }
}
