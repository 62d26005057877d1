use payloads::{ProductId, responses::WishlistItem};
use yew::prelude::*;

use crate::hooks::WishlistHandle;

#[derive(Properties, PartialEq)]
pub struct WishlistButtonProps {
    pub item: WishlistItem,
    pub saved: bool,
    pub on_toggle: Callback<WishlistItem>,
}

/// Heart toggle for a product. The wishlist itself is owned by the page so
/// one fetch serves every card.
#[function_component]
pub fn WishlistButton(props: &WishlistButtonProps) -> Html {
    let onclick = {
        let item = props.item.clone();
        props.on_toggle.reform(move |e: MouseEvent| {
            e.prevent_default();
            e.stop_propagation();
            item.clone()
        })
    };
    let (icon, label) = if props.saved {
        ("♥", "Remove from wishlist")
    } else {
        ("♡", "Save to wishlist")
    };

    html! {
        <button
            onclick={onclick}
            title={label}
            aria-label={label}
            aria-pressed={props.saved.to_string()}
            class="text-xl text-rose-600 hover:scale-110 transition-transform"
        >
            {icon}
        </button>
    }
}

/// Whether the product is on the wishlist, false while it loads.
pub fn is_saved(wishlist: &WishlistHandle, product_id: ProductId) -> bool {
    wishlist
        .wishlist
        .data()
        .is_some_and(|list| list.contains(product_id))
}
