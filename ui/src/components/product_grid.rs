use payloads::responses::Product;
use yew::prelude::*;

use crate::components::{ProductCard, wishlist_button::is_saved};
use crate::hooks::use_wishlist;

#[derive(Properties, PartialEq)]
pub struct ProductGridProps {
    pub products: Vec<Product>,
    /// Dims the grid while a newer page is being fetched behind it.
    #[prop_or(false)]
    pub is_refetching: bool,
}

#[function_component]
pub fn ProductGrid(props: &ProductGridProps) -> Html {
    let wishlist = use_wishlist();

    if props.products.is_empty() {
        return html! {
            <p class="text-center py-12 text-neutral-600 dark:text-neutral-400">
                {"No products match these filters."}
            </p>
        };
    }

    let grid_classes = classes!(
        "grid", "gap-6", "sm:grid-cols-2", "lg:grid-cols-3",
        props.is_refetching.then_some("opacity-60")
    );

    html! {
        <div class={grid_classes}>
            {for props.products.iter().map(|product| {
                let saved = is_saved(&wishlist, product.id);
                html! {
                    <ProductCard
                        key={product.id.to_string()}
                        product={product.clone()}
                        saved={saved}
                        on_toggle_wishlist={wishlist.toggle.clone()}
                    />
                }
            })}
        </div>
    }
}
