use payloads::{
    ColorId, ProductId, SizeId,
    responses::{CartItem, CartLineKey, Product, WishlistItem},
};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::components::{
    ReviewForm, ReviewList, WishlistButton, login_form::PRIMARY_BUTTON_CLASSES,
    wishlist_button::is_saved,
};
use crate::contexts::use_session;
use crate::hooks::{use_cart, use_product, use_reviews, use_title, use_wishlist};
use crate::utils::{format_price, stars};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub product_id: ProductId,
}

#[function_component]
pub fn ProductDetailPage(props: &Props) -> Html {
    let product = use_product(props.product_id);
    let title = product
        .data()
        .and_then(Option::as_ref)
        .map_or_else(|| "Product".to_string(), |product| product.name.clone());
    use_title(&title);

    html! {
        <div class="space-y-10">
            {product.render("product", |product, _| match product {
                Some(product) => html! { <ProductSummary product={product.clone()} /> },
                None => html! {},
            })}
            <ReviewsSection product_id={props.product_id} />
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ProductSummaryProps {
    product: Product,
}

#[function_component]
fn ProductSummary(props: &ProductSummaryProps) -> Html {
    let product = &props.product;
    let cart = use_cart();
    let wishlist = use_wishlist();
    let size = use_state(|| product.sizes.first().map(|s| s.id));
    let color = use_state(|| product.colors.first().map(|c| c.id));

    let on_size = {
        let size = size.clone();
        Callback::from(move |e: Event| {
            let value = e
                .target_dyn_into::<HtmlSelectElement>()
                .and_then(|select| select.value().parse().ok());
            size.set(value.map(SizeId));
        })
    };
    let on_color = {
        let color = color.clone();
        Callback::from(move |e: Event| {
            let value = e
                .target_dyn_into::<HtmlSelectElement>()
                .and_then(|select| select.value().parse().ok());
            color.set(value.map(ColorId));
        })
    };

    let on_add = {
        let add = cart.add.clone();
        let item = CartItem {
            line: CartLineKey {
                product_id: product.id,
                size_id: *size,
                color_id: *color,
            },
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
        };
        Callback::from(move |_: MouseEvent| add.emit(item.clone()))
    };

    html! {
        <div class="grid gap-8 md:grid-cols-2">
            if let Some(url) = &product.image_url {
                <img src={url.clone()} alt={product.name.clone()}
                    class="w-full rounded-lg object-cover" />
            } else {
                <div class="w-full aspect-square rounded-lg bg-neutral-100 dark:bg-neutral-800"></div>
            }
            <div class="space-y-4">
                <div class="flex items-start justify-between">
                    <div>
                        <p class="text-sm text-neutral-500">{&product.brand_name}</p>
                        <h1 class="text-3xl font-bold">{&product.name}</h1>
                    </div>
                    <WishlistButton
                        item={WishlistItem::from(product)}
                        saved={is_saved(&wishlist, product.id)}
                        on_toggle={wishlist.toggle.clone()}
                    />
                </div>
                <p class="text-2xl font-semibold">{format_price(product.price)}</p>
                if let Some(rating) = product.average_rating {
                    <p class="text-amber-500">
                        {stars(rating.round() as u8)}
                        <span class="ml-2 text-sm text-neutral-500">{format!("{rating:.1}")}</span>
                    </p>
                }
                if let Some(description) = &product.description {
                    <p class="text-neutral-600 dark:text-neutral-400">{description}</p>
                }
                if !product.sizes.is_empty() {
                    <label class="block text-sm">
                        {"Size"}
                        <select onchange={on_size} class="ml-2 px-2 py-1 border rounded-md">
                            {for product.sizes.iter().map(|s| html! {
                                <option value={s.id.to_string()} selected={*size == Some(s.id)}>
                                    {&s.label}
                                </option>
                            })}
                        </select>
                    </label>
                }
                if !product.colors.is_empty() {
                    <label class="block text-sm">
                        {"Color"}
                        <select onchange={on_color} class="ml-2 px-2 py-1 border rounded-md">
                            {for product.colors.iter().map(|c| html! {
                                <option value={c.id.to_string()} selected={*color == Some(c.id)}>
                                    {&c.name}
                                </option>
                            })}
                        </select>
                    </label>
                }
                <button onclick={on_add} class={PRIMARY_BUTTON_CLASSES}>{"Add to cart"}</button>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ReviewsSectionProps {
    product_id: ProductId,
}

#[function_component]
fn ReviewsSection(props: &ReviewsSectionProps) -> Html {
    let session = use_session();
    let reviews = use_reviews(props.product_id);

    html! {
        <section class="space-y-6">
            <h2 class="text-xl font-semibold">{"Reviews"}</h2>
            {reviews.render("reviews", |reviews, _| html! {
                <ReviewList reviews={reviews.clone()} />
            })}
            if session.is_authenticated() {
                <ReviewForm
                    product_id={props.product_id}
                    on_submitted={reviews.refetch.clone()}
                />
            }
        </section>
    }
}
