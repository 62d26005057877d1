use payloads::responses::{CartItem, CartLineKey, MAX_CART_QUANTITY};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::{RequireRole, login_form::PRIMARY_BUTTON_CLASSES};
use crate::hooks::{use_cart, use_title};
use crate::utils::format_price;

#[function_component]
pub fn CartPage() -> Html {
    use_title("Cart");

    html! {
        <RequireRole>
            <CartContent />
        </RequireRole>
    }
}

#[function_component]
fn CartContent() -> Html {
    let cart = use_cart();
    let set_quantity = cart.set_quantity.clone();

    html! {
        <div class="max-w-3xl">
            <h1 class="text-2xl font-bold mb-6">{"Cart"}</h1>
            {cart.cart.render("cart", |cart, _| {
                if cart.items.is_empty() {
                    return html! {
                        <p class="text-neutral-600 dark:text-neutral-400">
                            {"Your cart is empty."}
                        </p>
                    };
                }
                html! {
                    <>
                        <ul class="divide-y divide-neutral-200 dark:divide-neutral-700">
                            {for cart.items.iter().map(|item| html! {
                                <CartLine
                                    key={format!("{:?}", item.line)}
                                    item={item.clone()}
                                    on_quantity={set_quantity.clone()}
                                />
                            })}
                        </ul>
                        <div class="flex items-center justify-between mt-6">
                            <span class="text-lg font-semibold">
                                {format!("Total {}", format_price(cart.total()))}
                            </span>
                            <Link<Route> to={Route::Checkout} classes={PRIMARY_BUTTON_CLASSES}>
                                {"Checkout"}
                            </Link<Route>>
                        </div>
                    </>
                }
            })}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct CartLineProps {
    item: CartItem,
    on_quantity: Callback<(CartLineKey, u32)>,
}

#[function_component]
fn CartLine(props: &CartLineProps) -> Html {
    let item = &props.item;
    let line = item.line;
    let quantity = item.quantity;

    let change = |quantity: u32| props.on_quantity.reform(move |_: MouseEvent| (line, quantity));

    html! {
        <li class="flex items-center justify-between py-4">
            <div>
                <Link<Route> to={Route::Product { id: line.product_id }}
                    classes="font-medium hover:underline">
                    {&item.name}
                </Link<Route>>
                <p class="text-sm text-neutral-500">{format_price(item.unit_price)}</p>
            </div>
            <div class="flex items-center gap-3">
                <button onclick={change(quantity.saturating_sub(1))}
                    class="px-2 border rounded" aria-label="Decrease quantity">
                    {"−"}
                </button>
                <span>{quantity}</span>
                <button onclick={change(quantity + 1)}
                    disabled={quantity >= MAX_CART_QUANTITY}
                    class="px-2 border rounded disabled:opacity-50"
                    aria-label="Increase quantity">
                    {"+"}
                </button>
                <span class="w-24 text-right">{format_price(item.subtotal())}</span>
                <button onclick={change(0)} class="text-sm text-red-600 hover:underline">
                    {"Remove"}
                </button>
            </div>
        </li>
    }
}
