use payloads::{
    IdempotencyKey,
    requests::{Checkout, ShippingAddress},
    responses::Order,
};
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::{
    RequireRole,
    login_form::{INPUT_CLASSES, LABEL_CLASSES, PRIMARY_BUTTON_CLASSES},
};
use crate::contexts::use_toast;
use crate::hooks::{use_cart, use_title};
use crate::utils::format_price;

#[function_component]
pub fn CheckoutPage() -> Html {
    use_title("Checkout");

    html! {
        <RequireRole>
            <CheckoutContent />
        </RequireRole>
    }
}

const FIELDS: [(&str, &str); 5] = [
    ("full_name", "Full name"),
    ("street", "Street"),
    ("city", "City"),
    ("postal_code", "Postal code"),
    ("country", "Country"),
];

fn field_mut<'a>(address: &'a mut ShippingAddress, id: &str) -> Option<&'a mut String> {
    match id {
        "full_name" => Some(&mut address.full_name),
        "street" => Some(&mut address.street),
        "city" => Some(&mut address.city),
        "postal_code" => Some(&mut address.postal_code),
        "country" => Some(&mut address.country),
        _ => None,
    }
}

#[function_component]
fn CheckoutContent() -> Html {
    let cart = use_cart();
    let toast = use_toast();
    let address = use_state(ShippingAddress::default);
    // One key per visit to the page, so a resubmitted form cannot order twice
    let idempotency_key = use_state(IdempotencyKey::new);
    let placed = use_state(|| None::<Order>);
    let is_submitting = use_state(|| false);

    if let Some(order) = &*placed {
        return html! {
            <div class="max-w-xl space-y-4">
                <h1 class="text-2xl font-bold">{"Thank you!"}</h1>
                <p>{format!("Order {} placed, total {}.", order.id, format_price(order.total))}</p>
                <Link<Route> to={Route::Home} classes="underline">{"Continue shopping"}</Link<Route>>
            </div>
        };
    }

    let on_input = |id: &'static str| {
        let address = address.clone();
        Callback::from(move |e: InputEvent| {
            let Some(input) = e.target_dyn_into::<HtmlInputElement>() else {
                return;
            };
            let mut next = (*address).clone();
            if let Some(field) = field_mut(&mut next, id) {
                *field = input.value();
                address.set(next);
            }
        })
    };

    let cart_is_empty = cart.cart.data().is_none_or(|cart| cart.items.is_empty());
    let can_submit = address.is_complete() && !cart_is_empty && !*is_submitting;

    let on_submit = {
        let address = address.clone();
        let idempotency_key = idempotency_key.clone();
        let placed = placed.clone();
        let is_submitting = is_submitting.clone();
        let refetch_cart = cart.refetch.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if !address.is_complete() {
                toast.error("Please fill in every address field");
                return;
            }

            let details = Checkout {
                shipping: (*address).clone(),
                idempotency_key: *idempotency_key,
            };
            let toast = toast.clone();
            let placed = placed.clone();
            let is_submitting = is_submitting.clone();
            let refetch_cart = refetch_cart.clone();

            yew::platform::spawn_local(async move {
                is_submitting.set(true);
                match crate::get_api_client().checkout(&details).await {
                    Ok(order) => {
                        tracing::info!("Placed order {}", order.id);
                        toast.success("Order placed");
                        placed.set(Some(order));
                        // The backend emptied the cart
                        refetch_cart.emit(());
                    }
                    Err(e) => toast.failure("place your order", &e),
                }
                is_submitting.set(false);
            });
        })
    };

    html! {
        <div class="grid gap-10 md:grid-cols-2">
            <form onsubmit={on_submit} class="space-y-4">
                <h1 class="text-2xl font-bold">{"Shipping address"}</h1>
                {for FIELDS.into_iter().map(|(id, label)| {
                    let mut current = (*address).clone();
                    let value = field_mut(&mut current, id).map(|v| v.clone()).unwrap_or_default();
                    html! {
                        <div key={id}>
                            <label for={id} class={LABEL_CLASSES}>{label}</label>
                            <input
                                id={id}
                                type="text"
                                class={INPUT_CLASSES}
                                value={value}
                                oninput={on_input(id)}
                            />
                        </div>
                    }
                })}
                <button type="submit" disabled={!can_submit} class={PRIMARY_BUTTON_CLASSES}>
                    {if *is_submitting { "Placing order..." } else { "Place order" }}
                </button>
            </form>
            <aside>
                <h2 class="text-xl font-semibold mb-4">{"Order summary"}</h2>
                {cart.cart.render("cart", |cart, _| html! {
                    <>
                        <ul class="space-y-2">
                            {for cart.items.iter().map(|item| html! {
                                <li class="flex justify-between text-sm">
                                    <span>{format!("{} × {}", item.quantity, item.name)}</span>
                                    <span>{format_price(item.subtotal())}</span>
                                </li>
                            })}
                        </ul>
                        <p class="mt-4 font-semibold">
                            {format!("Total {}", format_price(cart.total()))}
                        </p>
                    </>
                })}
            </aside>
        </div>
    }
}
