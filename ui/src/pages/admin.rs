use payloads::Role;
use yew::prelude::*;

use crate::components::RequireRole;
use crate::hooks::{use_orders, use_title};
use crate::utils::format_price;

#[function_component]
pub fn AdminPage() -> Html {
    use_title("Admin");

    html! {
        <RequireRole role={Role::Admin}>
            <OrdersPanel />
        </RequireRole>
    }
}

#[function_component]
fn OrdersPanel() -> Html {
    let orders = use_orders();

    html! {
        <div>
            <div class="flex items-center justify-between mb-6">
                <h1 class="text-2xl font-bold">{"Orders"}</h1>
                <button
                    onclick={orders.refetch.reform(|_: MouseEvent| ())}
                    class="text-sm text-neutral-600 dark:text-neutral-400 hover:underline"
                >
                    {if orders.is_refetching { "Refreshing..." } else { "Refresh" }}
                </button>
            </div>
            {orders.render("orders", |orders, _| {
                if orders.is_empty() {
                    return html! {
                        <p class="text-neutral-600 dark:text-neutral-400">{"No orders yet."}</p>
                    };
                }
                html! {
                    <table class="w-full text-sm">
                        <thead>
                            <tr class="text-left border-b border-neutral-200 dark:border-neutral-700">
                                <th class="py-2">{"Order"}</th>
                                <th>{"Placed"}</th>
                                <th>{"Items"}</th>
                                <th>{"Status"}</th>
                                <th class="text-right">{"Total"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for orders.iter().map(|order| html! {
                                <tr key={order.id.to_string()}
                                    class="border-b border-neutral-100 dark:border-neutral-800">
                                    <td class="py-2 font-mono">{order.id.to_string()}</td>
                                    <td>{order.created_at.strftime("%Y-%m-%d %H:%M").to_string()}</td>
                                    <td>{order.items.iter().map(|i| i.quantity).sum::<u32>()}</td>
                                    <td>{format!("{:?}", order.status)}</td>
                                    <td class="text-right">{format_price(order.total)}</td>
                                </tr>
                            })}
                        </tbody>
                    </table>
                }
            })}
        </div>
    }
}
