use payloads::{requests::ProductFilter, responses::Brand};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::Route;
use crate::components::{FilterBar, PaginationControls, ProductGrid};
use crate::hooks::{use_brands, use_products, use_title};

#[function_component]
pub fn HomePage() -> Html {
    use_title("Brands");
    let brands = use_brands();

    html! {
        <div class="space-y-10">
            <section>
                <div class="flex items-center justify-between mb-4">
                    <h1 class="text-2xl font-bold">{"Brands"}</h1>
                    <button
                        onclick={brands.refetch.reform(|_: MouseEvent| ())}
                        class="text-sm text-neutral-600 dark:text-neutral-400 hover:underline"
                    >
                        {"Refresh"}
                    </button>
                </div>
                {brands.render("brands", |brands, _| render_brands(brands))}
            </section>
            <section>
                <h2 class="text-xl font-semibold mb-4">{"All products"}</h2>
                <ProductListing filter={ProductFilter::default().page(1)} />
            </section>
        </div>
    }
}

fn render_brands(brands: &[Brand]) -> Html {
    if brands.is_empty() {
        return html! {
            <p class="text-neutral-600 dark:text-neutral-400">{"No brands yet."}</p>
        };
    }

    html! {
        <ul class="grid gap-4 sm:grid-cols-2 lg:grid-cols-4">
            {for brands.iter().map(|brand| html! {
                <li key={brand.id.to_string()}>
                    <Link<Route> to={Route::Brand { id: brand.id }}
                        classes="block p-4 rounded-lg border border-neutral-200 \
                                 dark:border-neutral-700 hover:bg-neutral-50 \
                                 dark:hover:bg-neutral-800">
                        <span class="font-medium">{&brand.name}</span>
                        if let Some(country) = &brand.country {
                            <span class="block text-sm text-neutral-500">{country}</span>
                        }
                    </Link<Route>>
                </li>
            })}
        </ul>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProductListingProps {
    /// Starting filter; the listing owns it from then on.
    pub filter: ProductFilter,
}

/// Filters, product grid and pagination over one product listing.
#[function_component]
pub fn ProductListing(props: &ProductListingProps) -> Html {
    let filter = use_state(|| props.filter.clone());
    let products = use_products((*filter).clone());

    let on_filter_change = {
        let filter = filter.clone();
        Callback::from(move |next: ProductFilter| filter.set(next))
    };

    let on_page_change = {
        let filter = filter.clone();
        Callback::from(move |page: u32| filter.set((*filter).clone().page(page)))
    };

    html! {
        <>
            <FilterBar filter={(*filter).clone()} on_change={on_filter_change} />
            {products.render("products", |page, is_refetching| html! {
                <>
                    <ProductGrid products={page.products.clone()} is_refetching={is_refetching} />
                    <PaginationControls
                        page={page.page}
                        total_pages={page.total_pages}
                        on_page_change={on_page_change.clone()}
                        is_loading={is_refetching}
                    />
                </>
            })}
        </>
    }
}
