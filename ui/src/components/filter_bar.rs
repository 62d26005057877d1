use payloads::{CategoryId, ColorId, SizeId, requests::ProductFilter};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use crate::hooks::{use_categories, use_colors, use_sizes};

const SELECT_CLASSES: &str = "px-3 py-2 border border-neutral-300 \
    dark:border-neutral-600 rounded-md bg-white dark:bg-neutral-700 text-sm";

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
    pub filter: ProductFilter,
    /// Receives the new filter, reset to its first page.
    pub on_change: Callback<ProductFilter>,
}

/// Category, size and color pickers for a product listing.
#[function_component]
pub fn FilterBar(props: &FilterBarProps) -> Html {
    let categories = use_categories();
    let sizes = use_sizes();
    let colors = use_colors();

    let options = |entries: Vec<(i64, String)>, selected: Option<i64>| -> Html {
        html! {
            <>
                <option value="" selected={selected.is_none()}>{"Any"}</option>
                {for entries.into_iter().map(|(id, label)| html! {
                    <option value={id.to_string()} selected={selected == Some(id)}>
                        {label}
                    </option>
                })}
            </>
        }
    };

    let on_select = |apply: fn(&mut ProductFilter, Option<i64>)| {
        let filter = props.filter.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let value = e
                .target_dyn_into::<HtmlSelectElement>()
                .and_then(|select| select.value().parse::<i64>().ok());
            let mut next = filter.clone();
            apply(&mut next, value);
            on_change.emit(next.page(1));
        })
    };

    let category_entries = categories
        .data()
        .map(|list| list.iter().map(|c| (c.id.0, c.name.clone())).collect())
        .unwrap_or_default();
    let size_entries = sizes
        .data()
        .map(|list| list.iter().map(|s| (s.id.0, s.label.clone())).collect())
        .unwrap_or_default();
    let color_entries = colors
        .data()
        .map(|list| list.iter().map(|c| (c.id.0, c.name.clone())).collect())
        .unwrap_or_default();

    let filter = &props.filter;

    html! {
        <div class="flex flex-wrap gap-4 mb-6">
            <label class="flex items-center gap-2 text-sm">
                {"Category"}
                <select class={SELECT_CLASSES}
                    onchange={on_select(|f, v| f.category_id = v.map(CategoryId))}>
                    {options(category_entries, filter.category_id.map(|id| id.0))}
                </select>
            </label>
            <label class="flex items-center gap-2 text-sm">
                {"Size"}
                <select class={SELECT_CLASSES}
                    onchange={on_select(|f, v| f.size_id = v.map(SizeId))}>
                    {options(size_entries, filter.size_id.map(|id| id.0))}
                </select>
            </label>
            <label class="flex items-center gap-2 text-sm">
                {"Color"}
                <select class={SELECT_CLASSES}
                    onchange={on_select(|f, v| f.color_id = v.map(ColorId))}>
                    {options(color_entries, filter.color_id.map(|id| id.0))}
                </select>
            </label>
        </div>
    }
}
