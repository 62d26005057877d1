use payloads::{
    ProductId,
    requests::{CreateReview, validate_review},
};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::components::login_form::{INPUT_CLASSES, LABEL_CLASSES, PRIMARY_BUTTON_CLASSES};
use crate::contexts::use_toast;

#[derive(Properties, PartialEq)]
pub struct ReviewFormProps {
    pub product_id: ProductId,
    /// Called once the backend has accepted the review.
    #[prop_or_default]
    pub on_submitted: Callback<()>,
}

#[function_component]
pub fn ReviewForm(props: &ReviewFormProps) -> Html {
    let toast = use_toast();
    let rating_ref = use_node_ref();
    let title_ref = use_node_ref();
    let body_ref = use_node_ref();
    let validation_error = use_state(|| None::<&'static str>);
    let is_submitting = use_state(|| false);

    let on_submit = {
        let product_id = props.product_id;
        let on_submitted = props.on_submitted.clone();
        let rating_ref = rating_ref.clone();
        let title_ref = title_ref.clone();
        let body_ref = body_ref.clone();
        let validation_error = validation_error.clone();
        let is_submitting = is_submitting.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let review = CreateReview {
                product_id,
                rating: rating_ref
                    .cast::<HtmlSelectElement>()
                    .and_then(|select| select.value().parse().ok())
                    .unwrap_or(0),
                title: title_ref
                    .cast::<HtmlInputElement>()
                    .map(|input| input.value())
                    .unwrap_or_default(),
                body: body_ref
                    .cast::<HtmlTextAreaElement>()
                    .map(|area| area.value())
                    .unwrap_or_default(),
            };

            let validation = validate_review(&review);
            validation_error.set(validation.error_message());
            if !validation.is_valid() {
                return;
            }

            let toast = toast.clone();
            let on_submitted = on_submitted.clone();
            let is_submitting = is_submitting.clone();
            let title_ref = title_ref.clone();
            let body_ref = body_ref.clone();
            yew::platform::spawn_local(async move {
                is_submitting.set(true);
                match crate::get_api_client().create_review(&review).await {
                    Ok(_) => {
                        toast.success(
                            "Thanks! Your review will appear once approved.",
                        );
                        if let Some(input) = title_ref.cast::<HtmlInputElement>() {
                            input.set_value("");
                        }
                        if let Some(area) = body_ref.cast::<HtmlTextAreaElement>() {
                            area.set_value("");
                        }
                        on_submitted.emit(());
                    }
                    Err(e) => toast.failure("submit review", &e),
                }
                is_submitting.set(false);
            });
        })
    };

    html! {
        <form onsubmit={on_submit} class="space-y-4 max-w-xl">
            <h3 class="text-lg font-semibold">{"Write a review"}</h3>
            if let Some(error) = *validation_error {
                <p class="text-sm text-red-700 dark:text-red-400">{error}</p>
            }
            <div>
                <label for="review-rating" class={LABEL_CLASSES}>{"Rating"}</label>
                <select ref={rating_ref} id="review-rating" class={INPUT_CLASSES}>
                    {for (1..=5).rev().map(|n| html! {
                        <option value={n.to_string()}>{format!("{n} / 5")}</option>
                    })}
                </select>
            </div>
            <div>
                <label for="review-title" class={LABEL_CLASSES}>{"Title"}</label>
                <input ref={title_ref} id="review-title" type="text" class={INPUT_CLASSES} />
            </div>
            <div>
                <label for="review-body" class={LABEL_CLASSES}>{"Review"}</label>
                <textarea ref={body_ref} id="review-body" rows="5" class={INPUT_CLASSES} />
            </div>
            <button type="submit" disabled={*is_submitting} class={PRIMARY_BUTTON_CLASSES}>
                {if *is_submitting { "Submitting..." } else { "Submit review" }}
            </button>
        </form>
    }
}
