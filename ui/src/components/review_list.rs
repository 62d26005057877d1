use payloads::responses::Review;
use yew::prelude::*;

use crate::utils::stars;

#[derive(Properties, PartialEq)]
pub struct ReviewListProps {
    pub reviews: Vec<Review>,
    /// Extra controls rendered under each review, e.g. moderation buttons.
    #[prop_or_default]
    pub actions: Option<Callback<Review, Html>>,
}

#[function_component]
pub fn ReviewList(props: &ReviewListProps) -> Html {
    if props.reviews.is_empty() {
        return html! {
            <p class="text-neutral-600 dark:text-neutral-400">{"No reviews yet."}</p>
        };
    }

    html! {
        <ul class="space-y-4">
            {for props.reviews.iter().map(|review| html! {
                <li key={review.id.to_string()}
                    class="p-4 rounded-lg border border-neutral-200 dark:border-neutral-700">
                    <div class="flex items-center justify-between">
                        <span class="font-medium">{&review.title}</span>
                        <span class="text-amber-500">{stars(review.rating)}</span>
                    </div>
                    <p class="text-xs text-neutral-500 dark:text-neutral-400">
                        {format!("{} · {}", review.author, review.created_at.strftime("%Y-%m-%d"))}
                    </p>
                    <p class="mt-2 text-sm whitespace-pre-line">{&review.body}</p>
                    if let Some(actions) = &props.actions {
                        {actions.emit(review.clone())}
                    }
                </li>
            })}
        </ul>
    }
}
