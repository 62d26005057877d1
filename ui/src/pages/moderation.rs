use payloads::{
    Role,
    requests::{ModerateReview, ModerationDecision},
    responses::Review,
};
use yew::prelude::*;

use crate::components::{RequireRole, ReviewList};
use crate::contexts::use_toast;
use crate::hooks::{use_pending_reviews, use_title};

#[function_component]
pub fn ModerationPage() -> Html {
    use_title("Moderation");

    html! {
        <RequireRole role={Role::Moderator}>
            <ModerationPanel />
        </RequireRole>
    }
}

#[function_component]
fn ModerationPanel() -> Html {
    let pending = use_pending_reviews();
    let toast = use_toast();

    let decide = {
        let resource = pending.resource();
        let refetch = pending.refetch.clone();
        Callback::from(move |(review, decision): (Review, ModerationDecision)| {
            // Drop it from the queue now; a failure brings it back
            resource.mutate(|reviews| reviews.retain(|r| r.id != review.id));

            let details = ModerateReview {
                review_id: review.id,
                decision,
            };
            let toast = toast.clone();
            let refetch = refetch.clone();
            yew::platform::spawn_local(async move {
                match crate::get_api_client().moderate_review(&details).await {
                    Ok(review) => {
                        tracing::debug!("Review {} is now {:?}", review.id, review.status);
                    }
                    Err(e) => {
                        toast.failure("moderate review", &e);
                        refetch.emit(());
                    }
                }
            });
        })
    };

    let actions = Callback::from(move |review: Review| {
        let approve = {
            let review = review.clone();
            decide.reform(move |_: MouseEvent| (review.clone(), ModerationDecision::Approve))
        };
        let reject = decide.reform(move |_: MouseEvent| (review.clone(), ModerationDecision::Reject));
        html! {
            <div class="mt-3 flex gap-3">
                <button onclick={approve}
                    class="px-3 py-1 rounded-md text-sm bg-green-600 text-white hover:bg-green-700">
                    {"Approve"}
                </button>
                <button onclick={reject}
                    class="px-3 py-1 rounded-md text-sm bg-red-600 text-white hover:bg-red-700">
                    {"Reject"}
                </button>
            </div>
        }
    });

    html! {
        <div class="max-w-3xl">
            <div class="flex items-center justify-between mb-6">
                <h1 class="text-2xl font-bold">{"Pending reviews"}</h1>
                if pending.is_refetching {
                    <span class="text-sm text-neutral-500">{"Refreshing..."}</span>
                }
            </div>
            {pending.render("pending reviews", |reviews, _| html! {
                <ReviewList reviews={reviews.clone()} actions={actions.clone()} />
            })}
        </div>
    }
}
