use payloads::{ProductId, Role, UserId, responses};
use resource::ResourceOptions;
use yew::prelude::*;

use crate::{
    contexts::use_session,
    get_api_client,
    hooks::{ResourceHandle, use_resource},
};

/// Approved reviews for a product.
#[hook]
pub fn use_reviews(
    product_id: ProductId,
) -> ResourceHandle<ProductId, Vec<responses::Review>> {
    use_resource(
        Some(product_id),
        ResourceOptions::list(),
        |product_id| async move { get_api_client().list_reviews(&product_id).await },
    )
}

/// Reviews awaiting moderation. Only fetched for moderators and admins;
/// everyone else gets an empty list.
#[hook]
pub fn use_pending_reviews() -> ResourceHandle<UserId, Vec<responses::Review>> {
    let session = use_session();
    let key = session
        .user()
        .filter(|profile| profile.role >= Role::Moderator)
        .map(|profile| profile.user_id);

    use_resource(key, ResourceOptions::list(), |_| async move {
        get_api_client().list_pending_reviews().await
    })
}
