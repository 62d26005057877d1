use payloads::{
    UserId,
    requests::ToggleWishlist,
    responses::{Wishlist, WishlistItem},
};
use resource::ResourceOptions;
use yew::prelude::*;

use crate::{
    contexts::{use_session, use_toast},
    get_api_client,
    hooks::{ResourceHandle, report_edit, use_resource},
};

pub struct WishlistHandle {
    pub wishlist: ResourceHandle<UserId, Wishlist>,
    /// Adds the item if absent, removes it otherwise.
    pub toggle: Callback<WishlistItem>,
}

/// The logged in user's wishlist. Empty and never fetched while logged out,
/// loading while the session is still being resolved.
///
/// Toggling updates the local copy first, then tells the backend. The
/// backend's answer replaces the local copy unless the user or wishlist
/// changed meanwhile; on failure the wishlist is fetched again and an error
/// toast is shown.
#[hook]
pub fn use_wishlist() -> WishlistHandle {
    let session = use_session();
    let toast = use_toast();
    let user_id = session.user_id();

    let mut wishlist =
        use_resource(user_id, ResourceOptions::list(), |_| async move {
            get_api_client().get_wishlist().await
        });
    if !session.state().is_resolved() {
        wishlist = wishlist.pending();
    }

    let toggle = {
        let resource = wishlist.resource();
        Callback::from(move |item: WishlistItem| {
            if user_id.is_none() {
                toast.error("Log in to save items to your wishlist");
                return;
            }

            let details = ToggleWishlist {
                product_id: item.product_id,
            };
            let update = resource.sync_edit(
                |wishlist| {
                    wishlist.toggle(item);
                },
                move |_| async move { get_api_client().toggle_wishlist(&details).await },
            );

            let toast = toast.clone();
            yew::platform::spawn_local(async move {
                report_edit(update.await, "wishlist", &toast);
            });
        })
    };

    WishlistHandle { wishlist, toggle }
}
