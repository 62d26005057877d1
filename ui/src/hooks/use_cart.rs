use payloads::{
    UserId,
    requests::UpdateCartItem,
    responses::{Cart, CartItem, CartLineKey},
};
use resource::{Resource, ResourceOptions};
use yew::prelude::*;

use crate::{
    contexts::{toast::ToastHandle, use_session, use_toast},
    get_api_client,
    hooks::{ResourceHandle, report_edit, use_resource},
};

pub struct CartHandle {
    pub cart: ResourceHandle<UserId, Cart>,
    /// Adds units to a line, merging with what is already there.
    pub add: Callback<CartItem>,
    /// Sets a line's quantity; zero removes the line.
    pub set_quantity: Callback<(CartLineKey, u32)>,
}

/// The logged in user's cart. Empty and never fetched while logged out,
/// loading while the session is still being resolved.
///
/// Edits apply locally first, then the resulting line quantity is sent to
/// the backend, whose cart replaces the local copy unless the user or cart
/// changed meanwhile. On failure the cart is fetched again and an error
/// toast is shown.
#[hook]
pub fn use_cart() -> CartHandle {
    let session = use_session();
    let toast = use_toast();
    let user_id = session.user_id();

    let mut cart = use_resource(user_id, ResourceOptions::list(), |_| async move {
        get_api_client().get_cart().await
    });
    if !session.state().is_resolved() {
        cart = cart.pending();
    }

    let sync = CartSync {
        resource: cart.resource(),
        toast,
        logged_in: user_id.is_some(),
    };

    let add = {
        let sync = sync.clone();
        Callback::from(move |item: CartItem| {
            let line = item.line;
            sync.apply(line, |cart| cart.add(item));
        })
    };

    let set_quantity = Callback::from(move |(line, quantity): (CartLineKey, u32)| {
        sync.apply(line, |cart| cart.set_quantity(&line, quantity));
    });

    CartHandle {
        cart,
        add,
        set_quantity,
    }
}

#[derive(Clone)]
struct CartSync {
    resource: Resource<UserId, Cart>,
    toast: ToastHandle,
    logged_in: bool,
}

impl CartSync {
    fn apply(&self, line: CartLineKey, edit: impl FnOnce(&mut Cart)) {
        if !self.logged_in {
            self.toast.error("Log in to add items to your cart");
            return;
        }

        let update = self.resource.sync_edit(edit, move |cart| {
            let details = UpdateCartItem {
                line,
                quantity: cart.quantity_of(&line),
            };
            async move { get_api_client().update_cart_item(&details).await }
        });

        let toast = self.toast.clone();
        yew::platform::spawn_local(async move {
            report_edit(update.await, "cart", &toast);
        });
    }
}
