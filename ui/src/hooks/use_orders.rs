use payloads::{UserId, responses};
use resource::ResourceOptions;
use yew::prelude::*;

use crate::{
    contexts::use_session,
    get_api_client,
    hooks::{ResourceHandle, use_resource},
};

/// All orders, for the admin panel. Not fetched unless an admin is logged in.
#[hook]
pub fn use_orders() -> ResourceHandle<UserId, Vec<responses::Order>> {
    let session = use_session();
    let key = session
        .user()
        .filter(|profile| profile.role.is_admin())
        .map(|profile| profile.user_id);

    use_resource(key, ResourceOptions::list(), |_| async move {
        get_api_client().list_orders().await
    })
}
