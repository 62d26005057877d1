use payloads::responses;
use yew::prelude::*;

use crate::{
    get_api_client,
    hooks::{ResourceHandle, catalogue_options, use_resource},
};

// Filter vocabularies rarely change, so all three share the catalogue
// staleness window.

#[hook]
pub fn use_categories() -> ResourceHandle<(), Vec<responses::Category>> {
    use_resource(Some(()), catalogue_options(), |()| async move {
        get_api_client().list_categories().await
    })
}

#[hook]
pub fn use_sizes() -> ResourceHandle<(), Vec<responses::Size>> {
    use_resource(Some(()), catalogue_options(), |()| async move {
        get_api_client().list_sizes().await
    })
}

#[hook]
pub fn use_colors() -> ResourceHandle<(), Vec<responses::Color>> {
    use_resource(Some(()), catalogue_options(), |()| async move {
        get_api_client().list_colors().await
    })
}
