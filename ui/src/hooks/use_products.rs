use payloads::{ProductId, requests::ProductFilter, responses};
use resource::ResourceOptions;
use yew::prelude::*;

use crate::{
    get_api_client,
    hooks::{ResourceHandle, use_resource},
};

/// One page of products matching `filter`. Changing any filter field or the
/// page fetches again; a response for an outdated filter is dropped.
#[hook]
pub fn use_products(
    filter: ProductFilter,
) -> ResourceHandle<ProductFilter, responses::ProductPage> {
    use_resource(Some(filter), ResourceOptions::list(), |filter| async move {
        get_api_client().list_products(&filter).await
    })
}

#[hook]
pub fn use_product(
    product_id: ProductId,
) -> ResourceHandle<ProductId, Option<responses::Product>> {
    use_resource(
        Some(product_id),
        ResourceOptions::detail(),
        |product_id| async move { get_api_client().get_product(&product_id).await.map(Some) },
    )
}
