use payloads::{BrandId, responses};
use resource::ResourceOptions;
use yew::prelude::*;

use crate::{
    get_api_client,
    hooks::{ResourceHandle, catalogue_options, use_resource},
};

/// All brands, for the home page listing.
#[hook]
pub fn use_brands() -> ResourceHandle<(), Vec<responses::Brand>> {
    use_resource(Some(()), catalogue_options(), |()| async move {
        get_api_client().list_brands().await
    })
}

/// One brand. The data is only `None` before the first response.
#[hook]
pub fn use_brand(brand_id: BrandId) -> ResourceHandle<BrandId, Option<responses::Brand>> {
    use_resource(Some(brand_id), ResourceOptions::detail(), |brand_id| async move {
        get_api_client().get_brand(&brand_id).await.map(Some)
    })
}

/// The brand's questionnaire answers. Success with `None` means the brand
/// has not answered yet.
#[hook]
pub fn use_ethics_questionnaire(
    brand_id: BrandId,
) -> ResourceHandle<BrandId, Option<responses::EthicsQuestionnaire>> {
    use_resource(Some(brand_id), ResourceOptions::detail(), |brand_id| async move {
        get_api_client().get_ethics_questionnaire(&brand_id).await
    })
}
