use crate::{
    BrandId, ProductId,
    requests::{
        Checkout, CreateReview, LoginCredentials, ModerateReview,
        ProductFilter, ToggleWishlist, UpdateCartItem,
    },
    responses,
};
use reqwest::StatusCode;
use resource::{BackendPayload, ErrorShape};
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the backend.
#[derive(Clone)]
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.post(self.format_url(path)).json(body);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn empty_post(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.post(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }
}

/// Methods on the backend API
impl APIClient {
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self.empty_get("health_check").await?;
        ok_empty(response).await
    }

    pub async fn login(
        &self,
        details: &LoginCredentials,
    ) -> Result<(), ClientError> {
        let response = self.post("login", details).await?;
        ok_empty(response).await
    }

    pub async fn logout(&self) -> Result<(), ClientError> {
        let response = self.empty_post("logout").await?;
        ok_empty(response).await
    }

    /// Check if the user is logged in.
    pub async fn login_check(&self) -> Result<bool, ClientError> {
        let response = self.empty_post("login_check").await?;
        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::UNAUTHORIZED => Ok(false),
            _ => Err(ClientError::APIError(
                response.status(),
                response.text().await?,
            )),
        }
    }

    /// Get the current user's profile information.
    pub async fn user_profile(
        &self,
    ) -> Result<responses::UserProfile, ClientError> {
        let response = self.empty_get("user_profile").await?;
        ok_body(response).await
    }

    // Catalogue

    pub async fn list_brands(
        &self,
    ) -> Result<Vec<responses::Brand>, ClientError> {
        let response = self.empty_get("brands").await?;
        ok_body(response).await
    }

    pub async fn get_brand(
        &self,
        brand_id: &BrandId,
    ) -> Result<responses::Brand, ClientError> {
        let response = self.post("brand", brand_id).await?;
        ok_body(response).await
    }

    pub async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<responses::ProductPage, ClientError> {
        let response = self.post("products", filter).await?;
        ok_body(response).await
    }

    pub async fn get_product(
        &self,
        product_id: &ProductId,
    ) -> Result<responses::Product, ClientError> {
        let response = self.post("product", product_id).await?;
        ok_body(response).await
    }

    pub async fn list_categories(
        &self,
    ) -> Result<Vec<responses::Category>, ClientError> {
        let response = self.empty_get("categories").await?;
        ok_body(response).await
    }

    pub async fn list_sizes(&self) -> Result<Vec<responses::Size>, ClientError> {
        let response = self.empty_get("sizes").await?;
        ok_body(response).await
    }

    pub async fn list_colors(
        &self,
    ) -> Result<Vec<responses::Color>, ClientError> {
        let response = self.empty_get("colors").await?;
        ok_body(response).await
    }

    /// The brand's answers, or None if it has not filled in the
    /// questionnaire.
    pub async fn get_ethics_questionnaire(
        &self,
        brand_id: &BrandId,
    ) -> Result<Option<responses::EthicsQuestionnaire>, ClientError> {
        let response = self.post("ethics_questionnaire", brand_id).await?;
        ok_body(response).await
    }

    // Reviews and moderation

    /// Approved reviews for a product, newest first.
    pub async fn list_reviews(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<responses::Review>, ClientError> {
        let response = self.post("reviews", product_id).await?;
        ok_body(response).await
    }

    /// Submit a review. It stays pending until a moderator approves it.
    pub async fn create_review(
        &self,
        details: &CreateReview,
    ) -> Result<responses::Review, ClientError> {
        let response = self.post("create_review", details).await?;
        ok_body(response).await
    }

    /// Reviews awaiting moderation (moderator+ only).
    pub async fn list_pending_reviews(
        &self,
    ) -> Result<Vec<responses::Review>, ClientError> {
        let response = self.empty_get("pending_reviews").await?;
        ok_body(response).await
    }

    pub async fn moderate_review(
        &self,
        details: &ModerateReview,
    ) -> Result<responses::Review, ClientError> {
        let response = self.post("moderate_review", details).await?;
        ok_body(response).await
    }

    // Wishlist, cart and orders for the logged in user

    pub async fn get_wishlist(
        &self,
    ) -> Result<responses::Wishlist, ClientError> {
        let response = self.empty_get("wishlist").await?;
        ok_body(response).await
    }

    /// Returns the wishlist after the toggle.
    pub async fn toggle_wishlist(
        &self,
        details: &ToggleWishlist,
    ) -> Result<responses::Wishlist, ClientError> {
        let response = self.post("toggle_wishlist", details).await?;
        ok_body(response).await
    }

    pub async fn get_cart(&self) -> Result<responses::Cart, ClientError> {
        let response = self.empty_get("cart").await?;
        ok_body(response).await
    }

    /// Returns the cart after the update.
    pub async fn update_cart_item(
        &self,
        details: &UpdateCartItem,
    ) -> Result<responses::Cart, ClientError> {
        let response = self.post("update_cart_item", details).await?;
        ok_body(response).await
    }

    /// Place an order for the current cart contents, emptying the cart.
    pub async fn checkout(
        &self,
        details: &Checkout,
    ) -> Result<responses::Order, ClientError> {
        let response = self.post("checkout", details).await?;
        ok_body(response).await
    }

    /// All orders (admin only).
    pub async fn list_orders(
        &self,
    ) -> Result<Vec<responses::Order>, ClientError> {
        let response = self.empty_get("orders").await?;
        ok_body(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::APIError(status, _) => Some(*status),
            Self::Network(e) => e.status(),
        }
    }
}

impl ErrorShape for ClientError {
    fn backend_payload(&self) -> Option<BackendPayload> {
        match self {
            Self::APIError(_, body) => BackendPayload::from_json(body),
            Self::Network(_) => None,
        }
    }

    /// Plain text bodies are shown as they are; JSON or empty bodies get a
    /// generic line with the status code.
    fn own_message(&self) -> Option<String> {
        match self {
            Self::APIError(status, body) => {
                let body = body.trim();
                if body.is_empty()
                    || serde_json::from_str::<serde_json::Value>(body).is_ok()
                {
                    Some(format!(
                        "Request failed with status code {}",
                        status.as_u16()
                    ))
                } else {
                    Some(body.to_string())
                }
            }
            Self::Network(_) => Some(self.to_string()),
        }
    }
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(response.json::<T>().await?)
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource::extract_message;

    fn api_error(status: StatusCode, body: &str) -> ClientError {
        ClientError::APIError(status, body.to_string())
    }

    #[test]
    fn backend_message_is_preferred() {
        let err = api_error(
            StatusCode::NOT_FOUND,
            r#"{"message":"Brand not found","error":"not_found"}"#,
        );
        assert_eq!(extract_message(&err), "Brand not found");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn backend_error_field_is_used_without_message() {
        let err = api_error(StatusCode::UNAUTHORIZED, r#"{"error":"Unauthorized"}"#);
        assert_eq!(extract_message(&err), "Unauthorized");
    }

    #[test]
    fn plain_text_body_is_shown() {
        let err = api_error(StatusCode::BAD_REQUEST, "Product is out of stock\n");
        assert_eq!(extract_message(&err), "Product is out of stock");
    }

    #[test]
    fn unhelpful_bodies_fall_back_to_status() {
        for body in ["", "  ", "{}", r#"{"message":""}"#, "[1,2]"] {
            let err = api_error(StatusCode::INTERNAL_SERVER_ERROR, body);
            assert_eq!(
                extract_message(&err),
                "Request failed with status code 500",
                "body {body:?}"
            );
        }
    }
}
