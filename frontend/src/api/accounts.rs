use serde_json::json;

use super::{client::ApiClient, types::ApiError};

pub const RESET_PASSWORD_METHOD: &str = "resetPasswordCustom";

impl ApiClient {
    pub async fn reset_password_custom(
        &self,
        token: String,
        new_password: String,
    ) -> Result<(), ApiError> {
        self.call_method(RESET_PASSWORD_METHOD, vec![json!(token), json!(new_password)])
            .await
            .map(|_| ())
    }
}
