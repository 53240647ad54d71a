use serde::Deserialize;

use super::store::CloudantError;

pub const IAM_TOKEN_ENDPOINT: &str = "https://iam.cloud.ibm.com/identity/token";

const IAM_GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange a Cloudant API key for an IAM bearer token.
///
/// Standard OAuth2 client-credentials flow against the IBM IAM token
/// endpoint; the endpoint is a parameter so tests can point it elsewhere.
pub async fn fetch_iam_token(
    http: &reqwest::Client,
    endpoint: &str,
    api_key: &str,
) -> Result<String, CloudantError> {
    let response = http
        .post(endpoint)
        .header(reqwest::header::ACCEPT, "application/json")
        .form(&[("apikey", api_key), ("grant_type", IAM_GRANT_TYPE)])
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(CloudantError::TokenRejected(format!("{status}: {body}")));
    }

    let token: TokenResponse = response.json().await?;
    Ok(token.access_token)
}
