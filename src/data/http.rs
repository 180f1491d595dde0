use {reqwest::Client, serde::de::DeserializeOwned};

#[cfg(not(target_arch = "wasm32"))]
use {crate::config::PROVIDER, std::time::Duration};

use crate::{config::DF, data::FetchError};

pub(crate) fn build_client() -> Result<Client, FetchError> {
    let builder = Client::builder();

    // The browser applies its own user agent; the fetch slot enforces the deadline there.
    #[cfg(not(target_arch = "wasm32"))]
    let builder = builder
        .timeout(Duration::from_millis(PROVIDER.client.timeout_ms))
        .user_agent(PROVIDER.client.user_agent);

    Ok(builder.build()?)
}

pub(crate) async fn get_text(client: &Client, url: &str) -> Result<String, FetchError> {
    #[cfg(debug_assertions)]
    if DF.log_fetch {
        log::info!("FETCH: GET {}", url);
    }

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        log::warn!("FETCH: {} answered {}", url, status);
        return Err(FetchError::status(status.as_u16()));
    }
    Ok(response.text().await?)
}

pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
) -> Result<T, FetchError> {
    let body = get_text(client, url).await?;
    Ok(serde_json::from_str(&body)?)
}
