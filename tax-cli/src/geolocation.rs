//! IP-based location lookup against an ipapi-compatible JSON endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tax_core::{GeolocationError, Geolocator, Location, TaxTables, resolve_location};
use tracing::debug;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The fields read from the endpoint's response. ipapi reports failures
/// in-band with `error: true` and a `reason`.
#[derive(Debug, Clone, Default, Deserialize)]
struct IpApiResponse {
    #[serde(default)]
    country_code: Option<String>,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    region_code: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    error: bool,
    #[serde(default)]
    reason: Option<String>,
}

impl IpApiResponse {
    /// Maps the response onto the state table, trying the region name
    /// before the region code.
    fn into_location(
        self,
        tables: &TaxTables,
    ) -> Result<Location, GeolocationError> {
        if self.error {
            return Err(GeolocationError::Request(
                self.reason.unwrap_or_else(|| "endpoint reported an error".to_string()),
            ));
        }

        let country = self.country_code.unwrap_or_default();
        let city = self.city.unwrap_or_default();
        let region = self.region.unwrap_or_default();

        match resolve_location(tables, &country, &region, &city) {
            Err(GeolocationError::UnmappedRegion(_)) if self.region_code.is_some() => {
                let code = self.region_code.unwrap_or_default();
                resolve_location(tables, &country, &code, &city)
            }
            other => other,
        }
    }
}

pub struct IpApiGeolocator {
    client: reqwest::Client,
    url: String,
}

impl IpApiGeolocator {
    pub fn new(url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl Geolocator for IpApiGeolocator {
    async fn locate(&self) -> Result<Location, GeolocationError> {
        debug!(url = %self.url, "looking up location");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| GeolocationError::Request(e.to_string()))?;

        let body: IpApiResponse = response
            .json()
            .await
            .map_err(|e| GeolocationError::Request(e.to_string()))?;

        body.into_location(TaxTables::current())
    }
}
