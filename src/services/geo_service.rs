//! Geoapify proxy client.
//!
//! Thin wrapper over the Geoapify geocoding/places/routing HTTP APIs. The
//! API key comes from the `GEOAPIFY_API_KEY` environment variable and is
//! appended to every outgoing request; upstream responses are passed through
//! as JSON and reshaped by the normalizers below before they reach clients.

use std::{env, time::Duration};

use serde_json::{json, Value};
use url::Url;

const GEO_BASE_V1: &str = "https://api.geoapify.com/v1";
const GEO_BASE_V2: &str = "https://api.geoapify.com/v2";

pub struct GeoService {
    http_client: reqwest::Client,
    api_key: String,
}

impl GeoService {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let api_key = env::var("GEOAPIFY_API_KEY")
            .map_err(|_| "GEOAPIFY_API_KEY environment variable not set")?;

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(GeoService {
            http_client,
            api_key,
        })
    }

    async fn call(&self, mut url: Url) -> Result<Value, Box<dyn std::error::Error>> {
        url.query_pairs_mut().append_pair("apiKey", &self.api_key);

        let response = self.http_client.get(url).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("Geoapify API error ({}): {}", status, body).into());
        }

        Ok(response.json().await?)
    }

    pub async fn geocode(&self, text: &str, limit: u32) -> Result<Value, Box<dyn std::error::Error>> {
        let url = Url::parse_with_params(
            &format!("{}/geocode/search", GEO_BASE_V1),
            &[("text", text), ("limit", &limit.to_string())],
        )?;
        self.call(url).await
    }

    pub async fn reverse(&self, lat: f64, lon: f64) -> Result<Value, Box<dyn std::error::Error>> {
        let url = Url::parse_with_params(
            &format!("{}/geocode/reverse", GEO_BASE_V1),
            &[("lat", lat.to_string()), ("lon", lon.to_string())],
        )?;
        self.call(url).await
    }

    pub async fn places(&self, params: &[(&str, String)]) -> Result<Value, Box<dyn std::error::Error>> {
        let url = Url::parse_with_params(&format!("{}/places", GEO_BASE_V2), params)?;
        self.call(url).await
    }

    pub async fn route(
        &self,
        waypoints: &str,
        mode: &str,
    ) -> Result<Value, Box<dyn std::error::Error>> {
        let url = Url::parse_with_params(
            &format!("{}/routing", GEO_BASE_V1),
            &[("waypoints", waypoints), ("mode", mode)],
        )?;
        self.call(url).await
    }
}

/// Reduce a Geoapify geocoding feature to the fields the frontend uses.
/// Missing properties become nulls rather than errors.
pub fn normalize_geocode(feature: &Value) -> Value {
    let props = &feature["properties"];
    json!({
        "id": props["place_id"],
        "formatted": props["formatted"],
        "lat": props["lat"],
        "lon": props["lon"],
        "country": props["country"],
        "city": props["city"],
    })
}

/// Reduce a Geoapify place feature to a point-of-interest summary.
pub fn normalize_poi(feature: &Value) -> Value {
    let props = &feature["properties"];
    json!({
        "id": props["place_id"],
        "name": props["name"],
        "category": props["categories"][0],
        "address": props["formatted"],
        "lat": props["lat"],
        "lon": props["lon"],
        "distance": props["distance"],
        "source": "geoapify",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_geocode_picks_expected_fields() {
        let feature = json!({
            "properties": {
                "place_id": "abc123",
                "formatted": "Lisbon, Portugal",
                "lat": 38.72,
                "lon": -9.14,
                "country": "Portugal",
                "city": "Lisbon",
                "state": "ignored"
            }
        });
        let normalized = normalize_geocode(&feature);
        assert_eq!(normalized["id"], "abc123");
        assert_eq!(normalized["city"], "Lisbon");
        assert!(normalized.get("state").is_none());
    }

    #[test]
    fn test_normalize_geocode_missing_fields_become_null() {
        let normalized = normalize_geocode(&json!({"properties": {"lat": 1.0}}));
        assert_eq!(normalized["city"], Value::Null);
        assert_eq!(normalized["country"], Value::Null);
    }

    #[test]
    fn test_normalize_poi_takes_first_category() {
        let feature = json!({
            "properties": {
                "place_id": "poi1",
                "name": "Castle",
                "categories": ["tourism.attraction", "heritage"],
                "formatted": "Castle St 1"
            }
        });
        let normalized = normalize_poi(&feature);
        assert_eq!(normalized["category"], "tourism.attraction");
        assert_eq!(normalized["source"], "geoapify");
        assert_eq!(normalized["distance"], Value::Null);
    }
}
