//! # Live Rate Client
//!
//! Base-rate search against the carrier pricing API.
//!
//! ```text
//! POST {base}/prices/v3/base-rates/search
//! Authorization: Bearer <token>
//! ```
//!
//! The weight is sent both as decimal pounds and as whole pounds plus
//! remaining ounces. The response's `totalBasePrice` becomes the live rate;
//! its `zone`, when present and within 1-8, is reported alongside.

use crate::domain::value_objects::{Rate, Zone};
use crate::infrastructure::carrier::error::{CarrierError, CarrierResult};
use crate::infrastructure::carrier::http_client::HttpClient;
use crate::infrastructure::carrier::traits::{LiveRate, LiveRateRequest, LiveRateSource};
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// Path of the base-rate search endpoint relative to the API base URL.
pub const BASE_RATES_PATH: &str = "/prices/v3/base-rates/search";

/// Processing category sent with every request.
pub const PROCESSING_CATEGORY: &str = "MACHINABLE";

/// Destination type sent with every request.
pub const DESTINATION_TYPE: &str = "RESIDENTIAL";

/// Single-piece rate indicator.
pub const RATE_INDICATOR: &str = "SP";

/// Wire format of a base-rate search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseRateSearchRequest {
    /// Ship-from ZIP code.
    #[serde(rename = "originZIPCode")]
    pub origin_zip_code: String,
    /// Ship-to ZIP code.
    #[serde(rename = "destinationZIPCode")]
    pub destination_zip_code: String,
    /// Weight in decimal pounds.
    pub weight: f64,
    /// Whole pounds.
    pub pounds: u32,
    /// Ounces beyond the whole pounds.
    pub ounces: f64,
    /// Length in inches.
    pub length: f64,
    /// Width in inches.
    pub width: f64,
    /// Height in inches.
    pub height: f64,
    /// Carrier mail class code.
    pub mail_class: String,
    /// Processing category.
    pub processing_category: String,
    /// Destination type.
    pub destination_type: String,
    /// Rate indicator.
    pub rate_indicator: String,
    /// Mailing date, `YYYY-MM-DD`.
    pub mailing_date: String,
}

impl From<&LiveRateRequest> for BaseRateSearchRequest {
    fn from(request: &LiveRateRequest) -> Self {
        let (pounds, ounces) = request.weight.pounds_and_ounces();
        Self {
            origin_zip_code: request.origin.five_digit().to_string(),
            destination_zip_code: request.destination.five_digit().to_string(),
            weight: request.weight.pounds().to_f64().unwrap_or_default(),
            pounds,
            ounces: ounces.to_f64().unwrap_or_default(),
            length: request.dimensions.length(),
            width: request.dimensions.width(),
            height: request.dimensions.height(),
            mail_class: request.tier.mail_class().to_string(),
            processing_category: PROCESSING_CATEGORY.to_string(),
            destination_type: DESTINATION_TYPE.to_string(),
            rate_indicator: RATE_INDICATOR.to_string(),
            mailing_date: request.mailing_date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Wire format of a base-rate search response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseRateSearchResponse {
    /// Total base price.
    #[serde(default)]
    pub total_base_price: Option<Decimal>,
    /// Individual rate lines.
    #[serde(default)]
    pub rates: Vec<RateLine>,
}

/// One rate line in a base-rate search response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLine {
    /// Line price.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Zone, sent by the carrier as either `"08"` or `8`.
    #[serde(default)]
    pub zone: Option<serde_json::Value>,
}

impl BaseRateSearchResponse {
    /// Converts the response into a live rate.
    ///
    /// # Errors
    ///
    /// Returns `CarrierError::RateUnavailable` if no price is present and
    /// `CarrierError::ProtocolError` if the price is negative.
    pub fn into_live_rate(self) -> CarrierResult<LiveRate> {
        let amount = self
            .total_base_price
            .or_else(|| self.rates.iter().find_map(|line| line.price))
            .ok_or_else(|| CarrierError::rate_unavailable("response has no totalBasePrice"))?;
        let rate = Rate::new(amount)
            .map_err(|_| CarrierError::protocol_error(format!("negative base price {}", amount)))?;
        let zone = self
            .rates
            .iter()
            .find_map(|line| line.zone.as_ref().and_then(parse_zone));

        Ok(LiveRate { rate, zone })
    }
}

fn parse_zone(value: &serde_json::Value) -> Option<Zone> {
    let raw = match value {
        serde_json::Value::String(s) => s.trim().parse::<u8>().ok()?,
        serde_json::Value::Number(n) => u8::try_from(n.as_u64()?).ok()?,
        _ => return None,
    };
    Zone::new(raw).ok()
}

/// Live rate client for the carrier pricing API.
#[derive(Debug, Clone)]
pub struct CarrierRateClient {
    http: HttpClient,
    rates_url: String,
}

impl CarrierRateClient {
    /// Creates a client posting to `{api_base_url}/prices/v3/base-rates/search`.
    #[must_use]
    pub fn new(http: HttpClient, api_base_url: &str) -> Self {
        Self {
            http,
            rates_url: format!("{}{}", api_base_url.trim_end_matches('/'), BASE_RATES_PATH),
        }
    }

    /// Returns the rate endpoint URL.
    #[inline]
    #[must_use]
    pub fn rates_url(&self) -> &str {
        &self.rates_url
    }
}

#[async_trait]
impl LiveRateSource for CarrierRateClient {
    async fn quote_live(&self, request: &LiveRateRequest, token: &str) -> CarrierResult<LiveRate> {
        let body = BaseRateSearchRequest::from(request);
        let headers = HttpClient::bearer_headers(token)?;

        tracing::debug!(
            tier = %request.tier,
            mail_class = %body.mail_class,
            destination = %request.destination,
            "requesting live rate"
        );

        let response: BaseRateSearchResponse = self
            .http
            .post_with_headers(&self.rates_url, &body, headers)
            .await?;
        let live = response.into_live_rate()?;

        tracing::debug!(tier = %request.tier, rate = %live.rate, zone = ?live.zone, "live rate received");
        Ok(live)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Dimensions, ServiceTier, Weight};
    use chrono::NaiveDate;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, header, method, path},
    };

    fn request(tier: ServiceTier) -> LiveRateRequest {
        LiveRateRequest {
            weight: Weight::from_ounces(40.0).unwrap(),
            dimensions: Dimensions::parse("10x8x4").unwrap(),
            origin: "90210".parse().unwrap(),
            destination: "10001-1234".parse().unwrap(),
            tier,
            mailing_date: NaiveDate::from_ymd_opt(2026, 3, 9).unwrap(),
        }
    }

    fn client(server: &MockServer) -> CarrierRateClient {
        CarrierRateClient::new(HttpClient::new(5000).unwrap(), &server.uri())
    }

    #[test]
    fn wire_request_fields() {
        let body = BaseRateSearchRequest::from(&request(ServiceTier::Economy));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["originZIPCode"], "90210");
        assert_eq!(json["destinationZIPCode"], "10001");
        assert_eq!(json["weight"], 2.5);
        assert_eq!(json["pounds"], 2);
        assert_eq!(json["ounces"], 8.0);
        assert_eq!(json["mailClass"], "PARCEL_SELECT");
        assert_eq!(json["processingCategory"], "MACHINABLE");
        assert_eq!(json["destinationType"], "RESIDENTIAL");
        assert_eq!(json["rateIndicator"], "SP");
        assert_eq!(json["mailingDate"], "2026-03-09");
    }

    #[test]
    fn zone_parsing() {
        assert_eq!(parse_zone(&serde_json::json!("08")), Some(Zone::MAX));
        assert_eq!(parse_zone(&serde_json::json!(3)).unwrap().get(), 3);
        assert_eq!(parse_zone(&serde_json::json!("09")), None);
        assert_eq!(parse_zone(&serde_json::json!(null)), None);
    }

    #[test]
    fn response_without_price_is_unavailable() {
        let response: BaseRateSearchResponse =
            serde_json::from_value(serde_json::json!({ "rates": [] })).unwrap();
        assert!(matches!(
            response.into_live_rate(),
            Err(CarrierError::RateUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn live_rate_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(BASE_RATES_PATH))
            .and(header("Authorization", "Bearer tok-123"))
            .and(body_partial_json(serde_json::json!({
                "mailClass": "USPS_GROUND_ADVANTAGE",
                "rateIndicator": "SP"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "totalBasePrice": 9.35,
                "rates": [{ "price": 9.35, "zone": "08", "mailClass": "USPS_GROUND_ADVANTAGE" }]
            })))
            .mount(&server)
            .await;

        let live = client(&server)
            .quote_live(&request(ServiceTier::Ground), "tok-123")
            .await
            .unwrap();
        assert_eq!(live.rate.amount(), Decimal::new(935, 2));
        assert_eq!(live.zone, Some(Zone::MAX));
    }

    #[tokio::test]
    async fn server_error_is_connection_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(BASE_RATES_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let error = client(&server)
            .quote_live(&request(ServiceTier::Ground), "tok")
            .await
            .unwrap_err();
        assert!(matches!(error, CarrierError::Connection { .. }));
    }

    #[tokio::test]
    async fn rejected_token_is_authentication_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(BASE_RATES_PATH))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let error = client(&server)
            .quote_live(&request(ServiceTier::Priority), "expired")
            .await
            .unwrap_err();
        assert!(error.auth_failure_kind().is_some());
    }
}
