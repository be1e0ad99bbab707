//! Client for the University of Wyoming upper air sounding archive.

use chrono::{Datelike, NaiveDateTime, Timelike};
use reqwest::{
    blocking::Client,
    header::{ACCEPT, USER_AGENT},
    StatusCode, Url,
};
use std::time::Duration;

use crate::{errors::SkewTErr, sounding::Sounding, station::StationId};

mod parse;

pub use parse::parse_page;

/// Fetches soundings from the Wyoming text service, one blocking request per sounding.
#[derive(Debug)]
pub struct WyomingClient {
    client: Client,
    base_url: Url,
}

impl WyomingClient {
    /// The classic cgi interface to the sounding archive.
    pub const DEFAULT_URL: &'static str = "http://weather.uwyo.edu/cgi-bin/sounding";
    /// Default time to wait on the server.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    const USER_AGENT: &'static str = concat!("skewt/", env!("CARGO_PKG_VERSION"));
    const REGION: &'static str = "naconf";

    /// Create a client for the archive at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SkewTErr> {
        let base_url = Url::parse(base_url)
            .map_err(|err| SkewTErr::GeneralError(format!("bad url {}: {}", base_url, err)))?;
        let client = Client::builder().timeout(timeout).build()?;

        Ok(WyomingClient { client, base_url })
    }

    /// Get the observed sounding for `station` at `time`.
    pub fn request_data(
        &self,
        time: NaiveDateTime,
        station: &StationId,
    ) -> Result<Sounding, SkewTErr> {
        let url = self.sounding_url(time, station);
        tracing::debug!(message = "requesting sounding", url = %url);

        let res = self
            .client
            .get(url.clone())
            .header(USER_AGENT, Self::USER_AGENT)
            .header(ACCEPT, "text/html")
            .send()?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(SkewTErr::UnexpectedStatus(status, url.to_string()));
        }

        let page = res.text()?;
        tracing::debug!(message = "received response", bytes = page.len());

        if page.contains("Can't get") {
            return Err(SkewTErr::NoData {
                station: station.to_string(),
                time: time.format("%Y-%m-%d %HZ").to_string(),
            });
        }

        let snd = parse_page(&page)?;
        if snd.station_info().incomplete() {
            tracing::warn!(
                message = "incomplete station information",
                station = %station,
                info = ?snd.station_info()
            );
        }
        tracing::info!(
            message = "fetched sounding",
            station = %station,
            time = %time,
            levels = snd.len()
        );

        Ok(snd)
    }

    /// Build the request url for a station and time.
    pub fn sounding_url(&self, time: NaiveDateTime, station: &StationId) -> Url {
        let day_hour = format!("{:02}{:02}", time.day(), time.hour());

        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("region", Self::REGION)
            .append_pair("TYPE", "TEXT:LIST")
            .append_pair("YEAR", &format!("{:04}", time.year()))
            .append_pair("MONTH", &format!("{:02}", time.month()))
            .append_pair("FROM", &day_hour)
            .append_pair("TO", &day_hour)
            .append_pair("STNM", station.as_str());

        url
    }
}

#[cfg(test)]
mod unit {
    use super::*;

    use chrono::NaiveDate;
    use metfor::Quantity;
    use std::str::FromStr;

    fn oun_2020010112() -> (NaiveDateTime, StationId) {
        (
            NaiveDate::from_ymd_opt(2020, 1, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            StationId::from_str("OUN").unwrap(),
        )
    }

    #[test]
    fn test_sounding_url() {
        let client = WyomingClient::new(WyomingClient::DEFAULT_URL, WyomingClient::DEFAULT_TIMEOUT)
            .expect("Error building client.");
        let (time, station) = oun_2020010112();

        let url = client.sounding_url(time, &station);

        assert_eq!(url.host_str(), Some("weather.uwyo.edu"));
        assert_eq!(url.path(), "/cgi-bin/sounding");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("TYPE".to_owned(), "TEXT:LIST".to_owned())));
        assert!(pairs.contains(&("YEAR".to_owned(), "2020".to_owned())));
        assert!(pairs.contains(&("MONTH".to_owned(), "01".to_owned())));
        assert!(pairs.contains(&("FROM".to_owned(), "0112".to_owned())));
        assert!(pairs.contains(&("TO".to_owned(), "0112".to_owned())));
        assert!(pairs.contains(&("STNM".to_owned(), "OUN".to_owned())));
    }

    #[test]
    fn test_bad_base_url() {
        assert!(WyomingClient::new("not a url", WyomingClient::DEFAULT_TIMEOUT).is_err());
    }

    #[test]
    #[ignore] // Requires network access to weather.uwyo.edu
    fn test_live_request() {
        let client = WyomingClient::new(WyomingClient::DEFAULT_URL, WyomingClient::DEFAULT_TIMEOUT)
            .expect("Error building client.");
        let (time, station) = oun_2020010112();

        let snd = client
            .request_data(time, &station)
            .expect("Error fetching sounding.");

        assert!(!snd.is_empty());
        assert_eq!(snd.pressure_profile().len(), snd.temperature_profile().len());
        assert_eq!(snd.pressure_profile().len(), snd.u_wind_profile().len());
        assert!(snd
            .pressure_profile()
            .windows(2)
            .all(|pair| pair[0].unpack() >= pair[1].unpack()));
    }
}
