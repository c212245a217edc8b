use derive_more::{Deref, Display, Into};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ConfigError as Error;

/// Latitude in degrees, `[-90, 90]`
#[derive(Serialize, Deserialize, Debug, PartialEq, PartialOrd, Clone, Copy, Deref, Into, Display)]
#[serde(try_from = "f64", into = "f64")]
pub struct Latitude(f64);

impl TryFrom<f64> for Latitude {
    type Error = Error;

    fn try_from(item: f64) -> Result<Self, Self::Error> {
        if (-90.0..=90.0).contains(&item) {
            Ok(Self(item))
        } else {
            Err(Error::LatitudeOutOfRange(item))
        }
    }
}

impl FromStr for Latitude {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lat: f64 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidCoordinate(s.into()))?;
        lat.try_into()
    }
}

/// Longitude in degrees, `[-180, 180]`
#[derive(Serialize, Deserialize, Debug, PartialEq, PartialOrd, Clone, Copy, Deref, Into, Display)]
#[serde(try_from = "f64", into = "f64")]
pub struct Longitude(f64);

impl TryFrom<f64> for Longitude {
    type Error = Error;

    fn try_from(item: f64) -> Result<Self, Self::Error> {
        if (-180.0..=180.0).contains(&item) {
            Ok(Self(item))
        } else {
            Err(Error::LongitudeOutOfRange(item))
        }
    }
}

impl FromStr for Longitude {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lon: f64 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidCoordinate(s.into()))?;
        lon.try_into()
    }
}
