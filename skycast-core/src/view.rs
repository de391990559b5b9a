//! Pure mapping from raw API responses to display-ready values: truncated
//! temperatures, location-local clock strings, icon and theme selection,
//! and the one-entry-per-day forecast.

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use crate::client::{AirPollutionResponse, CurrentResponse, ForecastResponse};
use crate::model::{AqiLevel, ConditionCode, Coordinates, ForecastEntry, WeatherSnapshot};

/// Forecast readings carry this stamp once per calendar day.
const MIDDAY_MARK: &str = "12:00:00";

/// Temperatures truncate toward zero for display, never round.
pub fn display_temp(value: f64) -> i32 {
    value.trunc() as i32
}

/// Shift a UTC timestamp into the location's wall clock using the offset
/// the API reports. The viewer's own timezone plays no part.
pub fn location_time(utc_seconds: i64, offset_seconds: i32) -> Option<DateTime<FixedOffset>> {
    let offset = FixedOffset::east_opt(offset_seconds)?;
    Some(DateTime::<Utc>::from_timestamp(utc_seconds, 0)?.with_timezone(&offset))
}

/// 12-hour clock, e.g. "06:42 AM".
pub fn clock(utc_seconds: i64, offset_seconds: i32) -> String {
    location_time(utc_seconds, offset_seconds)
        .map(|t| t.format("%I:%M %p").to_string())
        .unwrap_or_default()
}

/// Weekday plus 12-hour clock, e.g. "Wed 03:15 PM".
pub fn day_clock(utc_seconds: i64, offset_seconds: i32) -> String {
    location_time(utc_seconds, offset_seconds)
        .map(|t| t.format("%a %I:%M %p").to_string())
        .unwrap_or_default()
}

/// Reshape the current-conditions response. `now` feeds the location's
/// wall-clock line.
pub fn snapshot(current: &CurrentResponse, now: DateTime<Utc>) -> WeatherSnapshot {
    let conditions = current.weather.first();
    let code = conditions
        .map(|w| ConditionCode::from_icon_code(&w.icon))
        .unwrap_or(ConditionCode::Unknown);
    let description = conditions.map(|w| w.description.clone()).unwrap_or_default();

    WeatherSnapshot {
        temperature: display_temp(current.main.temp),
        temp_min: display_temp(current.main.temp_min),
        temp_max: display_temp(current.main.temp_max),
        feels_like: display_temp(current.main.feels_like),
        humidity: current.main.humidity,
        wind_speed: current.wind.speed,
        pressure: current.main.pressure,
        visibility_km: f64::from(current.visibility) / 1000.0,
        location: current.name.clone(),
        country: current.sys.country.clone(),
        description,
        icon: code.icon(),
        theme: code.theme(),
        sunrise: clock(current.sys.sunrise, current.timezone),
        sunset: clock(current.sys.sunset, current.timezone),
        local_time: day_clock(now.timestamp(), current.timezone),
        coordinates: Coordinates {
            lat: current.coord.lat,
            lon: current.coord.lon,
        },
    }
}

/// First reading of the pollution response, if it maps to a valid index.
pub fn aqi_level(resp: &AirPollutionResponse) -> Option<AqiLevel> {
    resp.list
        .first()
        .and_then(|item| AqiLevel::from_index(item.main.aqi))
}

/// Keep only each day's midday reading, in response order, one entry per
/// calendar day.
pub fn daily_forecast(resp: &ForecastResponse) -> Vec<ForecastEntry> {
    let mut days = Vec::new();
    let mut seen = HashSet::new();

    for item in &resp.list {
        if !item.dt_txt.contains(MIDDAY_MARK) {
            continue;
        }
        let Some(date) = NaiveDateTime::parse_from_str(&item.dt_txt, "%Y-%m-%d %H:%M:%S")
            .ok()
            .map(|stamp| stamp.date())
        else {
            continue;
        };
        if !seen.insert(date) {
            continue;
        }

        let code = item
            .weather
            .first()
            .map(|w| ConditionCode::from_icon_code(&w.icon))
            .unwrap_or(ConditionCode::Unknown);

        days.push(ForecastEntry {
            date,
            icon: code.icon(),
            temperature: display_temp(item.main.temp),
        });
    }

    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{
        CoordBlock, ForecastItem, MainReadings, PollutionIndex, PollutionItem, SysBlock,
        WeatherDesc, WindReading,
    };
    use crate::model::Icon;

    fn readings(temp: f64) -> MainReadings {
        MainReadings {
            temp,
            temp_min: temp - 2.2,
            temp_max: temp + 1.7,
            feels_like: temp - 0.4,
            humidity: 61,
            pressure: 1014,
        }
    }

    fn current(temp: f64, timezone: i32) -> CurrentResponse {
        CurrentResponse {
            name: "Lisbon".to_string(),
            dt: 1_700_000_000,
            timezone,
            coord: CoordBlock {
                lat: 38.72,
                lon: -9.13,
            },
            main: readings(temp),
            wind: WindReading { speed: 4.6 },
            visibility: 9_300,
            sys: SysBlock {
                country: "PT".to_string(),
                sunrise: 1_700_027_100,
                sunset: 1_700_063_400,
            },
            weather: vec![WeatherDesc {
                description: "light rain".to_string(),
                icon: "10d".to_string(),
            }],
        }
    }

    #[test]
    fn temperatures_truncate_not_round() {
        assert_eq!(display_temp(21.9), 21);
        assert_eq!(display_temp(21.1), 21);
        assert_eq!(display_temp(-0.7), 0);
        assert_eq!(display_temp(-2.5), -2);
    }

    #[test]
    fn snapshot_truncates_every_temperature_field() {
        let snap = snapshot(&current(21.9, 0), Utc::now());
        assert_eq!(snap.temperature, 21);
        assert_eq!(snap.temp_min, 19);
        assert_eq!(snap.temp_max, 23);
        assert_eq!(snap.feels_like, 21);
    }

    #[test]
    fn snapshot_maps_condition_and_units() {
        let snap = snapshot(&current(18.0, 0), Utc::now());
        assert_eq!(snap.icon, Icon::Rain);
        assert_eq!(snap.description, "light rain");
        assert_eq!(snap.location, "Lisbon");
        assert_eq!(snap.country, "PT");
        assert!((snap.visibility_km - 9.3).abs() < 1e-9);
    }

    #[test]
    fn location_time_applies_offset_only() {
        // 2023-11-14 22:13:20 UTC
        let ts = 1_700_000_000;
        let utc = location_time(ts, 0).unwrap();
        let plus_one = location_time(ts, 3600).unwrap();
        let minus_five = location_time(ts, -5 * 3600).unwrap();

        assert_eq!(utc.format("%H:%M").to_string(), "22:13");
        assert_eq!(plus_one.format("%H:%M").to_string(), "23:13");
        assert_eq!(minus_five.format("%H:%M").to_string(), "17:13");
    }

    #[test]
    fn sunrise_reflects_location_not_viewer() {
        // The computation has no viewer input at all; two snapshots built
        // from the same payload agree regardless of where they run.
        let a = snapshot(&current(20.0, 7 * 3600), Utc::now());
        let b = snapshot(&current(20.0, 7 * 3600), Utc::now());
        assert_eq!(a.sunrise, b.sunrise);
        assert_eq!(clock(1_700_027_100, 7 * 3600), a.sunrise);
    }

    fn forecast_item(dt_txt: &str, temp: f64, icon: &str) -> ForecastItem {
        ForecastItem {
            dt: 0,
            dt_txt: dt_txt.to_string(),
            main: readings(temp),
            weather: vec![WeatherDesc {
                description: "scattered clouds".to_string(),
                icon: icon.to_string(),
            }],
        }
    }

    #[test]
    fn forecast_keeps_only_midday_readings() {
        let resp = ForecastResponse {
            list: vec![
                forecast_item("2024-03-01 09:00:00", 10.0, "03d"),
                forecast_item("2024-03-01 12:00:00", 14.9, "03d"),
                forecast_item("2024-03-01 15:00:00", 13.0, "03d"),
                forecast_item("2024-03-02 12:00:00", 16.2, "01d"),
                forecast_item("2024-03-03 12:00:00", 11.5, "13d"),
            ],
        };

        let days = daily_forecast(&resp);
        assert_eq!(days.len(), 3);
        assert_eq!(days[0].temperature, 14);
        assert_eq!(days[1].icon, Icon::Clear);
        assert_eq!(days[2].icon, Icon::Snow);
    }

    #[test]
    fn forecast_never_repeats_a_day() {
        let resp = ForecastResponse {
            list: vec![
                forecast_item("2024-03-01 12:00:00", 14.0, "03d"),
                forecast_item("2024-03-01 12:00:00", 15.0, "03d"),
            ],
        };
        assert_eq!(daily_forecast(&resp).len(), 1);
    }

    #[test]
    fn aqi_reads_first_list_entry() {
        let resp = AirPollutionResponse {
            list: vec![PollutionItem {
                main: PollutionIndex { aqi: 3 },
            }],
        };
        assert_eq!(aqi_level(&resp), Some(AqiLevel::Moderate));

        let empty = AirPollutionResponse { list: vec![] };
        assert_eq!(aqi_level(&empty), None);

        let invalid = AirPollutionResponse {
            list: vec![PollutionItem {
                main: PollutionIndex { aqi: 9 },
            }],
        };
        assert_eq!(aqi_level(&invalid), None);
    }
}
