//! Plain-text rendering of the view states, with truecolor escapes for
//! the AQI badge and the condition-themed header.

use skycast_core::{Theme, Unit, ViewState, WeatherReport};

struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

const WHITE: Rgb = Rgb {
    r: 222,
    g: 222,
    b: 222,
};

fn theme_color(theme: Theme) -> Rgb {
    match theme {
        Theme::Clear => Rgb {
            r: 255,
            g: 233,
            b: 102,
        },
        Theme::Cloud => Rgb {
            r: 180,
            g: 180,
            b: 180,
        },
        Theme::Drizzle => Rgb {
            r: 157,
            g: 235,
            b: 255,
        },
        Theme::Rain => Rgb {
            r: 92,
            g: 119,
            b: 242,
        },
        Theme::Snow => Rgb {
            r: 222,
            g: 235,
            b: 255,
        },
        Theme::Mist => Rgb {
            r: 180,
            g: 190,
            b: 200,
        },
        Theme::Default => WHITE,
    }
}

// add an escape sequence to a &str for the foreground color
fn add_fg_esc(text: &str, color: &Rgb) -> String {
    format!(
        "\x1b[38;2;{};{};{}m{}\x1b[0m",
        color.r, color.g, color.b, text
    )
}

// add an escape sequence to a &str for the background color
fn add_bg_esc(text: &str, color: &Rgb) -> String {
    format!(
        "\x1b[48;2;{};{};{}m\x1b[30m{}\x1b[0m",
        color.r, color.g, color.b, text
    )
}

/// Parse "#rrggbb".
fn hex_rgb(hex: &str) -> Option<Rgb> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    Some(Rgb {
        r: u8::from_str_radix(&hex[0..2], 16).ok()?,
        g: u8::from_str_radix(&hex[2..4], 16).ok()?,
        b: u8::from_str_radix(&hex[4..6], 16).ok()?,
    })
}

pub fn loading() {
    println!("Refreshing...");
}

pub fn view_state(state: &ViewState, unit: Unit) {
    match state {
        ViewState::Idle => {}
        ViewState::Loading => loading(),
        ViewState::Error(message) => println!("{message}"),
        ViewState::Ready(report) => report_view(report, unit),
    }
}

fn report_view(report: &WeatherReport, unit: Unit) {
    let snap = &report.snapshot;
    let accent = theme_color(snap.theme);

    println!();
    if let Some(aqi) = report.aqi {
        let badge = format!(" AQI: {} ", aqi.label());
        match hex_rgb(aqi.color()) {
            Some(color) => println!("{}", add_bg_esc(&badge, &color)),
            None => println!("{badge}"),
        }
    }

    println!(
        "{}  {}",
        snap.icon.glyph(),
        add_fg_esc(&format!("{}°", snap.temperature), &accent)
    );
    println!("{}, {}", snap.location, snap.country);
    println!("{}", snap.local_time);
    println!("{}", snap.description);
    println!("H: {}°  L: {}°", snap.temp_max, snap.temp_min);

    println!();
    println!("Humidity     {}%", snap.humidity);
    println!("Wind         {} {}", snap.wind_speed, unit.wind_speed_suffix());
    println!("Feels like   {}°", snap.feels_like);
    println!("Visibility   {:.1} km", snap.visibility_km);
    println!("Pressure     {} hPa", snap.pressure);
    println!("Sunrise      {}", snap.sunrise);
    println!("Sunset       {}", snap.sunset);

    if !report.forecast.is_empty() {
        println!();
        println!("5-day forecast");
        for entry in &report.forecast {
            println!(
                "  {}  {}  {}°",
                entry.date.format("%a"),
                entry.icon.glyph(),
                entry.temperature
            );
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parses_badge_colors() {
        let green = hex_rgb("#4caf50").unwrap();
        assert_eq!((green.r, green.g, green.b), (0x4c, 0xaf, 0x50));
        assert!(hex_rgb("4caf50").is_none());
        assert!(hex_rgb("#xyzxyz").is_none());
    }
}
