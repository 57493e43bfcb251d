//! Terminal rendering of a [`WeatherReport`] as a small card.

use console::{Color, Style};
use weather_core::{ColorCategory, WeatherReport};

/// Card tint for a colour category.
fn tint(category: ColorCategory) -> Option<Color> {
    match category {
        ColorCategory::Clear => Some(Color::Yellow),
        ColorCategory::Overcast => Some(Color::White),
        ColorCategory::Precipitation => Some(Color::Blue),
        ColorCategory::Snow => Some(Color::Cyan),
        ColorCategory::Storm => Some(Color::Magenta),
        ColorCategory::Unknown => None,
    }
}

pub fn render_card(report: &WeatherReport, colors: bool) -> String {
    let base = Style::new().force_styling(colors);
    let accent = match tint(report.classification.color) {
        Some(color) => base.clone().fg(color),
        None => base.clone(),
    };
    let heading = accent.clone().bold();
    let temperature = base.clone().green().bold();
    let dim = base.clone().dim();

    let mut lines = vec![heading.apply_to(report.location.display_name()).to_string()];

    if let Some(tz) = &report.location.timezone {
        lines.push(dim.apply_to(tz).to_string());
    }

    // Unknown codes have neither; print nothing rather than a blank line.
    let condition = [report.classification.icon, report.classification.description]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if !condition.is_empty() {
        lines.push(accent.apply_to(condition).to_string());
    }

    lines.push(
        temperature
            .apply_to(format!("Temperature: {}°C", report.weather.temperature_c))
            .to_string(),
    );
    lines.push(format!("Wind Speed: {} km/h", report.weather.wind_speed_kmh));

    if let Some(at) = report.weather.observation_time {
        lines.push(dim.apply_to(format!("Observed: {}", at.format("%Y-%m-%d %H:%M UTC"))).to_string());
    }

    lines.push(String::new());
    lines.push(base.clone().bold().apply_to(report.advisory.activity).to_string());
    lines.push(report.advisory.clothing.to_string());

    lines.join("\n")
}

/// One line per known weather code, for `weather codes`.
pub fn render_codes(colors: bool) -> String {
    let base = Style::new().force_styling(colors);

    weather_core::condition::conditions()
        .map(|entry| {
            let category = weather_core::condition::color_category(entry.code);
            let style = match tint(category) {
                Some(color) => base.clone().fg(color),
                None => base.clone(),
            };
            format!(
                "{:>3}  {}  {:<34} {}",
                entry.code,
                entry.icon,
                entry.description,
                style.apply_to(category),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
