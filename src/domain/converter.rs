//! Day One entry to plain-text journal entry conversion

use crate::domain::dayone::{Location, RawDayOneEntry, Weather};
use crate::error::Result;
use std::path::Path;

const METADATA_INDENT: &str = "    ";
const UNTAGGED: &str = "#untagged";

/// Convert one Day One entry into a plain-text journal entry.
///
/// `media_base` is the directory holding the export's `photos/`, `pdfs/`
/// and `audios/` folders; embedded moment URLs are rewritten to files there.
pub fn convert(entry: &RawDayOneEntry, media_base: &Path) -> Result<String> {
    let date = entry.localized_creation_date()?;
    let date_str = format!("[{}]", date.format("%Y-%m-%d %H:%M:%S %p"));

    let mut header = format!("{} {}", date_str, format_tags(&entry.tags));
    if entry.starred {
        header.push_str(" *");
    }

    let mut lines = vec![header];

    let metadata = metadata_lines(entry);
    if !metadata.is_empty() {
        lines.extend(
            metadata
                .into_iter()
                .map(|line| format!("{}{}", METADATA_INDENT, line)),
        );
    }

    if let Some(text) = entry.text.as_deref().filter(|text| !text.is_empty()) {
        let text = rewrite_media(entry, &unescape(text), media_base);
        lines.push(String::new());
        lines.push(text.trim().to_string());
    }

    Ok(lines.join("\n"))
}

/// Undo the markdown escaping Day One applies to exported text
fn unescape(text: &str) -> String {
    text.replace("\\!", "!")
        .replace("\\.", ".")
        .replace("\\n", "\n")
}

/// `["Hiking", "New York"]` becomes `#hiking #newYork`
fn format_tags(tags: &[String]) -> String {
    let tags: Vec<String> = tags
        .iter()
        .map(|tag| normalize_tag(tag))
        .filter(|tag| !tag.is_empty())
        .collect();

    if tags.is_empty() {
        return UNTAGGED.to_string();
    }

    tags.iter()
        .map(|tag| format!("#{}", tag))
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_tag(tag: &str) -> String {
    let mut chars = tag.chars();
    let lowered = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    lowered.replace(' ', "")
}

fn rewrite_media(entry: &RawDayOneEntry, text: &str, media_base: &Path) -> String {
    let mut result = text.to_string();
    for (kind, media) in entry.all_media() {
        let moment = format!("![]({})", kind.moment_url(&media.identifier));
        let local = format!("![]({})", kind.local_path(media_base, media).display());
        result = result.replace(&moment, &local);
    }
    result
}

fn metadata_lines(entry: &RawDayOneEntry) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(location) = &entry.location {
        lines.extend(location_lines(location));
    }

    if let Some(weather) = &entry.weather {
        lines.push(weather_line(weather));
    }

    if let Some(device) = &entry.creation_device {
        match &entry.creation_device_type {
            Some(device_type) => lines.push(format!("Device:: {} ({})", device, device_type)),
            None => lines.push(format!("Device:: {}", device)),
        }
    }

    lines
}

fn location_lines(location: &Location) -> Vec<String> {
    let mut lines = Vec::new();

    let place: Vec<&str> = [
        &location.place_name,
        &location.locality_name,
        &location.country,
    ]
    .into_iter()
    .filter_map(|part| part.as_deref())
    .collect();

    if !place.is_empty() {
        lines.push(format!("Place:: {}", place.join(", ")));
    }

    lines.push(format!(
        "Location:: {}, {}",
        format_coordinate(location.latitude),
        format_coordinate(location.longitude)
    ));

    lines
}

fn weather_line(weather: &Weather) -> String {
    format!(
        "Weather:: {}, {:.1}°C, {:.1} km/h",
        weather.conditions_description, weather.temperature_celsius, weather.wind_speed_kph
    )
}

/// Coordinates keep at least one decimal place (`40.0`, `-73.9857`)
fn format_coordinate(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
