//! Color conversion between CSS literals and the remote RGBA form

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::RemoteColor;

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^#?([a-f\d]{2})([a-f\d]{2})([a-f\d]{2})([a-f\d]{2})?$").unwrap()
});

static RGB_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*(\d*\.?\d+)\s*)?\)$",
    )
    .unwrap()
});

/// Parse a 6- or 8-digit hex color (leading `#` optional, any case).
///
/// Returns `None` for anything else; callers substitute
/// [`RemoteColor::SENTINEL`] and record a warning.
pub fn hex_to_color(hex: &str) -> Option<RemoteColor> {
    let caps = HEX_COLOR.captures(hex.trim())?;
    let channel = |i: usize| -> Option<f64> {
        let m = caps.get(i)?;
        u8::from_str_radix(m.as_str(), 16)
            .ok()
            .map(|v| f64::from(v) / 255.0)
    };
    Some(RemoteColor {
        r: channel(1)?,
        g: channel(2)?,
        b: channel(3)?,
        a: channel(4).unwrap_or(1.0),
    })
}

/// Parse any color literal accepted in token sources: hex, `transparent`,
/// `rgb(r, g, b)` and `rgba(r, g, b, a)`.
pub fn parse_color(value: &str) -> Option<RemoteColor> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("transparent") {
        return Some(RemoteColor::TRANSPARENT);
    }
    if let Some(color) = hex_to_color(value) {
        return Some(color);
    }

    let caps = RGB_COLOR.captures(value)?;
    let channel = |i: usize| -> Option<f64> {
        let v: u16 = caps.get(i)?.as_str().parse().ok()?;
        (v <= 255).then(|| f64::from(v) / 255.0)
    };
    let alpha = match caps.get(4) {
        Some(m) => m.as_str().parse::<f64>().ok().filter(|a| (0.0..=1.0).contains(a))?,
        None => 1.0,
    };
    Some(RemoteColor {
        r: channel(1)?,
        g: channel(2)?,
        b: channel(3)?,
        a: alpha,
    })
}

/// Render a remote color as hex.
///
/// Opaque colors are `#RRGGBB` in uppercase; translucent colors get the
/// alpha byte appended (`#rrggbbaa`, lowercase).
pub fn color_to_hex(color: &RemoteColor) -> String {
    let byte = |c: f64| -> u8 { (c.clamp(0.0, 1.0) * 255.0).round() as u8 };
    let rgb = format!(
        "#{:02x}{:02x}{:02x}",
        byte(color.r),
        byte(color.g),
        byte(color.b)
    );
    if color.a < 1.0 {
        format!("{}{:02x}", rgb, byte(color.a))
    } else {
        rgb.to_uppercase()
    }
}
