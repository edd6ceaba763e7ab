use ratatui::style::{Color, Modifier, Style};

use crate::config::Theme;
use crate::dates::DueStatus;
use crate::models::Priority;
use crate::stats::Emphasis;

/// Parse a color string into a ratatui Color
///
/// Supports named colors (`red`, `lightblue`, `darkgray`, ...), `#RRGGBB`,
/// `#RGB` and `rgb(r, g, b)`. Anything else falls back to white.
pub fn parse_color(color_str: &str) -> Color {
    let s = color_str.trim().to_lowercase();

    match s.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" | "lightgray" | "lightgrey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        _ => {
            let parsed = if s.starts_with('#') {
                parse_hex_color(&s)
            } else if s.starts_with("rgb(") {
                parse_rgb_color(&s)
            } else {
                None
            };
            parsed.unwrap_or(Color::White)
        }
    }
}

fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.trim_start_matches('#');
    if !hex.is_ascii() {
        return None;
    }

    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        }
        3 => {
            // #RGB -> #RRGGBB
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            Some(Color::Rgb((r << 4) | r, (g << 4) | g, (b << 4) | b))
        }
        _ => None,
    }
}

fn parse_rgb_color(s: &str) -> Option<Color> {
    let content = s.strip_prefix("rgb(")?.strip_suffix(')')?;
    let parts: Vec<&str> = content.split(',').map(|s| s.trim()).collect();
    if parts.len() != 3 {
        return None;
    }

    Some(Color::Rgb(
        parts[0].parse::<u8>().ok()?,
        parts[1].parse::<u8>().ok()?,
        parts[2].parse::<u8>().ok()?,
    ))
}

/// Text color for a due date, or None to use the plain foreground
pub fn due_color(status: DueStatus, theme: &Theme) -> Option<Color> {
    match status {
        DueStatus::Overdue => Some(parse_color(&theme.overdue)),
        DueStatus::Today => Some(parse_color(&theme.due_today)),
        DueStatus::Future => Some(parse_color(&theme.due_future)),
        DueStatus::Unparsed => None,
    }
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

pub fn emphasis_style(emphasis: Emphasis) -> Style {
    match emphasis {
        Emphasis::Celebrate => Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        Emphasis::Strong => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Emphasis::Steady => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        Emphasis::Mild => Style::default().fg(Color::Cyan),
        Emphasis::Subtle => Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
    }
}
