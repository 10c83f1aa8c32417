//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::{Priority, Status};

pub const AMBER: Color = Color::Rgb(255, 191, 0);
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);
pub const SLATE: Color = Color::Rgb(70, 80, 95);

/// Accent for a lane's border and header.
pub fn lane_color(status: Status) -> Color {
    match status {
        Status::Todo => Color::Blue,
        Status::InProgress => AMBER,
        Status::InReview => Color::Magenta,
        Status::Blocked => Color::Red,
        Status::Completed => DARK_GREEN,
    }
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Critical => DARK_RED,
        Priority::High => Color::Red,
        Priority::Medium => AMBER,
        Priority::Low => SLATE,
    }
}
