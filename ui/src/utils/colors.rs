//! Shared color constants for the UI.

use egui::Color32;

/// Page background behind the cards.
pub const COLOR_BACKGROUND: Color32 = Color32::from_rgb(240, 244, 248);

/// Primary action and step numbers.
pub const COLOR_BLUE: Color32 = Color32::from_rgb(37, 99, 235);

/// Copy acknowledgment.
pub const COLOR_GREEN: Color32 = Color32::from_rgb(34, 139, 34);

pub const COLOR_PURPLE: Color32 = Color32::from_rgb(124, 58, 237);

/// Secondary text such as hints and subtitles.
pub const COLOR_MUTED: Color32 = Color32::from_rgb(100, 116, 139);

pub const COLOR_BADGE_FILL: Color32 = Color32::from_rgb(219, 234, 254);
pub const COLOR_BADGE_TEXT: Color32 = Color32::from_rgb(30, 64, 175);

pub const COLOR_CARD: Color32 = Color32::WHITE;
pub const COLOR_CARD_BORDER: Color32 = Color32::from_rgb(226, 232, 240);
