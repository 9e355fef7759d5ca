use colored::Color;

pub const PRIMARY: Color = Color::BrightGreen;
pub const ACCENT: Color = Color::Cyan;
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const IP_ADDR: Color = Color::BrightBlue;
pub const MAC_ADDR: Color = Color::Yellow;
pub const INTERFACE: Color = Color::Magenta;

pub const POSITIVE: Color = Color::Green;
pub const NEGATIVE: Color = Color::Red;
