//! Colored terminal output for the CLI, demos and transaction helpers.

use std::fmt::Display;

use colored::{
    Color,
    Colorize,
};

#[derive(Clone, Copy, strum_macros::Display)]
#[strum(serialize_all = "UPPERCASE")]
enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn color(self) -> LogColor {
        match self {
            Self::Info => LogColor::Info,
            Self::Success => LogColor::Highlight,
            Self::Warning => LogColor::Warning,
            Self::Error => LogColor::Error,
        }
    }
}

fn log(level: Level, label: impl Display, msg: impl Display) {
    println!(
        "[{}] {} {}",
        level.to_string().color(level.color()),
        label.to_string().color(LogColor::Label),
        msg.to_string().bright_black()
    );
}

#[derive(Clone, Copy, Debug)]
pub enum LogColor {
    Highlight,
    Label,
    Error,
    Warning,
    Header,
    Info,
    Gray,
}

/// Prints `key: value` pairs, one per line, with the keys right-aligned.
///
/// ```ignore
/// print_kv!("address" => derived.address, "nonce" => derived.nonce);
/// ```
#[macro_export]
macro_rules! print_kv {
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let pairs: &[(&str, String)] = &[$(($key, $value.to_string())),+];
        $crate::logs::print_pairs(pairs);
    }};
}

#[doc(hidden)]
pub fn print_pairs(pairs: &[(&str, String)]) {
    let width = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in pairs {
        println!("{}: {value}", format!("{key:>width$}").color(LogColor::Gray));
    }
}

pub fn log_header(title: impl Display) {
    println!("{}", title.to_string().bold().color(LogColor::Header));
}

#[rustfmt::skip]
mod unformatted {
    use super::*;

    pub fn log_info(label: impl Display, msg: impl Display) { log(Level::Info, label, msg) }
    pub fn log_success(label: impl Display, msg: impl Display) { log(Level::Success, label, msg) }
    pub fn log_warning(label: impl Display, msg: impl Display) { log(Level::Warning, label, msg) }
    pub fn log_error(label: impl Display, msg: impl Display) { log(Level::Error, label, msg) }

    impl From<LogColor> for Color {
        fn from(value: LogColor) -> Color {
            match value {
                LogColor::Highlight  => Color::TrueColor { r: 255, g: 215, b: 87  },
                LogColor::Label      => Color::TrueColor { r: 40,  g: 100, b: 153 },
                LogColor::Error      => Color::TrueColor { r: 255, g: 0,   b: 45  },
                LogColor::Warning    => Color::TrueColor { r: 180, g: 105, b: 0   },
                LogColor::Header     => Color::TrueColor { r: 0,   g: 255, b: 0   },
                LogColor::Info       => Color::TrueColor { r: 0,   g: 95,  b: 255 },
                LogColor::Gray       => Color::TrueColor { r: 192, g: 192, b: 192 },
            }
        }
    }
}

pub use unformatted::*;
