use colored::{Color, ColoredString, Colorize};
use crossterm::terminal;

use crate::detail::{Row, RowTag};

/// Prints a green line with a check mark, e.g. after a store write went through.
#[macro_export]
macro_rules! print_done {
    ($($arg:tt)*) => {{
        use ::colored::Colorize as _;
        println!("{} {}", "✔".green().bold(), format!($($arg)*).green())
    }}
}

/// Color depth the terminal advertises through `COLORTERM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Ansi,
    TrueColor,
}

impl Palette {
    pub fn detect() -> Self {
        match std::env::var("COLORTERM").as_deref() {
            Ok("truecolor" | "24bit") => Palette::TrueColor,
            _ => Palette::Ansi,
        }
    }

    pub const fn pick(self, swatch: Swatch) -> Color {
        match self {
            Palette::Ansi => swatch.ansi,
            Palette::TrueColor => Color::TrueColor {
                r: swatch.rgb.0,
                g: swatch.rgb.1,
                b: swatch.rgb.2,
            },
        }
    }
}

/// A 24-bit color together with its closest ANSI fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Swatch {
    pub rgb: (u8, u8, u8),
    pub ansi: Color,
}

const fn swatch(rgb: (u8, u8, u8), ansi: Color) -> Swatch {
    Swatch { rgb, ansi }
}

pub trait ColorTheme {
    fn swatch(&self) -> Swatch;

    fn color(&self) -> Color {
        Palette::detect().pick(self.swatch())
    }
}

impl ColorTheme for RowTag {
    fn swatch(&self) -> Swatch {
        use RowTag::*;
        match self {
            Website => swatch((0, 150, 221), Color::Cyan),
            Username | Password => swatch((230, 230, 230), Color::White),
            Summary => swatch((120, 120, 120), Color::BrightBlack),
            Delete => swatch((220, 42, 42), Color::Red),
        }
    }
}

/// Log levels share the row palette: errors look like the delete row, info like the website row.
impl ColorTheme for log::Level {
    fn swatch(&self) -> Swatch {
        use log::Level::*;
        match self {
            Error => RowTag::Delete.swatch(),
            Warn => swatch((240, 180, 40), Color::Yellow),
            Info => RowTag::Website.swatch(),
            Debug | Trace => RowTag::Summary.swatch(),
        }
    }
}

const TITLE_WIDTH: usize = 10;

pub fn format_row(row: &Row) -> String {
    let marker = if row.focused { "›" } else { " " };
    let value: ColoredString = match row.tag {
        RowTag::Delete => row.title.color(row.tag.color()).bold(),
        RowTag::Summary => row.value.color(row.tag.color()).italic(),
        _ if row.editable => row.value.color(row.tag.color()).underline(),
        _ => row.value.color(row.tag.color()),
    };
    match row.tag {
        RowTag::Delete | RowTag::Summary => format!("{} {}", marker, value),
        _ => format!(
            "{} {} {}",
            marker,
            format!("{:<width$}", row.title, width = TITLE_WIDTH).bold(),
            value,
        ),
    }
}

pub fn print_rows(rows: &[Row]) {
    let (cols, _) = terminal::size().unwrap_or((40, 40));
    const THIN_LINE: &str = "─";
    let bar = THIN_LINE.repeat(cols as usize).bright_black();

    println!("{}", bar);
    for row in rows {
        println!("{}", self::format_row(row));
        if row.tag == RowTag::Password {
            println!("{}", bar);
        }
    }
    println!("{}", bar);
}
