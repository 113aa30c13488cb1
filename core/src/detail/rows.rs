use logindetail_store::LoginRecord;

/// Fixed row slots of the detail screen, in display order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::EnumCount,
)]
#[strum(serialize_all = "lowercase")]
pub enum RowTag {
    Website,
    Username,
    Password,
    Summary,
    Delete,
}

pub const LAYOUT: [RowTag; 5] = [
    RowTag::Website,
    RowTag::Username,
    RowTag::Password,
    RowTag::Summary,
    RowTag::Delete,
];

impl RowTag {
    pub const fn height(self) -> u16 {
        use RowTag::*;
        match self {
            Website | Username | Password => 72,
            Summary => 40,
            Delete => 44,
        }
    }

    pub const fn title(self) -> &'static str {
        use RowTag::*;
        match self {
            Website => "Website",
            Username => "Username",
            Password => "Password",
            Summary => "",
            Delete => "Delete",
        }
    }

    /// Row at the given position of [`LAYOUT`].
    pub fn at(index: usize) -> Option<Self> {
        LAYOUT.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether a tap on this row shows the selection menu.
    pub const fn has_menu(self) -> bool {
        matches!(self, RowTag::Website | RowTag::Username | RowTag::Password)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub tag: RowTag,
    pub title: &'static str,
    pub value: String,
    pub editable: bool,
    pub focused: bool,
}

/// Rendering knobs for row values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    date_format: String,
    pub reveal_password: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            date_format: Self::DEFAULT_DATE_FORMAT.to_owned(),
            reveal_password: false,
        }
    }
}

impl DisplayOptions {
    pub const DEFAULT_DATE_FORMAT: &str = "%b %-d, %Y";
    pub const MASK_CHAR: char = '•';

    /// Falls back to [`Self::DEFAULT_DATE_FORMAT`] when `date_format` is not valid strftime.
    pub fn new(date_format: &str, reveal_password: bool) -> Self {
        use chrono::format::{Item, StrftimeItems};

        let date_format = if StrftimeItems::new(date_format).any(|i| matches!(i, Item::Error)) {
            log::warn!(
                "Invalid date format '{}', using '{}'",
                date_format,
                Self::DEFAULT_DATE_FORMAT
            );
            Self::DEFAULT_DATE_FORMAT
        } else {
            date_format
        };
        Self {
            date_format: date_format.to_owned(),
            reveal_password,
        }
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn summary(&self, login: &LoginRecord) -> String {
        format!(
            "Created {}, Modified {}",
            login.created_at.format(&self.date_format),
            login.modified_at.format(&self.date_format),
        )
    }

    pub fn mask(password: &str) -> String {
        password.chars().map(|_| Self::MASK_CHAR).collect()
    }
}
