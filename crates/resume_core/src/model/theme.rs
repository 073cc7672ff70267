//! Theme preference values.

/// Visual theme persisted independently of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Default,
    Dark,
    Blue,
    Green,
}

impl Theme {
    /// Parses a stored identifier. Unknown values fall back to `Default`.
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim() {
            "dark" => Self::Dark,
            "blue" => Self::Blue,
            "green" => Self::Green,
            _ => Self::Default,
        }
    }

    /// Stable identifier written to the durable slot.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Dark => "dark",
            Self::Blue => "blue",
            Self::Green => "green",
        }
    }

    /// Root CSS class applied by the presentation layer.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Dark => Some("theme-dark"),
            Self::Blue => Some("theme-blue"),
            Self::Green => Some("theme-green"),
        }
    }
}
