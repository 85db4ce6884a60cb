//! Inline formatting marks carried by text leaves

use serde::{Deserialize, Serialize};

/// Named font size steps offered by the editor
///
/// Sizes the model does not know are kept verbatim in [`FontSize::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontSize {
    Small,
    Normal,
    Medium,
    Huge,
    Custom(String),
}

impl FontSize {
    pub fn as_str(&self) -> &str {
        match self {
            FontSize::Small => "small",
            FontSize::Normal => "normal",
            FontSize::Medium => "medium",
            FontSize::Huge => "huge",
            FontSize::Custom(size) => size,
        }
    }
}

impl From<String> for FontSize {
    fn from(size: String) -> Self {
        match size.as_str() {
            "small" => FontSize::Small,
            "normal" => FontSize::Normal,
            "medium" => FontSize::Medium,
            "huge" => FontSize::Huge,
            _ => FontSize::Custom(size),
        }
    }
}

impl From<FontSize> for String {
    fn from(size: FontSize) -> Self {
        match size {
            FontSize::Custom(size) => size,
            known => known.as_str().to_string(),
        }
    }
}

/// Named font families offered by the editor
///
/// Families the model does not know are kept verbatim in
/// [`FontFamily::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FontFamily {
    Sans,
    Serif,
    Monospace,
    Custom(String),
}

impl FontFamily {
    pub fn as_str(&self) -> &str {
        match self {
            FontFamily::Sans => "sans",
            FontFamily::Serif => "serif",
            FontFamily::Monospace => "monospace",
            FontFamily::Custom(family) => family,
        }
    }
}

impl From<String> for FontFamily {
    fn from(family: String) -> Self {
        match family.as_str() {
            "sans" => FontFamily::Sans,
            "serif" => FontFamily::Serif,
            "monospace" => FontFamily::Monospace,
            _ => FontFamily::Custom(family),
        }
    }
}

impl From<FontFamily> for String {
    fn from(family: FontFamily) -> Self {
        match family {
            FontFamily::Custom(family) => family,
            known => known.as_str().to_string(),
        }
    }
}

/// Formatting marks on a text leaf
///
/// Every mark is either absent or set. Absent marks are omitted when the
/// leaf is serialized, matching the editor's own JSON shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superscript: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscript: Option<bool>,
    /// Foreground color (free-form CSS color)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Background color (free-form CSS color)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bg_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<FontFamily>,
}

impl Marks {
    /// Create an empty mark set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }

    pub fn with_italic(mut self) -> Self {
        self.italic = Some(true);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_bg_color(mut self, color: impl Into<String>) -> Self {
        self.bg_color = Some(color.into());
        self
    }

    /// Check if no mark is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check if a foreground or background color is set
    pub fn has_color(&self) -> bool {
        self.color.is_some() || self.bg_color.is_some()
    }

    pub fn is_bold(&self) -> bool {
        self.bold.unwrap_or(false)
    }

    pub fn is_italic(&self) -> bool {
        self.italic.unwrap_or(false)
    }

    pub fn is_underline(&self) -> bool {
        self.underline.unwrap_or(false)
    }

    pub fn is_strikethrough(&self) -> bool {
        self.strikethrough.unwrap_or(false)
    }

    pub fn is_code(&self) -> bool {
        self.code.unwrap_or(false)
    }

    pub fn is_superscript(&self) -> bool {
        self.superscript.unwrap_or(false)
    }

    pub fn is_subscript(&self) -> bool {
        self.subscript.unwrap_or(false)
    }
}
