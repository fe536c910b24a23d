use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a built-in theme preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeId {
    #[default]
    Business,
    Premium,
    Fresh,
    Tech,
}

impl ThemeId {
    pub const ALL: [ThemeId; 4] = [
        ThemeId::Business,
        ThemeId::Premium,
        ThemeId::Fresh,
        ThemeId::Tech,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeId::Business => "business",
            ThemeId::Premium => "premium",
            ThemeId::Fresh => "fresh",
            ThemeId::Tech => "tech",
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownThemeId(pub String);

impl fmt::Display for UnknownThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme id '{}'", self.0)
    }
}

impl std::error::Error for UnknownThemeId {}

impl FromStr for ThemeId {
    type Err = UnknownThemeId;

    /// Exact, case-sensitive match against the identifier strings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownThemeId(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    // === Brand Colors ===
    pub primary: String,
    pub secondary: String,
    pub accent: String,

    // === Layout Colors ===
    pub background: String,
    pub surface: String,

    // === Text Colors ===
    pub text: String,
    pub text_secondary: String,

    // === Status Colors ===
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ThemeColors {
    /// Named color roles paired with their hex values, optional roles only
    /// when set.
    pub fn roles(&self) -> Vec<(&'static str, &str)> {
        let mut roles = vec![
            ("primary", self.primary.as_str()),
            ("secondary", self.secondary.as_str()),
            ("accent", self.accent.as_str()),
            ("background", self.background.as_str()),
            ("surface", self.surface.as_str()),
            ("text", self.text.as_str()),
            ("textSecondary", self.text_secondary.as_str()),
        ];
        let optional = [
            ("success", &self.success),
            ("warning", &self.warning),
            ("error", &self.error),
        ];
        for (role, value) in optional {
            if let Some(value) = value {
                roles.push((role, value.as_str()));
            }
        }
        roles
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_font_family: Option<String>,
    pub heading_weight: u16,
    pub body_weight: u16,
    pub medium_weight: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spacing {
    pub grid_columns: u8,
    pub card_gap: String,
    pub border_radius: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverEffect {
    Brightness,
    Scale,
    Glow,
    Bounce,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animations {
    pub hover_effect: HoverEffect,
    pub transition_duration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallax: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glitch: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confetti: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typewriter: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    Grid,
    Asymmetric,
    Fluid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    #[serde(rename = "type")]
    pub mode: LayoutMode,
    pub max_width: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_columns: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub golden_ratio: Option<bool>,
}

/// Complete presentation configuration of one theme preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub id: ThemeId,
    pub name: String,
    pub colors: ThemeColors,
    pub typography: Typography,
    pub spacing: Spacing,
    pub animations: Animations,
    pub layout: Layout,
}

/// Parse `#RGB`, `#RRGGBB`, `RGB` or `RRGGBB` into its components.
pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        3 => {
            let mut channels = hex
                .chars()
                .map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some((channels.next()??, channels.next()??, channels.next()??))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}
