use crate::theme::types::{
    Animations, HoverEffect, Layout, LayoutMode, Spacing, ThemeColors, ThemeConfig, ThemeId,
    Typography,
};
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const DEFAULT_THEME_ID: ThemeId = ThemeId::Business;

// Built once; every preset is keyed by its own embedded id.
static REGISTRY: Lazy<HashMap<ThemeId, ThemeConfig>> = Lazy::new(|| {
    [business(), premium(), fresh(), tech()]
        .into_iter()
        .map(|config| (config.id, config))
        .collect()
});

/// Configuration for `id`. Falls back to the default preset, which cannot
/// happen for the built-in presets but keeps the lookup total.
pub fn get_theme_config(id: ThemeId) -> &'static ThemeConfig {
    REGISTRY.get(&id).unwrap_or_else(default_theme_config)
}

/// Configuration for an arbitrary identifier string. Unknown identifiers
/// degrade to the default preset.
pub fn resolve_theme_config(raw: &str) -> &'static ThemeConfig {
    match raw.parse::<ThemeId>() {
        Ok(id) => get_theme_config(id),
        Err(_) => {
            log::debug!("Unknown theme id '{raw}', resolving to default theme");
            default_theme_config()
        }
    }
}

/// All built-in presets in declaration order.
pub fn get_all_themes() -> Vec<&'static ThemeConfig> {
    ThemeId::ALL
        .iter()
        .filter_map(|id| REGISTRY.get(id))
        .collect()
}

pub fn default_theme_config() -> &'static ThemeConfig {
    static DEFAULT: Lazy<ThemeConfig> = Lazy::new(business);
    REGISTRY.get(&DEFAULT_THEME_ID).unwrap_or(&*DEFAULT)
}

fn business() -> ThemeConfig {
    ThemeConfig {
        id: ThemeId::Business,
        name: "Business Blue".to_string(),
        colors: ThemeColors {
            primary: "#1E40AF".to_string(),
            secondary: "#3B82F6".to_string(),
            accent: "#F59E0B".to_string(),
            background: "#F8FAFC".to_string(),
            surface: "#FFFFFF".to_string(),
            text: "#1E293B".to_string(),
            text_secondary: "#64748B".to_string(),
            success: Some("#10B981".to_string()),
            warning: Some("#F59E0B".to_string()),
            error: Some("#EF4444".to_string()),
        },
        typography: Typography {
            font_family: "Inter, system-ui, sans-serif".to_string(),
            heading_font_family: None,
            heading_weight: 600,
            body_weight: 400,
            medium_weight: 500,
            letter_spacing: None,
        },
        spacing: Spacing {
            grid_columns: 12,
            card_gap: "24px".to_string(),
            border_radius: "8px".to_string(),
        },
        animations: Animations {
            hover_effect: HoverEffect::Brightness,
            transition_duration: "200ms".to_string(),
            parallax: None,
            glitch: None,
            confetti: None,
            typewriter: None,
        },
        layout: Layout {
            mode: LayoutMode::Grid,
            max_width: "1440px".to_string(),
            grid_columns: Some(12),
            golden_ratio: None,
        },
    }
}

fn premium() -> ThemeConfig {
    ThemeConfig {
        id: ThemeId::Premium,
        name: "Premium Gold".to_string(),
        colors: ThemeColors {
            primary: "#B8860B".to_string(),
            secondary: "#1C1C1E".to_string(),
            accent: "#D4AF37".to_string(),
            background: "#0F0F10".to_string(),
            surface: "#1C1C1E".to_string(),
            text: "#F5F5F0".to_string(),
            text_secondary: "#A8A29E".to_string(),
            success: Some("#4ADE80".to_string()),
            warning: Some("#FBBF24".to_string()),
            error: Some("#F87171".to_string()),
        },
        typography: Typography {
            font_family: "Lato, Helvetica Neue, sans-serif".to_string(),
            heading_font_family: Some("Playfair Display, Georgia, serif".to_string()),
            heading_weight: 700,
            body_weight: 300,
            medium_weight: 400,
            letter_spacing: Some("0.02em".to_string()),
        },
        spacing: Spacing {
            grid_columns: 8,
            card_gap: "32px".to_string(),
            border_radius: "2px".to_string(),
        },
        animations: Animations {
            hover_effect: HoverEffect::Glow,
            transition_duration: "400ms".to_string(),
            parallax: Some(true),
            glitch: None,
            confetti: None,
            typewriter: None,
        },
        layout: Layout {
            mode: LayoutMode::Asymmetric,
            max_width: "1280px".to_string(),
            grid_columns: None,
            golden_ratio: Some(true),
        },
    }
}

fn fresh() -> ThemeConfig {
    ThemeConfig {
        id: ThemeId::Fresh,
        name: "Fresh Green".to_string(),
        colors: ThemeColors {
            primary: "#059669".to_string(),
            secondary: "#34D399".to_string(),
            accent: "#FB923C".to_string(),
            background: "#F0FDF4".to_string(),
            surface: "#FFFFFF".to_string(),
            text: "#14532D".to_string(),
            text_secondary: "#4B7F5E".to_string(),
            success: Some("#22C55E".to_string()),
            warning: None,
            error: Some("#DC2626".to_string()),
        },
        typography: Typography {
            font_family: "Nunito, Segoe UI, sans-serif".to_string(),
            heading_font_family: None,
            heading_weight: 800,
            body_weight: 400,
            medium_weight: 600,
            letter_spacing: None,
        },
        spacing: Spacing {
            grid_columns: 4,
            card_gap: "20px".to_string(),
            border_radius: "16px".to_string(),
        },
        animations: Animations {
            hover_effect: HoverEffect::Bounce,
            transition_duration: "300ms".to_string(),
            parallax: None,
            glitch: None,
            confetti: Some(true),
            typewriter: None,
        },
        layout: Layout {
            mode: LayoutMode::Fluid,
            max_width: "100%".to_string(),
            grid_columns: None,
            golden_ratio: None,
        },
    }
}

fn tech() -> ThemeConfig {
    ThemeConfig {
        id: ThemeId::Tech,
        name: "Tech Neon".to_string(),
        colors: ThemeColors {
            primary: "#00F0FF".to_string(),
            secondary: "#7C3AED".to_string(),
            accent: "#FF2E97".to_string(),
            background: "#0A0E1A".to_string(),
            surface: "#111827".to_string(),
            text: "#E0F2FE".to_string(),
            text_secondary: "#7DD3FC".to_string(),
            success: Some("#0F0".to_string()),
            warning: Some("#FACC15".to_string()),
            error: Some("#F43F5E".to_string()),
        },
        typography: Typography {
            font_family: "JetBrains Mono, Fira Code, monospace".to_string(),
            heading_font_family: Some("Orbitron, sans-serif".to_string()),
            heading_weight: 700,
            body_weight: 400,
            medium_weight: 500,
            letter_spacing: Some("0.05em".to_string()),
        },
        spacing: Spacing {
            grid_columns: 12,
            card_gap: "16px".to_string(),
            border_radius: "4px".to_string(),
        },
        animations: Animations {
            hover_effect: HoverEffect::Scale,
            transition_duration: "150ms".to_string(),
            parallax: None,
            glitch: Some(true),
            confetti: None,
            typewriter: Some(true),
        },
        layout: Layout {
            mode: LayoutMode::Grid,
            max_width: "1600px".to_string(),
            grid_columns: Some(12),
            golden_ratio: None,
        },
    }
}
