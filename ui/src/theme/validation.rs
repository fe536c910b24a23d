use crate::error::AppError;
use crate::theme::types::ThemeId;
use crate::validation::Validator;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^#?(?:[0-9a-f]{3}|[0-9a-f]{6})$").expect("hex color pattern is valid")
});

const REQUIRED_COLORS: [&str; 7] = [
    "primary",
    "secondary",
    "accent",
    "background",
    "surface",
    "text",
    "textSecondary",
];
const OPTIONAL_COLORS: [&str; 3] = ["success", "warning", "error"];
const FONT_WEIGHTS: [&str; 3] = ["headingWeight", "bodyWeight", "mediumWeight"];
const SHALLOW_SECTIONS: [&str; 3] = ["spacing", "animations", "layout"];

/// Validation errors specific to theme operations
#[derive(Debug, Clone, PartialEq)]
pub enum ThemeValidationError {
    InvalidThemeId { value: String },
    InvalidConfig { errors: Vec<String> },
}

impl ThemeValidationError {
    pub fn user_message(&self) -> String {
        match self {
            ThemeValidationError::InvalidThemeId { value } => {
                format!(
                    "Invalid theme: '{}'\n\n\
                    Available themes: {}",
                    value,
                    ThemeId::ALL.map(|id| id.as_str()).join(", ")
                )
            }
            ThemeValidationError::InvalidConfig { errors } => {
                format!(
                    "Invalid theme configuration:\n\n- {}",
                    errors.join("\n- ")
                )
            }
        }
    }
}

impl From<ThemeValidationError> for AppError {
    fn from(error: ThemeValidationError) -> Self {
        AppError::Theme(error.user_message())
    }
}

/// Outcome of [`validate_config`]: every violation found in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// True only for a JSON string naming one of the built-in presets.
pub fn is_valid_theme_id(value: &Value) -> bool {
    value.as_str().is_some_and(is_valid_theme_name)
}

pub fn is_valid_theme_name(value: &str) -> bool {
    value.parse::<ThemeId>().is_ok()
}

pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

fn is_non_empty_string(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_str)
        .is_some_and(|s| !s.trim().is_empty())
}

fn is_hex_color_value(value: Option<&Value>) -> bool {
    value.and_then(Value::as_str).is_some_and(is_hex_color)
}

/// Structural check of a theme configuration in its JSON form.
pub fn validate_config(value: &Value) -> ConfigValidation {
    let Some(config) = value.as_object() else {
        return ConfigValidation {
            is_valid: false,
            errors: vec!["Theme configuration must be an object".to_string()],
        };
    };

    let mut errors = Vec::new();

    if !config.get("id").is_some_and(is_valid_theme_id) {
        errors.push("Missing or invalid theme id".to_string());
    }

    if !is_non_empty_string(config.get("name")) {
        errors.push("Missing or invalid theme name".to_string());
    }

    match config.get("colors").and_then(Value::as_object) {
        Some(colors) => validate_colors(colors, &mut errors),
        None => errors.push("Missing colors configuration".to_string()),
    }

    match config.get("typography").and_then(Value::as_object) {
        Some(typography) => validate_typography(typography, &mut errors),
        None => errors.push("Missing typography configuration".to_string()),
    }

    for section in SHALLOW_SECTIONS {
        if let Some(value) = config.get(section) {
            if !value.is_object() {
                errors.push(format!("Invalid {section} configuration"));
            }
        }
    }

    ConfigValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

fn validate_colors(colors: &Map<String, Value>, errors: &mut Vec<String>) {
    for role in REQUIRED_COLORS {
        if !is_hex_color_value(colors.get(role)) {
            errors.push(format!("Missing or invalid color: {role}"));
        }
    }

    for role in OPTIONAL_COLORS {
        if let Some(value) = colors.get(role) {
            if !is_hex_color_value(Some(value)) {
                errors.push(format!("Invalid color format: {role}"));
            }
        }
    }
}

fn validate_typography(typography: &Map<String, Value>, errors: &mut Vec<String>) {
    if !is_non_empty_string(typography.get("fontFamily")) {
        errors.push("Missing or invalid font family".to_string());
    }

    if let Some(value) = typography.get("headingFontFamily") {
        if !is_non_empty_string(Some(value)) {
            errors.push("Invalid heading font family".to_string());
        }
    }

    for field in FONT_WEIGHTS {
        if !typography.get(field).is_some_and(Value::is_number) {
            errors.push(format!("Invalid font weight: {field}"));
        }
    }

    if let Some(value) = typography.get("letterSpacing") {
        if !is_non_empty_string(Some(value)) {
            errors.push("Invalid letter spacing".to_string());
        }
    }
}

/// Validator for theme identifiers
pub struct ThemeIdValidator;

impl Validator<str> for ThemeIdValidator {
    type Output = ThemeId;
    type Error = ThemeValidationError;

    fn validate(&self, input: &str) -> Result<Self::Output, Self::Error> {
        input
            .parse::<ThemeId>()
            .map_err(|_| ThemeValidationError::InvalidThemeId {
                value: input.to_string(),
            })
    }
}

/// Validator for theme configurations in their JSON form
pub struct ThemeConfigValidator;

impl Validator<Value> for ThemeConfigValidator {
    type Output = ();
    type Error = ThemeValidationError;

    fn validate(&self, input: &Value) -> Result<Self::Output, Self::Error> {
        let result = validate_config(input);
        if result.is_valid {
            Ok(())
        } else {
            Err(ThemeValidationError::InvalidConfig {
                errors: result.errors,
            })
        }
    }
}
