#![forbid(unsafe_code)]

//! Document-wide presentation settings.
//!
//! [`StyleConfig`] is opaque to the edit history: it is copied into every
//! snapshot and compared structurally, nothing more. Updates go through
//! [`StylePatch`], one optional field per setting.

use serde::{Deserialize, Serialize};

/// Upper bound of the overlay opacity percentage.
pub const MAX_OVERLAY_OPACITY: u8 = 100;

/// Canvas proportions of every slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectRatio {
    /// 4:5, the default feed post.
    #[default]
    Portrait,
    /// 1:1.
    Square,
    /// 9:16 vertical story.
    #[serde(rename = "tiktok", alias = "story")]
    Story,
}

impl AspectRatio {
    /// Export canvas size in pixels at 1x.
    #[must_use]
    pub const fn dimensions(self) -> (u32, u32) {
        match self {
            Self::Portrait => (1080, 1350),
            Self::Square => (1080, 1080),
            Self::Story => (1080, 1920),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontTheme {
    #[default]
    Inter,
    Merriweather,
    Montserrat,
    #[serde(rename = "Bebas Neue")]
    BebasNeue,
    Unbounded,
}

impl FontTheme {
    /// Family name as understood by the renderer.
    #[must_use]
    pub const fn family(self) -> &'static str {
        match self {
            Self::Inter => "Inter",
            Self::Merriweather => "Merriweather",
            Self::Montserrat => "Montserrat",
            Self::BebasNeue => "Bebas Neue",
            Self::Unbounded => "Unbounded",
        }
    }
}

/// How the "swipe for more" hint is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeStyle {
    #[default]
    Arrow,
    Text,
    Hand,
}

/// Presentation settings shared by all slides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleConfig {
    pub aspect_ratio: AspectRatio,
    /// URL or data reference of the background image.
    pub background_image: String,
    /// True when the background was uploaded rather than picked from presets.
    #[serde(rename = "isCustomBg")]
    pub is_custom_background: bool,
    pub font_theme: FontTheme,
    /// Darkening overlay over the background, 0-100.
    pub overlay_opacity: u8,
    pub accent_color: String,
    pub text_color: String,
    /// Attribution handle printed on every slide.
    pub handle: String,
    pub swipe_style: SwipeStyle,
    pub title_scale: f32,
    pub body_scale: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: AspectRatio::Portrait,
            background_image: crate::presets::BACKGROUND_PRESETS[0].value.to_string(),
            is_custom_background: false,
            font_theme: FontTheme::Inter,
            overlay_opacity: 40,
            accent_color: "#facc15".to_string(),
            text_color: "#ffffff".to_string(),
            handle: "@creatormode".to_string(),
            swipe_style: SwipeStyle::Arrow,
            title_scale: 1.0,
            body_scale: 1.0,
        }
    }
}

impl StyleConfig {
    /// Apply a partial update, returning the merged style.
    ///
    /// Overlay opacity is clamped to `0..=100`.
    #[must_use]
    pub fn patched(&self, patch: &StylePatch) -> Self {
        let mut next = self.clone();
        if let Some(v) = patch.aspect_ratio {
            next.aspect_ratio = v;
        }
        if let Some(v) = &patch.background_image {
            next.background_image.clone_from(v);
        }
        if let Some(v) = patch.is_custom_background {
            next.is_custom_background = v;
        }
        if let Some(v) = patch.font_theme {
            next.font_theme = v;
        }
        if let Some(v) = patch.overlay_opacity {
            next.overlay_opacity = v.min(MAX_OVERLAY_OPACITY);
        }
        if let Some(v) = &patch.accent_color {
            next.accent_color.clone_from(v);
        }
        if let Some(v) = &patch.text_color {
            next.text_color.clone_from(v);
        }
        if let Some(v) = &patch.handle {
            next.handle.clone_from(v);
        }
        if let Some(v) = patch.swipe_style {
            next.swipe_style = v;
        }
        if let Some(v) = patch.title_scale {
            next.title_scale = v;
        }
        if let Some(v) = patch.body_scale {
            next.body_scale = v;
        }
        next
    }
}

/// Partial update of a [`StyleConfig`]. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylePatch {
    pub aspect_ratio: Option<AspectRatio>,
    pub background_image: Option<String>,
    pub is_custom_background: Option<bool>,
    pub font_theme: Option<FontTheme>,
    pub overlay_opacity: Option<u8>,
    pub accent_color: Option<String>,
    pub text_color: Option<String>,
    pub handle: Option<String>,
    pub swipe_style: Option<SwipeStyle>,
    pub title_scale: Option<f32>,
    pub body_scale: Option<f32>,
}

impl StylePatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.aspect_ratio = Some(ratio);
        self
    }

    /// Pick a background; `custom` marks an uploaded image.
    #[must_use]
    pub fn with_background(mut self, image: impl Into<String>, custom: bool) -> Self {
        self.background_image = Some(image.into());
        self.is_custom_background = Some(custom);
        self
    }

    #[must_use]
    pub fn with_font(mut self, font: FontTheme) -> Self {
        self.font_theme = Some(font);
        self
    }

    #[must_use]
    pub fn with_overlay_opacity(mut self, opacity: u8) -> Self {
        self.overlay_opacity = Some(opacity);
        self
    }

    #[must_use]
    pub fn with_accent_color(mut self, color: impl Into<String>) -> Self {
        self.accent_color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }

    #[must_use]
    pub fn with_swipe_style(mut self, style: SwipeStyle) -> Self {
        self.swipe_style = Some(style);
        self
    }

    #[must_use]
    pub fn with_title_scale(mut self, scale: f32) -> Self {
        self.title_scale = Some(scale);
        self
    }

    #[must_use]
    pub fn with_body_scale(mut self, scale: f32) -> Self {
        self.body_scale = Some(scale);
        self
    }

    /// Accent and text colors of a preset.
    #[must_use]
    pub fn from_color_preset(preset: &crate::presets::ColorPreset) -> Self {
        Self::new()
            .with_accent_color(preset.accent)
            .with_text_color(preset.text)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
