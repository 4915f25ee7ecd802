#![forbid(unsafe_code)]

//! Built-in background and color presets offered by the style panel.

/// A stock background image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackgroundPreset {
    pub id: &'static str,
    pub name: &'static str,
    /// Full-resolution image reference.
    pub value: &'static str,
    /// Thumbnail reference for the picker.
    pub preview: &'static str,
}

/// A matched accent/text color pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPreset {
    pub id: &'static str,
    pub name: &'static str,
    pub accent: &'static str,
    pub text: &'static str,
}

pub const BACKGROUND_PRESETS: [BackgroundPreset; 5] = [
    BackgroundPreset {
        id: "bg-1",
        name: "Abstract Blue",
        value: "https://images.unsplash.com/photo-1550684848-fac1c5b4e853?q=80&w=1000&auto=format&fit=crop",
        preview: "https://images.unsplash.com/photo-1550684848-fac1c5b4e853?q=80&w=100&auto=format&fit=crop",
    },
    BackgroundPreset {
        id: "bg-2",
        name: "Dark Gradient",
        value: "https://images.unsplash.com/photo-1614850523459-c2f4c699c52e?q=80&w=1000&auto=format&fit=crop",
        preview: "https://images.unsplash.com/photo-1614850523459-c2f4c699c52e?q=80&w=100&auto=format&fit=crop",
    },
    BackgroundPreset {
        id: "bg-3",
        name: "Mesh Gradient",
        value: "https://images.unsplash.com/photo-1579546929518-9e396f3cc809?q=80&w=1000&auto=format&fit=crop",
        preview: "https://images.unsplash.com/photo-1579546929518-9e396f3cc809?q=80&w=100&auto=format&fit=crop",
    },
    BackgroundPreset {
        id: "bg-4",
        name: "Clean Concrete",
        value: "https://images.unsplash.com/photo-1507090960745-b32f65d3113a?q=80&w=1000&auto=format&fit=crop",
        preview: "https://images.unsplash.com/photo-1507090960745-b32f65d3113a?q=80&w=100&auto=format&fit=crop",
    },
    BackgroundPreset {
        id: "bg-5",
        name: "Neon Vibes",
        value: "https://images.unsplash.com/photo-1563089145-599997674d42?q=80&w=1000&auto=format&fit=crop",
        preview: "https://images.unsplash.com/photo-1563089145-599997674d42?q=80&w=100&auto=format&fit=crop",
    },
];

pub const COLOR_PRESETS: [ColorPreset; 6] = [
    ColorPreset { id: "cp-1", name: "Yellow/White", accent: "#facc15", text: "#ffffff" },
    ColorPreset { id: "cp-2", name: "Cyan/White", accent: "#22d3ee", text: "#ffffff" },
    ColorPreset { id: "cp-3", name: "Lime/Black", accent: "#bef264", text: "#000000" },
    ColorPreset { id: "cp-4", name: "Pink/White", accent: "#f472b6", text: "#ffffff" },
    ColorPreset { id: "cp-5", name: "Orange/Dark", accent: "#fb923c", text: "#1f2937" },
    ColorPreset { id: "cp-6", name: "Lavender/White", accent: "#c084fc", text: "#ffffff" },
];

/// Look up a background preset by id.
#[must_use]
pub fn background_preset(id: &str) -> Option<&'static BackgroundPreset> {
    BACKGROUND_PRESETS.iter().find(|p| p.id == id)
}

/// Look up a color preset by id.
#[must_use]
pub fn color_preset(id: &str) -> Option<&'static ColorPreset> {
    COLOR_PRESETS.iter().find(|p| p.id == id)
}
