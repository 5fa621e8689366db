//! Style catalog and effective-prompt composition.
//!
//! The catalog is a fixed table created at process start; insertion order
//! is display order. Callers that fail to resolve a style id must treat it
//! as "apply no modifier", so a record whose style was removed from the
//! catalog still renders.

use schemars::JsonSchema;
use serde::Serialize;

/// A catalog entry describing one selectable video style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
pub struct VideoStyle {
    /// Unique string key, referenced by generated-video records.
    pub id: &'static str,
    /// Display label.
    pub name: &'static str,
    /// Phrase appended to the user prompt to bias the generation style.
    pub prompt_modifier: &'static str,
    /// Display hint for the UI layer.
    pub preview_color: &'static str,
}

/// The fixed style table, in display order.
pub const VIDEO_STYLES: [VideoStyle; 6] = [
    VideoStyle {
        id: "realistic",
        name: "Realistic",
        prompt_modifier: "cinematic, photorealistic, 4k, highly detailed, realistic lighting",
        preview_color: "bg-blue-500",
    },
    VideoStyle {
        id: "anime",
        name: "Anime",
        prompt_modifier: "anime style, studio ghibli, vibrant colors, cell shaded, high quality animation",
        preview_color: "bg-pink-500",
    },
    VideoStyle {
        id: "cartoon",
        name: "Cartoon",
        prompt_modifier: "cartoon style, 3d render, pixar style, cute, smooth animation",
        preview_color: "bg-yellow-500",
    },
    VideoStyle {
        id: "surreal",
        name: "Surreal",
        prompt_modifier: "surrealism, dreamlike, dali style, floating objects, abstract, mysterious",
        preview_color: "bg-purple-500",
    },
    VideoStyle {
        id: "cyberpunk",
        name: "Cyberpunk",
        prompt_modifier: "cyberpunk, neon lights, futuristic city, rain, high tech, blade runner style",
        preview_color: "bg-cyan-500",
    },
    VideoStyle {
        id: "vintage",
        name: "Vintage",
        prompt_modifier: "vintage film look, 1950s style, black and white, grainy, classic cinema",
        preview_color: "bg-sepia-500",
    },
];

/// All catalog styles in display order.
pub fn styles() -> &'static [VideoStyle] {
    &VIDEO_STYLES
}

/// Look up a style by id.
pub fn find_style(id: &str) -> Option<&'static VideoStyle> {
    VIDEO_STYLES.iter().find(|s| s.id == id)
}

/// Compose the effective prompt sent to the generation service.
///
/// When `style_id` resolves in the catalog the modifier is appended as
/// `"<prompt>. Style: <modifier>"`; an unknown id leaves the prompt
/// unchanged.
pub fn compose_prompt(prompt: &str, style_id: &str) -> String {
    match find_style(style_id) {
        Some(style) => format!("{}. Style: {}", prompt, style.prompt_modifier),
        None => prompt.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_is_display_order() {
        let ids: Vec<&str> = styles().iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            vec!["realistic", "anime", "cartoon", "surreal", "cyberpunk", "vintage"]
        );
    }

    #[test]
    fn test_find_style() {
        assert_eq!(find_style("anime").unwrap().name, "Anime");
        assert!(find_style("claymation").is_none());
    }

    #[test]
    fn test_compose_prompt_known_style() {
        assert_eq!(
            compose_prompt("a cat", "anime"),
            "a cat. Style: anime style, studio ghibli, vibrant colors, cell shaded, high quality animation"
        );
    }

    #[test]
    fn test_compose_prompt_unknown_style_is_passthrough() {
        assert_eq!(compose_prompt("a cat", "claymation"), "a cat");
        assert_eq!(compose_prompt("a cat", ""), "a cat");
    }
}
