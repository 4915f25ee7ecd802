#![forbid(unsafe_code)]

//! Content generation seam.
//!
//! A [`ContentGenerator`] turns free text or slide screenshots into
//! [`DraftItem`]s. The model call itself lives outside this crate; what
//! lives here is the tolerant decoding of model output, which is the part
//! every backend needs:
//!
//! - [`parse_text_response`] pulls the JSON block out of chatty output.
//! - [`parse_image_response`] never fails. A reply it cannot read becomes a
//!   placeholder the user edits by hand.
//! - [`import_images`] keeps going when one image fails.
//!
//! Drafts carry no ids. The session assigns fresh ones on import.

use std::sync::OnceLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use carousel_core::document::PLACEHOLDER_BODY;
use carousel_core::{DraftItem, Language};
use regex_lite::Regex;
use serde_json::Value;
use thiserror::Error;

/// Body of a slide whose image reply could not be decoded.
pub const TRANSLATION_FAILED_BODY: &str = "Translation failed. Please edit manually.";

/// Body of a slide whose image could not be processed at all.
pub const IMAGE_ERROR_BODY: &str = "Error processing image";

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("no input provided")]
    NoInput,
    #[error("no JSON object found in generator output")]
    NoJson,
    #[error("generator output is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("generator output has no \"slides\" array")]
    MissingSlides,
    #[error("generator backend failed: {0}")]
    Backend(String),
}

/// An image submitted for slide extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageInput {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Standard base64 of the image bytes, as model APIs expect inline data.
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

/// A backend producing slide drafts.
pub trait ContentGenerator {
    /// Generate a full carousel from free text.
    fn slides_from_text(
        &mut self,
        text: &str,
        language: Language,
    ) -> Result<Vec<DraftItem>, GenerateError>;

    /// Extract (and translate) one slide from an image.
    ///
    /// `index` is the image's position in its batch, for fallback titles.
    fn slide_from_image(
        &mut self,
        image: &ImageInput,
        index: usize,
        language: Language,
    ) -> Result<DraftItem, GenerateError>;
}

// =============================================================================
// Decoding
// =============================================================================

fn json_block() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("json block regex"))
}

fn fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```(?:json)?\n?").expect("code fence regex"))
}

fn fallback_title(index: usize) -> String {
    format!("Slide {}", index + 1)
}

/// Non-empty text of a JSON scalar. Null, empty strings and containers
/// yield `None`.
/// A present, truthy scalar as text. `0`, `false`, `""` and `null` count as
/// missing.
fn text_field(value: Option<&Value>) -> Option<String> {
    if !truthy(value) {
        return None;
    }
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(_) => Some("true".into()),
        _ => None,
    }
}

fn truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
        Some(Value::Null) | None => false,
    }
}

/// Decode a text-generation reply of the form
/// `{ "slides": [{ "title", "body", "isCta" }] }`.
///
/// Text around the outermost braces is ignored. Missing titles become
/// `Slide N`, missing bodies become empty, and the last draft is always a
/// call-to-action.
pub fn parse_text_response(raw: &str) -> Result<Vec<DraftItem>, GenerateError> {
    let block = json_block().find(raw).ok_or(GenerateError::NoJson)?;
    let parsed: Value = serde_json::from_str(block.as_str())?;
    let slides = parsed
        .get("slides")
        .and_then(Value::as_array)
        .ok_or(GenerateError::MissingSlides)?;

    let mut drafts: Vec<DraftItem> = slides
        .iter()
        .enumerate()
        .map(|(index, slide)| DraftItem {
            title: text_field(slide.get("title")).unwrap_or_else(|| fallback_title(index)),
            body: text_field(slide.get("body")).unwrap_or_default(),
            is_cta: truthy(slide.get("isCta")),
        })
        .collect();

    if let Some(last) = drafts.last_mut() {
        last.is_cta = true;
    }
    Ok(drafts)
}

/// Decode an image-extraction reply of the form `{ "title", "body" }`.
///
/// Markdown code fences are stripped first. Unreadable replies produce a
/// "translation failed" placeholder instead of an error.
#[must_use]
pub fn parse_image_response(raw: &str, index: usize) -> DraftItem {
    let cleaned = fence().replace_all(raw, "");
    match serde_json::from_str::<Value>(cleaned.trim()) {
        Ok(value) => DraftItem::new(
            text_field(value.get("title")).unwrap_or_else(|| fallback_title(index)),
            text_field(value.get("body")).unwrap_or_else(|| PLACEHOLDER_BODY.to_string()),
        ),
        Err(err) => {
            tracing::warn!(
                target: "carousel.generate",
                index,
                error = %err,
                "unreadable image reply"
            );
            DraftItem::new(fallback_title(index), TRANSLATION_FAILED_BODY)
        }
    }
}

/// Run `generator` over every image, one draft per image, in order.
///
/// A failing image becomes an "error processing image" placeholder. Only an
/// empty batch is an error.
pub fn import_images<G: ContentGenerator + ?Sized>(
    generator: &mut G,
    images: &[ImageInput],
    language: Language,
) -> Result<Vec<DraftItem>, GenerateError> {
    if images.is_empty() {
        return Err(GenerateError::NoInput);
    }
    let drafts = images
        .iter()
        .enumerate()
        .map(
            |(index, image)| match generator.slide_from_image(image, index, language) {
                Ok(draft) => draft,
                Err(err) => {
                    tracing::warn!(
                        target: "carousel.generate",
                        index,
                        name = %image.name,
                        error = %err,
                        "image import failed"
                    );
                    DraftItem::new(fallback_title(index), IMAGE_ERROR_BODY)
                }
            },
        )
        .collect();
    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays canned model replies.
    struct Canned {
        text: String,
        images: Vec<Result<String, String>>,
    }

    impl ContentGenerator for Canned {
        fn slides_from_text(
            &mut self,
            _text: &str,
            _language: Language,
        ) -> Result<Vec<DraftItem>, GenerateError> {
            parse_text_response(&self.text)
        }

        fn slide_from_image(
            &mut self,
            _image: &ImageInput,
            index: usize,
            _language: Language,
        ) -> Result<DraftItem, GenerateError> {
            match &self.images[index] {
                Ok(reply) => Ok(parse_image_response(reply, index)),
                Err(msg) => Err(GenerateError::Backend(msg.clone())),
            }
        }
    }

    fn png(name: &str) -> ImageInput {
        ImageInput::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
    }

    #[test]
    fn text_reply_with_chatter_is_extracted() {
        let raw = "Sure! Here you go:\n{\"slides\": [\
                   {\"title\": \"Hook\", \"body\": \"Stop scrolling\", \"isCta\": false},\
                   {\"body\": \"No title here\"},\
                   {\"title\": \"Follow\", \"body\": \"for more\"}]}\nHope that helps.";
        let drafts = parse_text_response(raw).unwrap();
        assert_eq!(drafts.len(), 3);
        assert_eq!(drafts[0].title, "Hook");
        assert!(!drafts[0].is_cta);
        assert_eq!(drafts[1].title, "Slide 2");
        assert!(drafts[2].is_cta);
    }

    #[test]
    fn text_reply_errors() {
        assert!(matches!(
            parse_text_response("no json at all"),
            Err(GenerateError::NoJson)
        ));
        assert!(matches!(
            parse_text_response("{ broken"),
            Err(GenerateError::NoJson)
        ));
        assert!(matches!(
            parse_text_response("{ \"slides\": [ }"),
            Err(GenerateError::Malformed(_))
        ));
        assert!(matches!(
            parse_text_response("{\"items\": []}"),
            Err(GenerateError::MissingSlides)
        ));
    }

    #[test]
    fn empty_slides_array_yields_no_drafts() {
        assert!(parse_text_response("{\"slides\": []}").unwrap().is_empty());
    }

    #[test]
    fn image_reply_strips_fences() {
        let raw = "```json\n{\"title\": \"Привіт\", \"body\": \"Світ\"}\n```";
        let draft = parse_image_response(raw, 0);
        assert_eq!(draft, DraftItem::new("Привіт", "Світ"));
    }

    #[test]
    fn image_reply_fallbacks() {
        let empty = parse_image_response("{\"title\": \"\", \"body\": null}", 2);
        assert_eq!(empty, DraftItem::new("Slide 3", PLACEHOLDER_BODY));

        let garbage = parse_image_response("I could not read that image.", 0);
        assert_eq!(garbage, DraftItem::new("Slide 1", TRANSLATION_FAILED_BODY));
    }

    #[test]
    fn falsy_scalars_fall_back() {
        let drafts = parse_text_response(
            "{\"slides\": [{\"title\": 0, \"body\": false}, {\"title\": 7, \"body\": 0}]}",
        )
        .unwrap();
        assert_eq!(drafts[0].title, "Slide 1");
        assert_eq!(drafts[0].body, "");
        assert_eq!(drafts[1].title, "7");
        assert_eq!(drafts[1].body, "");

        let draft = parse_image_response("{\"title\": 0, \"body\": 0}", 4);
        assert_eq!(draft, DraftItem::new("Slide 5", PLACEHOLDER_BODY));
    }

    #[test]
    fn import_images_keeps_going_after_failure() {
        let mut generator = Canned {
            text: String::new(),
            images: vec![
                Ok("{\"title\": \"One\", \"body\": \"first\"}".into()),
                Err("quota exceeded".into()),
                Ok("not json".into()),
            ],
        };
        let images = [png("a.png"), png("b.png"), png("c.png")];
        let drafts = import_images(&mut generator, &images, Language::En).unwrap();
        assert_eq!(
            drafts,
            vec![
                DraftItem::new("One", "first"),
                DraftItem::new("Slide 2", IMAGE_ERROR_BODY),
                DraftItem::new("Slide 3", TRANSLATION_FAILED_BODY),
            ]
        );
    }

    #[test]
    fn import_images_requires_input() {
        let mut generator = Canned {
            text: String::new(),
            images: Vec::new(),
        };
        assert!(matches!(
            import_images(&mut generator, &[], Language::Uk),
            Err(GenerateError::NoInput)
        ));
    }

    #[test]
    fn base64_encoding() {
        assert_eq!(png("x").to_base64(), "iVBORw==");
    }
}
