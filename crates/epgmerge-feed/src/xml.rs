//! XMLTV document wrapper types for quick-xml deserialization.

use serde::Deserialize;

/// Root `<tv>` document.
#[derive(Debug, Deserialize)]
#[serde(rename = "tv")]
pub struct TvDocument {
    /// Channel declarations.
    #[serde(rename = "channel", default)]
    pub channels: Vec<XmltvChannel>,
    /// Programme entries, in document order.
    #[serde(rename = "programme", default)]
    pub programmes: Vec<XmltvProgramme>,
}

/// `<channel>` element.
#[derive(Debug, Deserialize)]
pub struct XmltvChannel {
    /// `id` attribute (required by the schema; absence is a fatal
    /// per-document error upstream).
    #[serde(rename = "@id", default)]
    pub id: Option<String>,
    /// Nested `<display-name>` elements; only the first one's text is used.
    #[serde(rename = "display-name", default)]
    pub display_names: Vec<TextElement>,
    /// Nested `<icon>` elements; only the first `src` is used.
    #[serde(rename = "icon", default)]
    pub icons: Vec<IconElement>,
}

/// `<programme>` element.
#[derive(Debug, Deserialize)]
pub struct XmltvProgramme {
    /// `start` attribute (XMLTV timestamp).
    #[serde(rename = "@start")]
    pub start: String,
    /// `stop` attribute (XMLTV timestamp).
    #[serde(rename = "@stop")]
    pub stop: String,
    /// `channel` attribute referencing a channel id.
    #[serde(rename = "@channel")]
    pub channel: String,
    /// Nested `<title>` elements; only the first one's text is used.
    #[serde(rename = "title", default)]
    pub titles: Vec<TextElement>,
    /// Nested `<icon>` elements; only the first `src` is used.
    #[serde(rename = "icon", default)]
    pub icons: Vec<IconElement>,
}

/// Element whose text content is the value (`<display-name>`, `<title>`).
///
/// Attributes like `lang` are ignored.
#[derive(Debug, Deserialize)]
pub struct TextElement {
    /// Text content, `None` when the element is empty.
    #[serde(rename = "$text", default)]
    pub text: Option<String>,
}

/// `<icon>` element; only the `src` attribute matters.
#[derive(Debug, Deserialize)]
pub struct IconElement {
    /// `src` attribute.
    #[serde(rename = "@src", default)]
    pub src: Option<String>,
}
