use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

pub const PUBLIC_CONTENT_PATH: &str = "/grace/data/public_content.json";
pub const PRIVATE_CONTENT_PATH: &str = "/grace/chapters/data/private_content.json";

pub const COLLAGE_CHAPTER_KEY: &str = "photos";
pub const COLLAGE_LIMIT: usize = 4;
pub const COLLAGE_TILT_EVEN: &str = "-2deg";
pub const COLLAGE_TILT_ODD: &str = "2deg";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContentMode {
    #[default]
    Public,
    Private,
}

impl ContentMode {
    pub fn from_page_attr(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(page) if page.eq_ignore_ascii_case("private") => ContentMode::Private,
            _ => ContentMode::Public,
        }
    }

    pub fn content_path(self) -> &'static str {
        match self {
            ContentMode::Public => PUBLIC_CONTENT_PATH,
            ContentMode::Private => PRIVATE_CONTENT_PATH,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    #[error("content request failed: {0}")]
    Network(String),
    #[error("content request returned status {0}")]
    Status(u16),
    #[error("content is not valid json: {0}")]
    Parse(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Item {
    pub title: String,
    #[serde(rename = "memoryText")]
    pub memory_text: String,
    #[serde(rename = "imagePath")]
    pub image_path: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Chapter {
    pub title: String,
    pub blurb: String,
    pub items: Vec<Item>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ContentDocument {
    pub chapters: BTreeMap<String, Chapter>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChapterSummary {
    pub key: String,
    pub title: String,
    pub blurb: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CollageTile {
    pub title: String,
    pub image_path: String,
    pub tilt: &'static str,
}

impl ContentDocument {
    /// Parses fetched text. Only a syntax error fails; shape problems are
    /// normalized away.
    pub fn from_json(raw: &str) -> Result<Self, LoadError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|err| LoadError::Parse(err.to_string()))?;
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        let chapters = value
            .get("chapters")
            .and_then(Value::as_object)
            .map(|chapters| {
                chapters
                    .iter()
                    .filter_map(|(key, chapter)| {
                        chapter
                            .as_object()
                            .map(|fields| (key.clone(), chapter_from_fields(fields)))
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { chapters }
    }

    pub fn chapter(&self, key: &str) -> Option<&Chapter> {
        self.chapters.get(key)
    }

    pub fn summaries<S: AsRef<str>>(&self, slot_keys: &[S]) -> Vec<ChapterSummary> {
        slot_keys
            .iter()
            .filter_map(|key| {
                let key = key.as_ref();
                self.chapter(key).map(|chapter| ChapterSummary {
                    key: key.to_string(),
                    title: chapter.title.clone(),
                    blurb: chapter.blurb.clone(),
                })
            })
            .collect()
    }

    pub fn collage(&self, chapter_key: &str) -> Vec<CollageTile> {
        let Some(chapter) = self.chapter(chapter_key) else {
            return Vec::new();
        };
        chapter
            .items
            .iter()
            .take(COLLAGE_LIMIT)
            .enumerate()
            .map(|(index, item)| CollageTile {
                title: item.title.clone(),
                image_path: item.image_path.clone(),
                tilt: if index % 2 == 0 {
                    COLLAGE_TILT_EVEN
                } else {
                    COLLAGE_TILT_ODD
                },
            })
            .collect()
    }
}

fn chapter_from_fields(fields: &Map<String, Value>) -> Chapter {
    let items = fields
        .get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(item_from_fields)
                .collect()
        })
        .unwrap_or_default();
    Chapter {
        title: text_field(fields, "title"),
        blurb: text_field(fields, "blurb"),
        items,
    }
}

fn item_from_fields(fields: &Map<String, Value>) -> Item {
    Item {
        title: text_field(fields, "title"),
        memory_text: text_field(fields, "memoryText"),
        image_path: text_field(fields, "imagePath"),
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_attr_selects_path() {
        assert_eq!(
            ContentMode::from_page_attr(Some("private")).content_path(),
            PRIVATE_CONTENT_PATH
        );
        assert_eq!(
            ContentMode::from_page_attr(Some("public")).content_path(),
            PUBLIC_CONTENT_PATH
        );
        assert_eq!(ContentMode::from_page_attr(None), ContentMode::Public);
        assert_eq!(ContentMode::from_page_attr(Some("other")), ContentMode::Public);
    }

    #[test]
    fn syntax_error_is_parse_failure() {
        let err = ContentDocument::from_json("{ not json").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn wrong_root_shape_is_empty() {
        assert_eq!(ContentDocument::from_json("[]").unwrap(), ContentDocument::default());
        assert_eq!(
            ContentDocument::from_json(r#"{"chapters": 3}"#).unwrap(),
            ContentDocument::default()
        );
    }

    #[test]
    fn text_fields_are_stringified() {
        let doc = ContentDocument::from_json(
            r#"{"chapters":{"a":{"title":7,"blurb":true,"items":[{"title":null}]}}}"#,
        )
        .unwrap();
        let chapter = doc.chapter("a").unwrap();
        assert_eq!(chapter.title, "7");
        assert_eq!(chapter.blurb, "true");
        assert_eq!(chapter.items, vec![Item::default()]);
    }

    #[test]
    fn collage_alternates_tilt() {
        let doc = ContentDocument::from_json(
            r#"{"chapters":{"photos":{"items":[
                {"title":"a","imagePath":"a.jpg"},
                {"title":"b","imagePath":"b.jpg"},
                {"title":"c","imagePath":"c.jpg"}
            ]}}}"#,
        )
        .unwrap();
        let tiles = doc.collage(COLLAGE_CHAPTER_KEY);
        let tilts: Vec<_> = tiles.iter().map(|tile| tile.tilt).collect();
        assert_eq!(tilts, vec!["-2deg", "2deg", "-2deg"]);
        assert_eq!(tiles[1].image_path, "b.jpg");
        assert!(doc.collage("missing").is_empty());
    }
}
