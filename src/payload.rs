//! The generic payload exchanged with the host sharing mechanism.
//!
//! An [`ExtensionItem`] is nothing more than a user info mapping. Title,
//! content text and attachments live at its top level under the host's
//! well-known keys, next to any custom keys and the reserved
//! [`X_EXTENSION_ITEM_KEY`](crate::X_EXTENSION_ITEM_KEY) namespace.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::accessor::get;
use crate::Result;

pub type UserInfo = Map<String, Value>;

pub const ATTRIBUTED_TITLE_KEY: &str = "NSExtensionItemAttributedTitleKey";
pub const ATTRIBUTED_CONTENT_TEXT_KEY: &str =
    "NSExtensionItemAttributedContentTextKey";
pub const ATTACHMENTS_KEY: &str = "NSExtensionItemAttachmentsKey";

/// Keys the host already surfaces as fields of its own.
pub const NATIVE_KEYS: [&str; 3] =
    [ATTRIBUTED_TITLE_KEY, ATTRIBUTED_CONTENT_TEXT_KEY, ATTACHMENTS_KEY];

/// A media handle passed through to the receiving extension untouched.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Attachment {
    pub item: Value,
    pub type_identifier: String,
}

impl Attachment {
    pub fn new(item: impl Into<Value>, type_identifier: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            type_identifier: type_identifier.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ExtensionItem {
    user_info: UserInfo,
}

impl ExtensionItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_user_info(user_info: UserInfo) -> Self {
        Self { user_info }
    }

    pub fn user_info(&self) -> &UserInfo {
        &self.user_info
    }

    pub fn user_info_mut(&mut self) -> &mut UserInfo {
        &mut self.user_info
    }

    pub fn into_user_info(self) -> UserInfo {
        self.user_info
    }

    pub fn attributed_title(&self) -> Option<String> {
        get(&self.user_info, ATTRIBUTED_TITLE_KEY)
    }

    pub fn set_attributed_title(&mut self, title: Option<String>) {
        self.set_native(ATTRIBUTED_TITLE_KEY, title.map(Value::from));
    }

    pub fn attributed_content_text(&self) -> Option<String> {
        get(&self.user_info, ATTRIBUTED_CONTENT_TEXT_KEY)
    }

    pub fn set_attributed_content_text(&mut self, text: Option<String>) {
        self.set_native(ATTRIBUTED_CONTENT_TEXT_KEY, text.map(Value::from));
    }

    /// Attachments in order. Entries that are not attachment handles are
    /// skipped.
    pub fn attachments(&self) -> Vec<Attachment> {
        get::<Vec<Value>>(&self.user_info, ATTACHMENTS_KEY)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|value| serde_json::from_value(value).ok())
            .collect()
    }

    pub fn set_attachments(&mut self, attachments: &[Attachment]) {
        let values: Option<Value> = if attachments.is_empty() {
            None
        } else {
            serde_json::to_value(attachments).ok()
        };
        self.set_native(ATTACHMENTS_KEY, values);
    }

    /// Encode for hosts that carry the payload as bytes
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        match serde_json::from_slice::<Value>(bytes)? {
            Value::Object(user_info) => Ok(Self { user_info }),
            other => Err(anyhow::anyhow!(
                "extension item payload must be an object, got {}",
                other
            )
            .into()),
        }
    }

    fn set_native(&mut self, key: &str, value: Option<Value>) {
        match value {
            Some(value) => {
                self.user_info.insert(key.to_owned(), value);
            }
            None => {
                self.user_info.remove(key);
            }
        }
    }
}

/// What the host hands to the selected activity.
#[derive(Debug, Clone, PartialEq)]
pub enum ActivityItem {
    /// A plain item, such as a URL or a string
    Item(Value),
    /// Raw bytes of the given uniform type identifier
    Data {
        data: Vec<u8>,
        type_identifier: String,
    },
    Extension(ExtensionItem),
}

impl ActivityItem {
    pub fn as_extension_item(&self) -> Option<&ExtensionItem> {
        match self {
            ActivityItem::Extension(item) => Some(item),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn native_fields_live_at_the_top_level() {
        let mut item = ExtensionItem::new();
        item.set_attributed_title(Some("Title".to_owned()));
        item.set_attributed_content_text(Some("Body".to_owned()));
        item.set_attachments(&[Attachment::new(
            "https://example.com",
            "public.url",
        )]);

        let user_info = item.user_info();
        assert_eq!(user_info[ATTRIBUTED_TITLE_KEY], json!("Title"));
        assert_eq!(user_info[ATTRIBUTED_CONTENT_TEXT_KEY], json!("Body"));
        assert_eq!(
            user_info[ATTACHMENTS_KEY],
            json!([{"item": "https://example.com", "type_identifier": "public.url"}])
        );
    }

    #[test]
    fn clearing_a_native_field_removes_its_key() {
        let mut item = ExtensionItem::new();
        item.set_attributed_title(Some("Title".to_owned()));
        item.set_attributed_title(None);
        item.set_attachments(&[]);
        assert!(item.user_info().is_empty());
    }

    #[test]
    fn malformed_attachments_are_skipped() {
        let user_info = json!({
            ATTACHMENTS_KEY: [
                {"item": 1, "type_identifier": "public.data"},
                "not an attachment",
            ],
        });
        let item =
            ExtensionItem::from_user_info(user_info.as_object().unwrap().clone());
        assert_eq!(item.attachments(), vec![Attachment::new(1, "public.data")]);
    }

    #[test]
    fn json_transport() {
        let mut item = ExtensionItem::new();
        item.set_attributed_title(Some("Title".to_owned()));
        item.user_info_mut()
            .insert("custom".to_owned(), json!({"nested": [1, 2]}));

        let bytes = item.to_json().unwrap();
        assert_eq!(ExtensionItem::from_json(&bytes).unwrap(), item);

        assert!(ExtensionItem::from_json(b"[1, 2]").is_err());
        assert!(ExtensionItem::from_json(b"{not json").is_err());
    }
}
