//! The consuming side of the handshake.

use std::fmt;

use itertools::Itertools;
use url::Url;

use crate::accessor::get;
use crate::payload::{Attachment, ExtensionItem, UserInfo, NATIVE_KEYS};
use crate::referrer::Referrer;
use crate::{SOURCE_URL_KEY, TAGS_KEY, X_EXTENSION_ITEM_KEY};

/// Typed, read-only view over an [`ExtensionItem`] received by an extension.
///
/// Values the sender did not provide, or provided in a shape this version
/// does not understand, read as empty.
#[derive(Debug, Clone, PartialEq)]
pub struct XExtensionItem {
    attachments: Vec<Attachment>,
    attributed_title: Option<String>,
    attributed_content_text: Option<String>,
    tags: Vec<String>,
    source_url: Option<Url>,
    referrer: Option<Referrer>,
    user_info: UserInfo,
}

impl XExtensionItem {
    pub fn new(extension_item: &ExtensionItem) -> Self {
        let user_info = extension_item.user_info().clone();
        let parameters = get::<UserInfo>(&user_info, X_EXTENSION_ITEM_KEY)
            .unwrap_or_default();
        log::trace!(
            "decoding extension item with {} parameters",
            parameters.len()
        );

        Self {
            attachments: extension_item.attachments(),
            attributed_title: extension_item.attributed_title(),
            attributed_content_text: extension_item.attributed_content_text(),
            tags: get(&parameters, TAGS_KEY).unwrap_or_default(),
            source_url: get(&parameters, SOURCE_URL_KEY),
            referrer: Referrer::from_dictionary(&parameters),
            user_info,
        }
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn attributed_title(&self) -> Option<&str> {
        self.attributed_title.as_deref()
    }

    pub fn attributed_content_text(&self) -> Option<&str> {
        self.attributed_content_text.as_deref()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn source_url(&self) -> Option<&Url> {
        self.source_url.as_ref()
    }

    pub fn referrer(&self) -> Option<&Referrer> {
        self.referrer.as_ref()
    }

    /// The raw user info, including the library's own keys.
    pub fn user_info(&self) -> &UserInfo {
        &self.user_info
    }

    /// User info without the keys already surfaced as typed fields.
    pub fn custom_user_info(&self) -> UserInfo {
        self.user_info
            .iter()
            .filter(|(key, _)| {
                key.as_str() != X_EXTENSION_ITEM_KEY
                    && !NATIVE_KEYS.contains(&key.as_str())
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl From<&ExtensionItem> for XExtensionItem {
    fn from(extension_item: &ExtensionItem) -> Self {
        Self::new(extension_item)
    }
}

impl fmt::Display for XExtensionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "XExtensionItem {{")?;
        if !self.attachments.is_empty() {
            let types = self
                .attachments
                .iter()
                .map(|attachment| attachment.type_identifier.as_str())
                .join(", ");
            write!(f, "\n    attachments: [{}]", types)?;
        }
        if let Some(title) = &self.attributed_title {
            write!(f, "\n    attributedTitle: {:?}", title)?;
        }
        if let Some(text) = &self.attributed_content_text {
            write!(f, "\n    attributedContentText: {:?}", text)?;
        }
        if !self.tags.is_empty() {
            write!(f, "\n    tags: [{}]", self.tags.iter().join(", "))?;
        }
        if let Some(url) = &self.source_url {
            write!(f, "\n    sourceURL: {}", url)?;
        }
        if let Some(referrer) = &self.referrer {
            write!(f, "\n    referrer: {}", referrer.app_name())?;
            if let Some(id) = referrer.app_store_id() {
                write!(f, " (App Store ID {})", id)?;
            }
            if let Some(icon) = referrer.app_icon_url() {
                write!(f, " (icon {})", icon)?;
            }
        }
        let custom = self.custom_user_info();
        if !custom.is_empty() {
            write!(
                f,
                "\n    userInfo: {}",
                serde_json::Value::Object(custom)
            )?;
        }
        write!(f, "\n}}")
    }
}
