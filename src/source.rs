//! The producing side of the handshake.

use std::collections::HashMap;
use std::fmt;

use image::DynamicImage;
use serde_json::Value;
use url::Url;

use crate::activity::ActivityType;
use crate::payload::{ActivityItem, Attachment, ExtensionItem, UserInfo};
use crate::referrer::Referrer;
use crate::serializing::DictionarySerializing;
use crate::{
    ExtensionItemError, Result, SOURCE_URL_KEY, TAGS_KEY, X_EXTENSION_ITEM_KEY,
};

type ItemProvider = Box<dyn Fn() -> ActivityItem + Send + Sync>;
type ThumbnailProvider =
    Box<dyn Fn(ThumbnailSize) -> Option<DynamicImage> + Send + Sync>;

/// Size the host wants a thumbnail preview rendered at, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThumbnailSize {
    pub width: u32,
    pub height: u32,
}

impl ThumbnailSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Everything an application wants to share, bundled behind a single
/// placeholder item.
///
/// The host only sees the placeholder when deciding which activities to
/// offer. Once one is picked, [`ItemSource::resolve_value`] hands it either
/// the full [`ExtensionItem`] or, for activities that cannot make sense of
/// one, the placeholder itself.
pub struct ItemSource {
    placeholder: ActivityItem,
    attachments: Vec<Attachment>,
    title: Option<String>,
    content_text: Option<String>,
    tags: Vec<String>,
    source_url: Option<Url>,
    referrer: Option<Referrer>,
    user_info: UserInfo,
    items: HashMap<ActivityType, ItemProvider>,
    subjects: HashMap<ActivityType, String>,
    thumbnails: HashMap<ActivityType, ThumbnailProvider>,
}

impl ItemSource {
    /// Create a source whose placeholder is a plain item such as a URL.
    ///
    /// A null placeholder is rejected.
    pub fn new(placeholder: Value, attachments: Vec<Attachment>) -> Result<Self> {
        if placeholder.is_null() {
            return Err(ExtensionItemError::MissingPlaceholder);
        }
        Ok(Self::with_placeholder(
            ActivityItem::Item(placeholder),
            attachments,
        ))
    }

    /// Create a source whose placeholder is raw data of a given type
    /// identifier, e.g. `public.jpeg`.
    pub fn with_data(
        data: Vec<u8>,
        type_identifier: impl Into<String>,
        attachments: Vec<Attachment>,
    ) -> Result<Self> {
        let type_identifier = type_identifier.into();
        if type_identifier.is_empty() {
            return Err(ExtensionItemError::MissingPlaceholder);
        }
        Ok(Self::with_placeholder(
            ActivityItem::Data {
                data,
                type_identifier,
            },
            attachments,
        ))
    }

    fn with_placeholder(
        placeholder: ActivityItem,
        attachments: Vec<Attachment>,
    ) -> Self {
        Self {
            placeholder,
            attachments,
            title: None,
            content_text: None,
            tags: Vec::new(),
            source_url: None,
            referrer: None,
            user_info: UserInfo::new(),
            items: HashMap::new(),
            subjects: HashMap::new(),
            thumbnails: HashMap::new(),
        }
    }

    pub fn placeholder(&self) -> &ActivityItem {
        &self.placeholder
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn set_attachments(&mut self, attachments: Vec<Attachment>) {
        self.attachments = attachments;
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    pub fn content_text(&self) -> Option<&str> {
        self.content_text.as_deref()
    }

    pub fn set_content_text(&mut self, content_text: Option<String>) {
        self.content_text = content_text;
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Tag metadata, like on Twitter, Instagram or Tumblr
    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
    }

    pub fn source_url(&self) -> Option<&Url> {
        self.source_url.as_ref()
    }

    /// Where the attachment data can be found on the web
    pub fn set_source_url(&mut self, source_url: Option<Url>) {
        self.source_url = source_url;
    }

    pub fn referrer(&self) -> Option<&Referrer> {
        self.referrer.as_ref()
    }

    pub fn set_referrer(&mut self, referrer: Option<Referrer>) {
        self.referrer = referrer;
    }

    pub fn user_info(&self) -> &UserInfo {
        &self.user_info
    }

    /// Replace the custom user info. Keys starting with
    /// [`X_EXTENSION_ITEM_KEY`] are reserved and rejected.
    pub fn set_user_info(&mut self, user_info: UserInfo) -> Result<()> {
        check_reserved(&user_info)?;
        self.user_info = user_info;
        Ok(())
    }

    /// Merge the entries of a custom object into the user info, replacing
    /// existing values for the same keys.
    pub fn add_entries_to_user_info(
        &mut self,
        serializable: &impl DictionarySerializing,
    ) -> Result<()> {
        let entries = serializable.to_dictionary();
        check_reserved(&entries)?;
        self.user_info.extend(entries);
        Ok(())
    }

    /// Hand `activity` whatever `provider` returns instead of the generic
    /// extension item.
    pub fn register_item<F>(
        &mut self,
        activity: impl Into<ActivityType>,
        provider: F,
    ) -> Result<()>
    where
        F: Fn() -> ActivityItem + Send + Sync + 'static,
    {
        let activity = required(activity.into())?;
        log::debug!("registering item override for {}", activity);
        self.items.insert(activity, Box::new(provider));
        Ok(())
    }

    pub fn register_subject(
        &mut self,
        activity: impl Into<ActivityType>,
        subject: impl Into<String>,
    ) -> Result<()> {
        let activity = required(activity.into())?;
        self.subjects.insert(activity, subject.into());
        Ok(())
    }

    /// The provider is called synchronously while the host lays out its
    /// activity list; expensive rendering should be cached by the caller.
    pub fn register_thumbnail<F>(
        &mut self,
        activity: impl Into<ActivityType>,
        provider: F,
    ) -> Result<()>
    where
        F: Fn(ThumbnailSize) -> Option<DynamicImage> + Send + Sync + 'static,
    {
        let activity = required(activity.into())?;
        self.thumbnails.insert(activity, Box::new(provider));
        Ok(())
    }

    /// The item to hand to `activity`.
    ///
    /// A registered override always wins. Otherwise activities that reject
    /// extension items get the placeholder and everything else gets the
    /// encoded [`ExtensionItem`].
    pub fn resolve_value(&self, activity: &ActivityType) -> ActivityItem {
        if let Some(provider) = self.items.get(activity) {
            log::debug!("using item override for {}", activity);
            return provider();
        }

        if !activity.accepts_extension_items() {
            log::debug!(
                "{} does not accept extension items, using placeholder",
                activity
            );
            return self.placeholder.clone();
        }

        ActivityItem::Extension(self.extension_item())
    }

    pub fn subject(&self, activity: &ActivityType) -> Option<&str> {
        self.subjects.get(activity).map(String::as_str)
    }

    pub fn thumbnail(
        &self,
        activity: &ActivityType,
        size: ThumbnailSize,
    ) -> Option<DynamicImage> {
        let provider = self.thumbnails.get(activity)?;
        provider(size)
    }

    /// Type identifier of a data placeholder, regardless of activity
    pub fn data_type_identifier(&self, _activity: &ActivityType) -> Option<&str> {
        match &self.placeholder {
            ActivityItem::Data {
                type_identifier, ..
            } => Some(type_identifier.as_str()),
            _ => None,
        }
    }

    /// Encode everything into a single extension item.
    pub fn extension_item(&self) -> ExtensionItem {
        let mut item = ExtensionItem::from_user_info(self.user_info.clone());
        item.set_attachments(&self.attachments);
        item.set_attributed_title(self.title.clone());
        item.set_attributed_content_text(self.content_text.clone());

        let parameters = self.parameters();
        if !parameters.is_empty() {
            item.user_info_mut()
                .insert(X_EXTENSION_ITEM_KEY.to_owned(), Value::Object(parameters));
        }
        item
    }

    fn parameters(&self) -> UserInfo {
        let mut parameters = UserInfo::new();
        if !self.tags.is_empty() {
            parameters.insert(TAGS_KEY.to_owned(), Value::from(self.tags.clone()));
        }
        if let Some(url) = &self.source_url {
            parameters
                .insert(SOURCE_URL_KEY.to_owned(), Value::from(url.as_str()));
        }
        if let Some(referrer) = &self.referrer {
            parameters.extend(referrer.to_dictionary());
        }
        parameters
    }
}

impl fmt::Debug for ItemSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemSource")
            .field("placeholder", &self.placeholder)
            .field("attachments", &self.attachments)
            .field("title", &self.title)
            .field("content_text", &self.content_text)
            .field("tags", &self.tags)
            .field("source_url", &self.source_url)
            .field("referrer", &self.referrer)
            .field("user_info", &self.user_info)
            .field("item_overrides", &self.items.keys().collect::<Vec<_>>())
            .field("subjects", &self.subjects)
            .field(
                "thumbnail_overrides",
                &self.thumbnails.keys().collect::<Vec<_>>(),
            )
            .finish()
    }
}

fn required(activity: ActivityType) -> Result<ActivityType> {
    if activity.is_empty() {
        return Err(ExtensionItemError::MissingActivityType);
    }
    Ok(activity)
}

fn check_reserved(user_info: &UserInfo) -> Result<()> {
    match user_info
        .keys()
        .find(|key| key.starts_with(X_EXTENSION_ITEM_KEY))
    {
        Some(key) => Err(ExtensionItemError::ReservedKey(key.clone())),
        None => Ok(()),
    }
}
