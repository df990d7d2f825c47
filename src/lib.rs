//! # Extension Item
//!
//! A metadata handshake between an application sharing content and the
//! extension receiving it.
//!
//! The producing side fills an [`ItemSource`] with attachments and
//! well-known metadata (tags, a source URL, a [`Referrer`]) plus any custom
//! user info. When the host asks for the item to hand to a given activity,
//! [`ItemSource::resolve_value`] returns either a structured
//! [`ExtensionItem`] or the plain placeholder, depending on per-activity
//! overrides and on whether the activity is known to understand extension
//! items at all.
//!
//! The consuming side wraps whatever it received in an [`XExtensionItem`]
//! and reads the typed fields back out. Fields it does not recognise, or
//! values of an unexpected shape, simply read as absent.
//!
//! ```
//! use extension_item::{ActivityItem, ActivityType, ItemSource, XExtensionItem};
//! use serde_json::json;
//!
//! let mut source = ItemSource::new(json!("https://apple.com/featured"), vec![])?;
//! source.set_tags(vec!["tumblr".to_owned(), "featured".to_owned()]);
//!
//! let activity = ActivityType::new("com.tumblr.share");
//! if let ActivityItem::Extension(item) = source.resolve_value(&activity) {
//!     let received = XExtensionItem::new(&item);
//!     assert_eq!(received.tags(), ["tumblr", "featured"]);
//! }
//! # Ok::<(), extension_item::ExtensionItemError>(())
//! ```

#[macro_use]
extern crate lazy_static;

pub mod accessor;
pub mod activity;
pub mod errors;
pub mod item;
pub mod payload;
pub mod referrer;
pub mod serializing;
pub mod source;

pub use activity::{Acceptance, ActivityType};
pub use errors::{ExtensionItemError, Result};
pub use item::XExtensionItem;
pub use payload::{ActivityItem, Attachment, ExtensionItem, UserInfo};
pub use referrer::Referrer;
pub use serializing::DictionarySerializing;
pub use source::{ItemSource, ThumbnailSize};

use std::sync::Once;

/// Top-level user info key under which all library-defined values are nested.
///
/// Custom user info keys must not start with this string.
pub const X_EXTENSION_ITEM_KEY: &str = "x-extension-item";

pub const SOURCE_URL_KEY: &str = "source-url";
pub const TAGS_KEY: &str = "tags";

pub static INIT: Once = Once::new();

pub fn initialize() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
        log::info!("Initializing extension-item");
    });
}
