use crate::payload::UserInfo;

/// A custom object whose entries can be added to an item's user info.
///
/// Keys produced by implementors outside this crate must not start with
/// [`X_EXTENSION_ITEM_KEY`](crate::X_EXTENSION_ITEM_KEY).
pub trait DictionarySerializing {
    fn to_dictionary(&self) -> UserInfo;
}
