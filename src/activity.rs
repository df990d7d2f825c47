//! Which activities can be handed a structured extension item.
//!
//! Built-in system activities either ignore extension items or handle them
//! badly, so they get the plain placeholder instead. Anything not known to
//! reject extension items is assumed to accept them: an extension item that
//! a receiver does not understand still carries the title, content text and
//! attachments it expects.

use std::borrow::{Borrow, Cow};
use std::collections::HashSet;
use std::fmt;

/// Identifier of a share destination, e.g. `com.apple.UIKit.activity.Print`
/// or an extension's bundle identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActivityType(Cow<'static, str>);

impl ActivityType {
    pub const POST_TO_FACEBOOK: Self =
        Self::from_static("com.apple.UIKit.activity.PostToFacebook");
    pub const POST_TO_TWITTER: Self =
        Self::from_static("com.apple.UIKit.activity.PostToTwitter");
    pub const POST_TO_WEIBO: Self =
        Self::from_static("com.apple.UIKit.activity.PostToWeibo");
    pub const POST_TO_TENCENT_WEIBO: Self =
        Self::from_static("com.apple.UIKit.activity.TencentWeibo");
    pub const MESSAGE: Self =
        Self::from_static("com.apple.UIKit.activity.Message");
    pub const MAIL: Self = Self::from_static("com.apple.UIKit.activity.Mail");
    pub const PRINT: Self = Self::from_static("com.apple.UIKit.activity.Print");
    pub const COPY_TO_PASTEBOARD: Self =
        Self::from_static("com.apple.UIKit.activity.CopyToPasteboard");
    pub const ASSIGN_TO_CONTACT: Self =
        Self::from_static("com.apple.UIKit.activity.AssignToContact");
    pub const SAVE_TO_CAMERA_ROLL: Self =
        Self::from_static("com.apple.UIKit.activity.SaveToCameraRoll");
    pub const ADD_TO_READING_LIST: Self =
        Self::from_static("com.apple.UIKit.activity.AddToReadingList");
    pub const POST_TO_FLICKR: Self =
        Self::from_static("com.apple.UIKit.activity.PostToFlickr");
    pub const POST_TO_VIMEO: Self =
        Self::from_static("com.apple.UIKit.activity.PostToVimeo");
    pub const AIR_DROP: Self =
        Self::from_static("com.apple.UIKit.activity.AirDrop");

    pub fn new(identifier: impl Into<String>) -> Self {
        Self(Cow::Owned(identifier.into()))
    }

    pub const fn from_static(identifier: &'static str) -> Self {
        Self(Cow::Borrowed(identifier))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn acceptance(&self) -> Acceptance {
        classify(self.as_str())
    }

    pub fn accepts_extension_items(&self) -> bool {
        self.acceptance() != Acceptance::Rejects
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ActivityType {
    fn from(identifier: &str) -> Self {
        Self::new(identifier)
    }
}

impl From<String> for ActivityType {
    fn from(identifier: String) -> Self {
        Self::new(identifier)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// Known to consume at least the content text of an extension item
    Accepts,
    /// Known to ignore or mishandle extension items
    Rejects,
    /// Not listed; treated as accepting
    Unknown,
}

impl Borrow<str> for ActivityType {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

lazy_static! {
    static ref ACCEPTING: HashSet<ActivityType> = HashSet::from([
        ActivityType::POST_TO_FACEBOOK,
        ActivityType::POST_TO_TWITTER,
        ActivityType::POST_TO_WEIBO,
        ActivityType::POST_TO_TENCENT_WEIBO,
    ]);
    static ref REJECTING: HashSet<ActivityType> = HashSet::from([
        ActivityType::MESSAGE,
        ActivityType::MAIL,
        ActivityType::PRINT,
        ActivityType::COPY_TO_PASTEBOARD,
        ActivityType::ASSIGN_TO_CONTACT,
        ActivityType::SAVE_TO_CAMERA_ROLL,
        ActivityType::ADD_TO_READING_LIST,
        ActivityType::POST_TO_FLICKR,
        ActivityType::POST_TO_VIMEO,
        ActivityType::AIR_DROP,
    ]);
}

pub fn classify(identifier: &str) -> Acceptance {
    if REJECTING.contains(identifier) {
        Acceptance::Rejects
    } else if ACCEPTING.contains(identifier) {
        Acceptance::Accepts
    } else {
        Acceptance::Unknown
    }
}

/// Activities known to reject extension items
pub fn rejecting() -> impl Iterator<Item = &'static ActivityType> {
    REJECTING.iter()
}

/// Activities known to accept extension items
pub fn accepting() -> impl Iterator<Item = &'static ActivityType> {
    ACCEPTING.iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ActivityType::MESSAGE)]
    #[case(ActivityType::MAIL)]
    #[case(ActivityType::PRINT)]
    #[case(ActivityType::COPY_TO_PASTEBOARD)]
    #[case(ActivityType::ASSIGN_TO_CONTACT)]
    #[case(ActivityType::SAVE_TO_CAMERA_ROLL)]
    #[case(ActivityType::ADD_TO_READING_LIST)]
    #[case(ActivityType::POST_TO_FLICKR)]
    #[case(ActivityType::POST_TO_VIMEO)]
    #[case(ActivityType::AIR_DROP)]
    fn system_activities_reject(#[case] activity: ActivityType) {
        assert_eq!(activity.acceptance(), Acceptance::Rejects);
        assert!(!activity.accepts_extension_items());
    }

    #[rstest]
    #[case(ActivityType::POST_TO_FACEBOOK)]
    #[case(ActivityType::POST_TO_TWITTER)]
    #[case(ActivityType::POST_TO_WEIBO)]
    #[case(ActivityType::POST_TO_TENCENT_WEIBO)]
    fn social_activities_accept(#[case] activity: ActivityType) {
        assert_eq!(activity.acceptance(), Acceptance::Accepts);
        assert!(activity.accepts_extension_items());
    }

    #[rstest]
    #[case("com.example.unknown.extension")]
    #[case("com.tumblr.tumblr.Share-With-Tumblr")]
    #[case("")]
    fn unknown_activities_accept(#[case] identifier: &str) {
        let activity = ActivityType::new(identifier);
        assert_eq!(activity.acceptance(), Acceptance::Unknown);
        assert!(activity.accepts_extension_items());
    }

    #[test]
    fn owned_and_static_identifiers_are_equal() {
        let owned = ActivityType::new("com.apple.UIKit.activity.Print");
        assert_eq!(owned, ActivityType::PRINT);
        assert_eq!(owned.acceptance(), Acceptance::Rejects);
    }

    #[test]
    fn sets_are_disjoint() {
        assert_eq!(rejecting().count(), 10);
        assert_eq!(accepting().count(), 4);
        assert!(accepting().all(|activity| !REJECTING.contains(activity)));
    }
}
