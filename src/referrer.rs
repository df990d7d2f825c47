use serde_json::Value;
use url::Url;

use crate::accessor::get;
use crate::payload::UserInfo;
use crate::serializing::DictionarySerializing;

const APP_NAME_KEY: &str = "referrer-app-name";
const APP_STORE_ID_KEY: &str = "referrer-app-store-id";
const APP_ICON_URL_KEY: &str = "referrer-app-icon-url";

/// The application content is being shared from, so the receiving extension
/// can attribute it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Referrer {
    app_name: String,
    app_store_id: Option<u64>,
    app_icon_url: Option<Url>,
}

impl Referrer {
    pub fn new(
        app_name: impl Into<String>,
        app_store_id: Option<u64>,
        app_icon_url: Option<Url>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            app_store_id,
            app_icon_url,
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Numeric App Store identifier of the referring application
    pub fn app_store_id(&self) -> Option<u64> {
        self.app_store_id
    }

    pub fn app_icon_url(&self) -> Option<&Url> {
        self.app_icon_url.as_ref()
    }

    /// Read a referrer back out of a flat mapping.
    ///
    /// Returns `None` when the app name is missing; optional fields that
    /// are missing or malformed are left empty.
    pub fn from_dictionary(dictionary: &UserInfo) -> Option<Self> {
        let app_name = get::<String>(dictionary, APP_NAME_KEY)?;

        Some(Self {
            app_name,
            app_store_id: get(dictionary, APP_STORE_ID_KEY),
            app_icon_url: get(dictionary, APP_ICON_URL_KEY),
        })
    }
}

impl DictionarySerializing for Referrer {
    fn to_dictionary(&self) -> UserInfo {
        let mut dictionary = UserInfo::new();
        dictionary.insert(
            APP_NAME_KEY.to_owned(),
            Value::from(self.app_name.as_str()),
        );
        if let Some(id) = self.app_store_id {
            dictionary.insert(APP_STORE_ID_KEY.to_owned(), Value::from(id));
        }
        if let Some(url) = &self.app_icon_url {
            dictionary
                .insert(APP_ICON_URL_KEY.to_owned(), Value::from(url.as_str()));
        }
        dictionary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(Referrer::new("Tumblr", None, None))]
    #[case(Referrer::new("Tumblr", Some(305343404), None))]
    #[case(Referrer::new(
        "Tumblr",
        Some(305343404),
        Some(Url::parse("https://tumblr.com/icon.png").unwrap())
    ))]
    #[case(Referrer::new(
        "Tumblr",
        None,
        Some(Url::parse("https://tumblr.com/icon.png").unwrap())
    ))]
    fn decodes_what_it_encodes(#[case] referrer: Referrer) {
        let decoded = Referrer::from_dictionary(&referrer.to_dictionary());
        assert_eq!(decoded, Some(referrer));
    }

    #[test]
    fn absent_fields_are_omitted() {
        let dictionary = Referrer::new("App", None, None).to_dictionary();
        assert_eq!(dictionary.len(), 1);
        assert!(!dictionary.values().any(Value::is_null));
    }

    #[test]
    fn missing_app_name_decodes_to_none() {
        let mut dictionary =
            Referrer::new("App", Some(1), None).to_dictionary();
        dictionary.remove(APP_NAME_KEY);
        assert_eq!(Referrer::from_dictionary(&dictionary), None);
        assert_eq!(Referrer::from_dictionary(&UserInfo::new()), None);
    }

    #[test]
    fn malformed_optional_fields_are_dropped() {
        let dictionary = json!({
            APP_NAME_KEY: "App",
            APP_STORE_ID_KEY: "not a number",
            APP_ICON_URL_KEY: ["not", "a", "url"],
        });
        let referrer =
            Referrer::from_dictionary(dictionary.as_object().unwrap()).unwrap();
        assert_eq!(referrer, Referrer::new("App", None, None));
    }
}
