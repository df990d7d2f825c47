use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtensionItemError>;

#[derive(Error, Debug)]
pub enum ExtensionItemError {
    #[error("Placeholder item is required")]
    MissingPlaceholder,
    #[error("Activity type is required to register an override")]
    MissingActivityType,
    #[error("User info key is reserved: {0}")]
    ReservedKey(String),
    #[error("Parsing error")]
    Parse,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for ExtensionItemError {
    fn from(_: serde_json::Error) -> Self {
        Self::Parse
    }
}
