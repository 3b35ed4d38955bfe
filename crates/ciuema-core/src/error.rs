/// Central error type for the catalog.
#[derive(Debug, thiserror::Error)]
pub enum CiuemaError {
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("species code already in use: {id}")]
    DuplicateSpecies { id: String },

    #[error("collection not found: {id}")]
    CollectionNotFound { id: String },

    #[error("no user signed in")]
    NotAuthenticated,

    #[error("no collection selected")]
    NoActiveCollection,

    #[error("user {user} is not allowed to do that in collection {collection}")]
    NotAuthorized { user: String, collection: String },

    #[error("the collection owner {owner} cannot be removed")]
    OwnerRemoval { owner: String },

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("database error: {0}")]
    Database(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("credential error: {message}")]
    CredentialError { message: String },

    #[error("{0}")]
    Other(String),
}

impl CiuemaError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        CiuemaError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
