use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthzError {
    #[error("invalid action: {0}")]
    InvalidAction(String),
    #[error("invalid permission query: {0}")]
    InvalidPermission(String),
    #[error("duplicate role: {0}")]
    DuplicateRole(String),
    #[error("default role {0} is not defined")]
    UnknownDefaultRole(String),
    #[error("role {role} declares resource {resource} more than once")]
    DuplicatePermission { role: String, resource: String },
    #[error("role {role} declares action {action} on {resource} more than once")]
    DuplicateAction {
        role: String,
        resource: String,
        action: String,
    },
    #[error("invalid route pattern: {0}")]
    InvalidRoutePattern(String),
    #[error("config error: {0}")]
    Config(String),
    #[error("read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AuthzResult<T> = Result<T, AuthzError>;
