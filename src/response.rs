use serde::Serialize;
use utoipa::ToSchema;

/// Uniform success envelope. Errors use the same `type`/`message` shape and
/// are rendered by [`crate::error::AppError`].
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            kind: "success".to_string(),
            message: message.into(),
            data,
        }
    }
}
