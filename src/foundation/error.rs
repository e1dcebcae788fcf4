pub type FramerResult<T> = Result<T, FramerError>;

#[derive(thiserror::Error, Debug)]
pub enum FramerError {
    #[error("no photo loaded")]
    NoPhotoLoaded,

    #[error("camera access denied: {0}")]
    CameraAccessDenied(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FramerError {
    pub fn camera_denied(msg: impl Into<String>) -> Self {
        Self::CameraAccessDenied(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Text shown to the user when this error aborts an action.
    pub fn user_message(&self) -> String {
        match self {
            Self::NoPhotoLoaded => "Please add an image first!".to_string(),
            Self::CameraAccessDenied(_) => {
                "Camera access denied. Please use the Browse option.".to_string()
            }
            Self::Decode(_) => "Could not read that image. Please try another file.".to_string(),
            other => format!("Something went wrong: {other}"),
        }
    }
}
