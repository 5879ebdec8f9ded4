//! Structured error types for canvasgrid.
//!
//! Layout and painting never fail: missing data degrades to blank cells. Errors
//! only surface at the edges, when a drawing surface is created or when host
//! configuration is decoded.

/// All errors that can occur while setting up or configuring a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// The drawing surface could not provide a usable 2D context.
    #[error("Drawing context unavailable: {0}")]
    Context(String),

    /// Host-supplied schema, rows or styles could not be decoded.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON document error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Rendering error.
    #[error("Render error: {0}")]
    Render(String),

    /// A grid document or layout report could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;

#[cfg(target_arch = "wasm32")]
impl From<GridError> for wasm_bindgen::JsValue {
    fn from(e: GridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_context_error_message() {
        let err = GridError::Context("No 2d context available".into());
        assert_eq!(
            err.to_string(),
            "Drawing context unavailable: No 2d context available"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: GridError = parse.into();
        assert!(matches!(err, GridError::Json(_)));
    }

    #[test]
    fn test_io_error_converts() {
        let err: GridError = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert!(matches!(err, GridError::Io(_)));
        assert!(err.to_string().starts_with("I/O error: "));
    }
}
