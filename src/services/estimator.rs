use std::path::Path;

/// Returned when a 200 response does not carry `candidates[0].content.parts[0].text`.
pub const UNEXPECTED_FORMAT: &str = "Error: Unexpected API response format";

/// Trait for calorie estimation backends (Gemini, test stubs, etc.)
///
/// Always yields a displayable string: either the model's estimate or an
/// `Error: ...` message. Callers put it in the response body as-is.
#[async_trait::async_trait]
pub trait CalorieEstimator: Send + Sync {
    async fn estimate(&self, image_path: &Path) -> String;
}

pub fn status_error(status: u16, body: &str) -> String {
    format!(
        "Error: Unable to process image (Status: {}, Message: {})",
        status, body
    )
}

pub fn read_error(err: &std::io::Error) -> String {
    format!("Error: Unable to read image ({})", err)
}

pub fn transport_error(err: &dyn std::fmt::Display) -> String {
    format!("Error: Unable to reach calorie estimation service ({})", err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_format() {
        assert_eq!(
            status_error(503, "unavailable"),
            "Error: Unable to process image (Status: 503, Message: unavailable)"
        );
    }

    #[test]
    fn test_read_error_format() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert_eq!(read_error(&err), "Error: Unable to read image (gone)");
    }
}
