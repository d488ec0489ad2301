//! Text in, uploaded deck out.

use crate::error::ApiError;
use deck_blob::{Access, BlobUploader, UploadedBlob};
use deck_core::{deck_filename, Error, InputParser};
use deck_pptx::DeckRenderer;
use serde_json::Value;

/// Pick the input text out of a request body.
///
/// A JSON object with a `text` field supplies the text; any other body is
/// used as-is.
pub fn request_text(body: &[u8]) -> Result<String, ApiError> {
    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(body) {
        if let Some(text) = map.get("text") {
            return match text {
                Value::String(text) => Ok(text.clone()),
                _ => Err(Error::MalformedInput("field `text` must be a string".to_string()).into()),
            };
        }
    }
    Ok(String::from_utf8_lossy(body).into_owned())
}

/// Parse the text, build the deck and upload it publicly.
pub async fn create_deck<U: BlobUploader>(
    text: &str,
    parser: &InputParser,
    renderer: &DeckRenderer,
    uploader: &U,
) -> Result<UploadedBlob, ApiError> {
    let input = parser.parse(text)?;
    let bytes = renderer.render(&input)?;
    let filename = deck_filename(&input.heading);

    log::info!(
        "Built '{}' with {} recommendation(s), {} bytes",
        filename,
        input.record_count,
        bytes.len()
    );

    let blob = uploader.upload(&filename, bytes, Access::Public).await?;
    Ok(blob)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockUploader;

    #[test]
    fn test_request_text_from_json() {
        let text = request_text(br#"{"text": "H\nD\n0"}"#).unwrap();
        assert_eq!(text, "H\nD\n0");
    }

    #[test]
    fn test_request_text_from_raw_body() {
        assert_eq!(request_text(b"H\nD\n0").unwrap(), "H\nD\n0");
    }

    #[test]
    fn test_request_text_json_without_text_field_is_raw() {
        let body = br#"{"other": 1}"#;
        assert_eq!(request_text(body).unwrap(), r#"{"other": 1}"#);
    }

    #[test]
    fn test_request_text_rejects_non_string_text() {
        let err = request_text(br#"{"text": 42}"#).unwrap_err();
        assert!(matches!(err, ApiError::Input(Error::MalformedInput(_))));
    }

    #[tokio::test]
    async fn test_create_deck_uploads_named_pptx() {
        let uploader = MockUploader::returning_url("https://blob.example/Q1_Offsite.pptx");
        let blob = create_deck(
            "Q1 Offsite\nMarch 2025\n1\nR1.venue_name=Grand Hotel",
            &InputParser::new(),
            &DeckRenderer::new(),
            &uploader,
        )
        .await
        .unwrap();

        assert_eq!(blob.url, "https://blob.example/Q1_Offsite.pptx");
        let calls = uploader.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].filename, "Q1_Offsite.pptx");
        assert_eq!(calls[0].access, Access::Public);
        assert!(calls[0].bytes.starts_with(&[0x50, 0x4B, 0x03, 0x04]));
    }

    #[tokio::test]
    async fn test_create_deck_does_not_upload_bad_input() {
        let uploader = MockUploader::returning_url("https://blob.example/x.pptx");
        let err = create_deck(
            "Q1 Offsite\nMarch 2025\ntwo",
            &InputParser::new(),
            &DeckRenderer::new(),
            &uploader,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, ApiError::Input(Error::MalformedInput(_))));
        assert!(uploader.calls().is_empty());
    }
}
