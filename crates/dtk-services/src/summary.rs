//! One-sentence summary generation
//!
//! The summarizer works from the document's text body, or from an image
//! attachment when no text is present. Failure is surfaced to the caller
//! as a distinct error but never rolls back any document mutation already
//! applied.

use async_trait::async_trait;
use dtk_domain::Attachment;

/// Inputs available for summarization.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryRequest<'a> {
    /// Document text body, if any.
    pub body: Option<&'a str>,
    /// Attachment, if any.
    pub attachment: Option<&'a Attachment>,
}

impl<'a> SummaryRequest<'a> {
    /// Request over a text body.
    #[must_use]
    pub fn from_body(body: &'a str) -> Self {
        Self {
            body: Some(body),
            ..Self::default()
        }
    }

    /// Request over an attachment.
    #[must_use]
    pub fn from_attachment(attachment: &'a Attachment) -> Self {
        Self {
            attachment: Some(attachment),
            ..Self::default()
        }
    }
}

/// Failures of summary generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SummaryError {
    /// Neither text nor attachment was provided
    #[error("no content or attachment to summarize")]
    NoInput,

    /// The attachment cannot be summarized (only images are supported)
    #[error("unsupported attachment type: {0}")]
    UnsupportedAttachment(String),

    /// The backing service failed
    #[error("summary backend failed: {0}")]
    Backend(String),
}

/// Produces a one-sentence synthesized summary.
#[async_trait]
pub trait SummaryGenerator: Send + Sync {
    /// Summarize the request into a single sentence.
    async fn summarize(&self, request: SummaryRequest<'_>) -> Result<String, SummaryError>;
}

/// Local extractive summarizer: first sentence of the body, clipped.
///
/// Stands in for the hosted model; it honors the same contract, including
/// the image-only restriction on attachments.
#[derive(Debug, Clone, Copy)]
pub struct ExtractiveSummarizer {
    // Hard cap on summary length, in characters.
    max_chars: usize,
}

impl ExtractiveSummarizer {
    const DEFAULT_MAX_CHARS: usize = 160;

    /// Summarizer with the default length cap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_chars: Self::DEFAULT_MAX_CHARS,
        }
    }
}

impl Default for ExtractiveSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SummaryGenerator for ExtractiveSummarizer {
    async fn summarize(&self, request: SummaryRequest<'_>) -> Result<String, SummaryError> {
        if let Some(body) = request.body.filter(|b| !b.trim().is_empty()) {
            let body = body.trim();
            let first_sentence = body
                .split_inclusive(['.', '!', '?'])
                .next()
                .unwrap_or(body)
                .trim();
            let mut summary: String = first_sentence.chars().take(self.max_chars).collect();
            if !summary.ends_with(['.', '!', '?']) {
                summary.push('.');
            }
            return Ok(summary);
        }

        match request.attachment {
            Some(attachment) if attachment.is_image() => {
                Ok(format!("Image document: {}.", attachment.file_name))
            }
            Some(attachment) => Err(SummaryError::UnsupportedAttachment(
                attachment.mime_type.clone(),
            )),
            None => Err(SummaryError::NoInput),
        }
    }
}
