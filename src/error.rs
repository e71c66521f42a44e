use thiserror::Error;

/// Errors produced by the recommendation pipeline.
///
/// `EmptyInput` is the only variant the CLI recovers from locally; everything
/// else aborts the request (or startup) and is reported as-is.
#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("no skills or text were provided; enter at least one skill before searching")]
    EmptyInput,

    #[error("rating {rating} for skill '{skill}' is outside the allowed 0-{max} range")]
    RatingOutOfRange { skill: String, rating: u8, max: u8 },

    #[error("skill '{0}' is not part of the configured taxonomy")]
    UnknownSkill(String),

    #[error("category '{0}' is not part of the configured taxonomy")]
    UnknownCategory(String),

    #[error("free-text queries need a vectorizer artifact; set CAREERPATH_VECTORIZER_PATH")]
    VectorizerUnavailable,

    #[error("encoded vector has {got} dimensions but the model expects {expected}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("model returned row index {index} but the catalog only has {rows} rows")]
    IndexOutOfRange { index: usize, rows: usize },

    #[error("artifact '{path}' could not be read: {reason}")]
    MissingArtifact { path: String, reason: String },

    #[error("artifact '{path}' is not usable: {reason}")]
    CorruptArtifact { path: String, reason: String },
}
