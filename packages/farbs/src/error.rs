//! Error types for farbs.
//!
//! Unresolved classes and unknown topics are not errors; everything that
//! reaches this enum is reported straight back to the direct caller.

use thiserror::Error;

/// Main error type for the farbs library.
#[derive(Debug, Error)]
pub enum FarbsError {
    /// Markup could not be parsed into a document.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid attribute namespace.
    #[error("Invalid namespace: '{0}'. Expected a letter followed by letters, digits or '-' (e.g., farbs)")]
    InvalidNamespace(String),

    /// A component constructor failed.
    #[error("Failed to construct '{class}' for node '{node_id}': {message}")]
    Construct {
        class: String,
        node_id: String,
        message: String,
    },

    /// A subscriber failed while a topic was being published.
    #[error("Subscriber for topic '{topic}' failed: {message}")]
    Subscriber { topic: String, message: String },

    /// A registered method failed.
    #[error("Method '{id}' failed: {message}")]
    Method { id: String, message: String },

    /// No element carries the requested id.
    #[error("No element with id '{0}'")]
    NodeNotFound(String),
}

impl FarbsError {
    /// Build a constructor failure for `class` on the node `node_id`.
    pub fn construct(
        class: impl Into<String>,
        node_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Construct {
            class: class.into(),
            node_id: node_id.into(),
            message: message.into(),
        }
    }

    /// Build a subscriber failure for `topic`.
    pub fn subscriber(topic: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Subscriber {
            topic: topic.into(),
            message: message.into(),
        }
    }

    /// Build a method failure for the method registered as `id`.
    pub fn method(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Method {
            id: id.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for farbs operations.
pub type Result<T> = std::result::Result<T, FarbsError>;
