//! Size probes: learn a variant's payload size without downloading it.
//!
//! A [`SizeProbe`] resolves a URL to a [`ProbeOutcome`]. Probes never fail:
//! every cause of "no size" is folded into [`ProbeOutcome::Unknown`] with an
//! [`UnknownReason`] kept for diagnostics.
//!
//! - [`HttpSizeProbe`] -- issues a `HEAD` request with reqwest and reads
//!   `Content-Length`.

mod http;

use std::fmt;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

pub use http::{HttpSizeProbe, ProbeSettings};

/// Bytes per KiB.
pub const BYTES_PER_KIB: f64 = 1024.0;

/// Result of a single size probe.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    /// Size in KiB as reported by the server.
    Measured(f64),
    /// Size could not be determined.
    Unknown(UnknownReason),
}

impl ProbeOutcome {
    /// Build a measurement from a byte count.
    pub fn from_bytes(bytes: u64) -> Self {
        ProbeOutcome::Measured(bytes as f64 / BYTES_PER_KIB)
    }

    /// Collapse to the descriptor representation.
    pub fn kib(&self) -> Option<f64> {
        match self {
            ProbeOutcome::Measured(kib) => Some(*kib),
            ProbeOutcome::Unknown(_) => None,
        }
    }

    pub fn is_measured(&self) -> bool {
        matches!(self, ProbeOutcome::Measured(_))
    }
}

/// Why a probe produced no size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnknownReason {
    /// The shared cancellation token fired. Expected; never logged.
    Cancelled,
    /// The server answered with a non-success status code.
    Unsuccessful(u16),
    /// The response carried no `Content-Length` header.
    MissingLength,
    /// `Content-Length` was present but not a non-negative integer.
    InvalidLength(String),
    /// Network-level failure (DNS, connect, reset, malformed response).
    Transport(String),
}

impl fmt::Display for UnknownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownReason::Cancelled => write!(f, "cancelled"),
            UnknownReason::Unsuccessful(status) => write!(f, "HTTP status {status}"),
            UnknownReason::MissingLength => write!(f, "no Content-Length header"),
            UnknownReason::InvalidLength(raw) => write!(f, "invalid Content-Length {raw:?}"),
            UnknownReason::Transport(message) => write!(f, "transport error: {message}"),
        }
    }
}

/// Async size lookup for a single URL.
///
/// Implementations must resolve to [`ProbeOutcome::Unknown`] rather than
/// erroring, and should return promptly once `cancel` fires.
#[async_trait]
pub trait SizeProbe: Send + Sync {
    async fn probe_size(&self, url: &str, cancel: &CancellationToken) -> ProbeOutcome;
}

/// Interpret a raw `Content-Length` value.
pub(crate) fn parse_content_length(raw: Option<&str>) -> ProbeOutcome {
    let Some(raw) = raw else {
        return ProbeOutcome::Unknown(UnknownReason::MissingLength);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return ProbeOutcome::Unknown(UnknownReason::MissingLength);
    }

    match trimmed.parse::<u64>() {
        Ok(bytes) if trimmed.bytes().all(|b| b.is_ascii_digit()) => {
            ProbeOutcome::from_bytes(bytes)
        }
        _ => ProbeOutcome::Unknown(UnknownReason::InvalidLength(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn exact_kib_conversion() {
        assert_eq!(parse_content_length(Some("102400")), ProbeOutcome::Measured(100.0));
        assert_eq!(parse_content_length(Some("512")), ProbeOutcome::Measured(0.5));
        assert_eq!(parse_content_length(Some("0")), ProbeOutcome::Measured(0.0));
    }

    #[test]
    fn surrounding_whitespace_is_tolerated() {
        assert_eq!(parse_content_length(Some(" 2048 ")), ProbeOutcome::Measured(2.0));
    }

    #[test]
    fn missing_or_blank_length() {
        assert_matches!(
            parse_content_length(None),
            ProbeOutcome::Unknown(UnknownReason::MissingLength)
        );
        assert_matches!(
            parse_content_length(Some("")),
            ProbeOutcome::Unknown(UnknownReason::MissingLength)
        );
    }

    #[test]
    fn rejects_non_integer_lengths() {
        for raw in ["abc", "-5", "+5", "12.5", "12abc"] {
            assert_matches!(
                parse_content_length(Some(raw)),
                ProbeOutcome::Unknown(UnknownReason::InvalidLength(_)),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn kib_collapses_unknown() {
        assert_eq!(ProbeOutcome::Measured(3.0).kib(), Some(3.0));
        assert_eq!(ProbeOutcome::Unknown(UnknownReason::Cancelled).kib(), None);
        assert!(!ProbeOutcome::Unknown(UnknownReason::MissingLength).is_measured());
    }

    #[test]
    fn reason_display() {
        assert_eq!(UnknownReason::Unsuccessful(404).to_string(), "HTTP status 404");
        assert_eq!(
            UnknownReason::InvalidLength("x".into()).to_string(),
            "invalid Content-Length \"x\""
        );
    }
}
