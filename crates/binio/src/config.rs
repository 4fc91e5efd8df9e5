// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec configuration.
//!
//! Constants here are the single source of truth for defaults; runtime
//! settings live in [`SessionConfig`], whose `Default` honours environment
//! overrides.
//!
//! | Variable              | Effect                                     |
//! |-----------------------|--------------------------------------------|
//! | `BINIO_MAX_VIEW_SPAN` | Largest buffer a single view may allocate  |
//! | `BINIO_TRACE_IO`      | Log adapter calls at `debug` (`1`/`true`)  |

use crate::types::Endianness;

/// Byte order of a registry that does not set one.
pub const DEFAULT_ENDIANNESS: Endianness = Endianness::Big;

/// Largest view buffer allocated by default (64 MiB).
///
/// A corrupt count member can otherwise request an arbitrarily large buffer.
pub const DEFAULT_MAX_VIEW_SPAN: usize = 64 * 1024 * 1024;

/// Environment override for [`SessionConfig::max_view_span`].
pub const ENV_MAX_VIEW_SPAN: &str = "BINIO_MAX_VIEW_SPAN";

/// Environment override for [`SessionConfig::trace_io`].
pub const ENV_TRACE_IO: &str = "BINIO_TRACE_IO";

/// Per-session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Maximum byte span of a single view buffer.
    pub max_view_span: usize,
    /// Log every adapter call at `debug` instead of `trace`.
    pub trace_io: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_view_span: std::env::var(ENV_MAX_VIEW_SPAN)
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_MAX_VIEW_SPAN),
            trace_io: std::env::var(ENV_TRACE_IO)
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }
}

impl SessionConfig {
    /// Defaults without consulting the environment.
    pub fn builtin() -> Self {
        Self {
            max_view_span: DEFAULT_MAX_VIEW_SPAN,
            trace_io: false,
        }
    }

    /// Set the maximum view span.
    pub fn with_max_view_span(mut self, max_view_span: usize) -> Self {
        self.max_view_span = max_view_span;
        self
    }

    /// Enable or disable I/O tracing at `debug`.
    pub fn with_trace_io(mut self, trace_io: bool) -> Self {
        self.trace_io = trace_io;
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
