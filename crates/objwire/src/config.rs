// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Decoder configuration.
//!
//! Length prefixes and nesting come straight from the wire, so the decoder
//! bounds them before allocating or recursing. Defaults can be overridden
//! per process through environment variables:
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `OBJWIRE_MAX_STRING_LEN` | [`DecodeLimits::max_string_len`] | 16 MiB |
//! | `OBJWIRE_MAX_ARRAY_LEN` | [`DecodeLimits::max_array_len`] | 1 000 000 |
//! | `OBJWIRE_MAX_DEPTH` | [`DecodeLimits::max_depth`] | 64 |

use std::str::FromStr;

/// Default maximum string length in bytes.
pub const DEFAULT_MAX_STRING_LEN: usize = 16 * 1024 * 1024;

/// Default maximum slice element count.
/// Far beyond any legitimate record while still catching allocation bombs.
pub const DEFAULT_MAX_ARRAY_LEN: usize = 1_000_000;

/// Default maximum nesting of structs and polymorphic objects.
pub const DEFAULT_MAX_DEPTH: u32 = 64;

/// Upper bound for speculative `Vec::with_capacity` on decoded counts.
pub(crate) const PREALLOC_LIMIT: usize = 4096;

pub const ENV_MAX_STRING_LEN: &str = "OBJWIRE_MAX_STRING_LEN";
pub const ENV_MAX_ARRAY_LEN: &str = "OBJWIRE_MAX_ARRAY_LEN";
pub const ENV_MAX_DEPTH: &str = "OBJWIRE_MAX_DEPTH";

/// Bounds enforced by [`crate::Decoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Longest accepted string, in bytes.
    pub max_string_len: usize,
    /// Largest accepted slice element count.
    pub max_array_len: usize,
    /// Deepest accepted nesting of structs and objects.
    pub max_depth: u32,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_string_len: DEFAULT_MAX_STRING_LEN,
            max_array_len: DEFAULT_MAX_ARRAY_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DecodeLimits {
    /// Defaults overridden by the `OBJWIRE_*` environment variables.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            max_string_len: parse_or(&lookup, ENV_MAX_STRING_LEN, defaults.max_string_len),
            max_array_len: parse_or(&lookup, ENV_MAX_ARRAY_LEN, defaults.max_array_len),
            max_depth: parse_or(&lookup, ENV_MAX_DEPTH, defaults.max_depth),
        }
    }

    #[must_use]
    pub fn max_string_len(mut self, len: usize) -> Self {
        self.max_string_len = len;
        self
    }

    #[must_use]
    pub fn max_array_len(mut self, len: usize) -> Self {
        self.max_array_len = len;
        self
    }

    #[must_use]
    pub fn max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                log::warn!("[config] ignoring {}={:?}: not a valid number", key, raw);
                default
            }
        },
        None => default,
    }
}
