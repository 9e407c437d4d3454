//! Types for working with window properties.
//!
//! This module holds the wire encodings of the two properties this
//! crate reads and writes: ICCCM's `WM_STATE` and the compositing
//! `_NET_WM_WINDOW_OPACITY`.

use std::fmt;

use super::core::{XAtom, XID_NONE};

/// The ICCCM-defined window states.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum WindowState {
    /// The window is withdrawn (unmapped).
    #[default]
    Withdrawn = 0,
    /// The window is shown as normal.
    Normal = 1,
    /// The window has been "iconified".
    Iconic = 3,
}

impl WindowState {
    /// The value stored in the first field of `WM_STATE`.
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Decodes the first field of `WM_STATE`.
    ///
    /// Returns None for values the ICCCM does not define.
    pub fn from_u32(val: u32) -> Option<Self> {
        match val {
            0 => Some(Self::Withdrawn),
            1 => Some(Self::Normal),
            3 => Some(Self::Iconic),
            _ => None,
        }
    }

    /// The data written to `WM_STATE`: the state and the icon window,
    /// which is always `None`.
    pub fn encode(self) -> [u32; 2] {
        [self.as_u32(), XID_NONE.val()]
    }

    /// Decodes a `WM_STATE` reply.
    ///
    /// The property must have the type `WM_STATE` (passed in as
    /// `wm_state`), format 32 and at least one item. Anything else
    /// is malformed, and decodes the same as an absent property.
    pub fn decode(reply: &PropertyReply, wm_state: XAtom) -> Option<Self> {
        if reply.type_ != wm_state {
            return None;
        }
        reply.first_u32().and_then(Self::from_u32)
    }
}

impl fmt::Display for WindowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Withdrawn => write!(f, "withdrawn"),
            Self::Normal => write!(f, "normal"),
            Self::Iconic => write!(f, "iconic"),
        }
    }
}

/// A backend-agnostic reply to a `GetProperty` request.
///
/// Only format 32 data is kept, since both properties handled here
/// are lists of CARDINALs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyReply {
    /// The actual type of the property.
    pub type_: XAtom,
    /// The format of the property: 8, 16 or 32.
    pub format: u8,
    /// The property data, if the format was 32.
    pub value: Vec<u32>,
}

impl PropertyReply {
    /// Creates a new reply.
    pub fn new(type_: XAtom, format: u8, value: Vec<u32>) -> Self {
        Self {
            type_,
            format,
            value,
        }
    }

    /// Returns the first item of a format 32 property.
    pub fn first_u32(&self) -> Option<u32> {
        if self.format != 32 {
            return None;
        }
        self.value.first().copied()
    }
}

impl fmt::Display for PropertyReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let out = self
            .value
            .iter()
            .map(|s| format!("{:#010x}", s))
            .collect::<Vec<String>>()
            .join(",");

        write!(f, "{} (format {}): [{}]", self.type_, self.format, out)
    }
}

/// The fixed-point value of a fully opaque window.
pub const OPAQUE: u32 = u32::MAX;

/// Normalizes an opacity to the range written to the server.
///
/// Values outside [0, 1] are clamped, NaN counts as fully opaque.
pub fn clamp_opacity(value: f64) -> f64 {
    if value.is_nan() {
        1.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Encodes an opacity as a fraction of [`OPAQUE`].
///
/// Returns None for a fully opaque value, which is represented by
/// the property being absent.
pub fn encode_opacity(value: f64) -> Option<u32> {
    let value = clamp_opacity(value);
    if value >= 1.0 {
        return None;
    }
    Some((value * OPAQUE as f64).round() as u32)
}

/// Decodes a fixed-point opacity into [0, 1].
pub fn decode_opacity(raw: u32) -> f64 {
    raw as f64 / OPAQUE as f64
}
