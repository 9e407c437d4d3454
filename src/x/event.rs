//! Events this crate sends to clients.
//!
//! Receiving events is the business of whatever owns the event loop;
//! this module only models the two events the window layer needs to
//! construct itself: `ConfigureNotify` and `ClientMessage`.

use super::core::{XAtom, XWindowID};
use crate::types::Geometry;

/// Data associated with a configure notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigureEvent {
    /// The window associated with the event.
    pub window: XWindowID,
    /// The geometry of the window.
    pub geom: Geometry,
    /// The border width of the window.
    pub border: u32,
    /// Whether the event was constructed and sent by a client
    /// rather than generated by the server.
    pub synthetic: bool,
}

impl ConfigureEvent {
    /// Creates a synthetic notification describing a window's
    /// current geometry.
    pub fn synthetic(window: XWindowID, geom: Geometry, border: u32) -> Self {
        Self {
            window,
            geom,
            border,
            synthetic: true,
        }
    }
}

/// Data associated with a client message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientMessageEvent {
    /// The window receiving the message.
    pub window: XWindowID,
    /// Client message data.
    pub data: ClientMessageData,
    /// The type that the data is to be interpreted as.
    pub type_: XAtom,
}

/// The different formats of a Client message's data,
/// as specified by ICCCM.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClientMessageData {
    /// The data should be interpreted as bytes.
    U8([u8; 20]),
    /// The data should be interpreted as words.
    U16([u16; 10]),
    /// The data should be interpreted as doublewords.
    U32([u32; 5]),
}

impl ClientMessageData {
    /// The format of the data, in bits.
    pub fn format(&self) -> u8 {
        match self {
            Self::U8(_) => 8,
            Self::U16(_) => 16,
            Self::U32(_) => 32,
        }
    }
}
