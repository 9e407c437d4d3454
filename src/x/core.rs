//! Core types for interfacing with the X server.
//!
//! This module defines the identifiers, errors and small
//! protocol-level types used throughout this crate for directly
//! interacting with the X server.

use core::ops::Deref;
use std::fmt::{self, Display};

use thiserror::Error;

use crate::types::{Color, Geometry};

#[doc(inline)]
pub use super::traits::XConn;

//* ========== X WINDOW THINGS ========== *//

/// General constant for expressing None when passing X IDs.
pub const XID_NONE: Xid = Xid::zero();

/// Wrapper type to represent IDs used by the X server.
///
/// This is used by the server to identify all sorts
/// of X window resources, including windows, atoms and cursors.
///
/// You can create an Xid from a `u32`:
///
/// ```rust
/// use xwindow::x::Xid;
///
/// let id = Xid::from(69);
/// let val = id.val();
///
/// assert_eq!(val, 69);
/// ```
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash, Default)]
pub struct Xid(pub(crate) u32);

impl Xid {
    /// Return an Xid set to 0.
    pub const fn zero() -> Self {
        Xid(0)
    }

    /// Returns the internal value of the Xid.
    pub const fn val(&self) -> u32 {
        self.0
    }
}

impl From<u32> for Xid {
    fn from(f: u32) -> Xid {
        Xid(f)
    }
}

impl Display for Xid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Xid({})", self.0)
    }
}

impl Deref for Xid {
    type Target = u32;

    fn deref(&self) -> &u32 {
        &self.0
    }
}

/// An X server ID for a given window.
pub type XWindowID = Xid;

/// An X Atom.
pub type XAtom = Xid;

/// An X server cursor resource.
///
/// Cursors are created elsewhere; this crate only assigns them.
pub type CursorId = Xid;

/// A server timestamp, in milliseconds.
pub type Timestamp = u32;

/// The `CurrentTime` special timestamp.
pub const CURRENT_TIME: Timestamp = 0;

/// Representation of an X window with additional data (geometry).
#[derive(Debug, Clone, Copy)]
pub struct XWindow {
    /// The X ID assigned to the window.
    pub id: XWindowID,
    /// The geometry of the window as stored on the X server.
    pub geom: Geometry,
}

impl XWindow {
    /// Creates an `XWindow` with all fields zeroed.
    pub fn zeroed() -> Self {
        XWindow {
            id: Xid(0),
            geom: Geometry::zeroed(),
        }
    }

    /// Creates an `XWindow` with the given data.
    pub fn with_data(id: XWindowID, geom: Geometry) -> Self {
        XWindow { id, geom }
    }
}

impl PartialEq for XWindow {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl From<XWindowID> for XWindow {
    fn from(from: XWindowID) -> Self {
        Self {
            id: from,
            geom: Geometry::zeroed(),
        }
    }
}

/// Window attributes that can be changed on a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientAttrs {
    /// The colour of the border.
    BorderColour(Color),
    /// The cursor shown while the pointer is inside the window.
    Cursor(CursorId),
}

/// Possible errors returned by the X connection.
#[non_exhaustive]
#[derive(Debug, Error, Clone)]
pub enum XError {
    /// An error when establishing or using a connection with the server.
    #[error("X connection error: {0}")]
    Connection(String),

    /// No screens were found on the X server.
    #[error("Could not find screens from X server")]
    NoScreens,

    /// An error reported by the X server.
    #[error("X server error: {0}")]
    ServerError(String),

    /// An error converting property or client message data.
    #[error("Error converting client message data")]
    ConversionError,

    /// The request could not be fulfilled by the X server.
    #[error("Could not complete specified request: {0}")]
    RequestError(&'static str),

    /// Some error not tracked by this crate.
    #[error("{0}")]
    OtherError(String),
}

/// Result type for XConn.
pub type Result<T> = ::core::result::Result<T, XError>;
