//! Implementation of `XConn` backed by the `xcb` library.
//!
//! This module provides an interface to the X11 protocol via the XCB
//! backend.
//!
//! The core of this module is `XCBConn`, a type that implements the
//! `XConn` trait and can thus serve as the connection of an
//! [`XContext`](crate::XContext).
//!
//! NOTE: As of `xcb` 1.2.1, there is a bug in the library that causes
//! panics due to a misaligned pointer dereference. You should use
//! `x11rb` instead.
use core::marker::PhantomData;

use std::cell::RefCell;
use std::fmt;

use tracing::debug;

use xcb::x;
use xcb::{Xid as XCBid, XidNew};

use strum::*;

use super::{
    atom::Atom,
    core::{Result, XError, XWindow, XWindowID},
    Atoms, ConnStatus, Initialized, Uninitialized,
};
use crate::types::Geometry;

mod convert;
mod util;
mod xconn;

use util::{cast, id, req_and_reply};

const MAX_LONG_LENGTH: u32 = 1024;

/// A connection to an X server, backed by the XCB library.
///
/// Requests that do not return a reply are sent unchecked, so their
/// errors arrive on the event queue instead of being waited on.
///
/// It implements [XConn][1] and thus can be used with an
/// [XContext][2].
///
/// # Usage
///
/// ```no_run
/// use xwindow::x::xcb::XCBConn;
///
/// let conn = XCBConn::connect().expect("Connection error");
/// let conn = conn.init().expect("Could not initialize");
///
/// /* or: */
/// let conn = XCBConn::new().expect("Connection error");
/// ```
///
/// [1]: crate::x::core::XConn
/// [2]: crate::XContext
pub struct XCBConn<S: ConnStatus> {
    conn: xcb::Connection,
    root: XWindow,
    idx: i32,
    atoms: RefCell<Atoms>, // wrap in RefCell for interior mutability
    _marker: PhantomData<S>,
}

impl XCBConn<Uninitialized> {
    /// Connect to the X server and allocate a new Connection.
    pub fn connect() -> Result<Self> {
        // initialize xcb connection
        let (conn, idx) = xcb::Connection::connect(None)?;
        debug!("Connected to x server, got preferred screen {}", idx);

        // initialize our atom handler
        let atoms = RefCell::new(Atoms::new());

        Ok(Self {
            conn,
            root: XWindow::zeroed(),
            idx,
            atoms,
            _marker: PhantomData,
        })
    }

    /// Initializes the connection.
    ///
    /// It does the following:
    ///
    /// - Initializes the root window and its dimensions.
    /// - Interns all known [atoms][1].
    ///
    /// [1]: crate::x::Atom
    #[must_use = "this consumes the connection and returns an initialized one"]
    pub fn init(mut self) -> Result<XCBConn<Initialized>> {
        // get root window id
        let root = match self.conn.get_setup().roots().nth(self.idx as usize) {
            Some(screen) => {
                let id = id!(screen.root());
                let (geom, _) = self.get_geometry_inner(id)?;
                XWindow::with_data(id, geom)
            }
            None => return Err(XError::NoScreens),
        };
        debug!("Got root: {:?}", root);

        let atomcount = Atom::iter().count();
        let mut atomvec = Vec::with_capacity(atomcount);

        // intern all known atoms

        // get cookies for all first
        for atom in Atom::iter() {
            atomvec.push((
                atom.to_string(),
                self.conn.send_request(&x::InternAtom {
                    only_if_exists: false,
                    name: atom.as_ref().as_bytes(),
                }),
            ));
        }

        let atoms = self.atoms.get_mut();

        // then get replies
        for (name, cookie) in atomvec {
            atoms.insert(&name, id!(self.conn.wait_for_reply(cookie)?.atom()));
        }

        Ok(XCBConn {
            conn: self.conn,
            root,
            idx: self.idx,
            atoms: self.atoms,
            _marker: PhantomData,
        })
    }
}

impl<S: ConnStatus> XCBConn<S> {
    #[inline]
    pub(crate) fn get_geometry_inner(&self, window: XWindowID) -> Result<(Geometry, u32)> {
        trace!("Getting geometry for window {}", window);

        // send the request and grab its reply
        Ok(req_and_reply!(
            self.conn,
            &x::GetGeometry {
                drawable: x::Drawable::Window(cast!(x::Window, *window))
            }
        )
        .map(|ok| {
            (
                Geometry::new(
                    ok.x() as i32,
                    ok.y() as i32,
                    ok.width() as u32,
                    ok.height() as u32,
                ),
                ok.border_width() as u32,
            )
        })?)
    }
}

impl XCBConn<Initialized> {
    /// Shortcut static method to directly connect and
    /// initialize a new connection.
    pub fn new() -> Result<Self> {
        XCBConn::connect()?.init()
    }

    /// Exposes `XCBConn`'s internal connection.
    pub fn conn(&self) -> &xcb::Connection {
        &self.conn
    }
}

impl<S: ConnStatus> fmt::Debug for XCBConn<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XCBConn")
            .field("root", &self.root)
            .field("idx", &self.idx)
            .field("atoms", &self.atoms)
            .finish()
    }
}

impl From<xcb::ConnError> for XError {
    fn from(e: xcb::ConnError) -> XError {
        XError::Connection(e.to_string())
    }
}

impl From<xcb::ProtocolError> for XError {
    fn from(e: xcb::ProtocolError) -> XError {
        XError::ServerError(e.to_string())
    }
}

impl From<xcb::Error> for XError {
    fn from(e: xcb::Error) -> XError {
        match e {
            xcb::Error::Connection(e) => e.into(),
            xcb::Error::Protocol(e) => e.into(),
        }
    }
}
