//! Implementation of `XConn` backed by the `x11rb` library.
//!
//! The core of this module is `X11RBConn`, a type that implements
//! the `XConn` trait and can thus serve as the connection of an
//! [`XContext`](crate::XContext).
use core::marker::PhantomData;

use std::cell::RefCell;
use std::fmt;

use x11rb::connection::Connection;
use x11rb::errors;
use x11rb::protocol::xproto::ConnectionExt as XConnectionExt;
use x11rb::rust_connection::RustConnection;

use tracing::debug;

use strum::*;

use super::{
    atom::Atom,
    core::{Result, XError, XWindow, XWindowID},
    Atoms, ConnStatus, Initialized, Uninitialized,
};
use crate::types::Geometry;

mod convert;
mod xconn;

const MAX_LONG_LENGTH: u32 = 1024;

/// A connection to an X server, backed by the x11rb library.
///
/// Requests that do not return a reply are sent without waiting
/// for the server. Any error they cause is delivered to the event
/// loop like any other X error.
///
/// It implements [XConn][1] and thus can be used with an
/// [XContext][2].
///
/// # Usage
///
/// ```no_run
/// use xwindow::x::x11rb::X11RBConn;
///
/// let conn = X11RBConn::connect().expect("Connection error");
/// let conn = conn.init().expect("Could not initialize");
///
/// /* or: */
/// let conn = X11RBConn::new().expect("Connection error");
/// ```
///
/// [1]: crate::x::core::XConn
/// [2]: crate::XContext
pub struct X11RBConn<S: ConnStatus> {
    conn: RustConnection,
    root: XWindow,
    idx: usize,
    atoms: RefCell<Atoms>, // wrap in RefCell for interior mutability
    _marker: PhantomData<S>,
}

impl X11RBConn<Uninitialized> {
    /// Connect to the X server and allocate a new Connection.
    pub fn connect() -> Result<Self> {
        let (conn, idx) = x11rb::connect(None)?;
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
    /// [1]: crate::x::atom::Atom
    #[must_use = "this consumes the connection and returns an initialized one"]
    pub fn init(mut self) -> Result<X11RBConn<Initialized>> {
        // get root window id
        let root = match self.conn.setup().roots.get(self.idx) {
            Some(screen) => {
                let id = XWindowID::from(screen.root);
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
                self.conn.intern_atom(false, atom.as_ref().as_bytes())?,
            ));
        }

        let atoms = self.atoms.get_mut();

        // then get replies
        for (name, cookie) in atomvec {
            atoms.insert(&name, XWindowID::from(cookie.reply()?.atom));
        }

        Ok(X11RBConn {
            conn: self.conn,
            root,
            idx: self.idx,
            atoms: self.atoms,
            _marker: PhantomData,
        })
    }
}

impl<S: ConnStatus> X11RBConn<S> {
    #[inline]
    pub(crate) fn get_geometry_inner(&self, window: XWindowID) -> Result<(Geometry, u32)> {
        trace!("Getting geometry for window {}", window);

        // send the request and grab its reply
        Ok(self.conn.get_geometry(*window)?.reply().map(|ok| {
            (
                Geometry::new(ok.x as i32, ok.y as i32, ok.width as u32, ok.height as u32),
                ok.border_width as u32,
            )
        })?)
    }
}

impl X11RBConn<Initialized> {
    /// Shortcut static method to directly connect and
    /// initialize a new connection.
    pub fn new() -> Result<Self> {
        X11RBConn::connect()?.init()
    }

    /// Exposes `X11RBConn`'s internal connection.
    pub fn conn(&self) -> &RustConnection {
        &self.conn
    }
}

impl<S: ConnStatus> fmt::Debug for X11RBConn<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("X11RBConn")
            .field("root", &self.root)
            .field("idx", &self.idx)
            .field("atoms", &self.atoms)
            .finish()
    }
}

use std::io::Error;

impl From<Error> for XError {
    fn from(_: Error) -> XError {
        XError::ConversionError
    }
}

impl From<errors::ConnectionError> for XError {
    fn from(e: errors::ConnectionError) -> XError {
        use errors::ConnectionError::*;
        match e {
            UnknownError | InsufficientMemory | FdPassingFailed => {
                XError::Connection(e.to_string())
            }
            IoError(e) => XError::Connection(e.to_string()),
            other => XError::ServerError(other.to_string()),
        }
    }
}

impl From<errors::ConnectError> for XError {
    fn from(e: errors::ConnectError) -> XError {
        XError::Connection(e.to_string())
    }
}

impl From<errors::ReplyError> for XError {
    fn from(e: errors::ReplyError) -> XError {
        if let errors::ReplyError::ConnectionError(e) = e {
            e.into()
        } else {
            XError::ServerError(e.to_string())
        }
    }
}

impl From<errors::ReplyOrIdError> for XError {
    fn from(e: errors::ReplyOrIdError) -> XError {
        if let errors::ReplyOrIdError::ConnectionError(e) = e {
            e.into()
        } else {
            XError::ServerError(e.to_string())
        }
    }
}
