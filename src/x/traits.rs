//! The trait that defines the interface to the X server.
//!
//! # Trait Structure
//!
//! [`XConn`] is a thin layer over the handful of core protocol
//! requests the window layer issues:
//!
//! ```text
//!      window components
//!   (state, geometry, grab,
//!    focus, opacity, visual)
//!             |
//!          XContext
//!             |
//!           XConn
//!             |
//!   ----------|----------
//!   |                   |
//! X11RBConn          XCBConn
//! ```
//!
//! Writes are send-and-forget: implementors should queue the request
//! and return without waiting on the server. Reads that the window
//! layer pipelines are split into a request half, returning a cookie,
//! and a reply half that consumes it.
use super::{
    core::{ClientAttrs, Result, XAtom, XWindow, XWindowID},
    event::{ClientMessageEvent, ConfigureEvent},
    input::{ButtonGrabMode, KeyboardMapping, ModifierMapping},
    property::PropertyReply,
};
use crate::bindings::{Keybind, Mousebind};
use crate::types::Geometry;

/// A trait used to define the interface between the window layer
/// and the X server.
///
/// XConn provides an abstraction layer for talking to an underlying X server.
/// Its methods are designed to provide as thin a layer as possible,
/// often mapping directly to X server protocol requests, with type
/// conversion to present dependency-agnostic types.
///
/// # Atom Management
///
/// An XConn implementation should also provide a way to manage X atoms.
/// Its `atom()` method should intern an Atom if not known, and
/// the implementation should store this in its internal state in some way.
///
/// # Implementors
///
/// This crate provides two implementations of XConn: [XCBConn][1] and
/// [X11RBConn][2].
///
/// [1]: crate::x::xcb::XCBConn
/// [2]: crate::x::x11rb::X11RBConn
pub trait XConn {
    /// A pending `GetProperty` request.
    ///
    /// Cookies borrow the connection they were issued on and are
    /// consumed by [`XConn::property_reply`].
    type PropertyCookie<'a>
    where
        Self: 'a;

    //* General X server operations

    /// Returns the ID and geometry of the root window.
    fn get_root(&self) -> XWindow;

    /// Queries the children of the given window.
    fn query_tree(&self, window: XWindowID) -> Result<Vec<XWindowID>>;

    /// Returns the geometry and border width of a given window.
    ///
    /// This blocks on the server's reply.
    fn get_geometry(&self, window: XWindowID) -> Result<(Geometry, u32)>;

    /// Get the value of an atom by its name.
    ///
    /// You can use [Atom][1]'s `as_ref()` method to get a
    /// known atom's string representation.
    ///
    /// If the atom is unknown, intern it.
    ///
    /// [1]: crate::x::atom::Atom
    fn atom(&self, atom: &str) -> Result<XAtom>;

    /// Looks up the name of an atom.
    fn lookup_atom(&self, atom: XAtom) -> Result<String>;

    /// Sends all queued requests to the server.
    fn flush(&self) -> Result<()>;

    //* Properties

    /// Replaces a property on a window with format 32 data.
    fn change_property(
        &self,
        window: XWindowID,
        prop: XAtom,
        ty: XAtom,
        data: &[u32],
    ) -> Result<()>;

    /// Deletes a property from a window.
    fn delete_property(&self, window: XWindowID, prop: XAtom) -> Result<()>;

    /// Requests a property without waiting for the reply.
    fn get_property_unchecked(
        &self,
        window: XWindowID,
        prop: XAtom,
        ty: XAtom,
    ) -> Result<Self::PropertyCookie<'_>>;

    /// Waits for the reply to a property request.
    ///
    /// Returns `Ok(None)` if the property does not exist.
    fn property_reply<'a>(&'a self, cookie: Self::PropertyCookie<'a>)
        -> Result<Option<PropertyReply>>;

    //* Window-related operations

    /// Sets the geometry and border width of a given window.
    fn configure_window(&self, window: XWindowID, geom: Geometry, border: u32) -> Result<()>;

    /// Sends a `ConfigureNotify` to a window, with the
    /// `StructureNotify` event mask.
    fn send_configure_notify(&self, event: ConfigureEvent) -> Result<()>;

    /// Sends a message to a given client.
    fn send_client_message(&self, window: XWindowID, data: ClientMessageEvent) -> Result<()>;

    /// Change window attributes for a given window.
    fn change_window_attributes(&self, window: XWindowID, attrs: &[ClientAttrs]) -> Result<()>;

    //* Input

    /// Grabs a key-modmask combo for a given window.
    ///
    /// The modmask is grabbed exactly as given.
    fn grab_key(&self, kb: Keybind, window: XWindowID) -> Result<()>;

    /// Releases every key grab on a given window.
    fn ungrab_all_keys(&self, window: XWindowID) -> Result<()>;

    /// Grabs a mouse button-mask combo for a given window.
    fn grab_button(&self, mb: Mousebind, window: XWindowID, mode: ButtonGrabMode) -> Result<()>;

    /// Releases every button grab on a given window.
    fn ungrab_all_buttons(&self, window: XWindowID) -> Result<()>;

    /// Returns the keycodes bound to each modifier.
    fn modifier_mapping(&self) -> Result<ModifierMapping>;

    /// Returns the keysyms bound to each keycode.
    fn keyboard_mapping(&self) -> Result<KeyboardMapping>;
}
