//! Types and traits providing a unified interface with the X server.
//!
//! The core of this module is the `XConn` trait, which defines the
//! requests the window layer sends to the X server, using this crate's
//! types for abstraction.
//!
//! For concrete implementation of the traits exported here, this module
//! offers two submodules which each contain implementations using the XCB
//! and X11RB backing libraries respectively.
//!
//! ## Connection Object Initialization
//!
//! The two `XConn` implementors have two states: unitialized, and
//! initialized, marked in their type constructor. Uninitialized
//! connections are connections that have only established a connection
//! to the server, and have not interned the atoms required for them
//! to be able to safely call any of their methods. Thus, `XConn` is
//! only implemented for initialized connections, and users will have
//! to call the `init` method for a Connection object to be usable.

pub mod atom;
pub mod core;
pub mod event;
pub mod input;
pub mod property;
pub mod traits;

/// Implementation of `XConn` backed by the `x11rb` library.
pub mod x11rb;
/// Implementation of `XConn` backed by the `xcb` library.
pub mod xcb;

#[doc(inline)]
pub use self::core::{
    ClientAttrs, CursorId, Result, Timestamp, XAtom, XConn, XError, XWindow, XWindowID, Xid,
    CURRENT_TIME,
};
#[doc(inline)]
pub use atom::{Atom, Atoms};
#[doc(inline)]
pub use event::{ClientMessageData, ClientMessageEvent, ConfigureEvent};
#[doc(inline)]
pub use property::{PropertyReply, WindowState};

#[doc(inline)]
pub use self::x11rb::X11RBConn;
#[doc(inline)]
pub use self::xcb::XCBConn;
#[doc(inline)]
pub use status::ConnStatus;
pub(crate) use status::{Initialized, Uninitialized};

/* since xconn implementations can only be tested
on a system with an X server running, disable this
unless we specifically enable the `protocol` cfg flag
which should only be be used if testing locally */

/* the dummy connection stands in for the server when
testing the window layer, so keep it enabled */
#[cfg(test)]
pub(crate) mod dummy;

pub mod status {
    //! Types for representing connection status.
    //!
    //! This module contains the [`ConnStatus`] sealed trait,
    //! as well as its two implementors, [`Initialized`] and
    //! [`Uninitialized`]. These are used to mark the state of
    //! the two connection objects, and act as guards to only
    //! expose [`XConn`](crate::x::XConn) methods when safe
    //! to do so.
    mod private {
        pub trait Sealed {}
    }

    /// A trait defining marker types `Unitialized` and `Initialized`.
    pub trait ConnStatus: private::Sealed {}

    /// A marker struct indicating a connection is uninitialized.
    ///
    /// Uninitialized connections do not expose any methods.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Uninitialized;

    impl ConnStatus for Uninitialized {}
    impl private::Sealed for Uninitialized {}

    /// A marker type indicating a connection is initialized and can be used.
    ///
    /// Initialized connections expose all available methods.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Initialized;

    impl ConnStatus for Initialized {}
    impl private::Sealed for Initialized {}
}
