//! # xwindow
//!
//! The layer of an X window manager that turns intents about client
//! windows into requests against the X server.
//!
//! A window manager decides where windows go, which one has focus and
//! what the key bindings are. This crate carries out those decisions:
//!
//! - [`state`](window::state): reading and writing ICCCM `WM_STATE`.
//! - [`geometry`](window::geometry): configuring windows, with the
//!   synthetic `ConfigureNotify` ICCCM asks for when nothing changed.
//! - [`grab`](window::grab): passive key and button grabs that work
//!   regardless of Caps Lock or Num Lock.
//! - [`focus`](window::focus): the `WM_TAKE_FOCUS` protocol.
//! - [`opacity`](window::opacity): `_NET_WM_WINDOW_OPACITY`.
//! - [`visual`](window::visual): border colours and cursors.
//!
//! All of these work through an [`XContext`], which owns a connection
//! implementing [`XConn`](x::XConn). Two connections are provided,
//! one backed by `x11rb` and one by `xcb`.
//!
//! ```no_run
//! use xwindow::{window, x11rb_backed, Config};
//! use xwindow::types::Geometry;
//! use xwindow::x::{WindowState, Xid};
//!
//! let ctx = x11rb_backed(Config::default()).expect("could not connect");
//! let win = Xid::from(0x200001);
//!
//! window::set_state(&ctx, win, WindowState::Normal);
//! window::configure(&ctx, win, Geometry::new(0, 0, 800, 600), 2);
//!
//! let pending = window::get_state_request(&ctx, win);
//! assert_eq!(window::get_state_reply(&ctx, pending), Some(WindowState::Normal));
//! ```

#[macro_use]
mod log;

pub mod bindings;
pub mod context;
pub mod types;
pub mod window;
pub mod x;

#[doc(inline)]
pub use crate::context::{Config, XContext};
pub use crate::x::core::Result as XResult;

use crate::x::{status::Initialized, x11rb::X11RBConn, xcb::XCBConn};

/// Convenience function for creating an x11rb-backed context.
pub fn x11rb_backed(config: Config) -> XResult<XContext<X11RBConn<Initialized>>> {
    let conn = X11RBConn::new()?;
    XContext::new(conn, config)
}

/// Convenience function for creating an XCB-backed context.
pub fn xcb_backed(config: Config) -> XResult<XContext<XCBConn<Initialized>>> {
    let conn = XCBConn::new()?;
    XContext::new(conn, config)
}
