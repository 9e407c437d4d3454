//! Reading and writing a window's ICCCM lifecycle state.
//!
//! The state lives in the `WM_STATE` property. Writes are sent and
//! forgotten. Reads are split in two, so a caller scanning many
//! windows can send every request before waiting on any reply:
//!
//! ```rust,ignore
//! let cookies: Vec<_> = windows
//!     .iter()
//!     .map(|w| state::get_state_request(&ctx, *w))
//!     .collect();
//!
//! for cookie in cookies {
//!     let state = state::get_state_reply(&ctx, cookie).unwrap_or_default();
//! }
//! ```

use tracing::{debug, warn};

use crate::context::XContext;
use crate::x::{
    core::{XConn, XWindowID},
    property::WindowState,
};

/// Sets the lifecycle state of a window.
///
/// Nothing is sent for windows that have been destroyed.
pub fn set_state<X: XConn>(ctx: &XContext<X>, window: XWindowID, state: WindowState) {
    if !ctx.is_live(window) {
        trace!("Not setting state on destroyed window {}", window);
        return;
    }

    let wm_state = ctx.atoms().wm_state;
    trace!("Setting state of {} to {}", window, state);
    if let Err(e) = ctx
        .conn()
        .change_property(window, wm_state, wm_state, &state.encode())
    {
        warn!("Could not send WM_STATE for {}: {}", window, e);
    }
}

/// A pending read of a window's lifecycle state.
///
/// Returned by [`get_state_request`] and consumed by
/// [`get_state_reply`].
#[must_use = "the state is only read when the cookie is passed to get_state_reply"]
pub struct StateCookie<'a, X: XConn + 'a> {
    window: XWindowID,
    cookie: Option<X::PropertyCookie<'a>>,
}

impl<'a, X: XConn + 'a> StateCookie<'a, X> {
    /// The window this read is for.
    pub fn window(&self) -> XWindowID {
        self.window
    }
}

/// Requests the lifecycle state of a window, without waiting for
/// the server to reply.
pub fn get_state_request<X: XConn>(ctx: &XContext<X>, window: XWindowID) -> StateCookie<'_, X> {
    if !ctx.is_live(window) {
        trace!("Not reading state of destroyed window {}", window);
        return StateCookie {
            window,
            cookie: None,
        };
    }

    let wm_state = ctx.atoms().wm_state;
    let cookie = match ctx
        .conn()
        .get_property_unchecked(window, wm_state, wm_state)
    {
        Ok(cookie) => Some(cookie),
        Err(e) => {
            warn!("Could not request WM_STATE for {}: {}", window, e);
            None
        }
    };

    StateCookie { window, cookie }
}

/// Waits for a lifecycle state read to complete.
///
/// Returns None if the state is unknown: the property is absent or
/// malformed, the read failed, or the window was destroyed. Callers
/// should treat that as [`WindowState::Withdrawn`], which is what
/// `unwrap_or_default` gives.
pub fn get_state_reply<'a, X: XConn>(
    ctx: &'a XContext<X>,
    cookie: StateCookie<'a, X>,
) -> Option<WindowState> {
    let StateCookie { window, cookie } = cookie;
    let reply = match ctx.conn().property_reply(cookie?) {
        Ok(reply) => reply,
        Err(e) => {
            trace!("WM_STATE read on {} failed: {}", window, e);
            return None;
        }
    };

    if !ctx.is_live(window) {
        trace!("Window {} was destroyed while reading its state", window);
        return None;
    }

    let reply = reply?;
    let state = WindowState::decode(&reply, ctx.atoms().wm_state);
    if state.is_none() {
        debug!("Malformed WM_STATE on {}: {}", window, reply);
    }
    state
}

/// Reads the lifecycle state of a window, waiting for the reply.
pub fn get_state<X: XConn>(ctx: &XContext<X>, window: XWindowID) -> Option<WindowState> {
    let cookie = get_state_request(ctx, window);
    get_state_reply(ctx, cookie)
}

/// Reads the lifecycle state of many windows.
///
/// Every request is sent before any reply is waited on.
pub fn scan_states<X: XConn>(
    ctx: &XContext<X>,
    windows: &[XWindowID],
) -> Vec<(XWindowID, Option<WindowState>)> {
    let cookies: Vec<StateCookie<'_, X>> = windows
        .iter()
        .map(|w| get_state_request(ctx, *w))
        .collect();

    if let Err(e) = ctx.conn().flush() {
        warn!("Could not flush state requests: {}", e);
    }

    cookies
        .into_iter()
        .map(|cookie| {
            let window = cookie.window();
            (window, get_state_reply(ctx, cookie))
        })
        .collect()
}
