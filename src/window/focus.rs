//! The ICCCM `WM_TAKE_FOCUS` protocol.
//!
//! Clients that take part in the protocol decide for themselves how to
//! accept focus when asked. This is sent alongside, never instead of,
//! a regular `SetInputFocus` from whoever decided to move the focus.

use tracing::warn;

use crate::context::XContext;
use crate::x::{
    core::{XConn, XWindowID},
    event::{ClientMessageData, ClientMessageEvent},
};

/// Asks a client to take input focus.
///
/// The message carries the latest server time recorded on the
/// context, as ICCCM requires a real timestamp rather than
/// `CurrentTime` where one is known.
pub fn takefocus<X: XConn>(ctx: &XContext<X>, window: XWindowID) {
    if !ctx.is_live(window) {
        trace!("Not sending WM_TAKE_FOCUS to destroyed window {}", window);
        return;
    }

    let atoms = ctx.atoms();
    let time = ctx.timestamp();
    let event = ClientMessageEvent {
        window,
        data: ClientMessageData::U32([atoms.wm_take_focus.val(), time, 0, 0, 0]),
        type_: atoms.wm_protocols,
    };

    trace!("Sending WM_TAKE_FOCUS to {} at time {}", window, time);
    if let Err(e) = ctx.conn().send_client_message(window, event) {
        warn!("Could not send WM_TAKE_FOCUS to {}: {}", window, e);
    }
}
