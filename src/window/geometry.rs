//! Applying geometry to windows.
//!
//! The server only generates a `ConfigureNotify` when a configure
//! request actually changes something. Clients and compositors rely
//! on getting one after every configure the window manager makes, so
//! when nothing would change we send a synthetic one ourselves, as
//! ICCCM section 4.1.5 describes.

use tracing::warn;

use crate::context::XContext;
use crate::types::Geometry;
use crate::x::{
    core::{XConn, XWindowID},
    event::ConfigureEvent,
};

/// Applies a geometry and border width to a window.
///
/// The configure request is always sent. Exactly one `ConfigureNotify`
/// reaches the client per call:
///
/// - If the recorded values already match, the server stays silent,
///   so a synthetic notification follows the request.
/// - Otherwise the server notifies the client itself.
///
/// A window that was never registered is adopted first, which waits
/// on the server for its current geometry. If that fails the window
/// is most likely gone, and the request is sent without a synthetic
/// notification.
///
/// Zero dimensions are raised to 1, since the server rejects them.
/// Destroyed windows are skipped.
pub fn configure<X: XConn>(ctx: &XContext<X>, window: XWindowID, geom: Geometry, border: u32) {
    if !ctx.is_live(window) {
        trace!("Not configuring destroyed window {}", window);
        return;
    }

    let geom = if geom.is_empty() {
        warn!("Zero-sized geometry {} for window {}, clamping", geom, window);
        geom.at_least_one()
    } else {
        geom
    };

    if ctx.slot(window).is_none() {
        trace!("Adopting unregistered window {}", window);
        if let Err(e) = ctx.adopt(window) {
            trace!("Could not fetch geometry of {}: {}", window, e);
        }
    }
    let unchanged = ctx
        .slot(window)
        .map(|slot| slot.geom == geom && slot.border == border);

    trace!("Configuring {} to {} with border {}", window, geom, border);
    if let Err(e) = ctx.conn().configure_window(window, geom, border) {
        warn!("Could not configure window {}: {}", window, e);
        return;
    }

    match unchanged {
        Some(true) => {
            trace!("Geometry of {} unchanged, sending synthetic notify", window);
            send_synthetic(ctx, window, geom, border);
        }
        Some(false) => {
            ctx.record(window, geom, border);
        }
        None => {}
    }
}

fn send_synthetic<X: XConn>(ctx: &XContext<X>, window: XWindowID, geom: Geometry, border: u32) {
    let event = ConfigureEvent::synthetic(window, geom, border);
    if let Err(e) = ctx.conn().send_configure_notify(event) {
        warn!("Could not send synthetic configure to {}: {}", window, e);
    }
}
