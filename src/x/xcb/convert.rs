//! Conversions between this crate's and xcb types.

use xcb::x;
use xcb::{Xid as XCBid, XidNew};

use super::util::cast;
use crate::bindings::ButtonIndex;
use crate::types::Geometry;
use crate::x::{
    core::ClientAttrs,
    event::{ClientMessageData, ConfigureEvent},
    input::{ButtonGrabMode, ModMask},
};

impl From<ButtonIndex> for x::ButtonIndex {
    fn from(from: ButtonIndex) -> x::ButtonIndex {
        use ButtonIndex::*;

        match from {
            Left => x::ButtonIndex::N1,
            Middle => x::ButtonIndex::N2,
            Right => x::ButtonIndex::N3,
            Button4 => x::ButtonIndex::N4,
            Button5 => x::ButtonIndex::N5,
        }
    }
}

impl From<ModMask> for x::ModMask {
    fn from(from: ModMask) -> x::ModMask {
        x::ModMask::from_bits_truncate(from.bits() as u32)
    }
}

impl From<ButtonGrabMode> for x::GrabMode {
    fn from(from: ButtonGrabMode) -> x::GrabMode {
        match from {
            ButtonGrabMode::Async => x::GrabMode::Async,
            ButtonGrabMode::Sync => x::GrabMode::Sync,
        }
    }
}

impl From<ClientMessageData> for x::ClientMessageData {
    fn from(from: ClientMessageData) -> x::ClientMessageData {
        use ClientMessageData::*;

        match from {
            U8(bytes) => x::ClientMessageData::Data8(bytes),
            U16(words) => x::ClientMessageData::Data16(words),
            U32(dwords) => x::ClientMessageData::Data32(dwords),
        }
    }
}

/// Converts window attributes into a value list.
///
/// The server expects the list ordered by attribute bit, so borders
/// always come before cursors regardless of input order.
pub(super) fn attrs_to_cw(attrs: &[ClientAttrs]) -> Vec<x::Cw> {
    let mut border = None;
    let mut cursor = None;

    for attr in attrs {
        match attr {
            ClientAttrs::BorderColour(c) => border = Some(x::Cw::BorderPixel(c.as_u32())),
            ClientAttrs::Cursor(id) => cursor = Some(x::Cw::Cursor(cast!(x::Cursor, **id))),
        }
    }

    border.into_iter().chain(cursor).collect()
}

/// Converts a geometry and border width into a value list.
pub(super) fn geometry_to_config(geom: Geometry, border: u32) -> [x::ConfigWindow; 5] {
    [
        x::ConfigWindow::X(geom.x),
        x::ConfigWindow::Y(geom.y),
        x::ConfigWindow::Width(geom.width),
        x::ConfigWindow::Height(geom.height),
        x::ConfigWindow::BorderWidth(border),
    ]
}

pub(super) fn configure_notify(ev: &ConfigureEvent) -> x::ConfigureNotifyEvent {
    let window = cast!(x::Window, *ev.window);

    x::ConfigureNotifyEvent::new(
        window,
        window,
        x::Window::none(),
        ev.geom.x as i16,
        ev.geom.y as i16,
        ev.geom.width as u16,
        ev.geom.height as u16,
        ev.border as u16,
        false,
    )
}
