//! Conversions between this crate's and x11rb types.

use x11rb::protocol::xproto;

use crate::bindings::ButtonIndex;
use crate::x::{
    core::ClientAttrs,
    event::{ClientMessageData, ConfigureEvent},
    input::{ButtonGrabMode, ModMask},
};

//* button index conversions
#[doc(hidden)]
impl From<ButtonIndex> for xproto::ButtonIndex {
    fn from(from: ButtonIndex) -> xproto::ButtonIndex {
        use ButtonIndex::*;

        match from {
            Left => xproto::ButtonIndex::M1,
            Middle => xproto::ButtonIndex::M2,
            Right => xproto::ButtonIndex::M3,
            Button4 => xproto::ButtonIndex::M4,
            Button5 => xproto::ButtonIndex::M5,
        }
    }
}

//* modifier mask conversions
#[doc(hidden)]
impl From<ModMask> for xproto::ModMask {
    fn from(from: ModMask) -> xproto::ModMask {
        xproto::ModMask::from(from.bits())
    }
}

#[doc(hidden)]
impl From<xproto::ModMask> for ModMask {
    fn from(from: xproto::ModMask) -> ModMask {
        ModMask::from_bits_truncate(from.bits())
    }
}

#[doc(hidden)]
impl From<ButtonGrabMode> for xproto::GrabMode {
    fn from(from: ButtonGrabMode) -> xproto::GrabMode {
        match from {
            ButtonGrabMode::Async => xproto::GrabMode::ASYNC,
            ButtonGrabMode::Sync => xproto::GrabMode::SYNC,
        }
    }
}

//* window attributes
pub(super) fn attrs_to_aux(attrs: &[ClientAttrs]) -> xproto::ChangeWindowAttributesAux {
    attrs
        .iter()
        .fold(xproto::ChangeWindowAttributesAux::new(), |aux, attr| match attr {
            ClientAttrs::BorderColour(c) => aux.border_pixel(c.as_u32()),
            ClientAttrs::Cursor(cursor) => aux.cursor(**cursor),
        })
}

//* events
pub(super) fn configure_notify(event: &ConfigureEvent) -> xproto::ConfigureNotifyEvent {
    let ConfigureEvent {
        window,
        geom,
        border,
        ..
    } = *event;

    xproto::ConfigureNotifyEvent {
        response_type: xproto::CONFIGURE_NOTIFY_EVENT,
        sequence: 0,
        event: *window,
        window: *window,
        above_sibling: x11rb::NONE,
        x: geom.x as i16,
        y: geom.y as i16,
        width: geom.width as u16,
        height: geom.height as u16,
        border_width: border as u16,
        override_redirect: false,
    }
}

impl From<ClientMessageData> for xproto::ClientMessageData {
    fn from(from: ClientMessageData) -> xproto::ClientMessageData {
        match from {
            ClientMessageData::U8(bytes) => bytes.into(),
            ClientMessageData::U16(words) => words.into(),
            ClientMessageData::U32(dwords) => dwords.into(),
        }
    }
}
