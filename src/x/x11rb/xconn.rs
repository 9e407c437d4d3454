use byteorder::{LittleEndian, WriteBytesExt};

use x11rb::connection::Connection;
use x11rb::cookie::Cookie;
use x11rb::protocol::xproto::{self, ConnectionExt as XConnectionExt, EventMask, GrabMode};
use x11rb::rust_connection::RustConnection;

use tracing::instrument;

use super::{convert, X11RBConn, MAX_LONG_LENGTH};
use crate::bindings::{Keybind, Mousebind};
use crate::types::Geometry;
use crate::x::{
    core::{ClientAttrs, Result, XAtom, XConn, XError, XWindow, XWindowID},
    event::{ClientMessageEvent, ConfigureEvent},
    input::{ButtonGrabMode, KeyboardMapping, ModifierMapping},
    property::PropertyReply,
    Initialized,
};

impl XConn for X11RBConn<Initialized> {
    type PropertyCookie<'a> = Cookie<'a, RustConnection, xproto::GetPropertyReply>;

    // General X server operations
    fn get_root(&self) -> XWindow {
        self.root
    }

    #[cfg_attr(debug_assertions, instrument(target = "xconn", level = "trace", skip(self)))]
    fn query_tree(&self, window: XWindowID) -> Result<Vec<XWindowID>> {
        Ok(self
            .conn
            .query_tree(*window)?
            .reply()?
            .children
            .into_iter()
            .map(XWindowID::from)
            .collect())
    }

    #[cfg_attr(debug_assertions, instrument(target = "xconn", level = "trace", skip(self)))]
    fn get_geometry(&self, window: XWindowID) -> Result<(Geometry, u32)> {
        self.get_geometry_inner(window)
    }

    fn atom(&self, atom: &str) -> Result<XAtom> {
        if let Some(known) = self.atoms.borrow().retrieve(atom) {
            return Ok(known);
        }

        trace!("Interning atom {}", atom);
        let interned = XAtom::from(self.conn.intern_atom(false, atom.as_bytes())?.reply()?.atom);
        if let Ok(mut atoms) = self.atoms.try_borrow_mut() {
            atoms.insert(atom, interned);
        }
        Ok(interned)
    }

    fn lookup_atom(&self, atom: XAtom) -> Result<String> {
        trace!("Looking up atom {}", atom);
        if let Some(name) = self.atoms.borrow().retrieve_by_value(atom) {
            return Ok(name);
        }
        let name = self.conn.get_atom_name(*atom)?.reply()?.name;
        String::from_utf8(name).map_err(|e| XError::OtherError(e.to_string()))
    }

    fn flush(&self) -> Result<()> {
        self.conn.flush()?;
        Ok(())
    }

    // Properties
    fn change_property(
        &self,
        window: XWindowID,
        prop: XAtom,
        ty: XAtom,
        data: &[u32],
    ) -> Result<()> {
        let mut bytes = Vec::with_capacity(data.len() * 4);
        for dword in data {
            bytes.write_u32::<LittleEndian>(*dword)?;
        }

        self.conn.change_property(
            xproto::PropMode::REPLACE,
            *window,
            *prop,
            *ty,
            32,
            data.len() as u32,
            &bytes,
        )?;
        Ok(())
    }

    fn delete_property(&self, window: XWindowID, prop: XAtom) -> Result<()> {
        self.conn.delete_property(*window, *prop)?;
        Ok(())
    }

    fn get_property_unchecked(
        &self,
        window: XWindowID,
        prop: XAtom,
        ty: XAtom,
    ) -> Result<Self::PropertyCookie<'_>> {
        Ok(self
            .conn
            .get_property(false, *window, *prop, *ty, 0, MAX_LONG_LENGTH)?)
    }

    fn property_reply<'a>(
        &'a self,
        cookie: Self::PropertyCookie<'a>,
    ) -> Result<Option<PropertyReply>> {
        let reply = cookie.reply()?;

        if reply.type_ == x11rb::NONE {
            return Ok(None);
        }

        // only format 32 data is read by the window layer
        let value = match reply.value32() {
            Some(dwords) => dwords.collect(),
            None => Vec::new(),
        };

        Ok(Some(PropertyReply::new(
            XAtom::from(reply.type_),
            reply.format,
            value,
        )))
    }

    // Window-related operations
    fn configure_window(&self, window: XWindowID, geom: Geometry, border: u32) -> Result<()> {
        let aux = xproto::ConfigureWindowAux::new()
            .x(geom.x)
            .y(geom.y)
            .width(geom.width)
            .height(geom.height)
            .border_width(border);

        self.conn.configure_window(*window, &aux)?;
        Ok(())
    }

    fn send_configure_notify(&self, event: ConfigureEvent) -> Result<()> {
        let notify = convert::configure_notify(&event);

        self.conn
            .send_event(false, *event.window, EventMask::STRUCTURE_NOTIFY, notify)?;
        Ok(())
    }

    fn send_client_message(&self, window: XWindowID, data: ClientMessageEvent) -> Result<()> {
        let format = data.data.format();
        let to_send: xproto::ClientMessageData = data.data.into();

        let event = xproto::ClientMessageEvent::new(format, *data.window, *data.type_, to_send);

        self.conn
            .send_event(false, *window, EventMask::NO_EVENT, event)?;
        Ok(())
    }

    fn change_window_attributes(&self, window: XWindowID, attrs: &[ClientAttrs]) -> Result<()> {
        let aux = convert::attrs_to_aux(attrs);

        self.conn.change_window_attributes(*window, &aux)?;
        Ok(())
    }

    // Input
    fn grab_key(&self, kb: Keybind, window: XWindowID) -> Result<()> {
        self.conn.grab_key(
            false,
            *window,
            kb.modmask().into(),
            kb.code(),
            GrabMode::ASYNC,
            GrabMode::ASYNC,
        )?;
        Ok(())
    }

    fn ungrab_all_keys(&self, window: XWindowID) -> Result<()> {
        self.conn
            .ungrab_key(xproto::Grab::ANY, *window, xproto::ModMask::ANY)?;
        Ok(())
    }

    fn grab_button(&self, mb: Mousebind, window: XWindowID, mode: ButtonGrabMode) -> Result<()> {
        self.conn.grab_button(
            false,
            *window,
            EventMask::BUTTON_PRESS | EventMask::BUTTON_RELEASE | EventMask::BUTTON_MOTION,
            mode.into(),
            GrabMode::ASYNC,
            x11rb::NONE,
            x11rb::NONE,
            mb.button().into(),
            mb.modmask().into(),
        )?;
        Ok(())
    }

    fn ungrab_all_buttons(&self, window: XWindowID) -> Result<()> {
        self.conn
            .ungrab_button(xproto::ButtonIndex::ANY, *window, xproto::ModMask::ANY)?;
        Ok(())
    }

    #[cfg_attr(debug_assertions, instrument(target = "xconn", level = "trace", skip(self)))]
    fn modifier_mapping(&self) -> Result<ModifierMapping> {
        let reply = self.conn.get_modifier_mapping()?.reply()?;

        Ok(ModifierMapping::new(
            reply.keycodes_per_modifier() as usize,
            reply.keycodes,
        ))
    }

    #[cfg_attr(debug_assertions, instrument(target = "xconn", level = "trace", skip(self)))]
    fn keyboard_mapping(&self) -> Result<KeyboardMapping> {
        let setup = self.conn.setup();
        let (min, max) = (setup.min_keycode, setup.max_keycode);

        let reply = self
            .conn
            .get_keyboard_mapping(min, max - min + 1)?
            .reply()?;

        Ok(KeyboardMapping::new(
            min,
            reply.keysyms_per_keycode as usize,
            reply.keysyms,
        ))
    }
}
