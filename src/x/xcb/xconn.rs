//! Implementation of the XConn trait for XCBConn.

use xcb::x;
use xcb::{Xid as XCBid, XidNew};

use tracing::instrument;
use tracing::warn;

use super::{convert, util, XCBConn, MAX_LONG_LENGTH};
use super::util::{cast, id, req_and_reply, send};
use crate::bindings::{Keybind, Mousebind};
use crate::types::Geometry;
use crate::x::{
    core::{ClientAttrs, Result, XAtom, XConn, XWindow, XWindowID},
    event::{ClientMessageEvent, ConfigureEvent},
    input::{ButtonGrabMode, KeyboardMapping, ModifierMapping},
    property::PropertyReply,
    Initialized,
};

impl XConn for XCBConn<Initialized> {
    type PropertyCookie<'a> = x::GetPropertyCookie;

    // General X server operations
    fn get_root(&self) -> XWindow {
        self.root
    }

    #[cfg_attr(debug_assertions, instrument(target = "xconn", level = "trace", skip(self)))]
    fn query_tree(&self, window: XWindowID) -> Result<Vec<XWindowID>> {
        let res = req_and_reply!(
            self.conn,
            &x::QueryTree {
                window: cast!(x::Window, *window)
            } // get the reply and map its ok to grab its children
        )?;
        Ok(res.children().iter().map(|child| id!(child)).collect())
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
        let x = req_and_reply!(
            self.conn,
            &x::InternAtom {
                only_if_exists: false,
                name: atom.as_bytes()
            }
        )?;
        let interned = id!(x.atom());
        trace!("Atom name: {}, atom: {}", atom, interned);

        if let Ok(mut atoms) = self.atoms.try_borrow_mut() {
            atoms.insert(atom, interned);
        } else {
            warn!("Attempted borrow failed, could not store atom {}", atom);
        }
        Ok(interned)
    }

    fn lookup_atom(&self, atom: XAtom) -> Result<String> {
        trace!("Looking up atom {}", atom);
        if let Some(name) = self.atoms.borrow().retrieve_by_value(atom) {
            trace!("Got name {}", name);
            return Ok(name);
        }
        trace!("Name not known, looking up via X connection");
        let name = req_and_reply!(
            self.conn,
            &x::GetAtomName {
                atom: cast!(x::Atom, *atom)
            }
        )?
        .name()
        .to_string();

        trace!("Got name {}", name);
        if let Ok(mut atoms) = self.atoms.try_borrow_mut() {
            atoms.insert(&name, atom);
        } else {
            warn!("Attempted borrow failed, could not store atom {}", name);
        }

        Ok(name)
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
        send!(
            self.conn,
            &x::ChangeProperty {
                mode: x::PropMode::Replace,
                window: cast!(x::Window, *window),
                property: cast!(x::Atom, *prop),
                r#type: cast!(x::Atom, *ty),
                data,
            }
        )
    }

    fn delete_property(&self, window: XWindowID, prop: XAtom) -> Result<()> {
        send!(
            self.conn,
            &x::DeleteProperty {
                window: cast!(x::Window, *window),
                property: cast!(x::Atom, *prop),
            }
        )
    }

    fn get_property_unchecked(
        &self,
        window: XWindowID,
        prop: XAtom,
        ty: XAtom,
    ) -> Result<Self::PropertyCookie<'_>> {
        Ok(self.conn.send_request(&x::GetProperty {
            delete: false,
            window: cast!(x::Window, *window),
            property: cast!(x::Atom, *prop),
            r#type: cast!(x::Atom, *ty),
            long_offset: 0,
            long_length: MAX_LONG_LENGTH,
        }))
    }

    fn property_reply<'a>(
        &'a self,
        cookie: Self::PropertyCookie<'a>,
    ) -> Result<Option<PropertyReply>> {
        let reply = self.conn.wait_for_reply(cookie)?;

        if reply.r#type() == x::ATOM_NONE {
            return Ok(None);
        }

        // value() panics if the format does not match
        let value = if reply.format() == 32 {
            reply.value::<u32>().to_vec()
        } else {
            Vec::new()
        };

        Ok(Some(PropertyReply::new(
            id!(reply.r#type()),
            reply.format(),
            value,
        )))
    }

    // Window-related operations
    fn configure_window(&self, window: XWindowID, geom: Geometry, border: u32) -> Result<()> {
        trace!("Configuring window {} to {} border {}", window, geom, border);

        send!(
            self.conn,
            &x::ConfigureWindow {
                window: cast!(x::Window, *window),
                value_list: &convert::geometry_to_config(geom, border),
            }
        )
    }

    fn send_configure_notify(&self, event: ConfigureEvent) -> Result<()> {
        let notify = convert::configure_notify(&event);

        send!(
            self.conn,
            &x::SendEvent {
                propagate: false,
                destination: x::SendEventDest::Window(cast!(x::Window, *event.window)),
                event_mask: x::EventMask::STRUCTURE_NOTIFY,
                event: &notify,
            }
        )
    }

    fn send_client_message(&self, window: XWindowID, data: ClientMessageEvent) -> Result<()> {
        trace!("Sending client message to window {}", window);

        let event = x::ClientMessageEvent::new(
            cast!(x::Window, *data.window),
            cast!(x::Atom, *data.type_),
            data.data.into(),
        );

        send!(
            self.conn,
            &x::SendEvent {
                propagate: false,
                destination: x::SendEventDest::Window(cast!(x::Window, *window)),
                event_mask: x::EventMask::NO_EVENT,
                event: &event,
            }
        )
    }

    fn change_window_attributes(&self, window: XWindowID, attrs: &[ClientAttrs]) -> Result<()> {
        trace!("Changing window attributes");
        let attrs = convert::attrs_to_cw(attrs);

        send!(
            self.conn,
            &x::ChangeWindowAttributes {
                window: cast!(x::Window, *window),
                value_list: &attrs
            }
        )
    }

    // Input
    fn grab_key(&self, kb: Keybind, window: XWindowID) -> Result<()> {
        trace!("Grabbing key {} for window {}", kb.code(), window);

        send!(
            self.conn,
            &x::GrabKey {
                owner_events: false,
                grab_window: cast!(x::Window, *window),
                modifiers: kb.modmask().into(),
                key: kb.code(),
                pointer_mode: x::GrabMode::Async,
                keyboard_mode: x::GrabMode::Async,
            }
        )
    }

    fn ungrab_all_keys(&self, window: XWindowID) -> Result<()> {
        send!(
            self.conn,
            &x::UngrabKey {
                key: 0, // AnyKey
                grab_window: cast!(x::Window, *window),
                modifiers: x::ModMask::ANY,
            }
        )
    }

    fn grab_button(&self, mb: Mousebind, window: XWindowID, mode: ButtonGrabMode) -> Result<()> {
        trace!("Grab button {:?} for window: {}", mb.button(), window);

        send!(
            self.conn,
            &x::GrabButton {
                owner_events: false,
                grab_window: cast!(x::Window, *window),
                event_mask: util::BUTTON_GRAB_MASK,
                pointer_mode: mode.into(),
                keyboard_mode: x::GrabMode::Async,
                confine_to: x::Window::none(),
                cursor: x::Cursor::none(),
                button: mb.button().into(),
                modifiers: mb.modmask().into(),
            }
        )
    }

    fn ungrab_all_buttons(&self, window: XWindowID) -> Result<()> {
        send!(
            self.conn,
            &x::UngrabButton {
                button: x::ButtonIndex::Any,
                grab_window: cast!(x::Window, *window),
                modifiers: x::ModMask::ANY,
            }
        )
    }

    #[cfg_attr(debug_assertions, instrument(target = "xconn", level = "trace", skip(self)))]
    fn modifier_mapping(&self) -> Result<ModifierMapping> {
        let reply = req_and_reply!(self.conn, &x::GetModifierMapping {})?;

        Ok(ModifierMapping::new(
            reply.keycodes_per_modifier() as usize,
            reply.keycodes().to_vec(),
        ))
    }

    #[cfg_attr(debug_assertions, instrument(target = "xconn", level = "trace", skip(self)))]
    fn keyboard_mapping(&self) -> Result<KeyboardMapping> {
        let setup = self.conn.get_setup();
        let (min, max) = (setup.min_keycode(), setup.max_keycode());

        let reply = req_and_reply!(
            self.conn,
            &x::GetKeyboardMapping {
                first_keycode: min,
                count: max - min + 1,
            }
        )?;

        Ok(KeyboardMapping::new(
            min,
            reply.keysyms_per_keycode() as usize,
            reply.keysyms().to_vec(),
        ))
    }
}
