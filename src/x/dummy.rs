#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use strum::*;

use crate::bindings::{ButtonIndex, Keybind, Mousebind};
use crate::types::{Color, Geometry};
use crate::x::{
    atom::{Atom, Atoms},
    core::{ClientAttrs, CursorId, Result, XAtom, XConn, XError, XWindow, XWindowID, Xid},
    event::{ClientMessageEvent, ConfigureEvent},
    input::{ButtonGrabMode, KeyCode, KeyboardMapping, ModMask, ModifierMapping},
    property::PropertyReply,
};

/// A request as it was received by the `DummyConn`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Request {
    ChangeProperty(XWindowID, XAtom),
    DeleteProperty(XWindowID, XAtom),
    GetProperty(XWindowID, XAtom),
    Configure(XWindowID, Geometry, u32),
    SendConfigureNotify(XWindowID),
    ClientMessage(XWindowID),
    ChangeAttributes(XWindowID),
    GrabKey(XWindowID, ModMask, KeyCode),
    UngrabAllKeys(XWindowID),
    GrabButton(XWindowID, ModMask, ButtonIndex, ButtonGrabMode),
    UngrabAllButtons(XWindowID),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Grab {
    Key(XWindowID, ModMask, KeyCode),
    Button(XWindowID, ModMask, ButtonIndex),
}

#[derive(Debug, Clone, Default)]
struct DummyWindow {
    geom: Geometry,
    border: u32,
    props: HashMap<XAtom, PropertyReply>,
    border_color: Option<Color>,
    cursor: Option<CursorId>,
}

/// A pending property read on a `DummyConn`.
///
/// The reply is captured when the request is made, the same way
/// the server answers requests in the order it receives them.
#[derive(Debug)]
pub(crate) struct DummyCookie {
    reply: Result<Option<PropertyReply>>,
}

/// A dummy connection implementing XConn but actually
/// does not interface with the X server at all, and
/// should mainly be used for testing.
///
/// `DummyConn` holds an in-memory model of the server state the
/// window layer touches: window geometry and properties, passive
/// grabs, and the events sent to clients. Every request is logged
/// so tests can count exactly what went over the wire.
pub(crate) struct DummyConn {
    root: XWindow,
    atoms: RefCell<Atoms>,
    next_atom: Cell<u32>,
    windows: RefCell<HashMap<XWindowID, DummyWindow>>,
    grabs: RefCell<HashSet<Grab>>,
    foreign: HashSet<Grab>,
    mappings: Option<(ModifierMapping, KeyboardMapping)>,
    requests: RefCell<Vec<Request>>,
    notifies: RefCell<Vec<ConfigureEvent>>,
    messages: RefCell<Vec<ClientMessageEvent>>,
    errors: RefCell<Vec<String>>,
}

impl DummyConn {
    /// Creates a new DummyConn with a 1920x1080 root window and
    /// every known atom interned.
    pub fn new() -> Self {
        let conn = Self {
            root: XWindow::with_data(Xid(1), Geometry::new(0, 0, 1920, 1080)),
            atoms: RefCell::new(Atoms::new()),
            next_atom: Cell::new(100),
            windows: RefCell::new(HashMap::new()),
            grabs: RefCell::new(HashSet::new()),
            foreign: HashSet::new(),
            mappings: None,
            requests: RefCell::new(Vec::new()),
            notifies: RefCell::new(Vec::new()),
            messages: RefCell::new(Vec::new()),
            errors: RefCell::new(Vec::new()),
        };
        for atom in Atom::iter() {
            conn.intern(atom.as_ref());
        }
        conn
    }

    /// Makes the server report these mappings for lock discovery.
    ///
    /// Without mappings, discovery fails.
    pub fn with_mappings(mut self, modmap: ModifierMapping, keymap: KeyboardMapping) -> Self {
        self.mappings = Some((modmap, keymap));
        self
    }

    /// Creates a window on the server.
    pub fn add_window(&self, id: u32, geom: Geometry, border: u32) -> XWindowID {
        let id = Xid(id);
        self.windows.borrow_mut().insert(
            id,
            DummyWindow {
                geom,
                border,
                ..Default::default()
            },
        );
        id
    }

    /// Destroys a window on the server.
    pub fn destroy(&self, id: XWindowID) {
        self.windows.borrow_mut().remove(&id);
        self.grabs.borrow_mut().retain(|g| match g {
            Grab::Key(w, ..) | Grab::Button(w, ..) => *w != id,
        });
    }

    /// Marks a key combination as grabbed by another client.
    pub fn add_foreign_key_grab(&mut self, window: XWindowID, modmask: ModMask, code: KeyCode) {
        self.foreign.insert(Grab::Key(window, modmask, code));
    }

    /// Marks a button combination as grabbed by another client.
    pub fn add_foreign_button_grab(
        &mut self,
        window: XWindowID,
        modmask: ModMask,
        button: ButtonIndex,
    ) {
        self.foreign.insert(Grab::Button(window, modmask, button));
    }

    /// Returns the value of an interned atom.
    pub fn atom_of(&self, atom: Atom) -> XAtom {
        self.intern(atom.as_ref())
    }

    /// Stores raw property data, bypassing the request log.
    pub fn put_property(&self, window: XWindowID, prop: XAtom, reply: PropertyReply) {
        if let Some(win) = self.windows.borrow_mut().get_mut(&window) {
            win.props.insert(prop, reply);
        }
    }

    /// Returns the stored value of a property.
    pub fn property(&self, window: XWindowID, prop: XAtom) -> Option<PropertyReply> {
        self.windows
            .borrow()
            .get(&window)
            .and_then(|w| w.props.get(&prop).cloned())
    }

    /// Returns the geometry and border width of a window.
    pub fn geometry(&self, window: XWindowID) -> Option<(Geometry, u32)> {
        self.windows.borrow().get(&window).map(|w| (w.geom, w.border))
    }

    pub fn border_color(&self, window: XWindowID) -> Option<Color> {
        self.windows.borrow().get(&window).and_then(|w| w.border_color)
    }

    pub fn cursor(&self, window: XWindowID) -> Option<CursorId> {
        self.windows.borrow().get(&window).and_then(|w| w.cursor)
    }

    /// Returns the key grabs this client holds on a window.
    pub fn key_grabs(&self, window: XWindowID) -> Vec<(ModMask, KeyCode)> {
        self.grabs
            .borrow()
            .iter()
            .filter_map(|g| match g {
                Grab::Key(w, m, c) if *w == window => Some((*m, *c)),
                _ => None,
            })
            .collect()
    }

    /// Returns the button grabs this client holds on a window.
    pub fn button_grabs(&self, window: XWindowID) -> Vec<(ModMask, ButtonIndex)> {
        self.grabs
            .borrow()
            .iter()
            .filter_map(|g| match g {
                Grab::Button(w, m, b) if *w == window => Some((*m, *b)),
                _ => None,
            })
            .collect()
    }

    /// Returns every request received so far.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    /// Counts the requests matching `pred`.
    pub fn count_requests<F: Fn(&Request) -> bool>(&self, pred: F) -> usize {
        self.requests.borrow().iter().filter(|r| pred(r)).count()
    }

    pub fn clear_requests(&self) {
        self.requests.borrow_mut().clear();
    }

    /// Returns every ConfigureNotify delivered, real or synthetic.
    pub fn configure_notifies(&self) -> Vec<ConfigureEvent> {
        self.notifies.borrow().clone()
    }

    /// Returns every client message delivered.
    pub fn client_messages(&self) -> Vec<ClientMessageEvent> {
        self.messages.borrow().clone()
    }

    /// Returns the errors the server generated for requests that
    /// were sent without waiting, in the order they occurred.
    pub fn async_errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    fn log(&self, req: Request) {
        self.requests.borrow_mut().push(req);
    }

    fn exists(&self, window: XWindowID) -> bool {
        self.windows.borrow().contains_key(&window)
    }

    fn intern(&self, name: &str) -> XAtom {
        if let Some(atom) = self.atoms.borrow().retrieve(name) {
            return atom;
        }
        let atom = Xid(self.next_atom.get());
        self.next_atom.set(atom.val() + 1);
        self.atoms.borrow_mut().insert(name, atom);
        atom
    }

    // a conflicting grab is not installed, but the request itself
    // goes through; the BadAccess only shows up later
    fn grab(&self, grab: Grab) -> Result<()> {
        if self.foreign.contains(&grab) {
            self.errors
                .borrow_mut()
                .push(format!("BadAccess: {:?}", grab));
        } else {
            self.grabs.borrow_mut().insert(grab);
        }
        Ok(())
    }
}

impl XConn for DummyConn {
    type PropertyCookie<'a> = DummyCookie where Self: 'a;

    fn get_root(&self) -> XWindow {
        self.root
    }

    fn query_tree(&self, window: XWindowID) -> Result<Vec<XWindowID>> {
        if window != self.root.id {
            return Ok(Vec::new());
        }
        let mut ret: Vec<XWindowID> = self.windows.borrow().keys().copied().collect();
        ret.sort();
        Ok(ret)
    }

    fn get_geometry(&self, window: XWindowID) -> Result<(Geometry, u32)> {
        self.geometry(window)
            .ok_or_else(|| XError::ServerError(format!("BadDrawable: {}", window)))
    }

    fn atom(&self, atom: &str) -> Result<XAtom> {
        Ok(self.intern(atom))
    }

    fn lookup_atom(&self, atom: XAtom) -> Result<String> {
        self.atoms
            .borrow()
            .retrieve_by_value(atom)
            .ok_or_else(|| XError::ServerError(format!("BadAtom: {}", atom)))
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn change_property(
        &self,
        window: XWindowID,
        prop: XAtom,
        ty: XAtom,
        data: &[u32],
    ) -> Result<()> {
        self.log(Request::ChangeProperty(window, prop));
        self.put_property(window, prop, PropertyReply::new(ty, 32, data.to_vec()));
        Ok(())
    }

    fn delete_property(&self, window: XWindowID, prop: XAtom) -> Result<()> {
        self.log(Request::DeleteProperty(window, prop));
        if let Some(win) = self.windows.borrow_mut().get_mut(&window) {
            win.props.remove(&prop);
        }
        Ok(())
    }

    fn get_property_unchecked(
        &self,
        window: XWindowID,
        prop: XAtom,
        _ty: XAtom,
    ) -> Result<DummyCookie> {
        self.log(Request::GetProperty(window, prop));
        let reply = if self.exists(window) {
            Ok(self.property(window, prop))
        } else {
            Err(XError::ServerError(format!("BadWindow: {}", window)))
        };
        Ok(DummyCookie { reply })
    }

    fn property_reply<'a>(&'a self, cookie: DummyCookie) -> Result<Option<PropertyReply>> {
        cookie.reply
    }

    fn configure_window(&self, window: XWindowID, geom: Geometry, border: u32) -> Result<()> {
        self.log(Request::Configure(window, geom, border));
        let mut windows = self.windows.borrow_mut();
        if let Some(win) = windows.get_mut(&window) {
            if win.geom != geom || win.border != border {
                win.geom = geom;
                win.border = border;
                self.notifies.borrow_mut().push(ConfigureEvent {
                    window,
                    geom,
                    border,
                    synthetic: false,
                });
            }
        }
        Ok(())
    }

    fn send_configure_notify(&self, event: ConfigureEvent) -> Result<()> {
        self.log(Request::SendConfigureNotify(event.window));
        if self.exists(event.window) {
            self.notifies.borrow_mut().push(ConfigureEvent {
                synthetic: true,
                ..event
            });
        }
        Ok(())
    }

    fn send_client_message(&self, window: XWindowID, data: ClientMessageEvent) -> Result<()> {
        self.log(Request::ClientMessage(window));
        if self.exists(window) {
            self.messages.borrow_mut().push(data);
        }
        Ok(())
    }

    fn change_window_attributes(&self, window: XWindowID, attrs: &[ClientAttrs]) -> Result<()> {
        self.log(Request::ChangeAttributes(window));
        if let Some(win) = self.windows.borrow_mut().get_mut(&window) {
            for attr in attrs {
                match attr {
                    ClientAttrs::BorderColour(c) => win.border_color = Some(*c),
                    ClientAttrs::Cursor(c) => win.cursor = Some(*c),
                }
            }
        }
        Ok(())
    }

    fn grab_key(&self, kb: Keybind, window: XWindowID) -> Result<()> {
        self.log(Request::GrabKey(window, kb.modmask, kb.code));
        self.grab(Grab::Key(window, kb.modmask, kb.code))
    }

    fn ungrab_all_keys(&self, window: XWindowID) -> Result<()> {
        self.log(Request::UngrabAllKeys(window));
        self.grabs
            .borrow_mut()
            .retain(|g| !matches!(g, Grab::Key(w, ..) if *w == window));
        Ok(())
    }

    fn grab_button(&self, mb: Mousebind, window: XWindowID, mode: ButtonGrabMode) -> Result<()> {
        self.log(Request::GrabButton(window, mb.modmask, mb.button, mode));
        self.grab(Grab::Button(window, mb.modmask, mb.button))
    }

    fn ungrab_all_buttons(&self, window: XWindowID) -> Result<()> {
        self.log(Request::UngrabAllButtons(window));
        self.grabs
            .borrow_mut()
            .retain(|g| !matches!(g, Grab::Button(w, ..) if *w == window));
        Ok(())
    }

    fn modifier_mapping(&self) -> Result<ModifierMapping> {
        self.mappings
            .as_ref()
            .map(|(m, _)| m.clone())
            .ok_or_else(|| XError::RequestError("GetModifierMapping"))
    }

    fn keyboard_mapping(&self) -> Result<KeyboardMapping> {
        self.mappings
            .as_ref()
            .map(|(_, k)| k.clone())
            .ok_or_else(|| XError::RequestError("GetKeyboardMapping"))
    }
}
