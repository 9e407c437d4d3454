//! X atoms used by this crate, and storage for interned atoms.

use std::collections::HashMap;
use std::str::FromStr;

use strum::*;

use super::core::XAtom;

/// Internal representations of the X atoms this crate works with.
///
/// This allows for some measure of type safety around dealing with atoms.
/// Every variant is interned when a connection is initialized.
#[derive(AsRefStr, Display, EnumString, EnumIter, Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Atom {
    /// CARDINAL
    #[strum(serialize = "CARDINAL")]
    Cardinal,
    /// WM_STATE
    #[strum(serialize = "WM_STATE")]
    WmState,
    /// WM_PROTOCOLS
    #[strum(serialize = "WM_PROTOCOLS")]
    WmProtocols,
    /// WM_TAKE_FOCUS
    #[strum(serialize = "WM_TAKE_FOCUS")]
    WmTakeFocus,
    /// _NET_WM_WINDOW_OPACITY
    #[strum(serialize = "_NET_WM_WINDOW_OPACITY")]
    NetWmWindowOpacity,
}

/// Storage for interned atoms.
///
/// Atoms known to this crate are stored by their [`Atom`] variant,
/// anything else by name.
#[derive(Debug, Clone, Default)]
pub struct Atoms {
    /// Known atoms that can be managed as their enum variants.
    known: HashMap<Atom, XAtom>,
    /// Unknown atoms that have to be managed as strings.
    interned: HashMap<String, XAtom>,
}

impl Atoms {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an atom value under its name.
    pub fn insert(&mut self, atom: &str, val: XAtom) {
        if let Ok(known) = Atom::from_str(atom) {
            self.known.insert(known, val);
        } else {
            self.interned.insert(atom.into(), val);
        }
    }

    /// Looks up the value of an atom by its name.
    pub fn retrieve(&self, atom: &str) -> Option<XAtom> {
        if let Ok(known) = Atom::from_str(atom) {
            self.known.get(&known).copied()
        } else {
            self.interned.get(atom).copied()
        }
    }

    /// Looks up the name of an atom by its value.
    pub fn retrieve_by_value(&self, atom: XAtom) -> Option<String> {
        if let Some((known, _)) = self.known.iter().find(|(_, v)| **v == atom) {
            Some(known.to_string())
        } else {
            self.interned
                .iter()
                .find(|(_, v)| **v == atom)
                .map(|(k, _)| k.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x::Xid;

    #[test]
    fn test_atom_names() {
        assert_eq!(Atom::WmState.as_ref(), "WM_STATE");
        assert_eq!(Atom::NetWmWindowOpacity.to_string(), "_NET_WM_WINDOW_OPACITY");
        assert_eq!(Atom::from_str("WM_TAKE_FOCUS").unwrap(), Atom::WmTakeFocus);
    }

    #[test]
    fn test_atoms_storage() {
        let mut atoms = Atoms::new();
        atoms.insert("WM_STATE", Xid(300));
        atoms.insert("_MY_ATOM", Xid(301));

        assert_eq!(atoms.retrieve(Atom::WmState.as_ref()), Some(Xid(300)));
        assert_eq!(atoms.retrieve("_MY_ATOM"), Some(Xid(301)));
        assert_eq!(atoms.retrieve("WM_PROTOCOLS"), None);
        assert_eq!(atoms.retrieve_by_value(Xid(301)).as_deref(), Some("_MY_ATOM"));
        assert_eq!(atoms.retrieve_by_value(Xid(300)).as_deref(), Some("WM_STATE"));
    }
}
