//! Types for working with keyboard and mouse input.
//!
//! Type definitions for the modifier masks defined by the X server
//! protocol, and the lock-modifier handling required to install
//! passive grabs that match regardless of Caps/Num/Scroll Lock state.
#![allow(missing_docs)] // so bitflags stops screaming at me

use bitflags::bitflags;
use tracing::debug;

use super::core::{Result, XConn};

//* Re-exports
/// Keysyms used by the X server.
pub mod keysym {
    /// A keysym, as defined by the X protocol specification.
    pub type KeySym = u32;
    pub use x11::keysym::{XK_Caps_Lock, XK_Num_Lock, XK_Scroll_Lock};
}

use keysym::KeySym;

/// A keycode as received from the X server.
pub type KeyCode = u8;

/// The number of modifiers defined by the core protocol.
pub const MODIFIER_COUNT: usize = 8;

bitflags! {

/// Bitmask representing one or a combination of modifier keys.
///
/// See definition in the X Server Protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModMask: u16 {
    /// The Shift key.
    const SHIFT   = 1 << 0;
    /// The Capslock key.
    const LOCK    = 1 << 1;
    /// The Control key.
    const CONTROL = 1 << 2;
    /// The Alt key.
    const MOD1    = 1 << 3;
    /// Usually the Numlock key.
    const MOD2    = 1 << 4;
    /// The MOD3 key, whatever the X server has assigned it to.
    const MOD3    = 1 << 5;
    /// The Super/Meta/Windows key.
    const MOD4    = 1 << 6;
    /// The MOD5 key, same as the MOD3 key.
    const MOD5    = 1 << 7;
}

}

impl ModMask {
    /// Returns the mask of the modifier at `index` (0 is Shift, 7 is Mod5).
    pub fn from_index(index: usize) -> Option<ModMask> {
        if index < MODIFIER_COUNT {
            ModMask::from_bits(1 << index)
        } else {
            None
        }
    }
}

/// How the pointer and keyboard behave while a button grab is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonGrabMode {
    /// Event processing continues normally.
    #[default]
    Async,
    /// The pointer freezes until the grabbing client releases it,
    /// so the click can be replayed to the window underneath.
    Sync,
}

/// The server's modifier mapping: which keycodes drive each of the
/// eight modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ModifierMapping {
    pub(crate) keycodes_per_modifier: usize,
    pub(crate) keycodes: Vec<KeyCode>,
}

impl ModifierMapping {
    /// Creates a mapping from the flat keycode list returned by
    /// `GetModifierMapping`.
    pub fn new(keycodes_per_modifier: usize, keycodes: Vec<KeyCode>) -> Self {
        Self {
            keycodes_per_modifier,
            keycodes,
        }
    }

    /// Returns the keycodes bound to the modifier at `index`.
    ///
    /// Unused slots (keycode 0) are filtered out.
    pub fn modifier(&self, index: usize) -> impl Iterator<Item = KeyCode> + '_ {
        let per = self.keycodes_per_modifier;
        self.keycodes
            .iter()
            .skip(index * per)
            .take(if index < MODIFIER_COUNT { per } else { 0 })
            .copied()
            .filter(|code| *code != 0)
    }
}

/// The server's keyboard mapping: the keysyms produced by each keycode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyboardMapping {
    pub(crate) min_keycode: KeyCode,
    pub(crate) keysyms_per_keycode: usize,
    pub(crate) keysyms: Vec<KeySym>,
}

impl KeyboardMapping {
    /// Creates a mapping from the flat keysym list returned by
    /// `GetKeyboardMapping`, starting at `min_keycode`.
    pub fn new(min_keycode: KeyCode, keysyms_per_keycode: usize, keysyms: Vec<KeySym>) -> Self {
        Self {
            min_keycode,
            keysyms_per_keycode,
            keysyms,
        }
    }

    /// Returns all keycodes that produce `sym` at any shift level.
    pub fn keycodes_for(&self, sym: KeySym) -> Vec<KeyCode> {
        if self.keysyms_per_keycode == 0 {
            return Vec::new();
        }
        self.keysyms
            .chunks(self.keysyms_per_keycode)
            .enumerate()
            .filter(|(_, syms)| syms.contains(&sym))
            .filter_map(|(i, _)| {
                u8::try_from(i + self.min_keycode as usize).ok()
            })
            .collect()
    }
}

/// The set of lock modifiers that must be ignored when matching
/// key and button bindings.
///
/// The X server reports lock modifiers (Caps Lock, Num Lock,
/// Scroll Lock) as part of the modifier state, so a passive grab
/// on `MOD4 + Return` does not fire while Num Lock is on unless
/// `MOD4 | MOD2 + Return` is grabbed as well. `LockMasks` expands a
/// binding's modifiers into every lock combination:
///
/// ```rust
/// use xwindow::x::input::{LockMasks, ModMask};
///
/// let locks = LockMasks::new(ModMask::LOCK | ModMask::MOD2);
/// let masks = locks.expand(ModMask::MOD4);
///
/// assert_eq!(masks.len(), 4);
/// assert!(masks.contains(&(ModMask::MOD4 | ModMask::LOCK | ModMask::MOD2)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockMasks {
    mask: ModMask,
}

impl Default for LockMasks {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl LockMasks {
    /// Caps Lock and the modifier Num Lock is almost always mapped to.
    ///
    /// Used when the server's mappings cannot be queried.
    pub const FALLBACK: LockMasks = LockMasks {
        mask: ModMask::LOCK.union(ModMask::MOD2),
    };

    /// Creates a set of lock masks from a modifier mask.
    pub fn new(mask: ModMask) -> Self {
        Self { mask }
    }

    /// A set that ignores nothing.
    pub fn none() -> Self {
        Self {
            mask: ModMask::empty(),
        }
    }

    /// The combined mask of all lock modifiers.
    pub fn mask(&self) -> ModMask {
        self.mask
    }

    /// The number of distinct lock modifiers.
    pub fn count(&self) -> u32 {
        self.mask.bits().count_ones()
    }

    /// Every combination of the lock modifiers being on or off,
    /// starting with all of them on and ending with none.
    ///
    /// Always contains exactly `2^count()` entries.
    pub fn variants(&self) -> Vec<ModMask> {
        let full = self.mask.bits();
        let mut ret = Vec::with_capacity(1 << self.count());
        let mut sub = full;

        loop {
            ret.push(ModMask::from_bits_truncate(sub));
            if sub == 0 {
                break;
            }
            sub = (sub - 1) & full;
        }

        ret
    }

    /// Expands a binding's modifier mask into the masks that must
    /// be grabbed for it to match regardless of lock state.
    ///
    /// Lock bits set in `modmask` itself are not part of the
    /// binding's intent and are removed first.
    pub fn expand(&self, modmask: ModMask) -> Vec<ModMask> {
        let base = self.strip(modmask);
        self.variants().into_iter().map(|v| base | v).collect()
    }

    /// Removes the lock modifiers from a modifier state, e.g. one
    /// reported with a key press.
    pub fn strip(&self, state: ModMask) -> ModMask {
        state.difference(self.mask)
    }

    /// Works out the lock modifiers from the server's modifier and
    /// keyboard mappings.
    ///
    /// Caps Lock is always `LOCK`. Num Lock and Scroll Lock are
    /// whatever modifiers their keycodes are bound to, if any.
    pub fn from_mappings(modmap: &ModifierMapping, keymap: &KeyboardMapping) -> Self {
        let mut mask = ModMask::LOCK;

        for sym in [keysym::XK_Num_Lock, keysym::XK_Scroll_Lock] {
            let codes = keymap.keycodes_for(sym);
            if codes.is_empty() {
                continue;
            }
            for idx in 0..MODIFIER_COUNT {
                if modmap.modifier(idx).any(|code| codes.contains(&code)) {
                    if let Some(m) = ModMask::from_index(idx) {
                        debug!("keysym {:#x} is bound to modifier {:?}", sym, m);
                        mask |= m;
                    }
                }
            }
        }

        Self { mask }
    }

    /// Queries the X server for its mappings and determines the
    /// lock modifiers from them.
    pub fn discover<X: XConn>(conn: &X) -> Result<Self> {
        let modmap = conn.modifier_mapping()?;
        let keymap = conn.keyboard_mapping()?;

        let ret = Self::from_mappings(&modmap, &keymap);
        debug!("Discovered lock modifiers {:?}", ret.mask);
        Ok(ret)
    }
}
