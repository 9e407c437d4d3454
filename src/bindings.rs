//! Types for creating key and mouse bindings.
//!
//! Bindings are owned by the caller. The grab layer only reads the
//! modifier masks and codes out of them; the handlers stored next to
//! each binding are never invoked here.

use strum::*;

use custom_debug_derive::Debug;

use crate::x::input::{KeyCode, ModMask};

/// A type representing a modifier key tied to a certain keybind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum ModKey {
    /// The Ctrl key.
    Ctrl = ModMask::CONTROL.bits() as isize,
    /// The Alt key.
    Alt = ModMask::MOD1.bits() as isize,
    /// The Shift key.
    Shift = ModMask::SHIFT.bits() as isize,
    /// The Super/Meta key.
    Meta = ModMask::MOD4.bits() as isize,
}

#[doc(hidden)]
impl From<Vec<ModKey>> for ModMask {
    fn from(from: Vec<ModKey>) -> ModMask {
        from.into_iter().fold(ModMask::empty(), |acc, n| match n {
            ModKey::Ctrl => acc | ModMask::CONTROL,
            ModKey::Alt => acc | ModMask::MOD1,
            ModKey::Shift => acc | ModMask::SHIFT,
            ModKey::Meta => acc | ModMask::MOD4,
        })
    }
}

/// A type representing a mouse button tied to a certain mousebind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter)]
pub enum ButtonIndex {
    /// The left mouse button.
    Left,
    /// The middle mouse button (clicking the scroll wheel).
    Middle,
    /// The right mouse button.
    Right,
    /// Scroll wheel up.
    Button4,
    /// Scroll wheel down.
    Button5,
}

impl ButtonIndex {
    /// The button number used on the wire.
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Left => 1,
            Self::Middle => 2,
            Self::Right => 3,
            Self::Button4 => 4,
            Self::Button5 => 5,
        }
    }
}

/// Representation of a key binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Keybind {
    pub(crate) modmask: ModMask,
    pub(crate) code: KeyCode,
}

impl Keybind {
    /// Creates new `Keybind`.
    pub fn new<M: Into<ModMask>>(modifiers: M, code: KeyCode) -> Self {
        Self {
            modmask: modifiers.into(),
            code,
        }
    }

    /// The modifiers that must be held.
    pub fn modmask(&self) -> ModMask {
        self.modmask
    }

    /// The key that must be pressed.
    pub fn code(&self) -> KeyCode {
        self.code
    }
}

/// Representation of a mouse binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mousebind {
    pub(crate) modmask: ModMask,
    pub(crate) button: ButtonIndex,
}

impl Mousebind {
    /// Creates a new Mousebind.
    pub fn new<M: Into<ModMask>>(modifiers: M, button: ButtonIndex) -> Self {
        Self {
            modmask: modifiers.into(),
            button,
        }
    }

    /// The modifiers that must be held.
    pub fn modmask(&self) -> ModMask {
        self.modmask
    }

    /// The button that must be pressed.
    pub fn button(&self) -> ButtonIndex {
        self.button
    }
}

/// Convenience function for constructing a keybind.
pub fn kb(modmask: Vec<ModKey>, code: u8) -> Keybind {
    Keybind {
        modmask: modmask.into(),
        code,
    }
}

/// Convenience function for constructing a mousebind.
pub fn mb(modmask: Vec<ModKey>, button: ButtonIndex) -> Mousebind {
    Mousebind {
        modmask: modmask.into(),
        button,
    }
}

/// An ordered set of bindings and the handlers they trigger.
///
/// Bindings keep their insertion order, and inserting a binding that
/// is already present replaces its handler in place. The handler type
/// is left to the caller, so this can hold closures, enum commands or
/// plain indices into some other table.
#[derive(Debug)]
pub struct Bindings<B, H> {
    binds: Vec<B>,
    #[debug(skip)]
    handlers: Vec<H>,
}

/// A set of key bindings.
pub type Keybinds<H> = Bindings<Keybind, H>;

/// A set of mouse bindings.
pub type Mousebinds<H> = Bindings<Mousebind, H>;

impl<B: PartialEq, H> Bindings<B, H> {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self {
            binds: Vec::new(),
            handlers: Vec::new(),
        }
    }

    /// The number of bindings held.
    pub fn len(&self) -> usize {
        self.binds.len()
    }

    /// Whether the set holds no bindings.
    pub fn is_empty(&self) -> bool {
        self.binds.is_empty()
    }

    /// Returns an iterator over the bindings, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &B> {
        self.binds.iter()
    }

    /// Returns an iterator over bindings and their handlers.
    pub fn iter(&self) -> impl Iterator<Item = (&B, &H)> {
        self.binds.iter().zip(self.handlers.iter())
    }

    /// Inserts a binding, returning the handler it replaced, if any.
    pub fn insert(&mut self, bind: B, handler: H) -> Option<H> {
        match self.position(&bind) {
            Some(idx) => Some(std::mem::replace(&mut self.handlers[idx], handler)),
            None => {
                self.binds.push(bind);
                self.handlers.push(handler);
                None
            }
        }
    }

    /// Removes a binding and returns its handler.
    pub fn remove(&mut self, bind: &B) -> Option<H> {
        let idx = self.position(bind)?;
        self.binds.remove(idx);
        Some(self.handlers.remove(idx))
    }

    /// Gets a reference to the handler associated with the binding.
    pub fn get(&self, bind: &B) -> Option<&H> {
        self.position(bind).map(|idx| &self.handlers[idx])
    }

    /// Gets a mutable reference to the handler associated with the binding.
    pub fn get_mut(&mut self, bind: &B) -> Option<&mut H> {
        let idx = self.position(bind)?;
        Some(&mut self.handlers[idx])
    }

    fn position(&self, bind: &B) -> Option<usize> {
        self.binds.iter().position(|b| b == bind)
    }
}

impl<B: PartialEq, H> Default for Bindings<B, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: PartialEq, H> FromIterator<(B, H)> for Bindings<B, H> {
    fn from_iter<I: IntoIterator<Item = (B, H)>>(iter: I) -> Self {
        let mut ret = Self::new();
        for (bind, handler) in iter {
            ret.insert(bind, handler);
        }
        ret
    }
}
