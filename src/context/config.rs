//! Types for configuring an `XContext`.
//!
//! Configuration here covers only the mechanics of talking to the
//! server. What to grab, which window to focus and where to put it
//! are decided by the caller.

pub use crate::x::input::ButtonGrabMode;
use crate::x::input::ModMask;

/// How the set of ignored lock modifiers is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LockPolicy {
    /// Query the server's modifier and keyboard mappings for the
    /// modifiers Num Lock and Scroll Lock are bound to. Caps Lock
    /// is always `LOCK`.
    #[default]
    Discover,
    /// Use a fixed mask, without asking the server.
    Fixed(ModMask),
}

/// The configuration of an `XContext`.
///
/// # Construction
///
/// A default `Config` discovers lock modifiers from the server and
/// installs asynchronous button grabs. To change that, use the
/// [`ConfigBuilder`] type:
///
/// ```rust
/// use xwindow::context::{ButtonGrabMode, Config, LockPolicy};
/// use xwindow::x::input::ModMask;
///
/// let config = Config::builder()
///     .lock_modifiers(LockPolicy::Fixed(ModMask::LOCK))
///     .button_grab(ButtonGrabMode::Sync)
///     .finish();
///
/// assert_eq!(config.button_grab(), ButtonGrabMode::Sync);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// How to determine the lock modifiers.
    pub(crate) lock_modifiers: LockPolicy,
    /// The pointer mode of button grabs.
    pub(crate) button_grab: ButtonGrabMode,
}

impl Config {
    /// Creates a default Config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a [`ConfigBuilder`] to build your Config with the
    /// 'builder' idiom.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// How the lock modifiers are determined.
    pub fn lock_modifiers(&self) -> LockPolicy {
        self.lock_modifiers
    }

    /// The pointer mode of button grabs.
    pub fn button_grab(&self) -> ButtonGrabMode {
        self.button_grab
    }
}

/// A helper type to construct a [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    inner: Config,
}

impl ConfigBuilder {
    /// Creates a new `ConfigBuilder`.
    pub fn new() -> Self {
        Self {
            inner: Config::default(),
        }
    }

    /// Sets how the lock modifiers are determined.
    pub fn lock_modifiers(mut self, policy: LockPolicy) -> Self {
        self.inner.lock_modifiers = policy;
        self
    }

    /// Sets the pointer mode of button grabs.
    pub fn button_grab(mut self, mode: ButtonGrabMode) -> Self {
        self.inner.button_grab = mode;
        self
    }

    /// Finishes building the Config.
    pub fn finish(self) -> Config {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::new();
        assert_eq!(config.lock_modifiers(), LockPolicy::Discover);
        assert_eq!(config.button_grab(), ButtonGrabMode::Async);
    }
}
