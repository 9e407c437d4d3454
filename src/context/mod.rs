//! The context shared by every window operation.
//!
//! An [`XContext`] bundles the connection with the little state the
//! window layer keeps between calls: the interned atoms it uses, the
//! lock modifiers to replicate grabs over, the latest server time
//! seen, and a registry of known windows. It is passed explicitly to
//! every operation, so several contexts (say, over several dummy
//! connections in tests) can coexist.
//!
//! All methods take `&self`. The context is meant to be driven from
//! the single thread that owns the connection; the mutable pieces
//! are in `Cell`s and `RefCell`s, so a pending read can be held while
//! other operations keep issuing requests.

use std::cell::{Cell, RefCell};

use tracing::{debug, warn};

use crate::types::Geometry;
use crate::x::{
    atom::Atom,
    core::{Result, Timestamp, XAtom, XConn, XWindowID, CURRENT_TIME},
    input::LockMasks,
};

pub mod config;
pub mod registry;

#[doc(inline)]
pub use config::{ButtonGrabMode, Config, ConfigBuilder, LockPolicy};
#[doc(inline)]
pub use registry::{Liveness, WindowRegistry, WindowSlot};

/// The atoms the window layer reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextAtoms {
    /// `CARDINAL`
    pub cardinal: XAtom,
    /// `WM_STATE`
    pub wm_state: XAtom,
    /// `WM_PROTOCOLS`
    pub wm_protocols: XAtom,
    /// `WM_TAKE_FOCUS`
    pub wm_take_focus: XAtom,
    /// `_NET_WM_WINDOW_OPACITY`
    pub opacity: XAtom,
}

impl ContextAtoms {
    fn resolve<X: XConn>(conn: &X) -> Result<Self> {
        Ok(Self {
            cardinal: conn.atom(Atom::Cardinal.as_ref())?,
            wm_state: conn.atom(Atom::WmState.as_ref())?,
            wm_protocols: conn.atom(Atom::WmProtocols.as_ref())?,
            wm_take_focus: conn.atom(Atom::WmTakeFocus.as_ref())?,
            opacity: conn.atom(Atom::NetWmWindowOpacity.as_ref())?,
        })
    }
}

/// A connection to the X server, plus the state the window layer
/// needs to drive it.
///
/// # Example
///
/// ```no_run
/// use xwindow::{Config, XContext};
/// use xwindow::x::X11RBConn;
///
/// let conn = X11RBConn::new().expect("Connection error");
/// let ctx = XContext::new(conn, Config::default()).expect("Could not set up context");
/// ```
#[derive(Debug)]
pub struct XContext<X: XConn> {
    conn: X,
    config: Config,
    atoms: ContextAtoms,
    locks: LockMasks,
    timestamp: Cell<Timestamp>,
    windows: RefCell<WindowRegistry>,
}

impl<X: XConn> XContext<X> {
    /// Creates a new context over an initialized connection.
    ///
    /// Lock modifiers are resolved here according to `config`. If the
    /// server's mappings cannot be read, Caps Lock and `MOD2` are
    /// used instead.
    pub fn new(conn: X, config: Config) -> Result<Self> {
        let atoms = ContextAtoms::resolve(&conn)?;

        let locks = match config.lock_modifiers {
            LockPolicy::Fixed(mask) => LockMasks::new(mask),
            LockPolicy::Discover => match LockMasks::discover(&conn) {
                Ok(locks) => locks,
                Err(e) => {
                    warn!("Could not discover lock modifiers: {}, using defaults", e);
                    LockMasks::FALLBACK
                }
            },
        };
        debug!("Ignoring lock modifiers {:?}", locks.mask());

        Ok(Self {
            conn,
            config,
            atoms,
            locks,
            timestamp: Cell::new(CURRENT_TIME),
            windows: RefCell::new(WindowRegistry::new()),
        })
    }

    /// Returns a reference to the underlying connection.
    pub fn conn(&self) -> &X {
        &self.conn
    }

    /// Returns the configuration the context was created with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the interned atoms used by the window layer.
    pub fn atoms(&self) -> &ContextAtoms {
        &self.atoms
    }

    /// Returns the lock modifiers grabs are replicated over.
    pub fn lock_masks(&self) -> LockMasks {
        self.locks
    }

    //* Timestamps

    /// Records a server timestamp seen by the event loop.
    ///
    /// Older timestamps are ignored. Server time is a 32-bit
    /// millisecond counter that wraps around roughly every 49 days,
    /// so "older" is judged over half the range.
    pub fn update_timestamp(&self, time: Timestamp) {
        if time == CURRENT_TIME {
            return;
        }
        let current = self.timestamp.get();
        if current == CURRENT_TIME || (time.wrapping_sub(current) as i32) > 0 {
            self.timestamp.set(time);
        }
    }

    /// The latest server timestamp recorded, or `CurrentTime` if
    /// none has been.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp.get()
    }

    //* Window registry

    /// Registers a window with the geometry it currently has.
    pub fn manage(&self, window: XWindowID, geom: Geometry, border: u32) {
        trace!("Managing window {} at {}", window, geom);
        self.windows.borrow_mut().insert(window, geom, border);
    }

    /// Registers a window that already exists, asking the server
    /// for its geometry.
    ///
    /// This waits on the server's reply.
    pub fn adopt(&self, window: XWindowID) -> Result<()> {
        let (geom, border) = self.conn.get_geometry(window)?;
        self.manage(window, geom, border);
        Ok(())
    }

    /// Records that the server reported `window` destroyed.
    ///
    /// Operations on the window become no-ops from here on.
    pub fn window_destroyed(&self, window: XWindowID) {
        if !self.windows.borrow_mut().invalidate(window) {
            trace!("Destroyed window {} was never registered", window);
        }
    }

    /// Frees the slots of destroyed windows.
    pub fn purge(&self) -> usize {
        let count = self.windows.borrow_mut().purge();
        debug!("Purged {} destroyed windows", count);
        count
    }

    /// Whether operations on `window` will reach the server.
    pub fn is_live(&self, window: XWindowID) -> bool {
        self.windows.borrow().is_live(window)
    }

    /// Returns what is recorded about a window.
    pub fn slot(&self, window: XWindowID) -> Option<WindowSlot> {
        self.windows.borrow().get(window).copied()
    }

    pub(crate) fn record(&self, window: XWindowID, geom: Geometry, border: u32) -> bool {
        self.windows.borrow_mut().update(window, geom, border)
    }
}
