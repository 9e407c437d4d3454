//! Installing passive key and button grabs.
//!
//! The modifier state the server matches grabs against includes the
//! lock modifiers, so a grab on `Mod4 + Return` does nothing while
//! Num Lock is on. Every binding is therefore grabbed once for each
//! combination of lock modifiers: with L lock modifiers, a set of N
//! bindings takes N * 2^L grab requests.
//!
//! Grabs are replaced wholesale. Each call first releases every grab
//! this client holds on the window, so calling again after the
//! bindings change (on a configuration reload, say) leaves nothing
//! stale behind.

use std::fmt;

use tracing::{debug, warn};

use crate::bindings::{Keybind, Keybinds, Mousebind, Mousebinds};
use crate::context::XContext;
use crate::x::{
    core::{XConn, XWindowID},
    input::LockMasks,
};

/// The outcome of installing a set of grabs.
///
/// Grab requests are not waited on, so `failed` only counts the
/// requests the connection could not send. A combination already
/// grabbed by another client is still counted as sent here:
/// the server answers it with `BadAccess`, which arrives later as an
/// error in the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GrabReport {
    /// The number of grab requests issued.
    pub requested: usize,
    /// The number of those that could not be sent.
    pub failed: usize,
}

impl GrabReport {
    /// Whether every grab request was sent.
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }

    /// The number of grab requests that were sent.
    pub fn sent(&self) -> usize {
        self.requested - self.failed
    }
}

impl fmt::Display for GrabReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} grabs sent", self.sent(), self.requested)
    }
}

/// Expands key bindings into one binding per lock modifier
/// combination.
pub fn expand_keybinds<'b, I>(locks: LockMasks, binds: I) -> Vec<Keybind>
where
    I: IntoIterator<Item = &'b Keybind>,
{
    binds
        .into_iter()
        .flat_map(|kb| {
            locks
                .expand(kb.modmask)
                .into_iter()
                .map(move |mask| Keybind::new(mask, kb.code))
        })
        .collect()
}

/// Expands mouse bindings into one binding per lock modifier
/// combination.
pub fn expand_mousebinds<'b, I>(locks: LockMasks, binds: I) -> Vec<Mousebind>
where
    I: IntoIterator<Item = &'b Mousebind>,
{
    binds
        .into_iter()
        .flat_map(|mb| {
            locks
                .expand(mb.modmask)
                .into_iter()
                .map(move |mask| Mousebind::new(mask, mb.button))
        })
        .collect()
}

/// Replaces the key grabs on a window with the given bindings.
pub fn keys_grab<X: XConn, H>(
    ctx: &XContext<X>,
    window: XWindowID,
    binds: &Keybinds<H>,
) -> GrabReport {
    if !ctx.is_live(window) {
        trace!("Not grabbing keys on destroyed window {}", window);
        return GrabReport::default();
    }

    let conn = ctx.conn();
    if let Err(e) = conn.ungrab_all_keys(window) {
        warn!("Could not release key grabs on {}: {}", window, e);
    }

    let mut report = GrabReport::default();
    for kb in expand_keybinds(ctx.lock_masks(), binds.keys()) {
        report.requested += 1;
        if let Err(e) = conn.grab_key(kb, window) {
            warn!("Could not grab {:?} on {}: {}", kb, window, e);
            report.failed += 1;
        }
    }

    debug!("Key grabs on {}: {}", window, report);
    report
}

/// Alias of [`keys_grab`].
pub fn grabkeys<X: XConn, H>(
    ctx: &XContext<X>,
    window: XWindowID,
    binds: &Keybinds<H>,
) -> GrabReport {
    keys_grab(ctx, window, binds)
}

/// Replaces the button grabs on a window with the given bindings.
///
/// The pointer mode of the grabs comes from the context's
/// configuration.
pub fn buttons_grab<X: XConn, H>(
    ctx: &XContext<X>,
    window: XWindowID,
    binds: &Mousebinds<H>,
) -> GrabReport {
    if !ctx.is_live(window) {
        trace!("Not grabbing buttons on destroyed window {}", window);
        return GrabReport::default();
    }

    let conn = ctx.conn();
    if let Err(e) = conn.ungrab_all_buttons(window) {
        warn!("Could not release button grabs on {}: {}", window, e);
    }

    let mode = ctx.config().button_grab();
    let mut report = GrabReport::default();
    for mb in expand_mousebinds(ctx.lock_masks(), binds.keys()) {
        report.requested += 1;
        if let Err(e) = conn.grab_button(mb, window, mode) {
            warn!("Could not grab {:?} on {}: {}", mb, window, e);
            report.failed += 1;
        }
    }

    debug!("Button grabs on {}: {}", window, report);
    report
}

/// Releases every key and button grab on a window.
pub fn ungrab_all<X: XConn>(ctx: &XContext<X>, window: XWindowID) {
    if !ctx.is_live(window) {
        return;
    }
    let conn = ctx.conn();
    if let Err(e) = conn.ungrab_all_keys(window) {
        warn!("Could not release key grabs on {}: {}", window, e);
    }
    if let Err(e) = conn.ungrab_all_buttons(window) {
        warn!("Could not release button grabs on {}: {}", window, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::{kb, mb, ButtonIndex, ModKey};
    use crate::context::{ButtonGrabMode, Config, LockPolicy};
    use crate::types::Geometry;
    use crate::x::dummy::{DummyConn, Request};
    use crate::x::input::ModMask;

    fn keybinds() -> Keybinds<&'static str> {
        [
            (kb(vec![ModKey::Meta], 36), "terminal"),
            (kb(vec![ModKey::Meta, ModKey::Shift], 24), "close"),
            (kb(vec![], 121), "mute"),
        ]
        .into_iter()
        .collect()
    }

    fn context(conn: DummyConn, locks: ModMask) -> XContext<DummyConn> {
        let config = Config::builder()
            .lock_modifiers(LockPolicy::Fixed(locks))
            .button_grab(ButtonGrabMode::Sync)
            .finish();
        XContext::new(conn, config).unwrap()
    }

    fn grab_count(conn: &DummyConn) -> usize {
        conn.count_requests(|r| matches!(r, Request::GrabKey(..) | Request::GrabButton(..)))
    }

    #[test]
    fn test_expansion_is_pure() {
        let binds = keybinds();
        let locks = LockMasks::new(ModMask::LOCK | ModMask::MOD2 | ModMask::MOD5);
        let expanded = expand_keybinds(locks, binds.keys());

        assert_eq!(expanded.len(), 3 * 8);
        // first binding's variants come first, in order
        assert!(expanded[..8].iter().all(|k| k.code == 36));
        assert!(expanded
            .iter()
            .any(|k| k.code == 121 && k.modmask == ModMask::LOCK | ModMask::MOD2 | ModMask::MOD5));
    }

    #[test]
    fn test_grab_count_is_n_times_two_to_l() {
        for (locks, l) in [
            (ModMask::empty(), 0),
            (ModMask::LOCK, 1),
            (ModMask::LOCK | ModMask::MOD2, 2),
            (ModMask::LOCK | ModMask::MOD2 | ModMask::MOD5, 3),
        ] {
            let conn = DummyConn::new();
            let win = conn.add_window(10, Geometry::new(0, 0, 10, 10), 0);
            let ctx = context(conn, locks);

            let report = keys_grab(&ctx, win, &keybinds());
            assert_eq!(report.requested, 3 << l);
            assert!(report.is_complete());
            assert_eq!(grab_count(ctx.conn()), 3 << l);
            assert_eq!(ctx.conn().key_grabs(win).len(), 3 << l);
        }
    }

    #[test]
    fn test_regrab_replaces_grabs() {
        let conn = DummyConn::new();
        let win = conn.add_window(10, Geometry::new(0, 0, 10, 10), 0);
        let ctx = context(conn, ModMask::LOCK | ModMask::MOD2);

        grabkeys(&ctx, win, &keybinds());

        let fewer: Keybinds<()> = [(kb(vec![ModKey::Alt], 10), ())].into_iter().collect();
        let report = grabkeys(&ctx, win, &fewer);
        assert_eq!(report.requested, 4);

        let grabs = ctx.conn().key_grabs(win);
        assert_eq!(grabs.len(), 4);
        assert!(grabs.iter().all(|(_, code)| *code == 10));

        // the ungrab precedes the grabs
        let requests = ctx.conn().requests();
        let last_ungrab = requests
            .iter()
            .rposition(|r| matches!(r, Request::UngrabAllKeys(_)))
            .unwrap();
        assert_eq!(requests.len() - last_ungrab - 1, 4);
    }

    #[test]
    fn test_foreign_grab_does_not_abort() {
        let mut conn = DummyConn::new();
        let win = conn.add_window(10, Geometry::new(0, 0, 10, 10), 0);
        conn.add_foreign_key_grab(win, ModMask::MOD4 | ModMask::LOCK, 36);
        let ctx = context(conn, ModMask::LOCK | ModMask::MOD2);

        // the conflict is not known when the requests are sent
        let report = keys_grab(&ctx, win, &keybinds());
        assert_eq!(report.requested, 12);
        assert_eq!(report.failed, 0);
        assert!(report.is_complete());

        // the remaining combinations are still grabbed
        let grabs = ctx.conn().key_grabs(win);
        assert_eq!(grabs.len(), 11);
        assert!(!grabs.contains(&(ModMask::MOD4 | ModMask::LOCK, 36)));

        let errors = ctx.conn().async_errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("BadAccess"));
    }

    #[test]
    fn test_button_grabs() {
        let conn = DummyConn::new();
        let win = conn.add_window(10, Geometry::new(0, 0, 10, 10), 0);
        let ctx = context(conn, ModMask::LOCK | ModMask::MOD2);

        let binds: Mousebinds<u8> = [
            (mb(vec![ModKey::Meta], ButtonIndex::Left), 0),
            (mb(vec![ModKey::Meta], ButtonIndex::Right), 1),
        ]
        .into_iter()
        .collect();

        let report = buttons_grab(&ctx, win, &binds);
        assert_eq!(report.requested, 8);
        assert_eq!(ctx.conn().button_grabs(win).len(), 8);
        assert!(ctx.conn().requests().iter().all(|r| match r {
            Request::GrabButton(_, _, _, mode) => *mode == ButtonGrabMode::Sync,
            _ => true,
        }));

        ungrab_all(&ctx, win);
        assert!(ctx.conn().button_grabs(win).is_empty());
    }

    #[test]
    fn test_destroyed_window_is_skipped() {
        let conn = DummyConn::new();
        let win = conn.add_window(10, Geometry::new(0, 0, 10, 10), 0);
        let ctx = context(conn, ModMask::LOCK);
        ctx.manage(win, Geometry::new(0, 0, 10, 10), 0);
        ctx.window_destroyed(win);

        assert_eq!(keys_grab(&ctx, win, &keybinds()), GrabReport::default());
        assert!(ctx.conn().requests().is_empty());
    }
}
