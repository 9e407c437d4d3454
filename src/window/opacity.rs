//! Reading and writing `_NET_WM_WINDOW_OPACITY`.
//!
//! Compositors read the opacity as a CARDINAL fraction of
//! `0xFFFFFFFF`. An absent property means fully opaque, so that is
//! how full opacity is stored, and how an unreadable property is
//! read.

use tracing::{debug, warn};

use crate::context::XContext;
use crate::x::{
    core::{XConn, XWindowID},
    property::{clamp_opacity, decode_opacity, encode_opacity},
};

/// A pending read of a window's opacity.
#[must_use = "the opacity is only read when the cookie is passed to get_opacity_reply"]
pub struct OpacityCookie<'a, X: XConn + 'a> {
    window: XWindowID,
    cookie: Option<X::PropertyCookie<'a>>,
}

impl<'a, X: XConn + 'a> OpacityCookie<'a, X> {
    /// The window this read is for.
    pub fn window(&self) -> XWindowID {
        self.window
    }
}

/// Requests the opacity of a window, without waiting for the server
/// to reply.
pub fn get_opacity_request<X: XConn>(
    ctx: &XContext<X>,
    window: XWindowID,
) -> OpacityCookie<'_, X> {
    if !ctx.is_live(window) {
        trace!("Not reading opacity of destroyed window {}", window);
        return OpacityCookie {
            window,
            cookie: None,
        };
    }

    let atoms = ctx.atoms();
    let cookie = match ctx
        .conn()
        .get_property_unchecked(window, atoms.opacity, atoms.cardinal)
    {
        Ok(cookie) => Some(cookie),
        Err(e) => {
            warn!("Could not request opacity of {}: {}", window, e);
            None
        }
    };

    OpacityCookie { window, cookie }
}

/// Waits for an opacity read to complete.
///
/// Returns a value in [0, 1]. An absent or malformed property, a
/// failed read and a destroyed window all read as 1.0.
pub fn get_opacity_reply<'a, X: XConn>(ctx: &'a XContext<X>, cookie: OpacityCookie<'a, X>) -> f64 {
    let OpacityCookie { window, cookie } = cookie;
    let Some(cookie) = cookie else {
        return 1.0;
    };

    let reply = match ctx.conn().property_reply(cookie) {
        Ok(Some(reply)) => reply,
        Ok(None) => return 1.0,
        Err(e) => {
            trace!("Opacity read on {} failed: {}", window, e);
            return 1.0;
        }
    };

    if !ctx.is_live(window) {
        return 1.0;
    }

    if reply.type_ != ctx.atoms().cardinal {
        debug!("Malformed opacity on {}: {}", window, reply);
        return 1.0;
    }
    match reply.first_u32() {
        Some(raw) => decode_opacity(raw),
        None => {
            debug!("Malformed opacity on {}: {}", window, reply);
            1.0
        }
    }
}

/// Reads the opacity of a window, waiting for the reply.
pub fn get_opacity<X: XConn>(ctx: &XContext<X>, window: XWindowID) -> f64 {
    let cookie = get_opacity_request(ctx, window);
    get_opacity_reply(ctx, cookie)
}

/// Sets the opacity of a window.
///
/// Values outside [0, 1] are clamped and NaN is taken as 1.0. Full
/// opacity deletes the property instead of writing it.
pub fn set_opacity<X: XConn>(ctx: &XContext<X>, window: XWindowID, value: f64) {
    if !ctx.is_live(window) {
        trace!("Not setting opacity on destroyed window {}", window);
        return;
    }

    let clamped = clamp_opacity(value);
    if clamped != value {
        debug!("Opacity {} for {} out of range, using {}", value, window, clamped);
    }

    let atoms = ctx.atoms();
    let conn = ctx.conn();
    let res = match encode_opacity(clamped) {
        Some(raw) => {
            trace!("Setting opacity of {} to {:#010x}", window, raw);
            conn.change_property(window, atoms.opacity, atoms.cardinal, &[raw])
        }
        None => {
            trace!("Window {} is opaque, deleting opacity", window);
            conn.delete_property(window, atoms.opacity)
        }
    };

    if let Err(e) = res {
        warn!("Could not set opacity of {}: {}", window, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Config;
    use crate::types::Geometry;
    use crate::x::dummy::{DummyConn, Request};
    use crate::x::{PropertyReply, Xid};

    fn setup() -> (XContext<DummyConn>, XWindowID) {
        let conn = DummyConn::new();
        let win = conn.add_window(10, Geometry::new(0, 0, 100, 100), 0);
        let ctx = XContext::new(conn, Config::default()).unwrap();
        (ctx, win)
    }

    #[test]
    fn test_opacity_round_trip() {
        let (ctx, win) = setup();
        let tolerance = 1.0 / u32::MAX as f64;

        for v in [0.0, 0.05, 0.3, 0.5, 0.8, 0.999] {
            set_opacity(&ctx, win, v);
            let back = get_opacity(&ctx, win);
            assert!((back - v).abs() <= tolerance, "{} read back as {}", v, back);
        }
    }

    #[test]
    fn test_opaque_deletes_property() {
        let (ctx, win) = setup();
        let opacity = ctx.atoms().opacity;

        set_opacity(&ctx, win, 0.5);
        assert!(ctx.conn().property(win, opacity).is_some());

        set_opacity(&ctx, win, 1.0);
        assert!(ctx.conn().property(win, opacity).is_none());
        assert_eq!(get_opacity(&ctx, win), 1.0);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        let (ctx, win) = setup();
        let opacity = ctx.atoms().opacity;
        let cardinal = ctx.atoms().cardinal;

        set_opacity(&ctx, win, -0.5);
        assert_eq!(
            ctx.conn().property(win, opacity),
            Some(PropertyReply::new(cardinal, 32, vec![0]))
        );

        set_opacity(&ctx, win, 7.0);
        assert!(ctx.conn().property(win, opacity).is_none());

        set_opacity(&ctx, win, 0.5);
        set_opacity(&ctx, win, f64::NAN);
        assert!(ctx.conn().property(win, opacity).is_none());
    }

    #[test]
    fn test_absent_and_malformed_read_opaque() {
        let (ctx, win) = setup();
        assert_eq!(get_opacity(&ctx, win), 1.0);

        let opacity = ctx.atoms().opacity;
        let wm_state = ctx.atoms().wm_state;
        ctx.conn()
            .put_property(win, opacity, PropertyReply::new(wm_state, 32, vec![5]));
        assert_eq!(get_opacity(&ctx, win), 1.0);

        let cardinal = ctx.atoms().cardinal;
        ctx.conn()
            .put_property(win, opacity, PropertyReply::new(cardinal, 8, vec![]));
        assert_eq!(get_opacity(&ctx, win), 1.0);

        assert_eq!(get_opacity(&ctx, Xid(404)), 1.0);
    }

    #[test]
    fn test_destroyed_window_is_skipped() {
        let (ctx, win) = setup();
        set_opacity(&ctx, win, 0.25);
        ctx.manage(win, Geometry::new(0, 0, 100, 100), 0);

        let cookie = get_opacity_request(&ctx, win);
        ctx.window_destroyed(win);
        assert_eq!(get_opacity_reply(&ctx, cookie), 1.0);

        ctx.conn().clear_requests();
        set_opacity(&ctx, win, 0.75);
        assert_eq!(get_opacity(&ctx, win), 1.0);
        assert_eq!(
            ctx.conn().count_requests(|r| !matches!(r, Request::GetProperty(..))),
            0
        );
        assert!(ctx.conn().requests().is_empty());
    }
}
