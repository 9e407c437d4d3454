//! Operations on client windows.
//!
//! Each submodule covers one concern, and they never call each other.
//! Every operation takes the [`XContext`](crate::XContext) to work
//! through and the window to work on.
//!
//! # Failure Handling
//!
//! Windows can be destroyed by their clients at any moment, so a
//! window disappearing is never treated as an error:
//!
//! - Writes are sent and forgotten. Nothing is sent for windows the
//!   context knows are destroyed. The one round trip is
//!   [`configure`] on a window the context has never seen, which
//!   first asks the server for its geometry.
//! - Reads resolve to a default: an unknown state, or full opacity.
//! - Grab requests that cannot be sent are logged and skipped, and
//!   the rest are still sent.
//!
//! Nothing here returns an error or panics.

pub mod focus;
pub mod geometry;
pub mod grab;
pub mod opacity;
pub mod state;
pub mod visual;

#[doc(inline)]
pub use focus::takefocus;
#[doc(inline)]
pub use geometry::configure;
#[doc(inline)]
pub use grab::{buttons_grab, grabkeys, keys_grab, ungrab_all, GrabReport};
#[doc(inline)]
pub use opacity::{get_opacity, get_opacity_reply, get_opacity_request, set_opacity, OpacityCookie};
#[doc(inline)]
pub use state::{get_state, get_state_reply, get_state_request, scan_states, set_state, StateCookie};
#[doc(inline)]
pub use visual::{set_border_color, set_cursor};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Config, XContext};
    use crate::types::Geometry;
    use crate::x::dummy::DummyConn;
    use crate::x::WindowState;

    #[test_log::test]
    fn test_map_new_window() {
        let conn = DummyConn::new();
        let win = conn.add_window(0x200001, Geometry::new(0, 0, 1, 1), 0);
        let ctx = XContext::new(conn, Config::default()).unwrap();
        ctx.adopt(win).unwrap();

        assert_eq!(get_state(&ctx, win).unwrap_or_default(), WindowState::Withdrawn);
        assert_eq!(get_opacity(&ctx, win), 1.0);

        set_state(&ctx, win, WindowState::Normal);
        set_opacity(&ctx, win, 0.5);
        configure(&ctx, win, Geometry::new(0, 0, 100, 100), 1);

        let state = get_state_request(&ctx, win);
        let opacity = get_opacity_request(&ctx, win);
        assert_eq!(get_state_reply(&ctx, state), Some(WindowState::Normal));
        assert!((get_opacity_reply(&ctx, opacity) - 0.5).abs() < 1e-9);

        let notifies = ctx.conn().configure_notifies();
        assert_eq!(notifies.len(), 1);
        assert_eq!(notifies[0].window, win);
        assert_eq!(notifies[0].geom, Geometry::new(0, 0, 100, 100));
        assert_eq!(notifies[0].border, 1);
    }
}
