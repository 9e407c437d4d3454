//! Border colours and cursors.

use tracing::warn;

use crate::context::XContext;
use crate::types::Color;
use crate::x::core::{ClientAttrs, CursorId, XConn, XWindowID};

/// Sets the border colour of a window.
pub fn set_border_color<X: XConn>(ctx: &XContext<X>, window: XWindowID, color: Color) {
    set_attribute(ctx, window, ClientAttrs::BorderColour(color));
}

/// Sets the cursor shown while the pointer is over a window.
///
/// The cursor is created elsewhere and must outlive the window's
/// use of it.
pub fn set_cursor<X: XConn>(ctx: &XContext<X>, window: XWindowID, cursor: CursorId) {
    set_attribute(ctx, window, ClientAttrs::Cursor(cursor));
}

fn set_attribute<X: XConn>(ctx: &XContext<X>, window: XWindowID, attr: ClientAttrs) {
    if !ctx.is_live(window) {
        trace!("Not setting {:?} on destroyed window {}", attr, window);
        return;
    }
    if let Err(e) = ctx.conn().change_window_attributes(window, &[attr]) {
        warn!("Could not set {:?} on {}: {}", attr, window, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Config;
    use crate::types::Geometry;
    use crate::x::dummy::DummyConn;
    use crate::x::Xid;

    #[test]
    fn test_border_and_cursor() {
        let conn = DummyConn::new();
        let win = conn.add_window(10, Geometry::new(0, 0, 10, 10), 1);
        let ctx = XContext::new(conn, Config::default()).unwrap();

        set_border_color(&ctx, win, Color::from_hex(0xff0000));
        set_cursor(&ctx, win, Xid(0x400001));

        assert_eq!(ctx.conn().border_color(win), Some(Color::from_hex(0xff0000)));
        assert_eq!(ctx.conn().cursor(win), Some(Xid(0x400001)));
    }

    #[test]
    fn test_destroyed_window_is_skipped() {
        let conn = DummyConn::new();
        let win = conn.add_window(10, Geometry::new(0, 0, 10, 10), 1);
        let ctx = XContext::new(conn, Config::default()).unwrap();
        ctx.manage(win, Geometry::new(0, 0, 10, 10), 1);
        ctx.window_destroyed(win);

        set_border_color(&ctx, win, Color::from_hex(0x00ff00));
        assert!(ctx.conn().requests().is_empty());
        assert_eq!(ctx.conn().border_color(win), None);

        // windows the server no longer has are fine too
        set_cursor(&ctx, Xid(404), Xid(1));
    }
}
