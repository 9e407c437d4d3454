//! Prints the state and opacity of every top-level window on the
//! display.
//!
//! Pass `--xcb` to use the XCB-backed connection instead of x11rb.

use std::env;
use std::error::Error;

use tracing::Level;
use tracing_subscriber::{fmt as logger, fmt::format::FmtSpan};

use xwindow::window;
use xwindow::x::{XConn, XWindowID};
use xwindow::{x11rb_backed, xcb_backed, Config, XContext};

fn probe<X: XConn>(ctx: &XContext<X>) -> Result<(), Box<dyn Error + Send + Sync>> {
    let root = ctx.conn().get_root();
    let windows: Vec<XWindowID> = ctx.conn().query_tree(root.id)?;
    println!(
        "root {} ({}), {} top-level windows, lock masks {:?}",
        root.id,
        root.geom,
        windows.len(),
        ctx.lock_masks().mask()
    );

    // send every opacity request before waiting on any of them
    let opacities: Vec<_> = windows
        .iter()
        .map(|w| window::get_opacity_request(ctx, *w))
        .collect();
    let states = window::scan_states(ctx, &windows);

    for ((window, state), cookie) in states.into_iter().zip(opacities) {
        let opacity = window::get_opacity_reply(ctx, cookie);
        let state = state.map_or_else(|| "-".to_string(), |s| s.to_string());
        println!("{:<16} {:<10} {:.3}", window.to_string(), state, opacity);
    }

    Ok(())
}

pub fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // set up the logger
    logger::fmt()
        // only log enter and exit
        .with_span_events(FmtSpan::ACTIVE)
        // log all events up to INFO
        .with_max_level(Level::INFO)
        // don't use timestamps
        .without_time()
        // don't show source filename
        .with_file(false)
        // don't show source code line
        .with_line_number(false)
        // register as global
        .try_init()?;

    if env::args().any(|arg| arg == "--xcb") {
        probe(&xcb_backed(Config::default())?)
    } else {
        probe(&x11rb_backed(Config::default())?)
    }
}
