use xcb::x::EventMask;

// Button grab event mask
pub const BUTTON_GRAB_MASK: EventMask = EventMask::BUTTON_PRESS
    .union(EventMask::BUTTON_RELEASE)
    .union(EventMask::BUTTON_MOTION);

/// A macro for creating `xcb::XidNew` objects from a `u32`.
macro_rules! cast {
    ($ctype:ty, $resid:expr) => {
        unsafe { <$ctype as XidNew>::new($resid) }
    };
}

/// A macro for extracting an `Xid` from objects implementing `x::Xid`.
macro_rules! id {
    ($e:expr) => {
        crate::x::core::Xid($e.resource_id())
    };
}

/// A macro for the common pattern off sending a request
/// and then getting the reply from the cookie that gets returned.
///
/// Note that this completely disregards the asynchronous
/// nature of the underlying XCB library.
macro_rules! req_and_reply {
    ($conn:expr, $req:expr) => {
        $conn.wait_for_reply($conn.send_request($req))
    };
}

/// A macro for sending a request that has no reply.
///
/// Errors it causes arrive on the event queue.
macro_rules! send {
    ($conn:expr, $req:expr) => {{
        let _ = $conn.send_request($req);
        Ok(())
    }};
}

pub(super) use {cast, id, req_and_reply, send};
