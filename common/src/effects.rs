use std::cell::Cell;

use crate::style;

pub fn navbar_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

pub fn cursor_transform(client_x: i32, client_y: i32) -> String {
    style::translate(client_x, client_y)
}

// at most one pending animation frame per listener, however fast the events arrive
#[derive(Debug, Default)]
pub struct FrameThrottle {
    pending: Cell<bool>,
}

impl FrameThrottle {
    // true if the caller should request a frame
    pub fn request(&self) -> bool {
        !self.pending.replace(true)
    }

    pub fn frame_done(&self) {
        self.pending.set(false);
    }
}
