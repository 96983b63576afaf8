//! SIGINT/SIGTERM handling.
//!
//! The handler only raises a flag; the frame loop notices it within one frame
//! interval and exits through the normal teardown path.

use std::ffi::c_int;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

static TERMINATE: AtomicBool = AtomicBool::new(false);

extern "C" fn on_terminate(_: c_int) {
    TERMINATE.store(true, Ordering::SeqCst);
}

/// Install the handlers. A second signal gets the default disposition.
pub fn install() -> Result<()> {
    let action = SigAction::new(
        SigHandler::Handler(on_terminate),
        SaFlags::SA_RESETHAND,
        SigSet::empty(),
    );
    for signal in [Signal::SIGINT, Signal::SIGTERM] {
        // SAFETY: the handler only performs an atomic store.
        unsafe { sigaction(signal, &action) }
            .with_context(|| format!("install {} handler", signal.as_str()))?;
    }
    Ok(())
}

pub fn terminate_requested() -> bool {
    TERMINATE.load(Ordering::SeqCst)
}
