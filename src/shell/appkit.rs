//! AppKit integration: dock badge, activation and event pumping.
//!
//! All functions must be called from the main thread. Off the main thread, or
//! on platforms other than macOS, they log and do nothing.

#[cfg(target_os = "macos")]
use objc2::MainThreadMarker;
#[cfg(target_os = "macos")]
use objc2_app_kit::{NSApplication, NSApplicationActivationPolicy, NSEventMask};
#[cfg(target_os = "macos")]
use objc2_foundation::{NSDefaultRunLoopMode, NSString};

/// Badge text shown on the dock icon after a completion.
pub const BADGE_LABEL: &str = "1";

#[cfg(target_os = "macos")]
fn shared_app() -> Option<objc2::rc::Retained<NSApplication>> {
    match MainThreadMarker::new() {
        Some(mtm) => Some(NSApplication::sharedApplication(mtm)),
        None => {
            tracing::warn!("AppKit call made off the main thread, ignored");
            None
        }
    }
}

/// Registers the process as a regular app with a dock icon.
///
/// Returns false if AppKit is unavailable.
#[cfg(target_os = "macos")]
pub fn init() -> bool {
    let Some(app) = shared_app() else {
        return false;
    };
    #[allow(unused_unsafe)]
    unsafe {
        app.setActivationPolicy(NSApplicationActivationPolicy::Regular);
        app.finishLaunching();
    }
    tracing::debug!("AppKit application initialised");
    true
}

#[cfg(not(target_os = "macos"))]
pub fn init() -> bool {
    tracing::debug!("AppKit is only available on macOS");
    false
}

/// Shows or hides the dock badge.
#[cfg(target_os = "macos")]
pub fn set_dock_badge(visible: bool) {
    let Some(app) = shared_app() else {
        return;
    };
    let label = visible.then(|| NSString::from_str(BADGE_LABEL));
    #[allow(unused_unsafe)]
    unsafe {
        let tile = app.dockTile();
        tile.setBadgeLabel(label.as_deref());
        tile.display();
    }
}

#[cfg(not(target_os = "macos"))]
pub fn set_dock_badge(visible: bool) {
    tracing::debug!(visible, "dock badge (no dock on this platform)");
}

/// Activates the app, bringing its windows to the front.
#[cfg(target_os = "macos")]
pub fn activate() {
    let Some(app) = shared_app() else {
        return;
    };
    #[allow(deprecated, unused_unsafe)]
    unsafe {
        app.activateIgnoringOtherApps(true);
    }
}

#[cfg(not(target_os = "macos"))]
pub fn activate() {}

/// Returns whether the app is the active application.
///
/// Returns `None` when that cannot be determined.
#[cfg(target_os = "macos")]
pub fn is_active() -> Option<bool> {
    let app = shared_app()?;
    #[allow(unused_unsafe)]
    let active = unsafe { app.isActive() };
    Some(active)
}

#[cfg(not(target_os = "macos"))]
pub fn is_active() -> Option<bool> {
    None
}

/// Dispatches every pending AppKit event without blocking.
///
/// The status item and its menu are only responsive while this runs
/// regularly.
#[cfg(target_os = "macos")]
pub fn pump_events() {
    let Some(app) = shared_app() else {
        return;
    };
    loop {
        #[allow(unused_unsafe)]
        let event = unsafe {
            app.nextEventMatchingMask_untilDate_inMode_dequeue(
                NSEventMask::Any,
                None,
                NSDefaultRunLoopMode,
                true,
            )
        };
        match event {
            Some(event) => app.sendEvent(&event),
            None => break,
        }
    }
}

#[cfg(not(target_os = "macos"))]
pub fn pump_events() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_label() {
        assert_eq!(BADGE_LABEL, "1");
    }

    #[cfg(not(target_os = "macos"))]
    #[test]
    fn test_non_macos_calls_are_noops() {
        assert!(!init());
        set_dock_badge(true);
        activate();
        pump_events();
        assert_eq!(is_active(), None);
    }
}
