//! System-wide hotkey for leaving click-through mode.
//!
//! Once pointer events pass through the overlay, the window underneath takes
//! keyboard focus and window-level keys stop arriving. The toggle is therefore
//! registered with the OS and forwarded into the event loop as an [`AppEvent`].

use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use std::sync::Mutex;
use winit::event_loop::EventLoopProxy;

/// Events sent into the winit loop from outside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    ToggleClickThrough,
}

/// Display name of [`click_through_hotkey`].
pub const CLICK_THROUGH_HOTKEY: &str = "Ctrl+Shift+F5";

pub fn click_through_hotkey() -> HotKey {
    HotKey::new(Some(Modifiers::CONTROL | Modifiers::SHIFT), Code::F5)
}

/// A registered click-through toggle. Unregisters when dropped.
pub struct GlobalToggle {
    manager: GlobalHotKeyManager,
    hotkey: HotKey,
}

impl GlobalToggle {
    /// Register the toggle, forwarding presses to `proxy`.
    ///
    /// Returns `None` (and logs why) when the platform refuses.
    pub fn register(proxy: EventLoopProxy<AppEvent>) -> Option<Self> {
        let manager = match GlobalHotKeyManager::new() {
            Ok(manager) => manager,
            Err(e) => {
                log::warn!("Global hotkeys unavailable: {e}");
                return None;
            }
        };
        let hotkey = click_through_hotkey();
        if let Err(e) = manager.register(hotkey) {
            log::warn!("Could not register {CLICK_THROUGH_HOTKEY}: {e}");
            return None;
        }

        let id = hotkey.id();
        let proxy = Mutex::new(proxy);
        GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
            if event.id != id || event.state != HotKeyState::Pressed {
                return;
            }
            if let Ok(proxy) = proxy.lock() {
                // The loop is gone once the app exits; nothing left to toggle.
                let _ = proxy.send_event(AppEvent::ToggleClickThrough);
            }
        }));

        log::info!("{CLICK_THROUGH_HOTKEY} toggles click-through from anywhere");
        Some(Self { manager, hotkey })
    }
}

impl Drop for GlobalToggle {
    fn drop(&mut self) {
        GlobalHotKeyEvent::set_event_handler(None::<fn(GlobalHotKeyEvent)>);
        if let Err(e) = self.manager.unregister(self.hotkey) {
            log::debug!("Unregistering {CLICK_THROUGH_HOTKEY}: {e}");
        }
    }
}
