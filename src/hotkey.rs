//! Global hotkey capture using Linux evdev
//!
//! Reads keyboard input devices directly at the kernel level, so the
//! hotkey works on both X11 and Wayland without compositor support.
//! One blocking reader thread per keyboard; chord hits are delivered
//! over a tokio channel to the daemon loop.

use crate::config::Config;
use crate::error::{CleanError, CleanResult};
use evdev::{Device, InputEventKind, Key};
use std::collections::HashSet;
use std::thread;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A hotkey chord: one trigger key plus required modifiers
#[derive(Debug, Clone)]
pub struct HotkeyChord {
    pub key: Key,
    pub modifiers: Vec<Key>,
}

impl HotkeyChord {
    /// Build the chord from config key names (e.g. "KEY_LEFTCTRL", "KEY_C")
    pub fn from_config(config: &Config) -> CleanResult<Self> {
        let key = parse_key(&config.hotkey_key)
            .ok_or_else(|| CleanError::Hotkey(format!("Unknown key: {}", config.hotkey_key)))?;

        let mut modifiers = Vec::new();
        for name in &config.hotkey_modifiers {
            let modifier = parse_key(name)
                .ok_or_else(|| CleanError::Hotkey(format!("Unknown modifier: {}", name)))?;
            modifiers.push(modifier);
        }

        Ok(Self { key, modifiers })
    }

    /// Whether every required modifier is currently held
    ///
    /// Left/right variants of the same modifier are interchangeable.
    fn modifiers_held(&self, held: &HashSet<Key>) -> bool {
        self.modifiers.iter().all(|m| {
            variants_of(*m)
                .iter()
                .any(|variant| held.contains(variant))
        })
    }
}

/// Left/right keys that satisfy a modifier requirement
fn variants_of(key: Key) -> Vec<Key> {
    match key {
        Key::KEY_LEFTCTRL | Key::KEY_RIGHTCTRL => vec![Key::KEY_LEFTCTRL, Key::KEY_RIGHTCTRL],
        Key::KEY_LEFTALT | Key::KEY_RIGHTALT => vec![Key::KEY_LEFTALT, Key::KEY_RIGHTALT],
        Key::KEY_LEFTSHIFT | Key::KEY_RIGHTSHIFT => vec![Key::KEY_LEFTSHIFT, Key::KEY_RIGHTSHIFT],
        Key::KEY_LEFTMETA | Key::KEY_RIGHTMETA => vec![Key::KEY_LEFTMETA, Key::KEY_RIGHTMETA],
        other => vec![other],
    }
}

/// Parse a config key name into an evdev Key
pub fn parse_key(name: &str) -> Option<Key> {
    let name = name.to_uppercase();
    let name = name.strip_prefix("KEY_").unwrap_or(&name);

    match name {
        // Letters
        "A" => Some(Key::KEY_A),
        "B" => Some(Key::KEY_B),
        "C" => Some(Key::KEY_C),
        "D" => Some(Key::KEY_D),
        "E" => Some(Key::KEY_E),
        "F" => Some(Key::KEY_F),
        "G" => Some(Key::KEY_G),
        "H" => Some(Key::KEY_H),
        "I" => Some(Key::KEY_I),
        "J" => Some(Key::KEY_J),
        "K" => Some(Key::KEY_K),
        "L" => Some(Key::KEY_L),
        "M" => Some(Key::KEY_M),
        "N" => Some(Key::KEY_N),
        "O" => Some(Key::KEY_O),
        "P" => Some(Key::KEY_P),
        "Q" => Some(Key::KEY_Q),
        "R" => Some(Key::KEY_R),
        "S" => Some(Key::KEY_S),
        "T" => Some(Key::KEY_T),
        "U" => Some(Key::KEY_U),
        "V" => Some(Key::KEY_V),
        "W" => Some(Key::KEY_W),
        "X" => Some(Key::KEY_X),
        "Y" => Some(Key::KEY_Y),
        "Z" => Some(Key::KEY_Z),
        // Numbers
        "0" => Some(Key::KEY_0),
        "1" => Some(Key::KEY_1),
        "2" => Some(Key::KEY_2),
        "3" => Some(Key::KEY_3),
        "4" => Some(Key::KEY_4),
        "5" => Some(Key::KEY_5),
        "6" => Some(Key::KEY_6),
        "7" => Some(Key::KEY_7),
        "8" => Some(Key::KEY_8),
        "9" => Some(Key::KEY_9),
        // Function keys
        "F1" => Some(Key::KEY_F1),
        "F2" => Some(Key::KEY_F2),
        "F3" => Some(Key::KEY_F3),
        "F4" => Some(Key::KEY_F4),
        "F5" => Some(Key::KEY_F5),
        "F6" => Some(Key::KEY_F6),
        "F7" => Some(Key::KEY_F7),
        "F8" => Some(Key::KEY_F8),
        "F9" => Some(Key::KEY_F9),
        "F10" => Some(Key::KEY_F10),
        "F11" => Some(Key::KEY_F11),
        "F12" => Some(Key::KEY_F12),
        // Modifiers
        "LEFTCTRL" | "CTRL" => Some(Key::KEY_LEFTCTRL),
        "RIGHTCTRL" => Some(Key::KEY_RIGHTCTRL),
        "LEFTALT" | "ALT" => Some(Key::KEY_LEFTALT),
        "RIGHTALT" => Some(Key::KEY_RIGHTALT),
        "LEFTSHIFT" | "SHIFT" => Some(Key::KEY_LEFTSHIFT),
        "RIGHTSHIFT" => Some(Key::KEY_RIGHTSHIFT),
        "LEFTMETA" | "META" | "SUPER" => Some(Key::KEY_LEFTMETA),
        "RIGHTMETA" => Some(Key::KEY_RIGHTMETA),
        _ => None,
    }
}

/// Global hotkey listener over all usable keyboards
pub struct HotkeyListener {
    pub device_count: usize,
}

impl HotkeyListener {
    /// Spawn one reader thread per keyboard advertising the chord key
    ///
    /// Devices that cannot be opened (usually missing `input` group
    /// membership) are skipped with a warning; zero usable devices is an
    /// error because the hotkey would never fire.
    pub fn spawn(chord: HotkeyChord, tx: mpsc::Sender<()>) -> CleanResult<Self> {
        let mut device_count = 0;

        for (path, device) in evdev::enumerate() {
            let has_key = device
                .supported_keys()
                .map(|keys| keys.contains(chord.key))
                .unwrap_or(false);
            if !has_key {
                continue;
            }

            let name = device.name().unwrap_or("unknown").to_string();
            info!("⌨️ Watching {} ({:?})", name, path);

            let chord = chord.clone();
            let tx = tx.clone();
            thread::spawn(move || {
                if let Err(e) = watch_device(device, &chord, &tx) {
                    warn!("⌨️ Reader for {} stopped: {}", name, e);
                }
            });
            device_count += 1;
        }

        if device_count == 0 {
            return Err(CleanError::Hotkey(
                "No keyboard devices available (is the user in the `input` group?)".to_string(),
            ));
        }

        Ok(Self { device_count })
    }
}

/// Blocking event loop for one input device
fn watch_device(mut device: Device, chord: &HotkeyChord, tx: &mpsc::Sender<()>) -> CleanResult<()> {
    let mut held: HashSet<Key> = HashSet::new();

    loop {
        for event in device.fetch_events()? {
            let key = match event.kind() {
                InputEventKind::Key(key) => key,
                _ => continue,
            };

            match event.value() {
                // Press
                1 => {
                    held.insert(key);
                    if key == chord.key && chord.modifiers_held(&held) {
                        debug!("⌨️ Hotkey chord hit");
                        // Drop the event if the daemon is still busy with
                        // the previous clean; the hotkey is not a queue.
                        let _ = tx.try_send(());
                    }
                }
                // Release
                0 => {
                    held.remove(&key);
                }
                // Auto-repeat
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_names() {
        assert_eq!(parse_key("KEY_C"), Some(Key::KEY_C));
        assert_eq!(parse_key("c"), Some(Key::KEY_C));
        assert_eq!(parse_key("KEY_LEFTCTRL"), Some(Key::KEY_LEFTCTRL));
        assert_eq!(parse_key("ctrl"), Some(Key::KEY_LEFTCTRL));
        assert_eq!(parse_key("F5"), Some(Key::KEY_F5));
        assert_eq!(parse_key("KEY_BOGUS"), None);
    }

    #[test]
    fn test_chord_from_default_config() {
        let chord = HotkeyChord::from_config(&Config::default()).expect("default chord");
        assert_eq!(chord.key, Key::KEY_C);
        assert_eq!(chord.modifiers, vec![Key::KEY_LEFTCTRL, Key::KEY_LEFTALT]);
    }

    #[test]
    fn test_modifier_variants_interchangeable() {
        let chord = HotkeyChord {
            key: Key::KEY_C,
            modifiers: vec![Key::KEY_LEFTCTRL, Key::KEY_LEFTALT],
        };

        let mut held = HashSet::new();
        held.insert(Key::KEY_RIGHTCTRL);
        held.insert(Key::KEY_LEFTALT);
        assert!(chord.modifiers_held(&held));

        held.remove(&Key::KEY_RIGHTCTRL);
        assert!(!chord.modifiers_held(&held));
    }
}
