//! Input sources folded into a single activate pulse
//!
//! Browser events arrive between frames and only touch these detectors.
//! Once per tick the game reads `poll_activate_pulse`, then `commit` arms
//! every detector for the next tick.

/// Rising-edge detector for one input source
///
/// A press is latched when the level goes from released to pressed, so a
/// tap that starts and ends between two ticks still produces one pulse.
/// Holding the input never re-fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeDetector {
    /// Last sampled level
    down: bool,
    /// Press seen since the last commit
    pressed: bool,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current level of the source
    pub fn sample(&mut self, down: bool) {
        if down && !self.down {
            self.pressed = true;
        }
        self.down = down;
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    /// A press happened since the last commit
    pub fn rising(&self) -> bool {
        self.pressed
    }

    /// Consume the edge for this tick
    pub fn commit(&mut self) {
        self.pressed = false;
    }
}

/// A bound key and its edge state
#[derive(Debug, Clone, PartialEq, Eq)]
struct KeyBinding {
    code: String,
    edge: EdgeDetector,
}

/// Keyboard keys that trigger the activate pulse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardSource {
    bindings: Vec<KeyBinding>,
}

impl Default for KeyboardSource {
    fn default() -> Self {
        Self::new(KeyboardSource::DEFAULT_KEYS)
    }
}

impl KeyboardSource {
    /// `KeyboardEvent.code` values bound by default
    pub const DEFAULT_KEYS: &'static [&'static str] = &["Space", "ArrowUp", "KeyW"];

    pub fn new(codes: &[&str]) -> Self {
        Self {
            bindings: codes
                .iter()
                .map(|code| KeyBinding {
                    code: (*code).to_string(),
                    edge: EdgeDetector::new(),
                })
                .collect(),
        }
    }

    /// Update a key's level; returns whether the key is bound
    pub fn set_key(&mut self, code: &str, down: bool) -> bool {
        match self.bindings.iter_mut().find(|b| b.code == code) {
            Some(binding) => {
                binding.edge.sample(down);
                true
            }
            None => false,
        }
    }

    pub fn rising(&self) -> bool {
        self.bindings.iter().any(|b| b.edge.rising())
    }

    pub fn commit(&mut self) {
        for binding in &mut self.bindings {
            binding.edge.commit();
        }
    }
}

/// Keyboard, pointer/touch and first-gamepad input merged into one pulse
#[derive(Debug, Clone, Default)]
pub struct InputSource {
    keyboard: KeyboardSource,
    /// Mouse button and touch share one pointer level
    pointer: EdgeDetector,
    /// Button 0 of the first connected gamepad
    gamepad: EdgeDetector,
}

impl InputSource {
    pub fn new(keyboard: KeyboardSource) -> Self {
        Self {
            keyboard,
            ..Self::default()
        }
    }

    /// Returns true if the key is bound (the host should swallow the event)
    pub fn key_down(&mut self, code: &str) -> bool {
        self.keyboard.set_key(code, true)
    }

    pub fn key_up(&mut self, code: &str) -> bool {
        self.keyboard.set_key(code, false)
    }

    /// Mouse down or touch start
    pub fn pointer_down(&mut self) {
        self.pointer.sample(true);
    }

    /// Mouse up or touch end
    pub fn pointer_up(&mut self) {
        self.pointer.sample(false);
    }

    /// Polled gamepad state, sampled once per frame by the host
    pub fn sample_gamepad(&mut self, pressed: bool) {
        self.gamepad.sample(pressed);
    }

    /// Any source pressed since the last commit
    pub fn poll_activate_pulse(&self) -> bool {
        self.keyboard.rising() || self.pointer.rising() || self.gamepad.rising()
    }

    /// Snapshot for next tick's edge detection; call once per tick after the
    /// game has read the pulse
    pub fn commit(&mut self) {
        self.keyboard.commit();
        self.pointer.commit();
        self.gamepad.commit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_fires_once_per_press() {
        let mut edge = EdgeDetector::new();
        edge.sample(true);
        assert!(edge.rising());
        edge.commit();

        // Held: no new pulse
        edge.sample(true);
        assert!(!edge.rising());
        edge.commit();

        edge.sample(false);
        assert!(!edge.rising());
        edge.sample(true);
        assert!(edge.rising());
    }

    #[test]
    fn test_quick_tap_between_ticks_is_kept() {
        let mut edge = EdgeDetector::new();
        edge.sample(true);
        edge.sample(false);
        assert!(edge.rising());
        assert!(!edge.is_down());
        edge.commit();
        assert!(!edge.rising());
    }

    #[test]
    fn test_key_repeat_does_not_refire() {
        let mut input = InputSource::default();
        assert!(input.key_down("Space"));
        assert!(input.poll_activate_pulse());
        input.commit();

        // Browser auto-repeat sends more keydowns while held
        input.key_down("Space");
        input.key_down("Space");
        assert!(!input.poll_activate_pulse());
        input.commit();

        input.key_up("Space");
        input.key_down("Space");
        assert!(input.poll_activate_pulse());
    }

    #[test]
    fn test_unbound_keys_ignored() {
        let mut input = InputSource::default();
        assert!(!input.key_down("KeyQ"));
        assert!(!input.poll_activate_pulse());
    }

    #[test]
    fn test_second_bound_key_fires_while_first_held() {
        let mut input = InputSource::default();
        input.key_down("Space");
        input.commit();
        input.key_down("ArrowUp");
        assert!(input.poll_activate_pulse());
    }

    #[test]
    fn test_sources_are_merged() {
        let mut input = InputSource::default();
        input.pointer_down();
        input.sample_gamepad(true);
        input.key_down("KeyW");
        // Three simultaneous presses are still one pulse for this tick
        assert!(input.poll_activate_pulse());
        input.commit();
        assert!(!input.poll_activate_pulse());

        // Gamepad held across frames does not repeat
        input.sample_gamepad(true);
        assert!(!input.poll_activate_pulse());
        input.sample_gamepad(false);
        input.sample_gamepad(true);
        assert!(input.poll_activate_pulse());
    }

    #[test]
    fn test_custom_bindings() {
        let mut input = InputSource::new(KeyboardSource::new(&["Enter"]));
        assert!(!input.key_down("Space"));
        assert!(input.key_down("Enter"));
        assert!(input.poll_activate_pulse());
    }
}
