use sdl2::event::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Running,
    Closing,
}

impl FrameState {
    /// `Closing` is final: once a close was requested no event reopens the loop.
    pub fn next(self, close_requested: bool) -> FrameState {
        match self {
            FrameState::Running if close_requested => FrameState::Closing,
            state => state,
        }
    }

    pub fn is_running(self) -> bool {
        self == FrameState::Running
    }
}

/// Only the window system's quit request ends the loop. Keys, Escape
/// included, go to the demo.
pub fn is_close_request(event: &Event) -> bool {
    matches!(event, Event::Quit { .. })
}

/// Number of presented frames since the loop started.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrameCounter(u64);

impl FrameCounter {
    pub fn tick(&mut self) {
        self.0 += 1;
    }

    pub fn frames(&self) -> u64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdl2::keyboard::{Keycode, Mod};

    #[test]
    fn close_request_ends_the_loop() {
        let state = FrameState::Running.next(false);
        assert!(state.is_running());
        let state = state.next(true);
        assert_eq!(state, FrameState::Closing);
        assert_eq!(state.next(false), FrameState::Closing);
    }

    #[test]
    fn only_quit_is_a_close_request() {
        assert!(is_close_request(&Event::Quit { timestamp: 0 }));
        let escape = Event::KeyDown {
            timestamp: 0,
            window_id: 1,
            keycode: Some(Keycode::Escape),
            scancode: None,
            keymod: Mod::NOMOD,
            repeat: false,
        };
        assert!(!is_close_request(&escape));
    }

    #[test]
    fn counter_counts_ticks() {
        let mut counter = FrameCounter::default();
        for _ in 0..3 {
            counter.tick();
        }
        assert_eq!(counter.frames(), 3);
    }
}
