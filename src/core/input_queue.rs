use std::collections::VecDeque;

use super::controller::Button;

pub const DEFAULT_QUEUE_CAPACITY: usize = 256;

/// Platform-agnostic input event, produced by the window layer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Keyboard key pressed or released
    Key { button: Button, pressed: bool },
    /// Mouse button pressed or released
    MouseButton { button: Button, pressed: bool },
    /// Vertical scroll offset (positive = away from the user)
    Scroll { delta: f32 },
    /// Cursor moved to an absolute window position
    CursorMoved { x: f32, y: f32 },
    /// Cursor came back over the window
    CursorEntered,
    /// Window gained or lost keyboard focus
    Focus { focused: bool },
}

impl InputEvent {
    /// Events that change held-button or focus state and must never be lost
    pub fn changes_state(&self) -> bool {
        !matches!(self, InputEvent::CursorMoved { .. } | InputEvent::Scroll { .. })
    }
}

/// Bounded FIFO of input events, drained once per frame
#[derive(Debug, Clone)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
    capacity: usize,
    dropped: u64,
}

impl InputQueue {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    /// Queue an event. Returns false if the event had to be dropped.
    ///
    /// A full queue first merges runs of cursor moves (positions are
    /// absolute, the later one wins), then evicts the oldest scroll. Events
    /// that change button or focus state are always accepted, even past
    /// capacity.
    pub fn push(&mut self, event: InputEvent) -> bool {
        if self.events.len() < self.capacity {
            self.events.push_back(event);
            return true;
        }

        if let InputEvent::CursorMoved { .. } = event {
            if let Some(last) = self.events.back_mut() {
                if matches!(last, InputEvent::CursorMoved { .. }) {
                    *last = event;
                    return true;
                }
            }
        }

        self.coalesce_cursor_moves();
        if self.events.len() < self.capacity {
            self.events.push_back(event);
            return true;
        }

        if !matches!(event, InputEvent::Scroll { .. }) && self.evict_oldest_scroll() {
            self.events.push_back(event);
            return true;
        }

        if event.changes_state() {
            log::warn!(
                "Input queue over capacity ({} events), keeping {:?}",
                self.capacity,
                event
            );
            self.events.push_back(event);
            return true;
        }

        self.dropped += 1;
        log::warn!(
            "Input queue full ({} events), dropping {:?}",
            self.capacity,
            event
        );
        false
    }

    /// Collapse each run of adjacent cursor moves into its last position
    fn coalesce_cursor_moves(&mut self) {
        let mut kept: VecDeque<InputEvent> = VecDeque::with_capacity(self.capacity);
        for event in self.events.drain(..) {
            let merge = matches!(event, InputEvent::CursorMoved { .. })
                && matches!(kept.back(), Some(InputEvent::CursorMoved { .. }));
            if merge {
                kept.pop_back();
            }
            kept.push_back(event);
        }
        self.events = kept;
    }

    fn evict_oldest_scroll(&mut self) -> bool {
        let Some(index) = self
            .events
            .iter()
            .position(|e| matches!(e, InputEvent::Scroll { .. }))
        else {
            return false;
        };
        self.events.remove(index);
        self.dropped += 1;
        log::warn!("Input queue full ({} events), dropping oldest scroll", self.capacity);
        true
    }

    /// Take every queued event in arrival order
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total events dropped because the queue was full
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_order() {
        let mut queue = InputQueue::new(8);
        queue.push(InputEvent::Key { button: Button::AltLeft, pressed: true });
        queue.push(InputEvent::CursorMoved { x: 1.0, y: 2.0 });
        queue.push(InputEvent::Scroll { delta: 1.0 });

        let events: Vec<_> = queue.drain().collect();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], InputEvent::Key { .. }));
        assert!(matches!(events[1], InputEvent::CursorMoved { .. }));
        assert!(matches!(events[2], InputEvent::Scroll { .. }));
        assert!(queue.is_empty());
    }

    #[test]
    fn full_queue_coalesces_cursor_moves() {
        let mut queue = InputQueue::new(2);
        queue.push(InputEvent::Scroll { delta: 1.0 });
        queue.push(InputEvent::CursorMoved { x: 1.0, y: 1.0 });

        assert!(queue.push(InputEvent::CursorMoved { x: 5.0, y: 6.0 }));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dropped(), 0);

        let events: Vec<_> = queue.drain().collect();
        assert_eq!(events[1], InputEvent::CursorMoved { x: 5.0, y: 6.0 });
    }

    #[test]
    fn full_queue_drops_other_events() {
        let mut queue = InputQueue::new(1);
        queue.push(InputEvent::CursorMoved { x: 0.0, y: 0.0 });

        assert!(!queue.push(InputEvent::Scroll { delta: 2.0 }));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.dropped(), 1);
    }

    #[test]
    fn full_queue_merges_cursor_runs_to_make_room() {
        let mut queue = InputQueue::new(3);
        queue.push(InputEvent::CursorMoved { x: 1.0, y: 1.0 });
        queue.push(InputEvent::CursorMoved { x: 2.0, y: 2.0 });
        queue.push(InputEvent::Key { button: Button::AltLeft, pressed: true });

        assert!(queue.push(InputEvent::Scroll { delta: 1.0 }));
        assert_eq!(queue.dropped(), 0);

        let events: Vec<_> = queue.drain().collect();
        assert_eq!(
            events,
            vec![
                InputEvent::CursorMoved { x: 2.0, y: 2.0 },
                InputEvent::Key { button: Button::AltLeft, pressed: true },
                InputEvent::Scroll { delta: 1.0 },
            ]
        );
    }

    #[test]
    fn full_queue_evicts_scroll_for_button_release() {
        let mut queue = InputQueue::new(2);
        queue.push(InputEvent::Scroll { delta: 1.0 });
        queue.push(InputEvent::MouseButton { button: Button::MouseLeft, pressed: true });

        assert!(queue.push(InputEvent::MouseButton { button: Button::MouseLeft, pressed: false }));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dropped(), 1);
    }

    #[test]
    fn state_changes_are_kept_past_capacity() {
        let mut queue = InputQueue::new(1);
        queue.push(InputEvent::Key { button: Button::AltLeft, pressed: true });

        assert!(queue.push(InputEvent::Focus { focused: false }));
        assert_eq!(queue.len(), 2);
        assert!(!queue.push(InputEvent::CursorMoved { x: 0.0, y: 0.0 }));
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let queue = InputQueue::new(0);
        assert_eq!(queue.capacity(), 1);
    }
}
