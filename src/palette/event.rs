use crate::core::CommandId;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteEvent {
    Opened,
    /// The palette was hidden; the host should return focus to the terminal.
    Closed,
    ActionDispatched { id: CommandId },
    CommandlineDispatched { commandline: String },
}

#[derive(Debug, Default)]
pub struct EventQueue {
    queue: VecDeque<PaletteEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: PaletteEvent) {
        self.queue.push_back(event);
    }

    pub fn next_event(&mut self) -> Option<PaletteEvent> {
        self.queue.pop_front()
    }

    pub fn drain(&mut self) -> Vec<PaletteEvent> {
        self.queue.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_come_out_in_emit_order() {
        let mut queue = EventQueue::new();
        queue.emit(PaletteEvent::Opened);
        queue.emit(PaletteEvent::ActionDispatched {
            id: CommandId::from("newTab"),
        });
        queue.emit(PaletteEvent::Closed);

        assert_eq!(queue.next_event(), Some(PaletteEvent::Opened));
        assert_eq!(
            queue.drain(),
            vec![
                PaletteEvent::ActionDispatched {
                    id: CommandId::from("newTab")
                },
                PaletteEvent::Closed,
            ]
        );
        assert!(queue.is_empty());
        assert_eq!(queue.next_event(), None);
    }
}
