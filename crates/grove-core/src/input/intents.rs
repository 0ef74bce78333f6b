/// Abstract actions the simulation understands.
/// Key bindings live with the host; only these reach the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    Attack,
    Charge,
}

/// A binding-resolved input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentEvent {
    Pressed(Action),
    Released(Action),
}

/// One frame of normalized intents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    pub move_left: bool,
    pub move_right: bool,
    /// Edge-triggered: true only on the frame the jump was pressed.
    pub jump_pressed: bool,
    /// Edge-triggered.
    pub attack_pressed: bool,
    /// Level-triggered: true while held.
    pub charge_held: bool,
}

impl Intents {
    /// Signed horizontal direction. Opposing inputs cancel.
    pub fn direction(&self) -> f32 {
        let mut dir = 0.0;
        if self.move_left {
            dir -= 1.0;
        }
        if self.move_right {
            dir += 1.0;
        }
        dir
    }
}

/// Accumulates intent events between frames.
/// The host pushes events as they arrive; the session reads one
/// [`Intents`] snapshot per step.
pub struct IntentQueue {
    events: Vec<IntentEvent>,
    held: Intents,
}

impl IntentQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
            held: Intents::default(),
        }
    }

    /// Push a new intent event.
    pub fn push(&mut self, event: IntentEvent) {
        self.events.push(event);
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Fold pending events into this frame's intents and clear the queue.
    /// A jump or attack pressed and released within one frame still counts.
    pub fn frame(&mut self) -> Intents {
        let mut jump_pressed = false;
        let mut attack_pressed = false;
        for event in std::mem::take(&mut self.events) {
            match event {
                IntentEvent::Pressed(action) => {
                    match action {
                        Action::Jump => jump_pressed = true,
                        Action::Attack => attack_pressed = true,
                        _ => {}
                    }
                    self.set_held(action, true);
                }
                IntentEvent::Released(action) => self.set_held(action, false),
            }
        }
        Intents {
            jump_pressed,
            attack_pressed,
            ..self.held
        }
    }

    fn set_held(&mut self, action: Action, down: bool) {
        match action {
            Action::MoveLeft => self.held.move_left = down,
            Action::MoveRight => self.held.move_right = down,
            Action::Charge => self.held.charge_held = down,
            Action::Jump | Action::Attack => {}
        }
    }
}

impl Default for IntentQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presses_are_edges() {
        let mut q = IntentQueue::new();
        q.push(IntentEvent::Pressed(Action::Jump));
        assert!(q.frame().jump_pressed);
        assert!(q.is_empty());
        assert!(!q.frame().jump_pressed, "held jump does not repeat");
    }

    #[test]
    fn tap_within_one_frame_counts() {
        let mut q = IntentQueue::new();
        q.push(IntentEvent::Pressed(Action::Attack));
        q.push(IntentEvent::Released(Action::Attack));
        assert!(q.frame().attack_pressed);
    }

    #[test]
    fn movement_and_charge_are_levels() {
        let mut q = IntentQueue::new();
        q.push(IntentEvent::Pressed(Action::MoveRight));
        q.push(IntentEvent::Pressed(Action::Charge));
        let f = q.frame();
        assert_eq!(f.direction(), 1.0);
        assert!(f.charge_held);
        let f = q.frame();
        assert!(f.charge_held);
        q.push(IntentEvent::Released(Action::Charge));
        assert!(!q.frame().charge_held);
    }

    #[test]
    fn opposing_directions_cancel() {
        let intents = Intents {
            move_left: true,
            move_right: true,
            ..Intents::default()
        };
        assert_eq!(intents.direction(), 0.0);
    }
}
