//! Edge detection between two consecutive accepted snapshots

use crate::domain::models::{Buttons, Edge, TransientEvents};

/// The boolean signals that are monitored for press/release edges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    pub touching: bool,
    pub buttons: Buttons,
}

impl Edge {
    /// `down` on a false → true transition, `up` on true → false
    pub fn between(now: bool, prev: bool) -> Self {
        Self {
            down: now && !prev,
            up: !now && prev,
        }
    }
}

/// Diff every monitored signal independently against its previous value
pub fn detect(now: &Signals, prev: &Signals) -> TransientEvents {
    TransientEvents {
        touch: Edge::between(now.touching, prev.touching),
        click: Edge::between(now.buttons.click, prev.buttons.click),
        home: Edge::between(now.buttons.home, prev.buttons.home),
        app: Edge::between(now.buttons.app, prev.buttons.app),
        plus: Edge::between(now.buttons.plus, prev.buttons.plus),
        minus: Edge::between(now.buttons.minus, prev.buttons.minus),
    }
}
