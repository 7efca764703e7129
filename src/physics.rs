//! Minimal 2D physics for the scene: integration, wall reflection and
//! overlap detection.
//!
//! `step` only moves bodies and reports what touched what.  Game rules live
//! behind a [`ContactObserver`]; `dispatch` feeds it the pairs once the whole
//! tick has been integrated, so rules never see half-moved bodies.

use glam::Vec2;

use crate::entities::{BodyId, GameState};

/// Largest distance a body may travel in one sub-step.
const MAX_SUBSTEP_TRAVEL: f32 = 0.25;
const MAX_SUBSTEPS: u32 = 32;
/// Half the height of a shield block.
const SHIELD_HALF_HEIGHT: f32 = 0.5;

// ── Bodies & contacts ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Body {
    Halo(BodyId),
    Ball(BodyId),
    /// Either side wall.
    Edge,
    Shield(BodyId),
    LifeBar,
    PowerUp(BodyId),
}

impl Body {
    pub const HALO: u32 = 0x1;
    pub const BALL: u32 = 0x2;
    pub const EDGE: u32 = 0x4;
    pub const SHIELD: u32 = 0x8;
    pub const LIFE_BAR: u32 = 0x10;
    pub const POWER_UP: u32 = 0x20;

    pub fn category(&self) -> u32 {
        match self {
            Body::Halo(_) => Self::HALO,
            Body::Ball(_) => Self::BALL,
            Body::Edge => Self::EDGE,
            Body::Shield(_) => Self::SHIELD,
            Body::LifeBar => Self::LIFE_BAR,
            Body::PowerUp(_) => Self::POWER_UP,
        }
    }
}

/// Two bodies that touched during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Contact {
    pub a: Body,
    pub b: Body,
}

impl Contact {
    pub fn new(a: Body, b: Body) -> Self {
        Self { a, b }
    }

    /// The pair with the lower category first, so handlers only match one
    /// order.
    pub fn ordered(&self) -> (Body, Body) {
        if self.a.category() <= self.b.category() {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }

    fn same_pair(&self, other: &Contact) -> bool {
        self.ordered() == other.ordered()
    }
}

/// Receives every contact pair after a physics step.
pub trait ContactObserver {
    fn on_contact(&mut self, a: Body, b: Body);
}

pub fn dispatch(contacts: &[Contact], observer: &mut dyn ContactObserver) {
    for contact in contacts {
        observer.on_contact(contact.a, contact.b);
    }
}

// ── Stepping ──────────────────────────────────────────────────────────────────

fn substeps_for(state: &GameState, dt: f32) -> u32 {
    let fastest = state
        .balls
        .iter()
        .map(|b| b.vel.length())
        .chain(state.halos.iter().map(|h| h.vel.length()))
        .chain(state.power_ups.iter().map(|p| p.vel.length()))
        .fold(0.0_f32, f32::max);
    let n = (fastest * dt / MAX_SUBSTEP_TRAVEL).ceil() as u32;
    n.clamp(1, MAX_SUBSTEPS)
}

/// Reflect off the side walls.  Returns `true` if the body hit one.
fn reflect_sides(pos: &mut Vec2, vel: &mut Vec2, radius: f32, left: f32, right: f32) -> bool {
    if pos.x - radius < left && vel.x < 0.0 {
        pos.x = left + radius;
        vel.x = -vel.x;
        true
    } else if pos.x + radius > right && vel.x > 0.0 {
        pos.x = right - radius;
        vel.x = -vel.x;
        true
    } else {
        false
    }
}

fn circles_touch(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance_squared(b) <= (ra + rb) * (ra + rb)
}

fn record(contacts: &mut Vec<Contact>, contact: Contact) {
    if !contacts.iter().any(|c| c.same_pair(&contact)) {
        contacts.push(contact);
    }
}

/// Advance every moving body by `dt` seconds and collect the contacts.
/// Each distinct pair is reported once, in the order first detected.
pub fn step(state: &mut GameState, dt: f32) -> Vec<Contact> {
    let mut contacts = Vec::new();
    let n = substeps_for(state, dt);
    let h = dt / n as f32;
    let bounds = state.bounds;

    for _ in 0..n {
        // ── 1. Integrate ─────────────────────────────────────────────────────
        for ball in &mut state.balls {
            ball.pos += ball.vel * h;
            if reflect_sides(&mut ball.pos, &mut ball.vel, ball.radius, bounds.left, bounds.right) {
                record(&mut contacts, Contact::new(Body::Ball(ball.id), Body::Edge));
            }
        }
        for halo in &mut state.halos {
            halo.pos += halo.vel * h;
            if reflect_sides(&mut halo.pos, &mut halo.vel, halo.radius, bounds.left, bounds.right) {
                record(&mut contacts, Contact::new(Body::Halo(halo.id), Body::Edge));
            }
        }
        for power_up in &mut state.power_ups {
            power_up.pos += power_up.vel * h;
        }

        // ── 2. Overlaps ──────────────────────────────────────────────────────
        for ball in &state.balls {
            for halo in &state.halos {
                if circles_touch(ball.pos, ball.radius, halo.pos, halo.radius) {
                    record(&mut contacts, Contact::new(Body::Ball(ball.id), Body::Halo(halo.id)));
                }
            }
            for power_up in &state.power_ups {
                if circles_touch(ball.pos, ball.radius, power_up.pos, power_up.radius) {
                    record(
                        &mut contacts,
                        Contact::new(Body::Ball(ball.id), Body::PowerUp(power_up.id)),
                    );
                }
            }
        }

        for halo in &state.halos {
            for shield in &state.shields {
                let dx = (halo.pos.x - shield.center.x).abs();
                let dy = (halo.pos.y - shield.center.y).abs();
                if dx <= shield.half_width + halo.radius && dy <= SHIELD_HALF_HEIGHT + halo.radius {
                    record(
                        &mut contacts,
                        Contact::new(Body::Halo(halo.id), Body::Shield(shield.id)),
                    );
                }
            }
            if let Some(bar) = &state.life_bar {
                if halo.pos.y + halo.radius >= bar.y {
                    record(&mut contacts, Contact::new(Body::Halo(halo.id), Body::LifeBar));
                }
            }
        }
    }

    contacts
}
