//! Traffic Light State Machine
//!
//! This example demonstrates a simple cyclic state machine driven from a
//! plain loop.
//!
//! Key concepts:
//! - Index-based state ids with named constants
//! - Deferred transitions: request first, commit on the next step
//! - Per-step context passed into callbacks
//!
//! Run with: cargo run --example traffic_light

use machina::{Machine, MachineError, StateCallbacks, StateId};

const RED: StateId = 0;
const GREEN: StateId = 1;
const YELLOW: StateId = 2;

fn light_name(id: StateId) -> &'static str {
    match id {
        RED => "Red",
        GREEN => "Green",
        YELLOW => "Yellow",
        _ => "?",
    }
}

/// Per-step context: counts how long the light has shown each color.
#[derive(Default)]
struct Dwell {
    ticks_in_state: u32,
}

fn light_callbacks(id: StateId) -> StateCallbacks<Dwell> {
    StateCallbacks::none()
        .steady(|dwell: &mut Dwell| dwell.ticks_in_state += 1)
        .enter(move |exited, dwell: &mut Dwell| {
            println!("  {} -> {}", light_name(exited), light_name(id));
            dwell.ticks_in_state = 0;
        })
}

fn main() -> Result<(), MachineError> {
    println!("=== Traffic Light State Machine ===\n");

    let mut light: Machine<Dwell> = Machine::new(3, RED)?;
    for id in [RED, GREEN, YELLOW] {
        light.register_state(id, light_callbacks(id))?;
    }
    // The cycle: Red -> Green -> Yellow -> Red -> ...
    light.register_transition(RED, GREEN)?;
    light.register_transition(GREEN, YELLOW)?;
    light.register_transition(YELLOW, RED)?;

    println!("Initial state: {}\n", light_name(light.current_state()));
    println!("Cycling:");

    let mut dwell = Dwell::default();
    for tick in 0..9 {
        // Hold each color for three ticks, then move on.
        if dwell.ticks_in_state == 2 {
            let next = light
                .valid_targets(light.current_state())?
                .next()
                .expect("every light has a successor");
            light.request_transition(next)?;
        }
        let now = light.step(&mut dwell);
        println!("  tick {tick}: {} (held {} ticks)", light_name(now), dwell.ticks_in_state);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
