//! Connection Supervisor
//!
//! This example shows the intended embedding pattern: the machine is built
//! once, then a polling loop decides when to step it and when to request
//! transitions. The engine never schedules anything itself.
//!
//! Key concepts:
//! - The builder API
//! - The caller owns the cadence (here, iterations of a plain loop)
//! - Illegal requests are recoverable errors, not panics
//!
//! Run with: cargo run --example polling_loop

use machina::{BuildError, Machine, MachineBuilder, StateCallbacks, StateId};

const IDLE: StateId = 0;
const CONNECTING: StateId = 1;
const ONLINE: StateId = 2;

/// Per-step context: a crude simulation of a link coming up.
#[derive(Default)]
struct Link {
    attempts: u32,
    packets: u32,
}

fn build_supervisor() -> Result<Machine<Link>, BuildError> {
    MachineBuilder::new(3)
        .initial(IDLE)
        .state(IDLE, StateCallbacks::none())
        .state(
            CONNECTING,
            StateCallbacks::none()
                .enter(|_exited, link: &mut Link| {
                    link.attempts += 1;
                    println!("  dialing (attempt {})", link.attempts);
                })
                .steady(|_link| println!("  waiting for handshake")),
        )
        .state(
            ONLINE,
            StateCallbacks::none()
                .enter(|exited, _link: &mut Link| println!("  link up (from state {exited})"))
                .steady(|link: &mut Link| {
                    link.packets += 1;
                    println!("  forwarding packet {}", link.packets);
                }),
        )
        .transition(IDLE, CONNECTING)
        .transition(CONNECTING, ONLINE)
        .transition(CONNECTING, IDLE)
        .transition(ONLINE, IDLE)
        .build()
}

fn main() -> Result<(), BuildError> {
    println!("=== Connection Supervisor ===\n");

    let mut supervisor = build_supervisor()?;
    let mut link = Link::default();

    // Jumping straight to ONLINE is not wired up, and that is a normal,
    // recoverable error for the caller.
    if let Err(err) = supervisor.request_transition(ONLINE) {
        println!("rejected as expected: {err}\n");
    }

    println!("polling:");
    for tick in 0..6 {
        match supervisor.current_state() {
            IDLE => supervisor.request_transition(CONNECTING).unwrap(),
            // Pretend the handshake completes after one waiting tick.
            CONNECTING if tick >= 2 => supervisor.request_transition(ONLINE).unwrap(),
            _ => {}
        }
        supervisor.step(&mut link);
    }

    println!(
        "\nfinal state: {} after {} attempt(s), {} packet(s)",
        supervisor.current_state(),
        link.attempts,
        link.packets
    );
    println!("\n=== Example Complete ===");
    Ok(())
}
