//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap. This is the classic embedded C FSM pattern expressed
//! in safe Rust.
//!
//! ```text
//!  NORMAL ──[entry hold completed]──▶ CALIBRATION
//!    ▲                                    │
//!    └───────[commit hold completed]──────┘
//! ```
//!
//! Normal runs the activation debounce every cycle it does not transition;
//! Calibration waits for the commit gesture and hands the live sample back
//! to the service for persistence.

use super::context::FsmContext;
use super::{StateDescriptor, StateId};
use log::info;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table. Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0 — Normal
        StateDescriptor {
            id: StateId::Normal,
            name: "Normal",
            on_enter: Some(normal_enter),
            on_exit: None,
            on_update: normal_update,
        },
        // Index 1 — Calibration
        StateDescriptor {
            id: StateId::Calibration,
            name: "Calibration",
            on_enter: Some(calibration_enter),
            on_exit: None,
            on_update: calibration_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  NORMAL state — monitoring pressure against the persisted threshold
// ═══════════════════════════════════════════════════════════════════════════

fn normal_enter(ctx: &mut FsmContext) {
    ctx.commands.mode_led = false;
    info!("NORMAL: monitoring, threshold={}", ctx.threshold);
}

fn normal_update(ctx: &mut FsmContext) -> Option<StateId> {
    // Entry gesture completed: switch mode now, skip the debounce step
    // this cycle so a transition cycle never doubles as a sense cycle.
    if ctx.hold_reached {
        return Some(StateId::Calibration);
    }

    if ctx.sample_valid {
        let relay = ctx.hysteresis.step(ctx.sample, ctx.threshold);
        ctx.commands.relay_on = relay;
    } else {
        // Fail-safe: an unreadable transducer releases the relay and
        // discards any confirmation window in progress.
        ctx.hysteresis.reset();
        ctx.commands.relay_on = false;
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  CALIBRATION state — waiting for the commit gesture
// ═══════════════════════════════════════════════════════════════════════════

fn calibration_enter(ctx: &mut FsmContext) {
    ctx.commands.mode_led = true;
    // The threshold is about to change; any half-confirmed detection
    // against the old value is meaningless. The relay command itself is
    // left as-is until the Normal-mode debounce re-evaluates it.
    ctx.hysteresis.reset();
    info!("CALIBRATION: entered, current threshold={}", ctx.threshold);
}

fn calibration_update(ctx: &mut FsmContext) -> Option<StateId> {
    if ctx.hold_reached {
        if ctx.sample_valid {
            ctx.pending_commit = Some(ctx.sample);
            info!("CALIBRATION: commit gesture, live sample={}", ctx.sample);
            return Some(StateId::Normal);
        }
        // No valid reading to commit — stay in calibration so the
        // operator can retry once the transducer recovers.
        log::warn!("CALIBRATION: commit gesture with no valid sample, ignoring");
    }

    None
}
