//! Host-side integration test harness.
//!
//! These run on the host (x86_64) and exercise the full control path —
//! gesture poll, mode FSM, activation debounce, threshold persistence —
//! against mock hardware, without any real peripherals.

mod controller_tests;
mod mock_hw;
mod scenario_tests;
