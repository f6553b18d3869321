//! Control logic of the vein finder: buttons, brightness levels and PWM duty of the
//! red and orange channels. Boards implement the traits in [bsp].
//!
//! The `defmt` feature derives `defmt::Format` for the public value types. It is an
//! opt-in for firmware which logs over defmt, nothing in this workspace enables it.

// make `std` available when testing
#![cfg_attr(not(test), no_std)]
pub mod bsp;
pub mod config;
pub mod control;
pub mod debounce;
pub mod duty;
pub mod state;
