//! Valuation diagnostics.
//!
//! Warnings for missing and stale FX rates, and the sink trait the engine
//! reports them through. Front ends choose the sink: log it, print it, or
//! collect it for assertions.

mod sink;
mod warning;

pub use sink::*;
pub use warning::*;
