//! # Integration Flows
//!
//! Every flow builds real containers through `bridge-runtime` and talks to
//! the services only through their inbound ports.

pub mod asset_flows;
pub mod htlc_swap;
pub mod monitor_flows;
