//! Harness for exercising a cordial client without a network: a scripted
//! transport, payload fixtures, and a client wrapper that owns its runtime.


pub use helpers::*;
pub use local_transport::LocalTransport;
