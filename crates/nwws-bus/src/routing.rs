//! Exchange/routing-key topology. A single durable direct exchange
//! carries every envelope; the routing key names the product stream
//! (`"warning"` today, room for others later without a topology
//! change).

pub const EXCHANGE: &str = "live.exchange";
pub const ROUTING_KEY_WARNING: &str = "warning";
