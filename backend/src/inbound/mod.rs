//! Inbound adapters translating transports into driving ports.

pub mod http;
