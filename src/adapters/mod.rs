// Adapters layer: concrete implementations for external systems (template storage, http).

pub mod http;
pub mod storage;
