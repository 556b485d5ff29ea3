// Adapters layer: HTTP surface over the prediction service.

pub mod http;
