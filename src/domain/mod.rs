// Domain layer: patient record, feature row, and the scorer port. No web or file concerns here.

pub mod model;
pub mod ports;
