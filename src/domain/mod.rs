// Domain layer: UI state enums, chat models and the ports the controllers talk through.

pub mod model;
pub mod ports;
