// Domain layer - Channels, readings and series storage
pub mod channel;
pub mod reading;
pub mod registry;
pub mod series;
