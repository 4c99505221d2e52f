pub mod loopback;
pub mod roster;
