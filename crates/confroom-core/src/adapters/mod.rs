pub mod events;
pub mod html;
pub mod recording;
pub mod sdk;
pub mod surface;
pub mod token;
