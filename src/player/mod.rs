pub mod ai;
pub mod controller;

pub use ai::EngineKind;
pub use controller::PlayerController;
