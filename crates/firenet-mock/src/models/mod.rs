pub mod controls;
pub mod stove;

pub use controls::ControlUpdate;
pub use stove::StoveDocument;
