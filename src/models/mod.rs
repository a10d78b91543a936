pub mod conversation;
pub mod enums;
pub mod message;
pub mod symptom;

pub use conversation::*;
pub use enums::*;
pub use message::*;
pub use symptom::*;
