pub mod chat;
pub mod content;
pub mod history;
pub mod image;

pub use self::chat::*;
pub use self::content::*;
pub use self::history::*;
pub use self::image::*;
