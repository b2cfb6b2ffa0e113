pub mod conversation;
pub mod enums;
pub mod health_record;
pub mod notification;
pub mod report;
pub mod user;

pub use conversation::*;
pub use enums::*;
pub use health_record::*;
pub use notification::*;
pub use report::*;
pub use user::*;
