// Standalone components
pub mod badge;
pub mod button;
pub mod card;
pub mod file_drop;
pub mod input;
pub mod label;
pub mod page_header;
pub mod segmented_control;
pub mod skeleton;
pub mod textarea;

// Primitive wrappers
pub mod toast;

// Depends on button
pub mod sidebar;

pub use badge::*;
pub use button::*;
pub use card::*;
pub use file_drop::*;
pub use input::*;
pub use label::*;
pub use page_header::*;
pub use segmented_control::*;
pub use sidebar::*;
pub use skeleton::*;
pub use textarea::*;
pub use toast::*;
