pub mod chat_interface;
pub mod chat_thread;
pub mod dashboard_chat_interface;
pub mod document_upload;
pub mod language_toggle;
pub mod precedent_finder;

pub use chat_interface::ChatInterface;
pub use dashboard_chat_interface::DashboardChatInterface;
pub use document_upload::DocumentUploadInterface;
pub use language_toggle::LanguageToggle;
pub use precedent_finder::PrecedentFinderInterface;
