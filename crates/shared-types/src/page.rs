use serde::{Deserialize, Serialize};

/// Page identifiers recognized by the dashboard shell.
///
/// Each `dashboard/*` route passes one of these as a literal to the shell,
/// which uses it to highlight the matching navigation entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardPage {
    Chat,
    Precedent,
    Upload,
}

/// Dashboard pages in navigation order.
pub const ALL_DASHBOARD_PAGES: &[DashboardPage] = &[
    DashboardPage::Chat,
    DashboardPage::Precedent,
    DashboardPage::Upload,
];

impl DashboardPage {
    pub fn as_str(&self) -> &'static str {
        match self {
            DashboardPage::Chat => "chat",
            DashboardPage::Precedent => "precedent",
            DashboardPage::Upload => "upload",
        }
    }

    /// Parse a page key. Only the identifiers the shell knows are accepted.
    pub fn from_key(s: &str) -> Option<Self> {
        match s {
            "chat" => Some(DashboardPage::Chat),
            "precedent" => Some(DashboardPage::Precedent),
            "upload" => Some(DashboardPage::Upload),
            _ => None,
        }
    }

    /// URL path of the dashboard route for this page.
    pub fn path(&self) -> &'static str {
        match self {
            DashboardPage::Chat => "/dashboard/chat",
            DashboardPage::Precedent => "/dashboard/precedent",
            DashboardPage::Upload => "/dashboard/upload",
        }
    }
}

/// Feature panels a page can mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Chat,
    DashboardChat,
    PrecedentFinder,
    DocumentUpload,
}

impl Panel {
    /// Component name of the panel, used as its `data-panel` marker.
    pub fn name(&self) -> &'static str {
        match self {
            Panel::Chat => "ChatInterface",
            Panel::DashboardChat => "DashboardChatInterface",
            Panel::PrecedentFinder => "PrecedentFinderInterface",
            Panel::DocumentUpload => "DocumentUploadInterface",
        }
    }
}

/// How a route page is assembled: guard, optional shell, one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageComposition {
    pub guarded: bool,
    /// `None` renders the panel on the bare page background.
    pub shell: Option<DashboardPage>,
    pub panel: Panel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for page in ALL_DASHBOARD_PAGES {
            assert_eq!(DashboardPage::from_key(page.as_str()), Some(*page));
        }
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert_eq!(DashboardPage::from_key("Chat"), None);
        assert_eq!(DashboardPage::from_key("settings"), None);
        assert_eq!(DashboardPage::from_key(""), None);
    }

    #[test]
    fn paths_live_under_dashboard() {
        for page in ALL_DASHBOARD_PAGES {
            assert_eq!(page.path(), format!("/dashboard/{}", page.as_str()));
        }
    }
}
