//! Dashboard view state machine
//!
//! `ViewState` owns which tab (and which spam sub-tab) is active. Every
//! transition returns the data source the newly active view needs, so the
//! caller issues exactly one load per switch.

/// Top-level tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Overview,
    Search,
    Spam,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Overview, Tab::Search, Tab::Spam];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Search => "Lead Search",
            Tab::Spam => "Spam",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            Tab::Overview => '1',
            Tab::Search => '2',
            Tab::Spam => '3',
        }
    }

    pub fn from_shortcut(c: char) -> Option<Tab> {
        Tab::ALL.into_iter().find(|tab| tab.shortcut() == c)
    }

    pub fn next(&self) -> Tab {
        match self {
            Tab::Overview => Tab::Search,
            Tab::Search => Tab::Spam,
            Tab::Spam => Tab::Overview,
        }
    }

    pub fn prev(&self) -> Tab {
        match self {
            Tab::Overview => Tab::Spam,
            Tab::Search => Tab::Overview,
            Tab::Spam => Tab::Search,
        }
    }
}

/// Sub-tabs of the spam view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpamTab {
    #[default]
    Activities,
    Users,
}

impl SpamTab {
    pub const ALL: [SpamTab; 2] = [SpamTab::Activities, SpamTab::Users];

    pub fn title(&self) -> &'static str {
        match self {
            SpamTab::Activities => "Activities",
            SpamTab::Users => "Users",
        }
    }

    pub fn shortcut(&self) -> char {
        match self {
            SpamTab::Activities => 'a',
            SpamTab::Users => 'u',
        }
    }

    pub fn toggled(&self) -> SpamTab {
        match self {
            SpamTab::Activities => SpamTab::Users,
            SpamTab::Users => SpamTab::Activities,
        }
    }
}

/// The concrete view currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Overview,
    Search,
    Spam(SpamTab),
}

impl View {
    pub fn tab(&self) -> Tab {
        match self {
            View::Overview => Tab::Overview,
            View::Search => Tab::Search,
            View::Spam(_) => Tab::Spam,
        }
    }

    /// Data the view loads on activation. Lead search only loads on an
    /// explicit query, so it has no source of its own.
    pub fn source(&self) -> Option<DataSource> {
        match self {
            View::Overview => Some(DataSource::Summary),
            View::Search => None,
            View::Spam(SpamTab::Activities) => Some(DataSource::FlaggedEvents),
            View::Spam(SpamTab::Users) => Some(DataSource::FlaggedSubjects),
        }
    }

    pub fn breadcrumb(&self) -> String {
        match self {
            View::Spam(sub) => format!("{} › {}", Tab::Spam.title(), sub.title()),
            other => other.tab().title().to_string(),
        }
    }
}

/// Data sources loaded when a view is activated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSource {
    Summary,
    FlaggedEvents,
    FlaggedSubjects,
}

/// Active tab plus the remembered spam sub-tab
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    current: View,
    spam_tab: SpamTab,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            current: View::Overview,
            spam_tab: SpamTab::default(),
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn active_tab(&self) -> Tab {
        self.current.tab()
    }

    pub fn spam_tab(&self) -> SpamTab {
        self.spam_tab
    }

    pub fn is_active(&self, tab: Tab) -> bool {
        self.active_tab() == tab
    }

    /// Activate `tab`. Selecting the spam tab restores the last sub-tab.
    ///
    /// Re-selecting the active tab is a transition too and reloads its data.
    pub fn select_tab(&mut self, tab: Tab) -> Option<DataSource> {
        self.current = match tab {
            Tab::Overview => View::Overview,
            Tab::Search => View::Search,
            Tab::Spam => View::Spam(self.spam_tab),
        };
        self.current.source()
    }

    /// Activate a spam sub-tab, switching to the spam tab if needed
    pub fn select_spam_tab(&mut self, sub: SpamTab) -> Option<DataSource> {
        self.spam_tab = sub;
        self.current = View::Spam(sub);
        self.current.source()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_overview() {
        let state = ViewState::new();
        assert_eq!(state.current(), View::Overview);
        assert_eq!(state.current().source(), Some(DataSource::Summary));
    }

    #[test]
    fn every_switch_leaves_exactly_one_tab_active() {
        let mut state = ViewState::new();
        let sequence = [
            Tab::Spam,
            Tab::Search,
            Tab::Search,
            Tab::Overview,
            Tab::Spam,
            Tab::Overview,
        ];
        for tab in sequence {
            state.select_tab(tab);
            let active: Vec<Tab> = Tab::ALL
                .into_iter()
                .filter(|t| state.is_active(*t))
                .collect();
            assert_eq!(active, vec![tab]);
        }
    }

    #[test]
    fn spam_tab_restores_last_sub_tab() {
        let mut state = ViewState::new();
        assert_eq!(
            state.select_spam_tab(SpamTab::Users),
            Some(DataSource::FlaggedSubjects)
        );
        state.select_tab(Tab::Overview);
        assert_eq!(state.select_tab(Tab::Spam), Some(DataSource::FlaggedSubjects));
        assert_eq!(state.current(), View::Spam(SpamTab::Users));
    }

    #[test]
    fn search_tab_has_no_automatic_load() {
        let mut state = ViewState::new();
        assert_eq!(state.select_tab(Tab::Search), None);
    }

    #[test]
    fn shortcuts_map_to_tabs() {
        assert_eq!(Tab::from_shortcut('1'), Some(Tab::Overview));
        assert_eq!(Tab::from_shortcut('3'), Some(Tab::Spam));
        assert_eq!(Tab::from_shortcut('9'), None);
        assert_eq!(Tab::Overview.prev().next(), Tab::Overview);
    }
}
