use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::core::{Action, Command, NavigateTarget, NotificationCenter, NotifyLevel};
use crate::domain::backoffice::{
    DashboardSummary, FetchError, FetchOutcome, FetchRequest, FlaggedEvent,
    FlaggedSubject, LeadDetail, SpamTab, Tab, Ticket, View, ViewState,
};
use crate::infrastructure::runtime::RuntimeEvent;
use crate::modules::export::{self, ExportCategory, ExportFormat};

/// Content of one result area
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelState<T> {
    /// Nothing requested yet
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(FetchError),
}

impl<T> PanelState<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            PanelState::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, PanelState::Loading)
    }

    pub fn failed(&self) -> Option<&FetchError> {
        match self {
            PanelState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> From<Result<T, FetchError>> for PanelState<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => PanelState::Loaded(value),
            Err(err) => PanelState::Failed(err),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Command,
}

/// Dashboard controller.
///
/// Owns the view state and every panel. Fetches are queued as
/// `(ticket, request)` pairs that the caller drains with
/// [`App::take_requests`] and hands to the runtime; their outcomes come back
/// through [`App::apply_runtime_event`] and overwrite the target panel in
/// arrival order.
#[derive(Debug)]
pub struct App {
    pub settings: Settings,
    pub view: ViewState,

    pub summary: PanelState<DashboardSummary>,
    pub lead: PanelState<LeadDetail>,
    pub flagged_events: PanelState<Vec<FlaggedEvent>>,
    pub flagged_subjects: PanelState<Vec<FlaggedSubject>>,

    pub notifications: NotificationCenter,

    pub input_mode: InputMode,
    pub search_input: String,
    pub command_input: String,
    pub last_search: Option<String>,

    pub show_help: bool,
    pub show_settings: bool,
    pub should_quit: bool,
    pub scroll: usize,

    refreshing: Option<Ticket>,
    pending_requests: Vec<(Ticket, FetchRequest)>,
    next_ticket: Ticket,
}

impl Default for App {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let notifications =
            NotificationCenter::new(settings.notification_ttl, settings.max_notifications);
        Self {
            settings,
            view: ViewState::new(),
            summary: PanelState::Idle,
            lead: PanelState::Idle,
            flagged_events: PanelState::Idle,
            flagged_subjects: PanelState::Idle,
            notifications,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            command_input: String::new(),
            last_search: None,
            show_help: false,
            show_settings: false,
            should_quit: false,
            scroll: 0,
            refreshing: None,
            pending_requests: Vec::new(),
            next_ticket: 1,
        }
    }

    /// Load the initial view
    pub fn start(&mut self) {
        if let Some(source) = self.view.current().source() {
            self.queue_fetch(source.into());
        }
    }

    pub fn current_view(&self) -> View {
        self.view.current()
    }

    pub fn notify(&mut self, level: NotifyLevel, text: impl Into<String>) {
        self.notifications.push(level, text);
    }

    pub fn on_tick(&mut self) {
        self.notifications.expire(Instant::now());
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing.is_some()
    }

    // Navigation

    pub fn select_tab(&mut self, tab: Tab) {
        self.scroll = 0;
        if let Some(source) = self.view.select_tab(tab) {
            self.queue_fetch(source.into());
        }
    }

    pub fn select_spam_tab(&mut self, sub: SpamTab) {
        self.scroll = 0;
        if let Some(source) = self.view.select_spam_tab(sub) {
            self.queue_fetch(source.into());
        }
    }

    pub fn cycle_tab(&mut self, forward: bool) {
        let current = self.view.active_tab();
        let tab = if forward { current.next() } else { current.prev() };
        self.select_tab(tab);
    }

    /// Switch spam sub-tab; ignored outside the spam tab
    pub fn toggle_spam_tab(&mut self) {
        if let View::Spam(sub) = self.view.current() {
            self.select_spam_tab(sub.toggled());
        }
    }

    pub fn scroll_down(&mut self) {
        self.scroll = (self.scroll + 1).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Offset of the last row of the active table
    fn max_scroll(&self) -> usize {
        let rows = match self.view.current() {
            View::Overview => 0,
            View::Search => self.lead.loaded().map_or(0, |detail| detail.activities.len()),
            View::Spam(SpamTab::Activities) => self.flagged_events.loaded().map_or(0, Vec::len),
            View::Spam(SpamTab::Users) => self.flagged_subjects.loaded().map_or(0, Vec::len),
        };
        rows.saturating_sub(1)
    }

    // Search

    pub fn enter_search(&mut self) {
        if !self.view.is_active(Tab::Search) {
            self.select_tab(Tab::Search);
        }
        self.input_mode = InputMode::Search;
    }

    pub fn exit_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn submit_search(&mut self) {
        let input = self.search_input.clone();
        self.exit_search();
        self.search(&input);
    }

    /// Look up a lead by id. Blank input is rejected without a request.
    pub fn search(&mut self, lead_id: &str) -> Option<Ticket> {
        let lead_id = lead_id.trim();
        if lead_id.is_empty() {
            self.notify(NotifyLevel::Error, "Please enter a lead ID");
            return None;
        }
        self.search_input = lead_id.to_string();
        self.last_search = Some(lead_id.to_string());
        Some(self.queue_fetch(FetchRequest::Lead(lead_id.to_string())))
    }

    // Refresh

    /// Re-issue the active view's load
    pub fn refresh(&mut self) {
        let request = match self.view.current().source() {
            Some(source) => FetchRequest::from(source),
            None => match self.last_search.clone() {
                Some(lead_id) => FetchRequest::Lead(lead_id),
                None => {
                    self.notify(NotifyLevel::Error, "Please enter a lead ID");
                    return;
                }
            },
        };
        let ticket = self.queue_fetch(request);
        self.refreshing = Some(ticket);
    }

    // Command line

    pub fn enter_command(&mut self) {
        self.input_mode = InputMode::Command;
        self.command_input.clear();
    }

    pub fn exit_command(&mut self) {
        self.input_mode = InputMode::Normal;
        self.command_input.clear();
    }

    pub fn apply_command(&mut self) {
        let input = self.command_input.trim().to_string();
        self.exit_command();
        if input.is_empty() {
            return;
        }
        let cmd = crate::core::parse_command(&input);
        let action = self.execute_command(&cmd);
        self.apply_action(action);
    }

    /// Execute a parsed command
    pub fn execute_command(&mut self, cmd: &Command) -> Action {
        match cmd {
            Command::Overview => Action::Navigate(NavigateTarget::Tab(Tab::Overview)),
            Command::Search(None) => Action::Navigate(NavigateTarget::Tab(Tab::Search)),
            Command::Search(Some(lead_id)) => Action::Search(lead_id.clone()),
            Command::Spam(None) => Action::Navigate(NavigateTarget::Tab(Tab::Spam)),
            Command::Spam(Some(sub)) => Action::Navigate(NavigateTarget::Spam(*sub)),

            Command::Refresh => Action::Refresh,
            Command::Export { category, format } => {
                let category = match category.as_deref() {
                    Some(raw) => match raw.parse::<ExportCategory>() {
                        Ok(category) => category,
                        Err(msg) => return Action::Notify(msg, NotifyLevel::Error),
                    },
                    None => ExportCategory::for_view(self.view.current()),
                };
                let format = match format.as_deref() {
                    Some(raw) => match raw.parse::<ExportFormat>() {
                        Ok(format) => format,
                        Err(msg) => return Action::Notify(msg, NotifyLevel::Error),
                    },
                    None => ExportFormat::default(),
                };
                Action::Export { category, format }
            }

            Command::Help => Action::ToggleHelp,
            Command::Settings => Action::ToggleSettings,
            Command::Quit => Action::Quit,

            Command::Unknown(s) => {
                Action::Notify(format!("Unknown command: {}", s), NotifyLevel::Error)
            }
        }
    }

    /// Apply an action returned by a command or module
    pub fn apply_action(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(NavigateTarget::Tab(tab)) => self.select_tab(tab),
            Action::Navigate(NavigateTarget::Spam(sub)) => self.select_spam_tab(sub),
            Action::Search(lead_id) => {
                if !self.view.is_active(Tab::Search) {
                    self.select_tab(Tab::Search);
                }
                self.search(&lead_id);
            }
            Action::Refresh => self.refresh(),
            Action::Export { category, format } => {
                self.notify(NotifyLevel::Info, format!("Exporting {category} data..."));
                let result = export::export_category(self, category, format);
                self.apply_action(result);
            }
            Action::Notify(msg, level) => self.notify(level, msg),
            Action::ToggleHelp => {
                self.show_help = !self.show_help;
                self.show_settings = false;
            }
            Action::ToggleSettings => {
                self.show_settings = !self.show_settings;
                self.show_help = false;
            }
            Action::Quit => self.should_quit = true,
        }
    }

    /// Export the active view's data
    pub fn export_current(&mut self, format: ExportFormat) {
        let category = ExportCategory::for_view(self.view.current());
        self.apply_action(Action::Export { category, format });
    }

    /// Close popups first, then clear notifications
    pub fn dismiss(&mut self) {
        if self.show_help || self.show_settings {
            self.show_help = false;
            self.show_settings = false;
        } else {
            self.notifications.dismiss_all();
        }
    }

    // Fetch plumbing

    pub fn take_requests(&mut self) -> Vec<(Ticket, FetchRequest)> {
        std::mem::take(&mut self.pending_requests)
    }

    fn queue_fetch(&mut self, request: FetchRequest) -> Ticket {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        debug!(ticket, request = request.label(), "queue fetch");

        match &request {
            FetchRequest::Summary => self.summary = PanelState::Loading,
            FetchRequest::Lead(_) => self.lead = PanelState::Loading,
            FetchRequest::FlaggedEvents => self.flagged_events = PanelState::Loading,
            FetchRequest::FlaggedSubjects => self.flagged_subjects = PanelState::Loading,
        }
        self.pending_requests.push((ticket, request));
        ticket
    }

    pub fn apply_runtime_event(&mut self, event: RuntimeEvent) {
        match event {
            RuntimeEvent::Fetched { ticket, outcome } => self.apply_outcome(ticket, outcome),
            RuntimeEvent::Error { message } => {
                self.refreshing = None;
                self.notify(NotifyLevel::Error, message);
            }
        }
    }

    /// Store a fetch result. Outcomes overwrite their panel in arrival order.
    pub fn apply_outcome(&mut self, ticket: Ticket, outcome: FetchOutcome) {
        if self.refreshing == Some(ticket) {
            self.refreshing = None;
        }
        debug!(ticket, ok = outcome.is_ok(), "fetch resolved");

        match outcome {
            FetchOutcome::Summary(result) => {
                if let Err(err) = &result {
                    let text = if err.is_application() {
                        "Failed to load dashboard data".to_string()
                    } else {
                        format!("Error loading dashboard: {err}")
                    };
                    self.notify(NotifyLevel::Error, text);
                }
                self.summary = result.into();
            }
            FetchOutcome::Lead { lead_id, result } => {
                match &result {
                    Ok(detail) => info!(
                        ticket,
                        %lead_id,
                        activities = detail.activities.len(),
                        "lead loaded"
                    ),
                    Err(err) => warn!(ticket, %lead_id, error = %err, "lead search failed"),
                }
                self.lead = result.into();
            }
            FetchOutcome::FlaggedEvents(result) => self.flagged_events = result.into(),
            FetchOutcome::FlaggedSubjects(result) => self.flagged_subjects = result.into(),
        }
        self.scroll = self.scroll.min(self.max_scroll());
    }

    /// Loading indicator text for the status line
    pub fn status_text(&self) -> Option<&'static str> {
        if self.is_refreshing() {
            return Some("Refreshing...");
        }
        let loading = match self.view.current() {
            View::Overview => self.summary.is_loading(),
            View::Search => self.lead.is_loading(),
            View::Spam(SpamTab::Activities) => self.flagged_events.is_loading(),
            View::Spam(SpamTab::Users) => self.flagged_subjects.is_loading(),
        };
        loading.then_some("Loading...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(total: u64) -> DashboardSummary {
        DashboardSummary {
            total_leads: total,
            messages_today: 0,
            spam_percentage: 0.0,
            spam_users: 0,
            last_updated: String::new(),
            spam_today: None,
        }
    }

    #[test]
    fn start_loads_overview() {
        let mut app = App::default();
        app.start();
        let requests = app.take_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].1, FetchRequest::Summary);
        assert!(app.summary.is_loading());
        assert!(app.take_requests().is_empty());
    }

    #[test]
    fn search_tab_does_not_fetch() {
        let mut app = App::default();
        app.select_tab(Tab::Search);
        assert!(app.take_requests().is_empty());
        assert_eq!(app.current_view(), View::Search);
    }

    #[test]
    fn spam_tab_restores_sub_tab() {
        let mut app = App::default();
        app.select_spam_tab(SpamTab::Users);
        app.select_tab(Tab::Overview);
        app.take_requests();

        app.select_tab(Tab::Spam);
        let requests = app.take_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].1, FetchRequest::FlaggedSubjects);
    }

    #[test]
    fn blank_search_notifies_without_fetch() {
        let mut app = App::default();
        assert_eq!(app.search("   "), None);
        assert!(app.take_requests().is_empty());
        let latest = app.notifications.latest().unwrap();
        assert_eq!(latest.text, "Please enter a lead ID");
        assert_eq!(latest.level, NotifyLevel::Error);
    }

    #[test]
    fn summary_failure_notifies() {
        let mut app = App::default();
        app.start();
        let (ticket, _) = app.take_requests()[0].clone();
        app.apply_outcome(
            ticket,
            FetchOutcome::Summary(Err(FetchError::Transport("offline".to_string()))),
        );
        assert_eq!(
            app.notifications.latest().map(|n| n.text.as_str()),
            Some("Error loading dashboard: offline")
        );
        assert!(app.summary.failed().is_some());
    }

    #[test]
    fn scroll_stops_at_last_row() {
        let mut app = App::default();
        app.select_spam_tab(SpamTab::Users);
        let (ticket, _) = app.take_requests().remove(0);
        let subject = FlaggedSubject {
            lead_id: None,
            lead_name: "Bob".to_string(),
            phone: "+1 555".to_string(),
            spam_count_30_days: 1,
            first_spam: None,
            last_spam: None,
            is_blocked: false,
        };
        app.apply_outcome(
            ticket,
            FetchOutcome::FlaggedSubjects(Ok(vec![subject.clone(), subject.clone(), subject])),
        );

        for _ in 0..10 {
            app.scroll_down();
        }
        assert_eq!(app.scroll, 2);
        app.scroll_up();
        assert_eq!(app.scroll, 1);

        // a shorter reload pulls the offset back into range
        app.refresh();
        let (ticket, _) = app.take_requests().remove(0);
        app.apply_outcome(ticket, FetchOutcome::FlaggedSubjects(Ok(Vec::new())));
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn overview_does_not_scroll() {
        let mut app = App::default();
        app.scroll_down();
        assert_eq!(app.scroll, 0);
    }

    #[test]
    fn refresh_indicator_clears_on_its_result() {
        let mut app = App::default();
        app.refresh();
        assert_eq!(app.status_text(), Some("Refreshing..."));
        let (ticket, request) = app.take_requests().remove(0);
        assert_eq!(request, FetchRequest::Summary);

        app.apply_outcome(ticket, FetchOutcome::Summary(Ok(summary(3))));
        assert!(!app.is_refreshing());
        assert_eq!(app.summary.loaded().map(|s| s.total_leads), Some(3));
    }

    #[test]
    fn commands_map_to_actions() {
        let mut app = App::default();
        assert_eq!(
            app.execute_command(&Command::Spam(Some(SpamTab::Users))),
            Action::Navigate(NavigateTarget::Spam(SpamTab::Users))
        );
        assert_eq!(
            app.execute_command(&Command::Export {
                category: None,
                format: Some("json".to_string())
            }),
            Action::Export {
                category: ExportCategory::Summary,
                format: ExportFormat::Json
            }
        );
        assert!(matches!(
            app.execute_command(&Command::Export {
                category: Some("nope".to_string()),
                format: None
            }),
            Action::Notify(_, NotifyLevel::Error)
        ));
    }

    #[test]
    fn export_without_data_reports_error() {
        let mut app = App::default();
        app.apply_action(Action::Export {
            category: ExportCategory::SpamUsers,
            format: ExportFormat::Csv,
        });
        let texts: Vec<&str> = app.notifications.iter().map(|n| n.text.as_str()).collect();
        assert_eq!(
            texts,
            vec![
                "Exporting spam-users data...",
                "No spam-users data loaded to export"
            ]
        );
    }
}
