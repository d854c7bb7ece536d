use crate::config::Config;
use crate::login::{Credentials, Focus, LoginGate};
use crate::router::{PanelId, PanelRouter};
use crate::task::TaskProvider;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Open(PanelId),
    Logout,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::Open(PanelId::ALL[0]),
        MenuItem::Open(PanelId::ALL[1]),
        MenuItem::Open(PanelId::ALL[2]),
        MenuItem::Logout,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Open(PanelId::Home) => "INICIO",
            MenuItem::Open(PanelId::Profile) => "PERFIL",
            MenuItem::Open(PanelId::Tasks) => "TAREAS",
            MenuItem::Logout => "SALIR",
        }
    }
}

#[derive(Debug)]
pub enum Screen {
    Login(LoginGate),
    Main(Credentials),
}

/// Blocking notice; swallows input until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub title: &'static str,
    pub message: &'static str,
}

/// Something under the mouse pointer that reacts to a left click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    Field(Focus),
    Submit,
    Menu(usize),
    DismissWarning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct App {
    pub config: Config,
    tasks: Box<dyn TaskProvider>,
    screen: Screen,
    router: PanelRouter,
    warning: Option<Warning>,
    pub selected_menu: usize,
    generation: u64,
}

impl App {
    pub fn new(config: Config, tasks: Box<dyn TaskProvider>) -> Self {
        let screen = Screen::Login(LoginGate::new(config.login_defaults, 0));
        let router = PanelRouter::new(tasks.as_ref());
        Self {
            config,
            tasks,
            screen,
            router,
            warning: None,
            selected_menu: 0,
            generation: 0,
        }
    }

    pub fn router(&self) -> &PanelRouter {
        &self.router
    }

    pub fn warning(&self) -> Option<&Warning> {
        self.warning.as_ref()
    }

    pub fn login_gate(&self) -> Option<&LoginGate> {
        match &self.screen {
            Screen::Login(gate) => Some(gate),
            Screen::Main(_) => None,
        }
    }

    pub fn login_gate_mut(&mut self) -> Option<&mut LoginGate> {
        match &mut self.screen {
            Screen::Login(gate) => Some(gate),
            Screen::Main(_) => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self.screen, Screen::Main(_))
    }

    /// Tries the login form. On success the gate is dropped and the main
    /// screen takes its place with no panel selected.
    pub fn submit(&mut self) {
        let Screen::Login(gate) = &self.screen else {
            return;
        };
        match gate.submit() {
            Ok(credentials) => {
                self.screen = Screen::Main(credentials);
                self.selected_menu = 0;
            }
            Err(err) => {
                warn!(%err, "login blocked");
                self.warning = Some(Warning {
                    title: self.config.warning_title,
                    message: self.config.warning_message,
                });
            }
        }
    }

    /// Ignored while the login screen is up.
    pub fn show(&mut self, id: PanelId) {
        if !self.is_logged_in() {
            return;
        }
        // Every `PanelId` has a key the router knows.
        if let Err(err) = self.router.show_named(id.key()) {
            error!(%err, "panel lookup failed");
        }
    }

    pub fn logout(&mut self) {
        if let Screen::Main(credentials) = &self.screen {
            info!(user = %credentials.username, "logout");
        }
        self.reset();
    }

    /// Throws away the gate, the router and any credentials, and starts over
    /// from freshly built ones.
    pub fn reset(&mut self) {
        self.generation += 1;
        let gate = LoginGate::new(self.config.login_defaults, self.generation);
        info!(generation = gate.generation(), "login form rebuilt");
        self.screen = Screen::Login(gate);
        self.router = PanelRouter::new(self.tasks.as_ref());
        self.warning = None;
        self.selected_menu = 0;
    }

    pub fn dismiss_warning(&mut self) {
        self.warning = None;
    }

    fn activate(&mut self, index: usize) {
        let Some(item) = MenuItem::ALL.get(index).copied() else {
            return;
        };
        self.selected_menu = index;
        match item {
            MenuItem::Open(id) => self.show(id),
            MenuItem::Logout => self.logout(),
        }
    }

    pub fn handle_click(&mut self, click: Click) {
        if self.warning.is_some() {
            if click == Click::DismissWarning {
                self.dismiss_warning();
            }
            return;
        }
        match click {
            Click::Field(focus) => {
                if let Some(gate) = self.login_gate_mut() {
                    gate.focus = focus;
                }
            }
            Click::Submit => {
                if let Some(gate) = self.login_gate_mut() {
                    gate.focus = Focus::Submit;
                }
                self.submit();
            }
            Click::Menu(index) => {
                if self.is_logged_in() {
                    self.activate(index);
                }
            }
            Click::DismissWarning => {}
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.kind != KeyEventKind::Press {
            return Control::Continue;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            info!("quit");
            return Control::Quit;
        }
        if self.warning.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.dismiss_warning();
            }
            return Control::Continue;
        }

        match &mut self.screen {
            Screen::Login(gate) => match key.code {
                KeyCode::Esc => {
                    info!("quit");
                    return Control::Quit;
                }
                KeyCode::Tab | KeyCode::Down => gate.focus_next(),
                KeyCode::BackTab | KeyCode::Up => gate.focus_prev(),
                KeyCode::Backspace => gate.delete_char(),
                KeyCode::Enter => {
                    if gate.focus == Focus::Submit {
                        self.submit();
                    } else {
                        gate.focus_next();
                    }
                }
                KeyCode::Char(c)
                    if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                {
                    gate.insert_char(c)
                }
                _ => {}
            },
            Screen::Main(_) => match key.code {
                KeyCode::Up => {
                    if self.selected_menu > 0 {
                        self.selected_menu -= 1;
                    }
                }
                KeyCode::Down => {
                    if self.selected_menu < MenuItem::ALL.len() - 1 {
                        self.selected_menu += 1;
                    }
                }
                KeyCode::Enter => self.activate(self.selected_menu),
                KeyCode::Char(c @ '1'..='4') => {
                    self.activate(c as usize - '1' as usize);
                }
                _ => {}
            },
        }
        Control::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::DemoTasks;

    fn app() -> App {
        App::new(Config::default(), Box::new(DemoTasks))
    }

    fn press(app: &mut App, code: KeyCode) -> Control {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn fill(app: &mut App, u: &str, e: &str, p: &str) {
        let gate = app.login_gate_mut().unwrap();
        gate.username = u.to_string();
        gate.email = e.to_string();
        gate.password = p.to_string();
    }

    fn rows_of_visible(app: &App) -> Vec<[String; 3]> {
        app.router()
            .visible()
            .and_then(|p| p.table.as_ref())
            .map(|rows| rows.iter().map(|r| r.cells()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn starts_logged_out_with_nothing_visible() {
        let app = app();
        assert!(!app.is_logged_in());
        assert!(app.router().visible().is_none());
        assert_eq!(app.login_gate().unwrap().username, "USUARIO");
    }

    #[test]
    fn successful_login_drops_the_gate_without_selecting_a_panel() {
        let mut app = app();
        fill(&mut app, "ana", "a@x.com", "secret");
        app.submit();
        assert!(app.is_logged_in());
        assert!(app.login_gate().is_none());
        assert!(app.warning().is_none());
        assert!(app.router().visible().is_none());
    }

    #[test]
    fn empty_field_warns_once_and_keeps_the_form() {
        let mut app = app();
        fill(&mut app, "", "a@x.com", "secret");
        app.submit();
        assert!(!app.is_logged_in());
        assert_eq!(
            app.warning(),
            Some(&Warning {
                title: "Advertencia",
                message: "Por favor llena todos los campos."
            })
        );
        let gate = app.login_gate().unwrap();
        assert_eq!((gate.username.as_str(), gate.email.as_str(), gate.password.as_str()), ("", "a@x.com", "secret"));
    }

    #[test]
    fn warning_swallows_keys_until_dismissed() {
        let mut app = app();
        fill(&mut app, "", "a@x.com", "secret");
        app.submit();
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.login_gate().unwrap().username, "");
        assert_eq!(press(&mut app, KeyCode::Esc), Control::Continue);
        assert!(app.warning().is_none());
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.login_gate().unwrap().username, "x");
    }

    #[test]
    fn tasks_scenario_shows_three_rows() {
        let mut app = app();
        fill(&mut app, "ana", "a@x.com", "secret");
        app.submit();
        app.show("tareas".parse().unwrap());
        assert_eq!(
            rows_of_visible(&app),
            vec![
                ["PROYECTO 1".to_string(), "2024-11-04".to_string(), "COMPLETADA".to_string()],
                ["PROYECTO 2".to_string(), "2024-12-01".to_string(), "EN PROGRESO".to_string()],
                ["PROYECTO 3".to_string(), "2025-01-10".to_string(), "PENDIENTE".to_string()],
            ]
        );
    }

    #[test]
    fn logout_rebuilds_a_fresh_gate_from_every_panel() {
        for id in PanelId::ALL {
            let mut app = app();
            let first = app.login_gate().unwrap().generation();
            fill(&mut app, "ana", "a@x.com", "secret");
            app.submit();
            app.show(id);
            app.logout();
            assert!(!app.is_logged_in());
            assert!(app.router().visible().is_none());
            let gate = app.login_gate().unwrap();
            assert_ne!(gate.generation(), first);
            assert_eq!(gate.username, "USUARIO");
        }
    }

    #[test]
    fn menu_opens_every_panel_in_order() {
        let panels: Vec<PanelId> = MenuItem::ALL
            .iter()
            .filter_map(|item| match item {
                MenuItem::Open(id) => Some(*id),
                MenuItem::Logout => None,
            })
            .collect();
        assert_eq!(panels, PanelId::ALL.to_vec());
        assert_eq!(MenuItem::ALL[3].label(), "SALIR");
    }

    #[test]
    fn show_is_ignored_before_login() {
        let mut app = app();
        app.show(PanelId::Home);
        assert!(app.router().visible().is_none());
    }

    #[test]
    fn keyboard_walkthrough() {
        let mut app = app();
        for _ in 0.."USUARIO".len() {
            press(&mut app, KeyCode::Backspace);
        }
        for c in "ana".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Enter);
        assert!(app.is_logged_in());

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert!(app.router().is_visible(PanelId::Tasks));

        press(&mut app, KeyCode::Char('2'));
        assert!(app.router().is_visible(PanelId::Profile));
        assert_eq!(app.selected_menu, 1);

        press(&mut app, KeyCode::Char('4'));
        assert!(!app.is_logged_in());
        assert_eq!(press(&mut app, KeyCode::Esc), Control::Quit);
    }

    #[test]
    fn control_and_alt_chords_are_not_typed() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        app.handle_key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::ALT));
        assert_eq!(app.login_gate().unwrap().username, "USUARIO");
        app.handle_key(KeyEvent::new(KeyCode::Char('X'), KeyModifiers::SHIFT));
        assert_eq!(app.login_gate().unwrap().username, "USUARIOX");
    }

    #[test]
    fn clicks_drive_the_form_and_the_menu() {
        let mut app = app();
        app.handle_click(Click::Field(Focus::Password));
        assert_eq!(app.login_gate().unwrap().focus, Focus::Password);
        app.handle_click(Click::Menu(2));
        assert!(app.router().visible().is_none());

        app.handle_click(Click::Submit);
        assert!(app.is_logged_in());
        app.handle_click(Click::Menu(2));
        assert!(app.router().is_visible(PanelId::Tasks));
        assert_eq!(app.selected_menu, 2);

        app.handle_click(Click::Menu(3));
        assert!(!app.is_logged_in());
    }

    #[test]
    fn clicks_are_blocked_by_the_warning() {
        let mut app = app();
        fill(&mut app, "ana", "", "secret");
        app.handle_click(Click::Submit);
        assert!(app.warning().is_some());
        app.handle_click(Click::Field(Focus::Email));
        assert_eq!(app.login_gate().unwrap().focus, Focus::Submit);
        app.handle_click(Click::DismissWarning);
        assert!(app.warning().is_none());
        assert!(!app.is_logged_in());
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut app = app();
        fill(&mut app, "", "", "");
        app.submit();
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(key), Control::Quit);
    }
}
