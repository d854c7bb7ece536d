use crate::error::UnknownPanelError;
use crate::task::{TaskProvider, TaskRow};
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelId {
    Home,
    Profile,
    Tasks,
}

impl PanelId {
    pub const ALL: [PanelId; 3] = [PanelId::Home, PanelId::Profile, PanelId::Tasks];

    pub fn key(self) -> &'static str {
        match self {
            PanelId::Home => "inicio",
            PanelId::Profile => "perfil",
            PanelId::Tasks => "tareas",
        }
    }
}

impl FromStr for PanelId {
    type Err = UnknownPanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inicio" | "home" => Ok(PanelId::Home),
            "perfil" | "profile" => Ok(PanelId::Profile),
            "tareas" | "tasks" => Ok(PanelId::Tasks),
            _ => Err(UnknownPanelError(s.to_string())),
        }
    }
}

/// Static content of one panel, built once and never touched again.
#[derive(Debug)]
pub struct Panel {
    pub id: PanelId,
    pub heading: &'static str,
    pub lines: Vec<&'static str>,
    pub table: Option<Vec<TaskRow>>,
    visible: bool,
}

impl Panel {
    fn new(id: PanelId, heading: &'static str, lines: Vec<&'static str>) -> Self {
        Self {
            id,
            heading,
            lines,
            table: None,
            visible: false,
        }
    }
}

/// Keeps the fixed panel set and makes sure at most one of them is visible.
#[derive(Debug)]
pub struct PanelRouter {
    panels: Vec<Panel>,
}

impl PanelRouter {
    pub fn new(tasks: &dyn TaskProvider) -> Self {
        let home = Panel::new(PanelId::Home, "BIENVENIDO DE VUELTA", vec!["TEC HUB"]);
        let profile = Panel::new(
            PanelId::Profile,
            "PERFIL",
            vec!["Aqui se muestra toda la informacion del estudiante."],
        );
        let mut task_panel = Panel::new(PanelId::Tasks, "TAREAS", Vec::new());
        task_panel.table = Some(tasks.list_tasks());

        Self {
            panels: vec![home, profile, task_panel],
        }
    }

    /// Hides every panel, then reveals `id`.
    pub fn show(&mut self, id: PanelId) {
        for panel in &mut self.panels {
            panel.visible = false;
        }
        for panel in &mut self.panels {
            if panel.id == id {
                panel.visible = true;
            }
        }
        debug!(panel = id.key(), "panel shown");
    }

    pub fn show_named(&mut self, name: &str) -> Result<(), UnknownPanelError> {
        let id = name.parse()?;
        self.show(id);
        Ok(())
    }

    pub fn visible(&self) -> Option<&Panel> {
        PanelId::ALL
            .into_iter()
            .find(|id| self.is_visible(*id))
            .and_then(|id| self.panel(id))
    }

    pub fn is_visible(&self, id: PanelId) -> bool {
        self.panels.iter().any(|p| p.id == id && p.visible)
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }
}
