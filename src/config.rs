use ratatui::style::Color;

/// Presentation constants for the whole application.
#[derive(Debug, Clone)]
pub struct Config {
    pub title: &'static str,
    pub width: u16,
    pub height: u16,
    pub accent: Color,
    pub background: Color,
    pub sidebar_width: u16,
    pub login_defaults: [&'static str; 3],
    pub warning_title: &'static str,
    pub warning_message: &'static str,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "TEC HUB - CONTROL DE ACTIVIDADES",
            width: 80,
            height: 24,
            accent: Color::Rgb(0x08, 0x08, 0x43),
            background: Color::Rgb(0xf0, 0xf0, 0xf0),
            sidebar_width: 20,
            login_defaults: ["USUARIO", "CORREO", "CONTRASENA"],
            warning_title: "Advertencia",
            warning_message: "Por favor llena todos los campos.",
        }
    }
}
