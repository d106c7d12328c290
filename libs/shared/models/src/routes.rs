use std::fmt;

pub const HOME_PATH: &str = "/";
pub const RESERVAR_CITA_PATH: &str = "/reservar-cita";
pub const RESERVAR_FECHA_PATH: &str = "/reservar-fecha";
pub const INICIO_SESION_PATH: &str = "/inicio-sesion-area-medica";
pub const PANEL_PATH: &str = "/panel-administrativo";

/// Client-visible pages. Navigation between steps is expressed as a
/// `Route` value so the cells never build URLs by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    ReservarCita,
    ReservarFecha { paciente_id: i64 },
    InicioSesion,
    PanelAdministrativo,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => HOME_PATH,
            Route::ReservarCita => RESERVAR_CITA_PATH,
            Route::ReservarFecha { .. } => RESERVAR_FECHA_PATH,
            Route::InicioSesion => INICIO_SESION_PATH,
            Route::PanelAdministrativo => PANEL_PATH,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Route::ReservarFecha { paciente_id } => {
                write!(f, "{}?paciente={}", self.path(), paciente_id)
            }
            other => f.write_str(other.path()),
        }
    }
}
