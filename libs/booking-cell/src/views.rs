use std::sync::LazyLock;

use axum::response::Html;
use chrono::NaiveDate;
use handlebars::Handlebars;
use serde::Serialize;

use calendar_cell::{long_date, CalendarView, WEEKDAYS};
use shared_models::error::AppError;
use shared_models::obra_social::ObraSocial;
use shared_models::routes::RESERVAR_FECHA_PATH;
use shared_utils::html;

use crate::models::{BookingState, FieldErrors, PatientForm};
use crate::services::BookingStepController;

const INTAKE_TEMPLATE: &str = "reservar_cita";
const DATE_TEMPLATE: &str = "reservar_fecha";

const INFO_PARTIAL: &str = r#"<aside class="info">
  <h3>Información importante</h3>
  <ul>
    <li>Recibirá un email de confirmación una vez que la doctora apruebe su cita.</li>
    <li>Si necesita cancelar, comuníquese con al menos 24 horas de anticipación.</li>
    <li>Llegue 10 minutos antes del horario reservado.</li>
  </ul>
</aside>"#;

const INTAKE: &str = r#"{{#> layout}}
<main>
  <a href="/">Volver al inicio</a>
  <h1>Reservar Cita Médica</h1>
  <p>Complete el formulario para solicitar su cita con la Dra. Ana Martínez</p>
  <ol class="pasos"><li class="activo">1</li><li>2</li></ol>
  <form method="post" action="/reservar-cita" novalidate>
    <h2>Datos del Paciente</h2>
    <label>Nombre * <input type="text" name="nombre" value="{{form.nombre}}" placeholder="Juan"></label>
    {{#if errors.nombre}}<p class="error">El nombre debe tener al menos 2 caracteres</p>{{/if}}
    <label>Apellido * <input type="text" name="apellido" value="{{form.apellido}}" placeholder="Pérez"></label>
    {{#if errors.apellido}}<p class="error">El apellido debe tener al menos 2 caracteres</p>{{/if}}
    <label>Teléfono * <input type="tel" name="telefono" value="{{form.telefono}}" placeholder="+54 11 1234-5678"></label>
    {{#if errors.telefono}}<p class="error">Ingrese un teléfono válido</p>{{/if}}
    <label>Email * <input type="email" name="email" value="{{form.email}}" placeholder="juan.perez@email.com"></label>
    {{#if errors.email}}<p class="error">Ingrese un email válido</p>{{/if}}
    <label>Obra Social *
      <select name="obraSocialId">
        <option value="">Seleccione su obra social</option>
        {{#each obras}}<option value="{{id}}"{{#if selected}} selected{{/if}}>{{nombre}}</option>{{/each}}
      </select>
    </label>
    {{#if errors.obra_social_id}}<p class="error">Seleccione su obra social</p>{{/if}}
    {{#if obras_error}}<p class="error">{{obras_error}} <a href="/reservar-cita">Reintentar</a></p>{{/if}}
    {{#if error}}<p class="error" role="alert">{{error}}</p>{{/if}}
    <button type="submit">Continuar</button>
  </form>
  {{> info}}
</main>
{{/layout}}"#;

const DATE: &str = r#"{{#> layout}}
<main>
  <a href="/">Volver al inicio</a>
  <h1>Reservar Cita Médica</h1>
  <ol class="pasos"><li>1</li><li class="activo">2</li></ol>
  <section>
    <h2>Seleccionar Fecha y Horario</h2>
    <nav class="calendario">
      <a href="{{prev_url}}" aria-label="Mes anterior">&lsaquo;</a>
      <strong>{{month_label}}</strong>
      <a href="{{next_url}}" aria-label="Mes siguiente">&rsaquo;</a>
    </nav>
    <table>
      <thead><tr>{{#each weekdays}}<th>{{this}}</th>{{/each}}</tr></thead>
      <tbody>
      {{#each weeks}}<tr>{{#each this}}<td>{{#if day}}{{#if selectable}}<a href="{{url}}"{{#if selected}} class="seleccionado"{{/if}}>{{day}}</a>{{else}}<span class="deshabilitado">{{day}}</span>{{/if}}{{/if}}</td>{{/each}}</tr>
      {{/each}}
      </tbody>
    </table>
    <p class="leyenda">{{legend}}</p>
    {{#if loading}}<p>Cargando horarios...</p>{{/if}}
    {{#if slots_error}}<p class="error">{{slots_error}} <a href="{{retry_url}}">Reintentar</a></p>{{/if}}
    {{#if show_slots}}
    <h3>Horarios Disponibles</h3>
    <div class="horarios">
      {{#each slots}}<a href="{{url}}"{{#if active}} class="activo"{{/if}}>{{hora}}</a>{{else}}<p>No hay horarios disponibles para esta fecha.</p>{{/each}}
    </div>
    {{/if}}
    {{#if alert}}<p class="alerta" role="alert">{{alert}}</p>{{/if}}
    <form method="post" action="/reservar-fecha">
      <input type="hidden" name="paciente" value="{{paciente_id}}">
      <input type="hidden" name="fecha" value="{{fecha}}">
      <input type="hidden" name="hora" value="{{hora}}">
      <a href="/reservar-cita">Volver</a>
      <button type="submit"{{#unless can_confirm}} disabled{{/unless}}>Confirmar Reserva</button>
    </form>
  </section>
</main>
{{/layout}}"#;

static TEMPLATES: LazyLock<Handlebars<'static>> = LazyLock::new(|| {
    let mut registry = html::registry();
    registry
        .register_partial("info", INFO_PARTIAL)
        .expect("Failed to register info partial");
    registry
        .register_template_string(INTAKE_TEMPLATE, INTAKE)
        .expect("Failed to register intake template");
    registry
        .register_template_string(DATE_TEMPLATE, DATE)
        .expect("Failed to register date template");
    registry
});

#[derive(Debug, Serialize)]
struct ObraOption<'a> {
    id: i64,
    nombre: &'a str,
    selected: bool,
}

#[derive(Debug, Serialize)]
struct IntakeView<'a> {
    title: &'static str,
    form: &'a PatientForm,
    errors: FieldErrors,
    obras: Vec<ObraOption<'a>>,
    obras_error: Option<String>,
    error: Option<String>,
}

/// Patient form. `errors` is only given after a submit attempt so a fresh
/// form shows no complaints.
pub fn render_intake(
    form: &PatientForm,
    errors: Option<FieldErrors>,
    obras: &[ObraSocial],
    obras_error: Option<String>,
    error: Option<String>,
) -> Result<Html<String>, AppError> {
    let selected = form.obra_social_id.trim();
    let view = IntakeView {
        title: "Reservar Cita",
        form,
        errors: errors.unwrap_or_default(),
        obras: obras
            .iter()
            .map(|obra| ObraOption {
                id: obra.id,
                nombre: &obra.nombre,
                selected: selected == obra.id.to_string(),
            })
            .collect(),
        obras_error,
        error,
    };
    html::render(&TEMPLATES, INTAKE_TEMPLATE, &view)
}

#[derive(Debug, Serialize)]
struct DayLink {
    day: Option<u32>,
    selectable: bool,
    selected: bool,
    url: String,
}

#[derive(Debug, Serialize)]
struct SlotLink {
    hora: String,
    active: bool,
    url: String,
}

#[derive(Debug, Serialize)]
struct DateStepView {
    title: &'static str,
    paciente_id: i64,
    month_label: String,
    prev_url: String,
    next_url: String,
    weekdays: [&'static str; 7],
    weeks: Vec<Vec<DayLink>>,
    legend: String,
    loading: bool,
    slots_error: Option<String>,
    retry_url: String,
    show_slots: bool,
    slots: Vec<SlotLink>,
    alert: Option<String>,
    fecha: String,
    hora: String,
    can_confirm: bool,
}

/// Link to the date step with the given month, date and time chosen.
pub fn date_url(paciente_id: i64, view: CalendarView, fecha: Option<NaiveDate>, hora: Option<&str>) -> String {
    let mut url = format!(
        "{}?paciente={}&anio={}&mes={}",
        RESERVAR_FECHA_PATH,
        paciente_id,
        view.year(),
        view.month()
    );
    if let Some(fecha) = fecha {
        url.push_str(&format!("&fecha={}", fecha.format("%Y-%m-%d")));
    }
    if let Some(hora) = hora {
        url.push_str(&format!("&hora={}", hora));
    }
    url
}

pub fn window_legend(first: NaiveDate, last: Option<NaiveDate>) -> String {
    match last {
        Some(last) => format!(
            "Los turnos están disponibles del {} al {}.",
            long_date(first),
            long_date(last)
        ),
        None => format!("Los turnos están disponibles a partir del {}.", long_date(first)),
    }
}

/// Renders the controller as the date step page. `notice` is an extra
/// message, e.g. why a requested date or time was refused.
pub fn render_date_step(controller: &BookingStepController, notice: Option<String>) -> Result<Html<String>, AppError> {
    let paciente_id = controller.paciente_id();
    let view = controller.view();
    let selected_date = controller.selected_date();
    let selected_time = controller.selected_time();

    let weeks = controller
        .calendar()
        .chunks(7)
        .map(|week| {
            week.iter()
                .map(|cell| DayLink {
                    day: cell.day,
                    selectable: cell.selectable,
                    selected: cell.selected,
                    url: cell
                        .day
                        .filter(|_| cell.selectable)
                        .and_then(|day| view.date_of(day))
                        .map(|date| date_url(paciente_id, view, Some(date), None))
                        .unwrap_or_default(),
                })
                .collect()
        })
        .collect();

    let slots = controller
        .slots()
        .iter()
        .map(|hora| SlotLink {
            hora: hora.clone(),
            active: selected_time == Some(hora.as_str()),
            url: date_url(paciente_id, view, selected_date, Some(hora.as_str())),
        })
        .collect();

    let slots_error = match controller.state() {
        BookingState::SlotsError { message, .. } => Some(message.clone()),
        _ => None,
    };
    let show_slots = matches!(
        controller.state(),
        BookingState::Ready { .. }
            | BookingState::TimeSelected { .. }
            | BookingState::Submitting { .. }
            | BookingState::Submitted { .. }
    );
    let (first, last) = controller.bookable_dates();

    let page = DateStepView {
        title: "Seleccionar Fecha",
        paciente_id,
        month_label: view.label(),
        prev_url: date_url(paciente_id, view.previous(), None, None),
        next_url: date_url(paciente_id, view.next(), None, None),
        weekdays: WEEKDAYS,
        weeks,
        legend: window_legend(first, last),
        loading: controller.state().is_loading(),
        slots_error,
        retry_url: date_url(paciente_id, view, selected_date, None),
        show_slots,
        slots,
        alert: controller.alert().map(str::to_string).or(notice),
        fecha: selected_date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        hora: selected_time.unwrap_or_default().to_string(),
        can_confirm: controller.can_confirm(),
    };

    html::render(&TEMPLATES, DATE_TEMPLATE, &page)
}
