use std::sync::LazyLock;

use axum::response::Html;
use handlebars::Handlebars;
use serde::Serialize;

use shared_models::error::AppError;
use shared_models::obra_social::ObraSocial;
use shared_utils::html;

use crate::models::{Cita, CitaFilter, EstadoCita, ObraSocialForm, PanelMetrics, PanelTab};

const PANEL_TEMPLATE: &str = "panel_administrativo";

const PANEL: &str = r#"{{#> layout}}
<header>
  <h1>Panel Administrativo</h1>
  <form method="post" action="/panel-administrativo/cerrar-sesion"><button type="submit">Cerrar Sesión</button></form>
</header>
<nav class="pestanas">
  <a href="/panel-administrativo?tab=citas"{{#if tab_citas}} class="activa"{{/if}}>Citas</a>
  <a href="/panel-administrativo?tab=obras"{{#if tab_obras}} class="activa"{{/if}}>Obras Sociales</a>
</nav>
{{#if notice}}<p class="error" role="alert">{{notice}}</p>{{/if}}
{{#if tab_citas}}
<section>
  <ul class="metricas">
    <li>Total de citas <strong>{{metrics.total}}</strong></li>
    <li>Solicitadas <strong>{{metrics.solicitadas}}</strong></li>
    <li>Confirmadas <strong>{{metrics.confirmadas}}</strong></li>
    <li>Hoy <strong>{{metrics.hoy}}</strong></li>
  </ul>
  <form method="get" action="/panel-administrativo">
    <input type="hidden" name="tab" value="citas">
    <input type="search" name="q" value="{{q}}" placeholder="Buscar por paciente o email">
    <select name="estado">{{#each filters}}<option value="{{value}}"{{#if selected}} selected{{/if}}>{{label}}</option>{{/each}}</select>
    <button type="submit">Filtrar</button>
  </form>
  <table>
    <thead><tr><th>Paciente</th><th>Contacto</th><th>Obra Social</th><th>Fecha</th><th>Hora</th><th>Estado</th><th>Acciones</th></tr></thead>
    <tbody>
    {{#each citas}}
      <tr>
        <td>{{paciente}}</td>
        <td>{{email}}<br>{{telefono}}</td>
        <td>{{obra_social}}</td>
        <td>{{fecha}}</td>
        <td>{{hora}}</td>
        <td><span class="estado">{{estado}}</span></td>
        <td>
          {{#if solicitada}}<form method="post" action="/panel-administrativo/citas/{{id}}/confirmar"><button type="submit">Confirmar</button></form>{{/if}}
          <form method="post" action="/panel-administrativo/citas/{{id}}/eliminar"><button type="submit">Eliminar</button></form>
        </td>
      </tr>
    {{else}}
      <tr><td colspan="7">No se encontraron citas</td></tr>
    {{/each}}
    </tbody>
  </table>
</section>
{{/if}}
{{#if tab_obras}}
<section>
  <form method="post" action="/panel-administrativo/obras-sociales">
    <h2>{{#if form.editing}}Editar Obra Social{{else}}Nueva Obra Social{{/if}}</h2>
    <input type="hidden" name="id" value="{{form.id}}">
    <label>Nombre <input type="text" name="nombre" value="{{form.nombre}}" placeholder="Nombre de la obra social"></label>
    <button type="submit">{{#if form.editing}}Guardar{{else}}Agregar{{/if}}</button>
    {{#if form.editing}}<a href="/panel-administrativo?tab=obras">Cancelar</a>{{/if}}
  </form>
  <ul class="obras">
    {{#each obras}}
    <li>
      <span>{{nombre}}</span>
      <a href="/panel-administrativo?tab=obras&editar={{id}}">Editar</a>
      <form method="post" action="/panel-administrativo/obras-sociales/{{id}}/eliminar"><button type="submit">Eliminar</button></form>
    </li>
    {{else}}
    <li>No hay obras sociales cargadas</li>
    {{/each}}
  </ul>
</section>
{{/if}}
{{/layout}}"#;

static TEMPLATES: LazyLock<Handlebars<'static>> = LazyLock::new(|| {
    let mut registry = html::registry();
    registry
        .register_template_string(PANEL_TEMPLATE, PANEL)
        .expect("Failed to register panel template");
    registry
});

#[derive(Debug, Serialize)]
struct FilterOption {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

#[derive(Debug, Serialize)]
struct CitaRow<'a> {
    id: i64,
    paciente: &'a str,
    email: &'a str,
    telefono: &'a str,
    obra_social: &'a str,
    fecha: String,
    hora: String,
    estado: &'static str,
    solicitada: bool,
}

impl<'a> From<&'a Cita> for CitaRow<'a> {
    fn from(cita: &'a Cita) -> Self {
        Self {
            id: cita.id,
            paciente: &cita.paciente,
            email: &cita.email,
            telefono: &cita.telefono,
            obra_social: &cita.obra_social,
            fecha: cita.fecha_hora.format("%d/%m/%Y").to_string(),
            hora: cita.fecha_hora.format("%H:%M").to_string(),
            estado: cita.estado.label(),
            solicitada: cita.estado == EstadoCita::Solicitada,
        }
    }
}

#[derive(Debug, Serialize)]
struct FormView<'a> {
    id: String,
    nombre: &'a str,
    editing: bool,
}

#[derive(Debug, Serialize)]
struct PanelView<'a> {
    title: &'static str,
    tab_citas: bool,
    tab_obras: bool,
    notice: Option<&'a str>,
    metrics: PanelMetrics,
    q: &'a str,
    filters: Vec<FilterOption>,
    citas: Vec<CitaRow<'a>>,
    obras: &'a [ObraSocial],
    form: FormView<'a>,
}

/// Everything the panel page shows, already filtered.
pub struct PanelPage<'a> {
    pub tab: PanelTab,
    pub notice: Option<&'a str>,
    pub metrics: PanelMetrics,
    pub filter: CitaFilter,
    pub search: &'a str,
    pub citas: &'a [Cita],
    pub obras: &'a [ObraSocial],
    pub form: &'a ObraSocialForm,
}

pub fn render_panel(page: &PanelPage<'_>) -> Result<Html<String>, AppError> {
    let view = PanelView {
        title: "Panel Administrativo",
        tab_citas: page.tab == PanelTab::Citas,
        tab_obras: page.tab == PanelTab::Obras,
        notice: page.notice,
        metrics: page.metrics,
        q: page.search,
        filters: CitaFilter::ALL
            .into_iter()
            .map(|filter| FilterOption {
                value: filter.as_str(),
                label: filter.label(),
                selected: filter == page.filter,
            })
            .collect(),
        citas: page.citas.iter().map(CitaRow::from).collect(),
        obras: page.obras,
        form: FormView {
            id: page.form.id.map(|id| id.to_string()).unwrap_or_default(),
            nombre: &page.form.nombre,
            editing: page.form.is_editing(),
        },
    };

    html::render(&TEMPLATES, PANEL_TEMPLATE, &view)
}
