use std::sync::LazyLock;

use axum::{extract::Query, http::StatusCode, response::Html};
use handlebars::Handlebars;
use serde::{Deserialize, Serialize};

use booking_cell::services::booking::SUCCESS_MESSAGE;
use shared_models::error::AppError;
use shared_utils::html;

const HOME_TEMPLATE: &str = "inicio";

const HOME: &str = r##"{{#> layout}}
<header>
  <span class="marca">{{doctor}}</span>
  <nav>
    <a href="#inicio">Inicio</a>
    <a href="#servicios">Servicios</a>
    <a href="#formacion">Formación</a>
    <a href="#contacto">Contacto</a>
  </nav>
  <a class="boton secundario" href="/inicio-sesion-area-medica">Área Médica</a>
</header>
<main>
  {{#if success}}<p class="exito" role="status">{{success}}</p>{{/if}}
  <section id="inicio">
    <h1>{{doctor}}</h1>
    <p class="especialidad">{{specialty}}</p>
    <p>Especialista en cardiología con más de 15 años de experiencia. Comprometida con brindar atención médica de excelencia y cuidado personalizado para cada paciente.</p>
    <a class="boton" href="/reservar-cita">Reservar Cita</a>
    <a class="boton secundario" href="#contacto">Contactar</a>
    <span class="insignia">15+ años de experiencia</span>
  </section>
  <section id="servicios">
    <h2>Servicios Médicos</h2>
    <p>Ofrezco una amplia gama de servicios cardiológicos con tecnología de vanguardia y un enfoque personalizado para cada paciente.</p>
    <div class="tarjetas">
      {{#each servicios}}
      <article class="tarjeta"><h3>{{titulo}}</h3><p>{{descripcion}}</p></article>
      {{/each}}
    </div>
  </section>
  <section id="formacion">
    <h2>Formación y Experiencia</h2>
    <ul>
      {{#each formacion}}
      <li><strong>{{titulo}}</strong> <span>{{institucion}}</span>{{#if anio}} <span>{{anio}}</span>{{/if}}</li>
      {{/each}}
    </ul>
  </section>
  <section id="contacto">
    <h2>Información de Contacto</h2>
    <div class="tarjetas">
      {{#each contacto}}
      <article class="tarjeta"><h3>{{titulo}}</h3><p>{{valor}}</p><small>{{detalle}}</small></article>
      {{/each}}
    </div>
    <a class="boton" href="/reservar-cita">Reservar Cita</a>
  </section>
</main>
<footer>
  <div>
    <h3>{{doctor}}</h3>
    <p>Especialista en cardiología comprometida con tu salud cardiovascular.</p>
  </div>
  <div>
    <h3>Servicios</h3>
    <ul>{{#each servicios_pie}}<li>{{this}}</li>{{/each}}</ul>
  </div>
  <div>
    <h3>Horarios de Atención</h3>
    <ul>{{#each horarios}}<li>{{this}}</li>{{/each}}</ul>
  </div>
</footer>
{{/layout}}"##;

static TEMPLATES: LazyLock<Handlebars<'static>> = LazyLock::new(|| {
    let mut registry = html::registry();
    registry
        .register_template_string(HOME_TEMPLATE, HOME)
        .expect("Failed to register home template");
    registry
});

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Servicio {
    pub titulo: &'static str,
    pub descripcion: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Formacion {
    pub titulo: &'static str,
    pub institucion: &'static str,
    /// Empty when the item has no date, e.g. a membership.
    pub anio: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Contacto {
    pub titulo: &'static str,
    pub valor: &'static str,
    pub detalle: &'static str,
}

const SERVICIOS: [Servicio; 6] = [
    Servicio {
        titulo: "Consulta Cardiológica",
        descripcion: "Evaluación completa del sistema cardiovascular con diagnóstico preciso.",
    },
    Servicio {
        titulo: "Ecocardiografía",
        descripcion: "Estudios de ECG para detectar arritmias y problemas cardíacos.",
    },
    Servicio {
        titulo: "Ecocardiograma",
        descripcion: "Imágenes detalladas del corazón mediante ultrasonido.",
    },
    Servicio {
        titulo: "Holter 24hs",
        descripcion: "Monitoreo continuo del ritmo cardíaco durante 24 horas.",
    },
    Servicio {
        titulo: "Medicina Preventiva",
        descripcion: "Programas de prevención cardiovascular personalizados.",
    },
    Servicio {
        titulo: "Rehabilitación",
        descripcion: "Programas de rehabilitación cardíaca post-operatoria.",
    },
];

const FORMACION: [Formacion; 4] = [
    Formacion {
        titulo: "Médica Especialista en Cardiología",
        institucion: "UADE",
        anio: "2009",
    },
    Formacion {
        titulo: "Fellowship en Cardiología Intervencionista",
        institucion: "Hospital Italiano",
        anio: "2015",
    },
    Formacion {
        titulo: "Miembro del Colegio Argentino de Cardiólogos",
        institucion: "Matrícula N° 12345",
        anio: "",
    },
    Formacion {
        titulo: "Jefa del Servicio de Cardiología",
        institucion: "Hospital de Clínicas",
        anio: "2020 - Presente",
    },
];

const CONTACTO: [Contacto; 3] = [
    Contacto {
        titulo: "Teléfono",
        valor: "+54 11 4567-8900",
        detalle: "Lun - Vie: 8:00 - 18:00",
    },
    Contacto {
        titulo: "Email",
        valor: "dra.martinez@email.com",
        detalle: "Respuesta en 24hs",
    },
    Contacto {
        titulo: "Consultorio",
        valor: "Av. Corrientes 1234, Piso 8",
        detalle: "CABA, Argentina",
    },
];

const SERVICIOS_PIE: [&str; 4] = [
    "Consulta Cardiológica",
    "Electrocardiograma",
    "Ecocardiografía",
    "Medicina Preventiva",
];

const HORARIOS: [&str; 3] = [
    "Lunes a Viernes: 8:00 - 18:00",
    "Sábados: 9:00 - 13:00",
    "Domingos: Cerrado",
];

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub reserva: Option<String>,
}

#[derive(Debug, Serialize)]
struct HomePage {
    title: &'static str,
    doctor: &'static str,
    specialty: &'static str,
    success: Option<&'static str>,
    servicios: &'static [Servicio],
    formacion: &'static [Formacion],
    contacto: &'static [Contacto],
    servicios_pie: &'static [&'static str],
    horarios: &'static [&'static str],
}

/// Landing page. After a booking the date step redirects here with
/// `reserva=solicitada`.
pub async fn home_page(Query(query): Query<HomeQuery>) -> Result<Html<String>, AppError> {
    let page = HomePage {
        title: "Inicio",
        doctor: "Dra. Ana Martinez",
        specialty: "Cardiología",
        success: (query.reserva.as_deref() == Some("solicitada")).then_some(SUCCESS_MESSAGE),
        servicios: &SERVICIOS,
        formacion: &FORMACION,
        contacto: &CONTACTO,
        servicios_pie: &SERVICIOS_PIE,
        horarios: &HORARIOS,
    };
    html::render(&TEMPLATES, HOME_TEMPLATE, &page)
}

pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Página no encontrada")
}
