use chrono::{Offset, Utc};

use admin_cell::{filter_citas, panel_metrics, Cita, CitaFilter, CitaRecord, PanelMetrics};
use shared_utils::test_utils::{date, MockBackendResponses};

fn fixture_citas() -> Vec<Cita> {
    let records: Vec<CitaRecord> =
        serde_json::from_value(MockBackendResponses::citas(date(2025, 1, 20))).unwrap();
    records.into_iter().map(|record| record.at_offset(Utc.fix())).collect()
}

fn ids(citas: &[Cita]) -> Vec<i64> {
    citas.iter().map(|cita| cita.id).collect()
}

#[test]
fn test_metrics_count_states_and_today() {
    let metrics = panel_metrics(&fixture_citas(), date(2025, 1, 20));

    assert_eq!(
        metrics,
        PanelMetrics {
            total: 3,
            solicitadas: 1,
            confirmadas: 2,
            hoy: 1,
        }
    );
}

#[test]
fn test_state_filters() {
    let citas = fixture_citas();
    let today = date(2025, 1, 20);

    assert_eq!(ids(&filter_citas(&citas, CitaFilter::Todas, "", today)), vec![1, 2, 3]);
    assert_eq!(ids(&filter_citas(&citas, CitaFilter::Solicitada, "", today)), vec![2]);
    assert_eq!(ids(&filter_citas(&citas, CitaFilter::Confirmada, "", today)), vec![1, 3]);
    assert_eq!(ids(&filter_citas(&citas, CitaFilter::Hoy, "", today)), vec![3]);
}

#[test]
fn test_search_matches_name_or_email_ignoring_case() {
    let citas = fixture_citas();
    let today = date(2025, 1, 20);

    assert_eq!(ids(&filter_citas(&citas, CitaFilter::Todas, "JUAN", today)), vec![1]);
    assert_eq!(ids(&filter_citas(&citas, CitaFilter::Todas, "lopez@", today)), vec![2]);
    assert_eq!(ids(&filter_citas(&citas, CitaFilter::Todas, "   ", today)), vec![1, 2, 3]);
    assert!(filter_citas(&citas, CitaFilter::Todas, "zzz", today).is_empty());
}

#[test]
fn test_search_combines_with_state_filter() {
    let citas = fixture_citas();
    let today = date(2025, 1, 20);

    assert!(filter_citas(&citas, CitaFilter::Confirmada, "maría", today).is_empty());
    assert_eq!(ids(&filter_citas(&citas, CitaFilter::Confirmada, "gómez", today)), vec![3]);
}

#[test]
fn test_results_are_sorted_by_appointment_time() {
    let mut citas = fixture_citas();
    citas.reverse();

    let sorted = filter_citas(&citas, CitaFilter::Todas, "", date(2025, 1, 20));
    assert_eq!(ids(&sorted), vec![1, 2, 3]);
}
