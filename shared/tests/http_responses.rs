use crux_core::testing::AppTester;
use crux_core::Request;
use crux_http::protocol::{HttpRequest, HttpResponse, HttpResult};
use regulatory_core::{ApiConfig, App, Effect, Event, Model, Severity, TargetLanguage};

fn setup() -> (AppTester<App, Effect>, Model) {
    let config = ApiConfig::new("https://reports.test/api").unwrap();
    (AppTester::default(), Model::with_config(config))
}

fn http_requests(effects: Vec<Effect>) -> Vec<Request<HttpRequest>> {
    effects
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::Http(request) => Some(request),
            _ => None,
        })
        .collect()
}

/// Resolves `request` with `response`, feeds the resulting events back into
/// the app and returns the HTTP requests they produced.
fn respond(
    app: &AppTester<App, Effect>,
    model: &mut Model,
    request: &mut Request<HttpRequest>,
    response: HttpResponse,
) -> Vec<Request<HttpRequest>> {
    let update = app.resolve(request, HttpResult::Ok(response)).unwrap();
    let mut effects = update.effects;
    for event in update.events {
        effects.extend(app.update(event, model).effects);
    }
    http_requests(effects)
}

fn submit(app: &AppTester<App, Effect>, model: &mut Model) -> Request<HttpRequest> {
    app.update(Event::SampleReportLoaded, model);
    let mut requests = http_requests(app.update(Event::SubmitRequested, model).effects);
    assert_eq!(requests.len(), 1);
    requests.remove(0)
}

#[test]
fn service_detail_message_reaches_the_user() {
    let (app, mut model) = setup();
    let mut request = submit(&app, &mut model);

    let follow_ups = respond(
        &app,
        &mut model,
        &mut request,
        HttpResponse::status(503)
            .json(serde_json::json!({ "detail": "model unavailable" }))
            .build(),
    );

    assert!(follow_ups.is_empty());
    assert_eq!(model.submission.state().error(), Some("model unavailable"));
    assert_eq!(app.view(&model).error.as_deref(), Some("model unavailable"));
}

#[test]
fn service_error_field_wins_over_detail() {
    let (app, mut model) = setup();
    let mut request = submit(&app, &mut model);

    respond(
        &app,
        &mut model,
        &mut request,
        HttpResponse::status(400)
            .json(serde_json::json!({
                "error": "Report text is required",
                "detail": "ignored"
            }))
            .build(),
    );

    assert_eq!(
        model.active_error.as_deref(),
        Some("Report text is required")
    );
}

#[test]
fn non_json_failure_body_falls_back_to_generic_message() {
    let (app, mut model) = setup();
    let mut request = submit(&app, &mut model);

    respond(
        &app,
        &mut model,
        &mut request,
        HttpResponse::status(500)
            .body(b"<html>Internal Server Error</html>".to_vec())
            .build(),
    );

    assert_eq!(model.active_error.as_deref(), Some("Error processing report"));
    assert!(!model.submission.is_pending());
}

#[test]
fn malformed_success_body_is_a_failure() {
    let (app, mut model) = setup();
    let mut request = submit(&app, &mut model);

    let follow_ups = respond(
        &app,
        &mut model,
        &mut request,
        HttpResponse::ok().body(b"not json".to_vec()).build(),
    );

    assert!(follow_ups.is_empty());
    assert_eq!(
        model.submission.state().error(),
        Some("Error processing report")
    );
}

#[test]
fn success_response_triggers_both_refreshes() {
    let (app, mut model) = setup();
    let mut request = submit(&app, &mut model);

    let mut follow_ups = respond(
        &app,
        &mut model,
        &mut request,
        HttpResponse::ok()
            .json(serde_json::json!({
                "drug": "Drug X",
                "adverse_events": ["nausea", "headache"],
                "severity": "severe",
                "outcome": "recovered"
            }))
            .build(),
    );

    let urls: Vec<(&str, &str)> = follow_ups
        .iter()
        .map(|r| (r.operation.method.as_str(), r.operation.url.as_str()))
        .collect();
    assert_eq!(
        urls,
        vec![
            ("GET", "https://reports.test/api/reports/"),
            ("GET", "https://reports.test/api/analytics/"),
        ]
    );
    assert_eq!(
        model.submission.result().map(|r| r.severity),
        Some(Severity::Severe)
    );

    let mut analytics = follow_ups.remove(1);
    let mut history = follow_ups.remove(0);
    respond(
        &app,
        &mut model,
        &mut history,
        HttpResponse::ok()
            .json(serde_json::json!({
                "reports": [{
                    "id": 12,
                    "drug": "Drug X",
                    "adverse_events": ["nausea", "headache"],
                    "severity": "severe",
                    "outcome": "recovered",
                    "created_at": "2024-06-01T08:15:00Z"
                }]
            }))
            .build(),
    );
    respond(
        &app,
        &mut model,
        &mut analytics,
        HttpResponse::ok()
            .json(serde_json::json!({
                "total_reports": 1,
                "severity_distribution": { "severe": 1 },
                "outcome_distribution": { "recovered": 1 },
                "common_drugs": { "Drug X": 1 },
                "common_adverse_events": { "nausea": 1, "headache": 1 }
            }))
            .build(),
    );

    let view = app.view(&model);
    assert_eq!(view.history.len(), 1);
    assert_eq!(view.history[0].processed_at, "2024-06-01 08:15 UTC");
    let analytics = view.analytics.unwrap();
    assert_eq!(analytics.total_reports, 1);
    assert_eq!(analytics.common_adverse_events.len(), 2);
    assert_eq!(analytics.common_adverse_events[0].name, "nausea");
}

#[test]
fn failed_translation_response_uses_translation_fallback() {
    let (app, mut model) = setup();

    let mut requests = http_requests(
        app.update(
            Event::TranslateRequested {
                text: "recovered".into(),
                target_language: TargetLanguage::swahili(),
            },
            &mut model,
        )
        .effects,
    );
    let mut request = requests.remove(0);

    respond(
        &app,
        &mut model,
        &mut request,
        HttpResponse::status(502)
            .json(serde_json::json!({ "detail": "" }))
            .build(),
    );

    assert_eq!(model.translation.state().error(), Some("Error translating text"));
    assert_eq!(model.active_error.as_deref(), Some("Error translating text"));
}

#[test]
fn failed_history_response_keeps_entries() {
    let (app, mut model) = setup();

    let mut requests = http_requests(app.update(Event::Started, &mut model).effects);
    let mut history = requests.remove(0);
    respond(
        &app,
        &mut model,
        &mut history,
        HttpResponse::ok()
            .json(serde_json::json!({
                "reports": [{
                    "id": 1,
                    "drug": "Drug A",
                    "severity": "mild",
                    "outcome": "ongoing",
                    "created_at": "2024-02-02T10:00:00Z"
                }]
            }))
            .build(),
    );

    let mut requests =
        http_requests(app.update(Event::HistoryRefreshRequested, &mut model).effects);
    let mut refresh = requests.remove(0);
    respond(
        &app,
        &mut model,
        &mut refresh,
        HttpResponse::status(500)
            .json(serde_json::json!({ "error": "database locked" }))
            .build(),
    );

    let view = app.view(&model);
    assert_eq!(view.history.len(), 1);
    assert_eq!(view.history[0].drug, "Drug A");
    assert!(view.error.is_none());
}
