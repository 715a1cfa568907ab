//! End-to-end scenarios with the synthesis service unreachable
//!
//! Drives the form, client and presenter together against a closed port so
//! every outbound call fails.

use std::sync::Arc;

use pretty_assertions::assert_eq;

use biosynth_client::api::SynthesisClient;
use biosynth_client::cache::MemoryResultCache;
use biosynth_client::config::{ApiConfig, DemoConfig, RequestConfig};
use biosynth_client::demo::DemoGenerator;
use biosynth_client::error::FormField;
use biosynth_client::form::{FormState, FormUpdate, SubmissionState};
use biosynth_client::presenter::{
    render_summary, resolve_result, sequence_difference, ResultSummary, ResultView,
};

const UNREACHABLE: &str = "http://127.0.0.1:1";

fn offline_client() -> SynthesisClient {
    SynthesisClient::new(
        &ApiConfig {
            base_url: UNREACHABLE.to_string(),
        },
        RequestConfig { timeout_ms: 2000 },
        Arc::new(MemoryResultCache::new()),
        DemoGenerator::from_config(&DemoConfig {
            seed: Some(2024),
            ..DemoConfig::default()
        }),
    )
    .expect("Failed to create client")
}

#[tokio::test]
async fn test_bone_density_offline_yields_lrp5_demo() {
    let client = offline_client();
    let mut form = FormState::new();
    form.update_form_data(
        FormUpdate::new()
            .host_organism("homo_sapiens")
            .desired_trait("high bone density")
            .optimize(true)
            .safety_check(true),
    );

    let response = form.submit(&client).await.expect("form should be valid");

    assert!(response.is_demo());
    assert_eq!(response.gene.name, "LRP5");
    let optimized = response
        .optimized_sequence
        .as_deref()
        .expect("optimize was requested");
    assert_eq!(optimized.len(), response.gene.sequence.len());
    assert!(sequence_difference(&response.gene.sequence, optimized) > 0);
    assert_eq!(
        form.state(),
        &SubmissionState::Submitted {
            request_id: response.request_id.clone()
        }
    );

    // The demo result resolves from the session cache
    let view = resolve_result(&client, &response.request_id).await;
    assert!(view.is_ready());
    assert_eq!(view.response().gene.name, "LRP5");

    let rendered = render_summary(&ResultSummary::from_response(view.response()));
    assert!(rendered.contains("LRP5"));
    assert!(rendered.contains("offline demo data"));
}

#[tokio::test]
async fn test_short_trait_is_rejected_before_any_call() {
    let client = offline_client();
    let mut form = FormState::new();
    form.update_form_data(
        FormUpdate::new()
            .host_organism("homo_sapiens")
            .desired_trait("ab"),
    );

    let response = form.submit(&client).await;

    assert!(response.is_none());
    assert_eq!(
        form.errors().get(FormField::DesiredTrait),
        Some("Desired trait must be at least 3 characters")
    );
    assert_eq!(form.state(), &SubmissionState::Idle);
    assert!(client.cache().get("anything").await.unwrap().is_none());
}

#[tokio::test]
async fn test_unknown_id_offline_shows_error_state() {
    let client = offline_client();

    let view = resolve_result(&client, "no-such-request").await;

    match &view {
        ResultView::Unavailable {
            message,
            substitute,
        } => {
            assert!(message.contains("no-such-request"));
            assert_eq!(substitute.request_id, "emergency-no-such-request");
            assert!(substitute.is_emergency());
        }
        ResultView::Ready(response) => {
            panic!("Expected unavailable view, got {}", response.request_id)
        }
    }

    let rendered = render_summary(&ResultSummary::from_response(view.response()));
    assert!(rendered.contains("emergency substitute"));
}
