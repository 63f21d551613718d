//! Solar flare pipeline tests against a mock upstream

use serde_json::json;
use sqlx::PgPool;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use skywatch_ingest::donki::{models::FlareClass, store, FlarePipeline};
use skywatch_ingest::NasaClient;

fn pipeline(pool: PgPool, server: &MockServer) -> FlarePipeline {
    let client = NasaClient::with_base_url(server.uri(), Some("TEST_KEY".to_string()));
    FlarePipeline::new(pool, client)
}

async fn mount_flares(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/DONKI/FLR"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn sample_flares() -> serde_json::Value {
    json!([
        {
            "flrID": "2024-01-15T10:30:00-FLR-001",
            "classType": "M5.2",
            "beginTime": "2024-01-15T10:30Z",
            "peakTime": "2024-01-15T11:00Z",
            "endTime": "2024-01-15T12:00Z",
            "sourceLocation": "N15W30",
            "activeRegionNum": 13536,
            "linkedEvents": [{"activityID": "2024-01-15T11:12:00-CME-001"}],
            "instruments": [{"displayName": "GOES-P: EXIS 1.0-8.0"}]
        },
        {
            "flrID": "2024-01-16T03:12:00-FLR-001",
            "classType": "X1.1",
            "beginTime": "2024-01-16T03:12:00Z",
            "peakTime": "2024-01-16T03:40:00",
            "endTime": "2024-01-16T04:05:00Z",
            "sourceLocation": "S20E45",
            "activeRegionNum": null
        }
    ])
}

async fn flare_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM solar_flares")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../../migrations")]
async fn ingests_flares_with_mixed_timestamp_formats(pool: PgPool) {
    let server = MockServer::start().await;
    mount_flares(&server, sample_flares()).await;

    let created = pipeline(pool.clone(), &server)
        .fetch_flares(None, None)
        .await
        .unwrap();

    assert_eq!(created, 2);
    assert_eq!(flare_count(&pool).await, 2);

    let by_class = store::flares_by_class(&pool, FlareClass::M).await.unwrap();
    assert_eq!(by_class.len(), 1);
    assert_eq!(by_class[0].flare_id, "2024-01-15T10:30:00-FLR-001");
    assert_eq!(by_class[0].active_region, "13536");
    assert!(by_class[0].begin_time <= by_class[0].peak_time);
    assert!(by_class[0].peak_time <= by_class[0].end_time);
}

#[sqlx::test(migrations = "../../migrations")]
async fn refetch_is_idempotent(pool: PgPool) {
    let server = MockServer::start().await;
    mount_flares(&server, sample_flares()).await;
    let pipeline = pipeline(pool.clone(), &server);

    let first = pipeline.fetch_flares(None, None).await.unwrap();
    let second = pipeline.fetch_flares(None, None).await.unwrap();

    assert_eq!(first, 2);
    assert_eq!(second, 0);
    assert_eq!(flare_count(&pool).await, 2);
}

#[sqlx::test(migrations = "../../migrations")]
async fn flare_with_missing_timing_is_rejected_whole(pool: PgPool) {
    let server = MockServer::start().await;
    mount_flares(
        &server,
        json!([
            {
                "flrID": "no-peak",
                "classType": "C3.0",
                "beginTime": "2024-01-15T10:30Z",
                "endTime": "2024-01-15T12:00Z"
            },
            {
                "flrID": "bad-begin",
                "classType": "B1.0",
                "beginTime": "yesterday-ish",
                "peakTime": "2024-01-15T11:00Z",
                "endTime": "2024-01-15T12:00Z"
            },
            {
                "flrID": "complete",
                "classType": "C3.0",
                "beginTime": "2024-01-15T10:30Z",
                "peakTime": "2024-01-15T11:00Z",
                "endTime": "2024-01-15T12:00Z"
            }
        ]),
    )
    .await;

    let created = pipeline(pool.clone(), &server)
        .fetch_flares(None, None)
        .await
        .unwrap();

    // Partial timing never produces a partial row.
    assert_eq!(created, 1);
    assert_eq!(flare_count(&pool).await, 1);
    assert!(store::exists(&pool, "complete").await.unwrap());
    assert!(!store::exists(&pool, "no-peak").await.unwrap());
    assert!(!store::exists(&pool, "bad-begin").await.unwrap());
}

#[sqlx::test(migrations = "../../migrations")]
async fn absent_class_type_defaults_to_a(pool: PgPool) {
    let server = MockServer::start().await;
    mount_flares(
        &server,
        json!([{
            "flrID": "unclassified",
            "beginTime": "2024-01-15T10:30Z",
            "peakTime": "2024-01-15T11:00Z",
            "endTime": "2024-01-15T12:00Z"
        }]),
    )
    .await;

    pipeline(pool.clone(), &server).fetch_flares(None, None).await.unwrap();

    let flares = store::flares_by_class(&pool, FlareClass::A).await.unwrap();
    assert_eq!(flares.len(), 1);
    assert_eq!(flares[0].flare_class, "A");
}

#[sqlx::test(migrations = "../../migrations")]
async fn malformed_entry_does_not_abort_the_batch(pool: PgPool) {
    let server = MockServer::start().await;
    mount_flares(
        &server,
        json!([
            "not an object",
            { "classType": "M1.0" },
            {
                "flrID": "good",
                "beginTime": "2024-01-15T10:30Z",
                "peakTime": "2024-01-15T11:00Z",
                "endTime": "2024-01-15T12:00Z"
            }
        ]),
    )
    .await;

    let created = pipeline(pool.clone(), &server)
        .fetch_flares(None, None)
        .await
        .unwrap();

    assert_eq!(created, 1);
    assert!(store::exists(&pool, "good").await.unwrap());
}

#[sqlx::test(migrations = "../../migrations")]
async fn transport_failure_surfaces_as_error(pool: PgPool) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/DONKI/FLR"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let result = pipeline(pool.clone(), &server).fetch_flares(None, None).await;
    assert!(result.is_err());
    assert_eq!(flare_count(&pool).await, 0);
}
