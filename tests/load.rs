//! Integration tests for the bulk load pipeline

mod common;

use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use common::*;
use datalake_client::Error;
use std::sync::Mutex;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn time_range() -> (DateTime<Utc>, DateTime<Utc>) {
    let begin = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (begin, begin + ChronoDuration::hours(1))
}

#[tokio::test]
async fn load_decodes_values_and_reports_even_progress() {
    let (client, server, _work_dir) = setup().await;
    sign_in(&client, &server).await;

    let paths: Vec<String> = ["/a/T1/1_s", "/a/T2/1_s", "/a/T3/1_s"]
        .iter()
        .map(|p| p.to_string())
        .collect();

    Mock::given(method("POST"))
        .and(path("/api/v1/catalogs/search-items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "/a/T1/1_s": catalog_item_json("T1", Some("°C"), Some("temperature")),
            "/a/T2/1_s": catalog_item_json("T2", None, None),
            "/a/T3/1_s": catalog_item_json("T3", Some("V"), None),
        })))
        .expect(1)
        .mount(&server)
        .await;

    for (resource_path, values) in [
        ("/a/T1/1_s", vec![1.0, 2.0]),
        ("/a/T2/1_s", vec![3.0]),
        ("/a/T3/1_s", vec![4.0, 5.0, 6.0]),
    ] {
        Mock::given(method("GET"))
            .and(path("/api/v1/data"))
            .and(query_param("resourcePath", resource_path))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(f64_bytes(&values)))
            .expect(1)
            .mount(&server)
            .await;
    }

    let (begin, end) = time_range();
    let reported = Mutex::new(Vec::new());
    let on_progress = |progress: f64| reported.lock().unwrap().push(progress);

    let result = client
        .load(begin, end, &paths, Some(&on_progress))
        .await
        .unwrap();

    assert_eq!(result.len(), 3);

    let first = &result["/a/T1/1_s"];
    assert_eq!(first.values, vec![1.0, 2.0]);
    assert_eq!(first.name, "T1");
    assert_eq!(first.unit.as_deref(), Some("°C"));
    assert_eq!(first.description.as_deref(), Some("temperature"));
    assert_eq!(first.sample_period, Duration::from_secs(1));

    assert_eq!(result["/a/T2/1_s"].unit, None);
    assert_eq!(result["/a/T3/1_s"].values, vec![4.0, 5.0, 6.0]);

    // one callback per resource, evenly weighted and strictly increasing
    let reported = reported.into_inner().unwrap();
    assert_eq!(reported.len(), 3);

    for (actual, expected) in reported.iter().zip([1.0 / 3.0, 2.0 / 3.0, 1.0]) {
        assert!((actual - expected).abs() < 1e-9, "got {actual}, want {expected}");
    }

    assert!(reported.windows(2).all(|pair| pair[0] < pair[1]));
}

#[tokio::test]
async fn load_rejects_a_stream_length_that_is_not_a_multiple_of_8() {
    let (client, server, _work_dir) = setup().await;
    sign_in(&client, &server).await;

    let paths = vec!["/a/T1/1_s".to_string()];

    Mock::given(method("POST"))
        .and(path("/api/v1/catalogs/search-items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "/a/T1/1_s": catalog_item_json("T1", None, None),
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/data"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 10]))
        .mount(&server)
        .await;

    let (begin, end) = time_range();
    let error = client.load(begin, end, &paths, None).await.unwrap_err();

    assert!(matches!(error, Error::InvalidDataLength));
    assert_eq!(error.to_string(), "the data length is invalid");
}

#[tokio::test]
async fn load_skips_paths_the_catalog_does_not_resolve() {
    let (client, server, _work_dir) = setup().await;
    sign_in(&client, &server).await;

    let paths = vec!["/a/T1/1_s".to_string(), "/a/missing/1_s".to_string()];

    Mock::given(method("POST"))
        .and(path("/api/v1/catalogs/search-items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "/a/T1/1_s": catalog_item_json("T1", None, None),
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/data"))
        .and(query_param("resourcePath", "/a/T1/1_s"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(f64_bytes(&[1.0])))
        .expect(1)
        .mount(&server)
        .await;

    let (begin, end) = time_range();
    let reported = Mutex::new(Vec::new());
    let on_progress = |progress: f64| reported.lock().unwrap().push(progress);

    let result = client
        .load(begin, end, &paths, Some(&on_progress))
        .await
        .unwrap();

    assert_eq!(result.len(), 1);
    assert!(result.contains_key("/a/T1/1_s"));

    // progress is weighted over resolved resources only
    assert_eq!(reported.into_inner().unwrap(), vec![1.0]);
}
