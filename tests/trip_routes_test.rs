mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use uuid::Uuid;

use common::TestApp;

const DAY_MS: i64 = 86_400_000;

fn trip(name: &str, departing: i64, returning: i64) -> Value {
    json!({
        "destination": {"lon": 7.13476, "lat": 47.11682, "name": name, "countryName": "Switzerland"},
        "dateDeparting": departing,
        "dateReturning": returning,
        "weather": {
            "isCurrent": true,
            "temp": 14.2,
            "tempMin": null,
            "tempMax": null,
            "desc": {"desc": "Few clouds", "iconUrl": "https://cdn.weatherbit.io/static/img/icons/c02d.png"}
        },
        "picture": {"imageUrl": "https://pixabay.com/get/lamboing_640.jpg"}
    })
}

#[actix_rt::test]
async fn test_create_list_delete_trip() {
    let app = TestApp::new();
    let service = test::init_service(app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/trips")
        .set_json(trip("Lamboing", 2 * DAY_MS, 3 * DAY_MS))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["message"], json!("Success."));
    let trip_id = created["tripId"].as_str().unwrap().to_string();
    assert!(Uuid::parse_str(&trip_id).is_ok());

    let req = test::TestRequest::post()
        .uri("/trips")
        .set_json(trip("Biel", DAY_MS, 2 * DAY_MS))
        .to_request();
    assert_eq!(test::call_service(&service, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/trips").to_request();
    let trips: Vec<Value> = test::call_and_read_body_json(&service, req).await;
    let names: Vec<&str> = trips
        .iter()
        .map(|t| t["destination"]["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Biel", "Lamboing"]);
    let saved = trips.iter().find(|t| t["tripId"] == json!(trip_id)).unwrap();
    assert_eq!(saved["weather"]["tempMin"], Value::Null);
    assert_eq!(saved["dateDeparting"], json!(2 * DAY_MS));

    let req = test::TestRequest::delete()
        .uri(&format!("/trips/{}", trip_id))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"message": "Success."}));

    let req = test::TestRequest::delete()
        .uri(&format!("/trips/{}", trip_id))
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"message": "Not found."}));
}

#[actix_rt::test]
async fn test_create_trip_escapes_and_validates() {
    let app = TestApp::new();
    let service = test::init_service(app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/trips")
        .set_json(trip("<script>alert(1)</script>", DAY_MS, 2 * DAY_MS))
        .to_request();
    assert_eq!(test::call_service(&service, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/trips").to_request();
    let trips: Vec<Value> = test::call_and_read_body_json(&service, req).await;
    assert_eq!(
        trips[0]["destination"]["name"],
        json!("&lt;script&gt;alert(1)&lt;&#x2F;script&gt;")
    );

    let mut invalid = trip("Lamboing", DAY_MS, 2 * DAY_MS);
    invalid["picture"]["imageUrl"] = json!("https://example.com/lamboing.jpg");
    invalid["extra"] = json!(true);
    let req = test::TestRequest::post()
        .uri("/trips")
        .set_json(&invalid)
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("Invalid argument(s)."));
    let paths: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["path"].as_str().unwrap())
        .collect();
    assert_eq!(paths, vec!["extra", "picture.imageUrl"]);
}

#[actix_rt::test]
async fn test_delete_invalid_trip_id() {
    let app = TestApp::new();
    let service = test::init_service(app.create_app()).await;

    let req = test::TestRequest::delete().uri("/trips/not-a-uuid").to_request();
    let resp = test::call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "message": "Invalid argument(s).",
            "errors": [{"location": "params", "path": "tripId", "msg": "must be a valid trip ID"}]
        })
    );
}

#[actix_rt::test]
async fn test_trip_categories() {
    let app = TestApp::new();
    let service = test::init_service(app.create_app()).await;

    for (name, departing, returning) in [
        ("Past", DAY_MS, 2 * DAY_MS),
        ("Ongoing", 4 * DAY_MS, 6 * DAY_MS),
        ("Pending", 8 * DAY_MS, 9 * DAY_MS),
        ("Older", 0, DAY_MS / 2),
    ] {
        let req = test::TestRequest::post()
            .uri("/trips")
            .set_json(trip(name, departing, returning))
            .to_request();
        assert_eq!(test::call_service(&service, req).await.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/trips/categories?now={}", 5 * DAY_MS))
        .to_request();
    let categories: Value = test::call_and_read_body_json(&service, req).await;

    let names = |category: &str| -> Vec<String> {
        categories[category]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["destination"]["name"].as_str().unwrap().to_string())
            .collect()
    };
    assert_eq!(names("ongoing"), vec!["Ongoing"]);
    assert_eq!(names("pending"), vec!["Pending"]);
    assert_eq!(names("past"), vec!["Past", "Older"]);
}

#[actix_rt::test]
async fn test_trip_categories_rejects_malformed_now() {
    let app = TestApp::new();
    let service = test::init_service(app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/trips/categories?now=abc")
        .to_request();
    let resp = test::call_service(&service, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"message": "Malformed query string."}));
}
