use salvo::http::{Method, StatusCode};
use serde_json::{Value, json};

use super::helpers::{TestDb, TODAY, create_task, get_task, send, send_json};

fn titles(list: &Value) -> Vec<String> {
    list["tasks"]
        .as_array()
        .expect("tasks should be an array")
        .iter()
        .map(|task| task["title"].as_str().expect("title").to_string())
        .collect()
}

async fn stored_date(service: &salvo::Service, id: &str) -> String {
    get_task(service, id).await.assert_status(StatusCode::OK).json()["date"]
        .as_str()
        .expect("date")
        .to_string()
}

#[test_log::test(tokio::test)]
async fn test_create_then_get_round_trips_fields() {
    let db = TestDb::new().await.expect("Failed to create test database");
    let service = db.service();

    let id = create_task(
        &service,
        &json!({
            "date": "20240301",
            "title": "Dentist",
            "comment": "Bring forms",
            "repeat": "y"
        }),
    )
    .await;

    let res = get_task(&service, &id).await.assert_status(StatusCode::OK);
    assert_eq!(
        res.json(),
        json!({
            "id": id,
            "date": "20240301",
            "title": "Dentist",
            "comment": "Bring forms",
            "repeat": "y"
        })
    );
}

#[test_log::test(tokio::test)]
async fn test_create_schedules_missing_and_past_dates() {
    let db = TestDb::new().await.expect("Failed to create test database");
    let service = db.service();

    let empty = create_task(&service, &json!({ "title": "No date" })).await;
    assert_eq!(stored_date(&service, &empty).await, TODAY);

    let past_once = create_task(&service, &json!({ "title": "Late", "date": "20240101" })).await;
    assert_eq!(stored_date(&service, &past_once).await, TODAY);

    let past_repeating = create_task(
        &service,
        &json!({ "title": "Every five", "date": "20240120", "repeat": "d 5" }),
    )
    .await;
    assert_eq!(stored_date(&service, &past_repeating).await, "20240130");

    let today_repeating = create_task(
        &service,
        &json!({ "title": "Today", "date": TODAY, "repeat": "d 1" }),
    )
    .await;
    assert_eq!(stored_date(&service, &today_repeating).await, TODAY);
}

#[test_log::test(tokio::test)]
async fn test_create_rejects_invalid_input() {
    let db = TestDb::new().await.expect("Failed to create test database");
    let service = db.service();

    for body in [
        json!({ "date": "20240301" }),
        json!({ "title": "   " }),
        json!({ "title": "Bad date", "date": "2024-03-01" }),
        json!({ "title": "Bad rule", "date": "20240301", "repeat": "x 5" }),
        json!({ "title": "Too long", "repeat": "d 401" }),
    ] {
        let res = send_json(&service, Method::POST, "/api/task", &body, None)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
        assert!(!res.error_message().is_empty(), "body {body}");
    }

    let list = send(&service, Method::GET, "/api/tasks", None).await.json();
    assert_eq!(list, json!({ "tasks": [] }));
}

#[test_log::test(tokio::test)]
async fn test_get_reports_bad_and_missing_ids() {
    let db = TestDb::new().await.expect("Failed to create test database");
    let service = db.service();

    send(&service, Method::GET, "/api/task", None)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    get_task(&service, "abc").await.assert_status(StatusCode::BAD_REQUEST);
    get_task(&service, "999").await.assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_update_replaces_fields() {
    let db = TestDb::new().await.expect("Failed to create test database");
    let service = db.service();

    let id = create_task(&service, &json!({ "title": "Draft", "date": "20240201" })).await;

    let res = send_json(
        &service,
        Method::PUT,
        "/api/task",
        &json!({
            "id": id,
            "date": "20240202",
            "title": "Final",
            "comment": "Edited",
            "repeat": "w 1,5"
        }),
        None,
    )
    .await
    .assert_status(StatusCode::OK);
    assert_eq!(res.json(), json!({}));

    let task = get_task(&service, &id).await.json();
    assert_eq!(task["title"], "Final");
    assert_eq!(task["comment"], "Edited");
    assert_eq!(task["date"], "20240202");
    assert_eq!(task["repeat"], "w 1,5");
}

#[test_log::test(tokio::test)]
async fn test_update_accepts_numeric_id() {
    let db = TestDb::new().await.expect("Failed to create test database");
    let service = db.service();

    let id = create_task(&service, &json!({ "title": "Numeric", "date": "20240201" })).await;
    let numeric: i64 = id.parse().expect("ids are integers");

    send_json(
        &service,
        Method::PUT,
        "/api/task",
        &json!({ "id": numeric, "date": "20240203", "title": "Renamed" }),
        None,
    )
    .await
    .assert_status(StatusCode::OK);

    assert_eq!(get_task(&service, &id).await.json()["title"], "Renamed");
}

#[test_log::test(tokio::test)]
async fn test_update_rejects_bad_requests() {
    let db = TestDb::new().await.expect("Failed to create test database");
    let service = db.service();

    let id = create_task(&service, &json!({ "title": "Keep", "date": "20240201" })).await;

    send_json(
        &service,
        Method::PUT,
        "/api/task",
        &json!({ "id": "999", "date": "20240201", "title": "Ghost" }),
        None,
    )
    .await
    .assert_status(StatusCode::NOT_FOUND);

    send_json(
        &service,
        Method::PUT,
        "/api/task",
        &json!({ "date": "20240201", "title": "No id" }),
        None,
    )
    .await
    .assert_status(StatusCode::BAD_REQUEST);

    send_json(
        &service,
        Method::PUT,
        "/api/task",
        &json!({ "id": id, "date": "20240201", "title": "" }),
        None,
    )
    .await
    .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(get_task(&service, &id).await.json()["title"], "Keep");
}

#[test_log::test(tokio::test)]
async fn test_delete_removes_task() {
    let db = TestDb::new().await.expect("Failed to create test database");
    let service = db.service();

    let id = create_task(&service, &json!({ "title": "Disposable" })).await;
    let path = format!("/api/task?id={id}");

    let res = send(&service, Method::DELETE, &path, None)
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(res.json(), json!({}));

    get_task(&service, &id).await.assert_status(StatusCode::NOT_FOUND);
    send(&service, Method::DELETE, &path, None)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_done_removes_one_off_task() {
    let db = TestDb::new().await.expect("Failed to create test database");
    let service = db.service();

    let id = create_task(&service, &json!({ "title": "Once", "date": "20240210" })).await;

    let res = send(&service, Method::POST, &format!("/api/task/done?id={id}"), None)
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(res.json(), json!({}));

    get_task(&service, &id).await.assert_status(StatusCode::NOT_FOUND);
}

#[test_log::test(tokio::test)]
async fn test_done_advances_repeating_tasks() {
    let db = TestDb::new().await.expect("Failed to create test database");
    let service = db.service();

    let daily = create_task(
        &service,
        &json!({ "title": "Water plants", "date": TODAY, "repeat": "d 3" }),
    )
    .await;
    let yearly = create_task(
        &service,
        &json!({ "title": "Anniversary", "date": "20240301", "repeat": "y" }),
    )
    .await;

    for id in [&daily, &yearly] {
        send(&service, Method::POST, &format!("/api/task/done?id={id}"), None)
            .await
            .assert_status(StatusCode::OK);
    }

    assert_eq!(stored_date(&service, &daily).await, "20240129");
    assert_eq!(stored_date(&service, &yearly).await, "20250301");

    send(&service, Method::POST, &format!("/api/task/done?id={daily}"), None)
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(stored_date(&service, &daily).await, "20240201");
}

#[test_log::test(tokio::test)]
async fn test_done_reports_missing_task() {
    let db = TestDb::new().await.expect("Failed to create test database");
    let service = db.service();

    send(&service, Method::POST, "/api/task/done?id=42", None)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    send(&service, Method::POST, "/api/task/done", None)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn test_list_orders_by_date_and_caps_results() {
    let db = TestDb::new().await.expect("Failed to create test database");
    let service = db.service();

    create_task(&service, &json!({ "title": "Later", "date": "20240305" })).await;
    create_task(&service, &json!({ "title": "Sooner", "date": "20240205" })).await;
    create_task(&service, &json!({ "title": "Now" })).await;

    let list = send(&service, Method::GET, "/api/tasks", None)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(titles(&list), ["Now", "Sooner", "Later"]);

    for n in 0..55 {
        create_task(&service, &json!({ "title": format!("Bulk {n}"), "date": "20250101" })).await;
    }
    let list = send(&service, Method::GET, "/api/tasks", None).await.json();
    assert_eq!(titles(&list).len(), 50);
}

#[test_log::test(tokio::test)]
async fn test_list_search_by_text_and_date() {
    let db = TestDb::new().await.expect("Failed to create test database");
    let service = db.service();

    create_task(
        &service,
        &json!({ "title": "Gym", "comment": "Leg day", "date": "20240208" }),
    )
    .await;
    create_task(&service, &json!({ "title": "Buy legumes", "date": "20240210" })).await;
    create_task(&service, &json!({ "title": "Call mom", "date": "20240208" })).await;
    create_task(&service, &json!({ "title": "100% done", "date": "20240301" })).await;
    create_task(&service, &json!({ "title": "1000 done", "date": "20240302" })).await;

    let by_text = send(&service, Method::GET, "/api/tasks?search=leg", None)
        .await
        .json();
    assert_eq!(titles(&by_text), ["Gym", "Buy legumes"]);

    let by_date = send(&service, Method::GET, "/api/tasks?search=08.02.2024", None)
        .await
        .json();
    assert_eq!(titles(&by_date), ["Gym", "Call mom"]);

    let literal = send(&service, Method::GET, "/api/tasks?search=100%25", None)
        .await
        .json();
    assert_eq!(titles(&literal), ["100% done"]);

    let none = send(&service, Method::GET, "/api/tasks?search=nothing", None)
        .await
        .json();
    assert_eq!(none, json!({ "tasks": [] }));
}

#[test_log::test(tokio::test)]
async fn test_repeat_longer_than_column_is_rejected() {
    let db = TestDb::new().await.expect("Failed to create test database");
    let service = db.service();

    let long_rule = format!("m {}1", "1,".repeat(70));
    let res = send_json(
        &service,
        Method::POST,
        "/api/task",
        &json!({ "title": "Long rule", "date": "20240301", "repeat": long_rule }),
        None,
    )
    .await
    .assert_status(StatusCode::BAD_REQUEST);
    assert!(res.error_message().contains("128"));

    let id = create_task(&service, &json!({ "title": "Short rule", "date": "20240301" })).await;
    send_json(
        &service,
        Method::PUT,
        "/api/task",
        &json!({ "id": id, "title": "Short rule", "date": "20240301", "repeat": long_rule }),
        None,
    )
    .await
    .assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(get_task(&service, &id).await.json()["repeat"], "");
}
