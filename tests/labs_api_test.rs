mod common;

use common::{bearer, client, seed_account, seed_lab, setup_app_data};
use healthcard_backend::types::internal::{AccountType, Role};
use poem::http::StatusCode;
use rust_decimal::Decimal;
use serde_json::json;

#[tokio::test]
async fn test_staff_reads_own_lab_discount() {
    let app_data = setup_app_data().await;
    let lab = seed_lab(&app_data, "LAB-A", Some(Decimal::new(12, 0))).await;
    let staff = seed_account(
        &app_data,
        AccountType::LabStaff,
        "desk@example.com",
        Role::Receptionist,
        Some(lab.id.clone()),
        false,
    )
    .await;
    let header = bearer(&app_data, &staff);
    let cli = client(app_data);

    let resp = cli
        .get(format!("/api/labs/{}/discount", lab.id))
        .header("Authorization", header)
        .send()
        .await;
    resp.assert_status_is_ok();

    let json = resp.json().await;
    let body = json.value().object();
    body.get("code").assert_string("LAB-A");
    body.get("discount_rate").assert_f64(12.0);
    body.get("effective_rate").assert_f64(12.0);
}

#[tokio::test]
async fn test_staff_cannot_read_other_lab() {
    let app_data = setup_app_data().await;
    let own = seed_lab(&app_data, "LAB-A", None).await;
    let other = seed_lab(&app_data, "LAB-B", None).await;
    let staff = seed_account(
        &app_data,
        AccountType::LabStaff,
        "desk@example.com",
        Role::Receptionist,
        Some(own.id),
        false,
    )
    .await;
    let header = bearer(&app_data, &staff);
    let cli = client(app_data);

    let resp = cli
        .get(format!("/api/labs/{}/discount", other.id))
        .header("Authorization", header)
        .send()
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_receptionist_cannot_set_lab_discount() {
    let app_data = setup_app_data().await;
    let lab = seed_lab(&app_data, "LAB-A", None).await;
    let staff = seed_account(
        &app_data,
        AccountType::LabStaff,
        "desk@example.com",
        Role::Receptionist,
        Some(lab.id.clone()),
        false,
    )
    .await;
    let header = bearer(&app_data, &staff);
    let cli = client(app_data);

    let resp = cli
        .put(format!("/api/labs/{}/discount", lab.id))
        .header("Authorization", header)
        .body_json(&json!({ "discount_rate": 40 }))
        .send()
        .await;
    resp.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_branch_admin_sets_and_clears_override() {
    let app_data = setup_app_data().await;
    let lab = seed_lab(&app_data, "LAB-A", None).await;
    let branch_admin = seed_account(
        &app_data,
        AccountType::LabStaff,
        "branch@example.com",
        Role::BranchAdmin,
        Some(lab.id.clone()),
        false,
    )
    .await;
    let header = bearer(&app_data, &branch_admin);
    let cli = client(app_data);
    let path = format!("/api/labs/{}/discount", lab.id);

    let resp = cli
        .put(path.clone())
        .header("Authorization", header.clone())
        .body_json(&json!({ "discount_rate": 40 }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    json.value().object().get("effective_rate").assert_f64(40.0);

    let resp = cli
        .put(path)
        .header("Authorization", header)
        .body_json(&json!({ "discount_rate": null }))
        .send()
        .await;
    resp.assert_status_is_ok();
    let json = resp.json().await;
    let body = json.value().object();
    assert!(body.get_opt("discount_rate").is_none());
    body.get("effective_rate").assert_f64(30.0);
}

#[tokio::test]
async fn test_super_admin_bypasses_lab_scope() {
    let app_data = setup_app_data().await;
    let lab = seed_lab(&app_data, "LAB-A", None).await;
    let admin = seed_account(&app_data, AccountType::Admin, "root@example.com", Role::SuperAdmin, None, false).await;
    let header = bearer(&app_data, &admin);
    let cli = client(app_data);

    let resp = cli
        .put(format!("/api/labs/{}/discount", lab.id))
        .header("Authorization", header)
        .body_json(&json!({ "discount_rate": 5 }))
        .send()
        .await;
    resp.assert_status_is_ok();
}

#[tokio::test]
async fn test_unknown_lab_is_not_found() {
    let app_data = setup_app_data().await;
    let admin = seed_account(&app_data, AccountType::Admin, "root@example.com", Role::SuperAdmin, None, false).await;
    let header = bearer(&app_data, &admin);
    let cli = client(app_data);

    let resp = cli
        .get("/api/labs/no-such-lab/discount")
        .header("Authorization", header)
        .send()
        .await;
    resp.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_out_of_range_lab_rate_is_rejected() {
    let app_data = setup_app_data().await;
    let lab = seed_lab(&app_data, "LAB-A", Some(Decimal::new(10, 0))).await;
    let admin = seed_account(&app_data, AccountType::Admin, "root@example.com", Role::SuperAdmin, None, false).await;
    let header = bearer(&app_data, &admin);
    let cli = client(app_data);
    let path = format!("/api/labs/{}/discount", lab.id);

    let resp = cli
        .put(path.clone())
        .header("Authorization", header.clone())
        .body_json(&json!({ "discount_rate": 101 }))
        .send()
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);

    let resp = cli.get(path).header("Authorization", header).send().await;
    let json = resp.json().await;
    json.value().object().get("discount_rate").assert_f64(10.0);
}
