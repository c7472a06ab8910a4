mod common;

use axum::http::StatusCode;
use common::*;

#[tokio::test]
async fn test_artist_index_is_ordered_by_name() {
    let (app, _db) = test_app().await;
    post_form(&app, "/artists", &guns_n_petals()).await;
    let mut quevedo = guns_n_petals();
    quevedo[0] = ("name", "Matt Quevedo");
    let res = post_form(&app, "/artists", &quevedo).await;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location.as_deref(), Some("/"));

    let list = get(&app, "/artists").await;
    assert_eq!(list.status, StatusCode::OK);
    let names: Vec<&str> = list
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Guns N Petals", "Matt Quevedo"]);
    assert!(list.body[0]["id"].is_number());
}

#[tokio::test]
async fn test_invalid_artist() {
    let (app, _db) = test_app().await;

    let res = post_form(
        &app,
        "/artists",
        &[("city", "Austin"), ("state", "TX"), ("genres", "Jazz")],
    )
    .await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(res.body["errors"][0]["field"], "name");
    assert_eq!(res.body["errors"][0]["message"], "Artist name is required.");
    assert_eq!(res.body["form"]["city"], "Austin");
}

#[tokio::test]
async fn test_duplicate_artist_is_a_conflict() {
    let (app, _db) = test_app().await;
    post_form(&app, "/artists", &guns_n_petals()).await;

    let res = post_form(&app, "/artists", &guns_n_petals()).await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(
        res.body["error"],
        "An error occurred. Artist Guns N Petals could not be listed."
    );
}

#[tokio::test]
async fn test_artist_detail_edit_and_update() {
    let (app, _db) = test_app().await;
    post_form(&app, "/artists", &guns_n_petals()).await;
    let id = id_of(&app, "artists", "petals").await;

    let detail = get(&app, &format!("/artists/{id}")).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body["seeking_venue"], true);
    assert_eq!(detail.body["genres"], serde_json::json!(["Rock n Roll"]));

    let edit = get(&app, &format!("/artists/{id}/edit")).await;
    assert_eq!(edit.body["form"]["seeking_venue"], true);

    // unchecked checkbox is simply absent from the submission
    let mut changed: Vec<(&str, &str)> = guns_n_petals()
        .into_iter()
        .filter(|(k, _)| *k != "seeking_venue")
        .collect();
    changed[1] = ("city", "Oakland");
    let res = post_form(&app, &format!("/artists/{id}"), &changed).await;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location, Some(format!("/artists/{id}")));

    let detail = get(&app, &format!("/artists/{id}")).await;
    assert_eq!(detail.body["city"], "Oakland");
    assert_eq!(detail.body["seeking_venue"], false);
}

#[tokio::test]
async fn test_missing_artist() {
    let (app, _db) = test_app().await;

    assert_eq!(get(&app, "/artists/5").await.status, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/artists/5/edit").await.status, StatusCode::NOT_FOUND);

    let res = post_form(&app, "/artists/5/delete", &[]).await;
    assert_eq!(res.status, StatusCode::SEE_OTHER);
    assert_eq!(res.location.as_deref(), Some("/"));
}

#[tokio::test]
async fn test_search_artists() {
    let (app, _db) = test_app().await;
    post_form(&app, "/artists", &guns_n_petals()).await;

    let res = post_form(&app, "/artists/search", &[("search_term", "  GUNS ")]).await;
    assert_eq!(res.body["count"], 1);
    assert_eq!(res.body["data"][0]["num_upcoming_shows"], 0);

    let literal = post_form(&app, "/artists/search", &[("search_term", "%")]).await;
    assert_eq!(literal.body["count"], 0);
}
