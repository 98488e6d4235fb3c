//
//  confluence-connect
//  tests/client_tests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/07/18.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Client catalog behavior against a mock remote: request shapes, the
//! `set_content` retry cycle, and the attachment transfer chain.

mod support;

use confluence_connect::api::attachments::Attachment;
use confluence_connect::api::content::{
    ContentDraft, ContentUpdate, CopyDestination, CopyPageRequest, MovePosition,
};
use confluence_connect::api::properties::PropertyDraft;
use confluence_connect::api::Params;
use mockito::Matcher;
use serde_json::json;
use support::MockConfluence;

#[tokio::test]
async fn test_create_content_posts_page_draft() {
    let mut fixture = MockConfluence::start().await;
    let mock = fixture
        .server
        .mock("POST", "/rest/api/content")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "type": "page",
            "title": "Release notes",
            "space": {"key": "DEV"},
            "body": {"storage": {"value": "<p>hello</p>", "representation": "storage"}},
            "ancestors": []
        })))
        .with_status(200)
        .with_body(
            json!({
                "id": "98306",
                "type": "page",
                "status": "current",
                "title": "Release notes",
                "version": {"number": 1}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let draft = ContentDraft::page("Release notes", "DEV").body_storage("<p>hello</p>");
    let page = fixture.client.create_content(&draft).await.unwrap();

    assert_eq!(page.id, "98306");
    assert_eq!(page.version.unwrap().number, 1);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_get_content_by_id_sends_expansions() {
    let mut fixture = MockConfluence::start().await;
    let mock = fixture
        .server
        .mock("GET", "/rest/api/content/98306")
        .match_query(Matcher::UrlEncoded("expand".into(), "version,space".into()))
        .with_status(200)
        .with_body(
            json!({
                "id": "98306",
                "type": "page",
                "title": "Release notes",
                "space": {"key": "DEV"},
                "version": {"number": 4}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let content = fixture
        .client
        .get_content_by_id("98306", Params::new().expand(["version", "space"]))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(content.space.unwrap().key, "DEV");
    assert_eq!(content.version.unwrap().number, 4);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_set_content_merges_current_and_bumps_version() {
    let mut fixture = MockConfluence::start().await;
    let read = fixture
        .server
        .mock("GET", "/rest/api/content/42")
        .match_query(Matcher::UrlEncoded("expand".into(), "version".into()))
        .with_status(200)
        .with_body(
            json!({
                "id": "42",
                "type": "page",
                "title": "Runbook",
                "version": {"number": 7}
            })
            .to_string(),
        )
        .create_async()
        .await;
    let write = fixture
        .server
        .mock("PUT", "/rest/api/content/42")
        .match_body(Matcher::Json(json!({
            "type": "page",
            "title": "Runbook",
            "version": {"number": 8},
            "body": {"storage": {"value": "<p>updated</p>", "representation": "storage"}}
        })))
        .with_status(200)
        .with_body(
            json!({
                "id": "42",
                "type": "page",
                "title": "Runbook",
                "version": {"number": 8}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let updated = fixture
        .client
        .set_content("42", &ContentUpdate::body_storage("<p>updated</p>"))
        .await
        .unwrap();

    assert_eq!(updated.version.unwrap().number, 8);
    read.assert_async().await;
    write.assert_async().await;
}

#[tokio::test]
async fn test_set_content_falls_back_to_create() {
    let mut fixture = MockConfluence::start().await;
    let read = fixture
        .server
        .mock("GET", "/rest/api/content/42")
        .match_query(Matcher::UrlEncoded("expand".into(), "version".into()))
        .with_status(404)
        .with_body(r#"{"statusCode": 404, "message": "No content found"}"#)
        .create_async()
        .await;
    let create = fixture
        .server
        .mock("POST", "/rest/api/content")
        .match_body(Matcher::Json(json!({
            "body": {"storage": {"value": "<p>fresh</p>", "representation": "storage"}}
        })))
        .with_status(200)
        .with_body(
            json!({"id": "105", "type": "page", "title": "Fresh", "version": {"number": 1}})
                .to_string(),
        )
        .create_async()
        .await;

    let created = fixture
        .client
        .set_content("42", &ContentUpdate::body_storage("<p>fresh</p>"))
        .await
        .unwrap();

    assert_eq!(created.id, "105");
    read.assert_async().await;
    create.assert_async().await;
}

#[tokio::test]
async fn test_set_content_retries_conflicts_then_surfaces_them() {
    let mut fixture = MockConfluence::start().await;
    // Initial attempt plus two retries: three reads, three writes.
    let read = fixture
        .server
        .mock("GET", "/rest/api/content/42")
        .match_query(Matcher::UrlEncoded("expand".into(), "version".into()))
        .with_status(200)
        .with_body(
            json!({"id": "42", "type": "page", "title": "Runbook", "version": {"number": 7}})
                .to_string(),
        )
        .expect(3)
        .create_async()
        .await;
    let write = fixture
        .server
        .mock("PUT", "/rest/api/content/42")
        .with_status(409)
        .with_body(r#"{"statusCode": 409, "message": "Version must be incremented on update"}"#)
        .expect(3)
        .create_async()
        .await;

    let err = fixture
        .client
        .set_content("42", &ContentUpdate::body_storage("<p>x</p>"))
        .await
        .unwrap_err();

    assert!(err.is_conflict());
    read.assert_async().await;
    write.assert_async().await;
}

#[tokio::test]
async fn test_move_content_builds_position_path() {
    let mut fixture = MockConfluence::start().await;
    let mock = fixture
        .server
        .mock("PUT", "/rest/api/content/42/move/append/117")
        .with_status(200)
        .with_body(r#"{"pageId": "42"}"#)
        .create_async()
        .await;

    let reply = fixture
        .client
        .move_content("42", MovePosition::Append, "117")
        .await
        .unwrap();

    assert_eq!(reply["pageId"], "42");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_copy_single_page_posts_destination() {
    let mut fixture = MockConfluence::start().await;
    let mock = fixture
        .server
        .mock("POST", "/rest/api/content/42/copy")
        .match_body(Matcher::Json(json!({
            "copyAttachments": true,
            "copyPermissions": true,
            "copyProperties": true,
            "copyLabels": true,
            "copyCustomContents": true,
            "destination": {"type": "parent_page", "value": "117"}
        })))
        .with_status(200)
        .with_body(
            json!({"id": "131073", "type": "page", "title": "Runbook", "version": {"number": 1}})
                .to_string(),
        )
        .create_async()
        .await;

    let request = CopyPageRequest::to(CopyDestination::parent_page("117")).copy_everything();
    let copy = fixture
        .client
        .copy_single_page("42", &request, Params::new())
        .await
        .unwrap();

    assert_eq!(copy.id, "131073");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_property_operations_pick_scope_segment() {
    let mut fixture = MockConfluence::start().await;
    let content_mock = fixture
        .server
        .mock("POST", "/rest/api/content/98306/property")
        .match_body(Matcher::Json(json!({"key": "my-sample-app-flag", "value": true})))
        .with_status(200)
        .with_body(
            json!({"key": "my-sample-app-flag", "value": true, "version": {"number": 1}})
                .to_string(),
        )
        .create_async()
        .await;
    let space_mock = fixture
        .server
        .mock("GET", "/rest/api/space/DEV/property/theme")
        .with_status(200)
        .with_body(json!({"key": "theme", "value": {"color": "teal"}}).to_string())
        .create_async()
        .await;

    let created = fixture
        .client
        .create_content_property("98306", &PropertyDraft::new("my-sample-app-flag", json!(true)))
        .await
        .unwrap();
    assert_eq!(created.version.unwrap().number, 1);

    let theme = fixture
        .client
        .get_space_property("DEV", "theme", Params::new())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(theme.value["color"], "teal");

    content_mock.assert_async().await;
    space_mock.assert_async().await;
}

#[tokio::test]
async fn test_addon_property_body_404_reads_as_absent() {
    let mut fixture = MockConfluence::start().await;
    fixture
        .server
        .mock(
            "GET",
            "/rest/atlassian-connect/1/addons/my-sample-app/properties/build",
        )
        .with_status(400)
        .with_body(r#"{"status-code": 404, "message": "Property with key not found."}"#)
        .create_async()
        .await;

    let property = fixture
        .client
        .get_addon_property("my-sample-app", "build", Params::new())
        .await
        .unwrap();
    assert!(property.is_none());
}

#[tokio::test]
async fn test_attachment_upload_sends_multipart_file() {
    let mut fixture = MockConfluence::start().await;
    let mock = fixture
        .server
        .mock("PUT", "/rest/api/content/98306/child/attachment")
        .match_header("x-atlassian-token", "nocheck")
        .match_body(Matcher::Regex(
            r#"(?s)name="file"; filename="notes.txt".*meeting notes"#.to_string(),
        ))
        .with_status(200)
        .with_body(
            json!({
                "results": [{
                    "id": "att196609",
                    "title": "notes.txt",
                    "version": {"number": 1},
                    "_links": {"download": "/download/attachments/98306/notes.txt"}
                }],
                "size": 1
            })
            .to_string(),
        )
        .create_async()
        .await;

    let listing = fixture
        .client
        .create_or_update_attachment_from_stream(
            "98306",
            "meeting notes".to_string(),
            "notes.txt",
            Params::new(),
        )
        .await
        .unwrap();

    assert_eq!(listing.results[0].title, "notes.txt");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_attachment_copy_downloads_then_uploads() {
    let mut fixture = MockConfluence::start().await;
    let download = fixture
        .server
        .mock("GET", "/download/attachments/98306/report.txt")
        .match_query(Matcher::UrlEncoded("version".into(), "2".into()))
        .with_status(200)
        .with_body("quarterly numbers")
        .create_async()
        .await;
    let upload = fixture
        .server
        .mock("PUT", "/rest/api/content/117/child/attachment")
        .match_header("x-atlassian-token", "nocheck")
        .match_body(Matcher::Regex(
            r#"(?s)filename="report.txt".*quarterly numbers"#.to_string(),
        ))
        .with_status(200)
        .with_body(
            json!({
                "results": [{
                    "id": "att196610",
                    "title": "report.txt",
                    "version": {"number": 1},
                    "_links": {"download": "/download/attachments/117/report.txt"}
                }],
                "size": 1
            })
            .to_string(),
        )
        .create_async()
        .await;

    let attachment: Attachment = serde_json::from_value(json!({
        "id": "att196609",
        "title": "report.txt",
        "version": {"number": 2},
        "_links": {"download": "/download/attachments/98306/report.txt?version=2"}
    }))
    .unwrap();

    let listing = fixture
        .client
        .create_or_update_attachment("117", &attachment, Params::new())
        .await
        .unwrap();

    assert_eq!(listing.results.len(), 1);
    download.assert_async().await;
    upload.assert_async().await;
}

#[tokio::test]
async fn test_group_member_listing_encodes_name() {
    let mut fixture = MockConfluence::start().await;
    let mock = fixture
        .server
        .mock("GET", "/rest/api/group/confluence%20users/member")
        .with_status(200)
        .with_body(
            json!({
                "results": [{"accountId": "5b10ac8d", "displayName": "Emma", "type": "known"}],
                "size": 1
            })
            .to_string(),
        )
        .create_async()
        .await;

    let members = fixture
        .client
        .get_members("confluence users", Params::new())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(members.results[0].display_name.as_deref(), Some("Emma"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_prototype_user_search_caps_results() {
    let mut fixture = MockConfluence::start().await;
    let mock = fixture
        .server
        .mock("GET", "/rest/prototype/1/search/user")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("query".into(), "emma".into()),
            Matcher::UrlEncoded("max-results".into(), "10".into()),
        ]))
        .with_status(200)
        .with_body(json!({"result": [], "totalSize": 0}).to_string())
        .create_async()
        .await;

    let hits = fixture
        .client
        .user_search("emma", Params::new())
        .await
        .unwrap();
    assert!(hits.is_some());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_cql_search_encodes_query() {
    let mut fixture = MockConfluence::start().await;
    let mock = fixture
        .server
        .mock("GET", "/rest/api/search")
        .match_query(Matcher::UrlEncoded(
            "cql".into(),
            "space = \"DEV\" and type = page".into(),
        ))
        .with_status(200)
        .with_body(json!({"results": [], "totalSize": 0}).to_string())
        .create_async()
        .await;

    let hits = fixture
        .client
        .cql_search("space = \"DEV\" and type = page", Params::new())
        .await
        .unwrap();
    assert!(hits.is_some());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_bulk_emails_repeat_account_id_pairs() {
    let mut fixture = MockConfluence::start().await;
    let mock = fixture
        .server
        .mock("GET", "/rest/api/user/email/bulk")
        .match_query(Matcher::AllOf(vec![
            Matcher::Regex("accountId=id-one".into()),
            Matcher::Regex("accountId=id-two".into()),
        ]))
        .with_status(200)
        .with_body(
            json!([
                {"accountId": "id-one", "email": "one@example.com"},
                {"accountId": "id-two", "email": "two@example.com"}
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let emails = fixture
        .client
        .get_bulk_emails(&["id-one", "id-two"])
        .await
        .unwrap()
        .unwrap();

    assert_eq!(emails.as_array().unwrap().len(), 2);
    mock.assert_async().await;
}
