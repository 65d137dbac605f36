//! Tests for converting carousels into Discord builders.

mod test_utils;

use culture_carousel::{Notice, RouteOutcome};
use culture_core::{SearchQuery, UserId};
use culture_social::render::{components, edit_message, embed, notice_followup};
use serde_json::Value;
use test_utils::{COLOR, POST_PAGE, post, registry};

const OWNER: UserId = UserId(1);

fn buttons(rows: &Value) -> Vec<&Value> {
    rows.as_array()
        .expect("rows")
        .iter()
        .flat_map(|row| row["components"].as_array().expect("buttons"))
        .collect()
}

fn button<'a>(rows: &'a Value, label: &str) -> &'a Value {
    buttons(rows)
        .into_iter()
        .find(|button| button["label"] == label)
        .unwrap_or_else(|| panic!("No button labelled {label}"))
}

#[tokio::test]
async fn test_first_page_of_search() {
    let registry = registry(vec![post(1, "png"), post(2, "png"), post(3, "png")]);
    let (id, message) = registry
        .create_search_carousel(OWNER, SearchQuery::new("cat", 3))
        .await;

    let edit = serde_json::to_value(edit_message(&message)).unwrap();
    let embed = &edit["embeds"][0];
    assert_eq!(embed["description"], "**Post 1 of 3**");
    assert_eq!(embed["color"], COLOR.value());
    assert_eq!(embed["image"]["url"], "https://img.test/1.png");
    assert_eq!(embed["footer"]["text"], "Score: 7 • Rating: sensitive");
    assert!(embed["timestamp"].is_string());

    let rows = &edit["components"];
    assert_eq!(rows.as_array().unwrap().len(), 2);
    assert_eq!(button(rows, "◀")["disabled"], true);
    assert_eq!(button(rows, "▶")["disabled"], false);
    assert_eq!(button(rows, "▶")["custom_id"], format!("act/next/{id}"));
    assert_eq!(button(rows, "🔎")["url"], format!("{POST_PAGE}1"));
    assert_eq!(button(rows, "💾")["url"], "https://img.test/1.png");
    assert_eq!(button(rows, "🔄")["custom_id"], format!("act/refresh/{id}"));
}

#[tokio::test]
async fn test_unsupported_format_has_no_image() {
    let registry = registry(vec![post(9, "webm")]);
    let (_, message) = registry
        .create_search_carousel(OWNER, SearchQuery::new("clip", 1))
        .await;

    let embed = serde_json::to_value(embed(message.embed())).unwrap();
    assert!(embed.get("image").is_none());
    assert!(
        embed["description"]
            .as_str()
            .unwrap()
            .starts_with("**This format is not supported!**")
    );
}

#[tokio::test]
async fn test_no_results_clears_controls() {
    let registry = registry(Vec::new());
    let (_, message) = registry
        .create_search_carousel(OWNER, SearchQuery::new("nothing", 5))
        .await;

    assert!(components(&message).is_empty());
    let edit = serde_json::to_value(edit_message(&message)).unwrap();
    assert_eq!(edit["components"], Value::Array(Vec::new()));
    assert_eq!(edit["embeds"][0]["description"], "**No posts found**");
}

#[tokio::test]
async fn test_hidden_carousel_shows_only_reveal() {
    let registry = registry(vec![post(1, "png"), post(2, "png")]);
    let (id, _) = registry
        .create_search_carousel(OWNER, SearchQuery::new("cat", 2))
        .await;

    let RouteOutcome::Handled(culture_carousel::ActionResponse::Update(message)) =
        registry.route(&format!("act/hide/{id}"), OWNER).await
    else {
        panic!("Hiding should update the message");
    };

    let rows = serde_json::to_value(components(&message)).unwrap();
    let all = buttons(&rows);
    assert_eq!(all.len(), 1);
    assert_eq!(all[0]["label"], "👀");
    assert_eq!(all[0]["custom_id"], format!("act/hide/{id}"));
}

#[test]
fn test_notices_are_ephemeral() {
    let followup = serde_json::to_value(notice_followup(Notice::FavoriteAdded)).unwrap();

    assert_eq!(followup["flags"], 64);
    assert_eq!(followup["embeds"][0]["description"], "**Post added to favorites**");
    assert_eq!(
        followup["embeds"][0]["color"],
        culture_core::Color::GOLD.value()
    );
}
