//! Tests for carousel rendering and action handling.

mod test_utils;

use culture_carousel::{ActionResponse, Carousel, CarouselKind, Control, ControlStyle, Notice};
use culture_core::{Color, Post, PostId, SearchQuery, UserId};
use culture_database::InMemoryFavoritesRepository;
use culture_interface::FavoritesRepository;
use std::sync::Arc;
use test_utils::{FailingFavorites, FixedColor, MockPostSource, POST_PAGE, post, services};

const ALICE: UserId = UserId(11);
const BOB: UserId = UserId(22);

fn labels(message: &culture_carousel::RenderedMessage) -> Vec<Vec<String>> {
    message
        .rows()
        .iter()
        .map(|row| row.controls().iter().map(|c| c.label().to_string()).collect())
        .collect()
}

fn expect_update(response: Option<ActionResponse>) -> culture_carousel::RenderedMessage {
    match response {
        Some(ActionResponse::Update(message)) => message,
        other => panic!("Expected an update, got {other:?}"),
    }
}

async fn search_carousel(
    posts: Vec<Post>,
    limit: u32,
) -> (Carousel, Arc<MockPostSource>, Arc<InMemoryFavoritesRepository>) {
    let source = Arc::new(MockPostSource::with_posts(posts));
    let favorites = Arc::new(InMemoryFavoritesRepository::new());
    let carousel = Carousel::search(
        ALICE,
        SearchQuery::new("cat_ears", limit),
        services(source.clone(), favorites.clone()),
    )
    .await;
    (carousel, source, favorites)
}

async fn favorites_carousel(
    owner: UserId,
    favorites_user: UserId,
    ids: &[u64],
) -> (Carousel, Arc<MockPostSource>, Arc<InMemoryFavoritesRepository>) {
    let source = Arc::new(MockPostSource::with_posts(ids.iter().map(|id| post(*id)).collect()));
    let favorites = Arc::new(InMemoryFavoritesRepository::with_favorites(
        favorites_user,
        ids.iter().map(|id| PostId(*id)),
    ));
    let carousel = Carousel::favorites(
        owner,
        favorites_user,
        services(source.clone(), favorites.clone()),
    )
    .await;
    (carousel, source, favorites)
}

#[tokio::test]
async fn test_single_post_rendering() {
    let (mut carousel, _, _) = search_carousel(vec![post(1)], 1).await;

    let message = carousel.render().await;
    let embed = message.embed();

    assert_eq!(embed.description(), &None);
    assert_eq!(embed.image_url().as_deref(), Some("https://img.test/1.png"));
    assert_eq!(embed.footer().as_deref(), Some("Score: 1 • Rating: general"));
    assert_eq!(*embed.color(), FixedColor::default().0);
    assert!(embed.timestamp().is_some());
    assert_eq!(
        labels(&message),
        vec![vec!["🔎", "💾"], vec!["❤️", "👀", "🔄"]]
    );
    assert_eq!(
        message.control("🔎"),
        Some(&Control::Link {
            label: "🔎".to_string(),
            url: format!("{POST_PAGE}1"),
        })
    );
}

#[tokio::test]
async fn test_multi_post_rendering_tracks_position() {
    let (mut carousel, _, _) = search_carousel(vec![post(1), post(2), post(3)], 3).await;

    let message = carousel.render().await;
    assert_eq!(message.embed().description().as_deref(), Some("**Post 1 of 3**"));
    assert_eq!(labels(&message)[0], vec!["◀", "▶", "🔎", "💾"]);
    assert!(message.control("◀").unwrap().is_disabled());
    assert!(!message.control("▶").unwrap().is_disabled());

    carousel.handle_action("next", BOB).await;
    let message = expect_update(carousel.handle_action("next", BOB).await);
    assert_eq!(message.embed().description().as_deref(), Some("**Post 3 of 3**"));
    assert!(!message.control("◀").unwrap().is_disabled());
    assert!(message.control("▶").unwrap().is_disabled());
}

#[tokio::test]
async fn test_not_found_rendering_has_no_controls() {
    let (mut carousel, _, _) = search_carousel(Vec::new(), 5).await;

    let message = carousel.render().await;

    assert_eq!(message.embed().description().as_deref(), Some("**No posts found**"));
    assert_eq!(*message.embed().color(), Color::DARK_RED);
    assert!(message.rows().is_empty());
}

#[tokio::test]
async fn test_transient_error_keeps_user_controls() {
    let source = Arc::new(MockPostSource::with_posts(vec![post(1)]));
    source.set_failing(true);
    let mut carousel = Carousel::search(
        ALICE,
        SearchQuery::new("cat", 1),
        services(source.clone(), Arc::new(InMemoryFavoritesRepository::new())),
    )
    .await;

    let message = carousel.render().await;

    assert_eq!(
        message.embed().description().as_deref(),
        Some("**An error occurred while fetching this post**")
    );
    assert_eq!(labels(&message), vec![vec!["❤️", "👀", "🔄"]]);
}

#[tokio::test]
async fn test_missing_item_keeps_navigation() {
    let (mut carousel, source, _) = favorites_carousel(ALICE, ALICE, &[1, 2]).await;
    source.delete(PostId(1));

    let message = carousel.render().await;

    assert_eq!(
        message.embed().description().as_deref(),
        Some("**This post does not exist**")
    );
    assert_eq!(labels(&message), vec![vec!["◀", "▶"], vec!["❤️", "👀"]]);
}

#[tokio::test]
async fn test_unsupported_format_has_no_image() {
    let video = Post::builder()
        .id(PostId(8))
        .file_url("https://img.test/8.mp4")
        .build()
        .unwrap();
    let (mut carousel, _, _) = search_carousel(vec![video], 1).await;

    let message = carousel.render().await;

    assert!(message.embed().image_url().is_none());
    assert!(
        message
            .embed()
            .description()
            .as_deref()
            .is_some_and(|text| text.contains("not supported"))
    );
}

#[tokio::test]
async fn test_hide_is_owner_only() {
    let (mut carousel, _, _) = search_carousel(vec![post(1)], 1).await;

    let response = carousel.handle_action("hide", BOB).await;

    assert_eq!(response, Some(ActionResponse::Reply(Notice::OwnerOnlyHide)));
    assert!(!carousel.is_hidden());
}

#[tokio::test]
async fn test_hide_and_reveal_by_owner() {
    let (mut carousel, _, _) = search_carousel(vec![post(1)], 1).await;

    let hidden = expect_update(carousel.handle_action("hide", ALICE).await);
    assert!(carousel.is_hidden());
    assert_eq!(
        hidden.embed().description().as_deref(),
        Some("**Content is hidden**")
    );
    assert_eq!(labels(&hidden), vec![vec!["👀"]]);
    assert!(matches!(
        hidden.control("👀"),
        Some(Control::Button {
            style: ControlStyle::Success,
            ..
        })
    ));

    let shown = expect_update(carousel.handle_action("hide", ALICE).await);
    assert!(!carousel.is_hidden());
    assert!(shown.embed().image_url().is_some());
}

#[tokio::test]
async fn test_refresh_is_owner_only() {
    let (mut carousel, source, _) = search_carousel(vec![post(1)], 1).await;

    let response = carousel.handle_action("refresh", BOB).await;

    assert_eq!(response, Some(ActionResponse::Reply(Notice::OwnerOnlyRefresh)));
    assert_eq!(source.search_calls(), 1);
}

#[tokio::test]
async fn test_refresh_replays_query_and_replaces_data() {
    let (mut carousel, source, _) = search_carousel(vec![post(1), post(2)], 2).await;
    carousel.handle_action("next", ALICE).await;
    assert_eq!(carousel.data().position(), Some((1, 2)));

    source.set_search_results(vec![post(5), post(6)]);
    let message = expect_update(carousel.handle_action("refresh", ALICE).await);

    assert_eq!(source.search_calls(), 2);
    assert_eq!(source.last_query(), Some(SearchQuery::new("cat_ears", 2)));
    assert_eq!(carousel.data().position(), Some((0, 2)));
    assert_eq!(
        message.embed().image_url().as_deref(),
        Some("https://img.test/5.png")
    );
}

#[tokio::test]
async fn test_favorites_carousel_has_no_refresh() {
    let (mut carousel, _, _) = favorites_carousel(ALICE, ALICE, &[1]).await;

    assert_eq!(carousel.handle_action("refresh", ALICE).await, None);
    let message = carousel.render().await;
    assert!(message.control("🔄").is_none());
}

#[tokio::test]
async fn test_unknown_and_inapplicable_actions_are_unhandled() {
    let (mut carousel, _, _) = search_carousel(vec![post(1)], 1).await;

    assert_eq!(carousel.handle_action("explode", ALICE).await, None);
    assert_eq!(carousel.handle_action("next", ALICE).await, None);
    assert_eq!(carousel.handle_action("previous", ALICE).await, None);
}

#[tokio::test]
async fn test_favorite_belongs_to_clicking_user() {
    let (mut carousel, _, favorites) = search_carousel(vec![post(1)], 1).await;

    let response = carousel.handle_action("favorite", BOB).await;

    assert_eq!(response, Some(ActionResponse::Reply(Notice::FavoriteAdded)));
    assert_eq!(favorites.favorites(BOB).await.unwrap(), vec![PostId(1)]);
    assert!(favorites.favorites(ALICE).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_favorite_toggle_round_trip() {
    let (mut carousel, _, favorites) = search_carousel(vec![post(1)], 1).await;
    favorites.add_favorite(BOB, PostId(99)).await.unwrap();

    carousel.handle_action("favorite", BOB).await;
    assert_eq!(
        favorites.favorites(BOB).await.unwrap(),
        vec![PostId(99), PostId(1)]
    );

    let response = carousel.handle_action("favorite", BOB).await;
    assert_eq!(response, Some(ActionResponse::Reply(Notice::FavoriteRemoved)));
    assert_eq!(favorites.favorites(BOB).await.unwrap(), vec![PostId(99)]);
}

#[tokio::test]
async fn test_favorite_without_post_is_rejected() {
    let (mut carousel, _, favorites) = search_carousel(Vec::new(), 1).await;

    let response = carousel.handle_action("favorite", ALICE).await;

    assert_eq!(response, Some(ActionResponse::Reply(Notice::PostGone)));
    assert!(favorites.favorites(ALICE).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_favorite_while_board_unreachable_asks_to_retry() {
    let source = Arc::new(MockPostSource::with_posts(vec![post(1)]));
    source.set_failing(true);
    let favorites = Arc::new(InMemoryFavoritesRepository::new());
    let mut carousel = Carousel::search(
        ALICE,
        SearchQuery::new("cat", 1),
        services(source, favorites.clone()),
    )
    .await;

    let response = carousel.handle_action("favorite", ALICE).await;

    assert_eq!(response, Some(ActionResponse::Reply(Notice::PostUnavailable)));
    assert_ne!(Notice::PostUnavailable.text(), Notice::PostGone.text());
    assert!(favorites.favorites(ALICE).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_favorite_with_store_down() {
    let source = Arc::new(MockPostSource::with_posts(vec![post(1)]));
    let mut carousel = Carousel::search(
        ALICE,
        SearchQuery::new("cat", 1),
        services(source, Arc::new(FailingFavorites)),
    )
    .await;

    let response = carousel.handle_action("favorite", ALICE).await;

    assert_eq!(
        response,
        Some(ActionResponse::Reply(Notice::FavoritesUnavailable))
    );
}

#[tokio::test]
async fn test_owner_unfavorite_reloads_and_clamps_cursor() {
    let (mut carousel, _, favorites) = favorites_carousel(ALICE, ALICE, &[1, 2, 3, 4, 5]).await;
    carousel.handle_action("next", ALICE).await;
    carousel.handle_action("next", ALICE).await;
    assert_eq!(carousel.data().position(), Some((2, 5)));

    let response = carousel.handle_action("favorite", ALICE).await;

    let Some(ActionResponse::UpdateWithNotice { message, notice }) = response else {
        panic!("Expected an update with notice, got {response:?}");
    };
    assert_eq!(notice, Notice::FavoriteRemoved);
    assert_eq!(carousel.data().position(), Some((2, 4)));
    assert_eq!(message.embed().description().as_deref(), Some("**Post 3 of 4**"));
    assert_eq!(
        message.embed().image_url().as_deref(),
        Some("https://img.test/4.png")
    );
    assert_eq!(
        favorites.favorites(ALICE).await.unwrap(),
        vec![PostId(1), PostId(2), PostId(4), PostId(5)]
    );
}

#[tokio::test]
async fn test_owner_unfavorite_of_last_post_clamps_to_new_end() {
    let (mut carousel, _, _) = favorites_carousel(ALICE, ALICE, &[1, 2, 3]).await;
    for _ in 0..2 {
        carousel.handle_action("next", ALICE).await;
    }

    carousel.handle_action("favorite", ALICE).await;

    assert_eq!(carousel.data().position(), Some((1, 2)));
}

#[tokio::test]
async fn test_owner_unfavorite_of_only_post_leaves_not_found() {
    let (mut carousel, _, _) = favorites_carousel(ALICE, ALICE, &[1]).await;

    let response = carousel.handle_action("favorite", ALICE).await;

    let Some(ActionResponse::UpdateWithNotice { message, .. }) = response else {
        panic!("Expected an update with notice, got {response:?}");
    };
    assert_eq!(message.embed().description().as_deref(), Some("**No posts found**"));
    assert!(message.rows().is_empty());
}

#[tokio::test]
async fn test_visitor_unfavorite_does_not_reload_owner_view() {
    let (mut carousel, _, favorites) = favorites_carousel(ALICE, ALICE, &[1, 2]).await;
    favorites.add_favorite(BOB, PostId(1)).await.unwrap();

    let response = carousel.handle_action("favorite", BOB).await;

    assert_eq!(response, Some(ActionResponse::Reply(Notice::FavoriteRemoved)));
    assert_eq!(carousel.data().position(), Some((0, 2)));
}

#[tokio::test]
async fn test_viewing_someone_elses_favorites_does_not_reload() {
    let (mut carousel, _, favorites) = favorites_carousel(ALICE, BOB, &[1, 2]).await;
    favorites.add_favorite(ALICE, PostId(1)).await.unwrap();

    let response = carousel.handle_action("favorite", ALICE).await;

    assert_eq!(response, Some(ActionResponse::Reply(Notice::FavoriteRemoved)));
    assert_eq!(carousel.data().position(), Some((0, 2)));
}

#[tokio::test]
async fn test_action_ids_route_back_to_carousel() {
    let (mut carousel, _, _) = search_carousel(vec![post(1), post(2)], 2).await;

    let message = carousel.render().await;

    let next = message.control("▶").and_then(Control::action_id).unwrap();
    assert_eq!(next, format!("act/next/{}", carousel.id()));
    assert!(matches!(carousel.kind(), CarouselKind::Search { .. }));
}
