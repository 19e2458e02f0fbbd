use gh_worklist::engine::{Engine, SAMPLE_VIEWER, SampleEngine};
use gh_worklist::types::{Filters, KindFilter, StatusFilter, WorkItem};
use gh_worklist::{Credential, Worklist};

fn load_fixture_items() -> Vec<WorkItem> {
    let json = include_str!("fixtures/sample_items.json");
    serde_json::from_str(json).expect("valid sample_items.json fixture")
}

#[tokio::test]
async fn sample_engine_serves_fixture_dataset() {
    let expected = load_fixture_items();
    assert_eq!(expected.len(), 4, "fixture should have four items");

    let page = SampleEngine::new()
        .fetch_issues(&Filters::default())
        .await
        .unwrap();

    assert_eq!(page.items, expected);
    assert!(!page.cursor.has_next());
    assert!(!page.cursor.has_prev());
}

#[tokio::test]
async fn closed_status_leaves_one_item() {
    let filters = Filters {
        status: StatusFilter::Closed,
        ..Filters::default()
    };
    let page = SampleEngine::new().fetch_issues(&filters).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].full_name(), "octocat/dotfiles");
}

#[tokio::test]
async fn demo_credential_goes_through_the_sample_engine() {
    let worklist = Worklist::new(&Default::default());
    let filters = Filters {
        kind: KindFilter::PullRequest,
        ..Filters::default()
    };
    let page = worklist
        .fetch_issues(&Credential::Demo, &filters)
        .await
        .unwrap();

    assert_eq!(page.items.len(), 2);
    assert!(page.items.iter().all(WorkItem::is_pull_request));
}

#[tokio::test]
async fn demo_mode_is_repeatable() {
    let worklist = Worklist::new(&Default::default());
    let first = worklist
        .fetch_issues(&Credential::Demo, &Filters::default())
        .await
        .unwrap();
    let second = worklist
        .fetch_issues(&Credential::Demo, &Filters::default())
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn custom_dataset_uses_its_own_viewer() {
    let items = load_fixture_items();
    let engine = SampleEngine::with_items("hubot", items, vec!["dotfiles".to_owned()]);
    assert_ne!(engine.viewer(), SAMPLE_VIEWER);

    let filters = Filters {
        role: gh_worklist::types::RoleFilter::Created,
        ..Filters::default()
    };
    let page = engine.fetch_issues(&filters).await.unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].author.login, "hubot");

    assert_eq!(engine.fetch_repositories().await.unwrap(), ["dotfiles"]);
}
