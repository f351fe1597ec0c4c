// tests/todo_pipeline.rs
//! The to-do pipeline over a scripted backend: canned page batches and
//! canned HTML, no network.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use onenote2todo::api::{ListResponse, OneNoteRepository};
use onenote2todo::error::{AppError, GraphErrorCode};
use onenote2todo::model::{Notebook, Page, Section};
use onenote2todo::todo::TodoFinder;
use pretty_assertions::assert_eq;

struct FakeOneNote {
    batches: Mutex<VecDeque<ListResponse<Page>>>,
    content: HashMap<String, String>,
    seen_queries: Mutex<Vec<Vec<(String, String)>>>,
}

impl FakeOneNote {
    fn new(batches: Vec<ListResponse<Page>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
            content: HashMap::new(),
            seen_queries: Mutex::new(Vec::new()),
        }
    }

    fn with_content(mut self, id: &str, html: impl Into<String>) -> Self {
        self.content.insert(id.to_string(), html.into());
        self
    }

    fn queries(&self) -> Vec<Vec<(String, String)>> {
        self.seen_queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl OneNoteRepository for FakeOneNote {
    async fn list_notebooks(
        &self,
        _query: &[(String, String)],
    ) -> Result<ListResponse<Notebook>, AppError> {
        unimplemented!("the pipeline never lists notebooks")
    }

    async fn list_sections(
        &self,
        _query: &[(String, String)],
    ) -> Result<ListResponse<Section>, AppError> {
        unimplemented!("the pipeline never lists sections")
    }

    async fn list_pages(
        &self,
        query: &[(String, String)],
    ) -> Result<ListResponse<Page>, AppError> {
        self.seen_queries.lock().unwrap().push(query.to_vec());
        Ok(self
            .batches
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }

    async fn get_page(&self, _id: &str, _query: &[(String, String)]) -> Result<Page, AppError> {
        unimplemented!("the pipeline never fetches single page records")
    }

    async fn get_page_content(&self, id: &str) -> Result<String, AppError> {
        match self.content.get(id) {
            Some(html) => Ok(html.clone()),
            None => Err(AppError::GraphService {
                code: GraphErrorCode::ItemNotFound,
                message: format!("The specified resource {} does not exist.", id),
                status: reqwest::StatusCode::NOT_FOUND,
            }),
        }
    }
}

fn page(id: &str, title: &str, notebook: Option<&str>, section: Option<&str>) -> Page {
    Page {
        id: id.to_string(),
        title: title.to_string(),
        parent_notebook: notebook.map(|name| Notebook {
            display_name: name.to_string(),
            ..Notebook::default()
        }),
        parent_section: section.map(|name| Section {
            display_name: name.to_string(),
            ..Section::default()
        }),
        ..Page::default()
    }
}

fn batch(pages: Vec<Page>, count: Option<i64>, next: Option<&str>) -> ListResponse<Page> {
    ListResponse {
        count,
        next_link: next.map(str::to_string),
        value: pages,
        ..ListResponse::default()
    }
}

fn todo_html(fragments: &[&str]) -> String {
    let items: String = fragments
        .iter()
        .map(|text| format!(r#"<p data-tag="to-do" style="margin-top:0pt">{}</p>"#, text))
        .collect();
    format!(
        "<html><head><title>x</title></head><body><div style=\"position:absolute\">{}</div></body></html>",
        items
    )
}

const PLAIN_HTML: &str = "<html><body><p>Nothing tagged here.</p></body></html>";

#[tokio::test]
async fn finds_fragments_across_batches_in_api_order() {
    let fake = FakeOneNote::new(vec![
        batch(
            vec![
                page("p1", "Week 1", Some("Personal"), Some("Errands")),
                page("p2", "Week 2", Some("Personal"), Some("Errands")),
            ],
            Some(3),
            Some("https://graph.microsoft.com/v1.0/me/onenote/pages?$count=true&$skip=2"),
        ),
        batch(
            vec![page("p3", "Week 3", Some("Work"), Some("Projects"))],
            None,
            None,
        ),
    ])
    .with_content("p1", todo_html(&["Buy milk", "Call plumber"]))
    .with_content("p2", PLAIN_HTML)
    .with_content("p3", todo_html(&["Send invoice"]));

    let report = TodoFinder::new(&fake).find(None).await.unwrap();

    assert_eq!(report.pages_scanned, 3);
    assert_eq!(report.total_pages, Some(3));
    assert_eq!(report.fragment_count(), 3);
    assert_eq!(report.pages.len(), 2);
    assert_eq!(report.pages[0].location(), "Personal/Errands/Week 1");
    assert_eq!(report.pages[0].fragments, vec!["Buy milk", "Call plumber"]);
    assert_eq!(report.pages[1].location(), "Work/Projects/Week 3");

    let queries = fake.queries();
    assert_eq!(queries.len(), 2);
    assert_eq!(
        queries[0],
        vec![
            ("$count".to_string(), "true".to_string()),
            (
                "$expand".to_string(),
                "parentNotebook,parentSection".to_string()
            ),
            ("$orderby".to_string(), "title".to_string()),
        ]
    );
    // The second request replays the continuation link's parameters.
    assert!(queries[1].contains(&("$skip".to_string(), "2".to_string())));
    assert!(queries[1].contains(&("$count".to_string(), "true".to_string())));
}

#[tokio::test]
async fn notebook_filter_reaches_the_query() {
    let fake = FakeOneNote::new(vec![batch(Vec::new(), Some(0), None)]);

    let report = TodoFinder::new(&fake).find(Some("Bob's Notes")).await.unwrap();
    assert_eq!(report.pages_scanned, 0);

    let queries = fake.queries();
    assert!(queries[0].contains(&(
        "$filter".to_string(),
        "parentNotebook/displayName eq 'Bob''s Notes'".to_string()
    )));
}

#[tokio::test]
async fn missing_parents_fall_back_to_unknown() {
    let fake = FakeOneNote::new(vec![batch(
        vec![page("p1", "Loose note", None, None)],
        None,
        None,
    )])
    .with_content("p1", todo_html(&["Water the plants"]));

    let report = TodoFinder::new(&fake).find(None).await.unwrap();
    assert_eq!(report.pages[0].location(), "(unknown)/(unknown)/Loose note");
}

#[tokio::test]
async fn untagged_pages_are_scanned_but_produce_nothing() {
    let fake = FakeOneNote::new(vec![batch(
        vec![
            page("p1", "Tagged", Some("Personal"), Some("Errands")),
            page("p2", "Plain", Some("Personal"), Some("Errands")),
        ],
        Some(2),
        None,
    )])
    .with_content("p1", todo_html(&["Buy milk"]))
    .with_content("p2", PLAIN_HTML);

    let report = TodoFinder::new(&fake).find(None).await.unwrap();
    assert_eq!(report.pages_scanned, 2);
    assert_eq!(report.pages.len(), 1);
    assert_eq!(report.pages[0].title, "Tagged");
}

#[tokio::test]
async fn content_error_aborts_the_run() {
    // "p-gone" has no canned content, so its fetch fails.
    let fake = FakeOneNote::new(vec![batch(
        vec![
            page("p1", "Fine", Some("Personal"), Some("Errands")),
            page("p-gone", "Deleted meanwhile", Some("Personal"), Some("Errands")),
        ],
        None,
        None,
    )])
    .with_content("p1", todo_html(&["Buy milk"]));

    let result = TodoFinder::new(&fake).find(None).await;
    match result {
        Err(AppError::GraphService { code, .. }) => assert!(code.is_not_found()),
        other => panic!("expected a GraphService error, got {:?}", other),
    }
}

#[tokio::test]
async fn custom_tag_scans_for_it() {
    let html = r#"<html><body>
        <p data-tag="important">Renew passport</p>
        <p data-tag="to-do">Not this one</p>
    </body></html>"#;
    let fake = FakeOneNote::new(vec![batch(
        vec![page("p1", "Mixed tags", Some("Personal"), Some("Errands"))],
        None,
        None,
    )])
    .with_content("p1", html);

    let report = TodoFinder::new(&fake)
        .with_tag("important")
        .find(None)
        .await
        .unwrap();

    assert_eq!(report.fragment_count(), 1);
    assert_eq!(report.pages[0].fragments, vec!["Renew passport"]);
}
