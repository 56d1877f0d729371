mod common;

use std::path::PathBuf;
use std::sync::Arc;

use common::{numbered_csv, LANGUAGES};
use es_csv_writer::config::WriterConfig;
use es_csv_writer::domain::models::{CollectionInfo, ItemError};
use es_csv_writer::infrastructure::memory::InMemoryIndex;
use es_csv_writer::writer_app::WriterApp;
use es_csv_writer::WriterError;

struct Workspace {
    dir: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("es_csv_writer_app_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(dir.join("data")).unwrap();
        Self { dir }
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

fn app(workspace: &Workspace, config: &str, index: Arc<InMemoryIndex>) -> WriterApp {
    let path = workspace.write("config.yml", config);
    let config = WriterConfig::load(&path).unwrap();
    WriterApp::with_client(config, index)
}

#[tokio::test]
async fn writes_every_configured_table() {
    let workspace = Workspace::new();
    workspace.write("data/language.csv", LANGUAGES);
    workspace.write("data/rows.csv", &numbered_csv(7));
    let index = Arc::new(InMemoryIndex::new());
    let app = app(
        &workspace,
        r#"
elastic:
  host: localhost:9200
tables:
  - file: data/language.csv
    index: langs
    type: language
    id: id
  - file: data/rows.csv
    index: rows
    type: row
    bulk_size: 3
"#,
        index.clone(),
    );

    let output = app.run().await.unwrap();

    assert_eq!(output, None);
    assert_eq!(index.document_count("langs", "language").unwrap(), 10);
    assert_eq!(index.document_count("rows", "row").unwrap(), 7);
    assert_eq!(index.bulk_calls().unwrap(), 1 + 3);
}

#[tokio::test]
async fn reports_failed_tables_after_writing_the_rest() {
    let workspace = Workspace::new();
    workspace.write("data/language.csv", LANGUAGES);
    let index = Arc::new(InMemoryIndex::new());
    index.reject_type("broken", ItemError::Raw("unsupported".into())).unwrap();
    let app = app(
        &workspace,
        r#"
elastic: {host: localhost:9200}
tables:
  - {file: data/language.csv, index: langs, type: broken, id: id}
  - {file: data/language.csv, index: langs, type: language, id: id}
"#,
        index.clone(),
    );

    let err = app.run().await.unwrap_err();

    match err {
        WriterError::LoadFailed(files) => assert!(files.ends_with("language.csv"), "{files}"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(index.document_count("langs", "language").unwrap(), 10);
}

#[tokio::test]
async fn missing_csv_file_is_an_io_error() {
    let workspace = Workspace::new();
    let app = app(
        &workspace,
        "elastic: {host: h}\ntables: [{file: data/nope.csv, index: i, type: t}]\n",
        Arc::new(InMemoryIndex::new()),
    );

    assert!(matches!(app.run().await, Err(WriterError::Io(_))));
}

#[tokio::test]
async fn lists_indices_and_mappings_as_json() {
    let workspace = Workspace::new();
    workspace.write("data/language.csv", LANGUAGES);
    let index = Arc::new(InMemoryIndex::new());
    app(
        &workspace,
        "elastic: {host: h}\ntables: [{file: data/language.csv, index: langs, type: language}]\n",
        index.clone(),
    )
    .run()
    .await
    .unwrap();

    let indices = app(&workspace, "elastic: {host: h}\naction: list_indices\n", index.clone())
        .run()
        .await
        .unwrap()
        .unwrap();
    let mappings = app(
        &workspace,
        "elastic: {host: h}\naction: list_mappings\nindex: langs\n",
        index.clone(),
    )
    .run()
    .await
    .unwrap()
    .unwrap();

    let indices: Vec<CollectionInfo> = serde_json::from_str(&indices).unwrap();
    let mappings: Vec<CollectionInfo> = serde_json::from_str(&mappings).unwrap();
    assert_eq!(indices, vec![CollectionInfo { id: "langs".into() }]);
    assert_eq!(mappings, vec![CollectionInfo { id: "language".into() }]);
}
