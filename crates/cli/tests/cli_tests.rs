use std::collections::HashMap;

use similar_asserts::assert_eq;

use query_engine_translation::translation::query::select_by_id;
use sqltx_cli::{render_query, run, Command, Context};
use sqltx_configuration::environment::Variable;
use sqltx_configuration::{CONFIGURATION_FILENAME, CONFIGURATION_JSONSCHEMA_FILENAME};

fn context(dir: &tempfile::TempDir) -> Context<HashMap<Variable, String>> {
    Context {
        context_path: dir.path().to_path_buf(),
        environment: HashMap::new(),
        connection_uri: None,
    }
}

async fn run_to_string(command: Command, context: Context<HashMap<Variable, String>>) -> String {
    let mut output = Vec::new();
    run(command, context, &mut output).await.unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn print_shows_both_demo_queries() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_to_string(
        Command::Print {
            id: None,
            pretty: false,
        },
        context(&dir),
    )
    .await;

    assert_eq!(
        output,
        "SELECT * FROM foo WHERE id = $1\n-- values: [32]\n\
         SELECT * FROM foo WHERE TRUE\n-- values: []\n"
    );
}

#[tokio::test]
async fn print_with_an_id_shows_one_query() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_to_string(
        Command::Print {
            id: Some(-4),
            pretty: false,
        },
        context(&dir),
    )
    .await;

    assert_eq!(output, "SELECT * FROM foo WHERE id = $1\n-- values: [-4]\n");
}

#[test]
fn pretty_rendering_keeps_placeholders_and_values() {
    let rendered = render_query(&select_by_id(Some(32)), true);
    assert!(rendered.contains("$1"), "{rendered}");
    assert!(rendered.ends_with("-- values: [32]"), "{rendered}");
}

#[tokio::test]
async fn initialize_writes_configuration_and_schema() {
    let dir = tempfile::tempdir().unwrap();
    run_to_string(Command::Initialize { force: false }, context(&dir)).await;

    assert!(dir.path().join(CONFIGURATION_FILENAME).exists());
    assert!(dir.path().join(CONFIGURATION_JSONSCHEMA_FILENAME).exists());
    let parsed = sqltx_configuration::parse_configuration(dir.path())
        .await
        .unwrap();
    assert_eq!(parsed, sqltx_configuration::ParsedConfiguration::initial());
}

#[tokio::test]
async fn initialize_refuses_to_overwrite_without_force() {
    let dir = tempfile::tempdir().unwrap();
    run_to_string(Command::Initialize { force: false }, context(&dir)).await;

    let mut output = Vec::new();
    let error = run(
        Command::Initialize { force: false },
        context(&dir),
        &mut output,
    )
    .await
    .unwrap_err();
    assert!(error.to_string().contains("--force"), "{error}");

    run_to_string(Command::Initialize { force: true }, context(&dir)).await;
}

#[tokio::test]
async fn run_reports_a_missing_connection_variable() {
    let dir = tempfile::tempdir().unwrap();
    run_to_string(Command::Initialize { force: false }, context(&dir)).await;

    let mut output = Vec::new();
    let error = run(Command::Run { id: 32 }, context(&dir), &mut output)
        .await
        .unwrap_err();
    assert!(error.to_string().contains("CONNECTION_URI"), "{error:#}");
}
