//! Integration tests for tachi-core, with mocked ports.

use std::path::{Path, PathBuf};

use mockall::{mock, predicate::*};
use tachi_core::{
    application::{ApplicationError, SETUP_FILE},
    domain::catalog::{CONTAINER_APP_TEMPLATE, SETUP_TEMPLATE},
    prelude::*,
};

mock! {
    pub Renderer {}
    impl TemplateRenderer for Renderer {
        fn render(&self, template: &str, context: &RenderContext) -> TachiResult<String>;
    }
}

mock! {
    pub Fs {}
    impl Filesystem for Fs {
        fn create_dir_all(&self, path: &Path) -> TachiResult<()>;
        fn write_file(&self, path: &Path, content: &str) -> TachiResult<()>;
        fn list_dir(&self, path: &Path) -> TachiResult<Vec<PathBuf>>;
    }
}

fn demo() -> Project {
    Project::new("demo", Strategy::TrunkDirect, AzureTarget::new("demo-rg", "demoacr"))
        .with_service(Service::new("web").with_port(3000))
}

fn echo_renderer() -> MockRenderer {
    let mut renderer = MockRenderer::new();
    renderer
        .expect_render()
        .returning(|template, _| Ok(format!("rendered {template}")));
    renderer
}

fn untouched_fs() -> MockFs {
    let mut fs = MockFs::new();
    fs.expect_create_dir_all().never();
    fs.expect_write_file().never();
    fs.expect_list_dir().never();
    fs
}

/// Accepts every write; the output root already holds `existing`.
fn permissive_fs(existing: &[&str]) -> MockFs {
    let existing: Vec<PathBuf> = existing.iter().map(PathBuf::from).collect();
    let mut fs = MockFs::new();
    fs.expect_list_dir().returning(move |_| Ok(existing.clone()));
    fs.expect_create_dir_all().returning(|_| Ok(()));
    fs.expect_write_file().returning(|_, _| Ok(()));
    fs
}

// ============================================================================
// plan
// ============================================================================

#[test]
fn demo_scenario_plans_three_workflows_and_one_container_config() {
    let service = GenerateService::new(Box::new(echo_renderer()), Box::new(untouched_fs()));
    let plan = service.plan(&demo(), Path::new("/out")).unwrap();

    let files: Vec<_> = plan.files().map(|f| f.path.clone()).collect();
    assert_eq!(
        files,
        [
            Path::new(".github/workflows/pr-deploy.yaml"),
            Path::new(".github/workflows/pr-cleanup.yaml"),
            Path::new(".github/workflows/prod-deploy-on-merge.yaml"),
            Path::new("container-apps/configs/production/web.yaml"),
            Path::new("SETUP.md"),
        ]
    );
    assert_eq!(plan.directories().count(), 2);
    assert_eq!(
        plan.file("SETUP.md").unwrap().content,
        format!("rendered {SETUP_TEMPLATE}")
    );
}

#[test]
fn staged_release_plans_configs_for_both_environments() {
    let project = {
        let mut p = demo().with_service(Service::new("api"));
        p.strategy_name = Strategy::TrunkReleaseStage.to_string();
        p
    };
    let service = GenerateService::new(Box::new(echo_renderer()), Box::new(untouched_fs()));
    let plan = service.plan(&project, Path::new("/out")).unwrap();

    let configs: Vec<_> = plan
        .files()
        .filter(|f| f.path.starts_with("container-apps"))
        .map(|f| f.path.display().to_string())
        .collect();
    assert_eq!(
        configs,
        [
            "container-apps/configs/staging/web.yaml",
            "container-apps/configs/staging/api.yaml",
            "container-apps/configs/production/web.yaml",
            "container-apps/configs/production/api.yaml",
        ]
    );
    assert!(plan.file(".github/workflows/stage-deploy-on-merge.yaml").is_some());
    assert!(plan.file(".github/workflows/prod-deploy-on-tag.yaml").is_some());
}

#[test]
fn container_template_receives_app_name() {
    let mut renderer = MockRenderer::new();
    renderer
        .expect_render()
        .withf(|template, ctx| {
            template == CONTAINER_APP_TEMPLATE
                && ctx.get("app_name").and_then(|v| v.as_str()) == Some("demo-web")
        })
        .times(1)
        .returning(|_, _| Ok("app".into()));
    renderer.expect_render().returning(|_, _| Ok(String::new()));

    let service = GenerateService::new(Box::new(renderer), Box::new(untouched_fs()));
    service.plan(&demo(), Path::new("/out")).unwrap();
}

#[test]
fn invalid_strategy_never_reaches_renderer() {
    let mut renderer = MockRenderer::new();
    renderer.expect_render().never();

    let mut project = demo();
    project.strategy_name = "bogus".into();

    let service = GenerateService::new(Box::new(renderer), Box::new(untouched_fs()));
    let err = service
        .generate(&project, Path::new("/out"), GenerateOptions::default())
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Validation);
    assert_eq!(err.validation_errors().len(), 1);
    let message = err.validation_errors()[0].to_string();
    assert!(message.contains("bogus"));
    assert!(message.contains("trunk-release-stage"));
}

#[test]
fn rendering_failure_propagates() {
    let mut renderer = MockRenderer::new();
    renderer
        .expect_render()
        .with(eq(SETUP_TEMPLATE), always())
        .returning(|template, _| {
            Err(ApplicationError::RenderingFailed {
                template: template.into(),
                reason: "boom".into(),
            }
            .into())
        });
    renderer.expect_render().returning(|_, _| Ok(String::new()));

    let service = GenerateService::new(Box::new(renderer), Box::new(untouched_fs()));
    let err = service.plan(&demo(), Path::new("/out")).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Generation);
    assert!(err.to_string().contains("SETUP.md.j2"));
}

// ============================================================================
// generate
// ============================================================================

#[test]
fn dry_run_skips_guard_and_writes_nothing() {
    let service = GenerateService::new(Box::new(echo_renderer()), Box::new(untouched_fs()));
    let report = service
        .generate(
            &demo(),
            Path::new("/out"),
            GenerateOptions {
                dry_run: true,
                ..GenerateOptions::default()
            },
        )
        .unwrap();

    assert!(!report.written);
    assert_eq!(report.files().len(), 5);
}

#[test]
fn non_empty_output_is_a_conflict_before_any_write() {
    let mut fs = MockFs::new();
    fs.expect_list_dir()
        .with(eq(Path::new("/out")))
        .returning(|_| Ok(vec![PathBuf::from("README.md")]));
    fs.expect_create_dir_all().never();
    fs.expect_write_file().never();

    let service = GenerateService::new(Box::new(echo_renderer()), Box::new(fs));
    let err = service
        .generate(&demo(), Path::new("/out"), GenerateOptions::default())
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Conflict);
    assert!(matches!(
        err,
        TachiError::Application(ApplicationError::OutputConflict { .. })
    ));
}

#[test]
fn force_writes_every_planned_file() {
    let mut fs = MockFs::new();
    fs.expect_list_dir().never();
    fs.expect_create_dir_all().returning(|_| Ok(()));
    fs.expect_write_file().times(5).returning(|_, _| Ok(()));

    let service = GenerateService::new(Box::new(echo_renderer()), Box::new(fs));
    let report = service
        .generate(
            &demo(),
            Path::new("/out"),
            GenerateOptions {
                force: true,
                ..GenerateOptions::default()
            },
        )
        .unwrap();

    assert!(report.written);
    assert_eq!(report.setup_path(), Path::new("/out").join(SETUP_FILE));
}

#[test]
fn empty_output_is_written_without_force() {
    let service = GenerateService::new(Box::new(echo_renderer()), Box::new(permissive_fs(&[])));
    let report = service
        .generate(&demo(), Path::new("/out"), GenerateOptions::default())
        .unwrap();
    assert!(report.written);
}

#[test]
fn ignored_entries_do_not_count_as_existing_content() {
    let service = GenerateService::new(
        Box::new(echo_renderer()),
        Box::new(permissive_fs(&["tachi.yaml"])),
    );
    let options = GenerateOptions {
        ignored_entries: vec![PathBuf::from("tachi.yaml")],
        ..GenerateOptions::default()
    };

    let report = service.generate(&demo(), Path::new("/out"), options).unwrap();
    assert!(report.written);
}

#[test]
fn other_entries_still_conflict_when_some_are_ignored() {
    let service = GenerateService::new(
        Box::new(echo_renderer()),
        Box::new(permissive_fs(&["README.md", "tachi.yaml"])),
    );
    let options = GenerateOptions {
        ignored_entries: vec![PathBuf::from("tachi.yaml")],
        ..GenerateOptions::default()
    };

    let err = service.generate(&demo(), Path::new("/out"), options).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Conflict);
}

#[test]
fn write_failure_names_the_path_and_stops() {
    let mut fs = MockFs::new();
    fs.expect_list_dir().returning(|_| Ok(Vec::new()));
    fs.expect_create_dir_all().returning(|_| Ok(()));
    fs.expect_write_file()
        .times(1)
        .returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });

    let service = GenerateService::new(Box::new(echo_renderer()), Box::new(fs));
    let err = service
        .generate(&demo(), Path::new("/out"), GenerateOptions::default())
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Generation);
    assert!(err.to_string().contains("/out/.github/workflows/pr-deploy.yaml"));
}
