//! Integration tests for build-time publishing

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use zpage_common::config::SiteConfig;
use zpage_common::{open_provider, BuiltinTemplate, Error, PageRenderer, Template};
use zpage_site::publish::publish_page;

/// Test helper: names of all entries in `dir`, sorted
fn dir_entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

const GENERATED: &str = "source_package_filename = \"inscribist-7.tar.gz\"\nsource_package_date = \"2014-01-01\"\n";

#[tokio::test]
async fn test_generated_record_file_published_verbatim() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("settings.toml"), GENERATED).unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "record_file = \"settings.toml\"\noutput_path = \"www/index.html\"\n",
    )
    .unwrap();

    let config = SiteConfig::load_file(&dir.path().join("config.toml")).unwrap();
    let provider = open_provider(&config.provider_source().unwrap()).await.unwrap();
    let renderer = PageRenderer::new(config.load_template().unwrap());

    let written = publish_page(provider.as_ref(), &renderer, config.project_id, &config.output_path)
        .await
        .unwrap();

    assert_eq!(written, dir.path().join("www/index.html"));
    let html = fs::read_to_string(&written).unwrap();
    assert!(html.contains("inscribist-7.tar.gz"));
    assert!(html.contains("2014-01-01"));
    assert_eq!(dir_entries(&dir.path().join("www")), vec!["index.html"]);
}

#[tokio::test]
async fn test_failed_render_writes_nothing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("settings.toml"), GENERATED).unwrap();

    let config = SiteConfig {
        record_file: Some(dir.path().join("settings.toml")),
        ..SiteConfig::default()
    };
    let provider = open_provider(&config.provider_source().unwrap()).await.unwrap();
    // The generated file has no name, version or win32 binary
    let renderer = PageRenderer::new(Template::builtin(BuiltinTemplate::ProjectPage).unwrap());
    let output = dir.path().join("index.html");

    let result = publish_page(provider.as_ref(), &renderer, 1, &output).await;

    assert!(matches!(result, Err(Error::MissingField(_))));
    assert!(!output.exists());
}

#[tokio::test]
async fn test_publish_overwrites_previous_artifact() {
    let dir = TempDir::new().unwrap();
    let record_path = dir.path().join("settings.toml");
    let output = dir.path().join("index.html");
    let renderer = PageRenderer::new(Template::builtin(BuiltinTemplate::ReleasePage).unwrap());

    fs::write(&record_path, GENERATED).unwrap();
    let config = SiteConfig {
        record_file: Some(record_path.clone()),
        ..SiteConfig::default()
    };
    let provider = open_provider(&config.provider_source().unwrap()).await.unwrap();
    publish_page(provider.as_ref(), &renderer, 1, &output).await.unwrap();

    // Regenerated by the packaging step
    fs::write(
        &record_path,
        "source_package_filename = \"inscribist-8.tar.gz\"\nsource_package_date = \"2014-06-01\"\n",
    )
    .unwrap();
    let provider = open_provider(&config.provider_source().unwrap()).await.unwrap();
    publish_page(provider.as_ref(), &renderer, 1, &output).await.unwrap();

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.contains("inscribist-8.tar.gz"));
    assert!(!html.contains("inscribist-7.tar.gz"));
}

#[tokio::test]
async fn test_unknown_project_writes_nothing() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("settings.toml"),
        format!("project_id = 3\n{}", GENERATED),
    )
    .unwrap();

    let config = SiteConfig {
        record_file: Some(dir.path().join("settings.toml")),
        project_id: 99,
        ..SiteConfig::default()
    };
    let provider = open_provider(&config.provider_source().unwrap()).await.unwrap();
    let renderer = PageRenderer::new(config.load_template().unwrap());
    let output = dir.path().join("www").join("index.html");

    let result = publish_page(provider.as_ref(), &renderer, config.project_id, &output).await;

    assert!(matches!(result, Err(Error::RecordNotFound(99))));
    assert!(!output.exists());
    assert!(!dir.path().join("www/index.html.tmp").exists());
    assert_eq!(dir_entries(dir.path()), vec!["settings.toml"]);
}

#[tokio::test]
async fn test_failed_write_leaves_no_staging_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("settings.toml"), GENERATED).unwrap();
    // A non-empty directory where the page should go makes the final rename fail
    let output = dir.path().join("index.html");
    fs::create_dir(&output).unwrap();
    fs::write(output.join("keep"), "x").unwrap();

    let config = SiteConfig {
        record_file: Some(dir.path().join("settings.toml")),
        ..SiteConfig::default()
    };
    let provider = open_provider(&config.provider_source().unwrap()).await.unwrap();
    let renderer = PageRenderer::new(config.load_template().unwrap());

    let result = publish_page(provider.as_ref(), &renderer, 1, &output).await;

    assert!(matches!(result, Err(Error::Io(_))));
    assert_eq!(dir_entries(dir.path()), vec!["index.html", "settings.toml"]);
    assert_eq!(dir_entries(&output), vec!["keep"]);
}
