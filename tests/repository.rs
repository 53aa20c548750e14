//! End-to-end discovery through configured repositories

use std::fs;

use mockito::Server;
use tempfile::TempDir;

use version_discovery::config::{HttpConfig, RepositoryConfig};
use version_discovery::discovery::{
    ArtifactDescriptor, DiscoveryError, ModuleCoordinate, RepositoryLayout,
};
use version_discovery::repository::Repository;

fn write(dir: &TempDir, relative: &str, content: &str) {
    let path = dir.path().join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn widget() -> ModuleCoordinate {
    ModuleCoordinate::new("com.acme", "widget")
}

fn widget_jar() -> ArtifactDescriptor {
    ArtifactDescriptor::new("widget", "jar")
}

#[tokio::test]
async fn file_maven_repository_reads_metadata() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "com/acme/widget/maven-metadata.xml",
        r#"<metadata>
  <groupId>com.acme</groupId>
  <artifactId>widget</artifactId>
  <versioning>
    <versions><version>1.0</version><version>1.1</version><version>2.0</version></versions>
  </versioning>
</metadata>"#,
    );
    // not consulted while the metadata lists versions
    write(&dir, "com/acme/widget/3.0/widget-3.0.jar", "");

    let config = RepositoryConfig {
        name: "local-m2".to_string(),
        url: dir.path().display().to_string(),
        layout: RepositoryLayout::Maven,
        artifact_patterns: vec![],
    };
    let repository = Repository::from_config(&config, &HttpConfig::default()).unwrap();

    let result = repository
        .list_versions(&widget(), Some(&widget_jar()))
        .await
        .unwrap();

    assert_eq!(result.as_slice(), ["1.0", "1.1", "2.0"]);
}

#[tokio::test]
async fn file_maven_repository_defaults_artifact_to_module_jar() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "com/acme/widget/maven-metadata.xml",
        r#"<metadata>
  <groupId>com.acme</groupId>
  <artifactId>widget</artifactId>
  <versioning><versions><version>1.0</version><version>1.1</version></versions></versioning>
</metadata>"#,
    );
    write(&dir, "com/acme/gadget/2.0/gadget-2.0.jar", "");

    let config = RepositoryConfig {
        name: "local-m2".to_string(),
        url: dir.path().display().to_string(),
        layout: RepositoryLayout::Maven,
        artifact_patterns: vec![],
    };
    let repository = Repository::from_config(&config, &HttpConfig::default()).unwrap();

    let widget_versions = repository.list_versions(&widget(), None).await.unwrap();
    let gadget_versions = repository
        .list_versions(&ModuleCoordinate::new("com.acme", "gadget"), None)
        .await
        .unwrap();

    assert_eq!(widget_versions.as_slice(), ["1.0", "1.1"]);
    assert_eq!(gadget_versions.as_slice(), ["2.0"]);
}

#[tokio::test]
async fn file_maven_repository_reports_corrupt_metadata_over_listing() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        "com/acme/widget/maven-metadata.xml",
        "<metadata><groupId>com.acme</groupId><versioning>",
    );
    write(&dir, "com/acme/widget/1.0/widget-1.0.jar", "");

    let config = RepositoryConfig {
        name: "local-m2".to_string(),
        url: dir.path().display().to_string(),
        layout: RepositoryLayout::Maven,
        artifact_patterns: vec![],
    };
    let repository = Repository::from_config(&config, &HttpConfig::default()).unwrap();

    let result = repository
        .list_versions(&widget(), Some(&widget_jar()))
        .await;

    assert!(matches!(result, Err(DiscoveryError::Parse { .. })));
}

#[tokio::test]
async fn file_maven_repository_falls_back_to_listing_without_metadata() {
    let dir = TempDir::new().unwrap();
    write(&dir, "com/acme/widget/1.0/widget-1.0.jar", "");
    write(&dir, "com/acme/widget/1.0/widget-1.0.pom", "");
    write(&dir, "com/acme/widget/1.1/widget-1.1.jar", "");
    write(&dir, "com/acme/widget/1.2/widget-1.2.pom", "");

    let config = RepositoryConfig {
        name: "local-m2".to_string(),
        url: dir.path().display().to_string(),
        layout: RepositoryLayout::Maven,
        artifact_patterns: vec![
            "[organisation]/[module]/[revision]/[artifact]-[revision](-[classifier]).[ext]"
                .to_string(),
        ],
    };
    let repository = Repository::from_config(&config, &HttpConfig::default()).unwrap();

    let result = repository
        .list_versions(&widget(), Some(&widget_jar()))
        .await
        .unwrap();

    assert_eq!(result.as_slice(), ["1.0", "1.1"]);
}

#[tokio::test]
async fn file_pattern_repository_lists_ivy_layout() {
    let dir = TempDir::new().unwrap();
    write(&dir, "com.acme/widget/1.0/ivy-1.0.xml", "");
    write(&dir, "com.acme/widget/1.0/widget-1.0.jar", "");
    write(&dir, "com.acme/widget/2.0-rc1/ivy-2.0-rc1.xml", "");
    write(&dir, "com.acme/widget/notes/readme.txt", "");

    let config = RepositoryConfig {
        name: "local-ivy".to_string(),
        url: format!("file://{}", dir.path().display()),
        layout: RepositoryLayout::Pattern,
        artifact_patterns: vec!["[organisation]/[module]/[revision]/ivy-[revision].xml".to_string()],
    };
    let repository = Repository::from_config(&config, &HttpConfig::default()).unwrap();

    let result = repository.list_versions(&widget(), None).await.unwrap();

    assert_eq!(result.as_slice(), ["1.0", "2.0-rc1"]);
}

#[tokio::test]
async fn http_maven_repository_reads_metadata() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/maven2/com/acme/widget/maven-metadata.xml")
        .with_status(200)
        .with_header("content-type", "application/xml")
        .with_body(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>com.acme</groupId>
  <artifactId>widget</artifactId>
  <versioning>
    <latest>2.0</latest>
    <versions><version>1.0</version><version>1.1</version><version>2.0</version></versions>
  </versioning>
</metadata>"#,
        )
        .create_async()
        .await;
    let listing = server
        .mock("GET", "/maven2/com/acme/widget/")
        .with_status(200)
        .with_body(r#"<a href="9.9/">9.9/</a>"#)
        .expect(0)
        .create_async()
        .await;

    let config = RepositoryConfig {
        name: "remote".to_string(),
        url: format!("{}/maven2", server.url()),
        layout: RepositoryLayout::Maven,
        artifact_patterns: vec![],
    };
    let repository = Repository::from_config(&config, &HttpConfig::default()).unwrap();

    let result = repository
        .list_versions(&widget(), Some(&widget_jar()))
        .await
        .unwrap();

    mock.assert_async().await;
    listing.assert_async().await;
    assert_eq!(result.as_slice(), ["1.0", "1.1", "2.0"]);
}

#[tokio::test]
async fn http_maven_repository_reports_corrupt_metadata() {
    let mut server = Server::new_async().await;

    let _metadata = server
        .mock("GET", "/maven2/com/acme/widget/maven-metadata.xml")
        .with_status(200)
        .with_body("<metadata><groupId>com.acme</groupId><versioning>")
        .create_async()
        .await;
    let listing = server
        .mock("GET", "/maven2/com/acme/widget/")
        .with_status(200)
        .with_body(r#"<a href="1.0/">1.0/</a>"#)
        .expect(0)
        .create_async()
        .await;

    let config = RepositoryConfig {
        name: "remote".to_string(),
        url: format!("{}/maven2/", server.url()),
        layout: RepositoryLayout::Maven,
        artifact_patterns: vec![],
    };
    let repository = Repository::from_config(&config, &HttpConfig::default()).unwrap();

    let result = repository
        .list_versions(&widget(), Some(&widget_jar()))
        .await;

    listing.assert_async().await;
    assert!(matches!(result, Err(DiscoveryError::Parse { .. })));
}
