use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use stevedore_engine::{prepare_documents, PrepareError, PrepareSettings};

#[tokio::test]
async fn prepare_encodes_file_contents() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("a.txt");
    std::fs::write(&path, b"hello import").expect("write fixture");

    let docs = prepare_documents(&[path], &PrepareSettings::default())
        .await
        .expect("prepare ok");

    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].filename, "a.txt");
    assert_eq!(docs[0].extension, "txt");
    assert_eq!(docs[0].content, STANDARD.encode(b"hello import"));
}

#[tokio::test]
async fn prepare_keeps_input_order() {
    let dir = tempfile::tempdir().expect("tempdir");
    let first = dir.path().join("z_notes.md");
    let second = dir.path().join("a_report.pdf");
    std::fs::write(&first, b"notes").expect("write fixture");
    std::fs::write(&second, b"report").expect("write fixture");

    let docs = prepare_documents(&[first, second], &PrepareSettings::default())
        .await
        .expect("prepare ok");

    let names: Vec<_> = docs.iter().map(|doc| doc.filename.as_str()).collect();
    assert_eq!(names, vec!["z_notes.md", "a_report.pdf"]);
}

#[tokio::test]
async fn prepare_fails_on_missing_file() {
    let err = prepare_documents(
        &[PathBuf::from("/definitely/not/here.txt")],
        &PrepareSettings::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PrepareError::Read { .. }));
}

#[tokio::test]
async fn prepare_rejects_oversized_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("big.bin");
    std::fs::write(&path, b"0123456789").expect("write fixture");

    let settings = PrepareSettings { max_bytes: 4 };
    let err = prepare_documents(&[path], &settings).await.unwrap_err();

    assert!(matches!(err, PrepareError::TooLarge { max_bytes: 4, .. }));
}
