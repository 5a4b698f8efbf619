// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::sync::Mutex;

use super::*;
use crate::value::OrderedMap;

struct RecordingDownloader {
    calls: Mutex<Vec<(PathBuf, PathBuf, bool)>>,
}

impl RecordingDownloader {
    fn new() -> Self {
        Self { calls: Mutex::new(Vec::new()) }
    }
}

impl ToolDownloader for RecordingDownloader {
    fn download(&self, manifest: &Path, central_index: &Path, force: bool) -> Result<()> {
        self.calls.lock().unwrap().push((manifest.to_path_buf(), central_index.to_path_buf(), force));
        Ok(())
    }
}

fn op(fields: Vec<(&str, Value)>) -> Operation {
    let mut map = OrderedMap::new();
    for (k, v) in fields {
        map.insert(k.to_owned(), v);
    }
    Operation::from_mapping(map)
}

#[test]
fn force_flag_reads_either_answer_spelling() {
    let downloader = RecordingDownloader::new();
    let operation = op(vec![("script", Value::string("download_tools"))]);
    let mut answers = PromptAnswers::new();
    answers.insert("force_download", Value::bool(true));

    run(&operation, Path::new("/repo"), &Value::empty_mapping(), &answers, &downloader).unwrap();

    let calls = downloader.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].2);
}

#[test]
fn manifest_defaults_under_registry_root() {
    let downloader = RecordingDownloader::new();
    let operation = op(vec![("script", Value::string("download_tools"))]);
    let answers = PromptAnswers::new();

    run(&operation, Path::new("/repo"), &Value::empty_mapping(), &answers, &downloader).unwrap();

    let calls = downloader.calls.lock().unwrap();
    assert_eq!(calls[0].0, Path::new("/repo/EngineApps/Registries/Tools/Main.json"));
    assert!(!calls[0].2);
}
