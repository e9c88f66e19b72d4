//! Test utilities for storyboard tests.
//!
//! Provides a scripted text generator and document builders.

use async_trait::async_trait;
use reelmaker_core::TextRequest;
use reelmaker_error::{ModelError, ReelResult};
use reelmaker_interface::TextGenerator;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Text generator that replays scripted responses in order.
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<ReelResult<String>>>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    /// Generator that always answers with the given text.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::scripted(vec![Ok(text.into())])
    }

    /// Generator whose single call fails.
    pub fn failing(message: &str) -> Self {
        Self::scripted(vec![Err(ModelError::new(message).into())])
    }

    /// Generator that replays the given responses.
    pub fn scripted(responses: Vec<ReelResult<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Number of generation calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt lock").clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate_text(&self, request: &TextRequest) -> ReelResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .expect("prompt lock")
            .push(request.prompt().clone());
        self.responses
            .lock()
            .expect("response lock")
            .pop_front()
            .unwrap_or_else(|| Err(ModelError::new("script exhausted").into()))
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

/// Scene entries in document form, numbered from 1.
pub fn scene_entries(count: usize) -> Vec<serde_json::Value> {
    (1..=count)
        .map(|n| {
            if n == 1 {
                json!({
                    "scene_number": n,
                    "setting": "A small attic room with rain streaking the window",
                    "description": format!("The person does thing {}.", n),
                })
            } else {
                json!({
                    "scene_number": n,
                    "description": format!("The person does thing {}.", n),
                })
            }
        })
        .collect()
}

/// A complete storyboard document with the given number of scenes.
///
/// Keys are written in the order the storyboard prompt asks for, so cutting
/// the text short behaves like a real truncated response.
pub fn storyboard_document(scene_count: usize) -> String {
    let scenes = (1..=scene_count)
        .map(scene_text)
        .collect::<Vec<_>>()
        .join(",\n");
    format!(
        "{{\n  \"characters\": [\n    {{\"name\": \"Mira\", \"description\": \"A woman in her thirties with short dark hair and a green sweater\"}}\n  ],\n  \"sound_effect\": \"rain\",\n  \"scenes\": [\n{}\n  ]\n}}",
        scenes
    )
}

fn scene_text(n: usize) -> String {
    if n == 1 {
        format!(
            "    {{\"scene_number\": {n}, \"setting\": \"A small attic room with rain streaking the window\", \"description\": \"The person does thing {n}.\"}}"
        )
    } else {
        format!("    {{\"scene_number\": {n}, \"description\": \"The person does thing {n}.\"}}")
    }
}
