//! Parallel rendering of many documents.

use crate::renderer::{Options, render_markdown};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Input for batch processing - represents a single document to render.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchInput {
    /// Document identifier (typically the file path).
    pub id: String,
    /// Markdown source content.
    pub source: String,
}

/// Result for a single document in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// Document identifier matching the input.
    pub id: String,
    /// Rendered HTML (present on success).
    pub html: Option<String>,
    /// Error message (present on failure).
    pub error: Option<String>,
}

/// Options for batch processing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchOptions {
    /// Maximum number of threads to use. Defaults to number of CPU cores.
    pub max_threads: Option<usize>,
    /// Render options applied to every document.
    pub render: Options,
}

/// Renders every input in parallel, preserving input order.
///
/// A failing document yields an error entry; the others still render.
pub fn render_batch(inputs: Vec<BatchInput>, options: &BatchOptions) -> Vec<BatchResult> {
    let render = &options.render;
    let process_input = |input: BatchInput| -> BatchResult {
        match render_markdown(&input.source, render) {
            Ok(html) => BatchResult {
                id: input.id,
                html: Some(html),
                error: None,
            },
            Err(e) => {
                log::warn!("Failed to render {}: {}", input.id, e);
                BatchResult {
                    id: input.id,
                    html: None,
                    error: Some(e.to_string()),
                }
            }
        }
    };

    // Configure thread pool if max_threads is specified
    let pool = options.max_threads.and_then(|max_threads| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(max_threads)
            .build()
            .ok()
    });

    match pool {
        Some(pool) => pool.install(|| inputs.into_par_iter().map(process_input).collect()),
        None => inputs.into_par_iter().map(process_input).collect(),
    }
}
