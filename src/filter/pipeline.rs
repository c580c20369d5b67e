//! The filter stages and the suffix-stripping transform.

use crate::models::ModelRecord;

use super::params::FilterParams;

/// Run every active stage over `models` and return the survivors.
///
/// Stages run in a fixed order: ignore-free, provider, model name, minimum
/// context, modality, then the suffix strip. The input is only read; the
/// output is made of fresh clones, so a shared cached list is never touched.
/// Survivors keep their input order.
pub fn apply(models: &[ModelRecord], params: &FilterParams) -> Vec<ModelRecord> {
    models
        .iter()
        .filter(|model| keep(model, params))
        .map(|model| transform(model, params))
        .collect()
}

/// Check a single record against every active filter stage
pub fn keep(model: &ModelRecord, params: &FilterParams) -> bool {
    passes_ignore_free(model, params)
        && passes_provider(model, params)
        && passes_model_name(model, params)
        && passes_min_context(model, params)
        && passes_modality(model, params)
}

fn passes_ignore_free(model: &ModelRecord, params: &FilterParams) -> bool {
    !params.ignore_free || !model.model_id().is_free()
}

fn passes_provider(model: &ModelRecord, params: &FilterParams) -> bool {
    match &params.providers {
        Some(allowed) => model
            .model_id()
            .provider()
            .is_some_and(|provider| allowed.contains(provider)),
        None => true,
    }
}

fn passes_model_name(model: &ModelRecord, params: &FilterParams) -> bool {
    match &params.models {
        Some(allowed) => model
            .model_id()
            .name()
            .is_some_and(|name| allowed.contains(name)),
        None => true,
    }
}

// Records with no context length fail closed.
fn passes_min_context(model: &ModelRecord, params: &FilterParams) -> bool {
    match params.min_context {
        Some(min) => model.context_length().is_some_and(|len| len >= min),
        None => true,
    }
}

// Records with no modality fail closed.
fn passes_modality(model: &ModelRecord, params: &FilterParams) -> bool {
    match &params.modality {
        Some(wanted) => model
            .modality()
            .is_some_and(|modality| modality.contains(wanted.as_str())),
        None => true,
    }
}

fn transform(model: &ModelRecord, params: &FilterParams) -> ModelRecord {
    let mut out = model.clone();
    if params.strip_suffix {
        let stripped = model.model_id().without_suffix();
        if stripped.len() != model.id.len() {
            out.id = stripped.to_string();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalogue() -> Vec<ModelRecord> {
        vec![
            ModelRecord::new("openai/gpt-4")
                .with_context_length(8000)
                .with_modality("text->text"),
            ModelRecord::new("openai/gpt-4:free")
                .with_context_length(8000)
                .with_modality("text->text"),
            ModelRecord::new("anthropic/claude-3")
                .with_context_length(200000)
                .with_modality("text+image->text"),
            ModelRecord::new("google/gemini-pro:free-beta")
                .with_context_length(32000)
                .with_modality("text+image->text"),
            ModelRecord::new("openrouter-auto").with_context_length(100000),
        ]
    }

    fn ids(models: &[ModelRecord]) -> Vec<&str> {
        models.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_noop_returns_everything() {
        let input = catalogue();
        let output = apply(&input, &FilterParams::new());
        assert_eq!(output, input);
    }

    #[test]
    fn test_ignore_free() {
        let output = apply(&catalogue(), &FilterParams::new().with_ignore_free());
        assert_eq!(
            ids(&output),
            vec!["openai/gpt-4", "anthropic/claude-3", "openrouter-auto"]
        );
    }

    #[test]
    fn test_provider_filter() {
        let params = FilterParams::new().with_providers(["openai", "google"]);
        let output = apply(&catalogue(), &params);
        assert_eq!(
            ids(&output),
            vec!["openai/gpt-4", "openai/gpt-4:free", "google/gemini-pro:free-beta"]
        );
    }

    #[test]
    fn test_provider_filter_drops_ids_without_slash() {
        let params = FilterParams::new().with_providers(["openrouter-auto"]);
        assert!(apply(&catalogue(), &params).is_empty());
    }

    #[test]
    fn test_model_filter_ignores_variant() {
        let params = FilterParams::new().with_models(["gpt-4", "gemini-pro"]);
        let output = apply(&catalogue(), &params);
        assert_eq!(
            ids(&output),
            vec!["openai/gpt-4", "openai/gpt-4:free", "google/gemini-pro:free-beta"]
        );
    }

    #[test]
    fn test_min_context() {
        let params = FilterParams::new().with_min_context(32000);
        let output = apply(&catalogue(), &params);
        assert_eq!(
            ids(&output),
            vec!["anthropic/claude-3", "google/gemini-pro:free-beta", "openrouter-auto"]
        );
    }

    #[test]
    fn test_min_context_excludes_missing_length() {
        let input = vec![ModelRecord::new("x/y")];
        let params = FilterParams::new().with_min_context(1);
        assert!(apply(&input, &params).is_empty());
    }

    #[test]
    fn test_modality_is_substring_match() {
        let params = FilterParams::new().with_modality("image");
        let output = apply(&catalogue(), &params);
        assert_eq!(
            ids(&output),
            vec!["anthropic/claude-3", "google/gemini-pro:free-beta"]
        );

        let params = FilterParams::new().with_modality("text");
        assert_eq!(apply(&catalogue(), &params).len(), 4);
    }

    #[test]
    fn test_modality_excludes_missing_architecture() {
        let params = FilterParams::new().with_modality("text");
        let output = apply(&catalogue(), &params);
        assert!(!ids(&output).contains(&"openrouter-auto"));
    }

    #[test]
    fn test_odd_shapes_are_only_excluded_by_stages_that_read_them() {
        let input: Vec<ModelRecord> = [
            json!({"id": "a/b", "context_length": "8192", "architecture": {"modality": "text->text"}}),
            json!({"id": "c/d", "context_length": 8192, "architecture": null}),
            json!({"id": "e/f", "context_length": null, "architecture": {"modality": 3}}),
        ]
        .into_iter()
        .map(|raw| ModelRecord::from_value(raw).unwrap())
        .collect();

        assert_eq!(apply(&input, &FilterParams::new()), input);
        assert_eq!(
            ids(&apply(&input, &FilterParams::new().with_providers(["a", "c", "e"]))),
            vec!["a/b", "c/d", "e/f"]
        );
        assert_eq!(
            ids(&apply(&input, &FilterParams::new().with_min_context(1))),
            vec!["c/d"]
        );
        assert_eq!(
            ids(&apply(&input, &FilterParams::new().with_modality("text"))),
            vec!["a/b"]
        );
    }

    #[test]
    fn test_strip_suffix_replaces_only_id() {
        let raw = json!({"id": "x/y:free", "context_length": null, "architecture": null});
        let input = vec![ModelRecord::from_value(raw).unwrap()];

        let output = apply(&input, &FilterParams::new().with_strip_suffix());
        assert_eq!(
            serde_json::to_value(&output[0]).unwrap(),
            json!({"id": "x/y", "context_length": null, "architecture": null})
        );
    }

    #[test]
    fn test_strip_suffix_copies_records() {
        let input = catalogue();
        let output = apply(&input, &FilterParams::new().with_strip_suffix());

        assert_eq!(
            ids(&output),
            vec![
                "openai/gpt-4",
                "openai/gpt-4",
                "anthropic/claude-3",
                "google/gemini-pro",
                "openrouter-auto"
            ]
        );
        assert_eq!(input[1].id, "openai/gpt-4:free");
        assert_eq!(input[3].id, "google/gemini-pro:free-beta");
        assert_eq!(output[1].context_length(), input[1].context_length());
    }

    #[test]
    fn test_strip_suffix_runs_after_filters() {
        // The free filter must still see the original id.
        let params = FilterParams::new().with_ignore_free().with_strip_suffix();
        let output = apply(&catalogue(), &params);
        assert_eq!(
            ids(&output),
            vec!["openai/gpt-4", "anthropic/claude-3", "openrouter-auto"]
        );
    }

    #[test]
    fn test_combined_filters() {
        let params = FilterParams::new()
            .with_providers(["openai", "anthropic"])
            .with_min_context(10000)
            .with_modality("text");
        let output = apply(&catalogue(), &params);
        assert_eq!(ids(&output), vec!["anthropic/claude-3"]);
    }

    #[test]
    fn test_keep_single_record() {
        let record = ModelRecord::new("openai/gpt-4:free");
        assert!(keep(&record, &FilterParams::new()));
        assert!(!keep(&record, &FilterParams::new().with_ignore_free()));
    }
}
