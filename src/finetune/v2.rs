//! Builders for the V2 fine-tuning API.
//!
//! Every operation posts to [`base_api_route`] and selects itself with the
//! `Action` query parameter. Optional arguments are carried in per-operation
//! option structs; a `None` field never reaches the payload.

use super::body::BodyBuilder;
use crate::consts::{
    FINETUNE_CREATE_JOB_ACTION, FINETUNE_CREATE_TASK_ACTION, FINETUNE_DELETE_JOB_ACTION,
    FINETUNE_DELETE_TASK_ACTION, FINETUNE_JOB_LIST_ACTION, FINETUNE_STOP_TASK_ACTION,
    FINETUNE_SUPPORTED_MODELS_ACTION, FINETUNE_TASK_DETAIL_ACTION, FINETUNE_TASK_LIST_ACTION,
    FINETUNE_V2_BASE_ROUTE_API,
};
use crate::types::{ConsoleRequest, Extra, JsonObject, ParameterScaleParam, TrainModeParam};
use crate::{Error, ErrorContext, Result};
use tracing::trace;

/// Route shared by every V2 fine-tuning action.
pub fn base_api_route() -> &'static str {
    FINETUNE_V2_BASE_ROUTE_API
}

fn action_request(action: &str) -> ConsoleRequest {
    ConsoleRequest::v2_action(base_api_route(), action)
}

/// Optional fields of [`create_job`].
#[derive(Debug, Clone, Default)]
pub struct CreateJobOptions {
    pub description: Option<String>,
    pub parameter_scale: Option<ParameterScaleParam>,
    pub hyper_parameter_config: Option<JsonObject>,
    pub extra: Extra,
}

/// Optional fields of [`create_task`]. `dataset_config` is required at call time.
#[derive(Debug, Clone, Default)]
pub struct CreateTaskOptions {
    /// Sent as `hyperParameterConfig`, an empty object when left default.
    pub hyper_params: JsonObject,
    pub dataset_config: Option<JsonObject>,
    pub increment_task_id: Option<String>,
    /// Only sent together with `increment_task_id`.
    pub increment_checkpoint_step: Option<i64>,
    /// Custom-mode training model settings.
    pub model_config: Option<JsonObject>,
    /// Private resource pool selection.
    pub resource_config: Option<JsonObject>,
    /// Corpus mixing for data enhancement.
    pub corpus_config: Option<JsonObject>,
    pub extra: Extra,
}

impl CreateTaskOptions {
    pub fn with_dataset_config(dataset_config: JsonObject) -> Self {
        Self {
            dataset_config: Some(dataset_config),
            ..Default::default()
        }
    }
}

/// Filters and paging of [`job_list`].
#[derive(Debug, Clone, Default)]
pub struct JobListOptions {
    pub train_mode: Option<TrainModeParam>,
    /// Job id to start the page after.
    pub marker: Option<String>,
    pub max_keys: Option<u32>,
    pub page_reverse: Option<bool>,
    /// Base model name.
    pub model: Option<String>,
    pub extra: Extra,
}

/// Paging of [`task_list`].
#[derive(Debug, Clone, Default)]
pub struct TaskListOptions {
    pub marker: Option<String>,
    pub max_keys: Option<u32>,
    pub page_reverse: Option<bool>,
    pub extra: Extra,
}

/// Create a fine-tuning job. A job may later hold many tasks.
///
/// `train_mode` accepts a [`TrainMode`](crate::consts::TrainMode), a string, or a
/// JSON value; a JSON value that is not a string fails with
/// [`Error::InvalidType`] and no request is built.
pub fn create_job<M>(
    name: &str,
    model: &str,
    train_mode: M,
    options: CreateJobOptions,
) -> Result<ConsoleRequest>
where
    M: TryInto<TrainModeParam>,
    Error: From<M::Error>,
{
    let train_mode: TrainModeParam = train_mode.try_into()?;
    let CreateJobOptions {
        description,
        parameter_scale,
        hyper_parameter_config,
        extra,
    } = options;

    let body = BodyBuilder::with_extra(extra)
        .set("name", name)
        .set("model", model)
        .set("trainMode", train_mode)
        .set_opt("description", description)
        .set_opt("parameterScale", parameter_scale)
        .set_opt("hyperParameterConfig", hyper_parameter_config)
        .build();
    trace!(job_name = name, model, "built v2 create_job body");
    Ok(action_request(FINETUNE_CREATE_JOB_ACTION).with_body(body))
}

/// Create a fine-tuning task under `job_id`.
///
/// Fails with a validation error when `options.dataset_config` is absent.
pub fn create_task<S>(
    job_id: &str,
    params_scale: S,
    options: CreateTaskOptions,
) -> Result<ConsoleRequest>
where
    S: TryInto<ParameterScaleParam>,
    Error: From<S::Error>,
{
    let CreateTaskOptions {
        hyper_params,
        dataset_config,
        increment_task_id,
        increment_checkpoint_step,
        model_config,
        resource_config,
        corpus_config,
        extra,
    } = options;

    let dataset_config = dataset_config.ok_or_else(|| {
        Error::validation_with_context(
            "dataset_config cannot be empty",
            ErrorContext::new()
                .with_field_path("dataset_config")
                .with_source("finetune.v2.create_task"),
        )
    })?;
    let params_scale: ParameterScaleParam = params_scale.try_into()?;

    // A checkpoint step means nothing without the task it resumes from.
    let increment_checkpoint_step = increment_task_id
        .as_ref()
        .and(increment_checkpoint_step);

    let body = BodyBuilder::with_extra(extra)
        .set("jobId", job_id)
        .set("parameterScale", params_scale)
        .set("hyperParameterConfig", hyper_params)
        .set("datasetConfig", dataset_config)
        .set_opt("incrementTaskId", increment_task_id)
        .set_opt("incrementCheckpointStep", increment_checkpoint_step)
        .set_opt("modelConfig", model_config)
        .set_opt("resourceConfig", resource_config)
        .set_opt("corpusConfig", corpus_config)
        .build();
    Ok(action_request(FINETUNE_CREATE_TASK_ACTION).with_body(body))
}

/// List fine-tuning jobs. Absent filters are left out, even when `extra`
/// carries the same key; `max_keys = 0` and `page_reverse = false` are sent as given.
pub fn job_list(options: JobListOptions) -> ConsoleRequest {
    let JobListOptions {
        train_mode,
        marker,
        max_keys,
        page_reverse,
        model,
        extra,
    } = options;

    let body = BodyBuilder::with_extra(extra)
        .set_or_remove("trainModel", train_mode)
        .set_or_remove("marker", marker)
        .set_or_remove("maxKeys", max_keys)
        .set_or_remove("pageReverse", page_reverse)
        .set_or_remove("model", model)
        .without_nulls()
        .build();
    action_request(FINETUNE_JOB_LIST_ACTION).with_body(body)
}

/// List the tasks of one job.
pub fn task_list(job_id: &str, options: TaskListOptions) -> ConsoleRequest {
    let TaskListOptions {
        marker,
        max_keys,
        page_reverse,
        extra,
    } = options;

    let body = BodyBuilder::with_extra(extra)
        .set("jobId", job_id)
        .set_or_remove("marker", marker)
        .set_or_remove("maxKeys", max_keys)
        .set_or_remove("pageReverse", page_reverse)
        .without_nulls()
        .build();
    action_request(FINETUNE_TASK_LIST_ACTION).with_body(body)
}

fn task_action(action: &str, task_id: &str, extra: Extra) -> ConsoleRequest {
    let body = BodyBuilder::with_extra(extra).set("taskId", task_id).build();
    action_request(action).with_body(body)
}

pub fn task_detail(task_id: &str, extra: Extra) -> ConsoleRequest {
    task_action(FINETUNE_TASK_DETAIL_ACTION, task_id, extra)
}

pub fn stop_task(task_id: &str, extra: Extra) -> ConsoleRequest {
    task_action(FINETUNE_STOP_TASK_ACTION, task_id, extra)
}

pub fn delete_task(task_id: &str, extra: Extra) -> ConsoleRequest {
    task_action(FINETUNE_DELETE_TASK_ACTION, task_id, extra)
}

pub fn delete_job(job_id: &str, extra: Extra) -> ConsoleRequest {
    let body = BodyBuilder::with_extra(extra).set("jobId", job_id).build();
    action_request(FINETUNE_DELETE_JOB_ACTION).with_body(body)
}

/// Models that can be fine-tuned, with their trainable parameters.
pub fn supported_models(extra: Extra) -> ConsoleRequest {
    action_request(FINETUNE_SUPPORTED_MODELS_ACTION).with_body(extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{TrainMode, TrainParameterScale};
    use crate::types::HttpMethod;
    use serde_json::{json, Value};

    fn obj(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap_or_default()
    }

    fn dataset() -> JsonObject {
        obj(json!({
            "sourceType": "Platform",
            "datasets": [{"datasetId": "ds-1"}],
            "splitRatio": 20
        }))
    }

    #[test]
    fn create_job_required_only() {
        let req = create_job("job", "ERNIE-Speed", TrainMode::Sft, CreateJobOptions::default())
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "/v2/finetuning");
        assert_eq!(req.action(), Some("CreateFineTuningJob"));
        assert_eq!(
            Value::Object(req.json_body),
            json!({"name": "job", "model": "ERNIE-Speed", "trainMode": "SFT"})
        );
    }

    #[test]
    fn create_job_raw_string_train_mode() {
        let req = create_job("job", "m", "PostPretrain", CreateJobOptions::default()).unwrap();
        assert_eq!(req.json_body["trainMode"], json!("PostPretrain"));
        let req = create_job("job", "m", String::from("custom"), CreateJobOptions::default())
            .unwrap();
        assert_eq!(req.json_body["trainMode"], json!("custom"));
    }

    #[test]
    fn create_job_rejects_non_string_json_train_mode() {
        let err = create_job("job", "m", json!(42), CreateJobOptions::default()).unwrap_err();
        match err {
            Error::InvalidType { expected, received } => {
                assert_eq!(expected, "string or TrainMode");
                assert_eq!(received, "number");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn create_job_optional_fields() {
        let req = create_job(
            "job",
            "ERNIE-Speed",
            TrainMode::Dpo,
            CreateJobOptions {
                description: Some("desc".to_string()),
                parameter_scale: Some("LoRA".into()),
                hyper_parameter_config: Some(obj(json!({"epoch": 2}))),
                extra: obj(json!({"model": "ignored", "tag": "x"})),
            },
        )
        .unwrap();
        assert_eq!(
            Value::Object(req.json_body),
            json!({
                "name": "job",
                "model": "ERNIE-Speed",
                "trainMode": "DPO",
                "description": "desc",
                "parameterScale": "LoRA",
                "hyperParameterConfig": {"epoch": 2},
                "tag": "x"
            })
        );
    }

    #[test]
    fn create_job_parameter_scale_from_enum() {
        let req = create_job(
            "job",
            "m",
            TrainMode::Sft,
            CreateJobOptions {
                parameter_scale: Some(TrainParameterScale::FullFineTuning.into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(req.json_body["parameterScale"], json!("FullFineTuning"));
    }

    #[test]
    fn create_task_requires_dataset_config() {
        let err = create_task("job-1", TrainParameterScale::LoRa, CreateTaskOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert_eq!(
            err.context().and_then(|c| c.field_path.as_deref()),
            Some("dataset_config")
        );
    }

    #[test]
    fn create_task_dataset_checked_before_scale() {
        let err = create_task("job-1", json!(1), CreateTaskOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn create_task_required_only() {
        let req = create_task(
            "job-1",
            TrainParameterScale::FullFineTuning,
            CreateTaskOptions::with_dataset_config(dataset()),
        )
        .unwrap();
        assert_eq!(req.action(), Some("CreateFineTuningTask"));
        assert_eq!(
            Value::Object(req.json_body),
            json!({
                "jobId": "job-1",
                "parameterScale": "FullFineTuning",
                "hyperParameterConfig": {},
                "datasetConfig": Value::Object(dataset()),
            })
        );
    }

    #[test]
    fn checkpoint_step_needs_increment_task() {
        let req = create_task(
            "job-1",
            "LoRA",
            CreateTaskOptions {
                increment_checkpoint_step: Some(100),
                ..CreateTaskOptions::with_dataset_config(dataset())
            },
        )
        .unwrap();
        assert!(!req.json_body.contains_key("incrementCheckpointStep"));
        assert!(!req.json_body.contains_key("incrementTaskId"));

        let req = create_task(
            "job-1",
            "LoRA",
            CreateTaskOptions {
                increment_task_id: Some("task-0".to_string()),
                increment_checkpoint_step: Some(100),
                ..CreateTaskOptions::with_dataset_config(dataset())
            },
        )
        .unwrap();
        assert_eq!(req.json_body["incrementTaskId"], json!("task-0"));
        assert_eq!(req.json_body["incrementCheckpointStep"], json!(100));
    }

    #[test]
    fn create_task_independent_configs() {
        let req = create_task(
            "job-1",
            "LoRA",
            CreateTaskOptions {
                hyper_params: obj(json!({"epoch": 1, "learningRate": 0.0003})),
                resource_config: Some(obj(json!({"resourceId": "pool-1"}))),
                corpus_config: Some(obj(json!({"corpusProportion": "1:1"}))),
                ..CreateTaskOptions::with_dataset_config(dataset())
            },
        )
        .unwrap();
        assert_eq!(req.json_body["hyperParameterConfig"]["epoch"], json!(1));
        assert_eq!(req.json_body["resourceConfig"], json!({"resourceId": "pool-1"}));
        assert_eq!(req.json_body["corpusConfig"], json!({"corpusProportion": "1:1"}));
        assert!(!req.json_body.contains_key("modelConfig"));
    }

    #[test]
    fn job_list_empty_body() {
        let req = job_list(JobListOptions::default());
        assert_eq!(req.action(), Some("DescribeFineTuningJobs"));
        assert!(req.json_body.is_empty());
    }

    #[test]
    fn job_list_keeps_falsy_values() {
        let req = job_list(JobListOptions {
            train_mode: Some(TrainMode::PostPretrain.into()),
            max_keys: Some(0),
            page_reverse: Some(false),
            extra: obj(json!({"marker": null, "status": "Running"})),
            ..Default::default()
        });
        assert_eq!(
            Value::Object(req.json_body),
            json!({
                "trainModel": "PostPretrain",
                "maxKeys": 0,
                "pageReverse": false,
                "status": "Running"
            })
        );
    }

    #[test]
    fn task_list_body() {
        let req = task_list(
            "job-1",
            TaskListOptions {
                marker: Some("task-9".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(req.action(), Some("DescribeFineTuningTasks"));
        assert_eq!(
            Value::Object(req.json_body),
            json!({"jobId": "job-1", "marker": "task-9"})
        );
    }

    #[test]
    fn list_filters_left_absent_drop_extra_keys() {
        let stale = obj(json!({"marker": "job-stale", "maxKeys": 5, "status": "Running"}));

        let req = job_list(JobListOptions {
            extra: stale.clone(),
            ..Default::default()
        });
        assert_eq!(Value::Object(req.json_body), json!({"status": "Running"}));

        let req = task_list(
            "job-1",
            TaskListOptions {
                extra: stale,
                ..Default::default()
            },
        );
        assert_eq!(
            Value::Object(req.json_body),
            json!({"jobId": "job-1", "status": "Running"})
        );
    }

    #[test]
    fn task_id_actions() {
        for (req, action) in [
            (task_detail("task-1", Extra::new()), "DescribeFineTuningTask"),
            (stop_task("task-1", Extra::new()), "StopFineTuningTask"),
            (delete_task("task-1", Extra::new()), "DeleteFineTuningTask"),
        ] {
            assert_eq!(req.url, "/v2/finetuning");
            assert_eq!(req.action(), Some(action));
            assert_eq!(Value::Object(req.json_body), json!({"taskId": "task-1"}));
        }
    }

    #[test]
    fn task_id_wins_over_extra() {
        let req = stop_task("task-1", obj(json!({"taskId": "task-2", "force": true})));
        assert_eq!(
            Value::Object(req.json_body),
            json!({"taskId": "task-1", "force": true})
        );
    }

    #[test]
    fn delete_job_body() {
        let req = delete_job("job-1", Extra::new());
        assert_eq!(req.action(), Some("DeleteFineTuningJob"));
        assert_eq!(Value::Object(req.json_body), json!({"jobId": "job-1"}));
    }

    #[test]
    fn supported_models_has_no_required_fields() {
        let req = supported_models(Extra::new());
        assert_eq!(req.action(), Some("DescribeFineTuningSupportModels"));
        assert!(req.json_body.is_empty());
    }
}
