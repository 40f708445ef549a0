//! Builders for the legacy fine-tune routes.
//!
//! Each route takes a fixed path and a flat JSON body. No validation beyond
//! the typed arguments is done here; the console rejects bad values itself.

use super::body::BodyBuilder;
use crate::consts::{
    FINETUNE_CREATE_JOB_API, FINETUNE_CREATE_TASK_API, FINETUNE_GET_JOB_API,
    FINETUNE_STOP_JOB_API,
};
use crate::types::{ConsoleRequest, Extra, JsonObject};
use tracing::trace;

/// Fetch one job of a fine-tuning task.
///
/// API Doc: https://cloud.baidu.com/doc/WENXINWORKSHOP/s/wlmrgowee
pub fn get_job(task_id: i64, job_id: i64, extra: Extra) -> ConsoleRequest {
    let body = BodyBuilder::with_extra(extra)
        .set("taskId", task_id)
        .set("jobId", job_id)
        .build();
    ConsoleRequest::post(FINETUNE_GET_JOB_API).with_body(body)
}

/// Create a fine-tuning task.
///
/// `base_train_type` and `train_type` name the base model and the variant to
/// train, e.g. "ERNIE-Speed-8K".
///
/// API Doc: https://cloud.baidu.com/doc/WENXINWORKSHOP/s/almrgn397
pub fn create_task(
    name: &str,
    base_train_type: &str,
    train_type: &str,
    description: Option<&str>,
    extra: Extra,
) -> ConsoleRequest {
    let body = BodyBuilder::with_extra(extra)
        .set("name", name)
        .set("baseTrainType", base_train_type)
        .set("trainType", train_type)
        .set_opt("description", description)
        .build();
    trace!(task_name = name, "built legacy create_task body");
    ConsoleRequest::post(FINETUNE_CREATE_TASK_API).with_body(body)
}

/// Create a job from a caller-assembled description.
///
/// `job` carries the documented fields as-is; `extra` is layered on top and
/// wins on collisions since there are no named fields here.
///
/// API Doc: https://cloud.baidu.com/doc/WENXINWORKSHOP/s/mlmrgo4yx
pub fn create_job(job: JsonObject, extra: Extra) -> ConsoleRequest {
    let mut body = job;
    body.extend(extra);
    ConsoleRequest::post(FINETUNE_CREATE_JOB_API).with_body(body)
}

/// Stop a running job.
///
/// API Doc: https://cloud.baidu.com/doc/WENXINWORKSHOP/s/2lnlebz15
pub fn stop_job(task_id: &str, job_id: &str, extra: Extra) -> ConsoleRequest {
    let body = BodyBuilder::with_extra(extra)
        .set("taskId", task_id)
        .set("jobId", job_id)
        .build();
    ConsoleRequest::post(FINETUNE_STOP_JOB_API).with_body(body)
}
