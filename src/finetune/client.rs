//! Dispatching clients over the request builders.

use super::legacy;
use super::v2::{self, CreateJobOptions, CreateTaskOptions, JobListOptions, TaskListOptions};
use crate::config::ConsoleConfig;
use crate::transport::{ConsoleTransport, HttpTransport};
use crate::types::{
    ConsoleRequest, ConsoleResponse, Extra, JsonObject, ParameterScaleParam, TrainModeParam,
};
use crate::{Error, Result};
use tracing::debug;

/// Fine-tuning console client.
///
/// Methods build the request with the matching function in
/// [`legacy`](super::legacy) and hand it to the transport. Local validation
/// errors are returned before the transport is touched; transport and API
/// errors are returned unchanged.
///
/// ```rust,no_run
/// use qianfan_finetune::{FineTune, CreateTaskOptions};
/// use qianfan_finetune::consts::{TrainMode, TrainParameterScale};
/// use serde_json::json;
///
/// # async fn run() -> qianfan_finetune::Result<()> {
/// let finetune = FineTune::from_env()?;
/// let job = finetune
///     .v2()
///     .create_job("demo", "ERNIE-Speed-8K", TrainMode::Sft, Default::default())
///     .await?;
/// let job_id = job.result()["jobId"].as_str().unwrap_or_default().to_string();
///
/// let dataset = json!({"sourceType": "Platform", "datasets": [{"datasetId": "ds-1"}]});
/// finetune
///     .v2()
///     .create_task(
///         &job_id,
///         TrainParameterScale::LoRa,
///         CreateTaskOptions::with_dataset_config(
///             dataset.as_object().cloned().unwrap_or_default(),
///         ),
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FineTune<T> {
    transport: T,
}

impl FineTune<HttpTransport> {
    /// Client over HTTP, configured from `QIANFAN_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(HttpTransport::from_env()?))
    }

    pub fn with_config(config: &ConsoleConfig) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(config)?))
    }
}

impl<T: ConsoleTransport> FineTune<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The V2 surface sharing this client's transport.
    pub fn v2(&self) -> FineTuneV2<'_, T> {
        FineTuneV2 { inner: self }
    }

    async fn dispatch(&self, op: &'static str, request: ConsoleRequest) -> Result<ConsoleResponse> {
        debug!(operation = op, route = %request.url, "finetune request");
        self.transport.send(request).await
    }

    pub async fn get_job(
        &self,
        task_id: i64,
        job_id: i64,
        extra: Extra,
    ) -> Result<ConsoleResponse> {
        self.dispatch("get_job", legacy::get_job(task_id, job_id, extra)).await
    }

    pub async fn create_task(
        &self,
        name: &str,
        base_train_type: &str,
        train_type: &str,
        description: Option<&str>,
        extra: Extra,
    ) -> Result<ConsoleResponse> {
        let request = legacy::create_task(name, base_train_type, train_type, description, extra);
        self.dispatch("create_task", request).await
    }

    pub async fn create_job(&self, job: JsonObject, extra: Extra) -> Result<ConsoleResponse> {
        self.dispatch("create_job", legacy::create_job(job, extra)).await
    }

    pub async fn stop_job(
        &self,
        task_id: &str,
        job_id: &str,
        extra: Extra,
    ) -> Result<ConsoleResponse> {
        self.dispatch("stop_job", legacy::stop_job(task_id, job_id, extra)).await
    }
}

/// V2 fine-tuning operations, borrowed from a [`FineTune`] client.
#[derive(Debug, Clone, Copy)]
pub struct FineTuneV2<'a, T> {
    inner: &'a FineTune<T>,
}

impl<'a, T: ConsoleTransport> FineTuneV2<'a, T> {
    pub fn base_api_route(&self) -> &'static str {
        v2::base_api_route()
    }

    async fn dispatch(&self, op: &'static str, request: ConsoleRequest) -> Result<ConsoleResponse> {
        self.inner.dispatch(op, request).await
    }

    pub async fn create_job<M>(
        &self,
        name: &str,
        model: &str,
        train_mode: M,
        options: CreateJobOptions,
    ) -> Result<ConsoleResponse>
    where
        M: TryInto<TrainModeParam>,
        Error: From<M::Error>,
    {
        let request = v2::create_job(name, model, train_mode, options)?;
        self.dispatch("v2.create_job", request).await
    }

    pub async fn create_task<S>(
        &self,
        job_id: &str,
        params_scale: S,
        options: CreateTaskOptions,
    ) -> Result<ConsoleResponse>
    where
        S: TryInto<ParameterScaleParam>,
        Error: From<S::Error>,
    {
        let request = v2::create_task(job_id, params_scale, options)?;
        self.dispatch("v2.create_task", request).await
    }

    pub async fn job_list(&self, options: JobListOptions) -> Result<ConsoleResponse> {
        self.dispatch("v2.job_list", v2::job_list(options)).await
    }

    pub async fn task_list(
        &self,
        job_id: &str,
        options: TaskListOptions,
    ) -> Result<ConsoleResponse> {
        self.dispatch("v2.task_list", v2::task_list(job_id, options)).await
    }

    pub async fn task_detail(&self, task_id: &str, extra: Extra) -> Result<ConsoleResponse> {
        self.dispatch("v2.task_detail", v2::task_detail(task_id, extra)).await
    }

    pub async fn stop_task(&self, task_id: &str, extra: Extra) -> Result<ConsoleResponse> {
        self.dispatch("v2.stop_task", v2::stop_task(task_id, extra)).await
    }

    pub async fn delete_task(&self, task_id: &str, extra: Extra) -> Result<ConsoleResponse> {
        self.dispatch("v2.delete_task", v2::delete_task(task_id, extra)).await
    }

    pub async fn delete_job(&self, job_id: &str, extra: Extra) -> Result<ConsoleResponse> {
        self.dispatch("v2.delete_job", v2::delete_job(job_id, extra)).await
    }

    pub async fn supported_models(&self, extra: Extra) -> Result<ConsoleResponse> {
        self.dispatch("v2.supported_models", v2::supported_models(extra)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TrainMode;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Records every request and answers with a fixed body.
    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<ConsoleRequest>>,
    }

    impl RecordingTransport {
        fn sent(&self) -> Vec<ConsoleRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ConsoleTransport for RecordingTransport {
        async fn send(&self, request: ConsoleRequest) -> Result<ConsoleResponse> {
            self.sent.lock().unwrap().push(request);
            Ok(ConsoleResponse::new(200, json!({"requestId": "r-1", "result": {}})))
        }
    }

    #[tokio::test]
    async fn legacy_methods_send_built_requests() {
        let transport = Arc::new(RecordingTransport::default());
        let finetune = FineTune::new(transport.clone());

        finetune.get_job(1, 2, Extra::new()).await.unwrap();
        finetune.stop_job("1", "2", Extra::new()).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0], legacy::get_job(1, 2, Extra::new()));
        assert_eq!(sent[1], legacy::stop_job("1", "2", Extra::new()));
    }

    #[tokio::test]
    async fn v2_methods_send_built_requests() {
        let transport = Arc::new(RecordingTransport::default());
        let finetune = FineTune::new(transport.clone());
        let v2 = finetune.v2();
        assert_eq!(v2.base_api_route(), "/v2/finetuning");

        let resp = v2
            .create_job("job", "ERNIE-Speed", TrainMode::Sft, CreateJobOptions::default())
            .await
            .unwrap();
        assert_eq!(resp.request_id.as_deref(), Some("r-1"));
        v2.supported_models(Extra::new()).await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0].action(), Some("CreateFineTuningJob"));
        assert_eq!(sent[1].action(), Some("DescribeFineTuningSupportModels"));
    }

    #[tokio::test]
    async fn local_errors_skip_the_transport() {
        let transport = Arc::new(RecordingTransport::default());
        let finetune = FineTune::new(transport.clone());

        let err = finetune
            .v2()
            .create_job("job", "m", json!(false), CreateJobOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidType { .. }));

        let err = finetune
            .v2()
            .create_task("job-1", "LoRA", CreateTaskOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));

        assert!(transport.sent().is_empty());
    }
}
