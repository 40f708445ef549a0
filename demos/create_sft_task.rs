//! Create an SFT job, start a LoRA task on it and poll until it settles
//!
//! Usage:
//!   QIANFAN_BEARER_TOKEN=... DATASET_ID=ds-xxx cargo run --example create_sft_task

use std::time::Duration;

use qianfan_finetune::consts::{TrainMode, TrainParameterScale, TrainStatus};
use qianfan_finetune::{CreateJobOptions, CreateTaskOptions, Extra, FineTune};
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let dataset_id = std::env::var("DATASET_ID")?;
    let finetune = FineTune::from_env()?;
    let v2 = finetune.v2();

    let job = v2
        .create_job(
            "demo-sft",
            "ERNIE-Speed-8K",
            TrainMode::Sft,
            CreateJobOptions {
                description: Some("created by the create_sft_task demo".to_string()),
                ..Default::default()
            },
        )
        .await?;
    let job_id = job.result()["jobId"].as_str().unwrap_or_default().to_string();
    println!("job: {}", job_id);

    let dataset_config = json!({
        "sourceType": "Platform",
        "datasets": [{"datasetId": dataset_id, "samplingRate": 1}],
        "splitRatio": 20
    });
    let hyper_params = json!({"epoch": 1, "learningRate": 0.0003});
    let task = v2
        .create_task(
            &job_id,
            TrainParameterScale::LoRa,
            CreateTaskOptions {
                hyper_params: hyper_params.as_object().cloned().unwrap_or_default(),
                ..CreateTaskOptions::with_dataset_config(
                    dataset_config.as_object().cloned().unwrap_or_default(),
                )
            },
        )
        .await?;
    let task_id = task.result()["taskId"].as_str().unwrap_or_default().to_string();
    println!("task: {}", task_id);

    loop {
        let detail = v2.task_detail(&task_id, Extra::new()).await?;
        let status = detail.result()["runStatus"].as_str().unwrap_or_default();
        let progress = &detail.result()["runProgress"];
        println!("status: {} progress: {}", status, progress);

        match status.parse::<TrainStatus>() {
            Ok(s) if s.is_terminal() => break,
            _ => tokio::time::sleep(Duration::from_secs(30)).await,
        }
    }

    Ok(())
}
